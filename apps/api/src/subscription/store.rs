use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::RwLock;
use tracing::info;

use crate::errors::AppError;
use crate::models::subscription::{ProfileSubscriptionRow, Subscription};

/// Source of a profile's subscription. A profile with no record is free.
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    async fn get(&self, profile_id: &str) -> Result<Subscription, AppError>;

    async fn update(
        &self,
        profile_id: &str,
        subscription: Subscription,
    ) -> Result<Subscription, AppError>;
}

pub struct PgSubscriptionStore {
    pool: PgPool,
}

impl PgSubscriptionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionStore for PgSubscriptionStore {
    async fn get(&self, profile_id: &str) -> Result<Subscription, AppError> {
        let row: Option<ProfileSubscriptionRow> = sqlx::query_as(
            "SELECT subscription_tier, subscription_type FROM profiles WHERE id = $1",
        )
        .bind(profile_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Subscription::from).unwrap_or_default())
    }

    async fn update(
        &self,
        profile_id: &str,
        subscription: Subscription,
    ) -> Result<Subscription, AppError> {
        let row: ProfileSubscriptionRow = sqlx::query_as(
            r#"
            INSERT INTO profiles (id, subscription_tier, subscription_type)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE
            SET subscription_tier = EXCLUDED.subscription_tier,
                subscription_type = EXCLUDED.subscription_type
            RETURNING subscription_tier, subscription_type
            "#,
        )
        .bind(profile_id)
        .bind(subscription.tier.as_str())
        .bind(subscription.subscription_type.map(|t| t.as_str()))
        .fetch_one(&self.pool)
        .await?;

        info!(profile_id, tier = subscription.tier.as_str(), "subscription updated");
        Ok(row.into())
    }
}

#[derive(Default)]
pub struct MemorySubscriptionStore {
    subscriptions: RwLock<HashMap<String, Subscription>>,
}

impl MemorySubscriptionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubscriptionStore for MemorySubscriptionStore {
    async fn get(&self, profile_id: &str) -> Result<Subscription, AppError> {
        Ok(self
            .subscriptions
            .read()
            .await
            .get(profile_id)
            .copied()
            .unwrap_or_default())
    }

    async fn update(
        &self,
        profile_id: &str,
        subscription: Subscription,
    ) -> Result<Subscription, AppError> {
        self.subscriptions
            .write()
            .await
            .insert(profile_id.to_string(), subscription);
        Ok(subscription)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::subscription::{SubscriptionTier, SubscriptionType};
    use crate::tier::PlanTier;

    #[tokio::test]
    async fn test_unknown_profile_is_free() {
        let store = MemorySubscriptionStore::new();
        let sub = store.get("nobody").await.unwrap();
        assert!(!sub.is_premium());
        assert_eq!(sub.plan_tier(), PlanTier::Free);
    }

    #[tokio::test]
    async fn test_update_then_get() {
        let store = MemorySubscriptionStore::new();
        let premium = Subscription {
            tier: SubscriptionTier::Premium,
            subscription_type: Some(SubscriptionType::Media),
        };
        store.update("p1", premium).await.unwrap();
        assert_eq!(store.get("p1").await.unwrap(), premium);
        assert_eq!(store.get("p2").await.unwrap(), Subscription::default());
    }
}
