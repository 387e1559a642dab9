use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::tier::PlanTier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    #[default]
    Free,
    Premium,
}

impl SubscriptionTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionTier::Free => "free",
            SubscriptionTier::Premium => "premium",
        }
    }

    /// Unknown or empty values read from the database degrade to `Free`.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "premium" => SubscriptionTier::Premium,
            _ => SubscriptionTier::Free,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionType {
    User,
    Media,
}

impl SubscriptionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionType::User => "user",
            SubscriptionType::Media => "media",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "user" => Some(SubscriptionType::User),
            "media" => Some(SubscriptionType::Media),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub tier: SubscriptionTier,
    pub subscription_type: Option<SubscriptionType>,
}

impl Subscription {
    pub fn is_premium(&self) -> bool {
        self.tier == SubscriptionTier::Premium
    }

    pub fn plan_tier(&self) -> PlanTier {
        PlanTier::from_subscription(self.tier, self.subscription_type)
    }
}

/// Subscription columns of the `profiles` table.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileSubscriptionRow {
    pub subscription_tier: Option<String>,
    pub subscription_type: Option<String>,
}

impl From<ProfileSubscriptionRow> for Subscription {
    fn from(row: ProfileSubscriptionRow) -> Self {
        Subscription {
            tier: row
                .subscription_tier
                .as_deref()
                .map(SubscriptionTier::parse)
                .unwrap_or_default(),
            subscription_type: row.subscription_type.as_deref().and_then(SubscriptionType::parse),
        }
    }
}
