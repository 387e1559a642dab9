use std::sync::Arc;

use crate::config::Config;
use crate::errors::AppError;
use crate::mazes::store::MazeStore;
use crate::subscription::store::SubscriptionStore;
use crate::tier::PlanTier;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable maze persistence. Postgres when `DATABASE_URL` is set, in-memory otherwise.
    pub mazes: Arc<dyn MazeStore>,
    pub subscriptions: Arc<dyn SubscriptionStore>,
}

impl AppState {
    /// The plan tier a profile's edits and previews run under.
    pub async fn plan_tier(&self, profile_id: &str) -> Result<PlanTier, AppError> {
        Ok(self.subscriptions.get(profile_id).await?.plan_tier())
    }

    #[cfg(test)]
    pub fn in_memory() -> Self {
        use crate::mazes::store::MemoryMazeStore;
        use crate::subscription::store::MemorySubscriptionStore;

        AppState {
            config: Config::for_tests(),
            mazes: Arc::new(MemoryMazeStore::new()),
            subscriptions: Arc::new(MemorySubscriptionStore::new()),
        }
    }
}
