pub mod health;

use axum::{
    routing::{get, patch, post, put},
    Router,
};
use serde::Deserialize;

use crate::card::handlers as card;
use crate::mazes::handlers as mazes;
use crate::state::AppState;
use crate::subscription::handlers as subscription;

/// `?profile_id=` on profile-scoped routes. Absent means the demo profile.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileQuery {
    pub profile_id: Option<String>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Mazes
        .route(
            "/api/v1/mazes",
            get(mazes::handle_list_mazes).post(mazes::handle_save_maze),
        )
        .route(
            "/api/v1/mazes/:id",
            get(mazes::handle_get_maze).delete(mazes::handle_delete_maze),
        )
        .route("/api/v1/mazes/:id/card", get(mazes::handle_maze_card))
        // Links
        .route("/api/v1/mazes/:id/links", post(mazes::handle_add_link))
        .route(
            "/api/v1/mazes/:id/links/:link_id",
            patch(mazes::handle_update_link).delete(mazes::handle_remove_link),
        )
        .route(
            "/api/v1/mazes/:id/links/:link_id/position",
            put(mazes::handle_change_link_position),
        )
        // Card composition
        .route("/api/v1/card/preview", post(card::handle_preview))
        // Plans
        .route(
            "/api/v1/subscription",
            get(subscription::handle_get_subscription).put(subscription::handle_update_subscription),
        )
        .route("/api/v1/features", get(subscription::handle_features))
        .with_state(state)
}
