use axum::Json;
use serde::{Deserialize, Serialize};

use crate::card::{compose_card, CardComposition, CardInput};
use crate::models::maze::MazeConfiguration;
use crate::tier::PlanTier;

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    #[serde(default)]
    pub plan_tier: PlanTier,
    pub configuration: MazeConfiguration,
}

/// POST /api/v1/card/preview
/// Composes an unsaved configuration. Nothing is gated or persisted.
pub async fn handle_preview(Json(req): Json<PreviewRequest>) -> Json<CardComposition> {
    let input = CardInput::from_configuration(&req.configuration);
    Json(compose_card(&input, req.plan_tier))
}
