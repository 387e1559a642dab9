use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::card::{compose_card, CardComposition, CardInput};
use crate::errors::AppError;
use crate::links::{self, LinkDraft, LinkError, LinkPatch};
use crate::mazes::store::MazeEdit;
use crate::mazes::validation::validate_draft;
use crate::models::maze::{Link, LinkPosition, Maze, MazeDraft};
use crate::routes::ProfileQuery;
use crate::state::AppState;
use crate::tier::{available_positions, check_configuration, max_mazes_for_tier, Feature, PlanTier};

#[derive(Debug, Deserialize, Serialize)]
pub struct PositionRequest {
    pub position: LinkPosition,
}

fn upgrade(feature: Feature) -> AppError {
    AppError::UpgradeRequired {
        feature: feature.display_name().to_string(),
    }
}

async fn find_maze(state: &AppState, id: Uuid) -> Result<Maze, AppError> {
    state
        .mazes
        .get_maze(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Maze {id} not found")))
}

async fn owner_tier(state: &AppState, id: Uuid) -> Result<PlanTier, AppError> {
    let maze = find_maze(state, id).await?;
    state.plan_tier(&maze.profile_id).await
}

fn find_link(maze: &Maze, link_id: &str) -> Result<Link, AppError> {
    maze.configuration
        .links
        .iter()
        .find(|l| l.id == link_id)
        .cloned()
        .ok_or_else(|| LinkError::NotFound(link_id.to_string()).into())
}

/// Capacity on a free card is an upsell; on paid tiers it is a hard limit.
fn link_error(err: LinkError, tier: PlanTier) -> AppError {
    match err {
        LinkError::CapacityReached { .. } if !tier.is_paid() => upgrade(Feature::ExtraLinks),
        other => other.into(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Mazes
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/mazes
pub async fn handle_list_mazes(
    State(state): State<AppState>,
    Query(params): Query<ProfileQuery>,
) -> Result<Json<Vec<Maze>>, AppError> {
    let profile_id = state.config.profile_or_demo(params.profile_id);
    let mazes = state.mazes.load_mazes(&profile_id).await?;
    Ok(Json(mazes))
}

/// POST /api/v1/mazes
pub async fn handle_save_maze(
    State(state): State<AppState>,
    Query(params): Query<ProfileQuery>,
    Json(draft): Json<MazeDraft>,
) -> Result<(StatusCode, Json<Maze>), AppError> {
    let profile_id = state.config.profile_or_demo(params.profile_id);
    validate_draft(&draft)?;

    let tier = state.plan_tier(&profile_id).await?;
    if let Err(e) = check_configuration(&draft.configuration, tier) {
        warn!(profile_id = %profile_id, ?tier, "rejected configuration: {e}");
        return Err(e);
    }

    let Some(id) = draft.id else {
        let maze = state
            .mazes
            .create_maze(&profile_id, &draft, max_mazes_for_tier(tier))
            .await?
            .ok_or_else(|| upgrade(Feature::MoreMazes))?;
        return Ok((StatusCode::CREATED, Json(maze)));
    };

    let edit: MazeEdit = Box::new(move |maze: &mut Maze| {
        if maze.profile_id != profile_id {
            return Err(AppError::NotFound(format!("Maze {id} not found")));
        }
        maze.title = draft.title;
        maze.description = draft.description;
        maze.configuration = draft.configuration;
        Ok(())
    });
    let maze = state.mazes.modify_maze(id, edit).await?;
    Ok((StatusCode::OK, Json(maze)))
}

/// GET /api/v1/mazes/:id
pub async fn handle_get_maze(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Maze>, AppError> {
    Ok(Json(find_maze(&state, id).await?))
}

/// DELETE /api/v1/mazes/:id
pub async fn handle_delete_maze(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.mazes.delete_maze(id).await? {
        return Err(AppError::NotFound(format!("Maze {id} not found")));
    }
    info!(maze_id = %id, "maze deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/mazes/:id/card
pub async fn handle_maze_card(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CardComposition>, AppError> {
    let maze = find_maze(&state, id).await?;
    let tier = state.plan_tier(&maze.profile_id).await?;
    let input = CardInput::from_configuration(&maze.configuration);
    Ok(Json(compose_card(&input, tier)))
}

// ────────────────────────────────────────────────────────────────────────────
// Links
//
// Edits go through `MazeStore::modify_maze` so each one applies to the latest
// stored links.
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/mazes/:id/links
pub async fn handle_add_link(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(draft): Json<LinkDraft>,
) -> Result<(StatusCode, Json<Link>), AppError> {
    let tier = owner_tier(&state, id).await?;

    let edit: MazeEdit = Box::new(move |maze: &mut Maze| {
        links::add_link(&mut maze.configuration.links, tier, draft)
            .map(|_| ())
            .map_err(|e| link_error(e, tier))
    });
    let saved = state.mazes.modify_maze(id, edit).await?;

    // New links are appended.
    let link = saved
        .configuration
        .links
        .last()
        .cloned()
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("maze {id} lost its new link")))?;

    info!(maze_id = %id, link_id = %link.id, "link added");
    Ok((StatusCode::CREATED, Json(link)))
}

/// PATCH /api/v1/mazes/:id/links/:link_id
pub async fn handle_update_link(
    State(state): State<AppState>,
    Path((id, link_id)): Path<(Uuid, String)>,
    Json(patch): Json<LinkPatch>,
) -> Result<Json<Link>, AppError> {
    let target = link_id.clone();
    let edit: MazeEdit = Box::new(move |maze: &mut Maze| {
        links::update_link(&mut maze.configuration.links, &target, patch)?;
        Ok(())
    });
    let saved = state.mazes.modify_maze(id, edit).await?;
    Ok(Json(find_link(&saved, &link_id)?))
}

/// PUT /api/v1/mazes/:id/links/:link_id/position
pub async fn handle_change_link_position(
    State(state): State<AppState>,
    Path((id, link_id)): Path<(Uuid, String)>,
    Json(req): Json<PositionRequest>,
) -> Result<Json<Vec<Link>>, AppError> {
    let tier = owner_tier(&state, id).await?;
    if !available_positions(tier).contains(&req.position) {
        return Err(upgrade(Feature::ExtraLinks));
    }

    let edit: MazeEdit = Box::new(move |maze: &mut Maze| {
        links::change_position(&mut maze.configuration.links, &link_id, req.position)?;
        Ok(())
    });
    let saved = state.mazes.modify_maze(id, edit).await?;
    Ok(Json(saved.configuration.links))
}

/// DELETE /api/v1/mazes/:id/links/:link_id
pub async fn handle_remove_link(
    State(state): State<AppState>,
    Path((id, link_id)): Path<(Uuid, String)>,
) -> Result<StatusCode, AppError> {
    let edit: MazeEdit = Box::new(move |maze: &mut Maze| {
        links::remove_link(&mut maze.configuration.links, &link_id)?;
        Ok(())
    });
    state.mazes.modify_maze(id, edit).await?;
    Ok(StatusCode::NO_CONTENT)
}
