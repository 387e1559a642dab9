//! Maze persistence behind the dashboard's load, save and delete calls.
//!
//! `AppState` holds an `Arc<dyn MazeStore>`: `PgMazeStore` when a database is
//! configured, `MemoryMazeStore` for the demo dashboard and tests.
//!
//! Every write is atomic with the read it depends on. Edits run under a row
//! lock (`modify_maze`) and creation counts and inserts under a per-profile
//! lock (`create_maze`), so concurrent requests never drop each other's
//! changes or overrun a quota.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::maze::{Maze, MazeDraft, MazeRow};

/// In-place change applied to a stored maze. Returning an error aborts the
/// write and leaves the stored maze untouched.
pub type MazeEdit = Box<dyn FnOnce(&mut Maze) -> Result<(), AppError> + Send>;

#[async_trait]
pub trait MazeStore: Send + Sync {
    /// All mazes of a profile, newest first.
    async fn load_mazes(&self, profile_id: &str) -> Result<Vec<Maze>, AppError>;

    async fn get_maze(&self, id: Uuid) -> Result<Option<Maze>, AppError>;

    /// Inserts a published maze unless the profile already holds `max_mazes`,
    /// in which case nothing is written and `None` comes back.
    async fn create_maze(
        &self,
        profile_id: &str,
        draft: &MazeDraft,
        max_mazes: usize,
    ) -> Result<Option<Maze>, AppError>;

    /// Applies `edit` to maze `id` and stores the result as published.
    async fn modify_maze(&self, id: Uuid, edit: MazeEdit) -> Result<Maze, AppError>;

    /// Returns false when nothing was deleted.
    async fn delete_maze(&self, id: Uuid) -> Result<bool, AppError>;
}

fn maze_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Maze {id} not found"))
}

// ────────────────────────────────────────────────────────────────────────────
// Postgres
// ────────────────────────────────────────────────────────────────────────────

pub struct PgMazeStore {
    pool: PgPool,
}

impl PgMazeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MazeStore for PgMazeStore {
    async fn load_mazes(&self, profile_id: &str) -> Result<Vec<Maze>, AppError> {
        let rows: Vec<MazeRow> = sqlx::query_as(
            "SELECT * FROM mazes WHERE profile_id = $1 ORDER BY created_at DESC",
        )
        .bind(profile_id)
        .fetch_all(&self.pool)
        .await?;

        debug!(profile_id, count = rows.len(), "loaded mazes");
        rows.into_iter().map(Maze::try_from).collect()
    }

    async fn get_maze(&self, id: Uuid) -> Result<Option<Maze>, AppError> {
        let row: Option<MazeRow> = sqlx::query_as("SELECT * FROM mazes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Maze::try_from).transpose()
    }

    async fn create_maze(
        &self,
        profile_id: &str,
        draft: &MazeDraft,
        max_mazes: usize,
    ) -> Result<Option<Maze>, AppError> {
        let configuration = serde_json::to_value(&draft.configuration)
            .map_err(|e| AppError::Internal(e.into()))?;

        let mut tx = self.pool.begin().await?;

        // Held until commit; concurrent creates for one profile queue here.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(profile_id)
            .execute(&mut *tx)
            .await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM mazes WHERE profile_id = $1")
            .bind(profile_id)
            .fetch_one(&mut *tx)
            .await?;
        if count.max(0) as usize >= max_mazes {
            debug!(profile_id, count, max_mazes, "maze quota reached");
            return Ok(None);
        }

        let row: MazeRow = sqlx::query_as(
            r#"
            INSERT INTO mazes (id, profile_id, title, description, configuration, is_published)
            VALUES ($1, $2, $3, $4, $5, TRUE)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(profile_id)
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(&configuration)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(maze_id = %row.id, profile_id, "maze created");
        Maze::try_from(row).map(Some)
    }

    async fn modify_maze(&self, id: Uuid, edit: MazeEdit) -> Result<Maze, AppError> {
        let mut tx = self.pool.begin().await?;

        let row: Option<MazeRow> = sqlx::query_as("SELECT * FROM mazes WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let mut maze = Maze::try_from(row.ok_or_else(|| maze_not_found(id))?)?;

        edit(&mut maze)?;

        let configuration = serde_json::to_value(&maze.configuration)
            .map_err(|e| AppError::Internal(e.into()))?;
        let row: MazeRow = sqlx::query_as(
            r#"
            UPDATE mazes
            SET title = $1, description = $2, configuration = $3,
                is_published = TRUE, updated_at = NOW()
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(&maze.title)
        .bind(&maze.description)
        .bind(&configuration)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(maze_id = %id, "maze updated");
        Maze::try_from(row)
    }

    async fn delete_maze(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM mazes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryMazeStore {
    mazes: RwLock<Vec<Maze>>,
}

impl MemoryMazeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MazeStore for MemoryMazeStore {
    async fn load_mazes(&self, profile_id: &str) -> Result<Vec<Maze>, AppError> {
        let mazes = self.mazes.read().await;
        // Inserts push to the back, so newest first is reverse insertion order.
        Ok(mazes
            .iter()
            .rev()
            .filter(|m| m.profile_id == profile_id)
            .cloned()
            .collect())
    }

    async fn get_maze(&self, id: Uuid) -> Result<Option<Maze>, AppError> {
        Ok(self.mazes.read().await.iter().find(|m| m.id == id).cloned())
    }

    async fn create_maze(
        &self,
        profile_id: &str,
        draft: &MazeDraft,
        max_mazes: usize,
    ) -> Result<Option<Maze>, AppError> {
        let mut mazes = self.mazes.write().await;
        if mazes.iter().filter(|m| m.profile_id == profile_id).count() >= max_mazes {
            return Ok(None);
        }

        let now = Utc::now();
        let maze = Maze {
            id: Uuid::new_v4(),
            profile_id: profile_id.to_string(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            configuration: draft.configuration.clone(),
            is_published: true,
            views: 0,
            created_at: now,
            updated_at: now,
        };
        mazes.push(maze.clone());
        Ok(Some(maze))
    }

    async fn modify_maze(&self, id: Uuid, edit: MazeEdit) -> Result<Maze, AppError> {
        let mut mazes = self.mazes.write().await;
        let stored = mazes
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| maze_not_found(id))?;

        let mut maze = stored.clone();
        edit(&mut maze)?;
        maze.is_published = true;
        maze.updated_at = Utc::now();
        *stored = maze.clone();
        Ok(maze)
    }

    async fn delete_maze(&self, id: Uuid) -> Result<bool, AppError> {
        let mut mazes = self.mazes.write().await;
        let before = mazes.len();
        mazes.retain(|m| m.id != id);
        Ok(mazes.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::task::JoinSet;

    use super::*;
    use crate::links::{add_link, LinkDraft};
    use crate::models::maze::MazeConfiguration;
    use crate::tier::PlanTier;

    fn draft(title: &str) -> MazeDraft {
        MazeDraft {
            id: None,
            title: title.to_string(),
            description: String::new(),
            configuration: MazeConfiguration::default(),
        }
    }

    fn retitle(title: &str) -> MazeEdit {
        let title = title.to_string();
        Box::new(move |maze: &mut Maze| {
            maze.title = title;
            Ok(())
        })
    }

    #[tokio::test]
    async fn test_memory_store_insert_then_load_newest_first() {
        let store = MemoryMazeStore::new();
        store.create_maze("p1", &draft("first"), 10).await.unwrap();
        store.create_maze("p1", &draft("second"), 10).await.unwrap();
        store.create_maze("p2", &draft("other"), 10).await.unwrap();

        let titles: Vec<String> = store
            .load_mazes("p1")
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.title)
            .collect();
        assert_eq!(titles, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn test_memory_store_create_respects_quota() {
        let store = MemoryMazeStore::new();
        assert!(store.create_maze("p1", &draft("one"), 1).await.unwrap().is_some());
        assert!(store.create_maze("p1", &draft("two"), 1).await.unwrap().is_none());
        assert!(store.create_maze("p2", &draft("two"), 1).await.unwrap().is_some());
        assert_eq!(store.load_mazes("p1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_creates_never_overrun_quota() {
        let store = Arc::new(MemoryMazeStore::new());
        let mut tasks = JoinSet::new();
        for i in 0..8 {
            let store = Arc::clone(&store);
            tasks.spawn(async move {
                store
                    .create_maze("p1", &draft(&format!("maze {i}")), 1)
                    .await
                    .unwrap()
                    .is_some()
            });
        }

        let mut created = 0;
        while let Some(result) = tasks.join_next().await {
            if result.unwrap() {
                created += 1;
            }
        }
        assert_eq!(created, 1);
        assert_eq!(store.load_mazes("p1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_modify_keeps_id_and_applies_edit() {
        let store = MemoryMazeStore::new();
        let saved = store.create_maze("p1", &draft("v1"), 10).await.unwrap().unwrap();

        let updated = store.modify_maze(saved.id, retitle("v2")).await.unwrap();
        assert_eq!(updated.id, saved.id);
        assert_eq!(updated.title, "v2");
        assert_eq!(store.get_maze(saved.id).await.unwrap().unwrap().title, "v2");
    }

    #[tokio::test]
    async fn test_failed_edit_leaves_maze_untouched() {
        let store = MemoryMazeStore::new();
        let saved = store.create_maze("p1", &draft("v1"), 10).await.unwrap().unwrap();

        let result = store
            .modify_maze(
                saved.id,
                Box::new(|maze: &mut Maze| {
                    maze.title = "half-applied".to_string();
                    Err(AppError::Validation("rejected".to_string()))
                }),
            )
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(store.get_maze(saved.id).await.unwrap().unwrap(), saved);
    }

    #[tokio::test]
    async fn test_modify_missing_maze_is_not_found() {
        let store = MemoryMazeStore::new();
        let result = store.modify_maze(Uuid::new_v4(), retitle("x")).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_concurrent_link_edits_are_all_kept() {
        let store = Arc::new(MemoryMazeStore::new());
        let saved = store.create_maze("p1", &draft("card"), 10).await.unwrap().unwrap();

        let mut tasks = JoinSet::new();
        for i in 0..3 {
            let store = Arc::clone(&store);
            tasks.spawn(async move {
                store
                    .modify_maze(
                        saved.id,
                        Box::new(move |maze: &mut Maze| {
                            let draft = LinkDraft {
                                title: Some(format!("Link {i}")),
                                ..Default::default()
                            };
                            add_link(&mut maze.configuration.links, PlanTier::Brand, draft)?;
                            Ok(())
                        }),
                    )
                    .await
                    .unwrap();
            });
        }
        while let Some(result) = tasks.join_next().await {
            result.unwrap();
        }

        let maze = store.get_maze(saved.id).await.unwrap().unwrap();
        assert_eq!(maze.configuration.links.len(), 3);
    }

    #[tokio::test]
    async fn test_memory_store_delete() {
        let store = MemoryMazeStore::new();
        let saved = store.create_maze("p1", &draft("gone"), 10).await.unwrap().unwrap();
        assert!(store.delete_maze(saved.id).await.unwrap());
        assert!(!store.delete_maze(saved.id).await.unwrap());
        assert!(store.get_maze(saved.id).await.unwrap().is_none());
    }
}
