use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;

pub const DEFAULT_BACKGROUND_COLOR: &str = "#1a1f2e";
pub const DEFAULT_ACCENT_COLOR: &str = "#004aad";
pub const DEFAULT_FONT_FAMILY: &str = "Inter";
pub const DEFAULT_BORDER_RADIUS: u32 = 12;
pub const MAX_BORDER_RADIUS: u32 = 24;

/// Font families offered by the typography editor.
pub const FONT_FAMILIES: &[&str] = &[
    "Inter",
    "Georgia",
    "Space Mono",
    "Playfair Display",
    "Poppins",
    "Roboto",
    "Open Sans",
    "Montserrat",
];

// ────────────────────────────────────────────────────────────────────────────
// Card configuration
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    #[default]
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    #[default]
    Featured,
    Social,
}

/// Named bento cells a link can be pinned to. `A` is the top row, `B` the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LinkPosition {
    A2,
    A3,
    B3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: LinkKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<LinkPosition>,
}

fn default_icon() -> String {
    "link".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleConfig {
    pub background_color: String,
    pub accent_color: String,
    pub font_family: String,
    pub border_radius: u32,
    pub theme: String,
    #[serde(default)]
    pub orientation: Orientation,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            accent_color: DEFAULT_ACCENT_COLOR.to_string(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            border_radius: DEFAULT_BORDER_RADIUS,
            theme: "dark".to_string(),
            orientation: Orientation::Vertical,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileConfig {
    pub display_name: String,
    pub bio: String,
    pub title: String,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            display_name: "Your Name".to_string(),
            bio: "Your bio here".to_string(),
            title: "Your Title".to_string(),
        }
    }
}

/// The payload persisted in `mazes.configuration`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MazeConfiguration {
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub idea: String,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub style: StyleConfig,
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub links: Vec<Link>,
}

// ────────────────────────────────────────────────────────────────────────────
// Persisted records
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MazeRow {
    pub id: Uuid,
    pub profile_id: String,
    pub title: String,
    pub description: String,
    pub configuration: Value,
    pub is_published: bool,
    pub views: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Maze {
    pub id: Uuid,
    pub profile_id: String,
    pub title: String,
    pub description: String,
    pub configuration: MazeConfiguration,
    pub is_published: bool,
    pub views: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<MazeRow> for Maze {
    type Error = AppError;

    fn try_from(row: MazeRow) -> Result<Self, Self::Error> {
        let configuration: MazeConfiguration = serde_json::from_value(row.configuration)
            .map_err(|e| {
                AppError::Internal(anyhow::anyhow!(
                    "maze {} has a malformed configuration: {e}",
                    row.id
                ))
            })?;
        Ok(Maze {
            id: row.id,
            profile_id: row.profile_id,
            title: row.title,
            description: row.description,
            configuration,
            is_published: row.is_published,
            views: row.views,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Save payload. A present `id` updates that maze, otherwise a new one is inserted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MazeDraft {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub configuration: MazeConfiguration,
}
