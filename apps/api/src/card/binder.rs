//! Fills a [`SlotPlan`] with renderable content.
//!
//! Every slot comes back with a content descriptor. A link slot with no link
//! behind it becomes a placeholder: an "add link" affordance while the
//! collection has room, otherwise a static numbered tile.

use serde::{Deserialize, Serialize};

use crate::card::icons::LinkIcon;
use crate::card::slot_plan::{GridArea, SlotPlan, SlotRole, SlotSource};
use crate::models::maze::{Link, LinkKind, LinkPosition, ProfileConfig};

/// Default artwork for links that point at a video platform.
pub const VIDEO_THUMBNAIL: &str = "/thumbnails/video.svg";

const VIDEO_HOSTS: &[&str] = &["youtube.com", "youtu.be", "vimeo.com"];

pub const BRANDING_LABEL: &str = "Powered by";
pub const BRANDING_NAME: &str = "Maze";
pub const BRANDING_LOGO: &str = "/assets/maze-logo.svg";

// ────────────────────────────────────────────────────────────────────────────
// Content descriptors
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverContent {
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileContent {
    pub display_name: String,
    pub bio: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkContent {
    pub id: String,
    pub title: String,
    pub url: String,
    pub icon: LinkIcon,
    /// Absent means the renderer paints a solid tile in the accent colour.
    pub thumbnail: Option<String>,
    #[serde(rename = "type")]
    pub kind: LinkKind,
    pub position: Option<LinkPosition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandingContent {
    pub label: String,
    pub name: String,
    pub logo: String,
}

impl Default for BrandingContent {
    fn default() -> Self {
        Self {
            label: BRANDING_LABEL.to_string(),
            name: BRANDING_NAME.to_string(),
            logo: BRANDING_LOGO.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderAction {
    AddCover,
    AddLink,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderContent {
    pub label: String,
    /// `None` for static tiles with no affordance.
    pub action: Option<PlaceholderAction>,
}

impl PlaceholderContent {
    fn add_cover() -> Self {
        Self {
            label: "Add cover".to_string(),
            action: Some(PlaceholderAction::AddCover),
        }
    }

    fn add_link() -> Self {
        Self {
            label: "Add link".to_string(),
            action: Some(PlaceholderAction::AddLink),
        }
    }

    fn numbered(index: usize) -> Self {
        Self {
            label: format!("Link {}", index + 1),
            action: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlotContent {
    Cover(CoverContent),
    Profile(ProfileContent),
    Link(LinkContent),
    Branding(BrandingContent),
    Placeholder(PlaceholderContent),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundSlot {
    pub role: SlotRole,
    pub area: GridArea,
    pub content: SlotContent,
}

// ────────────────────────────────────────────────────────────────────────────
// Binding
// ────────────────────────────────────────────────────────────────────────────

/// Binds content to every slot of `plan`. `cells` holds the link shown in each
/// of the tier's link cells (see `links::assign_to_cells`).
pub fn bind_content(
    plan: &SlotPlan,
    cells: &[Option<&Link>],
    cover_image: Option<&str>,
    profile: &ProfileConfig,
    can_add_link: bool,
) -> Vec<BoundSlot> {
    plan.slots
        .iter()
        .map(|spec| {
            let content = match spec.source {
                SlotSource::Cover => match cover_image.filter(|c| !c.trim().is_empty()) {
                    Some(image) => SlotContent::Cover(CoverContent {
                        image: image.to_string(),
                    }),
                    None => SlotContent::Placeholder(PlaceholderContent::add_cover()),
                },
                SlotSource::Profile => SlotContent::Profile(ProfileContent {
                    display_name: profile.display_name.clone(),
                    bio: profile.bio.clone(),
                    title: profile.title.clone(),
                }),
                SlotSource::Branding => SlotContent::Branding(BrandingContent::default()),
                SlotSource::Link { cell } => match cells.get(cell).copied().flatten() {
                    Some(link) => SlotContent::Link(link_content(link)),
                    None if can_add_link => {
                        SlotContent::Placeholder(PlaceholderContent::add_link())
                    }
                    None => SlotContent::Placeholder(PlaceholderContent::numbered(cell)),
                },
            };
            BoundSlot {
                role: spec.role,
                area: spec.area,
                content,
            }
        })
        .collect()
}

fn link_content(link: &Link) -> LinkContent {
    LinkContent {
        id: link.id.clone(),
        title: link.title.clone(),
        url: link.url.clone(),
        icon: LinkIcon::from_name(&link.icon),
        thumbnail: derive_thumbnail(link),
        kind: link.kind,
        position: link.position,
    }
}

/// Explicit thumbnail first, then the video default for video hosts.
pub fn derive_thumbnail(link: &Link) -> Option<String> {
    if let Some(thumb) = link.thumbnail.as_deref().filter(|t| !t.trim().is_empty()) {
        return Some(thumb.to_string());
    }
    url_host(&link.url)
        .filter(|host| is_video_host(host))
        .map(|_| VIDEO_THUMBNAIL.to_string())
}

fn is_video_host(host: &str) -> bool {
    VIDEO_HOSTS.iter().any(|domain| {
        host == *domain
            || host
                .strip_suffix(domain)
                .is_some_and(|prefix| prefix.ends_with('.'))
    })
}

/// Lower-cased host of a URL, with or without a scheme.
fn url_host(url: &str) -> Option<String> {
    let trimmed = url.trim();
    let rest = trimmed
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(trimmed);
    let authority = rest.split(['/', '?', '#']).next()?;
    let host_port = authority.rsplit('@').next()?;
    let host = host_port.split(':').next()?;
    if host.is_empty() {
        None
    } else {
        Some(host.to_ascii_lowercase())
    }
}
