// Card composition engine.
// Pure functions of (profile, links, style, cover, tier) → layout plan. No I/O, no state.

pub mod binder;
pub mod color;
pub mod handlers;
pub mod icons;
pub mod slot_plan;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::links::assign_to_cells;
use crate::models::maze::{Link, MazeConfiguration, Orientation, ProfileConfig, StyleConfig};
use crate::tier::{can_add_link, PlanTier};

pub use binder::{bind_content, BoundSlot};
pub use color::{resolve_colors, ColorScheme};
pub use slot_plan::{build_slot_plan, GridShape};

/// Read-only snapshot of everything a card is drawn from.
#[derive(Debug, Clone, Copy)]
pub struct CardInput<'a> {
    pub profile: &'a ProfileConfig,
    pub links: &'a [Link],
    pub style: &'a StyleConfig,
    pub cover_image: Option<&'a str>,
}

impl<'a> CardInput<'a> {
    pub fn from_configuration(config: &'a MazeConfiguration) -> Self {
        Self {
            profile: &config.profile,
            links: &config.links,
            style: &config.style,
            cover_image: config.cover_image.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardComposition {
    pub plan_tier: PlanTier,
    pub orientation: Orientation,
    pub grid: GridShape,
    pub colors: ColorScheme,
    pub background_color: String,
    pub accent_color: String,
    pub font_family: String,
    pub border_radius: u32,
    pub can_add_link: bool,
    pub slots: Vec<BoundSlot>,
}

/// Lays out a card. Identical inputs always produce identical compositions.
pub fn compose_card(input: &CardInput<'_>, tier: PlanTier) -> CardComposition {
    let cells = assign_to_cells(input.links, tier);
    let can_add = can_add_link(input.links.len(), tier);
    let plan = build_slot_plan(input.style.orientation, tier);

    debug!(
        orientation = ?plan.orientation,
        tier = ?tier,
        links = input.links.len(),
        "composing card"
    );

    let slots = bind_content(&plan, &cells, input.cover_image, input.profile, can_add);

    CardComposition {
        plan_tier: tier,
        orientation: plan.orientation,
        grid: plan.grid,
        colors: resolve_colors(&input.style.background_color),
        background_color: input.style.background_color.clone(),
        accent_color: input.style.accent_color.clone(),
        font_family: input.style.font_family.clone(),
        border_radius: input.style.border_radius,
        can_add_link: can_add,
        slots,
    }
}
