//! Bento grid topology: which slot sits where, and which link feeds it.
//!
//! # Grids
//! - horizontal: 4 columns × 2 rows
//!
//!   ```text
//!   | cover   cover   | link1 | link2/brand |
//!   | profile profile | final   final       |
//!   ```
//! - vertical: 2 columns × 4 rows
//!
//!   ```text
//!   | cover   cover       |
//!   | profile profile     |
//!   | link1   link2/brand |
//!   | final   final       |
//!   ```
//!
//! # Link binding
//! Link slots read a cell of `tier::available_positions`: `link1` shows `A2`,
//! `link2_or_branding` shows `A3` on paid tiers and is fixed platform branding
//! on free, `final_link` shows `B3`.

use serde::{Deserialize, Serialize};

use crate::models::maze::Orientation;
use crate::tier::PlanTier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotRole {
    #[serde(rename = "cover")]
    Cover,
    #[serde(rename = "profile")]
    Profile,
    #[serde(rename = "link1")]
    PrimaryLink,
    #[serde(rename = "link2_or_branding")]
    SecondaryLinkOrBranding,
    #[serde(rename = "final_link")]
    FinalLink,
}

/// 1-based grid placement, CSS grid style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridArea {
    pub column: u8,
    pub row: u8,
    pub column_span: u8,
    pub row_span: u8,
}

impl GridArea {
    const fn cell(column: u8, row: u8) -> Self {
        Self {
            column,
            row,
            column_span: 1,
            row_span: 1,
        }
    }

    const fn wide(column: u8, row: u8) -> Self {
        Self {
            column,
            row,
            column_span: 2,
            row_span: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridShape {
    pub columns: u8,
    pub rows: u8,
}

/// Where a slot's content comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotSource {
    Cover,
    Profile,
    Branding,
    /// Index into the tier's link cells.
    Link { cell: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSpec {
    pub role: SlotRole,
    pub area: GridArea,
    pub source: SlotSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotPlan {
    pub orientation: Orientation,
    pub grid: GridShape,
    pub slots: Vec<SlotSpec>,
}

const HORIZONTAL: [(SlotRole, GridArea); 5] = [
    (SlotRole::Cover, GridArea::wide(1, 1)),
    (SlotRole::Profile, GridArea::wide(1, 2)),
    (SlotRole::PrimaryLink, GridArea::cell(3, 1)),
    (SlotRole::SecondaryLinkOrBranding, GridArea::cell(4, 1)),
    (SlotRole::FinalLink, GridArea::wide(3, 2)),
];

const VERTICAL: [(SlotRole, GridArea); 5] = [
    (SlotRole::Cover, GridArea::wide(1, 1)),
    (SlotRole::Profile, GridArea::wide(1, 2)),
    (SlotRole::PrimaryLink, GridArea::cell(1, 3)),
    (SlotRole::SecondaryLinkOrBranding, GridArea::cell(2, 3)),
    (SlotRole::FinalLink, GridArea::wide(1, 4)),
];

pub fn grid_shape(orientation: Orientation) -> GridShape {
    match orientation {
        Orientation::Horizontal => GridShape {
            columns: 4,
            rows: 2,
        },
        Orientation::Vertical => GridShape {
            columns: 2,
            rows: 4,
        },
    }
}

/// Cell index (into `available_positions(tier)`) a role shows, or `None` for
/// roles that never show a user link at this tier.
pub fn link_cell_for(role: SlotRole, tier: PlanTier) -> Option<usize> {
    match role {
        SlotRole::Cover | SlotRole::Profile => None,
        SlotRole::PrimaryLink => Some(0),
        SlotRole::SecondaryLinkOrBranding => tier.is_paid().then_some(1),
        SlotRole::FinalLink => Some(if tier.is_paid() { 2 } else { 1 }),
    }
}

/// Builds the slot list for a card. Every input combination yields all five
/// slots in reading order.
pub fn build_slot_plan(orientation: Orientation, tier: PlanTier) -> SlotPlan {
    let layout = match orientation {
        Orientation::Horizontal => &HORIZONTAL,
        Orientation::Vertical => &VERTICAL,
    };

    let slots = layout
        .iter()
        .map(|&(role, area)| {
            let source = match role {
                SlotRole::Cover => SlotSource::Cover,
                SlotRole::Profile => SlotSource::Profile,
                _ => match link_cell_for(role, tier) {
                    Some(cell) => SlotSource::Link { cell },
                    None => SlotSource::Branding,
                },
            };
            SlotSpec { role, area, source }
        })
        .collect();

    SlotPlan {
        orientation,
        grid: grid_shape(orientation),
        slots,
    }
}
