//! Plan tiers and the feature lookup table editors consult before a mutation.
//!
//! The card engine never reads this module's answers; it renders whatever
//! configuration it is handed. Gating only decides which configurations
//! are reachable.

pub mod gate;

use serde::{Deserialize, Serialize};

use crate::models::maze::LinkPosition;
use crate::models::subscription::{SubscriptionTier, SubscriptionType};

pub use gate::check_configuration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    #[default]
    Free,
    Premium,
    Brand,
}

impl PlanTier {
    /// A free subscription is `Free`; premium media accounts get `Brand`.
    pub fn from_subscription(tier: SubscriptionTier, kind: Option<SubscriptionType>) -> Self {
        match (tier, kind) {
            (SubscriptionTier::Free, _) => PlanTier::Free,
            (SubscriptionTier::Premium, Some(SubscriptionType::Media)) => PlanTier::Brand,
            (SubscriptionTier::Premium, _) => PlanTier::Premium,
        }
    }

    pub fn is_paid(&self) -> bool {
        !matches!(self, PlanTier::Free)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    CoverImage,
    BackgroundColor,
    BasicAnalytics,
    ExtraLinks,
    CustomAccentColor,
    CustomTypography,
    LayoutOptions,
    BorderRadius,
    ExtendedAnalytics,
    AnalyticsExport,
    MoreMazes,
}

impl Feature {
    pub const ALL: [Feature; 11] = [
        Feature::CoverImage,
        Feature::BackgroundColor,
        Feature::BasicAnalytics,
        Feature::ExtraLinks,
        Feature::CustomAccentColor,
        Feature::CustomTypography,
        Feature::LayoutOptions,
        Feature::BorderRadius,
        Feature::ExtendedAnalytics,
        Feature::AnalyticsExport,
        Feature::MoreMazes,
    ];

    /// Name handed to the upgrade notifier.
    pub fn display_name(&self) -> &'static str {
        match self {
            Feature::CoverImage => "Cover Image",
            Feature::BackgroundColor => "Background Color",
            Feature::BasicAnalytics => "Analytics",
            Feature::ExtraLinks => "3 Featured Links",
            Feature::CustomAccentColor => "Custom Accent Colors",
            Feature::CustomTypography => "Custom Typography",
            Feature::LayoutOptions => "Layout Options",
            Feature::BorderRadius => "Border Radius",
            Feature::ExtendedAnalytics => "Extended Analytics",
            Feature::AnalyticsExport => "Export Analytics Data",
            Feature::MoreMazes => "More Editorial Mazes",
        }
    }

    fn free(&self) -> bool {
        matches!(
            self,
            Feature::CoverImage | Feature::BackgroundColor | Feature::BasicAnalytics
        )
    }
}

pub fn is_feature_unlocked(feature: Feature, tier: PlanTier) -> bool {
    tier.is_paid() || feature.free()
}

pub fn max_links_for_tier(tier: PlanTier) -> usize {
    if tier.is_paid() {
        3
    } else {
        2
    }
}

pub fn max_mazes_for_tier(tier: PlanTier) -> usize {
    if tier.is_paid() {
        10
    } else {
        1
    }
}

pub fn can_add_link(link_count: usize, tier: PlanTier) -> bool {
    link_count < max_links_for_tier(tier)
}

/// Cells a link may be pinned to. Free cards keep `A3` for platform branding.
pub fn available_positions(tier: PlanTier) -> &'static [LinkPosition] {
    if tier.is_paid() {
        &[LinkPosition::A2, LinkPosition::A3, LinkPosition::B3]
    } else {
        &[LinkPosition::A2, LinkPosition::B3]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalyticsWindow {
    #[serde(rename = "7d")]
    SevenDays,
    #[serde(rename = "30d")]
    ThirtyDays,
    #[serde(rename = "90d")]
    NinetyDays,
    #[serde(rename = "1y")]
    OneYear,
}

impl AnalyticsWindow {
    pub fn days(&self) -> u32 {
        match self {
            AnalyticsWindow::SevenDays => 7,
            AnalyticsWindow::ThirtyDays => 30,
            AnalyticsWindow::NinetyDays => 90,
            AnalyticsWindow::OneYear => 365,
        }
    }

    pub fn feature(&self) -> Feature {
        match self {
            AnalyticsWindow::SevenDays => Feature::BasicAnalytics,
            _ => Feature::ExtendedAnalytics,
        }
    }

    pub fn is_unlocked(&self, tier: PlanTier) -> bool {
        is_feature_unlocked(self.feature(), tier)
    }
}
