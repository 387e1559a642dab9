//! Admission control for whole configurations saved by the editors.

use crate::errors::AppError;
use crate::models::maze::{
    MazeConfiguration, StyleConfig, DEFAULT_BORDER_RADIUS, DEFAULT_FONT_FAMILY,
};
use crate::tier::{available_positions, is_feature_unlocked, max_links_for_tier, Feature, PlanTier};

/// Every gated feature the configuration relies on that `tier` does not unlock,
/// in the order the editors present them.
pub fn locked_features(config: &MazeConfiguration, tier: PlanTier) -> Vec<Feature> {
    let defaults = StyleConfig::default();
    let style = &config.style;

    let free_cells = available_positions(PlanTier::Free);
    let pins_paid_cell = config
        .links
        .iter()
        .any(|link| link.position.is_some_and(|p| !free_cells.contains(&p)));

    let mut used = Vec::new();
    if config.links.len() > max_links_for_tier(PlanTier::Free) || pins_paid_cell {
        used.push(Feature::ExtraLinks);
    }
    if !style.accent_color.eq_ignore_ascii_case(&defaults.accent_color) {
        used.push(Feature::CustomAccentColor);
    }
    if style.font_family != DEFAULT_FONT_FAMILY {
        used.push(Feature::CustomTypography);
    }
    if style.orientation != defaults.orientation {
        used.push(Feature::LayoutOptions);
    }
    if style.border_radius != DEFAULT_BORDER_RADIUS {
        used.push(Feature::BorderRadius);
    }
    if config.cover_image.is_some() {
        used.push(Feature::CoverImage);
    }

    used.into_iter()
        .filter(|f| !is_feature_unlocked(*f, tier))
        .collect()
}

/// Rejects a configuration the tier could not have produced, naming the first
/// locked feature for the upgrade prompt.
pub fn check_configuration(config: &MazeConfiguration, tier: PlanTier) -> Result<(), AppError> {
    match locked_features(config, tier).first() {
        Some(feature) => Err(AppError::UpgradeRequired {
            feature: feature.display_name().to_string(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::maze::{Link, LinkKind, LinkPosition, Orientation};

    fn link(id: &str) -> Link {
        Link {
            id: id.to_string(),
            title: format!("Link {id}"),
            url: String::new(),
            icon: "link".to_string(),
            thumbnail: None,
            kind: LinkKind::Featured,
            position: None,
        }
    }

    #[test]
    fn test_default_configuration_passes_on_free() {
        let config = MazeConfiguration::default();
        assert!(locked_features(&config, PlanTier::Free).is_empty());
        assert!(check_configuration(&config, PlanTier::Free).is_ok());
    }

    #[test]
    fn test_background_and_cover_are_free() {
        let mut config = MazeConfiguration::default();
        config.style.background_color = "#ffffff".to_string();
        config.cover_image = Some("https://cdn.example/cover.png".to_string());
        assert!(check_configuration(&config, PlanTier::Free).is_ok());
    }

    #[test]
    fn test_accent_comparison_ignores_case() {
        let mut config = MazeConfiguration::default();
        config.style.accent_color = "#004AAD".to_string();
        assert!(check_configuration(&config, PlanTier::Free).is_ok());
    }

    #[test]
    fn test_free_collects_every_locked_feature_in_order() {
        let mut config = MazeConfiguration::default();
        config.links = vec![link("1"), link("2"), link("3")];
        config.style.accent_color = "#ff0000".to_string();
        config.style.font_family = "Georgia".to_string();
        config.style.orientation = Orientation::Horizontal;
        config.style.border_radius = 0;

        assert_eq!(
            locked_features(&config, PlanTier::Free),
            vec![
                Feature::ExtraLinks,
                Feature::CustomAccentColor,
                Feature::CustomTypography,
                Feature::LayoutOptions,
                Feature::BorderRadius,
            ]
        );

        match check_configuration(&config, PlanTier::Free) {
            Err(AppError::UpgradeRequired { feature }) => assert_eq!(feature, "3 Featured Links"),
            other => panic!("expected UpgradeRequired, got {other:?}"),
        }
    }

    #[test]
    fn test_free_cannot_pin_a_link_to_a3() {
        let mut config = MazeConfiguration::default();
        let mut pinned = link("1");
        pinned.position = Some(LinkPosition::A3);
        config.links = vec![pinned];

        assert_eq!(locked_features(&config, PlanTier::Free), vec![Feature::ExtraLinks]);
        assert!(matches!(
            check_configuration(&config, PlanTier::Free),
            Err(AppError::UpgradeRequired { .. })
        ));
        assert!(check_configuration(&config, PlanTier::Brand).is_ok());

        config.links[0].position = Some(LinkPosition::B3);
        assert!(check_configuration(&config, PlanTier::Free).is_ok());
    }

    #[test]
    fn test_paid_tier_admits_everything() {
        let mut config = MazeConfiguration::default();
        config.links = vec![link("1"), link("2"), link("3")];
        config.style.font_family = "Space Mono".to_string();
        config.style.orientation = Orientation::Horizontal;
        assert!(check_configuration(&config, PlanTier::Premium).is_ok());
        assert!(check_configuration(&config, PlanTier::Brand).is_ok());
    }
}
