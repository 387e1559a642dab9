use std::collections::HashSet;

use crate::errors::AppError;
use crate::models::maze::{MazeDraft, FONT_FAMILIES, MAX_BORDER_RADIUS};
use crate::tier::{max_links_for_tier, PlanTier};

pub const MAX_TITLE_CHARS: usize = 120;
pub const MAX_IDEA_CHARS: usize = 60;
pub const MAX_CONTEXT_CHARS: usize = 120;

/// Structural checks on a save payload, independent of the caller's tier.
/// Tier admission is `tier::check_configuration`.
pub fn validate_draft(draft: &MazeDraft) -> Result<(), AppError> {
    let config = &draft.configuration;

    if draft.title.trim().is_empty() {
        return Err(AppError::Validation("title must not be empty".to_string()));
    }
    check_length("title", &draft.title, MAX_TITLE_CHARS)?;
    check_length("idea", &config.idea, MAX_IDEA_CHARS)?;
    check_length("context", &config.context, MAX_CONTEXT_CHARS)?;

    if config.style.border_radius > MAX_BORDER_RADIUS {
        return Err(AppError::Validation(format!(
            "borderRadius must be between 0 and {MAX_BORDER_RADIUS}, got {}",
            config.style.border_radius
        )));
    }

    if !FONT_FAMILIES.contains(&config.style.font_family.as_str()) {
        return Err(AppError::Validation(format!(
            "fontFamily '{}' is not one of {}",
            config.style.font_family,
            FONT_FAMILIES.join(", ")
        )));
    }

    let absolute_max = max_links_for_tier(PlanTier::Brand);
    if config.links.len() > absolute_max {
        return Err(AppError::Validation(format!(
            "a maze holds at most {absolute_max} links, got {}",
            config.links.len()
        )));
    }

    let mut ids = HashSet::new();
    let mut positions = HashSet::new();
    for link in &config.links {
        if link.id.is_empty() || !ids.insert(link.id.as_str()) {
            return Err(AppError::Validation(format!(
                "link ids must be unique and non-empty (offending id: '{}')",
                link.id
            )));
        }
        if let Some(position) = link.position {
            if !positions.insert(position) {
                return Err(AppError::Validation(format!(
                    "two links share position {position:?}"
                )));
            }
        }
    }

    Ok(())
}

fn check_length(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    let len = value.chars().count();
    if len > max {
        return Err(AppError::Validation(format!(
            "{field} must be at most {max} characters, got {len}"
        )));
    }
    Ok(())
}
