//! Editing operations on a card's link collection.
//!
//! # Invariants
//! - The collection never grows past `max_links_for_tier`.
//! - No two links share a `position`.
//! - Moving a link onto an occupied cell swaps the occupant into the mover's
//!   old cell. Links are never dropped by a move.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::maze::{Link, LinkKind, LinkPosition};
use crate::tier::{available_positions, can_add_link, max_links_for_tier, PlanTier};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("link collection is full ({max} links max)")]
    CapacityReached { max: usize },

    #[error("link {0} not found")]
    NotFound(String),
}

/// Fields supplied when a link is added. Everything is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkDraft {
    pub title: Option<String>,
    pub url: Option<String>,
    pub icon: Option<String>,
    pub thumbnail: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<LinkKind>,
}

/// Partial update; `None` leaves a field untouched. An empty thumbnail clears it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub icon: Option<String>,
    pub thumbnail: Option<String>,
}

/// The link shown in each cell of `tier`, indexed like `available_positions(tier)`.
///
/// A pinned link takes its own cell. Unpinned links, links pinned to a cell
/// the tier lacks, and links whose cell is already taken fill the empty cells
/// in collection order. Links left over once every cell is filled are not shown.
pub fn assign_to_cells(links: &[Link], tier: PlanTier) -> Vec<Option<&Link>> {
    let cells = available_positions(tier);
    let mut assigned: Vec<Option<&Link>> = vec![None; cells.len()];
    let mut floating = Vec::new();

    for link in links {
        match link.position.and_then(|p| cells.iter().position(|c| *c == p)) {
            Some(cell) if assigned[cell].is_none() => assigned[cell] = Some(link),
            _ => floating.push(link),
        }
    }

    let mut floating = floating.into_iter();
    for cell in assigned.iter_mut().filter(|cell| cell.is_none()) {
        *cell = floating.next();
    }
    assigned
}

/// Appends a new link in the first free cell for `tier`.
pub fn add_link(links: &mut Vec<Link>, tier: PlanTier, draft: LinkDraft) -> Result<&Link, LinkError> {
    if !can_add_link(links.len(), tier) {
        return Err(LinkError::CapacityReached {
            max: max_links_for_tier(tier),
        });
    }

    let position = available_positions(tier)
        .iter()
        .copied()
        .find(|p| links.iter().all(|l| l.position != Some(*p)));

    links.push(Link {
        id: Uuid::new_v4().to_string(),
        title: draft.title.unwrap_or_else(|| "New Link".to_string()),
        url: draft.url.unwrap_or_default(),
        icon: draft.icon.unwrap_or_else(|| "link".to_string()),
        thumbnail: draft.thumbnail.filter(|t| !t.is_empty()),
        kind: draft.kind.unwrap_or_default(),
        position,
    });
    Ok(&links[links.len() - 1])
}

pub fn update_link<'a>(links: &'a mut [Link], id: &str, patch: LinkPatch) -> Result<&'a Link, LinkError> {
    let link = links
        .iter_mut()
        .find(|l| l.id == id)
        .ok_or_else(|| LinkError::NotFound(id.to_string()))?;

    if let Some(title) = patch.title {
        link.title = title;
    }
    if let Some(url) = patch.url {
        link.url = url;
    }
    if let Some(icon) = patch.icon {
        link.icon = icon;
    }
    if let Some(thumbnail) = patch.thumbnail {
        link.thumbnail = (!thumbnail.is_empty()).then_some(thumbnail);
    }
    Ok(link)
}

pub fn remove_link(links: &mut Vec<Link>, id: &str) -> Result<Link, LinkError> {
    let index = links
        .iter()
        .position(|l| l.id == id)
        .ok_or_else(|| LinkError::NotFound(id.to_string()))?;
    Ok(links.remove(index))
}

/// Moves link `id` to `target`. An occupant of `target` takes the mover's
/// previous cell, which may be none.
pub fn change_position(links: &mut [Link], id: &str, target: LinkPosition) -> Result<(), LinkError> {
    let mover = links
        .iter()
        .position(|l| l.id == id)
        .ok_or_else(|| LinkError::NotFound(id.to_string()))?;

    let previous = links[mover].position;
    if previous == Some(target) {
        return Ok(());
    }

    if let Some(occupant) = links
        .iter()
        .position(|l| l.id != id && l.position == Some(target))
    {
        links[occupant].position = previous;
    }
    links[mover].position = Some(target);
    Ok(())
}
