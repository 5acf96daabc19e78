//! Client-side placement heuristic for newly added items.
//!
//! This is a greedy shelf rule, not a packer. It reads the existing items in
//! row-major order (Z, then X), takes the last one as the frontier, and
//! proposes the slot immediately to its right, wrapping to the next shelf
//! when the frontier's width would no longer fit. Gaps are never back-filled.
//!
//! The proposal is advisory: the server-side optimizer is free to relocate
//! every item on the next optimize call. Its only hard consequence is the
//! capacity check, which stops an add before any request is sent.

#[cfg(test)]
#[path = "placement_test.rs"]
mod placement_test;

use crate::error::DeckError;
use crate::model::{Deck, Item};

/// A proposed floor position, in deck meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub z: f64,
    /// Whether the proposed shelf still fits within the deck length.
    pub has_space: bool,
}

impl Placement {
    /// The proposal, or [`DeckError::Capacity`] when the deck is full.
    ///
    /// # Errors
    ///
    /// Returns `Capacity` if `has_space` is false.
    pub fn require_space(self) -> Result<Self, DeckError> {
        if self.has_space { Ok(self) } else { Err(DeckError::Capacity) }
    }
}

/// Propose a position for the next item on `deck`.
#[must_use]
pub fn propose(deck: &Deck, existing: &[Item]) -> Placement {
    let Some(frontier) = frontier(existing) else {
        return Placement { x: 0.0, z: 0.0, has_space: true };
    };

    let mut next_x = frontier.position_x + frontier.width;
    let mut next_z = frontier.position_z;
    if next_x + frontier.width > deck.width {
        next_x = 0.0;
        next_z = frontier.position_z + frontier.length;
    }

    let has_space = next_z + frontier.length <= deck.length;
    tracing::debug!(frontier = frontier.id, next_x, next_z, has_space, "placement proposed");
    Placement { x: next_x, z: next_z, has_space }
}

/// The last item in (Z, X) reading order.
fn frontier(items: &[Item]) -> Option<&Item> {
    items.iter().max_by(|a, b| {
        a.position_z
            .total_cmp(&b.position_z)
            .then(a.position_x.total_cmp(&b.position_x))
    })
}
