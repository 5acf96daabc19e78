//! Load statistics shown next to the deck view.

#[cfg(test)]
#[path = "stats_test.rs"]
mod stats_test;

use std::fmt;

use crate::error::DeckError;
use crate::model::LoadSnapshot;

/// Summary figures for one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadStats {
    pub total_weight: f64,
    pub volume_occupied: f64,
    pub items_loaded: usize,
    pub items_unplaced: usize,
    pub deck_width: f64,
    pub deck_length: f64,
    pub deck_max_weight: f64,
    /// Usable space as a percentage (`0..=100`).
    pub usable_space_pct: f64,
    pub utilization_pct: Option<f64>,
}

impl LoadStats {
    /// Summarize `snapshot`.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::InvalidSnapshot`] when the snapshot has no deck.
    pub fn from_snapshot(snapshot: &LoadSnapshot) -> Result<Self, DeckError> {
        let deck = snapshot.deck()?;
        Ok(Self {
            total_weight: snapshot.total_weight,
            volume_occupied: snapshot.total_volume_occupied,
            items_loaded: snapshot.items.len(),
            items_unplaced: snapshot.unplaced_items.len(),
            deck_width: deck.width,
            deck_length: deck.length,
            deck_max_weight: deck.max_weight,
            usable_space_pct: deck.usable_space_fraction * 100.0,
            utilization_pct: snapshot.utilization_percentage,
        })
    }

    /// Cargo section, one line per figure.
    #[must_use]
    pub fn cargo_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Total weight: {}t", self.total_weight),
            format!("Volume occupied: {:.2}m³", self.volume_occupied),
            format!("Items loaded: {}", self.items_loaded),
        ];
        if self.items_unplaced > 0 {
            lines.push(format!("Items not placed: {}", self.items_unplaced));
        }
        if let Some(pct) = self.utilization_pct {
            lines.push(format!("Utilization: {pct:.1}%"));
        }
        lines
    }

    /// Deck section, one line per figure.
    #[must_use]
    pub fn deck_lines(&self) -> Vec<String> {
        vec![
            format!("Width: {}m", self.deck_width),
            format!("Length: {}m", self.deck_length),
            format!("Max weight: {}t", self.deck_max_weight),
            format!("Usable space: {:.1}%", self.usable_space_pct),
        ]
    }
}

impl fmt::Display for LoadStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cargo")?;
        for line in self.cargo_lines() {
            writeln!(f, "  {line}")?;
        }
        writeln!(f, "Deck")?;
        for line in self.deck_lines() {
            writeln!(f, "  {line}")?;
        }
        Ok(())
    }
}
