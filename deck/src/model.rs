//! Load model: the deck, its items, and the optimizer snapshot they arrive in.
//!
//! These types mirror the JSON exchanged with the optimizer API. A
//! [`LoadSnapshot`] is received whole on every load and never patched; the
//! engine replaces its copy wholesale and re-renders from it.
//!
//! Coordinates are meters. X runs across the deck width, Z along its length.
//! The vertical axis (Y) is carried for completeness but the 2D layout ignores it.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::DeckError;

/// Server-assigned item identifier, stable across reloads.
pub type ItemId = i64;

/// Item type sent when the caller does not name one.
pub const DEFAULT_ITEM_KIND: &str = "Container";

/// The ferry's cargo deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    /// Extent along X, in meters.
    pub width: f64,
    /// Extent along Z, in meters.
    pub length: f64,
    /// Clearance along Y, in meters.
    #[serde(default)]
    pub height: f64,
    /// Maximum cargo weight in tons.
    #[serde(default)]
    pub max_weight: f64,
    /// Fraction of the deck area usable for cargo, `0.0..=1.0`.
    #[serde(rename = "usable_space_percentage", default)]
    pub usable_space_fraction: f64,
}

/// A container placed on the deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    pub width: f64,
    pub length: f64,
    #[serde(default)]
    pub height: f64,
    pub weight: f64,
    /// CSS hex color; the renderer falls back to the default item color when absent or unparsable.
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub position_x: f64,
    #[serde(default)]
    pub position_y: f64,
    #[serde(default)]
    pub position_z: f64,
}

/// An item the optimizer could not place. Positions may be missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnplacedItem {
    pub id: ItemId,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    pub width: f64,
    pub length: f64,
    #[serde(default)]
    pub height: f64,
    pub weight: f64,
}

/// The optimizer's response: the single source of truth the engine renders from.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LoadSnapshot {
    /// Deck descriptor. A snapshot without one cannot be rendered.
    #[serde(rename = "ferry_info", default)]
    pub deck: Option<Deck>,
    /// Placed items in draw order.
    #[serde(rename = "placed_items", default, deserialize_with = "null_as_empty")]
    pub items: Vec<Item>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub unplaced_items: Vec<UnplacedItem>,
    #[serde(default)]
    pub total_weight: f64,
    #[serde(default)]
    pub total_volume_occupied: f64,
    #[serde(rename = "ferry_total_volume", default)]
    pub deck_total_volume: Option<f64>,
    #[serde(default)]
    pub utilization_percentage: Option<f64>,
}

impl LoadSnapshot {
    /// The deck descriptor, or [`DeckError::InvalidSnapshot`] when the response lacked one.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSnapshot` if `ferry_info` was absent or null.
    pub fn deck(&self) -> Result<&Deck, DeckError> {
        self.deck.as_ref().ok_or(DeckError::InvalidSnapshot)
    }

    /// Look up a placed item by id.
    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Parse an optimizer response body.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error for malformed JSON.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}

/// Request body for creating an item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewItem {
    #[serde(rename = "type")]
    pub kind: String,
    pub width: f64,
    pub height: f64,
    pub length: f64,
    pub weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_z: Option<f64>,
}

impl NewItem {
    /// A container of the given dimensions with no position.
    #[must_use]
    pub fn container(width: f64, height: f64, length: f64, weight: f64) -> Self {
        Self {
            kind: DEFAULT_ITEM_KIND.to_owned(),
            width,
            height,
            length,
            weight,
            position_x: None,
            position_y: None,
            position_z: None,
        }
    }

    /// Attach a proposed floor position (`y = 0`).
    #[must_use]
    pub fn at(mut self, x: f64, z: f64) -> Self {
        self.position_x = Some(x);
        self.position_y = Some(0.0);
        self.position_z = Some(z);
        self
    }
}

fn default_kind() -> String {
    DEFAULT_ITEM_KIND.to_owned()
}

/// The optimizer serializes empty lists as `null`.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
