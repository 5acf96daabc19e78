//! JavaScript entry point for the browser host.
//!
//! The page owns networking: it fetches the optimizer response, asks for a
//! ticket before each request, and hands the body back with that ticket. Input
//! events are forwarded with client coordinates. Cursor changes and redraws are
//! applied here; a delete request is returned to the page, which confirms it
//! with [`DeckView::confirm_prompt`], deletes, and starts the next load.

use std::fmt::Display;

use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::engine::{Action, Engine, LoadTicket};
use crate::input::{self, Cursor};
use crate::model::{ItemId, LoadSnapshot};
use crate::render::INVALID_SNAPSHOT_MESSAGE;

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

/// Host-side effects of one batch of engine actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Effects {
    /// Last cursor requested in the batch.
    pub cursor: Option<Cursor>,
    pub render: bool,
    /// First item the user asked to delete.
    pub delete: Option<ItemId>,
}

impl Effects {
    #[must_use]
    pub fn from_actions(actions: &[Action]) -> Self {
        actions.iter().fold(Self::default(), |mut fx, action| {
            match action {
                Action::SetCursor(cursor) => fx.cursor = Some(*cursor),
                Action::RenderNeeded => fx.render = true,
                Action::ConfirmDelete { id } => {
                    fx.delete.get_or_insert(*id);
                }
            }
            fx
        })
    }
}

fn js_error(err: impl Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Deck view bound to one `<canvas>`.
#[wasm_bindgen]
pub struct DeckView {
    engine: Engine,
}

#[wasm_bindgen]
impl DeckView {
    /// # Errors
    ///
    /// Fails when the canvas has no 2D context or there is no document.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> Result<DeckView, JsValue> {
        Ok(Self { engine: Engine::new(canvas)? })
    }

    /// Start a load; pass the returned ticket to `loadJson` or `failLoad`.
    #[wasm_bindgen(js_name = beginLoad)]
    pub fn begin_load(&mut self) -> u64 {
        self.engine.begin_load().seq()
    }

    /// Apply an optimizer response body and redraw.
    ///
    /// Returns `false` for a stale ticket. A body that does not parse, or has
    /// no deck, is drawn as an error message and reported.
    ///
    /// # Errors
    ///
    /// Unknown ticket, invalid body, or a canvas failure.
    #[wasm_bindgen(js_name = loadJson)]
    pub fn load_json(&mut self, ticket: u64, body: &str) -> Result<bool, JsValue> {
        let ticket = self.ticket(ticket)?;
        let snapshot = match LoadSnapshot::from_json(body) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                if self.engine.fail_load(ticket, INVALID_SNAPSHOT_MESSAGE) {
                    self.engine.render()?;
                }
                return Err(js_error(err));
            }
        };

        let valid = snapshot.deck().map(|_| ());
        if !self.engine.accept_snapshot(ticket, snapshot) {
            return Ok(false);
        }
        self.engine.render()?;
        valid.map_err(js_error)?;
        Ok(true)
    }

    /// Show `message` in place of the deck.
    ///
    /// # Errors
    ///
    /// Unknown ticket or a canvas failure.
    #[wasm_bindgen(js_name = failLoad)]
    pub fn fail_load(&mut self, ticket: u64, message: &str) -> Result<bool, JsValue> {
        let ticket = self.ticket(ticket)?;
        if !self.engine.fail_load(ticket, message) {
            return Ok(false);
        }
        self.engine.render()?;
        Ok(true)
    }

    /// # Errors
    ///
    /// Propagates canvas failures.
    pub fn render(&mut self) -> Result<(), JsValue> {
        self.engine.render()
    }

    /// # Errors
    ///
    /// Propagates cursor or canvas failures.
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, client_x: f64, client_y: f64) -> Result<(), JsValue> {
        let actions = self.engine.on_pointer_move(client_x, client_y);
        self.apply(&actions).map(|_| ())
    }

    /// # Errors
    ///
    /// Propagates cursor or canvas failures.
    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&mut self) -> Result<(), JsValue> {
        let actions = self.engine.on_pointer_leave();
        self.apply(&actions).map(|_| ())
    }

    /// The item whose delete control was clicked, if any.
    ///
    /// # Errors
    ///
    /// Propagates cursor or canvas failures.
    pub fn click(&mut self, client_x: f64, client_y: f64) -> Result<Option<ItemId>, JsValue> {
        let actions = self.engine.on_click(client_x, client_y);
        self.apply(&actions)
    }

    #[wasm_bindgen(js_name = confirmPrompt)]
    #[must_use]
    pub fn confirm_prompt(id: ItemId) -> String {
        input::confirm_prompt(id)
    }

    /// `[x, z]` in meters for the next item.
    ///
    /// # Errors
    ///
    /// Nothing loaded, no deck, or no space left.
    #[wasm_bindgen(js_name = proposePlacement)]
    pub fn propose_placement(&self) -> Result<Vec<f64>, JsValue> {
        let placement = self.engine.propose_placement().map_err(js_error)?;
        Ok(vec![placement.x, placement.z])
    }

    /// Stats summary text for the current snapshot.
    ///
    /// # Errors
    ///
    /// Nothing loaded or no deck.
    #[wasm_bindgen(js_name = statsText)]
    pub fn stats_text(&self) -> Result<String, JsValue> {
        self.engine.core.stats().map(|stats| stats.to_string()).map_err(js_error)
    }
}

impl DeckView {
    fn ticket(&self, seq: u64) -> Result<LoadTicket, JsValue> {
        self.engine
            .core
            .ticket(seq)
            .ok_or_else(|| JsValue::from_str(&format!("unknown load ticket {seq}")))
    }

    fn apply(&mut self, actions: &[Action]) -> Result<Option<ItemId>, JsValue> {
        let effects = Effects::from_actions(actions);
        if let Some(cursor) = effects.cursor {
            self.engine.apply_cursor(cursor)?;
        }
        if effects.render {
            self.engine.render()?;
        }
        Ok(effects.delete)
    }
}
