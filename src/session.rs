//! Session: drives the deck engine against the optimizer API.
//!
//! Every mutating action (add, delete) ends with a fresh optimize call, and
//! every load goes through a [`LoadTicket`] so a response that arrives after a
//! newer one has been accepted is dropped instead of rendered.

use deck::engine::{Action, EngineCore, LoadTicket};
use deck::error::DeckError;
use deck::input::{Overlay, PointerEvent, TooltipContent, confirm_prompt};
use deck::layout::{Point, ScreenRect};
use deck::model::{Item, ItemId, LoadSnapshot, NewItem};
use deck::surface::Surface;
use tracing::{info, warn};

use crate::api::{ApiError, DeckApi};

/// Header line of the in-surface message shown when a load fails.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load data.";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Transport(#[from] ApiError),

    #[error(transparent)]
    Deck(#[from] DeckError),

    #[error("render failed: {0}")]
    Render(String),

    #[error("deletion cancelled")]
    Cancelled,
}

/// Asks the user to approve a destructive action.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Approves everything (`--yes`).
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _prompt: &str) -> bool {
        true
    }
}

/// Overlay for hosts without a pointer; nothing is ever shown.
struct NoTooltip;

impl Overlay for NoTooltip {
    fn create(&mut self, _content: &TooltipContent, _at: Point) {}
    fn reposition(&mut self, _at: Point) {}
    fn destroy(&mut self) {}
}

pub struct DeckSession<A, S> {
    api: A,
    surface: S,
    core: EngineCore,
}

impl<A, S> DeckSession<A, S>
where
    A: DeckApi,
    S: Surface,
    S::Error: std::fmt::Debug,
{
    pub fn new(api: A, surface: S) -> Self {
        Self { api, surface, core: EngineCore::new() }
    }

    pub fn core(&self) -> &EngineCore {
        &self.core
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    // --- Loads ---

    /// Optimize and render the result.
    ///
    /// # Errors
    ///
    /// `Transport` when the optimize call fails, `Deck(InvalidSnapshot)` when
    /// the response has no deck; the surface then shows the failure instead of
    /// a deck.
    pub async fn reload(&mut self) -> Result<(), SessionError> {
        let ticket = self.start_load();
        let result = self.api.optimize().await;
        self.finish_load(ticket, result)
    }

    /// Issue a ticket for a load whose response will arrive later.
    pub fn start_load(&mut self) -> LoadTicket {
        self.core.begin_load(&mut NoTooltip)
    }

    /// Apply the response to the load issued with `ticket`.
    ///
    /// Stale responses are dropped without rendering; a stale failure is still
    /// reported to the caller.
    ///
    /// # Errors
    ///
    /// `Transport` for a failed load, `Deck(InvalidSnapshot)` for a current
    /// response without a deck (after the surface shows why), `Render` if the
    /// surface rejects a draw.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<LoadSnapshot, ApiError>,
    ) -> Result<(), SessionError> {
        match result {
            Ok(snapshot) => {
                let valid = snapshot.deck().map(|_| ());
                if !self.core.accept_snapshot(ticket, snapshot) {
                    return Ok(());
                }
                self.render()?;
                if let Err(err) = valid {
                    warn!(error = %err, "snapshot rejected");
                    return Err(err.into());
                }
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "load failed");
                if self.core.fail_load(ticket, format!("{LOAD_FAILED_MESSAGE}\n{err}")) {
                    self.render()?;
                }
                Err(err.into())
            }
        }
    }

    fn render(&mut self) -> Result<(), SessionError> {
        self.core
            .render(&mut self.surface)
            .map_err(|e| SessionError::Render(format!("{e:?}")))
    }

    // --- Mutations ---

    /// Place `item` after the current frontier, create it, and reload.
    ///
    /// # Errors
    ///
    /// `Deck(Capacity)` when the deck is full, before any request is sent;
    /// `Transport` when the create or the reload fails.
    pub async fn add_item(&mut self, item: NewItem) -> Result<Item, SessionError> {
        let placement = self.core.propose_placement()?;
        let created = self.api.add_item(&item.at(placement.x, placement.z)).await?;
        info!(id = created.id, x = placement.x, z = placement.z, "item added");
        self.reload().await?;
        Ok(created)
    }

    /// Delete `id` after confirmation, then reload.
    ///
    /// # Errors
    ///
    /// `Cancelled` when the prompt is declined; `Transport` when the delete or
    /// the reload fails.
    pub async fn delete_item(&mut self, id: ItemId, confirm: &mut impl Confirm) -> Result<(), SessionError> {
        if !confirm.confirm(&confirm_prompt(id)) {
            return Err(SessionError::Cancelled);
        }
        self.api.delete_item(id).await?;
        info!(id, "item deleted");
        self.reload().await
    }

    /// Click at a surface position (device space = surface space here).
    ///
    /// Returns the deleted item, or `None` when the click hit no delete
    /// affordance.
    ///
    /// # Errors
    ///
    /// See [`DeckSession::delete_item`].
    pub async fn click(&mut self, at: Point, confirm: &mut impl Confirm) -> Result<Option<ItemId>, SessionError> {
        let event = PointerEvent::new(at, ScreenRect::unscaled(self.core.surface_size()));
        for action in self.core.on_click(event) {
            if let Action::ConfirmDelete { id } = action {
                self.delete_item(id, confirm).await?;
                return Ok(Some(id));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
