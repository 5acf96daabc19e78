use tracing::{debug, info};
use wasm_bindgen::JsValue;
use web_sys::HtmlCanvasElement;

use crate::error::DeckError;
use crate::hit::{self, RenderedItemBounds};
use crate::input::{Cursor, HoverChange, HoverState, Overlay, PointerEvent, TooltipContent, tooltip_anchor};
use crate::layout::{LayoutTransform, Point, ScreenRect, SurfaceSize};
use crate::model::{ItemId, LoadSnapshot};
use crate::placement::{self, Placement};
use crate::render;
use crate::stats::LoadStats;
use crate::surface::Surface;
use crate::web::{CanvasSurface, DomTooltip};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetCursor(Cursor),
    RenderNeeded,
    /// The user clicked an item's delete affordance. The host confirms, deletes, and reloads.
    ConfirmDelete { id: ItemId },
}

/// Handle for one in-flight load. Responses are accepted only through the
/// ticket their request was issued with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

impl LoadTicket {
    #[must_use]
    pub fn seq(self) -> u64 {
        self.0
    }
}

/// What the surface currently shows.
#[derive(Debug, Clone, Default)]
enum Loaded {
    #[default]
    Nothing,
    Snapshot(LoadSnapshot),
    Failed(String),
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
#[derive(Debug, Default)]
pub struct EngineCore {
    pub layout: LayoutTransform,
    loaded: Loaded,
    bounds: Vec<RenderedItemBounds>,
    hover: HoverState,
    tooltip_open: bool,
    surface_size: SurfaceSize,
    issued_seq: u64,
    accepted_seq: u64,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Loads ---

    /// Start a load: issue the next ticket and take down any tooltip.
    pub fn begin_load(&mut self, overlay: &mut impl Overlay) -> LoadTicket {
        self.close_tooltip(overlay);
        self.issued_seq += 1;
        LoadTicket(self.issued_seq)
    }

    /// The ticket previously issued with sequence number `seq`, for hosts that
    /// carry tickets across a language boundary as plain numbers.
    #[must_use]
    pub fn ticket(&self, seq: u64) -> Option<LoadTicket> {
        (1..=self.issued_seq).contains(&seq).then_some(LoadTicket(seq))
    }

    /// Replace the snapshot with a load response.
    ///
    /// Returns `false`, leaving state untouched, when a newer load has already
    /// been accepted.
    pub fn accept_snapshot(&mut self, ticket: LoadTicket, snapshot: LoadSnapshot) -> bool {
        if !self.accept(ticket) {
            return false;
        }
        info!(seq = ticket.0, items = snapshot.items.len(), "snapshot accepted");
        self.loaded = Loaded::Snapshot(snapshot);
        self.bounds.clear();
        true
    }

    /// Record a failed load. The next render shows `message` in place of the deck.
    ///
    /// Returns `false` when a newer load has already been accepted.
    pub fn fail_load(&mut self, ticket: LoadTicket, message: impl Into<String>) -> bool {
        if !self.accept(ticket) {
            return false;
        }
        self.loaded = Loaded::Failed(message.into());
        self.bounds.clear();
        true
    }

    fn accept(&mut self, ticket: LoadTicket) -> bool {
        if ticket.0 <= self.accepted_seq {
            debug!(seq = ticket.0, accepted = self.accepted_seq, "discarding stale load");
            return false;
        }
        self.accepted_seq = ticket.0;
        true
    }

    // --- Render ---

    /// Full redraw of the current state onto `surface`.
    ///
    /// Replaces the hit-test bounds with those of this render.
    ///
    /// # Errors
    ///
    /// Propagates the first failing surface call. Bounds are left empty.
    pub fn render<S: Surface>(&mut self, surface: &mut S) -> Result<(), S::Error> {
        self.bounds.clear();
        match &self.loaded {
            Loaded::Nothing => {
                surface.clear();
            }
            Loaded::Failed(message) => {
                render::draw_message(surface, message)?;
            }
            Loaded::Snapshot(snapshot) => {
                self.bounds = render::render(surface, &self.layout, Some(snapshot), self.hover.hovered())?;
            }
        }
        self.surface_size = surface.size();
        Ok(())
    }

    // --- Input events ---

    /// Pointer moved over the surface.
    pub fn on_pointer_move(&mut self, event: PointerEvent, overlay: &mut impl Overlay) -> Vec<Action> {
        let pt = self.to_surface(event);
        let target = hit::item_at(&self.bounds, pt);

        match self.hover.update(target) {
            HoverChange::Unchanged => {
                if target.is_some() && self.tooltip_open {
                    overlay.reposition(tooltip_anchor(event.device));
                }
                Vec::new()
            }
            HoverChange::Changed { from, to } => {
                debug!(?from, ?to, "hover changed");
                self.close_tooltip(overlay);
                if let Some(item) = to.and_then(|id| self.snapshot().and_then(|s| s.item(id))) {
                    overlay.create(&TooltipContent::for_item(item), tooltip_anchor(event.device));
                    self.tooltip_open = true;
                }
                vec![Action::SetCursor(self.hover.cursor()), Action::RenderNeeded]
            }
        }
    }

    /// Pointer left the surface.
    pub fn on_pointer_leave(&mut self, overlay: &mut impl Overlay) -> Vec<Action> {
        self.close_tooltip(overlay);
        let was_hovering = self.hover.reset().is_some();
        let mut actions = vec![Action::SetCursor(Cursor::Default)];
        if was_hovering {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    /// Pointer clicked. Only delete affordances react to clicks.
    pub fn on_click(&mut self, event: PointerEvent) -> Vec<Action> {
        let pt = self.to_surface(event);
        match hit::delete_target_at(&self.bounds, pt) {
            Some(id) => {
                debug!(id, "delete affordance clicked");
                vec![Action::ConfirmDelete { id }]
            }
            None => Vec::new(),
        }
    }

    fn to_surface(&self, event: PointerEvent) -> Point {
        self.layout.device_to_surface(event.device, event.screen, self.surface_size)
    }

    fn close_tooltip(&mut self, overlay: &mut impl Overlay) {
        if self.tooltip_open {
            overlay.destroy();
            self.tooltip_open = false;
        }
    }

    // --- Placement ---

    /// Where the next item should go.
    ///
    /// # Errors
    ///
    /// `NotLoaded` before any snapshot, `InvalidSnapshot` without a deck,
    /// `Capacity` when the deck is full.
    pub fn propose_placement(&self) -> Result<Placement, DeckError> {
        let snapshot = self.snapshot().ok_or(DeckError::NotLoaded)?;
        placement::propose(snapshot.deck()?, &snapshot.items).require_space()
    }

    // --- Queries ---

    /// The last accepted snapshot, unless a later load failed.
    #[must_use]
    pub fn snapshot(&self) -> Option<&LoadSnapshot> {
        match &self.loaded {
            Loaded::Snapshot(snapshot) => Some(snapshot),
            Loaded::Nothing | Loaded::Failed(_) => None,
        }
    }

    /// Stats for the current snapshot.
    ///
    /// # Errors
    ///
    /// `NotLoaded` or `InvalidSnapshot`.
    pub fn stats(&self) -> Result<LoadStats, DeckError> {
        LoadStats::from_snapshot(self.snapshot().ok_or(DeckError::NotLoaded)?)
    }

    /// Item bounds from the most recent render, in draw order.
    #[must_use]
    pub fn bounds(&self) -> &[RenderedItemBounds] {
        &self.bounds
    }

    #[must_use]
    pub fn hovered(&self) -> Option<ItemId> {
        self.hover.hovered()
    }

    #[must_use]
    pub fn tooltip_open(&self) -> bool {
        self.tooltip_open
    }

    /// Surface size at the most recent render.
    #[must_use]
    pub fn surface_size(&self) -> SurfaceSize {
        self.surface_size
    }
}

/// The browser engine. Wraps `EngineCore` and owns the canvas, its 2D context,
/// and the DOM tooltip.
pub struct Engine {
    canvas: HtmlCanvasElement,
    surface: CanvasSurface,
    tooltip: DomTooltip,
    pub core: EngineCore,
}

impl Engine {
    /// Create an engine bound to `canvas`.
    ///
    /// # Errors
    ///
    /// Fails when the canvas has no 2D context or there is no document.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let surface = CanvasSurface::new(&canvas)?;
        let tooltip = DomTooltip::new()?;
        Ok(Self { canvas, surface, tooltip, core: EngineCore::new() })
    }

    // --- Loads ---

    pub fn begin_load(&mut self) -> LoadTicket {
        self.core.begin_load(&mut self.tooltip)
    }

    pub fn accept_snapshot(&mut self, ticket: LoadTicket, snapshot: LoadSnapshot) -> bool {
        self.core.accept_snapshot(ticket, snapshot)
    }

    pub fn fail_load(&mut self, ticket: LoadTicket, message: impl Into<String>) -> bool {
        self.core.fail_load(ticket, message)
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Propagates canvas API failures.
    pub fn render(&mut self) -> Result<(), JsValue> {
        self.core.render(&mut self.surface)
    }

    // --- Input events (client coordinates) ---

    pub fn on_pointer_move(&mut self, client_x: f64, client_y: f64) -> Vec<Action> {
        let event = self.pointer_event(client_x, client_y);
        self.core.on_pointer_move(event, &mut self.tooltip)
    }

    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.core.on_pointer_leave(&mut self.tooltip)
    }

    pub fn on_click(&mut self, client_x: f64, client_y: f64) -> Vec<Action> {
        let event = self.pointer_event(client_x, client_y);
        self.core.on_click(event)
    }

    /// Apply a cursor change to the canvas element.
    ///
    /// # Errors
    ///
    /// Propagates a rejected style update.
    pub fn apply_cursor(&self, cursor: Cursor) -> Result<(), JsValue> {
        self.canvas.style().set_property("cursor", cursor.css())
    }

    fn pointer_event(&self, client_x: f64, client_y: f64) -> PointerEvent {
        let rect = self.canvas.get_bounding_client_rect();
        PointerEvent::new(
            Point::new(client_x, client_y),
            ScreenRect::new(rect.left(), rect.top(), rect.width(), rect.height()),
        )
    }

    // --- Delegated queries ---

    /// # Errors
    ///
    /// See [`EngineCore::propose_placement`].
    pub fn propose_placement(&self) -> Result<Placement, DeckError> {
        self.core.propose_placement()
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<&LoadSnapshot> {
        self.core.snapshot()
    }
}
