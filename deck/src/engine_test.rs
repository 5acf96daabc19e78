#![allow(clippy::float_cmp)]

use super::*;
use crate::color::HOVER_HIGHLIGHT;
use crate::model::{Deck, Item};
use crate::surface::{DisplayList, DrawCommand};

// =============================================================
// Helpers
// =============================================================

#[derive(Debug, Clone, PartialEq)]
enum OverlayCall {
    Create { title: String, at: Point },
    Reposition(Point),
    Destroy,
}

/// Records overlay calls and tracks how many tooltips are alive.
#[derive(Debug, Default)]
struct RecordingOverlay {
    calls: Vec<OverlayCall>,
    live: usize,
    max_live: usize,
}

impl RecordingOverlay {
    fn creates(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, OverlayCall::Create { .. })).count()
    }

    fn destroys(&self) -> usize {
        self.calls.iter().filter(|c| **c == OverlayCall::Destroy).count()
    }
}

impl Overlay for RecordingOverlay {
    fn create(&mut self, content: &TooltipContent, at: Point) {
        self.calls.push(OverlayCall::Create { title: content.title.clone(), at });
        self.live += 1;
        self.max_live = self.max_live.max(self.live);
    }

    fn reposition(&mut self, at: Point) {
        self.calls.push(OverlayCall::Reposition(at));
    }

    fn destroy(&mut self) {
        self.calls.push(OverlayCall::Destroy);
        self.live = self.live.saturating_sub(1);
    }
}

fn deck(width: f64, length: f64) -> Deck {
    Deck { width, length, height: 4.0, max_weight: 100.0, usable_space_fraction: 0.8 }
}

fn item(id: ItemId, x: f64, z: f64, width: f64, length: f64) -> Item {
    Item {
        id,
        kind: "Container".into(),
        width,
        length,
        height: 2.0,
        weight: 5.0,
        color: None,
        position_x: x,
        position_y: 0.0,
        position_z: z,
    }
}

fn snapshot(deck: Deck, items: Vec<Item>) -> LoadSnapshot {
    LoadSnapshot { deck: Some(deck), items, ..Default::default() }
}

/// A core with `snap` loaded and rendered onto `list`.
fn loaded(snap: LoadSnapshot, list: &mut DisplayList, overlay: &mut RecordingOverlay) -> EngineCore {
    let mut core = EngineCore::new();
    let ticket = core.begin_load(overlay);
    assert!(core.accept_snapshot(ticket, snap));
    core.render(list).unwrap();
    core
}

/// Pointer event for a surface displayed unscaled at the device origin.
fn at(core: &EngineCore, x: f64, y: f64) -> PointerEvent {
    PointerEvent::new(Point::new(x, y), ScreenRect::unscaled(core.surface_size()))
}

// =============================================================
// Loads
// =============================================================

#[test]
fn tickets_are_monotonic() {
    let mut core = EngineCore::new();
    let mut overlay = RecordingOverlay::default();
    let a = core.begin_load(&mut overlay);
    let b = core.begin_load(&mut overlay);
    assert!(b > a);
    assert_eq!(b.seq(), a.seq() + 1);
}

#[test]
fn only_issued_tickets_can_be_looked_up() {
    let mut core = EngineCore::new();
    let mut overlay = RecordingOverlay::default();
    assert_eq!(core.ticket(1), None);

    let a = core.begin_load(&mut overlay);
    assert_eq!(core.ticket(a.seq()), Some(a));
    assert_eq!(core.ticket(0), None);
    assert_eq!(core.ticket(a.seq() + 1), None);
}

#[test]
fn stale_response_is_discarded() {
    let mut core = EngineCore::new();
    let mut overlay = RecordingOverlay::default();
    let first = core.begin_load(&mut overlay);
    let second = core.begin_load(&mut overlay);

    assert!(core.accept_snapshot(second, snapshot(deck(10.0, 6.0), vec![item(2, 0.0, 0.0, 2.0, 3.0)])));
    assert!(!core.accept_snapshot(first, snapshot(deck(10.0, 6.0), vec![item(1, 0.0, 0.0, 2.0, 3.0)])));

    assert!(core.snapshot().unwrap().item(2).is_some());
    assert!(core.snapshot().unwrap().item(1).is_none());
}

#[test]
fn in_order_responses_are_both_accepted() {
    let mut core = EngineCore::new();
    let mut overlay = RecordingOverlay::default();
    let first = core.begin_load(&mut overlay);
    let second = core.begin_load(&mut overlay);
    assert!(core.accept_snapshot(first, snapshot(deck(10.0, 6.0), vec![])));
    assert!(core.accept_snapshot(second, snapshot(deck(12.0, 6.0), vec![])));
    assert_eq!(core.snapshot().unwrap().deck.as_ref().unwrap().width, 12.0);
}

#[test]
fn stale_failure_does_not_replace_snapshot() {
    let mut core = EngineCore::new();
    let mut overlay = RecordingOverlay::default();
    let first = core.begin_load(&mut overlay);
    let second = core.begin_load(&mut overlay);
    assert!(core.accept_snapshot(second, snapshot(deck(10.0, 6.0), vec![])));
    assert!(!core.fail_load(first, "late failure"));
    assert!(core.snapshot().is_some());
}

#[test]
fn same_ticket_is_accepted_once() {
    let mut core = EngineCore::new();
    let mut overlay = RecordingOverlay::default();
    let ticket = core.begin_load(&mut overlay);
    assert!(core.accept_snapshot(ticket, snapshot(deck(10.0, 6.0), vec![])));
    assert!(!core.accept_snapshot(ticket, snapshot(deck(10.0, 6.0), vec![])));
}

#[test]
fn new_snapshot_clears_bounds_until_next_render() {
    let mut list = DisplayList::default();
    let mut overlay = RecordingOverlay::default();
    let mut core = loaded(snapshot(deck(10.0, 6.0), vec![item(1, 0.0, 0.0, 2.0, 3.0)]), &mut list, &mut overlay);
    assert_eq!(core.bounds().len(), 1);

    let ticket = core.begin_load(&mut overlay);
    core.accept_snapshot(ticket, snapshot(deck(10.0, 6.0), vec![]));
    assert!(core.bounds().is_empty());
}

// =============================================================
// Render
// =============================================================

#[test]
fn render_records_bounds_and_surface_size() {
    let mut list = DisplayList::default();
    let mut overlay = RecordingOverlay::default();
    let core = loaded(snapshot(deck(10.0, 6.0), vec![item(1, 0.0, 0.0, 2.0, 3.0)]), &mut list, &mut overlay);
    assert_eq!(core.surface_size(), SurfaceSize::new(270, 170));
    assert_eq!(core.bounds()[0].rect, crate::layout::Rect::new(50.0, 30.0, 40.0, 60.0));
}

#[test]
fn render_before_any_load_draws_nothing() {
    let mut core = EngineCore::new();
    let mut list = DisplayList::default();
    core.render(&mut list).unwrap();
    assert!(list.commands().is_empty());
    assert!(core.bounds().is_empty());
}

#[test]
fn failed_load_renders_message_and_no_bounds() {
    let mut list = DisplayList::default();
    let mut overlay = RecordingOverlay::default();
    let mut core = loaded(snapshot(deck(10.0, 6.0), vec![item(1, 0.0, 0.0, 2.0, 3.0)]), &mut list, &mut overlay);

    let ticket = core.begin_load(&mut overlay);
    assert!(core.fail_load(ticket, "Failed to load data.\nconnection refused"));
    core.render(&mut list).unwrap();

    assert!(core.bounds().is_empty());
    assert!(core.snapshot().is_none());
    assert_eq!(list.texts().collect::<Vec<_>>(), vec!["Failed to load data.", "connection refused"]);
    // Clicks on the old affordance do nothing.
    assert!(core.on_click(at(&core, 75.0, 45.0)).is_empty());
}

#[test]
fn snapshot_without_deck_renders_invalid_message() {
    let mut list = DisplayList::default();
    let mut overlay = RecordingOverlay::default();
    let snap = LoadSnapshot { deck: None, items: vec![item(1, 0.0, 0.0, 2.0, 3.0)], ..Default::default() };
    let core = loaded(snap, &mut list, &mut overlay);
    assert!(core.bounds().is_empty());
    assert!(list.texts().any(|t| t == render::INVALID_SNAPSHOT_MESSAGE));
}

#[test]
fn hovered_item_is_highlighted_on_next_render() {
    let mut list = DisplayList::default();
    let mut overlay = RecordingOverlay::default();
    let mut core = loaded(snapshot(deck(10.0, 6.0), vec![item(1, 0.0, 0.0, 2.0, 3.0)]), &mut list, &mut overlay);

    let actions = core.on_pointer_move(at(&core, 60.0, 80.0), &mut overlay);
    assert!(actions.contains(&Action::RenderNeeded));
    core.render(&mut list).unwrap();
    assert!(list.commands().iter().any(|c| matches!(
        c,
        DrawCommand::StrokeRect { stroke, .. } if stroke.color == HOVER_HIGHLIGHT
    )));
}

// =============================================================
// Hover and tooltip
// =============================================================

#[test]
fn entering_an_item_creates_one_tooltip() {
    let mut list = DisplayList::default();
    let mut overlay = RecordingOverlay::default();
    let mut core = loaded(snapshot(deck(10.0, 6.0), vec![item(1, 0.0, 0.0, 2.0, 3.0)]), &mut list, &mut overlay);

    let actions = core.on_pointer_move(at(&core, 60.0, 80.0), &mut overlay);
    assert_eq!(actions, vec![Action::SetCursor(Cursor::Pointer), Action::RenderNeeded]);
    assert_eq!(
        overlay.calls,
        vec![OverlayCall::Create { title: "Container #1".into(), at: Point::new(75.0, 95.0) }]
    );
    assert_eq!(core.hovered(), Some(1));
    assert!(core.tooltip_open());
}

#[test]
fn moving_within_an_item_repositions() {
    let mut list = DisplayList::default();
    let mut overlay = RecordingOverlay::default();
    let mut core = loaded(snapshot(deck(10.0, 6.0), vec![item(1, 0.0, 0.0, 2.0, 3.0)]), &mut list, &mut overlay);

    core.on_pointer_move(at(&core, 60.0, 80.0), &mut overlay);
    let actions = core.on_pointer_move(at(&core, 62.0, 82.0), &mut overlay);
    assert!(actions.is_empty());
    assert_eq!(overlay.calls.last(), Some(&OverlayCall::Reposition(Point::new(77.0, 97.0))));
    assert_eq!(overlay.creates(), 1);
}

#[test]
fn moving_over_empty_space_does_nothing() {
    let mut list = DisplayList::default();
    let mut overlay = RecordingOverlay::default();
    let mut core = loaded(snapshot(deck(10.0, 6.0), vec![item(1, 0.0, 0.0, 2.0, 3.0)]), &mut list, &mut overlay);

    assert!(core.on_pointer_move(at(&core, 200.0, 120.0), &mut overlay).is_empty());
    assert!(core.on_pointer_move(at(&core, 210.0, 125.0), &mut overlay).is_empty());
    assert!(overlay.calls.is_empty());
}

#[test]
fn rapid_motion_over_three_overlapping_items_keeps_one_tooltip() {
    // Items span 50..130, 90..170 and 130..210 px; an overlap goes to the earlier item.
    let items = vec![
        item(1, 0.0, 0.0, 4.0, 3.0),
        item(2, 2.0, 0.0, 4.0, 3.0),
        item(3, 4.0, 0.0, 4.0, 3.0),
    ];
    let mut list = DisplayList::default();
    let mut overlay = RecordingOverlay::default();
    let mut core = loaded(snapshot(deck(10.0, 6.0), items), &mut list, &mut overlay);

    core.on_pointer_move(at(&core, 70.0, 50.0), &mut overlay); // 1
    core.on_pointer_move(at(&core, 100.0, 50.0), &mut overlay); // 1 and 2, still 1
    core.on_pointer_move(at(&core, 140.0, 50.0), &mut overlay); // 2 and 3, takes 2
    core.on_pointer_move(at(&core, 190.0, 50.0), &mut overlay); // 3
    core.on_pointer_move(at(&core, 150.0, 50.0), &mut overlay); // 2 and 3, back to 2
    core.on_pointer_move(at(&core, 70.0, 50.0), &mut overlay); // 1

    assert_eq!(overlay.creates(), 5);
    assert_eq!(overlay.destroys(), 4);
    assert_eq!(overlay.max_live, 1);
    assert_eq!(overlay.live, 1);
    let titles: Vec<_> = overlay
        .calls
        .iter()
        .filter_map(|c| match c {
            OverlayCall::Create { title, .. } => Some(title.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(
        titles,
        vec!["Container #1", "Container #2", "Container #3", "Container #2", "Container #1"]
    );
}

#[test]
fn exiting_an_item_destroys_tooltip_and_resets_cursor() {
    let mut list = DisplayList::default();
    let mut overlay = RecordingOverlay::default();
    let mut core = loaded(snapshot(deck(10.0, 6.0), vec![item(1, 0.0, 0.0, 2.0, 3.0)]), &mut list, &mut overlay);

    core.on_pointer_move(at(&core, 60.0, 80.0), &mut overlay);
    let actions = core.on_pointer_move(at(&core, 200.0, 80.0), &mut overlay);
    assert_eq!(actions, vec![Action::SetCursor(Cursor::Default), Action::RenderNeeded]);
    assert_eq!(overlay.destroys(), 1);
    assert_eq!(overlay.live, 0);
    assert_eq!(core.hovered(), None);
}

#[test]
fn pointer_leave_forces_idle() {
    let mut list = DisplayList::default();
    let mut overlay = RecordingOverlay::default();
    let mut core = loaded(snapshot(deck(10.0, 6.0), vec![item(1, 0.0, 0.0, 2.0, 3.0)]), &mut list, &mut overlay);

    core.on_pointer_move(at(&core, 60.0, 80.0), &mut overlay);
    let actions = core.on_pointer_leave(&mut overlay);
    assert_eq!(actions, vec![Action::SetCursor(Cursor::Default), Action::RenderNeeded]);
    assert_eq!(overlay.live, 0);
    assert_eq!(core.hovered(), None);
    assert!(!core.tooltip_open());
}

#[test]
fn pointer_leave_when_idle_only_resets_cursor() {
    let mut core = EngineCore::new();
    let mut overlay = RecordingOverlay::default();
    assert_eq!(core.on_pointer_leave(&mut overlay), vec![Action::SetCursor(Cursor::Default)]);
    assert!(overlay.calls.is_empty());
}

#[test]
fn begin_load_takes_down_tooltip() {
    let mut list = DisplayList::default();
    let mut overlay = RecordingOverlay::default();
    let mut core = loaded(snapshot(deck(10.0, 6.0), vec![item(1, 0.0, 0.0, 2.0, 3.0)]), &mut list, &mut overlay);

    core.on_pointer_move(at(&core, 60.0, 80.0), &mut overlay);
    core.begin_load(&mut overlay);
    assert_eq!(overlay.destroys(), 1);
    assert!(!core.tooltip_open());

    // Still over the same item: no tooltip to move.
    core.on_pointer_move(at(&core, 61.0, 80.0), &mut overlay);
    assert!(!overlay.calls.iter().any(|c| matches!(c, OverlayCall::Reposition(_))));
}

#[test]
fn hover_uses_display_scaling() {
    let mut list = DisplayList::default();
    let mut overlay = RecordingOverlay::default();
    let mut core = loaded(snapshot(deck(10.0, 6.0), vec![item(1, 0.0, 0.0, 2.0, 3.0)]), &mut list, &mut overlay);

    // Displayed at half size, offset by (100, 50): surface (60, 80) is device (130, 90).
    let screen = ScreenRect::new(100.0, 50.0, 135.0, 85.0);
    core.on_pointer_move(PointerEvent::new(Point::new(130.0, 90.0), screen), &mut overlay);
    assert_eq!(core.hovered(), Some(1));
}

// =============================================================
// Click
// =============================================================

#[test]
fn click_on_affordance_requests_confirmation() {
    let mut list = DisplayList::default();
    let mut overlay = RecordingOverlay::default();
    let mut core = loaded(snapshot(deck(10.0, 6.0), vec![item(1, 0.0, 0.0, 2.0, 3.0)]), &mut list, &mut overlay);

    assert_eq!(core.on_click(at(&core, 75.0, 45.0)), vec![Action::ConfirmDelete { id: 1 }]);
    assert_eq!(core.on_click(at(&core, 83.0, 51.0)), vec![Action::ConfirmDelete { id: 1 }]);
}

#[test]
fn click_on_body_does_nothing() {
    let mut list = DisplayList::default();
    let mut overlay = RecordingOverlay::default();
    let mut core = loaded(snapshot(deck(10.0, 6.0), vec![item(1, 0.0, 0.0, 2.0, 3.0)]), &mut list, &mut overlay);

    assert!(core.on_click(at(&core, 60.0, 80.0)).is_empty());
    // Inside the affordance's bounding square, outside the circle.
    assert!(core.on_click(at(&core, 84.0, 54.0)).is_empty());
}

#[test]
fn click_between_adjacent_affordances_takes_first_match_in_draw_order() {
    // 1 m wide items: affordance centers at x = 55 and x = 75, radius 10.
    let items = vec![item(1, 0.0, 0.0, 1.0, 3.0), item(2, 1.0, 0.0, 1.0, 3.0)];
    let mut list = DisplayList::default();
    let mut overlay = RecordingOverlay::default();
    let mut core = loaded(snapshot(deck(10.0, 6.0), items), &mut list, &mut overlay);

    assert_eq!(core.on_click(at(&core, 58.0, 45.0)), vec![Action::ConfirmDelete { id: 1 }]);
    assert_eq!(core.on_click(at(&core, 72.0, 45.0)), vec![Action::ConfirmDelete { id: 2 }]);
    // On both rims at once: the earlier item wins.
    assert_eq!(core.on_click(at(&core, 65.0, 45.0)), vec![Action::ConfirmDelete { id: 1 }]);
}

#[test]
fn click_uses_display_scaling() {
    let mut list = DisplayList::default();
    let mut overlay = RecordingOverlay::default();
    let mut core = loaded(snapshot(deck(10.0, 6.0), vec![item(1, 0.0, 0.0, 2.0, 3.0)]), &mut list, &mut overlay);

    // Affordance center (75, 45) displayed at half size from (100, 50).
    let screen = ScreenRect::new(100.0, 50.0, 135.0, 85.0);
    let event = PointerEvent::new(Point::new(137.5, 72.5), screen);
    assert_eq!(core.on_click(event), vec![Action::ConfirmDelete { id: 1 }]);
}

// =============================================================
// Placement and stats
// =============================================================

#[test]
fn placement_needs_a_snapshot() {
    assert_eq!(EngineCore::new().propose_placement(), Err(DeckError::NotLoaded));
}

#[test]
fn placement_follows_frontier() {
    let mut list = DisplayList::default();
    let mut overlay = RecordingOverlay::default();
    let core = loaded(snapshot(deck(10.0, 6.0), vec![item(1, 0.0, 0.0, 2.0, 3.0)]), &mut list, &mut overlay);
    assert_eq!(core.propose_placement(), Ok(Placement { x: 2.0, z: 0.0, has_space: true }));
}

#[test]
fn full_deck_reports_capacity() {
    let mut list = DisplayList::default();
    let mut overlay = RecordingOverlay::default();
    let core = loaded(snapshot(deck(4.0, 3.0), vec![item(1, 2.0, 0.0, 2.0, 3.0)]), &mut list, &mut overlay);
    assert_eq!(core.propose_placement(), Err(DeckError::Capacity));
}

#[test]
fn end_to_end_from_wire_json() {
    let body = r#"{
        "ferry_info": {"width": 10, "length": 6, "height": 4, "max_weight": 100, "usable_space_percentage": 0.8},
        "placed_items": [
            {"id": 1, "type": "Container", "width": 2, "length": 3, "height": 2, "weight": 5,
             "position_x": 0, "position_y": 0, "position_z": 0}
        ],
        "total_weight": 5,
        "total_volume_occupied": 12
    }"#;
    let mut list = DisplayList::default();
    let mut overlay = RecordingOverlay::default();
    let core = loaded(LoadSnapshot::from_json(body).unwrap(), &mut list, &mut overlay);

    assert_eq!(core.bounds().len(), 1);
    assert_eq!(core.bounds()[0].rect, crate::layout::Rect::new(50.0, 30.0, 40.0, 60.0));
    assert_eq!(core.bounds()[0].delete.center, Point::new(75.0, 45.0));
    assert_eq!(core.stats().unwrap().items_loaded, 1);
}
