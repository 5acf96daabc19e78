use super::*;

fn item(id: ItemId) -> Item {
    Item {
        id,
        kind: "Container".into(),
        width: 2.5,
        length: 6.0,
        height: 2.6,
        weight: 12.5,
        color: None,
        position_x: 0.0,
        position_y: 0.0,
        position_z: 0.0,
    }
}

// =============================================================
// HoverState
// =============================================================

#[test]
fn hover_default_is_idle() {
    assert_eq!(HoverState::default(), HoverState::Idle);
    assert_eq!(HoverState::default().hovered(), None);
    assert_eq!(HoverState::default().cursor(), Cursor::Default);
}

#[test]
fn hover_enter_from_idle() {
    let mut state = HoverState::Idle;
    assert_eq!(state.update(Some(4)), HoverChange::Changed { from: None, to: Some(4) });
    assert_eq!(state, HoverState::Hovering(4));
    assert_eq!(state.cursor(), Cursor::Pointer);
}

#[test]
fn hover_same_target_is_unchanged() {
    let mut state = HoverState::Hovering(4);
    assert_eq!(state.update(Some(4)), HoverChange::Unchanged);
    let mut idle = HoverState::Idle;
    assert_eq!(idle.update(None), HoverChange::Unchanged);
}

#[test]
fn hover_switch_between_items() {
    let mut state = HoverState::Hovering(1);
    assert_eq!(state.update(Some(2)), HoverChange::Changed { from: Some(1), to: Some(2) });
    assert_eq!(state.hovered(), Some(2));
}

#[test]
fn hover_exit_to_idle() {
    let mut state = HoverState::Hovering(1);
    assert_eq!(state.update(None), HoverChange::Changed { from: Some(1), to: None });
    assert_eq!(state, HoverState::Idle);
}

#[test]
fn hover_reset_returns_previous() {
    let mut state = HoverState::Hovering(9);
    assert_eq!(state.reset(), Some(9));
    assert_eq!(state.reset(), None);
}

// =============================================================
// Cursor
// =============================================================

#[test]
fn cursor_css_values() {
    assert_eq!(Cursor::Default.css(), "default");
    assert_eq!(Cursor::Pointer.css(), "pointer");
}

// =============================================================
// Tooltip and prompt text
// =============================================================

#[test]
fn tooltip_content_describes_item() {
    let content = TooltipContent::for_item(&item(17));
    assert_eq!(content.title, "Container #17");
    assert_eq!(content.lines, vec!["Dimensions: 2.5m × 6m".to_string(), "Weight: 12.5t".to_string()]);
}

#[test]
fn tooltip_anchor_offsets_both_axes() {
    assert_eq!(tooltip_anchor(Point::new(100.0, 40.0)), Point::new(115.0, 55.0));
}

#[test]
fn confirm_prompt_names_item() {
    assert_eq!(confirm_prompt(3), "Delete container #3?");
}
