use super::*;

#[test]
fn no_actions_no_effects() {
    assert_eq!(Effects::from_actions(&[]), Effects::default());
}

#[test]
fn hover_transition_sets_cursor_and_redraws() {
    let fx = Effects::from_actions(&[Action::SetCursor(Cursor::Pointer), Action::RenderNeeded]);
    assert_eq!(fx, Effects { cursor: Some(Cursor::Pointer), render: true, delete: None });
}

#[test]
fn last_cursor_wins() {
    let fx = Effects::from_actions(&[Action::SetCursor(Cursor::Pointer), Action::SetCursor(Cursor::Default)]);
    assert_eq!(fx.cursor, Some(Cursor::Default));
    assert!(!fx.render);
}

#[test]
fn first_delete_request_is_kept() {
    let fx = Effects::from_actions(&[Action::ConfirmDelete { id: 4 }, Action::ConfirmDelete { id: 9 }]);
    assert_eq!(fx.delete, Some(4));
    assert_eq!(fx.cursor, None);
}
