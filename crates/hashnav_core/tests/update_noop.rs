use hashnav_core::{update, Msg, RouterState};

#[test]
fn update_is_noop() {
    let state = RouterState::default();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
