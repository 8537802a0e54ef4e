use crate::app::{AppCommand, AppIntent, AppState, InteractionState, PressState};
use crate::core::{ElementKind, Transform};
use glam::{Vec2, Vec3};

use super::map_intent_to_commands;

fn state_with_table() -> (AppState, u64) {
    let mut state = AppState::new();
    let table = state.registry_mut().place(
        ElementKind::Table,
        Transform::from_translation(Vec3::new(2.0, 0.0, 2.0)),
        None,
    );
    (state, table)
}

#[test]
fn pointer_down_resolves_hit_test() {
    let (state, table) = state_with_table();

    let commands = map_intent_to_commands(
        &state,
        AppIntent::PointerDown {
            screen: Vec2::ZERO,
            ground: Vec2::new(2.1, 2.1),
            shift: true,
        },
    );

    assert_eq!(commands.len(), 1);
    assert!(matches!(
        commands[0],
        AppCommand::BeginPress {
            hit: Some(id),
            toggle: true,
            ..
        } if id == table
    ));
}

#[test]
fn pointer_down_on_empty_space_has_no_hit() {
    let (state, _) = state_with_table();

    let commands = map_intent_to_commands(
        &state,
        AppIntent::PointerDown {
            screen: Vec2::ZERO,
            ground: Vec2::new(-20.0, 5.0),
            shift: false,
        },
    );

    assert!(matches!(
        commands[0],
        AppCommand::BeginPress { hit: None, .. }
    ));
}

#[test]
fn pointer_move_while_idle_only_updates_hover() {
    let (state, table) = state_with_table();

    let commands = map_intent_to_commands(
        &state,
        AppIntent::PointerMoved {
            screen: Vec2::ZERO,
            ground: Vec2::new(2.0, 2.0),
        },
    );

    assert_eq!(commands.len(), 1);
    assert!(matches!(commands[0], AppCommand::SetHover { id: Some(id) } if id == table));
}

#[test]
fn pointer_up_during_press_updates_then_ends() {
    let (mut state, _) = state_with_table();
    state.interaction = InteractionState::Selecting(PressState {
        hit: None,
        start_screen: Vec2::ZERO,
        start_ground: Vec2::ZERO,
        deferred_select_only: None,
    });

    let commands = map_intent_to_commands(
        &state,
        AppIntent::PointerUp {
            screen: Vec2::ONE,
            ground: Vec2::ONE,
        },
    );

    assert_eq!(commands.len(), 2);
    assert!(matches!(commands[0], AppCommand::UpdatePointer { .. }));
    assert!(matches!(commands[1], AppCommand::EndPress { .. }));
}

#[test]
fn undo_cancels_running_interaction_first() {
    let state = AppState::new();

    let commands = map_intent_to_commands(&state, AppIntent::UndoRequested);

    assert_eq!(commands.len(), 2);
    assert!(matches!(commands[0], AppCommand::CancelInteraction));
    assert!(matches!(commands[1], AppCommand::Undo));
}
