//! Use-Case: Verschieben der Selektion (Drag und direktes Verschieben).

use super::{apply_world, ensure_not_busy, start_transforms, unchanged_since_start};
use crate::app::history::Snapshot;
use crate::app::use_cases::selection::{ensure_editable_selection, transform_roots};
use crate::app::{AppState, DragSession, InteractionState};
use crate::core::{ElementId, SceneError, Transform};
use glam::{Vec2, Vec3};
use std::collections::HashSet;
use std::sync::Arc;

/// Wechselt von `Selecting` nach `Dragging`.
pub(super) fn begin_drag(
    state: &mut AppState,
    grabbed: ElementId,
    start_ground: Vec2,
) -> Result<(), SceneError> {
    ensure_not_busy(state)?;
    let selection = ensure_editable_selection(state)?;
    let moved = transform_roots(&state.registry, &selection);
    let start_world = start_transforms(&state.registry, &moved);

    log::debug!("Drag gestartet: {} Wurzel(n)", moved.len());
    state.interaction = InteractionState::Dragging(DragSession {
        before: Arc::clone(&state.registry),
        selection,
        moved,
        start_world,
        grabbed: Some(grabbed),
        start_ground,
        last_ground: start_ground,
    });
    Ok(())
}

/// Verschiebt alle Wurzeln um das Boden-Delta seit Drag-Beginn.
///
/// Das Delta bezieht sich immer auf die Start-Transformationen, dadurch
/// summieren sich keine Rundungsfehler über viele Pointer-Events.
pub(super) fn update_drag(state: &mut AppState, ground: Vec2) {
    let InteractionState::Dragging(session) = &mut state.interaction else {
        return;
    };
    session.last_ground = ground;
    let delta = ground - session.start_ground;
    let offset = Vec3::new(delta.x, 0.0, delta.y);
    let targets: Vec<(ElementId, Transform)> = session
        .start_world
        .iter()
        .map(|(id, start)| {
            (
                *id,
                Transform {
                    translation: start.translation + offset,
                    rotation: start.rotation,
                },
            )
        })
        .collect();

    apply_world(Arc::make_mut(&mut state.registry), targets);
}

/// Schließt den Drag ab: Stapelung je bewegtem Element neu bewerten und Undo aufzeichnen.
///
/// Das gegriffene Element prüft am finalen Pointer-Punkt, alle anderen an ihrem
/// eigenen Mittelpunkt. Mitbewegte Elemente und ihre Nachfahren sind keine Hosts.
/// Endet der Drag innerhalb von `transform_epsilon` am Start, bleibt die Szene unverändert.
pub(super) fn commit_drag(state: &mut AppState, session: DragSession, ground: Vec2) {
    if unchanged_since_start(
        &state.registry,
        &session.start_world,
        state.options.transform_epsilon,
    ) {
        log::debug!("Drag ohne Nettobewegung beendet, kein Undo-Eintrag");
        state.registry = session.before;
        return;
    }

    let snap_to_top = state.options.snap_stacked_to_host_top;
    let tie_break = state.options.host_tie_break;
    let registry = Arc::make_mut(&mut state.registry);

    let mut excluded: HashSet<ElementId> = HashSet::new();
    for id in &session.moved {
        excluded.insert(*id);
        excluded.extend(registry.descendants(*id));
    }

    for &id in &session.moved {
        let Some(world) = registry.world_transform(id) else {
            continue;
        };
        let drop_point = if session.grabbed == Some(id) {
            ground
        } else {
            world.ground()
        };
        let current_parent = registry.get(id).and_then(|e| e.parent_id);
        let host = registry.find_stacking_host(id, drop_point, &excluded, tie_break);

        match (current_parent, host) {
            (Some(parent), Some(host)) if parent == host => {}
            (_, Some(host)) => {
                if snap_to_top {
                    if let Some(top) = registry.get(host).map(|h| h.top_elevation()) {
                        let mut snapped = world;
                        snapped.translation.y = top;
                        let local = registry.local_for_world(id, &snapped);
                        registry.set_local_transform(id, local);
                    }
                }
                match registry.bind(id, host) {
                    Ok(()) => log::info!("Element {} auf Host {} abgelegt", id, host),
                    Err(e) => log::warn!("Stapeln von Element {} fehlgeschlagen: {}", id, e),
                }
            }
            (Some(parent), None) => {
                if let Err(e) = registry.unbind(id) {
                    log::warn!("Lösen von Element {} fehlgeschlagen: {}", id, e);
                } else {
                    log::info!("Element {} von Host {} gelöst", id, parent);
                }
            }
            (None, None) => {}
        }
    }

    state.history.record_snapshot(Snapshot {
        registry: session.before,
        selection: state.selection.clone(),
    });
    log::info!("{} Element(e) verschoben", session.moved.len());
}

/// Verschiebt die Selektion direkt um einen Welt-Offset (ohne Geste).
pub fn move_selection(state: &mut AppState, delta: Vec3) -> Result<(), SceneError> {
    if !state.interaction.is_idle() {
        log::debug!("Direktes Verschieben während laufender Geste ignoriert");
        return Ok(());
    }
    let selection = ensure_editable_selection(state)?;
    ensure_not_busy(state)?;
    if !delta.is_finite() {
        return Err(SceneError::MalformedGeometry(format!(
            "Verschiebung {delta} ist nicht endlich"
        )));
    }

    let roots = transform_roots(&state.registry, &selection);
    let targets: Vec<(ElementId, Transform)> = start_transforms(&state.registry, &roots)
        .into_iter()
        .map(|(id, mut world)| {
            world.translation += delta;
            (id, world)
        })
        .collect();

    state.record_undo_snapshot();
    apply_world(state.registry_mut(), targets);
    log::info!("{} Element(e) um {} verschoben", roots.len(), delta);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::use_cases::interaction::{begin_press, cancel_interaction, end_press, update_pointer};
    use crate::core::ElementKind;

    #[test]
    fn drag_moves_roots_and_keeps_children_relative() {
        let mut state = AppState::new();
        let registry = state.registry_mut();
        let table = registry.place(ElementKind::Table, Transform::IDENTITY, None);
        let vase = registry.place(
            ElementKind::Centerpiece,
            Transform::from_translation(Vec3::new(0.3, 0.75, 0.0)),
            None,
        );
        registry.bind(vase, table).expect("Bindung erwartet");
        state.selection.replace([table, vase]);

        begin_press(&mut state, Some(table), Vec2::ZERO, Vec2::ZERO, false);
        update_pointer(&mut state, Vec2::new(50.0, 0.0), Vec2::new(2.0, 1.0))
            .expect("Drag erwartet");
        assert!(matches!(state.interaction, InteractionState::Dragging(_)));
        end_press(&mut state, Vec2::new(2.0, 1.0));

        let vase_world = state.registry.world_transform(vase).unwrap();
        assert!(vase_world
            .translation
            .abs_diff_eq(Vec3::new(2.3, 0.75, 1.0), 1e-5));
        assert_eq!(state.registry.get(vase).unwrap().parent_id, Some(table));
        assert!(state.can_undo());
    }

    #[test]
    fn escape_restores_pre_drag_registry() {
        let mut state = AppState::new();
        let chair = state
            .registry_mut()
            .place(ElementKind::Chair, Transform::IDENTITY, None);
        state.selection.select_only(chair);

        begin_press(&mut state, Some(chair), Vec2::ZERO, Vec2::ZERO, false);
        update_pointer(&mut state, Vec2::new(40.0, 0.0), Vec2::new(4.0, 0.0)).unwrap();
        cancel_interaction(&mut state);

        assert!(state.interaction.is_idle());
        assert!(state
            .registry
            .world_transform(chair)
            .unwrap()
            .abs_diff_eq(&Transform::IDENTITY, 1e-6));
        assert!(!state.can_undo());
    }

    #[test]
    fn drag_back_to_start_records_nothing() {
        let mut state = AppState::new();
        let chair = state
            .registry_mut()
            .place(ElementKind::Chair, Transform::IDENTITY, None);
        state.selection.select_only(chair);
        let before = Arc::clone(&state.registry);

        begin_press(&mut state, Some(chair), Vec2::ZERO, Vec2::ZERO, false);
        update_pointer(&mut state, Vec2::new(40.0, 0.0), Vec2::new(3.0, 0.0))
            .expect("Drag erwartet");
        update_pointer(&mut state, Vec2::new(0.0, 0.0), Vec2::new(0.00001, 0.0))
            .expect("Drag erwartet");
        end_press(&mut state, Vec2::new(0.00001, 0.0));

        assert!(state.interaction.is_idle());
        assert!(!state.can_undo());
        assert!(Arc::ptr_eq(&state.registry, &before));
    }

    #[test]
    fn direct_move_of_locked_selection_is_rejected() {
        let mut state = AppState::new();
        let registry = state.registry_mut();
        let a = registry.place(ElementKind::Chair, Transform::IDENTITY, None);
        let b = registry.place(ElementKind::Chair, Transform::IDENTITY, None);
        registry.get_mut(b).unwrap().locked = true;
        state.selection.replace([a, b]);

        let result = move_selection(&mut state, Vec3::X);
        assert_eq!(result, Err(SceneError::SelectionContainsLockedElement(b)));
        assert!(state
            .registry
            .world_transform(a)
            .unwrap()
            .abs_diff_eq(&Transform::IDENTITY, 1e-6));
    }
}
