//! Use-Case: Drehen der Selektion um den Drehpunkt des primären Elements.

use super::{apply_world, ensure_not_busy, start_transforms, unchanged_since_start};
use crate::app::history::Snapshot;
use crate::app::use_cases::selection::{ensure_editable_selection, transform_roots};
use crate::app::{AppState, InteractionState, RotateSession};
use crate::core::{rotate_transform_around, ElementId, SceneError, Transform};
use glam::{Vec2, Vec3};
use std::sync::Arc;

/// Drehpunkt der Selektion: Weltposition des primären Elements.
fn selection_pivot(state: &AppState) -> Result<Vec3, SceneError> {
    let primary = state.selection.primary().ok_or(SceneError::EmptySelection)?;
    state
        .registry
        .world_transform(primary)
        .map(|t| t.translation)
        .ok_or(SceneError::ElementNotFound(primary))
}

/// Beginnt das Drehen über den Dreh-Griff (`→ Rotating`).
pub fn begin_rotate(state: &mut AppState, screen: Vec2) -> Result<(), SceneError> {
    if state.interaction.is_transforming() {
        log::debug!("Dreh-Griff während laufender Geste ignoriert");
        return Ok(());
    }
    let selection = ensure_editable_selection(state)?;
    ensure_not_busy(state)?;
    let pivot = selection_pivot(state)?;
    let moved = transform_roots(&state.registry, &selection);
    let start_world = start_transforms(&state.registry, &moved);

    log::debug!("Drehen gestartet um {}", pivot);
    state.interaction = InteractionState::Rotating(RotateSession {
        before: Arc::clone(&state.registry),
        selection,
        moved,
        start_world,
        pivot,
        start_screen_x: screen.x,
        angle: 0.0,
    });
    Ok(())
}

/// Bildet die horizontale Pointer-Distanz auf einen Winkel ab und dreht alle Wurzeln.
pub(super) fn update_rotate(state: &mut AppState, screen_x: f32) {
    let options = &state.options;
    let InteractionState::Rotating(session) = &mut state.interaction else {
        return;
    };
    let angle = options.rotation_for_pixels(screen_x - session.start_screen_x);
    session.angle = angle;
    let pivot = session.pivot;
    let targets: Vec<(ElementId, Transform)> = session
        .start_world
        .iter()
        .map(|(id, start)| (*id, rotate_transform_around(start, angle, pivot)))
        .collect();

    apply_world(Arc::make_mut(&mut state.registry), targets);
}

/// Schließt das Drehen ab. Bestehende Stapelungen bleiben unverändert.
pub(super) fn commit_rotate(state: &mut AppState, session: RotateSession) {
    if unchanged_since_start(
        &state.registry,
        &session.start_world,
        state.options.transform_epsilon,
    ) {
        log::debug!("Drehen ohne Winkeländerung beendet, kein Undo-Eintrag");
        state.registry = session.before;
        return;
    }
    state.history.record_snapshot(Snapshot {
        registry: session.before,
        selection: state.selection.clone(),
    });
    log::info!(
        "{} Element(e) um {:.1}° gedreht",
        session.moved.len(),
        session.angle.to_degrees()
    );
}

/// Dreht die Selektion direkt um `angle` (Radiant) um den Drehpunkt.
pub fn rotate_selection(state: &mut AppState, angle: f32) -> Result<(), SceneError> {
    if !state.interaction.is_idle() {
        log::debug!("Direktes Drehen während laufender Geste ignoriert");
        return Ok(());
    }
    let selection = ensure_editable_selection(state)?;
    ensure_not_busy(state)?;
    if !angle.is_finite() {
        return Err(SceneError::MalformedGeometry(format!(
            "Drehwinkel {angle} ist nicht endlich"
        )));
    }
    let pivot = selection_pivot(state)?;

    let roots = transform_roots(&state.registry, &selection);
    let targets: Vec<(ElementId, Transform)> = start_transforms(&state.registry, &roots)
        .into_iter()
        .map(|(id, world)| (id, rotate_transform_around(&world, angle, pivot)))
        .collect();

    state.record_undo_snapshot();
    apply_world(state.registry_mut(), targets);
    log::info!(
        "{} Element(e) um {:.1}° gedreht",
        roots.len(),
        angle.to_degrees()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::use_cases::interaction::{end_press, update_pointer};
    use crate::core::ElementKind;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn rotating_table_carries_stacked_vase_along_the_arc() {
        let mut state = AppState::new();
        let registry = state.registry_mut();
        let table = registry.place(ElementKind::Table, Transform::IDENTITY, None);
        let vase = registry.place(
            ElementKind::Centerpiece,
            Transform::from_translation(Vec3::new(0.0, 0.75, -0.4)),
            None,
        );
        registry.bind(vase, table).expect("Bindung erwartet");
        state.selection.select_only(table);

        rotate_selection(&mut state, -FRAC_PI_2).expect("Drehen erwartet");

        let vase_world = state.registry.world_transform(vase).unwrap();
        assert!(vase_world
            .translation
            .abs_diff_eq(Vec3::new(0.4, 0.75, 0.0), 1e-5));
        assert_abs_diff_eq!(vase_world.yaw(), -FRAC_PI_2, epsilon = 1e-5);
    }

    #[test]
    fn rotate_gesture_maps_horizontal_pixels_to_angle() {
        let mut state = AppState::new();
        let chair = state.registry_mut().place(
            ElementKind::Chair,
            Transform::from_translation(Vec3::new(1.0, 0.0, 1.0)),
            None,
        );
        state.selection.select_only(chair);

        begin_rotate(&mut state, Vec2::new(100.0, 0.0)).expect("Drehen erwartet");
        // 0.5°/px → 180 px = 90°
        update_pointer(&mut state, Vec2::new(280.0, 0.0), Vec2::ZERO).unwrap();
        end_press(&mut state, Vec2::ZERO);

        let world = state.registry.world_transform(chair).unwrap();
        assert_abs_diff_eq!(world.yaw(), FRAC_PI_2, epsilon = 1e-4);
        assert!(world.translation.abs_diff_eq(Vec3::new(1.0, 0.0, 1.0), 1e-5));
        assert!(state.can_undo());
    }

    #[test]
    fn rotate_released_at_start_records_nothing() {
        let mut state = AppState::new();
        let chair = state
            .registry_mut()
            .place(ElementKind::Chair, Transform::IDENTITY, None);
        state.selection.select_only(chair);

        begin_rotate(&mut state, Vec2::new(100.0, 0.0)).expect("Drehen erwartet");
        update_pointer(&mut state, Vec2::new(100.0, 0.0), Vec2::ZERO).unwrap();
        end_press(&mut state, Vec2::ZERO);

        assert!(state.interaction.is_idle());
        assert!(!state.can_undo());
    }

    #[test]
    fn rotate_entry_is_refused_while_job_runs() {
        let mut state = AppState::new();
        let chair = state
            .registry_mut()
            .place(ElementKind::Chair, Transform::IDENTITY, None);
        state.selection.select_only(chair);
        let (gate_tx, gate_rx) = std::sync::mpsc::channel::<()>();
        state.jobs.spawn(crate::app::jobs::JobKind::SaveScene, move || {
            gate_rx.recv().ok();
            crate::app::jobs::JobOutcome::SceneSaved {
                project_id: "p".into(),
                element_count: 0,
            }
        });

        assert_eq!(
            begin_rotate(&mut state, Vec2::ZERO),
            Err(SceneError::InteractionDisabled)
        );
        assert!(state.interaction.is_idle());
        gate_tx.send(()).ok();
    }
}
