//! Use-Cases des Interaktions-Zustandsautomaten.
//!
//! `Idle → Selecting` beim Drücken, `Selecting → Dragging` ab der Drag-Schwelle,
//! `Rotating` nur über den Dreh-Griff. Jeder Übergang committet vollständig
//! (pointerUp) oder verwirft vollständig (Escape, leere Selektion).

mod drag;
mod press;
mod rotate;

pub use drag::move_selection;
pub use press::{begin_press, cancel_interaction, end_press, update_pointer};
pub use rotate::{begin_rotate, rotate_selection};

use crate::app::AppState;
use crate::core::{ElementId, ElementRegistry, SceneError, Transform};
use std::collections::HashMap;

/// Prüft, ob eine neue Transform-Geste beginnen darf.
fn ensure_not_busy(state: &AppState) -> Result<(), SceneError> {
    if state.jobs.is_busy() {
        log::debug!("Transform-Geste abgelehnt: Hintergrund-Job läuft");
        return Err(SceneError::InteractionDisabled);
    }
    Ok(())
}

/// Welttransformationen der Wurzeln zu Beginn einer Geste.
fn start_transforms(registry: &ElementRegistry, roots: &[ElementId]) -> HashMap<ElementId, Transform> {
    roots
        .iter()
        .filter_map(|id| registry.world_transform(*id).map(|t| (*id, t)))
        .collect()
}

/// `true`, wenn keine Wurzel sich weiter als `epsilon` von ihrem Start entfernt hat.
fn unchanged_since_start(
    registry: &ElementRegistry,
    start_world: &HashMap<ElementId, Transform>,
    epsilon: f32,
) -> bool {
    start_world.iter().all(|(id, start)| {
        registry
            .world_transform(*id)
            .map_or(true, |world| world.abs_diff_eq(start, epsilon))
    })
}

/// Setzt die Welttransformation jeder Wurzel und propagiert auf ihre Nachfahren.
fn apply_world(
    registry: &mut ElementRegistry,
    targets: impl IntoIterator<Item = (ElementId, Transform)>,
) {
    for (id, world) in targets {
        let local = registry.local_for_world(id, &world);
        registry.set_local_transform(id, local);
    }
}
