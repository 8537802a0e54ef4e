//! Handler für Undo/Redo der Szene.
//!
//! Die Geste ist zu diesem Zeitpunkt bereits abgebrochen (siehe Intent-Mapping),
//! ein Snapshot enthält daher nie eine halbfertige Verschiebung.

use crate::app::history::Snapshot;
use crate::app::AppState;

#[derive(Debug, Clone, Copy)]
enum Step {
    Back,
    Forward,
}

fn step(state: &mut AppState, direction: Step) {
    let current = Snapshot::from_state(state);
    let target = match direction {
        Step::Back => state.history.pop_undo_with_current(current),
        Step::Forward => state.history.pop_redo_with_current(current),
    };
    let Some(snapshot) = target else {
        log::debug!("{:?}: keine Szenen-Änderung vorhanden", direction);
        return;
    };
    snapshot.apply_to(state);
    log::info!(
        "{:?}: {} Element(e), {} selektiert",
        direction,
        state.registry.len(),
        state.selection.len()
    );
}

/// Stellt den Szenenzustand vor der letzten Änderung wieder her.
pub fn undo(state: &mut AppState) {
    step(state, Step::Back);
}

/// Wiederholt die zuletzt rückgängig gemachte Änderung.
pub fn redo(state: &mut AppState) {
    step(state, Step::Forward);
}
