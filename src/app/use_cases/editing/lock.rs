//! Use-Case: Sperren und Entsperren der Selektion.

use crate::app::AppState;
use crate::core::{ElementId, ElementPatch, SceneError};

/// Setzt den Sperrstatus der gegebenen Elemente; gibt die geänderten IDs zurück.
fn apply_lock(
    state: &mut AppState,
    targets: Vec<(ElementId, bool)>,
) -> Result<Vec<ElementId>, SceneError> {
    let changed: Vec<(ElementId, bool)> = targets
        .into_iter()
        .filter(|(id, locked)| state.registry.get(*id).is_some_and(|e| e.locked != *locked))
        .collect();
    if changed.is_empty() {
        log::debug!("Sperrstatus unverändert");
        return Ok(Vec::new());
    }

    state.record_undo_snapshot();
    let registry = state.registry_mut();
    for (id, locked) in &changed {
        registry.update(
            *id,
            ElementPatch {
                locked: Some(*locked),
                ..Default::default()
            },
        )?;
    }

    // Gesperrte Elemente verlassen die Selektion sofort
    let newly_locked: Vec<ElementId> = changed
        .iter()
        .filter(|(_, locked)| *locked)
        .map(|(id, _)| *id)
        .collect();
    state.selection.retain(|id| !newly_locked.contains(&id));

    log::info!(
        "Sperrstatus geändert: {} gesperrt, {} entsperrt",
        newly_locked.len(),
        changed.len() - newly_locked.len()
    );
    Ok(changed.into_iter().map(|(id, _)| id).collect())
}

fn selected_or_err(state: &AppState) -> Result<Vec<ElementId>, SceneError> {
    let ids = state.selection.ids();
    if ids.is_empty() {
        return Err(SceneError::EmptySelection);
    }
    Ok(ids)
}

/// Sperrt alle selektierten Elemente.
pub fn lock_selection(state: &mut AppState) -> Result<Vec<ElementId>, SceneError> {
    let ids = selected_or_err(state)?;
    apply_lock(state, ids.into_iter().map(|id| (id, true)).collect())
}

/// Entsperrt alle selektierten Elemente.
pub fn unlock_selection(state: &mut AppState) -> Result<Vec<ElementId>, SceneError> {
    let ids = selected_or_err(state)?;
    apply_lock(state, ids.into_iter().map(|id| (id, false)).collect())
}

/// Schaltet den Sperrstatus je Element um.
pub fn toggle_lock_selection(state: &mut AppState) -> Result<Vec<ElementId>, SceneError> {
    let ids = selected_or_err(state)?;
    let targets = ids
        .into_iter()
        .filter_map(|id| state.registry.get(id).map(|e| (id, !e.locked)))
        .collect();
    apply_lock(state, targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ElementKind, Transform};

    #[test]
    fn locking_removes_elements_from_selection() {
        let mut state = AppState::new();
        let registry = state.registry_mut();
        let a = registry.place(ElementKind::Chair, Transform::IDENTITY, None);
        let b = registry.place(ElementKind::Chair, Transform::IDENTITY, None);
        state.selection.replace([a, b]);

        let changed = lock_selection(&mut state).expect("Sperren erwartet");
        assert_eq!(changed, vec![a, b]);
        assert!(state.selection.is_empty());
        assert!(state.registry.get(a).unwrap().locked);
    }

    #[test]
    fn toggle_flips_each_element() {
        let mut state = AppState::new();
        let registry = state.registry_mut();
        let a = registry.place(ElementKind::Chair, Transform::IDENTITY, None);
        let b = registry.place(ElementKind::Chair, Transform::IDENTITY, None);
        registry.get_mut(b).unwrap().locked = true;
        state.selection.replace([a, b]);

        toggle_lock_selection(&mut state).unwrap();
        assert!(state.registry.get(a).unwrap().locked);
        assert!(!state.registry.get(b).unwrap().locked);
        assert_eq!(state.selection.ids(), vec![b]);
    }

    #[test]
    fn unlock_on_empty_selection_fails() {
        let mut state = AppState::new();
        assert_eq!(unlock_selection(&mut state), Err(SceneError::EmptySelection));
    }
}
