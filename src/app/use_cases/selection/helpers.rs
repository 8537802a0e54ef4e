//! Gemeinsame Hilfsfunktionen für Selektionslogik.

use crate::app::AppState;
use crate::core::{ElementId, ElementRegistry, SceneError};

/// Löscht die aktuelle Selektion explizit.
pub fn clear_selection(state: &mut AppState) {
    state.selection.clear();
}

/// Prüft eine Selektion vor Befehlen, die Elemente verändern.
///
/// Fehler: leere Selektion, oder ein gesperrtes Mitglied
/// ([`SceneError::SelectionContainsLockedElement`]). Es wird nie teilweise angewendet.
pub fn ensure_editable_selection(state: &AppState) -> Result<Vec<ElementId>, SceneError> {
    let ids = state.selection.ids();
    if ids.is_empty() {
        return Err(SceneError::EmptySelection);
    }
    if let Some(locked) = ids
        .iter()
        .copied()
        .find(|id| state.registry.get(*id).is_some_and(|e| e.locked))
    {
        return Err(SceneError::SelectionContainsLockedElement(locked));
    }
    Ok(ids)
}

/// Selektierte Elemente, die direkt bewegt werden müssen.
///
/// Ein Element, dessen Vorfahre ebenfalls selektiert ist, bewegt sich über die
/// Propagation mit und wird ausgelassen.
pub fn transform_roots(registry: &ElementRegistry, ids: &[ElementId]) -> Vec<ElementId> {
    ids.iter()
        .copied()
        .filter(|id| registry.contains(*id))
        .filter(|id| {
            !ids.iter()
                .any(|other| other != id && registry.is_descendant_of(*id, *other))
        })
        .collect()
}
