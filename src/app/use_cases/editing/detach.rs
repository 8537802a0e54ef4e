//! Use-Case: Gestapelte Kinder explizit vom Host lösen.

use crate::app::use_cases::selection::ensure_editable_selection;
use crate::app::AppState;
use crate::core::{ElementId, SceneError};

/// Löst jedes selektierte, gebundene Element; die Weltposition bleibt erhalten.
pub fn detach_selection(state: &mut AppState) -> Result<Vec<ElementId>, SceneError> {
    let selected = ensure_editable_selection(state)?;
    let bound: Vec<ElementId> = selected
        .into_iter()
        .filter(|id| state.registry.get(*id).is_some_and(|e| e.parent_id.is_some()))
        .collect();
    if bound.is_empty() {
        log::debug!("Nichts zu lösen: keine gestapelten Elemente selektiert");
        return Ok(bound);
    }

    state.record_undo_snapshot();
    let registry = state.registry_mut();
    for id in &bound {
        registry.unbind(*id)?;
    }
    log::info!("{} Element(e) vom Host gelöst", bound.len());
    Ok(bound)
}
