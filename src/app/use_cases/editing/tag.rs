//! Use-Case: Service an einen Tisch taggen.

use crate::app::use_cases::selection::ensure_editable_selection;
use crate::app::AppState;
use crate::core::{ElementPatch, SceneError};

/// Setzt oder entfernt das Service-Tag des einzigen selektierten Tisches.
pub fn tag_service(state: &mut AppState, service_id: Option<String>) -> Result<(), SceneError> {
    let selected = ensure_editable_selection(state)?;
    let [id] = selected.as_slice() else {
        return Err(SceneError::InvalidServiceTarget);
    };
    let id = *id;
    let element = state.registry.get(id).ok_or(SceneError::ElementNotFound(id))?;
    if !element.kind.accepts_service_tag() {
        return Err(SceneError::InvalidServiceTarget);
    }
    if element.service_tag == service_id {
        return Ok(());
    }

    state.record_undo_snapshot();
    state.registry_mut().update(
        id,
        ElementPatch {
            service_tag: Some(service_id.clone()),
            ..Default::default()
        },
    )?;
    match service_id {
        Some(service) => log::info!("Service '{}' an Element {} getaggt", service, id),
        None => log::info!("Service-Tag von Element {} entfernt", id),
    }
    Ok(())
}
