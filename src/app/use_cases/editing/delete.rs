//! Use-Case: Selektion löschen (inkl. gestapelter Kinder gemäß Policy).

use crate::app::use_cases::selection::ensure_editable_selection;
use crate::app::AppState;
use crate::core::{DeleteScope, ElementId, SceneError};

/// Löscht die Selektion.
///
/// Schlägt mit [`SceneError::CannotDeleteBookedElement`] fehl, wenn irgendein
/// Element, das entfernt würde (inkl. kaskadierter Kinder), auf einen aktiv
/// gebuchten Service verweist. In diesem Fall wird nichts gelöscht.
pub fn delete_selection(
    state: &mut AppState,
    scope: DeleteScope,
) -> Result<Vec<ElementId>, SceneError> {
    let selected = ensure_editable_selection(state)?;
    let policy = state.options.stacked_child_policy;
    let removal = state.registry.removal_set(&selected, scope, policy);

    for id in &removal {
        let Some(tag) = state.registry.get(*id).and_then(|e| e.service_tag.as_deref()) else {
            continue;
        };
        if state.bookings.has_active_booking(tag) {
            let service = state
                .bookings
                .get(tag)
                .map_or_else(|| tag.to_string(), |r| r.service_name.clone());
            log::info!("Löschen blockiert: Element {} ist gebucht ({})", id, service);
            return Err(SceneError::CannotDeleteBookedElement {
                element: *id,
                service,
            });
        }
    }

    state.record_undo_snapshot();
    let removed = state
        .registry_mut()
        .remove_with_scope(&selected, scope, policy)?;
    let removed_ids: Vec<ElementId> = removed.iter().map(|e| e.id).collect();

    state.selection.retain(|id| !removed_ids.contains(&id));
    if state.view.hovered.is_some_and(|h| removed_ids.contains(&h)) {
        state.view.hovered = None;
    }
    Ok(removed_ids)
}
