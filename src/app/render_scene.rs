//! Builder für die Render-Projektion aus dem AppState.

use crate::app::AppState;
use crate::core::status_of;
use crate::shared::{ElementView, HoverInfo, SceneView};

/// Baut eine SceneView aus dem aktuellen AppState.
pub fn build(state: &AppState) -> SceneView {
    let registry = &state.registry;
    let overlay = state.view.overlay_enabled;
    let primary = state.selection.primary();

    let elements = registry
        .ids_sorted()
        .into_iter()
        .filter_map(|id| registry.get(id))
        .map(|element| {
            let selected = state.selection.contains(element.id);
            let overlay_color = overlay
                .then(|| status_of(element, &state.bookings).status.color_rgba());
            // Selektion überdeckt die Sperr-Farbe
            let highlight_color = if selected {
                Some(state.options.selection_color)
            } else if element.locked {
                Some(state.options.locked_color)
            } else {
                None
            };
            ElementView {
                id: element.id,
                kind: element.kind,
                world: *element.world(),
                dimensions: element.dimensions,
                catalog_key: element.catalog_key.clone(),
                selected,
                primary: primary == Some(element.id),
                locked: element.locked,
                hovered: state.view.hovered == Some(element.id),
                parent_id: element.parent_id,
                overlay_color,
                highlight_color,
            }
        })
        .collect();

    let hover_info = if overlay {
        state
            .view
            .hovered
            .and_then(|id| registry.get(id))
            .filter(|element| element.service_tag.is_some())
            .map(|element| {
                let badge = status_of(element, &state.bookings);
                HoverInfo {
                    element_id: element.id,
                    service_name: badge.service_name,
                    status: badge.status,
                    label: badge.label,
                    color: badge.color,
                }
            })
    } else {
        None
    };

    SceneView {
        elements,
        camera: state.view.camera,
        overlay_enabled: overlay,
        hover_info,
        phase: state.interaction.phase(),
        busy: state.is_busy(),
        status_message: state.ui.status_message.clone(),
    }
}
