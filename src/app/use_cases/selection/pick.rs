//! Use-Case: Element-Selektion per Klick.

use crate::app::AppState;
use crate::core::{ElementId, ElementRegistry, Footprint};
use glam::Vec2;

/// Sucht das Element unter einem Bodenpunkt.
///
/// Liegen mehrere Grundflächen übereinander, gewinnt die höchste Oberkante
/// (gestapelte Deko vor dem Tisch), bei Gleichstand die größere ID.
pub fn pick_element(registry: &ElementRegistry, ground: Vec2) -> Option<ElementId> {
    registry
        .iter()
        .filter(|e| Footprint::of(e).contains(ground))
        .max_by(|a, b| {
            a.top_elevation()
                .total_cmp(&b.top_elevation())
                .then(a.id.cmp(&b.id))
        })
        .map(|e| e.id)
}

/// Selektiert genau ein existierendes Element.
pub fn select_only(state: &mut AppState, id: ElementId) {
    if !state.registry.contains(id) {
        log::debug!("Selektion ignoriert: Element {} existiert nicht", id);
        return;
    }
    state.selection.select_only(id);
}

/// Fügt ein existierendes Element zur Selektion hinzu oder entfernt es.
pub fn toggle_selection(state: &mut AppState, id: ElementId) {
    if !state.registry.contains(id) {
        log::debug!("Toggle ignoriert: Element {} existiert nicht", id);
        return;
    }
    let selected = state.selection.toggle(id);
    log::debug!(
        "Element {} {}",
        id,
        if selected { "selektiert" } else { "abgewählt" }
    );
}

/// Setzt das Hover-Element (fehlende IDs werden als "kein Hover" behandelt).
pub fn set_hover(state: &mut AppState, id: Option<ElementId>) {
    state.view.hovered = id.filter(|id| state.registry.contains(*id));
}
