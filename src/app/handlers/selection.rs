//! Handler für Selektions-Operationen.

use crate::app::use_cases;
use crate::app::AppState;
use crate::core::ElementId;

/// Hebt die Selektion auf.
pub fn clear(state: &mut AppState) {
    use_cases::selection::clear_selection(state);
}

/// Selektiert genau ein Element.
pub fn select_only(state: &mut AppState, id: ElementId) {
    use_cases::selection::select_only(state, id);
}

/// Fügt ein Element hinzu oder entfernt es.
pub fn toggle(state: &mut AppState, id: ElementId) {
    use_cases::selection::toggle_selection(state, id);
}

/// Setzt das Hover-Element.
pub fn set_hover(state: &mut AppState, id: Option<ElementId>) {
    use_cases::selection::set_hover(state, id);
}
