use crate::core::{ElementId, OrbitCamera};
use std::collections::BTreeSet;

/// View-bezogener Zustand (Kamera, Overlay, Hover).
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    /// Orbit-Kamera (wird mit der Szene gespeichert)
    pub camera: OrbitCamera,
    /// Buchungs-Overlay aktiv
    pub overlay_enabled: bool,
    /// Element unter dem Mauszeiger
    pub hovered: Option<ElementId>,
}

impl ViewState {
    /// Erstellt den Standard-View-Zustand.
    pub fn new() -> Self {
        Self::default()
    }
}

/// UI-bezogener, flüchtiger Zustand. Wird nie persistiert.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Sichtbare, wegklickbare Statusmeldung
    pub status_message: Option<String>,
    /// Schlüssel aktuell geöffneter Dropdowns
    pub open_dropdowns: BTreeSet<String>,
}

impl UiState {
    /// Erstellt den Standard-UI-Zustand (keine Meldung, alle Dropdowns zu).
    pub fn new() -> Self {
        Self::default()
    }

    /// Ob das Dropdown `key` geöffnet ist.
    pub fn is_dropdown_open(&self, key: &str) -> bool {
        self.open_dropdowns.contains(key)
    }
}
