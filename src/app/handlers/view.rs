//! Handler für Kamera, Overlay und flüchtigen UI-Zustand.

use crate::app::use_cases;
use crate::app::AppState;
use crate::core::{BookingIndex, Catalog};
use crate::shared::EditorOptions;
use glam::Vec3;

/// Setzt die Kamera auf den Standardzustand zurück.
pub fn reset_camera(state: &mut AppState) {
    use_cases::camera::reset_camera(state);
}

/// Dreht die Kamera.
pub fn orbit(state: &mut AppState, delta_yaw: f32, delta_pitch: f32) {
    use_cases::camera::orbit(state, delta_yaw, delta_pitch);
}

/// Verschiebt die Kamera.
pub fn pan(state: &mut AppState, delta: Vec3) {
    use_cases::camera::pan(state, delta);
}

/// Zoomt die Kamera.
pub fn zoom(state: &mut AppState, factor: f32) {
    use_cases::camera::zoom(state, factor);
}

/// Schaltet das Buchungs-Overlay um.
pub fn toggle_overlay(state: &mut AppState) {
    state.view.overlay_enabled = !state.view.overlay_enabled;
    log::info!(
        "Buchungs-Overlay {}",
        if state.view.overlay_enabled { "an" } else { "aus" }
    );
}

/// Öffnet oder schließt ein Dropdown.
pub fn toggle_dropdown(state: &mut AppState, key: String) {
    if !state.ui.open_dropdowns.remove(&key) {
        state.ui.open_dropdowns.insert(key);
    }
}

/// Entfernt die Statusmeldung.
pub fn dismiss_status_message(state: &mut AppState) {
    state.ui.status_message = None;
}

/// Übernimmt neue Optionen und persistiert sie.
pub fn apply_options(state: &mut AppState, options: EditorOptions) -> anyhow::Result<()> {
    state.history.set_max_depth(options.history_depth);
    state.options = options;
    let path = EditorOptions::config_path();
    state.options.save_to_file(&path)
}

/// Ersetzt den Katalog.
pub fn set_catalog(state: &mut AppState, catalog: Catalog) {
    log::info!("Katalog mit {} Vorlage(n) übernommen", catalog.len());
    state.catalog = catalog;
}

/// Ersetzt den Buchungsindex.
pub fn set_bookings(state: &mut AppState, bookings: BookingIndex) {
    state.bookings = bookings;
}
