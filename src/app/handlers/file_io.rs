//! Handler für Speichern, Laden und den Szenen-Lebenszyklus.

use crate::app::use_cases;
use crate::app::AppState;

/// Startet das Speichern im Hintergrund.
pub fn save(state: &mut AppState) {
    use_cases::file_io::save_scene(state);
}

/// Lädt die Szene des aktuellen Projekts.
pub fn load(state: &mut AppState) -> anyhow::Result<()> {
    use_cases::file_io::load_scene(state)
}

/// Hängt die Szene aus.
pub fn unmount(state: &mut AppState) {
    use_cases::file_io::unmount_scene(state);
}

/// Holt Job-Ergebnisse ab.
pub fn poll_jobs(state: &mut AppState) {
    use_cases::file_io::poll_background_jobs(state);
}
