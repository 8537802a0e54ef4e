//! Use-Case-Funktionen für Kamera-Steuerung.

use crate::app::AppState;
use glam::Vec3;

/// Setzt die Kamera auf Default zurück.
pub fn reset_camera(state: &mut AppState) {
    state.view.camera = Default::default();
}

/// Dreht die Kamera um ihr Ziel.
pub fn orbit(state: &mut AppState, delta_yaw: f32, delta_pitch: f32) {
    if !delta_yaw.is_finite() || !delta_pitch.is_finite() {
        log::debug!("Kamera-Orbit mit ungültigem Delta ignoriert");
        return;
    }
    state.view.camera.orbit(delta_yaw, delta_pitch);
}

/// Verschiebt die Kamera parallel zur Bodenebene.
pub fn pan(state: &mut AppState, delta: Vec3) {
    if !delta.is_finite() {
        log::debug!("Kamera-Pan mit ungültigem Delta ignoriert");
        return;
    }
    state.view.camera.pan(delta);
}

/// Zoomt die Kamera (Faktor > 1 zoomt heran).
pub fn zoom(state: &mut AppState, factor: f32) {
    state.view.camera.zoom_by(factor);
}
