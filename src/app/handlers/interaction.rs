//! Handler für den Interaktions-Zustandsautomaten (Pointer-Gesten).

use crate::app::use_cases;
use crate::app::AppState;
use crate::core::ElementId;
use glam::Vec2;

/// Beginnt eine Pointer-Geste.
pub fn begin_press(
    state: &mut AppState,
    hit: Option<ElementId>,
    screen: Vec2,
    ground: Vec2,
    toggle: bool,
) {
    use_cases::interaction::begin_press(state, hit, screen, ground, toggle);
}

/// Aktualisiert die laufende Geste.
pub fn update_pointer(state: &mut AppState, screen: Vec2, ground: Vec2) -> anyhow::Result<()> {
    use_cases::interaction::update_pointer(state, screen, ground)
}

/// Beendet die laufende Geste.
pub fn end_press(state: &mut AppState, ground: Vec2) {
    use_cases::interaction::end_press(state, ground);
}

/// Beginnt das Drehen über den Dreh-Griff.
pub fn begin_rotate(state: &mut AppState, screen: Vec2) -> anyhow::Result<()> {
    use_cases::interaction::begin_rotate(state, screen)?;
    Ok(())
}

/// Verwirft die laufende Geste.
pub fn cancel(state: &mut AppState) {
    use_cases::interaction::cancel_interaction(state);
}
