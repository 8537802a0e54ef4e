//! Handler für die Grundriss-Bearbeitung.

use crate::app::use_cases;
use crate::app::AppState;
use crate::floorplan::{CornerId, WallId};
use glam::Vec2;

/// Fügt eine Ecke hinzu.
pub fn add_corner(state: &mut AppState, position: Vec2) -> anyhow::Result<()> {
    use_cases::floorplan::add_corner(state, position)?;
    Ok(())
}

/// Verschiebt eine Ecke.
pub fn move_corner(state: &mut AppState, id: CornerId, position: Vec2) -> anyhow::Result<()> {
    use_cases::floorplan::move_corner(state, id, position)?;
    Ok(())
}

/// Entfernt eine Ecke.
pub fn remove_corner(state: &mut AppState, id: CornerId) -> anyhow::Result<()> {
    use_cases::floorplan::remove_corner(state, id)?;
    Ok(())
}

/// Zieht eine Wand.
pub fn add_wall(
    state: &mut AppState,
    a: CornerId,
    b: CornerId,
    thickness: Option<f32>,
) -> anyhow::Result<()> {
    use_cases::floorplan::add_wall(state, a, b, thickness)?;
    Ok(())
}

/// Entfernt eine Wand.
pub fn remove_wall(state: &mut AppState, id: WallId) {
    use_cases::floorplan::remove_wall(state, id);
}

/// Startet den Modell-Export.
pub fn export(state: &mut AppState, name: &str) -> anyhow::Result<()> {
    use_cases::floorplan::export_floorplan(state, name)?;
    Ok(())
}
