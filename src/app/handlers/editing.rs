//! Handler für Änderungen an Elementen der Szene.

use crate::app::use_cases;
use crate::app::AppState;
use crate::core::DeleteScope;
use glam::{Vec2, Vec3};

/// Verschiebt die Selektion direkt.
pub fn move_selection(state: &mut AppState, delta: Vec3) -> anyhow::Result<()> {
    use_cases::interaction::move_selection(state, delta)?;
    Ok(())
}

/// Dreht die Selektion direkt.
pub fn rotate_selection(state: &mut AppState, angle: f32) -> anyhow::Result<()> {
    use_cases::interaction::rotate_selection(state, angle)?;
    Ok(())
}

/// Dupliziert die Selektion.
pub fn duplicate(state: &mut AppState) -> anyhow::Result<()> {
    use_cases::editing::duplicate_selection(state)?;
    Ok(())
}

/// Löscht die Selektion.
pub fn delete(state: &mut AppState, scope: DeleteScope) -> anyhow::Result<()> {
    use_cases::editing::delete_selection(state, scope)?;
    Ok(())
}

/// Sperrt die Selektion.
pub fn lock(state: &mut AppState) -> anyhow::Result<()> {
    use_cases::editing::lock_selection(state)?;
    Ok(())
}

/// Entsperrt die Selektion.
pub fn unlock(state: &mut AppState) -> anyhow::Result<()> {
    use_cases::editing::unlock_selection(state)?;
    Ok(())
}

/// Schaltet die Sperre je Element um.
pub fn toggle_lock(state: &mut AppState) -> anyhow::Result<()> {
    use_cases::editing::toggle_lock_selection(state)?;
    Ok(())
}

/// Taggt einen Service am selektierten Tisch.
pub fn tag_service(state: &mut AppState, service_id: Option<String>) -> anyhow::Result<()> {
    use_cases::editing::tag_service(state, service_id)?;
    Ok(())
}

/// Löst selektierte Kinder vom Host.
pub fn detach(state: &mut AppState) -> anyhow::Result<()> {
    use_cases::editing::detach_selection(state)?;
    Ok(())
}

/// Platziert eine Katalog-Vorlage.
pub fn place_catalog_item(
    state: &mut AppState,
    item_key: &str,
    ground: Vec2,
    yaw: f32,
) -> anyhow::Result<()> {
    use_cases::editing::place_catalog_item(state, item_key, ground, yaw)?;
    Ok(())
}
