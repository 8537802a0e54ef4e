//! Use-Case-Funktionen für die Grundriss-Bearbeitung und den Modell-Export.

use crate::app::jobs::{JobKind, JobOutcome};
use crate::app::AppState;
use crate::core::SceneError;
use crate::floorplan::{build_model, CornerId, UploadForm, WallId};
use glam::Vec2;
use std::sync::Arc;

fn ensure_finite(position: Vec2) -> Result<(), SceneError> {
    if position.is_finite() {
        Ok(())
    } else {
        Err(SceneError::MalformedGeometry(format!(
            "Eckposition {position} ist nicht endlich"
        )))
    }
}

/// Fügt eine Ecke hinzu.
pub fn add_corner(state: &mut AppState, position: Vec2) -> Result<CornerId, SceneError> {
    ensure_finite(position)?;
    let id = state.floorplan.plan.add_corner(position);
    log::debug!("Ecke {} bei {} hinzugefügt", id, position);
    Ok(id)
}

/// Verschiebt eine Ecke.
pub fn move_corner(state: &mut AppState, id: CornerId, position: Vec2) -> Result<(), SceneError> {
    ensure_finite(position)?;
    state.floorplan.plan.move_corner(id, position)
}

/// Entfernt eine Ecke samt angrenzender Wände.
pub fn remove_corner(state: &mut AppState, id: CornerId) -> Result<(), SceneError> {
    let walls = state.floorplan.plan.remove_corner(id)?;
    log::debug!("Ecke {} entfernt ({} Wand/Wände)", id, walls.len());
    Ok(())
}

/// Zieht eine Wand; ohne Dicke gilt die konfigurierte Standard-Dicke.
pub fn add_wall(
    state: &mut AppState,
    a: CornerId,
    b: CornerId,
    thickness: Option<f32>,
) -> Result<WallId, SceneError> {
    let thickness = thickness.unwrap_or(state.options.wall_thickness);
    state.floorplan.plan.add_wall(a, b, thickness)
}

/// Entfernt eine Wand (unbekannte IDs werden ignoriert).
pub fn remove_wall(state: &mut AppState, id: WallId) {
    if state.floorplan.plan.remove_wall(id).is_none() {
        log::debug!("Wand {} existiert nicht", id);
    }
}

/// Startet Extrusion, Export und Upload als Hintergrund-Job.
///
/// Der Grundriss wird vorab auf geschlossene Räume geprüft, damit ein offener
/// Plan sofort als Fehler erscheint statt erst im Job.
pub fn export_floorplan(state: &mut AppState, name: &str) -> Result<(), SceneError> {
    if state.jobs.is_running(JobKind::ExportFloorplan) {
        log::debug!("Export läuft bereits");
        return Ok(());
    }
    crate::floorplan::close_rooms(&state.floorplan.plan).map_err(|e| match e {
        SceneError::OpenFloorplan => SceneError::EmptyGeometry,
        other => other,
    })?;

    let plan = state.floorplan.plan.clone();
    let wall_height = state.options.wall_height;
    let wall_thickness = state.options.wall_thickness;
    let store = Arc::clone(&state.store);
    let name = name.to_string();
    log::info!("Grundriss-Export '{}' gestartet", name);

    state.jobs.spawn(JobKind::ExportFloorplan, move || {
        let result = build_model(&plan, wall_height, wall_thickness)
            .map_err(anyhow::Error::from)
            .and_then(|asset| UploadForm::from_asset(&asset, &name))
            .and_then(|form| {
                store
                    .upload_model(&form)
                    .map(|reference| (reference, form))
            });
        match result {
            Ok((reference, form)) => JobOutcome::ModelUploaded {
                reference,
                file_name: form.file_name,
                byte_len: form.model_bytes.len(),
            },
            Err(e) => JobOutcome::Failed {
                kind: JobKind::ExportFloorplan,
                message: format!("Export fehlgeschlagen: {e:#}"),
            },
        }
    });
    Ok(())
}
