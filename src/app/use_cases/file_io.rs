//! Use-Case-Funktionen für Speichern, Laden und den Szenen-Lebenszyklus.
//! Alle Store-Zugriffe (I/O) sind hier und in `floorplan` zentralisiert.

use crate::app::jobs::{JobKind, JobOutcome};
use crate::app::AppState;
use crate::persistence::SceneDocument;
use std::sync::Arc;

/// Startet das Speichern der Szene als Hintergrund-Job.
///
/// Das Dokument wird auf dem UI-Thread erstellt; der Worker serialisiert und
/// schreibt nur diese Kopie. Während einer Geste wird der Stand vor ihrem
/// Beginn gespeichert. Läuft bereits ein Speicher-Job, passiert nichts.
pub fn save_scene(state: &mut AppState) {
    if state.jobs.is_running(JobKind::SaveScene) {
        log::debug!("Speichern läuft bereits");
        return;
    }
    if state.interaction.is_transforming() {
        log::debug!("Speichern während Geste: unbestätigte Deltas bleiben außen vor");
    }
    let document = SceneDocument::from_registry(
        Some(state.project_id.clone()),
        state.committed_registry(),
        state.view.camera,
    );
    let store = Arc::clone(&state.store);
    let project_id = state.project_id.clone();
    let element_count = document.elements.len();

    state.jobs.spawn(JobKind::SaveScene, move || {
        match store.save_scene(&project_id, &document) {
            Ok(()) => JobOutcome::SceneSaved {
                project_id,
                element_count,
            },
            Err(e) => JobOutcome::Failed {
                kind: JobKind::SaveScene,
                message: format!("Speichern fehlgeschlagen: {e:#}"),
            },
        }
    });
    log::info!("Speichern von {} Element(en) gestartet", element_count);
}

/// Lädt die Szene des aktuellen Projekts und ersetzt Registry und Kamera.
///
/// Selektion, Interaktion und Verlauf werden zurückgesetzt. Geheilte
/// Eltern-Referenzen werden als Statusmeldung angezeigt.
pub fn load_scene(state: &mut AppState) -> anyhow::Result<()> {
    super::interaction::cancel_interaction(state);
    let document = state.store.load_scene(&state.project_id)?;

    let (registry, healed, camera) = match document {
        Some(document) => {
            let camera = document.camera;
            let (registry, healed) = document.into_registry();
            (registry, healed, camera)
        }
        None => {
            log::info!("Projekt {} hat noch keine Szene", state.project_id);
            Default::default()
        }
    };

    state.registry = Arc::new(registry);
    state.selection.clear();
    state.view.hovered = None;
    state.view.camera = if camera.is_finite() {
        camera
    } else {
        Default::default()
    };
    state.history.clear();
    state.ui.status_message = (!healed.is_empty()).then(|| {
        format!(
            "{} ungültige Stapel-Bindung(en) beim Laden gelöst",
            healed.len()
        )
    });
    state.mounted = true;

    log::info!(
        "Szene von Projekt {} geladen: {} Element(e)",
        state.project_id,
        state.registry.len()
    );
    Ok(())
}

/// Verlässt die Szene: Geste verwerfen, laufende Job-Ergebnisse nie zustellen.
pub fn unmount_scene(state: &mut AppState) {
    super::interaction::cancel_interaction(state);
    state.mounted = false;
    let discarded = state.jobs.discard_all();
    if discarded > 0 {
        log::info!("{} laufende(r) Job(s) beim Verlassen verworfen", discarded);
    }
}

/// Holt abgeschlossene Hintergrund-Jobs ab und überträgt ihre Ergebnisse.
pub fn poll_background_jobs(state: &mut AppState) -> Vec<JobOutcome> {
    let outcomes = state.jobs.poll();
    if !state.mounted {
        if !outcomes.is_empty() {
            log::debug!("{} Job-Ergebnis(se) nach Verlassen verworfen", outcomes.len());
        }
        return Vec::new();
    }

    for outcome in &outcomes {
        match outcome {
            JobOutcome::SceneSaved {
                project_id,
                element_count,
            } => {
                log::info!(
                    "Szene von Projekt {} gespeichert ({} Elemente)",
                    project_id,
                    element_count
                );
            }
            JobOutcome::ModelUploaded {
                reference,
                file_name,
                byte_len,
            } => {
                log::info!(
                    "Modell {} hochgeladen ({} Bytes): {}",
                    file_name,
                    byte_len,
                    reference
                );
                state.floorplan.last_upload = Some(reference.clone());
            }
            JobOutcome::Failed { kind, message } => {
                log::error!("Hintergrund-Job {:?} fehlgeschlagen: {}", kind, message);
                state.ui.status_message = Some(message.clone());
            }
        }
    }
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ElementKind, Transform};
    use crate::persistence::MemoryStore;
    use std::time::Duration;

    #[test]
    fn save_then_load_restores_scene() {
        let store = Arc::new(MemoryStore::new());
        let mut state = AppState::new().with_store(store.clone());
        let chair = state
            .registry_mut()
            .place(ElementKind::Chair, Transform::IDENTITY, None);

        save_scene(&mut state);
        assert!(state.is_busy());
        let outcomes = state.jobs.wait_all(Duration::from_secs(5));
        assert!(matches!(outcomes[..], [JobOutcome::SceneSaved { element_count: 1, .. }]));

        state.registry = Arc::new(Default::default());
        state.selection.select_only(chair);
        load_scene(&mut state).expect("Laden erwartet");

        assert!(state.registry.contains(chair));
        assert!(state.selection.is_empty());
        assert!(!state.can_undo());
    }

    #[test]
    fn results_after_unmount_are_discarded() {
        let mut state = AppState::new();
        state.ui.status_message = None;
        state.jobs.spawn(JobKind::SaveScene, || JobOutcome::Failed {
            kind: JobKind::SaveScene,
            message: "Netzwerkfehler".into(),
        });
        unmount_scene(&mut state);

        std::thread::sleep(Duration::from_millis(20));
        assert!(poll_background_jobs(&mut state).is_empty());
        assert_eq!(state.ui.status_message, None);
    }
}
