//! Store-Abstraktion für Szenen und Modell-Uploads.

use super::SceneDocument;
use crate::floorplan::UploadForm;
use anyhow::Context;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Externe Persistenz der Szene.
///
/// Implementierungen müssen threadsicher sein, da Speichern und Upload
/// in Hintergrund-Jobs laufen.
pub trait SceneStore: Send + Sync {
    /// Lädt die Szene eines Projekts (`None` wenn noch keine gespeichert ist).
    fn load_scene(&self, project_id: &str) -> anyhow::Result<Option<SceneDocument>>;

    /// Speichert die Szene eines Projekts vollständig.
    fn save_scene(&self, project_id: &str, document: &SceneDocument) -> anyhow::Result<()>;

    /// Lädt ein exportiertes Modell hoch und gibt dessen Referenz zurück.
    fn upload_model(&self, form: &UploadForm) -> anyhow::Result<String>;
}

/// Store im Dateisystem: eine JSON-Datei pro Projekt, Modelle unter `models/`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Erstellt einen Store unter `root` (Verzeichnis wird bei Bedarf angelegt).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Wurzelverzeichnis des Stores.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn scene_path(&self, project_id: &str) -> PathBuf {
        self.root.join(format!("{}.scene.json", sanitize(project_id)))
    }
}

impl SceneStore for JsonFileStore {
    fn load_scene(&self, project_id: &str) -> anyhow::Result<Option<SceneDocument>> {
        let path = self.scene_path(project_id);
        if !path.exists() {
            log::info!("Keine gespeicherte Szene für Projekt {}", project_id);
            return Ok(None);
        }
        let json = std::fs::read_to_string(&path)
            .with_context(|| format!("Szene nicht lesbar: {}", path.display()))?;
        let document = SceneDocument::from_json(&json)
            .with_context(|| format!("Szene fehlerhaft: {}", path.display()))?;
        Ok(Some(document))
    }

    fn save_scene(&self, project_id: &str, document: &SceneDocument) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.root)?;
        let path = self.scene_path(project_id);
        std::fs::write(&path, document.to_json_pretty()?)
            .with_context(|| format!("Szene nicht schreibbar: {}", path.display()))?;
        log::info!(
            "Szene gespeichert: {} ({} Elemente)",
            path.display(),
            document.elements.len()
        );
        Ok(())
    }

    fn upload_model(&self, form: &UploadForm) -> anyhow::Result<String> {
        let dir = self.root.join("models");
        std::fs::create_dir_all(&dir)?;
        let model_path = dir.join(sanitize(&form.file_name));
        std::fs::write(&model_path, &form.model_bytes)?;
        std::fs::write(model_path.with_extension("json"), &form.metadata_json)?;
        log::info!(
            "Modell {} abgelegt ({} Bytes, Typ {})",
            model_path.display(),
            form.model_bytes.len(),
            form.element_type
        );
        Ok(model_path.display().to_string())
    }
}

/// Store im Speicher (Tests, Vorschau ohne Backend).
#[derive(Debug, Default)]
pub struct MemoryStore {
    scenes: Mutex<HashMap<String, String>>,
    uploads: Mutex<Vec<UploadForm>>,
}

impl MemoryStore {
    /// Erstellt einen leeren Store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Anzahl der gespeicherten Szenen.
    pub fn scene_count(&self) -> usize {
        self.scenes.lock().map_or(0, |s| s.len())
    }

    /// Kopie aller bisherigen Uploads.
    pub fn uploads(&self) -> Vec<UploadForm> {
        self.uploads.lock().map(|u| u.clone()).unwrap_or_default()
    }
}

impl SceneStore for MemoryStore {
    fn load_scene(&self, project_id: &str) -> anyhow::Result<Option<SceneDocument>> {
        let scenes = self
            .scenes
            .lock()
            .map_err(|_| anyhow::anyhow!("Szenen-Speicher vergiftet"))?;
        scenes
            .get(project_id)
            .map(|json| SceneDocument::from_json(json))
            .transpose()
    }

    fn save_scene(&self, project_id: &str, document: &SceneDocument) -> anyhow::Result<()> {
        let json = serde_json::to_string(document)?;
        self.scenes
            .lock()
            .map_err(|_| anyhow::anyhow!("Szenen-Speicher vergiftet"))?
            .insert(project_id.to_string(), json);
        Ok(())
    }

    fn upload_model(&self, form: &UploadForm) -> anyhow::Result<String> {
        let mut uploads = self
            .uploads
            .lock()
            .map_err(|_| anyhow::anyhow!("Upload-Speicher vergiftet"))?;
        uploads.push(form.clone());
        Ok(format!("memory://models/{}/{}", uploads.len(), form.file_name))
    }
}

/// Ersetzt Pfad-kritische Zeichen in Projekt- und Dateinamen.
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim_start_matches('.')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ElementKind, ElementRegistry, OrbitCamera, Transform};

    fn sample_document() -> SceneDocument {
        let mut registry = ElementRegistry::new();
        registry.place(ElementKind::Table, Transform::IDENTITY, None);
        SceneDocument::from_registry(Some("p-7".into()), &registry, OrbitCamera::new())
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryStore::new();
        assert!(store.load_scene("p-7").unwrap().is_none());
        store.save_scene("p-7", &sample_document()).unwrap();
        let loaded = store.load_scene("p-7").unwrap().expect("Szene erwartet");
        assert_eq!(loaded, sample_document());
        assert_eq!(store.scene_count(), 1);
    }

    #[test]
    fn file_store_round_trip() {
        let dir = std::env::temp_dir().join(format!("venue_store_test_{}", std::process::id()));
        let store = JsonFileStore::new(&dir);
        store.save_scene("../evil/p 7", &sample_document()).unwrap();

        // Projekt-ID kann das Wurzelverzeichnis nicht verlassen
        let written: Vec<_> = std::fs::read_dir(&dir).unwrap().collect();
        assert_eq!(written.len(), 1);

        let loaded = store.load_scene("../evil/p 7").unwrap();
        assert_eq!(loaded, Some(sample_document()));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn sanitize_replaces_separators() {
        assert_eq!(sanitize("../a/b c"), "_a_b_c");
        assert_eq!(sanitize("main-hall.glb"), "main-hall.glb");
    }
}
