//! Serialisierbares Szenen-Dokument (Projekt-Szene inkl. Kamera).

use crate::core::{ElementRegistry, OrbitCamera, SceneElement, SceneError};
use serde::{Deserialize, Serialize};

/// Aktuelle Version des Dokument-Formats.
pub const SCENE_FORMAT_VERSION: u32 = 1;

/// Persistierte Szene eines Projekts.
///
/// Elemente speichern ihre autoritative (lokale) Transformation; Welttransformationen
/// werden beim Laden neu abgeleitet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    /// Format-Version
    pub version: u32,
    /// Projekt-ID
    #[serde(default)]
    pub project_id: Option<String>,
    /// Alle Elemente, nach ID sortiert
    #[serde(default)]
    pub elements: Vec<SceneElement>,
    /// Kamera-Zustand
    #[serde(default)]
    pub camera: OrbitCamera,
}

impl SceneDocument {
    /// Erstellt ein Dokument aus dem aktuellen Registry-Zustand.
    pub fn from_registry(
        project_id: Option<String>,
        registry: &ElementRegistry,
        camera: OrbitCamera,
    ) -> Self {
        let elements = registry
            .ids_sorted()
            .into_iter()
            .filter_map(|id| registry.get(id).cloned())
            .collect();
        Self {
            version: SCENE_FORMAT_VERSION,
            project_id,
            elements,
            camera,
        }
    }

    /// Parst ein Dokument aus JSON.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let document: SceneDocument = serde_json::from_str(json)?;
        if document.version > SCENE_FORMAT_VERSION {
            anyhow::bail!(
                "Szenen-Format {} wird nicht unterstützt (maximal {})",
                document.version,
                SCENE_FORMAT_VERSION
            );
        }
        Ok(document)
    }

    /// Serialisiert das Dokument als JSON.
    pub fn to_json_pretty(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Baut die Registry auf und heilt ungültige Eltern-Referenzen.
    ///
    /// Gibt die geheilten Fälle (fehlende Eltern, Zyklen, ungültige Hosts) mit zurück.
    pub fn into_registry(self) -> (ElementRegistry, Vec<SceneError>) {
        let mut registry = ElementRegistry::new();
        for element in self.elements {
            if registry.contains(element.id) {
                log::warn!("Doppelte Element-ID {} im Dokument, übersprungen", element.id);
                continue;
            }
            registry.insert(element);
        }
        let healed = registry.refresh_world_transforms();
        (registry, healed)
    }
}
