use crate::app::history::{EditHistory, Snapshot};
use crate::app::jobs::JobQueue;
use crate::app::CommandLog;
use crate::core::{BookingIndex, Catalog, ElementRegistry};
use crate::persistence::{MemoryStore, SceneStore};
use crate::shared::EditorOptions;
use std::sync::Arc;

use super::{FloorplanState, InteractionState, SelectionState, UiState, ViewState};

/// Standard-Projekt-ID, solange der Host keine eigene setzt.
pub const DEFAULT_PROJECT_ID: &str = "default";

/// Hauptzustand der Anwendung
pub struct AppState {
    /// Alle platzierten Elemente (Copy-on-Write für Undo-Snapshots)
    pub registry: Arc<ElementRegistry>,
    /// Selection-State
    pub selection: SelectionState,
    /// Zustandsautomat der Pointer-Interaktion
    pub interaction: InteractionState,
    /// View-State
    pub view: ViewState,
    /// UI-State
    pub ui: UiState,
    /// Grundriss-Bearbeitung
    pub floorplan: FloorplanState,
    /// Katalog platzierbarer Vorlagen
    pub catalog: Catalog,
    /// Buchungsstatus je Service
    pub bookings: BookingIndex,
    /// Aktuelles Projekt
    pub project_id: String,
    /// Persistenz-Collaborator
    pub store: Arc<dyn SceneStore>,
    /// Laufende Hintergrund-Jobs
    pub jobs: JobQueue,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
    /// Undo/Redo-History (Snapshot-basiert)
    pub history: EditHistory,
    /// Laufzeit-Optionen
    pub options: EditorOptions,
    /// Szene ist eingehängt (false: Job-Ergebnisse werden verworfen)
    pub mounted: bool,
}

impl AppState {
    /// Erstellt einen neuen, leeren App-State mit In-Memory-Store.
    pub fn new() -> Self {
        Self::with_options(EditorOptions::default())
    }

    /// Erstellt einen leeren App-State mit den gegebenen Optionen.
    pub fn with_options(options: EditorOptions) -> Self {
        let view = ViewState {
            overlay_enabled: options.overlay_enabled_by_default,
            ..ViewState::new()
        };
        Self {
            registry: Arc::new(ElementRegistry::new()),
            selection: SelectionState::new(),
            interaction: InteractionState::Idle,
            view,
            ui: UiState::new(),
            floorplan: FloorplanState::new(),
            catalog: Catalog::new(),
            bookings: BookingIndex::new(),
            project_id: DEFAULT_PROJECT_ID.to_string(),
            store: Arc::new(MemoryStore::new()),
            jobs: JobQueue::new(),
            command_log: CommandLog::new(),
            history: EditHistory::new_with_capacity(options.history_depth),
            options,
            mounted: true,
        }
    }

    /// Ersetzt den Persistenz-Collaborator.
    pub fn with_store(mut self, store: Arc<dyn SceneStore>) -> Self {
        self.store = store;
        self
    }

    /// Setzt das aktuelle Projekt.
    pub fn with_project(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = project_id.into();
        self
    }

    /// Mutabler Zugriff auf die Registry (klont nur, wenn ein Snapshot sie teilt).
    pub fn registry_mut(&mut self) -> &mut ElementRegistry {
        Arc::make_mut(&mut self.registry)
    }

    /// Registry ohne unbestätigte Deltas einer laufenden Drag-/Dreh-Geste.
    pub fn committed_registry(&self) -> &Arc<ElementRegistry> {
        match &self.interaction {
            InteractionState::Dragging(session) => &session.before,
            InteractionState::Rotating(session) => &session.before,
            InteractionState::Idle | InteractionState::Selecting(_) => &self.registry,
        }
    }

    /// Gibt die Anzahl der Elemente zurück (für UI-Anzeige)
    pub fn element_count(&self) -> usize {
        self.registry.len()
    }

    /// Undo/Redo helpers
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Gibt zurück, ob ein Redo-Schritt verfügbar ist.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Erstellt einen Undo-Snapshot des aktuellen Zustands.
    /// Reduziert Boilerplate in mutierenden Use-Cases.
    pub fn record_undo_snapshot(&mut self) {
        let snap = Snapshot::from_state(self);
        self.history.record_snapshot(snap);
    }

    /// Gibt `true` zurück, solange Speichern oder Export läuft.
    pub fn is_busy(&self) -> bool {
        self.jobs.is_busy()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
