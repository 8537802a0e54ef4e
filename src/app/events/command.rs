use crate::core::{BookingIndex, Catalog, DeleteScope, ElementId};
use crate::floorplan::{CornerId, WallId};
use crate::shared::EditorOptions;
use glam::{Vec2, Vec3};

/// Commands sind mutierende Schritte, die zentral ausgeführt werden.
#[derive(Debug, Clone)]
pub enum AppCommand {
    // === Interaktion ===
    /// Geste beginnen (Treffer bereits per Hit-Test aufgelöst)
    BeginPress {
        hit: Option<ElementId>,
        screen: Vec2,
        ground: Vec2,
        toggle: bool,
    },
    /// Laufende Geste aktualisieren (Drag-Schwelle, Verschieben, Drehen)
    UpdatePointer { screen: Vec2, ground: Vec2 },
    /// Geste beenden und committen
    EndPress { ground: Vec2 },
    /// Drehen der Selektion beginnen
    BeginRotate { screen: Vec2 },
    /// Laufende Geste verwerfen
    CancelInteraction,
    /// Hover-Element setzen
    SetHover { id: Option<ElementId> },

    // === Selektion ===
    /// Selektion aufheben
    ClearSelection,
    /// Genau ein Element selektieren
    SelectOnly { id: ElementId },
    /// Element zur Selektion hinzufügen/entfernen
    ToggleSelection { id: ElementId },

    // === Editing ===
    /// Selektion direkt verschieben
    MoveSelection { delta: Vec3 },
    /// Selektion direkt drehen
    RotateSelection { angle: f32 },
    /// Selektion duplizieren
    DuplicateSelection,
    /// Selektion löschen
    DeleteSelection { scope: DeleteScope },
    /// Selektion sperren
    LockSelection,
    /// Selektion entsperren
    UnlockSelection,
    /// Sperre je Element umschalten
    ToggleLockSelection,
    /// Service taggen
    TagService { service_id: Option<String> },
    /// Selektierte Kinder lösen
    DetachSelection,
    /// Katalog-Vorlage platzieren
    PlaceCatalogItem {
        item_key: String,
        ground: Vec2,
        yaw: f32,
    },

    // === History ===
    /// Undo
    Undo,
    /// Redo
    Redo,

    // === Ansicht ===
    /// Overlay umschalten
    ToggleOverlay,
    /// Kamera drehen
    OrbitCamera { delta_yaw: f32, delta_pitch: f32 },
    /// Kamera verschieben
    PanCamera { delta: Vec3 },
    /// Kamera zoomen
    ZoomCamera { factor: f32 },
    /// Kamera zurücksetzen
    ResetCamera,
    /// Dropdown umschalten
    ToggleDropdown { key: String },
    /// Statusmeldung entfernen
    DismissStatusMessage,
    /// Optionen übernehmen und speichern
    ApplyOptions { options: EditorOptions },
    /// Katalog ersetzen
    SetCatalog { catalog: Catalog },
    /// Buchungsindex ersetzen
    SetBookings { bookings: BookingIndex },

    // === Szene & Jobs ===
    /// Szene im Hintergrund speichern
    SaveScene,
    /// Szene laden
    LoadScene,
    /// Szene aushängen
    UnmountScene,
    /// Job-Ergebnisse abholen
    PollBackgroundJobs,

    // === Grundriss ===
    /// Ecke hinzufügen
    AddCorner { position: Vec2 },
    /// Ecke verschieben
    MoveCorner { id: CornerId, position: Vec2 },
    /// Ecke entfernen
    RemoveCorner { id: CornerId },
    /// Wand hinzufügen
    AddWall {
        a: CornerId,
        b: CornerId,
        thickness: Option<f32>,
    },
    /// Wand entfernen
    RemoveWall { id: WallId },
    /// Grundriss-Export starten
    ExportFloorplan { name: String },
}
