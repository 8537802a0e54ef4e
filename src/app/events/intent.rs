use crate::core::{BookingIndex, Catalog, DeleteScope};
use crate::floorplan::{CornerId, WallId};
use crate::shared::EditorOptions;
use glam::{Vec2, Vec3};

/// App-Intent und App-Command Events.
/// Intents sind Eingaben aus UI/System ohne direkte Mutationslogik.
///
/// Pointer-Intents tragen die Bildschirmposition (für die Drag-Schwelle und
/// das Drehen) und den bereits auf die Bodenebene projizierten Punkt (x, z).
#[derive(Debug, Clone)]
pub enum AppIntent {
    // === Pointer & Tastatur ===
    /// Pointer gedrückt
    PointerDown {
        screen: Vec2,
        ground: Vec2,
        /// Shift gehalten (Toggle statt Einzelselektion)
        shift: bool,
    },
    /// Pointer bewegt (mit oder ohne gedrückte Taste)
    PointerMoved { screen: Vec2, ground: Vec2 },
    /// Pointer losgelassen
    PointerUp { screen: Vec2, ground: Vec2 },
    /// Pointer hat die Zeichenfläche verlassen
    PointerLeft,
    /// Dreh-Griff der Selektion gedrückt
    RotateHandlePressed { screen: Vec2 },
    /// Escape gedrückt
    EscapePressed,

    // === Selektions-Befehle ===
    /// Selektion um einen Welt-Offset verschieben (z.B. Pfeiltasten)
    NudgeSelectionRequested { delta: Vec3 },
    /// Selektion um den Drehpunkt drehen (Radiant)
    RotateSelectionRequested { angle: f32 },
    /// Selektion duplizieren
    DuplicateRequested,
    /// Selektion löschen
    DeleteRequested { scope: DeleteScope },
    /// Selektion sperren
    LockRequested,
    /// Selektion entsperren
    UnlockRequested,
    /// Sperre je Element umschalten
    ToggleLockRequested,
    /// Service an den selektierten Tisch taggen (`None` entfernt das Tag)
    TagServiceRequested { service_id: Option<String> },
    /// Selektierte Kinder vom Host lösen
    DetachRequested,
    /// Katalog-Vorlage an einem Bodenpunkt platzieren
    PlaceCatalogItemRequested {
        item_key: String,
        ground: Vec2,
        yaw: f32,
    },

    // === History ===
    /// Undo
    UndoRequested,
    /// Redo
    RedoRequested,

    // === Ansicht ===
    /// Buchungs-Overlay umschalten
    OverlayToggled,
    /// Kamera um das Ziel drehen
    CameraOrbit { delta_yaw: f32, delta_pitch: f32 },
    /// Kamera parallel zum Boden verschieben
    CameraPan { delta: Vec3 },
    /// Kamera zoomen
    CameraZoom { factor: f32 },
    /// Kamera auf Standard zurücksetzen
    ResetCameraRequested,
    /// Dropdown öffnen/schließen (flüchtiger UI-Zustand)
    DropdownToggled { key: String },
    /// Statusmeldung wegklicken
    StatusMessageDismissed,
    /// Optionen übernehmen
    OptionsChanged { options: EditorOptions },

    // === Collaborator-Daten ===
    /// Katalog wurde geladen
    CatalogReceived { catalog: Catalog },
    /// Buchungsstatus wurde geladen
    BookingsReceived { bookings: BookingIndex },

    // === Szene & Jobs ===
    /// Szene speichern
    SaveRequested,
    /// Szene des aktuellen Projekts laden
    LoadRequested,
    /// Szene wird verlassen (laufende Job-Ergebnisse verwerfen)
    SceneUnmounted,
    /// Frame-Tick: Ergebnisse von Hintergrund-Jobs abholen
    PollBackgroundJobs,

    // === Grundriss ===
    /// Ecke hinzufügen
    AddCornerRequested { position: Vec2 },
    /// Ecke verschieben
    MoveCornerRequested { id: CornerId, position: Vec2 },
    /// Ecke (samt Wänden) entfernen
    RemoveCornerRequested { id: CornerId },
    /// Wand zwischen zwei Ecken ziehen (`None`: Standard-Dicke)
    AddWallRequested {
        a: CornerId,
        b: CornerId,
        thickness: Option<f32>,
    },
    /// Wand entfernen
    RemoveWallRequested { id: WallId },
    /// Grundriss extrudieren, exportieren und hochladen
    ExportFloorplanRequested { name: String },
}
