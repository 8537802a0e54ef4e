use crate::core::{ElementId, ElementRegistry, Transform};
use crate::shared::InteractionPhase;
use glam::{Vec2, Vec3};
use std::collections::HashMap;
use std::sync::Arc;

/// Zustand einer gedrückten, noch nicht als Drag erkannten Geste.
#[derive(Debug, Clone, PartialEq)]
pub struct PressState {
    /// Getroffenes Element (None = leere Fläche)
    pub hit: Option<ElementId>,
    /// Bildschirmposition beim Drücken
    pub start_screen: Vec2,
    /// Bodenposition beim Drücken
    pub start_ground: Vec2,
    /// Auf pointerUp verschobenes `select_only` (Klick auf bereits selektiertes Element)
    pub deferred_select_only: Option<ElementId>,
}

/// Laufendes Verschieben der Selektion.
#[derive(Debug, Clone)]
pub struct DragSession {
    /// Registry vor Beginn (für Escape und Undo)
    pub before: Arc<ElementRegistry>,
    /// Selektion zu Beginn
    pub selection: Vec<ElementId>,
    /// Tatsächlich bewegte Elemente (ohne Kinder selektierter Eltern)
    pub moved: Vec<ElementId>,
    /// Welttransformationen der bewegten Elemente zu Beginn
    pub start_world: HashMap<ElementId, Transform>,
    /// Gegriffenes Element
    pub grabbed: Option<ElementId>,
    /// Bodenposition zu Beginn
    pub start_ground: Vec2,
    /// Zuletzt angewendete Bodenposition
    pub last_ground: Vec2,
}

/// Laufendes Drehen der Selektion.
#[derive(Debug, Clone)]
pub struct RotateSession {
    /// Registry vor Beginn (für Escape und Undo)
    pub before: Arc<ElementRegistry>,
    /// Selektion zu Beginn
    pub selection: Vec<ElementId>,
    /// Tatsächlich gedrehte Elemente
    pub moved: Vec<ElementId>,
    /// Welttransformationen der gedrehten Elemente zu Beginn
    pub start_world: HashMap<ElementId, Transform>,
    /// Gemeinsamer Drehpunkt (Position des primären Elements)
    pub pivot: Vec3,
    /// Horizontale Bildschirmposition zu Beginn
    pub start_screen_x: f32,
    /// Zuletzt angewendeter Winkel (Radiant)
    pub angle: f32,
}

/// Zustandsautomat der Interaktion.
#[derive(Debug, Clone, Default)]
pub enum InteractionState {
    /// Keine Geste aktiv
    #[default]
    Idle,
    /// Pointer gedrückt, Drag-Schwelle noch nicht überschritten
    Selecting(PressState),
    /// Selektion wird verschoben
    Dragging(DragSession),
    /// Selektion wird gedreht
    Rotating(RotateSession),
}

impl InteractionState {
    /// Gibt `true` zurück, wenn keine Geste aktiv ist.
    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }

    /// Ob eine Transform-Geste (Drag/Rotate) läuft.
    pub fn is_transforming(&self) -> bool {
        matches!(
            self,
            InteractionState::Dragging(_) | InteractionState::Rotating(_)
        )
    }

    /// Phase für die Render-Projektion.
    pub fn phase(&self) -> InteractionPhase {
        match self {
            InteractionState::Idle => InteractionPhase::Idle,
            InteractionState::Selecting(_) => InteractionPhase::Selecting,
            InteractionState::Dragging(_) => InteractionPhase::Dragging,
            InteractionState::Rotating(_) => InteractionPhase::Rotating,
        }
    }
}
