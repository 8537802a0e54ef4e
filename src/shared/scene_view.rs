//! Render-Projektion der Szene als expliziter Übergabevertrag zwischen App und Renderer.
//!
//! Lebt im shared-Modul, da `app` sie baut und ein beliebiger Renderer sie konsumiert.

use crate::core::{BookingStatus, ElementId, ElementKind, OrbitCamera, Transform};
use glam::Vec3;

/// Grobe Phase der Interaktion (für Cursor und Hinweise im Renderer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionPhase {
    /// Keine laufende Geste
    #[default]
    Idle,
    /// Pointer gedrückt, Schwelle noch nicht überschritten
    Selecting,
    /// Selektion wird verschoben
    Dragging,
    /// Selektion wird gedreht
    Rotating,
}

/// Ein Element, wie es im aktuellen Frame gezeichnet wird.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementView {
    /// Element-ID
    pub id: ElementId,
    /// Element-Art
    pub kind: ElementKind,
    /// Welttransformation
    pub world: Transform,
    /// Abmessungen
    pub dimensions: Vec3,
    /// Katalog-Schlüssel (Geometrie-Referenz)
    pub catalog_key: Option<String>,
    /// Selektiert
    pub selected: bool,
    /// Primäres Element der Selektion
    pub primary: bool,
    /// Gesperrt
    pub locked: bool,
    /// Unter dem Mauszeiger
    pub hovered: bool,
    /// Eltern-Element (Stapelung)
    pub parent_id: Option<ElementId>,
    /// Overlay-Farbe (nur bei aktivem Buchungs-Overlay)
    pub overlay_color: Option<[f32; 4]>,
    /// Hervorhebungsfarbe (Selektion oder Sperre)
    pub highlight_color: Option<[f32; 4]>,
}

/// Hover-Information eines getaggten Elements bei aktivem Overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverInfo {
    /// Element unter dem Mauszeiger
    pub element_id: ElementId,
    /// Service-Name (falls im Buchungsindex bekannt)
    pub service_name: Option<String>,
    /// Buchungsstatus
    pub status: BookingStatus,
    /// Status-Label
    pub label: &'static str,
    /// Status-Farbe als Hex-String
    pub color: &'static str,
}

/// Read-only Daten für einen Render-Frame.
#[derive(Debug, Clone, Default)]
pub struct SceneView {
    /// Alle Elemente, nach ID sortiert
    pub elements: Vec<ElementView>,
    /// Kamera-Zustand
    pub camera: OrbitCamera,
    /// Buchungs-Overlay aktiv
    pub overlay_enabled: bool,
    /// Hover-Info (nur bei aktivem Overlay und getaggtem Element)
    pub hover_info: Option<HoverInfo>,
    /// Interaktions-Phase
    pub phase: InteractionPhase,
    /// Hintergrund-Job läuft (Drag/Rotate gesperrt)
    pub busy: bool,
    /// Sichtbare Statusmeldung
    pub status_message: Option<String>,
}

impl SceneView {
    /// Sucht die Darstellung eines Elements.
    pub fn element(&self, id: ElementId) -> Option<&ElementView> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Legende des Overlays (Label, Farbe) in fester Reihenfolge.
    pub fn legend() -> Vec<(&'static str, &'static str)> {
        BookingStatus::ALL
            .iter()
            .map(|s| (s.label(), s.color_hex()))
            .collect()
    }
}
