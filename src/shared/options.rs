//! Zentrale Konfiguration für den Venue-Szenen-Editor.
//!
//! `EditorOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use crate::core::{HostTieBreak, StackedChildPolicy};
use serde::{Deserialize, Serialize};

// ── Interaktion ─────────────────────────────────────────────────────

/// Bildschirm-Distanz in Pixeln, ab der ein Klick zum Drag wird.
pub const DRAG_THRESHOLD_PX: f32 = 4.0;
/// Drehwinkel in Grad pro horizontalem Pixel beim Rotieren.
pub const ROTATE_DEGREES_PER_PX: f32 = 0.5;
/// Versatz (Meter, auf X und Z) für Duplikate.
pub const DUPLICATE_OFFSET: f32 = 0.5;
/// Toleranz für Transform-Vergleiche.
pub const TRANSFORM_EPSILON: f32 = 1e-4;

// ── Grundriss ───────────────────────────────────────────────────────

/// Standard-Wandhöhe in Metern.
pub const WALL_HEIGHT: f32 = 3.0;
/// Standard-Wanddicke in Metern.
pub const WALL_THICKNESS: f32 = 0.15;

// ── Verlauf ─────────────────────────────────────────────────────────

/// Maximale Anzahl Undo-Schritte.
pub const HISTORY_DEPTH: usize = 200;

// ── Darstellung ─────────────────────────────────────────────────────

/// Hervorhebungsfarbe selektierter Elemente (RGBA: Indigo).
pub const SELECTION_COLOR: [f32; 4] = [0.39, 0.4, 0.95, 1.0];
/// Farbe gesperrter Elemente (RGBA: Grau).
pub const LOCKED_COLOR: [f32; 4] = [0.45, 0.45, 0.45, 1.0];

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Editor-Optionen.
/// Wird als `venue_scene_editor.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorOptions {
    // ── Interaktion ─────────────────────────────────────────────
    /// Drag-Schwelle in Pixeln
    #[serde(default = "default_drag_threshold_px")]
    pub drag_threshold_px: f32,
    /// Drehgeschwindigkeit in Grad pro Pixel
    #[serde(default = "default_rotate_degrees_per_px")]
    pub rotate_degrees_per_px: f32,
    /// Versatz für Duplikate in Metern
    #[serde(default = "default_duplicate_offset")]
    pub duplicate_offset: f32,
    /// Abgelegte Elemente auf die Oberkante des Hosts setzen
    #[serde(default)]
    pub snap_stacked_to_host_top: bool,
    /// Toleranz, unter der eine beendete Drag-/Dreh-Geste als unverändert gilt
    #[serde(default = "default_transform_epsilon")]
    pub transform_epsilon: f32,

    // ── Stapelung & Löschen ─────────────────────────────────────
    /// Umgang mit gestapelten Kindern beim Löschen des Hosts
    #[serde(default)]
    pub stacked_child_policy: StackedChildPolicy,
    /// Auswahl bei mehreren überlappenden Hosts
    #[serde(default)]
    pub host_tie_break: HostTieBreak,

    // ── Grundriss ───────────────────────────────────────────────
    /// Wandhöhe für die Extrusion
    #[serde(default = "default_wall_height")]
    pub wall_height: f32,
    /// Wanddicke für neue Wände
    #[serde(default = "default_wall_thickness")]
    pub wall_thickness: f32,

    // ── Verlauf & Anzeige ───────────────────────────────────────
    /// Maximale Undo-Tiefe
    #[serde(default = "default_history_depth")]
    pub history_depth: usize,
    /// Buchungs-Overlay beim Start aktiv
    #[serde(default)]
    pub overlay_enabled_by_default: bool,
    /// Hervorhebungsfarbe der Selektion
    #[serde(default = "default_selection_color")]
    pub selection_color: [f32; 4],
    /// Farbe gesperrter Elemente
    #[serde(default = "default_locked_color")]
    pub locked_color: [f32; 4],
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            drag_threshold_px: DRAG_THRESHOLD_PX,
            rotate_degrees_per_px: ROTATE_DEGREES_PER_PX,
            duplicate_offset: DUPLICATE_OFFSET,
            snap_stacked_to_host_top: false,
            transform_epsilon: TRANSFORM_EPSILON,

            stacked_child_policy: StackedChildPolicy::default(),
            host_tie_break: HostTieBreak::default(),

            wall_height: WALL_HEIGHT,
            wall_thickness: WALL_THICKNESS,

            history_depth: HISTORY_DEPTH,
            overlay_enabled_by_default: false,
            selection_color: SELECTION_COLOR,
            locked_color: LOCKED_COLOR,
        }
    }
}

fn default_drag_threshold_px() -> f32 {
    DRAG_THRESHOLD_PX
}

fn default_rotate_degrees_per_px() -> f32 {
    ROTATE_DEGREES_PER_PX
}

fn default_duplicate_offset() -> f32 {
    DUPLICATE_OFFSET
}

fn default_transform_epsilon() -> f32 {
    TRANSFORM_EPSILON
}

fn default_wall_height() -> f32 {
    WALL_HEIGHT
}

fn default_wall_thickness() -> f32 {
    WALL_THICKNESS
}

fn default_history_depth() -> usize {
    HISTORY_DEPTH
}

fn default_selection_color() -> [f32; 4] {
    SELECTION_COLOR
}

fn default_locked_color() -> [f32; 4] {
    LOCKED_COLOR
}

impl EditorOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("venue-designer"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("venue_scene_editor.toml")
    }

    /// Drehwinkel in Radiant für eine horizontale Pixel-Distanz.
    pub fn rotation_for_pixels(&self, delta_px: f32) -> f32 {
        (delta_px * self.rotate_degrees_per_px).to_radians()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let options: EditorOptions = toml::from_str(
            r#"
            drag_threshold_px = 8.0
            stacked_child_policy = "orphan"
            "#,
        )
        .expect("TOML parsebar");
        assert_eq!(options.drag_threshold_px, 8.0);
        assert_eq!(options.stacked_child_policy, StackedChildPolicy::Orphan);
        assert_eq!(options.wall_height, WALL_HEIGHT);
        assert_eq!(options.host_tie_break, HostTieBreak::SmallestFootprint);
    }

    #[test]
    fn save_and_load_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "venue_scene_editor_options_{}.toml",
            std::process::id()
        ));
        let options = EditorOptions {
            host_tie_break: HostTieBreak::Topmost,
            snap_stacked_to_host_top: true,
            ..EditorOptions::default()
        };
        options.save_to_file(&path).expect("Speichern erwartet");
        assert_eq!(EditorOptions::load_from_file(&path), options);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = std::path::Path::new("/nonexistent/venue_scene_editor.toml");
        assert_eq!(EditorOptions::load_from_file(path), EditorOptions::default());
    }
}
