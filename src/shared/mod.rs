//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält Optionen und die Render-Projektion, die zwischen `app` und einem
//! Renderer geteilt werden, um direkte Abhängigkeiten zu vermeiden.

pub mod options;
mod scene_view;

pub use options::EditorOptions;
pub use scene_view::{ElementView, HoverInfo, InteractionPhase, SceneView};
