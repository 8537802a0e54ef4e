//! Use-Case-Funktionen für die Element-Selektion.
//!
//! - `pick`: Hit-Test auf der Bodenebene, Klick- und Toggle-Selektion
//! - `helpers`: Gemeinsame Prüfungen und Wurzel-Ermittlung für Transform-Befehle

mod helpers;
mod pick;

pub use helpers::{clear_selection, ensure_editable_selection, transform_roots};
pub use pick::{pick_element, select_only, set_hover, toggle_selection};
