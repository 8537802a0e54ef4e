//! Application State: zentrale Datenhaltung.
//!
//! Persistierte Szene (Registry, Kamera) und sitzungslokaler Zustand
//! (Selektion, Interaktion, Hover, Dropdowns) sind getrennt gehalten.

mod app_state;
mod floorplan;
mod interaction;
mod selection;
mod view;

pub use app_state::AppState;
pub use floorplan::FloorplanState;
pub use interaction::{DragSession, InteractionState, PressState, RotateSession};
pub use selection::SelectionState;
pub use view::{UiState, ViewState};
