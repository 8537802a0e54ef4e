//! Venue Scene Editor Library.
//! Core-Funktionalität als Library exportiert für Tests, Benchmarks und Hosts.

pub mod app;
pub mod core;
pub mod floorplan;
pub mod persistence;
pub mod shared;

pub use app::{AppCommand, AppController, AppIntent, AppState, UiState, ViewState};
pub use core::{
    BookingIndex, BookingStatus, Catalog, DeleteScope, ElementId, ElementKind, ElementRegistry,
    SceneElement, SceneError, Transform,
};
pub use floorplan::{close_rooms, Floorplan};
pub use persistence::{JsonFileStore, MemoryStore, SceneDocument, SceneStore};
pub use shared::{EditorOptions, SceneView};
