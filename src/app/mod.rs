//! Application-Layer: Controller, State, Events und Use-Cases.

pub mod command_log;
pub mod controller;
pub mod events;
pub mod handlers;
pub mod history;
mod intent_mapping;
/// Hintergrund-Jobs für Speichern und Grundriss-Export
pub mod jobs;
pub mod render_scene;
/// Application State
///
/// Dieses Modul verwaltet den Zustand der Anwendung (Szene, Selektion, Interaktion, View).
pub mod state;
pub mod use_cases;

pub use command_log::{CommandLog, CommandOutcome, LoggedCommand};
pub use controller::AppController;
pub use events::{AppCommand, AppIntent};
pub use jobs::{JobKind, JobOutcome, JobQueue};
pub use render_scene::build as build_scene_view;
pub use state::{
    AppState, DragSession, FloorplanState, InteractionState, PressState, RotateSession,
    SelectionState, UiState, ViewState,
};
