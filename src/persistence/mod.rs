//! Persistenz-Schnittstelle: Szenen-Dokument (JSON) und Store-Abstraktion.
//!
//! Die eigentliche Persistenz (REST, Datenbank) ist ein externer Collaborator;
//! hier liegt nur der Vertrag plus zwei einfache Implementierungen.

pub mod document;
pub mod store;

pub use document::{SceneDocument, SCENE_FORMAT_VERSION};
pub use store::{JsonFileStore, MemoryStore, SceneStore};
