//! Use-Cases der Application-Layer-Orchestrierung.

pub mod camera;
pub mod editing;
pub mod file_io;
pub mod floorplan;
pub mod interaction;
pub mod selection;
