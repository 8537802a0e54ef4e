//! Grundriss-Pipeline: Ecken/Wände → geschlossene Räume → Volumen → Modell-Export.

pub mod export;
pub mod extrude;
pub mod plan;
pub mod rooms;

pub use export::{
    build_model, export_model, CornerRecord, FloorplanMetadata, ModelAsset, UploadForm,
    MODEL_CONTENT_TYPE, VOLUME_ELEMENT_TYPE,
};
pub use extrude::{extrude, extrude_plan, triangulate, Volume, VolumeMesh};
pub use plan::{CornerId, Floorplan, Wall, WallId, DEFAULT_WALL_THICKNESS};
pub use rooms::{close_rooms, signed_area, Room};
