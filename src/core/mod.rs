//! Core-Domänentypen: Transformationen, Elemente, Registry, Buchungsstatus, Katalog.

pub mod booking;
pub mod camera;
pub mod catalog;
pub mod element;
pub mod error;
pub mod footprint;
/// Element-Registry inklusive Stapelung und Lösch-Regeln
pub mod registry;
pub mod transform;

pub use booking::{status_of, BookingIndex, BookingRecord, BookingStatus, StatusBadge};
pub use camera::OrbitCamera;
pub use catalog::{BundlePart, Catalog, CatalogItem};
pub use element::{BundleId, ElementId, ElementKind, ElementPatch, SceneElement};
pub use error::SceneError;
pub use footprint::Footprint;
pub use registry::{DeleteScope, ElementRegistry, HostTieBreak, StackedChildPolicy};
pub use transform::{
    compose, invert, relative_to, rotate_around, rotate_transform_around, Transform,
};
