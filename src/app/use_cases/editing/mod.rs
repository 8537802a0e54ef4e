//! Use-Case-Funktionen für das Bearbeiten der Szene.
//!
//! Aufgeteilt nach Operation:
//! - `place`: Katalog-Vorlage (ggf. als Bundle) platzieren
//! - `duplicate`: Selektion inkl. Bundles und gestapelter Kinder kopieren
//! - `delete`: Selektion löschen (blockiert durch aktive Buchungen)
//! - `lock`: Sperren, Entsperren, Umschalten
//! - `tag`: Service an einen Tisch taggen
//! - `detach`: Gestapelte Kinder explizit lösen

mod delete;
mod detach;
mod duplicate;
mod lock;
mod place;
mod tag;

pub use delete::delete_selection;
pub use detach::detach_selection;
pub use duplicate::duplicate_selection;
pub use lock::{lock_selection, toggle_lock_selection, unlock_selection};
pub use place::place_catalog_item;
pub use tag::tag_service;
