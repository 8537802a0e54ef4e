//! Platzierte Szenen-Elemente und ihre Metadaten.

use super::Transform;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Stabile Element-ID innerhalb einer Sitzung/Szene.
pub type ElementId = u64;
/// Gruppen-ID für gemeinsam erzeugte Elemente (z.B. Tisch + Stühle).
pub type BundleId = u64;

/// Art eines Elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementKind {
    /// Allgemeines Möbelstück
    #[default]
    Furniture,
    /// Tisch (kann Services tragen und Deko aufnehmen)
    Table,
    /// Stuhl
    Chair,
    /// Tischdeko / Blumengesteck
    Centerpiece,
    /// Sonstige Dekoration
    Decor,
    /// Freistehende Wand / Trennwand
    Wall,
    /// Aus einem Grundriss extrudiertes Raumvolumen
    VenueVolume,
}

impl ElementKind {
    /// Standard-Abmessungen (Breite x, Höhe y, Tiefe z) in Metern.
    pub fn default_dimensions(self) -> Vec3 {
        match self {
            ElementKind::Furniture => Vec3::new(1.0, 1.0, 1.0),
            ElementKind::Table => Vec3::new(1.8, 0.75, 0.9),
            ElementKind::Chair => Vec3::new(0.45, 0.9, 0.45),
            ElementKind::Centerpiece => Vec3::new(0.3, 0.4, 0.3),
            ElementKind::Decor => Vec3::new(0.5, 0.5, 0.5),
            ElementKind::Wall => Vec3::new(3.0, 2.5, 0.15),
            ElementKind::VenueVolume => Vec3::new(10.0, 3.0, 10.0),
        }
    }

    /// Ob Elemente dieser Art standardmäßig auf Hosts gestapelt werden dürfen.
    pub fn default_stackable(self) -> bool {
        matches!(self, ElementKind::Centerpiece | ElementKind::Decor)
    }

    /// Ob Elemente dieser Art standardmäßig andere Elemente tragen.
    pub fn default_stackable_host(self) -> bool {
        matches!(self, ElementKind::Table | ElementKind::Furniture)
    }

    /// Ob an Elementen dieser Art ein Service getaggt werden darf.
    pub fn accepts_service_tag(self) -> bool {
        self == ElementKind::Table
    }
}

/// Ein platziertes Element der Szene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneElement {
    /// Eindeutige ID
    pub id: ElementId,
    /// Element-Art
    pub kind: ElementKind,
    /// Anzeigename
    #[serde(default)]
    pub name: String,
    /// Katalog-Schlüssel der Vorlage (falls aus dem Katalog platziert)
    #[serde(default)]
    pub catalog_key: Option<String>,
    /// Autoritative Transformation: Welt für Wurzeln, Offset im Eltern-Frame für Kinder
    pub local: Transform,
    /// Abgeleitete Welttransformation (nicht persistiert)
    #[serde(skip)]
    pub(crate) world: Transform,
    /// Abmessungen (Breite, Höhe, Tiefe)
    pub dimensions: Vec3,
    /// Gesperrt gegen Verschieben/Drehen
    #[serde(default)]
    pub locked: bool,
    /// Bundle-Zugehörigkeit
    #[serde(default)]
    pub bundle_id: Option<BundleId>,
    /// Referenz auf einen buchbaren Service
    #[serde(default)]
    pub service_tag: Option<String>,
    /// Eltern-Element (Stapelung)
    #[serde(default)]
    pub parent_id: Option<ElementId>,
    /// Wurde zusammen mit dem Host als Teil desselben Bundles gestapelt
    #[serde(default)]
    pub bound_within_bundle: bool,
    /// Darf auf einem Host abgelegt werden
    #[serde(default)]
    pub stackable: bool,
    /// Darf andere Elemente tragen
    #[serde(default)]
    pub stackable_host: bool,
}

impl SceneElement {
    /// Erstellt ein Element mit den Standardwerten seiner Art.
    pub fn new(id: ElementId, kind: ElementKind, world: Transform) -> Self {
        Self {
            id,
            kind,
            name: String::new(),
            catalog_key: None,
            local: world,
            world,
            dimensions: kind.default_dimensions(),
            locked: false,
            bundle_id: None,
            service_tag: None,
            parent_id: None,
            bound_within_bundle: false,
            stackable: kind.default_stackable(),
            stackable_host: kind.default_stackable_host(),
        }
    }

    /// Zuletzt berechnete Welttransformation.
    pub fn world(&self) -> &Transform {
        &self.world
    }

    /// Oberkante des Elements in Weltkoordinaten (Y).
    pub fn top_elevation(&self) -> f32 {
        self.world.translation.y + self.dimensions.y
    }
}

/// Teil-Update für [`super::ElementRegistry::update`].
///
/// `world` und `dimensions` sind Transform-Felder und werden an gesperrten
/// Elementen abgelehnt; alle übrigen Felder sind Metadaten.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementPatch {
    /// Neue Welttransformation
    pub world: Option<Transform>,
    /// Neue Abmessungen
    pub dimensions: Option<Vec3>,
    /// Neuer Name
    pub name: Option<String>,
    /// Service-Tag setzen (`Some(None)` entfernt das Tag)
    pub service_tag: Option<Option<String>>,
    /// Sperrstatus
    pub locked: Option<bool>,
}

impl ElementPatch {
    /// Ob der Patch Positions-/Rotationsfelder enthält.
    pub fn touches_transform(&self) -> bool {
        self.world.is_some() || self.dimensions.is_some()
    }
}
