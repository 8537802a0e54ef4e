//! Katalog platzierbarer Element-Vorlagen (vom Persistenz-Collaborator geliefert).

use super::{ElementKind, SceneError};
use glam::Vec3;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Zusätzliches Element eines Sets (z.B. ein Stuhl eines Tisch-Sets).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundlePart {
    /// Katalog-Schlüssel des Teils
    pub item_key: String,
    /// Position relativ zum Anker-Element
    pub offset: Vec3,
    /// Gierwinkel relativ zum Anker (Radiant)
    #[serde(default)]
    pub yaw: f32,
}

/// Eine platzierbare Vorlage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Eindeutiger Schlüssel
    pub key: String,
    /// Anzeigename
    pub name: String,
    /// Element-Art
    pub kind: ElementKind,
    /// Standard-Abmessungen (fehlt: Standard der Art)
    #[serde(default)]
    pub dimensions: Option<Vec3>,
    /// Stapelbar (fehlt: Standard der Art)
    #[serde(default)]
    pub stackable: Option<bool>,
    /// Host für Stapelung (fehlt: Standard der Art)
    #[serde(default)]
    pub stackable_host: Option<bool>,
    /// Preis in Cent
    #[serde(default)]
    pub price_cents: u64,
    /// Referenz auf das Geometrie-Asset
    #[serde(default)]
    pub geometry_ref: Option<String>,
    /// Weitere Teile, die als Bundle mitplatziert werden
    #[serde(default)]
    pub bundle_parts: Vec<BundlePart>,
}

impl CatalogItem {
    /// Effektive Abmessungen.
    pub fn dimensions(&self) -> Vec3 {
        self.dimensions
            .unwrap_or_else(|| self.kind.default_dimensions())
    }

    /// Effektives Stapelbar-Flag.
    pub fn stackable(&self) -> bool {
        self.stackable.unwrap_or_else(|| self.kind.default_stackable())
    }

    /// Effektives Host-Flag.
    pub fn stackable_host(&self) -> bool {
        self.stackable_host
            .unwrap_or_else(|| self.kind.default_stackable_host())
    }

    /// Ob die Vorlage ein Set (Bundle) erzeugt.
    pub fn is_bundle(&self) -> bool {
        !self.bundle_parts.is_empty()
    }
}

/// Katalog, indexiert nach Schlüssel (Reihenfolge wie geliefert).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    items: IndexMap<String, CatalogItem>,
}

impl Catalog {
    /// Erstellt einen leeren Katalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Baut einen Katalog aus einer Liste von Vorlagen.
    pub fn from_items(items: impl IntoIterator<Item = CatalogItem>) -> Self {
        Self {
            items: items.into_iter().map(|i| (i.key.clone(), i)).collect(),
        }
    }

    /// Parst einen Katalog aus einem JSON-Array von Vorlagen.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let items: Vec<CatalogItem> = serde_json::from_str(json)?;
        Ok(Self::from_items(items))
    }

    /// Liefert eine Vorlage.
    pub fn get(&self, key: &str) -> Result<&CatalogItem, SceneError> {
        self.items
            .get(key)
            .ok_or_else(|| SceneError::UnknownCatalogItem(key.to_string()))
    }

    /// Anzahl der Vorlagen.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Gibt `true` zurück, wenn der Katalog leer ist.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterator über alle Vorlagen.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogItem> {
        self.items.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_catalog_with_bundle_parts() {
        let json = r#"[
            {"key": "chair", "name": "Chiavari", "kind": "chair", "price_cents": 900},
            {"key": "round-set", "name": "Round table set", "kind": "table",
             "dimensions": [1.5, 0.75, 1.5],
             "bundle_parts": [{"item_key": "chair", "offset": [0.0, 0.0, -1.0]}]}
        ]"#;
        let catalog = Catalog::from_json(json).expect("Katalog parsebar");

        assert_eq!(catalog.len(), 2);
        let set = catalog.get("round-set").unwrap();
        assert!(set.is_bundle());
        assert!(set.stackable_host());
        assert_eq!(set.dimensions(), Vec3::new(1.5, 0.75, 1.5));
        assert!(matches!(
            catalog.get("missing"),
            Err(SceneError::UnknownCatalogItem(_))
        ));
    }
}
