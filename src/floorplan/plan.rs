//! Grundriss-Graph: Ecken (2D-Punkte) und Wände (Eckpaare mit Dicke).

use crate::core::SceneError;
use glam::Vec2;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// ID einer Ecke.
pub type CornerId = u64;
/// ID einer Wand.
pub type WallId = u64;

/// Standard-Wanddicke in Metern.
pub const DEFAULT_WALL_THICKNESS: f32 = 0.15;

/// Wand zwischen zwei Ecken.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    /// Wand-ID
    pub id: WallId,
    /// Erste Ecke
    pub a: CornerId,
    /// Zweite Ecke
    pub b: CornerId,
    /// Wanddicke in Metern
    pub thickness: f32,
}

impl Wall {
    /// Prüft ob die Wand die beiden Ecken (in beliebiger Richtung) verbindet.
    pub fn connects(&self, x: CornerId, y: CornerId) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }
}

/// Editierbarer Grundriss.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Floorplan {
    corners: IndexMap<CornerId, Vec2>,
    walls: IndexMap<WallId, Wall>,
    #[serde(default)]
    next_corner_id: CornerId,
    #[serde(default)]
    next_wall_id: WallId,
}

impl Floorplan {
    /// Erstellt einen leeren Grundriss.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parst einen Grundriss aus JSON und prüft alle Wand-Referenzen.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let mut plan: Floorplan = serde_json::from_str(json)?;
        plan.validate()?;
        plan.next_corner_id = plan
            .next_corner_id
            .max(plan.corners.keys().max().map_or(0, |id| id + 1));
        plan.next_wall_id = plan
            .next_wall_id
            .max(plan.walls.keys().max().map_or(0, |id| id + 1));
        Ok(plan)
    }

    /// Fügt eine Ecke hinzu.
    pub fn add_corner(&mut self, position: Vec2) -> CornerId {
        let id = self.next_corner_id.max(1);
        self.next_corner_id = id + 1;
        self.corners.insert(id, position);
        id
    }

    /// Verschiebt eine Ecke.
    pub fn move_corner(&mut self, id: CornerId, position: Vec2) -> Result<(), SceneError> {
        let corner = self
            .corners
            .get_mut(&id)
            .ok_or(SceneError::UnknownCorner(id))?;
        *corner = position;
        Ok(())
    }

    /// Entfernt eine Ecke samt aller angrenzenden Wände. Gibt die entfernten Wand-IDs zurück.
    pub fn remove_corner(&mut self, id: CornerId) -> Result<Vec<WallId>, SceneError> {
        if self.corners.shift_remove(&id).is_none() {
            return Err(SceneError::UnknownCorner(id));
        }
        let removed: Vec<WallId> = self
            .walls
            .values()
            .filter(|w| w.a == id || w.b == id)
            .map(|w| w.id)
            .collect();
        self.walls.retain(|_, w| w.a != id && w.b != id);
        Ok(removed)
    }

    /// Fügt eine Wand zwischen zwei verschiedenen, existierenden Ecken hinzu.
    ///
    /// Existiert die Wand bereits, wird deren ID zurückgegeben.
    pub fn add_wall(
        &mut self,
        a: CornerId,
        b: CornerId,
        thickness: f32,
    ) -> Result<WallId, SceneError> {
        if a == b || !self.corners.contains_key(&a) || !self.corners.contains_key(&b) {
            return Err(SceneError::InvalidWall(a, b));
        }
        if let Some(existing) = self.walls.values().find(|w| w.connects(a, b)) {
            log::debug!("Wand zwischen {} und {} existiert bereits", a, b);
            return Ok(existing.id);
        }
        let id = self.next_wall_id.max(1);
        self.next_wall_id = id + 1;
        let thickness = if thickness.is_finite() && thickness > 0.0 {
            thickness
        } else {
            DEFAULT_WALL_THICKNESS
        };
        self.walls.insert(id, Wall { id, a, b, thickness });
        Ok(id)
    }

    /// Entfernt eine Wand.
    pub fn remove_wall(&mut self, id: WallId) -> Option<Wall> {
        self.walls.shift_remove(&id)
    }

    /// Position einer Ecke.
    pub fn corner(&self, id: CornerId) -> Option<Vec2> {
        self.corners.get(&id).copied()
    }

    /// Iterator über alle Ecken (Einfüge-Reihenfolge).
    pub fn corners(&self) -> impl Iterator<Item = (CornerId, Vec2)> + '_ {
        self.corners.iter().map(|(id, pos)| (*id, *pos))
    }

    /// Iterator über alle Wände (Einfüge-Reihenfolge).
    pub fn walls(&self) -> impl Iterator<Item = &Wall> {
        self.walls.values()
    }

    /// Findet die Wand zwischen zwei Ecken.
    pub fn wall_between(&self, a: CornerId, b: CornerId) -> Option<&Wall> {
        self.walls.values().find(|w| w.connects(a, b))
    }

    /// Anzahl der Ecken.
    pub fn corner_count(&self) -> usize {
        self.corners.len()
    }

    /// Anzahl der Wände.
    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }

    /// Prüft dass jede Wand zwei verschiedene, existierende Ecken referenziert.
    pub fn validate(&self) -> Result<(), SceneError> {
        for wall in self.walls.values() {
            if wall.a == wall.b
                || !self.corners.contains_key(&wall.a)
                || !self.corners.contains_key(&wall.b)
            {
                return Err(SceneError::InvalidWall(wall.a, wall.b));
            }
        }
        Ok(())
    }
}
