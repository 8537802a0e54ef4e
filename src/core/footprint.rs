//! Horizontale Grundfläche eines Elements (gedrehtes Rechteck auf der XZ-Ebene).

use super::{SceneElement, Transform};
use glam::{Vec2, Vec3};

/// Orientiertes Rechteck auf der Bodenebene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    /// Welt-Frame des Elements
    pub frame: Transform,
    /// Halbe Ausdehnung in lokaler x- und z-Richtung
    pub half_extents: Vec2,
}

impl Footprint {
    /// Leitet die Grundfläche aus Welttransformation und Abmessungen ab.
    pub fn of(element: &SceneElement) -> Self {
        Self {
            frame: *element.world(),
            half_extents: Vec2::new(element.dimensions.x * 0.5, element.dimensions.z * 0.5),
        }
    }

    /// Prüft ob ein Bodenpunkt (x, z) innerhalb der Grundfläche liegt (Rand inklusive).
    pub fn contains(&self, ground: Vec2) -> bool {
        let offset = Vec3::new(ground.x, self.frame.translation.y, ground.y) - self.frame.translation;
        let local = self.frame.rotation.inverse() * offset;
        local.x.abs() <= self.half_extents.x + f32::EPSILON
            && local.z.abs() <= self.half_extents.y + f32::EPSILON
    }

    /// Fläche in Quadratmetern.
    pub fn area(&self) -> f32 {
        4.0 * self.half_extents.x * self.half_extents.y
    }
}
