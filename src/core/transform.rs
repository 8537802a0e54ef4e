//! Starre Transformationen (Position + Orientierung) und ihre Verknüpfung.
//!
//! Konvention: Y zeigt nach oben, die Bodenebene ist XZ. Die Gierung (Yaw)
//! ist eine Rotation um +Y. Skalierung/Abmessungen gehören nicht zum Frame,
//! sondern liegen als Metadaten am Element.

use glam::{EulerRot, Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Starre Transformation: erst Rotation, dann Translation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Position (Basis-Mittelpunkt des Elements)
    pub translation: Vec3,
    /// Orientierung (Einheits-Quaternion)
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// Identität: Ursprung, keine Rotation.
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    /// Erstellt eine Transformation aus Position und Gierwinkel (Radiant).
    pub fn from_position_yaw(translation: Vec3, yaw: f32) -> Self {
        Self {
            translation,
            rotation: Quat::from_rotation_y(yaw),
        }
    }

    /// Erstellt eine reine Translation.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
        }
    }

    /// Gierwinkel um +Y in Radiant.
    pub fn yaw(&self) -> f32 {
        self.rotation.to_euler(EulerRot::YXZ).0
    }

    /// Position projiziert auf die Bodenebene (x, z).
    pub fn ground(&self) -> Vec2 {
        Vec2::new(self.translation.x, self.translation.z)
    }

    /// Wendet die Transformation auf einen Punkt an.
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.translation + self.rotation * point
    }

    /// Prüft ob alle Komponenten endlich sind.
    pub fn is_finite(&self) -> bool {
        self.translation.is_finite() && self.rotation.is_finite()
    }

    /// Vergleich mit Toleranz. `q` und `-q` gelten als gleiche Orientierung.
    pub fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.translation.abs_diff_eq(other.translation, epsilon)
            && self.rotation.dot(other.rotation).abs() >= 1.0 - epsilon
    }
}

/// Verknüpft Eltern-Weltframe und lokales Kind-Offset zur Welttransformation des Kindes.
pub fn compose(parent: &Transform, child_local: &Transform) -> Transform {
    Transform {
        translation: parent.translation + parent.rotation * child_local.translation,
        rotation: (parent.rotation * child_local.rotation).normalize(),
    }
}

/// Inverse einer starren Transformation.
pub fn invert(transform: &Transform) -> Transform {
    let inverse_rotation = transform.rotation.inverse();
    Transform {
        translation: -(inverse_rotation * transform.translation),
        rotation: inverse_rotation,
    }
}

/// Drückt eine Welttransformation relativ zu einem Eltern-Weltframe aus.
///
/// Umkehrung von [`compose`]: `compose(parent, relative_to(world, parent)) == world`.
pub fn relative_to(world: &Transform, parent_world: &Transform) -> Transform {
    compose(&invert(parent_world), world)
}

/// Dreht einen Punkt um die vertikale Achse durch `pivot`.
pub fn rotate_around(point: Vec3, angle: f32, pivot: Vec3) -> Vec3 {
    pivot + Quat::from_rotation_y(angle) * (point - pivot)
}

/// Dreht eine komplette Transformation um `pivot`: Position wandert auf dem Kreisbogen,
/// die Eigenorientierung wächst um denselben Winkel.
pub fn rotate_transform_around(transform: &Transform, angle: f32, pivot: Vec3) -> Transform {
    Transform {
        translation: rotate_around(transform.translation, angle, pivot),
        rotation: (Quat::from_rotation_y(angle) * transform.rotation).normalize(),
    }
}
