//! Orbit-Kamera der 3D-Szene (Ziel, Gierwinkel, Neigung, Abstand).
//!
//! Wird mit der Szene persistiert; der Renderer leitet daraus die View-Matrix ab.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Orbit-Kamera um einen Zielpunkt
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitCamera {
    /// Zielpunkt in Weltkoordinaten
    pub target: Vec3,
    /// Gierwinkel um +Y (Radiant)
    pub yaw: f32,
    /// Neigung über der Bodenebene (Radiant)
    pub pitch: f32,
    /// Abstand zum Ziel in Metern
    pub distance: f32,
}

impl OrbitCamera {
    /// Minimaler Abstand zum Ziel.
    pub const DISTANCE_MIN: f32 = 1.0;
    /// Maximaler Abstand zum Ziel.
    pub const DISTANCE_MAX: f32 = 200.0;
    /// Minimale Neigung (knapp über dem Boden).
    pub const PITCH_MIN: f32 = 0.05;
    /// Maximale Neigung (knapp unter der Draufsicht).
    pub const PITCH_MAX: f32 = 1.55;

    /// Erstellt die Standard-Kamera (schräge Aufsicht auf den Ursprung).
    pub fn new() -> Self {
        Self {
            target: Vec3::ZERO,
            yaw: std::f32::consts::FRAC_PI_4,
            pitch: 0.8,
            distance: 20.0,
        }
    }

    /// Dreht die Kamera um das Ziel.
    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw = (self.yaw + delta_yaw).rem_euclid(std::f32::consts::TAU);
        self.pitch = (self.pitch + delta_pitch).clamp(Self::PITCH_MIN, Self::PITCH_MAX);
    }

    /// Verschiebt Ziel und Kamera parallel zur Bodenebene.
    pub fn pan(&mut self, delta: Vec3) {
        self.target += Vec3::new(delta.x, 0.0, delta.z);
    }

    /// Ändert den Abstand multiplikativ (Faktor > 1 zoomt heran).
    pub fn zoom_by(&mut self, factor: f32) {
        if factor.is_finite() && factor > 0.0 {
            self.distance = (self.distance / factor).clamp(Self::DISTANCE_MIN, Self::DISTANCE_MAX);
        }
    }

    /// Position der Kamera in Weltkoordinaten.
    pub fn eye(&self) -> Vec3 {
        let horizontal = self.distance * self.pitch.cos();
        self.target
            + Vec3::new(
                horizontal * self.yaw.sin(),
                self.distance * self.pitch.sin(),
                horizontal * self.yaw.cos(),
            )
    }

    /// View-Matrix (rechtshändig, Y oben).
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    /// Gibt `true` zurück, wenn alle Werte endlich sind.
    pub fn is_finite(&self) -> bool {
        self.target.is_finite()
            && self.yaw.is_finite()
            && self.pitch.is_finite()
            && self.distance.is_finite()
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}
