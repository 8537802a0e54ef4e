//! Extrusion geschlossener Räume zu 3D-Volumen (Boden + Wand-Scheiben).
//!
//! Grundriss-Koordinaten (x, y) werden auf die Bodenebene (x, 0, y) abgebildet.

use super::plan::{Floorplan, DEFAULT_WALL_THICKNESS};
use super::rooms::{signed_area, Room};
use crate::core::SceneError;
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Dreiecksnetz mit flachen Normalen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VolumeMesh {
    /// Vertex-Positionen
    pub positions: Vec<[f32; 3]>,
    /// Vertex-Normalen
    pub normals: Vec<[f32; 3]>,
    /// Dreiecks-Indizes
    pub indices: Vec<u32>,
}

impl VolumeMesh {
    /// Anzahl der Dreiecke.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Achsenparalleler Begrenzungsrahmen `(min, max)`.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut iter = self.positions.iter().map(|p| Vec3::from_array(*p));
        let first = iter.next()?;
        Some(iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }

    fn push_triangle(&mut self, mut tri: [Vec3; 3], normal: Vec3) {
        let face = (tri[1] - tri[0]).cross(tri[2] - tri[0]);
        if face.dot(normal) < 0.0 {
            tri.swap(1, 2);
        }
        let base = self.positions.len() as u32;
        for p in tri {
            self.positions.push(p.to_array());
            self.normals.push(normal.to_array());
        }
        self.indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    fn push_quad(&mut self, quad: [Vec3; 4], normal: Vec3) {
        self.push_triangle([quad[0], quad[1], quad[2]], normal);
        self.push_triangle([quad[0], quad[2], quad[3]], normal);
    }
}

/// Extrudiertes Raumvolumen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    /// Quell-Raum
    pub room: Room,
    /// Wandhöhe in Metern
    pub height: f32,
    /// Erzeugte Geometrie
    pub mesh: VolumeMesh,
}

/// Extrudiert einen Raum: Bodenpolygon plus eine Wand-Scheibe pro Kante.
///
/// Die Dicke einer Kante kommt von der zugehörigen Wand im Grundriss, sonst
/// `default_thickness`.
pub fn extrude(
    room: &Room,
    plan: &Floorplan,
    wall_height: f32,
    default_thickness: f32,
) -> Result<Volume, SceneError> {
    if !(wall_height.is_finite() && wall_height > 0.0) {
        return Err(SceneError::MalformedGeometry(format!(
            "Ungültige Wandhöhe {wall_height}"
        )));
    }
    if room.polygon.len() < 3 {
        return Err(SceneError::MalformedGeometry(
            "Raum mit weniger als drei Ecken".into(),
        ));
    }

    let mut mesh = VolumeMesh::default();
    let to_world = |p: Vec2| Vec3::new(p.x, 0.0, p.y);

    for [a, b, c] in triangulate(&room.polygon)? {
        mesh.push_triangle([to_world(a), to_world(b), to_world(c)], Vec3::Y);
    }

    let n = room.corner_ids.len().min(room.polygon.len());
    for i in 0..n {
        let j = (i + 1) % n;
        let thickness = plan
            .wall_between(room.corner_ids[i], room.corner_ids[j])
            .map(|w| w.thickness)
            .filter(|t| t.is_finite() && *t > 0.0)
            .unwrap_or(if default_thickness > 0.0 {
                default_thickness
            } else {
                DEFAULT_WALL_THICKNESS
            });
        push_wall_slab(&mut mesh, room.polygon[i], room.polygon[j], thickness, wall_height);
    }

    log::debug!(
        "Raum mit {} Ecken extrudiert: {} Dreiecke",
        n,
        mesh.triangle_count()
    );
    Ok(Volume {
        room: room.clone(),
        height: wall_height,
        mesh,
    })
}

/// Extrudiert alle geschlossenen Räume eines Grundrisses.
pub fn extrude_plan(
    plan: &Floorplan,
    wall_height: f32,
    default_thickness: f32,
) -> Result<Vec<Volume>, SceneError> {
    let rooms = super::rooms::close_rooms(plan)?;
    rooms
        .iter()
        .map(|room| extrude(room, plan, wall_height, default_thickness))
        .collect()
}

/// Quader ohne Boden, mittig auf der Kante a→b.
fn push_wall_slab(mesh: &mut VolumeMesh, a: Vec2, b: Vec2, thickness: f32, height: f32) {
    let along = b - a;
    if along.length_squared() <= f32::EPSILON {
        return;
    }
    let dir = along.normalize();
    let side = Vec2::new(-dir.y, dir.x) * (thickness * 0.5);

    let bottom = |p: Vec2| Vec3::new(p.x, 0.0, p.y);
    let top = |p: Vec2| Vec3::new(p.x, height, p.y);
    let (a_l, a_r, b_l, b_r) = (a + side, a - side, b + side, b - side);
    let side_normal = Vec3::new(side.x, 0.0, side.y).normalize();
    let end_normal = Vec3::new(dir.x, 0.0, dir.y);

    mesh.push_quad([bottom(a_l), bottom(b_l), top(b_l), top(a_l)], side_normal);
    mesh.push_quad([bottom(a_r), bottom(b_r), top(b_r), top(a_r)], -side_normal);
    mesh.push_quad([bottom(b_l), bottom(b_r), top(b_r), top(b_l)], end_normal);
    mesh.push_quad([bottom(a_l), bottom(a_r), top(a_r), top(a_l)], -end_normal);
    mesh.push_quad([top(a_l), top(b_l), top(b_r), top(a_r)], Vec3::Y);
}

/// Ear-Clipping eines einfachen Polygons (beliebiger Umlaufsinn).
pub fn triangulate(polygon: &[Vec2]) -> Result<Vec<[Vec2; 3]>, SceneError> {
    let mut ring: Vec<Vec2> = polygon.to_vec();
    if signed_area(&ring) < 0.0 {
        ring.reverse();
    }
    remove_collinear(&mut ring);
    if ring.len() < 3 {
        return Err(SceneError::MalformedGeometry(
            "Entartetes Bodenpolygon".into(),
        ));
    }

    let mut triangles = Vec::with_capacity(ring.len() - 2);
    while ring.len() > 3 {
        let n = ring.len();
        let ear = (0..n).find(|&i| {
            let prev = ring[(i + n - 1) % n];
            let curr = ring[i];
            let next = ring[(i + 1) % n];
            cross(prev, curr, next) > 0.0
                && !ring.iter().enumerate().any(|(k, &p)| {
                    k != i
                        && k != (i + n - 1) % n
                        && k != (i + 1) % n
                        && point_in_triangle(p, prev, curr, next)
                })
        });
        let Some(i) = ear else {
            return Err(SceneError::MalformedGeometry(
                "Bodenpolygon nicht triangulierbar (selbstüberschneidend?)".into(),
            ));
        };
        triangles.push([ring[(i + n - 1) % n], ring[i], ring[(i + 1) % n]]);
        ring.remove(i);
    }
    triangles.push([ring[0], ring[1], ring[2]]);
    Ok(triangles)
}

fn cross(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b - a).perp_dot(c - b)
}

fn point_in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let d1 = (b - a).perp_dot(p - a);
    let d2 = (c - b).perp_dot(p - b);
    let d3 = (a - c).perp_dot(p - c);
    d1 >= 0.0 && d2 >= 0.0 && d3 >= 0.0
}

fn remove_collinear(ring: &mut Vec<Vec2>) {
    let mut i = 0;
    while ring.len() >= 3 && i < ring.len() {
        let n = ring.len();
        let prev = ring[(i + n - 1) % n];
        let next = ring[(i + 1) % n];
        if cross(prev, ring[i], next).abs() <= 1e-6 {
            ring.remove(i);
            i = i.saturating_sub(1);
        } else {
            i += 1;
        }
    }
}
