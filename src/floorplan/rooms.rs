//! Raum-Erkennung: verfolgt den planaren Wand-Graphen zu einfachen, geschlossenen Polygonen.
//!
//! Vorgehen:
//! 1. Ungerichtete Adjazenz aus allen Wänden
//! 2. Sackgassen (Grad < 2) und Brücken iterativ entfernen
//! 3. Flächen über Halbkanten verfolgen (an jeder Ecke die nächste Kante im Uhrzeigersinn)
//! 4. Nur gegen den Uhrzeigersinn umlaufene Flächen (positive Fläche) sind Räume;
//!    die Außenfläche jeder Komponente läuft im Uhrzeigersinn und fällt weg.

use super::plan::{CornerId, Floorplan};
use crate::core::SceneError;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};

/// Mindestfläche eines Raums (m²), kleinere Flächen gelten als entartet.
const MIN_ROOM_AREA: f32 = 1e-4;

/// Ein geschlossener Raum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Ecken in Umlaufreihenfolge (gegen den Uhrzeigersinn)
    pub corner_ids: Vec<CornerId>,
    /// Polygon-Punkte passend zu `corner_ids`
    pub polygon: Vec<Vec2>,
    /// Fläche in m²
    pub area: f32,
}

type Adjacency = BTreeMap<CornerId, BTreeSet<CornerId>>;

/// Verfolgt alle geschlossenen Räume des Grundrisses.
///
/// Fehler: [`SceneError::OpenFloorplan`] wenn kein geschlossener Zyklus existiert.
pub fn close_rooms(plan: &Floorplan) -> Result<Vec<Room>, SceneError> {
    let mut adjacency = build_adjacency(plan);
    prune_open_ends(&mut adjacency);

    let mut visited: HashSet<(CornerId, CornerId)> = HashSet::new();
    let mut rooms = Vec::new();
    let half_edges: Vec<(CornerId, CornerId)> = adjacency
        .iter()
        .flat_map(|(&u, ns)| ns.iter().map(move |&v| (u, v)))
        .collect();

    for start in half_edges.iter().copied() {
        if visited.contains(&start) {
            continue;
        }
        let Some(face) = trace_face(plan, &adjacency, start, &mut visited, half_edges.len()) else {
            continue;
        };
        let polygon: Vec<Vec2> = face.iter().filter_map(|id| plan.corner(*id)).collect();
        let area = signed_area(&polygon);
        if area > MIN_ROOM_AREA {
            rooms.push(Room {
                corner_ids: face,
                polygon,
                area,
            });
        }
    }

    if rooms.is_empty() {
        return Err(SceneError::OpenFloorplan);
    }
    log::debug!("{} Raum/Räume erkannt", rooms.len());
    Ok(rooms)
}

/// Vorzeichenbehaftete Fläche (Shoelace). Positiv bei Umlauf gegen den Uhrzeigersinn.
pub fn signed_area(polygon: &[Vec2]) -> f32 {
    let n = polygon.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f32 = (0..n)
        .map(|i| {
            let a = polygon[i];
            let b = polygon[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum();
    twice * 0.5
}

fn build_adjacency(plan: &Floorplan) -> Adjacency {
    let mut adjacency: Adjacency = BTreeMap::new();
    for wall in plan.walls() {
        let (Some(pa), Some(pb)) = (plan.corner(wall.a), plan.corner(wall.b)) else {
            continue;
        };
        if wall.a == wall.b || pa.distance_squared(pb) <= f32::EPSILON {
            continue;
        }
        adjacency.entry(wall.a).or_default().insert(wall.b);
        adjacency.entry(wall.b).or_default().insert(wall.a);
    }
    adjacency
}

/// Entfernt iterativ Sackgassen und Brücken, bis nur noch Kanten auf Zyklen übrig sind.
fn prune_open_ends(adjacency: &mut Adjacency) {
    loop {
        let mut changed = false;

        let dead_ends: Vec<CornerId> = adjacency
            .iter()
            .filter(|(_, ns)| ns.len() < 2)
            .map(|(id, _)| *id)
            .collect();
        for id in dead_ends {
            if let Some(neighbors) = adjacency.remove(&id) {
                for n in neighbors {
                    if let Some(set) = adjacency.get_mut(&n) {
                        set.remove(&id);
                    }
                }
                changed = true;
            }
        }

        let edges: Vec<(CornerId, CornerId)> = adjacency
            .iter()
            .flat_map(|(&u, ns)| ns.iter().filter(move |&&v| u < v).map(move |&v| (u, v)))
            .collect();
        for (u, v) in edges {
            if is_bridge(adjacency, u, v) {
                if let Some(set) = adjacency.get_mut(&u) {
                    set.remove(&v);
                }
                if let Some(set) = adjacency.get_mut(&v) {
                    set.remove(&u);
                }
                changed = true;
            }
        }

        if !changed {
            break;
        }
    }
}

/// Eine Kante ist eine Brücke, wenn `v` ohne sie nicht mehr von `u` erreichbar ist.
fn is_bridge(adjacency: &Adjacency, u: CornerId, v: CornerId) -> bool {
    let mut queue = VecDeque::from([u]);
    let mut seen = HashSet::from([u]);
    while let Some(current) = queue.pop_front() {
        let Some(neighbors) = adjacency.get(&current) else {
            continue;
        };
        for &n in neighbors {
            if current == u && n == v {
                continue;
            }
            if n == v {
                return false;
            }
            if seen.insert(n) {
                queue.push_back(n);
            }
        }
    }
    true
}

fn direction_angle(plan: &Floorplan, from: CornerId, to: CornerId) -> Option<f32> {
    let a = plan.corner(from)?;
    let b = plan.corner(to)?;
    let d = b - a;
    Some(d.y.atan2(d.x))
}

/// Verfolgt die Fläche links der Halbkante `start`.
fn trace_face(
    plan: &Floorplan,
    adjacency: &Adjacency,
    start: (CornerId, CornerId),
    visited: &mut HashSet<(CornerId, CornerId)>,
    max_steps: usize,
) -> Option<Vec<CornerId>> {
    let mut face = Vec::new();
    let (mut u, mut v) = start;

    for _ in 0..=max_steps {
        visited.insert((u, v));
        face.push(u);

        let back = direction_angle(plan, v, u)?;
        let neighbors = adjacency.get(&v)?;
        let candidates: Vec<(f32, CornerId)> = neighbors
            .iter()
            .filter(|&&w| w != u || neighbors.len() == 1)
            .filter_map(|&w| direction_angle(plan, v, w).map(|a| (a, w)))
            .collect();

        // Nächste Kante im Uhrzeigersinn nach der Rückkante
        let next = candidates
            .iter()
            .filter(|(a, _)| *a < back)
            .max_by(|x, y| x.0.total_cmp(&y.0))
            .or_else(|| candidates.iter().max_by(|x, y| x.0.total_cmp(&y.0)))
            .map(|(_, w)| *w)?;

        u = v;
        v = next;
        if (u, v) == start {
            return Some(face);
        }
    }

    log::warn!("Flächenverfolgung ab {:?} nicht geschlossen", start);
    None
}
