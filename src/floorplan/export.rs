//! Export extrudierter Volumen als binäres glTF (`.glb`) plus Grundriss-Metadaten.
//!
//! Das Ergebnis wird als Multipart-Formular an die Persistenz übergeben
//! (Modell-Datei, Element-Typ, Name, Metadaten-JSON).

use super::extrude::{extrude_plan, Volume};
use super::plan::{CornerId, Floorplan, Wall};
use crate::core::SceneError;
use gltf::binary::{Glb, Header};
use gltf::json;
use json::accessor::{ComponentType, GenericComponentType, Type};
use json::buffer::Target;
use json::mesh::{Mode, Semantic};
use json::validation::{Checked::Valid, USize64};
use json::Index;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// MIME-Typ des exportierten Modells.
pub const MODEL_CONTENT_TYPE: &str = "model/gltf-binary";
/// Element-Typ des Upload-Formulars.
pub const VOLUME_ELEMENT_TYPE: &str = "venue-volume";

/// Ecke in den Metadaten.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CornerRecord {
    /// Ecken-ID
    pub id: CornerId,
    /// X-Koordinate
    pub x: f32,
    /// Y-Koordinate (Grundriss)
    pub y: f32,
}

/// Metadaten, aus denen der Grundriss später wieder editierbar ist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorplanMetadata {
    /// Alle Ecken
    pub corners: Vec<CornerRecord>,
    /// Alle Wände
    pub walls: Vec<Wall>,
    /// Geschlossene Räume als Ecken-Zyklen
    pub rooms: Vec<Vec<CornerId>>,
    /// Verwendete Wandhöhe
    pub wall_height: f32,
}

impl FloorplanMetadata {
    /// Baut die Metadaten aus Grundriss und Volumen.
    pub fn from_plan(plan: &Floorplan, volumes: &[Volume], wall_height: f32) -> Self {
        Self {
            corners: plan
                .corners()
                .map(|(id, p)| CornerRecord { id, x: p.x, y: p.y })
                .collect(),
            walls: plan.walls().copied().collect(),
            rooms: volumes.iter().map(|v| v.room.corner_ids.clone()).collect(),
            wall_height,
        }
    }

    /// Rekonstruiert den editierbaren Grundriss.
    pub fn to_floorplan(&self) -> anyhow::Result<Floorplan> {
        let json = serde_json::json!({
            "corners": self
                .corners
                .iter()
                .map(|c| (c.id.to_string(), serde_json::json!([c.x, c.y])))
                .collect::<serde_json::Map<_, _>>(),
            "walls": self
                .walls
                .iter()
                .map(|w| Ok((w.id.to_string(), serde_json::to_value(w)?)))
                .collect::<anyhow::Result<serde_json::Map<_, _>>>()?,
        });
        Floorplan::from_json(&json.to_string())
    }
}

/// Exportiertes Modell: GLB-Bytes plus Metadaten.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelAsset {
    /// Binäres glTF
    pub glb: Vec<u8>,
    /// Grundriss-Metadaten
    pub metadata: FloorplanMetadata,
}

/// Multipart-Upload-Vertrag für die Persistenz.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadForm {
    /// Dateiname des Modells
    pub file_name: String,
    /// Modell-Bytes
    pub model_bytes: Vec<u8>,
    /// MIME-Typ
    pub content_type: &'static str,
    /// Element-Typ
    pub element_type: &'static str,
    /// Anzeigename
    pub name: String,
    /// Metadaten als JSON
    pub metadata_json: String,
}

impl UploadForm {
    /// Baut das Formular aus einem exportierten Modell.
    pub fn from_asset(asset: &ModelAsset, name: &str) -> anyhow::Result<Self> {
        let slug: String = name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
            .collect();
        let slug = slug.trim_matches('-');
        let file_stem = if slug.is_empty() { "floorplan" } else { slug };
        Ok(Self {
            file_name: format!("{file_stem}.glb"),
            model_bytes: asset.glb.clone(),
            content_type: MODEL_CONTENT_TYPE,
            element_type: VOLUME_ELEMENT_TYPE,
            name: name.to_string(),
            metadata_json: serde_json::to_string(&asset.metadata)?,
        })
    }

    /// Textfelder des Formulars (ohne Datei-Teil).
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("elementType", self.element_type),
            ("name", self.name.as_str()),
            ("metadata", self.metadata_json.as_str()),
        ]
    }
}

/// Extrudiert alle Räume und exportiert sie als Modell.
///
/// Ein Grundriss ohne geschlossenen Raum liefert [`SceneError::EmptyGeometry`].
pub fn build_model(
    plan: &Floorplan,
    wall_height: f32,
    default_thickness: f32,
) -> Result<ModelAsset, SceneError> {
    let volumes = match extrude_plan(plan, wall_height, default_thickness) {
        Ok(volumes) => volumes,
        Err(SceneError::OpenFloorplan) => return Err(SceneError::EmptyGeometry),
        Err(e) => return Err(e),
    };
    let glb = export_model(&volumes)?;
    let metadata = FloorplanMetadata::from_plan(plan, &volumes, wall_height);
    log::info!(
        "Grundriss exportiert: {} Raum/Räume, {} Bytes",
        volumes.len(),
        glb.len()
    );
    Ok(ModelAsset { glb, metadata })
}

/// Serialisiert Volumen zu einem GLB-Container (ein Mesh pro Volumen).
pub fn export_model(volumes: &[Volume]) -> Result<Vec<u8>, SceneError> {
    if volumes.is_empty() || volumes.iter().all(|v| v.mesh.indices.is_empty()) {
        return Err(SceneError::EmptyGeometry);
    }

    let mut root = json::Root {
        asset: json::Asset {
            generator: Some(concat!("venue-scene-editor ", env!("CARGO_PKG_VERSION")).into()),
            ..Default::default()
        },
        ..Default::default()
    };
    let buffer = root.push(json::Buffer {
        byte_length: USize64(0),
        name: None,
        uri: None,
        extensions: Default::default(),
        extras: Default::default(),
    });
    let mut bin: Vec<u8> = Vec::new();
    let mut nodes = Vec::new();

    for (index, volume) in volumes.iter().enumerate() {
        let mesh = &volume.mesh;
        if mesh.positions.len() != mesh.normals.len()
            || mesh.positions.iter().flatten().any(|c| !c.is_finite())
        {
            return Err(SceneError::MalformedGeometry(format!(
                "Volumen {index}: ungültige Vertex-Daten"
            )));
        }
        if mesh.indices.len() % 3 != 0
            || mesh
                .indices
                .iter()
                .any(|&i| i as usize >= mesh.positions.len())
        {
            return Err(SceneError::MalformedGeometry(format!(
                "Volumen {index}: ungültige Indizes"
            )));
        }
        let Some((min, max)) = mesh.bounds() else {
            continue;
        };

        let position_view = push_view(
            &mut root,
            &mut bin,
            buffer,
            bytemuck::cast_slice(&mesh.positions),
            Target::ArrayBuffer,
        );
        let normal_view = push_view(
            &mut root,
            &mut bin,
            buffer,
            bytemuck::cast_slice(&mesh.normals),
            Target::ArrayBuffer,
        );
        let index_view = push_view(
            &mut root,
            &mut bin,
            buffer,
            bytemuck::cast_slice(&mesh.indices),
            Target::ElementArrayBuffer,
        );

        let position = root.push(accessor(
            position_view,
            ComponentType::F32,
            Type::Vec3,
            mesh.positions.len(),
            Some((min.to_array(), max.to_array())),
        ));
        let normal = root.push(accessor(
            normal_view,
            ComponentType::F32,
            Type::Vec3,
            mesh.normals.len(),
            None,
        ));
        let indices = root.push(accessor(
            index_view,
            ComponentType::U32,
            Type::Scalar,
            mesh.indices.len(),
            None,
        ));

        let name = format!("room-{index}");
        let gltf_mesh = root.push(json::Mesh {
            name: Some(name.clone()),
            primitives: vec![json::mesh::Primitive {
                attributes: BTreeMap::from([
                    (Valid(Semantic::Positions), position),
                    (Valid(Semantic::Normals), normal),
                ]),
                indices: Some(indices),
                material: None,
                mode: Valid(Mode::Triangles),
                targets: None,
                extensions: Default::default(),
                extras: Default::default(),
            }],
            weights: None,
            extensions: Default::default(),
            extras: Default::default(),
        });
        nodes.push(root.push(json::Node {
            mesh: Some(gltf_mesh),
            name: Some(name),
            ..Default::default()
        }));
    }

    let scene = root.push(json::Scene {
        name: None,
        nodes,
        extensions: Default::default(),
        extras: Default::default(),
    });
    root.scene = Some(scene);
    align_to_four(&mut bin);
    root.buffers[buffer.value()].byte_length = USize64::from(bin.len());

    let json_bytes = json::serialize::to_vec(&root)
        .map_err(|e| SceneError::MalformedGeometry(e.to_string()))?;
    let length = 12 + 8 + json_bytes.len().next_multiple_of(4) + 8 + bin.len();
    let glb = Glb {
        header: Header {
            magic: *b"glTF",
            version: 2,
            length: u32::try_from(length)
                .map_err(|_| SceneError::MalformedGeometry("GLB größer als 4 GiB".into()))?,
        },
        json: Cow::Owned(json_bytes),
        bin: Some(Cow::Owned(bin)),
    };
    glb.to_vec()
        .map_err(|e| SceneError::MalformedGeometry(e.to_string()))
}

/// Hängt einen Byte-Bereich an den Binärpuffer an und legt die passende Buffer-View an.
fn push_view(
    root: &mut json::Root,
    bin: &mut Vec<u8>,
    buffer: Index<json::Buffer>,
    bytes: &[u8],
    target: Target,
) -> Index<json::buffer::View> {
    align_to_four(bin);
    let byte_offset = USize64::from(bin.len());
    bin.extend_from_slice(bytes);
    root.push(json::buffer::View {
        buffer,
        byte_length: USize64::from(bytes.len()),
        byte_offset: Some(byte_offset),
        byte_stride: None,
        name: None,
        target: Some(Valid(target)),
        extensions: Default::default(),
        extras: Default::default(),
    })
}

fn accessor(
    view: Index<json::buffer::View>,
    component: ComponentType,
    kind: Type,
    count: usize,
    bounds: Option<([f32; 3], [f32; 3])>,
) -> json::Accessor {
    let (min, max) = match bounds {
        Some((min, max)) => (
            Some(json::Value::from(min.to_vec())),
            Some(json::Value::from(max.to_vec())),
        ),
        None => (None, None),
    };
    json::Accessor {
        buffer_view: Some(view),
        byte_offset: None,
        count: USize64::from(count),
        component_type: Valid(GenericComponentType(component)),
        type_: Valid(kind),
        min,
        max,
        name: None,
        normalized: false,
        sparse: None,
        extensions: Default::default(),
        extras: Default::default(),
    }
}

fn align_to_four(bytes: &mut Vec<u8>) {
    bytes.resize(bytes.len().next_multiple_of(4), 0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn triangle_plan() -> Floorplan {
        let mut plan = Floorplan::new();
        let a = plan.add_corner(Vec2::new(0.0, 0.0));
        let b = plan.add_corner(Vec2::new(6.0, 0.0));
        let c = plan.add_corner(Vec2::new(0.0, 6.0));
        plan.add_wall(a, b, 0.2).unwrap();
        plan.add_wall(b, c, 0.2).unwrap();
        plan.add_wall(c, a, 0.2).unwrap();
        plan
    }

    #[test]
    fn glb_container_parses_back_with_one_room_mesh() {
        let asset = build_model(&triangle_plan(), 3.0, 0.15).expect("Export erwartet");
        let glb = Glb::from_slice(&asset.glb).expect("GLB-Container erwartet");
        assert_eq!(&glb.header.magic, b"glTF");
        assert_eq!(glb.header.version, 2);
        assert_eq!(glb.header.length as usize, asset.glb.len());
        assert_eq!(asset.glb.len() % 4, 0);

        let (document, buffers, _images) =
            gltf::import_slice(&asset.glb).expect("glTF-Import erwartet");
        assert_eq!(document.meshes().count(), 1);
        assert_eq!(document.buffers().count(), 1);
        assert_eq!(buffers.len(), 1);

        let mesh = document.meshes().next().expect("Mesh erwartet");
        assert_eq!(mesh.name(), Some("room-0"));
        let primitive = mesh.primitives().next().expect("Primitive erwartet");
        assert_eq!(primitive.mode(), gltf::mesh::Mode::Triangles);
        assert_eq!(primitive.bounding_box().max[1], 3.0);

        let reader = primitive.reader(|b| Some(&buffers[b.index()]));
        let positions: Vec<[f32; 3]> = reader
            .read_positions()
            .expect("Positionen erwartet")
            .collect();
        let normals = reader.read_normals().expect("Normalen erwartet").count();
        let indices: Vec<u32> = reader
            .read_indices()
            .expect("Indizes erwartet")
            .into_u32()
            .collect();
        assert_eq!(positions.len(), normals);
        assert_eq!(indices.len() % 3, 0);
        assert!(indices.iter().all(|&i| (i as usize) < positions.len()));
    }

    #[test]
    fn open_plan_exports_empty_geometry_error() {
        let mut plan = triangle_plan();
        let wall = plan.walls().next().map(|w| w.id).unwrap();
        plan.remove_wall(wall);
        assert_eq!(build_model(&plan, 3.0, 0.15), Err(SceneError::EmptyGeometry));
        assert_eq!(export_model(&[]), Err(SceneError::EmptyGeometry));
    }

    #[test]
    fn metadata_round_trips_to_editable_plan() {
        let plan = triangle_plan();
        let asset = build_model(&plan, 2.5, 0.15).unwrap();
        assert_eq!(asset.metadata.rooms.len(), 1);
        assert_eq!(asset.metadata.rooms[0].len(), 3);

        let restored = asset.metadata.to_floorplan().expect("Grundriss erwartet");
        assert_eq!(restored.corner_count(), 3);
        assert_eq!(restored.wall_count(), 3);
        for (id, pos) in plan.corners() {
            assert_eq!(restored.corner(id), Some(pos));
        }
    }

    #[test]
    fn upload_form_carries_type_and_name() {
        let asset = build_model(&triangle_plan(), 3.0, 0.15).unwrap();
        let form = UploadForm::from_asset(&asset, "Main Hall").unwrap();
        assert_eq!(form.file_name, "main-hall.glb");
        assert_eq!(form.content_type, "model/gltf-binary");
        assert_eq!(form.element_type, "venue-volume");
        assert_eq!(form.fields()[1], ("name", "Main Hall"));
        assert_eq!(form.model_bytes, asset.glb);
    }
}
