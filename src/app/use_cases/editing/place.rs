//! Use-Case: Katalog-Vorlage an einem Bodenpunkt platzieren.

use crate::app::AppState;
use crate::core::{compose, CatalogItem, ElementId, SceneElement, SceneError, Transform};
use glam::{Vec2, Vec3};
use std::collections::HashSet;

/// Baut ein neues Element aus einer Vorlage.
fn element_from_item(id: ElementId, item: &CatalogItem, world: Transform) -> SceneElement {
    let mut element = SceneElement::new(id, item.kind, world);
    element.name = item.name.clone();
    element.catalog_key = Some(item.key.clone());
    element.dimensions = item.dimensions();
    element.stackable = item.stackable();
    element.stackable_host = item.stackable_host();
    element
}

/// Platziert eine Katalog-Vorlage am Bodenpunkt `ground` mit Gierwinkel `yaw`.
///
/// Sets legen alle Teile mit einer gemeinsamen, neuen Bundle-ID an. Ein
/// stapelbares Anker-Element unter dem ein Host liegt, wird direkt gestapelt.
/// Das Anker-Element ist danach als einziges selektiert.
pub fn place_catalog_item(
    state: &mut AppState,
    item_key: &str,
    ground: Vec2,
    yaw: f32,
) -> Result<ElementId, SceneError> {
    if !ground.is_finite() || !yaw.is_finite() {
        return Err(SceneError::MalformedGeometry(format!(
            "Platzierung bei {ground} mit Winkel {yaw} ist nicht endlich"
        )));
    }
    let item = state.catalog.get(item_key)?.clone();
    let parts: Vec<(CatalogItem, Transform)> = item
        .bundle_parts
        .iter()
        .map(|part| {
            state.catalog.get(&part.item_key).map(|p| {
                (
                    p.clone(),
                    Transform::from_position_yaw(part.offset, part.yaw),
                )
            })
        })
        .collect::<Result<_, _>>()?;

    state.record_undo_snapshot();
    let tie_break = state.options.host_tie_break;
    let snap_to_top = state.options.snap_stacked_to_host_top;
    let registry = state.registry_mut();

    let anchor_world = Transform::from_position_yaw(Vec3::new(ground.x, 0.0, ground.y), yaw);
    let bundle_id = (!parts.is_empty()).then(|| registry.allocate_bundle_id());

    let anchor_id = registry.allocate_id();
    let mut anchor = element_from_item(anchor_id, &item, anchor_world);
    anchor.bundle_id = bundle_id;
    registry.insert(anchor);

    let mut created: HashSet<ElementId> = HashSet::from([anchor_id]);
    for (part_item, offset) in &parts {
        let id = registry.allocate_id();
        let mut element = element_from_item(id, part_item, compose(&anchor_world, offset));
        element.bundle_id = bundle_id;
        registry.insert(element);
        created.insert(id);
    }

    if let Some(host) = registry.find_stacking_host(anchor_id, ground, &created, tie_break) {
        if snap_to_top {
            if let Some(top) = registry.get(host).map(|h| h.top_elevation()) {
                let mut lifted = anchor_world;
                lifted.translation.y = top;
                registry.set_local_transform(anchor_id, lifted);
            }
        }
        if let Err(e) = registry.bind(anchor_id, host) {
            log::warn!("Neues Element {} nicht stapelbar: {}", anchor_id, e);
        }
    }

    state.selection.select_only(anchor_id);
    log::info!(
        "Vorlage '{}' platziert: Element {} ({} Teil(e))",
        item.key,
        anchor_id,
        created.len()
    );
    Ok(anchor_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BundlePart, Catalog, ElementKind};
    use std::f32::consts::FRAC_PI_2;

    fn item(key: &str, kind: ElementKind) -> CatalogItem {
        CatalogItem {
            key: key.into(),
            name: key.into(),
            kind,
            dimensions: None,
            stackable: None,
            stackable_host: None,
            price_cents: 0,
            geometry_ref: None,
            bundle_parts: Vec::new(),
        }
    }

    fn catalog() -> Catalog {
        let mut set = item("table-set", ElementKind::Table);
        set.bundle_parts = vec![
            BundlePart {
                item_key: "chair".into(),
                offset: Vec3::new(0.0, 0.0, -1.0),
                yaw: 0.0,
            },
            BundlePart {
                item_key: "chair".into(),
                offset: Vec3::new(0.0, 0.0, 1.0),
                yaw: std::f32::consts::PI,
            },
        ];
        Catalog::from_items([
            item("chair", ElementKind::Chair),
            item("vase", ElementKind::Centerpiece),
            set,
        ])
    }

    #[test]
    fn bundle_parts_share_fresh_bundle_and_follow_anchor_yaw() {
        let mut state = AppState::new();
        state.catalog = catalog();

        let anchor = place_catalog_item(&mut state, "table-set", Vec2::new(5.0, 5.0), FRAC_PI_2)
            .expect("Platzierung erwartet");

        assert_eq!(state.registry.len(), 3);
        let bundle = state.registry.get(anchor).unwrap().bundle_id.expect("Bundle erwartet");
        assert_eq!(state.registry.bundle_members(bundle).len(), 3);
        // Offset (0,0,-1) um 90° gedreht liegt bei (-1,0,0) relativ zum Anker
        let chair_positions: Vec<Vec3> = state
            .registry
            .bundle_members(bundle)
            .into_iter()
            .filter(|id| *id != anchor)
            .map(|id| state.registry.world_transform(id).unwrap().translation)
            .collect();
        assert!(chair_positions
            .iter()
            .any(|p| p.abs_diff_eq(Vec3::new(4.0, 0.0, 5.0), 1e-5)));
        assert_eq!(state.selection.ids(), vec![anchor]);
        assert!(state.can_undo());
    }

    #[test]
    fn stackable_item_dropped_on_table_is_bound() {
        let mut state = AppState::new();
        state.catalog = catalog();
        let table = place_catalog_item(&mut state, "table-set", Vec2::ZERO, 0.0).unwrap();
        let vase = place_catalog_item(&mut state, "vase", Vec2::new(0.2, 0.1), 0.0).unwrap();

        assert_eq!(state.registry.get(vase).unwrap().parent_id, Some(table));
    }

    #[test]
    fn unknown_bundle_part_places_nothing() {
        let mut state = AppState::new();
        let mut broken = item("broken-set", ElementKind::Table);
        broken.bundle_parts = vec![BundlePart {
            item_key: "missing".into(),
            offset: Vec3::X,
            yaw: 0.0,
        }];
        state.catalog = Catalog::from_items([broken]);

        let result = place_catalog_item(&mut state, "broken-set", Vec2::ZERO, 0.0);
        assert_eq!(result, Err(SceneError::UnknownCatalogItem("missing".into())));
        assert!(state.registry.is_empty());
        assert!(!state.can_undo());
    }
}
