use super::*;
use crate::core::transform::compose;
use crate::core::ElementKind;
use glam::{Vec2, Vec3};
use std::f32::consts::FRAC_PI_2;

const EPS: f32 = 1e-4;

fn table_at(registry: &mut ElementRegistry, x: f32, z: f32) -> ElementId {
    registry.place(
        ElementKind::Table,
        Transform::from_translation(Vec3::new(x, 0.0, z)),
        None,
    )
}

fn centerpiece_at(registry: &mut ElementRegistry, x: f32, z: f32) -> ElementId {
    registry.place(
        ElementKind::Centerpiece,
        Transform::from_translation(Vec3::new(x, 0.75, z)),
        None,
    )
}

#[test]
fn test_place_and_get() {
    let mut registry = ElementRegistry::new();
    let id = table_at(&mut registry, 1.0, 2.0);

    let element = registry.get(id).expect("Element erwartet");
    assert_eq!(element.kind, ElementKind::Table);
    assert!(element.stackable_host);
    assert_eq!(element.world().translation, Vec3::new(1.0, 0.0, 2.0));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_ids_are_never_reused() {
    let mut registry = ElementRegistry::new();
    let a = table_at(&mut registry, 0.0, 0.0);
    registry
        .remove(a, StackedChildPolicy::Cascade)
        .expect("Entfernen erwartet");
    let b = table_at(&mut registry, 0.0, 0.0);
    assert_ne!(a, b);
}

#[test]
fn test_locked_element_rejects_transform_update_but_allows_metadata() {
    let mut registry = ElementRegistry::new();
    let id = table_at(&mut registry, 0.0, 0.0);
    registry
        .update(
            id,
            ElementPatch {
                locked: Some(true),
                ..Default::default()
            },
        )
        .expect("Sperren erwartet");

    let result = registry.update(
        id,
        ElementPatch {
            world: Some(Transform::from_translation(Vec3::X)),
            ..Default::default()
        },
    );
    assert_eq!(result, Err(SceneError::LockedElement(id)));

    registry
        .update(
            id,
            ElementPatch {
                service_tag: Some(Some("catering".into())),
                ..Default::default()
            },
        )
        .expect("Metadaten-Update erwartet");
    assert_eq!(
        registry.get(id).unwrap().service_tag.as_deref(),
        Some("catering")
    );
}

#[test]
fn test_bind_then_unbind_preserves_absolute_transform() {
    let mut registry = ElementRegistry::new();
    let host = registry.place(
        ElementKind::Table,
        Transform::from_position_yaw(Vec3::new(3.0, 0.0, -1.0), 0.6),
        None,
    );
    let child = registry.place(
        ElementKind::Centerpiece,
        Transform::from_position_yaw(Vec3::new(3.4, 0.75, -0.8), -0.2),
        None,
    );
    let before = registry.world_transform(child).unwrap();

    registry.bind(child, host).expect("Bindung erwartet");
    assert_eq!(registry.get(child).unwrap().parent_id, Some(host));
    assert!(registry.world_transform(child).unwrap().abs_diff_eq(&before, EPS));

    let baked = registry.unbind(child).expect("Lösen erwartet");
    assert!(baked.abs_diff_eq(&before, EPS));
    assert_eq!(registry.get(child).unwrap().parent_id, None);
}

#[test]
fn test_world_equals_compose_after_parent_moves() {
    let mut registry = ElementRegistry::new();
    let host = table_at(&mut registry, 0.0, 0.0);
    let child = centerpiece_at(&mut registry, 0.5, -0.2);
    registry.bind(child, host).unwrap();

    for step in 0..25 {
        let angle = step as f32 * 0.37;
        registry
            .update(
                host,
                ElementPatch {
                    world: Some(Transform::from_position_yaw(
                        Vec3::new(step as f32 * 0.1, 0.0, -(step as f32) * 0.3),
                        angle,
                    )),
                    ..Default::default()
                },
            )
            .unwrap();

        let host_world = registry.world_transform(host).unwrap();
        let offset = registry.relative_offset(child).unwrap();
        let expected = compose(&host_world, &offset);
        assert!(registry
            .world_transform(child)
            .unwrap()
            .abs_diff_eq(&expected, EPS));
    }

    // Offset selbst bleibt unverändert (keine Drift)
    let offset = registry.relative_offset(child).unwrap();
    assert!(offset.translation.abs_diff_eq(Vec3::new(0.5, 0.75, -0.2), EPS));
}

#[test]
fn test_parent_rotation_moves_child_along_arc() {
    let mut registry = ElementRegistry::new();
    let host = table_at(&mut registry, 0.0, 0.0);
    let child = centerpiece_at(&mut registry, 0.0, -0.4);
    registry.bind(child, host).unwrap();

    registry
        .update(
            host,
            ElementPatch {
                world: Some(Transform::from_position_yaw(Vec3::ZERO, FRAC_PI_2)),
                ..Default::default()
            },
        )
        .unwrap();

    let world = registry.world_transform(child).unwrap();
    let radial = Vec2::new(world.translation.x, world.translation.z);
    assert!((radial.length() - 0.4).abs() < EPS);
    assert!(world.translation.z.abs() < EPS);
    assert!((world.yaw() - FRAC_PI_2).abs() < EPS);
}

#[test]
fn test_bind_rejects_non_host_and_cycles() {
    let mut registry = ElementRegistry::new();
    let chair = registry.place(ElementKind::Chair, Transform::IDENTITY, None);
    let piece = centerpiece_at(&mut registry, 0.0, 0.0);

    assert_eq!(
        registry.bind(piece, chair),
        Err(SceneError::InvalidStackingTarget(chair))
    );

    let outer = table_at(&mut registry, 0.0, 0.0);
    let inner = table_at(&mut registry, 0.0, 0.0);
    registry.get_mut(inner).unwrap().stackable = true;
    registry.get_mut(outer).unwrap().stackable = true;
    registry.bind(inner, outer).unwrap();
    assert_eq!(
        registry.bind(outer, inner),
        Err(SceneError::InvalidStackingTarget(inner))
    );
}

#[test]
fn test_find_host_prefers_smallest_footprint() {
    let mut registry = ElementRegistry::new();
    let big = table_at(&mut registry, 0.0, 0.0);
    registry.get_mut(big).unwrap().dimensions = Vec3::new(4.0, 0.75, 4.0);
    let small = table_at(&mut registry, 0.2, 0.0);
    registry.get_mut(small).unwrap().dimensions = Vec3::new(1.0, 0.75, 1.0);
    let piece = centerpiece_at(&mut registry, 5.0, 5.0);

    let host = registry.find_stacking_host(
        piece,
        Vec2::new(0.3, 0.1),
        &HashSet::new(),
        HostTieBreak::SmallestFootprint,
    );
    assert_eq!(host, Some(small));

    let none = registry.find_stacking_host(
        piece,
        Vec2::new(10.0, 10.0),
        &HashSet::new(),
        HostTieBreak::SmallestFootprint,
    );
    assert_eq!(none, None);
}

#[test]
fn test_delete_host_cascades_stacked_children_but_not_bundle_siblings() {
    let mut registry = ElementRegistry::new();
    let bundle = registry.allocate_bundle_id();
    let table = registry.place(ElementKind::Table, Transform::IDENTITY, Some(bundle));
    let chair = registry.place(
        ElementKind::Chair,
        Transform::from_translation(Vec3::new(1.2, 0.0, 0.0)),
        Some(bundle),
    );
    let piece = centerpiece_at(&mut registry, 0.1, 0.0);
    registry.bind(piece, table).unwrap();

    let removed = registry
        .remove(table, StackedChildPolicy::Cascade)
        .expect("Löschen erwartet");
    let removed_ids: Vec<ElementId> = removed.iter().map(|e| e.id).collect();

    assert_eq!(removed_ids, vec![table, piece]);
    assert!(registry.contains(chair));
}

#[test]
fn test_orphan_policy_keeps_child_world_position() {
    let mut registry = ElementRegistry::new();
    let table = registry.place(
        ElementKind::Table,
        Transform::from_position_yaw(Vec3::new(2.0, 0.0, 2.0), 0.8),
        None,
    );
    let piece = centerpiece_at(&mut registry, 2.2, 2.1);
    registry.bind(piece, table).unwrap();
    let before = registry.world_transform(piece).unwrap();

    registry.remove(table, StackedChildPolicy::Orphan).unwrap();

    let element = registry.get(piece).expect("Kind bleibt erhalten");
    assert_eq!(element.parent_id, None);
    assert!(element.world().abs_diff_eq(&before, EPS));
}

#[test]
fn test_cascade_same_bundle_only_takes_bundle_bound_children() {
    let mut registry = ElementRegistry::new();
    let bundle = registry.allocate_bundle_id();
    let table = registry.place(ElementKind::Table, Transform::IDENTITY, Some(bundle));
    let bundled_piece = registry.place(
        ElementKind::Centerpiece,
        Transform::from_translation(Vec3::new(0.1, 0.75, 0.0)),
        Some(bundle),
    );
    let loose_piece = centerpiece_at(&mut registry, -0.1, 0.0);
    registry.bind(bundled_piece, table).unwrap();
    registry.bind(loose_piece, table).unwrap();

    registry
        .remove(table, StackedChildPolicy::CascadeSameBundle)
        .unwrap();

    assert!(!registry.contains(bundled_piece));
    assert!(registry.contains(loose_piece));
    assert_eq!(registry.get(loose_piece).unwrap().parent_id, None);
}

#[test]
fn test_bundle_scope_removes_all_members() {
    let mut registry = ElementRegistry::new();
    let bundle = registry.allocate_bundle_id();
    let a = registry.place(ElementKind::Table, Transform::IDENTITY, Some(bundle));
    let b = registry.place(ElementKind::Chair, Transform::IDENTITY, Some(bundle));
    let other = table_at(&mut registry, 5.0, 5.0);

    registry
        .remove_with_scope(&[a], DeleteScope::Bundle, StackedChildPolicy::Cascade)
        .unwrap();

    assert!(!registry.contains(a));
    assert!(!registry.contains(b));
    assert!(registry.contains(other));
}

#[test]
fn test_refresh_heals_orphaned_parent_reference() {
    let mut registry = ElementRegistry::new();
    let piece = centerpiece_at(&mut registry, 1.0, 1.0);
    registry.get_mut(piece).unwrap().parent_id = Some(999);

    let healed = registry.refresh_world_transforms();

    assert_eq!(
        healed,
        vec![SceneError::OrphanedParentReference {
            child: piece,
            parent: 999
        }]
    );
    assert_eq!(registry.get(piece).unwrap().parent_id, None);
}

#[test]
fn test_refresh_detaches_children_of_non_hosts_in_place() {
    let mut registry = ElementRegistry::new();
    let chair = registry.place(
        ElementKind::Chair,
        Transform::from_position_yaw(Vec3::new(2.0, 0.0, 0.0), FRAC_PI_2),
        None,
    );
    let table = table_at(&mut registry, 5.0, 0.0);
    let piece = centerpiece_at(&mut registry, 0.0, 0.0);
    let other = table_at(&mut registry, 8.0, 0.0);
    {
        let element = registry.get_mut(piece).unwrap();
        element.parent_id = Some(chair);
        element.local = Transform::from_translation(Vec3::new(0.5, 0.4, 0.0));
    }
    registry.get_mut(other).unwrap().parent_id = Some(table);

    let healed = registry.refresh_world_transforms();

    assert_eq!(
        healed,
        vec![
            SceneError::InvalidStackingTarget(chair),
            SceneError::NotStackable(other)
        ]
    );
    assert_eq!(registry.get(piece).unwrap().parent_id, None);
    assert_eq!(registry.get(other).unwrap().parent_id, None);
    // Weltposition unter dem gedrehten Stuhl bleibt erhalten
    let world = registry.world_transform(piece).unwrap();
    assert!(world.translation.abs_diff_eq(Vec3::new(2.0, 0.4, -0.5), EPS));
    assert!(registry.get(piece).unwrap().local.abs_diff_eq(&world, EPS));
}

#[test]
fn test_refresh_breaks_parent_cycles() {
    let mut registry = ElementRegistry::new();
    let a = table_at(&mut registry, 0.0, 0.0);
    let b = table_at(&mut registry, 1.0, 0.0);
    // Stapelbare Hosts, damit nur der Zyklus geheilt wird
    for (id, parent) in [(a, b), (b, a)] {
        let element = registry.get_mut(id).unwrap();
        element.parent_id = Some(parent);
        element.stackable = true;
    }

    let healed = registry.refresh_world_transforms();

    assert_eq!(healed.len(), 1);
    let roots = [a, b]
        .iter()
        .filter(|id| registry.get(**id).unwrap().parent_id.is_none())
        .count();
    assert_eq!(roots, 1);
}
