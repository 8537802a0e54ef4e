//! Use-Case: Selektion duplizieren.

use crate::app::use_cases::selection::ensure_editable_selection;
use crate::app::AppState;
use crate::core::{BundleId, ElementId, ElementRegistry, SceneError};
use glam::Vec3;
use indexmap::IndexSet;
use std::collections::HashMap;

/// Anzahl der Vorfahren eines Elements.
fn depth(registry: &ElementRegistry, id: ElementId) -> usize {
    let mut depth = 0;
    let mut current = registry.get(id).and_then(|e| e.parent_id);
    while let Some(parent) = current {
        depth += 1;
        if depth > registry.len() {
            break;
        }
        current = registry.get(parent).and_then(|e| e.parent_id);
    }
    depth
}

/// Dupliziert die Selektion.
///
/// Jedes selektierte Bundle-Mitglied zieht sein ganzes Bundle mit, gestapelte
/// Kinder werden mitkopiert. Kopien erhalten neue IDs und neue Bundle-IDs,
/// behalten relative Offsets und sind um `duplicate_offset` auf X und Z versetzt.
/// Service-Tags werden nicht kopiert. Die Kopien ersetzen die Selektion.
pub fn duplicate_selection(state: &mut AppState) -> Result<Vec<ElementId>, SceneError> {
    let selected = ensure_editable_selection(state)?;
    let step = state.options.duplicate_offset;
    let offset = Vec3::new(step, 0.0, step);

    let registry = &state.registry;
    let mut seeds: IndexSet<ElementId> = IndexSet::new();
    for id in selected {
        let Some(element) = registry.get(id) else {
            continue;
        };
        seeds.insert(id);
        if let Some(bundle) = element.bundle_id {
            seeds.extend(registry.bundle_members(bundle));
        }
    }
    let mut sources: IndexSet<ElementId> = seeds.clone();
    for id in &seeds {
        sources.extend(registry.descendants(*id));
    }
    let mut ordered: Vec<ElementId> = sources.iter().copied().collect();
    ordered.sort_by_key(|id| depth(registry, *id));

    state.record_undo_snapshot();
    let registry = state.registry_mut();

    let mut id_map: HashMap<ElementId, ElementId> = HashMap::new();
    let mut bundle_map: HashMap<BundleId, BundleId> = HashMap::new();
    for &old_id in &ordered {
        id_map.insert(old_id, registry.allocate_id());
    }

    for old_id in ordered {
        let Some(original) = registry.get(old_id).cloned() else {
            continue;
        };
        let mut copy = original.clone();
        copy.id = id_map[&old_id];
        copy.service_tag = None;
        copy.bundle_id = original
            .bundle_id
            .map(|b| *bundle_map.entry(b).or_insert_with(|| registry.allocate_bundle_id()));

        match original.parent_id {
            Some(parent) if sources.contains(&parent) => {
                copy.parent_id = Some(id_map[&parent]);
            }
            Some(parent) => {
                // Bleibt auf demselben Host, Versatz im Host-Frame
                let parent_rotation = registry
                    .world_transform(parent)
                    .map(|t| t.rotation)
                    .unwrap_or_default();
                copy.local.translation += parent_rotation.inverse() * offset;
                copy.bound_within_bundle = false;
            }
            None => copy.local.translation += offset,
        }
        registry.insert(copy);
    }

    let copies: Vec<ElementId> = seeds.iter().map(|id| id_map[id]).collect();
    state.selection.replace(copies.iter().copied());
    log::info!(
        "{} Element(e) dupliziert ({} selektiert)",
        id_map.len(),
        copies.len()
    );
    Ok(copies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ElementKind, Transform};

    #[test]
    fn duplicating_bundle_member_copies_whole_bundle() {
        let mut state = AppState::new();
        let registry = state.registry_mut();
        let bundle = registry.allocate_bundle_id();
        let table = registry.place(ElementKind::Table, Transform::IDENTITY, Some(bundle));
        let chair_a = registry.place(
            ElementKind::Chair,
            Transform::from_translation(Vec3::new(0.0, 0.0, -1.0)),
            Some(bundle),
        );
        let chair_b = registry.place(
            ElementKind::Chair,
            Transform::from_translation(Vec3::new(0.0, 0.0, 1.0)),
            Some(bundle),
        );
        state.selection.select_only(chair_a);

        let copies = duplicate_selection(&mut state).expect("Duplikat erwartet");

        assert_eq!(state.registry.len(), 6);
        assert_eq!(copies.len(), 3);
        let new_bundle = state.registry.get(copies[0]).unwrap().bundle_id.unwrap();
        assert_ne!(new_bundle, bundle);
        assert_eq!(state.registry.bundle_members(new_bundle).len(), 3);
        assert_eq!(state.registry.bundle_members(bundle), vec![table, chair_a, chair_b]);
    }

    #[test]
    fn stacked_child_follows_copied_host() {
        let mut state = AppState::new();
        let registry = state.registry_mut();
        let table = registry.place(ElementKind::Table, Transform::IDENTITY, None);
        let vase = registry.place(
            ElementKind::Centerpiece,
            Transform::from_translation(Vec3::new(0.2, 0.75, 0.0)),
            None,
        );
        registry.bind(vase, table).unwrap();
        registry.update(
            table,
            crate::core::ElementPatch {
                service_tag: Some(Some("svc".into())),
                ..Default::default()
            },
        )
        .unwrap();
        state.selection.select_only(table);

        let copies = duplicate_selection(&mut state).unwrap();
        let table_copy = copies[0];
        let copy = state.registry.get(table_copy).unwrap();
        assert_eq!(copy.service_tag, None);

        let vase_copy = state.registry.list_children(table_copy);
        assert_eq!(vase_copy.len(), 1);
        let world = state.registry.world_transform(vase_copy[0]).unwrap();
        assert!(world.translation.abs_diff_eq(Vec3::new(0.7, 0.75, 0.5), 1e-5));
    }
}
