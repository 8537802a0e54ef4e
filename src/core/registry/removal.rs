//! Löschen von Elementen inklusive Kaskade/Abkoppeln gestapelter Kinder.

use super::ElementRegistry;
use crate::core::{ElementId, SceneElement, SceneError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Umgang mit gestapelten Kindern eines gelöschten Hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StackedChildPolicy {
    /// Alle gestapelten Kinder werden mitgelöscht
    #[default]
    Cascade,
    /// Nur Kinder, die als Teil desselben Bundles gestapelt wurden; übrige werden abgekoppelt
    CascadeSameBundle,
    /// Kinder werden abgekoppelt und behalten ihre Weltposition
    Orphan,
}

/// Umfang eines Löschbefehls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteScope {
    /// Nur das Element selbst (plus gestapelte Kinder gemäß Policy)
    #[default]
    Single,
    /// Das gesamte Bundle des Elements
    Bundle,
}

impl ElementRegistry {
    /// Ermittelt alle IDs, die ein Löschbefehl entfernen würde (ohne zu mutieren).
    pub fn removal_set(
        &self,
        ids: &[ElementId],
        scope: DeleteScope,
        policy: StackedChildPolicy,
    ) -> Vec<ElementId> {
        let mut seeds: Vec<ElementId> = Vec::new();
        for &id in ids {
            let Some(element) = self.get(id) else {
                continue;
            };
            match (scope, element.bundle_id) {
                (DeleteScope::Bundle, Some(bundle)) => seeds.extend(self.bundle_members(bundle)),
                _ => seeds.push(id),
            }
        }

        let mut result: Vec<ElementId> = Vec::new();
        let mut seen: HashSet<ElementId> = HashSet::new();
        let mut stack = seeds;
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            result.push(id);
            for child in self.list_children(id) {
                let cascades = match policy {
                    StackedChildPolicy::Cascade => true,
                    StackedChildPolicy::CascadeSameBundle => self
                        .get(child)
                        .map(|c| c.bound_within_bundle)
                        .unwrap_or(false),
                    StackedChildPolicy::Orphan => false,
                };
                if cascades {
                    stack.push(child);
                }
            }
        }
        result.sort_unstable();
        result
    }

    /// Entfernt ein einzelnes Element; gestapelte Kinder folgen der `policy`.
    pub fn remove(
        &mut self,
        id: ElementId,
        policy: StackedChildPolicy,
    ) -> Result<Vec<SceneElement>, SceneError> {
        self.remove_with_scope(&[id], DeleteScope::Single, policy)
    }

    /// Entfernt Elemente mit wählbarem Umfang und liefert alle entfernten Elemente zurück.
    ///
    /// Nicht mitgelöschte Kinder eines entfernten Elements werden abgekoppelt und
    /// behalten ihre absolute Position.
    pub fn remove_with_scope(
        &mut self,
        ids: &[ElementId],
        scope: DeleteScope,
        policy: StackedChildPolicy,
    ) -> Result<Vec<SceneElement>, SceneError> {
        if let Some(missing) = ids.iter().find(|id| !self.contains(**id)) {
            return Err(SceneError::ElementNotFound(*missing));
        }

        let to_remove = self.removal_set(ids, scope, policy);
        let remove_set: HashSet<ElementId> = to_remove.iter().copied().collect();

        let survivors: Vec<ElementId> = self
            .iter()
            .filter(|e| {
                !remove_set.contains(&e.id)
                    && e.parent_id.is_some_and(|p| remove_set.contains(&p))
            })
            .map(|e| e.id)
            .collect();
        for child in survivors {
            self.detach_in_place(child);
            log::debug!("Element {} vom gelöschten Host abgekoppelt", child);
        }

        let removed: Vec<SceneElement> = to_remove
            .iter()
            .filter_map(|id| self.remove_raw(*id))
            .collect();
        log::info!("{} Element(e) entfernt", removed.len());
        Ok(removed)
    }
}
