//! Die zentrale Element-Registry: besitzt alle platzierten Elemente der Szene.

mod removal;
mod stacking;

#[cfg(test)]
mod tests;

pub use removal::{DeleteScope, StackedChildPolicy};
pub use stacking::HostTieBreak;

use super::transform::{compose, relative_to};
use super::{BundleId, ElementId, ElementKind, ElementPatch, SceneElement, SceneError, Transform};
use std::collections::{HashMap, HashSet, VecDeque};

/// Container für alle Szenen-Elemente mit abgeleiteten Welttransformationen.
#[derive(Debug, Clone, Default)]
pub struct ElementRegistry {
    elements: HashMap<ElementId, SceneElement>,
    next_id: ElementId,
    next_bundle_id: BundleId,
}

impl ElementRegistry {
    /// Erstellt eine leere Registry.
    pub fn new() -> Self {
        Self {
            elements: HashMap::new(),
            next_id: 1,
            next_bundle_id: 1,
        }
    }

    /// Platziert ein neues Wurzel-Element mit den Standardwerten seiner Art.
    pub fn place(
        &mut self,
        kind: ElementKind,
        world: Transform,
        bundle_id: Option<BundleId>,
    ) -> ElementId {
        let id = self.allocate_id();
        let mut element = SceneElement::new(id, kind, world);
        element.bundle_id = bundle_id;
        self.elements.insert(id, element);
        id
    }

    /// Fügt ein vollständig vorbereitetes Element ein (Laden, Duplizieren).
    ///
    /// Die ID des Elements bleibt erhalten; die Welttransformation wird neu abgeleitet.
    pub fn insert(&mut self, element: SceneElement) -> ElementId {
        let id = element.id;
        self.next_id = self.next_id.max(id + 1);
        if let Some(bundle) = element.bundle_id {
            self.next_bundle_id = self.next_bundle_id.max(bundle + 1);
        }
        self.elements.insert(id, element);
        self.propagate_from(id);
        id
    }

    /// Reserviert die nächste freie Element-ID (IDs werden nie wiederverwendet).
    pub fn allocate_id(&mut self) -> ElementId {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        id
    }

    /// Reserviert eine neue Bundle-ID.
    pub fn allocate_bundle_id(&mut self) -> BundleId {
        let id = self.next_bundle_id.max(1);
        self.next_bundle_id = id + 1;
        id
    }

    /// Liefert ein Element.
    pub fn get(&self, id: ElementId) -> Option<&SceneElement> {
        self.elements.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: ElementId) -> Option<&mut SceneElement> {
        self.elements.get_mut(&id)
    }

    /// Prüft ob ein Element existiert.
    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    /// Anzahl der Elemente.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Gibt `true` zurück, wenn keine Elemente vorhanden sind.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterator über alle Elemente (ungeordnet).
    pub fn iter(&self) -> impl Iterator<Item = &SceneElement> {
        self.elements.values()
    }

    /// Alle IDs aufsteigend sortiert (deterministische Reihenfolge für Export/Rendering).
    pub fn ids_sorted(&self) -> Vec<ElementId> {
        let mut ids: Vec<ElementId> = self.elements.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Welttransformation eines Elements.
    pub fn world_transform(&self, id: ElementId) -> Option<Transform> {
        self.elements.get(&id).map(|e| e.world)
    }

    /// Direkte Kinder eines Elements (sortiert).
    pub fn list_children(&self, id: ElementId) -> Vec<ElementId> {
        let mut children: Vec<ElementId> = self
            .elements
            .values()
            .filter(|e| e.parent_id == Some(id))
            .map(|e| e.id)
            .collect();
        children.sort_unstable();
        children
    }

    /// Alle Nachfahren in Breitensuche-Reihenfolge (ohne das Element selbst).
    pub fn descendants(&self, id: ElementId) -> Vec<ElementId> {
        let child_map = self.child_map();
        let mut result = Vec::new();
        let mut queue = VecDeque::from([id]);
        let mut visited = HashSet::from([id]);
        while let Some(current) = queue.pop_front() {
            if let Some(children) = child_map.get(&current) {
                for &child in children {
                    if visited.insert(child) {
                        result.push(child);
                        queue.push_back(child);
                    }
                }
            }
        }
        result
    }

    /// Prüft ob `candidate` ein (indirektes) Kind von `ancestor` ist.
    pub fn is_descendant_of(&self, candidate: ElementId, ancestor: ElementId) -> bool {
        let mut current = self.elements.get(&candidate).and_then(|e| e.parent_id);
        let mut steps = 0;
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            steps += 1;
            if steps > self.elements.len() {
                return false;
            }
            current = self.elements.get(&parent).and_then(|e| e.parent_id);
        }
        false
    }

    /// Alle Mitglieder eines Bundles (sortiert).
    pub fn bundle_members(&self, bundle_id: BundleId) -> Vec<ElementId> {
        let mut members: Vec<ElementId> = self
            .elements
            .values()
            .filter(|e| e.bundle_id == Some(bundle_id))
            .map(|e| e.id)
            .collect();
        members.sort_unstable();
        members
    }

    /// Wendet ein Teil-Update an.
    ///
    /// Gesperrte Elemente lehnen Transform-Felder mit [`SceneError::LockedElement`] ab;
    /// reine Metadaten (Name, Tag, Sperre) sind immer erlaubt.
    pub fn update(&mut self, id: ElementId, patch: ElementPatch) -> Result<(), SceneError> {
        let element = self
            .elements
            .get(&id)
            .ok_or(SceneError::ElementNotFound(id))?;
        if element.locked && patch.touches_transform() {
            return Err(SceneError::LockedElement(id));
        }

        let new_local = match patch.world {
            Some(world) => Some(self.local_for_world(id, &world)),
            None => None,
        };

        let element = self
            .elements
            .get_mut(&id)
            .ok_or(SceneError::ElementNotFound(id))?;
        if let Some(dimensions) = patch.dimensions {
            element.dimensions = dimensions;
        }
        if let Some(name) = patch.name {
            element.name = name;
        }
        if let Some(tag) = patch.service_tag {
            element.service_tag = tag;
        }
        if let Some(locked) = patch.locked {
            element.locked = locked;
        }
        if let Some(local) = new_local {
            element.local = local;
            self.propagate_from(id);
        }
        Ok(())
    }

    /// Setzt die lokale Transformation ohne Sperr-Prüfung und propagiert auf alle Nachfahren.
    ///
    /// Aufrufer (Interaktion) haben die Selektion bereits gegen Sperren geprüft.
    pub(crate) fn set_local_transform(&mut self, id: ElementId, local: Transform) {
        if let Some(element) = self.elements.get_mut(&id) {
            element.local = local;
            self.propagate_from(id);
        }
    }

    /// Rechnet eine gewünschte Welttransformation in den Frame des Parents um.
    pub(crate) fn local_for_world(&self, id: ElementId, world: &Transform) -> Transform {
        let parent_world = self
            .elements
            .get(&id)
            .and_then(|e| e.parent_id)
            .and_then(|p| self.elements.get(&p))
            .map(|p| p.world);
        match parent_world {
            Some(parent_world) => relative_to(world, &parent_world),
            None => *world,
        }
    }

    /// Berechnet die Welttransformationen ab `id` (inklusive) für den gesamten Teilbaum neu.
    ///
    /// Ein Nachfahre mit nicht-endlichem Ergebnis behält seine letzte gültige
    /// Transformation; die Propagation läuft für die übrigen weiter.
    pub(crate) fn propagate_from(&mut self, id: ElementId) {
        let child_map = self.child_map();
        let mut queue = VecDeque::from([id]);
        let mut visited = HashSet::new();

        while let Some(current) = queue.pop_front() {
            if !visited.insert(current) {
                continue;
            }
            let Some(element) = self.elements.get(&current) else {
                continue;
            };
            let parent_world = element
                .parent_id
                .and_then(|p| self.elements.get(&p))
                .map(|p| p.world);
            let candidate = match parent_world {
                Some(parent_world) => compose(&parent_world, &element.local),
                None => element.local,
            };

            if candidate.is_finite() {
                if let Some(element) = self.elements.get_mut(&current) {
                    element.world = candidate;
                }
            } else {
                log::warn!(
                    "Propagation für Element {} fehlgeschlagen, letzte gültige Transformation bleibt",
                    current
                );
            }

            if let Some(children) = child_map.get(&current) {
                queue.extend(children.iter().copied());
            }
        }
    }

    /// Berechnet alle Welttransformationen neu und heilt ungültige Eltern-Referenzen.
    ///
    /// Verweise auf fehlende Parents, nicht von einer Wurzel erreichbare
    /// Elemente (Zyklen) und Kinder unter Nicht-Hosts werden abgekoppelt.
    /// Die geheilten Fälle werden zurückgegeben.
    pub fn refresh_world_transforms(&mut self) -> Vec<SceneError> {
        let mut healed = Vec::new();

        let orphans: Vec<(ElementId, ElementId)> = self
            .elements
            .values()
            .filter_map(|e| {
                let parent = e.parent_id?;
                (!self.elements.contains_key(&parent)).then_some((e.id, parent))
            })
            .collect();
        for (child, parent) in orphans {
            log::warn!(
                "Element {} verweist auf fehlendes Eltern-Element {}, wird abgekoppelt",
                child,
                parent
            );
            self.clear_parent(child);
            healed.push(SceneError::OrphanedParentReference { child, parent });
        }

        let roots: Vec<ElementId> = self
            .elements
            .values()
            .filter(|e| e.parent_id.is_none())
            .map(|e| e.id)
            .collect();
        let mut reachable: HashSet<ElementId> = HashSet::new();
        for root in &roots {
            self.propagate_from(*root);
            reachable.insert(*root);
            reachable.extend(self.descendants(*root));
        }

        // Nicht erreichbare Elemente hängen in einem Zyklus
        let mut unreachable: Vec<ElementId> = self
            .elements
            .keys()
            .filter(|id| !reachable.contains(id))
            .copied()
            .collect();
        unreachable.sort_unstable();
        for id in unreachable {
            if reachable.contains(&id) {
                continue;
            }
            let Some(parent) = self.elements.get(&id).and_then(|e| e.parent_id) else {
                continue;
            };
            log::warn!("Element {} hängt in einem Eltern-Zyklus, wird abgekoppelt", id);
            self.clear_parent(id);
            self.propagate_from(id);
            reachable.insert(id);
            reachable.extend(self.descendants(id));
            healed.push(SceneError::OrphanedParentReference { child: id, parent });
        }

        // Bindungen, die `bind` nie erzeugt hätte, behalten ihre Weltposition
        let mut invalid: Vec<(ElementId, SceneError)> = self
            .elements
            .values()
            .filter_map(|e| {
                let parent = self.elements.get(&e.parent_id?)?;
                if !parent.stackable_host {
                    Some((e.id, SceneError::InvalidStackingTarget(parent.id)))
                } else if !e.stackable {
                    Some((e.id, SceneError::NotStackable(e.id)))
                } else {
                    None
                }
            })
            .collect();
        invalid.sort_unstable_by_key(|(id, _)| *id);
        for (child, error) in invalid {
            log::warn!("Element {}: {}, wird abgekoppelt", child, error);
            self.detach_in_place(child);
            self.propagate_from(child);
            healed.push(error);
        }

        healed
    }

    /// Entfernt die Eltern-Referenz und übernimmt die letzte Welttransformation als autoritativ.
    pub(crate) fn detach_in_place(&mut self, id: ElementId) {
        if let Some(element) = self.elements.get_mut(&id) {
            if element.parent_id.is_some() {
                element.local = if element.world.is_finite() {
                    element.world
                } else {
                    element.local
                };
            }
            element.parent_id = None;
            element.bound_within_bundle = false;
        }
    }

    /// Entfernt die Eltern-Referenz ohne gültige Welttransformation: das Offset wird absolut.
    fn clear_parent(&mut self, id: ElementId) {
        if let Some(element) = self.elements.get_mut(&id) {
            element.parent_id = None;
            element.bound_within_bundle = false;
        }
    }

    fn child_map(&self) -> HashMap<ElementId, Vec<ElementId>> {
        let mut map: HashMap<ElementId, Vec<ElementId>> = HashMap::new();
        for element in self.elements.values() {
            if let Some(parent) = element.parent_id {
                map.entry(parent).or_default().push(element.id);
            }
        }
        for children in map.values_mut() {
            children.sort_unstable();
        }
        map
    }

    pub(crate) fn remove_raw(&mut self, id: ElementId) -> Option<SceneElement> {
        self.elements.remove(&id)
    }
}
