use crate::core::ElementId;
use indexmap::IndexSet;

/// Geordnete Menge selektierter Elemente.
///
/// Das erste Element ist das primäre Element (Anker für Gruppen-Rotation).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    ids: IndexSet<ElementId>,
}

impl SelectionState {
    /// Erstellt eine leere Selektion.
    pub fn new() -> Self {
        Self::default()
    }

    /// Leert die Selektion und selektiert genau `id`.
    pub fn select_only(&mut self, id: ElementId) {
        self.ids.clear();
        self.ids.insert(id);
    }

    /// Fügt `id` hinzu oder entfernt es. Gibt `true` zurück, wenn `id` danach selektiert ist.
    pub fn toggle(&mut self, id: ElementId) -> bool {
        if self.ids.shift_remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    /// Hebt die Selektion auf.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Ersetzt die Selektion durch `ids` (Reihenfolge bleibt erhalten).
    pub fn replace(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        self.ids = ids.into_iter().collect();
    }

    /// Aktuelle Selektion in Einfüge-Reihenfolge.
    pub fn current(&self) -> &IndexSet<ElementId> {
        &self.ids
    }

    /// Selektierte IDs als Vektor.
    pub fn ids(&self) -> Vec<ElementId> {
        self.ids.iter().copied().collect()
    }

    /// Primäres Element.
    pub fn primary(&self) -> Option<ElementId> {
        self.ids.first().copied()
    }

    /// Ob `id` selektiert ist.
    pub fn contains(&self, id: ElementId) -> bool {
        self.ids.contains(&id)
    }

    /// Entfernt `id`, falls selektiert.
    pub fn remove(&mut self, id: ElementId) -> bool {
        self.ids.shift_remove(&id)
    }

    /// Behält nur IDs, für die `keep` zutrifft.
    pub fn retain(&mut self, mut keep: impl FnMut(ElementId) -> bool) {
        self.ids.retain(|id| keep(*id));
    }

    /// Anzahl selektierter Elemente.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Gibt `true` zurück, wenn nichts selektiert ist.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
