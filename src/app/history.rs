use super::SelectionState;
use crate::core::ElementRegistry;
use std::sync::Arc;

/// Snapshot reduziert auf die für Undo/Redo relevanten Teile.
///
/// Nutzt Arc-Clone (Copy-on-Write): Das Erstellen eines Snapshots ist O(1),
/// der eigentliche Registry-Klon passiert erst beim nächsten `Arc::make_mut()`.
#[derive(Clone)]
pub struct Snapshot {
    /// Registry (Arc-Klon für O(1)-Snapshot)
    pub registry: Arc<ElementRegistry>,
    /// Selektionszustand zum Zeitpunkt des Snapshots
    pub selection: SelectionState,
}

impl Snapshot {
    /// Erstellt einen O(1)-Snapshot durch Arc-Clone statt Deep-Clone.
    pub fn from_state(state: &crate::app::AppState) -> Self {
        Self {
            registry: Arc::clone(&state.registry),
            selection: state.selection.clone(),
        }
    }

    /// Stellt den Snapshot wieder her (O(1) Arc-Zuweisung).
    ///
    /// Selektierte IDs, die im Snapshot nicht existieren, werden verworfen.
    pub fn apply_to(self, state: &mut crate::app::AppState) {
        state.registry = self.registry;
        state.selection = self.selection;
        let registry = Arc::clone(&state.registry);
        state.selection.retain(|id| registry.contains(id));
        if let Some(hovered) = state.view.hovered {
            if !registry.contains(hovered) {
                state.view.hovered = None;
            }
        }
    }
}

/// Undo/Redo-Manager mit Snapshotting.
#[derive(Default)]
pub struct EditHistory {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    max_depth: usize,
}

impl EditHistory {
    /// Erstellt einen neuen History-Manager mit maximaler Tiefe.
    pub fn new_with_capacity(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::with_capacity(max_depth),
            redo_stack: Vec::with_capacity(max_depth),
            max_depth: max_depth.max(1),
        }
    }

    /// Nimmt einen vorbereiteten Snapshot auf und leert den Redo-Stack.
    pub fn record_snapshot(&mut self, snap: Snapshot) {
        if self.undo_stack.len() >= self.max_depth {
            self.undo_stack.remove(0);
        }
        self.undo_stack.push(snap);
        self.redo_stack.clear();
    }

    /// Prüft ob Undo möglich ist.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Prüft ob Redo möglich ist.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Anzahl der Undo-Schritte.
    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    /// Verwirft den gesamten Verlauf (z.B. nach dem Laden einer Szene).
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Ändert die maximale Tiefe; überzählige alte Einträge fallen weg.
    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth.max(1);
        let overflow = self.undo_stack.len().saturating_sub(self.max_depth);
        self.undo_stack.drain(..overflow);
        let overflow = self.redo_stack.len().saturating_sub(self.max_depth);
        self.redo_stack.drain(..overflow);
    }

    /// Holt den letzten Undo-Snapshot und legt `current` auf den Redo-Stack.
    pub fn pop_undo_with_current(&mut self, current: Snapshot) -> Option<Snapshot> {
        let prev = self.undo_stack.pop()?;
        if self.redo_stack.len() >= self.max_depth {
            self.redo_stack.remove(0);
        }
        self.redo_stack.push(current);
        Some(prev)
    }

    /// Holt den letzten Redo-Snapshot und legt `current` auf den Undo-Stack.
    pub fn pop_redo_with_current(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = self.redo_stack.pop()?;
        if self.undo_stack.len() >= self.max_depth {
            self.undo_stack.remove(0);
        }
        self.undo_stack.push(current);
        Some(next)
    }
}
