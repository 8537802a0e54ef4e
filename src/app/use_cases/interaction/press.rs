//! Use-Case: Drücken, Bewegen, Loslassen und Abbrechen einer Pointer-Geste.

use super::{drag, rotate};
use crate::app::{AppState, InteractionState, PressState};
use crate::core::ElementId;
use glam::Vec2;

/// Beginnt eine Geste (`Idle → Selecting`) und löst die Klick-Selektion auf.
///
/// - leere Fläche: Selektion wird immer geleert, unabhängig von Modifiern
/// - mit Toggle (Shift): Element hinzufügen/entfernen
/// - ohne Toggle auf bereits selektiertem Element: `select_only` erst beim
///   Loslassen, damit die ganze Selektion gezogen werden kann
pub fn begin_press(
    state: &mut AppState,
    hit: Option<ElementId>,
    screen: Vec2,
    ground: Vec2,
    toggle: bool,
) {
    if state.interaction.is_transforming() {
        log::debug!("Pointer-Down während laufender Geste ignoriert");
        return;
    }

    let hit = hit.filter(|id| state.registry.contains(*id));
    let mut deferred_select_only = None;
    match hit {
        None => state.selection.clear(),
        Some(id) if toggle => {
            state.selection.toggle(id);
        }
        Some(id) if state.selection.contains(id) => deferred_select_only = Some(id),
        Some(id) => state.selection.select_only(id),
    }

    state.interaction = InteractionState::Selecting(PressState {
        hit,
        start_screen: screen,
        start_ground: ground,
        deferred_select_only,
    });
}

/// Verarbeitet eine Pointer-Bewegung im aktuellen Zustand.
///
/// Im Zustand `Selecting` wird ab der Drag-Schwelle versucht, das Ziehen zu
/// beginnen. Scheitert der Einstieg (gesperrtes Element, Job läuft), kehrt der
/// Automat nach `Idle` zurück und der Fehler wird zurückgegeben.
pub fn update_pointer(state: &mut AppState, screen: Vec2, ground: Vec2) -> anyhow::Result<()> {
    match &state.interaction {
        InteractionState::Idle => Ok(()),
        InteractionState::Selecting(press) => {
            let Some(hit) = press.hit else {
                return Ok(());
            };
            let beyond_threshold =
                press.start_screen.distance(screen) > state.options.drag_threshold_px;
            if !beyond_threshold || !state.selection.contains(hit) {
                return Ok(());
            }
            let start_ground = press.start_ground;
            if let Err(e) = drag::begin_drag(state, hit, start_ground) {
                state.interaction = InteractionState::Idle;
                return Err(e.into());
            }
            drag::update_drag(state, ground);
            Ok(())
        }
        InteractionState::Dragging(_) => {
            drag::update_drag(state, ground);
            Ok(())
        }
        InteractionState::Rotating(_) => {
            rotate::update_rotate(state, screen.x);
            Ok(())
        }
    }
}

/// Beendet die Geste und committet das Ergebnis (`→ Idle`).
pub fn end_press(state: &mut AppState, ground: Vec2) {
    match std::mem::take(&mut state.interaction) {
        InteractionState::Idle => {}
        InteractionState::Selecting(press) => {
            if let Some(id) = press.deferred_select_only {
                state.selection.select_only(id);
            }
        }
        InteractionState::Dragging(session) => drag::commit_drag(state, session, ground),
        InteractionState::Rotating(session) => rotate::commit_rotate(state, session),
    }
}

/// Verwirft die laufende Geste. Bereits angewendete Deltas werden zurückgenommen.
pub fn cancel_interaction(state: &mut AppState) {
    match std::mem::take(&mut state.interaction) {
        InteractionState::Idle => {}
        InteractionState::Selecting(_) => log::debug!("Klick-Geste verworfen"),
        InteractionState::Dragging(session) => {
            state.registry = session.before;
            log::info!("Verschieben abgebrochen, {} Element(e) zurückgesetzt", session.moved.len());
        }
        InteractionState::Rotating(session) => {
            state.registry = session.before;
            log::info!("Drehen abgebrochen, {} Element(e) zurückgesetzt", session.moved.len());
        }
    }
    state.selection.retain(|id| state.registry.contains(id));
}
