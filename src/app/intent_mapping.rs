//! Mapping von UI-Intents auf mutierende App-Commands.

use super::use_cases::selection::pick_element;
use super::{AppCommand, AppIntent, AppState};

/// Editier-Befehle verwerfen zuerst eine laufende Geste, damit deren
/// Ausgangszustand die Änderung nicht später überschreibt.
fn editing_after_cancel(command: AppCommand) -> Vec<AppCommand> {
    vec![AppCommand::CancelInteraction, command]
}

/// Übersetzt einen `AppIntent` in eine Sequenz ausführbarer `AppCommand`s.
pub fn map_intent_to_commands(state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
    match intent {
        AppIntent::PointerDown {
            screen,
            ground,
            shift,
        } => {
            let hit = pick_element(&state.registry, ground);
            vec![AppCommand::BeginPress {
                hit,
                screen,
                ground,
                toggle: shift,
            }]
        }
        AppIntent::PointerMoved { screen, ground } => {
            let mut commands = Vec::with_capacity(2);
            if !state.interaction.is_idle() {
                commands.push(AppCommand::UpdatePointer { screen, ground });
            }
            let hovered = pick_element(&state.registry, ground);
            if hovered != state.view.hovered {
                commands.push(AppCommand::SetHover { id: hovered });
            }
            commands
        }
        AppIntent::PointerUp { screen, ground } => {
            if state.interaction.is_idle() {
                return Vec::new();
            }
            vec![
                AppCommand::UpdatePointer { screen, ground },
                AppCommand::EndPress { ground },
            ]
        }
        AppIntent::PointerLeft => vec![AppCommand::SetHover { id: None }],
        AppIntent::RotateHandlePressed { screen } => vec![AppCommand::BeginRotate { screen }],
        AppIntent::EscapePressed => vec![AppCommand::CancelInteraction],

        AppIntent::NudgeSelectionRequested { delta } => {
            editing_after_cancel(AppCommand::MoveSelection { delta })
        }
        AppIntent::RotateSelectionRequested { angle } => {
            editing_after_cancel(AppCommand::RotateSelection { angle })
        }
        AppIntent::DuplicateRequested => editing_after_cancel(AppCommand::DuplicateSelection),
        AppIntent::DeleteRequested { scope } => {
            editing_after_cancel(AppCommand::DeleteSelection { scope })
        }
        AppIntent::LockRequested => editing_after_cancel(AppCommand::LockSelection),
        AppIntent::UnlockRequested => editing_after_cancel(AppCommand::UnlockSelection),
        AppIntent::ToggleLockRequested => editing_after_cancel(AppCommand::ToggleLockSelection),
        AppIntent::TagServiceRequested { service_id } => {
            editing_after_cancel(AppCommand::TagService { service_id })
        }
        AppIntent::DetachRequested => editing_after_cancel(AppCommand::DetachSelection),
        AppIntent::PlaceCatalogItemRequested {
            item_key,
            ground,
            yaw,
        } => editing_after_cancel(AppCommand::PlaceCatalogItem {
            item_key,
            ground,
            yaw,
        }),

        AppIntent::UndoRequested => vec![AppCommand::CancelInteraction, AppCommand::Undo],
        AppIntent::RedoRequested => vec![AppCommand::CancelInteraction, AppCommand::Redo],

        AppIntent::OverlayToggled => vec![AppCommand::ToggleOverlay],
        AppIntent::CameraOrbit {
            delta_yaw,
            delta_pitch,
        } => vec![AppCommand::OrbitCamera {
            delta_yaw,
            delta_pitch,
        }],
        AppIntent::CameraPan { delta } => vec![AppCommand::PanCamera { delta }],
        AppIntent::CameraZoom { factor } => vec![AppCommand::ZoomCamera { factor }],
        AppIntent::ResetCameraRequested => vec![AppCommand::ResetCamera],
        AppIntent::DropdownToggled { key } => vec![AppCommand::ToggleDropdown { key }],
        AppIntent::StatusMessageDismissed => vec![AppCommand::DismissStatusMessage],
        AppIntent::OptionsChanged { options } => vec![AppCommand::ApplyOptions { options }],

        AppIntent::CatalogReceived { catalog } => vec![AppCommand::SetCatalog { catalog }],
        AppIntent::BookingsReceived { bookings } => vec![AppCommand::SetBookings { bookings }],

        AppIntent::SaveRequested => vec![AppCommand::SaveScene],
        AppIntent::LoadRequested => vec![AppCommand::CancelInteraction, AppCommand::LoadScene],
        AppIntent::SceneUnmounted => vec![AppCommand::UnmountScene],
        AppIntent::PollBackgroundJobs => vec![AppCommand::PollBackgroundJobs],

        AppIntent::AddCornerRequested { position } => vec![AppCommand::AddCorner { position }],
        AppIntent::MoveCornerRequested { id, position } => {
            vec![AppCommand::MoveCorner { id, position }]
        }
        AppIntent::RemoveCornerRequested { id } => vec![AppCommand::RemoveCorner { id }],
        AppIntent::AddWallRequested { a, b, thickness } => {
            vec![AppCommand::AddWall { a, b, thickness }]
        }
        AppIntent::RemoveWallRequested { id } => vec![AppCommand::RemoveWall { id }],
        AppIntent::ExportFloorplanRequested { name } => {
            vec![AppCommand::ExportFloorplan { name }]
        }
    }
}

#[cfg(test)]
mod tests;
