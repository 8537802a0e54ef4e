//! Application Controller für zentrale Event-Verarbeitung.

use super::command_log::CommandOutcome;
use super::render_scene;
use super::{AppCommand, AppIntent, AppState};
use crate::shared::SceneView;

/// Orchestriert UI-Events und Use-Cases auf den AppState.
#[derive(Default)]
pub struct AppController;

impl AppController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    ///
    /// Schlägt ein Command fehl, werden die restlichen Commands des Intents
    /// nicht mehr ausgeführt.
    pub fn handle_intent(&mut self, state: &mut AppState, intent: AppIntent) -> anyhow::Result<()> {
        let commands = self.map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, command)?;
        }

        Ok(())
    }

    fn map_intent_to_commands(&self, state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
        super::intent_mapping::map_intent_to_commands(state, intent)
    }

    /// Führt mutierende Commands auf dem AppState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    ///
    /// Fehler werden als Statusmeldung sichtbar gemacht und zurückgegeben.
    /// Wird die Selektion während einer Geste leer, wird die Geste verworfen.
    pub fn handle_command(
        &mut self,
        state: &mut AppState,
        command: AppCommand,
    ) -> anyhow::Result<()> {
        let logged = command.clone();
        let result = Self::dispatch(state, command);

        if !state.interaction.is_idle() && state.selection.is_empty() {
            super::handlers::interaction::cancel(state);
        }

        let outcome = match &result {
            Ok(()) => CommandOutcome::Applied,
            Err(e) => {
                log::warn!("Befehl fehlgeschlagen: {}", e);
                state.ui.status_message = Some(e.to_string());
                CommandOutcome::Rejected(e.to_string())
            }
        };
        state.command_log.record(logged, outcome);
        result
    }

    fn dispatch(state: &mut AppState, command: AppCommand) -> anyhow::Result<()> {
        use super::handlers;

        match command {
            // === Interaktion ===
            AppCommand::BeginPress {
                hit,
                screen,
                ground,
                toggle,
            } => handlers::interaction::begin_press(state, hit, screen, ground, toggle),
            AppCommand::UpdatePointer { screen, ground } => {
                handlers::interaction::update_pointer(state, screen, ground)?
            }
            AppCommand::EndPress { ground } => handlers::interaction::end_press(state, ground),
            AppCommand::BeginRotate { screen } => {
                handlers::interaction::begin_rotate(state, screen)?
            }
            AppCommand::CancelInteraction => handlers::interaction::cancel(state),
            AppCommand::SetHover { id } => handlers::selection::set_hover(state, id),

            // === Selektion ===
            AppCommand::ClearSelection => handlers::selection::clear(state),
            AppCommand::SelectOnly { id } => handlers::selection::select_only(state, id),
            AppCommand::ToggleSelection { id } => handlers::selection::toggle(state, id),

            // === Editing ===
            AppCommand::MoveSelection { delta } => handlers::editing::move_selection(state, delta)?,
            AppCommand::RotateSelection { angle } => {
                handlers::editing::rotate_selection(state, angle)?
            }
            AppCommand::DuplicateSelection => handlers::editing::duplicate(state)?,
            AppCommand::DeleteSelection { scope } => handlers::editing::delete(state, scope)?,
            AppCommand::LockSelection => handlers::editing::lock(state)?,
            AppCommand::UnlockSelection => handlers::editing::unlock(state)?,
            AppCommand::ToggleLockSelection => handlers::editing::toggle_lock(state)?,
            AppCommand::TagService { service_id } => {
                handlers::editing::tag_service(state, service_id)?
            }
            AppCommand::DetachSelection => handlers::editing::detach(state)?,
            AppCommand::PlaceCatalogItem {
                item_key,
                ground,
                yaw,
            } => handlers::editing::place_catalog_item(state, &item_key, ground, yaw)?,

            // === History ===
            AppCommand::Undo => handlers::history::undo(state),
            AppCommand::Redo => handlers::history::redo(state),

            // === Ansicht ===
            AppCommand::ToggleOverlay => handlers::view::toggle_overlay(state),
            AppCommand::OrbitCamera {
                delta_yaw,
                delta_pitch,
            } => handlers::view::orbit(state, delta_yaw, delta_pitch),
            AppCommand::PanCamera { delta } => handlers::view::pan(state, delta),
            AppCommand::ZoomCamera { factor } => handlers::view::zoom(state, factor),
            AppCommand::ResetCamera => handlers::view::reset_camera(state),
            AppCommand::ToggleDropdown { key } => handlers::view::toggle_dropdown(state, key),
            AppCommand::DismissStatusMessage => handlers::view::dismiss_status_message(state),
            AppCommand::ApplyOptions { options } => handlers::view::apply_options(state, options)?,
            AppCommand::SetCatalog { catalog } => handlers::view::set_catalog(state, catalog),
            AppCommand::SetBookings { bookings } => handlers::view::set_bookings(state, bookings),

            // === Szene & Jobs ===
            AppCommand::SaveScene => handlers::file_io::save(state),
            AppCommand::LoadScene => handlers::file_io::load(state)?,
            AppCommand::UnmountScene => handlers::file_io::unmount(state),
            AppCommand::PollBackgroundJobs => handlers::file_io::poll_jobs(state),

            // === Grundriss ===
            AppCommand::AddCorner { position } => handlers::floorplan::add_corner(state, position)?,
            AppCommand::MoveCorner { id, position } => {
                handlers::floorplan::move_corner(state, id, position)?
            }
            AppCommand::RemoveCorner { id } => handlers::floorplan::remove_corner(state, id)?,
            AppCommand::AddWall { a, b, thickness } => {
                handlers::floorplan::add_wall(state, a, b, thickness)?
            }
            AppCommand::RemoveWall { id } => handlers::floorplan::remove_wall(state, id),
            AppCommand::ExportFloorplan { name } => handlers::floorplan::export(state, &name)?,
        }

        Ok(())
    }

    /// Baut die Render-Projektion aus dem aktuellen AppState.
    pub fn build_scene_view(&self, state: &AppState) -> SceneView {
        render_scene::build(state)
    }
}
