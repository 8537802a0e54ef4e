use glam::{Vec2, Vec3};
use std::sync::{mpsc, Arc, Mutex};
use std::time::{Duration, Instant};
use venue_scene_editor::floorplan::UploadForm;
use venue_scene_editor::{
    AppController, AppIntent, AppState, DeleteScope, ElementId, ElementKind, JsonFileStore,
    MemoryStore, SceneDocument, SceneError, SceneStore, Transform,
};

fn poll_until_idle(controller: &mut AppController, state: &mut AppState) {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        controller
            .handle_intent(state, AppIntent::PollBackgroundJobs)
            .expect("Polling sollte funktionieren");
        if !state.is_busy() {
            break;
        }
        assert!(Instant::now() < deadline, "Hintergrund-Job hängt");
        std::thread::sleep(Duration::from_millis(2));
    }
}

/// Tisch mit gestapelter Vase und einem Stuhl.
fn furnished_state(store: Arc<dyn SceneStore>, project: &str) -> (AppState, ElementId, ElementId) {
    let mut state = AppState::new().with_store(store).with_project(project);
    let registry = state.registry_mut();
    let table = registry.place(
        ElementKind::Table,
        Transform::from_position_yaw(Vec3::new(2.0, 0.0, 1.0), 0.4),
        None,
    );
    let vase = registry.place(
        ElementKind::Centerpiece,
        Transform::from_translation(Vec3::new(2.2, 0.75, 1.0)),
        None,
    );
    registry.bind(vase, table).expect("Bindung erwartet");
    registry.place(
        ElementKind::Chair,
        Transform::from_translation(Vec3::new(5.0, 0.0, 0.0)),
        None,
    );
    (state, table, vase)
}

#[test]
fn test_save_then_load_restores_scene_and_resets_session() {
    let mut controller = AppController::new();
    let store = Arc::new(MemoryStore::new());
    let (mut state, table, vase) = furnished_state(store.clone(), "gala-2026");
    controller
        .handle_intent(
            &mut state,
            AppIntent::CameraOrbit {
                delta_yaw: 0.3,
                delta_pitch: 0.1,
            },
        )
        .expect("Kamera erwartet");
    let saved_camera = state.view.camera;
    let vase_world = state.registry.world_transform(vase).expect("Vase erwartet");

    controller
        .handle_intent(&mut state, AppIntent::SaveRequested)
        .expect("Speichern erwartet");
    poll_until_idle(&mut controller, &mut state);
    assert_eq!(store.scene_count(), 1);

    state.selection.select_only(table);
    controller
        .handle_intent(
            &mut state,
            AppIntent::DeleteRequested {
                scope: DeleteScope::Single,
            },
        )
        .expect("Löschen erwartet");
    controller
        .handle_intent(&mut state, AppIntent::ResetCameraRequested)
        .expect("Kamera erwartet");
    assert_eq!(state.element_count(), 1);
    assert!(state.can_undo());

    state.selection.replace(state.registry.ids_sorted());
    controller
        .handle_intent(&mut state, AppIntent::LoadRequested)
        .expect("Laden erwartet");

    assert_eq!(state.element_count(), 3);
    assert!(state.selection.is_empty());
    assert!(!state.can_undo());
    assert_eq!(state.view.camera, saved_camera);
    assert_eq!(state.registry.get(vase).and_then(|e| e.parent_id), Some(table));
    let loaded_world = state.registry.world_transform(vase).expect("Vase erwartet");
    assert!(loaded_world.abs_diff_eq(&vase_world, 1e-5));
    assert!(state.ui.status_message.is_none());
}

#[test]
fn test_load_without_saved_scene_starts_empty() {
    let mut controller = AppController::new();
    let store = Arc::new(MemoryStore::new());
    let (mut state, _table, _vase) = furnished_state(store, "fresh-project");

    controller
        .handle_intent(&mut state, AppIntent::LoadRequested)
        .expect("Laden erwartet");

    assert_eq!(state.element_count(), 0);
    assert!(state.mounted);
}

#[test]
fn test_load_heals_orphaned_parent_reference() {
    let mut controller = AppController::new();
    let store = Arc::new(MemoryStore::new());

    let mut document = {
        let (state, _table, _vase) = furnished_state(store.clone(), "p");
        SceneDocument::from_registry(Some("p".into()), &state.registry, state.view.camera)
    };
    let table_id = document
        .elements
        .iter()
        .find(|e| e.kind == ElementKind::Table)
        .map(|e| e.id)
        .expect("Tisch erwartet");
    document.elements.retain(|e| e.id != table_id);
    store.save_scene("p", &document).expect("Speichern erwartet");

    let mut state = AppState::new().with_store(store).with_project("p");
    controller
        .handle_intent(&mut state, AppIntent::LoadRequested)
        .expect("Laden erwartet");

    assert_eq!(state.element_count(), 2);
    assert!(state.registry.iter().all(|e| e.parent_id.is_none()));
    assert!(state.ui.status_message.is_some());
}

#[test]
fn test_load_detaches_child_bound_to_non_host() {
    let mut controller = AppController::new();
    let store = Arc::new(MemoryStore::new());

    let (mut document, vase, chair) = {
        let (state, _table, vase) = furnished_state(store.clone(), "p");
        let chair = state
            .registry
            .iter()
            .find(|e| e.kind == ElementKind::Chair)
            .map(|e| e.id)
            .expect("Stuhl erwartet");
        let document =
            SceneDocument::from_registry(Some("p".into()), &state.registry, state.view.camera);
        (document, vase, chair)
    };
    for element in document.elements.iter_mut().filter(|e| e.id == vase) {
        element.parent_id = Some(chair);
    }

    let (registry, healed) = document.clone().into_registry();
    assert_eq!(healed, vec![SceneError::InvalidStackingTarget(chair)]);
    assert_eq!(registry.get(vase).and_then(|e| e.parent_id), None);

    store.save_scene("p", &document).expect("Speichern erwartet");
    let mut state = AppState::new().with_store(store).with_project("p");
    controller
        .handle_intent(&mut state, AppIntent::LoadRequested)
        .expect("Laden erwartet");

    assert_eq!(state.element_count(), 3);
    assert!(state.registry.list_children(chair).is_empty());
    assert!(state.ui.status_message.is_some());
}

#[test]
fn test_scene_document_rejects_newer_format() {
    let json = r#"{ "version": 999, "elements": [] }"#;
    assert!(SceneDocument::from_json(json).is_err());

    let minimal = SceneDocument::from_json(r#"{ "version": 1 }"#).expect("Dokument erwartet");
    assert!(minimal.elements.is_empty());
}

#[test]
fn test_json_file_store_round_trip_through_controller() {
    let dir = std::env::temp_dir().join(format!("venue_persistence_test_{}", std::process::id()));
    let store: Arc<dyn SceneStore> = Arc::new(JsonFileStore::new(&dir));
    let mut controller = AppController::new();
    let (mut state, table, vase) = furnished_state(store.clone(), "hall-7");

    controller
        .handle_intent(&mut state, AppIntent::SaveRequested)
        .expect("Speichern erwartet");
    poll_until_idle(&mut controller, &mut state);
    assert!(dir.join("hall-7.scene.json").exists());

    let mut reloaded = AppState::new().with_store(store).with_project("hall-7");
    controller
        .handle_intent(&mut reloaded, AppIntent::LoadRequested)
        .expect("Laden erwartet");

    assert_eq!(reloaded.element_count(), 3);
    assert_eq!(reloaded.registry.get(vase).and_then(|e| e.parent_id), Some(table));
    std::fs::remove_dir_all(&dir).ok();
}

/// Store, dessen Speichern nach Freigabe fehlschlägt und danach Bescheid gibt.
struct FailingStore {
    gate: Mutex<mpsc::Receiver<()>>,
    done: Mutex<mpsc::Sender<()>>,
}

impl FailingStore {
    fn wait_and_fail<T>(&self) -> anyhow::Result<T> {
        if let Ok(gate) = self.gate.lock() {
            gate.recv().ok();
        }
        if let Ok(done) = self.done.lock() {
            done.send(()).ok();
        }
        anyhow::bail!("Backend nicht erreichbar")
    }
}

impl SceneStore for FailingStore {
    fn load_scene(&self, _project_id: &str) -> anyhow::Result<Option<SceneDocument>> {
        Ok(None)
    }

    fn save_scene(&self, _project_id: &str, _document: &SceneDocument) -> anyhow::Result<()> {
        self.wait_and_fail()
    }

    fn upload_model(&self, _form: &UploadForm) -> anyhow::Result<String> {
        self.wait_and_fail()
    }
}

fn failing_store() -> (Arc<FailingStore>, mpsc::Sender<()>, mpsc::Receiver<()>) {
    let (gate_tx, gate_rx) = mpsc::channel();
    let (done_tx, done_rx) = mpsc::channel();
    let store = Arc::new(FailingStore {
        gate: Mutex::new(gate_rx),
        done: Mutex::new(done_tx),
    });
    (store, gate_tx, done_rx)
}

#[test]
fn test_failed_save_surfaces_status_message_while_mounted() {
    let mut controller = AppController::new();
    let (store, gate, _done) = failing_store();
    let mut state = AppState::new().with_store(store);

    controller
        .handle_intent(&mut state, AppIntent::SaveRequested)
        .expect("Speichern erwartet");
    gate.send(()).expect("Gate erwartet");
    poll_until_idle(&mut controller, &mut state);

    let message = state.ui.status_message.expect("Statusmeldung erwartet");
    assert!(message.contains("Backend nicht erreichbar"));
}

#[test]
fn test_results_after_unmount_are_discarded() {
    let mut controller = AppController::new();
    let (store, gate, done) = failing_store();
    let mut state = AppState::new().with_store(store);

    controller
        .handle_intent(&mut state, AppIntent::SaveRequested)
        .expect("Speichern erwartet");
    assert!(state.is_busy());

    controller
        .handle_intent(&mut state, AppIntent::SceneUnmounted)
        .expect("Verlassen erwartet");
    assert!(!state.mounted);
    assert!(!state.is_busy());

    gate.send(()).expect("Gate erwartet");
    done.recv_timeout(Duration::from_secs(5))
        .expect("Worker sollte abschließen");
    controller
        .handle_intent(&mut state, AppIntent::PollBackgroundJobs)
        .expect("Polling erwartet");

    assert!(state.ui.status_message.is_none());
}

#[test]
fn test_unmount_cancels_running_drag() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    let chair = state
        .registry_mut()
        .place(ElementKind::Chair, Transform::IDENTITY, None);

    controller
        .handle_intent(
            &mut state,
            AppIntent::PointerDown {
                screen: Vec2::ZERO,
                ground: Vec2::ZERO,
                shift: false,
            },
        )
        .expect("PointerDown erwartet");
    controller
        .handle_intent(
            &mut state,
            AppIntent::PointerMoved {
                screen: Vec2::new(200.0, 0.0),
                ground: Vec2::new(2.0, 0.0),
            },
        )
        .expect("Drag erwartet");

    controller
        .handle_intent(&mut state, AppIntent::SceneUnmounted)
        .expect("Verlassen erwartet");

    assert!(state.interaction.is_idle());
    let world = state.registry.world_transform(chair).expect("Stuhl erwartet");
    assert!(world.translation.abs_diff_eq(Vec3::ZERO, 1e-6));
}
