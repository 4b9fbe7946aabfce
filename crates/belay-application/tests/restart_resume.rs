//! Restart/resume behavior over the real file-backed storage.

use std::sync::Arc;

use belay_application::SessionRecorder;
use belay_core::clock::SystemTimeSource;
use belay_core::error::{BelayError, Result};
use belay_core::grades::GradeSystemEntry;
use belay_core::repository::ClimbApi;
use belay_core::session::{NewRoute, OTHER_GRADE_SYSTEM};
use belay_core::wire::{CommitAck, CommitSessionPayload};
use belay_infrastructure::FileSessionStorage;
use tempfile::TempDir;

/// Server stub for tests that never reach the commit pipeline.
struct OfflineApi;

#[async_trait::async_trait]
impl ClimbApi for OfflineApi {
    async fn fetch_grade_systems(&self) -> Result<Vec<GradeSystemEntry>> {
        Err(BelayError::network("offline"))
    }

    async fn commit_session(&self, _payload: &CommitSessionPayload) -> Result<CommitAck> {
        Err(BelayError::network("offline"))
    }
}

fn recorder_over(dir: &TempDir) -> SessionRecorder {
    let storage = Arc::new(FileSessionStorage::new(dir.path()).unwrap());
    SessionRecorder::new(storage, Arc::new(OfflineApi), Arc::new(SystemTimeSource))
}

#[test]
fn restart_reproduces_route_list_and_notes() {
    let dir = TempDir::new().unwrap();

    let mut recorder = recorder_over(&dir);
    recorder.start();
    recorder.set_notes("two board sessions").unwrap();
    recorder
        .add_route(NewRoute {
            grade_system: 1,
            grade_label: "V4".to_string(),
            description: Some("orange arete".to_string()),
            ..NewRoute::default()
        })
        .unwrap();
    recorder
        .add_route(NewRoute {
            grade_system: OTHER_GRADE_SYSTEM,
            grade_system_label: Some("Local Gym".to_string()),
            grade_label: "L8".to_string(),
            ..NewRoute::default()
        })
        .unwrap();
    let sent_id = recorder.session().unwrap().routes[0].id.clone();
    recorder.toggle_sent(&sent_id).unwrap();

    let before = recorder.session().unwrap().clone();
    drop(recorder); // simulated app shutdown; the mirror stays on disk

    let mut restarted = recorder_over(&dir);
    assert!(restarted.resume());

    let after = restarted.session().unwrap();
    assert_eq!(after.session_id, before.session_id);
    assert_eq!(after.started_at, before.started_at);
    assert_eq!(after.notes, before.notes);
    assert_eq!(after.routes, before.routes);

    // Elapsed time is recomputed from started_at; the clock always resumes
    // in the running state.
    assert!(restarted.clock().is_running());
    assert!(restarted.clock().elapsed_seconds() >= 0);
}

#[test]
fn restart_after_discard_finds_nothing() {
    let dir = TempDir::new().unwrap();

    let mut recorder = recorder_over(&dir);
    recorder.start();
    recorder
        .add_route(NewRoute {
            grade_system: 1,
            grade_label: "V1".to_string(),
            ..NewRoute::default()
        })
        .unwrap();
    recorder.discard();
    drop(recorder);

    let mut restarted = recorder_over(&dir);
    assert!(!restarted.resume());
    assert!(restarted.session().is_none());
}
