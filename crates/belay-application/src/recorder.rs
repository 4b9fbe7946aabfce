//! The session recorder use case.
//!
//! `SessionRecorder` is the single source of truth for the active climbing
//! session. It owns the in-memory session, the elapsed-time clock, and the
//! grade catalog, mirrors every mutation to durable storage through
//! [`SessionRepository`], and hands finished sessions to the server through
//! [`ClimbApi`].
//!
//! # Responsibilities
//!
//! - Starting, resuming, and discarding the active session
//! - Route log mutations (add, attempts, sent flag, remove) and notes
//! - Persisting the session after every mutation
//! - The commit pipeline: project to wire format, submit, reconcile
//!   (clear on success, retain on failure)
//!
//! Execution is single-threaded and cooperative: mutations take `&mut self`
//! and complete before the next handler runs. The only suspension point is
//! the commit submission, so a `committing` flag blocks all route-log
//! mutations and re-entrant commits while one is in flight.

use std::sync::Arc;

use belay_core::clock::{SessionClock, TimeSource};
use belay_core::error::{BelayError, Result};
use belay_core::grades::GradeCatalog;
use belay_core::repository::{ClimbApi, SessionRepository};
use belay_core::session::{NewRoute, Session};
use belay_core::wire::CommitSessionPayload;

/// Recorder for the active climbing session.
pub struct SessionRecorder {
    /// The active session; `None` exactly when the clock is stopped.
    session: Option<Session>,
    clock: SessionClock,
    catalog: GradeCatalog,
    /// True while a commit submission is awaiting the server.
    committing: bool,
    /// Set when a durable-storage write failed; the in-memory state is
    /// still valid but will not survive a restart.
    storage_warning: Option<String>,
    /// User-chosen default grade system, read once at session start.
    default_grade_system: Option<i64>,
    repository: Arc<dyn SessionRepository>,
    api: Arc<dyn ClimbApi>,
    time: Arc<dyn TimeSource>,
}

impl SessionRecorder {
    /// Creates a recorder with no active session and an empty catalog.
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        api: Arc<dyn ClimbApi>,
        time: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            session: None,
            clock: SessionClock::new(),
            catalog: GradeCatalog::default(),
            committing: false,
            storage_warning: None,
            default_grade_system: None,
            repository,
            api,
            time,
        }
    }

    // ------------------------------------------------------------------
    // State accessors
    // ------------------------------------------------------------------

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    pub fn catalog(&self) -> &GradeCatalog {
        &self.catalog
    }

    pub fn is_committing(&self) -> bool {
        self.committing
    }

    pub fn default_grade_system(&self) -> Option<i64> {
        self.default_grade_system
    }

    /// Returns and clears the pending storage warning, if any.
    pub fn take_storage_warning(&mut self) -> Option<String> {
        self.storage_warning.take()
    }

    /// Zero-padded `HH:MM:SS` display of the elapsed time, advanced to now.
    pub fn elapsed_display(&mut self) -> String {
        let now = self.time.now();
        self.clock.tick(now);
        self.clock.display()
    }

    // ------------------------------------------------------------------
    // Session lifecycle
    // ------------------------------------------------------------------

    /// Starts a new session. No-op if one already exists: the existing id,
    /// start time, and route list are untouched.
    pub fn start(&mut self) {
        if self.session.is_some() {
            return;
        }

        match self.repository.load_default_grade_system() {
            Ok(grade_id) => self.default_grade_system = grade_id,
            Err(err) => {
                tracing::warn!("Failed to read default grade system: {err}");
            }
        }

        let now = self.time.now();
        self.session = Some(Session::new(now));
        self.persist();
        self.clock.start(now);
        tracing::info!("Session started");
    }

    /// Restores an in-progress session from the durable mirror on startup.
    ///
    /// The clock restarts in the running state with
    /// `elapsed = now - started_at`; pause state is deliberately not durable,
    /// so time paused before the restart is not preserved.
    ///
    /// Returns `true` if a session was restored.
    pub fn resume(&mut self) -> bool {
        let mirrored = match self.repository.load() {
            Ok(mirrored) => mirrored,
            Err(err) => {
                // An unreadable mirror behaves like no mirror at all.
                tracing::warn!("Failed to read session mirror: {err}");
                None
            }
        };

        match mirrored {
            Some(session) => {
                let now = self.time.now();
                self.clock.resume_from(session.started_at, now);
                tracing::info!(session_id = %session.session_id, "Session resumed");
                self.session = Some(session);
                true
            }
            None => false,
        }
    }

    /// Clears the in-memory session and the durable mirror without
    /// contacting the server, and stops the clock.
    pub fn discard(&mut self) {
        self.session = None;
        self.clock.reset();
        if let Err(err) = self.repository.clear() {
            tracing::warn!("Failed to clear session mirror: {err}");
            self.storage_warning = Some(err.to_string());
        }
    }

    // ------------------------------------------------------------------
    // Clock controls
    // ------------------------------------------------------------------

    pub fn pause(&mut self) {
        self.clock.pause(self.time.now());
    }

    pub fn resume_clock(&mut self) {
        self.clock.resume(self.time.now());
    }

    // ------------------------------------------------------------------
    // Route log mutations
    // ------------------------------------------------------------------

    /// Validates and appends a route. No-op without a session; validation
    /// failures mutate nothing.
    pub fn add_route(&mut self, new_route: NewRoute) -> Result<()> {
        self.ensure_not_committing()?;
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        session.add_route(new_route)?;
        self.persist();
        Ok(())
    }

    /// Adjusts a route's attempt counter by `delta`, clamped at 0. No-op for
    /// unknown ids or without a session.
    pub fn update_attempts(&mut self, route_id: &str, delta: i32) -> Result<()> {
        self.ensure_not_committing()?;
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        if session.update_attempts(route_id, delta) {
            self.persist();
        }
        Ok(())
    }

    /// Flips a route's sent flag per the send invariant.
    pub fn toggle_sent(&mut self, route_id: &str) -> Result<()> {
        self.ensure_not_committing()?;
        let now = self.time.now();
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        if session.toggle_sent(route_id, now) {
            self.persist();
        }
        Ok(())
    }

    /// Deletes a route from the list.
    pub fn remove_route(&mut self, route_id: &str) -> Result<()> {
        self.ensure_not_committing()?;
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        if session.remove_route(route_id) {
            self.persist();
        }
        Ok(())
    }

    /// Replaces the session notes.
    pub fn set_notes(&mut self, notes: impl Into<String>) -> Result<()> {
        self.ensure_not_committing()?;
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        session.set_notes(notes);
        self.persist();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Catalog and preferences
    // ------------------------------------------------------------------

    /// Fetches the grade catalog. A failed fetch leaves the current catalog
    /// in place (empty on first use); the recorder degrades to free-text
    /// grade entry and never surfaces this as an error.
    pub async fn refresh_catalog(&mut self) {
        match self.api.fetch_grade_systems().await {
            Ok(entries) => self.catalog = GradeCatalog::new(entries),
            Err(err) => {
                tracing::warn!("Grade catalog unavailable: {err}");
            }
        }
    }

    /// Persists the user-chosen default grade system.
    pub fn set_default_grade_system(&mut self, grade_id: i64) {
        self.default_grade_system = Some(grade_id);
        if let Err(err) = self.repository.save_default_grade_system(grade_id) {
            tracing::warn!("Failed to save default grade system: {err}");
            self.storage_warning = Some(err.to_string());
        }
    }

    // ------------------------------------------------------------------
    // Commit pipeline
    // ------------------------------------------------------------------

    /// Finalizes the session: captures `ended_at`, projects the wire
    /// payload, submits it, and reconciles local state with the outcome.
    ///
    /// On a server-acknowledged success the local session is discarded and
    /// the clock resets to zero. On any failure (network, non-success
    /// acknowledgement, malformed response) local state is left fully
    /// intact so the user can retry the same commit later.
    ///
    /// # Errors
    ///
    /// Returns the retry-capable failure, or `NotFound` when there is no
    /// active session, or `Validation` when a commit is already in flight.
    pub async fn commit(&mut self) -> Result<String> {
        self.ensure_not_committing()?;
        let Some(session) = self.session.as_ref() else {
            return Err(BelayError::not_found("session", "current"));
        };

        let ended_at = self.time.now();
        // Recomputed fresh from the current session state, never cached.
        let payload = CommitSessionPayload::from_session(session, ended_at);

        self.committing = true;
        let outcome = self.api.commit_session(&payload).await;
        self.committing = false;

        match outcome {
            Ok(ack) => {
                let server_id = ack.session_id.unwrap_or_default();
                tracing::info!(server_id = %server_id, "Commit acknowledged");
                self.discard();
                Ok(server_id)
            }
            Err(err) => {
                tracing::warn!("Commit failed, session retained locally: {err}");
                Err(err)
            }
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn ensure_not_committing(&self) -> Result<()> {
        if self.committing {
            return Err(BelayError::validation(
                "A commit is in progress; try again in a moment",
            ));
        }
        Ok(())
    }

    /// Mirrors the in-memory session to durable storage. A write failure
    /// leaves the in-memory state valid, logs, and sets the storage
    /// warning so the UI can tell the user the session will not survive a
    /// restart.
    fn persist(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        if let Err(err) = self.repository.save(session) {
            tracing::warn!("Failed to persist session: {err}");
            self.storage_warning = Some(format!(
                "Session changes are not being saved locally: {err}"
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use belay_core::clock::ClockState;
    use belay_core::grades::GradeSystemEntry;
    use belay_core::session::OTHER_GRADE_SYSTEM;
    use belay_core::wire::CommitAck;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use std::sync::Mutex;

    // ------------------------------------------------------------------
    // Test doubles
    // ------------------------------------------------------------------

    struct ManualTimeSource {
        now: Mutex<DateTime<Utc>>,
    }

    impl ManualTimeSource {
        fn new() -> Self {
            Self {
                now: Mutex::new(Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()),
            }
        }

        fn advance(&self, seconds: i64) {
            *self.now.lock().unwrap() += Duration::seconds(seconds);
        }
    }

    impl TimeSource for ManualTimeSource {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock().unwrap()
        }
    }

    /// In-memory stand-in for the durable mirror, optionally failing writes.
    #[derive(Default)]
    struct MemoryRepository {
        session: Mutex<Option<Session>>,
        default_system: Mutex<Option<i64>>,
        fail_writes: Mutex<bool>,
    }

    impl MemoryRepository {
        fn set_fail_writes(&self, fail: bool) {
            *self.fail_writes.lock().unwrap() = fail;
        }

        fn mirrored(&self) -> Option<Session> {
            self.session.lock().unwrap().clone()
        }
    }

    impl SessionRepository for MemoryRepository {
        fn save(&self, session: &Session) -> Result<()> {
            if *self.fail_writes.lock().unwrap() {
                return Err(BelayError::storage("quota exceeded"));
            }
            *self.session.lock().unwrap() = Some(session.clone());
            Ok(())
        }

        fn load(&self) -> Result<Option<Session>> {
            Ok(self.session.lock().unwrap().clone())
        }

        fn clear(&self) -> Result<()> {
            *self.session.lock().unwrap() = None;
            Ok(())
        }

        fn load_default_grade_system(&self) -> Result<Option<i64>> {
            Ok(*self.default_system.lock().unwrap())
        }

        fn save_default_grade_system(&self, grade_id: i64) -> Result<()> {
            *self.default_system.lock().unwrap() = Some(grade_id);
            Ok(())
        }
    }

    /// Scripted server: records payloads, answers from a queue.
    struct MockApi {
        grade_systems: Mutex<Result<Vec<GradeSystemEntry>>>,
        commit_result: Mutex<Result<CommitAck>>,
        committed_payloads: Mutex<Vec<CommitSessionPayload>>,
    }

    impl MockApi {
        fn new() -> Self {
            Self {
                grade_systems: Mutex::new(Ok(Vec::new())),
                commit_result: Mutex::new(Err(BelayError::network("no response scripted"))),
                committed_payloads: Mutex::new(Vec::new()),
            }
        }

        fn script_commit(&self, result: Result<CommitAck>) {
            *self.commit_result.lock().unwrap() = result;
        }

        fn script_grades(&self, result: Result<Vec<GradeSystemEntry>>) {
            *self.grade_systems.lock().unwrap() = result;
        }

        fn payloads(&self) -> Vec<CommitSessionPayload> {
            self.committed_payloads.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl ClimbApi for MockApi {
        async fn fetch_grade_systems(&self) -> Result<Vec<GradeSystemEntry>> {
            self.grade_systems.lock().unwrap().clone()
        }

        async fn commit_session(&self, payload: &CommitSessionPayload) -> Result<CommitAck> {
            self.committed_payloads.lock().unwrap().push(payload.clone());
            self.commit_result.lock().unwrap().clone()
        }
    }

    struct Fixture {
        recorder: SessionRecorder,
        repository: Arc<MemoryRepository>,
        api: Arc<MockApi>,
        time: Arc<ManualTimeSource>,
    }

    fn fixture() -> Fixture {
        let repository = Arc::new(MemoryRepository::default());
        let api = Arc::new(MockApi::new());
        let time = Arc::new(ManualTimeSource::new());
        let recorder = SessionRecorder::new(
            repository.clone(),
            api.clone(),
            time.clone(),
        );
        Fixture {
            recorder,
            repository,
            api,
            time,
        }
    }

    fn some_route(label: &str) -> NewRoute {
        NewRoute {
            grade_system: 1,
            grade_label: label.to_string(),
            ..NewRoute::default()
        }
    }

    fn gym_route() -> NewRoute {
        NewRoute {
            grade_system: OTHER_GRADE_SYSTEM,
            grade_system_label: Some("Local Gym".to_string()),
            grade_label: "L10".to_string(),
            ..NewRoute::default()
        }
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    #[test]
    fn test_start_creates_and_persists_session() {
        let mut f = fixture();
        f.recorder.start();

        let session = f.recorder.session().unwrap();
        assert!(session.routes.is_empty());
        assert!(session.notes.is_empty());
        assert!(f.recorder.clock().is_running());

        let mirrored = f.repository.mirrored().unwrap();
        assert_eq!(mirrored.session_id, session.session_id);
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut f = fixture();
        f.recorder.start();
        f.recorder.add_route(some_route("V3")).unwrap();

        let id = f.recorder.session().unwrap().session_id.clone();
        let started_at = f.recorder.session().unwrap().started_at;

        f.time.advance(60);
        f.recorder.start();

        let session = f.recorder.session().unwrap();
        assert_eq!(session.session_id, id);
        assert_eq!(session.started_at, started_at);
        assert_eq!(session.routes.len(), 1);
    }

    #[test]
    fn test_start_reads_default_grade_system_once() {
        let mut f = fixture();
        f.repository.save_default_grade_system(2).unwrap();
        f.recorder.start();
        assert_eq!(f.recorder.default_grade_system(), Some(2));
    }

    #[test]
    fn test_resume_restores_session_and_elapsed_time() {
        let mut f = fixture();
        f.recorder.start();
        f.recorder.add_route(some_route("V1")).unwrap();
        f.recorder.set_notes("before restart").unwrap();
        let id = f.recorder.session().unwrap().session_id.clone();

        // Pause, then "restart the app": a fresh recorder over the same
        // repository. Pause state is not durable, so the resumed clock runs
        // and covers the whole wall-clock span since start.
        f.recorder.pause();
        f.time.advance(90);

        let mut recorder2 =
            SessionRecorder::new(f.repository.clone(), f.api.clone(), f.time.clone());
        assert!(recorder2.resume());

        let session = recorder2.session().unwrap();
        assert_eq!(session.session_id, id);
        assert_eq!(session.notes, "before restart");
        assert_eq!(session.routes.len(), 1);
        assert!(recorder2.clock().is_running());
        assert_eq!(recorder2.clock().elapsed_seconds(), 90);
    }

    #[test]
    fn test_resume_without_mirror_is_noop() {
        let mut f = fixture();
        assert!(!f.recorder.resume());
        assert!(f.recorder.session().is_none());
        assert_eq!(f.recorder.clock().state(), ClockState::Stopped);
    }

    // ------------------------------------------------------------------
    // Mutations and persistence
    // ------------------------------------------------------------------

    #[test]
    fn test_mutations_are_mirrored_to_storage() {
        let mut f = fixture();
        f.recorder.start();
        f.recorder.add_route(gym_route()).unwrap();
        let route_id = f.recorder.session().unwrap().routes[0].id.clone();

        f.recorder.update_attempts(&route_id, 2).unwrap();
        f.recorder.toggle_sent(&route_id).unwrap();
        f.recorder.set_notes("pumpy").unwrap();

        let mirrored = f.repository.mirrored().unwrap();
        assert_eq!(mirrored.notes, "pumpy");
        assert_eq!(mirrored.routes[0].attempts, 2);
        assert!(mirrored.routes[0].sent);

        f.recorder.remove_route(&route_id).unwrap();
        assert!(f.repository.mirrored().unwrap().routes.is_empty());
    }

    #[test]
    fn test_add_route_validation_rejected_before_mutation() {
        let mut f = fixture();
        f.recorder.start();

        let err = f
            .recorder
            .add_route(NewRoute {
                grade_system: OTHER_GRADE_SYSTEM,
                grade_system_label: None,
                grade_label: "L10".to_string(),
                description: None,
            })
            .unwrap_err();

        assert!(err.is_validation());
        assert!(f.recorder.session().unwrap().routes.is_empty());
        assert!(f.repository.mirrored().unwrap().routes.is_empty());
    }

    #[test]
    fn test_mutations_without_session_are_noops() {
        let mut f = fixture();
        assert!(f.recorder.add_route(some_route("V1")).is_ok());
        assert!(f.recorder.update_attempts("x", 1).is_ok());
        assert!(f.recorder.toggle_sent("x").is_ok());
        assert!(f.recorder.set_notes("ignored").is_ok());
        assert!(f.recorder.session().is_none());
        assert!(f.repository.mirrored().is_none());
    }

    #[test]
    fn test_storage_failure_warns_but_keeps_memory_state() {
        let mut f = fixture();
        f.recorder.start();
        f.repository.set_fail_writes(true);

        f.recorder.add_route(some_route("V4")).unwrap();

        // In-memory state advanced, warning surfaced, nothing mirrored
        assert_eq!(f.recorder.session().unwrap().routes.len(), 1);
        let warning = f.recorder.take_storage_warning().unwrap();
        assert!(warning.contains("not being saved"));
        assert!(f.recorder.take_storage_warning().is_none());
        assert!(f.repository.mirrored().unwrap().routes.is_empty());
    }

    // ------------------------------------------------------------------
    // Catalog
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_refresh_catalog_populates_lookup() {
        let mut f = fixture();
        f.api.script_grades(Ok(vec![GradeSystemEntry {
            grade_id: 1,
            grade_system: "V-Scale".to_string(),
            grades: vec!["V0".to_string()],
        }]));

        f.recorder.refresh_catalog().await;
        assert_eq!(f.recorder.catalog().entries().len(), 1);
    }

    #[tokio::test]
    async fn test_catalog_failure_degrades_to_empty() {
        let mut f = fixture();
        f.api.script_grades(Err(BelayError::network("offline")));

        f.recorder.refresh_catalog().await;
        assert!(f.recorder.catalog().is_empty());

        // The "other" fallback path still functions
        f.recorder.start();
        f.recorder.add_route(gym_route()).unwrap();
        let route = &f.recorder.session().unwrap().routes[0];
        assert_eq!(f.recorder.catalog().system_label(route), "Local Gym");
    }

    // ------------------------------------------------------------------
    // Commit pipeline
    // ------------------------------------------------------------------

    fn seed_two_route_session(f: &mut Fixture) -> String {
        f.recorder.start();
        f.recorder.add_route(gym_route()).unwrap();
        f.recorder.add_route(some_route("V3")).unwrap();
        let sent_id = f.recorder.session().unwrap().routes[0].id.clone();
        f.recorder.toggle_sent(&sent_id).unwrap();
        f.recorder.set_notes("good burn").unwrap();
        f.recorder.session().unwrap().session_id.clone()
    }

    #[tokio::test]
    async fn test_commit_success_clears_state_and_resets_clock() {
        let mut f = fixture();
        seed_two_route_session(&mut f);
        f.time.advance(3600);
        f.api.script_commit(Ok(CommitAck {
            ok: true,
            session_id: Some("s1".to_string()),
            error: None,
        }));

        let server_id = f.recorder.commit().await.unwrap();
        assert_eq!(server_id, "s1");

        // Local session destroyed, mirror cleared, clock back to zero
        assert!(f.recorder.session().is_none());
        assert!(f.repository.mirrored().is_none());
        assert_eq!(f.recorder.clock().state(), ClockState::Stopped);
        assert_eq!(f.recorder.clock().display(), "00:00:00");

        // Exactly one submission with both routes in insertion order and
        // the sentinel mapping intact
        let payloads = f.api.payloads();
        assert_eq!(payloads.len(), 1);
        let payload = &payloads[0];
        assert_eq!(payload.routes.len(), 2);
        assert_eq!(payload.routes[0].grade_system, OTHER_GRADE_SYSTEM);
        assert_eq!(
            payload.routes[0].grade_system_label.as_deref(),
            Some("Local Gym")
        );
        assert!(payload.routes[0].sent);
        assert_eq!(payload.routes[1].grade_label, "V3");
        assert!(payload.session.ended_at > payload.session.started_at);
        assert_eq!(payload.session.notes.as_deref(), Some("good burn"));
    }

    #[tokio::test]
    async fn test_commit_failure_retains_session_for_retry() {
        let mut f = fixture();
        let local_id = seed_two_route_session(&mut f);
        f.api
            .script_commit(Err(BelayError::api("db unavailable")));

        let err = f.recorder.commit().await.unwrap_err();
        assert!(err.is_retryable());

        // Nothing lost: same session, same routes, same notes, mirror
        // intact, clock still running
        let session = f.recorder.session().unwrap();
        assert_eq!(session.session_id, local_id);
        assert_eq!(session.routes.len(), 2);
        assert_eq!(session.notes, "good burn");
        assert!(f.repository.mirrored().is_some());
        assert!(f.recorder.clock().is_running());
        assert!(!f.recorder.is_committing());

        // Retry resubmits the same route set and succeeds
        f.api.script_commit(Ok(CommitAck {
            ok: true,
            session_id: Some("s2".to_string()),
            error: None,
        }));
        f.recorder.commit().await.unwrap();
        assert!(f.recorder.session().is_none());

        let payloads = f.api.payloads();
        assert_eq!(payloads.len(), 2);
        assert_eq!(payloads[0].routes, payloads[1].routes);
    }

    #[tokio::test]
    async fn test_commit_without_session_is_an_error() {
        let mut f = fixture();
        let err = f.recorder.commit().await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_mutations_blocked_while_committing() {
        let mut f = fixture();
        f.recorder.start();
        f.recorder.add_route(some_route("V2")).unwrap();
        let route_id = f.recorder.session().unwrap().routes[0].id.clone();

        // Simulate the in-flight window of the commit suspension point
        f.recorder.committing = true;

        assert!(f.recorder.add_route(some_route("V5")).unwrap_err().is_validation());
        assert!(f.recorder.update_attempts(&route_id, 1).unwrap_err().is_validation());
        assert!(f.recorder.toggle_sent(&route_id).unwrap_err().is_validation());
        assert!(f.recorder.remove_route(&route_id).unwrap_err().is_validation());
        assert!(f.recorder.set_notes("nope").unwrap_err().is_validation());

        // State unchanged
        let session = f.recorder.session().unwrap();
        assert_eq!(session.routes.len(), 1);
        assert_eq!(session.routes[0].attempts, 0);
    }

    #[test]
    fn test_elapsed_display_advances_with_time_source() {
        let mut f = fixture();
        f.recorder.start();
        f.time.advance(75);
        assert_eq!(f.recorder.elapsed_display(), "00:01:15");

        f.recorder.pause();
        f.time.advance(600);
        assert_eq!(f.recorder.elapsed_display(), "00:01:15");

        f.recorder.resume_clock();
        f.time.advance(45);
        assert_eq!(f.recorder.elapsed_display(), "00:02:00");
    }
}
