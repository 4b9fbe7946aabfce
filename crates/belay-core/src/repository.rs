//! Storage and server seams.
//!
//! These traits keep the domain layer independent of the concrete durable
//! storage and HTTP client; infrastructure provides the real implementations
//! and tests provide mocks.

use async_trait::async_trait;

use crate::error::Result;
use crate::grades::GradeSystemEntry;
use crate::session::Session;
use crate::wire::{CommitAck, CommitSessionPayload};

/// Durable mirror of the current session plus the user's default grade
/// system. Exclusively owned by the session store; one slot, not a list —
/// there is at most one in-progress session per device.
pub trait SessionRepository: Send + Sync {
    /// Writes the current session, replacing any previous mirror.
    fn save(&self, session: &Session) -> Result<()>;

    /// Reads the mirrored session, `None` when no session is active.
    fn load(&self) -> Result<Option<Session>>;

    /// Removes the mirror.
    fn clear(&self) -> Result<()>;

    /// The user-chosen default grade system, read once at session start.
    fn load_default_grade_system(&self) -> Result<Option<i64>>;

    /// Persists the user-chosen default grade system.
    fn save_default_grade_system(&self, grade_id: i64) -> Result<()>;
}

/// The server's session-relevant REST surface.
#[async_trait]
pub trait ClimbApi: Send + Sync {
    /// Fetches the grade-system catalog.
    async fn fetch_grade_systems(&self) -> Result<Vec<GradeSystemEntry>>;

    /// Submits a finished session. A transport failure or non-success
    /// acknowledgement is an error; the caller keeps local state intact.
    async fn commit_session(&self, payload: &CommitSessionPayload) -> Result<CommitAck>;
}
