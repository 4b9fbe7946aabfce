//! Wiring for a production recorder.

use std::sync::Arc;

use belay_core::clock::SystemTimeSource;
use belay_core::error::Result;
use belay_infrastructure::{FileSessionStorage, HttpClimbApi};

use crate::recorder::SessionRecorder;

/// Builds a recorder over the default storage location (`~/.belay`), the
/// real server, and the system clock, then attempts to resume any mirrored
/// session from a previous run.
///
/// # Errors
///
/// Returns an error if the storage directory or HTTP client cannot be set
/// up. A missing or unreadable mirror is not an error.
pub fn default_recorder(base_url: impl Into<String>) -> Result<SessionRecorder> {
    let storage = Arc::new(FileSessionStorage::default_location()?);
    let api = Arc::new(HttpClimbApi::new(base_url)?);
    let time = Arc::new(SystemTimeSource);

    let mut recorder = SessionRecorder::new(storage, api, time);
    recorder.resume();
    Ok(recorder)
}
