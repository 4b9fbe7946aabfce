//! Wire types for the commit-session contract.
//!
//! The commit payload is a pure projection of the local session into the
//! shape the server expects. It is never stored or mutated in place; the
//! commit pipeline recomputes it fresh from the current session state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::{OTHER_GRADE_SYSTEM, Route, Session};

/// Session header as submitted to `POST /api/commit-session`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireSessionHeader {
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One route entry as submitted to the server. Local route ids are not
/// meaningful to the server and are not sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireRoute {
    pub grade_system: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade_system_label: Option<String>,
    pub grade_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub attempts: u32,
    pub sent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<DateTime<Utc>>,
}

impl WireRoute {
    fn from_route(route: &Route) -> Self {
        Self {
            grade_system: route.grade_system,
            // The custom name only travels with the sentinel system.
            grade_system_label: if route.grade_system == OTHER_GRADE_SYSTEM {
                route.grade_system_label.clone()
            } else {
                None
            },
            grade_label: route.grade_label.clone(),
            description: route.description.clone(),
            attempts: route.attempts,
            sent: route.sent,
            sent_at: route.sent_at,
        }
    }
}

/// The full request body for `POST /api/commit-session`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitSessionPayload {
    pub session: WireSessionHeader,
    pub routes: Vec<WireRoute>,
}

impl CommitSessionPayload {
    /// Projects the local session into the wire shape, with `ended_at`
    /// captured by the caller at commit time.
    pub fn from_session(session: &Session, ended_at: DateTime<Utc>) -> Self {
        Self {
            session: WireSessionHeader {
                started_at: session.started_at,
                ended_at,
                notes: if session.notes.trim().is_empty() {
                    None
                } else {
                    Some(session.notes.clone())
                },
            },
            routes: session.routes.iter().map(WireRoute::from_route).collect(),
        }
    }
}

/// The server's acknowledgement of a commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitAck {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
