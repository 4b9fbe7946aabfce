//! Session domain model.
//!
//! This module contains the core `Session` and `Route` entities that
//! represent an in-progress climbing session in the domain layer. It is the
//! "pure" model that the recorder operates on, independent of the durable
//! mirror format or the wire format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{BelayError, Result};

/// Sentinel grade-system id meaning "other/custom system".
///
/// The server expects this exact integer for routes graded outside the
/// catalog; the custom name travels in `grade_system_label`.
pub const OTHER_GRADE_SYSTEM: i64 = 999;

/// Maximum length of a custom grade-system name.
pub const MAX_SYSTEM_LABEL_LEN: usize = 12;
/// Maximum length of a grade label.
pub const MAX_GRADE_LABEL_LEN: usize = 8;
/// Maximum length of a route description.
pub const MAX_DESCRIPTION_LEN: usize = 25;

/// A single climbing problem attempted during a session.
///
/// Route ids are generated client-side and are not meaningful to the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: String,
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

impl Route {
    /// Adjusts the attempt counter by `delta`, clamped to a minimum of 0.
    pub fn adjust_attempts(&mut self, delta: i32) {
        self.attempts = self.attempts.saturating_add_signed(delta);
    }

    /// Flips the sent flag.
    ///
    /// The first send stamps `sent_at` and forces `attempts >= 1` (a route
    /// cannot be sent with zero recorded attempts). Un-sending clears
    /// `sent_at` but never reduces `attempts`.
    pub fn toggle_sent(&mut self, now: DateTime<Utc>) {
        if self.sent {
            self.sent = false;
            self.sent_at = None;
        } else {
            self.sent = true;
            self.sent_at = Some(now);
            self.attempts = self.attempts.max(1);
        }
    }
}

/// Validated input for adding a route to a session.
#[derive(Debug, Clone, Default)]
pub struct NewRoute {
    pub grade_system: i64,
    pub grade_system_label: Option<String>,
    pub grade_label: String,
    pub description: Option<String>,
}

impl NewRoute {
    /// Validates the input and builds a `Route` with a fresh local id.
    ///
    /// # Errors
    ///
    /// Returns `BelayError::Validation` if the grade label is empty, if the
    /// grade system is the "other" sentinel without a custom name, or if a
    /// field exceeds its length bound. Nothing is mutated on rejection.
    pub fn into_route(self) -> Result<Route> {
        let grade_label = self.grade_label.trim().to_string();
        if grade_label.is_empty() {
            return Err(BelayError::validation("Grade label must not be empty"));
        }
        if grade_label.chars().count() > MAX_GRADE_LABEL_LEN {
            return Err(BelayError::validation(format!(
                "Grade label must be at most {} characters",
                MAX_GRADE_LABEL_LEN
            )));
        }

        let grade_system_label = match self.grade_system_label {
            Some(label) => {
                let label = label.trim().to_string();
                if label.is_empty() { None } else { Some(label) }
            }
            None => None,
        };
        if self.grade_system == OTHER_GRADE_SYSTEM {
            match &grade_system_label {
                None => {
                    return Err(BelayError::validation(
                        "A custom grade system needs a name",
                    ));
                }
                Some(label) if label.chars().count() > MAX_SYSTEM_LABEL_LEN => {
                    return Err(BelayError::validation(format!(
                        "Custom system name must be at most {} characters",
                        MAX_SYSTEM_LABEL_LEN
                    )));
                }
                Some(_) => {}
            }
        }

        let description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        if let Some(desc) = &description {
            if desc.chars().count() > MAX_DESCRIPTION_LEN {
                return Err(BelayError::validation(format!(
                    "Description must be at most {} characters",
                    MAX_DESCRIPTION_LEN
                )));
            }
        }

        Ok(Route {
            id: Uuid::new_v4().to_string(),
            grade_system: self.grade_system,
            // The custom name only makes sense for the sentinel system.
            grade_system_label: if self.grade_system == OTHER_GRADE_SYSTEM {
                grade_system_label
            } else {
                None
            },
            grade_label,
            description,
            attempts: 0,
            sent: false,
            sent_at: None,
        })
    }
}

/// One continuous climbing outing being actively recorded on-device.
///
/// A `Session` exists from the user's explicit "start" until a successful
/// commit destroys it. `ended_at` is deliberately absent: it is captured at
/// commit time only and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub session_id: String,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub routes: Vec<Route>,
}

impl Session {
    /// Creates a fresh session with a client-generated id and no routes.
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            started_at,
            notes: String::new(),
            routes: Vec::new(),
        }
    }

    /// Appends a validated route at the end of the list, preserving
    /// insertion order.
    pub fn add_route(&mut self, new_route: NewRoute) -> Result<&Route> {
        let route = new_route.into_route()?;
        self.routes.push(route);
        // Safe to unwrap because we just pushed an element
        Ok(self.routes.last().unwrap())
    }

    /// Looks up a route by its local id.
    pub fn route(&self, route_id: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.id == route_id)
    }

    fn route_mut(&mut self, route_id: &str) -> Option<&mut Route> {
        self.routes.iter_mut().find(|r| r.id == route_id)
    }

    /// Adjusts a route's attempt counter by `delta`, clamped at 0.
    ///
    /// Returns `false` when no route with that id exists (no-op).
    pub fn update_attempts(&mut self, route_id: &str, delta: i32) -> bool {
        match self.route_mut(route_id) {
            Some(route) => {
                route.adjust_attempts(delta);
                true
            }
            None => false,
        }
    }

    /// Flips a route's sent flag per the send invariant.
    ///
    /// Returns `false` when no route with that id exists (no-op).
    pub fn toggle_sent(&mut self, route_id: &str, now: DateTime<Utc>) -> bool {
        match self.route_mut(route_id) {
            Some(route) => {
                route.toggle_sent(now);
                true
            }
            None => false,
        }
    }

    /// Deletes a route from the list.
    ///
    /// Returns `false` when no route with that id exists (no-op).
    pub fn remove_route(&mut self, route_id: &str) -> bool {
        let before = self.routes.len();
        self.routes.retain(|r| r.id != route_id);
        self.routes.len() != before
    }

    /// Replaces the session notes.
    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    /// Count of routes with `sent = true`.
    pub fn sent_count(&self) -> usize {
        self.routes.iter().filter(|r| r.sent).count()
    }

    /// Sum of attempts across all routes.
    pub fn total_attempts(&self) -> u32 {
        self.routes.iter().map(|r| r.attempts).sum()
    }
}
