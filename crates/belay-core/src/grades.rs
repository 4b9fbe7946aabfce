//! Grade-system catalog.
//!
//! The catalog is fetched read-only from the server (`GET /api/grades`) and
//! used to resolve display labels and grade presets. A failed fetch yields an
//! empty catalog; the recorder degrades to free-text grade entry and the
//! "other" fallback path keeps working.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::session::{OTHER_GRADE_SYSTEM, Route};

/// One grade system as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeSystemEntry {
    pub grade_id: i64,
    pub grade_system: String,
    #[serde(default)]
    pub grades: Vec<String>,
}

/// Lookup table over the fetched grade systems.
#[derive(Debug, Clone, Default)]
pub struct GradeCatalog {
    entries: Vec<GradeSystemEntry>,
    by_id: HashMap<i64, usize>,
}

impl GradeCatalog {
    /// Builds a catalog from fetched entries, preserving server order.
    pub fn new(entries: Vec<GradeSystemEntry>) -> Self {
        let by_id = entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| (entry.grade_id, idx))
            .collect();
        Self { entries, by_id }
    }

    /// The systems in server order, for selection lists.
    pub fn entries(&self) -> &[GradeSystemEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up a system by catalog id.
    pub fn get(&self, grade_id: i64) -> Option<&GradeSystemEntry> {
        self.by_id.get(&grade_id).map(|&idx| &self.entries[idx])
    }

    /// Preset grade labels for a system, empty when the id is unknown or
    /// refers to the "other" sentinel.
    pub fn grades_for(&self, grade_id: i64) -> &[String] {
        self.get(grade_id).map(|e| e.grades.as_slice()).unwrap_or(&[])
    }

    /// Display label for a route's grade system.
    ///
    /// The "other" sentinel shows the route's custom label (or the literal
    /// `Other` if absent). Catalog ids resolve to the system name, falling
    /// back to `System {id}` when the id is unresolvable.
    pub fn system_label(&self, route: &Route) -> String {
        if route.grade_system == OTHER_GRADE_SYSTEM {
            return route
                .grade_system_label
                .clone()
                .unwrap_or_else(|| "Other".to_string());
        }
        match self.get(route.grade_system) {
            Some(entry) => entry.grade_system.clone(),
            None => format!("System {}", route.grade_system),
        }
    }
}
