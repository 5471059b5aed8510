//! Immutable per-session view of the loaded datasets

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Institution, Resource};

/// Both datasets as loaded at startup. Never mutated afterwards; a failed
/// load leaves the corresponding list empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectorySnapshot {
    pub resources: Vec<Resource>,
    pub institutions: Vec<Institution>,
    pub retrieved_at: DateTime<Utc>,
}

impl DirectorySnapshot {
    #[must_use]
    pub fn new(resources: Vec<Resource>, institutions: Vec<Institution>) -> Self {
        Self {
            resources,
            institutions,
            retrieved_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    /// Look up an institution by name, case-insensitive and trimmed.
    #[must_use]
    pub fn find_institution(&self, name: &str) -> Option<&Institution> {
        let wanted = name.trim();
        self.institutions
            .iter()
            .find(|institution| institution.name.trim().eq_ignore_ascii_case(wanted))
    }
}
