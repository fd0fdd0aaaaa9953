//! In-memory list of recent predictions, newest first.
//!
//! Nothing here is persisted; the list lives as long as the process.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::predict::Diagnosis;

pub const DEFAULT_RECENT_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentResult {
    pub disease: String,
    pub confidence: f64,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct RecentResults {
    items: VecDeque<RecentResult>,
    limit: usize,
}

impl Default for RecentResults {
    fn default() -> Self {
        Self::new(DEFAULT_RECENT_LIMIT)
    }
}

impl RecentResults {
    /// A list holding at most `limit` entries (at least one).
    #[must_use]
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            items: VecDeque::with_capacity(limit),
            limit,
        }
    }

    /// Prepend a timestamped summary, dropping the oldest beyond the limit.
    pub fn record(&mut self, diagnosis: &Diagnosis, at: DateTime<Utc>) {
        self.items.push_front(RecentResult {
            disease: diagnosis.disease().to_string(),
            confidence: diagnosis.confidence(),
            recorded_at: at,
        });
        self.items.truncate(self.limit);
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecentResult> {
        self.items.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<RecentResult> {
        self.items.iter().cloned().collect()
    }
}
