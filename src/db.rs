//! The date-keyed task store and date helpers.
//!
//! `TaskStore` maps a calendar day to its bucket of tasks. It is the single
//! source of truth for all persisted state and is saved as one JSON blob
//! through a [`Storage`] backend.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::StorageError;
use crate::storage::{Storage, STORE_KEY};
use crate::task::Task;

/// Date-keyed task buckets.
///
/// A date is present only while its bucket is non-empty. Tasks inside a
/// bucket keep insertion order.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskStore {
    buckets: BTreeMap<NaiveDate, Vec<Task>>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the store from `storage`, starting empty if nothing is stored or
    /// the stored blob cannot be read or parsed.
    pub fn load(storage: &dyn Storage) -> Self {
        match storage.get_item(STORE_KEY) {
            Ok(Some(raw)) => match TaskStore::from_json(&raw) {
                Ok(store) => {
                    info!(days = store.buckets.len(), tasks = store.len(), "loaded task store");
                    store
                }
                Err(e) => {
                    warn!(error = %e, "stored tasks are malformed, starting fresh");
                    TaskStore::default()
                }
            },
            Ok(None) => {
                debug!("no stored tasks, starting empty");
                TaskStore::default()
            }
            Err(e) => {
                warn!(error = %e, "failed to read stored tasks, starting fresh");
                TaskStore::default()
            }
        }
    }

    /// Serialise the whole store and overwrite the stored blob.
    pub fn save(&self, storage: &mut dyn Storage) -> Result<(), StorageError> {
        let data = self.to_json()?;
        storage.set_item(STORE_KEY, &data)?;
        debug!(days = self.buckets.len(), tasks = self.len(), "saved task store");
        Ok(())
    }

    /// Parse a serialised store. Empty buckets are dropped.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let mut store: TaskStore = serde_json::from_str(raw)?;
        store.buckets.retain(|_, tasks| !tasks.is_empty());
        Ok(store)
    }

    /// Serialise the store as a compact JSON object keyed by `YYYY-MM-DD`.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.buckets)
    }

    /// Allocate an id from the creation instant, bumped past every existing id.
    /// `None` once an existing id already sits at `u64::MAX`.
    pub fn next_id(&self, now_millis: u64) -> Option<u64> {
        let max_existing = self
            .buckets
            .values()
            .flatten()
            .map(|t| t.id)
            .max();
        match max_existing {
            Some(max) if max >= now_millis => max.checked_add(1),
            _ => Some(now_millis),
        }
    }

    /// Append a task to `date`'s bucket. Returns the new id, or `None` when
    /// `text` is blank or no larger id is left.
    pub fn add(&mut self, date: NaiveDate, text: &str, now_millis: u64) -> Option<u64> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let Some(id) = self.next_id(now_millis) else {
            warn!(%date, "task ids exhausted, not adding");
            return None;
        };
        self.buckets.entry(date).or_default().push(Task::new(id, text));
        debug!(%date, id, "added task");
        Some(id)
    }

    /// Flip completion of a task. Returns the new state, or `None` if the
    /// task does not exist.
    pub fn toggle(&mut self, date: NaiveDate, id: u64) -> Option<bool> {
        let task = self.get_mut(date, id)?;
        let completed = task.toggle();
        debug!(%date, id, completed, "toggled task");
        Some(completed)
    }

    /// Remove a task, dropping the date key when its bucket empties.
    pub fn delete(&mut self, date: NaiveDate, id: u64) -> Option<Task> {
        let bucket = self.buckets.get_mut(&date)?;
        let idx = bucket.iter().position(|t| t.id == id)?;
        let removed = bucket.remove(idx);
        if bucket.is_empty() {
            self.buckets.remove(&date);
        }
        debug!(%date, id, "deleted task");
        Some(removed)
    }

    /// Replace a task's text. Blank text and unknown ids are ignored.
    pub fn edit(&mut self, date: NaiveDate, id: u64, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        match self.get_mut(date, id) {
            Some(task) => {
                task.text = text.to_string();
                debug!(%date, id, "edited task");
                true
            }
            None => false,
        }
    }

    /// Delete every completed task on `date`. Returns how many were removed.
    pub fn clear_completed(&mut self, date: NaiveDate) -> usize {
        let Some(bucket) = self.buckets.get_mut(&date) else {
            return 0;
        };
        let before = bucket.len();
        bucket.retain(|t| !t.completed);
        let removed = before - bucket.len();
        if bucket.is_empty() {
            self.buckets.remove(&date);
        }
        if removed > 0 {
            debug!(%date, removed, "cleared completed tasks");
        }
        removed
    }

    /// Tasks for `date` in insertion order; empty when the day has none.
    pub fn tasks_for(&self, date: NaiveDate) -> &[Task] {
        self.buckets.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn get(&self, date: NaiveDate, id: u64) -> Option<&Task> {
        self.tasks_for(date).iter().find(|t| t.id == id)
    }

    fn get_mut(&mut self, date: NaiveDate, id: u64) -> Option<&mut Task> {
        self.buckets.get_mut(&date)?.iter_mut().find(|t| t.id == id)
    }

    pub fn has_tasks(&self, date: NaiveDate) -> bool {
        self.buckets.contains_key(&date)
    }

    /// Number of open tasks on `date`.
    pub fn pending_count(&self, date: NaiveDate) -> usize {
        self.tasks_for(date).iter().filter(|t| !t.completed).count()
    }

    /// Days that currently hold at least one task, ascending.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.buckets.keys().copied()
    }

    /// Total number of tasks across all days.
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Milliseconds since the Unix epoch on the local clock.
pub fn now_millis() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
}

/// Format a date as its storage key, `YYYY-MM-DD`.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse human-readable date input relative to `today`.
///
/// Supports:
/// - "today", "tomorrow", "yesterday"
/// - "monday".."sunday" (and "mon".."sun"): the next such day, today included
/// - "next monday" etc.: the occurrence in the following week
/// - "in 3d", "in 2w"
/// - "YYYY-MM-DD"
pub fn parse_date_input(s: &str, today: NaiveDate) -> Option<NaiveDate> {
    let s = s.trim().to_lowercase();

    match s.as_str() {
        "today" => return Some(today),
        "tomorrow" => return today.succ_opt(),
        "yesterday" => return today.pred_opt(),
        _ => {}
    }

    if let Some(rest) = s.strip_prefix("in ") {
        if let Some(nd) = rest.strip_suffix('d') {
            if let Ok(days) = nd.trim().parse::<i64>() {
                return Duration::try_days(days).and_then(|d| today.checked_add_signed(d));
            }
        }
        if let Some(nw) = rest.strip_suffix('w') {
            if let Ok(weeks) = nw.trim().parse::<i64>() {
                return Duration::try_weeks(weeks).and_then(|d| today.checked_add_signed(d));
            }
        }
    }

    let weekdays = [
        ("monday", 0), ("tuesday", 1), ("wednesday", 2), ("thursday", 3),
        ("friday", 4), ("saturday", 5), ("sunday", 6),
        ("mon", 0), ("tue", 1), ("wed", 2), ("thu", 3),
        ("fri", 4), ("sat", 5), ("sun", 6),
    ];

    let current_day = today.weekday().num_days_from_monday() as i64;
    for (day_name, target_day) in weekdays {
        let days_ahead = (target_day + 7 - current_day) % 7;
        if s == day_name {
            return today.checked_add_signed(Duration::days(days_ahead));
        }
        if s.strip_prefix("next ") == Some(day_name) {
            return today.checked_add_signed(Duration::days(days_ahead + 7));
        }
    }

    NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()
}
