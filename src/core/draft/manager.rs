//! Draft persistence manager.
//!
//! Owns the two save timers for a mounted form:
//!
//! - an **autosave interval** that serializes the full snapshot every 5
//!   seconds while armed, whether or not anything changed (at-least-once);
//! - a **debounced save** scheduled 1 second after each mutation, where a
//!   newer mutation cancels and reschedules the pending save (last
//!   mutation wins, no intermediate saves).
//!
//! Both paths write the same [`DraftRecord`] shape and update `last_saved`.
//! The timers are an owned lifecycle: [`DraftManager::start`] arms them on
//! mount and [`DraftManager::stop`] disarms them on unmount. A deadline
//! firing after unmount is a defect, not an accepted race. Deadlines are
//! driven by the UI tick via [`DraftManager::poll`], which takes the
//! current instant so tests can replay time deterministically.
//!
//! Reads are lazily expiring: a record older than seven days is deleted on
//! read and treated as absent, as is a record that no longer parses. Write
//! failures are downgraded to warnings; a full disk must never interrupt
//! editing.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::core::experience::ExperienceForm;

use super::store::DraftStore;

/// Fixed storage key for the create-experience flow.
pub const CREATE_DRAFT_KEY: &str = "experience-create-draft";

/// Version tag written into every record.
pub const DRAFT_VERSION: &str = "1";

/// Unconditional autosave period.
pub const AUTOSAVE_INTERVAL: Duration = Duration::from_secs(5);

/// Quiet period before a mutation-triggered save.
pub const DEBOUNCE_QUIET: Duration = Duration::from_secs(1);

/// Records older than this are expired on read.
pub const MAX_DRAFT_AGE_MS: i64 = 7 * 24 * 60 * 60 * 1000;

/// The persisted wrapper. Anything else touching a draft key must preserve
/// this shape for recovery to keep working.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftRecord {
    pub form_data: ExperienceForm,
    /// Save time, epoch milliseconds.
    pub timestamp: i64,
    pub version: String,
}

/// Which path produced a save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveTrigger {
    Interval,
    Debounce,
    Manual,
}

pub struct DraftManager<S: DraftStore> {
    store: S,
    key: String,
    last_saved: Option<i64>,
    armed: bool,
    next_autosave: Option<Instant>,
    debounce_at: Option<Instant>,
}

impl<S: DraftStore> DraftManager<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            last_saved: None,
            armed: false,
            next_autosave: None,
            debounce_at: None,
        }
    }

    /// Arm both timers. Called when the form mounts.
    pub fn start(&mut self, now: Instant) {
        self.armed = true;
        self.next_autosave = Some(now + AUTOSAVE_INTERVAL);
    }

    /// Disarm both timers and drop any pending deadline. Called on unmount.
    pub fn stop(&mut self) {
        self.armed = false;
        self.next_autosave = None;
        self.debounce_at = None;
    }

    /// Whether the autosave lifecycle is armed.
    pub fn is_auto_saving(&self) -> bool {
        self.armed
    }

    /// Epoch-ms timestamp of the most recent successful save, if any.
    pub fn last_saved(&self) -> Option<i64> {
        self.last_saved
    }

    /// Record a snapshot mutation: (re)schedules the debounced save one
    /// quiet period from `now`, cancelling any pending one.
    pub fn note_mutation(&mut self, now: Instant) {
        if self.armed {
            self.debounce_at = Some(now + DEBOUNCE_QUIET);
        }
    }

    /// Drive the timers. Called once per UI tick with the current snapshot.
    ///
    /// At most one save executes per call; if both deadlines have passed
    /// the debounced save wins this tick and the interval fires on the
    /// next one. No relative ordering between the two paths is guaranteed
    /// since both serialize the same snapshot.
    pub fn poll(
        &mut self,
        form: &ExperienceForm,
        now: Instant,
        wall_ms: i64,
    ) -> Option<SaveTrigger> {
        if !self.armed {
            return None;
        }

        if self.debounce_at.is_some_and(|at| now >= at) {
            self.debounce_at = None;
            return self
                .save(form, wall_ms, SaveTrigger::Debounce)
                .then_some(SaveTrigger::Debounce);
        }

        if self.next_autosave.is_some_and(|at| now >= at) {
            self.next_autosave = Some(now + AUTOSAVE_INTERVAL);
            return self
                .save(form, wall_ms, SaveTrigger::Interval)
                .then_some(SaveTrigger::Interval);
        }

        None
    }

    /// Immediate synchronous save bypassing both timers.
    pub fn manual_save(&mut self, form: &ExperienceForm, wall_ms: i64) -> bool {
        self.save(form, wall_ms, SaveTrigger::Manual)
    }

    /// Read the persisted record, lazily expiring it.
    ///
    /// A record older than [`MAX_DRAFT_AGE_MS`] is deleted and reported as
    /// absent. A record that fails to parse is treated the same way: the
    /// corrupt entry is deleted and the caller sees `None`, never an error.
    pub fn saved_draft(&mut self, wall_ms: i64) -> Option<DraftRecord> {
        let raw = match self.store.read(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "draft read failed");
                return None;
            }
        };

        let record: DraftRecord = match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "discarding corrupt draft");
                self.delete_quietly();
                return None;
            }
        };

        if wall_ms.saturating_sub(record.timestamp) > MAX_DRAFT_AGE_MS {
            tracing::info!(key = %self.key, "expiring stale draft");
            self.delete_quietly();
            return None;
        }

        Some(record)
    }

    /// Explicitly delete the persisted record (discard, or successful
    /// submission).
    pub fn clear(&mut self) {
        self.delete_quietly();
        self.last_saved = None;
    }

    fn delete_quietly(&mut self) {
        if let Err(e) = self.store.delete(&self.key) {
            tracing::warn!(key = %self.key, error = %e, "draft delete failed");
        }
    }

    fn save(&mut self, form: &ExperienceForm, wall_ms: i64, trigger: SaveTrigger) -> bool {
        let record = DraftRecord {
            form_data: form.clone(),
            timestamp: wall_ms,
            version: DRAFT_VERSION.to_string(),
        };
        let json = match serde_json::to_string(&record) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "draft serialization failed");
                return false;
            }
        };
        match self.store.write(&self.key, &json) {
            Ok(()) => {
                self.last_saved = Some(wall_ms);
                tracing::debug!(key = %self.key, ?trigger, "draft saved");
                true
            }
            Err(e) => {
                tracing::warn!(key = %self.key, ?trigger, error = %e, "draft save failed");
                false
            }
        }
    }
}
