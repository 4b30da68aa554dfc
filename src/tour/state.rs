//! Tour state machine
//!
//! States are `Inactive` and `Active(index)`. The store is the only writer of
//! tour state; hosts drive it through the operations below. Completion is
//! written through the persistence port, and any storage failure downgrades
//! the store to session-only tracking instead of reaching the caller.

use tracing::{debug, info, warn};

use crate::constants::storage::COMPLETION_KEY;
use crate::persistence::{KeyValueStore, StorageError};
use crate::tour::catalog::{StepCatalog, TourStep};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourStatus {
    Inactive,
    Active(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionReason {
    Finished,
    Skipped,
}

/// Observable transition, `None` from an operation means it was a no-op
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TourEvent {
    Started,
    StepChanged { from: usize, to: usize },
    Completed { reason: CompletionReason },
}

pub struct TourStore {
    catalog: StepCatalog,
    active: bool,
    step_index: usize,
    completed: bool,
    storage: Box<dyn KeyValueStore>,
    degraded: bool,
}

impl TourStore {
    /// Build the store and read the persisted completion flag
    pub fn new(catalog: StepCatalog, storage: Box<dyn KeyValueStore>) -> Self {
        let mut store = Self {
            catalog,
            active: false,
            step_index: 0,
            completed: false,
            storage,
            degraded: false,
        };

        match store.storage.get(COMPLETION_KEY) {
            Ok(value) => {
                store.completed = value.unwrap_or(false);
                info!(completed = store.completed, steps = store.catalog.len(), "Loaded tour state");
            }
            Err(err) => store.degrade("read", &err),
        }

        store
    }

    pub fn catalog(&self) -> &StepCatalog {
        &self.catalog
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn current_step_index(&self) -> usize {
        self.step_index
    }

    pub fn current_step(&self) -> Option<&TourStep> {
        match self.status() {
            TourStatus::Active(index) => self.catalog.get(index),
            TourStatus::Inactive => None,
        }
    }

    pub fn status(&self) -> TourStatus {
        if self.active {
            TourStatus::Active(self.current_step_index())
        } else {
            TourStatus::Inactive
        }
    }

    pub fn has_completed_walkthrough(&self) -> bool {
        self.completed
    }

    /// Hosts may auto-start the tour when the user has never finished or skipped it
    pub fn should_auto_start(&self) -> bool {
        !self.completed
    }

    /// True once storage failed and completion is tracked in memory only
    pub fn persistence_degraded(&self) -> bool {
        self.degraded
    }

    pub fn is_first_step(&self) -> bool {
        self.step_index == 0
    }

    pub fn is_last_step(&self) -> bool {
        self.step_index >= self.catalog.last_index()
    }

    pub fn start(&mut self) -> Option<TourEvent> {
        self.active = true;
        self.step_index = 0;
        info!(step = %self.step_id(), "Tour started");
        Some(TourEvent::Started)
    }

    pub fn next(&mut self) -> Option<TourEvent> {
        if !self.active {
            debug!("next() while tour inactive, ignoring");
            return None;
        }

        let last = self.catalog.last_index();
        if self.step_index >= last {
            // Clamp an out-of-range index before finishing
            self.step_index = last;
            return self.complete();
        }

        let from = self.step_index;
        self.step_index += 1;
        debug!(from, to = self.step_index, step = %self.step_id(), "Tour advanced");
        Some(TourEvent::StepChanged { from, to: self.step_index })
    }

    pub fn previous(&mut self) -> Option<TourEvent> {
        if !self.active || self.step_index == 0 {
            return None;
        }

        let from = self.step_index.min(self.catalog.last_index());
        self.step_index = from - 1;
        debug!(from, to = self.step_index, step = %self.step_id(), "Tour went back");
        Some(TourEvent::StepChanged { from, to: self.step_index })
    }

    pub fn skip(&mut self) -> Option<TourEvent> {
        if !self.active {
            return None;
        }
        self.finish(CompletionReason::Skipped)
    }

    /// Close the tour without recording completion, used when the host
    /// screen carrying the targets goes away
    pub fn dismiss(&mut self) -> Option<TourEvent> {
        if !self.active {
            return None;
        }
        debug!(step = %self.step_id(), "Tour dismissed");
        self.active = false;
        self.step_index = 0;
        None
    }

    /// End the tour and durably record completion
    pub fn complete(&mut self) -> Option<TourEvent> {
        self.finish(CompletionReason::Finished)
    }

    /// Clear the persisted completion flag and start from the first step
    pub fn restart(&mut self) -> Option<TourEvent> {
        self.completed = false;
        if !self.degraded {
            if let Err(err) = self.storage.clear(COMPLETION_KEY) {
                self.degrade("clear", &err);
            }
        }
        info!("Tour restarted, completion flag cleared");
        self.start()
    }

    fn finish(&mut self, reason: CompletionReason) -> Option<TourEvent> {
        let last_step = self.step_index;
        self.active = false;
        self.step_index = 0;
        self.completed = true;

        if !self.degraded {
            if let Err(err) = self.storage.set(COMPLETION_KEY, true) {
                self.degrade("write", &err);
            }
        }

        info!(?reason, last_step, persisted = !self.degraded, "Tour completed");
        Some(TourEvent::Completed { reason })
    }

    fn degrade(&mut self, operation: &str, err: &StorageError) {
        warn!(operation, error = %err, "Tour storage unavailable, completion kept in memory for this session");
        self.degraded = true;
    }

    fn step_id(&self) -> &str {
        self.catalog
            .get(self.step_index)
            .map(|s| s.id.as_str())
            .unwrap_or("<none>")
    }
}
