//! Saving-State Indicator
//!
//! Per-category Done / Saving / Saved flag derived from queue occupancy.
//!
//! ```text
//! Done --(enqueue)--> Saving --(queue drains to 0)--> Saved --(reset delay)--> Done
//!                       ^   |                            |
//!                       |   +--(drained, send failed)--> Done
//!                       +-------------(enqueue)----------+
//! ```

use crate::domain::{Category, PerCategory};
use crate::helpers::Debouncer;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Indicator state for one category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SavingState {
    /// Idle, nothing to show
    #[default]
    Done,
    /// Edits for this category are queued
    Saving,
    /// Queue drained, briefly shown before returning to Done
    Saved,
}

/// A single indicator transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavingTransition {
    pub category: Category,
    pub state: SavingState,
}

/// Saving indicators for every category
#[derive(Debug, Clone)]
pub struct SavingIndicator {
    states: PerCategory<SavingState>,
    resets: PerCategory<Debouncer>,
    errors: PerCategory<Option<Arc<str>>>,
}

impl SavingIndicator {
    /// Create idle indicators that hold "Saved" for `reset_delay`
    pub fn new(reset_delay: Duration) -> Self {
        Self {
            states: PerCategory::default(),
            resets: PerCategory::from_fn(|_| Debouncer::new(reset_delay)),
            errors: PerCategory::default(),
        }
    }

    pub fn state(&self, category: Category) -> SavingState {
        self.states[category]
    }

    pub fn states(&self) -> PerCategory<SavingState> {
        self.states
    }

    /// Last save failure for a category, if not yet superseded
    pub fn error(&self, category: Category) -> Option<&str> {
        self.errors[category].as_deref()
    }

    pub fn set_error(&mut self, category: Category, message: impl Into<Arc<str>>) {
        self.errors[category] = Some(message.into());
    }

    /// Returns `true` if an error was cleared
    pub fn clear_error(&mut self, category: Category) -> bool {
        self.errors[category].take().is_some()
    }

    /// Recompute every category from the queued edit counts
    ///
    /// A category with queued edits is Saving. A Saving category with none
    /// left becomes Saved and arms its reset, unless its last send failed:
    /// then it drops straight to Done and the error is what the view shows.
    pub fn recompute(
        &mut self,
        counts: &PerCategory<usize>,
        now: Instant,
    ) -> Vec<SavingTransition> {
        let mut changed = Vec::new();

        for category in Category::ALL {
            let state = &mut self.states[category];
            if counts[category] > 0 {
                self.resets[category].cancel();
                if *state != SavingState::Saving {
                    *state = SavingState::Saving;
                    changed.push(SavingTransition {
                        category,
                        state: SavingState::Saving,
                    });
                }
            } else if *state == SavingState::Saving {
                let next = if self.errors[category].is_some() {
                    SavingState::Done
                } else {
                    self.resets[category].trigger(now);
                    SavingState::Saved
                };
                *state = next;
                changed.push(SavingTransition {
                    category,
                    state: next,
                });
            }
        }

        changed
    }

    /// Fire any elapsed reset timers
    ///
    /// A reset only lands if the category is not Saving at fire time.
    pub fn fire_resets(&mut self, now: Instant) -> Vec<SavingTransition> {
        let mut changed = Vec::new();

        for category in Category::ALL {
            if !self.resets[category].fire_if_due(now) {
                continue;
            }
            let state = &mut self.states[category];
            if *state != SavingState::Saving && *state != SavingState::Done {
                *state = SavingState::Done;
                changed.push(SavingTransition {
                    category,
                    state: SavingState::Done,
                });
            }
        }

        changed
    }

    /// Earliest pending reset deadline
    pub fn next_deadline(&self) -> Option<Instant> {
        Category::ALL
            .into_iter()
            .filter_map(|c| self.resets[c].deadline())
            .min()
    }
}
