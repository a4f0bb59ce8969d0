use core::sync::atomic::{AtomicU64, Ordering};
use parking_lot::RwLock;

use super::TrialSource;
use crate::error::Result;
use crate::trial::FrozenTrial;

/// In-memory trial storage.
///
/// A `Vec<FrozenTrial>` behind a read-write lock that keeps trials
/// sorted by number and hands out fresh trial numbers.
///
/// # Examples
///
/// ```
/// use relative_sampler::storage::{MemoryStorage, TrialSource};
/// use relative_sampler::FrozenTrial;
///
/// let storage = MemoryStorage::new();
/// let number = storage.next_trial_number();
/// storage.push(FrozenTrial::builder(number).complete(0.5).build()?);
///
/// assert_eq!(storage.get_trials()?.len(), 1);
/// # Ok::<(), relative_sampler::Error>(())
/// ```
pub struct MemoryStorage {
    trials: RwLock<Vec<FrozenTrial>>,
    next_number: AtomicU64,
}

impl MemoryStorage {
    /// Creates a new, empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            trials: RwLock::new(Vec::new()),
            next_number: AtomicU64::new(0),
        }
    }

    /// Creates an in-memory store pre-populated with `trials`.
    #[must_use]
    pub fn with_trials(mut trials: Vec<FrozenTrial>) -> Self {
        trials.sort_by_key(|t| t.number);
        let next_number = trials.last().map_or(0, |t| t.number.saturating_add(1));
        Self {
            trials: RwLock::new(trials),
            next_number: AtomicU64::new(next_number),
        }
    }

    /// Stores `trial`, replacing any stored trial with the same number.
    pub fn push(&self, trial: FrozenTrial) {
        self.next_number
            .fetch_max(trial.number.saturating_add(1), Ordering::SeqCst);
        let mut trials = self.trials.write();
        match trials.binary_search_by_key(&trial.number, |t| t.number) {
            Ok(idx) => trials[idx] = trial,
            Err(idx) => trials.insert(idx, trial),
        }
    }

    /// Atomically returns the next unused trial number.
    pub fn next_trial_number(&self) -> u64 {
        self.next_number.fetch_add(1, Ordering::SeqCst)
    }

    /// Number of stored trials.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trials.read().len()
    }

    /// Returns `true` if no trial is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trials.read().is_empty()
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl TrialSource for MemoryStorage {
    fn get_trials(&self) -> Result<Vec<FrozenTrial>> {
        Ok(self.trials.read().clone())
    }
}
