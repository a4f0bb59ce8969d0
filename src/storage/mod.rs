//! Trial history sources.
//!
//! Relative samplers never own trial history. Each sampling round reads a
//! point-in-time snapshot through the [`TrialSource`] trait, so any backend
//! that can list the trials of a study can drive a sampler.
//!
//! | Source | Description |
//! |--------|-------------|
//! | [`MemoryStorage`] | In-memory `Vec` behind a read-write lock |
//! | `Vec<FrozenTrial>` | A fixed history, handy in tests and replays |
//!
//! # Implementing a custom source
//!
//! Implement [`TrialSource::get_trials`] and map backend failures to
//! [`Error::Storage`](crate::Error::Storage):
//!
//! ```
//! use relative_sampler::storage::TrialSource;
//! use relative_sampler::{Error, FrozenTrial, Result};
//!
//! struct Offline;
//!
//! impl TrialSource for Offline {
//!     fn get_trials(&self) -> Result<Vec<FrozenTrial>> {
//!         Err(Error::Storage("database unreachable".into()))
//!     }
//! }
//!
//! assert!(Offline.get_trials().is_err());
//! ```

mod memory;
pub use memory::MemoryStorage;

use crate::error::Result;
use crate::trial::FrozenTrial;

/// Read access to the trials of one study.
///
/// Implementations must be `Send + Sync` because one source is shared by
/// concurrently running trial workers.
pub trait TrialSource: Send + Sync {
    /// Returns a consistent snapshot of all trials (every state), ordered by
    /// trial number.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`](crate::Error::Storage) when the backend
    /// cannot be read.
    fn get_trials(&self) -> Result<Vec<FrozenTrial>>;
}

impl TrialSource for Vec<FrozenTrial> {
    fn get_trials(&self) -> Result<Vec<FrozenTrial>> {
        Ok(self.clone())
    }
}
