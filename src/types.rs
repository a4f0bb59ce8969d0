//! Core types shared by the trial model and the samplers.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The state of a trial in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TrialState {
    /// The trial is currently running.
    #[default]
    Running,
    /// The trial completed successfully.
    Complete,
    /// The trial was stopped early by a pruner.
    Pruned,
    /// The trial failed with an error.
    Fail,
}

impl TrialState {
    /// Returns `true` once the trial has left the `Running` state.
    #[must_use]
    pub fn is_finished(self) -> bool {
        !matches!(self, Self::Running)
    }
}

impl core::fmt::Display for TrialState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::Running => "Running",
            Self::Complete => "Complete",
            Self::Pruned => "Pruned",
            Self::Fail => "Fail",
        };
        f.write_str(name)
    }
}
