//! Resolution policy knobs

use serde::{Deserialize, Serialize};

/// What to do when a valid rank or action has no table data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingDataPolicy {
    /// Return an error outcome naming the missing data
    Fail,
    /// Log a warning and resolve as a plain miss
    FallbackToMiss,
}

impl Default for MissingDataPolicy {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            MissingDataPolicy::Fail
        } else {
            MissingDataPolicy::FallbackToMiss
        }
    }
}

/// Tunable resolution behavior
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionPolicy {
    /// Classify rolls on the column-shifted rank instead of the ability rank
    #[serde(default)]
    pub classify_on_shifted_rank: bool,
    #[serde(default)]
    pub missing_data: MissingDataPolicy,
}
