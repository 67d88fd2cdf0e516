//! Sleep duration thresholds.
//!
//! A single configurable duration separates sufficient from insufficient
//! sleep. The default is [`DEFAULT_THRESHOLD_HOURS`] (7 hours).
//!
//! # Example
//!
//! ```
//! use sleeplog_core::{SleepLevel, Threshold};
//!
//! let threshold = Threshold::default();
//! assert_eq!(threshold.evaluate(5.0), SleepLevel::Insufficient);
//! assert_eq!(threshold.evaluate(7.5), SleepLevel::Sufficient);
//!
//! println!("{}", threshold.evaluate(5.0).action());
//! ```

use serde::{Deserialize, Serialize};

use sleeplog_types::DEFAULT_THRESHOLD_HOURS;

/// Margin below the threshold that still counts as "close".
pub const NEAR_THRESHOLD_HOURS: f64 = 1.0;

/// Category of a night's sleep relative to the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SleepLevel {
    /// Slept less than the threshold.
    Insufficient,
    /// Slept at least the threshold.
    Sufficient,
}

impl SleepLevel {
    /// Get the suggested action for this level.
    pub fn action(&self) -> &'static str {
        match self {
            SleepLevel::Insufficient => "Try to sleep earlier tonight",
            SleepLevel::Sufficient => "No action needed",
        }
    }
}

/// Threshold evaluator for sleep durations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    hours: f64,
}

impl Default for Threshold {
    fn default() -> Self {
        Self {
            hours: DEFAULT_THRESHOLD_HOURS,
        }
    }
}

impl Threshold {
    /// Create a threshold at `hours`.
    ///
    /// Returns `None` unless `hours` is finite and positive.
    pub fn new(hours: f64) -> Option<Self> {
        (hours.is_finite() && hours > 0.0).then_some(Self { hours })
    }

    /// Threshold duration in hours.
    pub fn hours(&self) -> f64 {
        self.hours
    }

    /// Check whether `hours` falls below this threshold.
    pub fn is_below(&self, hours: f64) -> bool {
        crate::stats::below_threshold(hours, self.hours)
    }

    /// Check whether `hours` is below the threshold by less than
    /// [`NEAR_THRESHOLD_HOURS`].
    pub fn is_near(&self, hours: f64) -> bool {
        self.is_below(hours) && hours >= self.hours - NEAR_THRESHOLD_HOURS
    }

    /// Categorize a duration.
    pub fn evaluate(&self, hours: f64) -> SleepLevel {
        if self.is_below(hours) {
            SleepLevel::Insufficient
        } else {
            SleepLevel::Sufficient
        }
    }
}
