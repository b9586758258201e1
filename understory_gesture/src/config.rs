// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunables of the gesture trackers.

use core::fmt;

/// Default number of taps that make up a gesture (a double tap).
pub const DEFAULT_NUM_TAPS_REQUIRED: u32 = 2;
/// Default longest gap, in seconds, between the end of one tap and the end of the next.
pub const DEFAULT_MAX_DURATION_BETWEEN_TAPS: f64 = 0.2;
/// Default longest press, in seconds, still counted as a tap.
pub const DEFAULT_MAX_DURATION_CONSIDERED_TAP: f64 = 0.2;
/// Default number of samples a swipe tracker keeps.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Invalid tracker configuration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A tap gesture needs at least one tap.
    ZeroTapsRequired,
    /// A duration was negative or not a number.
    InvalidDuration {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A swipe tracker needs room for at least one sample.
    ZeroCapacity,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroTapsRequired => f.write_str("num_taps_required must be at least 1"),
            Self::InvalidDuration { field, value } => {
                write!(f, "{field} must be a non-negative number of seconds, got {value}")
            }
            Self::ZeroCapacity => f.write_str("history_capacity must be at least 1"),
        }
    }
}

impl core::error::Error for ConfigError {}

/// Configuration of a [`TapTracker`](crate::tap::TapTracker).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TapConfig {
    /// Consecutive taps needed to fire the gesture.
    pub num_taps_required: u32,
    /// Longest gap, in seconds, between consecutive tap ends.
    pub max_duration_between_taps: f64,
    /// Longest press, in seconds, still counted as a tap.
    pub max_duration_considered_tap: f64,
}

impl Default for TapConfig {
    fn default() -> Self {
        Self {
            num_taps_required: DEFAULT_NUM_TAPS_REQUIRED,
            max_duration_between_taps: DEFAULT_MAX_DURATION_BETWEEN_TAPS,
            max_duration_considered_tap: DEFAULT_MAX_DURATION_CONSIDERED_TAP,
        }
    }
}

impl TapConfig {
    /// Check every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_taps_required == 0 {
            return Err(ConfigError::ZeroTapsRequired);
        }
        check_duration("max_duration_between_taps", self.max_duration_between_taps)?;
        check_duration(
            "max_duration_considered_tap",
            self.max_duration_considered_tap,
        )
    }
}

/// Configuration of a [`SwipeTracker`](crate::swipe::SwipeTracker).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SwipeConfig {
    /// Samples kept for velocity estimation.
    pub history_capacity: usize,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl SwipeConfig {
    /// Check every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }
}

fn check_duration(field: &'static str, value: f64) -> Result<(), ConfigError> {
    // NaN fails this comparison too.
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidDuration { field, value })
    }
}
