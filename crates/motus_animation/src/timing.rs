//! Playback direction and repeat policies

use serde::{Deserialize, Serialize};

/// Smallest duration used in timing math, in seconds.
///
/// Non-positive durations are clamped to this value so progress never divides by zero.
pub const MIN_DURATION: f64 = 0.001;

/// Clamp a duration to [`MIN_DURATION`], treating non-finite input as the minimum
pub fn clamp_duration(duration: f64) -> f64 {
    if duration.is_finite() && duration > MIN_DURATION {
        duration
    } else {
        MIN_DURATION
    }
}

/// Clamp a delay to `>= 0`, treating non-finite input as zero
pub(crate) fn clamp_delay(delay: f64) -> f64 {
    if delay.is_finite() && delay > 0.0 {
        delay
    } else {
        0.0
    }
}

/// Direction of animation playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Play forward each cycle.
    #[default]
    Normal,
    /// Play backward each cycle.
    Reverse,
    /// Alternate between forward and backward, starting forward.
    Alternate,
    /// Alternate between backward and forward, starting backward.
    AlternateReverse,
}

impl Direction {
    /// Whether the first cycle plays in reverse.
    pub fn starts_reversed(&self) -> bool {
        matches!(self, Self::Reverse | Self::AlternateReverse)
    }

    /// Whether playback flips at every cycle boundary.
    pub fn alternates(&self) -> bool {
        matches!(self, Self::Alternate | Self::AlternateReverse)
    }

    /// Playback direction of the cycle following one played with `is_reversed`.
    pub fn next_reversed(&self, is_reversed: bool) -> bool {
        match self {
            Self::Normal => false,
            Self::Reverse => true,
            Self::Alternate | Self::AlternateReverse => !is_reversed,
        }
    }
}

/// How many cycles an animation plays before completing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatStyle {
    /// Play a single cycle.
    #[default]
    None,
    /// Repeat until explicitly stopped.
    Forever,
    /// Play this many cycles in total. `Count(0)` plays one cycle, like `None`.
    Count(u32),
}

impl RepeatStyle {
    /// Whether playback continues at `position`, the completed cycle count plus
    /// the fractional progress through the current cycle.
    pub fn should_continue(&self, position: f64) -> bool {
        match self {
            Self::None => position < 1.0,
            Self::Forever => true,
            Self::Count(count) => position < (*count).max(1) as f64,
        }
    }

    /// Total number of cycles, or `None` for [`RepeatStyle::Forever`].
    pub fn cycles(&self) -> Option<u32> {
        match self {
            Self::None => Some(1),
            Self::Forever => None,
            Self::Count(count) => Some((*count).max(1)),
        }
    }
}
