use thiserror::Error;

use crate::scheduler::AnimationId;

/// Scheduler misuse reported back to the caller.
///
/// These indicate a broken caller invariant; the running set is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("animation {0:?} is not registered with this scheduler")]
    UnknownAnimation(AnimationId),

    #[error("animation {0:?} is not in the running set")]
    NotRunning(AnimationId),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
