//! Animation and scheduler configuration
//!
//! Both types deserialize from TOML so timing can live next to other host
//! settings:
//!
//! ```toml
//! delay = 0.25
//! duration = 0.6
//! easing = "out_back"
//! direction = "alternate"
//! repeat = { count = 4 }
//! repeat_delay = 0.1
//! ```

use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::error::ConfigError;
use crate::timing::{Direction, RepeatStyle};

/// Timing configuration of one animation, in seconds.
///
/// Out-of-range values are corrected when an [`Animation`](crate::Animation)
/// is built from it: non-positive durations become
/// [`MIN_DURATION`](crate::MIN_DURATION) and negative delays become zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSpec {
    /// Wait before the first cycle
    pub delay: f64,
    /// Length of one cycle
    pub duration: f64,
    /// Curve applied to the progress of every cycle
    pub easing: Easing,
    pub direction: Direction,
    pub repeat: RepeatStyle,
    /// Wait between consecutive cycles
    pub repeat_delay: f64,
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self {
            delay: 0.0,
            duration: 1.0,
            easing: Easing::Linear,
            direction: Direction::Normal,
            repeat: RepeatStyle::None,
            repeat_delay: 0.0,
        }
    }
}

impl AnimationSpec {
    /// Parse a spec from TOML, rejecting non-finite numbers
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let spec: AnimationSpec = toml::from_str(source)?;
        spec.validate()?;
        Ok(spec)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("delay", self.delay),
            ("duration", self.duration),
            ("repeat_delay", self.repeat_delay),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a finite number of seconds, got {value}"
                )));
            }
        }
        self.easing.validate()
    }
}

/// Frame clock settings for [`AnimationScheduler`](crate::AnimationScheduler)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Frame rate the host aims for; informational, the scheduler ticks when told to
    pub target_fps: u32,
    /// Upper bound on the wall-clock delta delivered by one `tick()`, in seconds
    pub max_delta: Option<f64>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            target_fps: 120,
            max_delta: None,
        }
    }
}

impl SchedulerConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: SchedulerConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_fps == 0 {
            return Err(ConfigError::Invalid("target_fps must be at least 1".into()));
        }
        if let Some(max_delta) = self.max_delta {
            if !(max_delta.is_finite() && max_delta > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "max_delta must be a positive number of seconds, got {max_delta}"
                )));
            }
        }
        Ok(())
    }

    /// Duration of one frame at the target rate, in seconds
    pub fn frame_time(&self) -> f64 {
        1.0 / self.target_fps.max(1) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_spec() {
        let spec = AnimationSpec::from_toml_str(
            r#"
            delay = 0.25
            duration = 0.6
            easing = "out_back"
            direction = "alternate_reverse"
            repeat = { count = 4 }
            repeat_delay = 0.1
            "#,
        )
        .unwrap();

        assert_eq!(spec.delay, 0.25);
        assert_eq!(spec.duration, 0.6);
        assert!(matches!(spec.easing, Easing::OutBack));
        assert_eq!(spec.direction, Direction::AlternateReverse);
        assert_eq!(spec.repeat, RepeatStyle::Count(4));
        assert_eq!(spec.repeat_delay, 0.1);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let spec = AnimationSpec::from_toml_str("repeat = \"forever\"").unwrap();

        assert_eq!(spec.duration, 1.0);
        assert_eq!(spec.delay, 0.0);
        assert_eq!(spec.repeat, RepeatStyle::Forever);
        assert_eq!(spec.direction, Direction::Normal);
    }

    #[test]
    fn test_non_finite_spec_is_rejected() {
        let err = AnimationSpec::from_toml_str("duration = nan").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_non_finite_easing_is_rejected() {
        let err = AnimationSpec::from_toml_str(
            "easing = { bezier = { x1 = nan, y1 = 0.0, x2 = 0.5, y2 = 1.0 } }",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err =
            AnimationSpec::from_toml_str("easing = { in_pow = { exponent = nan } }").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        assert!(AnimationSpec::from_toml_str("easing = { out_pow = { exponent = 3.0 } }").is_ok());
    }

    #[test]
    fn test_malformed_spec_is_parse_error() {
        let err = AnimationSpec::from_toml_str("direction = \"sideways\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_scheduler_config() {
        let config = SchedulerConfig::from_toml_str("target_fps = 60\nmax_delta = 0.1").unwrap();
        assert_eq!(config.target_fps, 60);
        assert_eq!(config.max_delta, Some(0.1));
        assert!((config.frame_time() - 1.0 / 60.0).abs() < 1e-12);

        assert_eq!(SchedulerConfig::from_toml_str("").unwrap(), SchedulerConfig::default());
        assert!(SchedulerConfig::from_toml_str("target_fps = 0").is_err());
        assert!(SchedulerConfig::from_toml_str("max_delta = -1.0").is_err());
    }
}
