//! Motus Animation System
//!
//! Timed animations, easing curves, tweens, and frame scheduling.
//!
//! # Features
//!
//! - **Easing**: closed-form curve library plus a cubic-bezier solver
//! - **Animations**: delay, duration, direction and repeat handled by one state machine
//! - **Tweens**: interpolate any [`Interpolatable`] value between two endpoints
//! - **Sequences**: chain tweens into one timeline with gaps between them
//! - **Scheduler**: ticks every running animation once per host frame
//!
//! # Example
//!
//! ```rust
//! use motus_animation::{Animation, AnimationScheduler, Easing, Tween};
//! use std::sync::{Arc, Mutex};
//!
//! let opacity = Arc::new(Mutex::new(0.0_f64));
//! let sink = opacity.clone();
//!
//! let mut scheduler = AnimationScheduler::new();
//! let fade = Tween::new(0.0_f64, 1.0, move |v| *sink.lock().unwrap() = v).duration(0.5);
//! let id = scheduler.register(Animation::with_driver(fade).easing(Easing::out_quad()));
//!
//! scheduler.play(id);
//! for _ in 0..40 {
//!     scheduler.advance(1.0 / 60.0);
//! }
//!
//! assert!(scheduler.get(id).unwrap().is_completed());
//! assert_eq!(*opacity.lock().unwrap(), 1.0);
//! ```

pub mod animation;
pub mod bezier;
pub mod config;
pub mod easing;
pub mod error;
pub mod scheduler;
pub mod sequence;
pub mod timing;
pub mod tween;

pub use animation::{Animation, AnimationState, Driver, FnDriver};
pub use bezier::UnitBezier;
pub use config::{AnimationSpec, SchedulerConfig};
pub use easing::{ControlPoints, CubicBezier, CustomCurve, Easing};
pub use error::{ConfigError, ScheduleError};
pub use motus_core::Interpolatable;
pub use scheduler::{AnimationId, AnimationScheduler, SchedulerHandle, SharedScheduler};
pub use sequence::TweenSequence;
pub use timing::{clamp_duration, Direction, RepeatStyle, MIN_DURATION};
pub use tween::Tween;
