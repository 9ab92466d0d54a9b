//! Animation timing state machine
//!
//! An [`Animation`] turns delta-time into a bounded, directional, repeatable
//! playback position. What the position *means* is up to its [`Driver`]: on
//! every playing tick the animation eases its progress and hands the result
//! to the driver, which is how [`Tween`](crate::Tween) and
//! [`TweenSequence`](crate::TweenSequence) produce values.
//!
//! ```text
//! Idle ──play──▶ Pending ──delay elapsed──▶ Playing ──last cycle──▶ Completed
//!                   ▲                         │  ▲
//!                   └──── repeat delay ───────┘  └── next cycle
//! ```
//!
//! The driver sees the *position* (`time / duration`), so reversed cycles play
//! it backward, while repeat counting uses the direction-relative *progress*.
//! Published values correspond to the position at the start of each tick.
//! When an animation completes its driver receives the resting position once.

use crate::config::AnimationSpec;
use crate::easing::Easing;
use crate::timing::{clamp_delay, clamp_duration, Direction, RepeatStyle};

/// Anything that can consume playback progress.
pub trait Driver: Send {
    /// Length of one pass, in seconds
    fn duration(&self) -> f64;

    /// Consume a progress value, usually in `[0, 1]`
    fn update(&mut self, progress: f64);
}

impl<D: Driver + ?Sized> Driver for Box<D> {
    fn duration(&self) -> f64 {
        (**self).duration()
    }

    fn update(&mut self, progress: f64) {
        (**self).update(progress)
    }
}

/// Driver backed by a closure
pub struct FnDriver<F> {
    duration: f64,
    update: F,
}

impl<F: FnMut(f64) + Send> FnDriver<F> {
    pub fn new(duration: f64, update: F) -> Self {
        Self {
            duration: clamp_duration(duration),
            update,
        }
    }
}

impl<F: FnMut(f64) + Send> Driver for FnDriver<F> {
    fn duration(&self) -> f64 {
        self.duration
    }

    fn update(&mut self, progress: f64) {
        (self.update)(progress)
    }
}

/// Current state of an animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    /// Not started, or reset
    #[default]
    Idle,
    /// Waiting out the initial or inter-cycle delay
    Pending,
    /// Advancing through a cycle
    Playing,
    /// Frozen mid-delay or mid-cycle
    Paused,
    /// All cycles played
    Completed,
}

type CompletionHandler = Box<dyn FnMut() + Send>;

/// A single playable timeline
pub struct Animation {
    spec: AnimationSpec,
    driver: Option<Box<dyn Driver>>,
    on_complete: Option<CompletionHandler>,

    state: AnimationState,
    /// State to restore on resume
    resumes_to: AnimationState,
    /// Position inside the current delay or cycle
    time: f64,
    elapsed: f64,
    cycle: u32,
    is_reversed: bool,
}

impl Animation {
    /// A bare timeline of `duration` seconds with no driver
    pub fn new(duration: f64) -> Self {
        Self::from_spec(AnimationSpec {
            duration,
            ..AnimationSpec::default()
        })
    }

    /// Build an animation from a timing spec, correcting out-of-range values
    pub fn from_spec(spec: AnimationSpec) -> Self {
        let spec = AnimationSpec {
            delay: clamp_delay(spec.delay),
            duration: clamp_duration(spec.duration),
            repeat_delay: clamp_delay(spec.repeat_delay),
            ..spec
        };
        let is_reversed = spec.direction.starts_reversed();

        Self {
            spec,
            driver: None,
            on_complete: None,
            state: AnimationState::Idle,
            resumes_to: AnimationState::Idle,
            time: 0.0,
            elapsed: 0.0,
            cycle: 0,
            is_reversed,
        }
    }

    /// An animation whose cycle length is the driver's duration
    pub fn with_driver<D: Driver + 'static>(driver: D) -> Self {
        let mut animation = Self::new(driver.duration());
        animation.driver = Some(Box::new(driver));
        animation
    }

    /// Attach a driver without changing the configured duration
    pub fn driver<D: Driver + 'static>(mut self, driver: D) -> Self {
        self.driver = Some(Box::new(driver));
        self
    }

    pub fn delay(mut self, delay: f64) -> Self {
        self.spec.delay = clamp_delay(delay);
        self
    }

    pub fn duration(mut self, duration: f64) -> Self {
        self.spec.duration = clamp_duration(duration);
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.spec.easing = easing;
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.spec.direction = direction;
        self.is_reversed = direction.starts_reversed();
        self
    }

    pub fn repeat(mut self, repeat: RepeatStyle) -> Self {
        self.spec.repeat = repeat;
        self
    }

    pub fn repeat_delay(mut self, repeat_delay: f64) -> Self {
        self.spec.repeat_delay = clamp_delay(repeat_delay);
        self
    }

    /// Run `handler` every time the animation completes
    pub fn on_complete<F: FnMut() + Send + 'static>(mut self, handler: F) -> Self {
        self.on_complete = Some(Box::new(handler));
        self
    }

    pub fn spec(&self) -> &AnimationSpec {
        &self.spec
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Position within the current delay or cycle, in seconds
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Total time advanced since the last reset, in seconds
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Number of completed cycles
    pub fn cycle(&self) -> u32 {
        self.cycle
    }

    pub fn is_reversed(&self) -> bool {
        self.is_reversed
    }

    /// Pending or playing
    pub fn is_playing(&self) -> bool {
        matches!(self.state, AnimationState::Pending | AnimationState::Playing)
    }

    pub fn is_paused(&self) -> bool {
        self.state == AnimationState::Paused
    }

    pub fn is_completed(&self) -> bool {
        self.state == AnimationState::Completed
    }

    /// Progress through the current cycle, in `[0, 1]`
    pub fn progress(&self) -> f64 {
        match self.state {
            AnimationState::Idle => 0.0,
            AnimationState::Completed => 1.0,
            AnimationState::Pending => 0.0,
            AnimationState::Paused if self.resumes_to == AnimationState::Pending => 0.0,
            AnimationState::Playing | AnimationState::Paused => self.cycle_progress(),
        }
    }

    /// Position on the timeline in `[0, 1]`, regardless of direction.
    ///
    /// While waiting out a delay this is the edge the next cycle starts from.
    pub fn position(&self) -> f64 {
        let waiting = self.state == AnimationState::Pending
            || (self.state == AnimationState::Paused
                && self.resumes_to == AnimationState::Pending);
        if waiting {
            return if self.is_reversed { 1.0 } else { 0.0 };
        }
        (self.time / self.spec.duration).clamp(0.0, 1.0)
    }

    /// Eased position, the value a driver receives
    pub fn interpolant(&self) -> f64 {
        self.spec.easing.apply(self.position())
    }

    fn cycle_progress(&self) -> f64 {
        let duration = self.spec.duration;
        let progress = if self.is_reversed {
            (duration - self.time) / duration
        } else {
            self.time / duration
        };
        progress.clamp(0.0, 1.0)
    }

    /// Time value at which the current cycle starts
    fn cycle_start(&self) -> f64 {
        if self.is_reversed {
            self.spec.duration
        } else {
            0.0
        }
    }

    /// Delay guarding the current cycle
    fn current_delay(&self) -> f64 {
        if self.cycle == 0 {
            self.spec.delay
        } else {
            self.spec.repeat_delay
        }
    }

    /// Return to the idle state with all runtime fields cleared
    pub(crate) fn reset(&mut self) {
        self.state = AnimationState::Idle;
        self.resumes_to = AnimationState::Idle;
        self.time = 0.0;
        self.elapsed = 0.0;
        self.cycle = 0;
        self.is_reversed = self.spec.direction.starts_reversed();
    }

    /// Reset and begin playback; skips the pending state when there is no delay
    pub(crate) fn start(&mut self) {
        self.reset();
        if self.spec.delay > 0.0 {
            self.state = AnimationState::Pending;
        } else {
            self.state = AnimationState::Playing;
            self.time = self.cycle_start();
        }
        tracing::debug!(state = ?self.state, delay = self.spec.delay, "animation started");
    }

    pub(crate) fn pause(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        self.resumes_to = self.state;
        self.state = AnimationState::Paused;
        true
    }

    pub(crate) fn resume(&mut self) -> bool {
        if !self.is_paused() {
            return false;
        }
        self.state = self.resumes_to;
        true
    }

    /// Advance by `dt` seconds.
    ///
    /// Returns `false` once the animation no longer needs ticking (completed
    /// or idle). Paused animations return `true` without advancing.
    pub fn update(&mut self, dt: f64) -> bool {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        match self.state {
            AnimationState::Idle | AnimationState::Completed => return false,
            AnimationState::Paused => return true,
            AnimationState::Pending => {
                self.elapsed += dt;
                let delay = self.current_delay();
                self.time = (self.time + dt).clamp(0.0, delay);
                if self.time >= delay {
                    self.state = AnimationState::Playing;
                    self.time = self.cycle_start();
                    tracing::trace!(cycle = self.cycle, "delay elapsed");
                }
            }
            AnimationState::Playing => {
                self.elapsed += dt;
                let before = self.position();

                let step = if self.is_reversed { -dt } else { dt };
                self.time = (self.time + step).clamp(0.0, self.spec.duration);

                let progress = self.cycle_progress();
                let crossed = progress >= 1.0;

                if !self
                    .spec
                    .repeat
                    .should_continue(self.cycle as f64 + progress)
                {
                    self.complete(crossed);
                    return false;
                }

                self.publish(before);

                if crossed {
                    self.next_cycle();
                }
            }
        }

        true
    }

    fn publish(&mut self, position: f64) {
        if let Some(driver) = self.driver.as_mut() {
            driver.update(self.spec.easing.apply(position));
        }
    }

    fn next_cycle(&mut self) {
        self.cycle += 1;
        self.is_reversed = self.spec.direction.next_reversed(self.is_reversed);

        if self.spec.repeat_delay > 0.0 {
            self.state = AnimationState::Pending;
            self.time = 0.0;
        } else {
            self.time = self.cycle_start();
        }
        tracing::trace!(cycle = self.cycle, reversed = self.is_reversed, "next cycle");
    }

    fn complete(&mut self, finished_cycle: bool) {
        if finished_cycle {
            self.cycle += 1;
        }
        self.state = AnimationState::Completed;
        self.publish(self.position());

        if let Some(handler) = self.on_complete.as_mut() {
            handler();
        }
        tracing::debug!(cycles = self.cycle, elapsed = self.elapsed, "animation completed");
    }
}

impl std::fmt::Debug for Animation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Animation")
            .field("spec", &self.spec)
            .field("state", &self.state)
            .field("time", &self.time)
            .field("elapsed", &self.elapsed)
            .field("cycle", &self.cycle)
            .field("is_reversed", &self.is_reversed)
            .field("has_driver", &self.driver.is_some())
            .finish()
    }
}
