//! Animation scheduler
//!
//! Owns every registered animation and advances the running ones each frame.
//!
//! Animations are advanced in the order they entered the running set, and
//! their callbacks fire synchronously in that order. Callbacks cannot borrow
//! the scheduler; they talk to it through a [`SchedulerHandle`], whose
//! commands are applied once the current iteration finishes.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::animation::{Animation, AnimationState};
use crate::config::SchedulerConfig;
use crate::error::ScheduleError;

new_key_type! {
    pub struct AnimationId;
}

/// Scheduler shared across threads; hold the lock for the whole tick
pub type SharedScheduler = Arc<Mutex<AnimationScheduler>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Play(AnimationId),
    Stop(AnimationId),
    Pause(AnimationId),
    Resume(AnimationId),
    Restart(AnimationId),
}

/// Cloneable, `Send` handle for controlling animations from callbacks.
///
/// Commands are queued and applied by the scheduler before the next frame
/// and right after the frame currently in progress.
#[derive(Clone, Default)]
pub struct SchedulerHandle {
    queue: Arc<Mutex<Vec<Command>>>,
}

impl SchedulerHandle {
    fn push(&self, command: Command) {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(command);
    }

    fn drain(&self) -> Vec<Command> {
        std::mem::take(&mut *self.queue.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn play(&self, id: AnimationId) {
        self.push(Command::Play(id));
    }

    pub fn stop(&self, id: AnimationId) {
        self.push(Command::Stop(id));
    }

    pub fn pause(&self, id: AnimationId) {
        self.push(Command::Pause(id));
    }

    pub fn resume(&self, id: AnimationId) {
        self.push(Command::Resume(id));
    }

    pub fn restart(&self, id: AnimationId) {
        self.push(Command::Restart(id));
    }
}

impl std::fmt::Debug for SchedulerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pending = self
            .queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        f.debug_struct("SchedulerHandle")
            .field("pending", &pending)
            .finish()
    }
}

/// The animation scheduler that ticks all running animations
pub struct AnimationScheduler {
    animations: SlotMap<AnimationId, Animation>,
    /// Running set, in the order animations started running
    running: Vec<AnimationId>,
    handle: SchedulerHandle,
    last_frame: Instant,
    clock_running: bool,
    config: SchedulerConfig,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self::with_config(SchedulerConfig::default())
    }

    pub fn with_config(config: SchedulerConfig) -> Self {
        Self {
            animations: SlotMap::with_key(),
            running: Vec::new(),
            handle: SchedulerHandle::default(),
            last_frame: Instant::now(),
            clock_running: false,
            config,
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Handle for queuing commands from callbacks or other owners
    pub fn handle(&self) -> SchedulerHandle {
        self.handle.clone()
    }

    /// Take ownership of an animation; it stays idle until played
    pub fn register(&mut self, animation: Animation) -> AnimationId {
        let id = self.animations.insert(animation);
        tracing::debug!(?id, "animation registered");
        id
    }

    pub fn register_all<I>(&mut self, animations: I) -> Vec<AnimationId>
    where
        I: IntoIterator<Item = Animation>,
    {
        animations
            .into_iter()
            .map(|animation| self.register(animation))
            .collect()
    }

    /// Drop an animation from the scheduler, handing it back to the caller
    pub fn unregister(&mut self, id: AnimationId) -> Option<Animation> {
        self.running.retain(|&running| running != id);
        self.pause_clock_if_idle();
        self.animations.remove(id)
    }

    pub fn get(&self, id: AnimationId) -> Option<&Animation> {
        self.animations.get(id)
    }

    pub fn get_mut(&mut self, id: AnimationId) -> Option<&mut Animation> {
        self.animations.get_mut(id)
    }

    pub fn is_running(&self, id: AnimationId) -> bool {
        self.running.contains(&id)
    }

    pub fn running_count(&self) -> usize {
        self.running.len()
    }

    pub fn registered_count(&self) -> usize {
        self.animations.len()
    }

    /// Ids in the running set, in tick order
    pub fn running_ids(&self) -> &[AnimationId] {
        &self.running
    }

    /// Check if any running animation is still advancing
    pub fn has_active_animations(&self) -> bool {
        self.running.iter().any(|&id| {
            self.animations
                .get(id)
                .is_some_and(|animation| animation.is_playing())
        })
    }

    /// Start an animation from the beginning, or resume it if paused.
    ///
    /// Unknown ids and animations that are already playing are ignored.
    pub fn play(&mut self, id: AnimationId) -> bool {
        let Some(animation) = self.animations.get_mut(id) else {
            return false;
        };

        if animation.is_paused() {
            animation.resume();
        } else if animation.is_playing() {
            return false;
        } else {
            animation.start();
        }

        self.enter_running_set(id);
        true
    }

    /// Put an animation into the running set.
    ///
    /// Idle and completed animations are started first, so the set never
    /// holds one that cannot advance. Returns `false` if the id is unknown
    /// or already running.
    pub fn run(&mut self, id: AnimationId) -> bool {
        let Some(animation) = self.animations.get_mut(id) else {
            return false;
        };
        if self.running.contains(&id) {
            tracing::warn!(?id, "animation is already running");
            return false;
        }

        if matches!(
            animation.state(),
            AnimationState::Idle | AnimationState::Completed
        ) {
            animation.start();
        }
        self.enter_running_set(id);
        true
    }

    /// Take an animation out of the running set without touching its state
    pub fn remove(&mut self, id: AnimationId) -> Result<(), ScheduleError> {
        if !self.animations.contains_key(id) {
            return Err(ScheduleError::UnknownAnimation(id));
        }
        let Some(index) = self.running.iter().position(|&running| running == id) else {
            tracing::warn!(?id, "removing an animation that is not running");
            return Err(ScheduleError::NotRunning(id));
        };

        self.running.remove(index);
        self.pause_clock_if_idle();
        Ok(())
    }

    /// Reset an animation to idle and take it out of the running set
    pub fn terminate(&mut self, id: AnimationId) -> bool {
        let Some(animation) = self.animations.get_mut(id) else {
            return false;
        };
        animation.reset();

        if let Some(index) = self.running.iter().position(|&running| running == id) {
            self.running.remove(index);
            self.pause_clock_if_idle();
        }
        tracing::debug!(?id, "animation terminated");
        true
    }

    /// Same as [`terminate`](Self::terminate)
    pub fn stop(&mut self, id: AnimationId) -> bool {
        self.terminate(id)
    }

    pub fn pause(&mut self, id: AnimationId) -> bool {
        self.animations
            .get_mut(id)
            .is_some_and(|animation| animation.pause())
    }

    /// Unfreeze a paused animation, putting it back in the running set if it was removed
    pub fn resume(&mut self, id: AnimationId) -> bool {
        let resumed = self
            .animations
            .get_mut(id)
            .is_some_and(|animation| animation.resume());
        if resumed {
            self.enter_running_set(id);
        }
        resumed
    }

    /// Reset and play, whatever state the animation is in
    pub fn restart(&mut self, id: AnimationId) -> bool {
        let Some(animation) = self.animations.get_mut(id) else {
            return false;
        };
        animation.start();
        self.enter_running_set(id);
        true
    }

    /// Play every registered animation
    pub fn play_all(&mut self) {
        let ids: Vec<_> = self.animations.keys().collect();
        for id in ids {
            self.play(id);
        }
    }

    /// Restart every registered animation
    pub fn restart_all(&mut self) {
        let ids: Vec<_> = self.animations.keys().collect();
        for id in ids {
            self.restart(id);
        }
    }

    pub fn pause_all(&mut self) {
        for &id in &self.running {
            if let Some(animation) = self.animations.get_mut(id) {
                animation.pause();
            }
        }
    }

    pub fn resume_all(&mut self) {
        for &id in &self.running {
            if let Some(animation) = self.animations.get_mut(id) {
                animation.resume();
            }
        }
    }

    /// Terminate every running animation
    pub fn terminate_all(&mut self) {
        for id in std::mem::take(&mut self.running) {
            if let Some(animation) = self.animations.get_mut(id) {
                animation.reset();
            }
        }
        self.pause_clock_if_idle();
    }

    /// Advance by the wall-clock time since the previous frame.
    ///
    /// Time spent with an empty running set is not delivered.
    pub fn tick(&mut self) {
        let now = Instant::now();
        let mut dt = if self.clock_running {
            (now - self.last_frame).as_secs_f64()
        } else {
            0.0
        };
        self.last_frame = now;

        if let Some(max_delta) = self.config.max_delta {
            dt = dt.min(max_delta);
        }
        self.advance(dt);
    }

    /// Advance every running animation by `dt` seconds
    pub fn advance(&mut self, dt: f64) {
        self.apply_commands();

        let mut finished: SmallVec<[AnimationId; 8]> = SmallVec::new();
        for &id in &self.running {
            let keep = match self.animations.get_mut(id) {
                Some(animation) => animation.update(dt),
                None => false,
            };
            if !keep {
                finished.push(id);
            }
        }

        if !finished.is_empty() {
            self.running.retain(|id| !finished.contains(id));
            tracing::trace!(count = finished.len(), "animations left running set");
        }

        self.apply_commands();
        self.pause_clock_if_idle();
    }

    /// Append `id` unless it already has an entry
    fn enter_running_set(&mut self, id: AnimationId) {
        if self.running.contains(&id) {
            return;
        }
        self.running.push(id);
        if !self.clock_running {
            self.clock_running = true;
            self.last_frame = Instant::now();
        }
    }

    fn pause_clock_if_idle(&mut self) {
        if self.running.is_empty() {
            self.clock_running = false;
        }
    }

    fn apply_commands(&mut self) {
        for command in self.handle.drain() {
            match command {
                Command::Play(id) => {
                    self.play(id);
                }
                Command::Stop(id) => {
                    self.terminate(id);
                }
                Command::Pause(id) => {
                    self.pause(id);
                }
                Command::Resume(id) => {
                    self.resume(id);
                }
                Command::Restart(id) => {
                    self.restart(id);
                }
            }
        }
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}
