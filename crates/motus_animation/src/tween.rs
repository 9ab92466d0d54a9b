//! Value tweens
//!
//! A [`Tween`] interpolates between two [`Interpolatable`] values and pushes
//! each intermediate value into a callback. It is a [`Driver`], so it can be
//! played by an [`Animation`] or grouped into a
//! [`TweenSequence`](crate::TweenSequence).

use motus_core::Interpolatable;

use crate::animation::{Animation, Driver};
use crate::easing::Easing;
use crate::timing::{clamp_duration, MIN_DURATION};

type UpdateHandler<T> = Box<dyn FnMut(T) + Send>;

/// Interpolates from `start` to `end` over `duration` seconds.
pub struct Tween<T> {
    start: T,
    end: T,
    duration: f64,
    easing: Easing,
    on_update: UpdateHandler<T>,
}

impl<T: Interpolatable> Tween<T> {
    /// A one second linear tween
    pub fn new<F>(start: T, end: T, on_update: F) -> Self
    where
        F: FnMut(T) + Send + 'static,
    {
        Self {
            start,
            end,
            duration: 1.0,
            easing: Easing::Linear,
            on_update: Box::new(on_update),
        }
    }

    /// A tween whose duration is `interval(start, end) / speed`.
    ///
    /// `speed` is in value units per second. A zero, negative or non-finite
    /// speed falls back to [`MIN_DURATION`].
    pub fn with_speed<F>(start: T, end: T, speed: f64, on_update: F) -> Self
    where
        F: FnMut(T) + Send + 'static,
    {
        let mut interval = start.interval(&end);
        if interval < 0.0 {
            tracing::warn!(interval, "tween interval is negative, using its magnitude");
            interval = -interval;
        }

        let duration = if speed.is_finite() && speed > 0.0 {
            interval / speed
        } else {
            tracing::warn!(speed, "tween speed must be positive, using minimum duration");
            MIN_DURATION
        };

        Self::new(start, end, on_update).duration(duration)
    }

    pub fn duration(mut self, duration: f64) -> Self {
        self.duration = clamp_duration(duration);
        self
    }

    /// Curve applied on top of the progress this tween receives
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn start(&self) -> &T {
        &self.start
    }

    pub fn end(&self) -> &T {
        &self.end
    }

    /// Value at `progress` without invoking the callback
    pub fn value_at(&self, progress: f64) -> T {
        self.start.lerp(&self.end, self.easing.apply(progress))
    }
}

impl<T: Interpolatable + Send> Driver for Tween<T> {
    fn duration(&self) -> f64 {
        self.duration
    }

    fn update(&mut self, progress: f64) {
        let value = self.value_at(progress);
        (self.on_update)(value);
    }
}

impl<T: Interpolatable + Send + 'static> From<Tween<T>> for Animation {
    fn from(tween: Tween<T>) -> Self {
        Animation::with_driver(tween)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motus_core::Point;
    use std::sync::{Arc, Mutex};

    fn capture<T: Send + 'static>() -> (Arc<Mutex<Vec<T>>>, impl FnMut(T) + Send) {
        let values = Arc::new(Mutex::new(Vec::new()));
        let sink = values.clone();
        (values, move |v| sink.lock().unwrap().push(v))
    }

    #[test]
    fn test_update_publishes_interpolated_value() {
        let (values, sink) = capture();
        let mut tween = Tween::new(10.0_f64, 20.0, sink);

        tween.update(0.0);
        tween.update(0.5);
        tween.update(1.0);

        assert_eq!(*values.lock().unwrap(), vec![10.0, 15.0, 20.0]);
    }

    #[test]
    fn test_easing_shapes_progress() {
        let tween = Tween::new(0.0_f64, 100.0, |_| {}).easing(Easing::in_quad());
        assert_eq!(tween.value_at(0.5), 25.0);
        assert_eq!(tween.value_at(1.0), 100.0);
    }

    #[test]
    fn test_duration_defaults_and_clamps() {
        let tween = Tween::new(0.0_f64, 1.0, |_| {});
        assert_eq!(Driver::duration(&tween), 1.0);

        let tween = tween.duration(0.0);
        assert_eq!(Driver::duration(&tween), MIN_DURATION);
    }

    #[test]
    fn test_speed_derives_duration_from_distance() {
        let tween = Tween::with_speed(Point::new(0.0, 0.0), Point::new(30.0, 40.0), 100.0, |_| {});
        assert!((Driver::duration(&tween) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_speed_uses_minimum_duration() {
        for speed in [0.0, -2.0, f64::NAN] {
            let tween = Tween::with_speed(0.0_f64, 10.0, speed, |_| {});
            assert_eq!(Driver::duration(&tween), MIN_DURATION);
        }
    }

    #[test]
    fn test_into_animation_takes_tween_duration() {
        let animation: Animation = Tween::new(0.0_f64, 1.0, |_| {}).duration(0.75).into();
        assert_eq!(animation.spec().duration, 0.75);
    }
}
