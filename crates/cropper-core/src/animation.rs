//! Time-driven value animation.
//!
//! The settle after a handle release is the only animated transition in the
//! cropper. Animations do not own a clock: the host advances them by calling
//! [`AnimatedValue::tick`] with the elapsed frame time.
//!
//! # Cancellation
//!
//! An [`AnimatedValue`] runs at most one animation. Snapping cancels it and
//! animating again replaces its target, starting from the current value.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Easing curve mapping linear progress `t` in `[0, 1]` to eased progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    /// Constant velocity.
    Linear,
    /// `6t^5 - 15t^4 + 10t^3`, zero velocity and acceleration at both ends.
    Smootherstep,
    /// Material standard curve, cubic-bezier(0.4, 0.0, 0.2, 1.0).
    #[default]
    FastOutSlowIn,
}

impl Easing {
    /// Evaluate the curve. Input is clamped to `[0, 1]`.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Smootherstep => smootherstep(t),
            Easing::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, t),
        }
    }
}

/// Smootherstep interpolation function.
///
/// Formula: `6t^5 - 15t^4 + 10t^3`
#[inline]
pub fn smootherstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Evaluate a CSS-style cubic bezier timing curve with control points
/// `(x1, y1)` and `(x2, y2)` at progress `x`.
///
/// The curve parameter is found by bisection; `x(t)` is monotonic for
/// `x1, x2` in `[0, 1]`.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    fn component(a: f32, b: f32, t: f32) -> f32 {
        let u = 1.0 - t;
        3.0 * u * u * t * a + 3.0 * u * t * t * b + t * t * t
    }

    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let (mut lo, mut hi) = (0.0f32, 1.0f32);
    let mut t = x;
    for _ in 0..32 {
        let guess = component(x1, x2, t);
        if (guess - x).abs() < 1e-6 {
            break;
        }
        if guess < x {
            lo = t;
        } else {
            hi = t;
        }
        t = (lo + hi) * 0.5;
    }
    component(y1, y2, t).clamp(0.0, 1.0)
}

/// A single transition from `from` to `target` over `duration`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    from: f32,
    target: f32,
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
}

impl Animation {
    pub fn new(from: f32, target: f32, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            target,
            duration,
            elapsed: Duration::ZERO,
            easing,
        }
    }

    /// Value at the current point in time.
    pub fn value(&self) -> f32 {
        if self.is_finished() {
            return self.target;
        }
        let t = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
        let value = self.from + (self.target - self.from) * self.easing.apply(t);
        // Never leave the [from, target] span through rounding
        value.clamp(self.from.min(self.target), self.from.max(self.target))
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Advance the clock by `dt`. Returns true once the animation is finished.
    pub fn advance(&mut self, dt: Duration) -> bool {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
        self.is_finished()
    }
}

/// A float that can be snapped or animated toward a target.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnimatedValue {
    value: f32,
    animation: Option<Animation>,
}

impl AnimatedValue {
    pub fn new(value: f32) -> Self {
        Self {
            value,
            animation: None,
        }
    }

    /// Current (possibly mid-animation) value.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Value this field settles at once any running animation completes.
    pub fn target(&self) -> f32 {
        self.animation.map_or(self.value, |a| a.target())
    }

    pub fn is_running(&self) -> bool {
        self.animation.is_some()
    }

    /// Jump to `value`, cancelling any running animation.
    pub fn snap_to(&mut self, value: f32) {
        self.value = value;
        self.animation = None;
    }

    /// Start animating from the current value toward `target`, replacing
    /// any running animation. A zero duration snaps.
    pub fn animate_to(&mut self, target: f32, duration: Duration, easing: Easing) {
        if duration.is_zero() {
            self.snap_to(target);
            return;
        }
        self.animation = Some(Animation::new(self.value, target, duration, easing));
    }

    /// Advance a running animation. Returns true while still running.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let Some(animation) = self.animation.as_mut() else {
            return false;
        };
        let finished = animation.advance(dt);
        self.value = animation.value();
        if finished {
            self.animation = None;
        }
        !finished
    }

    /// Complete a running animation immediately.
    pub fn finish(&mut self) {
        if let Some(animation) = self.animation.take() {
            self.value = animation.target();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const MS_100: Duration = Duration::from_millis(100);

    #[test]
    fn test_smootherstep_boundaries() {
        assert_relative_eq!(smootherstep(0.0), 0.0);
        assert_relative_eq!(smootherstep(1.0), 1.0);
        assert_relative_eq!(smootherstep(0.5), 0.5);
        assert_relative_eq!(smootherstep(-0.5), 0.0);
        assert_relative_eq!(smootherstep(1.5), 1.0);
    }

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::Smootherstep, Easing::FastOutSlowIn] {
            assert_relative_eq!(easing.apply(0.0), 0.0, epsilon = 1e-5);
            assert_relative_eq!(easing.apply(1.0), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_fast_out_slow_in_is_front_loaded() {
        // Standard curve is ahead of linear in the middle
        let mid = Easing::FastOutSlowIn.apply(0.5);
        assert!(mid > 0.6 && mid < 0.9, "got {mid}");
    }

    #[test]
    fn test_easing_monotonic() {
        for easing in [Easing::Linear, Easing::Smootherstep, Easing::FastOutSlowIn] {
            let mut prev = 0.0;
            for i in 0..=100 {
                let v = easing.apply(i as f32 / 100.0);
                assert!(v + 1e-5 >= prev, "{easing:?} not monotonic at {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn test_animation_progress() {
        let mut anim = Animation::new(0.0, 10.0, Duration::from_millis(200), Easing::Linear);
        assert_relative_eq!(anim.value(), 0.0);

        assert!(!anim.advance(MS_100));
        assert_relative_eq!(anim.value(), 5.0, epsilon = 1e-4);

        assert!(anim.advance(MS_100));
        assert_relative_eq!(anim.value(), 10.0);

        // Overshooting the duration stays at the target
        assert!(anim.advance(MS_100));
        assert_relative_eq!(anim.value(), 10.0);
    }

    #[test]
    fn test_animated_value_runs_to_target() {
        let mut v = AnimatedValue::new(1.0);
        v.animate_to(3.0, Duration::from_millis(300), Easing::FastOutSlowIn);
        assert!(v.is_running());
        assert_relative_eq!(v.target(), 3.0);

        let mut ticks = 0;
        while v.tick(Duration::from_millis(16)) {
            ticks += 1;
            assert!(v.value() >= 1.0 && v.value() <= 3.0);
        }
        assert!(ticks > 10);
        assert!(!v.is_running());
        assert_relative_eq!(v.value(), 3.0);
    }

    #[test]
    fn test_snap_cancels_animation() {
        let mut v = AnimatedValue::new(0.0);
        v.animate_to(10.0, Duration::from_millis(300), Easing::Linear);
        v.tick(MS_100);

        v.snap_to(2.0);
        assert!(!v.is_running());
        assert!(!v.tick(MS_100));
        assert_relative_eq!(v.value(), 2.0);
    }

    #[test]
    fn test_retarget_starts_from_current_value() {
        let mut v = AnimatedValue::new(0.0);
        v.animate_to(10.0, Duration::from_millis(200), Easing::Linear);
        v.tick(MS_100);
        assert_relative_eq!(v.value(), 5.0, epsilon = 1e-4);

        v.animate_to(0.0, Duration::from_millis(200), Easing::Linear);
        v.tick(MS_100);
        assert_relative_eq!(v.value(), 2.5, epsilon = 1e-4);
        assert_relative_eq!(v.target(), 0.0);
    }

    #[test]
    fn test_zero_duration_snaps() {
        let mut v = AnimatedValue::new(0.0);
        v.animate_to(4.0, Duration::ZERO, Easing::Linear);
        assert!(!v.is_running());
        assert_relative_eq!(v.value(), 4.0);
    }

    #[test]
    fn test_finish_jumps_to_target() {
        let mut v = AnimatedValue::new(1.0);
        v.animate_to(2.0, Duration::from_secs(1), Easing::Smootherstep);
        v.finish();
        assert!(!v.is_running());
        assert_relative_eq!(v.value(), 2.0);
    }
}
