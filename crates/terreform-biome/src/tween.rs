//! Time-driven interpolation with easing curves.

use std::time::Duration;

use glam::Vec3;

/// Values that can be linearly interpolated.
pub trait Lerp: Copy {
    /// Interpolates from `self` to `other`; `t = 0` gives `self`, `t = 1` gives `other`.
    fn lerp_to(&self, other: &Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp_to(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for Vec3 {
    #[inline]
    fn lerp_to(&self, other: &Self, t: f32) -> Self {
        self.lerp(*other, t)
    }
}

/// Easing curves mapping linear progress in `[0, 1]` to eased progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// No easing.
    #[default]
    Linear,
    /// Quadratic ease in.
    QuadIn,
    /// Quadratic ease out.
    QuadOut,
    /// Quadratic ease in-out.
    QuadInOut,
}

impl Easing {
    /// Applies the curve. Input is clamped to `[0, 1]`.
    pub fn ease(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::QuadIn => t * t,
            Self::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Self::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// Interpolates from one value to another over a fixed duration.
#[derive(Debug, Clone)]
pub struct Tween<T> {
    from: T,
    to: T,
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
}

impl<T: Lerp> Tween<T> {
    /// Starts a tween at `from`.
    pub fn new(from: T, to: T, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            easing,
        }
    }

    /// Advances time and returns the new value.
    pub fn advance(&mut self, dt: Duration) -> T {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.value()
    }

    /// Linear progress in `[0, 1]`. A zero-length tween is always complete.
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            1.0
        } else {
            self.elapsed.as_secs_f32() / self.duration.as_secs_f32()
        }
    }

    /// The eased value at the current time. Exactly the end value once finished.
    pub fn value(&self) -> T {
        if self.is_finished() {
            self.to
        } else {
            self.from.lerp_to(&self.to, self.easing.ease(self.progress()))
        }
    }

    /// Returns `true` once the full duration has elapsed.
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}
