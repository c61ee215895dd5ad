//! 2D vector and angle arithmetic.
//!
//! All angles are radians. Stored/compared angles are normalized to
//! `(-PI, PI]` via [`normalize_angle`] so they never accumulate unboundedly.

use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};
use std::f32::consts::{PI, TAU};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing along `angle`.
    pub fn from_angle(angle: f32) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    pub fn distance(self, other: Vec2) -> f32 {
        (other - self).length()
    }

    pub fn dot(self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Unit vector in the same direction, or `ZERO` when too short to
    /// normalize safely.
    pub fn normalize_or_zero(self) -> Self {
        let len = self.length();
        if len > 1e-3 {
            self / len
        } else {
            Self::ZERO
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        *self = *self + rhs;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Vec2) {
        *self = *self - rhs;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Vec2 {
    type Output = Vec2;
    fn div(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

/// Wrap `angle` into `(-PI, PI]`.
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

/// Bearing of `to` as seen from `from`.
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Shortest signed angular difference `target - current`, in `(-PI, PI]`.
pub fn angle_delta(target: f32, current: f32) -> f32 {
    normalize_angle(target - current)
}

/// Rotate `current` toward `target` by at most `max_step` radians, along the
/// shorter arc.
///
/// Snaps exactly onto `target` once the remaining error fits within
/// `max_step`, so repeated calls converge without oscillating around the
/// goal bearing.
pub fn rotate_toward(current: f32, target: f32, max_step: f32) -> f32 {
    let delta = angle_delta(target, current);
    if delta.abs() <= max_step {
        normalize_angle(target)
    } else {
        normalize_angle(current + max_step.copysign(delta))
    }
}
