//! Read-only world geometry consumed by perception and steering.

use crate::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangular blocker.
///
/// `position` is the min corner. Obstacles are owned externally; the behavior
/// core only queries them for sight blocking and local avoidance.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Obstacle {
    pub position: Vec2,
    pub size: Vec2,
}

impl Obstacle {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.position.x
            && point.x <= self.position.x + self.size.x
            && point.y >= self.position.y
            && point.y <= self.position.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }
}

/// Playable rectangle agents are kept inside after integration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// World rectangle `[0, width] x [0, height]` shrunk by `margin` on every
    /// side (keeps hulls clear of the outer walls).
    pub fn of_world(width: f32, height: f32, margin: f32) -> Self {
        Self {
            min: Vec2::new(margin, margin),
            max: Vec2::new(width - margin, height - margin),
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}
