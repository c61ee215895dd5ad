use vanguard_core::{Bounds, Obstacle, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Read-only view of the hostile for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TargetSnapshot {
    pub position: Vec2,
    pub velocity: Vec2,
    pub alive: bool,
}

impl TargetSnapshot {
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Self {
            position,
            velocity,
            alive: true,
        }
    }
}

/// Everything an agent is allowed to read about the world this tick.
///
/// Passed explicitly into [`Agent::update`](crate::Agent::update); there is
/// no ambient world object anywhere in the core.
#[derive(Debug, Clone, Copy)]
pub struct WorldFrame<'a> {
    pub target: Option<TargetSnapshot>,
    pub obstacles: &'a [Obstacle],
    pub bounds: Bounds,
}

impl<'a> WorldFrame<'a> {
    pub fn new(target: Option<TargetSnapshot>, obstacles: &'a [Obstacle], bounds: Bounds) -> Self {
        Self {
            target,
            obstacles,
            bounds,
        }
    }

    /// The target, if present and still alive.
    pub fn live_target(&self) -> Option<&TargetSnapshot> {
        self.target.as_ref().filter(|target| target.alive)
    }
}
