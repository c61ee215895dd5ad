use std::f32::consts::PI;

use vanguard_core::{DeterministicRng, Vec2};

/// Per-tick displacement below which the hull counts as stalled.
pub const STALL_DISPLACEMENT: f32 = 5.0;
/// Continuous stall time that trips recovery.
pub const STALL_TRIGGER_SECS: f32 = 2.0;

/// Detects prolonged near-zero displacement.
///
/// This is an escape hatch for steering deadlocks against obstacle geometry,
/// not a real unstuck solver: once tripped, the caller kicks the heading (see
/// [`recovery_kick`]) and the timer restarts from zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StuckTracker {
    last_position: Vec2,
    timer: f32,
}

impl StuckTracker {
    pub fn new(position: Vec2) -> Self {
        Self {
            last_position: position,
            timer: 0.0,
        }
    }

    /// Fold one tick of movement in. Returns true exactly on the tick the
    /// stall timer trips, resetting it in the same call.
    pub fn observe(&mut self, position: Vec2, dt: f32) -> bool {
        let moved = self.last_position.distance(position);
        self.last_position = position;

        if moved < STALL_DISPLACEMENT {
            self.timer += dt;
        } else {
            self.timer = 0.0;
        }

        if self.timer > STALL_TRIGGER_SECS {
            self.timer = 0.0;
            true
        } else {
            false
        }
    }

    pub fn timer(&self) -> f32 {
        self.timer
    }
}

/// Random heading kick in `[-PI/2, PI/2)` used to break a stall.
pub fn recovery_kick(rng: &mut impl DeterministicRng) -> f32 {
    rng.next_f32_centered() * PI
}
