use std::f32::consts::{FRAC_PI_4, FRAC_PI_8};

use vanguard_core::{math, AgentId, DeterministicRng, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{AgentConfig, TargetSnapshot};

/// Half-angle of the cone within which the turret is allowed to fire.
pub const AIM_CONE: f32 = FRAC_PI_8;

/// Jitter spread applied at accuracy 0.
const MAX_JITTER: f32 = FRAC_PI_4;

/// Request to spawn a projectile, consumed by the external weapons system.
/// The behavior core never constructs or owns the projectile itself.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FireIntent {
    /// Muzzle position.
    pub origin: Vec2,
    pub angle: f32,
    pub speed: f32,
    pub damage: f32,
    pub owner: AgentId,
}

/// Receiver for emitted fire intents.
pub trait FireSink {
    fn fire(&mut self, intent: FireIntent);
}

impl FireSink for Vec<FireIntent> {
    fn fire(&mut self, intent: FireIntent) {
        self.push(intent);
    }
}

/// Ideal aim bearing for `target` as seen from `own_position`, before jitter.
///
/// With predictive aiming on, leads the target by straight-line extrapolation
/// over the projectile's travel time (non-iterative, one refinement only).
pub fn aim_solution(own_position: Vec2, target: &TargetSnapshot, config: &AgentConfig) -> f32 {
    let aim_point = if config.predictive_aiming {
        let time_to_target = own_position.distance(target.position) / config.projectile_speed;
        target.position + target.velocity * time_to_target
    } else {
        target.position
    };
    math::angle_to(own_position, aim_point)
}

/// Turret state: bearing plus the fire-rate cooldown clock.
///
/// The turret rotates independently of the hull; the two angles share nothing
/// beyond their normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Turret {
    angle: f32,
    since_last_shot: f32,
}

impl Turret {
    pub fn new(angle: f32) -> Self {
        Self {
            angle: math::normalize_angle(angle),
            // Spawn ready to fire.
            since_last_shot: f32::INFINITY,
        }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Advance the cooldown clock. `dt` is the only clock this ever sees.
    pub fn tick(&mut self, dt: f32) {
        self.since_last_shot += dt;
    }

    /// Rotate toward the (jittered) aim solution at the capped turret rate.
    pub fn aim(
        &mut self,
        own_position: Vec2,
        target: &TargetSnapshot,
        config: &AgentConfig,
        rng: &mut impl DeterministicRng,
        dt: f32,
    ) {
        let mut desired = aim_solution(own_position, target, config);
        desired += (1.0 - config.accuracy) * rng.next_f32_centered() * MAX_JITTER;
        self.angle = math::rotate_toward(
            self.angle,
            math::normalize_angle(desired),
            config.turret_rotation_speed * dt,
        );
    }

    /// Attempt a shot at the live target position.
    ///
    /// Fires only when the cooldown has elapsed AND the turret bears within
    /// [`AIM_CONE`] of the target; both gates must pass. A successful shot
    /// resets the cooldown clock.
    pub fn try_fire(
        &mut self,
        own_position: Vec2,
        owner: AgentId,
        target_position: Vec2,
        config: &AgentConfig,
    ) -> Option<FireIntent> {
        if self.since_last_shot < config.fire_rate {
            return None;
        }

        let bearing = math::angle_to(own_position, target_position);
        if math::angle_delta(bearing, self.angle).abs() > AIM_CONE {
            return None;
        }

        self.since_last_shot = 0.0;
        Some(FireIntent {
            origin: own_position + Vec2::from_angle(self.angle) * config.muzzle_offset,
            angle: self.angle,
            speed: config.projectile_speed,
            damage: config.projectile_damage,
            owner,
        })
    }
}
