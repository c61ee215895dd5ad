use thiserror::Error;
use vanguard_steering::Mobility;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Immutable per-agent tuning, fixed at spawn.
///
/// Buffs/debuffs from outside the behavior core would replace the whole
/// config; nothing in the tick path mutates it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AgentConfig {
    /// Sensor envelope: a visible hostile inside this range is detected.
    pub detection_range: f32,
    /// Weapon envelope: the machine holds the attack state inside this range.
    pub attack_range: f32,
    /// Health below which the agent breaks off and retreats.
    pub flee_health_threshold: f32,
    /// Gunnery skill in `[0, 1]`; 1.0 removes aim jitter entirely.
    pub accuracy: f32,
    /// Seconds of continuous sighting required before the agent opens fire.
    pub reaction_time: f32,
    /// Seconds between shots.
    pub fire_rate: f32,
    pub max_health: f32,
    pub max_speed: f32,
    pub acceleration: f32,
    /// Hull rotation cap, radians per second.
    pub rotation_speed: f32,
    /// Turret rotation cap, radians per second (independent of the hull).
    pub turret_rotation_speed: f32,
    /// Velocity decay factor per 60 Hz frame.
    pub friction: f32,
    pub projectile_speed: f32,
    pub projectile_damage: f32,
    /// Distance from hull center to the muzzle along the turret bearing.
    pub muzzle_offset: f32,
    /// Lead the target by straight-line extrapolation instead of aiming at
    /// its current position.
    pub predictive_aiming: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            detection_range: 250.0,
            attack_range: 200.0,
            flee_health_threshold: 20.0,
            accuracy: 0.8,
            reaction_time: 0.3,
            fire_rate: 0.8,
            max_health: 75.0,
            max_speed: 120.0,
            acceleration: 600.0,
            rotation_speed: 3.0,
            turret_rotation_speed: 4.0,
            friction: 0.85,
            projectile_speed: 400.0,
            projectile_damage: 20.0,
            muzzle_offset: 35.0,
            predictive_aiming: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AgentConfigError {
    #[error("accuracy must be within [0, 1], got {0}")]
    AccuracyOutOfRange(f32),
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("attack range {attack} exceeds detection range {detection}")]
    RangesDoNotNest { attack: f32, detection: f32 },
}

impl AgentConfig {
    /// Validate once at construction; the tick path assumes these hold.
    pub fn validate(&self) -> Result<(), AgentConfigError> {
        if !(0.0..=1.0).contains(&self.accuracy) {
            return Err(AgentConfigError::AccuracyOutOfRange(self.accuracy));
        }

        for (field, value) in [
            ("detection_range", self.detection_range),
            ("attack_range", self.attack_range),
            ("fire_rate", self.fire_rate),
            ("max_health", self.max_health),
            ("max_speed", self.max_speed),
            ("acceleration", self.acceleration),
            ("rotation_speed", self.rotation_speed),
            ("turret_rotation_speed", self.turret_rotation_speed),
            ("friction", self.friction),
            ("projectile_speed", self.projectile_speed),
        ] {
            if value <= 0.0 {
                return Err(AgentConfigError::NonPositive { field, value });
            }
        }

        for (field, value) in [
            ("flee_health_threshold", self.flee_health_threshold),
            ("reaction_time", self.reaction_time),
            ("projectile_damage", self.projectile_damage),
            ("muzzle_offset", self.muzzle_offset),
        ] {
            if value < 0.0 {
                return Err(AgentConfigError::Negative { field, value });
            }
        }

        if self.attack_range > self.detection_range {
            return Err(AgentConfigError::RangesDoNotNest {
                attack: self.attack_range,
                detection: self.detection_range,
            });
        }

        Ok(())
    }

    /// Movement limits in the shape the steering layer consumes.
    pub fn mobility(&self) -> Mobility {
        Mobility {
            max_speed: self.max_speed,
            acceleration: self.acceleration,
            rotation_speed: self.rotation_speed,
            friction: self.friction,
        }
    }
}
