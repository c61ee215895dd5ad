use vanguard_core::{math, Bounds, Obstacle, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Distance at which seeking a point becomes a no-op.
pub const ARRIVAL_RADIUS: f32 = 10.0;
/// How far ahead the avoidance cone reaches.
pub const AVOID_LOOKAHEAD: f32 = 80.0;
/// Half-angle of the avoidance cone around the current heading.
pub const AVOID_CONE: f32 = std::f32::consts::FRAC_PI_4;
/// Fixed bearing nudge applied away from an obstacle in the cone.
pub const AVOID_BIAS: f32 = 0.5;

/// Friction is tuned as a per-frame decay at this reference rate.
const FRICTION_REFERENCE_HZ: f32 = 60.0;

/// Movement limits for a hull.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Mobility {
    pub max_speed: f32,
    pub acceleration: f32,
    /// Hull rotation cap, radians per second.
    pub rotation_speed: f32,
    /// Velocity decay factor per 60 Hz frame.
    pub friction: f32,
}

impl Default for Mobility {
    fn default() -> Self {
        Self {
            max_speed: 120.0,
            acceleration: 600.0,
            rotation_speed: 3.0,
            friction: 0.85,
        }
    }
}

/// Positional state the steering layer reads and writes each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Kinematics {
    pub position: Vec2,
    /// Hull heading, normalized to `(-PI, PI]`.
    pub heading: f32,
    pub velocity: Vec2,
}

impl Kinematics {
    pub fn new(position: Vec2, heading: f32) -> Self {
        Self {
            position,
            heading: math::normalize_angle(heading),
            velocity: Vec2::ZERO,
        }
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

/// Steer toward `target`: rotate the hull toward the (avoidance-biased)
/// bearing at the capped rate, then thrust forward along the heading.
///
/// Within [`ARRIVAL_RADIUS`] of the target this does nothing, leaving the
/// hull to coast to a stop under friction.
pub fn steer_toward(
    kinematics: &mut Kinematics,
    target: Vec2,
    obstacles: &[Obstacle],
    mobility: &Mobility,
    dt: f32,
) {
    if kinematics.position.distance(target) < ARRIVAL_RADIUS {
        return;
    }

    let mut bearing = math::angle_to(kinematics.position, target);
    if let Some(bias) = avoidance_bias(kinematics, obstacles) {
        bearing = math::normalize_angle(bearing + bias);
    }

    kinematics.heading = math::rotate_toward(
        kinematics.heading,
        bearing,
        mobility.rotation_speed * dt,
    );
    kinematics.velocity += Vec2::from_angle(kinematics.heading) * (mobility.acceleration * dt);
}

/// Bearing nudge away from the nearest obstacle inside the lookahead cone,
/// or `None` when the cone is clear. Single obstacle only; overlapping
/// blockers are not blended.
fn avoidance_bias(kinematics: &Kinematics, obstacles: &[Obstacle]) -> Option<f32> {
    let mut nearest: Option<(f32, f32)> = None;

    for obstacle in obstacles {
        let center = obstacle.center();
        let distance = kinematics.position.distance(center);
        if distance >= AVOID_LOOKAHEAD {
            continue;
        }

        let offset = math::angle_delta(
            math::angle_to(kinematics.position, center),
            kinematics.heading,
        );
        if offset.abs() >= AVOID_CONE {
            continue;
        }

        match nearest {
            Some((best, _)) if best <= distance => {}
            _ => nearest = Some((distance, offset)),
        }
    }

    nearest.map(|(_, offset)| if offset > 0.0 { -AVOID_BIAS } else { AVOID_BIAS })
}

/// Apply friction, clamp speed, and integrate position.
pub fn integrate(kinematics: &mut Kinematics, mobility: &Mobility, dt: f32) {
    let decay = mobility.friction.powf(dt * FRICTION_REFERENCE_HZ);
    kinematics.velocity = kinematics.velocity * decay;

    let speed = kinematics.speed();
    if speed > mobility.max_speed && speed > 0.0 {
        kinematics.velocity = kinematics.velocity * (mobility.max_speed / speed);
    }

    kinematics.position += kinematics.velocity * dt;
}

/// Clamp the hull inside `bounds`, reflecting the offending velocity
/// component off the wall.
pub fn constrain(kinematics: &mut Kinematics, bounds: &Bounds) {
    if kinematics.position.x < bounds.min.x {
        kinematics.position.x = bounds.min.x;
        kinematics.velocity.x = kinematics.velocity.x.abs();
    }
    if kinematics.position.x > bounds.max.x {
        kinematics.position.x = bounds.max.x;
        kinematics.velocity.x = -kinematics.velocity.x.abs();
    }
    if kinematics.position.y < bounds.min.y {
        kinematics.position.y = bounds.min.y;
        kinematics.velocity.y = kinematics.velocity.y.abs();
    }
    if kinematics.position.y > bounds.max.y {
        kinematics.position.y = bounds.max.y;
        kinematics.velocity.y = -kinematics.velocity.y.abs();
    }
}
