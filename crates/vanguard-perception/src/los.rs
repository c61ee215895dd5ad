use vanguard_core::{Obstacle, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of points sampled along the sight segment.
pub const LOS_SAMPLES: u32 = 20;

/// Binary line-of-sight test from `from` to `to` against static blockers.
///
/// Samples [`LOS_SAMPLES`] equally spaced points along the segment (including
/// the origin, excluding the endpoint) and reports false as soon as one falls
/// inside an obstacle. There is no graded visibility.
pub fn line_of_sight(from: Vec2, to: Vec2, obstacles: &[Obstacle]) -> bool {
    let step = (to - from) / LOS_SAMPLES as f32;
    for i in 0..LOS_SAMPLES {
        let sample = from + step * i as f32;
        if obstacles.iter().any(|obstacle| obstacle.contains(sample)) {
            return false;
        }
    }
    true
}

/// Coarse classification of a hostile's distance against an agent's sensor
/// envelope. Requires `attack_range <= detection_range` (validated at agent
/// construction) so the bands nest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RangeBand {
    /// Close enough to engage.
    Attack,
    /// Detectable but outside weapon range.
    Detection,
    /// Beyond the sensor envelope.
    Outside,
}

impl RangeBand {
    pub fn classify(distance: f32, detection_range: f32, attack_range: f32) -> Self {
        if distance < attack_range {
            RangeBand::Attack
        } else if distance < detection_range {
            RangeBand::Detection
        } else {
            RangeBand::Outside
        }
    }

    /// Whether the hostile registers on the sensor at all.
    pub fn detected(self) -> bool {
        !matches!(self, RangeBand::Outside)
    }
}
