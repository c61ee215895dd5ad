use vanguard_core::{DeterministicRng, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Distance at which a waypoint counts as reached.
pub const WAYPOINT_RADIUS: f32 = 50.0;

/// Per-axis spread of generated waypoints around the spawn point.
const SCATTER: f32 = 400.0;

/// Cyclic sequence of patrol waypoints, generated once at spawn and immutable
/// afterwards apart from the cursor.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PatrolRoute {
    points: Vec<Vec2>,
    current: usize,
}

impl PatrolRoute {
    /// 3 to 5 waypoints scattered up to half [`SCATTER`] from `origin` on
    /// each axis.
    pub fn generate(origin: Vec2, rng: &mut impl DeterministicRng) -> Self {
        let count = 3 + (rng.next_u32() % 3) as usize;
        let points = (0..count)
            .map(|_| {
                Vec2::new(
                    origin.x + rng.next_f32_centered() * SCATTER,
                    origin.y + rng.next_f32_centered() * SCATTER,
                )
            })
            .collect();
        Self { points, current: 0 }
    }

    pub fn from_points(points: Vec<Vec2>) -> Self {
        Self { points, current: 0 }
    }

    /// Waypoint currently being sought, `None` for an empty route.
    pub fn current(&self) -> Option<Vec2> {
        self.points.get(self.current).copied()
    }

    /// Move the cursor to the next waypoint, wrapping at the end.
    pub fn advance(&mut self) {
        if !self.points.is_empty() {
            self.current = (self.current + 1) % self.points.len();
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vanguard_core::SplitMix64;

    #[test]
    fn generated_route_has_three_to_five_points_near_origin() {
        for seed in 0..64 {
            let mut rng = SplitMix64::new(seed);
            let origin = Vec2::new(1000.0, 800.0);
            let route = PatrolRoute::generate(origin, &mut rng);

            assert!((3..=5).contains(&route.len()));
            for point in route.points() {
                assert!((point.x - origin.x).abs() <= SCATTER / 2.0);
                assert!((point.y - origin.y).abs() <= SCATTER / 2.0);
            }
        }
    }

    #[test]
    fn cursor_wraps_around_the_route() {
        let mut route = PatrolRoute::from_points(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 0.0),
            Vec2::new(0.0, 100.0),
        ]);

        assert_eq!(route.current(), Some(Vec2::new(0.0, 0.0)));
        route.advance();
        route.advance();
        assert_eq!(route.current(), Some(Vec2::new(0.0, 100.0)));
        route.advance();
        assert_eq!(route.current(), Some(Vec2::new(0.0, 0.0)));
    }

    #[test]
    fn empty_route_stays_empty() {
        let mut route = PatrolRoute::from_points(Vec::new());
        assert_eq!(route.current(), None);
        route.advance();
        assert_eq!(route.current(), None);
    }

    #[test]
    fn generation_is_reproducible_from_the_seed() {
        let mut a = SplitMix64::new(99);
        let mut b = SplitMix64::new(99);
        let origin = Vec2::ZERO;
        assert_eq!(
            PatrolRoute::generate(origin, &mut a),
            PatrolRoute::generate(origin, &mut b)
        );
    }
}
