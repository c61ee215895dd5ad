//! Reactive local steering.
//!
//! This is deliberately not a path planner: agents seek a point, bias their
//! bearing away from the single nearest obstacle in a short lookahead cone,
//! and fall back to a randomized heading kick when they stall against
//! geometry. Global navigation never enters the picture.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod patrol;
pub mod steering;
pub mod stuck;

pub use patrol::{PatrolRoute, WAYPOINT_RADIUS};
pub use steering::{
    constrain, integrate, steer_toward, Kinematics, Mobility, ARRIVAL_RADIUS, AVOID_BIAS,
    AVOID_CONE, AVOID_LOOKAHEAD,
};
pub use stuck::{recovery_kick, StuckTracker, STALL_DISPLACEMENT, STALL_TRIGGER_SECS};
