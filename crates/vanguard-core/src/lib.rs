//! Deterministic, engine-agnostic kernel primitives for the combat simulation.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod math;
pub mod rng;
pub mod tick;
pub mod world;

pub use agent::AgentId;
pub use math::Vec2;
pub use rng::{DeterministicRng, SplitMix64};
pub use tick::TickContext;
pub use world::{Bounds, Obstacle};
