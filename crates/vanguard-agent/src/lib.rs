//! The autonomous behavior core for hostile combatants.
//!
//! One call per agent per frame: [`Agent::update`] runs perception, evaluates
//! the four-state behavior machine (patrol / chase / attack / retreat),
//! drives steering and turret control, and emits fire intents into the
//! caller-supplied [`FireSink`]. The core never resolves hits, owns
//! projectiles, or reads wall time; everything it consumes arrives through
//! the [`WorldFrame`] and [`TickContext`](vanguard_core::TickContext).

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod arena;
pub mod config;
pub mod frame;
pub mod state;
pub mod turret;

pub use agent::Agent;
pub use arena::AgentArena;
pub use config::{AgentConfig, AgentConfigError};
pub use frame::{TargetSnapshot, WorldFrame};
pub use state::{transition, BehaviorState, Percept};
pub use turret::{aim_solution, FireIntent, FireSink, Turret, AIM_CONE};

pub use vanguard_core::AgentId;
