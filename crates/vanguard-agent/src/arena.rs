use std::collections::BTreeMap;

use tracing::debug;
use vanguard_core::{rng::derive_seed, AgentId, SplitMix64, TickContext, Vec2};

use crate::{
    agent::Agent,
    config::{AgentConfig, AgentConfigError},
    frame::WorldFrame,
    turret::FireSink,
};

/// RNG stream id for an agent's behavioral randomness.
const STREAM_BEHAVIOR: u64 = 0;

/// The live set of agents, keyed by stable id.
///
/// Iteration order is the id order (`BTreeMap`), so a full-arena update is
/// deterministic. Removal is a separate mark-then-compact pass
/// ([`retire_destroyed`](AgentArena::retire_destroyed)) that runs after the
/// update pass, never during it.
#[derive(Debug, Default)]
pub struct AgentArena {
    agents: BTreeMap<AgentId, Agent>,
    next_id: u64,
    world_seed: u64,
}

impl AgentArena {
    pub fn new(world_seed: u64) -> Self {
        Self {
            agents: BTreeMap::new(),
            next_id: 0,
            world_seed,
        }
    }

    /// Spawn one agent and return its id. Ids are never reused, and each
    /// agent's RNG stream is derived from the arena's world seed so whole
    /// waves replay identically.
    pub fn spawn(
        &mut self,
        position: Vec2,
        heading: f32,
        config: AgentConfig,
    ) -> Result<AgentId, AgentConfigError> {
        let id = AgentId(self.next_id);
        let rng = SplitMix64::new(derive_seed(self.world_seed, id.stable_id(), STREAM_BEHAVIOR));
        let agent = Agent::spawn(id, position, heading, config, rng)?;
        self.next_id += 1;
        self.agents.insert(id, agent);
        Ok(id)
    }

    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(&id)
    }

    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.values()
    }

    /// Tick every agent in id order against the same world frame.
    pub fn update_all(&mut self, ctx: &TickContext, frame: &WorldFrame<'_>, sink: &mut dyn FireSink) {
        for agent in self.agents.values_mut() {
            agent.update(ctx, frame, sink);
        }
    }

    /// Compact away agents whose health reached zero. Returns the retired
    /// ids (in id order) so the owner can release per-agent resources.
    pub fn retire_destroyed(&mut self) -> Vec<AgentId> {
        let retired: Vec<AgentId> = self
            .agents
            .values()
            .filter(|agent| agent.is_destroyed())
            .map(Agent::id)
            .collect();

        for id in &retired {
            self.agents.remove(id);
            debug!(agent = id.stable_id(), "agent retired");
        }

        retired
    }
}
