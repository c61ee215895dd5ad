use crate::{rng, AgentId, SplitMix64};

/// Per-frame simulation context.
///
/// `dt_seconds` is the only clock the behavior core ever sees; nothing in the
/// workspace reads wall time. Given the same `seed` and the same sequence of
/// tick contexts, every agent decision replays identically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    pub tick: u64,
    pub dt_seconds: f32,
    pub seed: u64,
}

impl TickContext {
    pub fn new(dt_seconds: f32, seed: u64) -> Self {
        Self {
            tick: 0,
            dt_seconds,
            seed,
        }
    }

    /// Context for the following frame.
    pub fn advanced(self) -> Self {
        Self {
            tick: self.tick + 1,
            ..self
        }
    }

    /// Fresh generator for `(agent, stream)`, derived from the world seed.
    pub fn rng_for_agent(&self, agent: AgentId, stream: u64) -> SplitMix64 {
        let seed = rng::derive_seed(self.seed, agent.stable_id(), stream);
        SplitMix64::new(seed)
    }
}
