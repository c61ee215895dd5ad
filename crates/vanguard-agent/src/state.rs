use core::fmt;

use vanguard_perception::RangeBand;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::AgentConfig;

/// Seconds of lost contact before a chasing agent gives up.
pub const CHASE_FORGET_SECS: f32 = 3.0;
/// Seconds of lost contact before an attacking agent falls back to chasing.
pub const ATTACK_FORGET_SECS: f32 = 2.0;
/// Hysteresis factor on attack range before breaking off back to chase.
pub const ATTACK_BREAK_FACTOR: f32 = 1.5;
/// Health recovery factor (on the flee threshold) required to stand down.
pub const RETREAT_RECOVER_FACTOR: f32 = 1.5;

/// Behavioral state of an agent. The machine is reactive: transitions use
/// only current-tick perception, never lookahead, and no state is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BehaviorState {
    #[default]
    Patrol,
    Chase,
    Attack,
    Retreat,
}

impl fmt::Display for BehaviorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BehaviorState::Patrol => "patrol",
            BehaviorState::Chase => "chase",
            BehaviorState::Attack => "attack",
            BehaviorState::Retreat => "retreat",
        };
        f.write_str(name)
    }
}

/// Per-tick perception summary the transition table consumes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Percept {
    pub visible: bool,
    pub distance: f32,
    pub time_since_seen: f32,
}

/// One evaluation of the transition table.
///
/// Conditions are checked in the listed order per state and the first match
/// wins, so the result is total and deterministic over the inputs: every
/// `(state, percept, health)` combination maps to exactly one next state.
pub fn transition(
    state: BehaviorState,
    percept: &Percept,
    health: f32,
    config: &AgentConfig,
) -> BehaviorState {
    let band = RangeBand::classify(
        percept.distance,
        config.detection_range,
        config.attack_range,
    );

    match state {
        BehaviorState::Patrol => {
            if percept.visible && band.detected() {
                BehaviorState::Chase
            } else {
                BehaviorState::Patrol
            }
        }
        BehaviorState::Chase => {
            if !percept.visible && percept.time_since_seen > CHASE_FORGET_SECS {
                BehaviorState::Patrol
            } else if percept.visible && band == RangeBand::Attack {
                BehaviorState::Attack
            } else if health < config.flee_health_threshold {
                BehaviorState::Retreat
            } else {
                BehaviorState::Chase
            }
        }
        BehaviorState::Attack => {
            if percept.distance > config.attack_range * ATTACK_BREAK_FACTOR {
                BehaviorState::Chase
            } else if health < config.flee_health_threshold {
                BehaviorState::Retreat
            } else if !percept.visible && percept.time_since_seen > ATTACK_FORGET_SECS {
                BehaviorState::Chase
            } else {
                BehaviorState::Attack
            }
        }
        BehaviorState::Retreat => {
            if health > config.flee_health_threshold * RETREAT_RECOVER_FACTOR
                && percept.distance > config.detection_range
            {
                BehaviorState::Patrol
            } else {
                BehaviorState::Retreat
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn percept(visible: bool, distance: f32, time_since_seen: f32) -> Percept {
        Percept {
            visible,
            distance,
            time_since_seen,
        }
    }

    #[test]
    fn patrol_ignores_an_unseen_hostile_in_range() {
        let config = AgentConfig::default();
        let next = transition(
            BehaviorState::Patrol,
            &percept(false, 100.0, 5.0),
            75.0,
            &config,
        );
        assert_eq!(next, BehaviorState::Patrol);
    }

    #[test]
    fn chase_prefers_attacking_over_fleeing_when_both_apply() {
        // Listed order: the attack condition is checked before the health one.
        let config = AgentConfig::default();
        let next = transition(
            BehaviorState::Chase,
            &percept(true, 100.0, 0.0),
            5.0,
            &config,
        );
        assert_eq!(next, BehaviorState::Attack);
    }

    #[test]
    fn attack_breaks_off_beyond_one_and_a_half_attack_ranges() {
        let config = AgentConfig::default();
        let next = transition(
            BehaviorState::Attack,
            &percept(true, 301.0, 0.0),
            75.0,
            &config,
        );
        assert_eq!(next, BehaviorState::Chase);
    }

    #[test]
    fn retreat_requires_both_health_and_distance_to_stand_down() {
        let config = AgentConfig::default();
        let healthy_but_close = transition(
            BehaviorState::Retreat,
            &percept(false, 100.0, 10.0),
            75.0,
            &config,
        );
        assert_eq!(healthy_but_close, BehaviorState::Retreat);

        let far_but_hurt = transition(
            BehaviorState::Retreat,
            &percept(false, 400.0, 10.0),
            25.0,
            &config,
        );
        assert_eq!(far_but_hurt, BehaviorState::Retreat);

        let recovered = transition(
            BehaviorState::Retreat,
            &percept(false, 400.0, 10.0),
            40.0,
            &config,
        );
        assert_eq!(recovered, BehaviorState::Patrol);
    }
}
