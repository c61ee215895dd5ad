use std::f32::consts::FRAC_PI_2;

use tracing::{debug, trace};
use vanguard_core::{math, AgentId, DeterministicRng, SplitMix64, TickContext, Vec2};
use vanguard_perception::{line_of_sight, ContactMemory};
use vanguard_steering::{self as steering, Kinematics, PatrolRoute, StuckTracker, WAYPOINT_RADIUS};

use crate::{
    config::{AgentConfig, AgentConfigError},
    frame::{TargetSnapshot, WorldFrame},
    state::{self, BehaviorState, Percept},
    turret::{FireSink, Turret},
};

/// Distance of the computed back-off point from the hull.
const RETREAT_DISTANCE: f32 = 200.0;
/// Radius of the strafe orbit around a hostile.
const STRAFE_RADIUS: f32 = 100.0;
/// Fraction of attack range below which the agent backs off while firing.
const CLOSE_QUARTERS_FACTOR: f32 = 0.7;
/// Per-tick chance of suppressive fire while retreating.
const SUPPRESSIVE_FIRE_CHANCE: f32 = 0.3;

/// One hostile combatant.
///
/// A plain data record driven by [`Agent::update`]; there is no type
/// hierarchy and no ambient world access. Destruction is external: when
/// health reaches zero the owner stops calling `update` and discards the
/// agent (see [`AgentArena::retire_destroyed`](crate::AgentArena)).
#[derive(Debug, Clone)]
pub struct Agent {
    id: AgentId,
    config: AgentConfig,
    kinematics: Kinematics,
    turret: Turret,
    health: f32,
    state: BehaviorState,
    state_time: f32,
    memory: ContactMemory,
    route: PatrolRoute,
    stuck: StuckTracker,
    rng: SplitMix64,
}

impl Agent {
    /// Spawn at `position` with full health and a freshly generated patrol
    /// route. The generator is injected so behavior replays from a seed; see
    /// [`TickContext::rng_for_agent`] for the usual derivation.
    pub fn spawn(
        id: AgentId,
        position: Vec2,
        heading: f32,
        config: AgentConfig,
        mut rng: SplitMix64,
    ) -> Result<Self, AgentConfigError> {
        let route = PatrolRoute::generate(position, &mut rng);
        Self::spawn_with_route(id, position, heading, config, rng, route)
    }

    /// Spawn with a caller-supplied patrol route (scripted placements, or an
    /// empty route for a stationary sentry).
    pub fn spawn_with_route(
        id: AgentId,
        position: Vec2,
        heading: f32,
        config: AgentConfig,
        rng: SplitMix64,
        route: PatrolRoute,
    ) -> Result<Self, AgentConfigError> {
        config.validate()?;

        Ok(Self {
            id,
            kinematics: Kinematics::new(position, heading),
            turret: Turret::new(heading),
            health: config.max_health,
            state: BehaviorState::Patrol,
            state_time: 0.0,
            memory: ContactMemory::new(),
            route,
            stuck: StuckTracker::new(position),
            rng,
            config,
        })
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn position(&self) -> Vec2 {
        self.kinematics.position
    }

    pub fn heading(&self) -> f32 {
        self.kinematics.heading
    }

    pub fn velocity(&self) -> Vec2 {
        self.kinematics.velocity
    }

    pub fn turret_angle(&self) -> f32 {
        self.turret.angle()
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn state(&self) -> BehaviorState {
        self.state
    }

    /// Seconds since the last state transition.
    pub fn state_time(&self) -> f32 {
        self.state_time
    }

    pub fn memory(&self) -> &ContactMemory {
        &self.memory
    }

    pub fn route(&self) -> &PatrolRoute {
        &self.route
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Damage hook for the external collision/damage resolver, called between
    /// ticks. Health saturates at zero; the agent itself never despawns.
    pub fn apply_damage(&mut self, amount: f32) {
        self.health = (self.health - amount.max(0.0)).max(0.0);
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0.0
    }

    /// One frame of behavior: perception, state transition, the active
    /// state's action, then movement integration and stuck recovery.
    ///
    /// With no live target the agent only keeps its bookkeeping current and
    /// takes no action this tick.
    pub fn update(&mut self, ctx: &TickContext, frame: &WorldFrame<'_>, sink: &mut dyn FireSink) {
        let dt = ctx.dt_seconds.max(0.0);
        self.state_time += dt;
        self.turret.tick(dt);

        let Some(target) = frame.live_target().copied() else {
            self.memory.tick_unseen(dt);
            return;
        };

        let percept = self.perceive(&target, frame, dt);

        let next = state::transition(self.state, &percept, self.health, &self.config);
        if next != self.state {
            debug!(
                agent = self.id.stable_id(),
                from = %self.state,
                to = %next,
                "behavior transition"
            );
            self.state = next;
            self.state_time = 0.0;
        }

        match self.state {
            BehaviorState::Patrol => self.act_patrol(frame, dt),
            BehaviorState::Chase => self.act_chase(&target, &percept, frame, dt),
            BehaviorState::Attack => self.act_attack(&target, &percept, frame, dt, sink),
            BehaviorState::Retreat => self.act_retreat(&target, &percept, frame, dt, sink),
        }

        steering::integrate(&mut self.kinematics, &self.config.mobility(), dt);
        steering::constrain(&mut self.kinematics, &frame.bounds);
        self.recover_if_stuck(dt);
    }

    fn perceive(&mut self, target: &TargetSnapshot, frame: &WorldFrame<'_>, dt: f32) -> Percept {
        let distance = self.kinematics.position.distance(target.position);
        let visible = line_of_sight(self.kinematics.position, target.position, frame.obstacles);
        self.memory.observe(target.position, visible, dt);

        Percept {
            visible,
            distance,
            time_since_seen: self.memory.time_since_seen(),
        }
    }

    /// Cycle waypoints; an empty route degrades to holding position.
    fn act_patrol(&mut self, frame: &WorldFrame<'_>, dt: f32) {
        let Some(waypoint) = self.route.current() else {
            return;
        };

        if self.kinematics.position.distance(waypoint) < WAYPOINT_RADIUS {
            self.route.advance();
        } else {
            steering::steer_toward(
                &mut self.kinematics,
                waypoint,
                frame.obstacles,
                &self.config.mobility(),
                dt,
            );
        }
    }

    /// Pursue the remembered position, not the live one: a hostile that
    /// breaks line of sight is chased to where it was last confirmed.
    fn act_chase(
        &mut self,
        target: &TargetSnapshot,
        percept: &Percept,
        frame: &WorldFrame<'_>,
        dt: f32,
    ) {
        if let Some(last_seen) = self.memory.last_position() {
            steering::steer_toward(
                &mut self.kinematics,
                last_seen,
                frame.obstacles,
                &self.config.mobility(),
                dt,
            );
        }

        if percept.visible {
            self.turret
                .aim(self.kinematics.position, target, &self.config, &mut self.rng, dt);
        }
    }

    /// Distance-banded engagement: back off under close quarters, close in
    /// when out of reach, strafe in between. Fires whenever the hostile is
    /// visible.
    fn act_attack(
        &mut self,
        target: &TargetSnapshot,
        percept: &Percept,
        frame: &WorldFrame<'_>,
        dt: f32,
        sink: &mut dyn FireSink,
    ) {
        let objective = if percept.distance < self.config.attack_range * CLOSE_QUARTERS_FACTOR {
            self.back_off_point(target.position)
        } else if percept.distance > self.config.attack_range {
            target.position
        } else {
            self.strafe_point(target.position)
        };

        steering::steer_toward(
            &mut self.kinematics,
            objective,
            frame.obstacles,
            &self.config.mobility(),
            dt,
        );

        if percept.visible {
            self.engage(target, dt, sink);
        }
    }

    /// Withdraw from the hostile; keeps up sporadic suppressive fire rather
    /// than committing to the fight.
    fn act_retreat(
        &mut self,
        target: &TargetSnapshot,
        percept: &Percept,
        frame: &WorldFrame<'_>,
        dt: f32,
        sink: &mut dyn FireSink,
    ) {
        let objective = self.back_off_point(target.position);
        steering::steer_toward(
            &mut self.kinematics,
            objective,
            frame.obstacles,
            &self.config.mobility(),
            dt,
        );

        if percept.visible && self.rng.chance(SUPPRESSIVE_FIRE_CHANCE) {
            self.engage(target, dt, sink);
        }
    }

    /// Aim, then attempt a shot once the contact has been sighted for at
    /// least the configured reaction time.
    fn engage(&mut self, target: &TargetSnapshot, dt: f32, sink: &mut dyn FireSink) {
        self.turret
            .aim(self.kinematics.position, target, &self.config, &mut self.rng, dt);

        if self.memory.sighted_for() < self.config.reaction_time {
            return;
        }

        if let Some(intent) = self.turret.try_fire(
            self.kinematics.position,
            self.id,
            target.position,
            &self.config,
        ) {
            trace!(agent = self.id.stable_id(), angle = intent.angle, "fire intent");
            sink.fire(intent);
        }
    }

    /// Point [`RETREAT_DISTANCE`] units directly away from the hostile.
    fn back_off_point(&self, hostile: Vec2) -> Vec2 {
        let away = math::angle_to(hostile, self.kinematics.position);
        self.kinematics.position + Vec2::from_angle(away) * RETREAT_DISTANCE
    }

    /// Point at [`STRAFE_RADIUS`] units, offset a quarter turn from the
    /// bearing to the hostile; the side is re-rolled every invocation.
    fn strafe_point(&mut self, hostile: Vec2) -> Vec2 {
        let bearing = math::angle_to(self.kinematics.position, hostile);
        let side = if self.rng.next_bool() { 1.0 } else { -1.0 };
        let orbit = bearing + FRAC_PI_2 * side;
        self.kinematics.position + Vec2::from_angle(orbit) * STRAFE_RADIUS
    }

    fn recover_if_stuck(&mut self, dt: f32) {
        if self.stuck.observe(self.kinematics.position, dt) {
            let kick = steering::recovery_kick(&mut self.rng);
            debug!(agent = self.id.stable_id(), kick, "stuck recovery");
            self.kinematics.heading = math::normalize_angle(self.kinematics.heading + kick);
        }
    }
}
