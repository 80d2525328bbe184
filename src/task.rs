use log::{debug, trace};

use crate::config::TaskConfig;
use crate::core::{Env, Info, InfoValue, Result, Step};
use crate::reward::{Penalty, RewardFn, SimState};
use crate::sim::{Pose, RotorSpeeds, Simulator, POSE_SIZE, ROTOR_COUNT};
use crate::spaces::{BoxSpace, Space};
use crate::utils::rng::{rng_from_seed, RngStream};

/// Simulator ticks per agent step.
pub const ACTION_REPEAT: usize = 3;
/// Length of every observation.
pub const STATE_SIZE: usize = ACTION_REPEAT * POSE_SIZE;
pub const ACTION_SIZE: usize = ROTOR_COUNT;
pub const ACTION_LOW: f64 = 0.0;
pub const ACTION_HIGH: f64 = 900.0;

const DEFAULT_SEED: u64 = 42;

/// Quadcopter goal-reaching task.
///
/// Owns one simulator. Each [`Task::step`] drives it [`ACTION_REPEAT`] ticks with the
/// same rotor speeds, sums the per-tick rewards, and stacks the poses seen after each
/// tick into the observation. The simulator's own `done` flag is the only terminal
/// signal; the task reports it and otherwise ignores it.
pub struct Task<S: Simulator> {
    sim: S,
    reward: RewardFn,
    action_space: BoxSpace<f64, ACTION_SIZE>,
    rng: RngStream,
}

impl<S: Simulator> Task<S> {
    /// Validate `config` and build the simulator from its initial conditions.
    pub fn new(config: TaskConfig) -> Result<Self> {
        config.validate()?;
        let sim = S::new(config.initial_conditions());
        Ok(Self::assemble(sim, &config))
    }

    /// Wrap an already constructed simulator. Only the target and penalty of
    /// `config` are used; the simulator keeps its own initial conditions.
    pub fn with_simulator(sim: S, config: TaskConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::assemble(sim, &config))
    }

    fn assemble(sim: S, config: &TaskConfig) -> Self {
        let target = config.target();
        debug!("task created: target={target:?} runtime={} penalty={:?}", config.runtime, config.penalty);
        Self {
            sim,
            reward: RewardFn::new(target, config.penalty.build()),
            action_space: BoxSpace::uniform(ACTION_LOW, ACTION_HIGH),
            rng: rng_from_seed(DEFAULT_SEED),
        }
    }

    pub fn action_repeat(&self) -> usize { ACTION_REPEAT }
    pub fn state_size(&self) -> usize { STATE_SIZE }
    pub fn action_size(&self) -> usize { ACTION_SIZE }
    pub fn action_low(&self) -> f64 { ACTION_LOW }
    pub fn action_high(&self) -> f64 { ACTION_HIGH }
    pub fn target_pos(&self) -> &[f64; 3] { self.reward.target() }

    /// Rotor speeds, each in `[ACTION_LOW, ACTION_HIGH]`.
    pub fn action_space(&self) -> &BoxSpace<f64, ACTION_SIZE> { &self.action_space }

    /// Uniform random rotor speeds from the action space.
    pub fn sample_action(&mut self) -> RotorSpeeds { self.action_space.sample(&mut self.rng) }

    pub fn simulator(&self) -> &S { &self.sim }

    /// Swap the shaping strategy without rebuilding the task.
    pub fn set_penalty(&mut self, penalty: Box<dyn Penalty>) { self.reward.set_penalty(penalty); }

    pub fn distance_to_target(&self) -> f64 { self.sim.pose().distance_to(self.reward.target()) }

    /// Reward for the simulator's current pose. Does not touch the simulator.
    pub fn get_reward(&self) -> f64 { self.reward.evaluate(&SimState::of(&self.sim)) }

    /// Advance [`ACTION_REPEAT`] ticks under `rotor_speeds`.
    ///
    /// Returns the stacked poses (oldest first), the summed reward and the `done`
    /// flag from the last tick. All ticks run even if an earlier one reported done.
    pub fn step(&mut self, rotor_speeds: &RotorSpeeds) -> (Vec<f64>, f64, bool) {
        let mut reward = 0.0;
        let mut done = false;
        let mut state = Vec::with_capacity(STATE_SIZE);
        for tick in 0..ACTION_REPEAT {
            done = self.sim.next_timestep(rotor_speeds);
            let r = self.get_reward();
            reward += r;
            let pose = self.sim.pose();
            trace!("tick {tick}: pose={:?} reward={r} done={done}", pose.to_array());
            state.extend_from_slice(&pose.to_array());
        }
        if done {
            debug!("simulator reported done; last distance to target {:.3}", self.distance_to_target());
        }
        (state, reward, done)
    }

    /// Restart the simulator and return its pose repeated [`ACTION_REPEAT`] times.
    pub fn reset(&mut self) -> Vec<f64> {
        self.sim.reset();
        let pose = self.sim.pose();
        debug!("task reset: pose={:?}", pose.to_array());
        stack_pose(&pose)
    }
}

fn stack_pose(pose: &Pose) -> Vec<f64> {
    let flat = pose.to_array();
    let mut state = Vec::with_capacity(STATE_SIZE);
    for _ in 0..ACTION_REPEAT {
        state.extend_from_slice(&flat);
    }
    state
}

impl<S: Simulator> Env for Task<S> {
    type Obs = Vec<f64>;
    type Act = RotorSpeeds;

    fn reset(&mut self, seed: Option<u64>) -> (Self::Obs, Info) {
        if let Some(s) = seed { self.rng = rng_from_seed(s); }
        (Task::reset(self), Info::new())
    }

    fn step(&mut self, action: Self::Act) -> Step<Self::Obs> {
        let (state, reward, done) = Task::step(self, &action);
        let mut info = Info::new();
        info.insert("distance", InfoValue::from(self.distance_to_target()));
        info.insert("sim_done", InfoValue::from(done));
        Step::new(state, reward, done, false, info)
    }
}
