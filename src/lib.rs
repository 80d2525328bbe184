pub mod core;
pub mod sim;
pub mod reward;
pub mod config;
pub mod spaces;
pub mod utils;
pub mod task;
pub mod wrappers;

pub use crate::core::{Env, Info, InfoValue, Result, Step, TaskError};
pub use crate::sim::{InitialConditions, Pose, RotorSpeeds, Simulator, POSE_SIZE, ROTOR_COUNT};
pub use crate::reward::{
    distance_reward, AccelerationPenalty, AttitudePenalty, BoundsPenalty, CompositePenalty, NoPenalty, Penalty,
    SimState,
};
pub use crate::config::{PenaltyConfig, TaskConfig, DEFAULT_TARGET};
pub use crate::spaces::{BoxSpace, Space};
pub use crate::task::{Task, ACTION_HIGH, ACTION_LOW, ACTION_REPEAT, ACTION_SIZE, STATE_SIZE};
pub use crate::wrappers::{ClipAction, RecordEpisodeStatistics, TransformReward};
pub use crate::utils::{rng_from_seed, RngStream};

#[cfg(test)]
mod tests {
    use super::*;

    /// A simulator that never moves, to check the trait surface from the crate root.
    struct FrozenSim {
        pose: Pose,
    }

    impl Simulator for FrozenSim {
        fn new(init: InitialConditions) -> Self {
            Self { pose: init.init_pose.unwrap_or_default() }
        }
        fn pose(&self) -> Pose { self.pose }
        fn next_timestep(&mut self, _rotor_speeds: &RotorSpeeds) -> bool { true }
        fn reset(&mut self) {}
    }

    #[test]
    fn documented_reward_examples() {
        for (z, expected) in [(10.0, 17600.0), (183.0, 300.0), (0.0, 17600.0)] {
            let cfg = TaskConfig::new().with_init_pose(Pose::at([0.0, 0.0, z]));
            let task: Task<FrozenSim> = Task::new(cfg).expect("task");
            assert_eq!(task.get_reward(), expected, "z={z}");
        }
    }

    #[test]
    fn frozen_sim_is_done_after_one_step() {
        let mut task: Task<FrozenSim> = Task::new(TaskConfig::default()).expect("task");
        let state = task.reset();
        let (next, reward, done) = task.step(&[450.0; 4]);
        assert_eq!(state, next);
        assert!(done);
        // origin is exactly 10 from the default target
        assert_eq!(reward, 3.0 * 17600.0);
    }
}
