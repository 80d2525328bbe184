//! Task configuration: initial conditions, goal, and reward shaping.

use crate::core::{Result, TaskError};
use crate::reward::{AccelerationPenalty, AttitudePenalty, BoundsPenalty, CompositePenalty, NoPenalty, Penalty};
use crate::sim::{InitialConditions, Pose, DEFAULT_RUNTIME};

/// Goal used when none is configured.
pub const DEFAULT_TARGET: [f64; 3] = [0.0, 0.0, 10.0];

/// Selects the penalty strategy subtracted from the distance reward.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum PenaltyConfig {
    #[default]
    None,
    Attitude { weight: f64 },
    Acceleration { weight: f64 },
    Bounds(BoundsPenalty),
    Composite { parts: Vec<PenaltyConfig> },
}

impl PenaltyConfig {
    /// Instantiate the configured strategy.
    pub fn build(&self) -> Box<dyn Penalty> {
        match self {
            PenaltyConfig::None => Box::new(NoPenalty),
            PenaltyConfig::Attitude { weight } => Box::new(AttitudePenalty { weight: *weight }),
            PenaltyConfig::Acceleration { weight } => Box::new(AccelerationPenalty { weight: *weight }),
            PenaltyConfig::Bounds(b) => Box::new(*b),
            PenaltyConfig::Composite { parts } => {
                let mut c = CompositePenalty::new();
                for p in parts {
                    c.push(p.build());
                }
                Box::new(c)
            }
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            PenaltyConfig::None => Ok(()),
            PenaltyConfig::Attitude { weight } | PenaltyConfig::Acceleration { weight } => {
                if weight.is_finite() { Ok(()) } else { Err(invalid(format!("penalty weight must be finite, got {weight}"))) }
            }
            PenaltyConfig::Bounds(b) => {
                if !b.amount.is_finite() {
                    return Err(invalid(format!("bounds penalty amount must be finite, got {}", b.amount)));
                }
                let mut all_bounds = b.low.iter().chain(b.high.iter()).flatten();
                if let Some(v) = all_bounds.find(|v| !v.is_finite()) {
                    return Err(invalid(format!("bounds penalty limits must be finite, got {v}")));
                }
                for i in 0..3 {
                    if let (Some(lo), Some(hi)) = (b.low[i], b.high[i]) {
                        if lo > hi {
                            return Err(invalid(format!("bounds penalty low[{i}] > high[{i}]")));
                        }
                    }
                }
                Ok(())
            }
            PenaltyConfig::Composite { parts } => parts.iter().try_for_each(PenaltyConfig::validate),
        }
    }
}

fn invalid(msg: String) -> TaskError { TaskError::InvalidConfig(msg) }

/// Everything needed to build a [`crate::Task`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TaskConfig {
    pub init_pose: Option<Pose>,
    pub init_velocities: Option<[f64; 3]>,
    pub init_angle_velocities: Option<[f64; 3]>,
    /// Episode time limit in seconds.
    pub runtime: f64,
    /// Goal position; [`DEFAULT_TARGET`] when unset.
    pub target_pos: Option<[f64; 3]>,
    pub penalty: PenaltyConfig,
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            init_pose: None,
            init_velocities: None,
            init_angle_velocities: None,
            runtime: DEFAULT_RUNTIME,
            target_pos: None,
            penalty: PenaltyConfig::None,
        }
    }
}

impl TaskConfig {
    pub fn new() -> Self { Self::default() }

    pub fn with_init_pose(mut self, pose: Pose) -> Self { self.init_pose = Some(pose); self }
    pub fn with_init_velocities(mut self, v: [f64; 3]) -> Self { self.init_velocities = Some(v); self }
    pub fn with_init_angle_velocities(mut self, w: [f64; 3]) -> Self { self.init_angle_velocities = Some(w); self }
    pub fn with_runtime(mut self, runtime: f64) -> Self { self.runtime = runtime; self }
    pub fn with_target(mut self, target: [f64; 3]) -> Self { self.target_pos = Some(target); self }
    pub fn with_penalty(mut self, penalty: PenaltyConfig) -> Self { self.penalty = penalty; self }

    /// The configured goal, falling back to [`DEFAULT_TARGET`].
    pub fn target(&self) -> [f64; 3] { self.target_pos.unwrap_or(DEFAULT_TARGET) }

    /// Initial conditions to hand to the simulator.
    pub fn initial_conditions(&self) -> InitialConditions {
        InitialConditions {
            init_pose: self.init_pose,
            init_velocities: self.init_velocities,
            init_angle_velocities: self.init_angle_velocities,
            runtime: self.runtime,
        }
    }

    /// Reject values no simulator could meaningfully run with.
    pub fn validate(&self) -> Result<()> {
        if !self.runtime.is_finite() || self.runtime <= 0.0 {
            return Err(invalid(format!("runtime must be finite and positive, got {}", self.runtime)));
        }
        if !self.target().iter().all(|v| v.is_finite()) {
            return Err(invalid(format!("target position must be finite, got {:?}", self.target())));
        }
        if !self.initial_conditions().all_finite() {
            return Err(invalid("initial conditions must be finite".into()));
        }
        self.penalty.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reward::SimState;

    #[test]
    fn defaults() {
        let c = TaskConfig::default();
        assert_eq!(c.runtime, 5.0);
        assert_eq!(c.target(), [0.0, 0.0, 10.0]);
        assert_eq!(c.penalty, PenaltyConfig::None);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn builder_sets_initial_conditions() {
        let c = TaskConfig::new()
            .with_init_pose(Pose::at([1.0, 2.0, 3.0]))
            .with_init_velocities([0.5, 0.0, 0.0])
            .with_runtime(2.5)
            .with_target([4.0, 5.0, 6.0]);
        let init = c.initial_conditions();
        assert_eq!(init.init_pose, Some(Pose::at([1.0, 2.0, 3.0])));
        assert_eq!(init.init_velocities, Some([0.5, 0.0, 0.0]));
        assert_eq!(init.init_angle_velocities, None);
        assert_eq!(init.runtime, 2.5);
        assert_eq!(c.target(), [4.0, 5.0, 6.0]);
    }

    #[test]
    fn rejects_bad_runtime_and_target() {
        for rt in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = TaskConfig::new().with_runtime(rt).validate().unwrap_err();
            assert!(matches!(err, TaskError::InvalidConfig(_)));
        }
        assert!(TaskConfig::new().with_target([0.0, f64::NAN, 0.0]).validate().is_err());
        assert!(TaskConfig::new().with_init_velocities([f64::INFINITY, 0.0, 0.0]).validate().is_err());
    }

    #[test]
    fn rejects_inverted_bounds() {
        let b = BoundsPenalty { low: [Some(10.0), None, None], high: [Some(0.0), None, None], amount: 1.0 };
        let c = TaskConfig::new().with_penalty(PenaltyConfig::Composite { parts: vec![PenaltyConfig::Bounds(b)] });
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_non_finite_bounds() {
        for bad in [f64::NAN, f64::INFINITY] {
            let b = BoundsPenalty { low: [None, Some(bad), None], ..BoundsPenalty::default() };
            let err = TaskConfig::new().with_penalty(PenaltyConfig::Bounds(b)).validate().unwrap_err();
            assert!(matches!(err, TaskError::InvalidConfig(_)));
        }
        assert!(TaskConfig::new().with_penalty(PenaltyConfig::Bounds(BoundsPenalty::default())).validate().is_ok());
    }

    #[test]
    fn builds_composite_penalty() {
        let cfg = PenaltyConfig::Composite {
            parts: vec![
                PenaltyConfig::Attitude { weight: 1.0 },
                PenaltyConfig::Bounds(BoundsPenalty::default()),
            ],
        };
        let p = cfg.build();
        let s = SimState { pose: Pose::new([0.0, 0.0, 250.0], [0.5, 0.0, 0.5]), linear_accel: None };
        assert_eq!(p.penalty(&s), 1.0 + 10000.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn config_round_trips_through_json() {
        let c = TaskConfig::new()
            .with_target([1.0, 2.0, 3.0])
            .with_penalty(PenaltyConfig::Acceleration { weight: 3.0 });
        let json = serde_json::to_string(&c).expect("serialize");
        let back: TaskConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, c);

        let partial: TaskConfig = serde_json::from_str(r#"{"runtime": 3.0}"#).expect("partial");
        assert_eq!(partial.runtime, 3.0);
        assert_eq!(partial.target(), DEFAULT_TARGET);
    }
}
