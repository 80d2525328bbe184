//! The physics simulator seam.
//!
//! The task never integrates dynamics itself: it drives whatever implements
//! [`Simulator`] and reads back its pose.

/// Number of scalars in a flattened pose.
pub const POSE_SIZE: usize = 6;

/// Number of rotors, and thus action components.
pub const ROTOR_COUNT: usize = 4;

/// Per-rotor speed command, in the simulator's units (conventionally 0..=900).
pub type RotorSpeeds = [f64; ROTOR_COUNT];

/// Position (x, y, z) plus three Euler angles, in the simulator's ordering.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose {
    pub position: [f64; 3],
    pub angles: [f64; 3],
}

impl Pose {
    pub fn new(position: [f64; 3], angles: [f64; 3]) -> Self { Self { position, angles } }

    /// A pose at `position` with zero attitude.
    pub fn at(position: [f64; 3]) -> Self { Self { position, angles: [0.0; 3] } }

    /// Flatten as `[x, y, z, phi, theta, psi]`.
    pub fn to_array(&self) -> [f64; POSE_SIZE] {
        let [x, y, z] = self.position;
        let [a, b, c] = self.angles;
        [x, y, z, a, b, c]
    }

    pub fn from_array(v: [f64; POSE_SIZE]) -> Self {
        Self { position: [v[0], v[1], v[2]], angles: [v[3], v[4], v[5]] }
    }

    /// Euclidean distance from this pose's position to `point`.
    pub fn distance_to(&self, point: &[f64; 3]) -> f64 {
        self.position
            .iter()
            .zip(point.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }
}

impl From<[f64; POSE_SIZE]> for Pose {
    fn from(v: [f64; POSE_SIZE]) -> Self { Pose::from_array(v) }
}

impl From<Pose> for [f64; POSE_SIZE] {
    fn from(p: Pose) -> Self { p.to_array() }
}

/// Default episode time limit in seconds.
pub const DEFAULT_RUNTIME: f64 = 5.0;

fn default_runtime() -> f64 { DEFAULT_RUNTIME }

/// Initial conditions handed to [`Simulator::new`].
/// `None` fields let the simulator pick its own defaults.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InitialConditions {
    pub init_pose: Option<Pose>,
    pub init_velocities: Option<[f64; 3]>,
    pub init_angle_velocities: Option<[f64; 3]>,
    /// Episode time limit in seconds, enforced by the simulator.
    pub runtime: f64,
}

impl Default for InitialConditions {
    fn default() -> Self {
        Self {
            init_pose: None,
            init_velocities: None,
            init_angle_velocities: None,
            runtime: default_runtime(),
        }
    }
}

impl InitialConditions {
    pub(crate) fn all_finite(&self) -> bool {
        let pose_ok = self.init_pose.as_ref().is_none_or(Pose::is_finite);
        let vel_ok = self.init_velocities.is_none_or(|v| v.iter().all(|x| x.is_finite()));
        let ang_ok = self.init_angle_velocities.is_none_or(|v| v.iter().all(|x| x.is_finite()));
        pose_ok && vel_ok && ang_ok
    }
}

/// Black-box rigid-body simulator for a single quadcopter.
pub trait Simulator {
    /// Build a simulator from initial conditions and a runtime limit.
    fn new(init: InitialConditions) -> Self
    where
        Self: Sized;

    /// Current pose, updated after every [`Simulator::next_timestep`].
    fn pose(&self) -> Pose;

    /// Advance one internal tick under `rotor_speeds`.
    /// Returns true once the episode has ended (time limit or other terminal condition).
    fn next_timestep(&mut self, rotor_speeds: &RotorSpeeds) -> bool;

    /// Restore the initial conditions and clear elapsed time.
    fn reset(&mut self);

    /// Linear acceleration after the last tick, if the simulator tracks it.
    fn linear_accel(&self) -> Option<[f64; 3]> { None }
}
