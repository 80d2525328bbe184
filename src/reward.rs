//! Distance-shaped reward and pluggable penalty strategies.
//!
//! Reward bands, by distance `d` from the target:
//! - `d > 173`: base reward only
//! - `10 < d <= 173`: base + `(173 - d) * 100`
//! - `d <= 10`: base + 17300

use crate::sim::{Pose, Simulator};

/// Reward paid on every sub-step regardless of distance.
pub const BASE_REWARD: f64 = 300.0;
/// Beyond this distance no shaping is applied.
pub const SHAPING_RADIUS: f64 = 173.0;
/// Reward per unit of distance closed inside the shaping radius.
pub const REWARD_PER_UNIT: f64 = 100.0;
/// At or inside this distance the flat goal bonus applies.
pub const GOAL_RADIUS: f64 = 10.0;
pub const GOAL_BONUS: f64 = 17300.0;

/// Reward before penalties for a position `distance` away from the target.
pub fn distance_reward(distance: f64) -> f64 {
    let mut reward = BASE_REWARD;
    if distance <= GOAL_RADIUS {
        reward += GOAL_BONUS;
    } else if distance <= SHAPING_RADIUS {
        reward += (SHAPING_RADIUS - distance) * REWARD_PER_UNIT;
    }
    // NaN falls through every band and pays the base reward
    reward
}

/// What a penalty may look at after a simulator tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimState {
    pub pose: Pose,
    pub linear_accel: Option<[f64; 3]>,
}

impl SimState {
    pub fn of<S: Simulator + ?Sized>(sim: &S) -> Self {
        Self { pose: sim.pose(), linear_accel: sim.linear_accel() }
    }
}

/// A shaping term subtracted from the distance reward.
pub trait Penalty {
    fn penalty(&self, state: &SimState) -> f64;
}

impl<F> Penalty for F
where
    F: Fn(&SimState) -> f64,
{
    fn penalty(&self, state: &SimState) -> f64 { (self)(state) }
}

/// The default: rewards are the raw distance bands.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NoPenalty;

impl Penalty for NoPenalty {
    fn penalty(&self, _state: &SimState) -> f64 { 0.0 }
}

/// Discourages combined roll and yaw: `weight * |phi + psi|`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttitudePenalty {
    pub weight: f64,
}

impl Default for AttitudePenalty {
    fn default() -> Self { Self { weight: 2.0 } }
}

impl Penalty for AttitudePenalty {
    fn penalty(&self, state: &SimState) -> f64 {
        let [phi, _theta, psi] = state.pose.angles;
        self.weight * (phi + psi).abs()
    }
}

/// `weight * sum(|accel|)`; zero when the simulator does not report acceleration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AccelerationPenalty {
    pub weight: f64,
}

impl Default for AccelerationPenalty {
    fn default() -> Self { Self { weight: 3.0 } }
}

impl Penalty for AccelerationPenalty {
    fn penalty(&self, state: &SimState) -> f64 {
        state
            .linear_accel
            .map(|a| self.weight * a.iter().map(|v| v.abs()).sum::<f64>())
            .unwrap_or(0.0)
    }
}

/// Flat penalty whenever the position leaves an axis-aligned box.
/// `None` bounds are open on that side.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundsPenalty {
    pub low: [Option<f64>; 3],
    pub high: [Option<f64>; 3],
    pub amount: f64,
}

impl Default for BoundsPenalty {
    fn default() -> Self {
        Self {
            low: [Some(-100.0), Some(-100.0), None],
            high: [Some(120.0), Some(120.0), Some(200.0)],
            amount: 10000.0,
        }
    }
}

impl BoundsPenalty {
    pub fn contains(&self, position: &[f64; 3]) -> bool {
        (0..3).all(|i| {
            let above = self.low[i].is_none_or(|lo| position[i] >= lo);
            let below = self.high[i].is_none_or(|hi| position[i] <= hi);
            above && below
        })
    }
}

impl Penalty for BoundsPenalty {
    fn penalty(&self, state: &SimState) -> f64 {
        if self.contains(&state.pose.position) { 0.0 } else { self.amount }
    }
}

/// Sum of several penalties.
#[derive(Default)]
pub struct CompositePenalty {
    parts: Vec<Box<dyn Penalty>>,
}

impl CompositePenalty {
    pub fn new() -> Self { Self { parts: Vec::new() } }

    pub fn with<P: Penalty + 'static>(mut self, p: P) -> Self {
        self.parts.push(Box::new(p));
        self
    }

    pub fn push(&mut self, p: Box<dyn Penalty>) { self.parts.push(p); }

    pub fn len(&self) -> usize { self.parts.len() }
    pub fn is_empty(&self) -> bool { self.parts.is_empty() }
}

impl Penalty for CompositePenalty {
    fn penalty(&self, state: &SimState) -> f64 {
        self.parts.iter().map(|p| p.penalty(state)).sum()
    }
}

/// Distance reward toward a fixed target, minus a penalty strategy.
pub struct RewardFn {
    target: [f64; 3],
    penalty: Box<dyn Penalty>,
}

impl RewardFn {
    pub fn new(target: [f64; 3], penalty: Box<dyn Penalty>) -> Self { Self { target, penalty } }

    pub fn target(&self) -> &[f64; 3] { &self.target }

    pub fn set_penalty(&mut self, penalty: Box<dyn Penalty>) { self.penalty = penalty; }

    pub fn evaluate(&self, state: &SimState) -> f64 {
        let distance = state.pose.distance_to(&self.target);
        distance_reward(distance) - self.penalty.penalty(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_at(position: [f64; 3]) -> SimState {
        SimState { pose: Pose::at(position), linear_accel: None }
    }

    #[test]
    fn bands_and_boundaries() {
        assert_eq!(distance_reward(0.0), 17600.0);
        assert_eq!(distance_reward(10.0), 17600.0);
        assert_eq!(distance_reward(11.0), 300.0 + 162.0 * 100.0);
        assert_eq!(distance_reward(173.0), 300.0);
        assert_eq!(distance_reward(173.5), 300.0);
        assert_eq!(distance_reward(1e9), 300.0);
        assert_eq!(distance_reward(f64::NAN), 300.0);
    }

    #[test]
    fn shaping_band_is_discontinuous_at_goal_radius() {
        // just outside 10 pays (173 - 10.5) * 100, less than the flat bonus
        let outside = distance_reward(10.5);
        assert_eq!(outside, 300.0 + 162.5 * 100.0);
        assert!(outside < distance_reward(10.0));
    }

    #[test]
    fn reward_fn_uses_target() {
        let r = RewardFn::new([0.0, 0.0, 10.0], Box::new(NoPenalty));
        assert_eq!(r.evaluate(&state_at([0.0, 0.0, 10.0])), 17600.0);
        assert_eq!(r.evaluate(&state_at([0.0, 0.0, 183.0])), 300.0);
        assert_eq!(r.evaluate(&state_at([0.0, 0.0, 0.0])), 17600.0);
    }

    #[test]
    fn attitude_penalty_uses_roll_plus_yaw() {
        let p = AttitudePenalty::default();
        let s = SimState { pose: Pose::new([0.0; 3], [0.5, 9.0, -0.25]), linear_accel: None };
        assert_eq!(p.penalty(&s), 2.0 * 0.25);
    }

    #[test]
    fn acceleration_penalty_is_zero_without_telemetry() {
        let p = AccelerationPenalty::default();
        assert_eq!(p.penalty(&state_at([0.0; 3])), 0.0);
        let s = SimState { pose: Pose::default(), linear_accel: Some([1.0, -2.0, 0.5]) };
        assert_eq!(p.penalty(&s), 3.0 * 3.5);
    }

    #[test]
    fn bounds_penalty_box() {
        let p = BoundsPenalty::default();
        assert_eq!(p.penalty(&state_at([0.0, 0.0, 50.0])), 0.0);
        assert_eq!(p.penalty(&state_at([0.0, 0.0, -500.0])), 0.0);
        assert_eq!(p.penalty(&state_at([-100.5, 0.0, 0.0])), 10000.0);
        assert_eq!(p.penalty(&state_at([0.0, 121.0, 0.0])), 10000.0);
        assert_eq!(p.penalty(&state_at([0.0, 0.0, 200.5])), 10000.0);
    }

    #[test]
    fn composite_and_closure_penalties_sum() {
        let p = CompositePenalty::new()
            .with(BoundsPenalty::default())
            .with(|_s: &SimState| 1.5);
        assert_eq!(p.len(), 2);
        assert_eq!(p.penalty(&state_at([0.0, 0.0, 300.0])), 10001.5);

        let r = RewardFn::new([0.0, 0.0, 10.0], Box::new(p));
        assert_eq!(r.evaluate(&state_at([0.0, 0.0, 10.0])), 17600.0 - 1.5);
    }
}
