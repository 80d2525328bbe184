// Wrappers for composing a task with action, reward and bookkeeping layers.
//
// - ClipAction: clamp rotor speeds into the action space before they reach the simulator
// - TransformReward: map each step reward (e.g. scaling for a learner)
// - RecordEpisodeStatistics: episode return/length in the final step's Info

use crate::core::{Env, Info, InfoValue, Step};
use crate::spaces::BoxSpace;

/// Clamps each component of a fixed-size action into `[low, high]`.
pub struct ClipAction<E, const N: usize>
where
    E: Env<Act = [f64; N]>,
{
    inner: E,
    bounds: BoxSpace<f64, N>,
}

impl<E, const N: usize> ClipAction<E, N>
where
    E: Env<Act = [f64; N]>,
{
    pub fn new(inner: E, bounds: BoxSpace<f64, N>) -> Self { Self { inner, bounds } }

    pub fn inner(&self) -> &E { &self.inner }
    pub fn inner_mut(&mut self) -> &mut E { &mut self.inner }
    pub fn into_inner(self) -> E { self.inner }
}

impl<E, const N: usize> Env for ClipAction<E, N>
where
    E: Env<Act = [f64; N]>,
{
    type Obs = E::Obs;
    type Act = [f64; N];

    fn reset(&mut self, seed: Option<u64>) -> (Self::Obs, Info) { self.inner.reset(seed) }

    fn step(&mut self, action: Self::Act) -> Step<Self::Obs> {
        self.inner.step(self.bounds.clip(action))
    }

    fn close(&mut self) { self.inner.close() }
}

/// TransformReward maps rewards through a user-provided function.
pub struct TransformReward<E, F>
where
    E: Env,
    F: Fn(f64) -> f64,
{
    inner: E,
    f: F,
}

impl<E, F> TransformReward<E, F>
where
    E: Env,
    F: Fn(f64) -> f64,
{
    pub fn new(inner: E, f: F) -> Self { Self { inner, f } }

    pub fn into_inner(self) -> E { self.inner }
}

impl<E, F> Env for TransformReward<E, F>
where
    E: Env,
    F: Fn(f64) -> f64,
{
    type Obs = E::Obs;
    type Act = E::Act;

    fn reset(&mut self, seed: Option<u64>) -> (Self::Obs, Info) { self.inner.reset(seed) }

    fn step(&mut self, action: Self::Act) -> Step<Self::Obs> {
        let mut s = self.inner.step(action);
        s.reward = (self.f)(s.reward);
        s
    }

    fn close(&mut self) { self.inner.close() }
}

/// Tracks cumulative return and episode length.
/// When an episode ends it inserts into the returned Step's Info:
/// - "episode_return": f64
/// - "episode_length": i64
pub struct RecordEpisodeStatistics<E: Env> {
    inner: E,
    ep_return: f64,
    ep_length: usize,
}

impl<E: Env> RecordEpisodeStatistics<E> {
    pub fn new(inner: E) -> Self { Self { inner, ep_return: 0.0, ep_length: 0 } }

    pub fn into_inner(self) -> E { self.inner }
}

impl<E: Env> Env for RecordEpisodeStatistics<E> {
    type Obs = E::Obs;
    type Act = E::Act;

    fn reset(&mut self, seed: Option<u64>) -> (Self::Obs, Info) {
        self.ep_return = 0.0;
        self.ep_length = 0;
        self.inner.reset(seed)
    }

    fn step(&mut self, action: Self::Act) -> Step<Self::Obs> {
        let mut s = self.inner.step(action);
        self.ep_return += s.reward;
        self.ep_length += 1;
        if s.is_done() {
            log::debug!("episode finished: return={} length={}", self.ep_return, self.ep_length);
            s.info.insert("episode_return", InfoValue::from(self.ep_return));
            s.info.insert("episode_length", InfoValue::from(self.ep_length));
            self.ep_return = 0.0;
            self.ep_length = 0;
        }
        s
    }

    fn close(&mut self) { self.inner.close() }
}
