// Common trait for action and observation spaces.

use rand::Rng;

/// Element is the value type that lives in the space (e.g. `[f64; 4]` for rotor speeds).
pub trait Space {
    type Element;

    /// Draw a sample from the space using the provided RNG.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Element;

    /// Return true if the given element is a valid member of the space.
    fn contains(&self, elem: &Self::Element) -> bool;
}
