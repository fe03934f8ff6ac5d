//! Random source used to shuffle the shoe.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Generator type used by simulations.
pub type SimRng = ChaCha8Rng;

/// Creates the random source for a session.
///
/// A seed gives a reproducible stream; `None` seeds from the operating system.
///
/// ```
/// use bjsim::create_rng;
/// use rand::Rng;
///
/// let a: f64 = create_rng(Some(7)).random();
/// let b: f64 = create_rng(Some(7)).random();
/// assert_eq!(a.to_bits(), b.to_bits());
/// ```
#[must_use]
pub fn create_rng(seed: Option<u64>) -> SimRng {
    seed.map_or_else(ChaCha8Rng::from_os_rng, ChaCha8Rng::seed_from_u64)
}
