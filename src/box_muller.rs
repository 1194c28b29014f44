/*!
Standard-normal variates via the Box–Muller transform.

Two independent uniform draws `u1, u2 ∈ (0, 1]` are turned into two independent
standard-normal draws:

```text
r  = sqrt(-2 ln u1)
z0 = r cos(2π u2)
z1 = r sin(2π u2)
```

Both draws come from [`OpenClosed01`], so `u1` is never zero and the radius is
always finite.

# Examples

```rust
use bivariate_sampler::box_muller::{standard_normal_pair, BoxMuller};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

let mut rng = SmallRng::seed_from_u64(42);
let (z0, z1): (f64, f64) = standard_normal_pair(&mut rng);
assert!(z0.is_finite() && z1.is_finite());

let [a, b]: [f32; 2] = rng.sample(BoxMuller);
assert!(a.is_finite() && b.is_finite());
```
*/

use num_traits::{Float, FloatConst};
use rand::Rng;
use rand_distr::{Distribution, OpenClosed01};

/// Draws a uniform variate from `(0, 1]`.
pub fn open_unit<T, R>(rng: &mut R) -> T
where
    R: Rng + ?Sized,
    OpenClosed01: Distribution<T>,
{
    rng.sample(OpenClosed01)
}

/// Maps a pair of uniform variates to a pair of independent standard-normal variates.
///
/// `u1` must be strictly positive; `u1 == 0` yields an infinite radius.
pub fn box_muller<T: Float + FloatConst>(u1: T, u2: T) -> (T, T) {
    let two = T::one() + T::one();
    let r = (-two * u1.ln()).sqrt();
    let theta = two * T::PI() * u2;
    (r * theta.cos(), r * theta.sin())
}

/// Returns two independent samples from N(0, 1).
pub fn standard_normal_pair<T, R>(rng: &mut R) -> (T, T)
where
    T: Float + FloatConst,
    R: Rng + ?Sized,
    OpenClosed01: Distribution<T>,
{
    let u1: T = open_unit(rng);
    let u2: T = open_unit(rng);
    box_muller(u1, u2)
}

/// The Box–Muller generator as a [`Distribution`] over pairs.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoxMuller;

impl<T> Distribution<[T; 2]> for BoxMuller
where
    T: Float + FloatConst,
    OpenClosed01: Distribution<T>,
{
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> [T; 2] {
        let (z0, z1) = standard_normal_pair(rng);
        [z0, z1]
    }
}
