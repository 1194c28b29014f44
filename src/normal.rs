/*!
Bivariate normal distribution parameterized by location, scale and correlation.

The density is

```text
z0 = (x - mu_x) / sigma_x,   z1 = (y - mu_y) / sigma_y
p(x, y) = exp(-(z0² - 2ρ z0 z1 + z1²) / (2(1 - ρ²))) / (2π sigma_x sigma_y sqrt(1 - ρ²))
```

and samples are built from two independent standard normals `(z0, z1)` as

```text
x = mu_x + sigma_x z0
y = mu_y + sigma_y (ρ z0 + sqrt(1 - ρ²) z1)
```

which is the Cholesky factor of the 2×2 correlation matrix applied to `(z0, z1)`.

# Examples

```rust
use bivariate_sampler::distributions::Model2D;
use bivariate_sampler::normal::CorrelatedNormal;
use rand::rngs::SmallRng;
use rand::SeedableRng;

let model = CorrelatedNormal::new(0.0, 0.0, 1.0, 1.0, 0.0);
assert!((model.density(0.0, 0.0) - 1.0 / (2.0 * std::f64::consts::PI)).abs() < 1e-12);

let mut rng = SmallRng::seed_from_u64(42);
let samples = model.sample(100, &mut rng);
assert_eq!(samples.len(), 100);
```
*/

use rand::Rng;
use rand_distr::{Distribution, OpenClosed01};

use crate::box_muller::standard_normal_pair;
use crate::distributions::{normal_pdf, Extent, Model2D, Real};
use crate::error::{check_finite, check_positive, ParameterError};

/// Number of standard deviations covered on each side of the mean by the natural extent.
pub const EXTENT_SIGMAS: f64 = 4.0;

/// Bivariate normal with means `mu_x, mu_y`, standard deviations `sigma_x, sigma_y`
/// and correlation `rho`.
///
/// Requires `sigma_x > 0`, `sigma_y > 0` and `-1 < rho < 1`; the density is
/// infinite or `NaN` at `|rho| = 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrelatedNormal<T> {
    pub mu_x: T,
    pub mu_y: T,
    pub sigma_x: T,
    pub sigma_y: T,
    pub rho: T,
}

impl<T: Real> CorrelatedNormal<T> {
    pub fn new(mu_x: T, mu_y: T, sigma_x: T, sigma_y: T, rho: T) -> Self {
        Self {
            mu_x,
            mu_y,
            sigma_x,
            sigma_y,
            rho,
        }
    }

    /// Zero means, unit standard deviations and correlation `rho`.
    pub fn standard(rho: T) -> Self {
        Self::new(T::zero(), T::zero(), T::one(), T::one(), rho)
    }

    /// `sqrt(1 - rho²)`.
    fn rho_complement(&self) -> T {
        (T::one() - self.rho * self.rho).sqrt()
    }

    /// Density of the x marginal, N(mu_x, sigma_x²).
    pub fn marginal_x(&self) -> impl Fn(T) -> T {
        let (mu, sigma) = (self.mu_x, self.sigma_x);
        move |x| normal_pdf(x, mu, sigma)
    }

    /// Density of the y marginal, N(mu_y, sigma_y²).
    pub fn marginal_y(&self) -> impl Fn(T) -> T {
        let (mu, sigma) = (self.mu_y, self.sigma_y);
        move |y| normal_pdf(y, mu, sigma)
    }

    /// Covariance matrix `[[σx², ρσxσy], [ρσxσy, σy²]]`.
    pub fn covariance(&self) -> [[T; 2]; 2] {
        let off = self.rho * self.sigma_x * self.sigma_y;
        [
            [self.sigma_x * self.sigma_x, off],
            [off, self.sigma_y * self.sigma_y],
        ]
    }
}

impl<T: Real> Model2D<T> for CorrelatedNormal<T> {
    fn density(&self, x: T, y: T) -> T {
        let one = T::one();
        let two = one + one;
        let z0 = (x - self.mu_x) / self.sigma_x;
        let z1 = (y - self.mu_y) / self.sigma_y;
        let one_minus_rho_sq = one - self.rho * self.rho;
        let quad = z0 * z0 - two * self.rho * z0 * z1 + z1 * z1;
        let exponent = -quad / (two * one_minus_rho_sq);
        exponent.exp() / (two * T::PI() * self.sigma_x * self.sigma_y * one_minus_rho_sq.sqrt())
    }

    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> (T, T)
    where
        OpenClosed01: Distribution<T>,
    {
        let (z0, z1) = standard_normal_pair::<T, R>(rng);
        let x = self.mu_x + self.sigma_x * z0;
        let y = self.mu_y + self.sigma_y * (self.rho * z0 + self.rho_complement() * z1);
        (x, y)
    }

    fn natural_extent(&self) -> Extent<T> {
        let k = T::from(EXTENT_SIGMAS).unwrap();
        Extent::new(
            self.mu_x - k * self.sigma_x,
            self.mu_x + k * self.sigma_x,
            self.mu_y - k * self.sigma_y,
            self.mu_y + k * self.sigma_y,
        )
    }

    fn validate(&self) -> Result<(), ParameterError> {
        check_finite("mu_x", self.mu_x)?;
        check_finite("mu_y", self.mu_y)?;
        check_positive("sigma_x", self.sigma_x)?;
        check_positive("sigma_y", self.sigma_y)?;
        if !(self.rho > -T::one() && self.rho < T::one()) {
            return Err(ParameterError::invalid(
                "rho",
                self.rho,
                "must lie strictly inside (-1, 1)",
            ));
        }
        Ok(())
    }
}
