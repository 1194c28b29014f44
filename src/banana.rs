/*!
The "banana" distribution: a product of two zero-mean normals bent by a shear in `y`.

Points are drawn in latent space as `(σx z0, σy z1)` and moved to observed space
with [`forward_transform`]:

```text
(x, y) ↦ (x, y - c (x² - 1))
```

The density at an observed point is the latent product density evaluated at
[`inverse_transform`] of that point. The shear only moves `y` by a function of `x`,
so its Jacobian determinant is 1 and no correction factor appears.
*/

use rand::Rng;
use rand_distr::{Distribution, OpenClosed01};

use crate::box_muller::standard_normal_pair;
use crate::distributions::{normal_pdf, Extent, Model2D, Real};
use crate::error::{check_finite, check_positive, ParameterError};
use crate::normal::EXTENT_SIGMAS;

/// Widening of the y extent per unit of curvature. `x² - 1` reaches 15 at `x = ±4`.
pub const EXTENT_WARP: f64 = 16.0;

/// Maps a latent point to observed (banana) coordinates.
pub fn forward_transform<T: Real>(x: T, y: T, curvature: T) -> (T, T) {
    (x, y - curvature * (x * x - T::one()))
}

/// Maps an observed point back to latent coordinates. Inverse of [`forward_transform`].
pub fn inverse_transform<T: Real>(x: T, y: T, curvature: T) -> (T, T) {
    (x, y + curvature * (x * x - T::one()))
}

/// Banana distribution with bend `curvature` and latent standard deviations
/// `sigma_x`, `sigma_y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Banana<T> {
    pub curvature: T,
    pub sigma_x: T,
    pub sigma_y: T,
}

impl<T: Real> Banana<T> {
    pub fn new(curvature: T, sigma_x: T, sigma_y: T) -> Self {
        Self {
            curvature,
            sigma_x,
            sigma_y,
        }
    }

    pub fn forward(&self, x: T, y: T) -> (T, T) {
        forward_transform(x, y, self.curvature)
    }

    pub fn inverse(&self, x: T, y: T) -> (T, T) {
        inverse_transform(x, y, self.curvature)
    }

    /// Density of the latent (pre-warp) product of normals.
    pub fn latent_density(&self, x: T, y: T) -> T {
        normal_pdf(x, T::zero(), self.sigma_x) * normal_pdf(y, T::zero(), self.sigma_y)
    }

    /// Density of the x marginal. The shear leaves `x` untouched, so this is N(0, σx²).
    pub fn marginal_x(&self) -> impl Fn(T) -> T {
        let sigma = self.sigma_x;
        move |x| normal_pdf(x, T::zero(), sigma)
    }
}

impl<T: Real> Model2D<T> for Banana<T> {
    fn density(&self, x: T, y: T) -> T {
        let (lx, ly) = self.inverse(x, y);
        self.latent_density(lx, ly)
    }

    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> (T, T)
    where
        OpenClosed01: Distribution<T>,
    {
        let (z0, z1) = standard_normal_pair::<T, R>(rng);
        self.forward(self.sigma_x * z0, self.sigma_y * z1)
    }

    /// `x ∈ ±4σx`, `y ∈ ±(4σy + 16|c|)`.
    ///
    /// The absolute curvature keeps `y_min < y_max` when the banana opens downwards.
    fn natural_extent(&self) -> Extent<T> {
        let k = T::from(EXTENT_SIGMAS).unwrap();
        let warp = T::from(EXTENT_WARP).unwrap() * self.curvature.abs();
        let half_height = k * self.sigma_y + warp;
        Extent::new(
            -k * self.sigma_x,
            k * self.sigma_x,
            -half_height,
            half_height,
        )
    }

    fn validate(&self) -> Result<(), ParameterError> {
        check_finite("curvature", self.curvature)?;
        check_positive("sigma_x", self.sigma_x)?;
        check_positive("sigma_y", self.sigma_y)?;
        Ok(())
    }
}
