/*!
Shared vocabulary for the two closed-form 2D distributions.

- [`Model2D`] is the capability set every model provides: a density, a single
  draw, its natural plotting extent and an optional parameter check.
- [`SampleSet`] holds `n` drawn points as two equal-length coordinate arrays.
- [`DistributionParameters`] is the tagged union over the concrete models
  ([`CorrelatedNormal`] and [`Banana`]) and implements [`Model2D`] by delegation.

This module is generic over the floating-point precision (e.g. `f32` or `f64`)
through the [`Real`] bound.

# Examples

```rust
use bivariate_sampler::distributions::{DistributionKind, DistributionParameters, Model2D};
use rand::rngs::SmallRng;
use rand::SeedableRng;

let params: DistributionParameters<f64> = DistributionParameters::default_for("banana".parse()?);
assert_eq!(params.kind(), DistributionKind::Banana);

let mut rng = SmallRng::seed_from_u64(42);
let samples = params.sample(500, &mut rng);
assert_eq!(samples.len(), 500);
println!("Density at origin: {}", params.density(0.0, 0.0));
# Ok::<(), bivariate_sampler::error::ParameterError>(())
```
*/

use std::fmt::{self, Debug, Display};
use std::str::FromStr;

use ndarray::Array1;
use num_traits::{Float, FloatConst, FromPrimitive};
use rand::Rng;
use rand_distr::{Distribution, OpenClosed01};

use crate::banana::Banana;
use crate::error::ParameterError;
use crate::normal::CorrelatedNormal;

/// Floating-point types the models are generic over.
pub trait Real:
    Float + FloatConst + FromPrimitive + Debug + Display + Send + Sync + 'static
{
}

impl<T> Real for T where
    T: Float + FloatConst + FromPrimitive + Debug + Display + Send + Sync + 'static
{
}

/// Density of the 1D normal distribution N(mu, sigma^2) at `x`.
pub fn normal_pdf<T: Real>(x: T, mu: T, sigma: T) -> T {
    let half = T::from(0.5).unwrap();
    let z = (x - mu) / sigma;
    (-half * z * z).exp() / (sigma * (T::PI() + T::PI()).sqrt())
}

/// Axis-aligned bounding box `[x_min, x_max] × [y_min, y_max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent<T> {
    pub x_min: T,
    pub x_max: T,
    pub y_min: T,
    pub y_max: T,
}

impl<T: Real> Extent<T> {
    pub fn new(x_min: T, x_max: T, y_min: T, y_max: T) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    pub fn width(&self) -> T {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> T {
        self.y_max - self.y_min
    }

    pub fn area(&self) -> T {
        self.width() * self.height()
    }

    pub fn contains(&self, x: T, y: T) -> bool {
        (self.x_min..=self.x_max).contains(&x) && (self.y_min..=self.y_max).contains(&y)
    }
}

/**
A 2D distribution that can be sampled directly and whose density has a closed form.

Implementors provide a single draw; [`Model2D::sample`] repeats it `n` times.
Parameters are not checked by any of the numeric methods: invalid parameters
propagate as non-finite values. Call [`Model2D::validate`] to check them
explicitly.
*/
pub trait Model2D<T: Real> {
    /// Probability density at `(x, y)`.
    fn density(&self, x: T, y: T) -> T;

    /// Draws a single point.
    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> (T, T)
    where
        OpenClosed01: Distribution<T>;

    /// Region holding effectively all of the probability mass.
    fn natural_extent(&self) -> Extent<T>;

    /// Checks the parameters, naming the first offending field.
    fn validate(&self) -> Result<(), ParameterError>;

    /// Draws `n` independent points.
    fn sample<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> SampleSet<T>
    where
        OpenClosed01: Distribution<T>,
    {
        (0..n).map(|_| self.draw(rng)).collect()
    }
}

/// `n` drawn points, point `i` being `(xs[i], ys[i])`.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet<T> {
    pub xs: Array1<T>,
    pub ys: Array1<T>,
}

impl<T: Real> SampleSet<T> {
    pub fn empty() -> Self {
        Self {
            xs: Array1::from_vec(Vec::new()),
            ys: Array1::from_vec(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Iterates over the points as `(x, y)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (T, T)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }

    /// Concatenates sample sets, preserving their order.
    pub fn concat<I: IntoIterator<Item = SampleSet<T>>>(parts: I) -> Self {
        let mut xs = Vec::new();
        let mut ys = Vec::new();
        for part in parts {
            xs.extend(part.xs.iter().copied());
            ys.extend(part.ys.iter().copied());
        }
        Self {
            xs: Array1::from_vec(xs),
            ys: Array1::from_vec(ys),
        }
    }
}

impl<T: Real> FromIterator<(T, T)> for SampleSet<T> {
    fn from_iter<I: IntoIterator<Item = (T, T)>>(iter: I) -> Self {
        let (xs, ys): (Vec<T>, Vec<T>) = iter.into_iter().unzip();
        Self {
            xs: Array1::from_vec(xs),
            ys: Array1::from_vec(ys),
        }
    }
}

/// The two supported distribution families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DistributionKind {
    Normal,
    Banana,
}

impl DistributionKind {
    pub const ALL: [DistributionKind; 2] = [DistributionKind::Normal, DistributionKind::Banana];

    /// Human-readable name used in plot titles.
    pub fn label(&self) -> &'static str {
        match self {
            DistributionKind::Normal => "Bivariate Normal",
            DistributionKind::Banana => "Banana Distribution",
        }
    }
}

impl Display for DistributionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistributionKind::Normal => f.write_str("normal"),
            DistributionKind::Banana => f.write_str("banana"),
        }
    }
}

impl FromStr for DistributionKind {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(DistributionKind::Normal),
            "banana" => Ok(DistributionKind::Banana),
            _ => Err(ParameterError::UnknownKind(s.to_string())),
        }
    }
}

/// Parameters of one of the supported models.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DistributionParameters<T> {
    Normal(CorrelatedNormal<T>),
    Banana(Banana<T>),
}

impl<T: Real> DistributionParameters<T> {
    pub fn kind(&self) -> DistributionKind {
        match self {
            DistributionParameters::Normal(_) => DistributionKind::Normal,
            DistributionParameters::Banana(_) => DistributionKind::Banana,
        }
    }

    /// Density of the x marginal. Both models leave `x` normal.
    pub fn marginal_x(&self) -> impl Fn(T) -> T {
        let params = *self;
        move |x| match params {
            DistributionParameters::Normal(m) => m.marginal_x()(x),
            DistributionParameters::Banana(m) => m.marginal_x()(x),
        }
    }

    /// The parameters an interactive front end starts out with.
    pub fn default_for(kind: DistributionKind) -> Self {
        let (zero, one) = (T::zero(), T::one());
        let half = T::from(0.5).unwrap();
        match kind {
            DistributionKind::Normal => {
                DistributionParameters::Normal(CorrelatedNormal::new(zero, zero, one, one, half))
            }
            DistributionKind::Banana => DistributionParameters::Banana(Banana::new(half, one, one)),
        }
    }
}

impl<T: Real> From<CorrelatedNormal<T>> for DistributionParameters<T> {
    fn from(model: CorrelatedNormal<T>) -> Self {
        DistributionParameters::Normal(model)
    }
}

impl<T: Real> From<Banana<T>> for DistributionParameters<T> {
    fn from(model: Banana<T>) -> Self {
        DistributionParameters::Banana(model)
    }
}

impl<T: Real> Model2D<T> for DistributionParameters<T> {
    fn density(&self, x: T, y: T) -> T {
        match self {
            DistributionParameters::Normal(m) => m.density(x, y),
            DistributionParameters::Banana(m) => m.density(x, y),
        }
    }

    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> (T, T)
    where
        OpenClosed01: Distribution<T>,
    {
        match self {
            DistributionParameters::Normal(m) => m.draw(rng),
            DistributionParameters::Banana(m) => m.draw(rng),
        }
    }

    fn natural_extent(&self) -> Extent<T> {
        match self {
            DistributionParameters::Normal(m) => m.natural_extent(),
            DistributionParameters::Banana(m) => m.natural_extent(),
        }
    }

    fn validate(&self) -> Result<(), ParameterError> {
        match self {
            DistributionParameters::Normal(m) => m.validate(),
            DistributionParameters::Banana(m) => m.validate(),
        }
    }
}

#[cfg(test)]
mod distributions_tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::f64::consts::PI;

    #[test]
    fn test_normal_pdf() {
        assert_abs_diff_eq!(normal_pdf(0.0, 0.0, 1.0), 1.0 / (2.0 * PI).sqrt(), epsilon = 1e-15);
        assert_abs_diff_eq!(normal_pdf(1.0, 0.0, 1.0), 0.24197072451914337, epsilon = 1e-12);
        assert_abs_diff_eq!(
            normal_pdf(5.0f32, 3.0, 2.0),
            0.12098536,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("normal".parse::<DistributionKind>(), Ok(DistributionKind::Normal));
        assert_eq!(" Banana ".parse::<DistributionKind>(), Ok(DistributionKind::Banana));
        assert_eq!(
            "gibbs".parse::<DistributionKind>(),
            Err(ParameterError::UnknownKind("gibbs".to_string()))
        );
        for kind in DistributionKind::ALL {
            assert_eq!(kind.to_string().parse::<DistributionKind>(), Ok(kind));
        }
        assert_eq!(DistributionKind::Banana.label(), "Banana Distribution");
    }

    #[test]
    fn test_sample_set_zero_draws() {
        let params = DistributionParameters::<f64>::default_for(DistributionKind::Normal);
        let mut rng = SmallRng::seed_from_u64(1);
        let samples = params.sample(0, &mut rng);
        assert!(samples.is_empty());
        assert_eq!(samples.xs.len(), 0);
        assert_eq!(samples.ys.len(), 0);
    }

    #[test]
    fn test_sample_set_lengths() {
        let mut rng = SmallRng::seed_from_u64(2);
        for kind in DistributionKind::ALL {
            let params = DistributionParameters::<f32>::default_for(kind);
            for n in [1, 2, 17, 1000] {
                let samples = params.sample(n, &mut rng);
                assert_eq!(samples.xs.len(), n, "xs length mismatch for {kind}");
                assert_eq!(samples.ys.len(), n, "ys length mismatch for {kind}");
            }
        }
    }

    #[test]
    fn test_concat_preserves_order() {
        let a: SampleSet<f64> = vec![(1.0, 2.0), (3.0, 4.0)].into_iter().collect();
        let b: SampleSet<f64> = vec![(5.0, 6.0)].into_iter().collect();
        let joined = SampleSet::concat([a, SampleSet::empty(), b]);
        let points: Vec<(f64, f64)> = joined.iter().collect();
        assert_eq!(points, vec![(1.0, 2.0), (3.0, 4.0), (5.0, 6.0)]);
    }

    #[test]
    fn test_dispatch_matches_concrete_model() {
        let normal = CorrelatedNormal::new(1.0, -1.0, 2.0, 0.5, 0.3);
        let banana = Banana::new(0.7, 1.5, 0.8);
        let tagged_normal: DistributionParameters<f64> = normal.into();
        let tagged_banana: DistributionParameters<f64> = banana.into();
        for &(x, y) in &[(0.0, 0.0), (1.2, -0.4), (-2.0, 3.0)] {
            assert_eq!(tagged_normal.density(x, y), normal.density(x, y));
            assert_eq!(tagged_banana.density(x, y), banana.density(x, y));
        }
        assert_eq!(tagged_normal.natural_extent(), normal.natural_extent());
        assert_eq!(tagged_banana.natural_extent(), banana.natural_extent());

        let mut rng_a = SmallRng::seed_from_u64(9);
        let mut rng_b = SmallRng::seed_from_u64(9);
        assert_eq!(
            tagged_banana.sample(10, &mut rng_a),
            banana.sample(10, &mut rng_b)
        );
    }

    #[test]
    fn test_marginal_x_dispatch() {
        let normal = CorrelatedNormal::new(1.0, -1.0, 2.0, 0.5, 0.3);
        let banana = Banana::new(0.7, 1.5, 0.8);
        let tagged_normal = DistributionParameters::from(normal).marginal_x();
        let tagged_banana = DistributionParameters::from(banana).marginal_x();
        for x in [-3.0f64, 0.0, 1.0, 2.5] {
            assert_eq!(tagged_normal(x), normal_pdf(x, 1.0, 2.0));
            assert_eq!(tagged_banana(x), banana.marginal_x()(x));
        }
    }

    #[test]
    fn test_extent_helpers() {
        let e = Extent::new(-1.0, 3.0, 0.0, 2.0);
        assert_eq!(e.width(), 4.0);
        assert_eq!(e.height(), 2.0);
        assert_eq!(e.area(), 8.0);
        assert!(e.contains(3.0, 0.0));
        assert!(!e.contains(3.1, 0.0));
    }
}
