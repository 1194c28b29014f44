//! Summary statistics for drawn samples and Monte Carlo checks of a model's mass.

use ndarray::prelude::*;
use ndarray_stats::CorrelationExt;
use rand::Rng;
use rand_distr::{Distribution, Standard};
use std::error::Error;

use crate::distributions::{Extent, Model2D, Real, SampleSet};

#[derive(Debug, Clone, PartialEq)]
pub struct SampleSummary<T> {
    pub n: usize,
    pub mean: [T; 2],
    pub std: [T; 2],
    pub correlation: T,
}

impl<T: Real> SampleSummary<T> {
    /// Computes means, sample standard deviations and the Pearson correlation.
    ///
    /// Needs at least two points.
    pub fn from_samples(samples: &SampleSet<T>) -> Result<Self, Box<dyn Error>> {
        let n = samples.len();
        if n < 2 {
            return Err(format!("Expected at least 2 samples, got {n}.").into());
        }
        // variables x observations
        let data = ndarray::stack(Axis(0), &[samples.xs.view(), samples.ys.view()])?;
        let mean = data
            .mean_axis(Axis(1))
            .ok_or("Mean reduction over samples failed.")?;
        let cov = data.cov(T::one())?;
        let corr = data.pearson_correlation()?;
        Ok(Self {
            n,
            mean: [mean[0], mean[1]],
            std: [cov[[0, 0]].sqrt(), cov[[1, 1]].sqrt()],
            correlation: corr[[0, 1]],
        })
    }
}

/// Monte Carlo estimate of the density integral over `extent`.
///
/// Draws `n` points uniformly from the extent and returns `area × mean density`.
pub fn monte_carlo_mass<T, M, R>(model: &M, extent: &Extent<T>, n: usize, rng: &mut R) -> T
where
    T: Real,
    M: Model2D<T> + ?Sized,
    R: Rng + ?Sized,
    Standard: Distribution<T>,
{
    if n == 0 {
        return T::zero();
    }
    let mut total = T::zero();
    for _ in 0..n {
        let (u, v): (T, T) = (rng.gen(), rng.gen());
        let x = extent.x_min + u * extent.width();
        let y = extent.y_min + v * extent.height();
        total = total + model.density(x, y);
    }
    extent.area() * total / T::from(n).unwrap()
}
