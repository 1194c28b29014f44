//! Tests verifying the direct sampler for the correlated 2D Gaussian.
//!
//! Draws are compared against reference samples built from `rand_distr`'s
//! `StandardNormal` with a two-sample KS test on the log-densities, the same
//! statistic is shown to reject a wrongly correlated sampler, and the sample
//! moments are checked against the parameters.

use bivariate_sampler::box_muller::BoxMuller;
use bivariate_sampler::distributions::{DistributionParameters, Model2D, SampleSet};
use bivariate_sampler::normal::CorrelatedNormal;
use bivariate_sampler::sampling::SamplingDriver;
use bivariate_sampler::stats::SampleSummary;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_SIZE: usize = 2_000;
    const SEED: u64 = 42;

    /// Reference draws from `model` using `rand_distr` and the Cholesky factor of
    /// its covariance matrix.
    fn reference_samples(model: &CorrelatedNormal<f64>, n: usize, seed: u64) -> SampleSet<f64> {
        let cov = model.covariance();
        let l11 = cov[0][0].sqrt();
        let l21 = cov[1][0] / l11;
        let l22 = (cov[1][1] - l21 * l21).sqrt();
        let mut rng = SmallRng::seed_from_u64(seed);
        (0..n)
            .map(|_| {
                let z0: f64 = rng.sample(StandardNormal);
                let z1: f64 = rng.sample(StandardNormal);
                (model.mu_x + l11 * z0, model.mu_y + l21 * z0 + l22 * z1)
            })
            .collect()
    }

    fn log_densities(model: &CorrelatedNormal<f64>, samples: &SampleSet<f64>) -> Vec<f64> {
        samples.iter().map(|(x, y)| model.density(x, y).ln()).collect()
    }

    #[test]
    fn test_box_muller_matches_standard_normal() {
        let rng = SmallRng::seed_from_u64(SEED);
        let pairs: Vec<[f64; 2]> = rng.sample_iter(BoxMuller).take(SAMPLE_SIZE).collect();
        let first: Vec<f64> = pairs.iter().map(|p| p[0]).collect();
        let second: Vec<f64> = pairs.iter().map(|p| p[1]).collect();

        let mut rng = SmallRng::seed_from_u64(SEED + 1);
        let reference: Vec<f64> = (0..SAMPLE_SIZE)
            .map(|_| rng.sample(StandardNormal))
            .collect();

        for (name, draws) in [("z0", &first), ("z1", &second)] {
            let res = kolmogorov_smirnov::test_f64(draws, &reference, 0.999);
            assert!(
                !res.is_rejected,
                "KS test rejected {name} as standard normal (statistic {})",
                res.statistic
            );
        }
    }

    #[test]
    fn test_two_d_gaussian_accept() {
        let model = CorrelatedNormal::new(1.0, -2.0, 2.0, 0.5, 0.6);
        let mut rng = SmallRng::seed_from_u64(SEED);
        let samples = model.sample(SAMPLE_SIZE, &mut rng);
        let reference = reference_samples(&model, SAMPLE_SIZE, SEED + 1);

        let lp_samples = log_densities(&model, &samples);
        let lp_reference = log_densities(&model, &reference);
        assert!(
            !lp_samples
                .iter()
                .chain(lp_reference.iter())
                .any(|x| x.is_nan() || x.is_infinite()),
            "Found infinite/NaN in log densities."
        );

        let res = kolmogorov_smirnov::test_f64(&lp_samples, &lp_reference, 0.999);
        assert!(
            !res.is_rejected,
            "KS test rejected the sampler (statistic {})",
            res.statistic
        );

        let summary = SampleSummary::from_samples(&samples).unwrap();
        assert!((summary.mean[0] - 1.0).abs() < 0.2, "Mean x off: {:?}", summary.mean);
        assert!((summary.mean[1] + 2.0).abs() < 0.05, "Mean y off: {:?}", summary.mean);
        assert!((summary.std[0] - 2.0).abs() < 0.15, "Std x off: {:?}", summary.std);
        assert!((summary.std[1] - 0.5).abs() < 0.04, "Std y off: {:?}", summary.std);
        assert!(
            (summary.correlation - 0.6).abs() < 0.05,
            "Correlation off: {}",
            summary.correlation
        );
    }

    #[test]
    fn test_two_d_gaussian_reject() {
        let target = CorrelatedNormal::standard(0.8);
        let false_target = CorrelatedNormal::standard(0.0);

        let mut rng = SmallRng::seed_from_u64(SEED);
        let wrong = false_target.sample(SAMPLE_SIZE, &mut rng);
        let reference = reference_samples(&target, SAMPLE_SIZE, SEED + 1);

        let res = kolmogorov_smirnov::test_f64(
            &log_densities(&target, &wrong),
            &log_densities(&target, &reference),
            0.95,
        );
        assert!(res.is_rejected, "Expected KS test to reject the wrong correlation.");
    }

    #[test]
    fn test_correlation_recovered_through_driver() {
        let params = DistributionParameters::Normal(CorrelatedNormal::<f64>::standard(0.8));
        let mut driver = SamplingDriver::new().set_seed(SEED);
        let result = driver.compute(&params, 100_000).unwrap();
        let summary = SampleSummary::from_samples(&result.samples).unwrap();
        assert!(
            (summary.correlation - 0.8).abs() < 0.05,
            "Expected correlation 0.8 +- 0.05, got {}",
            summary.correlation
        );
        assert!((result.grid.mass() - 1.0).abs() < 1e-2);
    }
}
