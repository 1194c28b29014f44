//! End-to-end checks of the banana model through the public API.

use bivariate_sampler::banana::{forward_transform, inverse_transform, Banana};
use bivariate_sampler::distributions::{DistributionKind, DistributionParameters, Model2D};
use bivariate_sampler::grid::DEFAULT_GRID_SIZE;
use bivariate_sampler::sampling::{
    compute_distribution, compute_distribution_named, SamplingDriver,
};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use std::f64::consts::PI;

#[test]
fn test_warped_peak_density() {
    let model = Banana::new(1.0, 1.0, 1.0);
    let (x, y) = forward_transform(0.0, 0.0, 1.0);
    assert_eq!((x, y), (0.0, 1.0));
    assert_eq!(inverse_transform(x, y, 1.0), (0.0, 0.0));
    let density = model.density(x, y);
    assert!(
        (density - 1.0 / (2.0 * PI)).abs() < 1e-12,
        "Expected peak density 1/(2π), got {density}"
    );
}

#[test]
fn test_grid_is_non_negative_and_normalized() {
    for kind in DistributionKind::ALL {
        let result =
            compute_distribution_named::<f64>(&kind.to_string(), 10, DEFAULT_GRID_SIZE).unwrap();
        let grid = &result.grid;
        assert!(grid.z.iter().all(|&v| v >= 0.0 && v.is_finite()));
        assert!(grid.xs.windows(2).into_iter().all(|w| w[1] > w[0]));
        assert!(grid.ys.windows(2).into_iter().all(|w| w[1] > w[0]));
        let mass = grid.mass();
        assert!((mass - 1.0).abs() < 1e-2, "Mass of {kind} grid is {mass}");
    }
}

#[test]
fn test_grid_bounds_match_natural_extent() {
    let model = Banana::new(0.5, 2.0, 1.0);
    let params: DistributionParameters<f64> = model.into();
    let result = compute_distribution(&params, 0, 2).unwrap();
    let extent = model.natural_extent();
    assert_eq!(result.grid.xs.to_vec(), vec![extent.x_min, extent.x_max]);
    assert_eq!(result.grid.ys.to_vec(), vec![extent.y_min, extent.y_max]);
    assert_eq!(extent.y_max, 4.0 + 8.0);
}

#[test]
fn test_banana_x_marginal_is_normal() {
    const N: usize = 2_000;
    let params: DistributionParameters<f64> = Banana::new(1.5, 2.0, 0.5).into();
    let mut driver = SamplingDriver::new().set_seed(42).set_chunk_size(100);
    let samples = driver.sample(&params, N);

    let mut rng = SmallRng::seed_from_u64(43);
    let reference: Vec<f64> = (0..N)
        .map(|_| 2.0 * rng.sample::<f64, _>(StandardNormal))
        .collect();
    let res = kolmogorov_smirnov::test_f64(&samples.xs.to_vec(), &reference, 0.999);
    assert!(
        !res.is_rejected,
        "KS test rejected the x marginal (statistic {})",
        res.statistic
    );
}

#[test]
fn test_samples_concentrate_on_ridge() {
    let model = Banana::new(1.0f64, 1.0, 0.2);
    let mut rng = SmallRng::seed_from_u64(5);
    let samples = model.sample(10_000, &mut rng);
    // Latent y is N(0, 0.2²), so almost every point lies within 1 of the ridge.
    let near_ridge = samples
        .iter()
        .filter(|&(x, y)| (y + (x * x - 1.0)).abs() < 1.0)
        .count();
    assert!(near_ridge > 9_990, "Only {near_ridge} points near the ridge");
}
