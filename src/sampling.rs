/*!
# Sampling Driver

Turns a set of distribution parameters into the two things a front end draws:
a density grid over the model's natural extent and a fresh set of samples.

## Overview

- **Model selection**: [`DistributionParameters`] is a tagged union; the driver
  dispatches on it through the [`Model2D`] capability set.
- **No caching**: every call recomputes the grid and draws new samples, so two
  calls with identical parameters return different sample sets (unless the driver
  was reseeded in between).
- **Reproducibility**: [`SamplingDriver::set_seed`] makes the driver deterministic.
  Parallel sampling splits the draws into chunks of `chunk_size`; chunk `i` uses its
  own generator seeded with `base + i`, `base` being drawn from the driver's
  generator. Results therefore do not depend on the number of rayon threads.
- **Validation**: off by default, since invalid parameters only yield non-finite
  numbers. [`SamplingDriver::set_validate`] turns on explicit checks.

## Example Usage

```rust
use bivariate_sampler::distributions::DistributionParameters;
use bivariate_sampler::normal::CorrelatedNormal;
use bivariate_sampler::sampling::SamplingDriver;

let params = DistributionParameters::Normal(CorrelatedNormal::new(0.0, 0.0, 1.0, 1.0, 0.5));
let mut driver = SamplingDriver::new().set_seed(42).set_grid_size(50);
let result = driver.compute(&params, 1000)?;
assert_eq!(result.grid.z.dim(), (50, 50));
assert_eq!(result.samples.len(), 1000);
# Ok::<(), bivariate_sampler::error::ParameterError>(())
```
*/

use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, trace, warn};
use rand::rngs::SmallRng;
use rand::{thread_rng, Rng, SeedableRng};
use rand_distr::{Distribution, OpenClosed01};
use rayon::prelude::*;

use crate::distributions::{DistributionKind, DistributionParameters, Model2D, Real, SampleSet};
use crate::error::ParameterError;
use crate::grid::{evaluate_grid, evaluate_grid_par, DensityGrid, DEFAULT_GRID_SIZE};

/// Samples drawn per parallel work item.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Everything a front end needs to render one distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionResult<T> {
    pub grid: DensityGrid<T>,
    pub samples: SampleSet<T>,
}

/**
Computes density grids and sample sets for [`DistributionParameters`].

# Examples

```rust
use bivariate_sampler::distributions::{DistributionKind, DistributionParameters};
use bivariate_sampler::sampling::SamplingDriver;

let params = DistributionParameters::<f32>::default_for(DistributionKind::Banana);
let mut driver = SamplingDriver::new().set_seed(7).set_parallel(false);
let first = driver.compute(&params, 10)?;
let second = driver.compute(&params, 10)?;
assert_eq!(first.grid, second.grid);
assert_ne!(first.samples, second.samples);
# Ok::<(), bivariate_sampler::error::ParameterError>(())
```
*/
#[derive(Debug, Clone)]
pub struct SamplingDriver {
    /// Points per axis of the density grid.
    pub grid_size: usize,
    /// Evaluate the grid and draw samples on the rayon pool.
    pub parallel: bool,
    /// Samples per parallel work item.
    pub chunk_size: usize,
    /// Check parameters before computing.
    pub validate: bool,
    /// Show a progress bar while sampling.
    pub progress: bool,
    /// The seed the generator was last seeded with.
    pub seed: u64,
    rng: SmallRng,
}

impl Default for SamplingDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl SamplingDriver {
    /// Creates a driver with default settings and a randomly seeded generator.
    pub fn new() -> Self {
        let seed = thread_rng().gen::<u64>();
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            parallel: true,
            chunk_size: DEFAULT_CHUNK_SIZE,
            validate: false,
            progress: false,
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Reseeds the generator.
    pub fn set_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    pub fn set_grid_size(mut self, grid_size: usize) -> Self {
        self.grid_size = grid_size;
        self
    }

    pub fn set_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the number of samples per parallel work item. Zero is treated as one.
    pub fn set_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn set_validate(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    pub fn set_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Evaluates the density grid over the model's natural extent and draws
    /// `n_samples` fresh points.
    pub fn compute<T>(
        &mut self,
        params: &DistributionParameters<T>,
        n_samples: usize,
    ) -> Result<DistributionResult<T>, ParameterError>
    where
        T: Real,
        OpenClosed01: Distribution<T>,
    {
        if self.validate {
            params.validate()?;
        }
        let kind = params.kind();
        let start = Instant::now();
        let grid = self.grid(params)?;
        if !grid.is_valid_density() {
            warn!(
                "Density grid for {kind} distribution has non-finite or negative values, \
                 check the parameters."
            );
        }
        let samples = self.sample(params, n_samples);
        debug!(
            "Computed {} distribution: {}x{} grid, {} samples in {:?}",
            kind,
            self.grid_size,
            self.grid_size,
            samples.len(),
            start.elapsed()
        );
        Ok(DistributionResult { grid, samples })
    }

    /// Evaluates `model` on a `grid_size × grid_size` lattice over its natural extent.
    pub fn grid<T, M>(&self, model: &M) -> Result<DensityGrid<T>, ParameterError>
    where
        T: Real,
        M: Model2D<T> + Sync,
    {
        let extent = model.natural_extent();
        if self.parallel {
            evaluate_grid_par(model, &extent, self.grid_size)
        } else {
            evaluate_grid(model, &extent, self.grid_size)
        }
    }

    /// Draws exactly `n` fresh points from `model`.
    pub fn sample<T, M>(&mut self, model: &M, n: usize) -> SampleSet<T>
    where
        T: Real,
        M: Model2D<T> + Sync,
        OpenClosed01: Distribution<T>,
    {
        let pb = self.progress_bar(n);
        let samples = if self.parallel {
            self.sample_par(model, n, &pb)
        } else {
            let rng = &mut self.rng;
            (0..n)
                .map(|_| {
                    let point = model.draw(&mut *rng);
                    pb.inc(1);
                    point
                })
                .collect()
        };
        pb.finish_and_clear();
        samples
    }

    fn sample_par<T, M>(&mut self, model: &M, n: usize, pb: &ProgressBar) -> SampleSet<T>
    where
        T: Real,
        M: Model2D<T> + Sync,
        OpenClosed01: Distribution<T>,
    {
        let chunk_size = self.chunk_size.max(1);
        let n_chunks = n.div_ceil(chunk_size);
        let base_seed = self.rng.gen::<u64>();
        let chunks: Vec<SampleSet<T>> = (0..n_chunks)
            .into_par_iter()
            .map(|i| {
                let len = chunk_size.min(n - i * chunk_size);
                let mut rng = SmallRng::seed_from_u64(base_seed.wrapping_add(i as u64));
                let chunk = model.sample(len, &mut rng);
                trace!("Chunk {i}: drew {len} samples");
                pb.inc(len as u64);
                chunk
            })
            .collect();
        SampleSet::concat(chunks)
    }

    fn progress_bar(&self, n: usize) -> ProgressBar {
        if !self.progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(n as u64);
        match ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} samples {msg}")
        {
            Ok(style) => pb.set_style(style.progress_chars("##-")),
            Err(e) => warn!("Invalid progress bar template: {e}"),
        }
        pb
    }
}

/// Computes the density grid and `n_samples` fresh samples for `params`.
///
/// Parameters are not validated; invalid ones produce non-finite values.
/// Fails only when `grid_size < 2`.
pub fn compute_distribution<T>(
    params: &DistributionParameters<T>,
    n_samples: usize,
    grid_size: usize,
) -> Result<DistributionResult<T>, ParameterError>
where
    T: Real,
    OpenClosed01: Distribution<T>,
{
    SamplingDriver::new()
        .set_grid_size(grid_size)
        .compute(params, n_samples)
}

/// Like [`compute_distribution`], selecting the model by name (`"normal"` or
/// `"banana"`) with its default parameters.
pub fn compute_distribution_named<T>(
    kind: &str,
    n_samples: usize,
    grid_size: usize,
) -> Result<DistributionResult<T>, ParameterError>
where
    T: Real,
    OpenClosed01: Distribution<T>,
{
    let kind: DistributionKind = kind.parse()?;
    compute_distribution(&DistributionParameters::default_for(kind), n_samples, grid_size)
}
