/*!
Evaluation of a model's density on a rectangular lattice.

The lattice has `grid_size` evenly spaced coordinates per axis, including both
endpoints of the extent. Cell `z[[row, col]]` holds the density at
`(xs[col], ys[row])`, i.e. rows follow `y` and columns follow `x`, which is the
layout contour plotting libraries expect.

[`evaluate_grid_par`] distributes the cells over the rayon thread pool and
produces exactly the same grid as [`evaluate_grid`].

# Examples

```rust
use bivariate_sampler::distributions::Model2D;
use bivariate_sampler::grid::evaluate_grid;
use bivariate_sampler::normal::CorrelatedNormal;

let model = CorrelatedNormal::new(0.0f64, 0.0, 1.0, 1.0, 0.5);
let grid = evaluate_grid(&model, &model.natural_extent(), 100)?;
assert_eq!(grid.z.dim(), (100, 100));
assert!((grid.mass() - 1.0).abs() < 1e-2);
# Ok::<(), bivariate_sampler::error::ParameterError>(())
```
*/

use ndarray::{Array1, Array2, Axis};
use ndarray_stats::QuantileExt;
use rayon::prelude::*;

use crate::distributions::{Extent, Model2D, Real};
use crate::error::ParameterError;

/// Points per axis used when the caller does not choose.
pub const DEFAULT_GRID_SIZE: usize = 100;

/// Densities sampled on a `G × G` lattice.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityGrid<T> {
    pub xs: Array1<T>,
    pub ys: Array1<T>,
    /// `z[[row, col]]` is the density at `(xs[col], ys[row])`.
    pub z: Array2<T>,
}

impl<T: Real> DensityGrid<T> {
    pub fn grid_size(&self) -> usize {
        self.xs.len()
    }

    /// Area of one lattice cell.
    pub fn cell_area(&self) -> T {
        step(&self.xs) * step(&self.ys)
    }

    /// Riemann-sum approximation of the integral of the density over the extent.
    pub fn mass(&self) -> T {
        self.z.sum() * self.cell_area()
    }

    /// Location and value of the largest cell, or `None` if the grid holds `NaN`.
    pub fn peak(&self) -> Option<(T, T, T)> {
        let (row, col) = self.z.argmax().ok()?;
        Some((self.xs[col], self.ys[row], self.z[[row, col]]))
    }

    /// Whether every cell is a finite, non-negative number.
    pub fn is_valid_density(&self) -> bool {
        self.z.iter().all(|v| v.is_finite() && *v >= T::zero())
    }

    /// The density matrix as nested row vectors.
    pub fn z_rows(&self) -> Vec<Vec<T>> {
        self.z.axis_iter(Axis(0)).map(|row| row.to_vec()).collect()
    }
}

fn step<T: Real>(coords: &Array1<T>) -> T {
    if coords.len() < 2 {
        return T::zero();
    }
    coords[1] - coords[0]
}

/// `n` evenly spaced values from `min` to `max` inclusive.
///
/// The endpoints are exact: the first value is `min` and the last is `max`.
pub fn linspace<T: Real>(min: T, max: T, n: usize) -> Array1<T> {
    if n == 1 {
        return Array1::from_vec(vec![min]);
    }
    let denom = T::from(n.saturating_sub(1)).unwrap();
    Array1::from_shape_fn(n, |i| {
        if i + 1 == n {
            max
        } else {
            min + (max - min) * T::from(i).unwrap() / denom
        }
    })
}

/// Evaluates `f` at `steps` evenly spaced points of `[min, max]`.
///
/// Returns the abscissas and the function values.
pub fn sample_function<T, F>(f: F, min: T, max: T, steps: usize) -> (Array1<T>, Array1<T>)
where
    T: Real,
    F: Fn(T) -> T,
{
    let xs = linspace(min, max, steps);
    let ys = xs.mapv(f);
    (xs, ys)
}

fn axes<T: Real>(
    extent: &Extent<T>,
    grid_size: usize,
) -> Result<(Array1<T>, Array1<T>), ParameterError> {
    if grid_size < 2 {
        return Err(ParameterError::GridTooSmall(grid_size));
    }
    Ok((
        linspace(extent.x_min, extent.x_max, grid_size),
        linspace(extent.y_min, extent.y_max, grid_size),
    ))
}

/// Evaluates `model.density` at every lattice point of `extent`.
pub fn evaluate_grid<T, M>(
    model: &M,
    extent: &Extent<T>,
    grid_size: usize,
) -> Result<DensityGrid<T>, ParameterError>
where
    T: Real,
    M: Model2D<T> + ?Sized,
{
    let (xs, ys) = axes(extent, grid_size)?;
    let z = Array2::from_shape_fn((grid_size, grid_size), |(row, col)| {
        model.density(xs[col], ys[row])
    });
    Ok(DensityGrid { xs, ys, z })
}

/// Parallel version of [`evaluate_grid`]; cells are computed on the rayon pool.
pub fn evaluate_grid_par<T, M>(
    model: &M,
    extent: &Extent<T>,
    grid_size: usize,
) -> Result<DensityGrid<T>, ParameterError>
where
    T: Real,
    M: Model2D<T> + Sync + ?Sized,
{
    let (xs, ys) = axes(extent, grid_size)?;
    let values: Vec<T> = (0..grid_size * grid_size)
        .into_par_iter()
        .map(|i| {
            let (row, col) = (i / grid_size, i % grid_size);
            model.density(xs[col], ys[row])
        })
        .collect();
    let z = Array2::from_shape_fn((grid_size, grid_size), |(row, col)| {
        values[row * grid_size + col]
    });
    Ok(DensityGrid { xs, ys, z })
}
