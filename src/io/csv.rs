/*!
# CSV export of sample sets and density grids

Enable via the `csv` feature.
*/

use std::error::Error;
use std::fmt::Display;
use std::fs::File;

use csv::Writer;
use ndarray::Axis;

use crate::distributions::SampleSet;
use crate::grid::DensityGrid;

/**
Saves drawn points as a CSV file.

The file has a header row `sample,x,y` followed by one row per point.

# Examples

```rust
use bivariate_sampler::io::csv::save_samples_csv;
use bivariate_sampler::distributions::SampleSet;

let samples: SampleSet<f64> = vec![(0.5, -1.0), (1.5, 2.0)].into_iter().collect();
save_samples_csv(&samples, "/tmp/samples.csv")?;
# Ok::<(), Box<dyn std::error::Error>>(())
```
*/
pub fn save_samples_csv<T: Display>(
    samples: &SampleSet<T>,
    filename: &str,
) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_writer(File::create(filename)?);
    wtr.write_record(["sample", "x", "y"])?;
    for (i, (x, y)) in samples.xs.iter().zip(samples.ys.iter()).enumerate() {
        wtr.write_record(&[i.to_string(), x.to_string(), y.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}

/**
Saves a density grid as a CSV file in long format.

The header is `row,col,x,y,density`; cell `(row, col)` is written with its
coordinates `(xs[col], ys[row])`, rows first.
*/
pub fn save_grid_csv<T: Display>(
    grid: &DensityGrid<T>,
    filename: &str,
) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_writer(File::create(filename)?);
    wtr.write_record(["row", "col", "x", "y", "density"])?;
    for (row, cells) in grid.z.axis_iter(Axis(0)).enumerate() {
        for (col, density) in cells.iter().enumerate() {
            wtr.write_record(&[
                row.to_string(),
                col.to_string(),
                grid.xs[col].to_string(),
                grid.ys[row].to_string(),
                density.to_string(),
            ])?;
        }
    }
    wtr.flush()?;
    Ok(())
}
