//! Computes both distributions with their default parameters, then renders the density
//! grid as a contour plot, the samples as a scatter plot and the x marginal as a line.
//!
//! Run with `cargo run --example plot_distributions --features csv`. Set
//! `RUST_LOG=debug` to see timing output from the sampling driver.

use bivariate_sampler::distributions::{DistributionKind, DistributionParameters, Model2D};
use bivariate_sampler::grid::sample_function;
use bivariate_sampler::io::csv::{save_grid_csv, save_samples_csv};
use bivariate_sampler::sampling::{DistributionResult, SamplingDriver};
use bivariate_sampler::stats::SampleSummary;

use log::{info, Level, LevelFilter, Metadata, Record};
use plotly::common::{Marker, Mode};
use plotly::layout::Axis;
use plotly::{Contour, Layout, Plot, Scatter};
use std::error::Error;

struct MinimalLogger;

impl log::Log for MinimalLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if record.level() > Level::Error {
            println!("{:<5} {}", record.level(), record.args())
        } else {
            eprintln!("{:<5} {}", record.level(), record.args())
        }
    }

    fn flush(&self) {}
}

static MINIMAL_LOGGER: MinimalLogger = MinimalLogger;

fn init_logger() -> Result<(), Box<dyn Error>> {
    log::set_logger(&MINIMAL_LOGGER).map_err(|e| e.to_string())?;
    let level = match std::env::var("RUST_LOG").as_deref() {
        Ok("trace") => LevelFilter::Trace,
        Ok("debug") => LevelFilter::Debug,
        _ => LevelFilter::Info,
    };
    log::set_max_level(level);
    Ok(())
}

fn layout(title: &str) -> Layout {
    Layout::new()
        .title(title)
        .x_axis(Axis::new().title("X"))
        .y_axis(Axis::new().title("Y"))
        .height(400)
}

/// Writes the contour, scatter and marginal plots for one distribution as HTML files.
fn plot(
    kind: DistributionKind,
    params: &DistributionParameters<f64>,
    result: &DistributionResult<f64>,
) {
    let grid = &result.grid;
    let mut contour = Plot::new();
    contour.add_trace(
        Contour::new(grid.xs.to_vec(), grid.ys.to_vec(), grid.z_rows()).name("Density"),
    );
    contour.set_layout(layout(&format!("{} - Probability Density", kind.label())));
    let filename = format!("{kind}_density.html");
    contour.write_html(&filename);
    info!("Saved contour plot to {filename}");

    let samples = &result.samples;
    let mut scatter = Plot::new();
    scatter.add_trace(
        Scatter::new(samples.xs.to_vec(), samples.ys.to_vec())
            .mode(Mode::Markers)
            .marker(Marker::new().size(4).opacity(0.6))
            .name("Samples"),
    );
    scatter.set_layout(layout(&format!(
        "{} - Samples (n={})",
        kind.label(),
        samples.len()
    )));
    let filename = format!("{kind}_samples.html");
    scatter.write_html(&filename);
    info!("Saved scatter plot to {filename}");

    let extent = params.natural_extent();
    let (xs, density) = sample_function(params.marginal_x(), extent.x_min, extent.x_max, 200);
    let mut marginal = Plot::new();
    marginal.add_trace(
        Scatter::new(xs.to_vec(), density.to_vec())
            .mode(Mode::Lines)
            .name("p(x)"),
    );
    marginal.set_layout(layout(&format!("{} - X Marginal", kind.label())));
    let filename = format!("{kind}_marginal_x.html");
    marginal.write_html(&filename);
    info!("Saved marginal plot to {filename}");
}

fn main() -> Result<(), Box<dyn Error>> {
    const N_SAMPLES: usize = 1_000;

    init_logger()?;
    let mut driver = SamplingDriver::new().set_validate(true).set_progress(true);
    info!("Sampling with seed {}", driver.seed);

    for kind in DistributionKind::ALL {
        let params = DistributionParameters::<f64>::default_for(kind);
        let result = driver.compute(&params, N_SAMPLES)?;

        let summary = SampleSummary::from_samples(&result.samples)?;
        info!(
            "{}: mean ({:.2}, {:.2}), std ({:.2}, {:.2}), correlation {:.2}, grid mass {:.4}",
            kind.label(),
            summary.mean[0],
            summary.mean[1],
            summary.std[0],
            summary.std[1],
            summary.correlation,
            result.grid.mass()
        );
        if let Some((x, y, density)) = result.grid.peak() {
            info!(
                "{}: density peaks at ({:.2}, {:.2}) with {:.4}",
                kind.label(),
                x,
                y,
                density
            );
        }

        plot(kind, &params, &result);
        save_samples_csv(&result.samples, &format!("{kind}_samples.csv"))?;
        save_grid_csv(&result.grid, &format!("{kind}_grid.csv"))?;
    }
    Ok(())
}
