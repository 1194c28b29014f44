pub mod banana;
pub mod box_muller;
pub mod distributions;
pub mod error;
pub mod grid;
pub mod io;
pub mod normal;
pub mod sampling;
pub mod stats;
