// core holds the landscape synthesis, gradient and descent algorithms
pub mod config;
pub mod descent2;
pub mod error;
pub mod gradient2;
pub mod grid2;
pub mod service;
pub mod synth2;
pub mod utils;

pub use config::{Components, LandscapeConfig, NoiseConfig, QueryParams, Range};
pub use descent2::{DescentPath, DescentSimulator, PathPoint, Sampling};
pub use error::LandscapeError;
pub use gradient2::GradientField;
pub use grid2::{Grid2D, GridBuilder};
pub use service::{Diagnostics, LandscapeResult, LandscapeService, generate_loss_landscape};
pub use synth2::{ExtremumSpec, FieldSynthesizer, Terms, WaveSpec};
pub use utils::HeightMap2D;

// A single additive contribution to the height field, sampled at (x, y).
// Waves and Gaussian extrema both implement it, the synthesizer only
// needs to know how to evaluate a term at a grid node.
pub trait SurfaceTerm {
    fn get2(&self, x: f64, y: f64) -> f64;
}
