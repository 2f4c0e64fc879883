use log::debug;
use rand::{SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Normal, Uniform};
use serde::{Deserialize, Serialize};

use crate::SurfaceTerm;
use crate::config::{Components, ExtremaConfig, NoiseConfig, Range, WaveConfig};
use crate::error::{LandscapeError, Result};
use crate::grid2::Grid2D;
use crate::utils::HeightMap2D;

// amplitude · sin(x·freq_x + phase_x) · cos(y·freq_y + phase_y)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveSpec {
    pub freq_x: f64,
    pub freq_y: f64,
    pub phase_x: f64,
    pub phase_y: f64,
    pub amplitude: f64,
}

impl WaveSpec {
    pub fn validate(&self) -> Result<()> {
        let all_finite = [
            self.freq_x,
            self.freq_y,
            self.phase_x,
            self.phase_y,
            self.amplitude,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !all_finite {
            return Err(LandscapeError::config("wave parameters must be finite"));
        }
        Ok(())
    }
}

impl SurfaceTerm for WaveSpec {
    fn get2(&self, x: f64, y: f64) -> f64 {
        self.amplitude
            * (x * self.freq_x + self.phase_x).sin()
            * (y * self.freq_y + self.phase_y).cos()
    }
}

// Isotropic Gaussian bump centred at (center_x, center_y).
// Minima subtract it from the field, maxima add it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtremumSpec {
    pub center_x: f64,
    pub center_y: f64,
    pub magnitude: f64,
    pub width: f64,
}

impl ExtremumSpec {
    pub fn validate(&self) -> Result<()> {
        let all_finite = [self.center_x, self.center_y, self.magnitude, self.width]
            .iter()
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(LandscapeError::config("extremum parameters must be finite"));
        }
        if self.width <= 0.0 {
            return Err(LandscapeError::config(format!(
                "extremum width must be positive, got {}",
                self.width
            )));
        }
        Ok(())
    }
}

impl SurfaceTerm for ExtremumSpec {
    fn get2(&self, x: f64, y: f64) -> f64 {
        let dx = x - self.center_x;
        let dy = y - self.center_y;
        self.magnitude * (-(dx * dx + dy * dy) / (2.0 * self.width * self.width)).exp()
    }
}

// The concrete terms a landscape was built from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Terms {
    pub waves: Vec<WaveSpec>,
    pub minima: Vec<ExtremumSpec>,
    pub maxima: Vec<ExtremumSpec>,
}

fn uniform(range: Range, what: &str) -> Result<Uniform<f64>> {
    Uniform::new_inclusive(range.min, range.max)
        .map_err(|e| LandscapeError::config(format!("{what}: {e}")))
}

fn draw_waves(cfg: &WaveConfig, seed: u64) -> Result<Vec<WaveSpec>> {
    let freq = uniform(cfg.frequency, "waves.frequency")?;
    let phase = uniform(cfg.phase, "waves.phase")?;
    let amplitude = uniform(cfg.amplitude, "waves.amplitude")?;

    let mut rng = StdRng::seed_from_u64(seed);
    // field order fixes the draw order: fx, fy, px, py, amplitude
    Ok((0..cfg.count)
        .map(|_| WaveSpec {
            freq_x: freq.sample(&mut rng),
            freq_y: freq.sample(&mut rng),
            phase_x: phase.sample(&mut rng),
            phase_y: phase.sample(&mut rng),
            amplitude: amplitude.sample(&mut rng),
        })
        .collect())
}

fn draw_extrema(cfg: &ExtremaConfig, seed: u64, what: &str) -> Result<Vec<ExtremumSpec>> {
    let position = uniform(cfg.position, &format!("{what}.position"))?;
    let magnitude = uniform(cfg.magnitude, &format!("{what}.magnitude"))?;
    let width = uniform(cfg.width, &format!("{what}.width"))?;

    let mut rng = StdRng::seed_from_u64(seed);
    Ok((0..cfg.count)
        .map(|_| ExtremumSpec {
            center_x: position.sample(&mut rng),
            center_y: position.sample(&mut rng),
            magnitude: magnitude.sample(&mut rng),
            width: width.sample(&mut rng),
        })
        .collect())
}

// Builds the height field by superposing waves, minima, maxima and noise
pub struct FieldSynthesizer<'a> {
    components: &'a Components,
    noise: NoiseConfig,
}

impl<'a> FieldSynthesizer<'a> {
    pub fn new(components: &'a Components, noise: NoiseConfig) -> Self {
        Self { components, noise }
    }

    // Resolve the components into concrete terms.
    // Each category gets its own generator.
    pub fn realize(&self) -> Result<Terms> {
        self.components.validate()?;
        match self.components {
            Components::Random {
                waves,
                minima,
                maxima,
                seeds,
            } => Ok(Terms {
                waves: draw_waves(waves, seeds.waves)?,
                minima: draw_extrema(minima, seeds.minima, "minima")?,
                maxima: draw_extrema(maxima, seeds.maxima, "maxima")?,
            }),
            Components::Fixed {
                waves,
                minima,
                maxima,
            } => Ok(Terms {
                waves: waves.clone(),
                minima: minima.clone(),
                maxima: maxima.clone(),
            }),
        }
    }

    pub fn generate(&self, grid: &Grid2D) -> Result<(HeightMap2D, Terms)> {
        self.noise.validate()?;
        let terms = self.realize()?;
        let n = grid.size();
        let mut map = vec![vec![0.0f64; n]; n];

        for wave in &terms.waves {
            accumulate(&mut map, grid, wave, 1.0);
        }
        for minimum in &terms.minima {
            accumulate(&mut map, grid, minimum, -1.0);
        }
        for maximum in &terms.maxima {
            accumulate(&mut map, grid, maximum, 1.0);
        }
        self.apply_noise(&mut map)?;

        debug!(
            "synthesized {n}x{n} field from {} waves, {} minima, {} maxima",
            terms.waves.len(),
            terms.minima.len(),
            terms.maxima.len()
        );
        Ok((map, terms))
    }

    // In‐place, row‐major, one draw per cell
    fn apply_noise(&self, map: &mut HeightMap2D) -> Result<()> {
        if self.noise.std_dev == 0.0 {
            return Ok(());
        }
        let normal = Normal::new(0.0, self.noise.std_dev)
            .map_err(|e| LandscapeError::config(format!("noise: {e}")))?;
        let mut rng = StdRng::seed_from_u64(self.noise.seed);
        for row in map.iter_mut() {
            for v in row.iter_mut() {
                *v += normal.sample(&mut rng);
            }
        }
        Ok(())
    }
}

fn accumulate(map: &mut HeightMap2D, grid: &Grid2D, term: &dyn SurfaceTerm, sign: f64) {
    for (r, row) in map.iter_mut().enumerate() {
        for (c, v) in row.iter_mut().enumerate() {
            let (x, y) = grid.coords(r, c);
            *v += sign * term.get2(x, y);
        }
    }
}
