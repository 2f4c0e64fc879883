use serde::{Deserialize, Serialize};

use crate::descent2::Sampling;
use crate::error::{LandscapeError, Result};
use crate::synth2::{ExtremumSpec, WaveSpec};

// Closed interval [min, max] used for domain bounds and sampling ranges
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn validate(&self, what: &str) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(LandscapeError::config(format!(
                "{what}: range [{}, {}] is not finite",
                self.min, self.max
            )));
        }
        if self.min > self.max {
            return Err(LandscapeError::config(format!(
                "{what}: min {} is greater than max {}",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

// Random periodic terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveConfig {
    pub count: usize,
    pub frequency: Range,
    pub phase: Range,
    pub amplitude: Range,
}

// Random Gaussian bumps. `magnitude` is the depth for minima
// and the height for maxima.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtremaConfig {
    pub count: usize,
    pub position: Range,
    pub magnitude: Range,
    pub width: Range,
}

impl ExtremaConfig {
    fn validate(&self, what: &str) -> Result<()> {
        self.position.validate(&format!("{what}.position"))?;
        self.magnitude.validate(&format!("{what}.magnitude"))?;
        self.width.validate(&format!("{what}.width"))?;
        if self.count > 0 && self.width.min <= 0.0 {
            return Err(LandscapeError::config(format!(
                "{what}.width: widths must be positive, got min {}",
                self.width.min
            )));
        }
        Ok(())
    }
}

// One seed per category so that e.g. adding a minimum
// never shifts the realized waves or maxima.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seeds {
    pub waves: u64,
    pub minima: u64,
    pub maxima: u64,
}

impl Default for Seeds {
    fn default() -> Self {
        Self {
            waves: 42,
            minima: 7,
            maxima: 13,
        }
    }
}

// Where the landscape's terms come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Components {
    // drawn uniformly from ranges using seeded generators
    Random {
        waves: WaveConfig,
        minima: ExtremaConfig,
        maxima: ExtremaConfig,
        #[serde(default)]
        seeds: Seeds,
    },
    // explicit term lists, used by the presets
    Fixed {
        #[serde(default)]
        waves: Vec<WaveSpec>,
        #[serde(default)]
        minima: Vec<ExtremumSpec>,
        #[serde(default)]
        maxima: Vec<ExtremumSpec>,
    },
}

impl Components {
    pub fn validate(&self) -> Result<()> {
        match self {
            Components::Random {
                waves,
                minima,
                maxima,
                ..
            } => {
                waves.frequency.validate("waves.frequency")?;
                waves.phase.validate("waves.phase")?;
                waves.amplitude.validate("waves.amplitude")?;
                minima.validate("minima")?;
                maxima.validate("maxima")
            }
            Components::Fixed {
                waves,
                minima,
                maxima,
            } => {
                for (i, w) in waves.iter().enumerate() {
                    w.validate().map_err(|e| prefix(e, &format!("waves[{i}]")))?;
                }
                for (i, m) in minima.iter().enumerate() {
                    m.validate().map_err(|e| prefix(e, &format!("minima[{i}]")))?;
                }
                for (i, m) in maxima.iter().enumerate() {
                    m.validate().map_err(|e| prefix(e, &format!("maxima[{i}]")))?;
                }
                Ok(())
            }
        }
    }
}

fn prefix(err: LandscapeError, at: &str) -> LandscapeError {
    match err {
        LandscapeError::Configuration(msg) => LandscapeError::config(format!("{at}: {msg}")),
    }
}

// Additive i.i.d. Gaussian noise, applied after every term
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseConfig {
    pub std_dev: f64,
    pub seed: u64,
}

impl NoiseConfig {
    pub const NONE: NoiseConfig = NoiseConfig {
        std_dev: 0.0,
        seed: 0,
    };

    pub fn validate(&self) -> Result<()> {
        if !self.std_dev.is_finite() || self.std_dev < 0.0 {
            return Err(LandscapeError::config(format!(
                "noise.std_dev must be finite and non-negative, got {}",
                self.std_dev
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DescentConfig {
    // (row, col) grid index; an out-of-range start yields an empty path
    pub start: (i64, i64),
    pub max_steps: usize,
    pub learning_rate: f64,
    #[serde(default)]
    pub sampling: Sampling,
}

impl DescentConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.learning_rate.is_finite() {
            return Err(LandscapeError::config(format!(
                "descent.learning_rate must be finite, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }
}

impl Default for DescentConfig {
    fn default() -> Self {
        Self {
            start: (85, 15),
            max_steps: 200,
            learning_rate: 8.0,
            sampling: Sampling::Nearest,
        }
    }
}

// Everything one `compute` call needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandscapeConfig {
    pub resolution: usize,
    pub x_bounds: Range,
    pub y_bounds: Range,
    pub components: Components,
    #[serde(default = "no_noise")]
    pub noise: NoiseConfig,
    #[serde(default)]
    pub descent: DescentConfig,
}

fn no_noise() -> NoiseConfig {
    NoiseConfig::NONE
}

const DOMAIN: Range = Range::new(-5.0, 5.0);

impl Default for LandscapeConfig {
    // A rough multi-extremum surface
    fn default() -> Self {
        Self {
            resolution: 150,
            x_bounds: DOMAIN,
            y_bounds: DOMAIN,
            components: Components::Random {
                waves: WaveConfig {
                    count: 4,
                    frequency: Range::new(0.3, 1.5),
                    phase: Range::new(0.0, std::f64::consts::TAU),
                    amplitude: Range::new(0.05, 0.3),
                },
                minima: ExtremaConfig {
                    count: 6,
                    position: Range::new(-4.0, 4.0),
                    magnitude: Range::new(0.5, 1.5),
                    width: Range::new(0.5, 1.5),
                },
                maxima: ExtremaConfig {
                    count: 3,
                    position: Range::new(-4.0, 4.0),
                    magnitude: Range::new(0.3, 1.0),
                    width: Range::new(0.5, 1.2),
                },
                seeds: Seeds::default(),
            },
            noise: NoiseConfig {
                std_dev: 0.01,
                seed: 99,
            },
            descent: DescentConfig::default(),
        }
    }
}

impl LandscapeConfig {
    // Four fixed Gaussian minima over [-5, 5]², no waves or noise
    pub fn basic() -> Self {
        let minimum = |magnitude, center_x, center_y, width| ExtremumSpec {
            center_x,
            center_y,
            magnitude,
            width,
        };
        Self {
            resolution: 100,
            x_bounds: DOMAIN,
            y_bounds: DOMAIN,
            components: Components::Fixed {
                waves: Vec::new(),
                minima: vec![
                    minimum(1.5, 2.0, 2.0, 1.0),
                    minimum(1.2, -2.0, -3.0, 1.5),
                    minimum(1.0, -3.0, 2.0, 1.0),
                    minimum(0.8, 3.0, -2.0, 2.0),
                ],
                maxima: Vec::new(),
            },
            noise: NoiseConfig::NONE,
            descent: DescentConfig {
                start: (75, 80),
                ..DescentConfig::default()
            },
        }
    }

    // amplitude · sin(frequency·x) · cos(frequency·y)
    pub fn single_wave(amplitude: f64, frequency: f64) -> Self {
        Self {
            resolution: 100,
            x_bounds: DOMAIN,
            y_bounds: DOMAIN,
            components: Components::Fixed {
                waves: vec![WaveSpec {
                    freq_x: frequency,
                    freq_y: frequency,
                    phase_x: 0.0,
                    phase_y: 0.0,
                    amplitude,
                }],
                minima: Vec::new(),
                maxima: Vec::new(),
            },
            noise: NoiseConfig::NONE,
            descent: DescentConfig::default(),
        }
    }

    // Also rescales an on-grid descent start so it lands on the same
    // relative spot of the new grid. Off-grid starts are left alone.
    pub fn with_resolution(mut self, resolution: usize) -> Self {
        let old = self.resolution;
        let (row, col) = self.descent.start;
        let on_grid = |v: i64| v >= 0 && (v as usize) < old;
        if old > 1 && resolution > 0 && on_grid(row) && on_grid(col) {
            let scale = (resolution - 1) as f64 / (old - 1) as f64;
            self.descent.start = (
                (row as f64 * scale).round() as i64,
                (col as f64 * scale).round() as i64,
            );
        }
        self.resolution = resolution;
        self
    }

    // Checks every knob up front; nothing is clamped
    pub fn validate(&self) -> Result<()> {
        if self.resolution == 0 {
            return Err(LandscapeError::config("resolution must be positive"));
        }
        self.x_bounds.validate("x_bounds")?;
        self.y_bounds.validate("y_bounds")?;
        self.components.validate()?;
        self.noise.validate()?;
        self.descent.validate()
    }
}

// Optional knobs for the single-wave variant; absent values are 1.0
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryParams {
    #[serde(default)]
    pub amplitude: Option<f64>,
    #[serde(default)]
    pub frequency: Option<f64>,
}

impl QueryParams {
    pub fn to_config(&self) -> LandscapeConfig {
        LandscapeConfig::single_wave(
            self.amplitude.unwrap_or(1.0),
            self.frequency.unwrap_or(1.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        assert!(LandscapeConfig::default().validate().is_ok());
        assert!(LandscapeConfig::basic().validate().is_ok());
        assert!(LandscapeConfig::single_wave(0.5, 2.0).validate().is_ok());
    }

    #[test]
    fn zero_resolution_rejected() {
        let cfg = LandscapeConfig::basic().with_resolution(0);
        assert!(matches!(
            cfg.validate(),
            Err(LandscapeError::Configuration(_))
        ));
    }

    #[test]
    fn inverted_range_rejected() {
        let mut cfg = LandscapeConfig::default();
        if let Components::Random { waves, .. } = &mut cfg.components {
            waves.amplitude = Range::new(1.0, 0.5);
        }
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("waves.amplitude"));
    }

    #[test]
    fn non_positive_width_rejected() {
        let mut cfg = LandscapeConfig::basic();
        if let Components::Fixed { minima, .. } = &mut cfg.components {
            minima[2].width = 0.0;
        }
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("minima[2]"));
    }

    #[test]
    fn non_positive_random_width_rejected() {
        let mut cfg = LandscapeConfig::default();
        if let Components::Random { maxima, .. } = &mut cfg.components {
            maxima.width = Range::new(0.0, 1.0);
        }
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("maxima.width"));

        // no maxima drawn, so the width range is never used
        if let Components::Random { maxima, .. } = &mut cfg.components {
            maxima.count = 0;
        }
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn resolution_change_keeps_start_on_grid() {
        let cfg = LandscapeConfig::basic().with_resolution(40);
        let (row, col) = cfg.descent.start;
        assert!((0..40).contains(&row) && (0..40).contains(&col));
        assert_eq!(cfg.descent.start, (30, 32));

        // same resolution leaves it untouched
        let same = LandscapeConfig::basic().with_resolution(100);
        assert_eq!(same.descent.start, LandscapeConfig::basic().descent.start);

        // a deliberately off-grid start stays off-grid
        let mut off = LandscapeConfig::basic();
        off.descent.start = (-1, 5);
        assert_eq!(off.with_resolution(20).descent.start, (-1, 5));
    }

    #[test]
    fn negative_noise_rejected() {
        let mut cfg = LandscapeConfig::default();
        cfg.noise.std_dev = -0.1;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn nan_learning_rate_rejected() {
        let mut cfg = LandscapeConfig::basic();
        cfg.descent.learning_rate = f64::NAN;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn query_defaults_to_unit_wave() {
        let cfg = QueryParams::default().to_config();
        assert_eq!(cfg, LandscapeConfig::single_wave(1.0, 1.0));

        let q: QueryParams = serde_json::from_str(r#"{"amplitude": 0.4}"#).unwrap();
        assert_eq!(q.to_config(), LandscapeConfig::single_wave(0.4, 1.0));
    }

    #[test]
    fn config_reads_from_json() {
        let json = r#"{
            "resolution": 32,
            "x_bounds": {"min": -1.0, "max": 1.0},
            "y_bounds": {"min": -1.0, "max": 1.0},
            "components": {"fixed": {"minima": [
                {"center_x": 0.0, "center_y": 0.0, "magnitude": 1.0, "width": 0.3}
            ]}}
        }"#;
        let cfg: LandscapeConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.resolution, 32);
        assert_eq!(cfg.noise, NoiseConfig::NONE);
        assert_eq!(cfg.descent, DescentConfig::default());
        assert!(cfg.validate().is_ok());
    }
}
