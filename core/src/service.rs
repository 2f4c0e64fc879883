use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::config::LandscapeConfig;
use crate::descent2::{DescentPath, DescentSimulator};
use crate::error::Result;
use crate::gradient2::GradientField;
use crate::grid2::{Grid2D, GridBuilder};
use crate::synth2::{FieldSynthesizer, Terms};
use crate::utils::{HeightMap2D, std_dev};

// Scalar summaries over the descent path
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    // population std‐dev of visited heights, None below two points
    pub loss_std_dev: Option<f64>,
    pub final_loss: Option<f64>,
    pub steps: usize,
    pub escaped: bool,
}

impl Diagnostics {
    pub fn from_path(path: &DescentPath) -> Self {
        let losses = path.losses();
        Self {
            loss_std_dev: std_dev(&losses),
            final_loss: losses.last().copied(),
            steps: path.len(),
            escaped: path.escaped(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LandscapeResult {
    grid: Grid2D,
    field: HeightMap2D,
    terms: Terms,
    path: DescentPath,
    diagnostics: Diagnostics,
}

impl LandscapeResult {
    pub fn grid(&self) -> &Grid2D {
        &self.grid
    }

    pub fn field(&self) -> &HeightMap2D {
        &self.field
    }

    // waves and extrema the field was built from
    pub fn terms(&self) -> &Terms {
        &self.terms
    }

    pub fn path(&self) -> &DescentPath {
        &self.path
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }
}

// Entry point for exporters and transports. Stateless, so one instance
// can serve concurrent callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct LandscapeService;

impl LandscapeService {
    pub fn new() -> Self {
        Self
    }

    // grid -> field -> gradient -> descent -> diagnostics
    pub fn compute(&self, config: &LandscapeConfig) -> Result<LandscapeResult> {
        config.validate()?;

        let grid = GridBuilder::new(config.resolution, config.x_bounds, config.y_bounds).build()?;
        debug!("built {0}x{0} grid", grid.size());

        let (field, terms) =
            FieldSynthesizer::new(&config.components, config.noise).generate(&grid)?;

        let gradient = GradientField::compute(&field);
        let path = DescentSimulator::new(&config.descent)?.run(&grid, &field, &gradient);
        let diagnostics = Diagnostics::from_path(&path);

        info!(
            "landscape ready: N={}, path of {} points, loss std-dev {:?}",
            grid.size(),
            diagnostics.steps,
            diagnostics.loss_std_dev
        );

        Ok(LandscapeResult {
            grid,
            field,
            terms,
            path,
            diagnostics,
        })
    }
}

// The basic four-minimum landscape at the given resolution
pub fn generate_loss_landscape(n_points: usize) -> Result<LandscapeResult> {
    LandscapeService::new().compute(&LandscapeConfig::basic().with_resolution(n_points))
}
