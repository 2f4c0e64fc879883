use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::DescentConfig;
use crate::error::Result;
use crate::gradient2::GradientField;
use crate::grid2::Grid2D;
use crate::utils::HeightMap2D;

// How the walker reads the gradient at its position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sampling {
    // value at the rounded cell
    #[default]
    Nearest,
    // bilinear blend of the four surrounding cells
    Bilinear,
}

// (x, y, z) in plot space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl PathPoint {
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DescentPath {
    points: Vec<PathPoint>,
    // (row, col) each point was read from
    cells: Vec<(usize, usize)>,
    // walk ended by leaving the grid
    escaped: bool,
}

impl DescentPath {
    pub fn points(&self) -> &[PathPoint] {
        &self.points
    }

    pub fn cells(&self) -> &[(usize, usize)] {
        &self.cells
    }

    pub fn escaped(&self) -> bool {
        self.escaped
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn losses(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.z).collect()
    }
}

// Fixed‐step gradient descent over a sampled field.
// Runs until the step budget is spent or the walker leaves the grid,
// there is no convergence test.
pub struct DescentSimulator {
    start: (i64, i64),
    max_steps: usize,
    learning_rate: f64,
    sampling: Sampling,
}

impl DescentSimulator {
    pub fn new(config: &DescentConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            start: config.start,
            max_steps: config.max_steps,
            learning_rate: config.learning_rate,
            sampling: config.sampling,
        })
    }

    pub fn run(&self, grid: &Grid2D, field: &HeightMap2D, gradient: &GradientField) -> DescentPath {
        let n = grid.size();
        assert!(
            field.len() == n && gradient.d_row.len() == n && gradient.d_col.len() == n,
            "grid, field and gradient must share one shape"
        );

        let mut path = DescentPath::default();
        let (mut row, mut col) = (self.start.0 as f64, self.start.1 as f64);

        for _ in 0..self.max_steps {
            let Some((r, c)) = cell_index(row, col, n) else {
                path.escaped = true;
                break;
            };

            let (x, y) = grid.coords(r, c);
            path.points.push(PathPoint {
                x,
                y,
                z: field[r][c],
            });
            path.cells.push((r, c));

            let (g_row, g_col) = match self.sampling {
                Sampling::Nearest => gradient.at(r, c),
                Sampling::Bilinear => gradient.sample(row, col),
            };
            row -= self.learning_rate * g_row;
            col -= self.learning_rate * g_col;
        }

        debug!(
            "descent recorded {} of {} steps (escaped: {})",
            path.points.len(),
            self.max_steps,
            path.escaped
        );
        path
    }
}

// Nearest grid cell for a fractional position, None when off‐grid
fn cell_index(row: f64, col: f64, n: usize) -> Option<(usize, usize)> {
    let r = row.round_ties_even();
    let c = col.round_ties_even();
    let inside = |v: f64| v.is_finite() && v >= 0.0 && v < n as f64;
    if inside(r) && inside(c) {
        Some((r as usize, c as usize))
    } else {
        None
    }
}
