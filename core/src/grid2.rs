use crate::config::Range;
use crate::error::{LandscapeError, Result};
use crate::utils::{HeightMap2D, linspace};

// Sample mesh: x[r][c] = xs[c], y[r][c] = ys[r]
#[derive(Debug, Clone, PartialEq)]
pub struct Grid2D {
    xs: Vec<f64>,
    ys: Vec<f64>,
    x: HeightMap2D,
    y: HeightMap2D,
}

impl Grid2D {
    // N, the number of rows (and columns)
    pub fn size(&self) -> usize {
        self.ys.len()
    }

    pub fn x(&self) -> &HeightMap2D {
        &self.x
    }

    pub fn y(&self) -> &HeightMap2D {
        &self.y
    }

    // 1‐D axes the mesh was expanded from
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    // Distance between neighbouring samples as (row, col) = (dy, dx).
    // Zero along an axis with a single sample.
    pub fn spacing(&self) -> (f64, f64) {
        let step = |axis: &[f64]| {
            if axis.len() < 2 {
                0.0
            } else {
                axis[1] - axis[0]
            }
        };
        (step(&self.ys), step(&self.xs))
    }

    // Plot‐space coordinates of a grid node
    pub fn coords(&self, row: usize, col: usize) -> (f64, f64) {
        (self.xs[col], self.ys[row])
    }
}

pub struct GridBuilder {
    resolution: usize,
    x_bounds: Range,
    y_bounds: Range,
}

impl GridBuilder {
    pub fn new(resolution: usize, x_bounds: Range, y_bounds: Range) -> Self {
        Self {
            resolution,
            x_bounds,
            y_bounds,
        }
    }

    // Expand two linspaces into an N×N mesh
    pub fn build(&self) -> Result<Grid2D> {
        if self.resolution == 0 {
            return Err(LandscapeError::config("resolution must be positive"));
        }
        self.x_bounds.validate("x_bounds")?;
        self.y_bounds.validate("y_bounds")?;

        let n = self.resolution;
        let xs = linspace(self.x_bounds.min, self.x_bounds.max, n);
        let ys = linspace(self.y_bounds.min, self.y_bounds.max, n);
        let x = (0..n).map(|_| xs.clone()).collect();
        let y = ys.iter().map(|&v| vec![v; n]).collect();

        Ok(Grid2D { xs, ys, x, y })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain() -> Range {
        Range::new(-5.0, 5.0)
    }

    #[test]
    fn grid2_dimensions() {
        for n in [1, 2, 17, 100] {
            let g = GridBuilder::new(n, domain(), domain()).build().unwrap();
            assert_eq!(g.size(), n);
            assert_eq!(g.x().len(), n);
            assert_eq!(g.y().len(), n);
            assert!(g.x().iter().all(|row| row.len() == n));
            assert!(g.y().iter().all(|row| row.len() == n));
        }
    }

    #[test]
    fn grid2_mesh_layout() {
        let g = GridBuilder::new(5, Range::new(0.0, 4.0), Range::new(-2.0, 2.0))
            .build()
            .unwrap();
        // columns run along x, rows along y
        assert_eq!(g.x()[3], vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(g.y()[3], vec![1.0; 5]);
        assert_eq!(g.coords(0, 4), (4.0, -2.0));
        assert_eq!(g.spacing(), (1.0, 1.0));
    }

    #[test]
    fn grid2_zero_resolution() {
        let err = GridBuilder::new(0, domain(), domain()).build().unwrap_err();
        assert!(matches!(err, LandscapeError::Configuration(_)));
    }

    #[test]
    fn grid2_inverted_bounds() {
        let res = GridBuilder::new(10, Range::new(1.0, -1.0), domain()).build();
        assert!(res.is_err());
    }
}
