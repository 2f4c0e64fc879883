use crate::utils::HeightMap2D;

// Discrete gradient of a height field along rows and columns.
// Central differences inside, one‐sided differences on the edges.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientField {
    pub d_row: HeightMap2D,
    pub d_col: HeightMap2D,
}

impl GradientField {
    // Derivatives in index units (unit spacing)
    pub fn compute(field: &HeightMap2D) -> Self {
        Self::compute_with_spacing(field, 1.0, 1.0)
    }

    // Derivatives per unit of distance, `row_spacing` = dy, `col_spacing` = dx
    pub fn compute_with_spacing(field: &HeightMap2D, row_spacing: f64, col_spacing: f64) -> Self {
        let rows = field.len();
        let cols = field.first().map_or(0, |r| r.len());
        let mut d_row = vec![vec![0.0; cols]; rows];
        let mut d_col = vec![vec![0.0; cols]; rows];

        for r in 0..rows {
            for c in 0..cols {
                d_row[r][c] = diff(rows, r, |i| field[i][c]) / row_spacing;
                d_col[r][c] = diff(cols, c, |j| field[r][j]) / col_spacing;
            }
        }
        Self { d_row, d_col }
    }

    pub fn at(&self, row: usize, col: usize) -> (f64, f64) {
        (self.d_row[row][col], self.d_col[row][col])
    }

    // Bilinear sample at a fractional (row, col), clamped onto the grid
    pub fn sample(&self, row: f64, col: f64) -> (f64, f64) {
        (bilinear(&self.d_row, row, col), bilinear(&self.d_col, row, col))
    }
}

// Derivative at index i of an axis of length `len`
#[inline]
fn diff(len: usize, i: usize, at: impl Fn(usize) -> f64) -> f64 {
    if len < 2 {
        0.0
    } else if i == 0 {
        at(1) - at(0)
    } else if i == len - 1 {
        at(i) - at(i - 1)
    } else {
        (at(i + 1) - at(i - 1)) / 2.0
    }
}

fn bilinear(map: &HeightMap2D, row: f64, col: f64) -> f64 {
    let rows = map.len();
    let cols = map.first().map_or(0, |r| r.len());
    if rows == 0 || cols == 0 {
        return 0.0;
    }
    let fr = row.clamp(0.0, (rows - 1) as f64);
    let fc = col.clamp(0.0, (cols - 1) as f64);
    let r0 = fr.floor() as usize;
    let c0 = fc.floor() as usize;
    let r1 = (r0 + 1).min(rows - 1);
    let c1 = (c0 + 1).min(cols - 1);
    let tr = fr - r0 as f64;
    let tc = fc - c0 as f64;

    let a = map[r0][c0];
    let b = map[r0][c1];
    let c = map[r1][c0];
    let d = map[r1][c1];

    let ab = a * (1.0 - tc) + b * tc;
    let cd = c * (1.0 - tc) + d * tc;
    ab * (1.0 - tr) + cd * tr
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Range;
    use crate::grid2::GridBuilder;

    #[test]
    fn gradient2_paraboloid_matches_analytic() {
        let g = GridBuilder::new(100, Range::new(-5.0, 5.0), Range::new(-5.0, 5.0))
            .build()
            .unwrap();
        let field: HeightMap2D = (0..100)
            .map(|r| {
                (0..100)
                    .map(|c| {
                        let (x, y) = g.coords(r, c);
                        x * x + y * y
                    })
                    .collect()
            })
            .collect();
        let (dy, dx) = g.spacing();
        let grad = GradientField::compute_with_spacing(&field, dy, dx);

        for &(r, c) in &[(50, 50), (10, 80), (33, 67), (98, 1)] {
            let (x, y) = g.coords(r, c);
            let (gy, gx) = grad.at(r, c);
            assert!((gx - 2.0 * x).abs() < 1e-2, "d/dx at ({r},{c}): {gx} vs {}", 2.0 * x);
            assert!((gy - 2.0 * y).abs() < 1e-2, "d/dy at ({r},{c}): {gy} vs {}", 2.0 * y);
        }
    }

    #[test]
    fn gradient2_edges_are_one_sided() {
        let field = vec![
            vec![0.0, 1.0, 4.0],
            vec![1.0, 2.0, 5.0],
            vec![4.0, 5.0, 8.0],
        ];
        let grad = GradientField::compute(&field);
        assert_eq!(grad.d_col[0], vec![1.0, 2.0, 3.0]);
        assert_eq!(grad.d_row[0][0], 1.0);
        assert_eq!(grad.d_row[1][0], 2.0);
        assert_eq!(grad.d_row[2][0], 3.0);
    }

    #[test]
    fn gradient2_does_not_touch_input() {
        let field = vec![vec![3.0, -1.0], vec![0.5, 2.0]];
        let before = field.clone();
        let grad = GradientField::compute(&field);
        assert_eq!(field, before);
        assert_eq!(grad.d_row.len(), 2);
        assert_eq!(grad.d_col[0].len(), 2);
    }

    #[test]
    fn gradient2_single_cell_is_flat() {
        let grad = GradientField::compute(&vec![vec![7.0]]);
        assert_eq!(grad.at(0, 0), (0.0, 0.0));
    }

    #[test]
    fn gradient2_bilinear_sample() {
        let field = vec![
            vec![0.0, 1.0, 4.0],
            vec![1.0, 2.0, 5.0],
            vec![4.0, 5.0, 8.0],
        ];
        let grad = GradientField::compute(&field);
        // exact on nodes
        assert_eq!(grad.sample(0.0, 1.0), grad.at(0, 1));
        // halfway between columns 0 and 1 of row 0
        let (_, dc) = grad.sample(0.0, 0.5);
        assert!((dc - 1.5).abs() < 1e-12);
        // clamped past the edge
        assert_eq!(grad.sample(-3.0, 9.0), grad.at(0, 2));
    }
}
