// 2D height map: row‐major Vec<Vec<f64>> of size N×N
// access as `map[row][col]`, rows run along y and columns along x.
pub type HeightMap2D = Vec<Vec<f64>>;

// N evenly spaced samples over [min, max], last sample pinned to `max`
pub fn linspace(min: f64, max: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let step = (max - min) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|i| min + i as f64 * step).collect();
            out[n - 1] = max;
            out
        }
    }
}

// (min, max) over every cell, ignoring NaN
pub fn min_max2(map: &HeightMap2D) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for row in map {
        for &v in row {
            min = min.min(v);
            max = max.max(v);
        }
    }
    (min, max)
}

// (row, col) of the smallest cell; first occurrence wins
pub fn argmin2(map: &HeightMap2D) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize, f64)> = None;
    for (r, row) in map.iter().enumerate() {
        for (c, &v) in row.iter().enumerate() {
            match best {
                Some((_, _, b)) if v >= b => {}
                _ if v.is_nan() => {}
                _ => best = Some((r, c, v)),
            }
        }
    }
    best.map(|(r, c, _)| (r, c))
}

// Population standard deviation (divides by n).
// None for fewer than two samples.
pub fn std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    Some(var.sqrt())
}
