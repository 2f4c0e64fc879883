use std::path::Path;

use anyhow::{Context, Result};
use image::{Rgb, RgbImage};
use landscape::LandscapeResult;
use landscape::utils::min_max2;
use palette::{Gradient, LinSrgb};

const PATH_COLOR: Rgb<u8> = Rgb([255, 64, 32]);

// Top‐down colour image of the field with the descent path on top.
// Row 0 (lowest y) ends up at the bottom of the picture.
pub fn render(res: &LandscapeResult) -> RgbImage {
    let field = res.field();
    let size = field.len();

    // valleys dark blue, ridges pale yellow
    let gradient = Gradient::with_domain(vec![
        (0.00, LinSrgb::new(0.05, 0.02, 0.30)),
        (0.35, LinSrgb::new(0.10, 0.35, 0.60)),
        (0.65, LinSrgb::new(0.20, 0.65, 0.40)),
        (1.00, LinSrgb::new(1.00, 0.95, 0.60)),
    ]);

    let (min, max) = min_max2(field);
    let mut img = RgbImage::new(size as u32, size as u32);
    for (r, row) in field.iter().enumerate() {
        for (c, &z) in row.iter().enumerate() {
            let norm = if (max - min).abs() < f64::EPSILON {
                0.5
            } else {
                (z - min) / (max - min)
            };
            let col: LinSrgb = gradient.get(norm as f32);
            let rgb = col.into_format::<u8>();
            img.put_pixel(
                c as u32,
                (size - 1 - r) as u32,
                Rgb([rgb.red, rgb.green, rgb.blue]),
            );
        }
    }

    for &(r, c) in res.path().cells() {
        img.put_pixel(c as u32, (size - 1 - r) as u32, PATH_COLOR);
    }
    img
}

pub fn save_png(res: &LandscapeResult, path: &Path) -> Result<()> {
    render(res)
        .save(path)
        .with_context(|| format!("writing preview {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use landscape::generate_loss_landscape;

    #[test]
    fn render_marks_path() {
        let res = generate_loss_landscape(40).unwrap();
        let img = render(&res);
        assert_eq!(img.dimensions(), (40, 40));
        let cells = res.path().cells();
        assert!(!cells.is_empty());
        for &(r, c) in cells {
            assert_eq!(*img.get_pixel(c as u32, (39 - r) as u32), PATH_COLOR);
        }
    }
}
