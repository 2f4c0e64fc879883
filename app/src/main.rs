mod render;
mod settings;

use std::time::Instant;

use anyhow::{Context, Result};
use landscape::LandscapeService;
use log::info;
use storage::LandscapeStore;
use storage::models::LandscapeRecord;

use crate::settings::Settings;

fn main() -> Result<()> {
    env_logger::init();

    let settings = Settings::from_env()?;
    let start = Instant::now();
    let res = LandscapeService::new()
        .compute(&settings.config)
        .context("computing landscape")?;
    info!("computed in {:.2} ms", start.elapsed().as_secs_f64() * 1000.0);

    let store = LandscapeStore::new(&settings.out);
    store
        .save(&LandscapeRecord::from(&res))
        .with_context(|| format!("saving {}", settings.out.display()))?;

    if let Some(png) = &settings.png {
        render::save_png(&res, png)?;
        info!("saved preview to {}", png.display());
    }

    let d = res.diagnostics();
    println!(
        "Synthetic loss landscape saved to {} ({}x{}, {} path points, loss std-dev {})",
        settings.out.display(),
        res.grid().size(),
        res.grid().size(),
        d.steps,
        d.loss_std_dev
            .map_or_else(|| "n/a".to_string(), |s| format!("{s:.4}"))
    );
    Ok(())
}
