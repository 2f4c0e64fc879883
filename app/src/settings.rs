use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use landscape::{LandscapeConfig, QueryParams};
use storage::DEFAULT_DATA_PATH;

// Export settings, read from the environment
pub struct Settings {
    pub config: LandscapeConfig,
    pub out: PathBuf,
    pub png: Option<PathBuf>,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let config: LandscapeConfig = match env::var("LANDSCAPE_CONFIG") {
            Ok(path) => {
                let text = fs::read_to_string(&path)
                    .with_context(|| format!("reading config file {path}"))?;
                serde_json::from_str(&text).with_context(|| format!("parsing config file {path}"))?
            }
            Err(_) => preset(&env::var("LANDSCAPE_PRESET").unwrap_or_else(|_| "basic".into()))?,
        };

        let config = match env::var("LANDSCAPE_RESOLUTION") {
            Ok(n) => config.with_resolution(
                n.parse()
                    .with_context(|| format!("LANDSCAPE_RESOLUTION={n} is not a count"))?,
            ),
            Err(_) => config,
        };

        Ok(Self {
            config,
            out: env::var("LANDSCAPE_OUT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_PATH)),
            png: env::var("LANDSCAPE_PNG").ok().map(PathBuf::from),
        })
    }
}

fn preset(name: &str) -> Result<LandscapeConfig> {
    Ok(match name {
        "basic" => LandscapeConfig::basic(),
        "rough" => LandscapeConfig::default(),
        "wave" => QueryParams {
            amplitude: knob("LANDSCAPE_AMPLITUDE")?,
            frequency: knob("LANDSCAPE_FREQUENCY")?,
        }
        .to_config(),
        other => bail!("unknown preset {other:?}, expected basic, rough or wave"),
    })
}

fn knob(var: &str) -> Result<Option<f64>> {
    match env::var(var) {
        Ok(v) => Ok(Some(
            v.parse().with_context(|| format!("{var}={v} is not a number"))?,
        )),
        Err(_) => Ok(None),
    }
}
