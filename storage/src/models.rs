use landscape::{HeightMap2D, LandscapeResult};
use serde::{Deserialize, Serialize};

// Export form of a landscape. Field names and nesting are the contract
// with every consumer (data file, HTTP body, plotting layer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandscapeRecord {
    pub x: HeightMap2D,
    pub y: HeightMap2D,
    pub z: HeightMap2D,
    // ordered [x, y, z] triples
    #[serde(default)]
    pub path: Vec<[f64; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loss_std_dev: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_loss: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escaped: Option<bool>,
}

impl From<&LandscapeResult> for LandscapeRecord {
    fn from(res: &LandscapeResult) -> Self {
        let d = res.diagnostics();
        Self {
            x: res.grid().x().clone(),
            y: res.grid().y().clone(),
            z: res.field().clone(),
            path: res.path().points().iter().map(|p| p.to_array()).collect(),
            loss_std_dev: d.loss_std_dev,
            final_loss: d.final_loss,
            steps: Some(d.steps),
            escaped: Some(d.escaped),
        }
    }
}

impl LandscapeRecord {
    // N, taken from the height array
    pub fn size(&self) -> usize {
        self.z.len()
    }

    // First field holding NaN or ±inf, if any
    pub fn non_finite_field(&self) -> Option<&'static str> {
        let all_finite = |map: &HeightMap2D| map.iter().flatten().all(|v| v.is_finite());
        let opt_finite = |v: Option<f64>| v.is_none_or(f64::is_finite);
        if !all_finite(&self.x) {
            Some("x")
        } else if !all_finite(&self.y) {
            Some("y")
        } else if !all_finite(&self.z) {
            Some("z")
        } else if !self.path.iter().flatten().all(|v| v.is_finite()) {
            Some("path")
        } else if !opt_finite(self.loss_std_dev) {
            Some("loss_std_dev")
        } else if !opt_finite(self.final_loss) {
            Some("final_loss")
        } else {
            None
        }
    }
}

// What a consumer gets back: the record, or `{"error": "..."}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArtifactResponse {
    Error { error: String },
    Data(Box<LandscapeRecord>),
}

impl ArtifactResponse {
    pub fn error(&self) -> Option<&str> {
        match self {
            ArtifactResponse::Error { error } => Some(error),
            ArtifactResponse::Data(_) => None,
        }
    }

    pub fn record(&self) -> Option<&LandscapeRecord> {
        match self {
            ArtifactResponse::Data(rec) => Some(rec),
            ArtifactResponse::Error { .. } => None,
        }
    }
}
