use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

/// Tuning knobs for the tally pipeline.
///
/// The defaults match the image set the pipeline was calibrated on: the
/// threshold and the noise floor are tied to that resolution and lighting,
/// not derived from image statistics.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TallyParams {
    /// Gray values above this become foreground.
    pub threshold: i32,
    /// Side of the square structuring element used by dilate/erode.
    pub kernel_size: i32,
    pub dilate_iterations: i32,
    pub erode_iterations: i32,
    /// Contours with enclosed area at or below this are dropped as noise.
    pub min_area: f64,
    /// K-means iteration cap per restart.
    pub kmeans_max_iterations: usize,
    /// Stop a restart once no centroid moved more than this (area units).
    pub kmeans_epsilon: f32,
    /// Independent restarts; the lowest-error one wins.
    pub kmeans_attempts: usize,
    /// Base seed for the restarts, so runs are reproducible.
    pub seed: u64,
    /// Reference markers expected in each size class; subtracted from the
    /// raw counts before money is summed.
    pub refs_per_class: u32,
}

impl Default for TallyParams {
    fn default() -> Self {
        Self {
            threshold: 100,
            kernel_size: 5,
            dilate_iterations: 2,
            erode_iterations: 1,
            min_area: 500.0,
            kmeans_max_iterations: 100,
            kmeans_epsilon: 0.2,
            kmeans_attempts: 10,
            seed: 42,
            refs_per_class: 1,
        }
    }
}

impl TallyParams {
    pub fn from_file(path: &Path) -> Result<Self, anyhow::Error> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading params from {}", path.display()))?;
        let params = serde_json::from_str(&text)
            .with_context(|| format!("parsing params from {}", path.display()))?;
        Ok(params)
    }
}
