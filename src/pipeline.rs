use opencv::core::Point;
use opencv::core::Vector;
use opencv::prelude::*;
use thiserror::Error;
use tracing::debug;

use crate::cluster::{cluster_areas, KmeansSettings};
use crate::config::TallyParams;
use crate::cv_utils;
use crate::denomination::{CountTable, DenominationMap};
use crate::draw;
use crate::report::TallyReport;

/// Coin size classes in play: $1, $2, $5, $10. Also the k of the
/// clustering step and the minimum number of objects a scene can hold,
/// since each class contributes its reference marker.
pub const CLASS_COUNT: usize = 4;

#[derive(Debug, Error)]
pub enum TallyError {
    #[error("Error: No se pudo cargar la imagen: {path}")]
    UnreadableImage { path: String },
    #[error(
        "Error: Se detectaron menos de 4 objetos. Asegúrate de que las referencias estén visibles."
    )]
    TooFewObjects { found: usize },
    #[error(transparent)]
    Cv(#[from] opencv::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Everything the run produces, returned as data so callers decide what to
/// display, save, or assert on.
pub struct TallyOutcome {
    pub annotated: Mat,
    pub counts: CountTable,
    pub report: TallyReport,
}

/// Full pipeline for one photograph: load, binarize, clean up, extract
/// contours, cluster areas into four size classes, map classes to
/// denominations, annotate, and reconcile against the reference markers.
pub fn count_coins(path: &str, params: &TallyParams) -> Result<TallyOutcome, TallyError> {
    let original = load_image(path)?;
    let binary = preprocess(&original, params)?;
    let contours = valid_contours(&binary, params.min_area)?;

    if contours.len() < CLASS_COUNT {
        return Err(TallyError::TooFewObjects {
            found: contours.len(),
        });
    }

    let areas: Vec<f32> = contours.iter().map(|(_, area)| *area as f32).collect();
    let clustering = cluster_areas(
        &areas,
        &KmeansSettings {
            k: CLASS_COUNT,
            max_iterations: params.kmeans_max_iterations,
            epsilon: params.kmeans_epsilon,
            attempts: params.kmeans_attempts,
            seed: params.seed,
        },
    );
    let map = DenominationMap::from_centroids(&clustering.centroids);

    let mut annotated = original.clone();
    let mut counts = CountTable::default();
    for ((contour, _), &label) in contours.iter().zip(&clustering.labels) {
        let denom = map.denomination(label);
        counts.increment(denom);
        draw::annotate_contour(&mut annotated, contour, denom)?;
    }

    let report = TallyReport::reconcile(&counts, params.refs_per_class);
    debug!(objects = counts.total_objects(), total = report.total, "tally complete");

    Ok(TallyOutcome {
        annotated,
        counts,
        report,
    })
}

fn load_image(path: &str) -> Result<Mat, TallyError> {
    let original = cv_utils::read_image(path)?;
    if original.empty() {
        return Err(TallyError::UnreadableImage {
            path: path.to_string(),
        });
    }
    debug!(path, cols = original.cols(), rows = original.rows(), "image loaded");
    Ok(original)
}

/// Grayscale, fixed-threshold binarization, then dilate twice and erode
/// once so each object becomes one solid blob. Spatial dimensions are
/// preserved throughout.
pub fn preprocess(original: &Mat, params: &TallyParams) -> Result<Mat, TallyError> {
    let grey = cv_utils::to_grey(original)?;
    let binary = cv_utils::threshold(&grey, params.threshold)?;
    let dilated = cv_utils::dilate(&binary, params.kernel_size, params.dilate_iterations)?;
    let cleaned = cv_utils::erode(&dilated, params.kernel_size, params.erode_iterations)?;
    Ok(cleaned)
}

/// External contours with enclosed area above the noise floor, paired with
/// that area.
pub fn valid_contours(
    binary: &Mat,
    min_area: f64,
) -> Result<Vec<(Vector<Point>, f64)>, TallyError> {
    let all = cv_utils::find_external_contours(binary)?;

    let mut valid = Vec::new();
    for contour in all.iter() {
        let area = cv_utils::contour_area(&contour)?;
        if area > min_area {
            valid.push((contour, area));
        }
    }
    debug!(found = all.len(), kept = valid.len(), "contours extracted");
    Ok(valid)
}
