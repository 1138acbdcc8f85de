use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::iter::IntoParallelIterator;
use rayon::iter::ParallelIterator;
use tracing::debug;

/// Result of clustering the contour areas: one label per input sample plus
/// the cluster mean areas, indexed by label.
#[derive(Debug, Clone)]
pub struct AreaClustering {
    pub labels: Vec<usize>,
    pub centroids: Vec<f32>,
    pub error: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct KmeansSettings {
    pub k: usize,
    pub max_iterations: usize,
    pub epsilon: f32,
    pub attempts: usize,
    pub seed: u64,
}

/// One-dimensional Lloyd's algorithm, best of `attempts` restarts by
/// within-cluster squared error. Every restart draws its initial centroids
/// from its own seed derived from `settings.seed`, so the outcome is the
/// same run to run and does not depend on restart scheduling.
///
/// Callers must pass at least `k` samples.
pub fn cluster_areas(areas: &[f32], settings: &KmeansSettings) -> AreaClustering {
    debug_assert!(areas.len() >= settings.k);

    let best = (0..settings.attempts)
        .into_par_iter()
        .map(|attempt| run_attempt(areas, settings, settings.seed.wrapping_add(attempt as u64)))
        .min_by(|a, b| {
            a.error
                .partial_cmp(&b.error)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .unwrap_or_else(|| run_attempt(areas, settings, settings.seed));

    debug!(
        error = best.error,
        centroids = ?best.centroids,
        "k-means converged"
    );
    best
}

fn run_attempt(areas: &[f32], settings: &KmeansSettings, seed: u64) -> AreaClustering {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut centroids: Vec<f32> = rand::seq::index::sample(&mut rng, areas.len(), settings.k)
        .into_iter()
        .map(|i| areas[i])
        .collect();

    let mut labels = vec![0usize; areas.len()];
    for _ in 0..settings.max_iterations {
        assign(areas, &centroids, &mut labels);
        claim_empty_clusters(areas, &mut centroids, &mut labels);

        let movement = recenter(areas, &labels, &mut centroids);
        if movement <= settings.epsilon {
            break;
        }
    }

    let error = areas
        .iter()
        .zip(&labels)
        .map(|(&a, &l)| (a - centroids[l]).powi(2))
        .sum();

    AreaClustering {
        labels,
        centroids,
        error,
    }
}

fn assign(areas: &[f32], centroids: &[f32], labels: &mut [usize]) {
    for (label, &area) in labels.iter_mut().zip(areas) {
        let mut best = 0usize;
        let mut best_dist = f32::MAX;
        for (cluster, &centroid) in centroids.iter().enumerate() {
            let dist = (area - centroid).abs();
            if dist < best_dist {
                best_dist = dist;
                best = cluster;
            }
        }
        *label = best;
    }
}

/// Duplicate initial centroids can leave a cluster with no members. Each
/// empty cluster claims the not-yet-claimed sample farthest from its own
/// centroid (first such sample on ties), so after this pass every cluster
/// owns at least one sample.
fn claim_empty_clusters(areas: &[f32], centroids: &mut [f32], labels: &mut [usize]) {
    let mut claimed: Vec<usize> = Vec::new();
    for cluster in 0..centroids.len() {
        if labels.iter().any(|&l| l == cluster) {
            continue;
        }
        let mut farthest: Option<(usize, f32)> = None;
        for (i, &area) in areas.iter().enumerate() {
            if claimed.contains(&i) {
                continue;
            }
            let dist = (area - centroids[labels[i]]).abs();
            if farthest.map_or(true, |(_, best)| dist > best) {
                farthest = Some((i, dist));
            }
        }
        if let Some((i, _)) = farthest {
            centroids[cluster] = areas[i];
            labels[i] = cluster;
            claimed.push(i);
        }
    }
}

fn recenter(areas: &[f32], labels: &[usize], centroids: &mut [f32]) -> f32 {
    let mut movement = 0.0f32;
    for (cluster, centroid) in centroids.iter_mut().enumerate() {
        let mut sum = 0.0f32;
        let mut count = 0usize;
        for (&area, &label) in areas.iter().zip(labels) {
            if label == cluster {
                sum += area;
                count += 1;
            }
        }
        if count > 0 {
            let updated = sum / count as f32;
            movement = movement.max((updated - *centroid).abs());
            *centroid = updated;
        }
    }
    movement
}
