//! K-means clustering of shape descriptors
//!
//! Lloyd's algorithm over the two-dimensional (compactness, elongation)
//! feature space, restarted from several random seeds:
//!
//! 1. Each attempt seeds K centroids with the features of K distinct
//!    descriptors drawn uniformly without replacement.
//! 2. Descriptors are assigned to their nearest centroid (ties go to the
//!    lowest index) and centroids move to the mean of their group. A
//!    centroid left without descriptors is parked at
//!    [`FeaturePoint::PINNED`] so it attracts nothing afterwards. The loop
//!    ends when the centroids stop moving or after `max_iterations`.
//! 3. Attempts with an empty group are discarded and one of the rest is
//!    kept according to [`SseSelection`].
//!
//! Every attempt is a pure function of the descriptors and its seed, which
//! makes clustering reproducible once [`ClusterOptions::seed`] is set.

use crate::error::{RecogError, RecogResult};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index;
use shapeclass_region::{FeaturePoint, ShapeDescriptor};
use tracing::debug;

/// Default number of groups
pub const DEFAULT_CLUSTERS: usize = 3;
/// Default number of independent restarts
pub const DEFAULT_ATTEMPTS: usize = 10;
/// Default cap on assignment/update rounds per attempt
pub const DEFAULT_MAX_ITERATIONS: usize = 10;

/// Which surviving attempt to keep, judged by the sum of squared distances
/// of every descriptor to its centroid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SseSelection {
    /// Keep the tightest clustering (lowest SSE)
    #[default]
    Minimal,
    /// Keep the loosest clustering (highest SSE)
    Maximal,
}

/// Options for [`KMeans`]
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterOptions {
    /// Number of groups K
    pub clusters: usize,
    /// Number of independent attempts
    pub attempts: usize,
    /// Iteration cap per attempt
    pub max_iterations: usize,
    /// Rule choosing among non-degenerate attempts
    pub selection: SseSelection,
    /// Base seed; a random one is drawn per call when `None`
    pub seed: Option<u64>,
}

impl Default for ClusterOptions {
    fn default() -> Self {
        Self {
            clusters: DEFAULT_CLUSTERS,
            attempts: DEFAULT_ATTEMPTS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            selection: SseSelection::default(),
            seed: None,
        }
    }
}

impl ClusterOptions {
    /// Create default options for `clusters` groups
    pub fn new(clusters: usize) -> Self {
        Self {
            clusters,
            ..Self::default()
        }
    }

    pub fn with_attempts(mut self, attempts: usize) -> Self {
        self.attempts = attempts;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_selection(mut self, selection: SseSelection) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Outcome of one k-means attempt
#[derive(Debug, Clone, PartialEq)]
pub struct Attempt {
    /// Final centroid positions
    pub centroids: Vec<FeaturePoint>,
    /// Descriptors assigned to each centroid
    pub groups: Vec<Vec<ShapeDescriptor>>,
    /// Sum of squared distances of descriptors to their centroid
    pub sse: f64,
}

impl Attempt {
    pub fn has_empty_group(&self) -> bool {
        self.groups.iter().any(|g| g.is_empty())
    }
}

/// Index of the centroid nearest to `point`; ties go to the lowest index.
pub fn nearest_centroid(point: &FeaturePoint, centroids: &[FeaturePoint]) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (i, c) in centroids.iter().enumerate() {
        let d = point.distance(c);
        if d < best_distance {
            best = i;
            best_distance = d;
        }
    }
    best
}

/// Group descriptors by nearest centroid, preserving input order per group.
pub fn assign(descriptors: &[ShapeDescriptor], centroids: &[FeaturePoint]) -> Vec<Vec<ShapeDescriptor>> {
    let mut groups = vec![Vec::new(); centroids.len()];
    for d in descriptors {
        groups[nearest_centroid(&d.features, centroids)].push(*d);
    }
    groups
}

/// Mean of each group; empty groups are pinned.
pub fn update_centroids(groups: &[Vec<ShapeDescriptor>]) -> Vec<FeaturePoint> {
    groups
        .iter()
        .map(|g| FeaturePoint::mean(g.iter().map(|d| &d.features)).unwrap_or(FeaturePoint::PINNED))
        .collect()
}

/// Sum of squared distances of every descriptor to its group's centroid.
pub fn sum_squared_error(groups: &[Vec<ShapeDescriptor>], centroids: &[FeaturePoint]) -> f64 {
    groups
        .iter()
        .zip(centroids)
        .flat_map(|(g, c)| g.iter().map(move |d| d.distance_to(c).powi(2)))
        .sum()
}

/// Seed for attempt number `attempt` derived from a base seed.
#[inline]
pub fn derive_seed(base: u64, attempt: usize) -> u64 {
    base ^ (attempt as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Run a single k-means attempt.
///
/// # Errors
///
/// Returns [`RecogError::InsufficientSamples`] if there are fewer
/// descriptors than `k`, and [`RecogError::InvalidParameter`] if `k` is 0.
pub fn run_attempt(
    descriptors: &[ShapeDescriptor],
    k: usize,
    max_iterations: usize,
    seed: u64,
) -> RecogResult<Attempt> {
    if k == 0 {
        return Err(RecogError::InvalidParameter(
            "cluster count must be positive".to_string(),
        ));
    }
    if descriptors.len() < k {
        return Err(RecogError::InsufficientSamples {
            samples: descriptors.len(),
            clusters: k,
        });
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut centroids: Vec<FeaturePoint> = index::sample(&mut rng, descriptors.len(), k)
        .into_vec()
        .into_iter()
        .map(|i| descriptors[i].features)
        .collect();

    let mut groups = assign(descriptors, &centroids);
    for _ in 0..max_iterations {
        groups = assign(descriptors, &centroids);
        let updated = update_centroids(&groups);
        if updated == centroids {
            break;
        }
        centroids = updated;
    }

    let sse = sum_squared_error(&groups, &centroids);
    Ok(Attempt {
        centroids,
        groups,
        sse,
    })
}

/// Pick one attempt among those without empty groups.
///
/// On equal SSE the earlier attempt wins. Returns `None` when every
/// attempt is degenerate.
pub fn select_attempt(
    attempts: impl IntoIterator<Item = Attempt>,
    selection: SseSelection,
) -> Option<Attempt> {
    attempts
        .into_iter()
        .filter(|a| !a.has_empty_group())
        .fold(None, |best, candidate| match best {
            None => Some(candidate),
            Some(best) => {
                let better = match selection {
                    SseSelection::Minimal => candidate.sse < best.sse,
                    SseSelection::Maximal => candidate.sse > best.sse,
                };
                Some(if better { candidate } else { best })
            }
        })
}

/// K-means clusterer with random restarts
#[derive(Debug, Clone)]
pub struct KMeans {
    options: ClusterOptions,
}

impl KMeans {
    /// Create a clusterer.
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::InvalidParameter`] if the cluster count,
    /// attempt count or iteration cap is zero.
    pub fn new(options: ClusterOptions) -> RecogResult<Self> {
        if options.clusters == 0 {
            return Err(RecogError::InvalidParameter(
                "cluster count must be positive".to_string(),
            ));
        }
        if options.attempts == 0 {
            return Err(RecogError::InvalidParameter(
                "attempt count must be positive".to_string(),
            ));
        }
        if options.max_iterations == 0 {
            return Err(RecogError::InvalidParameter(
                "iteration cap must be positive".to_string(),
            ));
        }
        Ok(Self { options })
    }

    pub fn options(&self) -> &ClusterOptions {
        &self.options
    }

    /// Run every attempt and return the one kept by the selection rule.
    pub fn best_attempt(&self, descriptors: &[ShapeDescriptor]) -> RecogResult<Attempt> {
        let k = self.options.clusters;
        if descriptors.len() < k {
            return Err(RecogError::InsufficientSamples {
                samples: descriptors.len(),
                clusters: k,
            });
        }

        let base = self.options.seed.unwrap_or_else(rand::random);
        let attempts = (0..self.options.attempts)
            .map(|i| {
                let attempt = run_attempt(
                    descriptors,
                    k,
                    self.options.max_iterations,
                    derive_seed(base, i),
                )?;
                if attempt.has_empty_group() {
                    debug!(attempt = i, "discarding clustering attempt with an empty group");
                } else {
                    debug!(attempt = i, sse = attempt.sse, "clustering attempt finished");
                }
                Ok(attempt)
            })
            .collect::<RecogResult<Vec<_>>>()?;

        let best = select_attempt(attempts, self.options.selection).ok_or(
            RecogError::ClusteringFailed {
                attempts: self.options.attempts,
            },
        )?;
        debug!(
            sse = best.sse,
            selection = ?self.options.selection,
            "selected clustering attempt"
        );
        Ok(best)
    }

    /// Partition descriptors into exactly K non-empty groups.
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::InsufficientSamples`] with fewer than K
    /// descriptors and [`RecogError::ClusteringFailed`] when every attempt
    /// produced an empty group.
    pub fn cluster(&self, descriptors: &[ShapeDescriptor]) -> RecogResult<Vec<Vec<ShapeDescriptor>>> {
        self.best_attempt(descriptors).map(|a| a.groups)
    }
}
