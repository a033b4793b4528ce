//! Nearest-centroid recognition model
//!
//! One [`Centroid`] per class. Training merges descriptors into a
//! centroid as a running weighted mean, so learning a set at once or in
//! several batches ends at the same position. Recognition returns the
//! class of the nearest centroid.
//!
//! Clustering output carries no class identity, so unlabeled groups are
//! paired with classes by [`CentroidModel::match_groups`] before merging.

use crate::error::{RecogError, RecogResult};
use shapeclass_region::{FeaturePoint, ShapeDescriptor};

/// Class counts above this are matched greedily instead of exhaustively
const EXACT_MATCH_LIMIT: usize = 8;

/// Mean position of the descriptors learned for one class
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Centroid {
    features: FeaturePoint,
    weight: u64,
}

impl Centroid {
    #[inline]
    pub fn features(&self) -> FeaturePoint {
        self.features
    }

    #[inline]
    pub fn compactness(&self) -> f64 {
        self.features.compactness
    }

    #[inline]
    pub fn elongation(&self) -> f64 {
        self.features.elongation
    }

    /// Number of descriptors merged so far
    #[inline]
    pub fn weight(&self) -> u64 {
        self.weight
    }

    pub fn is_untrained(&self) -> bool {
        self.weight == 0
    }

    /// Merge a group of descriptors into the running mean.
    pub fn absorb(&mut self, group: &[ShapeDescriptor]) {
        if group.is_empty() {
            return;
        }
        let (sum_c, sum_e) = group.iter().fold((0.0, 0.0), |(c, e), d| {
            (c + d.compactness(), e + d.elongation())
        });
        let old = self.weight as f64;
        let total = self.weight + group.len() as u64;
        let t = total as f64;
        self.features = FeaturePoint::new(
            (self.features.compactness * old + sum_c) / t,
            (self.features.elongation * old + sum_e) / t,
        );
        self.weight = total;
    }

    #[inline]
    pub fn distance_to(&self, descriptor: &ShapeDescriptor) -> f64 {
        descriptor.distance_to(&self.features)
    }
}

/// A fixed number of class centroids
#[derive(Debug, Clone, PartialEq)]
pub struct CentroidModel {
    centroids: Vec<Centroid>,
}

impl CentroidModel {
    /// Create an untrained model with `classes` centroids at the origin.
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::InvalidParameter`] if `classes` is 0.
    pub fn new(classes: usize) -> RecogResult<Self> {
        if classes == 0 {
            return Err(RecogError::InvalidParameter(
                "a model needs at least one class".to_string(),
            ));
        }
        Ok(Self {
            centroids: vec![Centroid::default(); classes],
        })
    }

    /// Create a model with one class per group, group `i` trained as class `i`.
    pub fn from_groups(groups: &[Vec<ShapeDescriptor>]) -> RecogResult<Self> {
        let mut model = Self::new(groups.len())?;
        model.learn_groups(groups)?;
        Ok(model)
    }

    pub fn classes(&self) -> usize {
        self.centroids.len()
    }

    pub fn centroids(&self) -> &[Centroid] {
        &self.centroids
    }

    pub fn centroid(&self, class: u32) -> Option<&Centroid> {
        self.centroids.get(class as usize)
    }

    /// True while no class has learned anything.
    pub fn is_untrained(&self) -> bool {
        self.centroids.iter().all(Centroid::is_untrained)
    }

    fn centroid_mut(&mut self, class: u32) -> RecogResult<&mut Centroid> {
        let classes = self.centroids.len();
        self.centroids
            .get_mut(class as usize)
            .ok_or(RecogError::ClassOutOfRange { class, classes })
    }

    /// Merge `group` into the centroid of `class`.
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::ClassOutOfRange`] if `class` is not a class of
    /// this model.
    pub fn learn(&mut self, group: &[ShapeDescriptor], class: u32) -> RecogResult<()> {
        self.centroid_mut(class)?.absorb(group);
        Ok(())
    }

    pub fn learn_one(&mut self, descriptor: &ShapeDescriptor, class: u32) -> RecogResult<()> {
        self.learn(std::slice::from_ref(descriptor), class)
    }

    /// Merge group `i` into class `i` for every group.
    ///
    /// Nothing is learned when there are more groups than classes.
    pub fn learn_groups(&mut self, groups: &[Vec<ShapeDescriptor>]) -> RecogResult<()> {
        if groups.len() > self.centroids.len() {
            return Err(RecogError::InvalidParameter(format!(
                "{} groups for a model with {} classes",
                groups.len(),
                self.centroids.len()
            )));
        }
        for (centroid, group) in self.centroids.iter_mut().zip(groups) {
            centroid.absorb(group);
        }
        Ok(())
    }

    /// Pair every group with a distinct class.
    ///
    /// The pairing minimises the summed distance from each group's mean to
    /// the centroid of its class. Untrained classes cost nothing, so they
    /// take whatever groups the trained classes leave over. An untrained
    /// model pairs group `i` with class `i`. Returns the class of each
    /// group.
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::InvalidParameter`] when there are more groups
    /// than classes.
    pub fn match_groups(&self, groups: &[Vec<ShapeDescriptor>]) -> RecogResult<Vec<u32>> {
        let classes = self.centroids.len();
        if groups.len() > classes {
            return Err(RecogError::InvalidParameter(format!(
                "{} groups for a model with {} classes",
                groups.len(),
                classes
            )));
        }
        if self.is_untrained() {
            return Ok((0..groups.len() as u32).collect());
        }

        let cost: Vec<Vec<f64>> = groups
            .iter()
            .map(|group| {
                let mean = FeaturePoint::mean(group.iter().map(|d| &d.features));
                self.centroids
                    .iter()
                    .map(|c| match mean {
                        Some(m) if !c.is_untrained() => m.distance(&c.features),
                        _ => 0.0,
                    })
                    .collect()
            })
            .collect();

        if classes <= EXACT_MATCH_LIMIT {
            Ok(exact_pairing(&cost, classes))
        } else {
            Ok(greedy_pairing(&cost, classes))
        }
    }

    /// Merge each group into the class [`Self::match_groups`] pairs it with.
    ///
    /// Returns the class of each group. Nothing is learned on error.
    pub fn learn_matched(&mut self, groups: &[Vec<ShapeDescriptor>]) -> RecogResult<Vec<u32>> {
        let pairing = self.match_groups(groups)?;
        for (group, &class) in groups.iter().zip(&pairing) {
            self.centroid_mut(class)?.absorb(group);
        }
        Ok(pairing)
    }

    /// Class of the nearest centroid; ties go to the lowest class.
    pub fn recognize(&self, descriptor: &ShapeDescriptor) -> u32 {
        let mut best = 0;
        let mut best_distance = f64::INFINITY;
        for (class, centroid) in self.centroids.iter().enumerate() {
            let d = centroid.distance_to(descriptor);
            if d < best_distance {
                best = class as u32;
                best_distance = d;
            }
        }
        best
    }

    pub fn recognize_all(&self, descriptors: &[ShapeDescriptor]) -> Vec<u32> {
        descriptors.iter().map(|d| self.recognize(d)).collect()
    }
}

/// Cheapest injective pairing of groups to classes by exhaustive search.
///
/// The identity pairing is the starting bound, so it wins all ties.
fn exact_pairing(cost: &[Vec<f64>], classes: usize) -> Vec<u32> {
    let identity: Vec<u32> = (0..cost.len() as u32).collect();
    let identity_cost = cost.iter().enumerate().map(|(g, row)| row[g]).sum();
    let mut best = (identity_cost, identity);
    let mut taken = vec![false; classes];
    let mut current = Vec::with_capacity(cost.len());
    search_pairing(cost, &mut taken, &mut current, 0.0, &mut best);
    best.1
}

fn search_pairing(
    cost: &[Vec<f64>],
    taken: &mut [bool],
    current: &mut Vec<u32>,
    spent: f64,
    best: &mut (f64, Vec<u32>),
) {
    let group = current.len();
    if group == cost.len() {
        if spent < best.0 {
            *best = (spent, current.clone());
        }
        return;
    }
    for class in 0..taken.len() {
        let total = spent + cost[group][class];
        if taken[class] || total >= best.0 {
            continue;
        }
        taken[class] = true;
        current.push(class as u32);
        search_pairing(cost, taken, current, total, best);
        current.pop();
        taken[class] = false;
    }
}

/// Pairing built by repeatedly taking the cheapest free (group, class) pair.
fn greedy_pairing(cost: &[Vec<f64>], classes: usize) -> Vec<u32> {
    let mut pairs: Vec<(usize, usize)> = (0..cost.len())
        .flat_map(|g| (0..classes).map(move |c| (g, c)))
        .collect();
    pairs.sort_by(|a, b| cost[a.0][a.1].total_cmp(&cost[b.0][b.1]));

    let mut pairing = vec![None; cost.len()];
    let mut taken = vec![false; classes];
    for (group, class) in pairs {
        if pairing[group].is_none() && !taken[class] {
            pairing[group] = Some(class as u32);
            taken[class] = true;
        }
    }
    pairing.into_iter().flatten().collect()
}
