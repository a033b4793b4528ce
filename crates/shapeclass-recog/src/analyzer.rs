//! End-to-end image analysis
//!
//! [`ImageAnalyzer`] runs the whole pipeline on a color image:
//! luminance reduction and binarization, connected-component labeling,
//! boundary-length filtering, shape descriptors and finally either
//! clustering (training) or nearest-centroid recognition. The analyzer owns
//! its [`CentroidModel`], so successive training images accumulate into
//! the same classes.

use crate::centroid::CentroidModel;
use crate::error::RecogResult;
use crate::kmeans::{ClusterOptions, KMeans};
use image::{DynamicImage, RgbImage};
use shapeclass_color::{
    DEFAULT_PALETTE, ThresholdStrategy, binarize, reconstruct_classes, reconstruct_labels,
};
use shapeclass_core::{Object, PixelGrid};
use shapeclass_region::{
    DEFAULT_MIN_BOUNDARY_LENGTH, RegionError, ShapeDescriptor, assign_classes, extract_objects,
    filter_by_boundary_length, label_components, shape_descriptors,
};
use std::collections::HashMap;
use tracing::{info, warn};

/// Which display image to render alongside an analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reconstruction {
    /// No image
    #[default]
    None,
    /// One palette color per region label
    ByLabel,
    /// One palette color per assigned class
    ByClass,
}

/// Options for [`ImageAnalyzer`]
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerOptions {
    /// Number of shape classes; also the k-means group count
    pub classes: usize,
    /// Regions with a shorter boundary are discarded
    pub min_boundary_length: u32,
    /// How the binarization threshold is chosen
    pub threshold: ThresholdStrategy,
    /// K-means settings; `clustering.clusters` is kept equal to `classes`
    pub clustering: ClusterOptions,
    /// Optional display image
    pub reconstruction: Reconstruction,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        let clustering = ClusterOptions::default();
        Self {
            classes: clustering.clusters,
            min_boundary_length: DEFAULT_MIN_BOUNDARY_LENGTH,
            threshold: ThresholdStrategy::default(),
            clustering,
            reconstruction: Reconstruction::default(),
        }
    }
}

impl AnalyzerOptions {
    pub fn with_classes(mut self, classes: usize) -> Self {
        self.classes = classes;
        self.clustering.clusters = classes;
        self
    }

    pub fn with_min_boundary_length(mut self, min_boundary_length: u32) -> Self {
        self.min_boundary_length = min_boundary_length;
        self
    }

    pub fn with_threshold(mut self, threshold: ThresholdStrategy) -> Self {
        self.threshold = threshold;
        self
    }

    /// Replace the clustering settings; the group count follows `classes`.
    pub fn with_clustering(mut self, clustering: ClusterOptions) -> Self {
        self.clustering = ClusterOptions {
            clusters: self.classes,
            ..clustering
        };
        self
    }

    pub fn with_reconstruction(mut self, reconstruction: Reconstruction) -> Self {
        self.reconstruction = reconstruction;
        self
    }

    /// Fix the clustering seed for reproducible training.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.clustering.seed = Some(seed);
        self
    }
}

/// Result of analysing one image
#[derive(Debug, Clone)]
pub struct Analysis {
    /// One object per surviving region, with its class
    pub objects: Vec<Object>,
    /// Shape descriptors, sorted by label
    pub descriptors: Vec<ShapeDescriptor>,
    /// Display image, when requested
    pub reconstruction: Option<RgbImage>,
}

impl Analysis {
    /// Class of the object with label `id`
    pub fn class_of(&self, id: u32) -> Option<u32> {
        self.objects.iter().find(|o| o.id == id).and_then(|o| o.class)
    }
}

/// Segmentation, training and recognition over color images
#[derive(Debug, Clone)]
pub struct ImageAnalyzer {
    options: AnalyzerOptions,
    kmeans: KMeans,
    model: CentroidModel,
}

impl ImageAnalyzer {
    /// Create an analyzer with an untrained model.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RecogError::InvalidParameter`] if `classes` is 0 or
    /// the clustering settings are invalid.
    pub fn new(options: AnalyzerOptions) -> RecogResult<Self> {
        let clustering = ClusterOptions {
            clusters: options.classes,
            ..options.clustering.clone()
        };
        let kmeans = KMeans::new(clustering)?;
        let model = CentroidModel::new(options.classes)?;
        Ok(Self {
            options,
            kmeans,
            model,
        })
    }

    pub fn options(&self) -> &AnalyzerOptions {
        &self.options
    }

    pub fn model(&self) -> &CentroidModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut CentroidModel {
        &mut self.model
    }

    /// Binarize, label and filter `img`.
    ///
    /// The returned grid carries dense labels `0..M`, one per surviving
    /// region.
    pub fn segment(&self, img: &DynamicImage) -> RecogResult<PixelGrid> {
        let binary = binarize(img, &self.options.threshold)?;
        let labeled = label_components(&binary);
        let filtered = filter_by_boundary_length(&labeled, self.options.min_boundary_length)?;
        Ok(filtered)
    }

    /// Segment `img` and compute a descriptor for every surviving region.
    pub fn signals(&self, img: &DynamicImage) -> RecogResult<(PixelGrid, Vec<ShapeDescriptor>)> {
        let grid = self.segment(img)?;
        let descriptors = shape_descriptors(&grid)?;
        Ok((grid, descriptors))
    }

    /// Cluster the shapes of `img` into `classes` groups and merge each
    /// group into a class of the model.
    ///
    /// Groups are paired with classes by [`CentroidModel::match_groups`],
    /// so a trained model keeps its class numbering across images.
    ///
    /// # Errors
    ///
    /// Fails with [`crate::RecogError::InsufficientSamples`] when the image
    /// holds fewer shapes than classes and with
    /// [`crate::RecogError::ClusteringFailed`] when no attempt produced
    /// non-empty groups. A shape missing from every group is a
    /// [`RegionError::LookupFailure`]. The model is left untouched on
    /// failure.
    pub fn learn(&mut self, img: &DynamicImage) -> RecogResult<Analysis> {
        let (grid, descriptors) = self.signals(img)?;
        let groups = self.kmeans.cluster(&descriptors)?;

        let membership = group_membership(&descriptors, &groups)?;
        let pairing = self.model.learn_matched(&groups)?;
        info!(
            objects = descriptors.len(),
            classes = groups.len(),
            ?pairing,
            "clustering performed"
        );

        let classes: Vec<u32> = membership.iter().map(|&g| pairing[g]).collect();
        self.finish(&grid, descriptors, &classes)
    }

    /// Merge every shape of `img` into the single class `class`.
    pub fn learn_labeled(&mut self, img: &DynamicImage, class: u32) -> RecogResult<Analysis> {
        let (grid, descriptors) = self.signals(img)?;
        self.model.learn(&descriptors, class)?;
        info!(objects = descriptors.len(), class, "learned labeled shapes");
        let classes = vec![class; descriptors.len()];
        self.finish(&grid, descriptors, &classes)
    }

    /// Classify every shape of `img` by its nearest centroid.
    ///
    /// An untrained model still answers, with every shape in class 0.
    pub fn recognize(&self, img: &DynamicImage) -> RecogResult<Analysis> {
        if self.model.is_untrained() {
            warn!("recognizing with an untrained model");
        }
        let (grid, descriptors) = self.signals(img)?;
        let classes = self.model.recognize_all(&descriptors);
        info!(objects = descriptors.len(), "recognition performed");
        self.finish(&grid, descriptors, &classes)
    }

    fn finish(
        &self,
        grid: &PixelGrid,
        descriptors: Vec<ShapeDescriptor>,
        classes: &[u32],
    ) -> RecogResult<Analysis> {
        let mut objects = extract_objects(grid);
        assign_classes(&mut objects, &descriptors, classes)?;

        let reconstruction = match self.options.reconstruction {
            Reconstruction::None => None,
            Reconstruction::ByLabel => Some(reconstruct_labels(grid, &DEFAULT_PALETTE)?),
            Reconstruction::ByClass => Some(reconstruct_classes(grid, &objects, &DEFAULT_PALETTE)?),
        };

        Ok(Analysis {
            objects,
            descriptors,
            reconstruction,
        })
    }
}

/// Index of the group holding each descriptor, in descriptor order.
fn group_membership(
    descriptors: &[ShapeDescriptor],
    groups: &[Vec<ShapeDescriptor>],
) -> Result<Vec<usize>, RegionError> {
    let group_of: HashMap<u32, usize> = groups
        .iter()
        .enumerate()
        .flat_map(|(index, group)| group.iter().map(move |d| (d.label, index)))
        .collect();
    descriptors
        .iter()
        .map(|d| {
            group_of.get(&d.label).copied().ok_or(RegionError::LookupFailure {
                label: d.label,
                stage: "cluster",
            })
        })
        .collect()
}
