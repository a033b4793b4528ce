//! shapeclass-recog - Shape clustering and recognition
//!
//! This crate turns shape descriptors into classes:
//!
//! - **K-means** - Unsupervised grouping with random restarts
//! - **Centroid model** - Incremental weighted-mean training and
//!   nearest-centroid recognition
//! - **Image analyzer** - The full pipeline from a color image to
//!   classified objects
//!
//! # Examples
//!
//! ```
//! use shapeclass_recog::{CentroidModel, ShapeDescriptor};
//!
//! let round = vec![ShapeDescriptor::new(0, 0.10, 0.98)];
//! let thin = vec![ShapeDescriptor::new(1, 0.45, 0.01)];
//! let model = CentroidModel::from_groups(&[round, thin]).unwrap();
//!
//! assert_eq!(model.recognize(&ShapeDescriptor::new(2, 0.12, 0.90)), 0);
//! assert_eq!(model.recognize(&ShapeDescriptor::new(3, 0.40, 0.02)), 1);
//! ```

pub mod analyzer;
pub mod centroid;
mod error;
pub mod kmeans;

pub use error::{RecogError, RecogResult};

pub use analyzer::{Analysis, AnalyzerOptions, ImageAnalyzer, Reconstruction};
pub use centroid::{Centroid, CentroidModel};
pub use kmeans::{
    Attempt, ClusterOptions, DEFAULT_ATTEMPTS, DEFAULT_CLUSTERS, DEFAULT_MAX_ITERATIONS, KMeans,
    SseSelection, derive_seed, run_attempt, select_attempt,
};
pub use shapeclass_region::{FeaturePoint, ShapeDescriptor};

// Re-export core for convenience
pub use shapeclass_core;
