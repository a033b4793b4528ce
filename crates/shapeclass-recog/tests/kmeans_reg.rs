//! K-means regression test
//!
//! Clusters the descriptors of the synthetic training image, which holds
//! three shape families of three shapes each, and checks the partition
//! across many seeds.

use shapeclass_color::{HalfRangeThreshold, binarize};
use shapeclass_recog::kmeans::nearest_centroid;
use shapeclass_recog::{
    CentroidModel, ClusterOptions, KMeans, ShapeDescriptor, SseSelection,
};
use shapeclass_region::{filter_by_boundary_length, label_components, shape_descriptors};
use shapeclass_test::{RegParams, init_tracing, shapes_image};

/// Labels 0-2 are discs, 3-5 rectangles and 6-8 bars, in raster order.
fn family(label: u32) -> u32 {
    label / 3
}

fn training_descriptors() -> Vec<ShapeDescriptor> {
    let binary = binarize(&shapes_image(), &HalfRangeThreshold).expect("binarize");
    let grid = filter_by_boundary_length(&label_components(&binary), 15).expect("filter");
    shape_descriptors(&grid).expect("descriptors")
}

#[test]
fn kmeans_reg() {
    init_tracing();
    let mut rp = RegParams::new("kmeans");

    let descriptors = training_descriptors();
    rp.compare_values(9.0, descriptors.len() as f64, 0.0);
    for d in &descriptors {
        eprintln!(
            "  label {}: compactness {:.4} elongation {:.4}",
            d.label,
            d.compactness(),
            d.elongation()
        );
    }

    // --- Test 1: valid and pure partitions for many seeds ---
    eprintln!("=== Partition validity ===");
    for seed in 0..20 {
        let km = KMeans::new(ClusterOptions::new(3).with_attempts(30).with_seed(seed))
            .expect("options");
        let attempt = km.best_attempt(&descriptors).expect("cluster");

        rp.compare_values(3.0, attempt.groups.len() as f64, 0.0);
        rp.check(attempt.groups.iter().all(|g| !g.is_empty()), "no empty group");
        let total: usize = attempt.groups.iter().map(Vec::len).sum();
        rp.compare_values(descriptors.len() as f64, total as f64, 0.0);

        let pure = attempt.groups.iter().all(|g| {
            let f = family(g[0].label);
            g.iter().all(|d| family(d.label) == f)
        });
        rp.check(pure, "each group holds a single shape family");

        // Every descriptor sits with its nearest centroid
        for (i, group) in attempt.groups.iter().enumerate() {
            for d in group {
                let best = nearest_centroid(&d.features, &attempt.centroids);
                rp.compare_values(
                    d.distance_to(&attempt.centroids[best]),
                    d.distance_to(&attempt.centroids[i]),
                    1e-12,
                );
            }
        }
    }

    // --- Test 2: reproducibility ---
    eprintln!("=== Reproducibility ===");
    let options = ClusterOptions::new(3).with_attempts(30).with_seed(1234);
    let first = KMeans::new(options.clone()).expect("options").cluster(&descriptors).expect("cluster");
    let second = KMeans::new(options).expect("options").cluster(&descriptors).expect("cluster");
    rp.check(first == second, "same seed gives the same groups");

    // --- Test 3: selection rules ---
    eprintln!("=== Selection rules ===");
    let base = ClusterOptions::new(3).with_attempts(30).with_seed(77);
    let min = KMeans::new(base.clone()).expect("options").best_attempt(&descriptors).expect("min");
    let max = KMeans::new(base.with_selection(SseSelection::Maximal))
        .expect("options")
        .best_attempt(&descriptors)
        .expect("max");
    eprintln!("  minimal sse {:.6}, maximal sse {:.6}", min.sse, max.sse);
    rp.check(min.sse <= max.sse, "minimal rule never beats the maximal one");

    // --- Test 4: insufficient samples ---
    eprintln!("=== Insufficient samples ===");
    let km = KMeans::new(ClusterOptions::new(10).with_seed(0)).expect("options");
    rp.check(km.cluster(&descriptors).is_err(), "9 shapes cannot form 10 groups");

    assert!(rp.cleanup(), "kmeans regression test failed");
}

#[test]
fn centroid_reg() {
    let mut rp = RegParams::new("centroid");
    let descriptors = training_descriptors();

    // --- Test 1: merge order does not matter ---
    eprintln!("=== Merge associativity ===");
    let mut whole = CentroidModel::new(1).expect("model");
    whole.learn(&descriptors, 0).expect("learn");
    for split in 1..descriptors.len() {
        let mut parts = CentroidModel::new(1).expect("model");
        parts.learn(&descriptors[..split], 0).expect("learn");
        parts.learn(&descriptors[split..], 0).expect("learn");
        let a = whole.centroids()[0];
        let b = parts.centroids()[0];
        rp.compare_values(a.compactness(), b.compactness(), 1e-12);
        rp.compare_values(a.elongation(), b.elongation(), 1e-12);
        rp.compare_values(a.weight() as f64, b.weight() as f64, 0.0);
    }

    // One at a time gives the same point
    let mut single = CentroidModel::new(1).expect("model");
    for d in &descriptors {
        single.learn_one(d, 0).expect("learn");
    }
    rp.compare_values(
        whole.centroids()[0].compactness(),
        single.centroids()[0].compactness(),
        1e-12,
    );

    // --- Test 2: nearest-centroid is exact ---
    eprintln!("=== Nearest centroid ===");
    let groups: Vec<Vec<ShapeDescriptor>> = (0..3)
        .map(|f| descriptors.iter().filter(|d| family(d.label) == f).copied().collect())
        .collect();
    let model = CentroidModel::from_groups(&groups).expect("model");
    for d in &descriptors {
        let class = model.recognize(d);
        let chosen = model.centroids()[class as usize].distance_to(d);
        let closest = model
            .centroids()
            .iter()
            .map(|c| c.distance_to(d))
            .fold(f64::INFINITY, f64::min);
        rp.compare_values(closest, chosen, 0.0);
        rp.compare_values(family(d.label) as f64, class as f64, 0.0);
    }

    assert!(rp.cleanup(), "centroid regression test failed");
}
