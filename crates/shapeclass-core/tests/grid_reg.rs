//! Pixel grid regression test
//!
//! Construction rules, access and label bookkeeping of `PixelGrid`, plus
//! `Bounds` growth.

use shapeclass_core::{Bounds, Error, Pixel, PixelGrid, Point};
use shapeclass_test::{RegParams, grid_from_ascii, labeled_grid_from_ascii};

#[test]
fn grid_reg() {
    let mut rp = RegParams::new("grid");

    // --- Test 1: construction ---
    eprintln!("=== Construction ===");
    let grid = PixelGrid::new(7, 3).expect("new");
    rp.compare_values(21.0, grid.len() as f64, 0.0);
    rp.check(grid.pixels().iter().all(|p| *p == Pixel::background()), "starts as background");
    rp.check(PixelGrid::new(0, 0).expect("empty").is_empty(), "0x0 allowed");
    rp.check(
        matches!(PixelGrid::new(0, 4), Err(Error::InvalidDimension { width: 0, height: 4 })),
        "zero width rejected",
    );
    rp.check(
        matches!(
            PixelGrid::from_rows(vec![vec![Pixel::background(); 3], vec![Pixel::background(); 2]]),
            Err(Error::RaggedRows { row: 1, expected: 3, actual: 2 })
        ),
        "ragged rows rejected",
    );

    // --- Test 2: ASCII fixtures follow the row-major layout ---
    eprintln!("=== Row-major layout ===");
    let grid = grid_from_ascii(&["#..", "..#"]).expect("fixture");
    rp.check(grid.get(0, 0).is_some_and(|p| p.is_foreground()), "(0, 0) set");
    rp.check(grid.get(2, 1).is_some_and(|p| p.is_foreground()), "(2, 1) set");
    rp.check(grid.get(3, 0).is_none(), "x out of range");
    rp.compare_values(2.0, grid.count_foreground() as f64, 0.0);
    let rows: Vec<usize> = grid.rows().map(|r| r.len()).collect();
    rp.check(rows == vec![3, 3], "two rows of three");

    // --- Test 3: label bookkeeping ---
    eprintln!("=== Labels ===");
    let labeled = labeled_grid_from_ascii(&["3.3", ".1.", "a.."]).expect("fixture");
    rp.check(labeled.labels() == vec![1, 3, 10], "sorted distinct labels");
    rp.compare_values(3.0, labeled.label_count() as f64, 0.0);
    rp.check(labeled.label_at(0, 2) == Some(10), "base-36 digit");
    let stripped = labeled.without_labels();
    rp.compare_values(0.0, stripped.label_count() as f64, 0.0);
    rp.compare_values(
        labeled.count_foreground() as f64,
        stripped.count_foreground() as f64,
        0.0,
    );

    let mut grid = labeled.clone();
    rp.check(grid.set(3, 0, Pixel::foreground()).is_err(), "set out of range");
    if let Some(p) = grid.get_mut(1, 1) {
        p.clear();
    }
    rp.check(grid.label_at(1, 1).is_none(), "cleared pixel unlabeled");
    rp.check(grid != labeled, "mutation is visible");

    // --- Test 4: bounds ---
    eprintln!("=== Bounds ===");
    let mut b = Bounds::from_point(Point::new(4, 4));
    for p in [Point::new(2, 6), Point::new(5, 3)] {
        b.extend(p);
    }
    rp.check(b.left_top == Point::new(2, 3), "left top");
    rp.check(b.right_bottom == Point::new(5, 6), "right bottom");
    rp.compare_values(4.0, b.width() as f64, 0.0);
    rp.compare_values(4.0, b.height() as f64, 0.0);
    rp.check(b.contains(Point::new(3, 5)), "inside");
    rp.check(!b.contains(Point::new(6, 5)), "outside");

    assert!(rp.cleanup(), "grid regression test failed");
}
