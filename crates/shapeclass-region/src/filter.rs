//! Small-object filtering
//!
//! Removes regions whose *boundary length* (see [`crate::boundary`]) is
//! below a threshold. Note that the size of a region is judged by its
//! boundary, not by its area: a long one-pixel-wide line survives a
//! threshold that a compact blob of the same area would not. Survivors are
//! renumbered `0..M` in the order of their original labels.

use crate::boundary::boundary_lengths;
use crate::error::{RegionError, RegionResult};
use shapeclass_core::PixelGrid;
use std::collections::BTreeMap;
use tracing::debug;

/// Default minimum boundary length for a region to be kept
pub const DEFAULT_MIN_BOUNDARY_LENGTH: u32 = 15;

/// Renumber labels to `0..M`, keeping their relative order.
///
/// The k-th smallest label present becomes label k.
pub fn reindex_labels(grid: &PixelGrid) -> PixelGrid {
    let remap: BTreeMap<u32, u32> = grid
        .labels()
        .into_iter()
        .enumerate()
        .map(|(new, old)| (old, new as u32))
        .collect();

    let mut out = grid.clone();
    for px in out.pixels_mut() {
        px.label = px.label.and_then(|l| remap.get(&l).copied());
    }
    out
}

/// Remove regions with a boundary length below `min_boundary`.
///
/// Removed pixels become unlabeled background. The surviving labels are
/// dense and zero-based afterwards.
///
/// # Errors
///
/// Returns [`RegionError::LookupFailure`] if a label has no boundary
/// length, which would mean the grid changed between the two passes.
pub fn filter_by_boundary_length(grid: &PixelGrid, min_boundary: u32) -> RegionResult<PixelGrid> {
    let lengths = boundary_lengths(grid);

    let mut out = grid.clone();
    for px in out.pixels_mut() {
        let Some(label) = px.label else {
            continue;
        };
        let length = *lengths.get(&label).ok_or(RegionError::LookupFailure {
            label,
            stage: "boundary length",
        })?;
        if length < min_boundary {
            px.clear();
        }
    }

    let out = reindex_labels(&out);
    debug!(
        min_boundary,
        before = lengths.len(),
        after = out.label_count(),
        "filtered regions by boundary length"
    );
    Ok(out)
}
