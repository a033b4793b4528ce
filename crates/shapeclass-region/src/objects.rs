//! Object extraction
//!
//! Turns a filtered, labeled grid into one [`Object`] per label with the
//! bounding box of its pixels.

use crate::error::{RegionError, RegionResult};
use crate::signals::ShapeDescriptor;
use shapeclass_core::{Bounds, Object, PixelGrid, Point};
use std::collections::BTreeMap;

/// Bounding box of every label present in the grid
pub fn component_bounds(grid: &PixelGrid) -> BTreeMap<u32, Bounds> {
    let mut bounds: BTreeMap<u32, Bounds> = BTreeMap::new();
    for (x, y, px) in grid.enumerate() {
        if let Some(label) = px.label {
            let p = Point::new(x, y);
            bounds
                .entry(label)
                .and_modify(|b| b.extend(p))
                .or_insert_with(|| Bounds::from_point(p));
        }
    }
    bounds
}

/// One unclassified object per label, sorted by label.
pub fn extract_objects(grid: &PixelGrid) -> Vec<Object> {
    component_bounds(grid)
        .into_iter()
        .map(|(id, bounds)| Object::new(id, bounds))
        .collect()
}

/// Attach `classes[i]` to the object whose id is `descriptors[i].label`.
///
/// # Errors
///
/// Returns [`RegionError::InvalidParameters`] if the two slices differ in
/// length and [`RegionError::LookupFailure`] if a descriptor has no object.
pub fn assign_classes(
    objects: &mut [Object],
    descriptors: &[ShapeDescriptor],
    classes: &[u32],
) -> RegionResult<()> {
    if descriptors.len() != classes.len() {
        return Err(RegionError::InvalidParameters(format!(
            "{} descriptors but {} classes",
            descriptors.len(),
            classes.len()
        )));
    }

    for (descriptor, &class) in descriptors.iter().zip(classes) {
        let label = descriptor.label;
        let object = objects
            .iter_mut()
            .find(|o| o.id == label)
            .ok_or(RegionError::LookupFailure {
                label,
                stage: "object",
            })?;
        object.class = Some(class);
    }
    Ok(())
}
