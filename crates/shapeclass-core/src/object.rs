//! Segmented objects

use crate::bounds::Bounds;

/// A labeled region after filtering, with its bounding box and class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Object {
    /// Region label
    pub id: u32,
    /// Bounding box over all pixels sharing the label
    pub bounds: Bounds,
    /// Recognized class, `None` until classified
    pub class: Option<u32>,
}

impl Object {
    /// Create an unclassified object.
    pub fn new(id: u32, bounds: Bounds) -> Self {
        Self {
            id,
            bounds,
            class: None,
        }
    }

    pub fn with_class(mut self, class: u32) -> Self {
        self.class = Some(class);
        self
    }

    #[inline]
    pub fn is_classified(&self) -> bool {
        self.class.is_some()
    }
}
