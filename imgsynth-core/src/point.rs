//! Point types and bounding box helpers

use nalgebra::{Point3, Vector3};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// Axis-aligned bounding box as a `(min, max)` corner pair
pub type BoundingBox = (Point3f, Point3f);

/// Height (z extent) of a bounding box
pub fn bbox_height(bbox: &BoundingBox) -> f32 {
    bbox.1.z - bbox.0.z
}

/// Smallest bounding box containing all of `points`
///
/// Returns a degenerate box at the origin for an empty iterator.
pub fn bounding_box_of<'a, I>(points: I) -> BoundingBox
where
    I: IntoIterator<Item = &'a Point3f>,
{
    let mut iter = points.into_iter();
    let first = match iter.next() {
        Some(p) => *p,
        None => return (Point3f::origin(), Point3f::origin()),
    };

    let mut min = first;
    let mut max = first;
    for p in iter {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        min.z = min.z.min(p.z);

        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
        max.z = max.z.max(p.z);
    }

    (min, max)
}
