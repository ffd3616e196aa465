//! Spatial containment check for new trees.

/// Returns `true` when a tree at `(x, y)` lies on an estate of the given
/// `length` × `width`.
///
/// Only the upper bounds are checked. Lower bounds and height ranges belong
/// to request validation, which runs before the estate is loaded.
pub fn validate_placement(length: i32, width: i32, x: i32, y: i32) -> bool {
    x <= length && y <= width
}
