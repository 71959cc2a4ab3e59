//! # Layout
//!
//! Index arithmetic for multi-dimensional SDRs.
//!
//! Two orders are in play and they are deliberately NOT unified:
//!
//! - **Storage order**: the dense buffer is laid out in declaration order,
//!   last dimension varying fastest. Dense and sparse assignment use it
//!   directly (flat position `i` is buffer slot `i`).
//! - **Engine order**: coordinate lookups are resolved against the reversed
//!   shape. The remote engine writes its buffers column-major, so a
//!   coordinate tuple `(c0, c1, .., cn)` lands at the row-major position of
//!   `(cn, .., c1, c0)` over the shape `(dn, .., d1, d0)`.
//!
//! Collapsing both into one stride table silently breaks interoperability
//! with engine payloads; keep them separate.

/// Row-major strides for `shape` (last dimension has stride 1).
///
/// # Example
/// ```
/// use htm_rest::core::layout::row_major_strides;
/// assert_eq!(row_major_strides(&[2, 3, 4]), vec![12, 4, 1]);
/// ```
pub fn row_major_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![1; shape.len()];
    let mut running = 1usize;
    for axis in (0..shape.len()).rev() {
        strides[axis] = running;
        running = running.saturating_mul(shape[axis]);
    }
    strides
}

/// Flat storage position of `coordinates` under engine (axis-reversed) order.
///
/// Returns `None` when the coordinate count does not match the shape or any
/// coordinate is outside its axis bound. Bounds are checked against the
/// declared axis, i.e. `coordinates[d] < shape[d]`.
pub fn engine_flat_index(shape: &[usize], coordinates: &[usize]) -> Option<usize> {
    if coordinates.len() != shape.len() {
        return None;
    }
    if coordinates.iter().zip(shape).any(|(&c, &bound)| c >= bound) {
        return None;
    }

    let reversed_shape: Vec<usize> = shape.iter().rev().copied().collect();
    let strides = row_major_strides(&reversed_shape);

    Some(
        coordinates
            .iter()
            .rev()
            .zip(&strides)
            .map(|(c, stride)| c * stride)
            .sum(),
    )
}
