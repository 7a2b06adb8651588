//! Point extraction from connector tables.
//!
//! A connector table references the same landmark index many times (every
//! index appears in up to two segment pairs per contour).  Centroid and
//! bounding-box math must see each point exactly once, in a reproducible
//! order, so extraction dedups the referenced indices and visits them in
//! ascending index order.  Pure functions, no state.

use std::collections::BTreeSet;

use super::landmark::Landmark;

// ---------------------------------------------------------------------------
// Index extraction
// ---------------------------------------------------------------------------

/// Unique landmark indices referenced by `connections`, ascending.
///
/// Deterministic: the same connector table always yields the same index
/// sequence regardless of pair order.
///
/// # Example
///
/// ```
/// use lip_replay::geometry::connector_indices;
///
/// let indices = connector_indices(&[(5, 2), (2, 9), (9, 5)]);
/// assert_eq!(indices, vec![2, 5, 9]);
/// ```
pub fn connector_indices(connections: &[(usize, usize)]) -> Vec<usize> {
    let unique: BTreeSet<usize> = connections.iter().flat_map(|&(a, b)| [a, b]).collect();
    unique.into_iter().collect()
}

/// Positions of the unique indices referenced by `connections`.
///
/// Indices outside `landmarks` are skipped rather than erroring, so a
/// detector that delivers a truncated array degrades to a partial point set
/// instead of a crash.  Output order follows [`connector_indices`].
pub fn extract_points(landmarks: &[Landmark], connections: &[(usize, usize)]) -> Vec<Landmark> {
    connector_indices(connections)
        .into_iter()
        .filter_map(|i| landmarks.get(i).copied())
        .collect()
}

// ---------------------------------------------------------------------------
// Point-set geometry
// ---------------------------------------------------------------------------

/// Planar centroid of a point set, or `None` when empty.
pub fn centroid(points: &[Landmark]) -> Option<(f32, f32)> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f32;
    let (sx, sy) = points
        .iter()
        .fold((0.0_f32, 0.0_f32), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some((sx / n, sy / n))
}

/// Planar bounding box `[x_min, y_min, x_max, y_max]`, or `None` when empty.
pub fn bounding_box(points: &[Landmark]) -> Option<[f32; 4]> {
    if points.is_empty() {
        return None;
    }
    let mut bbox = [f32::MAX, f32::MAX, f32::MIN, f32::MIN];
    for p in points {
        bbox[0] = bbox[0].min(p.x);
        bbox[1] = bbox[1].min(p.y);
        bbox[2] = bbox[2].max(p.x);
        bbox[3] = bbox[3].max(p.y);
    }
    Some(bbox)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
