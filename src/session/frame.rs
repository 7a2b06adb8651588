//! The captured frame: one timestamped snapshot of mouth geometry.

use serde::{Deserialize, Serialize};

use crate::geometry::{extract_points, Landmark, LIP_CONNECTIONS};

// ---------------------------------------------------------------------------
// Frame
// ---------------------------------------------------------------------------

/// One buffered snapshot of mouth-region geometry.
///
/// `points` is the deduplicated, ascending-index lip subset used for
/// centroid/bounding-box math; `landmarks` is the full positional array the
/// connector table indexes into for rendering.  `t` is milliseconds relative
/// to the first captured frame of the session.
///
/// Frames store **raw** captured geometry - live smoothing is never applied
/// to buffered data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Unique lip points in ascending index order.
    pub points: Vec<Landmark>,
    /// Full landmark array as delivered by the detector.
    pub landmarks: Vec<Landmark>,
    /// Milliseconds since the session's first captured frame.
    pub t: f64,
}

impl Frame {
    /// Build a frame from a raw detector array, extracting the lip subset.
    pub fn capture(landmarks: &[Landmark], t: f64) -> Self {
        Self {
            points: extract_points(landmarks, LIP_CONNECTIONS),
            landmarks: landmarks.to_vec(),
            t,
        }
    }
}

// ---------------------------------------------------------------------------
// LiveFrame
// ---------------------------------------------------------------------------

/// Smoothed geometry for the live (non-recorded) overlay.
///
/// Produced by [`crate::session::SessionController::ingest`] on every tick
/// with a detected face, whether or not the session is recording.  Unlike
/// [`Frame`], this geometry has the live EMA smoothing applied and carries no
/// timestamp - it is drawn immediately and discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveFrame {
    /// Unique lip points in ascending index order (smoothed).
    pub points: Vec<Landmark>,
    /// Full landmark array (smoothed).
    pub landmarks: Vec<Landmark>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{connector_indices, FACE_MESH_LANDMARKS};

    fn mesh() -> Vec<Landmark> {
        (0..FACE_MESH_LANDMARKS)
            .map(|i| Landmark::new_2d(i as f32 * 1e-3, 0.5))
            .collect()
    }

    #[test]
    fn capture_extracts_lip_subset() {
        let frame = Frame::capture(&mesh(), 42.0);
        assert_eq!(frame.landmarks.len(), FACE_MESH_LANDMARKS);
        assert_eq!(frame.points.len(), connector_indices(LIP_CONNECTIONS).len());
        assert_eq!(frame.t, 42.0);
    }

    #[test]
    fn points_are_positions_of_lip_indices() {
        let landmarks = mesh();
        let frame = Frame::capture(&landmarks, 0.0);
        let indices = connector_indices(LIP_CONNECTIONS);
        for (point, idx) in frame.points.iter().zip(indices) {
            assert_eq!(*point, landmarks[idx]);
        }
    }

    #[test]
    fn frame_serde_round_trip() {
        let frame = Frame::capture(&mesh(), 33.0);
        let json = serde_json::to_string(&frame).unwrap();
        let back: Frame = serde_json::from_str(&json).unwrap();
        assert_eq!(frame, back);
    }
}
