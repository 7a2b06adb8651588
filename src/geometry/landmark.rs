//! Landmark type and the mouth-region topology of the face-mesh detector.
//!
//! The detector delivers a fixed index space of [`FACE_MESH_LANDMARKS`]
//! normalized points per callback.  The mouth region is described by
//! [`LIP_CONNECTIONS`], the detector's lip connector table: pairs of landmark
//! indices whose connecting segments trace the outer and inner lip contours.
//!
//! Anchor landmarks:
//!
//! - [`MOUTH_CORNER_LEFT`]  (index 61)  - left corner of the outer lip
//! - [`MOUTH_CORNER_RIGHT`] (index 291) - right corner of the outer lip
//!
//! These two corners drive the similarity transform in
//! [`crate::geometry::SimilarityTransform`].

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Landmark
// ---------------------------------------------------------------------------

/// A single detector landmark in normalized coordinates.
///
/// `x` and `y` are conceptually in `[0.0, 1.0]` relative to the detector's
/// input frame.  `z` is the detector-relative depth and is `0.0` when the
/// detector is 2D-only.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    /// Create a 3D landmark.
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Create a 2D landmark (`z = 0.0`).
    pub fn new_2d(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Planar (x/y) distance to another landmark.
    ///
    /// Depth is ignored: the stabilization transform operates on the image
    /// plane only.
    pub fn distance_to(&self, other: &Landmark) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Planar midpoint between two landmarks (depth averaged).
    pub fn midpoint(&self, other: &Landmark) -> Landmark {
        Landmark {
            x: (self.x + other.x) * 0.5,
            y: (self.y + other.y) * 0.5,
            z: (self.z + other.z) * 0.5,
        }
    }
}

// ---------------------------------------------------------------------------
// Face-mesh topology constants
// ---------------------------------------------------------------------------

/// Number of landmarks in a full face-mesh result.
///
/// Ingest treats shorter arrays as "no face this tick" - the lip index space
/// below is only meaningful against a full mesh.
pub const FACE_MESH_LANDMARKS: usize = 468;

/// Index of the left mouth-corner anchor landmark.
pub const MOUTH_CORNER_LEFT: usize = 61;

/// Index of the right mouth-corner anchor landmark.
pub const MOUTH_CORNER_RIGHT: usize = 291;

/// Lip connector table of the face-mesh detector.
///
/// Each pair `(a, b)` is a segment of the lip outline.  The first two rows
/// trace the outer contour (clockwise from the left corner along the lower
/// then upper lip), the last two rows the inner contour.
pub const LIP_CONNECTIONS: &[(usize, usize)] = &[
    // Outer lip, lower arc
    (61, 146),
    (146, 91),
    (91, 181),
    (181, 84),
    (84, 17),
    (17, 314),
    (314, 405),
    (405, 321),
    (321, 375),
    (375, 291),
    // Outer lip, upper arc
    (61, 185),
    (185, 40),
    (40, 39),
    (39, 37),
    (37, 0),
    (0, 267),
    (267, 269),
    (269, 270),
    (270, 409),
    (409, 291),
    // Inner lip, lower arc
    (78, 95),
    (95, 88),
    (88, 178),
    (178, 87),
    (87, 14),
    (14, 317),
    (317, 402),
    (402, 318),
    (318, 324),
    (324, 308),
    // Inner lip, upper arc
    (78, 191),
    (191, 80),
    (80, 81),
    (81, 82),
    (82, 13),
    (13, 312),
    (312, 311),
    (311, 310),
    (310, 415),
    (415, 308),
];

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
