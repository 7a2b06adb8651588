//! Session export payload for the lip-reading service.
//!
//! The recognition service consumes a recorded session as a nested array of
//! per-frame landmark triples:
//!
//! ```json
//! { "landmarks": [ [ [x, y, z], ... ], ... ] }
//! ```
//!
//! (one inner array per captured frame, one `[x, y, z]` triple per
//! landmark).  Recognition itself is out of scope here; this module only
//! assembles that request body from the frame buffer.

use serde::{Deserialize, Serialize};

use super::buffer::FrameBuffer;

// ---------------------------------------------------------------------------
// SessionExport
// ---------------------------------------------------------------------------

/// Recorded landmark frames in the service's request shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionExport {
    /// Frames → landmarks → `[x, y, z]`.
    pub landmarks: Vec<Vec<[f32; 3]>>,
}

impl SessionExport {
    /// Flatten the buffered frames into the service payload.
    ///
    /// Uses each frame's full landmark array - the service performs its own
    /// lip-region extraction.
    pub fn from_frames(buffer: &FrameBuffer) -> Self {
        let landmarks = buffer
            .frames()
            .iter()
            .map(|frame| {
                frame
                    .landmarks
                    .iter()
                    .map(|p| [p.x, p.y, p.z])
                    .collect()
            })
            .collect();
        Self { landmarks }
    }

    /// Number of exported frames.
    pub fn frame_count(&self) -> usize {
        self.landmarks.len()
    }

    /// Serialize to the JSON request body.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
