//! Stabilized mouth-outline rendering contract.
//!
//! The engine exposes exactly one thing to the rendering layer: given one
//! frame's landmark array and a target surface size, produce a centered,
//! scale-corrected, rotation-corrected outline the host can stroke onto its
//! canvas.  Works identically for buffered frames (playback) and
//! [`crate::session::LiveFrame`]s (live overlay), and for any canvas size -
//! the similarity transform is recomputed per call, never baked into stored
//! geometry.

use crate::config::RenderConfig;
use crate::geometry::{
    Landmark, SimilarityTransform, LIP_CONNECTIONS, MOUTH_CORNER_LEFT, MOUTH_CORNER_RIGHT,
};

// ---------------------------------------------------------------------------
// CanvasSize / MouthOutline
// ---------------------------------------------------------------------------

/// Target render surface dimensions, pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

impl CanvasSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// One stroked segment in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: (f32, f32),
    pub to: (f32, f32),
}

/// A renderable mouth outline: connector segments in canvas space.
#[derive(Debug, Clone, PartialEq)]
pub struct MouthOutline {
    pub segments: Vec<Segment>,
}

// ---------------------------------------------------------------------------
// render_outline
// ---------------------------------------------------------------------------

/// Project a frame's landmarks into a stabilized outline on `canvas`.
///
/// The mouth is centered on the canvas, its corner-to-corner axis is
/// horizontal, and its width is `canvas.width * mouth_width_fraction`.
/// Returns `None` when the landmark array does not cover the mouth-corner
/// anchors (no face, truncated mesh).
pub fn render_outline(
    landmarks: &[Landmark],
    canvas: CanvasSize,
    config: &RenderConfig,
) -> Option<MouthOutline> {
    let left = landmarks.get(MOUTH_CORNER_LEFT)?;
    let right = landmarks.get(MOUTH_CORNER_RIGHT)?;

    let target_width = canvas.width * config.mouth_width_fraction;
    let transform = SimilarityTransform::between(left, right, target_width);

    let cx = canvas.width * 0.5;
    let cy = canvas.height * 0.5;
    let project = |p: &Landmark| {
        let (x, y) = transform.apply(p);
        (cx + x, cy + y)
    };

    let segments = LIP_CONNECTIONS
        .iter()
        .filter_map(|&(a, b)| {
            let from = landmarks.get(a)?;
            let to = landmarks.get(b)?;
            Some(Segment {
                from: project(from),
                to: project(to),
            })
        })
        .collect();

    Some(MouthOutline { segments })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::FACE_MESH_LANDMARKS;

    fn mesh() -> Vec<Landmark> {
        let mut landmarks: Vec<Landmark> = (0..FACE_MESH_LANDMARKS)
            .map(|i| Landmark::new_2d(0.5, 0.5 + i as f32 * 1e-5))
            .collect();
        landmarks[MOUTH_CORNER_LEFT] = Landmark::new_2d(0.4, 0.6);
        landmarks[MOUTH_CORNER_RIGHT] = Landmark::new_2d(0.6, 0.6);
        landmarks
    }

    #[test]
    fn outline_covers_every_connector() {
        let outline =
            render_outline(&mesh(), CanvasSize::new(640.0, 480.0), &RenderConfig::default())
                .unwrap();
        assert_eq!(outline.segments.len(), LIP_CONNECTIONS.len());
    }

    #[test]
    fn corners_land_centered_at_target_width() {
        let canvas = CanvasSize::new(640.0, 480.0);
        let config = RenderConfig::default(); // 0.5 → 320 px mouth
        let landmarks = mesh();
        let outline = render_outline(&landmarks, canvas, &config).unwrap();

        // The corner-to-corner span must equal the target width, centered
        let xs: Vec<f32> = outline
            .segments
            .iter()
            .flat_map(|s| [s.from.0, s.to.0])
            .collect();
        let min = xs.iter().cloned().fold(f32::MAX, f32::min);
        let max = xs.iter().cloned().fold(f32::MIN, f32::max);
        assert!((min - 160.0).abs() < 1.0, "min x = {min}");
        assert!((max - 480.0).abs() < 1.0, "max x = {max}");
    }

    #[test]
    fn same_frame_renders_at_any_canvas_size() {
        let landmarks = mesh();
        let small = render_outline(&landmarks, CanvasSize::new(100.0, 100.0), &RenderConfig::default())
            .unwrap();
        let large = render_outline(&landmarks, CanvasSize::new(1000.0, 1000.0), &RenderConfig::default())
            .unwrap();
        // Same topology, scaled geometry
        assert_eq!(small.segments.len(), large.segments.len());
        let small_span = small.segments[0].from.0 - 50.0;
        let large_span = large.segments[0].from.0 - 500.0;
        assert!((large_span - small_span * 10.0).abs() < 1e-2);
    }

    #[test]
    fn truncated_mesh_renders_nothing() {
        let landmarks = vec![Landmark::new_2d(0.5, 0.5); 60]; // below corner index
        assert!(render_outline(
            &landmarks,
            CanvasSize::new(640.0, 480.0),
            &RenderConfig::default()
        )
        .is_none());
    }

    #[test]
    fn empty_landmarks_render_nothing() {
        assert!(render_outline(&[], CanvasSize::new(640.0, 480.0), &RenderConfig::default())
            .is_none());
    }
}
