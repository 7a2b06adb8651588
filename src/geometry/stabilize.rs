//! Geometric stabilization: live smoothing and the similarity transform.
//!
//! Two independent responsibilities:
//!
//! * [`EmaSmoother`] - exponential moving average over successive landmark
//!   arrays, used only for the live (non-recorded) overlay.  Buffered frames
//!   always store raw geometry so playback fidelity does not compound
//!   smoothing artifacts accumulated live.
//! * [`SimilarityTransform`] - translation + rotation + uniform scale derived
//!   from the two mouth-corner landmarks, so the rendered mouth is
//!   camera-shake-free and size-normalized.  Recomputed per render, never
//!   baked into stored frames: the same buffered frame renders at any target
//!   canvas size without recapture.

use super::landmark::Landmark;

// ---------------------------------------------------------------------------
// EmaSmoother
// ---------------------------------------------------------------------------

/// Per-coordinate exponential moving average across landmark arrays.
///
/// `smoothed = alpha * current + (1 - alpha) * previous`, where `previous` is
/// the prior *smoothed* array.  The first array after construction or
/// [`reset`](Self::reset) passes through unmodified.  A change in array
/// length also passes through and re-seeds the state, since coordinates can
/// no longer be paired.
///
/// # Example
///
/// ```
/// use lip_replay::geometry::{EmaSmoother, Landmark};
///
/// let mut smoother = EmaSmoother::new(0.6);
/// let first = smoother.smooth(&[Landmark::new_2d(0.0, 0.0)]);
/// assert_eq!(first[0].x, 0.0); // passthrough
///
/// let second = smoother.smooth(&[Landmark::new_2d(1.0, 0.0)]);
/// assert!((second[0].x - 0.6).abs() < 1e-6);
/// ```
pub struct EmaSmoother {
    alpha: f32,
    prev: Option<Vec<Landmark>>,
}

impl EmaSmoother {
    /// Create a smoother with the given smoothing factor.
    ///
    /// # Panics
    ///
    /// Panics unless `alpha` is in `(0.0, 1.0]`.  `alpha = 1.0` disables
    /// smoothing entirely.
    pub fn new(alpha: f32) -> Self {
        assert!(
            alpha > 0.0 && alpha <= 1.0,
            "smoothing alpha must be in (0.0, 1.0]"
        );
        Self { alpha, prev: None }
    }

    /// Smoothing factor currently in use.
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Blend `current` against the previous smoothed array.
    pub fn smooth(&mut self, current: &[Landmark]) -> Vec<Landmark> {
        let smoothed = match &self.prev {
            Some(prev) if prev.len() == current.len() => {
                let a = self.alpha;
                let b = 1.0 - a;
                current
                    .iter()
                    .zip(prev.iter())
                    .map(|(c, p)| Landmark {
                        x: a * c.x + b * p.x,
                        y: a * c.y + b * p.y,
                        z: a * c.z + b * p.z,
                    })
                    .collect()
            }
            _ => current.to_vec(),
        };
        self.prev = Some(smoothed.clone());
        smoothed
    }

    /// Forget the previous frame; the next array passes through unsmoothed.
    ///
    /// Called on session boundaries so one session's tail does not bleed into
    /// the next session's first frame.
    pub fn reset(&mut self) {
        self.prev = None;
    }
}

// ---------------------------------------------------------------------------
// SimilarityTransform
// ---------------------------------------------------------------------------

/// Translation + rotation + uniform scale derived from two anchor landmarks.
///
/// [`apply`](Self::apply) maps a landmark into stabilized space: the corner
/// midpoint goes to the origin, the corner-to-corner axis becomes horizontal,
/// and the corner distance becomes `target_width`.  Derived per render,
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityTransform {
    pub center_x: f32,
    pub center_y: f32,
    pub scale: f32,
    /// Angle of the corner-to-corner vector, radians.
    pub rotation: f32,
}

impl SimilarityTransform {
    /// Build the transform from the left and right anchor landmarks.
    ///
    /// A degenerate corner distance (both corners at the same position)
    /// yields identity scale so rendering stays finite.
    pub fn between(left: &Landmark, right: &Landmark, target_width: f32) -> Self {
        let dx = right.x - left.x;
        let dy = right.y - left.y;
        let dist = (dx * dx + dy * dy).sqrt();

        let scale = if dist > f32::EPSILON {
            target_width / dist
        } else {
            1.0
        };

        let center = left.midpoint(right);
        Self {
            center_x: center.x,
            center_y: center.y,
            scale,
            rotation: dy.atan2(dx),
        }
    }

    /// Map `point` into stabilized space.
    pub fn apply(&self, point: &Landmark) -> (f32, f32) {
        let tx = point.x - self.center_x;
        let ty = point.y - self.center_y;

        // Rotate by -rotation so the corner axis lands on the x axis.
        let (sin, cos) = self.rotation.sin_cos();
        let rx = tx * cos + ty * sin;
        let ry = -tx * sin + ty * cos;

        (rx * self.scale, ry * self.scale)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    // ---- EmaSmoother -------------------------------------------------------

    #[test]
    fn first_frame_passes_through() {
        let mut s = EmaSmoother::new(0.6);
        let input = vec![Landmark::new(0.3, 0.7, 0.1)];
        assert_eq!(s.smooth(&input), input);
    }

    #[test]
    fn second_frame_is_blended() {
        let mut s = EmaSmoother::new(0.6);
        s.smooth(&[Landmark::new_2d(0.0, 1.0)]);
        let out = s.smooth(&[Landmark::new_2d(1.0, 0.0)]);
        // 0.6 * 1.0 + 0.4 * 0.0 / 0.6 * 0.0 + 0.4 * 1.0
        assert!((out[0].x - 0.6).abs() < EPS);
        assert!((out[0].y - 0.4).abs() < EPS);
    }

    #[test]
    fn ema_chains_over_smoothed_history() {
        let mut s = EmaSmoother::new(0.5);
        s.smooth(&[Landmark::new_2d(0.0, 0.0)]);
        s.smooth(&[Landmark::new_2d(1.0, 0.0)]); // -> 0.5
        let out = s.smooth(&[Landmark::new_2d(1.0, 0.0)]); // 0.5*1.0 + 0.5*0.5
        assert!((out[0].x - 0.75).abs() < EPS);
    }

    #[test]
    fn reset_restores_passthrough() {
        let mut s = EmaSmoother::new(0.6);
        s.smooth(&[Landmark::new_2d(0.0, 0.0)]);
        s.reset();
        let out = s.smooth(&[Landmark::new_2d(1.0, 1.0)]);
        assert_eq!(out, vec![Landmark::new_2d(1.0, 1.0)]);
    }

    #[test]
    fn length_change_reseeds_state() {
        let mut s = EmaSmoother::new(0.6);
        s.smooth(&[Landmark::new_2d(0.0, 0.0)]);
        let two = vec![Landmark::new_2d(1.0, 0.0), Landmark::new_2d(0.0, 1.0)];
        // Cannot pair one point against two: passthrough
        assert_eq!(s.smooth(&two), two);
        // And the new length is now the smoothing baseline
        let out = s.smooth(&[Landmark::new_2d(0.0, 0.0), Landmark::new_2d(0.0, 1.0)]);
        assert!((out[0].x - 0.4).abs() < EPS);
    }

    #[test]
    #[should_panic(expected = "smoothing alpha must be in (0.0, 1.0]")]
    fn zero_alpha_panics() {
        EmaSmoother::new(0.0);
    }

    #[test]
    #[should_panic(expected = "smoothing alpha must be in (0.0, 1.0]")]
    fn alpha_above_one_panics() {
        EmaSmoother::new(1.5);
    }

    // ---- SimilarityTransform -----------------------------------------------

    #[test]
    fn corners_map_to_horizontal_span() {
        let left = Landmark::new_2d(0.4, 0.6);
        let right = Landmark::new_2d(0.6, 0.6);
        let t = SimilarityTransform::between(&left, &right, 100.0);

        let (lx, ly) = t.apply(&left);
        let (rx, ry) = t.apply(&right);
        assert!((lx + 50.0).abs() < 1e-3, "lx = {lx}");
        assert!(ly.abs() < 1e-3);
        assert!((rx - 50.0).abs() < 1e-3, "rx = {rx}");
        assert!(ry.abs() < 1e-3);
    }

    #[test]
    fn head_roll_is_removed() {
        // Same mouth, rotated 30 degrees around its center
        let angle = 30.0_f32.to_radians();
        let (sin, cos) = angle.sin_cos();
        let half = 0.1_f32;
        let left = Landmark::new_2d(0.5 - half * cos, 0.6 - half * sin);
        let right = Landmark::new_2d(0.5 + half * cos, 0.6 + half * sin);

        let t = SimilarityTransform::between(&left, &right, 100.0);
        let (lx, ly) = t.apply(&left);
        let (rx, ry) = t.apply(&right);

        assert!((lx + 50.0).abs() < 1e-3);
        assert!(ly.abs() < 1e-3, "residual roll: {ly}");
        assert!((rx - 50.0).abs() < 1e-3);
        assert!(ry.abs() < 1e-3, "residual roll: {ry}");
    }

    #[test]
    fn midpoint_maps_to_origin() {
        let left = Landmark::new_2d(0.3, 0.5);
        let right = Landmark::new_2d(0.7, 0.9);
        let t = SimilarityTransform::between(&left, &right, 200.0);
        let (mx, my) = t.apply(&left.midpoint(&right));
        assert!(mx.abs() < 1e-3);
        assert!(my.abs() < 1e-3);
    }

    #[test]
    fn scale_normalizes_corner_distance() {
        let near = SimilarityTransform::between(
            &Landmark::new_2d(0.45, 0.5),
            &Landmark::new_2d(0.55, 0.5),
            100.0,
        );
        let far = SimilarityTransform::between(
            &Landmark::new_2d(0.2, 0.5),
            &Landmark::new_2d(0.8, 0.5),
            100.0,
        );
        // Different subject distances, same rendered width
        assert!((near.scale * 0.1 - 100.0).abs() < 1e-2);
        assert!((far.scale * 0.6 - 100.0).abs() < 1e-2);
    }

    #[test]
    fn degenerate_corners_fall_back_to_identity_scale() {
        let p = Landmark::new_2d(0.5, 0.5);
        let t = SimilarityTransform::between(&p, &p, 100.0);
        assert_eq!(t.scale, 1.0);
        let (x, y) = t.apply(&Landmark::new_2d(0.6, 0.5));
        assert!(x.is_finite() && y.is_finite());
    }
}
