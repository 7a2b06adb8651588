//! Append-only, time-ordered frame storage for one recording session.
//!
//! The buffer is owned exclusively by one session controller: append-only
//! while recording, read-only during playback, fully cleared when a new
//! recording starts or on explicit reset.  The controller gates *when*
//! appends are legal; the buffer itself enforces the non-decreasing
//! timestamp invariant the playback binary search depends on.

use super::frame::Frame;

// ---------------------------------------------------------------------------
// FrameBuffer
// ---------------------------------------------------------------------------

/// Time-ordered sequence of captured [`Frame`]s.
#[derive(Debug, Default)]
pub struct FrameBuffer {
    frames: Vec<Frame>,
}

impl FrameBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    /// Append a frame, preserving timestamp order.
    ///
    /// Returns `false` (and logs) when the frame's timestamp precedes the
    /// last buffered timestamp; the buffer is unchanged in that case.  The
    /// throttle already rejects out-of-order detector results, so a rejection
    /// here indicates a caller bug rather than detector jitter.
    pub(crate) fn append(&mut self, frame: Frame) -> bool {
        if let Some(last) = self.last_t() {
            if frame.t < last {
                log::warn!(
                    "frame buffer: rejecting out-of-order append ({} ms < {} ms)",
                    frame.t,
                    last
                );
                return false;
            }
        }
        self.frames.push(frame);
        true
    }

    /// Discard all frames.
    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Number of buffered frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` when no frames are buffered.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Bounds-clamped read: an out-of-range index returns the nearest
    /// boundary frame instead of erroring, so renderers never crash on edge
    /// indices.  Returns `None` only when the buffer is empty.
    pub fn frame_at(&self, index: usize) -> Option<&Frame> {
        if self.frames.is_empty() {
            return None;
        }
        Some(&self.frames[index.min(self.frames.len() - 1)])
    }

    /// Timestamp of the last buffered frame, if any.
    pub fn last_t(&self) -> Option<f64> {
        self.frames.last().map(|f| f.t)
    }

    /// All buffered frames, in capture order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Linearly rescale every timestamp by `factor`.
    ///
    /// Used by the calibration strategy before playback starts; order is
    /// preserved because the factor is positive.
    pub(crate) fn rescale(&mut self, factor: f64) {
        debug_assert!(factor.is_finite() && factor > 0.0);
        for frame in &mut self.frames {
            frame.t *= factor;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
