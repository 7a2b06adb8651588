//! Media-timeline seam.
//!
//! The recorded media (an audio clip or a video clip) is owned by the
//! recording collaborator; the engine only needs a seekable timeline with a
//! queryable position and play state.  Audio-synced and video-synced
//! playback are the same code path against this one interface - the engine
//! never branches on the media kind.

// ---------------------------------------------------------------------------
// MediaTimeline trait
// ---------------------------------------------------------------------------

/// A seekable, durational media timeline.
///
/// # Contract
///
/// - [`position_ms`](Self::position_ms) reflects user scrubbing as well as
///   normal playback progress.
/// - [`duration_ms`](Self::duration_ms) may be non-finite before the media's
///   metadata has loaded; calibration treats that as "unknown".
/// - After the media finishes, [`is_ended`](Self::is_ended) stays `true`
///   until the host seeks or replays.
pub trait MediaTimeline {
    /// Current playback position in milliseconds.
    fn position_ms(&self) -> f64;

    /// Total media duration in milliseconds.
    fn duration_ms(&self) -> f64;

    /// Whether the timeline is paused.
    fn is_paused(&self) -> bool;

    /// Whether the timeline has reached its end.
    fn is_ended(&self) -> bool;

    /// Begin or resume playback.
    fn play(&mut self);

    /// Pause playback, retaining the current position.
    fn pause(&mut self);

    /// Whether the timeline is actively progressing.
    fn is_playing(&self) -> bool {
        !self.is_paused() && !self.is_ended()
    }
}

// Compile-time assertion: Box<dyn MediaTimeline> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn MediaTimeline>) {}
};

// ---------------------------------------------------------------------------
// MockTimeline  (test-only)
// ---------------------------------------------------------------------------

/// Scriptable timeline double; clones share state so tests can reposition
/// the timeline while the controller owns it.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct MockTimeline {
    inner: std::sync::Arc<std::sync::Mutex<MockTimelineState>>,
}

#[cfg(test)]
struct MockTimelineState {
    position_ms: f64,
    duration_ms: f64,
    paused: bool,
    ended: bool,
}

#[cfg(test)]
impl Default for MockTimelineState {
    fn default() -> Self {
        Self {
            position_ms: 0.0,
            duration_ms: 0.0,
            paused: true,
            ended: false,
        }
    }
}

#[cfg(test)]
impl MockTimeline {
    /// A paused timeline of the given duration, positioned at zero.
    pub fn with_duration(duration_ms: f64) -> Self {
        let t = Self::default();
        t.inner.lock().unwrap().duration_ms = duration_ms;
        t
    }

    /// Reposition the timeline (simulates playback progress or scrubbing).
    pub fn seek(&self, position_ms: f64) {
        self.inner.lock().unwrap().position_ms = position_ms;
    }

    /// Mark the timeline as having reached its end.
    pub fn finish(&self) {
        self.inner.lock().unwrap().ended = true;
    }
}

#[cfg(test)]
impl MediaTimeline for MockTimeline {
    fn position_ms(&self) -> f64 {
        self.inner.lock().unwrap().position_ms
    }

    fn duration_ms(&self) -> f64 {
        self.inner.lock().unwrap().duration_ms
    }

    fn is_paused(&self) -> bool {
        self.inner.lock().unwrap().paused
    }

    fn is_ended(&self) -> bool {
        self.inner.lock().unwrap().ended
    }

    fn play(&mut self) {
        let mut state = self.inner.lock().unwrap();
        state.paused = false;
        state.ended = false;
    }

    fn pause(&mut self) {
        self.inner.lock().unwrap().paused = true;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
