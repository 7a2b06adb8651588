//! Playback synchronizer: maps a media position onto the nearest buffered
//! frame and owns the playback cursor.
//!
//! # Lookup
//!
//! Buffered timestamps are non-decreasing, so the nearest-timestamp frame is
//! found by binary search that tracks the smallest absolute difference seen
//! while narrowing: O(log n) per tick against buffers that can hold
//! thousands of frames.  Queries beyond the recorded range resolve to the
//! boundary frame, so scrubbing past the end simply holds the last frame.
//!
//! # Cursor commits
//!
//! A tick commits (and reports a re-render) when the candidate index differs
//! from the current cursor, or when the match is within the jitter threshold
//! of the reported position; otherwise the tick is a no-op, which keeps
//! near-identical consecutive position reads from forcing redundant
//! re-renders.

use crate::session::FrameBuffer;

// ---------------------------------------------------------------------------
// PlaybackSynchronizer
// ---------------------------------------------------------------------------

/// Owns the playback cursor and the nearest-frame lookup.
pub struct PlaybackSynchronizer {
    cursor: usize,
    jitter_threshold_ms: f64,
}

impl PlaybackSynchronizer {
    /// Create a synchronizer with the given commit jitter threshold.
    pub fn new(jitter_threshold_ms: f64) -> Self {
        Self {
            cursor: 0,
            jitter_threshold_ms,
        }
    }

    /// Current playback cursor (index into the frame buffer).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Return the cursor to the start of the buffer.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Index of the frame whose timestamp is nearest `target_ms`.
    ///
    /// Equivalent to an exhaustive scan minimizing `|frame.t - target_ms|`,
    /// in O(log n).  Returns `None` on an empty buffer.
    pub fn nearest_frame_index(frames: &FrameBuffer, target_ms: f64) -> Option<usize> {
        let frames = frames.frames();
        if frames.is_empty() {
            return None;
        }

        let mut low = 0usize;
        let mut high = frames.len() - 1;
        let mut best = 0usize;
        let mut best_diff = f64::INFINITY;

        while low <= high {
            let mid = low + (high - low) / 2;
            let t = frames[mid].t;
            let diff = (t - target_ms).abs();

            if diff < best_diff {
                best_diff = diff;
                best = mid;
            }

            if t < target_ms {
                low = mid + 1;
            } else if t > target_ms {
                if mid == 0 {
                    break;
                }
                high = mid - 1;
            } else {
                return Some(mid);
            }
        }

        Some(best)
    }

    /// Advance the cursor toward the reported media position.
    ///
    /// Returns `Some(index)` when the cursor committed and the frame at
    /// `index` should be re-rendered, `None` when the tick was insignificant
    /// or the buffer is empty.
    pub fn advance(&mut self, frames: &FrameBuffer, position_ms: f64) -> Option<usize> {
        let candidate = Self::nearest_frame_index(frames, position_ms)?;
        let diff = (frames.frames()[candidate].t - position_ms).abs();

        if candidate != self.cursor || diff < self.jitter_threshold_ms {
            self.cursor = candidate;
            Some(candidate)
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Landmark;
    use crate::session::Frame;

    fn buffer_at(times: &[f64]) -> FrameBuffer {
        let mut buf = FrameBuffer::new();
        for &t in times {
            let ok = buf.append(Frame {
                points: vec![Landmark::new_2d(0.5, 0.5)],
                landmarks: vec![Landmark::new_2d(0.5, 0.5)],
                t,
            });
            assert!(ok);
        }
        buf
    }

    /// 30 fps capture: t = 0, 33, 66, ...
    fn buffer_30fps(n: usize) -> FrameBuffer {
        let times: Vec<f64> = (0..n).map(|i| i as f64 * 33.0).collect();
        buffer_at(&times)
    }

    fn oracle(frames: &FrameBuffer, target: f64) -> Option<usize> {
        let frames = frames.frames();
        if frames.is_empty() {
            return None;
        }
        let mut best = 0usize;
        for (i, f) in frames.iter().enumerate() {
            if (f.t - target).abs() < (frames[best].t - target).abs() {
                best = i;
            }
        }
        Some(best)
    }

    // ---- nearest_frame_index ----------------------------------------------

    #[test]
    fn empty_buffer_has_no_nearest() {
        let buf = FrameBuffer::new();
        assert_eq!(PlaybackSynchronizer::nearest_frame_index(&buf, 100.0), None);
    }

    #[test]
    fn single_frame_always_wins() {
        let buf = buffer_at(&[500.0]);
        for t in [-100.0, 0.0, 500.0, 10_000.0] {
            assert_eq!(
                PlaybackSynchronizer::nearest_frame_index(&buf, t),
                Some(0)
            );
        }
    }

    #[test]
    fn exact_timestamp_is_found() {
        let buf = buffer_30fps(10);
        assert_eq!(
            PlaybackSynchronizer::nearest_frame_index(&buf, 99.0),
            Some(3)
        );
    }

    #[test]
    fn query_before_range_clamps_to_first() {
        let buf = buffer_at(&[100.0, 200.0, 300.0]);
        assert_eq!(
            PlaybackSynchronizer::nearest_frame_index(&buf, -50.0),
            Some(0)
        );
    }

    #[test]
    fn query_beyond_range_clamps_to_last() {
        let buf = buffer_30fps(60);
        assert_eq!(
            PlaybackSynchronizer::nearest_frame_index(&buf, 5000.0),
            Some(59)
        );
    }

    /// Property 6 (capture & scrub): 60 frames at 33 ms steps; 500 ms is
    /// nearest to frame 15 (t = 495).
    #[test]
    fn scrub_scenario_matches_expected_index() {
        let buf = buffer_30fps(60);
        let idx = PlaybackSynchronizer::nearest_frame_index(&buf, 500.0).unwrap();
        assert_eq!(idx, oracle(&buf, 500.0).unwrap());
        assert_eq!(idx, 15);
        assert_eq!(buf.frames()[idx].t, 495.0);
    }

    /// Property 3: the binary search matches an exhaustive scan for all
    /// queries across buffer sizes, including the large case.
    #[test]
    fn matches_linear_scan_oracle() {
        for n in [0usize, 1, 10, 10_000] {
            let buf = buffer_30fps(n);
            let last_t = buf.last_t().unwrap_or(0.0);
            // Sweep [0, last + slack] in uneven steps plus edge queries
            let span = last_t + 200.0;
            let step = (span / 400.0).max(7.3);
            let mut queries: Vec<f64> = (0..)
                .map(|i| i as f64 * step)
                .take_while(|&q| q <= span)
                .collect();
            queries.extend([-10.0, last_t, last_t + 1000.0]);

            for q in queries {
                let got = PlaybackSynchronizer::nearest_frame_index(&buf, q);
                let want = oracle(&buf, q);
                match (got, want) {
                    (None, None) => {}
                    (Some(g), Some(w)) => {
                        let frames = buf.frames();
                        let gd = (frames[g].t - q).abs();
                        let wd = (frames[w].t - q).abs();
                        assert!(
                            (gd - wd).abs() < 1e-9,
                            "n={n} q={q}: got index {g} (diff {gd}), oracle {w} (diff {wd})"
                        );
                    }
                    other => panic!("n={n} q={q}: mismatch {other:?}"),
                }
            }
        }
    }

    #[test]
    fn handles_duplicate_timestamps() {
        let buf = buffer_at(&[0.0, 33.0, 33.0, 66.0]);
        let idx = PlaybackSynchronizer::nearest_frame_index(&buf, 34.0).unwrap();
        assert_eq!(buf.frames()[idx].t, 33.0);
    }

    // ---- advance / commit policy ------------------------------------------

    #[test]
    fn cursor_starts_at_zero() {
        let sync = PlaybackSynchronizer::new(25.0);
        assert_eq!(sync.cursor(), 0);
    }

    #[test]
    fn index_change_commits() {
        let buf = buffer_30fps(60);
        let mut sync = PlaybackSynchronizer::new(25.0);
        assert_eq!(sync.advance(&buf, 500.0), Some(15));
        assert_eq!(sync.cursor(), 15);
    }

    #[test]
    fn far_same_index_tick_is_skipped() {
        let buf = buffer_at(&[0.0, 1000.0]);
        let mut sync = PlaybackSynchronizer::new(25.0);
        assert_eq!(sync.advance(&buf, 1000.0), Some(1));
        // Still nearest to frame 1, but 400 ms away: insignificant tick
        assert_eq!(sync.advance(&buf, 600.0), None);
        assert_eq!(sync.cursor(), 1);
    }

    #[test]
    fn tight_same_index_tick_commits() {
        let buf = buffer_30fps(10);
        let mut sync = PlaybackSynchronizer::new(25.0);
        assert_eq!(sync.advance(&buf, 99.0), Some(3));
        // Same index, but within the jitter threshold of the frame
        assert_eq!(sync.advance(&buf, 100.0), Some(3));
    }

    #[test]
    fn advance_on_empty_buffer_is_none() {
        let buf = FrameBuffer::new();
        let mut sync = PlaybackSynchronizer::new(25.0);
        assert_eq!(sync.advance(&buf, 0.0), None);
        assert_eq!(sync.cursor(), 0);
    }

    #[test]
    fn reset_returns_cursor_to_start() {
        let buf = buffer_30fps(10);
        let mut sync = PlaybackSynchronizer::new(25.0);
        sync.advance(&buf, 300.0);
        assert_ne!(sync.cursor(), 0);
        sync.reset();
        assert_eq!(sync.cursor(), 0);
    }

    #[test]
    fn scrubbing_backwards_recommits() {
        let buf = buffer_30fps(60);
        let mut sync = PlaybackSynchronizer::new(25.0);
        sync.advance(&buf, 1500.0);
        let back = sync.advance(&buf, 200.0);
        assert_eq!(back, Some(6)); // t = 198
        assert_eq!(sync.cursor(), 6);
    }
}
