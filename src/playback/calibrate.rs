//! Pre-playback calibration between the frame buffer and the recorded media.
//!
//! The capture session and the media recording start independently, so
//! detector startup lag can leave the last buffered timestamp short of (or
//! past) the media duration.  Before playback begins, the drift is measured
//! and either logged as a diagnostic (default) or corrected by linearly
//! rescaling the buffered timestamps onto the media duration, depending on
//! the configured [`CalibrationPolicy`].

use crate::config::CalibrationPolicy;
use crate::session::FrameBuffer;

// ---------------------------------------------------------------------------
// CalibrationReport
// ---------------------------------------------------------------------------

/// Outcome of one calibration pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationReport {
    /// Total media duration, milliseconds.
    pub media_duration_ms: f64,
    /// Timestamp of the last buffered frame before any correction.
    pub last_frame_ms: f64,
    /// `media_duration_ms - last_frame_ms`.
    pub drift_ms: f64,
    /// Whether timestamps were rescaled onto the media duration.
    pub rescaled: bool,
}

impl CalibrationReport {
    /// Whether the measured drift exceeds `threshold_ms`.
    pub fn is_drifted(&self, threshold_ms: f64) -> bool {
        self.drift_ms.abs() > threshold_ms
    }
}

// ---------------------------------------------------------------------------
// calibrate
// ---------------------------------------------------------------------------

/// Measure (and optionally correct) capture/media drift before playback.
///
/// Drift within `threshold_ms` is normal detector jitter and is ignored.
/// Beyond it, [`CalibrationPolicy::DiagnosticOnly`] logs and changes
/// nothing, while [`CalibrationPolicy::RescaleToMedia`] stretches every
/// buffered timestamp by `media_duration / last_frame_t`.
///
/// A non-finite or non-positive media duration (metadata not yet loaded)
/// disables correction for that pass.
pub fn calibrate(
    buffer: &mut FrameBuffer,
    media_duration_ms: f64,
    policy: CalibrationPolicy,
    threshold_ms: f64,
) -> CalibrationReport {
    let last_frame_ms = buffer.last_t().unwrap_or(0.0);
    let duration_known = media_duration_ms.is_finite() && media_duration_ms > 0.0;
    let drift_ms = if duration_known {
        media_duration_ms - last_frame_ms
    } else {
        0.0
    };

    let mut report = CalibrationReport {
        media_duration_ms,
        last_frame_ms,
        drift_ms,
        rescaled: false,
    };

    if !duration_known {
        log::debug!("calibration: media duration unknown, skipping");
        return report;
    }

    if !report.is_drifted(threshold_ms) {
        return report;
    }

    match policy {
        CalibrationPolicy::DiagnosticOnly => {
            log::warn!(
                "calibration: capture/media drift {:.0} ms (media {:.0} ms, last frame {:.0} ms)",
                drift_ms,
                media_duration_ms,
                last_frame_ms
            );
        }
        CalibrationPolicy::RescaleToMedia => {
            if last_frame_ms > 0.0 {
                let factor = media_duration_ms / last_frame_ms;
                buffer.rescale(factor);
                report.rescaled = true;
                log::info!(
                    "calibration: rescaled {} frames by {:.4} to fit {:.0} ms of media",
                    buffer.len(),
                    factor,
                    media_duration_ms
                );
            } else {
                log::warn!(
                    "calibration: drift {:.0} ms but no frame span to rescale",
                    drift_ms
                );
            }
        }
    }

    report
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
