//! Session controller - owns the capture/playback lifecycle.
//!
//! [`SessionController`] is the single owned session object: it holds the
//! frame buffer, the capture throttle, the live smoother, the playback
//! synchronizer, the capture device handle and the attached media timeline,
//! and coordinates them through the [`SessionState`] machine.
//!
//! # Entry points
//!
//! ```text
//! host UI            ──▶ start / stop / play / pause / scrub / reset
//! detector callback  ──▶ ingest(landmarks, now_ms)
//! scheduler tick     ──▶ on_tick(render)
//! page teardown      ──▶ teardown()
//! ```
//!
//! Everything runs on the host's single cooperative event loop; no method
//! blocks, and every tick re-checks the current state before doing any work
//! so that stop/pause take effect before the next queued tick can mutate
//! anything.
//!
//! Invalid operations (play with an empty buffer, ingest outside a
//! recording, ...) are logged no-ops, never errors; only capture-device
//! acquisition can fail, and that failure leaves the controller idle with a
//! status message for the UI.

use crate::capture::{CaptureDevice, CaptureThrottle, DeviceError};
use crate::config::EngineConfig;
use crate::geometry::{extract_points, EmaSmoother, Landmark, FACE_MESH_LANDMARKS, LIP_CONNECTIONS};
use crate::playback::{calibrate, MediaTimeline, PlaybackSynchronizer, TickScheduler};

use super::buffer::FrameBuffer;
use super::export::SessionExport;
use super::frame::{Frame, LiveFrame};
use super::state::SessionState;

// ---------------------------------------------------------------------------
// SessionController
// ---------------------------------------------------------------------------

/// Owns one capture/playback session end to end.
pub struct SessionController {
    config: EngineConfig,
    state: SessionState,
    buffer: FrameBuffer,
    throttle: CaptureThrottle,
    smoother: EmaSmoother,
    sync: PlaybackSynchronizer,
    device: Box<dyn CaptureDevice>,
    timeline: Option<Box<dyn MediaTimeline>>,
    scheduler: Box<dyn TickScheduler>,
    /// Host clock value of the session's first captured frame; buffered
    /// timestamps are relative to this.
    epoch_ms: Option<f64>,
    /// Last human-readable status for the host UI.
    status: Option<String>,
}

impl SessionController {
    /// Create an idle controller around the host's device and scheduler.
    pub fn new(
        config: EngineConfig,
        device: Box<dyn CaptureDevice>,
        scheduler: Box<dyn TickScheduler>,
    ) -> Self {
        let throttle = CaptureThrottle::new(config.capture.throttle_interval_ms);
        let smoother = EmaSmoother::new(config.smoothing.alpha);
        let sync = PlaybackSynchronizer::new(config.playback.jitter_threshold_ms);
        Self {
            config,
            state: SessionState::Idle,
            buffer: FrameBuffer::new(),
            throttle,
            smoother,
            sync,
            device,
            timeline: None,
            scheduler,
            epoch_ms: None,
            status: None,
        }
    }

    // -----------------------------------------------------------------------
    // Host UI queries
    // -----------------------------------------------------------------------

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Number of buffered frames (progress indicators, bounds checks).
    pub fn frame_count(&self) -> usize {
        self.buffer.len()
    }

    /// Current playback cursor.
    pub fn cursor(&self) -> usize {
        self.sync.cursor()
    }

    /// Read access to the recorded session.
    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    /// Last status message, if any (device failures, rejected play requests).
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Whether a replayable recording is held: frames buffered *and* a media
    /// timeline attached.
    pub fn has_recording(&self) -> bool {
        !self.buffer.is_empty() && self.timeline.is_some()
    }

    /// Flatten the buffered session into the recognition-service payload.
    pub fn export(&self) -> SessionExport {
        SessionExport::from_frames(&self.buffer)
    }

    // -----------------------------------------------------------------------
    // Lifecycle transitions
    // -----------------------------------------------------------------------

    /// Begin a new recording session.
    ///
    /// Accepted from `Idle` and `Stopped`; a new recording discards the
    /// previous buffer and its timeline.  Device acquisition failure is
    /// surfaced as an error plus a status message and leaves the state
    /// unchanged.
    pub fn start(&mut self) -> Result<(), DeviceError> {
        match self.state {
            SessionState::Idle | SessionState::Stopped => {}
            _ => {
                log::warn!("session: start ignored in state {:?}", self.state);
                return Ok(());
            }
        }

        if let Err(e) = self.device.acquire() {
            log::error!("session: cannot start recording: {e}");
            self.status = Some(e.to_string());
            return Err(e);
        }

        // Fresh session: previous frames and media no longer apply.
        self.buffer.clear();
        self.throttle.reset();
        self.smoother.reset();
        self.sync.reset();
        self.epoch_ms = None;
        self.timeline = None;
        self.status = None;
        self.state = SessionState::Recording;
        log::debug!("session: start → Recording");
        Ok(())
    }

    /// Stop recording, freezing the buffer for playback.
    pub fn stop(&mut self) {
        if self.state != SessionState::Recording {
            log::warn!("session: stop ignored in state {:?}", self.state);
            return;
        }
        self.state = SessionState::Stopped;
        log::debug!(
            "session: stop → Stopped ({} frames, {:.0} ms)",
            self.buffer.len(),
            self.buffer.last_t().unwrap_or(0.0)
        );
    }

    /// Attach the media timeline produced by the recording collaborator.
    ///
    /// Replaces any previously attached timeline.
    pub fn attach_timeline(&mut self, timeline: Box<dyn MediaTimeline>) {
        log::debug!("session: media timeline attached");
        self.timeline = Some(timeline);
    }

    /// Start synchronized playback of the recorded session.
    ///
    /// Requires `Stopped` state, a non-empty buffer and an attached
    /// timeline; anything else is a logged no-op.  Runs the calibration pass
    /// before the first tick is armed.
    pub fn play(&mut self) {
        if self.state != SessionState::Stopped {
            log::warn!("session: play ignored in state {:?}", self.state);
            return;
        }
        if self.buffer.is_empty() {
            log::warn!("session: play requested with no recorded frames");
            self.status = Some("nothing recorded yet".into());
            return;
        }
        let Some(timeline) = self.timeline.as_mut() else {
            log::warn!("session: play requested without a media timeline");
            self.status = Some("recorded media not ready".into());
            return;
        };

        let duration_ms = timeline.duration_ms();
        let report = calibrate(
            &mut self.buffer,
            duration_ms,
            self.config.playback.calibration,
            self.config.playback.calibration_threshold_ms,
        );
        if report.is_drifted(self.config.playback.calibration_threshold_ms) {
            log::debug!(
                "session: calibration drift {:.0} ms (rescaled: {})",
                report.drift_ms,
                report.rescaled
            );
        }

        timeline.play();
        self.status = None;
        self.state = SessionState::PlayingBack;
        self.scheduler.request_tick();
        log::debug!("session: play → PlayingBack ({} frames)", self.buffer.len());
    }

    /// Pause playback, retaining the cursor position.
    pub fn pause(&mut self) {
        if self.state != SessionState::PlayingBack {
            log::warn!("session: pause ignored in state {:?}", self.state);
            return;
        }
        self.scheduler.cancel();
        if let Some(timeline) = self.timeline.as_mut() {
            timeline.pause();
        }
        self.state = SessionState::Stopped;
        log::debug!("session: pause → Stopped (cursor {})", self.sync.cursor());
    }

    /// Return to `Idle`: clear the buffer and cursor, release the device,
    /// detach the timeline.
    pub fn reset(&mut self) {
        log::debug!("session: reset from {:?}", self.state);
        self.release_resources();
        self.buffer.clear();
        self.throttle.reset();
        self.smoother.reset();
        self.sync.reset();
        self.epoch_ms = None;
        self.status = None;
        self.state = SessionState::Idle;
    }

    /// Release held resources without touching recorded data.
    ///
    /// Safe to call from any teardown path, in any order, any number of
    /// times.
    pub fn teardown(&mut self) {
        log::debug!("session: teardown in state {:?}", self.state);
        self.release_resources();
    }

    fn release_resources(&mut self) {
        self.scheduler.cancel();
        self.device.release();
        if let Some(mut timeline) = self.timeline.take() {
            timeline.pause();
        }
    }

    // -----------------------------------------------------------------------
    // Detector callback
    // -----------------------------------------------------------------------

    /// Feed one detector result into the engine.
    ///
    /// `now_ms` is the host clock at delivery; buffered timestamps are made
    /// relative to the session's first captured frame.  An empty or partial
    /// landmark array means "no face this tick" and yields `None`.
    ///
    /// While recording, the raw geometry is admitted through the throttle
    /// into the buffer.  The returned [`LiveFrame`] carries the *smoothed*
    /// geometry for the live overlay and is produced in every state.
    pub fn ingest(&mut self, landmarks: &[Landmark], now_ms: f64) -> Option<LiveFrame> {
        if landmarks.len() < FACE_MESH_LANDMARKS {
            if !landmarks.is_empty() {
                log::debug!(
                    "session: ignoring partial mesh ({} of {} landmarks)",
                    landmarks.len(),
                    FACE_MESH_LANDMARKS
                );
            }
            return None;
        }

        if self.state.can_append() {
            let epoch = *self.epoch_ms.get_or_insert(now_ms);
            let t = now_ms - epoch;
            if self.throttle.admit(t) {
                // Buffered frames keep the raw geometry; smoothing is
                // live-view only.
                self.buffer.append(Frame::capture(landmarks, t));
            }
        }

        let smoothed = self.smoother.smooth(landmarks);
        let points = extract_points(&smoothed, LIP_CONNECTIONS);
        Some(LiveFrame {
            points,
            landmarks: smoothed,
        })
    }

    // -----------------------------------------------------------------------
    // Playback drive loop
    // -----------------------------------------------------------------------

    /// One drive-loop tick; the host calls this whenever an armed tick fires.
    ///
    /// Checks state first, then the timeline's play state; if the timeline
    /// has paused or ended the session drops to `Stopped` and the tick is
    /// **not** re-armed - the stop decision lives inside the callback
    /// itself.  Otherwise the cursor advances toward the reported position
    /// and `render` is invoked on commit.
    pub fn on_tick<F>(&mut self, mut render: F)
    where
        F: FnMut(usize, &Frame),
    {
        if self.state != SessionState::PlayingBack {
            log::debug!("playback: stale tick in state {:?}", self.state);
            return;
        }

        let (playing, position_ms) = match &self.timeline {
            Some(timeline) => (timeline.is_playing(), timeline.position_ms()),
            None => {
                log::warn!("playback: timeline detached mid-playback");
                (false, 0.0)
            }
        };

        if !playing {
            self.scheduler.cancel();
            self.state = SessionState::Stopped;
            log::debug!(
                "playback: timeline stopped → Stopped (cursor {})",
                self.sync.cursor()
            );
            return;
        }

        if let Some(index) = self.sync.advance(&self.buffer, position_ms) {
            if let Some(frame) = self.buffer.frame_at(index) {
                render(index, frame);
            }
        }

        self.scheduler.request_tick();
    }

    /// Map a scrubbed media position onto the frame cursor.
    ///
    /// Used while paused (`Stopped`) so the host can preview the frame under
    /// the scrubber; during playback the drive loop already follows the
    /// timeline position.  Returns the committed frame index, if any.
    pub fn scrub(&mut self, position_ms: f64) -> Option<usize> {
        if !matches!(
            self.state,
            SessionState::Stopped | SessionState::PlayingBack
        ) {
            log::debug!("session: scrub ignored in state {:?}", self.state);
            return None;
        }
        self.sync.advance(&self.buffer, position_ms)
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        self.release_resources();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
