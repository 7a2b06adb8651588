//! Demo driver - records and replays a synthetic lip-capture session.
//!
//! Exercises the full engine without a camera, detector or media element:
//!
//! 1. Initialise logging.
//! 2. Load [`EngineConfig`] from disk (returns default on first run).
//! 3. Wire a [`SessionController`] to a simulated capture device, a
//!    simulated media timeline and a [`ManualScheduler`].
//! 4. Record 2 seconds of synthetic 60 Hz detector output (throttled to
//!    ~30 fps in the buffer).
//! 5. Play the session back against the simulated timeline, logging the
//!    cursor trajectory.
//! 6. Scrub to 500 ms while paused, render the stabilized outline, export
//!    the service payload, reset.

use std::sync::{Arc, Mutex};

use lip_replay::capture::{CaptureDevice, DeviceError};
use lip_replay::config::EngineConfig;
use lip_replay::geometry::{Landmark, FACE_MESH_LANDMARKS, MOUTH_CORNER_LEFT, MOUTH_CORNER_RIGHT};
use lip_replay::playback::{ManualScheduler, MediaTimeline};
use lip_replay::render::{render_outline, CanvasSize};
use lip_replay::session::SessionController;

// ---------------------------------------------------------------------------
// Synthetic detector
// ---------------------------------------------------------------------------

/// A full face mesh with the mouth opening and closing over time.
fn synthetic_mesh(t_ms: f64) -> Vec<Landmark> {
    let opening = 0.02 + 0.03 * ((t_ms / 180.0).sin().abs() as f32);
    let mut mesh: Vec<Landmark> = (0..FACE_MESH_LANDMARKS)
        .map(|i| {
            let spread = i as f32 / FACE_MESH_LANDMARKS as f32;
            Landmark::new_2d(0.3 + 0.4 * spread, 0.58 + opening * (spread * 7.0).sin())
        })
        .collect();
    mesh[MOUTH_CORNER_LEFT] = Landmark::new_2d(0.42, 0.62);
    mesh[MOUTH_CORNER_RIGHT] = Landmark::new_2d(0.58, 0.62);
    mesh
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("lip-replay demo starting up");

    // 2. Configuration
    let config = EngineConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        EngineConfig::default()
    });

    // 3. Controller wiring
    let scheduler = ManualScheduler::new();
    let mut session = SessionController::new(
        config.clone(),
        Box::new(SimCamera::default()),
        Box::new(scheduler.clone()),
    );

    // 4. Record 2 seconds of synthetic detector output at 60 Hz
    if let Err(e) = session.start() {
        log::error!("could not start session: {e}");
        return;
    }
    let mut now_ms = 0.0;
    while now_ms <= 2_000.0 {
        session.ingest(&synthetic_mesh(now_ms), now_ms);
        now_ms += 1000.0 / 60.0;
    }
    session.stop();
    log::info!(
        "recorded {} frames spanning {:.0} ms",
        session.frame_count(),
        session.buffer().last_t().unwrap_or(0.0)
    );

    // 5. Play back against a simulated media clip
    let duration_ms = session.buffer().last_t().unwrap_or(0.0);
    let timeline = SimClipTimeline::new(duration_ms);
    session.attach_timeline(Box::new(timeline.clone()));

    session.play();
    let mut position = 0.0;
    let mut renders = 0usize;
    while scheduler.take_pending() {
        timeline.seek(position);
        session.on_tick(|index, frame| {
            renders += 1;
            log::debug!("rendered frame {index} (t = {:.0} ms)", frame.t);
        });
        position += 33.0;
        if position > duration_ms {
            timeline.finish();
        }
    }
    log::info!(
        "playback finished: {renders} renders, cursor ended at {}",
        session.cursor()
    );

    // 6. Scrub while paused, render, export, reset
    if let Some(index) = session.scrub(500.0) {
        let frame = session.buffer().frame_at(index).expect("frame exists");
        log::info!("scrub 500 ms → frame {index} (t = {:.0} ms)", frame.t);

        let canvas = CanvasSize::new(640.0, 480.0);
        match render_outline(&frame.landmarks, canvas, &config.render) {
            Some(outline) => {
                log::info!("stabilized outline: {} segments", outline.segments.len())
            }
            None => log::warn!("frame had no renderable mouth region"),
        }
    }

    match session.export().to_json() {
        Ok(json) => log::info!("service payload: {} bytes", json.len()),
        Err(e) => log::warn!("export failed: {e}"),
    }

    session.reset();
    log::info!("session reset to {:?}", session.state());
}

// ---------------------------------------------------------------------------
// SimCamera - always-available capture device
// ---------------------------------------------------------------------------

#[derive(Default)]
struct SimCamera {
    acquired: bool,
}

impl CaptureDevice for SimCamera {
    fn acquire(&mut self) -> Result<(), DeviceError> {
        self.acquired = true;
        Ok(())
    }

    fn release(&mut self) {
        self.acquired = false;
    }

    fn is_acquired(&self) -> bool {
        self.acquired
    }
}

// ---------------------------------------------------------------------------
// SimClipTimeline - driver-controlled media timeline
// ---------------------------------------------------------------------------

/// Clones share state so the driver can seek while the controller owns a
/// handle, the same shape a real host uses to wrap its media element.
#[derive(Clone)]
struct SimClipTimeline {
    inner: Arc<Mutex<SimClipState>>,
}

struct SimClipState {
    position_ms: f64,
    duration_ms: f64,
    paused: bool,
    ended: bool,
}

impl SimClipTimeline {
    fn new(duration_ms: f64) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SimClipState {
                position_ms: 0.0,
                duration_ms,
                paused: true,
                ended: false,
            })),
        }
    }

    fn seek(&self, position_ms: f64) {
        self.inner.lock().unwrap().position_ms = position_ms;
    }

    fn finish(&self) {
        self.inner.lock().unwrap().ended = true;
    }
}

impl MediaTimeline for SimClipTimeline {
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
