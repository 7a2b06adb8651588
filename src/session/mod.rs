//! Session lifecycle: frame storage, state machine and the controller that
//! owns them.
//!
//! # Architecture
//!
//! ```text
//! detector callback ──▶ SessionController::ingest
//!                            │ (Recording: throttle → FrameBuffer)
//!                            └─▶ LiveFrame (smoothed, live overlay)
//!
//! host UI ──▶ start/stop/play/pause/scrub/reset ──▶ SessionState machine
//!
//! scheduler tick ──▶ SessionController::on_tick ──▶ render callback
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use lip_replay::capture::{CaptureDevice, DeviceError};
//! use lip_replay::config::EngineConfig;
//! use lip_replay::playback::ManualScheduler;
//! use lip_replay::session::SessionController;
//!
//! struct Webcam; // host-side wrapper around the real capture stack
//! impl CaptureDevice for Webcam {
//!     fn acquire(&mut self) -> Result<(), DeviceError> { Ok(()) }
//!     fn release(&mut self) {}
//!     fn is_acquired(&self) -> bool { true }
//! }
//!
//! let scheduler = ManualScheduler::new();
//! let mut session = SessionController::new(
//!     EngineConfig::default(),
//!     Box::new(Webcam),
//!     Box::new(scheduler.clone()),
//! );
//!
//! session.start().unwrap();
//! // ... feed detector callbacks via session.ingest(...), then:
//! session.stop();
//! ```

pub mod buffer;
pub mod controller;
pub mod export;
pub mod frame;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use buffer::FrameBuffer;
pub use controller::SessionController;
pub use export::SessionExport;
pub use frame::{Frame, LiveFrame};
pub use state::SessionState;
