//! lip-replay - temporal landmark capture-and-playback engine.
//!
//! Captures a live stream of per-frame mouth-landmark observations tagged
//! with relative timestamps during a recording session, then replays them in
//! lockstep with an independently recorded media timeline so a rendered
//! mouth outline tracks the recorded speech frame-for-frame, including
//! scrubbing, pausing and resuming.
//!
//! # Data flow
//!
//! ```text
//! detector callback
//!   └─▶ geometry::extract_points ─▶ geometry::EmaSmoother ─▶ live overlay
//!   └─▶ capture::CaptureThrottle ─▶ session::FrameBuffer   (while recording)
//!                                         │
//!                media timeline ─▶ playback::PlaybackSynchronizer
//!                                         │
//!                                         └─▶ render::render_outline
//! ```
//!
//! The detector, the media recorder and the tick source are host
//! collaborators behind small traits ([`capture::CaptureDevice`],
//! [`playback::MediaTimeline`], [`playback::TickScheduler`]); the engine
//! itself is a single-threaded cooperative component with no blocking
//! operations.  [`session::SessionController`] ties everything together and
//! is the only type most hosts need to drive.

pub mod capture;
pub mod config;
pub mod geometry;
pub mod playback;
pub mod render;
pub mod session;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use capture::{CaptureDevice, CaptureThrottle, DeviceError};
pub use config::EngineConfig;
pub use geometry::Landmark;
pub use playback::{ManualScheduler, MediaTimeline, PlaybackSynchronizer, TickScheduler};
pub use render::{render_outline, CanvasSize, MouthOutline};
pub use session::{Frame, FrameBuffer, LiveFrame, SessionController, SessionState};
