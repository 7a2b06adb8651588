//! Playback-side machinery: timeline seam, tick scheduling, the frame
//! synchronizer and pre-playback calibration.
//!
//! # Drive loop
//!
//! ```text
//! host animation tick (armed via TickScheduler)
//!        │
//!        ▼
//! SessionController::on_tick
//!        ├─ state / timeline play-state check   ← cancellation point
//!        ├─ PlaybackSynchronizer::advance       ← O(log n) nearest frame
//!        ├─ render callback on cursor commit
//!        └─ TickScheduler::request_tick         ← only while still playing
//! ```
//!
//! The loop never self-schedules recursively and has no watchdog: the
//! pause/end check happens inside the very callback that would otherwise
//! re-arm the next tick.

pub mod calibrate;
pub mod scheduler;
pub mod sync;
pub mod timeline;

pub use calibrate::{calibrate, CalibrationReport};
pub use scheduler::{ManualScheduler, TickScheduler};
pub use sync::PlaybackSynchronizer;
pub use timeline::MediaTimeline;
