//! Capture-side collaborators: device seam and frame-admission throttle.
//!
//! ```text
//! detector callback ──▶ SessionController::ingest
//!                             │
//!                             ├─ CaptureThrottle (rate cap + order guard)
//!                             └─ FrameBuffer (while recording)
//!
//! camera/microphone ──▶ CaptureDevice (host-implemented, held per session)
//! ```

pub mod device;
pub mod throttle;

pub use device::{CaptureDevice, DeviceError};
pub use throttle::CaptureThrottle;
