//! Session lifecycle state machine.
//!
//! [`SessionState`] drives the controller's state machine:
//!
//! ```text
//! Idle ──start()──▶ Recording ──stop()──▶ Stopped ──play()──▶ PlayingBack
//!                                            ▲                    │
//!                                            └─ pause()/end ──────┘
//! Stopped / PlayingBack ──reset()──▶ Idle
//! ```
//!
//! The host UI reads the current state to enable/disable its controls.

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// Lifecycle states of one capture/playback session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No session in progress; buffer is empty, devices released.
    Idle,

    /// Frames are being admitted into the buffer via the capture throttle.
    Recording,

    /// A recorded session is held; the buffer is frozen and queryable.
    Stopped,

    /// The playback synchronizer is driving render ticks against the
    /// media timeline.
    PlayingBack,
}

impl SessionState {
    /// Returns `true` while frame appends are legal.
    pub fn can_append(&self) -> bool {
        matches!(self, SessionState::Recording)
    }

    /// Returns `true` while the session holds capture or playback resources.
    pub fn is_active(&self) -> bool {
        matches!(self, SessionState::Recording | SessionState::PlayingBack)
    }

    /// A short human-readable label suitable for a status display.
    pub fn label(&self) -> &'static str {
        match self {
            SessionState::Idle => "Idle",
            SessionState::Recording => "Recording",
            SessionState::Stopped => "Stopped",
            SessionState::PlayingBack => "Playing back",
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::Idle
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
