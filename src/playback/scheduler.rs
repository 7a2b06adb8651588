//! Tick scheduling seam for the playback drive loop.
//!
//! The drive loop's reschedule-or-stop decision is made by the engine, but
//! *when* the next tick fires belongs to the host (an animation-frame
//! callback, a timer, a test harness).  [`TickScheduler`] makes that
//! explicit: the engine arms at most one pending tick via
//! [`request_tick`](TickScheduler::request_tick) and disarms with
//! [`cancel`](TickScheduler::cancel); the host fires
//! `SessionController::on_tick` whenever an armed tick comes due.
//!
//! Cancellation is therefore observable and testable without a rendering
//! surface: a tick that was never requested can never fire.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

// ---------------------------------------------------------------------------
// TickScheduler trait
// ---------------------------------------------------------------------------

/// Host-provided one-shot tick arming.
///
/// # Contract
///
/// - `request_tick` arms at most one pending tick; repeated calls before the
///   tick fires coalesce.
/// - `cancel` disarms any pending tick and must be idempotent.
pub trait TickScheduler {
    /// Arrange for one `on_tick` callback on the host's next tick.
    fn request_tick(&mut self);

    /// Drop any pending tick request.  Idempotent.
    fn cancel(&mut self);
}

// Compile-time assertion: Box<dyn TickScheduler> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn TickScheduler>) {}
};

// ---------------------------------------------------------------------------
// ManualScheduler
// ---------------------------------------------------------------------------

/// A host-driveable scheduler backed by a shared pending flag.
///
/// Clones share the flag: the controller owns one clone, the host polls
/// another and fires `on_tick` whenever [`take_pending`](Self::take_pending)
/// returns `true`.
///
/// # Example
///
/// ```
/// use lip_replay::playback::{ManualScheduler, TickScheduler};
///
/// let probe = ManualScheduler::new();
/// let mut owned = probe.clone();
///
/// owned.request_tick();
/// assert!(probe.take_pending());  // tick due exactly once
/// assert!(!probe.take_pending());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    armed: Arc<AtomicBool>,
}

impl ManualScheduler {
    /// Create an unarmed scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the pending tick, if one is armed.
    pub fn take_pending(&self) -> bool {
        self.armed.swap(false, Ordering::SeqCst)
    }

    /// Whether a tick is currently armed (non-consuming).
    pub fn is_pending(&self) -> bool {
        self.armed.load(Ordering::SeqCst)
    }
}

impl TickScheduler for ManualScheduler {
    fn request_tick(&mut self) {
        self.armed.store(true, Ordering::SeqCst);
    }

    fn cancel(&mut self) {
        self.armed.store(false, Ordering::SeqCst);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
