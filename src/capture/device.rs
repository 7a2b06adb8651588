//! Capture-device seam.
//!
//! The engine never talks to camera/microphone hardware itself; the host
//! supplies a [`CaptureDevice`] implementation (getUserMedia wrapper, native
//! capture stack, ...).  The session controller acquires the device when a
//! recording starts and releases it on reset/teardown.
//!
//! Release is required to be **idempotent**: teardown can be triggered from
//! multiple paths (explicit reset, navigation away, visibility change) in any
//! order, and the second release must be a harmless no-op.

use thiserror::Error;

// ---------------------------------------------------------------------------
// DeviceError
// ---------------------------------------------------------------------------

/// Reasons a capture device cannot be acquired.
///
/// Acquisition failure is fatal to *starting* a session but never to the
/// engine: the session controller surfaces it as a status message and stays
/// idle.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// The user or platform denied access to the capture device.
    #[error("capture device access denied")]
    AccessDenied,

    /// No usable capture device is present, or it failed to open.
    #[error("capture device unavailable: {0}")]
    Unavailable(String),
}

// ---------------------------------------------------------------------------
// CaptureDevice trait
// ---------------------------------------------------------------------------

/// Host-provided camera/microphone handle.
///
/// # Contract
///
/// - [`acquire`](Self::acquire) may be called again after a release; a second
///   acquire while already acquired is implementation-defined but must not
///   error.
/// - [`release`](Self::release) must be idempotent and infallible.
pub trait CaptureDevice {
    /// Open the underlying device tracks.
    fn acquire(&mut self) -> Result<(), DeviceError>;

    /// Stop the underlying device tracks.  Idempotent.
    fn release(&mut self);

    /// Whether the device is currently held.
    fn is_acquired(&self) -> bool;
}

// Compile-time assertion: Box<dyn CaptureDevice> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn CaptureDevice>) {}
};

// ---------------------------------------------------------------------------
// MockDevice  (test-only)
// ---------------------------------------------------------------------------

/// Scriptable test double with a shared probe for release counting.
///
/// Clones share state, so a test can keep one handle while the session
/// controller owns another.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct MockDevice {
    inner: std::sync::Arc<std::sync::Mutex<MockDeviceState>>,
}

#[cfg(test)]
#[derive(Default)]
struct MockDeviceState {
    fail_with: Option<DeviceError>,
    acquired: bool,
    release_calls: usize,
}

#[cfg(test)]
impl MockDevice {
    /// A device that always acquires successfully.
    pub fn available() -> Self {
        Self::default()
    }

    /// A device whose every acquire fails with `error`.
    pub fn failing(error: DeviceError) -> Self {
        let dev = Self::default();
        dev.inner.lock().unwrap().fail_with = Some(error);
        dev
    }

    /// How many times `release` has been called.
    pub fn release_calls(&self) -> usize {
        self.inner.lock().unwrap().release_calls
    }
}

#[cfg(test)]
impl CaptureDevice for MockDevice {
    fn acquire(&mut self) -> Result<(), DeviceError> {
        let mut state = self.inner.lock().unwrap();
        if let Some(err) = &state.fail_with {
            return Err(err.clone());
        }
        state.acquired = true;
        Ok(())
    }

    fn release(&mut self) {
        let mut state = self.inner.lock().unwrap();
        state.acquired = false;
        state.release_calls += 1;
    }

    fn is_acquired(&self) -> bool {
        self.inner.lock().unwrap().acquired
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_then_release() {
        let mut dev = MockDevice::available();
        assert!(!dev.is_acquired());
        dev.acquire().unwrap();
        assert!(dev.is_acquired());
        dev.release();
        assert!(!dev.is_acquired());
    }

    #[test]
    fn release_is_idempotent() {
        let mut dev = MockDevice::available();
        dev.acquire().unwrap();
        dev.release();
        dev.release();
        assert!(!dev.is_acquired());
        assert_eq!(dev.release_calls(), 2);
    }

    #[test]
    fn failing_device_reports_error() {
        let mut dev = MockDevice::failing(DeviceError::AccessDenied);
        assert_eq!(dev.acquire(), Err(DeviceError::AccessDenied));
        assert!(!dev.is_acquired());
    }

    #[test]
    fn clones_share_state() {
        let dev = MockDevice::available();
        let mut other = dev.clone();
        other.acquire().unwrap();
        assert!(dev.is_acquired());
    }

    #[test]
    fn error_display_is_informative() {
        let err = DeviceError::Unavailable("no camera".into());
        assert!(err.to_string().contains("no camera"));
    }
}
