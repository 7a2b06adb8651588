//! Engine settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.
//! The defaults carry the tuning the engine was designed around: a ~30 fps
//! capture cap, 0.6 live-smoothing alpha, 25 ms playback jitter threshold and
//! a 100 ms calibration drift threshold.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// CalibrationPolicy
// ---------------------------------------------------------------------------

/// What to do when the recorded media and the frame buffer disagree on
/// duration.
///
/// | Variant        | Behaviour                                          |
/// |----------------|----------------------------------------------------|
/// | DiagnosticOnly | Log the drift, play back timestamps as captured    |
/// | RescaleToMedia | Linearly stretch frame timestamps onto the media   |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalibrationPolicy {
    /// Log drift beyond the threshold; never touch timestamps.
    DiagnosticOnly,
    /// Rescale buffered timestamps so the last frame lands on the media's
    /// end.
    RescaleToMedia,
}

impl Default for CalibrationPolicy {
    fn default() -> Self {
        Self::DiagnosticOnly
    }
}

// ---------------------------------------------------------------------------
// CaptureConfig
// ---------------------------------------------------------------------------

/// Settings for frame admission on the capture path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Minimum elapsed milliseconds between admitted frames.
    ///
    /// 33 ms caps the buffer at ~30 fps regardless of detector rate.
    pub throttle_interval_ms: f64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            throttle_interval_ms: 33.0,
        }
    }
}

// ---------------------------------------------------------------------------
// SmoothingConfig
// ---------------------------------------------------------------------------

/// Settings for the live-overlay smoother.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmoothingConfig {
    /// EMA smoothing factor in `(0.0, 1.0]`; higher tracks faster, lower
    /// smooths harder.  Applied to the live overlay only, never to buffered
    /// frames.
    pub alpha: f32,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self { alpha: 0.6 }
    }
}

// ---------------------------------------------------------------------------
// PlaybackConfig
// ---------------------------------------------------------------------------

/// Settings for the playback synchronizer and calibration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Time delta (ms) under which a same-index tick still commits; larger
    /// same-index deltas are skipped to avoid redundant re-renders.
    pub jitter_threshold_ms: f64,
    /// Capture/media drift (ms) beyond which calibration reacts.
    pub calibration_threshold_ms: f64,
    /// How calibration reacts to drift beyond the threshold.
    pub calibration: CalibrationPolicy,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            jitter_threshold_ms: 25.0,
            calibration_threshold_ms: 100.0,
            calibration: CalibrationPolicy::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// RenderConfig
// ---------------------------------------------------------------------------

/// Settings for the stabilized outline renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Rendered mouth width as a fraction of the canvas width.
    pub mouth_width_fraction: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            mouth_width_fraction: 0.5,
        }
    }
}

// ---------------------------------------------------------------------------
// EngineConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level engine configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use lip_replay::config::EngineConfig;
///
/// // Load (returns Default when file is missing)
/// let config = EngineConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Frame-admission settings.
    pub capture: CaptureConfig,
    /// Live-overlay smoothing settings.
    pub smoothing: SmoothingConfig,
    /// Synchronizer and calibration settings.
    pub playback: PlaybackConfig,
    /// Outline renderer settings.
    pub render: RenderConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            capture: CaptureConfig::default(),
            smoothing: SmoothingConfig::default(),
            playback: PlaybackConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(EngineConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
