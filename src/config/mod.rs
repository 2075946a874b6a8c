// SPDX-License-Identifier: MPL-2.0
//! This module handles the crop engine's configuration, including loading and
//! saving it to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[viewport]` - Crop window size and fitted image width
//! - `[gesture]` - Scale range, rotation snapping, clamping mode
//! - `[output]` - Commit-time rotation tolerance, JPEG quality, output directory
//!
//! Every field is optional; missing fields fall back to [`defaults`].
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `PHOTO_CROPPER_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use photo_cropper::config;
//!
//! let (config, warning) = config::load();
//! if let Some(warning) = warning {
//!     eprintln!("{warning}");
//! }
//! println!("crop window: {}px", config.crop_size());
//! ```

pub mod defaults;

pub use defaults::*;

use crate::domain::clamp::ClampMode;
use crate::domain::snap::RotationSnap;
use crate::error::{Error, Result};
use crate::gesture::{GestureConfig, ScaleBounds};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "PhotoCropper";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "PHOTO_CROPPER_CONFIG_DIR";

// =============================================================================
// Enums
// =============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ClampModeSetting {
    #[default]
    AxisAligned,
    RotationAware,
}

impl From<ClampModeSetting> for ClampMode {
    fn from(setting: ClampModeSetting) -> Self {
        match setting {
            ClampModeSetting::AxisAligned => ClampMode::AxisAligned,
            ClampModeSetting::RotationAware => ClampMode::RotationAware,
        }
    }
}

// =============================================================================
// Section Structs
// =============================================================================

/// Crop window geometry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ViewportConfig {
    /// Side length of the square crop window, in logical pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop_size: Option<f64>,

    /// On-screen width of the image at scale 1. Defaults to the crop size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitted_width: Option<f64>,
}

/// Gesture interpretation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GestureSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_scale: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_scale: Option<f64>,

    /// Snap threshold while rotating, in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gesture_snap_degrees: Option<f64>,

    /// Snap threshold when the fingers lift, in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_snap_degrees: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinch_epsilon: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clamp_mode: Option<ClampModeSetting>,
}

/// Commit and encoding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct OutputConfig {
    /// Rotations closer than this to 0 (degrees) are dropped at commit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub micro_rotation_degrees: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jpeg_quality: Option<u8>,

    /// Where cropped images are written. Defaults to the system temp directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

// =============================================================================
// CropConfig
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CropConfig {
    #[serde(default)]
    pub viewport: ViewportConfig,

    #[serde(default)]
    pub gesture: GestureSettings,

    #[serde(default)]
    pub output: OutputConfig,
}

fn finite_or(value: Option<f64>, fallback: f64) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(fallback)
}

impl CropConfig {
    /// Crop window side length, never below [`MIN_CROP_SIZE`].
    #[must_use]
    pub fn crop_size(&self) -> f64 {
        finite_or(self.viewport.crop_size, DEFAULT_CROP_SIZE).max(MIN_CROP_SIZE)
    }

    /// On-screen width of the fitted image at scale 1.
    #[must_use]
    pub fn fitted_width(&self) -> f64 {
        let width = finite_or(self.viewport.fitted_width, self.crop_size());
        if width > 0.0 {
            width
        } else {
            self.crop_size()
        }
    }

    #[must_use]
    pub fn scale_bounds(&self) -> ScaleBounds {
        ScaleBounds::new(
            finite_or(self.gesture.min_scale, DEFAULT_MIN_SCALE),
            finite_or(self.gesture.max_scale, DEFAULT_MAX_SCALE),
        )
    }

    #[must_use]
    pub fn rotation_snap(&self) -> RotationSnap {
        RotationSnap::new(
            finite_or(self.gesture.gesture_snap_degrees, DEFAULT_GESTURE_SNAP_DEGREES),
            finite_or(self.gesture.release_snap_degrees, DEFAULT_RELEASE_SNAP_DEGREES),
        )
    }

    #[must_use]
    pub fn clamp_mode(&self) -> ClampMode {
        self.gesture.clamp_mode.unwrap_or_default().into()
    }

    #[must_use]
    pub fn gesture_config(&self) -> GestureConfig {
        GestureConfig {
            scale_bounds: self.scale_bounds(),
            snap: self.rotation_snap(),
            pinch_epsilon: finite_or(self.gesture.pinch_epsilon, DEFAULT_PINCH_EPSILON)
                .max(MIN_PINCH_EPSILON),
        }
    }

    #[must_use]
    pub fn micro_rotation_degrees(&self) -> f64 {
        finite_or(self.output.micro_rotation_degrees, DEFAULT_MICRO_ROTATION_DEGREES).max(0.0)
    }

    #[must_use]
    pub fn jpeg_quality(&self) -> u8 {
        self.output
            .jpeg_quality
            .unwrap_or(DEFAULT_JPEG_QUALITY)
            .clamp(MIN_JPEG_QUALITY, MAX_JPEG_QUALITY)
    }

    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.output
            .output_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir)
    }
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn config_dir_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    if base_dir.is_some() {
        return base_dir;
    }
    if let Some(dir) = std::env::var_os(ENV_CONFIG_DIR) {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (CropConfig, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (CropConfig, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    log::warn!("ignoring unreadable config {}: {err}", path.display());
                    return (
                        CropConfig::default(),
                        Some(format!("Failed to load {}: {err}", path.display())),
                    );
                }
            }
        }
    }
    (CropConfig::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<CropConfig> {
    let content = fs::read_to_string(path)?;
    let config: CropConfig = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &CropConfig) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &CropConfig, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &CropConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}
