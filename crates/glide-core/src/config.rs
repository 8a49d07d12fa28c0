#![forbid(unsafe_code)]

//! Scroll and drag configuration.
//!
//! [`GlideConfig`] groups the wheel options ([`ScrollConfig`]) and the
//! pointer-drag options ([`DragConfig`]). Every field has a default, so a
//! host only overrides what it cares about.
//!
//! # Loading
//!
//! With the `config-file` feature the whole group can be read from TOML or
//! JSON. Missing fields keep their defaults; out-of-range values are
//! rejected with [`ConfigError::Validation`].
//!
//! ```toml
//! [scroll]
//! mouse_wheel_scroll_sensitivity = 1.5
//! inertial_scroll = true
//!
//! [drag]
//! drag_and_drop = false
//! ```
//!
//! ```rust,ignore
//! let config = GlideConfig::from_toml_file("glide.toml")?;
//! ```

#[cfg(feature = "config-file")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "config-file")]
use serde::{Deserialize, Serialize};

/// Host platform, as far as wheel conventions are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(rename_all = "snake_case"))]
pub enum Platform {
    /// macOS converts Shift+wheel to horizontal scrolling itself.
    MacOs,
    Other,
}

impl Platform {
    /// The platform this binary was compiled for.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Other
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}

// ---------------------------------------------------------------------------
// ScrollConfig
// ---------------------------------------------------------------------------

/// Wheel handling options for one scrollable surface.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct ScrollConfig {
    /// Multiplier applied to both wheel axes.
    pub mouse_wheel_scroll_sensitivity: f64,
    /// Extra multiplier while the fast-scroll modifier (Alt) is held.
    pub fast_scroll_sensitivity: f64,
    /// Only scroll along the dominant axis of each event.
    pub scroll_predominant_axis: bool,
    /// Swap horizontal and vertical deltas.
    pub flip_axes: bool,
    /// Route vertical-only gestures to horizontal scrolling.
    pub scroll_y_to_x: bool,
    /// Animate wheel scrolling when the source looks like a physical wheel.
    pub mouse_wheel_smooth_scroll: bool,
    /// Keep coasting after wheel input stops.
    pub inertial_scroll: bool,
    /// Consume wheel events even when nothing scrolled.
    pub always_consume_mouse_wheel: bool,
    /// Consume wheel events when either scrollbar is needed.
    pub consume_mouse_wheel_if_scrollbar_is_needed: bool,
    /// Platform wheel conventions to follow.
    pub platform: Platform,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            mouse_wheel_scroll_sensitivity: 1.0,
            fast_scroll_sensitivity: 5.0,
            scroll_predominant_axis: true,
            flip_axes: false,
            scroll_y_to_x: false,
            mouse_wheel_smooth_scroll: false,
            inertial_scroll: false,
            always_consume_mouse_wheel: true,
            consume_mouse_wheel_if_scrollbar_is_needed: false,
            platform: Platform::current(),
        }
    }
}

impl ScrollConfig {
    /// Validate ranges. An empty list means the config is usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !self.mouse_wheel_scroll_sensitivity.is_finite() {
            errors.push(format!(
                "scroll.mouse_wheel_scroll_sensitivity must be finite, got {}",
                self.mouse_wheel_scroll_sensitivity
            ));
        }
        if !self.fast_scroll_sensitivity.is_finite() {
            errors.push(format!(
                "scroll.fast_scroll_sensitivity must be finite, got {}",
                self.fast_scroll_sensitivity
            ));
        }
        errors
    }
}

// ---------------------------------------------------------------------------
// DragConfig
// ---------------------------------------------------------------------------

/// Pointer-drag options for one editor.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct DragConfig {
    /// Editor rejects edits; dragging a selection would move text.
    pub read_only: bool,
    /// Allow dragging an existing selection to move it.
    pub drag_and_drop: bool,
    /// Column (box) selection mode is on.
    pub column_selection: bool,
    /// Edge autoscroll speed: pixels scrolled per second per pixel the
    /// pointer sits past the edge.
    pub autoscroll_speed: f64,
    /// Pause (ms) after which a click sequence starts over.
    pub multi_click_timeout_ms: u64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            read_only: false,
            drag_and_drop: true,
            column_selection: false,
            autoscroll_speed: 10.0,
            multi_click_timeout_ms: 400,
        }
    }
}

impl DragConfig {
    #[must_use]
    pub fn multi_click_timeout(&self) -> Duration {
        Duration::from_millis(self.multi_click_timeout_ms)
    }

    /// Validate ranges. An empty list means the config is usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !self.autoscroll_speed.is_finite() || self.autoscroll_speed <= 0.0 {
            errors.push(format!(
                "drag.autoscroll_speed must be positive, got {}",
                self.autoscroll_speed
            ));
        }
        if self.multi_click_timeout_ms == 0 {
            errors.push("drag.multi_click_timeout_ms must be > 0".into());
        }
        errors
    }
}

// ---------------------------------------------------------------------------
// GlideConfig
// ---------------------------------------------------------------------------

/// All tunables, grouped as they appear in a config file.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct GlideConfig {
    pub scroll: ScrollConfig,
    pub drag: DragConfig,
}

impl GlideConfig {
    /// Validate every section.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = self.scroll.validate();
        errors.extend(self.drag.validate());
        errors
    }

    /// Load from a TOML string.
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        config.checked()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config-file")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config-file")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        config.checked()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config-file")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Return `self` if valid, otherwise every validation error.
    pub fn checked(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from loading or validating configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config-file")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config-file")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "cannot read glide config: {e}"),
            #[cfg(feature = "config-file")]
            Self::Toml(e) => write!(f, "malformed glide config TOML: {e}"),
            #[cfg(feature = "config-file")]
            Self::Json(e) => write!(f, "malformed glide config JSON: {e}"),
            Self::Validation(errors) => write!(
                f,
                "glide config rejected ({} field(s)): {}",
                errors.len(),
                errors.join("; ")
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config-file")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config-file")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
