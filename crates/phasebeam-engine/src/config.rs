//! Engine configuration.
//!
//! Provides the surface, run, kernel, recolor and parallax settings.
//! Configuration can be loaded from and saved to a file.

use phasebeam_common::{ConfigError, PhaseBeamResult, RecolorSettings, Rgba};
use phasebeam_kernel::KernelConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::input::ParallaxSweepConfig;

/// Configuration file name.
const CONFIG_FILE: &str = "phasebeam.toml";

/// Engine configuration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === Surface Settings ===
    /// Surface width in pixels
    pub surface_width: u32,
    /// Surface height in pixels
    pub surface_height: u32,
    /// Display density in dots per inch
    pub density_dpi: f32,

    // === Run Settings ===
    /// Frames to render before exiting (0 = until interrupted)
    pub frame_limit: u64,
    /// Sleep for each pacing hint instead of running flat out
    pub realtime: bool,

    // === Background ===
    /// Authored color at the top of the background
    pub background_top: Rgba,
    /// Authored color at the bottom of the background
    pub background_bottom: Rgba,

    // === Subsystems ===
    /// Particle kernel settings
    pub kernel: KernelConfig,
    /// Recolor preferences
    pub recolor: RecolorSettings,
    /// Synthetic parallax input
    pub parallax: ParallaxSweepConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            // Surface
            surface_width: 1080,
            surface_height: 1920,
            density_dpi: 240.0,

            // Run
            frame_limit: 600,
            realtime: true,

            // Background
            background_top: Rgba::from_rgb(0x1a, 0x23, 0x7e),
            background_bottom: Rgba::from_rgb(0x00, 0x96, 0x88),

            kernel: KernelConfig::default(),
            recolor: RecolorSettings::default(),
            parallax: ParallaxSweepConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from the default file location.
    /// Returns default config if file doesn't exist.
    pub fn load() -> Self {
        Self::load_from(Self::config_path())
    }

    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file not found, using defaults");
            return Self::default();
        }

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Failed to read config file: {e}");
                return Self::default();
            },
        };

        match Self::from_toml_str(&contents) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            },
            Err(e) => {
                warn!("{e}");
                Self::default()
            },
        }
    }

    /// Parses configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> PhaseBeamResult<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        fs::write(path, contents)?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Get the default configuration file path.
    fn config_path() -> PathBuf {
        if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("phasebeam").join(CONFIG_FILE)
        } else {
            PathBuf::from(CONFIG_FILE)
        }
    }

    /// Validate and clamp configuration values to sensible ranges.
    pub fn validate(&mut self) {
        // Surface
        self.surface_width = self.surface_width.clamp(1, 16_384);
        self.surface_height = self.surface_height.clamp(1, 16_384);
        self.density_dpi = if self.density_dpi.is_finite() {
            self.density_dpi.clamp(60.0, 960.0)
        } else {
            240.0
        };

        self.kernel.validate();
        self.recolor.validate();
        self.parallax.validate();
    }

    /// Rejects settings that would never finish or never wait.
    pub fn check_runnable(&self) -> Result<(), ConfigError> {
        if self.frame_limit == 0 && !self.realtime {
            return Err(ConfigError::InvalidValue {
                field: "frame_limit",
                reason: "an unbounded run must be realtime".to_string(),
            });
        }
        Ok(())
    }
}
