//! Configuration file support for the localizer.
//!
//! A session is configured from a JSON file. Every field except `version`
//! has a default, so `{"version": 1}` is a complete config. Validation runs
//! before any session state is created; an invalid config is fatal.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CHANNELS_PER_ARC, DEFAULT_MARKER_COLOR, DEFAULT_MARKER_SIZE, DEFAULT_NUM_CHANNELS,
};
use crate::error::{LocalizerError, Result};
use crate::keybindings::KeyBindings;
use crate::model::ChannelMap;
use crate::slices::SliceOffset;

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalizerConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Number of channels to localize (N)
    #[serde(default = "default_num_channels")]
    pub num_channels: u32,

    /// Samples taken along one arc (K)
    #[serde(default = "default_channels_per_arc")]
    pub num_channels_per_arc: u32,

    /// Physical channel id per channel; identity when absent
    #[serde(default)]
    pub channel_map: Option<Vec<u32>>,

    /// Marker size passed through to the renderer
    #[serde(default = "default_marker_size")]
    pub marker_size: f32,

    /// Marker colors: one shared row, or one row per channel
    #[serde(default)]
    pub cdata: Option<Vec<[f32; 3]>>,

    /// How slice ids are offset from stack positions
    #[serde(default)]
    pub slice_offset: SliceOffset,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Keybinding configuration
    #[serde(default)]
    pub keybindings: KeyBindings,
}

fn default_num_channels() -> u32 {
    DEFAULT_NUM_CHANNELS
}

fn default_channels_per_arc() -> u32 {
    DEFAULT_CHANNELS_PER_ARC
}

fn default_marker_size() -> f32 {
    DEFAULT_MARKER_SIZE
}

impl LocalizerConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            num_channels: default_num_channels(),
            num_channels_per_arc: default_channels_per_arc(),
            channel_map: None,
            marker_size: default_marker_size(),
            cdata: None,
            slice_offset: SliceOffset::default(),
            log_level: LogLevel::default(),
            keybindings: KeyBindings::default(),
        }
    }

    /// Defaults with a given channel count and arc length.
    pub fn with_channels(num_channels: u32, num_channels_per_arc: u32) -> Self {
        Self {
            num_channels,
            num_channels_per_arc,
            ..Self::new()
        }
    }

    /// Check every constraint a session relies on.
    pub fn validate(&self) -> Result<()> {
        if self.num_channels == 0 {
            return Err(LocalizerError::InvalidChannelCount);
        }
        if self.num_channels_per_arc == 0 {
            return Err(LocalizerError::InvalidArcLength);
        }
        self.channel_map()?;
        if let Some(rows) = &self.cdata {
            let required = self.num_channels as usize;
            if rows.len() != 1 && rows.len() < required {
                return Err(LocalizerError::InsufficientColors {
                    required,
                    found: rows.len(),
                });
            }
        }
        Ok(())
    }

    /// Resolved channel map (explicit or identity).
    pub fn channel_map(&self) -> Result<ChannelMap> {
        ChannelMap::from_config(self.channel_map.as_deref(), self.num_channels)
    }

    /// Marker color for a 1-based channel.
    pub fn color_for(&self, channel: u32) -> [f32; 3] {
        match self.cdata.as_deref() {
            Some([shared]) => *shared,
            Some(rows) => channel
                .checked_sub(1)
                .and_then(|i| rows.get(i as usize))
                .copied()
                .unwrap_or(DEFAULT_MARKER_COLOR),
            None => DEFAULT_MARKER_COLOR,
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize and validate configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(LocalizerError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        config.validate()?;
        Ok(config)
    }

    /// Read and validate a config file.
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Get the default filename for config export.
    pub fn default_filename() -> &'static str {
        "chanloc-config.json"
    }

    /// Get the default config file path for auto-load/save.
    pub fn default_path() -> Option<std::path::PathBuf> {
        // Try to use XDG config directory, fall back to home directory
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("chanloc").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("chanloc")
                    .join(Self::default_filename())
            })
        }
    }

    /// Load the config at `path` if the file exists.
    ///
    /// A missing file is `Ok(None)`; an unreadable or invalid one is an error.
    pub fn load_if_exists(path: &std::path::Path) -> Result<Option<Self>> {
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return Ok(None);
        }
        Self::load(path).map(Some)
    }

    /// Load configuration from the default path, if there is one.
    pub fn load_from_default_path() -> Result<Option<Self>> {
        match Self::default_path() {
            Some(path) => Self::load_if_exists(&path),
            None => Ok(None),
        }
    }

    /// Save configuration to the default path.
    pub fn save_to_default_path(&self) -> Result<()> {
        let path = Self::default_path().ok_or_else(|| {
            LocalizerError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config directory",
            ))
        })?;

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = self.to_json()?;
        std::fs::write(&path, json)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }
}

impl Default for LocalizerConfig {
    fn default() -> Self {
        Self::new()
    }
}
