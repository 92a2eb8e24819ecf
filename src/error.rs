//! Error types for localizer operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while configuring or driving a localization session.
#[derive(Error, Debug)]
pub enum LocalizerError {
    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Channel index outside `1..=count`
    #[error("Channel {channel} is out of range (1..={count})")]
    ChannelOutOfRange {
        /// The offending channel
        channel: u32,
        /// Configured channel count
        count: u32,
    },

    /// Channel map does not have one entry per channel
    #[error("Channel map has {found} entries, expected {expected}")]
    ChannelMapLength {
        /// Configured channel count
        expected: usize,
        /// Length of the supplied map
        found: usize,
    },

    /// Per-channel colors given but fewer rows than channels
    #[error("Marker colors have {found} rows, need 1 or at least {required}")]
    InsufficientColors {
        /// Configured channel count
        required: usize,
        /// Number of color rows supplied
        found: usize,
    },

    /// Channel count must be at least one
    #[error("Channel count must be at least 1")]
    InvalidChannelCount,

    /// Arc sample count must be at least one
    #[error("Channels per arc must be at least 1")]
    InvalidArcLength,

    /// No slice images found in the source collection
    #[error("No slice images found in {path:?}")]
    NoSlices {
        /// Directory that was scanned
        path: PathBuf,
    },

    /// Slice offset too large for the ids of this stack
    #[error("Slice offset {offset} with {slices} slices exceeds the largest slice id")]
    SliceIdOverflow {
        /// Resolved offset
        offset: u32,
        /// Number of slices in the stack
        slices: usize,
    },

    /// Configuration version is newer than supported
    #[error("Configuration file version {file_version} is newer than supported version {supported_version}")]
    VersionTooNew {
        /// Version in the file
        file_version: u32,
        /// Highest version this build reads
        supported_version: u32,
    },

    /// No export format registered for the requested id or extension
    #[error("Unknown export format: {0}")]
    UnknownFormat(String),
}

impl LocalizerError {
    /// Create a channel out of range error.
    pub fn channel_out_of_range(channel: u32, count: u32) -> Self {
        Self::ChannelOutOfRange { channel, count }
    }

    /// Create a no slices error for a scanned directory.
    pub fn no_slices(path: impl Into<PathBuf>) -> Self {
        Self::NoSlices { path: path.into() }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, LocalizerError>;
