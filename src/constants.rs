//! Global constants for the channel localizer

/// Default number of channels to localize
pub const DEFAULT_NUM_CHANNELS: u32 = 64;

/// Default number of channels assigned along one arc
pub const DEFAULT_CHANNELS_PER_ARC: u32 = 8;

/// Default marker size handed to the renderer (points)
pub const DEFAULT_MARKER_SIZE: f32 = 6.0;

/// Default marker color when no per-channel colors are configured
pub const DEFAULT_MARKER_COLOR: [f32; 3] = [1.0, 0.0, 0.0];

/// File extensions recognised as slice images (lowercase, without dots)
pub const SLICE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tif", "tiff", "bmp"];

/// Slice id of a record that has not been placed yet
pub const UNSET_SLICE: u32 = 0;
