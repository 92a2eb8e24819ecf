//! Data models for the channel localizer.

mod channel_map;
mod geometry;
mod record;

pub use channel_map::ChannelMap;
pub use geometry::{ImagePoint, Pixel};
pub use record::{AnnotationRecord, Placement};
