//! chanloc - Channel Localizer
//!
//! Core of a tool for manually localizing a fixed set of numbered channels
//! (electrode or probe positions) on a stack of cross-sectional images.
//! Each channel gets one pixel coordinate and the slice it was placed on.
//!
//! The crate holds the annotation state machine only; windowing, image
//! decoding and drawing belong to the shell that feeds [`InputEvent`]s into a
//! [`Controller`] and draws its [`OverlaySet`].

pub mod arc;
pub mod config;
pub mod constants;
pub mod controller;
pub mod display;
pub mod error;
pub mod export;
pub mod input;
pub mod keybindings;
pub mod model;
pub mod slices;
pub mod store;
pub mod undo;

pub use config::LocalizerConfig;
pub use controller::{Controller, ControllerState, Response};
pub use display::OverlaySet;
pub use error::LocalizerError;
pub use input::{Action, InputEvent, Key, Modifiers};
pub use slices::{SliceOffset, SliceStack};
