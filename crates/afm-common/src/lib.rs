//! Common types and utilities shared across the AFM surface viewer crates.

pub mod channel;
pub mod config;
pub mod error;
pub mod grid;
pub mod style;

pub use channel::{ChannelKind, ChannelPreset, ClipRange, PeakForceProperty};
pub use config::PresetConfig;
pub use error::{AfmError, AfmResult, ConfigError, ParseError, ParseResult, RenderError, RenderResult};
pub use grid::{Grid, GridShape};
pub use style::Colorscale;
