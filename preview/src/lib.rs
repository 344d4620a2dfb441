//! Preview engine: turns local files or remote URLs into small RGBA images for display.

mod fetch;
pub use fetch::fetch;
mod picture;
pub use picture::*;

/// Preview box used when the caller has no preference.
pub const DEFAULT_MAX_WIDTH: u32 = 400;
pub const DEFAULT_MAX_HEIGHT: u32 = 300;
