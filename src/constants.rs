//! Tool-wide defaults
//!
//! Shared between the two binaries so their option defaults cannot drift.

/// Default sheet dimensions in pixels
pub const DEFAULT_SHEET_WIDTH: u32 = 256;
pub const DEFAULT_SHEET_HEIGHT: u32 = 256;

/// Default empty padding around every packed sprite, in pixels
pub const DEFAULT_BORDER: u32 = 2;

/// Default directory for emitted sheet images
pub const DEFAULT_TEXTURE_DIR: &str = ".";

/// Font-mode defaults
pub const DEFAULT_FONT_SIZE: u32 = 16;
pub const DEFAULT_OUTLINE_RADIUS: i32 = 2;
pub const DEFAULT_SHADOW_OPACITY: f32 = 0.2;
pub const DEFAULT_INNER_COLOR: &str = "ffffffff";
pub const DEFAULT_OUTLINE_COLOR: &str = "ff000000";
