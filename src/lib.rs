//! atlaspack - texture atlas builder
//!
//! Packs rectangular pixel images into fixed-size sheets for real-time
//! rendering. Sprites come from two sources: directories of PNG images, or
//! glyphs rasterized from a vector font with outline, gradient fill and
//! drop-shadow compositing. The packer places them with a guillotine
//! best-fit tree, overflowing into additional sheets when one fills up, and
//! each run emits one PNG per sheet plus an XML descriptor locating every
//! sprite.
//!
//! The whole pipeline is single-threaded and fail-fast: any bad input or
//! I/O failure aborts the run with no partial output.

// Shared pixel types
pub mod color;
pub mod pixbuf;

// Sprite collection
pub mod font;
pub mod sheet_io;
pub mod sprite;

// Packing and output
pub mod descriptor;
pub mod packer;

// Support modules
pub mod constants;
pub mod error;

pub use color::Rgba;
pub use error::{AtlasError, AtlasResult};
pub use font::ramp::ColorRamp;
pub use font::{FontRenderer, GlyphStyle};
pub use packer::{pack, Placement, Sheet};
pub use pixbuf::PixelBuffer;
pub use sprite::{Sprite, SpriteKind};
