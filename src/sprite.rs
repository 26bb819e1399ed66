//! Packable sprite items
//!
//! A sprite is an owned RGBA pixel buffer plus the variant data the
//! descriptor needs: a file name for directory-scanned images, layout
//! metrics for rasterized glyphs. The closed enum keeps descriptor emission
//! exhaustive at compile time.

use crate::color::Rgba;
use crate::pixbuf::PixelBuffer;

/// Variant-specific sprite payload
#[derive(Debug, Clone, PartialEq)]
pub enum SpriteKind {
    /// Image loaded from a sprite directory, named by its file name
    Image { name: String },
    /// Rasterized font glyph with pixel-space layout metrics
    Glyph {
        code: u32,
        left: i32,
        top: i32,
        advance_x: i32,
    },
}

/// One packable item: variant payload plus its owned pixel data
#[derive(Debug, Clone)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub pixels: PixelBuffer<Rgba<u8>>,
}

impl Sprite {
    pub fn image(name: impl Into<String>, pixels: PixelBuffer<Rgba<u8>>) -> Self {
        Self {
            kind: SpriteKind::Image { name: name.into() },
            pixels,
        }
    }

    pub fn glyph(
        code: u32,
        left: i32,
        top: i32,
        advance_x: i32,
        pixels: PixelBuffer<Rgba<u8>>,
    ) -> Self {
        Self {
            kind: SpriteKind::Glyph {
                code,
                left,
                top,
                advance_x,
            },
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width() as u32
    }

    pub fn height(&self) -> u32 {
        self.pixels.height() as u32
    }

    /// Human-readable name for diagnostics
    pub fn label(&self) -> String {
        match &self.kind {
            SpriteKind::Image { name } => name.clone(),
            SpriteKind::Glyph { code, .. } => format!("U+{code:04X}"),
        }
    }
}
