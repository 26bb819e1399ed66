//! Glyph rasterization and compositing
//!
//! Turns one code point into a colored, outlined, optionally drop-shadowed
//! RGBA sprite. The font engine (fontdue) only contributes the grayscale
//! coverage bitmap and layout metrics; everything visible is built here:
//! soft-dilated outline mask, row-constant gradient fill, and glyph-over-
//! shadow compositing with a separable Gaussian blur.

pub mod ramp;

use std::fs;
use std::path::Path;

use crate::color::Rgba;
use crate::error::{AtlasError, AtlasResult};
use crate::pixbuf::PixelBuffer;
use crate::sprite::Sprite;
use self::ramp::ColorRamp;

/// Per-glyph rendering parameters, fixed for a whole packing run
#[derive(Debug, Clone)]
pub struct GlyphStyle {
    /// Outline thickness in pixels; 0 disables the outline
    pub outline_radius: i32,
    pub inner: ColorRamp,
    pub outline: ColorRamp,
    pub shadow_dx: i32,
    pub shadow_dy: i32,
    pub shadow_opacity: f32,
    pub shadow_blur_radius: i32,
}

impl Default for GlyphStyle {
    fn default() -> Self {
        Self {
            outline_radius: 2,
            inner: ColorRamp::Flat(Rgba::new(255.0, 255.0, 255.0, 255.0)),
            outline: ColorRamp::Flat(Rgba::new(0.0, 0.0, 0.0, 255.0)),
            shadow_dx: 0,
            shadow_dy: 0,
            shadow_opacity: 0.2,
            shadow_blur_radius: 0,
        }
    }
}

impl GlyphStyle {
    fn has_shadow(&self) -> bool {
        self.shadow_dx != 0 || self.shadow_dy != 0 || self.shadow_blur_radius != 0
    }
}

/// Font face handle with a fixed pixel size
///
/// Created once per run and passed by reference into every rasterization
/// call; there is no process-wide font engine state.
pub struct FontRenderer {
    font: fontdue::Font,
    px: f32,
}

impl FontRenderer {
    /// Load a TTF/OTF font and fix the rendering size in pixels
    pub fn open(path: &Path, size: u32) -> AtlasResult<Self> {
        let bytes = fs::read(path).map_err(|e| AtlasError::ResourceLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default()).map_err(
            |e| AtlasError::ResourceLoad {
                path: path.to_path_buf(),
                reason: e.to_string(),
            },
        )?;

        log::debug!("loaded font {} at {}px", path.display(), size);

        Ok(Self {
            font,
            px: size as f32,
        })
    }

    /// Rasterize and composite one code point into a glyph sprite
    pub fn render_glyph(&self, code: u32, style: &GlyphStyle) -> AtlasResult<Sprite> {
        let ch = char::from_u32(code).ok_or(AtlasError::FontRender { code })?;

        if self.font.lookup_glyph_index(ch) == 0 {
            return Err(AtlasError::FontRender { code });
        }

        let (metrics, coverage) = self.font.rasterize(ch, self.px);

        let coverage = PixelBuffer::from_pixels(
            metrics.width,
            metrics.height,
            coverage.iter().map(|&v| v as f32 / 255.0).collect(),
        );

        let pixels = compose_glyph(&coverage, style);

        // pixel-space layout metrics: left/top are the horizontal bearings,
        // top measured from the baseline up to the bitmap's top edge
        let left = metrics.xmin;
        let top = metrics.ymin + metrics.height as i32;
        let advance_x = metrics.advance_width.round() as i32;

        log::debug!(
            "rendered U+{:04X}: {}x{} left={} top={} advance={}",
            code,
            pixels.width(),
            pixels.height(),
            left,
            top,
            advance_x
        );

        Ok(Sprite::glyph(code, left, top, advance_x, pixels))
    }
}

/// Destination canvas size and the coverage offset within it
#[derive(Debug, Clone, Copy, PartialEq)]
struct Canvas {
    width: usize,
    height: usize,
    offset_x: i32,
    offset_y: i32,
}

/// Pad the coverage size by the outline radius on all sides, then grow
/// whichever sides the shadow offset and blur extend past the glyph.
///
/// Only the side in the shadow's direction grows; the opposite side stays
/// put, and a pure blur with no offset grows nothing.
fn styled_canvas(src_width: usize, src_height: usize, style: &GlyphStyle) -> Canvas {
    let r = style.outline_radius;

    let mut width = src_width as i32 + 2 * r;
    let mut height = src_height as i32 + 2 * r;
    let mut offset_x = r;
    let mut offset_y = r;

    if style.shadow_dx < 0 {
        width += -style.shadow_dx + style.shadow_blur_radius;
        offset_x += -style.shadow_dx + style.shadow_blur_radius;
    } else if style.shadow_dx > 0 {
        width += style.shadow_dx + style.shadow_blur_radius;
    }

    if style.shadow_dy < 0 {
        height += -style.shadow_dy + style.shadow_blur_radius;
        offset_y += -style.shadow_dy + style.shadow_blur_radius;
    } else if style.shadow_dy > 0 {
        height += style.shadow_dy + style.shadow_blur_radius;
    }

    Canvas {
        width: width as usize,
        height: height as usize,
        offset_x,
        offset_y,
    }
}

/// Run the full compositing pipeline over a normalized coverage bitmap
pub(crate) fn compose_glyph(
    coverage: &PixelBuffer<f32>,
    style: &GlyphStyle,
) -> PixelBuffer<Rgba<u8>> {
    let canvas = styled_canvas(coverage.width(), coverage.height(), style);

    let mut lum = PixelBuffer::<f32>::new(canvas.width, canvas.height);
    lum.blit(coverage, canvas.offset_y, canvas.offset_x);

    let mask = dilate(&lum, style.outline_radius);

    let mut colored = colorize(&lum, &mask, &style.inner, &style.outline);

    if style.has_shadow() {
        composite_shadow(&mut colored, style);
    }

    colored.map(|c| (c * 255.0).to_bytes())
}

/// Soft morphological dilation producing the outline mask.
///
/// Disk kernel of the given radius: weight 1 inside the radius, a linear
/// fade to 0 across the unit annulus beyond it. Each output pixel is the max
/// of `weight * coverage` over the in-bounds neighborhood, so the outline
/// edge ramps off smoothly instead of stepping.
pub(crate) fn dilate(im: &PixelBuffer<f32>, radius: i32) -> PixelBuffer<f32> {
    let size = (2 * radius + 1) as usize;
    let mut kernel = vec![0.0f32; size * size];

    for i in 0..size {
        for j in 0..size {
            let dr = i as i32 - radius;
            let dc = j as i32 - radius;

            let l = ((dr * dr + dc * dc) as f32).sqrt();

            kernel[i * size + j] = if l <= radius as f32 {
                1.0
            } else if l < radius as f32 + 1.0 {
                1.0 - (l - radius as f32)
            } else {
                0.0
            };
        }
    }

    let width = im.width() as i32;
    let height = im.height() as i32;
    let mut out = PixelBuffer::new(im.width(), im.height());

    for i in 0..height {
        for j in 0..width {
            let mut v = 0.0f32;

            for dr in -radius..=radius {
                for dc in -radius..=radius {
                    let r = i + dr;
                    let c = j + dc;

                    if r >= 0 && r < height && c >= 0 && c < width {
                        let w = kernel[((dr + radius) * size as i32 + dc + radius) as usize];
                        v = v.max(w * im[(r as usize, c as usize)]);
                    }
                }
            }

            out[(i as usize, j as usize)] = v;
        }
    }

    out
}

/// Blend inner and outline ramps by coverage, masked by the dilated outline.
///
/// The gradient parameter is the row's fraction of the whole canvas height
/// and both ramps are sampled once per row, not per pixel. The outline
/// padding is not subtracted from the fraction, so the gradient shifts
/// slightly on padded canvases; accepted approximation.
pub(crate) fn colorize(
    lum: &PixelBuffer<f32>,
    mask: &PixelBuffer<f32>,
    inner: &ColorRamp,
    outline: &ColorRamp,
) -> PixelBuffer<Rgba<f32>> {
    let width = lum.width();
    let height = lum.height();
    let mut out = PixelBuffer::new(width, height);

    for i in 0..height {
        let t = i as f32 / height as f32;

        let c0 = inner.sample(t) * (1.0 / 255.0);
        let c1 = outline.sample(t) * (1.0 / 255.0);

        for j in 0..width {
            let l = lum[(i, j)];

            let mut c = c0 * l + c1 * (1.0 - l);
            c.a *= mask[(i, j)];

            out[(i, j)] = c;
        }
    }

    out
}

/// Generate the drop shadow from the glyph's own alpha and composite the
/// glyph over it.
///
/// The shadow is the alpha channel shifted by the offset, scaled by the
/// opacity and blurred. For foreground alpha `a` and shadow alpha `s` the
/// uncovered shadow contribution is `da = s*(1-a)`; where it is positive the
/// color is renormalized by `a/(a+da)` and the alphas add.
pub(crate) fn composite_shadow(colored: &mut PixelBuffer<Rgba<f32>>, style: &GlyphStyle) {
    let alpha = colored.map(|c| c.a);

    let mut shadow = PixelBuffer::<f32>::new(alpha.width(), alpha.height());
    shadow.blit(&alpha, style.shadow_dy, style.shadow_dx);
    shadow.scale_in_place(style.shadow_opacity);
    shadow.gaussian_blur(style.shadow_blur_radius);

    for (c, &s) in colored.pixels_mut().iter_mut().zip(shadow.pixels()) {
        let a = c.a;
        let da = s * (1.0 - a);

        if da > 0.0 {
            let t = a / (a + da);

            c.r *= t;
            c.g *= t;
            c.b *= t;

            c.a += da;
        }
    }
}
