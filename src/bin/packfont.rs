//! Rasterize font glyph ranges and pack them into sprite sheets.

use std::path::{Path, PathBuf};
use std::process;

use anyhow::Result;
use clap::Parser;

use atlaspack::{
    constants, descriptor, packer, sheet_io, AtlasError, AtlasResult, ColorRamp, FontRenderer,
    GlyphStyle,
};

/// Rasterize code point ranges from a font and pack the glyphs into texture
/// atlas sheets
#[derive(Parser, Debug)]
#[command(name = "packfont", disable_help_flag = true)]
struct Args {
    /// Print help
    #[arg(long, action = clap::ArgAction::HelpLong)]
    help: Option<bool>,

    /// Border around each packed glyph, in pixels
    #[arg(short = 'b', value_name = "PIXELS", default_value_t = constants::DEFAULT_BORDER)]
    border: u32,

    /// Font size, in pixels
    #[arg(short = 's', value_name = "PIXELS", default_value_t = constants::DEFAULT_FONT_SIZE)]
    font_size: u32,

    /// Sheet width, in pixels
    #[arg(short = 'w', value_name = "PIXELS", default_value_t = constants::DEFAULT_SHEET_WIDTH)]
    width: u32,

    /// Sheet height, in pixels
    #[arg(short = 'h', value_name = "PIXELS", default_value_t = constants::DEFAULT_SHEET_HEIGHT)]
    height: u32,

    /// Outline radius, in pixels
    #[arg(short = 'g', value_name = "PIXELS", default_value_t = constants::DEFAULT_OUTLINE_RADIUS)]
    outline_radius: i32,

    /// Glyph fill color: AARRGGBB, or 2-3 colors joined by '-' for a gradient
    #[arg(short = 'i', value_name = "SPEC", default_value = constants::DEFAULT_INNER_COLOR)]
    inner_color: String,

    /// Outline color, same syntax as the fill color
    #[arg(short = 'o', value_name = "SPEC", default_value = constants::DEFAULT_OUTLINE_COLOR)]
    outline_color: String,

    /// Drop shadow opacity, between 0 and 1
    #[arg(short = 'S', value_name = "OPACITY", default_value_t = constants::DEFAULT_SHADOW_OPACITY)]
    shadow_opacity: f32,

    /// Drop shadow Gaussian blur radius, in pixels
    #[arg(short = 'B', value_name = "PIXELS", default_value_t = 0)]
    shadow_blur_radius: i32,

    /// Drop shadow x offset, in pixels
    #[arg(short = 'd', value_name = "PIXELS", default_value_t = 0)]
    shadow_dx: i32,

    /// Drop shadow y offset, in pixels
    #[arg(short = 'e', value_name = "PIXELS", default_value_t = 0)]
    shadow_dy: i32,

    /// Directory the sheet images are written to
    #[arg(short = 't', value_name = "DIR", default_value = constants::DEFAULT_TEXTURE_DIR)]
    texture_dir: String,

    /// TTF/OTF font file
    font: PathBuf,

    /// Base name for the descriptor and sheet image files
    sheet_name: String,

    /// Code point ranges: N or N-M, decimal or 0x-prefixed hex
    #[arg(required = true)]
    ranges: Vec<String>,
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    if let Err(err) = run(&args) {
        eprintln!("packfont: {err}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    if args.outline_radius < 0 {
        return Err(AtlasError::Config {
            what: "outline radius",
            value: args.outline_radius.to_string(),
        }
        .into());
    }
    if args.shadow_blur_radius < 0 {
        return Err(AtlasError::Config {
            what: "shadow blur radius",
            value: args.shadow_blur_radius.to_string(),
        }
        .into());
    }
    if !(0.0..=1.0).contains(&args.shadow_opacity) {
        return Err(AtlasError::Config {
            what: "shadow opacity",
            value: args.shadow_opacity.to_string(),
        }
        .into());
    }

    let style = GlyphStyle {
        outline_radius: args.outline_radius,
        inner: ColorRamp::parse(&args.inner_color)?,
        outline: ColorRamp::parse(&args.outline_color)?,
        shadow_dx: args.shadow_dx,
        shadow_dy: args.shadow_dy,
        shadow_opacity: args.shadow_opacity,
        shadow_blur_radius: args.shadow_blur_radius,
    };

    let renderer = FontRenderer::open(&args.font, args.font_size)?;

    let mut sprites = Vec::new();
    for range in &args.ranges {
        let (from, to) = parse_range(range)?;
        for code in from..=to {
            sprites.push(renderer.render_glyph(code, &style)?);
        }
    }
    log::info!("rasterized {} glyphs", sprites.len());

    let sheets = packer::pack(&sprites, args.width, args.height, args.border)?;

    let texture_paths = sheet_io::save_sheets(&sheets, &args.sheet_name, &args.texture_dir)?;

    let descriptor_path = format!("{}.spr", args.sheet_name);
    descriptor::write_descriptor(Path::new(&descriptor_path), &texture_paths, &sprites, &sheets)?;

    Ok(())
}

/// Parse a code point: decimal, or hex with an 0x prefix
fn parse_code_point(s: &str) -> AtlasResult<u32> {
    let bad = || AtlasError::Config {
        what: "code point",
        value: s.to_string(),
    };

    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).map_err(|_| bad())
    } else {
        s.parse().map_err(|_| bad())
    }
}

/// Parse a range argument: a single code point, or an inclusive `N-M` span
fn parse_range(s: &str) -> AtlasResult<(u32, u32)> {
    let (from, to) = match split_range(s) {
        Some((lo, hi)) => (parse_code_point(lo)?, parse_code_point(hi)?),
        None => {
            let v = parse_code_point(s)?;
            (v, v)
        }
    };

    if from > to {
        return Err(AtlasError::Config {
            what: "code point range",
            value: s.to_string(),
        });
    }

    Ok((from, to))
}

/// Split `N-M` on the separating dash, leaving hex prefixes intact
fn split_range(s: &str) -> Option<(&str, &str)> {
    // skip the first byte so a leading dash is not taken as a separator
    s.get(1..)?
        .find('-')
        .map(|i| (&s[..i + 1], &s[i + 2..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_code_point() {
        assert_eq!(parse_code_point("65").expect("decimal"), 65);
        assert_eq!(parse_code_point("0x41").expect("hex"), 0x41);
        assert_eq!(parse_code_point("0X7f").expect("hex"), 0x7f);
        assert!(parse_code_point("4g").is_err());
        assert!(parse_code_point("0x").is_err());
        assert!(parse_code_point("").is_err());
    }

    #[test]
    fn test_parse_range() {
        assert_eq!(parse_range("65").expect("single"), (65, 65));
        assert_eq!(parse_range("65-67").expect("span"), (65, 67));
        assert_eq!(parse_range("0x41-0x5a").expect("hex span"), (0x41, 0x5a));
        assert!(parse_range("67-65").is_err());
        assert!(parse_range("65-").is_err());
    }
}
