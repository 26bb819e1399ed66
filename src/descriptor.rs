//! Sprite sheet descriptor writer
//!
//! Emits the `.spr` XML file locating every packed sprite: a `<textures>`
//! list naming each sheet image, then one `<sprite>` element per placement
//! with the shared position attributes plus the variant-specific ones
//! (`name` for images; `code`, `left`, `top`, `advancex` for glyphs).
//!
//! The writer is a minimal element builder; the format is flat enough that
//! a full XML library would be dead weight.

use std::fmt::Display;
use std::fs;
use std::path::Path;

use crate::error::{AtlasError, AtlasResult};
use crate::packer::Sheet;
use crate::sprite::{Sprite, SpriteKind};

/// Write the descriptor for a finished packing run.
///
/// `texture_paths` must be in sheet order; the `tex` attribute of each
/// sprite is the index of its sheet in that list.
pub fn write_descriptor(
    path: &Path,
    texture_paths: &[String],
    sprites: &[Sprite],
    sheets: &[Sheet],
) -> AtlasResult<()> {
    let mut xml = XmlWriter::new();

    xml.open("spritesheet");

    xml.open("textures");
    for texture_path in texture_paths {
        xml.empty("texture", &[("path", texture_path as &dyn Display)]);
    }
    xml.close("textures");

    xml.open("sprites");
    for (tex, sheet) in sheets.iter().enumerate() {
        for placement in &sheet.placements {
            let sprite = &sprites[placement.sprite];

            let w = sprite.width();
            let h = sprite.height();

            match &sprite.kind {
                SpriteKind::Image { name } => xml.empty(
                    "sprite",
                    &[
                        ("x", &placement.x),
                        ("y", &placement.y),
                        ("w", &w),
                        ("h", &h),
                        ("tex", &tex),
                        ("name", name),
                    ],
                ),
                SpriteKind::Glyph {
                    code,
                    left,
                    top,
                    advance_x,
                } => xml.empty(
                    "sprite",
                    &[
                        ("x", &placement.x),
                        ("y", &placement.y),
                        ("w", &w),
                        ("h", &h),
                        ("tex", &tex),
                        ("code", code),
                        ("left", left),
                        ("top", top),
                        ("advancex", advance_x),
                    ],
                ),
            }
        }
    }
    xml.close("sprites");

    xml.close("spritesheet");

    fs::write(path, xml.finish()).map_err(|e| AtlasError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    log::info!("wrote descriptor {}", path.display());
    Ok(())
}

/// Just enough XML output for the descriptor format
struct XmlWriter {
    out: String,
    depth: usize,
}

impl XmlWriter {
    fn new() -> Self {
        Self {
            out: String::from("<?xml version=\"1.0\" ?>\n"),
            depth: 0,
        }
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
    }

    fn open(&mut self, tag: &str) {
        self.indent();
        self.out.push('<');
        self.out.push_str(tag);
        self.out.push_str(">\n");
        self.depth += 1;
    }

    fn close(&mut self, tag: &str) {
        self.depth -= 1;
        self.indent();
        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push_str(">\n");
    }

    fn empty(&mut self, tag: &str, attrs: &[(&str, &dyn Display)]) {
        self.indent();
        self.out.push('<');
        self.out.push_str(tag);
        for (key, value) in attrs {
            self.out.push(' ');
            self.out.push_str(key);
            self.out.push_str("=\"");
            self.out.push_str(&escape(&value.to_string()));
            self.out.push('"');
        }
        self.out.push_str("/>\n");
    }

    fn finish(self) -> String {
        debug_assert_eq!(self.depth, 0);
        self.out
    }
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::packer::{Placement, Sheet};
    use crate::pixbuf::PixelBuffer;

    fn sheet(placements: Vec<Placement>) -> Sheet {
        Sheet {
            pixels: PixelBuffer::<Rgba<u8>>::new(16, 16),
            placements,
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b>&\"c\"'d'"), "a&lt;b&gt;&amp;&quot;c&quot;&apos;d&apos;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_descriptor_output() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("ui.spr");

        let sprites = vec![
            Sprite::image("a&b.png", PixelBuffer::new(4, 6)),
            Sprite::glyph(65, 1, 8, 9, PixelBuffer::new(5, 7)),
        ];
        let sheets = vec![sheet(vec![
            Placement { sprite: 0, x: 2, y: 2 },
            Placement { sprite: 1, x: 8, y: 2 },
        ])];

        write_descriptor(
            &path,
            &["./ui.0.png".to_string()],
            &sprites,
            &sheets,
        )
        .expect("descriptor written");

        let written = std::fs::read_to_string(&path).expect("readable");
        let expected = "\
<?xml version=\"1.0\" ?>
<spritesheet>
  <textures>
    <texture path=\"./ui.0.png\"/>
  </textures>
  <sprites>
    <sprite x=\"2\" y=\"2\" w=\"4\" h=\"6\" tex=\"0\" name=\"a&amp;b.png\"/>
    <sprite x=\"8\" y=\"2\" w=\"5\" h=\"7\" tex=\"0\" code=\"65\" left=\"1\" top=\"8\" advancex=\"9\"/>
  </sprites>
</spritesheet>
";
        assert_eq!(written, expected);
    }
}
