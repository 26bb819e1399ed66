//! Sheet packing driver
//!
//! Places every sprite into as few fixed-size sheets as needed. Each pass
//! sorts the pending sprites largest-first, fills one fresh guillotine tree
//! as far as it will go, then starts another sheet for whatever is left.
//! Any sprite that fits a sheet on its own is therefore guaranteed to be
//! placed eventually; one that does not fails the whole run up front.

mod node;

use std::cmp::Reverse;

use crate::color::Rgba;
use crate::error::{AtlasError, AtlasResult};
use crate::pixbuf::PixelBuffer;
use crate::sprite::Sprite;
use self::node::Node;

/// Where one sprite ended up, in sheet pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Index into the sprite slice given to `pack`
    pub sprite: usize,
    pub x: u32,
    pub y: u32,
}

/// One finished sheet: composited pixels plus its placement records
pub struct Sheet {
    pub pixels: PixelBuffer<Rgba<u8>>,
    pub placements: Vec<Placement>,
}

/// Pack sprites into sheets of the given size with `border` empty pixels
/// guaranteed around every placed sprite.
pub fn pack(
    sprites: &[Sprite],
    sheet_width: u32,
    sheet_height: u32,
    border: u32,
) -> AtlasResult<Vec<Sheet>> {
    // fail before emitting anything if a sprite can never fit
    for sprite in sprites {
        if sprite.width() + 2 * border > sheet_width || sprite.height() + 2 * border > sheet_height
        {
            return Err(AtlasError::SpriteTooLarge {
                label: sprite.label(),
                width: sprite.width(),
                height: sprite.height(),
                border,
                sheet_width,
                sheet_height,
            });
        }
    }

    let mut pending: Vec<usize> = (0..sprites.len()).collect();
    let mut sheets = Vec::new();

    while !pending.is_empty() {
        // largest-first improves density; stable sort keeps ties predictable
        pending.sort_by_key(|&i| Reverse(sprites[i].width() as u64 * sprites[i].height() as u64));

        let mut root = Node::root(sheet_width, sheet_height);
        let before = pending.len();

        pending.retain(|&i| {
            !root.insert(
                i,
                sprites[i].width() + 2 * border,
                sprites[i].height() + 2 * border,
            )
        });

        let sheet = compose_sheet(sprites, &root, sheet_width, sheet_height, border);
        log::info!(
            "sheet {}: packed {} of {} sprites",
            sheets.len(),
            before - pending.len(),
            before
        );

        sheets.push(sheet);
    }

    Ok(sheets)
}

/// Composite every placed sprite into a sheet-sized buffer and record the
/// placements in depth-first tree order.
fn compose_sheet(
    sprites: &[Sprite],
    root: &Node,
    sheet_width: u32,
    sheet_height: u32,
    border: u32,
) -> Sheet {
    let mut pixels = PixelBuffer::new(sheet_width as usize, sheet_height as usize);
    let mut placements = Vec::new();

    root.visit_occupied(&mut |rect, sprite| {
        let x = rect.left + border;
        let y = rect.top + border;

        pixels.blit(&sprites[sprite].pixels, y as i32, x as i32);
        placements.push(Placement { sprite, x, y });

        log::debug!("placed '{}' at ({}, {})", sprites[sprite].label(), x, y);
    });

    Sheet { pixels, placements }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: usize, height: usize, value: u8) -> PixelBuffer<Rgba<u8>> {
        PixelBuffer::from_pixels(
            width,
            height,
            vec![Rgba::new(value, value, value, 255); width * height],
        )
    }

    fn named(name: &str, width: usize, height: usize) -> Sprite {
        Sprite::image(name, solid(width, height, 128))
    }

    fn padded_rects(sprites: &[Sprite], sheet: &Sheet, border: u32) -> Vec<(u32, u32, u32, u32)> {
        sheet
            .placements
            .iter()
            .map(|p| {
                (
                    p.x - border,
                    p.y - border,
                    sprites[p.sprite].width() + 2 * border,
                    sprites[p.sprite].height() + 2 * border,
                )
            })
            .collect()
    }

    #[test]
    fn test_exact_fit_single_sprite() {
        let border = 2;
        let sprites = vec![named("full", 60, 60)];

        let sheets = pack(&sprites, 64, 64, border).expect("fits exactly");

        assert_eq!(sheets.len(), 1);
        assert_eq!(
            sheets[0].placements,
            vec![Placement {
                sprite: 0,
                x: border,
                y: border
            }]
        );
    }

    #[test]
    fn test_too_large_sprite_fails_whole_run() {
        let sprites = vec![named("a", 10, 10), named("big", 300, 300)];

        match pack(&sprites, 256, 256, 0) {
            Err(AtlasError::SpriteTooLarge { label, .. }) => assert_eq!(label, "big"),
            other => panic!("expected SpriteTooLarge, got {:?}", other.map(|s| s.len())),
        }
    }

    #[test]
    fn test_border_counts_against_the_sheet_size() {
        let sprites = vec![named("a", 256, 256)];
        assert!(pack(&sprites, 256, 256, 1).is_err());
    }

    #[test]
    fn test_overflow_to_second_sheet() {
        // the sheet-filling sprite monopolizes sheet 0, the small ones
        // overflow together onto sheet 1
        let sprites = vec![
            named("a", 10, 10),
            named("b", 10, 10),
            named("c", 256, 256),
        ];

        let sheets = pack(&sprites, 256, 256, 0).expect("packs in two sheets");

        assert_eq!(sheets.len(), 2);
        assert_eq!(sheets[0].placements, vec![Placement { sprite: 2, x: 0, y: 0 }]);

        let mut on_second: Vec<usize> =
            sheets[1].placements.iter().map(|p| p.sprite).collect();
        on_second.sort_unstable();
        assert_eq!(on_second, vec![0, 1]);
    }

    #[test]
    fn test_every_sprite_placed_exactly_once() {
        let sprites: Vec<Sprite> = (0..30)
            .map(|i| named(&format!("s{i}"), 40 + (i % 5) * 10, 40 + (i % 3) * 20))
            .collect();

        let sheets = pack(&sprites, 128, 128, 2).expect("all sprites fit individually");

        let mut seen = vec![0usize; sprites.len()];
        for sheet in &sheets {
            for p in &sheet.placements {
                seen[p.sprite] += 1;
            }
        }
        assert!(seen.iter().all(|&n| n == 1), "placements: {:?}", seen);
    }

    #[test]
    fn test_padded_placements_never_overlap() {
        let sprites: Vec<Sprite> = (0..12)
            .map(|i| named(&format!("s{i}"), 10 + i * 4, 50 - i * 3))
            .collect();
        let border = 2;

        let sheets = pack(&sprites, 96, 96, border).expect("fits");

        for sheet in &sheets {
            let rects = padded_rects(&sprites, sheet, border);
            for (i, a) in rects.iter().enumerate() {
                for b in rects.iter().skip(i + 1) {
                    let disjoint = a.0 + a.2 <= b.0
                        || b.0 + b.2 <= a.0
                        || a.1 + a.3 <= b.1
                        || b.1 + b.3 <= a.1;
                    assert!(disjoint, "{:?} overlaps {:?}", a, b);
                }
            }
        }
    }

    #[test]
    fn test_sheet_pixels_carry_sprite_data() {
        let border = 1;
        let sprites = vec![Sprite::image("tile", solid(4, 4, 200))];

        let sheets = pack(&sprites, 8, 8, border).expect("fits");
        let sheet = &sheets[0];
        let p = sheet.placements[0];

        // sprite pixels land at the placement, border ring stays empty
        assert_eq!(
            sheet.pixels[(p.y as usize, p.x as usize)],
            Rgba::new(200, 200, 200, 255)
        );
        assert_eq!(sheet.pixels[(0, 0)], Rgba::default());
    }
}
