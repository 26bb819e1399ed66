//! Guillotine packing tree
//!
//! A sheet is partitioned by a binary tree of rectangles. A node is either a
//! leaf (free, or occupied by exactly one sprite) or an internal node with
//! exactly two children produced by one straight cut. The tree starts as a
//! single root leaf covering the whole sheet and only grows by splitting a
//! leaf that is bigger than the rectangle being placed.

/// Axis-aligned region of a sheet, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Cut into left/right parts, the left one `at` pixels wide
    fn split_vert(&self, at: u32) -> (Rect, Rect) {
        debug_assert!(at < self.width);
        (
            Rect {
                width: at,
                ..*self
            },
            Rect {
                left: self.left + at,
                width: self.width - at,
                ..*self
            },
        )
    }

    /// Cut into top/bottom parts, the top one `at` pixels tall
    fn split_horiz(&self, at: u32) -> (Rect, Rect) {
        debug_assert!(at < self.height);
        (
            Rect {
                height: at,
                ..*self
            },
            Rect {
                top: self.top + at,
                height: self.height - at,
                ..*self
            },
        )
    }
}

pub struct Node {
    rect: Rect,
    occupant: Option<usize>,
    children: Option<Box<(Node, Node)>>,
}

impl Node {
    /// Fresh single-leaf tree covering a whole sheet
    pub fn root(sheet_width: u32, sheet_height: u32) -> Self {
        Self::leaf(Rect {
            left: 0,
            top: 0,
            width: sheet_width,
            height: sheet_height,
        })
    }

    fn leaf(rect: Rect) -> Self {
        Self {
            rect,
            occupant: None,
            children: None,
        }
    }

    /// Place a sprite's padded rectangle, returning whether it fit.
    ///
    /// Internal nodes delegate to the left subtree first. A free leaf that
    /// fits exactly is occupied outright; a bigger leaf is split along the
    /// axis with the larger leftover slack and the placement recurses into
    /// the first child, which was cut to the exact requested size.
    pub fn insert(&mut self, sprite: usize, width: u32, height: u32) -> bool {
        if let Some(children) = &mut self.children {
            return children.0.insert(sprite, width, height)
                || children.1.insert(sprite, width, height);
        }

        // doesn't fit or already occupied
        if self.occupant.is_some() || self.rect.width < width || self.rect.height < height {
            return false;
        }

        if self.rect.width == width && self.rect.height == height {
            self.occupant = Some(sprite);
            return true;
        }

        let (first, second) = if self.rect.width - width > self.rect.height - height {
            self.rect.split_vert(width)
        } else {
            self.rect.split_horiz(height)
        };

        let mut left = Node::leaf(first);
        let placed = left.insert(sprite, width, height);
        debug_assert!(placed, "freshly cut child must fit its sprite");

        self.children = Some(Box::new((left, Node::leaf(second))));
        placed
    }

    /// Visit every occupied leaf depth-first, left subtree before right.
    ///
    /// This order is what makes placement records deterministic per sheet.
    pub fn visit_occupied<F: FnMut(&Rect, usize)>(&self, f: &mut F) {
        if let Some(children) = &self.children {
            children.0.visit_occupied(f);
            children.1.visit_occupied(f);
        } else if let Some(sprite) = self.occupant {
            f(&self.rect, sprite);
        }
    }
}
