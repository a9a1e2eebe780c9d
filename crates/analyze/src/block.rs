use beleg_core::geometry::{midpoint, Point};

use crate::document::{BlockType, TextBlock};

/// One OCR fragment with its quadrilateral, ready for geometric reasoning.
/// Corner order is fixed by the input contract: top-left, top-right,
/// bottom-right, bottom-left. Every derived point is a pure function of the
/// polygon.
#[derive(Debug, Clone)]
pub struct Block {
    pub id: String,
    /// Recognition confidence, 0–100.
    pub confidence: f64,
    pub text: String,
    pub kind: BlockType,
    poly: [Point; 4],
}

impl Block {
    pub fn from_text_block(raw: &TextBlock) -> Self {
        let poly = raw.polygon.map(|p| Point::new(p.x, p.y));
        Block {
            id: raw.id.clone(),
            confidence: raw.confidence,
            text: raw.text.clone(),
            kind: raw.block_type,
            poly,
        }
    }

    pub fn top_left(&self) -> Point {
        self.poly[0]
    }

    pub fn top_right(&self) -> Point {
        self.poly[1]
    }

    pub fn bottom_right(&self) -> Point {
        self.poly[2]
    }

    pub fn bottom_left(&self) -> Point {
        self.poly[3]
    }

    pub fn left_center(&self) -> Point {
        midpoint(self.top_left(), self.bottom_left())
    }

    pub fn right_center(&self) -> Point {
        midpoint(self.top_right(), self.bottom_right())
    }

    pub fn top_center(&self) -> Point {
        midpoint(self.top_left(), self.top_right())
    }

    pub fn bottom_center(&self) -> Point {
        midpoint(self.bottom_left(), self.bottom_right())
    }

    pub fn centroid(&self) -> Point {
        midpoint(self.left_center(), self.right_center())
    }
}
