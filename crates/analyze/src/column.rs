use beleg_core::geometry::{rotate, IMAGE_CENTER};

use crate::block::Block;

/// A cluster of price Words judged to sit on one vertical price-alignment
/// line. Members are indices into the receipt's Word list; a column always
/// has at least one member.
#[derive(Debug, Clone)]
pub struct Column {
    members: Vec<usize>,
}

impl Column {
    pub fn new(seed: usize) -> Self {
        Column { members: vec![seed] }
    }

    pub fn add(&mut self, member: usize) {
        self.members.push(member);
    }

    pub fn members(&self) -> &[usize] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Mean x of the members' top-right corners in the upright frame —
    /// used to rank columns left to right regardless of camera tilt.
    pub fn rotated_x(&self, words: &[Block], angle: f64) -> f64 {
        let sum: f64 = self
            .members
            .iter()
            .map(|&idx| rotate(-angle, words[idx].top_right(), IMAGE_CENTER).x)
            .sum();
        sum / self.members.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{BlockType, BoundingBox, PolyPoint, TextBlock};
    use std::f64::consts::FRAC_PI_4;

    fn word_at(left: f64, top: f64) -> Block {
        let (right, bottom) = (left + 0.1, top + 0.03);
        Block::from_text_block(&TextBlock {
            id: "w".into(),
            confidence: 99.0,
            text: "1,00".into(),
            block_type: BlockType::Word,
            polygon: [
                PolyPoint { x: left, y: top },
                PolyPoint { x: right, y: top },
                PolyPoint { x: right, y: bottom },
                PolyPoint { x: left, y: bottom },
            ],
            bounding_box: BoundingBox { top, left, width: 0.1, height: 0.03 },
        })
    }

    #[test]
    fn rotated_x_is_mean_of_member_corners() {
        let words = vec![word_at(0.6, 0.2), word_at(0.8, 0.5)];
        let mut col = Column::new(0);
        col.add(1);
        // Upright receipt: rotated x equals the raw top-right x.
        let x = col.rotated_x(&words, 0.0);
        assert!((x - (0.7 + 0.9) / 2.0).abs() < 1e-12);
    }

    #[test]
    fn rotated_x_compensates_writing_angle() {
        let words = vec![word_at(0.6, 0.3)];
        let col = Column::new(0);
        let upright = col.rotated_x(&words, 0.0);
        // Rotating the measurement frame back and forth must agree.
        let tilted_word = {
            let b = word_at(0.6, 0.3);
            let poly = [b.top_left(), b.top_right(), b.bottom_right(), b.bottom_left()]
                .map(|p| rotate(FRAC_PI_4, p, IMAGE_CENTER));
            Block::from_text_block(&TextBlock {
                id: "w".into(),
                confidence: 99.0,
                text: "1,00".into(),
                block_type: BlockType::Word,
                polygon: poly.map(|p| PolyPoint { x: p.x, y: p.y }),
                bounding_box: BoundingBox { top: 0.0, left: 0.0, width: 0.1, height: 0.03 },
            })
        };
        let tilted = Column::new(0).rotated_x(&[tilted_word], FRAC_PI_4);
        assert!((upright - tilted).abs() < 1e-9);
    }
}
