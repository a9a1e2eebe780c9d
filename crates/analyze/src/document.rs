//! Serde model of the document-text-detection output this crate consumes.
//! The schema is a fixed external contract — field names and shapes follow
//! the service, not this crate.

use serde::{Deserialize, Serialize};

/// One OCR document: the ordered block list as returned by the
/// text-detection service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextDocument {
    pub blocks: Vec<TextBlock>,
}

/// One raw text fragment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBlock {
    pub id: String,
    /// Recognition confidence, 0–100.
    pub confidence: f64,
    pub text: String,
    #[serde(rename = "type")]
    pub block_type: BlockType,
    /// Quadrilateral in clockwise order starting top-left, coordinates
    /// normalized to [0,1]. The fixed-size array enforces the 4-point
    /// invariant at deserialization time.
    pub polygon: [PolyPoint; 4],
    #[serde(rename = "boundingBox")]
    pub bounding_box: BoundingBox,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockType {
    #[serde(rename = "LINE")]
    Line,
    #[serde(rename = "WORD")]
    Word,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PolyPoint {
    pub x: f64,
    pub y: f64,
}

/// Axis-aligned box supplied by the service. Carried through for
/// completeness; the analysis works on the polygon.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoundingBox {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "blocks": [
            {
                "id": "b-1",
                "confidence": 99.2,
                "text": "Apples 1,99",
                "type": "LINE",
                "polygon": [
                    {"x": 0.1, "y": 0.2}, {"x": 0.5, "y": 0.2},
                    {"x": 0.5, "y": 0.25}, {"x": 0.1, "y": 0.25}
                ],
                "boundingBox": {"top": 0.2, "left": 0.1, "width": 0.4, "height": 0.05}
            },
            {
                "id": "b-2",
                "confidence": 97.0,
                "text": "1,99",
                "type": "WORD",
                "polygon": [
                    {"x": 0.4, "y": 0.2}, {"x": 0.5, "y": 0.2},
                    {"x": 0.5, "y": 0.25}, {"x": 0.4, "y": 0.25}
                ],
                "boundingBox": {"top": 0.2, "left": 0.4, "width": 0.1, "height": 0.05}
            }
        ]
    }"#;

    #[test]
    fn parses_service_output() {
        let doc: TextDocument = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(doc.blocks.len(), 2);
        assert_eq!(doc.blocks[0].block_type, BlockType::Line);
        assert_eq!(doc.blocks[1].block_type, BlockType::Word);
        assert_eq!(doc.blocks[1].text, "1,99");
        assert_eq!(doc.blocks[0].polygon[1].x, 0.5);
    }

    #[test]
    fn rejects_wrong_polygon_arity() {
        let bad = SAMPLE.replacen(r#"{"x": 0.1, "y": 0.2}, "#, "", 1);
        assert!(serde_json::from_str::<TextDocument>(&bad).is_err());
    }

    #[test]
    fn rejects_unknown_block_type() {
        let bad = SAMPLE.replace("\"WORD\"", "\"CELL\"");
        assert!(serde_json::from_str::<TextDocument>(&bad).is_err());
    }
}
