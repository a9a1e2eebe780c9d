pub mod block;
pub mod column;
pub mod config;
pub mod document;
pub mod fuzzy;
pub mod item;
pub mod pipeline;

pub use block::Block;
pub use column::Column;
pub use config::AnalyzeConfig;
pub use document::{BlockType, BoundingBox, PolyPoint, TextBlock, TextDocument};
pub use fuzzy::{levenshtein_distance, similarity_ratio};
pub use item::{Item, ItemEntry, ReceiptSummary, TotalMatch};
pub use pipeline::{AnalyzeError, Receipt, ReceiptAnalysis, ReceiptAnalyzer};
