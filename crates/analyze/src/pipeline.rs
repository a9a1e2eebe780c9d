//! The five-stage geometric analysis pipeline: writing angle → price
//! detection → column clustering → total label → item association. Each
//! stage is a pure function of the receipt and the previous stages'
//! outputs; `ReceiptAnalyzer` runs them in the fixed order.

use std::collections::VecDeque;
use std::f64::consts::SQRT_2;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;
use tracing::{debug, warn};

use beleg_core::geometry::{
    angle_between, dist_to_line, perp_angle_diff, rotate, Point, IMAGE_CENTER,
};
use beleg_core::{Money, PriceParseError};

use crate::block::Block;
use crate::column::Column;
use crate::config::AnalyzeConfig;
use crate::document::{BlockType, TextDocument};
use crate::fuzzy::similarity_ratio;
use crate::item::{Item, ItemEntry, ReceiptSummary, TotalMatch};

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("Document contains no LINE blocks — cannot estimate a writing angle")]
    EmptyDocument,
    #[error(transparent)]
    Price(#[from] PriceParseError),
}

/// Decimal amount: one or more digits, a dot or comma, exactly two digits.
fn price_pattern() -> &'static Regex {
    static R: OnceLock<Regex> = OnceLock::new();
    R.get_or_init(|| Regex::new(r"\d+[.,]\d\d").expect("invalid regex"))
}

// ── Receipt ──────────────────────────────────────────────────────────────────

/// The raw block set partitioned by type, document order preserved.
#[derive(Debug, Clone)]
pub struct Receipt {
    lines: Vec<Block>,
    words: Vec<Block>,
}

impl Receipt {
    pub fn from_document(doc: &TextDocument) -> Self {
        let mut lines = Vec::new();
        let mut words = Vec::new();
        for raw in &doc.blocks {
            let block = Block::from_text_block(raw);
            match block.kind {
                BlockType::Line => lines.push(block),
                BlockType::Word => words.push(block),
            }
        }
        Receipt { lines, words }
    }

    pub fn lines(&self) -> &[Block] {
        &self.lines
    }

    pub fn words(&self) -> &[Block] {
        &self.words
    }
}

// ── Stages ───────────────────────────────────────────────────────────────────

/// Mean angle of the top edge of up to `angle_samples` Line blocks, strided
/// evenly across the document. Averaging damps per-line OCR skew noise;
/// the stride bounds cost on long receipts.
fn writing_angle(receipt: &Receipt, config: &AnalyzeConfig) -> Result<f64, AnalyzeError> {
    let lines = receipt.lines();
    if lines.is_empty() {
        return Err(AnalyzeError::EmptyDocument);
    }
    let samples = config.angle_samples.max(1);
    let stride = if lines.len() <= samples { 1 } else { lines.len() / samples };

    let mut sum = 0.0;
    let mut count = 0usize;
    for line in lines.iter().step_by(stride) {
        sum += angle_between(line.top_left(), line.top_right());
        count += 1;
    }
    Ok(sum / count as f64)
}

/// Indices (into the Word list) of blocks whose text carries a decimal
/// amount within the first three characters — the slack tolerates a short
/// leading currency symbol. Scan order is preserved.
fn detect_prices(receipt: &Receipt) -> Vec<usize> {
    receipt
        .words()
        .iter()
        .enumerate()
        .filter(|(_, word)| match price_pattern().find(&word.text) {
            Some(m) => word.text[..m.start()].chars().count() <= 2,
            None => false,
        })
        .map(|(idx, _)| idx)
        .collect()
}

/// Best-matching Word for the highest-priority label that clears the fuzzy
/// threshold. Priority is gated by the threshold: a lower-priority label
/// wins whenever every higher-priority one stays below it.
fn find_total_label(receipt: &Receipt, config: &AnalyzeConfig) -> Option<usize> {
    for label in &config.total_labels {
        let mut best: Option<(usize, f64)> = None;
        for (idx, word) in receipt.words().iter().enumerate() {
            let ratio = similarity_ratio(&word.text.to_lowercase(), label);
            if best.map_or(true, |(_, b)| ratio > b) {
                best = Some((idx, ratio));
            }
        }
        if let Some((idx, ratio)) = best {
            if ratio > config.total_match_threshold {
                debug!(label = %label, text = %receipt.words()[idx].text, ratio, "total label matched");
                return Some(idx);
            }
        }
    }
    None
}

/// Greedy single-pass clustering: the first unclustered price seeds a new
/// column and absorbs every remaining price whose connecting direction is
/// perpendicular to the writing direction within tolerance. Order-dependent
/// on the input list by design.
fn cluster_columns(
    receipt: &Receipt,
    prices: &[usize],
    angle: f64,
    config: &AnalyzeConfig,
) -> Vec<Column> {
    let words = receipt.words();
    let mut pool: VecDeque<usize> = prices.iter().copied().collect();
    let mut columns = Vec::new();

    while let Some(seed) = pool.pop_front() {
        let mut column = Column::new(seed);
        let seed_point = words[seed].top_right();
        pool.retain(|&candidate| {
            let pair_angle = angle_between(seed_point, words[candidate].top_right());
            if perp_angle_diff(angle, pair_angle) < config.column_angle_threshold {
                column.add(candidate);
                false
            } else {
                true
            }
        });
        columns.push(column);
    }
    columns
}

/// Index of the column with the greatest upright x — the rightmost visual
/// column, where receipts place their prices. First wins on exact ties.
fn rightmost_column(receipt: &Receipt, columns: &[Column], angle: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, column) in columns.iter().enumerate() {
        let x = column.rotated_x(receipt.words(), angle);
        if best.map_or(true, |(_, b)| x > b) {
            best = Some((idx, x));
        }
    }
    best.map(|(idx, _)| idx)
}

/// Resolve the Total: among all prices, the one whose upright left-center
/// sits nearest the horizontal ray at the label's upright height, provided
/// the label is strictly above it. Returns the match and the height below
/// which prices are excluded from the item list.
fn resolve_total(
    receipt: &Receipt,
    prices: &[usize],
    total_label: Option<usize>,
    angle: f64,
) -> Result<(Option<TotalMatch>, f64), AnalyzeError> {
    let words = receipt.words();
    let Some(label_idx) = total_label else {
        return Ok((None, 1.0));
    };
    let label_upright = rotate(-angle, words[label_idx].right_center(), IMAGE_CENTER);
    let total_height = label_upright.y;

    let ray_start = Point::new(0.0, total_height);
    let ray_end = Point::new(0.1, total_height);
    let mut best: Option<(usize, f64)> = None;
    for &price_idx in prices {
        let left_upright = rotate(-angle, words[price_idx].left_center(), IMAGE_CENTER);
        let dist = dist_to_line(ray_start, ray_end, left_upright);
        let current = best.map_or(SQRT_2, |(_, d)| d);
        if dist < current && label_upright.y < left_upright.y {
            best = Some((price_idx, dist));
        }
    }

    let total = match best {
        Some((price_idx, _)) => Some(TotalMatch {
            label_word: label_idx,
            price_word: price_idx,
            price: Money::from_receipt_text(&words[price_idx].text)?,
        }),
        None => None,
    };
    Ok((total, total_height))
}

/// Pair each price in the selected column with its description Line: the
/// nearest Line (by perpendicular distance to the price's center line)
/// that sits within the row threshold and clearly left of the price
/// column. Prices below the total line are non-item rows and skipped.
fn associate_items(
    receipt: &Receipt,
    column: &Column,
    total_height: f64,
    angle: f64,
    config: &AnalyzeConfig,
) -> Result<Vec<Item>, AnalyzeError> {
    let words = receipt.words();
    let mut items = Vec::new();

    for &price_idx in column.members() {
        let price = &words[price_idx];
        let bottom_upright = rotate(-angle, price.bottom_left(), IMAGE_CENTER);
        if bottom_upright.y > total_height {
            continue;
        }

        let left = price.left_center();
        let right = price.right_center();
        let left_upright = rotate(-angle, left, IMAGE_CENTER);

        let mut best: Option<(usize, f64)> = None;
        for (line_idx, line) in receipt.lines().iter().enumerate() {
            let dist = dist_to_line(left, right, line.centroid());
            if dist > config.row_dist_threshold {
                continue;
            }
            let centroid_upright = rotate(-angle, line.centroid(), IMAGE_CENTER);
            if centroid_upright.x + config.column_separator_threshold > left_upright.x {
                continue;
            }
            if best.map_or(true, |(_, d)| dist < d) {
                best = Some((line_idx, dist));
            }
        }

        match best {
            Some((line_idx, _)) => items.push(Item {
                desc_line: line_idx,
                price_word: price_idx,
                price: Money::from_receipt_text(&price.text)?,
            }),
            None => {
                warn!(text = %price.text, id = %price.id, "no description row for price; dropping");
            }
        }
    }
    Ok(items)
}

// ── Orchestrator ─────────────────────────────────────────────────────────────

/// Runs the full pipeline over one document. Stateless apart from its
/// configuration; distinct receipts may be analyzed from separate workers
/// without synchronization.
#[derive(Debug, Clone, Default)]
pub struct ReceiptAnalyzer {
    config: AnalyzeConfig,
}

impl ReceiptAnalyzer {
    pub fn new(config: AnalyzeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzeConfig {
        &self.config
    }

    pub fn analyze(&self, doc: &TextDocument) -> Result<ReceiptAnalysis, AnalyzeError> {
        let receipt = Receipt::from_document(doc);

        let angle = writing_angle(&receipt, &self.config)?;
        debug!(angle, "writing angle estimated");

        let prices = detect_prices(&receipt);
        debug!(count = prices.len(), "prices detected");

        let columns = cluster_columns(&receipt, &prices, angle, &self.config);
        debug!(count = columns.len(), "price columns clustered");

        let total_label = find_total_label(&receipt, &self.config);

        let (total, total_height) = resolve_total(&receipt, &prices, total_label, angle)?;
        let items = match rightmost_column(&receipt, &columns, angle) {
            Some(column_idx) => associate_items(
                &receipt,
                &columns[column_idx],
                total_height,
                angle,
                &self.config,
            )?,
            None => Vec::new(),
        };
        debug!(items = items.len(), total = total.is_some(), "association complete");

        Ok(ReceiptAnalysis { receipt, angle, prices, columns, total_label, total, items })
    }
}

/// Everything the pipeline computed, including the intermediate stage
/// outputs for inspection.
#[derive(Debug, Clone)]
pub struct ReceiptAnalysis {
    receipt: Receipt,
    angle: f64,
    prices: Vec<usize>,
    columns: Vec<Column>,
    total_label: Option<usize>,
    total: Option<TotalMatch>,
    items: Vec<Item>,
}

impl ReceiptAnalysis {
    pub fn receipt(&self) -> &Receipt {
        &self.receipt
    }

    /// Estimated writing angle in radians.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Detected price blocks in scan order.
    pub fn price_blocks(&self) -> impl Iterator<Item = &Block> {
        self.prices.iter().map(|&idx| &self.receipt.words[idx])
    }

    pub fn is_price(&self, word_idx: usize) -> bool {
        self.prices.contains(&word_idx)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn total_label_block(&self) -> Option<&Block> {
        self.total_label.map(|idx| &self.receipt.words[idx])
    }

    pub fn total(&self) -> Option<&TotalMatch> {
        self.total.as_ref()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// The external `{"total", "items"}` result.
    pub fn summary(&self) -> ReceiptSummary {
        ReceiptSummary {
            total: self.total.as_ref().map(|t| t.price),
            items: self
                .items
                .iter()
                .map(|item| ItemEntry {
                    desc: self.receipt.lines[item.desc_line].text.clone(),
                    price: item.price,
                })
                .collect(),
        }
    }

    pub fn to_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self.summary())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
