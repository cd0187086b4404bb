//! Span -> block merging.
//!
//! Spans are sorted into reading order and folded into blocks with a single
//! "current" block threaded through the iteration. A span joins the current
//! block when it sits on the same page, starts within `y_threshold` of the
//! block's bottom, has a near-identical font size and (optionally) starts at
//! roughly the same left edge. Anything else seals the block.

use std::cmp::Ordering;

use log::debug;

use super::cleanup::repair_hyphenation;
use crate::config::MergeConfig;
use crate::types::{Block, Span};

/// Reading order: page, then top, with the remaining fields as tie-breakers so
/// that the result does not depend on the input permutation.
fn reading_order(a: &Span, b: &Span) -> Ordering {
    a.page
        .cmp(&b.page)
        .then(a.top.total_cmp(&b.top))
        .then(a.left.total_cmp(&b.left))
        .then_with(|| a.text.cmp(&b.text))
        .then(a.font_size.total_cmp(&b.font_size))
        .then(a.bottom.total_cmp(&b.bottom))
        .then(a.right.total_cmp(&b.right))
}

/// Whether `span` continues `current` as a wrapped line.
fn continues_block(current: &Block, span: &Span, config: &MergeConfig) -> bool {
    span.page == current.page
        && (span.top - current.bottom).abs() <= config.y_threshold
        && (span.font_size - current.font_size).abs() < config.max_size_delta
        && config
            .x_alignment
            .map_or(true, |limit| (span.left - current.left).abs() < limit)
}

/// Finish a block. Hyphenation is only ever repaired inside one block.
fn seal(mut block: Block, config: &MergeConfig) -> Block {
    if config.repair_hyphenation {
        block.text = repair_hyphenation(&block.text).trim().to_string();
    }
    block
}

/// Merge vertically and typographically continuous spans into blocks.
///
/// Output is sorted by `(page, top)`. On merge the span's text is appended
/// with a single space and the block's bottom moves to the span's bottom; the
/// block keeps the font size, top and horizontal extent of its first span.
pub fn merge_spans(mut spans: Vec<Span>, config: &MergeConfig) -> Vec<Block> {
    spans.sort_by(reading_order);

    let mut spans = spans.into_iter();
    let Some(first) = spans.next() else {
        return Vec::new();
    };

    let mut blocks: Vec<Block> = Vec::new();
    let mut current = Block::from(first);

    for span in spans {
        if continues_block(&current, &span, config) {
            current.text.push(' ');
            current.text.push_str(&span.text);
            current.bottom = span.bottom;
        } else {
            let sealed = std::mem::replace(&mut current, Block::from(span));
            blocks.push(seal(sealed, config));
        }
    }
    blocks.push(seal(current, config));

    debug!("merged spans into {} blocks", blocks.len());
    blocks
}
