//! Heading-length filtering and font-size ranking.

use std::collections::{BTreeMap, HashMap};

use log::debug;

use crate::types::{Block, HeadingLevel};

/// Quantise a (already rounded) font size into an integer key in tenths of a
/// point so that sizes can be hashed and ordered exactly.
fn size_key(size: f32) -> i32 {
    (size * 10.0).round() as i32
}

fn key_size(key: i32) -> f32 {
    key as f32 / 10.0
}

/// Keep only blocks short enough to be headings.
///
/// Blocks of `max_chars` characters or more are assumed to be body paragraphs.
pub fn heading_blocks(blocks: Vec<Block>, max_chars: usize) -> Vec<Block> {
    let total = blocks.len();
    let headings: Vec<Block> = blocks
        .into_iter()
        .filter(|b| b.char_count() < max_chars)
        .collect();
    debug!("{} of {} blocks are heading-length", headings.len(), total);
    headings
}

/// `(font_size, block_count)` pairs sorted by descending size.
pub fn size_histogram(blocks: &[Block]) -> Vec<(f32, usize)> {
    let mut histogram: HashMap<i32, usize> = HashMap::new();
    for block in blocks {
        *histogram.entry(size_key(block.font_size)).or_insert(0) += 1;
    }

    let mut sizes: Vec<(i32, usize)> = histogram.into_iter().collect();
    sizes.sort_by(|a, b| b.0.cmp(&a.0));
    sizes.into_iter().map(|(k, n)| (key_size(k), n)).collect()
}

/// Font size -> heading level for the three largest distinct sizes.
///
/// Ranking is by size value, never by frequency. Sizes outside the top three
/// are absent from the map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelMap {
    levels: BTreeMap<i32, HeadingLevel>,
}

impl LevelMap {
    /// Rank the sizes of the given (heading-length) blocks.
    pub fn from_blocks(blocks: &[Block]) -> Self {
        let levels: BTreeMap<i32, HeadingLevel> = size_histogram(blocks)
            .into_iter()
            .enumerate()
            .filter_map(|(rank, (size, _))| {
                HeadingLevel::from_rank(rank).map(|level| (size_key(size), level))
            })
            .collect();

        let map = LevelMap { levels };
        debug!("level map: {:?}", map.entries());
        map
    }

    /// Level assigned to `font_size`, if it is one of the ranked sizes.
    pub fn level_for(&self, font_size: f32) -> Option<HeadingLevel> {
        self.levels.get(&size_key(font_size)).copied()
    }

    /// `(font_size, level)` pairs, largest size first.
    pub fn entries(&self) -> Vec<(f32, HeadingLevel)> {
        self.levels
            .iter()
            .rev()
            .map(|(&k, &level)| (key_size(k), level))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}
