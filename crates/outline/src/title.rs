//! Title selection.
//!
//! Two strategies implement [`TitleSelector`]:
//!
//! - [`BlockScoreSelector`] scores every heading-length block on its own.
//! - [`GroupScoreSelector`] first groups adjacent same-size fragments on the
//!   first pages (titles often wrap over lines that the merge stage kept
//!   apart) and scores the groups.
//!
//! Both return an empty string when there is no candidate. Larger fonts
//! dominate the score; earlier pages, positions higher on the page and
//! centred text are preferred.

use log::debug;

use crate::config::{GroupConfig, TitleConfig, TitleStrategy};
use crate::parser::cleanup::repair_hyphenation;
use crate::types::Block;

/// Picks one string as the document title from the heading-length blocks.
pub trait TitleSelector: Send + Sync {
    /// Returns the highest-scoring text, or `""` when nothing qualifies.
    fn select(&self, blocks: &[Block]) -> String;
}

/// Build the selector configured by `config.strategy`.
pub fn selector_for(config: &TitleConfig) -> Box<dyn TitleSelector> {
    match config.strategy {
        TitleStrategy::Block => Box::new(BlockScoreSelector::new(config.clone())),
        TitleStrategy::Grouped => Box::new(GroupScoreSelector::new(config.clone())),
    }
}

/// Highest-scoring item; the earliest one wins ties.
fn first_max_by_score<T>(
    items: impl IntoIterator<Item = T>,
    score: impl Fn(&T) -> f32,
) -> Option<T> {
    items
        .into_iter()
        .fold(None, |best: Option<(f32, T)>, item| {
            let s = score(&item);
            match best {
                Some((best_score, _)) if s > best_score => Some((s, item)),
                None => Some((s, item)),
                best => best,
            }
        })
        .map(|(_, item)| item)
}

// ---------------------------------------------------------------------------
// Single-block scoring
// ---------------------------------------------------------------------------

/// `size*10 - page*2 - top - 0.01*|centerX - 300|` with the default weights.
pub fn block_score(block: &Block, config: &TitleConfig) -> f32 {
    block.font_size * config.size_weight
        - block.page as f32 * config.page_penalty
        - block.top
        - (block.center_x() - config.page_center).abs() * config.center_weight
}

#[derive(Debug, Clone, Default)]
pub struct BlockScoreSelector {
    config: TitleConfig,
}

impl BlockScoreSelector {
    pub fn new(config: TitleConfig) -> Self {
        Self { config }
    }
}

impl TitleSelector for BlockScoreSelector {
    fn select(&self, blocks: &[Block]) -> String {
        let title = first_max_by_score(blocks, |b| block_score(b, &self.config))
            .map(|b| b.text.trim().to_string())
            .unwrap_or_default();
        debug!("block-scored title: {:?}", title);
        title
    }
}

// ---------------------------------------------------------------------------
// Grouped scoring
// ---------------------------------------------------------------------------

/// Adjacent blocks judged to be fragments of one multi-line title.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleGroup<'a> {
    pub blocks: Vec<&'a Block>,
}

impl TitleGroup<'_> {
    /// Block texts joined with single spaces.
    pub fn text(&self) -> String {
        self.blocks
            .iter()
            .map(|b| b.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Mean horizontal centre of the member blocks.
    pub fn center_x(&self) -> f32 {
        if self.blocks.is_empty() {
            return 0.0;
        }
        self.blocks.iter().map(|b| b.center_x()).sum::<f32>() / self.blocks.len() as f32
    }
}

/// `size*10 - page*3 - top + 0.1*len(text) - 0.01*|centerX - 300|` with the
/// default weights. Size, page and top come from the first block.
pub fn group_score(group: &TitleGroup<'_>, config: &TitleConfig) -> f32 {
    let Some(first) = group.blocks.first() else {
        return f32::NEG_INFINITY;
    };
    let length = group.text().chars().count() as f32;

    first.font_size * config.size_weight
        - first.page as f32 * config.group.page_penalty
        - first.top
        + length * config.group.length_weight
        - (group.center_x() - config.page_center).abs() * config.center_weight
}

/// Whether `block` continues the title group whose last member is `last`.
fn continues_group(last: &Block, block: &Block, config: &GroupConfig) -> bool {
    block.page == last.page
        && (block.font_size - last.font_size).abs() <= config.max_size_delta
        && (block.top - last.bottom).abs() < config.max_gap
        && (block.left - last.left).abs() < config.max_x_offset
}

/// Filter title candidates and greedily group consecutive ones.
///
/// Candidates are blocks on pages `<= max_page` with size `>= min_size`,
/// taken in `(page, top)` order.
pub fn group_title_blocks<'a>(blocks: &'a [Block], config: &GroupConfig) -> Vec<TitleGroup<'a>> {
    let mut candidates: Vec<&Block> = blocks
        .iter()
        .filter(|b| b.page <= config.max_page && b.font_size >= config.min_size)
        .collect();
    candidates.sort_by(|a, b| a.page.cmp(&b.page).then(a.top.total_cmp(&b.top)));

    let mut groups: Vec<TitleGroup<'a>> = Vec::new();
    let mut current: Vec<&Block> = Vec::new();

    for block in candidates {
        let joins = current
            .last()
            .is_some_and(|last| continues_group(last, block, config));
        if !joins && !current.is_empty() {
            groups.push(TitleGroup {
                blocks: std::mem::take(&mut current),
            });
        }
        current.push(block);
    }
    if !current.is_empty() {
        groups.push(TitleGroup { blocks: current });
    }

    groups
}

#[derive(Debug, Clone)]
pub struct GroupScoreSelector {
    config: TitleConfig,
}

impl GroupScoreSelector {
    pub fn new(config: TitleConfig) -> Self {
        Self { config }
    }
}

impl Default for GroupScoreSelector {
    fn default() -> Self {
        Self::new(TitleConfig {
            strategy: TitleStrategy::Grouped,
            ..TitleConfig::default()
        })
    }
}

impl TitleSelector for GroupScoreSelector {
    fn select(&self, blocks: &[Block]) -> String {
        let groups = group_title_blocks(blocks, &self.config.group);
        debug!("{} title groups", groups.len());

        let title = first_max_by_score(groups, |g| group_score(g, &self.config))
            .map(|g| repair_hyphenation(&g.text()).trim().to_string())
            .unwrap_or_default();
        debug!("group-scored title: {:?}", title);
        title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_block(
        text: &str,
        font_size: f32,
        page: usize,
        top: f32,
        left: f32,
        right: f32,
    ) -> Block {
        Block {
            text: text.to_string(),
            font_size,
            page,
            top,
            bottom: top + font_size,
            left,
            right,
        }
    }

    fn grouped() -> GroupScoreSelector {
        GroupScoreSelector::default()
    }

    // =====================================================================
    // block_score
    // =====================================================================

    #[test]
    fn test_block_score_formula() {
        let block = make_block("Chapter 1", 20.0, 0, 50.0, 100.0, 300.0);
        // 200 - 0 - 50 - 0.01 * |200 - 300|
        assert!((block_score(&block, &TitleConfig::default()) - 149.0).abs() < 1e-3);

        let later = make_block("Chapter 1", 20.0, 2, 50.0, 100.0, 300.0);
        assert!((block_score(&later, &TitleConfig::default()) - 145.0).abs() < 1e-3);
    }

    #[test]
    fn test_block_score_prefers_centered() {
        let config = TitleConfig::default();
        let centered = make_block("Centered title", 20.0, 0, 50.0, 200.0, 400.0);
        let margin = make_block("Marginal title", 20.0, 0, 50.0, 0.0, 100.0);
        assert!(block_score(&centered, &config) > block_score(&margin, &config));
    }

    // =====================================================================
    // BlockScoreSelector
    // =====================================================================

    #[test]
    fn test_block_selector_largest_font_wins() {
        let blocks = vec![
            make_block("Running header text", 10.0, 0, 20.0, 50.0, 550.0),
            make_block("The Real Title", 24.0, 0, 120.0, 150.0, 450.0),
            make_block("1 Introduction here", 16.0, 0, 300.0, 50.0, 250.0),
        ];

        assert_eq!(BlockScoreSelector::default().select(&blocks), "The Real Title");
    }

    #[test]
    fn test_block_selector_first_wins_ties() {
        let blocks = vec![
            make_block("Same score one", 18.0, 1, 80.0, 200.0, 400.0),
            make_block("Same score two", 18.0, 1, 80.0, 200.0, 400.0),
        ];

        assert_eq!(BlockScoreSelector::default().select(&blocks), "Same score one");
    }

    #[test]
    fn test_block_selector_empty() {
        assert_eq!(BlockScoreSelector::default().select(&[]), "");
    }

    // =====================================================================
    // group_title_blocks
    // =====================================================================

    #[test]
    fn test_grouping_joins_wrapped_title() {
        let blocks = vec![
            make_block("Understanding Multi-", 20.0, 0, 50.0, 100.0, 500.0),
            // Gap of 5: too far for the merge stage, close enough for a title group.
            make_block("lingual Document Layout", 20.0, 0, 75.0, 110.0, 490.0),
            make_block("An unrelated subtitle", 14.0, 0, 140.0, 150.0, 450.0),
        ];

        let groups = group_title_blocks(&blocks, &GroupConfig::default());
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].blocks.len(), 2);
        assert_eq!(
            groups[0].text(),
            "Understanding Multi- lingual Document Layout"
        );
    }

    #[test]
    fn test_grouping_filters_candidates() {
        let blocks = vec![
            make_block("Too small text", 11.9, 0, 50.0, 100.0, 500.0),
            make_block("Late page heading", 20.0, 3, 50.0, 100.0, 500.0),
            make_block("Page two heading", 12.0, 2, 50.0, 100.0, 500.0),
        ];

        let groups = group_title_blocks(&blocks, &GroupConfig::default());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].text(), "Page two heading");
    }

    #[test]
    fn test_grouping_compares_with_previous_block() {
        // Each step drifts 30 to the right: within 40 of the previous block
        // but 60 away from the first one.
        let blocks = vec![
            make_block("Stepped title one", 16.0, 0, 50.0, 100.0, 400.0),
            make_block("stepped title two", 16.0, 0, 70.0, 130.0, 430.0),
            make_block("stepped title three", 16.0, 0, 90.0, 160.0, 460.0),
        ];

        let groups = group_title_blocks(&blocks, &GroupConfig::default());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].blocks.len(), 3);
    }

    #[test]
    fn test_grouping_size_delta_inclusive() {
        let blocks = vec![
            make_block("Size twenty line", 20.0, 0, 50.0, 100.0, 400.0),
            make_block("size nineteen line", 19.0, 0, 71.0, 100.0, 400.0),
            make_block("size seventeen line", 17.0, 0, 91.0, 100.0, 400.0),
        ];

        let groups = group_title_blocks(&blocks, &GroupConfig::default());
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].blocks.len(), 2);
    }

    #[test]
    fn test_grouping_never_crosses_pages() {
        let blocks = vec![
            make_block("Bottom of page zero", 20.0, 0, 700.0, 100.0, 400.0),
            make_block("Top of page one", 20.0, 1, 720.0, 100.0, 400.0),
        ];

        assert_eq!(group_title_blocks(&blocks, &GroupConfig::default()).len(), 2);
    }

    // =====================================================================
    // group_score
    // =====================================================================

    #[test]
    fn test_group_score_formula() {
        let a = make_block("Chapter 1", 20.0, 0, 50.0, 100.0, 300.0);
        let group = TitleGroup { blocks: vec![&a] };
        // 200 - 0 - 50 + 0.1 * 9 - 0.01 * 100
        assert!((group_score(&group, &TitleConfig::default()) - 149.9).abs() < 1e-3);
    }

    #[test]
    fn test_group_score_uses_mean_center() {
        let a = make_block("Left half of", 20.0, 1, 50.0, 0.0, 200.0);
        let b = make_block("right half", 20.0, 1, 75.0, 400.0, 600.0);
        let group = TitleGroup {
            blocks: vec![&a, &b],
        };
        // Mean centre is 300, so no centring penalty.
        // 200 - 3 - 50 + 0.1 * 23
        assert!((group_score(&group, &TitleConfig::default()) - 149.3).abs() < 1e-3);
    }

    #[test]
    fn test_group_score_empty_group() {
        let group = TitleGroup { blocks: vec![] };
        assert_eq!(group_score(&group, &TitleConfig::default()), f32::NEG_INFINITY);
    }

    // =====================================================================
    // GroupScoreSelector
    // =====================================================================

    #[test]
    fn test_group_selector_joins_and_repairs() {
        let blocks = vec![
            make_block("Understanding Multi-", 20.0, 0, 50.0, 100.0, 500.0),
            make_block("lingual Document Layout", 20.0, 0, 75.0, 110.0, 490.0),
            make_block("An unrelated subtitle", 14.0, 0, 140.0, 150.0, 450.0),
        ];

        assert_eq!(
            grouped().select(&blocks),
            "Understanding Multilingual Document Layout"
        );
    }

    #[test]
    fn test_group_selector_rewards_length() {
        // Same size and nearly the same position: the longer group wins.
        let blocks = vec![
            make_block("Short one", 18.0, 0, 100.0, 200.0, 400.0),
            make_block("A considerably longer title line", 18.0, 0, 102.0, 200.0, 400.0),
        ];

        let groups = group_title_blocks(&blocks, &GroupConfig::default());
        assert_eq!(groups.len(), 2, "overlapping boxes are not adjacent lines");
        assert_eq!(
            grouped().select(&blocks),
            "A considerably longer title line"
        );
    }

    #[test]
    fn test_group_selector_no_candidates() {
        let blocks = vec![make_block("Small body text", 10.0, 0, 50.0, 100.0, 500.0)];
        assert_eq!(grouped().select(&blocks), "");
        assert_eq!(grouped().select(&[]), "");
    }

    #[test]
    fn test_selector_for_strategy() {
        let blocks = vec![
            make_block("Understanding Multi-", 20.0, 0, 50.0, 100.0, 500.0),
            make_block("lingual Document Layout", 20.0, 0, 75.0, 110.0, 490.0),
        ];

        let block = selector_for(&TitleConfig::default());
        assert_eq!(block.select(&blocks), "Understanding Multi-");

        let config = TitleConfig {
            strategy: TitleStrategy::Grouped,
            ..TitleConfig::default()
        };
        let group = selector_for(&config);
        assert_eq!(
            group.select(&blocks),
            "Understanding Multilingual Document Layout"
        );
    }
}
