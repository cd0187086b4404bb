use std::collections::HashSet;
use std::sync::OnceLock;

use log::{debug, trace};
use regex::Regex;

use crate::parser::LevelMap;
use crate::types::{Block, HeadingLevel, OutlineEntry};

/// Whether the text starts with a section number such as `2`, `3.2` or `2.3.1`.
pub fn is_numbered_heading(text: &str) -> bool {
    static RE_NUMBERED: OnceLock<Regex> = OnceLock::new();
    let re_numbered = RE_NUMBERED.get_or_init(|| Regex::new(r"^\d+(\.\d+)*").unwrap());
    re_numbered.is_match(text)
}

/// Admission rule: numbered text at any level, or anything at H1/H2.
///
/// Unnumbered H3 text is rejected; large-font body text tends to land there.
pub fn admits(text: &str, level: HeadingLevel) -> bool {
    is_numbered_heading(text) || matches!(level, HeadingLevel::H1 | HeadingLevel::H2)
}

/// Build the ordered, deduplicated outline from heading-length blocks.
///
/// Blocks whose text equals `title` or was already seen are skipped. Sizes
/// absent from `levels` default to H3. Block order is preserved.
pub fn assemble_outline(blocks: &[Block], levels: &LevelMap, title: &str) -> Vec<OutlineEntry> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut outline: Vec<OutlineEntry> = Vec::new();

    for block in blocks {
        let text = block.text.as_str();
        if text == title || !seen.insert(text) {
            continue;
        }

        let level = levels.level_for(block.font_size).unwrap_or(HeadingLevel::H3);
        if !admits(text, level) {
            trace!("rejecting {:?} at {}", text, level);
            continue;
        }

        outline.push(OutlineEntry {
            level,
            text: text.to_string(),
            page: block.page,
        });
    }

    debug!("assembled outline with {} entries", outline.len());
    outline
}
