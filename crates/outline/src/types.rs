use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single run of text at a specific position on a page, as handed over by
/// the page-layout engine.
///
/// Coordinates share one page-coordinate system per document; `top <= bottom`
/// is assumed, not checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Span {
    pub text: String,
    pub font_size: f32,
    /// Zero-based page index.
    pub page: usize,
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

/// One or more vertically continuous [`Span`]s merged into a logical block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub text: String,
    pub font_size: f32,
    pub page: usize,
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Block {
    /// Horizontal centre of the block's bounding box.
    pub fn center_x(&self) -> f32 {
        (self.left + self.right) / 2.0
    }

    /// Length of the text in characters (not bytes).
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

impl From<Span> for Block {
    fn from(span: Span) -> Self {
        Block {
            text: span.text,
            font_size: span.font_size,
            page: span.page,
            top: span.top,
            bottom: span.bottom,
            left: span.left,
            right: span.right,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Levels in rank order, largest font first.
    pub const ALL: [HeadingLevel; 3] = [HeadingLevel::H1, HeadingLevel::H2, HeadingLevel::H3];

    pub fn as_u8(&self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }

    /// Map a zero-based size rank onto a level. Ranks past the third have no level.
    pub fn from_rank(rank: usize) -> Option<Self> {
        Self::ALL.get(rank).copied()
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = InvalidHeadingLevel;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(HeadingLevel::H1),
            2 => Ok(HeadingLevel::H2),
            3 => Ok(HeadingLevel::H3),
            _ => Err(InvalidHeadingLevel),
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}", self.as_u8())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OutlineEntry {
    pub level: HeadingLevel,
    pub text: String,
    pub page: usize,
}

/// Title and heading outline inferred for one document.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct DocumentOutline {
    pub title: String,
    pub outline: Vec<OutlineEntry>,
}

impl DocumentOutline {
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.outline.is_empty()
    }
}

#[derive(Debug, Error)]
#[error("Heading level must be between 1 and 3")]
pub struct InvalidHeadingLevel;
