//! Title and heading-outline inference from positioned text spans.
//!
//! The crate takes the spans a page-layout engine extracted from a document
//! (text, font size, page, bounding box) and infers a title plus an H1–H3
//! outline from typography and geometry alone.
//!
//! # Pipeline
//!
//! ```text
//! Span[] -> normalize -> merge -> heading_blocks -> LevelMap ----\
//!                                               \-> TitleSelector -> assemble -> DocumentOutline
//! ```
//!
//! Every stage is a pure function of its input; the only I/O lives behind
//! [`SpanSource`] and [`LayoutConfig::load`].

use std::path::Path;

use log::debug;
use thiserror::Error;

pub mod assemble;
pub mod config;
pub mod parser;
pub mod render;
pub mod source;
pub mod title;
pub mod types;

pub use config::{LayoutConfig, Profile, TitleStrategy};
pub use parser::LevelMap;
pub use source::{JsonSpanSource, SpanSource};
pub use title::{BlockScoreSelector, GroupScoreSelector, TitleSelector};
pub use types::*;

#[derive(Debug, Error)]
pub enum OutlineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid span data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// A configured pipeline. Holds no per-document state, so one extractor can
/// process any number of documents, also from several threads.
pub struct Extractor {
    config: LayoutConfig,
    selector: Box<dyn TitleSelector>,
}

impl Extractor {
    /// Pipeline using the title strategy named in `config.title.strategy`.
    pub fn new(config: LayoutConfig) -> Self {
        let selector = title::selector_for(&config.title);
        Extractor { config, selector }
    }

    /// Pipeline with a caller-provided title selector.
    pub fn with_selector(config: LayoutConfig, selector: Box<dyn TitleSelector>) -> Self {
        Extractor { config, selector }
    }

    pub fn for_profile(profile: Profile) -> Self {
        Self::new(LayoutConfig::for_profile(profile))
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Infer title and outline from one document's spans.
    ///
    /// Never fails: no usable spans yield an empty title and outline.
    pub fn process(&self, spans: Vec<Span>) -> DocumentOutline {
        let spans = parser::normalize_spans(spans, &self.config.normalize);
        let blocks = parser::merge_spans(spans, &self.config.merge);
        let headings = parser::heading_blocks(blocks, self.config.heading.max_chars);

        let levels = LevelMap::from_blocks(&headings);
        let title = self.selector.select(&headings);
        let outline = assemble::assemble_outline(&headings, &levels, &title);

        debug!("title {:?} with {} outline entries", title, outline.len());
        DocumentOutline { title, outline }
    }

    /// Pull spans from `source` and process them. Source errors are returned as-is.
    pub fn process_source<S>(&self, source: &S) -> Result<DocumentOutline, OutlineError>
    where
        S: SpanSource + ?Sized,
    {
        Ok(self.process(source.spans()?))
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Convenience free functions
// ---------------------------------------------------------------------------

/// Run the standard pipeline on one document's spans.
pub fn process(spans: Vec<Span>) -> DocumentOutline {
    Extractor::default().process(spans)
}

/// Run the pipeline on a JSON span dump.
pub fn process_file(path: &Path, config: LayoutConfig) -> Result<DocumentOutline, OutlineError> {
    Extractor::new(config).process_source(&JsonSpanSource::new(path))
}
