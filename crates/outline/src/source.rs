//! Boundary with the page-layout engine.
//!
//! The pipeline never looks inside the engine that turns pages into spans.
//! It only asks a [`SpanSource`] for the spans of one document. Failures of a
//! source are handed to the caller unchanged.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::types::Span;
use crate::OutlineError;

/// Supplies the raw spans of one document.
pub trait SpanSource {
    fn spans(&self) -> Result<Vec<Span>, OutlineError>;
}

impl SpanSource for Vec<Span> {
    fn spans(&self) -> Result<Vec<Span>, OutlineError> {
        Ok(self.clone())
    }
}

impl SpanSource for [Span] {
    fn spans(&self) -> Result<Vec<Span>, OutlineError> {
        Ok(self.to_vec())
    }
}

/// Accepted layouts of a span dump.
#[derive(Deserialize)]
#[serde(untagged)]
enum SpanDump {
    Bare(Vec<Span>),
    Wrapped { spans: Vec<Span> },
}

/// Parse a span dump: either a bare array of spans or `{"spans": [...]}`.
pub fn parse_span_dump(json: &str) -> Result<Vec<Span>, OutlineError> {
    let dump: SpanDump = serde_json::from_str(json)?;
    Ok(match dump {
        SpanDump::Bare(spans) | SpanDump::Wrapped { spans } => spans,
    })
}

/// Span dump stored as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonSpanSource {
    path: PathBuf,
}

impl JsonSpanSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SpanSource for JsonSpanSource {
    fn spans(&self) -> Result<Vec<Span>, OutlineError> {
        let contents = std::fs::read_to_string(&self.path)?;
        parse_span_dump(&contents)
    }
}
