//! Span filtering and standardisation.

use log::{debug, trace};

use super::cleanup::clean_text;
use crate::config::NormalizeConfig;
use crate::types::Span;

/// Round a font size to one decimal place.
///
/// Absorbs sub-pixel rendering noise while keeping meaningful size tiers apart.
/// Computed in `f64` with ties to even, so `10.95f32` (stored just below the
/// half) stays `10.9` and an exact `12.25` becomes `12.2`.
pub fn round_font_size(size: f32) -> f32 {
    ((f64::from(size) * 10.0).round_ties_even() / 10.0) as f32
}

/// Reduce raw spans to the subset usable for structural inference.
///
/// Text is trimmed (and cleaned when enabled); spans with empty text or fewer
/// than `min_tokens` whitespace-separated tokens are dropped as page numbers,
/// bullets and stray glyphs. Font sizes are rounded, page and geometry are kept
/// verbatim. Input order is preserved.
pub fn normalize_spans(raw: Vec<Span>, config: &NormalizeConfig) -> Vec<Span> {
    let total = raw.len();

    let spans: Vec<Span> = raw
        .into_iter()
        .filter_map(|span| normalize_span(span, config))
        .collect();

    debug!(
        "normalized spans: kept {} of {} ({} dropped)",
        spans.len(),
        total,
        total - spans.len()
    );
    spans
}

fn normalize_span(span: Span, config: &NormalizeConfig) -> Option<Span> {
    let text = if config.clean_text {
        clean_text(span.text.trim())
    } else {
        span.text.trim().to_string()
    };
    let text = text.trim();

    if text.is_empty() || text.split_whitespace().count() < config.min_tokens {
        trace!("dropping span {:?} on page {}", span.text, span.page);
        return None;
    }

    Some(Span {
        text: text.to_string(),
        font_size: round_font_size(span.font_size),
        ..span
    })
}
