//! Layout-inference stages that turn raw spans into ranked blocks.
//!
//! ```text
//! Span[]  ->  Span[]      ->  Block[]  ->  Block[]         ->  LevelMap
//!             normalize       merge        heading_blocks      levels
//! ```
//!
//! Every function here is a pure transformation of its input.

pub mod cleanup;
pub mod levels;
pub mod merge;
pub mod normalize;

pub use levels::{heading_blocks, size_histogram, LevelMap};
pub use merge::merge_spans;
pub use normalize::normalize_spans;
