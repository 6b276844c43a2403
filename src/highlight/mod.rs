mod engine;
mod languages;
mod theme;

pub use engine::{HighlightAdapter, HighlightEngine, HighlightSpan, PlainText};
pub use languages::{detect_language, resolve_language};
