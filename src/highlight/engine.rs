use std::collections::HashMap;

use ratatui::style::Style;
use tree_sitter_highlight::{HighlightConfiguration, HighlightEvent, Highlighter};

use super::languages::{language_entries, resolve_language};
use super::theme::{highlight_names_vec, style_for_highlight};
use crate::theme::SyntaxColors;

/// A span of styled text within a line, in byte offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightSpan {
    pub start: usize,
    pub end: usize,
    pub style: Style,
}

/// Turns a whole text blob into per-line markup.
///
/// Implementations return one entry per `'\n'`-separated line of `content`,
/// or `None` when the language is unsupported or highlighting fails.
pub trait HighlightAdapter {
    fn highlight_lines(
        &self,
        content: &str,
        language: &str,
        colors: &SyntaxColors,
    ) -> Option<Vec<Vec<HighlightSpan>>>;
}

/// Adapter that never highlights.
pub struct PlainText;

impl HighlightAdapter for PlainText {
    fn highlight_lines(
        &self,
        _content: &str,
        _language: &str,
        _colors: &SyntaxColors,
    ) -> Option<Vec<Vec<HighlightSpan>>> {
        None
    }
}

pub struct HighlightEngine {
    configs: HashMap<&'static str, HighlightConfiguration>,
}

impl HighlightEngine {
    pub fn new() -> Self {
        let highlight_names = highlight_names_vec();
        let configs = language_entries()
            .into_iter()
            .filter_map(|entry| {
                let config = entry.config(&highlight_names)?;
                Some((entry.name, config))
            })
            .collect();
        Self { configs }
    }
}

impl Default for HighlightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl HighlightAdapter for HighlightEngine {
    fn highlight_lines(
        &self,
        content: &str,
        language: &str,
        colors: &SyntaxColors,
    ) -> Option<Vec<Vec<HighlightSpan>>> {
        let lang_name = resolve_language(language)?;
        let config = self.configs.get(lang_name)?;

        let mut highlighter = Highlighter::new();
        let events = highlighter
            .highlight(config, content.as_bytes(), None, |_| None)
            .ok()?;

        let lines: Vec<&str> = content.split('\n').collect();
        let mut result: Vec<Vec<HighlightSpan>> = vec![Vec::new(); lines.len()];
        let mut current_style = Style::default().fg(colors.default_fg);

        for event in events {
            match event.ok()? {
                HighlightEvent::Source { start, end } => {
                    add_spans_for_range(&lines, &mut result, start, end, current_style);
                }
                HighlightEvent::HighlightStart(highlight) => {
                    current_style = style_for_highlight(highlight.0, colors);
                }
                HighlightEvent::HighlightEnd => {
                    current_style = Style::default().fg(colors.default_fg);
                }
            }
        }

        Some(result)
    }
}

/// Add highlight spans across line boundaries for a byte range.
fn add_spans_for_range(
    lines: &[&str],
    result: &mut [Vec<HighlightSpan>],
    start: usize,
    end: usize,
    style: Style,
) {
    if start >= end {
        return;
    }

    let mut line_start_byte = 0;
    for (line_idx, line) in lines.iter().enumerate() {
        if line_start_byte > end {
            break;
        }
        let line_end_byte = line_start_byte + line.len();

        if start < line_end_byte + 1 && end > line_start_byte {
            let span_start = start.saturating_sub(line_start_byte).min(line.len());
            let span_end = (end - line_start_byte).min(line.len());

            if span_start < span_end && line_idx < result.len() {
                result[line_idx].push(HighlightSpan {
                    start: span_start,
                    end: span_end,
                    style,
                });
            }
        }

        // +1 for the newline
        line_start_byte = line_end_byte + 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;

    #[test]
    fn rust_source_gets_one_entry_per_line() {
        let engine = HighlightEngine::new();
        let colors = Theme::default().syntax;
        let src = "fn main() {\n    let x = 1;\n}";
        let lines = engine.highlight_lines(src, "rust", &colors).unwrap();
        assert_eq!(lines.len(), 3);
        assert!(!lines[0].is_empty());
        // "fn" is a keyword and starts the first line.
        assert_eq!(lines[0][0].start, 0);
        assert_eq!(lines[0][0].style.fg, Some(colors.keyword));
    }

    #[test]
    fn unknown_language_is_unsupported() {
        let engine = HighlightEngine::new();
        let colors = Theme::default().syntax;
        assert!(engine.highlight_lines("x", "brainfuck", &colors).is_none());
    }

    #[test]
    fn plain_text_never_highlights() {
        let colors = Theme::default().syntax;
        assert!(PlainText.highlight_lines("fn x() {}", "rust", &colors).is_none());
    }

    #[test]
    fn spans_split_across_lines() {
        let lines = ["ab", "cd"];
        let mut result = vec![Vec::new(); 2];
        add_spans_for_range(&lines, &mut result, 1, 4, Style::default());
        assert_eq!(result[0].len(), 1);
        assert_eq!((result[0][0].start, result[0][0].end), (1, 2));
        assert_eq!((result[1][0].start, result[1][0].end), (0, 1));
    }
}
