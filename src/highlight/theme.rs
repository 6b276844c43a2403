use ratatui::style::{Modifier, Style};

use crate::theme::SyntaxColors;

/// Capture names registered with every grammar. The index into this array is
/// the highlight id tree-sitter reports back.
pub const HIGHLIGHT_NAMES: &[&str] = &[
    "attribute",
    "comment",
    "constant",
    "constant.builtin",
    "constructor",
    "escape",
    "function",
    "function.builtin",
    "function.method",
    "keyword",
    "label",
    "number",
    "operator",
    "property",
    "punctuation",
    "punctuation.bracket",
    "punctuation.delimiter",
    "punctuation.special",
    "string",
    "string.special",
    "tag",
    "type",
    "type.builtin",
    "variable",
    "variable.builtin",
    "variable.parameter",
];

pub fn highlight_names_vec() -> Vec<String> {
    HIGHLIGHT_NAMES.iter().map(|s| s.to_string()).collect()
}

pub fn style_for_highlight(idx: usize, colors: &SyntaxColors) -> Style {
    let name = HIGHLIGHT_NAMES.get(idx).copied().unwrap_or("");
    let fg = match name {
        "comment" => colors.comment,
        "keyword" => {
            return Style::default()
                .fg(colors.keyword)
                .add_modifier(Modifier::BOLD)
        }
        "string" | "string.special" => colors.string,
        "number" | "constant" | "constant.builtin" | "attribute" => colors.number,
        "function" | "function.builtin" | "function.method" => colors.function,
        "type" | "type.builtin" | "constructor" => colors.type_name,
        "variable" | "variable.parameter" => colors.variable,
        "variable.builtin" | "property" | "label" => colors.property,
        "operator" | "escape" => colors.operator,
        "tag" => colors.tag,
        "punctuation" | "punctuation.bracket" | "punctuation.delimiter" | "punctuation.special" => {
            colors.punctuation
        }
        _ => colors.default_fg,
    };
    Style::default().fg(fg)
}
