use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::diff::DiffStats;
use crate::state::DiffViewMode;
use crate::theme::Theme;

/// Bottom bar: a status message when there is one, otherwise key hints,
/// with the mode and change counts on the right.
pub struct StatusBar<'a> {
    pub mode: DiffViewMode,
    pub stats: DiffStats,
    /// Message and whether it is an error.
    pub message: Option<(&'a str, bool)>,
    pub dragging: bool,
    pub theme: &'a Theme,
}

impl StatusBar<'_> {
    fn bindings(&self) -> &'static [(&'static str, &'static str)] {
        if self.dragging {
            &[("release", "copy lines")]
        } else {
            &[
                ("q", "quit"),
                ("j/k", "scroll"),
                ("PgUp/PgDn", "page"),
                ("g/G", "top/bottom"),
                ("Tab", "mode"),
                ("t", "theme"),
                ("drag", "select"),
            ]
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let mut spans = vec![Span::raw(" ")];

        if let Some((msg, is_error)) = self.message {
            let color = if is_error { theme.error } else { theme.success };
            spans.push(Span::styled(msg.to_string(), Style::default().fg(color)));
        } else {
            for (i, (key, desc)) in self.bindings().iter().enumerate() {
                if i > 0 {
                    spans.push(Span::raw(" "));
                }
                spans.push(Span::styled(
                    format!("[{key}]"),
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                ));
                spans.push(Span::styled(
                    (*desc).to_string(),
                    Style::default().fg(theme.text_muted),
                ));
            }
        }

        let right = vec![
            Span::styled(
                format!("+{}", self.stats.added),
                Style::default().fg(theme.diff_add_fg),
            ),
            Span::raw(" "),
            Span::styled(
                format!("-{}", self.stats.removed),
                Style::default().fg(theme.diff_del_fg),
            ),
            Span::raw("  "),
            Span::styled(
                format!("[{}] ", self.mode.label().to_lowercase()),
                Style::default().fg(theme.text_muted),
            ),
        ];

        // Right-align the counts when they fit after the left part.
        let used: usize = spans.iter().map(|s| s.width()).sum();
        let right_width: usize = right.iter().map(|s| s.width()).sum();
        let remaining = (area.width as usize).saturating_sub(used + right_width);
        if remaining > 0 {
            spans.push(Span::raw(" ".repeat(remaining)));
            spans.extend(right);
        }

        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(theme.surface))
            .render(area, buf);
    }
}
