use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::cache::{DiffRows, SideHighlights};
use crate::diff::{ChangeKind, DiffLine, DiffStats, Side, SplitAlignedRow};
use crate::highlight::HighlightSpan;
use crate::state::{DiffViewMode, LineSelection};
use crate::theme::Theme;
use crate::viewer::{DiffSnapshot, DiffViewer};
use crate::viewport::ViewportRange;

/// Everything that decides what the materialized rows look like.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SliceKey {
    revision: u64,
    mode: DiffViewMode,
    range: ViewportRange,
    selection: Option<LineSelection>,
    theme: String,
}

/// Rows built for the current viewport range. Unified mode only fills `old`.
struct MaterializedSlice {
    key: SliceKey,
    old: Vec<Line<'static>>,
    new: Vec<Line<'static>>,
    stats: DiffStats,
}

/// Renders the visible slice of a [`DiffViewer`].
///
/// Rows are only rebuilt when the viewport range, the inputs, the mode or the
/// selection change; plain scrolling inside the overscan reuses them.
#[derive(Default)]
pub struct DiffView {
    slice: Option<MaterializedSlice>,
    builds: usize,
}

impl DiffView {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times the visible rows have been materialized.
    pub fn builds(&self) -> usize {
        self.builds
    }

    /// Change counts of the last rendered diff.
    pub fn stats(&self) -> DiffStats {
        self.slice
            .as_ref()
            .map(|slice| slice.stats)
            .unwrap_or_default()
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, viewer: &mut DiffViewer, theme: &Theme) {
        let outer = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent));
        let inner = outer.inner(area);

        viewer.set_area(inner);
        let snap = viewer.snapshot(theme);

        let key = SliceKey {
            revision: snap.revision,
            mode: snap.mode,
            range: snap.range,
            selection: snap.selection,
            theme: theme.name.clone(),
        };
        let stale = self.slice.as_ref().is_none_or(|slice| slice.key != key);
        if stale {
            self.slice = Some(materialize(&snap, key, theme));
            self.builds += 1;
        }
        let Some(slice) = self.slice.as_ref() else {
            return;
        };

        frame.render_widget(outer.title(format_title(&snap, &slice.stats)), area);

        if snap.rows.is_empty() {
            let msg = Paragraph::new(" Both inputs are empty")
                .style(Style::default().fg(theme.text_muted));
            frame.render_widget(msg, snap.layout.rows);
            return;
        }

        // The slice starts at `range.start`; shift it so the first visible
        // row lands at the top of the pane.
        let skip = u16::try_from(snap.first_row.saturating_sub(snap.range.start))
            .unwrap_or(u16::MAX);

        match snap.mode {
            DiffViewMode::Unified => {
                let para = Paragraph::new(slice.old.clone()).scroll((skip, 0));
                frame.render_widget(para, snap.layout.rows);
            }
            DiffViewMode::Split => {
                if let Some(header) = snap.layout.header {
                    render_column_titles(frame, header, &snap, theme);
                }
                let left = Paragraph::new(slice.old.clone()).scroll((skip, 0));
                let right = Paragraph::new(slice.new.clone()).scroll((skip, 0));
                frame.render_widget(left, snap.layout.old_pane());
                frame.render_widget(right, snap.layout.new_pane());
            }
        }
    }
}

fn format_title(snap: &DiffSnapshot<'_>, stats: &DiffStats) -> String {
    let old = snap.old_title.unwrap_or("old");
    let new = snap.new_title.unwrap_or("new");
    format!(
        " {old} \u{2192} {new} [{}] +{} -{} ",
        snap.mode.label(),
        stats.added,
        stats.removed
    )
}

fn render_column_titles(frame: &mut Frame, header: Rect, snap: &DiffSnapshot<'_>, theme: &Theme) {
    let style = Style::default()
        .fg(theme.text_muted)
        .add_modifier(Modifier::BOLD);
    let old_area = Rect::new(header.x, header.y, snap.layout.split_at, header.height);
    let new_area = Rect::new(
        header.x + snap.layout.split_at,
        header.y,
        header.width.saturating_sub(snap.layout.split_at),
        header.height,
    );
    let old = Paragraph::new(format!(" {}", snap.old_title.unwrap_or("old"))).style(style);
    let new = Paragraph::new(format!(" {}", snap.new_title.unwrap_or("new"))).style(style);
    frame.render_widget(old, old_area);
    frame.render_widget(new, new_area);
}

fn materialize(snap: &DiffSnapshot<'_>, key: SliceKey, theme: &Theme) -> MaterializedSlice {
    let gutter_width = gutter_width(snap.lines.old.len().max(snap.lines.new.len()));
    let range = snap.range.iter();

    let (old, new) = match snap.rows {
        DiffRows::Unified(rows) => {
            let lines = rows[range]
                .iter()
                .map(|row| unified_line(row, snap, gutter_width, theme))
                .collect();
            (lines, Vec::new())
        }
        DiffRows::Split(rows) => {
            let slice = &rows[range];
            let old = slice
                .iter()
                .map(|row| split_line(row, Side::Old, snap, gutter_width, theme))
                .collect();
            let new = slice
                .iter()
                .map(|row| split_line(row, Side::New, snap, gutter_width, theme))
                .collect();
            (old, new)
        }
    };

    MaterializedSlice {
        key,
        old,
        new,
        stats: snap.rows.stats(),
    }
}

fn gutter_width(max_line: usize) -> usize {
    max_line.to_string().len().max(3)
}

fn format_lineno(lineno: Option<usize>, width: usize) -> String {
    match lineno {
        Some(n) => format!("{n:>width$}"),
        None => " ".repeat(width),
    }
}

/// Background and foreground for a row's content, before selection.
fn change_colors(kind: ChangeKind, theme: &Theme) -> (Option<Color>, Color) {
    match kind {
        ChangeKind::Added => (Some(theme.diff_add_bg), theme.diff_add_fg),
        ChangeKind::Removed => (Some(theme.diff_del_bg), theme.diff_del_fg),
        ChangeKind::Unchanged => (None, theme.diff_context_fg),
    }
}

fn gutter_style(selected: bool, theme: &Theme) -> Style {
    let style = Style::default().fg(theme.text_muted);
    if selected {
        style.bg(theme.selection_bg).fg(theme.text)
    } else {
        style
    }
}

fn unified_line(
    row: &DiffLine,
    snap: &DiffSnapshot<'_>,
    gutter_width: usize,
    theme: &Theme,
) -> Line<'static> {
    let (side, line_no) = row.selectable_side();
    let selected = snap.is_selected(side, line_no);
    let (diff_bg, fg) = change_colors(row.kind, theme);
    let bg = if selected {
        Some(theme.selection_bg)
    } else {
        diff_bg
    };

    let gutter = format!(
        "{} {} ",
        format_lineno(row.old_line_number, gutter_width),
        format_lineno(row.new_line_number, gutter_width)
    );
    let mut prefix_style = Style::default().fg(fg);
    if let Some(bg) = bg {
        prefix_style = prefix_style.bg(bg);
    }

    let markup = line_markup(snap.highlights, side, line_no);
    let mut spans = vec![
        Span::styled(gutter, gutter_style(selected, theme)),
        Span::styled(format!("{} ", row.kind.symbol()), prefix_style),
    ];
    spans.extend(content_spans(&row.content, markup, bg, fg, row.kind, theme));
    finish_line(spans, bg)
}

fn split_line(
    row: &SplitAlignedRow,
    side: Side,
    snap: &DiffSnapshot<'_>,
    gutter_width: usize,
    theme: &Theme,
) -> Line<'static> {
    let (Some(content), Some(line_no)) = (row.content_for(side), row.line_number_for(side)) else {
        return filler_line(gutter_width, theme);
    };
    let selected = snap.is_selected(side, line_no);
    let (diff_bg, fg) = change_colors(row.kind, theme);
    let bg = if selected {
        Some(theme.selection_bg)
    } else {
        diff_bg
    };

    let gutter = format!("{} ", format_lineno(Some(line_no), gutter_width));
    let markup = line_markup(snap.highlights, side, line_no);
    let mut spans = vec![Span::styled(gutter, gutter_style(selected, theme))];
    spans.extend(content_spans(content, markup, bg, fg, row.kind, theme));
    finish_line(spans, bg)
}

/// Blank cell on the side of a split row that has no line.
fn filler_line(gutter_width: usize, theme: &Theme) -> Line<'static> {
    let style = Style::default().fg(theme.text_muted).bg(theme.filler_bg);
    Line::from(Span::styled(" ".repeat(gutter_width + 1), style)).style(style)
}

fn finish_line(spans: Vec<Span<'static>>, bg: Option<Color>) -> Line<'static> {
    let line = Line::from(spans);
    match bg {
        Some(bg) => line.style(Style::default().bg(bg)),
        None => line,
    }
}

/// Markup for a 1-based line number, looked up by 0-based index.
fn line_markup(highlights: &SideHighlights, side: Side, line_no: usize) -> Option<&[HighlightSpan]> {
    line_no
        .checked_sub(1)
        .and_then(|index| highlights.line(side, index))
}

fn content_spans(
    text: &str,
    markup: Option<&[HighlightSpan]>,
    bg: Option<Color>,
    fg: Color,
    kind: ChangeKind,
    theme: &Theme,
) -> Vec<Span<'static>> {
    let with_bg = |style: Style| match bg {
        Some(bg) => style.bg(bg),
        None => style,
    };

    match markup {
        Some(spans) if !spans.is_empty() => {
            apply_highlights(text, spans, with_bg(Style::default().fg(theme.diff_context_fg)))
                .unwrap_or_else(|| vec![Span::styled(text.to_string(), with_bg(Style::default().fg(fg)))])
        }
        _ => {
            // Unchanged lines without markup use the plain text color.
            let fg = if kind == ChangeKind::Unchanged {
                theme.text
            } else {
                fg
            };
            vec![Span::styled(text.to_string(), with_bg(Style::default().fg(fg)))]
        }
    }
}

/// Apply highlight spans to a string. Returns `None` if a span does not fall
/// on character boundaries, so the caller can fall back to plain text.
fn apply_highlights(
    text: &str,
    hl_spans: &[HighlightSpan],
    gap_style: Style,
) -> Option<Vec<Span<'static>>> {
    let bg = gap_style.bg;
    let mut result = Vec::new();
    let mut pos = 0;
    let text_len = text.len();

    for span in hl_spans {
        let start = span.start.min(text_len).max(pos);
        let end = span.end.min(text_len);
        if !text.is_char_boundary(start) || !text.is_char_boundary(end) {
            return None;
        }

        if start > pos {
            result.push(Span::styled(text[pos..start].to_string(), gap_style));
        }
        if start < end {
            let mut style = span.style;
            if let Some(bg) = bg {
                style = style.bg(bg);
            }
            result.push(Span::styled(text[start..end].to_string(), style));
            pos = end;
        }
    }

    if pos < text_len {
        result.push(Span::styled(text[pos..].to_string(), gap_style));
    }

    Some(result)
}
