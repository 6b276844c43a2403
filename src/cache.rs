use crate::diff::{
    compute_split_alignment, compute_unified_diff, split_lines, DiffLine, DiffStats, Side,
    SplitAlignedRow,
};
use crate::highlight::{HighlightAdapter, HighlightSpan};
use crate::state::{DiffInputs, DiffViewMode};
use crate::theme::SyntaxColors;

/// Row projection for one view mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffRows {
    Unified(Vec<DiffLine>),
    Split(Vec<SplitAlignedRow>),
}

impl DiffRows {
    pub fn len(&self) -> usize {
        match self {
            DiffRows::Unified(rows) => rows.len(),
            DiffRows::Split(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn mode(&self) -> DiffViewMode {
        match self {
            DiffRows::Unified(_) => DiffViewMode::Unified,
            DiffRows::Split(_) => DiffViewMode::Split,
        }
    }

    pub fn stats(&self) -> DiffStats {
        match self {
            DiffRows::Unified(rows) => DiffStats::from_unified(rows),
            DiffRows::Split(rows) => DiffStats::from_split(rows),
        }
    }
}

impl Default for DiffRows {
    fn default() -> Self {
        DiffRows::Split(Vec::new())
    }
}

/// Both inputs split into lines.
#[derive(Debug, Clone, Default)]
pub struct SideLines {
    pub old: Vec<String>,
    pub new: Vec<String>,
}

impl SideLines {
    pub fn side(&self, side: Side) -> &[String] {
        match side {
            Side::Old => &self.old,
            Side::New => &self.new,
        }
    }
}

/// Per-line markup for each side; `None` renders as plain text.
#[derive(Debug, Clone, Default)]
pub struct SideHighlights {
    pub old: Option<Vec<Vec<HighlightSpan>>>,
    pub new: Option<Vec<Vec<HighlightSpan>>>,
}

impl SideHighlights {
    /// Markup for a 0-based line index on `side`.
    pub fn line(&self, side: Side, index: usize) -> Option<&[HighlightSpan]> {
        let lines = match side {
            Side::Old => self.old.as_ref(),
            Side::New => self.new.as_ref(),
        }?;
        lines.get(index).map(Vec::as_slice)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct HighlightKey {
    revision: u64,
    language: Option<String>,
    theme: String,
}

/// Derived values of the viewer, each recomputed only when its key changes.
///
/// Line splits are keyed by input revision, rows by `(revision, mode)` and
/// markup by `(revision, language, theme)`. Only the active mode's rows are
/// ever held.
#[derive(Debug, Default)]
pub struct DerivedCache {
    lines: SideLines,
    lines_key: Option<u64>,
    rows: DiffRows,
    rows_key: Option<(u64, DiffViewMode)>,
    highlights: SideHighlights,
    highlights_key: Option<HighlightKey>,
    row_builds: usize,
}

impl DerivedCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ensure_lines(&mut self, inputs: &DiffInputs) -> &SideLines {
        if self.lines_key != Some(inputs.revision) {
            self.lines = SideLines {
                old: split_lines(&inputs.old_text),
                new: split_lines(&inputs.new_text),
            };
            self.lines_key = Some(inputs.revision);
            log::debug!(
                "split inputs rev {}: {} old / {} new lines",
                inputs.revision,
                self.lines.old.len(),
                self.lines.new.len()
            );
        }
        &self.lines
    }

    pub fn ensure_rows(&mut self, inputs: &DiffInputs, mode: DiffViewMode) -> &DiffRows {
        let key = (inputs.revision, mode);
        if self.rows_key != Some(key) {
            self.ensure_lines(inputs);
            let lines = &self.lines;
            self.rows = match mode {
                DiffViewMode::Unified => DiffRows::Unified(compute_unified_diff(&lines.old, &lines.new)),
                DiffViewMode::Split => DiffRows::Split(compute_split_alignment(&lines.old, &lines.new)),
            };
            self.rows_key = Some(key);
            self.row_builds += 1;
            log::debug!(
                "built {} {:?} rows for rev {}",
                self.rows.len(),
                mode,
                inputs.revision
            );
        }
        &self.rows
    }

    pub fn ensure_highlights(
        &mut self,
        inputs: &DiffInputs,
        adapter: &dyn HighlightAdapter,
        theme_name: &str,
        colors: &SyntaxColors,
    ) -> &SideHighlights {
        let key = HighlightKey {
            revision: inputs.revision,
            language: inputs.language.clone(),
            theme: theme_name.to_string(),
        };
        if self.highlights_key.as_ref() != Some(&key) {
            self.ensure_lines(inputs);
            self.highlights = match inputs.language.as_deref() {
                Some(language) => SideHighlights {
                    old: highlight_side(adapter, &self.lines.old, language, colors),
                    new: highlight_side(adapter, &self.lines.new, language, colors),
                },
                None => SideHighlights::default(),
            };
            self.highlights_key = Some(key);
        }
        &self.highlights
    }

    pub fn lines(&self) -> &SideLines {
        &self.lines
    }

    pub fn rows(&self) -> &DiffRows {
        &self.rows
    }

    pub fn highlights(&self) -> &SideHighlights {
        &self.highlights
    }

    /// How many times a row projection has been computed.
    pub fn row_builds(&self) -> usize {
        self.row_builds
    }
}

/// Highlight one side, discarding output that does not line up with the
/// input so rendering falls back to plain text.
fn highlight_side(
    adapter: &dyn HighlightAdapter,
    lines: &[String],
    language: &str,
    colors: &SyntaxColors,
) -> Option<Vec<Vec<HighlightSpan>>> {
    if lines.is_empty() {
        return None;
    }
    let content = lines.join("\n");
    let Some(markup) = adapter.highlight_lines(&content, language, colors) else {
        log::debug!("no highlighting for language {language:?}");
        return None;
    };
    if markup.len() != lines.len() {
        log::warn!(
            "highlighter returned {} lines for {} lines of {language}; using plain text",
            markup.len(),
            lines.len()
        );
        return None;
    }
    Some(markup)
}
