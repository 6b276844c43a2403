use ratatui::layout::Rect;

use crate::cache::{DerivedCache, DiffRows, SideHighlights, SideLines};
use crate::diff::{DiffStats, Side};
use crate::highlight::{HighlightAdapter, PlainText};
use crate::state::{
    CommittedSelection, DiffInputs, DiffViewMode, LineSelection, ModeControl, ReleaseSubscription,
    SelectionTracker,
};
use crate::theme::Theme;
use crate::viewport::{ViewportRange, ViewportWindow};

/// Height of one diff row in terminal cells.
pub const ROW_HEIGHT: usize = 1;

pub type ModeListener = Box<dyn FnMut(DiffViewMode)>;
pub type SelectionListener = Box<dyn FnMut(&CommittedSelection)>;

/// Screen geometry from the last layout pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewerLayout {
    /// Column-title strip, split mode only.
    pub header: Option<Rect>,
    /// Area the rows are drawn into.
    pub rows: Rect,
    /// Width of the old column in split mode; the new column starts after it.
    pub split_at: u16,
}

impl ViewerLayout {
    pub fn compute(area: Rect, mode: DiffViewMode) -> Self {
        match mode {
            DiffViewMode::Unified => Self {
                header: None,
                rows: area,
                split_at: area.width,
            },
            DiffViewMode::Split => {
                let header_height = area.height.min(1);
                let header = Rect::new(area.x, area.y, area.width, header_height);
                let rows = Rect::new(
                    area.x,
                    area.y + header_height,
                    area.width,
                    area.height - header_height,
                );
                Self {
                    header: Some(header),
                    rows,
                    split_at: area.width / 2,
                }
            }
        }
    }

    pub fn old_pane(&self) -> Rect {
        Rect::new(self.rows.x, self.rows.y, self.split_at, self.rows.height)
    }

    pub fn new_pane(&self) -> Rect {
        Rect::new(
            self.rows.x + self.split_at,
            self.rows.y,
            self.rows.width.saturating_sub(self.split_at),
            self.rows.height,
        )
    }
}

/// Everything the renderer needs for one frame.
pub struct DiffSnapshot<'a> {
    pub mode: DiffViewMode,
    pub revision: u64,
    pub rows: &'a DiffRows,
    pub lines: &'a SideLines,
    pub highlights: &'a SideHighlights,
    pub range: ViewportRange,
    /// First visible row, in rows.
    pub first_row: usize,
    pub selection: Option<LineSelection>,
    pub layout: ViewerLayout,
    pub old_title: Option<&'a str>,
    pub new_title: Option<&'a str>,
}

impl DiffSnapshot<'_> {
    /// Whether `line` on `side` is inside the drag in progress.
    pub fn is_selected(&self, side: Side, line: usize) -> bool {
        self.selection.is_some_and(|sel| sel.contains(side, line))
    }
}

/// Owns the view mode and composes the diff engine, viewport window and
/// selection tracker into what gets drawn.
pub struct DiffViewer {
    inputs: DiffInputs,
    control: ModeControl,
    cache: DerivedCache,
    viewport: ViewportWindow,
    /// Scroll position in cells.
    scroll_offset: usize,
    tracker: SelectionTracker,
    release: Option<ReleaseSubscription>,
    area: Rect,
    layout: ViewerLayout,
    highlighter: Box<dyn HighlightAdapter>,
    on_mode_change: Option<ModeListener>,
    on_selection: Option<SelectionListener>,
}

impl DiffViewer {
    pub fn new(mode: DiffViewMode, overscan: usize) -> Self {
        Self {
            inputs: DiffInputs::default(),
            control: ModeControl::Uncontrolled(mode),
            cache: DerivedCache::new(),
            viewport: ViewportWindow::new(ROW_HEIGHT, overscan),
            scroll_offset: 0,
            tracker: SelectionTracker::new(),
            release: None,
            area: Rect::default(),
            layout: ViewerLayout::default(),
            highlighter: Box::new(PlainText),
            on_mode_change: None,
            on_selection: None,
        }
    }

    pub fn with_highlighter(mut self, highlighter: Box<dyn HighlightAdapter>) -> Self {
        self.highlighter = highlighter;
        self
    }

    pub fn on_mode_change(&mut self, listener: ModeListener) {
        self.on_mode_change = Some(listener);
    }

    pub fn on_selection(&mut self, listener: SelectionListener) {
        self.on_selection = Some(listener);
    }

    // ── Inputs ────────────────────────────────────────────────────────

    pub fn set_texts(&mut self, old_text: impl Into<String>, new_text: impl Into<String>) {
        self.inputs.set_texts(old_text.into(), new_text.into());
        self.cancel_selection();
        self.reset_scroll();
    }

    pub fn set_language(&mut self, language: Option<String>) {
        self.inputs.language = language;
    }

    pub fn set_titles(&mut self, old_title: Option<String>, new_title: Option<String>) {
        self.inputs.old_title = old_title;
        self.inputs.new_title = new_title;
    }

    pub fn language(&self) -> Option<&str> {
        self.inputs.language.as_deref()
    }

    // ── Mode ──────────────────────────────────────────────────────────

    pub fn view_mode(&self) -> DiffViewMode {
        self.control.mode()
    }

    pub fn is_controlled(&self) -> bool {
        matches!(self.control, ModeControl::Controlled(_))
    }

    /// Hand mode ownership to the caller (`Some`) or take it back (`None`).
    pub fn set_controlled_mode(&mut self, mode: Option<DiffViewMode>) {
        let before = self.view_mode();
        self.control = match mode {
            Some(mode) => ModeControl::Controlled(mode),
            None => ModeControl::Uncontrolled(before),
        };
        if self.view_mode() != before {
            self.mode_switched();
        }
    }

    /// Request the other view mode.
    ///
    /// Any drag in progress is abandoned and the listener is told about the
    /// requested mode. A controlled viewer keeps showing its current mode
    /// until the caller passes the new one back in.
    pub fn toggle_mode(&mut self) {
        let next = self.view_mode().toggled();
        self.cancel_selection();
        if let Some(listener) = self.on_mode_change.as_mut() {
            listener(next);
        }
        if let ModeControl::Uncontrolled(_) = self.control {
            self.control = ModeControl::Uncontrolled(next);
            self.mode_switched();
        }
    }

    fn mode_switched(&mut self) {
        log::debug!("view mode now {:?}", self.view_mode());
        self.cancel_selection();
        self.reset_scroll();
        self.layout = ViewerLayout::compute(self.area, self.view_mode());
    }

    // ── Derived data ──────────────────────────────────────────────────

    /// Rows for the active mode, computed on first use.
    pub fn rows(&mut self) -> &DiffRows {
        let mode = self.view_mode();
        self.cache.ensure_rows(&self.inputs, mode)
    }

    pub fn lines(&mut self) -> &SideLines {
        self.cache.ensure_lines(&self.inputs)
    }

    pub fn total_rows(&mut self) -> usize {
        self.rows().len()
    }

    pub fn stats(&mut self) -> DiffStats {
        self.rows().stats()
    }

    /// How many row projections have been built so far.
    pub fn row_builds(&self) -> usize {
        self.cache.row_builds()
    }

    // ── Layout and viewport ──────────────────────────────────────────

    /// Record where the viewer is drawn. Returns the new row range when it
    /// changed.
    pub fn set_area(&mut self, area: Rect) -> Option<ViewportRange> {
        if area != self.area {
            self.viewport.invalidate();
        }
        self.area = area;
        self.layout = ViewerLayout::compute(area, self.view_mode());
        self.refresh_viewport()
    }

    pub fn layout(&self) -> ViewerLayout {
        self.layout
    }

    fn viewport_height(&self) -> usize {
        self.layout.rows.height as usize
    }

    /// Recompute the materialized range; `None` when nothing moved.
    pub fn refresh_viewport(&mut self) -> Option<ViewportRange> {
        let total = self.total_rows();
        let height = self.viewport_height();
        self.scroll_offset = self.scroll_offset.min(self.viewport.max_scroll(total, height));
        let changed = self.viewport.update(total, self.scroll_offset, height);
        if let Some(range) = changed {
            log::trace!("viewport {}..{} of {total}", range.start, range.end);
        }
        changed
    }

    /// Force the next refresh to report, e.g. after a resize.
    pub fn invalidate_viewport(&mut self) {
        self.viewport.invalidate();
    }

    pub fn viewport_range(&self) -> ViewportRange {
        self.viewport.current()
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn first_visible_row(&self) -> usize {
        self.scroll_offset / self.viewport.row_height()
    }

    /// Scroll by whole rows; negative moves up.
    pub fn scroll_rows(&mut self, delta: isize) -> Option<ViewportRange> {
        let step = delta.unsigned_abs() * self.viewport.row_height();
        self.scroll_offset = if delta < 0 {
            self.scroll_offset.saturating_sub(step)
        } else {
            self.scroll_offset.saturating_add(step)
        };
        self.refresh_viewport()
    }

    pub fn scroll_pages(&mut self, pages: isize) -> Option<ViewportRange> {
        let page = (self.viewport_height() / self.viewport.row_height()).max(1) as isize;
        self.scroll_rows(pages * page)
    }

    pub fn scroll_to_top(&mut self) -> Option<ViewportRange> {
        self.scroll_offset = 0;
        self.refresh_viewport()
    }

    pub fn scroll_to_bottom(&mut self) -> Option<ViewportRange> {
        self.scroll_offset = usize::MAX;
        self.refresh_viewport()
    }

    fn reset_scroll(&mut self) {
        self.scroll_offset = 0;
        self.viewport.invalidate();
    }

    /// Bring the cache up to date and expose everything one frame needs.
    pub fn snapshot(&mut self, theme: &Theme) -> DiffSnapshot<'_> {
        let mode = self.view_mode();
        self.cache.ensure_rows(&self.inputs, mode);
        self.cache.ensure_highlights(
            &self.inputs,
            self.highlighter.as_ref(),
            &theme.name,
            &theme.syntax,
        );
        self.refresh_viewport();

        DiffSnapshot {
            mode,
            revision: self.inputs.revision,
            rows: self.cache.rows(),
            lines: self.cache.lines(),
            highlights: self.cache.highlights(),
            range: self.viewport.current(),
            first_row: self.scroll_offset / self.viewport.row_height(),
            selection: self.tracker.current().copied(),
            layout: self.layout,
            old_title: self.inputs.old_title.as_deref(),
            new_title: self.inputs.new_title.as_deref(),
        }
    }

    // ── Pointer handling ─────────────────────────────────────────────

    /// Map a screen cell to the line under it.
    pub fn hit_test(&mut self, column: u16, row: u16) -> Option<(Side, usize)> {
        let area = self.layout.rows;
        if column < area.x
            || column >= area.x + area.width
            || row < area.y
            || row >= area.y + area.height
        {
            return None;
        }
        let index = self.first_visible_row() + (row - area.y) as usize;
        let split_column = area.x + self.layout.split_at;

        match self.rows() {
            DiffRows::Unified(rows) => {
                let (side, line) = rows.get(index)?.selectable_side();
                (line > 0).then_some((side, line))
            }
            DiffRows::Split(rows) => {
                let row = rows.get(index)?;
                let side = if column < split_column {
                    Side::Old
                } else {
                    Side::New
                };
                row.line_number_for(side).map(|line| (side, line))
            }
        }
    }

    /// Pointer pressed. Starts a drag when it lands on a line.
    pub fn pointer_down(&mut self, column: u16, row: u16) -> bool {
        let Some((side, line)) = self.hit_test(column, row) else {
            return false;
        };
        self.release = Some(self.tracker.pointer_down(side, line));
        true
    }

    /// Pointer moved with the button held. Positions outside the rows, or on
    /// the other side, leave the drag as it is.
    pub fn pointer_drag(&mut self, column: u16, row: u16) {
        if !self.tracker.is_selecting() {
            return;
        }
        if let Some((side, line)) = self.hit_test(column, row) {
            self.tracker.pointer_move(side, line);
        }
    }

    /// Pointer released anywhere on screen. Only reaches the tracker while a
    /// drag holds the release subscription.
    pub fn pointer_up(&mut self) -> Option<CommittedSelection> {
        let subscription = self.release.take()?;
        let lines = self.cache.ensure_lines(&self.inputs);
        let committed = self
            .tracker
            .pointer_up(subscription, &lines.old, &lines.new)?;
        log::debug!(
            "selected {} lines {}..={}",
            committed.side.label(),
            committed.start_line,
            committed.end_line
        );
        if let Some(listener) = self.on_selection.as_mut() {
            listener(&committed);
        }
        Some(committed)
    }

    pub fn is_dragging(&self) -> bool {
        self.release.is_some()
    }

    pub fn is_selected(&self, side: Side, line: usize) -> bool {
        self.tracker.is_selected(side, line)
    }

    /// Drop any drag in progress along with its release subscription.
    pub fn cancel_selection(&mut self) {
        self.tracker.cancel();
        self.release = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::ChangeKind;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn numbered(n: usize) -> String {
        (1..=n).map(|i| format!("line {i}\n")).collect()
    }

    fn viewer(mode: DiffViewMode, old: &str, new: &str) -> DiffViewer {
        let mut viewer = DiffViewer::new(mode, 2);
        viewer.set_texts(old, new);
        viewer.set_area(Rect::new(0, 0, 80, 11));
        viewer
    }

    fn recorded_selections(viewer: &mut DiffViewer) -> Rc<RefCell<Vec<CommittedSelection>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        viewer.on_selection(Box::new(move |sel| sink.borrow_mut().push(sel.clone())));
        seen
    }

    #[test]
    fn rows_follow_the_active_mode_lazily() {
        let mut v = DiffViewer::new(DiffViewMode::Split, 0);
        v.set_texts("a\nb", "c\nd");
        assert_eq!(v.row_builds(), 0);

        match v.rows() {
            DiffRows::Split(rows) => {
                assert_eq!(rows.len(), 4);
                assert_eq!(rows[0].old_line.as_deref(), Some("a"));
                assert_eq!(rows[3].new_line.as_deref(), Some("d"));
            }
            other => panic!("expected split rows, got {other:?}"),
        }
        assert_eq!(v.row_builds(), 1);

        v.toggle_mode();
        assert_eq!(v.row_builds(), 1, "toggling alone does not compute");
        match v.rows() {
            DiffRows::Unified(rows) => {
                let kinds: Vec<_> = rows.iter().map(|r| r.kind).collect();
                assert_eq!(
                    kinds,
                    vec![
                        ChangeKind::Removed,
                        ChangeKind::Removed,
                        ChangeKind::Added,
                        ChangeKind::Added
                    ]
                );
            }
            other => panic!("expected unified rows, got {other:?}"),
        }
        assert_eq!(v.row_builds(), 2);
    }

    #[test]
    fn drag_commits_normalized_selection() {
        let text = numbered(10);
        let mut v = viewer(DiffViewMode::Split, &text, &text);
        let seen = recorded_selections(&mut v);
        let rows_y = v.layout().rows.y;

        // Old column, line 5 then drag up to line 3.
        assert!(v.pointer_down(2, rows_y + 4));
        v.pointer_drag(2, rows_y + 2);
        let committed = v.pointer_up().unwrap();

        assert_eq!(committed.side, Side::Old);
        assert_eq!((committed.start_line, committed.end_line), (3, 5));
        assert_eq!(committed.lines, vec!["line 3", "line 4", "line 5"]);
        assert_eq!(seen.borrow().len(), 1);
        assert!(!v.is_dragging());
    }

    #[test]
    fn drag_does_not_cross_columns() {
        let text = numbered(10);
        let mut v = viewer(DiffViewMode::Split, &text, &text);
        let rows_y = v.layout().rows.y;
        let right = v.layout().split_at + 2;

        v.pointer_down(right, rows_y + 1);
        v.pointer_drag(2, rows_y + 6);
        let committed = v.pointer_up().unwrap();
        assert_eq!(committed.side, Side::New);
        assert_eq!((committed.start_line, committed.end_line), (2, 2));
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut v = viewer(DiffViewMode::Unified, "a", "b");
        let seen = recorded_selections(&mut v);
        assert_eq!(v.pointer_up(), None);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn toggling_mid_drag_drops_the_selection() {
        let text = numbered(10);
        let mut v = viewer(DiffViewMode::Split, &text, &text);
        let seen = recorded_selections(&mut v);
        let rows_y = v.layout().rows.y;

        v.pointer_down(2, rows_y);
        v.pointer_drag(2, rows_y + 3);
        v.toggle_mode();

        assert!(!v.is_dragging());
        assert_eq!(v.pointer_up(), None);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn release_outside_the_widget_still_commits() {
        let text = numbered(10);
        let mut v = viewer(DiffViewMode::Unified, &text, &text);
        v.pointer_down(5, 1);
        // Moving far outside neither cancels nor extends.
        v.pointer_drag(500, 500);
        assert!(v.is_selected(Side::New, 2));
        let committed = v.pointer_up().unwrap();
        assert_eq!((committed.start_line, committed.end_line), (2, 2));
    }

    #[test]
    fn split_padding_cells_do_not_start_a_drag() {
        // Old has one extra line, so the new column is blank on that row.
        let mut v = viewer(DiffViewMode::Split, "a\nx\nb", "a\nb");
        let rows_y = v.layout().rows.y;
        let right = v.layout().split_at + 1;
        assert_eq!(v.hit_test(right, rows_y + 1), None);
        assert!(!v.pointer_down(right, rows_y + 1));
        assert_eq!(v.hit_test(1, rows_y + 1), Some((Side::Old, 2)));
    }

    #[test]
    fn unified_rows_hit_their_own_side() {
        let mut v = viewer(DiffViewMode::Unified, "a\nold", "a\nnew");
        assert_eq!(v.hit_test(3, 0), Some((Side::New, 1)));
        assert_eq!(v.hit_test(3, 1), Some((Side::Old, 2)));
        assert_eq!(v.hit_test(3, 2), Some((Side::New, 2)));
        assert_eq!(v.hit_test(3, 3), None);
    }

    #[test]
    fn controlled_mode_waits_for_the_caller() {
        let mut v = DiffViewer::new(DiffViewMode::Split, 0);
        let requested = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&requested);
        v.on_mode_change(Box::new(move |mode| sink.borrow_mut().push(mode)));

        v.set_controlled_mode(Some(DiffViewMode::Split));
        assert!(v.is_controlled());
        v.toggle_mode();
        assert_eq!(*requested.borrow(), vec![DiffViewMode::Unified]);
        assert_eq!(v.view_mode(), DiffViewMode::Split);

        v.set_controlled_mode(Some(DiffViewMode::Unified));
        assert_eq!(v.view_mode(), DiffViewMode::Unified);

        v.set_controlled_mode(None);
        assert!(!v.is_controlled());
        v.toggle_mode();
        assert_eq!(v.view_mode(), DiffViewMode::Split);
        assert_eq!(requested.borrow().len(), 2);
    }

    #[test]
    fn scrolling_is_clamped_and_suppresses_repeats() {
        let text = numbered(100);
        let mut v = DiffViewer::new(DiffViewMode::Unified, 3);
        v.set_texts(text.clone(), text);
        assert_eq!(
            v.set_area(Rect::new(0, 0, 40, 10)),
            Some(ViewportRange::new(0, 13))
        );
        assert_eq!(v.refresh_viewport(), None);

        assert_eq!(v.scroll_rows(20), Some(ViewportRange::new(17, 33)));
        assert_eq!(v.scroll_rows(-50), Some(ViewportRange::new(0, 13)));
        assert_eq!(v.scroll_offset(), 0);

        v.scroll_to_bottom();
        assert_eq!(v.scroll_offset(), 90);
        assert_eq!(v.viewport_range(), ViewportRange::new(87, 100));
        assert_eq!(v.scroll_rows(5), None);

        assert_eq!(v.scroll_pages(-1), Some(ViewportRange::new(77, 93)));
    }

    #[test]
    fn new_texts_reset_scroll_and_selection() {
        let text = numbered(40);
        let mut v = viewer(DiffViewMode::Unified, &text, &text);
        v.scroll_rows(10);
        v.pointer_down(1, 1);
        v.set_texts("x", "y");
        assert_eq!(v.scroll_offset(), 0);
        assert!(!v.is_dragging());
        assert_eq!(v.total_rows(), 2);
    }

    #[test]
    fn empty_side_renders_as_pure_additions() {
        let mut v = DiffViewer::new(DiffViewMode::Split, 0);
        v.set_texts("", "a\nb\n");
        let stats = v.stats();
        assert_eq!((stats.added, stats.removed, stats.unchanged), (2, 0, 0));
    }

    #[test]
    fn snapshot_reports_selection_and_range() {
        let text = numbered(30);
        let mut v = viewer(DiffViewMode::Split, &text, &text);
        let rows_y = v.layout().rows.y;
        v.pointer_down(1, rows_y);
        v.pointer_drag(1, rows_y + 2);

        let theme = Theme::default();
        let snap = v.snapshot(&theme);
        assert_eq!(snap.mode, DiffViewMode::Split);
        assert_eq!(snap.range, ViewportRange::new(0, 12));
        assert!(snap.is_selected(Side::Old, 3));
        assert!(!snap.is_selected(Side::New, 3));
        assert!(snap.layout.header.is_some());
    }
}
