use std::ops::Range;

/// Half-open index range of materialized rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewportRange {
    pub start: usize,
    pub end: usize,
}

impl ViewportRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }

    pub fn iter(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Fixed-row-height windowing over a logical row array.
///
/// Because every row has the same height the visible slice is pure
/// arithmetic on the scroll offset, so large diffs stay cheap to scroll.
#[derive(Debug, Clone)]
pub struct ViewportWindow {
    row_height: usize,
    overscan: usize,
    current: Option<ViewportRange>,
}

impl ViewportWindow {
    pub fn new(row_height: usize, overscan: usize) -> Self {
        Self {
            row_height: row_height.max(1),
            overscan,
            current: None,
        }
    }

    pub fn row_height(&self) -> usize {
        self.row_height
    }

    pub fn overscan(&self) -> usize {
        self.overscan
    }

    /// Visible range for `total_rows` rows at `scroll_offset` inside a
    /// container `viewport_height` tall.
    pub fn compute(
        &self,
        total_rows: usize,
        scroll_offset: usize,
        viewport_height: usize,
    ) -> ViewportRange {
        let h = self.row_height;
        let first = scroll_offset / h;
        let last = scroll_offset.saturating_add(viewport_height).div_ceil(h);

        let end = last.saturating_add(self.overscan).min(total_rows);
        let start = first.saturating_sub(self.overscan).min(end);
        ViewportRange { start, end }
    }

    /// Recompute and store the range, returning it only when it differs from
    /// the previous one so callers can skip redundant re-renders.
    pub fn update(
        &mut self,
        total_rows: usize,
        scroll_offset: usize,
        viewport_height: usize,
    ) -> Option<ViewportRange> {
        let next = self.compute(total_rows, scroll_offset, viewport_height);
        if self.current == Some(next) {
            return None;
        }
        self.current = Some(next);
        Some(next)
    }

    /// Last range produced by [`update`](Self::update).
    pub fn current(&self) -> ViewportRange {
        self.current.unwrap_or_default()
    }

    /// Forget the stored range so the next update always reports.
    pub fn invalidate(&mut self) {
        self.current = None;
    }

    /// Height the scroll container reserves for all rows.
    pub fn total_height(&self, total_rows: usize) -> usize {
        total_rows.saturating_mul(self.row_height)
    }

    /// Translation applied to the materialized block.
    pub fn offset_of(&self, range: ViewportRange) -> usize {
        range.start.saturating_mul(self.row_height)
    }

    /// Largest scroll offset that still fills the container.
    pub fn max_scroll(&self, total_rows: usize, viewport_height: usize) -> usize {
        self.total_height(total_rows).saturating_sub(viewport_height)
    }
}
