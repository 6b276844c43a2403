use crate::diff::Side;

/// An in-progress drag over the lines of one side. Line numbers are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSelection {
    pub side: Side,
    pub start_line: usize,
    pub end_line: usize,
}

impl LineSelection {
    /// Returns the (start, end) line range, inclusive and ordered.
    pub fn range(&self) -> (usize, usize) {
        if self.start_line <= self.end_line {
            (self.start_line, self.end_line)
        } else {
            (self.end_line, self.start_line)
        }
    }

    pub fn contains(&self, side: Side, line: usize) -> bool {
        let (start, end) = self.range();
        self.side == side && line >= start && line <= end
    }
}

/// A finished drag handed to the selection listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedSelection {
    pub side: Side,
    pub start_line: usize,
    pub end_line: usize,
    /// Raw content of `start_line..=end_line` on `side`.
    pub lines: Vec<String>,
}

impl CommittedSelection {
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Proof that a drag is in progress and a pointer release may end it.
///
/// Handed out by [`SelectionTracker::pointer_down`] and consumed by
/// [`SelectionTracker::pointer_up`]; whoever holds it is subscribed to
/// releases for exactly the lifetime of one drag.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "dropping the subscription means the release will never reach the tracker"]
pub struct ReleaseSubscription {
    side: Side,
}

impl ReleaseSubscription {
    pub fn side(&self) -> Side {
        self.side
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    Idle,
    Selecting(LineSelection),
}

/// Drag-to-select state machine for diff lines.
#[derive(Debug, Default)]
pub struct SelectionTracker {
    state: SelectionState,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn is_selecting(&self) -> bool {
        matches!(self.state, SelectionState::Selecting(_))
    }

    pub fn current(&self) -> Option<&LineSelection> {
        match &self.state {
            SelectionState::Selecting(sel) => Some(sel),
            SelectionState::Idle => None,
        }
    }

    /// Start a drag on `line` of `side`.
    pub fn pointer_down(&mut self, side: Side, line: usize) -> ReleaseSubscription {
        self.state = SelectionState::Selecting(LineSelection {
            side,
            start_line: line,
            end_line: line,
        });
        ReleaseSubscription { side }
    }

    /// Extend the drag to `line`. Moves over the other side are ignored.
    pub fn pointer_move(&mut self, side: Side, line: usize) {
        if let SelectionState::Selecting(sel) = &mut self.state {
            if sel.side == side {
                sel.end_line = line;
            }
        }
    }

    /// Finish the drag and return the normalized selection with its content.
    ///
    /// Returns `None` when the drag was cancelled before the release arrived.
    pub fn pointer_up(
        &mut self,
        subscription: ReleaseSubscription,
        old_lines: &[String],
        new_lines: &[String],
    ) -> Option<CommittedSelection> {
        let SelectionState::Selecting(sel) = std::mem::take(&mut self.state) else {
            return None;
        };
        debug_assert_eq!(subscription.side, sel.side);

        let (start_line, end_line) = sel.range();
        let source = match sel.side {
            Side::Old => old_lines,
            Side::New => new_lines,
        };
        Some(CommittedSelection {
            side: sel.side,
            start_line,
            end_line,
            lines: slice_lines(source, start_line, end_line),
        })
    }

    /// Abandon any drag in progress without reporting it.
    pub fn cancel(&mut self) {
        self.state = SelectionState::Idle;
    }

    pub fn is_selected(&self, side: Side, line: usize) -> bool {
        self.current().is_some_and(|sel| sel.contains(side, line))
    }
}

/// 1-based inclusive slice, clamped to what `lines` actually holds.
fn slice_lines(lines: &[String], start_line: usize, end_line: usize) -> Vec<String> {
    let start = start_line.saturating_sub(1).min(lines.len());
    let end = end_line.min(lines.len()).max(start);
    lines[start..end].to_vec()
}
