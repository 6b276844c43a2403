/// Classification of a diff row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Added,
    Removed,
    Unchanged,
}

impl ChangeKind {
    /// Single-character marker used in the unified gutter.
    pub fn symbol(self) -> &'static str {
        match self {
            ChangeKind::Added => "+",
            ChangeKind::Removed => "-",
            ChangeKind::Unchanged => " ",
        }
    }
}

/// Which column of the diff a line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Old,
    New,
}

impl Side {
    pub fn label(self) -> &'static str {
        match self {
            Side::Old => "old",
            Side::New => "new",
        }
    }
}

/// One row of a unified diff.
///
/// `line_number` is the 1-based position of the row in the unified output.
/// Unchanged rows carry both side numbers, added rows only the new one and
/// removed rows only the old one; the constructors are the only way to build
/// a row so that invariant always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub line_number: usize,
    pub kind: ChangeKind,
    pub content: String,
    pub old_line_number: Option<usize>,
    pub new_line_number: Option<usize>,
}

impl DiffLine {
    pub fn added(line_number: usize, content: impl Into<String>, new_line: usize) -> Self {
        Self {
            line_number,
            kind: ChangeKind::Added,
            content: content.into(),
            old_line_number: None,
            new_line_number: Some(new_line),
        }
    }

    pub fn removed(line_number: usize, content: impl Into<String>, old_line: usize) -> Self {
        Self {
            line_number,
            kind: ChangeKind::Removed,
            content: content.into(),
            old_line_number: Some(old_line),
            new_line_number: None,
        }
    }

    pub fn unchanged(
        line_number: usize,
        content: impl Into<String>,
        old_line: usize,
        new_line: usize,
    ) -> Self {
        Self {
            line_number,
            kind: ChangeKind::Unchanged,
            content: content.into(),
            old_line_number: Some(old_line),
            new_line_number: Some(new_line),
        }
    }

    /// The side a pointer over this row selects from.
    ///
    /// Removed rows only exist on the old side; everything else is addressed
    /// through its new-side line number.
    pub fn selectable_side(&self) -> (Side, usize) {
        match (self.kind, self.old_line_number, self.new_line_number) {
            (ChangeKind::Removed, Some(old), _) => (Side::Old, old),
            (_, _, Some(new)) => (Side::New, new),
            (_, Some(old), None) => (Side::Old, old),
            (_, None, None) => (Side::New, 0),
        }
    }
}

/// One row of a side-by-side diff, holding content per side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitAlignedRow {
    pub kind: ChangeKind,
    pub old_line: Option<String>,
    pub new_line: Option<String>,
    pub old_line_number: Option<usize>,
    pub new_line_number: Option<usize>,
}

impl SplitAlignedRow {
    pub fn added(content: impl Into<String>, new_line: usize) -> Self {
        Self {
            kind: ChangeKind::Added,
            old_line: None,
            new_line: Some(content.into()),
            old_line_number: None,
            new_line_number: Some(new_line),
        }
    }

    pub fn removed(content: impl Into<String>, old_line: usize) -> Self {
        Self {
            kind: ChangeKind::Removed,
            old_line: Some(content.into()),
            new_line: None,
            old_line_number: Some(old_line),
            new_line_number: None,
        }
    }

    pub fn unchanged(
        old: impl Into<String>,
        new: impl Into<String>,
        old_line: usize,
        new_line: usize,
    ) -> Self {
        Self {
            kind: ChangeKind::Unchanged,
            old_line: Some(old.into()),
            new_line: Some(new.into()),
            old_line_number: Some(old_line),
            new_line_number: Some(new_line),
        }
    }

    pub fn content_for(&self, side: Side) -> Option<&str> {
        match side {
            Side::Old => self.old_line.as_deref(),
            Side::New => self.new_line.as_deref(),
        }
    }

    pub fn line_number_for(&self, side: Side) -> Option<usize> {
        match side {
            Side::Old => self.old_line_number,
            Side::New => self.new_line_number,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_follow_line_number_invariant() {
        let a = DiffLine::added(1, "x", 4);
        assert_eq!((a.old_line_number, a.new_line_number), (None, Some(4)));
        let r = DiffLine::removed(2, "y", 7);
        assert_eq!((r.old_line_number, r.new_line_number), (Some(7), None));
        let u = DiffLine::unchanged(3, "z", 1, 2);
        assert_eq!((u.old_line_number, u.new_line_number), (Some(1), Some(2)));
    }

    #[test]
    fn selectable_side_prefers_old_for_removed() {
        assert_eq!(DiffLine::removed(1, "a", 3).selectable_side(), (Side::Old, 3));
        assert_eq!(DiffLine::added(1, "a", 5).selectable_side(), (Side::New, 5));
        assert_eq!(
            DiffLine::unchanged(1, "a", 2, 9).selectable_side(),
            (Side::New, 9)
        );
    }

    #[test]
    fn split_row_accessors() {
        let row = SplitAlignedRow::removed("gone", 12);
        assert_eq!(row.content_for(Side::Old), Some("gone"));
        assert_eq!(row.content_for(Side::New), None);
        assert_eq!(row.line_number_for(Side::Old), Some(12));
        assert_eq!(row.line_number_for(Side::New), None);
    }
}
