use super::types::{ChangeKind, DiffLine, SplitAlignedRow};

/// Row counts per change kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStats {
    pub added: usize,
    pub removed: usize,
    pub unchanged: usize,
}

impl DiffStats {
    pub fn from_unified(rows: &[DiffLine]) -> Self {
        rows.iter().map(|r| r.kind).collect()
    }

    pub fn from_split(rows: &[SplitAlignedRow]) -> Self {
        rows.iter().map(|r| r.kind).collect()
    }

    pub fn has_changes(&self) -> bool {
        self.added > 0 || self.removed > 0
    }
}

impl FromIterator<ChangeKind> for DiffStats {
    fn from_iter<I: IntoIterator<Item = ChangeKind>>(iter: I) -> Self {
        let mut stats = DiffStats::default();
        for kind in iter {
            match kind {
                ChangeKind::Added => stats.added += 1,
                ChangeKind::Removed => stats.removed += 1,
                ChangeKind::Unchanged => stats.unchanged += 1,
            }
        }
        stats
    }
}
