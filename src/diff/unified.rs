use std::collections::HashSet;

use super::types::DiffLine;

/// Build a unified diff with the greedy membership heuristic.
///
/// Each side is reduced to a set of line values. Two cursors then walk the
/// inputs: an old line that never appears on the new side is removed, a new
/// line that never appears on the old side is added, equal lines under both
/// cursors are unchanged, and anything else falls back to removing the old
/// line. This is not a minimal diff; it diverges from the LCS aligner when
/// lines repeat, and that divergence is part of the output contract.
///
/// Once one side runs out, whatever is left on the other side is emitted as
/// pure additions or removals.
pub fn compute_unified_diff<S: AsRef<str>>(old_lines: &[S], new_lines: &[S]) -> Vec<DiffLine> {
    let old_set: HashSet<&str> = old_lines.iter().map(AsRef::as_ref).collect();
    let new_set: HashSet<&str> = new_lines.iter().map(AsRef::as_ref).collect();

    let mut rows = Vec::with_capacity(old_lines.len().max(new_lines.len()));
    let (mut i, mut j) = (0, 0);

    while i < old_lines.len() || j < new_lines.len() {
        let row_number = rows.len() + 1;

        if i >= old_lines.len() {
            rows.push(DiffLine::added(row_number, new_lines[j].as_ref(), j + 1));
            j += 1;
            continue;
        }
        if j >= new_lines.len() {
            rows.push(DiffLine::removed(row_number, old_lines[i].as_ref(), i + 1));
            i += 1;
            continue;
        }

        let old = old_lines[i].as_ref();
        let new = new_lines[j].as_ref();

        if !new_set.contains(old) {
            rows.push(DiffLine::removed(row_number, old, i + 1));
            i += 1;
        } else if !old_set.contains(new) {
            rows.push(DiffLine::added(row_number, new, j + 1));
            j += 1;
        } else if old == new {
            rows.push(DiffLine::unchanged(row_number, old, i + 1, j + 1));
            i += 1;
            j += 1;
        } else {
            // Both lines exist elsewhere on the other side: drop the old one.
            rows.push(DiffLine::removed(row_number, old, i + 1));
            i += 1;
        }
    }

    rows
}
