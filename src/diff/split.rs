use super::types::SplitAlignedRow;

/// Align two line arrays into side-by-side rows using a longest common
/// subsequence table.
///
/// `dp[i][j]` holds the LCS length of `old_lines[i..]` and `new_lines[j..]`.
/// The table costs `O(n * m)` time and memory; that is accepted for
/// interactively sized inputs.
///
/// Reconstruction walks both inputs from the front. On a tie between
/// dropping the old line and dropping the new line the old line is removed
/// first, which keeps the output deterministic when several optimal
/// alignments exist.
pub fn compute_split_alignment<S: AsRef<str>>(
    old_lines: &[S],
    new_lines: &[S],
) -> Vec<SplitAlignedRow> {
    let n = old_lines.len();
    let m = new_lines.len();
    let dp = lcs_suffix_table(old_lines, new_lines);

    let mut rows = Vec::with_capacity(n.max(m));
    let (mut i, mut j) = (0, 0);
    let (mut old_no, mut new_no) = (1, 1);

    while i < n && j < m {
        let old = old_lines[i].as_ref();
        let new = new_lines[j].as_ref();
        if old == new {
            rows.push(SplitAlignedRow::unchanged(old, new, old_no, new_no));
            i += 1;
            j += 1;
            old_no += 1;
            new_no += 1;
        } else if dp[i + 1][j] >= dp[i][j + 1] {
            rows.push(SplitAlignedRow::removed(old, old_no));
            i += 1;
            old_no += 1;
        } else {
            rows.push(SplitAlignedRow::added(new, new_no));
            j += 1;
            new_no += 1;
        }
    }

    for line in &old_lines[i..] {
        rows.push(SplitAlignedRow::removed(line.as_ref(), old_no));
        old_no += 1;
    }
    for line in &new_lines[j..] {
        rows.push(SplitAlignedRow::added(line.as_ref(), new_no));
        new_no += 1;
    }

    rows
}

/// Bottom-up suffix LCS table of size `(n + 1) x (m + 1)`.
fn lcs_suffix_table<S: AsRef<str>>(old_lines: &[S], new_lines: &[S]) -> Vec<Vec<usize>> {
    let n = old_lines.len();
    let m = new_lines.len();
    let mut dp = vec![vec![0usize; m + 1]; n + 1];

    for i in (0..n).rev() {
        for j in (0..m).rev() {
            dp[i][j] = if old_lines[i].as_ref() == new_lines[j].as_ref() {
                dp[i + 1][j + 1] + 1
            } else {
                dp[i + 1][j].max(dp[i][j + 1])
            };
        }
    }

    dp
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::types::ChangeKind;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn old_side(rows: &[SplitAlignedRow]) -> Vec<String> {
        rows.iter().filter_map(|r| r.old_line.clone()).collect()
    }

    fn new_side(rows: &[SplitAlignedRow]) -> Vec<String> {
        rows.iter().filter_map(|r| r.new_line.clone()).collect()
    }

    fn unchanged_count(rows: &[SplitAlignedRow]) -> usize {
        rows.iter()
            .filter(|r| r.kind == ChangeKind::Unchanged)
            .count()
    }

    /// Two-row rolling LCS length, independent of the table above.
    fn reference_lcs_len(a: &[String], b: &[String]) -> usize {
        let mut prev = vec![0usize; b.len() + 1];
        let mut cur = vec![0usize; b.len() + 1];
        for x in a {
            for (j, y) in b.iter().enumerate() {
                cur[j + 1] = if x == y {
                    prev[j] + 1
                } else {
                    cur[j].max(prev[j + 1])
                };
            }
            std::mem::swap(&mut prev, &mut cur);
        }
        prev[b.len()]
    }

    /// Top-down memoized LCS length over prefixes.
    fn memo_lcs_len(a: &[String], b: &[String]) -> usize {
        fn go(
            a: &[String],
            b: &[String],
            i: usize,
            j: usize,
            memo: &mut HashMap<(usize, usize), usize>,
        ) -> usize {
            if i == 0 || j == 0 {
                return 0;
            }
            if let Some(&len) = memo.get(&(i, j)) {
                return len;
            }
            let len = if a[i - 1] == b[j - 1] {
                go(a, b, i - 1, j - 1, memo) + 1
            } else {
                go(a, b, i - 1, j, memo).max(go(a, b, i, j - 1, memo))
            };
            memo.insert((i, j), len);
            len
        }
        go(a, b, a.len(), b.len(), &mut HashMap::new())
    }

    #[test]
    fn disjoint_inputs_remove_then_add() {
        let rows = compute_split_alignment(&["a", "b"], &["c", "d"]);
        assert_eq!(
            rows,
            vec![
                SplitAlignedRow::removed("a", 1),
                SplitAlignedRow::removed("b", 2),
                SplitAlignedRow::added("c", 1),
                SplitAlignedRow::added("d", 2),
            ]
        );
    }

    #[test]
    fn tie_prefers_removing_old_line() {
        // "a"/"b" swap has two optimal alignments; the old line goes first.
        let rows = compute_split_alignment(&["a", "b"], &["b", "a"]);
        assert_eq!(
            rows,
            vec![
                SplitAlignedRow::removed("a", 1),
                SplitAlignedRow::unchanged("b", "b", 2, 1),
                SplitAlignedRow::added("a", 2),
            ]
        );
    }

    #[test]
    fn replaced_line_between_context() {
        let rows = compute_split_alignment(&["a", "b", "c"], &["a", "B", "c"]);
        assert_eq!(
            rows,
            vec![
                SplitAlignedRow::unchanged("a", "a", 1, 1),
                SplitAlignedRow::removed("b", 2),
                SplitAlignedRow::added("B", 2),
                SplitAlignedRow::unchanged("c", "c", 3, 3),
            ]
        );
    }

    #[test]
    fn keeps_longest_run_on_rotation() {
        let rows = compute_split_alignment(&["a", "b", "c"], &["c", "a", "b"]);
        assert_eq!(unchanged_count(&rows), 2);
        assert_eq!(rows[0], SplitAlignedRow::added("c", 1));
        assert_eq!(rows[3], SplitAlignedRow::removed("c", 3));
    }

    #[test]
    fn empty_sides() {
        let empty: [&str; 0] = [];
        assert!(compute_split_alignment(&empty, &empty).is_empty());
        assert_eq!(
            compute_split_alignment(&empty, &["x"]),
            vec![SplitAlignedRow::added("x", 1)]
        );
        assert_eq!(
            compute_split_alignment(&["x"], &empty),
            vec![SplitAlignedRow::removed("x", 1)]
        );
    }

    #[test]
    fn line_numbers_count_per_side() {
        let rows = compute_split_alignment(&["k", "o1", "o2", "k2"], &["k", "n1", "k2"]);
        let old_numbers: Vec<usize> = rows.iter().filter_map(|r| r.old_line_number).collect();
        let new_numbers: Vec<usize> = rows.iter().filter_map(|r| r.new_line_number).collect();
        assert_eq!(old_numbers, vec![1, 2, 3, 4]);
        assert_eq!(new_numbers, vec![1, 2, 3]);
    }

    #[test]
    fn repeated_prefix_keeps_full_lcs() {
        let old: Vec<String> = ["a", "a", "a", "a", "b"].map(String::from).to_vec();
        let new: Vec<String> = ["a", "c", "a"].map(String::from).to_vec();
        let rows = compute_split_alignment(&old, &new);
        assert_eq!(unchanged_count(&rows), 2);
        assert_eq!(reference_lcs_len(&old, &new), 2);
        assert_eq!(memo_lcs_len(&old, &new), 2);
        assert_eq!(old_side(&rows), old);
        assert_eq!(new_side(&rows), new);
    }

    fn lines_strategy() -> impl Strategy<Value = Vec<String>> {
        // A tiny alphabet forces plenty of repeated lines.
        prop::collection::vec(prop::sample::select(vec!["a", "b", "c", "d", ""]), 0..24)
            .prop_map(|v| v.into_iter().map(String::from).collect())
    }

    proptest! {
        #[test]
        fn reconstructs_both_inputs(old in lines_strategy(), new in lines_strategy()) {
            let rows = compute_split_alignment(&old, &new);
            prop_assert_eq!(old_side(&rows), old);
            prop_assert_eq!(new_side(&rows), new);
        }

        #[test]
        fn repeated_calls_agree(old in lines_strategy(), new in lines_strategy()) {
            prop_assert_eq!(
                compute_split_alignment(&old, &new),
                compute_split_alignment(&old, &new)
            );
        }

        #[test]
        fn unchanged_rows_match_lcs_length(old in lines_strategy(), new in lines_strategy()) {
            let rows = compute_split_alignment(&old, &new);
            let count = unchanged_count(&rows);
            prop_assert_eq!(count, reference_lcs_len(&old, &new));
            prop_assert_eq!(count, memo_lcs_len(&old, &new));
        }

        #[test]
        fn rows_respect_kind_invariants(old in lines_strategy(), new in lines_strategy()) {
            for row in compute_split_alignment(&old, &new) {
                match row.kind {
                    ChangeKind::Unchanged => {
                        prop_assert!(row.old_line_number.is_some() && row.new_line_number.is_some());
                        prop_assert_eq!(&row.old_line, &row.new_line);
                    }
                    ChangeKind::Added => {
                        prop_assert!(row.old_line_number.is_none() && row.old_line.is_none());
                        prop_assert!(row.new_line_number.is_some());
                    }
                    ChangeKind::Removed => {
                        prop_assert!(row.new_line_number.is_none() && row.new_line.is_none());
                        prop_assert!(row.old_line_number.is_some());
                    }
                }
            }
        }
    }
}
