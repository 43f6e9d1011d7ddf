use super::types::{ClassifiedLine, DiffStats, LineType};

/// Derive addition/deletion/modification counts from classified rows.
///
/// `modification_pairs` is the classifier's running counter, which counts a
/// paired block of `r` removed and `a` added lines as `max(r, a)`.
pub fn aggregate(
    original: &[ClassifiedLine],
    modified: &[ClassifiedLine],
    modification_pairs: usize,
) -> DiffStats {
    DiffStats {
        additions: count_numbered(modified, LineType::Added),
        deletions: count_numbered(original, LineType::Removed),
        modifications: modification_pairs,
    }
}

/// Larger of the two per-side counts of modified rows.
///
/// Agrees with the classifier's counter whenever every paired block has as
/// many removed as added lines.
pub fn modified_line_count(original: &[ClassifiedLine], modified: &[ClassifiedLine]) -> usize {
    count_numbered(original, LineType::Modified).max(count_numbered(modified, LineType::Modified))
}

// placeholders carry the counterpart's type but no line number
fn count_numbered(lines: &[ClassifiedLine], line_type: LineType) -> usize {
    lines
        .iter()
        .filter(|line| line.line_type == line_type && !line.is_placeholder())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::classify::classify;
    use crate::diff::types::{DiffOptions, LayoutMode, Run, RunFlag};

    fn run(flag: RunFlag, units: &[&str]) -> Run {
        Run::new(flag, units.iter().map(|u| u.to_string()).collect())
    }

    #[test]
    fn placeholders_are_not_counted() {
        let runs = vec![
            run(RunFlag::Equal, &["same"]),
            run(RunFlag::Removed, &["gone"]),
            run(RunFlag::Equal, &["again"]),
            run(RunFlag::Added, &["new 1", "new 2"]),
        ];
        for layout in [LayoutMode::Aligned, LayoutMode::Compact] {
            let options = DiffOptions {
                layout,
                ..DiffOptions::default()
            };
            let out = classify(&runs, &options);
            let stats = aggregate(&out.original, &out.modified, out.modification_pairs);
            assert_eq!(
                stats,
                DiffStats {
                    additions: 2,
                    deletions: 1,
                    modifications: 0
                }
            );
        }
    }

    #[test]
    fn asymmetric_pair_counts_larger_side() {
        let runs = vec![
            run(RunFlag::Removed, &["r1", "r2", "r3"]),
            run(RunFlag::Added, &["a1"]),
        ];
        let out = classify(&runs, &DiffOptions::default());
        let stats = aggregate(&out.original, &out.modified, out.modification_pairs);
        assert_eq!(stats.modifications, 3);
        assert_eq!(stats.deletions, 2);
        assert_eq!(stats.additions, 0);
        assert_eq!(modified_line_count(&out.original, &out.modified), 1);
    }

    #[test]
    fn both_rules_agree_for_balanced_pairs() {
        let runs = vec![
            run(RunFlag::Removed, &["r1", "r2"]),
            run(RunFlag::Added, &["a1", "a2"]),
            run(RunFlag::Equal, &["e"]),
            run(RunFlag::Removed, &["r3"]),
            run(RunFlag::Added, &["a3"]),
        ];
        let out = classify(&runs, &DiffOptions::default());
        assert_eq!(out.modification_pairs, 3);
        assert_eq!(modified_line_count(&out.original, &out.modified), 3);
    }

    #[test]
    fn empty_input_has_empty_stats() {
        let stats = aggregate(&[], &[], 0);
        assert!(stats.is_empty());
    }
}
