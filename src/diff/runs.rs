use super::types::{Run, RunFlag, TokenGranularity};
use similar::{Algorithm, ChangeTag, DiffTag, TextDiff};

/// Diff two unit sequences into maximal equal/added/removed runs.
///
/// Units are compared by exact string equality. A replaced block becomes a
/// removed run immediately followed by an added run; no pairing happens here.
pub fn diff_units(a: &[String], b: &[String]) -> Vec<Run> {
    let ops = similar::capture_diff_slices(Algorithm::Myers, a, b);
    let mut runs: Vec<Run> = Vec::new();

    for op in &ops {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        match tag {
            DiffTag::Equal => push_run(&mut runs, RunFlag::Equal, &a[old_range]),
            DiffTag::Delete => push_run(&mut runs, RunFlag::Removed, &a[old_range]),
            DiffTag::Insert => push_run(&mut runs, RunFlag::Added, &b[new_range]),
            DiffTag::Replace => {
                push_run(&mut runs, RunFlag::Removed, &a[old_range]);
                push_run(&mut runs, RunFlag::Added, &b[new_range]);
            }
        }
    }

    runs
}

/// Diff two strings at word (or character) granularity.
///
/// Used for the sub-line detail of a modified pair. Whitespace is its own
/// unit, so whitespace-only edits are reported.
pub fn diff_words(a: &str, b: &str, granularity: TokenGranularity) -> Vec<Run> {
    let mut config = TextDiff::configure();
    config.algorithm(Algorithm::Myers);
    let diff = match granularity {
        TokenGranularity::Word => config.diff_words(a, b),
        TokenGranularity::Char => config.diff_chars(a, b),
    };

    let mut runs: Vec<Run> = Vec::new();
    for change in diff.iter_all_changes() {
        let flag = match change.tag() {
            ChangeTag::Equal => RunFlag::Equal,
            ChangeTag::Delete => RunFlag::Removed,
            ChangeTag::Insert => RunFlag::Added,
        };
        push_run(&mut runs, flag, &[change.value().to_string()]);
    }

    runs
}

/// Append units to the run list, extending the last run if it has the same flag
fn push_run(runs: &mut Vec<Run>, flag: RunFlag, units: &[String]) {
    if units.is_empty() {
        return;
    }

    match runs.last_mut() {
        Some(last) if last.flag == flag => last.units.extend_from_slice(units),
        _ => runs.push(Run::new(flag, units.to_vec())),
    }
}

/// Concatenate the units visible from one side, in order
pub fn reconstruct(runs: &[Run], flags: &[RunFlag]) -> String {
    runs.iter()
        .filter(|run| flags.contains(&run.flag))
        .flat_map(|run| run.units.iter().map(String::as_str))
        .collect()
}
