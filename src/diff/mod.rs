//! Text comparison engine
//!
//! Splits two buffers into units, diffs them into raw runs, pairs adjacent
//! removed/added runs into modified lines and derives statistics. Everything
//! here is a pure function of its inputs.

mod classify;
mod runs;
mod split;
mod stats;
mod types;

pub use classify::{Classified, classify};
pub use runs::{diff_units, diff_words, reconstruct};
pub use split::{split, split_chars, split_lines, split_words};
pub use stats::{aggregate, modified_line_count};
pub use types::{
    ClassifiedLine, CompareMode, DiffOptions, DiffResult, DiffStats, LayoutMode, LineType, Run,
    RunFlag, Side, Token, TokenGranularity, TokenKind,
};

use tracing::debug;

/// Compare two buffers and classify every unit on both sides
pub fn compute_diff(original: &str, modified: &str, options: &DiffOptions) -> DiffResult {
    if original.is_empty() && modified.is_empty() {
        return DiffResult::default();
    }

    let units_a = split(original, options.mode);
    let units_b = split(modified, options.mode);
    let runs = diff_units(&units_a, &units_b);

    let Classified {
        original,
        modified,
        modification_pairs,
    } = classify(&runs, options);
    let stats = aggregate(&original, &modified, modification_pairs);

    debug!(
        runs = runs.len(),
        additions = stats.additions,
        deletions = stats.deletions,
        modifications = stats.modifications,
        "Computed diff"
    );

    DiffResult {
        original,
        modified,
        stats,
    }
}
