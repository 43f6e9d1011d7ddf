use super::runs::diff_words;
use super::types::{
    ClassifiedLine, DiffOptions, LayoutMode, LineType, Run, RunFlag, Side, Token, TokenKind,
};

/// Output of the classifier: one row sequence per side plus the pair counter
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Classified {
    pub original: Vec<ClassifiedLine>,
    pub modified: Vec<ClassifiedLine>,
    /// Sum of `max(removed, added)` over every paired removed/added block
    pub modification_pairs: usize,
}

/// Walk the raw runs and tag every unit as unchanged/added/removed/modified.
///
/// Only a removed run immediately followed by an added run is paired. Within
/// a pair, the first `min(r, a)` units become modified lines on both sides;
/// the remainder is reported as plain removals or additions. Zero-length
/// runs are skipped before pairing.
pub fn classify(runs: &[Run], options: &DiffOptions) -> Classified {
    let runs: Vec<&Run> = runs.iter().filter(|run| !run.units.is_empty()).collect();
    let mut builder = Builder::new(options);
    let mut i = 0usize;

    while i < runs.len() {
        let run = runs[i];
        match run.flag {
            RunFlag::Equal => {
                for unit in &run.units {
                    builder.unchanged(unit);
                }
                i += 1;
            }
            RunFlag::Removed => match runs.get(i + 1) {
                Some(next) if next.flag == RunFlag::Added => {
                    builder.pair(&run.units, &next.units);
                    i += 2;
                }
                _ => {
                    for unit in &run.units {
                        builder.removed(unit);
                    }
                    i += 1;
                }
            },
            RunFlag::Added => {
                for unit in &run.units {
                    builder.added(unit);
                }
                i += 1;
            }
        }
    }

    builder.finish()
}

struct Builder<'a> {
    options: &'a DiffOptions,
    original: Vec<ClassifiedLine>,
    modified: Vec<ClassifiedLine>,
    original_line: usize,
    modified_line: usize,
    modification_pairs: usize,
}

impl<'a> Builder<'a> {
    fn new(options: &'a DiffOptions) -> Self {
        Self {
            options,
            original: Vec::new(),
            modified: Vec::new(),
            original_line: 0,
            modified_line: 0,
            modification_pairs: 0,
        }
    }

    fn aligned(&self) -> bool {
        self.options.layout == LayoutMode::Aligned
    }

    fn next_original(&mut self) -> Option<usize> {
        self.original_line += 1;
        Some(self.original_line)
    }

    fn next_modified(&mut self) -> Option<usize> {
        self.modified_line += 1;
        Some(self.modified_line)
    }

    fn unchanged(&mut self, unit: &str) {
        let original_number = self.next_original();
        let modified_number = self.next_modified();
        self.original.push(line(Side::Original, original_number, LineType::Unchanged, unit));
        self.modified.push(line(Side::Modified, modified_number, LineType::Unchanged, unit));
    }

    fn removed(&mut self, unit: &str) {
        let number = self.next_original();
        self.original.push(line(Side::Original, number, LineType::Removed, unit));
        if self.aligned() {
            self.modified
                .push(ClassifiedLine::placeholder(Side::Modified, LineType::Removed));
        }
    }

    fn added(&mut self, unit: &str) {
        if self.aligned() {
            self.original
                .push(ClassifiedLine::placeholder(Side::Original, LineType::Added));
        }
        let number = self.next_modified();
        self.modified.push(line(Side::Modified, number, LineType::Added, unit));
    }

    fn pair(&mut self, removed: &[String], added: &[String]) {
        let paired = removed.len().min(added.len());

        for (old, new) in removed.iter().zip(added.iter()) {
            let original_number = self.next_original();
            let modified_number = self.next_modified();
            let mut original = line(Side::Original, original_number, LineType::Modified, old);
            let mut modified = line(Side::Modified, modified_number, LineType::Modified, new);

            if self.options.sub_line_detail {
                let (old_tokens, new_tokens) = sub_line_tokens(old, new, self.options);
                original.tokens = Some(old_tokens);
                modified.tokens = Some(new_tokens);
            }

            self.original.push(original);
            self.modified.push(modified);
        }

        for unit in &removed[paired..] {
            self.removed(unit);
        }
        for unit in &added[paired..] {
            self.added(unit);
        }

        self.modification_pairs += removed.len().max(added.len());
    }

    fn finish(self) -> Classified {
        Classified {
            original: self.original,
            modified: self.modified,
            modification_pairs: self.modification_pairs,
        }
    }
}

fn line(side: Side, line_number: Option<usize>, line_type: LineType, content: &str) -> ClassifiedLine {
    ClassifiedLine {
        side,
        line_number,
        line_type,
        content: content.to_string(),
        tokens: None,
    }
}

/// Word-level tokens for a modified pair.
///
/// The original side only sees context and deletions, the modified side only
/// context and additions.
fn sub_line_tokens(old: &str, new: &str, options: &DiffOptions) -> (Vec<Token>, Vec<Token>) {
    let mut old_tokens = Vec::new();
    let mut new_tokens = Vec::new();

    for run in diff_words(old, new, options.granularity) {
        let text = run.units.concat();
        match run.flag {
            RunFlag::Equal => {
                old_tokens.push(Token {
                    text: text.clone(),
                    kind: TokenKind::Context,
                });
                new_tokens.push(Token {
                    text,
                    kind: TokenKind::Context,
                });
            }
            RunFlag::Removed => old_tokens.push(Token {
                text,
                kind: TokenKind::Deletion,
            }),
            RunFlag::Added => new_tokens.push(Token {
                text,
                kind: TokenKind::Addition,
            }),
        }
    }

    (old_tokens, new_tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::types::TokenGranularity;

    fn run(flag: RunFlag, units: &[&str]) -> Run {
        Run::new(flag, units.iter().map(|u| u.to_string()).collect())
    }

    fn types(lines: &[ClassifiedLine]) -> Vec<LineType> {
        lines.iter().map(|l| l.line_type).collect()
    }

    fn numbers(lines: &[ClassifiedLine]) -> Vec<Option<usize>> {
        lines.iter().map(|l| l.line_number).collect()
    }

    fn compact() -> DiffOptions {
        DiffOptions {
            layout: LayoutMode::Compact,
            ..DiffOptions::default()
        }
    }

    #[test]
    fn equal_runs_number_in_lock_step() {
        let runs = vec![run(RunFlag::Equal, &["a", "b"])];
        let out = classify(&runs, &DiffOptions::default());
        assert_eq!(types(&out.original), vec![LineType::Unchanged; 2]);
        assert_eq!(numbers(&out.original), vec![Some(1), Some(2)]);
        assert_eq!(numbers(&out.modified), vec![Some(1), Some(2)]);
        assert_eq!(out.modification_pairs, 0);
    }

    #[test]
    fn adjacent_removed_added_becomes_modified() {
        let runs = vec![
            run(RunFlag::Equal, &["foo"]),
            run(RunFlag::Removed, &["bar"]),
            run(RunFlag::Added, &["baz"]),
        ];
        let out = classify(&runs, &DiffOptions::default());
        assert_eq!(types(&out.original), vec![LineType::Unchanged, LineType::Modified]);
        assert_eq!(types(&out.modified), vec![LineType::Unchanged, LineType::Modified]);
        assert_eq!(out.original[1].line_number, Some(2));
        assert_eq!(out.modified[1].line_number, Some(2));
        assert_eq!(out.modification_pairs, 1);
    }

    #[test]
    fn sub_line_tokens_are_filtered_per_side() {
        let runs = vec![
            run(RunFlag::Removed, &["hello cat friend"]),
            run(RunFlag::Added, &["hello dog friend"]),
        ];
        let out = classify(&runs, &DiffOptions::default());

        let old_tokens = out.original[0].tokens.as_ref().unwrap();
        let new_tokens = out.modified[0].tokens.as_ref().unwrap();
        assert!(old_tokens.iter().all(|t| t.kind != TokenKind::Addition));
        assert!(new_tokens.iter().all(|t| t.kind != TokenKind::Deletion));

        let old_text: String = old_tokens.iter().map(|t| t.text.as_str()).collect();
        let new_text: String = new_tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(old_text, "hello cat friend");
        assert_eq!(new_text, "hello dog friend");

        assert!(old_tokens.contains(&Token {
            text: "cat".into(),
            kind: TokenKind::Deletion
        }));
        assert!(new_tokens.contains(&Token {
            text: "dog".into(),
            kind: TokenKind::Addition
        }));
    }

    #[test]
    fn char_granularity_splits_inside_words() {
        let options = DiffOptions {
            granularity: TokenGranularity::Char,
            ..DiffOptions::default()
        };
        let runs = vec![run(RunFlag::Removed, &["bar"]), run(RunFlag::Added, &["baz"])];
        let out = classify(&runs, &options);
        assert_eq!(
            out.original[0].tokens,
            Some(vec![
                Token { text: "ba".into(), kind: TokenKind::Context },
                Token { text: "r".into(), kind: TokenKind::Deletion },
            ])
        );
        assert_eq!(
            out.modified[0].tokens,
            Some(vec![
                Token { text: "ba".into(), kind: TokenKind::Context },
                Token { text: "z".into(), kind: TokenKind::Addition },
            ])
        );
    }

    #[test]
    fn no_tokens_without_sub_line_detail() {
        let options = DiffOptions {
            sub_line_detail: false,
            ..DiffOptions::default()
        };
        let runs = vec![run(RunFlag::Removed, &["x"]), run(RunFlag::Added, &["y"])];
        let out = classify(&runs, &options);
        assert!(out.original[0].tokens.is_none());
        assert!(out.modified[0].tokens.is_none());
    }

    #[test]
    fn asymmetric_pair_leaves_removed_lines() {
        let runs = vec![
            run(RunFlag::Removed, &["r1", "r2", "r3"]),
            run(RunFlag::Added, &["a1"]),
        ];

        let out = classify(&runs, &compact());
        assert_eq!(
            types(&out.original),
            vec![LineType::Modified, LineType::Removed, LineType::Removed]
        );
        assert_eq!(types(&out.modified), vec![LineType::Modified]);
        assert_eq!(numbers(&out.original), vec![Some(1), Some(2), Some(3)]);
        assert_eq!(out.modification_pairs, 3);

        let out = classify(&runs, &DiffOptions::default());
        assert_eq!(out.modified.len(), 3);
        assert_eq!(numbers(&out.modified), vec![Some(1), None, None]);
    }

    #[test]
    fn asymmetric_pair_leaves_added_lines() {
        let runs = vec![run(RunFlag::Removed, &["r1"]), run(RunFlag::Added, &["a1", "a2"])];
        let out = classify(&runs, &DiffOptions::default());
        assert_eq!(types(&out.modified), vec![LineType::Modified, LineType::Added]);
        assert_eq!(numbers(&out.modified), vec![Some(1), Some(2)]);
        assert_eq!(numbers(&out.original), vec![Some(1), None]);
        assert_eq!(out.modification_pairs, 2);
    }

    #[test]
    fn only_first_added_run_pairs() {
        let runs = vec![
            run(RunFlag::Removed, &["r"]),
            run(RunFlag::Added, &["a"]),
            run(RunFlag::Added, &["b"]),
        ];
        let out = classify(&runs, &compact());
        assert_eq!(types(&out.modified), vec![LineType::Modified, LineType::Added]);
        assert_eq!(out.modification_pairs, 1);
    }

    #[test]
    fn removed_then_equal_then_added_is_not_paired() {
        let runs = vec![
            run(RunFlag::Removed, &["r"]),
            run(RunFlag::Equal, &["same"]),
            run(RunFlag::Added, &["a"]),
        ];
        let out = classify(&runs, &compact());
        assert_eq!(types(&out.original), vec![LineType::Removed, LineType::Unchanged]);
        assert_eq!(types(&out.modified), vec![LineType::Unchanged, LineType::Added]);
        assert_eq!(out.modification_pairs, 0);
    }

    #[test]
    fn added_before_removed_is_not_paired() {
        let runs = vec![run(RunFlag::Added, &["a"]), run(RunFlag::Removed, &["r"])];
        let out = classify(&runs, &DiffOptions::default());
        assert_eq!(types(&out.original), vec![LineType::Added, LineType::Removed]);
        assert_eq!(numbers(&out.original), vec![None, Some(1)]);
        assert_eq!(types(&out.modified), vec![LineType::Added, LineType::Removed]);
        assert_eq!(numbers(&out.modified), vec![Some(1), None]);
        assert_eq!(out.modification_pairs, 0);
    }

    #[test]
    fn empty_runs_emit_nothing() {
        let runs = vec![run(RunFlag::Removed, &[]), run(RunFlag::Added, &["a"])];
        let out = classify(&runs, &compact());
        assert_eq!(types(&out.modified), vec![LineType::Added]);
        assert_eq!(out.modification_pairs, 0);

        let runs = vec![run(RunFlag::Equal, &[]), run(RunFlag::Removed, &[])];
        let out = classify(&runs, &DiffOptions::default());
        assert!(out.original.is_empty());
        assert!(out.modified.is_empty());
    }
}
