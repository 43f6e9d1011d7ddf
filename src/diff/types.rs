use serde::{Deserialize, Serialize};

/// Granularity of the top-level comparison units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompareMode {
    #[default]
    Line,
    Word,
}

/// Granularity of the secondary diff run inside a modified pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenGranularity {
    #[default]
    Word,
    /// One unit per character, better suited to CJK text
    Char,
}

/// Whether a pure addition/deletion gets an empty row on the opposite side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Both sides have the same number of rows; missing rows are placeholders
    #[default]
    Aligned,
    /// Each side only lists the rows it actually has
    Compact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiffOptions {
    pub mode: CompareMode,
    pub layout: LayoutMode,
    /// Compute context/addition/deletion tokens for modified pairs
    pub sub_line_detail: bool,
    pub granularity: TokenGranularity,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            mode: CompareMode::Line,
            layout: LayoutMode::Aligned,
            sub_line_detail: true,
            granularity: TokenGranularity::Word,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunFlag {
    Equal,
    Added,
    Removed,
}

/// A maximal block of units sharing one raw classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub units: Vec<String>,
    pub flag: RunFlag,
}

impl Run {
    pub fn new(flag: RunFlag, units: Vec<String>) -> Self {
        Self { units, flag }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Original,
    Modified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineType {
    Unchanged,
    Added,
    Removed,
    Modified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Context,
    Addition,
    Deletion,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
}

/// One rendered row on one side of the comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedLine {
    pub side: Side,
    /// 1-based; `None` when this side has no content for the row
    pub line_number: Option<usize>,
    pub line_type: LineType,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<Vec<Token>>,
}

impl ClassifiedLine {
    /// Empty row standing opposite a line that only exists on the other side
    pub fn placeholder(side: Side, line_type: LineType) -> Self {
        Self {
            side,
            line_number: None,
            line_type,
            content: String::new(),
            tokens: None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.line_number.is_none()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    pub additions: usize,
    pub deletions: usize,
    pub modifications: usize,
}

impl DiffStats {
    pub fn is_empty(&self) -> bool {
        self.additions == 0 && self.deletions == 0 && self.modifications == 0
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffResult {
    pub original: Vec<ClassifiedLine>,
    pub modified: Vec<ClassifiedLine>,
    pub stats: DiffStats,
}
