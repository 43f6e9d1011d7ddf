use crate::diff::Side;
use std::path::PathBuf;

/// Response messages from background operations
pub enum ResponseMessage {
    FileLoaded(Side, Result<String, String>), // pane, content or error
    HtmlExported(Result<PathBuf, String>),    // written path, error
}
