use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FileError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("File is not valid UTF-8: {0:?}")]
    NotText(PathBuf),
}

/// Read a text file into a comparison pane
pub fn load_text(path: &Path) -> Result<String, FileError> {
    let bytes = fs::read(path).map_err(|source| FileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|_| FileError::NotText(path.to_path_buf()))
}

/// Write an exported HTML document
pub fn write_text(path: &Path, content: &str) -> Result<(), FileError> {
    fs::write(path, content).map_err(|source| FileError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn setup_test_dir() -> PathBuf {
        let test_dir = std::env::temp_dir().join(format!("test_file_{}", Uuid::new_v4()));
        fs::create_dir_all(&test_dir).unwrap();
        test_dir
    }

    #[test]
    fn test_write_then_load() {
        let test_dir = setup_test_dir();
        let path = test_dir.join("a.txt");

        write_text(&path, "one\r\ntwo\n").unwrap();
        assert_eq!(load_text(&path).unwrap(), "one\r\ntwo\n");

        let _ = fs::remove_dir_all(&test_dir);
    }

    #[test]
    fn test_binary_file_is_rejected() {
        let test_dir = setup_test_dir();
        let path = test_dir.join("blob.bin");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        assert!(matches!(load_text(&path), Err(FileError::NotText(_))));

        let _ = fs::remove_dir_all(&test_dir);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = std::env::temp_dir().join(format!("missing_{}", Uuid::new_v4()));
        assert!(matches!(load_text(&path), Err(FileError::Io { .. })));
    }
}
