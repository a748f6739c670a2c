use crate::error::AppError;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

const STDIN_MARKER: &str = "-";

pub fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN_MARKER
}

/// Reads a file, or stdin for `-`, as raw bytes. Nothing is decoded or trimmed.
pub fn read_bytes(path: &Path) -> Result<Vec<u8>, AppError> {
    if is_stdin(path) {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf).map_err(|e| AppError::Io {
            path: PathBuf::from("<stdin>"),
            source: e,
        })?;
        return Ok(buf);
    }
    fs::read(path).map_err(|e| AppError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

pub fn read_text(path: &Path) -> Result<String, AppError> {
    fs::read_to_string(path).map_err(|e| AppError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_file_bytes_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("body.json");
        fs::write(&path, b"{\"a\":1}\r\n\xff").unwrap();
        assert_eq!(read_bytes(&path).unwrap(), b"{\"a\":1}\r\n\xff".to_vec());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = read_bytes(Path::new("/nonexistent/body.json")).unwrap_err();
        match err {
            AppError::Io { path, .. } => assert_eq!(path, PathBuf::from("/nonexistent/body.json")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn dash_means_stdin() {
        assert!(is_stdin(Path::new("-")));
        assert!(!is_stdin(Path::new("./-")));
    }
}
