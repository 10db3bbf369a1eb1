use std::fs;
use std::io;
use std::path::Path;

/// Error types for file operations
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("File not found: {0}")]
    NotFound(String),
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Read a whole file as raw bytes
///
/// # Arguments
/// * `path` - Path to the file to read
///
/// # Returns
/// * `Ok(Vec<u8>)` - File contents
/// * `Err(FileError)` - File not found or I/O error
pub fn read_blob<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, FileError> {
    let path_ref = path.as_ref();

    if !path_ref.exists() {
        return Err(FileError::NotFound(path_ref.display().to_string()));
    }

    fs::read(path_ref).map_err(|source| FileError::Io {
        path: path_ref.display().to_string(),
        source,
    })
}

/// Write raw bytes to a file, replacing it if it exists
pub fn write_blob<P: AsRef<Path>>(path: P, bytes: &[u8]) -> Result<(), FileError> {
    let path_ref = path.as_ref();
    fs::write(path_ref, bytes).map_err(|source| FileError::Io {
        path: path_ref.display().to_string(),
        source,
    })
}
