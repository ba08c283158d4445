use crate::shared::error::CollectError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum size of a configuration or manifest file (10 MB)
pub const MAX_INPUT_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Checks that `path` is a regular file (symbolic links are refused) no
/// larger than `max_size` bytes.
pub fn validate_input_file(path: &Path, file_description: &str, max_size: u64) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| CollectError::FileReadError {
        path: path.to_path_buf(),
        details: format!("Failed to read {} metadata: {}", file_description, e),
    })?;

    if metadata.is_symlink() {
        return Err(CollectError::SecurityError {
            path: path.to_path_buf(),
            reason: format!("{} is a symbolic link", file_description),
            hint: "Point to the target file directly".to_string(),
        }
        .into());
    }

    if !metadata.is_file() {
        return Err(CollectError::SecurityError {
            path: path.to_path_buf(),
            reason: format!("{} is not a regular file", file_description),
            hint: "Please specify a file, not a directory".to_string(),
        }
        .into());
    }

    if metadata.len() > max_size {
        return Err(CollectError::SecurityError {
            path: path.to_path_buf(),
            reason: format!(
                "{} is too large ({} bytes, maximum {} bytes)",
                file_description,
                metadata.len(),
                max_size
            ),
            hint: "Split the file or remove unused entries".to_string(),
        }
        .into());
    }

    Ok(())
}

/// Validates and reads a text input file
pub fn read_input_file(path: &Path, file_description: &str) -> Result<String> {
    validate_input_file(path, file_description, MAX_INPUT_FILE_SIZE)?;
    fs::read_to_string(path).map_err(|e| {
        CollectError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        }
        .into()
    })
}
