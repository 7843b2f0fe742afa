use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum catalog file size (100 MB)
/// This prevents DoS via excessively large catalog exports
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Validates that a path exists and is a regular file (not a directory or symlink)
///
/// # Arguments
/// * `path` - The path to validate
/// * `file_description` - Description of the file (e.g., "catalog file")
///
/// # Errors
/// Returns an error if:
/// - The path doesn't exist
/// - The path is a symbolic link
/// - The path is not a regular file
pub fn validate_regular_file(path: &Path, file_description: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {} metadata: {}", file_description, e))?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    Ok(())
}

/// Validates file size is within acceptable limits
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            file_size,
            max_size
        );
    }
    Ok(())
}

/// Validates a setup file name taken from a catalog record.
///
/// The name is joined onto the setup directory, so it must be a single plain
/// file name: no separators, no `..`, no drive prefix.
pub fn validate_setup_file_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        anyhow::bail!("Setup file name is empty");
    }

    if name.contains('/') || name.contains('\\') {
        anyhow::bail!(
            "Security: setup file name '{}' contains path separators which are not allowed",
            name
        );
    }

    if name.contains("..") || name.contains(':') {
        anyhow::bail!(
            "Security: setup file name '{}' could escape the setup directory",
            name
        );
    }

    Ok(())
}
