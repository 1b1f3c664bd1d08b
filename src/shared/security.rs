use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum size of any input document we read (100 MB)
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Maximum size of a single license descriptor (POM) we parse (2 MB)
pub const MAX_DESCRIPTOR_SIZE: u64 = 2 * 1024 * 1024;

/// Validates that a path exists and is a regular file (not a directory or symlink)
///
/// Uses `symlink_metadata()` so the link itself is inspected, not its target.
///
/// # Errors
/// Returns an error if:
/// - The path doesn't exist
/// - The path is a symbolic link
/// - The path is not a regular file
pub fn validate_regular_file(path: &Path, file_description: &str) -> Result<u64> {
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

    Ok(metadata.len())
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

/// Reads a file to a string after the regular-file and size checks pass.
pub fn read_checked(path: &Path, file_description: &str, max_size: u64) -> Result<String> {
    let size = validate_regular_file(path, file_description)?;
    validate_file_size(size, path, max_size)?;
    fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", file_description, e))
}

/// Checks that a value used to build a URL or cache path stays within
/// letters, digits, '.', '-' and '_'.
///
/// Also rejects `.` and `..` so the value can never walk up a path.
pub fn validate_identifier_component(value: &str, component: &str) -> Result<()> {
    if value.is_empty() || value.len() > 255 {
        anyhow::bail!("Security: {} must be between 1 and 255 characters", component);
    }
    if value == "." || value == ".." {
        anyhow::bail!("Security: {} '{}' is not allowed", component, value);
    }
    if let Some(c) = value
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_')))
    {
        anyhow::bail!(
            "Security: {} '{}' contains disallowed character {:?}",
            component,
            value,
            c
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_validate_regular_file_success() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("snapshot.json");
        fs::write(&file_path, "{}").unwrap();

        let size = validate_regular_file(&file_path, "snapshot").unwrap();
        assert_eq!(size, 2);
    }

    #[test]
    fn test_validate_regular_file_is_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = validate_regular_file(temp_dir.path(), "snapshot");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not a regular file"));
    }

    #[test]
    fn test_validate_regular_file_nonexistent() {
        let result = validate_regular_file(Path::new("/nonexistent/file.json"), "snapshot");
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Failed to read snapshot metadata"));
    }

    #[cfg(unix)]
    #[test]
    fn test_validate_regular_file_rejects_symlink() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("real.json");
        let link = temp_dir.path().join("link.json");
        fs::write(&target, "{}").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let result = validate_regular_file(&link, "snapshot");
        assert!(result.unwrap_err().to_string().contains("symbolic link"));
    }

    #[test]
    fn test_validate_file_size_exceeds_limit() {
        let path = PathBuf::from("/test/file.txt");
        let result = validate_file_size(MAX_FILE_SIZE + 1, &path, MAX_FILE_SIZE);
        assert!(result.unwrap_err().to_string().contains("too large"));
    }

    #[test]
    fn test_read_checked_respects_limit() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("lib-1.0.pom");
        fs::write(&file_path, "0123456789").unwrap();

        assert!(read_checked(&file_path, "descriptor", 5).is_err());
        assert_eq!(
            read_checked(&file_path, "descriptor", 100).unwrap(),
            "0123456789"
        );
    }

    #[test]
    fn test_validate_identifier_component() {
        assert!(validate_identifier_component("com.squareup.okio", "group").is_ok());
        assert!(validate_identifier_component("kotlinx-coroutines_core", "name").is_ok());
        assert!(validate_identifier_component("1.7.3", "version").is_ok());

        assert!(validate_identifier_component("", "name").is_err());
        assert!(validate_identifier_component("..", "name").is_err());
        assert!(validate_identifier_component("a/b", "name").is_err());
        assert!(validate_identifier_component("a?b=c", "name").is_err());
        assert!(validate_identifier_component("okio 3", "name").is_err());
        let err = validate_identifier_component("évil", "name").unwrap_err();
        assert!(err.to_string().contains("disallowed character"));
    }
}
