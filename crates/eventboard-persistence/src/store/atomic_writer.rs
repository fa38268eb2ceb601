use eventboard_core::BoardResult;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Atomic file writer that prevents data corruption
/// Uses write-to-temp-file → atomic-rename pattern for safety
pub struct AtomicWriter;

impl AtomicWriter {
    /// Write data to a file atomically, creating missing parent directories.
    /// A crash mid-write leaves the previous file intact.
    pub async fn write_atomic(path: &Path, data: &[u8]) -> BoardResult<()> {
        // Temp file in the same directory keeps the rename on one filesystem
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).await?;

        let temp_file = tempfile::NamedTempFile::new_in(parent)?;
        fs::write(temp_file.path(), data).await?;
        temp_file.persist(path).map_err(|e| e.error)?;

        tracing::debug!(
            "Atomically wrote {} bytes to {}",
            data.len(),
            path.display()
        );
        Ok(())
    }

    /// Read all data from a file
    pub async fn read_all(path: &Path) -> BoardResult<Vec<u8>> {
        let data = fs::read(path).await?;
        tracing::debug!("Read {} bytes from {}", data.len(), path.display());
        Ok(data)
    }

    /// Copy `path` next to itself with `suffix` appended to the file name.
    pub async fn backup(path: &Path, suffix: &str) -> BoardResult<PathBuf> {
        let mut name = path.file_name().unwrap_or_default().to_os_string();
        name.push(suffix);
        let backup_path = path.with_file_name(name);
        fs::copy(path, &backup_path).await?;
        tracing::info!("Created backup at {}", backup_path.display());
        Ok(backup_path)
    }
}
