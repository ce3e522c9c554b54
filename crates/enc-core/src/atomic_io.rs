use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{bail, Context, Result};

use crate::time_utils::current_unix_timestamp_ms;

static TEMP_SEQUENCE: AtomicU64 = AtomicU64::new(0);

fn temp_path_for(parent_dir: &Path, path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("document");
    parent_dir.join(format!(
        ".{file_name}.tmp-{}-{}-{}",
        std::process::id(),
        current_unix_timestamp_ms(),
        TEMP_SEQUENCE.fetch_add(1, Ordering::Relaxed)
    ))
}

/// Replaces `path` with `content` via a sibling temp file and a rename.
///
/// Readers see either the previous document or the new one. The temp file is
/// removed again when the rename fails.
pub fn write_text_atomic(path: &Path, content: &str) -> Result<()> {
    if path.as_os_str().is_empty() {
        bail!("destination path cannot be empty");
    }
    if path.is_dir() {
        bail!("destination path '{}' is a directory", path.display());
    }

    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent_dir)
        .with_context(|| format!("failed to create {}", parent_dir.display()))?;

    let temp_path = temp_path_for(parent_dir, path);
    std::fs::write(&temp_path, content)
        .with_context(|| format!("failed to stage {}", temp_path.display()))?;
    if let Err(error) = std::fs::rename(&temp_path, path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(error).with_context(|| {
            format!("failed to move staged document into {}", path.display())
        });
    }
    Ok(())
}
