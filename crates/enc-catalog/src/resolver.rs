//! Latest-artifact resolution by filename prefix.
//!
//! Artifacts are named `<base_name><suffix>` where the suffix is typically a
//! timestamp, so the lexicographically greatest matching name is treated as the
//! most recent one. Prefix matching is intentionally loose: `img1` also
//! matches `img10_result.json`.

use std::path::Path;

use enc_core::CatalogFs;

use crate::error::{CatalogError, CatalogResult};

/// Returns the image filename without its final extension.
pub fn image_base_name(filename: &str) -> &str {
    Path::new(filename)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(filename)
}

/// Resolves the lexicographically greatest entry in `directory` starting with `base_name`.
///
/// Returns `Ok(None)` when nothing matches; absence is an expected outcome.
pub fn resolve_latest(
    fs: &dyn CatalogFs,
    directory: &Path,
    base_name: &str,
) -> CatalogResult<Option<String>> {
    if base_name.is_empty() {
        return Err(CatalogError::EmptyBaseName);
    }
    let entries = fs
        .list_dir(directory)
        .map_err(|source| CatalogError::io(directory, source))?;

    let latest = entries
        .into_iter()
        .filter_map(|entry| entry.name.into_string().ok())
        .filter(|name| name.starts_with(base_name))
        .max();

    tracing::debug!(
        directory = %directory.display(),
        base_name,
        resolved = latest.as_deref().unwrap_or("<none>"),
        "resolved latest artifact"
    );
    Ok(latest)
}
