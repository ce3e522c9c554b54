//! Deterministic JSON rendering for published documents.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::fs_port::CatalogFs;

/// Renders `value` with 2-space indentation and literal non-ASCII text.
pub fn render_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("failed to encode json document")
}

/// Renders `value` and writes it to `path` through `fs`.
pub fn write_pretty_json<T: Serialize + ?Sized>(
    fs: &dyn CatalogFs,
    path: &Path,
    value: &T,
) -> Result<()> {
    let rendered = render_pretty_json(value)?;
    fs.write_text(path, &rendered)
        .with_context(|| format!("failed to write {}", path.display()))
}
