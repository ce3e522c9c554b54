//! Model and image discovery over the source tree.

use std::path::Path;

use enc_core::CatalogFs;

use crate::error::{CatalogError, CatalogResult};
use crate::layout::ImageExtensionAllowlist;

/// Lists model directory names under `results_root`, sorted and deduplicated.
pub fn discover_models(fs: &dyn CatalogFs, results_root: &Path) -> CatalogResult<Vec<String>> {
    let entries = fs
        .list_dir(results_root)
        .map_err(|source| CatalogError::io(results_root, source))?;
    let mut models = entries
        .into_iter()
        .filter(|entry| entry.is_dir())
        .filter_map(|entry| entry.name.into_string().ok())
        .collect::<Vec<_>>();
    models.sort();
    models.dedup();
    Ok(models)
}

/// Lists image filenames under `images_root` accepted by `allowlist`, sorted.
pub fn discover_images(
    fs: &dyn CatalogFs,
    images_root: &Path,
    allowlist: &ImageExtensionAllowlist,
) -> CatalogResult<Vec<String>> {
    let entries = fs
        .list_dir(images_root)
        .map_err(|source| CatalogError::io(images_root, source))?;
    let mut images = entries
        .into_iter()
        .filter(|entry| entry.is_file())
        .filter_map(|entry| entry.name.into_string().ok())
        .filter(|name| allowlist.matches(name))
        .collect::<Vec<_>>();
    images.sort();
    Ok(images)
}
