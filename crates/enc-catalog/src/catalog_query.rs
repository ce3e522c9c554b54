//! Read-only catalog queries answered directly from the source tree.

use std::sync::Arc;

use enc_core::CatalogFs;
use serde_json::{Map, Value};

use crate::discovery::{discover_images, discover_models};
use crate::error::{CatalogError, CatalogResult};
use crate::layout::CatalogLayout;
use crate::reshape::load_document;
use crate::resolver::{image_base_name, resolve_latest};

/// Returns true when `segment` names a single entry inside its parent directory.
pub fn is_safe_path_segment(segment: &str) -> bool {
    !segment.is_empty() && segment != "." && segment != ".." && !segment.contains(['/', '\\'])
}

/// Best-effort content type for an image filename.
pub fn image_content_type(filename: &str) -> &'static str {
    let lowered = filename.to_ascii_lowercase();
    match lowered.rsplit_once('.').map(|(_, extension)| extension) {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("tif" | "tiff") => "image/tiff",
        _ => "application/octet-stream",
    }
}

/// Query operations over a [`CatalogLayout`] source tree.
#[derive(Clone)]
pub struct CatalogQuery {
    fs: Arc<dyn CatalogFs>,
    layout: CatalogLayout,
}

impl CatalogQuery {
    pub fn new(fs: Arc<dyn CatalogFs>, layout: CatalogLayout) -> Self {
        Self { fs, layout }
    }

    pub fn layout(&self) -> &CatalogLayout {
        &self.layout
    }

    pub fn list_models(&self) -> CatalogResult<Vec<String>> {
        discover_models(self.fs.as_ref(), &self.layout.results_root())
    }

    pub fn list_images(&self) -> CatalogResult<Vec<String>> {
        discover_images(
            self.fs.as_ref(),
            &self.layout.images_root(),
            &self.layout.image_extensions,
        )
    }

    /// Reads one image's raw bytes; `Ok(None)` when the file does not exist.
    pub fn read_image(&self, filename: &str) -> CatalogResult<Option<Vec<u8>>> {
        if !is_safe_path_segment(filename) {
            return Ok(None);
        }
        let path = self.layout.images_root().join(filename);
        if self.fs.is_dir(&path) {
            return Ok(None);
        }
        match self.fs.read_bytes(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(CatalogError::io(path, source)),
        }
    }

    /// Resolves and parses the latest document for (`model`, `image_filename`).
    ///
    /// Fails with [`CatalogError::UnknownModel`] when `model` is not a discovered
    /// model, and returns `Ok(None)` when `image_filename` is not a single path
    /// segment or no artifact resolves.
    pub fn resolve_document(
        &self,
        model: &str,
        image_filename: &str,
    ) -> CatalogResult<Option<Map<String, Value>>> {
        let models = self.list_models()?;
        if !models.iter().any(|known| known == model) {
            return Err(CatalogError::UnknownModel(model.to_string()));
        }

        if !is_safe_path_segment(image_filename) {
            return Ok(None);
        }
        let base_name = image_base_name(image_filename);
        if base_name.is_empty() {
            return Ok(None);
        }
        let model_dir = self.layout.model_results_dir(model);
        let Some(artifact) = resolve_latest(self.fs.as_ref(), &model_dir, base_name)? else {
            return Ok(None);
        };
        load_document(self.fs.as_ref(), &model_dir.join(artifact)).map(Some)
    }
}
