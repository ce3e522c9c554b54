//! Catalog resolution for per-model analysis results.
//!
//! Exposes the catalog layout, latest-artifact resolution, model/image
//! discovery, JSON reshaping, and the read-only query operations backing the
//! HTTP service.

pub mod catalog_query;
pub mod discovery;
pub mod error;
pub mod layout;
pub mod reshape;
pub mod resolver;

pub use catalog_query::{image_content_type, is_safe_path_segment, CatalogQuery};
pub use discovery::{discover_images, discover_models};
pub use error::{CatalogError, CatalogResult};
pub use layout::{
    CatalogLayout, ImageExtensionAllowlist, DEFAULT_IMAGES_DIR_NAME, DEFAULT_IMAGE_EXTENSIONS,
    DEFAULT_KEYWORDS_DIR_NAME, DEFAULT_KEYWORD_PROVIDER, DEFAULT_RESULTS_DIR_NAME,
};
pub use reshape::{
    load_document, parse_document, reshape, ReshapeMode, ANNOTATION_FIELDS,
    MODEL_RESULT_DROPPED_FIELD,
};
pub use resolver::{image_base_name, resolve_latest};
