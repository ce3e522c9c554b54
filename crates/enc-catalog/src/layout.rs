//! Source and output tree layout shared by the publisher and query service.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{CatalogError, CatalogResult};

pub const DEFAULT_IMAGES_DIR_NAME: &str = "images";
pub const DEFAULT_RESULTS_DIR_NAME: &str = "results";
pub const DEFAULT_KEYWORDS_DIR_NAME: &str = "keyword_identification";
pub const DEFAULT_KEYWORD_PROVIDER: &str = "gpt-4o";
pub const DEFAULT_IMAGE_EXTENSIONS: &str = "jpg,jpeg,png";

const OUTPUT_DATA_DIR_NAME: &str = "data";
const OUTPUT_IMAGES_DIR_NAME: &str = "images";
const OUTPUT_RESULTS_DIR_NAME: &str = "results";
const OUTPUT_KEYWORDS_DIR_NAME: &str = "keywords";
const MODELS_INDEX_FILE: &str = "models.json";
const FILES_INDEX_FILE: &str = "files.json";

/// Case-insensitive set of image file extensions, stored without the leading dot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageExtensionAllowlist {
    extensions: Vec<String>,
}

impl ImageExtensionAllowlist {
    pub fn new<I, S>(extensions: I) -> CatalogResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for raw in extensions {
            let extension = raw.as_ref().trim().trim_start_matches('.').to_ascii_lowercase();
            if extension.is_empty() {
                continue;
            }
            if extension.contains(['/', '\\']) {
                return Err(CatalogError::InvalidExtensions(format!(
                    "extension '{extension}' contains a path separator"
                )));
            }
            if !normalized.contains(&extension) {
                normalized.push(extension);
            }
        }
        if normalized.is_empty() {
            return Err(CatalogError::InvalidExtensions(
                "at least one extension is required".to_string(),
            ));
        }
        Ok(Self {
            extensions: normalized,
        })
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Returns true when `filename` ends with `.<ext>` for an allowed extension.
    pub fn matches(&self, filename: &str) -> bool {
        let lowered = filename.to_lowercase();
        self.extensions.iter().any(|extension| {
            lowered
                .strip_suffix(extension.as_str())
                .is_some_and(|stem| stem.ends_with('.'))
        })
    }
}

impl Default for ImageExtensionAllowlist {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_IMAGE_EXTENSIONS
                .split(',')
                .map(str::to_string)
                .collect(),
        }
    }
}

impl FromStr for ImageExtensionAllowlist {
    type Err = CatalogError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::new(raw.split(','))
    }
}

/// Every path the catalog reads from or writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogLayout {
    pub source_root: PathBuf,
    pub output_root: PathBuf,
    pub images_dir_name: String,
    pub results_dir_name: String,
    pub keywords_dir_name: String,
    pub keyword_provider: String,
    pub image_extensions: ImageExtensionAllowlist,
}

impl CatalogLayout {
    pub fn new(source_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            output_root: output_root.into(),
            images_dir_name: DEFAULT_IMAGES_DIR_NAME.to_string(),
            results_dir_name: DEFAULT_RESULTS_DIR_NAME.to_string(),
            keywords_dir_name: DEFAULT_KEYWORDS_DIR_NAME.to_string(),
            keyword_provider: DEFAULT_KEYWORD_PROVIDER.to_string(),
            image_extensions: ImageExtensionAllowlist::default(),
        }
    }

    /// Rejects empty names and names that would escape their parent directory.
    pub fn validate(&self) -> CatalogResult<()> {
        if self.source_root.as_os_str().is_empty() {
            return Err(CatalogError::InvalidLayout(
                "source root cannot be empty".to_string(),
            ));
        }
        for (label, value) in [
            ("images directory", self.images_dir_name.as_str()),
            ("results directory", self.results_dir_name.as_str()),
            ("keywords directory", self.keywords_dir_name.as_str()),
            ("keyword provider", self.keyword_provider.as_str()),
        ] {
            validate_dir_name(label, value)?;
        }
        Ok(())
    }

    pub fn images_root(&self) -> PathBuf {
        self.source_root.join(&self.images_dir_name)
    }

    pub fn results_root(&self) -> PathBuf {
        self.source_root.join(&self.results_dir_name)
    }

    pub fn model_results_dir(&self, model: &str) -> PathBuf {
        self.results_root().join(model)
    }

    pub fn keyword_provider_dir(&self) -> PathBuf {
        self.source_root
            .join(&self.keywords_dir_name)
            .join(&self.keyword_provider)
    }

    pub fn output_data_dir(&self) -> PathBuf {
        self.output_root.join(OUTPUT_DATA_DIR_NAME)
    }

    pub fn output_images_dir(&self) -> PathBuf {
        self.output_data_dir().join(OUTPUT_IMAGES_DIR_NAME)
    }

    pub fn output_results_dir(&self) -> PathBuf {
        self.output_data_dir().join(OUTPUT_RESULTS_DIR_NAME)
    }

    pub fn output_model_results_dir(&self, model: &str) -> PathBuf {
        self.output_results_dir().join(model)
    }

    pub fn output_keywords_dir(&self) -> PathBuf {
        self.output_data_dir().join(OUTPUT_KEYWORDS_DIR_NAME)
    }

    pub fn output_models_index(&self) -> PathBuf {
        self.output_data_dir().join(MODELS_INDEX_FILE)
    }

    pub fn output_files_index(&self) -> PathBuf {
        self.output_data_dir().join(FILES_INDEX_FILE)
    }
}

fn validate_dir_name(label: &str, value: &str) -> CatalogResult<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::InvalidLayout(format!(
            "{label} name cannot be empty"
        )));
    }
    if trimmed.contains(['/', '\\']) || trimmed == "." || trimmed == ".." {
        return Err(CatalogError::InvalidLayout(format!(
            "{label} name '{value}' must be a single path component"
        )));
    }
    if Path::new(trimmed).is_absolute() {
        return Err(CatalogError::InvalidLayout(format!(
            "{label} name '{value}' cannot be absolute"
        )));
    }
    Ok(())
}
