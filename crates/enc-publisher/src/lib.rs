//! Batch publisher that rebuilds the consumer-ready data tree.
//!
//! Copies every allowlisted image, resolves the latest keyword annotation and
//! per-model result for each image, reshapes those documents, and writes the
//! `models.json` / `files.json` indexes. Every run is a full rebuild; output
//! from earlier runs is overwritten but never deleted.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use enc_catalog::{
    discover_images, discover_models, image_base_name, load_document, reshape, resolve_latest,
    CatalogLayout, ReshapeMode,
};
use enc_core::{elapsed_ms_since, write_pretty_json, CatalogFs, LocalFs};
use serde::Serialize;


/// Counters describing one completed publish run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PublishReport {
    pub image_count: usize,
    pub model_count: usize,
    pub keyword_documents: usize,
    pub result_documents: usize,
}

/// Renders a one-line operator summary for a finished run.
pub fn render_publish_report(report: &PublishReport, layout: &CatalogLayout) -> String {
    format!(
        "publish complete: images={} models={} keyword_documents={} result_documents={} output={}",
        report.image_count,
        report.model_count,
        report.keyword_documents,
        report.result_documents,
        layout.output_data_dir().display()
    )
}

/// Rebuilds the published tree described by a [`CatalogLayout`].
#[derive(Clone)]
pub struct Publisher {
    fs: Arc<dyn CatalogFs>,
    layout: CatalogLayout,
}

impl Publisher {
    pub fn new(fs: Arc<dyn CatalogFs>, layout: CatalogLayout) -> Self {
        Self { fs, layout }
    }

    /// Publisher over the local disk.
    pub fn local(layout: CatalogLayout) -> Self {
        Self::new(Arc::new(LocalFs), layout)
    }

    pub fn layout(&self) -> &CatalogLayout {
        &self.layout
    }

    /// Runs the full pipeline, stopping at the first I/O or parse failure.
    #[tracing::instrument(
        name = "enc_publisher.publish",
        skip(self),
        fields(
            source_root = %self.layout.source_root.display(),
            output_root = %self.layout.output_root.display()
        )
    )]
    pub fn publish(&self) -> Result<PublishReport> {
        let started_unix_ms = enc_core::current_unix_timestamp_ms();
        tracing::info!("starting data processing");
        match self.run_pipeline() {
            Ok(report) => {
                tracing::info!(
                    image_count = report.image_count,
                    model_count = report.model_count,
                    keyword_documents = report.keyword_documents,
                    result_documents = report.result_documents,
                    duration_ms = elapsed_ms_since(started_unix_ms),
                    "data processing completed"
                );
                Ok(report)
            }
            Err(error) => {
                tracing::error!(error = %format!("{error:#}"), "data processing failed");
                Err(error)
            }
        }
    }

    fn run_pipeline(&self) -> Result<PublishReport> {
        self.layout
            .validate()
            .context("refusing to publish with an invalid layout")?;
        self.create_directory_structure()?;

        let models = discover_models(self.fs.as_ref(), &self.layout.results_root())?;
        let images = discover_images(
            self.fs.as_ref(),
            &self.layout.images_root(),
            &self.layout.image_extensions,
        )?;
        tracing::info!(
            models = models.len(),
            images = images.len(),
            "discovered source catalog"
        );

        write_pretty_json(
            self.fs.as_ref(),
            &self.layout.output_models_index(),
            &models,
        )?;
        write_pretty_json(
            self.fs.as_ref(),
            &self.layout.output_files_index(),
            &images,
        )?;

        let keyword_dir = self.layout.keyword_provider_dir();
        let annotations_available = self.keyword_provider_available(&keyword_dir)?;

        let mut report = PublishReport {
            image_count: images.len(),
            model_count: models.len(),
            ..PublishReport::default()
        };
        for image in &images {
            self.copy_image(image)?;
            let base_name = image_base_name(image);
            if annotations_available && self.publish_annotation(&keyword_dir, base_name)? {
                report.keyword_documents = report.keyword_documents.saturating_add(1);
            }
            for model in &models {
                if self.publish_model_result(model, base_name)? {
                    report.result_documents = report.result_documents.saturating_add(1);
                }
            }
        }
        Ok(report)
    }

    fn create_directory_structure(&self) -> Result<()> {
        for dir in [
            self.layout.output_data_dir(),
            self.layout.output_images_dir(),
            self.layout.output_results_dir(),
            self.layout.output_keywords_dir(),
        ] {
            self.fs
                .create_dir_all(&dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
            tracing::debug!(dir = %dir.display(), "ensured output directory");
        }
        Ok(())
    }

    /// Only a provider directory that does not exist is skipped; any other
    /// listing failure aborts the run.
    fn keyword_provider_available(&self, keyword_dir: &Path) -> Result<bool> {
        match self.fs.list_dir(keyword_dir) {
            Ok(_) => Ok(true),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    keyword_dir = %keyword_dir.display(),
                    "keyword provider directory missing; skipping annotations"
                );
                Ok(false)
            }
            Err(error) => Err(error).with_context(|| {
                format!(
                    "failed to read keyword provider directory {}",
                    keyword_dir.display()
                )
            }),
        }
    }

    fn copy_image(&self, image: &str) -> Result<()> {
        let source = self.layout.images_root().join(image);
        let destination = self.layout.output_images_dir().join(image);
        self.fs.copy_file(&source, &destination).with_context(|| {
            format!(
                "failed to copy image {} to {}",
                source.display(),
                destination.display()
            )
        })?;
        Ok(())
    }

    fn publish_annotation(&self, keyword_dir: &Path, base_name: &str) -> Result<bool> {
        let Some(artifact) = resolve_latest(self.fs.as_ref(), keyword_dir, base_name)? else {
            return Ok(false);
        };
        let document = load_document(self.fs.as_ref(), &keyword_dir.join(&artifact))?;
        let reshaped = reshape(document, ReshapeMode::Annotation);
        let destination = self
            .layout
            .output_keywords_dir()
            .join(format!("{base_name}.json"));
        write_pretty_json(self.fs.as_ref(), &destination, &reshaped)?;
        tracing::debug!(base_name, artifact = %artifact, "published keyword annotation");
        Ok(true)
    }

    fn publish_model_result(&self, model: &str, base_name: &str) -> Result<bool> {
        let model_dir = self.layout.model_results_dir(model);
        let Some(artifact) = resolve_latest(self.fs.as_ref(), &model_dir, base_name)? else {
            return Ok(false);
        };
        let document = load_document(self.fs.as_ref(), &model_dir.join(&artifact))?;
        let reshaped = reshape(document, ReshapeMode::ModelResult);

        let output_model_dir = self.layout.output_model_results_dir(model);
        self.fs
            .create_dir_all(&output_model_dir)
            .with_context(|| format!("failed to create {}", output_model_dir.display()))?;
        let destination = output_model_dir.join(format!("{base_name}.json"));
        write_pretty_json(self.fs.as_ref(), &destination, &reshaped)?;
        tracing::debug!(model, base_name, artifact = %artifact, "published model result");
        Ok(true)
    }
}
