//! Field filtering applied to annotation and model-result documents.

use std::path::Path;

use enc_core::CatalogFs;
use serde_json::{Map, Value};

use crate::error::{CatalogError, CatalogResult};

/// Keys kept from keyword annotations, in output order.
pub const ANNOTATION_FIELDS: [&str; 3] = ["ocr_results", "identified_keywords", "statistics"];
/// Key dropped from model results.
pub const MODEL_RESULT_DROPPED_FIELD: &str = "metadata";

/// Allowlist policy applied by [`reshape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReshapeMode {
    /// Exactly [`ANNOTATION_FIELDS`], missing ones defaulting to `{}`.
    Annotation,
    /// Everything except [`MODEL_RESULT_DROPPED_FIELD`], order preserved.
    ModelResult,
}

impl ReshapeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Annotation => "annotation",
            Self::ModelResult => "model_result",
        }
    }
}

pub fn reshape(mut document: Map<String, Value>, mode: ReshapeMode) -> Map<String, Value> {
    match mode {
        ReshapeMode::Annotation => ANNOTATION_FIELDS
            .iter()
            .map(|field| {
                let value = document
                    .remove(*field)
                    .unwrap_or_else(|| Value::Object(Map::new()));
                ((*field).to_string(), value)
            })
            .collect(),
        ReshapeMode::ModelResult => {
            document.shift_remove(MODEL_RESULT_DROPPED_FIELD);
            document
        }
    }
}

/// Parses `raw` as a JSON object; `path` is only used for error context.
pub fn parse_document(raw: &str, path: &Path) -> CatalogResult<Map<String, Value>> {
    let value: Value = serde_json::from_str(raw).map_err(|source| CatalogError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    match value {
        Value::Object(document) => Ok(document),
        _ => Err(CatalogError::NotAnObject {
            path: path.to_path_buf(),
        }),
    }
}

/// Reads and parses the JSON object stored at `path`.
pub fn load_document(fs: &dyn CatalogFs, path: &Path) -> CatalogResult<Map<String, Value>> {
    let raw = fs
        .read_to_string(path)
        .map_err(|source| CatalogError::io(path, source))?;
    parse_document(&raw, path)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use serde_json::{json, Map, Value};

    use super::{parse_document, reshape, ReshapeMode, ANNOTATION_FIELDS};
    use crate::CatalogError;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object fixture, got {other}"),
        }
    }

    #[test]
    fn unit_annotation_mode_keeps_exactly_the_allowlisted_keys() {
        let document = object(json!({
            "metadata": {"model": "gpt-4o"},
            "statistics": {"n": 5},
            "ocr_results": [{"text": "BUOY"}],
            "raw_prompt": "ignored",
        }));

        let reshaped = reshape(document, ReshapeMode::Annotation);

        let keys = reshaped.keys().map(String::as_str).collect::<Vec<_>>();
        assert_eq!(keys, ANNOTATION_FIELDS);
        assert_eq!(reshaped["ocr_results"], json!([{"text": "BUOY"}]));
        assert_eq!(reshaped["identified_keywords"], json!({}));
        assert_eq!(reshaped["statistics"], json!({"n": 5}));
    }

    #[test]
    fn unit_annotation_mode_defaults_every_missing_key_to_empty_object() {
        let reshaped = reshape(Map::new(), ReshapeMode::Annotation);
        assert_eq!(
            Value::Object(reshaped),
            json!({"ocr_results": {}, "identified_keywords": {}, "statistics": {}})
        );
    }

    #[test]
    fn unit_model_result_mode_drops_metadata_and_preserves_order() {
        let document = parse_document(
            r#"{"zeta": 1, "metadata": {"run": 3}, "alpha": {"nested": [1, 2]}, "mid": null}"#,
            Path::new("fixture.json"),
        )
        .expect("parse");

        let reshaped = reshape(document, ReshapeMode::ModelResult);

        let keys = reshaped.keys().map(String::as_str).collect::<Vec<_>>();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        assert_eq!(reshaped["alpha"], json!({"nested": [1, 2]}));
        assert_eq!(reshaped["mid"], Value::Null);
    }

    #[test]
    fn unit_model_result_mode_passes_documents_without_metadata_unchanged() {
        let document = object(json!({"detections": [1, 2, 3]}));
        let reshaped = reshape(document.clone(), ReshapeMode::ModelResult);
        assert_eq!(reshaped, document);
    }

    #[test]
    fn regression_model_result_mode_keeps_wide_numbers_exact() {
        let raw = r#"{"id": 123456789012345678901234567890, "ratio": 0.1000000000000000055511151231257827, "metadata": 1}"#;
        let document = parse_document(raw, Path::new("wide.json")).expect("parse");

        let reshaped = reshape(document, ReshapeMode::ModelResult);
        let rendered = serde_json::to_string(&reshaped).expect("render");

        assert_eq!(
            rendered,
            r#"{"id":123456789012345678901234567890,"ratio":0.1000000000000000055511151231257827}"#
        );
    }

    #[test]
    fn regression_parse_document_rejects_non_object_payloads() {
        let error = parse_document("[1, 2]", Path::new("list.json")).expect_err("array");
        assert!(matches!(error, CatalogError::NotAnObject { .. }));
        assert!(error.to_string().contains("list.json"));
    }

    #[test]
    fn regression_parse_document_reports_malformed_json_with_path() {
        let error = parse_document("{\"a\": ", Path::new("broken.json")).expect_err("malformed");
        assert!(matches!(error, CatalogError::Json { .. }));
        assert!(error.to_string().contains("broken.json"));
    }
}
