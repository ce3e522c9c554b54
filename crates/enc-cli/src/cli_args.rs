use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use enc_catalog::{
    ImageExtensionAllowlist, DEFAULT_IMAGES_DIR_NAME, DEFAULT_IMAGE_EXTENSIONS,
    DEFAULT_KEYWORDS_DIR_NAME, DEFAULT_KEYWORD_PROVIDER, DEFAULT_RESULTS_DIR_NAME,
};
use enc_gateway::DEFAULT_QUERY_SERVER_BIND;

fn parse_dir_name(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("value cannot be empty".to_string());
    }
    if trimmed.contains(['/', '\\']) || trimmed == "." || trimmed == ".." {
        return Err("value must be a single directory name".to_string());
    }
    Ok(trimmed.to_string())
}

fn parse_image_extensions(value: &str) -> Result<ImageExtensionAllowlist, String> {
    value.parse().map_err(|error| format!("{error}"))
}

#[derive(Debug, Parser)]
#[command(
    name = "enc-website",
    about = "Publish and serve ENC chart analysis results",
    version
)]
/// Top-level command line for the `enc-website` binary.
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Rebuild the published data tree from the source tree.
    Publish(PublishArgs),
    /// Serve the query API directly from the source tree.
    Serve(ServeArgs),
}

/// Flags describing where source data lives and which images count.
#[derive(Debug, Clone, Args)]
pub struct SourceLayoutArgs {
    #[arg(
        long = "source-root",
        env = "ENC_SOURCE_ROOT",
        help = "Root of the raw data tree containing images, results, and keyword annotations"
    )]
    pub source_root: PathBuf,

    #[arg(
        long = "images-dir",
        env = "ENC_IMAGES_DIR",
        default_value = DEFAULT_IMAGES_DIR_NAME,
        value_parser = parse_dir_name,
        help = "Image directory name under --source-root"
    )]
    pub images_dir: String,

    #[arg(
        long = "results-dir",
        env = "ENC_RESULTS_DIR",
        default_value = DEFAULT_RESULTS_DIR_NAME,
        value_parser = parse_dir_name,
        help = "Per-model results directory name under --source-root"
    )]
    pub results_dir: String,

    #[arg(
        long = "keywords-dir",
        env = "ENC_KEYWORDS_DIR",
        default_value = DEFAULT_KEYWORDS_DIR_NAME,
        value_parser = parse_dir_name,
        help = "Keyword annotation directory name under --source-root"
    )]
    pub keywords_dir: String,

    #[arg(
        long = "keyword-provider",
        env = "ENC_KEYWORD_PROVIDER",
        default_value = DEFAULT_KEYWORD_PROVIDER,
        value_parser = parse_dir_name,
        help = "Annotation provider subdirectory under --keywords-dir"
    )]
    pub keyword_provider: String,

    #[arg(
        long = "image-extensions",
        env = "ENC_IMAGE_EXTENSIONS",
        default_value = DEFAULT_IMAGE_EXTENSIONS,
        value_parser = parse_image_extensions,
        help = "Comma-separated, case-insensitive image extension allowlist"
    )]
    pub image_extensions: ImageExtensionAllowlist,
}

#[derive(Debug, Clone, Args)]
pub struct PublishArgs {
    #[command(flatten)]
    pub source: SourceLayoutArgs,

    #[arg(
        long = "output-root",
        env = "ENC_OUTPUT_ROOT",
        help = "Directory that receives the published data/ tree"
    )]
    pub output_root: PathBuf,
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    #[command(flatten)]
    pub source: SourceLayoutArgs,

    #[arg(
        long,
        env = "ENC_BIND",
        default_value = DEFAULT_QUERY_SERVER_BIND,
        help = "Socket address for the query server"
    )]
    pub bind: String,
}
