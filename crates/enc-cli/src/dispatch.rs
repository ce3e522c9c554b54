//! Subcommand dispatch from parsed CLI flags to the runtime crates.

use std::path::Path;

use anyhow::{Context, Result};
use enc_catalog::CatalogLayout;
use enc_gateway::{run_query_server, QueryServerConfig};
use enc_publisher::{render_publish_report, Publisher};

use crate::cli_args::{Cli, CliCommand, PublishArgs, ServeArgs, SourceLayoutArgs};

fn layout_from_source_args(source: &SourceLayoutArgs, output_root: &Path) -> Result<CatalogLayout> {
    let mut layout = CatalogLayout::new(&source.source_root, output_root);
    layout.images_dir_name = source.images_dir.clone();
    layout.results_dir_name = source.results_dir.clone();
    layout.keywords_dir_name = source.keywords_dir.clone();
    layout.keyword_provider = source.keyword_provider.clone();
    layout.image_extensions = source.image_extensions.clone();
    layout.validate().context("invalid catalog layout flags")?;
    Ok(layout)
}

/// Builds the publish layout from `publish` flags.
pub fn build_publish_layout(args: &PublishArgs) -> Result<CatalogLayout> {
    layout_from_source_args(&args.source, &args.output_root)
}

/// Builds the query server config from `serve` flags.
pub fn build_query_server_config(args: &ServeArgs) -> Result<QueryServerConfig> {
    // output root is unused when serving
    let layout = layout_from_source_args(&args.source, &args.source.source_root)?;
    Ok(QueryServerConfig {
        bind: args.bind.clone(),
        layout,
    })
}

/// Runs the parsed command to completion.
pub async fn run_cli(cli: Cli) -> Result<()> {
    match cli.command {
        CliCommand::Publish(args) => {
            let layout = build_publish_layout(&args)?;
            let publisher = Publisher::local(layout);
            let report = publisher.publish()?;
            println!("{}", render_publish_report(&report, publisher.layout()));
            Ok(())
        }
        CliCommand::Serve(args) => run_query_server(build_query_server_config(&args)?).await,
    }
}
