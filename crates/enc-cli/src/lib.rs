//! CLI argument models and layout conversion for the `enc-website` binary.
//!
//! Exposes clap-backed subcommands plus helpers that turn parsed flags into
//! the catalog layout and server configuration used by the runtime crates.

pub mod cli_args;
pub mod dispatch;

pub use cli_args::{Cli, CliCommand, PublishArgs, ServeArgs, SourceLayoutArgs};
pub use dispatch::{build_publish_layout, build_query_server_config, run_cli};
