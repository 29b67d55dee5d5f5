#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), forbid(clippy::expect_used))]
//! Print the OpenAPI document as JSON or YAML.
//!
//! # Examples
//! ```sh
//! cargo run --manifest-path backend/Cargo.toml --bin openapi-dump > openapi.json
//! cargo run --manifest-path backend/Cargo.toml --bin openapi-dump -- --format yaml
//! ```

use std::fs;
use std::io;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use folder_consistency::doc::ApiDoc;
use utoipa::OpenApi;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum Format {
    #[default]
    Json,
    Yaml,
}

/// `openapi-dump` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "openapi-dump",
    about = "Render the folder consistency OpenAPI document",
    version
)]
struct CliArgs {
    /// Output encoding.
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
    /// Write to this file instead of stdout.
    #[arg(long, value_name = "path")]
    output: Option<PathBuf>,
}

fn render(format: Format) -> io::Result<String> {
    let document = ApiDoc::openapi();
    match format {
        Format::Json => document
            .to_pretty_json()
            .map_err(|error| io::Error::other(format!("failed to render OpenAPI: {error}"))),
        Format::Yaml => document
            .to_yaml()
            .map_err(|error| io::Error::other(format!("failed to render OpenAPI: {error}"))),
    }
}

fn main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let document = render(args.format)?;
    match args.output {
        Some(path) => fs::write(path, document),
        None => {
            println!("{document}");
            Ok(())
        }
    }
}
