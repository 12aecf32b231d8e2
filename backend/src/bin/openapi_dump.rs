//! Write the OpenAPI document for client generation.
//!
//! ```text
//! cargo run --bin openapi-dump -- --format yaml --output openapi.yaml
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use utoipa::OpenApi;
use volunteer_hub::ApiDoc;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum Format {
    #[default]
    Json,
    Yaml,
}

/// `openapi-dump` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(about = "Print the volunteer hub OpenAPI document")]
struct CliArgs {
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
    /// Write to a file instead of stdout.
    #[arg(long, value_name = "path")]
    output: Option<PathBuf>,
}

fn render(format: Format) -> io::Result<String> {
    let doc = ApiDoc::openapi();
    match format {
        Format::Json => doc.to_pretty_json().map_err(io::Error::other),
        Format::Yaml => doc.to_yaml().map_err(io::Error::other),
    }
}

fn main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let rendered = render(args.format)?;
    match args.output {
        Some(path) => fs::write(path, rendered),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.write_all(b"\n")
        }
    }
}
