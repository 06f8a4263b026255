//! Simple CLI that reads HTML from stdin and prints the extracted content as
//! JSON to stdout.
//!
//! Usage: `extract_stdin [URL] [--options PATH] < page.html`
//!
//! Logs go to stderr; set `RUST_LOG=fit_content=debug` to see tier decisions.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use fit_content::{extract_with_options, Options};
use serde_json::json;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "extract_stdin")]
#[command(about = "Extract the main content of an HTML page read from stdin")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Page URL, used for link classification and language hints
    #[arg(default_value = "about:blank")]
    url: String,

    /// JSON file with extraction options
    #[arg(long, value_name = "PATH")]
    options: Option<PathBuf>,
}

fn load_options(path: Option<&Path>) -> Result<Options, String> {
    let Some(path) = path else {
        return Ok(Options::default());
    };
    let raw = fs::read_to_string(path).map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    serde_json::from_str(&raw).map_err(|e| format!("invalid options in {}: {e}", path.display()))
}

fn run(cli: &Cli) -> Result<String, String> {
    let options = load_options(cli.options.as_deref())?;

    let mut html = String::new();
    io::stdin()
        .read_to_string(&mut html)
        .map_err(|e| format!("failed to read from stdin: {e}"))?;

    let result = extract_with_options(&html, &cli.url, &options).map_err(|e| e.to_string())?;
    serde_json::to_string(&result).map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    match run(&cli) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            println!("{}", json!({ "error": message }));
            ExitCode::FAILURE
        }
    }
}
