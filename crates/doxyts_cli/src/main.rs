//! doxyts: generate TypeScript declarations from a Doxygen XML export

use anyhow::{Context, Result};
use clap::Parser;
use doxyts_etch::{EtchBuilder, EtchConfig, OutputFormat};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "doxyts",
    version,
    about = "Generate TypeScript ambient declarations from Doxygen XML"
)]
struct Args {
    /// Directory containing the Doxygen XML files
    input_dir: PathBuf,

    /// File to write
    output_file: PathBuf,

    /// Output format: dts, markdown or json
    #[arg(long, short, default_value_t = OutputFormat::Dts)]
    format: OutputFormat,

    /// TOML configuration file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Namespace wrapping every declaration (overrides the config file)
    #[arg(long)]
    namespace: Option<String>,

    /// Enable debug logging
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    run(args)
}

fn run(args: Args) -> Result<()> {
    let mut config = match args.config {
        Some(ref path) => EtchConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => EtchConfig::default(),
    };
    if let Some(namespace) = args.namespace {
        config.root_namespace = Some(namespace);
    }

    let result = EtchBuilder::new(&args.input_dir)
        .config(config)
        .format(args.format)
        .output(&args.output_file)
        .build()
        .with_context(|| format!("failed to process {}", args.input_dir.display()))?;

    if result.is_empty() {
        return Ok(());
    }

    info!(
        output = %args.output_file.display(),
        overloads = result.overload_count,
        "wrote declarations"
    );
    Ok(())
}

/// Initialize tracing; DOXYTS_LOG takes precedence over --verbose
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "doxyts=debug,doxyts_etch=debug,doxyts_weld=debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_env("DOXYTS_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_both_paths() {
        assert!(Args::try_parse_from(["doxyts"]).is_err());
        assert!(Args::try_parse_from(["doxyts", "xml"]).is_err());

        let args = Args::try_parse_from(["doxyts", "xml", "out.d.ts"]).unwrap();
        assert_eq!(args.input_dir, PathBuf::from("xml"));
        assert_eq!(args.format, OutputFormat::Dts);
    }

    #[test]
    fn test_parses_options() {
        let args = Args::try_parse_from([
            "doxyts",
            "xml",
            "api.md",
            "--format",
            "markdown",
            "--namespace",
            "wkit",
            "-v",
        ])
        .unwrap();
        assert_eq!(args.format, OutputFormat::Markdown);
        assert_eq!(args.namespace.as_deref(), Some("wkit"));
        assert!(args.verbose);

        assert!(Args::try_parse_from(["doxyts", "xml", "out", "--format", "yaml"]).is_err());
    }
}
