//! `phlint` - command line front end for the PHP diagnostics engine.
//!
//! Every file named on the command line is indexed before any file is
//! linted, so references between the given files resolve. One JSON
//! report is written to stdout per file, in argument order.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use phlint_index::SymbolIndex;
use phlint_sema::Report;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Parser)]
#[command(
    name = "phlint",
    version,
    about = "Semantic diagnostics for PHP source files",
    after_help = "Examples:\n  phlint src/Mailer.php\n  phlint --pretty src/*.php\n  phlint src/*.php | jq '.report.errors'"
)]
struct Cli {
    /// PHP files to check.
    #[arg(required = true, value_name = "FILE")]
    files: Vec<PathBuf>,
    /// Pretty-print the JSON reports.
    #[arg(long)]
    pretty: bool,
    /// Show verbose progress details.
    #[arg(long, short, global = true)]
    verbose: bool,
}

/// One output line: the file path and its report.
#[derive(Debug, Serialize)]
struct FileReport<'a> {
    file: String,
    report: &'a Report,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(2)
        }
    }
}

/// Indexes then lints every file. Returns `false` when any report
/// contains errors.
fn run(cli: &Cli) -> anyhow::Result<bool> {
    let mut index = SymbolIndex::with_builtins();
    let mut sources = Vec::with_capacity(cli.files.len());
    for path in &cli.files {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let parse = phlint_syntax::parse(&text);
        phlint_index::index_file(&mut index, path, &parse);
        sources.push((path, text));
    }
    info!(files = sources.len(), symbols = index.len(), "indexed sources");

    let mut clean = true;
    for (path, text) in &sources {
        let report = phlint_sema::lint(&index, path, text)
            .with_context(|| format!("failed to lint {}", path.display()))?;
        if report.has_errors() {
            clean = false;
        }
        let entry = FileReport {
            file: path.display().to_string(),
            report: &report,
        };
        let rendered = if cli.pretty {
            serde_json::to_string_pretty(&entry)?
        } else {
            serde_json::to_string(&entry)?
        };
        println!("{rendered}");
    }
    Ok(clean)
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
