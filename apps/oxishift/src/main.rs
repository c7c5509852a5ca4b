use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use log::{debug, info};
use oxishift_require_to_import::Config;
use std::io::{BufWriter, Write};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "oxishift")]
#[command(about = "A collection of codemods for JavaScript/TypeScript codebases", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Convert require() calls to static import declarations
    RequireToImport(Config),
}

fn main() -> Result<()> {
    env_logger::init();

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut stdout = BufWriter::new(std::io::stdout());

    let cli = Cli::parse();
    debug!("Parsed CLI arguments: {:?}", cli.command);

    let start = Instant::now();

    match cli.command {
        Commands::RequireToImport(cfg) => {
            let num_threads = rayon::current_num_threads();
            info!("Running require-to-import (using {} threads)", num_threads);
            debug!("Config: root={:?}, include={:?}, write={}", cfg.root, cfg.include, cfg.write);

            let write = cfg.write;
            let result = oxishift_require_to_import::run_require_to_import(cfg)?;
            debug!("Reports for {} files", result.reports.len());

            let elapsed_ms = start.elapsed().as_millis();

            if result.reports.is_empty() {
                oxishift_require_to_import::print_clean_message(&mut stdout)?;
            } else {
                oxishift_require_to_import::print_run_report(&mut stdout, &result, write)?;
            }

            writeln!(
                stdout,
                "\n{} Finished in {}ms on {} files (using {} threads).",
                "●".bright_blue(),
                elapsed_ms.to_string().cyan(),
                result.files_scanned.to_string().cyan(),
                num_threads.to_string().cyan()
            )?;
            stdout.flush()?;

            // Non-zero exit when a dry run still has pending conversions, to fail CI
            if !write && result.files_changed > 0 {
                std::process::exit(1);
            }

            Ok(())
        }
    }
}
