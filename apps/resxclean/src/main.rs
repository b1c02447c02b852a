use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use log::{debug, info};
use resxclean_unused::Config;
use std::io::{BufWriter, Write};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "resxclean")]
#[command(about = "A collection of tools for cleaning up .resx resources", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Remove resources that are never referenced from source code
    Unused(Config),
}

fn main() -> Result<()> {
    env_logger::init();

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    let mut stdout = BufWriter::new(std::io::stdout());

    let cli = Cli::parse();
    debug!("Parsed CLI arguments: {:?}", cli.command);

    let start = Instant::now();

    match cli.command {
        Commands::Unused(cfg) => {
            let num_threads = rayon::current_num_threads();
            info!(
                "Running unused resources check on {} (using {} threads)",
                cfg.resource_dir.display(),
                num_threads
            );
            let json = cfg.json;
            let resource_dir = cfg.resource_dir.clone();

            let result = resxclean_unused::run_unused_resources_check(cfg)?;
            debug!("Found {} unused resources", result.unused.len());

            if json {
                resxclean_unused::print_json(&mut stdout, &result)?;
                return Ok(());
            }

            if result.resources_collected == 0 {
                resxclean_unused::print_no_resources_message(&mut stdout, &resource_dir)?;
            } else if result.unused.is_empty() {
                resxclean_unused::print_no_unused_message(&mut stdout, &result)?;
            } else {
                resxclean_unused::print_unused_tree(&mut stdout, &result)?;
            }

            writeln!(
                stdout,
                "\n{} Finished in {}ms on {} files (using {} threads).",
                "●".bright_blue(),
                start.elapsed().as_millis().to_string().cyan(),
                result.files_scanned.to_string().cyan(),
                num_threads.to_string().cyan()
            )?;
            stdout.flush()?;

            Ok(())
        }
    }
}
