//! abif CLI - Command-line tool for ABIF trace file conversion.
//!
//! This is the main entry point for the abif command-line application.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use abif::prelude::*;

/// abif - ABIF (.fsa) trace file conversion tool
#[derive(Parser)]
#[command(name = "abif")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert trace files to comma-separated tables
    Convert(ConvertArgs),

    /// List the directory entries of a trace file
    List {
        /// Input ABIF file
        input: PathBuf,

        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decode and print a single entry
    Show {
        /// Input ABIF file
        input: PathBuf,

        /// Four-character entry name (e.g. DATA, MODL)
        name: String,

        /// Entry number
        #[arg(default_value_t = 1)]
        number: i32,

        /// Print the value as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct ConvertArgs {
    /// Files to convert (default: every match of --pattern in --dir)
    inputs: Vec<PathBuf>,

    /// Directory to scan for trace files
    #[arg(short, long, env = "ABIF_INPUT_DIR", default_value = ".")]
    dir: PathBuf,

    /// File name pattern used when scanning (glob-style)
    #[arg(short, long, default_value = "*.fsa")]
    pattern: String,

    /// Number of worker threads (default: one per core)
    #[arg(short, long)]
    jobs: Option<usize>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Commands::Convert(args) => {
            cmd_convert(&args)?;
        }
        Commands::List { input, json } => {
            cmd_list(&input, json)?;
        }
        Commands::Show { input, name, number, json } => {
            cmd_show(&input, &name, number, json)?;
        }
    }

    Ok(())
}

fn cmd_convert(args: &ConvertArgs) -> Result<()> {
    let inputs = if args.inputs.is_empty() {
        println!("Looking for {} files in: {}", args.pattern, args.dir.display());
        find_inputs(&args.dir, &args.pattern)?
    } else {
        args.inputs.clone()
    };

    if inputs.is_empty() {
        println!("No {} files found.", args.pattern);
        return Ok(());
    }

    if let Some(jobs) = args.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .context("Failed to configure worker threads")?;
    }

    println!("Converting {} files...", inputs.len());

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let (converted, errors) = convert_all(&inputs, &pb);

    pb.finish_with_message("Done");

    println!(
        "Converted {} files in {:?} ({} errors)",
        converted,
        start.elapsed(),
        errors
    );

    if errors > 0 {
        anyhow::bail!("{} of {} files failed to convert", errors, inputs.len());
    }

    Ok(())
}

/// Convert every input in parallel, returning `(converted, failed)` counts.
///
/// Each file is independent; one failure never stops the others.
fn convert_all(inputs: &[PathBuf], pb: &ProgressBar) -> (usize, usize) {
    let converted = AtomicUsize::new(0);
    let errors = AtomicUsize::new(0);

    inputs.par_iter().for_each(|input| {
        match convert_file(input) {
            Ok(output) => {
                log::info!("Converted {} -> {}", input.display(), output.display());
                converted.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                log::error!("{:#}", e);
                errors.fetch_add(1, Ordering::Relaxed);
            }
        }
        pb.inc(1);
    });

    (converted.into_inner(), errors.into_inner())
}

/// Convert one trace file to a table next to it.
fn convert_file(input: &Path) -> Result<PathBuf> {
    let traces = read_traces(input)
        .with_context(|| format!("Failed to read traces from {}", input.display()))?;

    let output = output_path(input);
    write_table_to_path(&traces, &output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    Ok(output)
}

/// Find files matching `pattern` directly inside `dir`, sorted by path.
fn find_inputs(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let dir = dir.to_str().context("Input directory is not valid UTF-8")?;
    // Only the pattern is matched; the directory is taken literally.
    let full = Path::new(&glob::Pattern::escape(dir)).join(pattern);
    let full = full.to_str().context("File pattern is not valid UTF-8")?;

    let mut inputs = Vec::new();
    for entry in glob::glob(full).context("Invalid file pattern")? {
        match entry {
            Ok(path) if path.is_file() => inputs.push(path),
            Ok(_) => {}
            Err(e) => log::warn!("Skipping unreadable path: {}", e),
        }
    }
    inputs.sort();

    Ok(inputs)
}

fn cmd_list(input: &Path, json: bool) -> Result<()> {
    let container = Container::open(input)
        .with_context(|| format!("Failed to open {}", input.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(container.entries())?);
        return Ok(());
    }

    println!("ABIF version {}", container.version());
    for entry in container.entries() {
        println!("{}", entry);
    }
    println!("\nTotal: {} entries", container.len());

    Ok(())
}

fn cmd_show(input: &Path, name: &str, number: i32, json: bool) -> Result<()> {
    let tag = Tag::parse(name)
        .with_context(|| format!("Entry name must be exactly four bytes, got {:?}", name))?;

    let mut container = Container::open(input)
        .with_context(|| format!("Failed to open {}", input.display()))?;
    let value = container
        .data(tag, number)
        .with_context(|| format!("Failed to decode {} ({}) in {}", tag, number, input.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{} ({}) = {}", tag, number, value);
    }

    Ok(())
}
