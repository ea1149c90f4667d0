//! Arbor CLI - Command-line tool for tree containers
//!
//! This binary provides command-line interfaces for:
//! - pack: JSON object → container (with optional JSON backup on failure)
//! - unpack: container → pretty JSON
//! - ls: list every group and dataset with its dtype and shape

use arbor_io::fallback::JSON_INDENT;
use arbor_io::{
    list_container, read_tree, tree_from_json, tree_to_json, write_tree, EntrySummary, Limits,
    ReadOptions, WriteOptions,
};
use arbor_text::{banner, DEFAULT_WIDTH};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;
use std::error::Error;
use std::fs::{self, File};
use std::io::{BufWriter, IsTerminal, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, Level};

#[derive(Parser)]
#[command(name = "arbor")]
#[command(about = "Convert nested JSON trees to and from hierarchical containers")]
#[command(version)]
struct Cli {
    /// Enable debug-level diagnostics
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a JSON object to a container
    ///
    /// Examples:
    ///   arbor pack run.json -o run.arb
    ///   arbor pack run.json -o run.arb --json-backup --detail
    Pack {
        /// Input file (JSON object)
        input: PathBuf,
        /// Output container
        #[arg(short, long)]
        output: PathBuf,
        /// Write a .json backup next to the output if the container write fails
        #[arg(long)]
        json_backup: bool,
        /// Report the failing leaf and the container's reason
        #[arg(long)]
        detail: bool,
        /// Maximum group nesting depth
        #[arg(long, default_value_t = Limits::default().max_depth)]
        max_depth: usize,
    },
    /// Read a container back to JSON
    Unpack {
        /// Input container
        input: PathBuf,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Maximum group nesting depth
        #[arg(long, default_value_t = Limits::default().max_depth)]
        max_depth: usize,
    },
    /// List groups and datasets
    ///
    /// Examples:
    ///   arbor ls run.arb
    ///   arbor ls run.arb --format json
    Ls {
        /// Input container
        input: PathBuf,
        /// Output format (table, json)
        #[arg(long, value_enum, default_value_t = LsFormat::Table)]
        format: LsFormat,
        /// Maximum group nesting depth
        #[arg(long, default_value_t = Limits::default().max_depth)]
        max_depth: usize,
    },
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum LsFormat {
    Table,
    Json,
}

#[derive(Serialize)]
struct LsReport<'a> {
    file: String,
    entries: &'a [EntrySummary],
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Pack {
            input,
            output,
            json_backup,
            detail,
            max_depth,
        } => {
            handle_pack(input, output, json_backup, detail, max_depth)?;
        }
        Commands::Unpack {
            input,
            output,
            max_depth,
        } => {
            handle_unpack(input, output, max_depth)?;
        }
        Commands::Ls {
            input,
            format,
            max_depth,
        } => {
            handle_ls(input, format, max_depth)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_ansi(std::io::stdout().is_terminal())
        .with_writer(std::io::stdout)
        .init();
}

fn handle_pack(
    input: PathBuf,
    output: PathBuf,
    json_backup: bool,
    detail: bool,
    max_depth: usize,
) -> Result<(), Box<dyn Error>> {
    let text = fs::read_to_string(&input)?;
    let value: Value = serde_json::from_str(&text)?;
    let tree = tree_from_json(value)?;
    debug!(input = %input.display(), entries = tree.len(), "parsed input tree");

    let options = WriteOptions {
        use_json_backup: json_backup,
        show_detail: detail,
        limits: Limits::default().with_max_depth(max_depth),
    };
    let outcome = write_tree(&tree, &output, &options);

    if !outcome.succeeded() {
        return Err(format!("failed to write container {}", output.display()).into());
    }
    if !outcome.primary_ok {
        info!(
            backup_ok = ?outcome.fallback_ok,
            "container write failed; JSON backup attempted"
        );
    }
    Ok(())
}

fn handle_unpack(
    input: PathBuf,
    output: Option<PathBuf>,
    max_depth: usize,
) -> Result<(), Box<dyn Error>> {
    let options = ReadOptions {
        limits: Limits::default().with_max_depth(max_depth),
        ..ReadOptions::default()
    };
    let tree = read_tree(&input, &options)
        .map_err(|e| format!("Failed to read container! ({})", e))?;
    let value = tree_to_json(&tree)?;

    match output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(&path)?);
            write_pretty(&mut writer, &value)?;
            writer.flush()?;
            debug!(output = %path.display(), "wrote JSON");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            write_pretty(&mut stdout, &value)?;
        }
    }
    Ok(())
}

fn write_pretty(writer: &mut dyn Write, value: &Value) -> Result<(), Box<dyn Error>> {
    let mut serializer = Serializer::with_formatter(&mut *writer, PrettyFormatter::with_indent(JSON_INDENT));
    value.serialize(&mut serializer)?;
    writeln!(writer)?;
    Ok(())
}

fn handle_ls(input: PathBuf, format: LsFormat, max_depth: usize) -> Result<(), Box<dyn Error>> {
    let limits = Limits::default().with_max_depth(max_depth);
    let entries = list_container(&input, &limits)?;

    let mut stdout = std::io::stdout().lock();
    match format {
        LsFormat::Table => print_ls_table(&mut stdout, &input, &entries)?,
        LsFormat::Json => {
            let report = LsReport {
                file: input.display().to_string(),
                entries: &entries,
            };
            serde_json::to_writer_pretty(&mut stdout, &report)?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

fn print_ls_table(
    writer: &mut dyn Write,
    input: &Path,
    entries: &[EntrySummary],
) -> Result<(), Box<dyn Error>> {
    writeln!(
        writer,
        "{}",
        banner(&input.display().to_string(), DEFAULT_WIDTH, '=', true)
    )?;
    writeln!(writer, "Path\tKind\tShape")?;
    for entry in entries {
        writeln!(
            writer,
            "{}\t{}\t{}",
            entry.path,
            entry.kind,
            entry.shape.as_deref().unwrap_or("-")
        )?;
    }
    let groups = entries.iter().filter(|e| e.kind == "group").count();
    writeln!(
        writer,
        "{} groups, {} datasets",
        groups,
        entries.len() - groups
    )?;
    Ok(())
}
