//! docflow CLI - document tree to flow block conversion tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;

use docflow::render::{to_json, to_text, CompositeObserver, KindRecorder};
use docflow::{
    ConversionInput, ConversionState, ConvertOptions, Document, FlowConverter, FlowEvent,
    JsonFormat, PositionMap, TrackedChangesMode,
};

#[derive(Parser)]
#[command(name = "docflow")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Convert document trees to pagination-ready flow blocks", long_about = None)]
struct Cli {
    /// Input document (JSON)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file (stdout if not specified)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Log conversion details (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a document to flow blocks (JSON)
    Convert {
        /// Input document (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Conversion options file (JSON)
        #[arg(short, long, value_name = "FILE", env = "DOCFLOW_CONFIG")]
        config: Option<PathBuf>,

        /// Tracked changes view
        #[arg(long, value_enum)]
        tracked_changes: Option<TrackedView>,

        /// Keep adjacent compatible runs separate
        #[arg(long)]
        no_merge: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Show a progress bar over top-level nodes
        #[arg(long)]
        progress: bool,
    },

    /// Convert a document to plain text
    Text {
        /// Input document (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Tracked changes view
        #[arg(long, value_enum)]
        tracked_changes: Option<TrackedView>,
    },

    /// Show conversion statistics
    Stats {
        /// Input document (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Conversion options file (JSON)
        #[arg(short, long, value_name = "FILE", env = "DOCFLOW_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum TrackedView {
    /// Every change with its metadata
    Review,
    /// All changes accepted
    Final,
    /// All changes rejected
    Original,
}

impl From<TrackedView> for TrackedChangesMode {
    fn from(view: TrackedView) -> Self {
        match view {
            TrackedView::Review => TrackedChangesMode::Review,
            TrackedView::Final => TrackedChangesMode::Final,
            TrackedView::Original => TrackedChangesMode::Original,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            config,
            tracked_changes,
            no_merge,
            compact,
            progress,
        }) => load_options(config.as_deref(), tracked_changes).and_then(|options| {
            let options = options.with_merge_runs(!no_merge);
            cmd_convert(&input, output.as_deref(), &options, compact, progress)
        }),
        Some(Commands::Text {
            input,
            output,
            tracked_changes,
        }) => load_options(None, tracked_changes)
            .and_then(|options| cmd_text(&input, output.as_deref(), &options)),
        Some(Commands::Stats { input, config }) => {
            load_options(config.as_deref(), None).and_then(|options| cmd_stats(&input, &options))
        }
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(
                    &input,
                    cli.output.as_deref(),
                    &ConvertOptions::default(),
                    false,
                    false,
                )
            } else {
                println!("{}", "Usage: docflow <FILE> [OUTPUT]".yellow());
                println!("       docflow --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn load_options(config: Option<&Path>, tracked: Option<TrackedView>) -> CliResult<ConvertOptions> {
    let mut options = match config {
        Some(path) => {
            debug!("loading options from {}", path.display());
            ConvertOptions::from_json(&fs::read_to_string(path)?)?
        }
        None => ConvertOptions::default(),
    };
    if let Some(view) = tracked {
        options = options.with_tracked_changes(view.into());
    }
    Ok(options)
}

fn load_document(input: &Path) -> CliResult<Document> {
    let json = fs::read_to_string(input)?;
    Ok(Document::from_json(&json)?)
}

fn write_output(output: Option<&Path>, content: &str) -> CliResult<()> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    options: &ConvertOptions,
    compact: bool,
    progress: bool,
) -> CliResult<()> {
    let document = load_document(input)?;
    let positions = PositionMap::from_nodes(&document.content);
    let converter = FlowConverter::new(options.clone());
    let mut state = ConversionState::new();
    let input = ConversionInput::new(&document).with_positions(&positions);

    let pb = if progress {
        let pb = ProgressBar::new(document.content.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("#>-"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut blocks = Vec::new();
    for event in converter.stream(input, &mut state) {
        match event {
            FlowEvent::DocumentStart { section_count, .. } => {
                pb.set_message(format!("{section_count} sections"));
            }
            FlowEvent::Blocks {
                blocks: produced, ..
            } => {
                blocks.extend(produced);
                pb.inc(1);
            }
            FlowEvent::DocumentEnd { stats } => {
                pb.finish_with_message(format!("{} blocks", stats.total_blocks()));
            }
        }
    }

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    write_output(output, &to_json(&blocks, format)?)
}

fn cmd_text(input: &Path, output: Option<&Path>, options: &ConvertOptions) -> CliResult<()> {
    let document = load_document(input)?;
    let result = docflow::convert_document(&document, options);
    write_output(output, &to_text(&result.blocks))
}

fn cmd_stats(input: &Path, options: &ConvertOptions) -> CliResult<()> {
    let document = load_document(input)?;
    let positions = PositionMap::from_nodes(&document.content);
    let converter = FlowConverter::new(options.clone());
    let mut state = ConversionState::new();

    let mut recorder = KindRecorder::new();
    let mut observers = CompositeObserver::new().with_observer(&mut recorder);
    let result = converter.convert_with_observer(
        ConversionInput::new(&document).with_positions(&positions),
        &mut state,
        &mut observers,
    );
    drop(observers);
    let stats = &result.stats;

    println!("{}", "Document".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Top-level nodes".bold(), document.content.len());
    println!("{}: {}", "Paragraphs".bold(), document.paragraph_count());

    println!();
    println!("{}", "Flow Blocks".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for (kind, count) in &stats.blocks_by_kind {
        println!("{}: {}", kind.bold(), count);
    }
    println!("{}: {}", "Total".bold(), stats.total_blocks());
    if let Some(last) = recorder.ids().last() {
        println!("{}: {}", "Last block".bold(), last);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Runs".bold(), stats.run_count);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!(
        "{}: {}",
        "Dropped paragraphs".bold(),
        stats.dropped_paragraph_count
    );

    if log::log_enabled!(log::Level::Debug) {
        debug!("stats: {}", serde_json::to_string(stats)?);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docflow".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Document flow conversion tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/docflow".dimmed());
    println!("License: MIT");
}
