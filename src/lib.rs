//! texoverlay: typeset a drawing's text on top of its exported artwork.
//!
//! A drawing's labels are exported as a LaTeX `picture` environment that
//! includes the separately saved PDF/EPS of the same drawing and puts every
//! label back at its anchor, with its font, size, color and rotation. The
//! text is then typeset by LaTeX in the document's own fonts, the way XFig's
//! combined PDF/LaTeX export works.
//!
//! # Modules
//!
//! - [`ir`]: Drawing model (typed coordinates, bounding boxes, text frames)
//! - [`geometry`]: Bounding box merging, rotation extraction, style mapping
//! - [`picture`]: Record serialization and picture assembly
//! - [`fonts`]: Fonts used by an export
//! - [`export`]: The export run against a document host
//! - [`validation`]: Preflight checks
//! - [`config`]: Export options
//! - [`error`]: Error types for texoverlay operations

pub mod config;
pub mod error;
pub mod export;
pub mod fonts;
pub mod geometry;
pub mod ir;
pub mod picture;
pub mod validation;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

pub use error::TexOverlayError;

/// The texoverlay CLI application.
#[derive(Parser)]
#[command(name = "texoverlay")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    /// More log output (-v for info, -vv for debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Export the text layer of a drawing snapshot as a LaTeX picture.
    Export(ExportArgs),
    /// Check a drawing snapshot for problems without writing anything.
    Check(CheckArgs),
}

/// Arguments for the export subcommand.
#[derive(clap::Args)]
struct ExportArgs {
    /// Drawing snapshot (JSON) to export.
    input: PathBuf,

    /// Layer holding the text.
    #[arg(long, env = "TEXOVERLAY_LAYER")]
    layer: Option<String>,

    /// Output file (defaults to the drawing path with a .tex extension).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also save the drawing as PDF.
    #[arg(long)]
    pdf: bool,

    /// Also save the drawing as EPS.
    #[arg(long)]
    eps: bool,

    /// YAML file with export options.
    #[arg(long, env = "TEXOVERLAY_CONFIG")]
    config: Option<PathBuf>,
}

/// Arguments for the check subcommand.
#[derive(clap::Args)]
struct CheckArgs {
    /// Drawing snapshot (JSON) to check.
    input: PathBuf,

    /// Layer holding the text.
    #[arg(long, env = "TEXOVERLAY_LAYER", default_value = config::DEFAULT_TEXT_LAYER)]
    layer: String,

    /// Treat warnings as errors (exit non-zero if any warnings).
    #[arg(long)]
    strict: bool,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Run the texoverlay CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), TexOverlayError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Export(args)) => run_export(args),
        Some(Commands::Check(args)) => run_check(args),
        None => {
            println!("texoverlay {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Typeset a drawing's text on top of its exported artwork.");
            println!();
            println!("Run 'texoverlay --help' for usage information.");
            Ok(())
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    // A second init (e.g. from tests calling run twice) is harmless.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}

/// Execute the export subcommand.
fn run_export(args: ExportArgs) -> Result<(), TexOverlayError> {
    let mut options = match &args.config {
        Some(path) => config::read_config(path)?,
        None => config::ExportOptions::default(),
    };
    if let Some(layer) = args.layer {
        options.layer = layer;
    }
    if args.output.is_some() {
        options.output = args.output;
    }
    options.save_pdf |= args.pdf;
    options.save_eps |= args.eps;
    log::debug!("export options: {:?}", options);

    let mut host = export::SnapshotHost::open(&args.input)?;
    let summary = export::export_document(&mut host, &options)?;
    print!("{}", summary);

    match summary.write_error {
        Some(message) => Err(TexOverlayError::WriteFailed {
            path: summary.tex_path,
            message,
        }),
        None => Ok(()),
    }
}

/// Execute the check subcommand.
fn run_check(args: CheckArgs) -> Result<(), TexOverlayError> {
    let drawing = ir::io_json::read_drawing_json(&args.input)?;
    let opts = validation::CheckOptions { layer: args.layer };
    let report = validation::check_drawing(&drawing, &opts);

    match args.output.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "text" => print!("{}", report),
        other => {
            return Err(TexOverlayError::UnsupportedFormat(format!(
                "'{}' (supported: text, json)",
                other
            )));
        }
    }

    let has_errors = report.error_count() > 0;
    let has_warnings = report.warning_count() > 0;

    if has_errors || (args.strict && has_warnings) {
        Err(TexOverlayError::CheckFailed {
            error_count: report.error_count(),
            warning_count: report.warning_count(),
            report,
        })
    } else {
        Ok(())
    }
}
