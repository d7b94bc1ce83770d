use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use log::LevelFilter;
use pdf_changebars::{BoundingBox, ChangeReport, ChangebarOptions, MeasureMode, Outcome, Toolchain};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "changebars",
    about = "Add change-bar navigation links and bookmarks to a PDF",
    version
)]
struct Cli {
    /// Input PDF file containing change bars
    #[arg(value_parser = readable_file)]
    input: PathBuf,

    /// Output PDF file (defaults to rewriting the input in place)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Change-bar region in inches from the upper-left corner: x1,x2,y1,y2
    #[arg(long, value_parser = parse_bbox, allow_hyphen_values = true)]
    bbox: Option<BoundingBox>,

    /// Sampling resolution in dots per inch
    #[arg(long)]
    dpi: Option<u32>,

    /// JSON options file; command-line flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// How trimmed heights are measured
    #[arg(long, value_enum)]
    measure: Option<MeasureArg>,

    /// Ghostscript binary
    #[arg(long = "gs")]
    ghostscript: Option<String>,

    /// ImageMagick `convert` binary
    #[arg(long)]
    magick: Option<String>,

    /// Show detected changes only, don't write a PDF
    #[arg(long)]
    report_only: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum MeasureArg {
    Imagemagick,
    Builtin,
}

impl From<MeasureArg> for MeasureMode {
    fn from(arg: MeasureArg) -> Self {
        match arg {
            MeasureArg::Imagemagick => Self::ImageMagick,
            MeasureArg::Builtin => Self::Builtin,
        }
    }
}

fn readable_file(value: &str) -> std::result::Result<PathBuf, String> {
    let path = PathBuf::from(value);
    std::fs::File::open(&path).map_err(|e| format!("cannot read '{}': {}", value, e))?;
    if !path.is_file() {
        return Err(format!("'{}' is not a file", value));
    }
    Ok(path)
}

fn parse_bbox(value: &str) -> std::result::Result<BoundingBox, String> {
    value.parse().map_err(|e: pdf_changebars::ChangebarError| e.to_string())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

async fn resolve_options(cli: &Cli) -> Result<ChangebarOptions> {
    let mut options = match &cli.config {
        Some(path) => ChangebarOptions::load(path)
            .await
            .with_context(|| format!("loading {}", path.display()))?,
        None => ChangebarOptions::default(),
    };

    if let Some(bbox) = cli.bbox {
        options.bounding_box = bbox;
    }
    if let Some(dpi) = cli.dpi {
        options.dpi = dpi;
    }
    if let Some(measure) = cli.measure {
        options.measure = measure.into();
    }
    if let Some(gs) = &cli.ghostscript {
        options.ghostscript = gs.clone();
    }
    if let Some(magick) = &cli.magick {
        options.magick = magick.clone();
    }

    options.validate()?;
    Ok(options)
}

fn print_report(report: &ChangeReport) {
    println!("Change Bars:");
    println!("  Pages: {}", report.page_count);
    println!(
        "  Changed pages: {}",
        report
            .changed
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("  Sections: {}", report.sections().len());
    for (idx, section) in report.sections().iter().enumerate() {
        println!("    {}", pdf_changebars::layout::section_title(idx + 1, section));
    }
}

async fn run(cli: &Cli, options: &ChangebarOptions, toolchain: &Toolchain) -> Result<()> {
    if cli.report_only {
        let report = pdf_changebars::analyze(&cli.input, options, toolchain).await?;
        if report.has_changes() {
            print_report(&report);
        } else {
            println!("No change bars found in {}", cli.input.display());
        }
        return Ok(());
    }

    let output = cli.output.clone().unwrap_or_else(|| cli.input.clone());
    match pdf_changebars::annotate(&cli.input, &output, options, toolchain)
        .await
        .with_context(|| format!("processing {}", cli.input.display()))?
    {
        Outcome::NoChanges { page_count } => {
            println!(
                "No change bars found in {} ({} pages); left unchanged",
                cli.input.display(),
                page_count
            );
        }
        Outcome::Annotated(report) => {
            print_report(&report);
            println!("Navigation → {}", output.display());
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = resolve_options(&cli).await?;
    let toolchain = Toolchain::from_options(&options);
    run(&cli, &options, &toolchain).await
}
