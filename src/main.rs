use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;
use res_scale::presets::{ModelProfile, ScalePreset};
use resolution_suggest::config::{InputSource, OutputFormat, PlannerConfig, parse_size};
use resolution_suggest::{HasRecoverySuggestion, PlannerError};
use tracing_subscriber::EnvFilter;

/// Suggest a downscaled resolution that fits a model's size granularity:
/// - percentage presets (0% to 60% smaller)
/// - curated suggestions for common sizes, with proportional fallbacks
#[derive(Parser, Debug)]
#[command(name = "ressuggest")]
#[command(about = "📐 Suggest snapped downscale resolutions for diffusion/video models")]
#[command(long_about = "Compute a downscaled width/height whose sides are a multiple of the model's \
granularity. Prints `width height` followed by an info line, or a JSON report with --json.
Only the image header is read; no pixels are decoded or written.")]
struct Args {
    /// Image to plan for
    #[arg(conflicts_with = "size", help = "Image file (only its dimensions are read)")]
    image: Option<PathBuf>,

    /// Literal input size instead of an image
    #[arg(long, help = "Plan for WIDTHxHEIGHT instead of an image, e.g. 1920x1080")]
    size: Option<String>,

    /// Model profile
    #[arg(short, long, value_enum, default_value_t = ModelProfile::HOST_DEFAULT,
          env = "RESSUGGEST_PROFILE",
          help = "Granularity: sd8, strict16 (WAN 2.2), video32, legacy64")]
    profile: ModelProfile,

    /// Scale preset
    #[arg(short = 's', long, value_enum, default_value_t = ScalePreset::HOST_DEFAULT,
          env = "RESSUGGEST_PRESET",
          help = "keep, pct10..pct60 (percent smaller), suggest1..suggest3 (table), suggest4 (very low VRAM)")]
    preset: ScalePreset,

    /// Emit a JSON report
    #[arg(long, help = "Print a JSON report instead of plain text")]
    json: bool,

    /// Print the static resolution table and exit
    #[arg(long)]
    list_table: bool,

    #[arg(short, long, help = "Log planning decisions to stderr")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.list_table {
        println!("{}", resolution_suggest::table_listing());
        return Ok(());
    }

    let source = match (args.image, args.size) {
        (Some(path), _) => Some(InputSource::Image(path)),
        (None, Some(size)) => Some(InputSource::Size(parse_size(&size).map_err(with_hint)?)),
        // validation reports the missing source
        (None, None) => None,
    };

    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let config = PlannerConfig {
        source,
        profile: args.profile,
        preset: args.preset,
        format,
    };

    let plan = resolution_suggest::run(&config).map_err(with_hint)?;
    println!(
        "{}",
        resolution_suggest::render(&plan, config.format).map_err(with_hint)?
    );
    Ok(())
}

/// Install a stderr fmt subscriber; `-v` forces debug for our crates, otherwise
/// `RUST_LOG` decides and defaults to warnings only.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("resolution_suggest=debug,res_scale=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn with_hint(error: PlannerError) -> anyhow::Error {
    match error.recovery_suggestion() {
        Some(hint) => anyhow!("{}\nhint: {}", error, hint),
        None => anyhow::Error::new(error),
    }
}
