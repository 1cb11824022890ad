#![forbid(unsafe_code)]

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use eyre::{Context, Result};
use humantime::parse_duration;
use load_complete::clock::SystemClock;
use load_complete::geometry::Bounds;
use load_complete::measure::{measure, MeasureSpec};
use load_complete::style::{Density, ViewAttributes};
use load_complete::view::RedrawFlag;
use load_complete::{Argb, LoadCompleteView};
use load_complete_telemetry::{LogFormat, TelemetryConfig};
use tokio::fs;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::host::Host;

mod host;
mod replay;
mod simulation;

/// Utility args
#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about = "Headless loading/complete animation host",
    long_about = "Drives the loading spinner and checkmark animation and prints every frame as JSON"
)]
struct Args {
    /// Display density, pixels per density independent pixel.
    #[arg(long, env = "LOAD_COMPLETE_DENSITY", default_value_t = 1.0)]
    density: f32,
    /// JSON file with the construction-time style attributes.
    #[arg(long, env = "LOAD_COMPLETE_ATTRIBUTES")]
    attributes: Option<PathBuf>,
    /// Stroke color, `#RRGGBB`, `#AARRGGBB` or a color name. Overrides the attributes file.
    #[arg(long)]
    color: Option<Argb>,
    /// Stroke width in density independent pixels. Overrides the attributes file.
    #[arg(long)]
    stroke_width_dp: Option<f32>,
    /// Log as JSON on stderr.
    #[arg(long)]
    json_logs: bool,
    #[clap(subcommand)]
    subcmd: SubCommand,
}

#[derive(Parser, Debug)]
enum SubCommand {
    /// Spin for a while, then complete
    #[clap(action)]
    Simulate(SimulateArgs),

    /// Play an event script
    #[clap(action)]
    Replay(ReplayArgs),

    /// Print the measured size for the given layout constraints
    #[clap(action)]
    Measure(MeasureArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Widget size in pixels, measured from the default length when omitted.
    #[arg(long)]
    size: Option<i32>,
    /// Padding on every side, in pixels.
    #[arg(long, default_value_t = 0)]
    padding: i32,
    /// Only print a summary, not every frame.
    #[arg(long)]
    quiet: bool,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// How long to spin before completing
    #[arg(long, default_value = "3s", value_parser = parse_duration)]
    loading_for: Duration,
    #[clap(flatten)]
    frame: FrameArgs,
}

#[derive(Parser, Debug)]
struct ReplayArgs {
    /// JSON-lines event script
    script: PathBuf,
    /// Give up when the view still asks for frames after this long
    #[arg(long, default_value = "30s", value_parser = parse_duration)]
    timeout: Duration,
    #[clap(flatten)]
    frame: FrameArgs,
}

#[derive(Parser, Debug)]
struct MeasureArgs {
    /// `exactly:N`, `at-most:N` or `unspecified`
    #[arg(long, default_value = "unspecified")]
    width: MeasureSpec,
    /// `exactly:N`, `at-most:N` or `unspecified`
    #[arg(long, default_value = "unspecified")]
    height: MeasureSpec,
}

async fn load_attributes(args: &Args, density: Density) -> Result<ViewAttributes> {
    let mut attributes = match &args.attributes {
        Some(path) => {
            let text = fs::read_to_string(path)
                .await
                .wrap_err_with(|| format!("failed reading {}", path.display()))?;
            serde_json::from_str(&text)
                .wrap_err_with(|| format!("invalid attributes in {}", path.display()))?
        }
        None => ViewAttributes::default(),
    };
    if let Some(color) = args.color {
        attributes.color = Some(color);
    }
    if let Some(width_dp) = args.stroke_width_dp {
        #[allow(clippy::cast_precision_loss)]
        let width_px = density.dp_to_px(width_dp) as f32;
        attributes.stroke_width = Some(width_px);
    }
    Ok(attributes)
}

fn make_host(
    attributes: &ViewAttributes,
    density: Density,
    frame: &FrameArgs,
) -> Host<SystemClock, io::Stdout> {
    let redraw = RedrawFlag::default();
    let view = LoadCompleteView::new(SystemClock, redraw.clone(), attributes, density);
    let bounds = match frame.size {
        Some(size) => Bounds::new(size, size),
        None => {
            let (width, height) =
                view.measure(MeasureSpec::Unspecified, MeasureSpec::Unspecified);
            Bounds::new(width, height)
        }
    }
    .with_padding(frame.padding);
    info!(?bounds, "laid out");
    Host::new(view, redraw, bounds, (!frame.quiet).then(io::stdout))
}

async fn main_inner(args: Args) -> Result<()> {
    let density = Density(args.density);
    match &args.subcmd {
        SubCommand::Simulate(simulate) => {
            let attributes = load_attributes(&args, density).await?;
            let mut host = make_host(&attributes, density, &simulate.frame);
            let (tx, rx) = mpsc::unbounded_channel();
            tokio::spawn(simulation::load_then_complete(tx, simulate.loading_for));
            host.event_loop(rx).await?;
            if simulate.frame.quiet {
                println!(
                    "{} frames, {} completion(s)",
                    host.frames(),
                    host.completions()
                );
            }
        }
        SubCommand::Replay(replay) => {
            let attributes = load_attributes(&args, density).await?;
            let script = fs::read_to_string(&replay.script)
                .await
                .wrap_err_with(|| format!("failed reading {}", replay.script.display()))?;
            let entries = replay::parse_script(&script)?;
            let mut host = make_host(&attributes, density, &replay.frame);
            let (tx, rx) = mpsc::unbounded_channel();
            tokio::spawn(replay::play(entries, tx));
            let script_end = tokio::time::timeout(replay.timeout, host.event_loop(rx)).await;
            match script_end {
                Ok(result) => result?,
                Err(_) => warn!(
                    timeout = ?replay.timeout,
                    "view still animating, stopping"
                ),
            }
            if replay.frame.quiet {
                println!(
                    "{} frames, {} completion(s)",
                    host.frames(),
                    host.completions()
                );
            }
        }
        SubCommand::Measure(args) => {
            let (width, height) = measure(args.width, args.height, density);
            #[allow(clippy::cast_precision_loss)]
            let (width_dp, height_dp) = (
                density.px_to_dp(width as f32),
                density.px_to_dp(height as f32),
            );
            println!("{width}x{height} px ({width_dp}x{height_dp} dp)");
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let telemetry = TelemetryConfig::new()
        .with_format(if args.json_logs {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        })
        .try_init()?;

    let result = main_inner(args).await;
    telemetry.flush();
    result
}
