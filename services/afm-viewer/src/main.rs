//! AFM surface viewer.
//!
//! Renders microscope grid exports as interactive 3D surfaces:
//! - Topography alone, colored by height
//! - Topography colored by an overlay channel (KPFM potential, C-AFM current,
//!   MFM phase, PeakForce mechanical properties)
//!
//! Output is a shareable HTML page or Plotly figure JSON, plus an optional
//! PNG preview.

mod config;
mod output;

use std::path::{Path, PathBuf};

use afm_common::{ChannelKind, Colorscale, Grid};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use grid_parser::GridReader;
use renderer::{render_overlay, render_topography};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use config::OverlayOverrides;
use output::OutputArgs;

#[derive(Parser, Debug)]
#[command(name = "afm-viewer")]
#[command(about = "Immersive 3D visualization for Atomic Force Microscopy scans")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// JSON file overriding channel presets
    #[arg(long, env = "AFM_PRESETS", global = true)]
    presets: Option<PathBuf>,

    /// Log level
    #[arg(long, env = "AFM_LOG_LEVEL", default_value = "info", global = true)]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plot a topography scan colored by height
    Topography {
        /// Topography grid file (.txt)
        file: PathBuf,

        /// Colorscale name
        #[arg(long, default_value = "Viridis")]
        colorscale: Colorscale,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Plot a topography scan colored by a second channel
    Overlay {
        /// Topography grid file (.txt)
        topography: PathBuf,

        /// Overlay grid file (.txt), same dimensions as the topography
        overlay: PathBuf,

        /// Overlay channel (potential, current, phase, stiffness, adhesion,
        /// indentation, dissipation, deformation)
        #[arg(short, long)]
        channel: ChannelKind,

        /// Colorscale name
        #[arg(long, default_value = "Viridis")]
        colorscale: Colorscale,

        /// Lower color bound in display units
        #[arg(long, allow_negative_numbers = true)]
        clip_min: Option<f64>,

        /// Upper color bound in display units
        #[arg(long, allow_negative_numbers = true)]
        clip_max: Option<f64>,

        /// Override the channel's unit conversion factor
        #[arg(long)]
        unit_factor: Option<f64>,

        /// Override the colorbar title
        #[arg(long)]
        colorbar_title: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List channel presets
    Channels,
}

fn main() {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    if let Err(e) = init_tracing(&args) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    if let Err(e) = run(args) {
        error!(error = %e, "Render failed");
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(args: &Args) -> Result<()> {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    if args.log_json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

fn run(args: Args) -> Result<()> {
    let presets = config::load_presets(args.presets.as_deref())?;

    match args.command {
        Command::Topography {
            file,
            colorscale,
            output,
        } => {
            let grid = read_grid(&file)?;
            let spec = render_topography(&grid, colorscale)
                .with_context(|| format!("Failed to render {}", file.display()))?;
            output::write_outputs(&spec, &output, "AFM Topography")
        }

        Command::Overlay {
            topography,
            overlay,
            channel,
            colorscale,
            clip_min,
            clip_max,
            unit_factor,
            colorbar_title,
            output,
        } => {
            let topo = read_grid(&topography)?;
            let layer = read_grid(&overlay)?;

            let preset = presets.preset(channel);
            let overrides = OverlayOverrides {
                clip_min,
                clip_max,
                unit_factor,
                colorbar_title,
            };
            let params = config::overlay_params(channel, &preset, colorscale, &overrides)?;

            let spec = render_overlay(&topo, &layer, &params).with_context(|| {
                format!(
                    "Failed to render {} over {}",
                    overlay.display(),
                    topography.display()
                )
            })?;
            output::write_outputs(&spec, &output, channel.mode_name())
        }

        Command::Channels => {
            for (channel, preset) in presets.table() {
                println!(
                    "{:<12} {:<24} factor={:<8e} clip=[{}, {}] range=[{}, {}]",
                    channel.key(),
                    preset.colorbar_title,
                    preset.unit_factor,
                    preset.default_clip.min,
                    preset.default_clip.max,
                    preset.slider_range.min,
                    preset.slider_range.max,
                );
            }
            Ok(())
        }
    }
}

/// Read and parse one grid file; errors name the file.
fn read_grid(path: &Path) -> Result<Grid> {
    let reader = GridReader::open(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let grid = reader.read()?;

    info!(
        file = reader.source_name(),
        rows = grid.rows(),
        cols = grid.cols(),
        width = ?grid.width_physical,
        height = ?grid.height_physical,
        "Loaded grid"
    );

    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::fixtures;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("afm-viewer").chain(argv.iter().copied())).unwrap()
    }

    fn write_fixture(dir: &Path, name: &str, contents: &str) -> String {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn test_overlay_command_writes_figure() {
        let dir = tempfile::tempdir().unwrap();
        let topo = write_fixture(dir.path(), "topography.txt", fixtures::ENGLISH_HEADERS);
        let current = write_fixture(dir.path(), "current.txt", fixtures::NO_HEADERS);
        let out = dir.path().join("figure.json");

        run(args(&[
            "overlay",
            &topo,
            &current,
            "--channel",
            "c-afm",
            "--format",
            "json",
            "--output",
            out.to_str().unwrap(),
        ]))
        .unwrap();

        let figure: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        let trace = &figure["data"][0];
        assert_eq!(trace["colorbar"]["title"]["text"], "Electric Current (nA)");
        assert_eq!(trace["cmax"], 0.7);
        // 1..6 nA all sit above the default 0.7 nA bound
        assert_eq!(trace["surfacecolor"][1][2], 0.7);
        assert_eq!(figure["layout"]["scene"]["zaxis"]["title"]["text"], "Height (nm)");
    }

    #[test]
    fn test_malformed_overlay_error_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let topo = write_fixture(dir.path(), "topography.txt", fixtures::ENGLISH_HEADERS);
        let potential = write_fixture(dir.path(), "potential.txt", fixtures::MALFORMED_ROW);
        let out = dir.path().join("figure.html");

        let err = run(args(&[
            "overlay",
            &topo,
            &potential,
            "--channel",
            "potential",
            "--output",
            out.to_str().unwrap(),
        ]))
        .unwrap_err();

        let message = format!("{:#}", err);
        assert!(message.contains("potential.txt"), "{}", message);
        assert!(message.contains("line 3"), "{}", message);
        assert!(!out.exists());
    }
}
