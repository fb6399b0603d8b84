//! Write rendered plots to disk or stdout.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use renderer::png::render_preview_png;
use renderer::{plotly, SurfacePlotSpec};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Standalone page with the interactive figure
    Html,
    /// Plotly figure JSON
    Json,
}

#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "html")]
    pub format: OutputFormat,

    /// Also write a top-down PNG preview of the surface colors
    #[arg(long)]
    pub preview: Option<PathBuf>,

    /// Preview pixels per grid cell
    #[arg(long, default_value = "4")]
    pub cell_size: usize,
}

/// Serialize the plot in the requested format.
pub fn render_document(spec: &SurfacePlotSpec, format: OutputFormat, title: &str) -> Result<String> {
    Ok(match format {
        OutputFormat::Html => plotly::to_html(spec, title),
        OutputFormat::Json => serde_json::to_string_pretty(&plotly::to_plotly_json(spec))?,
    })
}

/// Write the figure and the optional preview.
pub fn write_outputs(spec: &SurfacePlotSpec, args: &OutputArgs, title: &str) -> Result<()> {
    let document = render_document(spec, args.format, title)?;

    match &args.output {
        Some(path) => {
            write_file(path, document.as_bytes())?;
            info!(path = %path.display(), format = ?args.format, "Wrote figure");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(document.as_bytes())?;
            stdout.flush()?;
        }
    }

    if let Some(path) = &args.preview {
        let png = render_preview_png(spec, args.cell_size).context("Failed to render preview")?;
        write_file(path, &png)?;
        info!(path = %path.display(), bytes = png.len(), "Wrote preview");
    }

    Ok(())
}

fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    std::fs::write(path, data).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use afm_common::Colorscale;
    use renderer::render_topography;
    use test_utils::create_bump_topography;

    #[test]
    fn test_write_json_and_preview() {
        let dir = tempfile::tempdir().unwrap();
        let spec = render_topography(&create_bump_topography(4, 4, 5.0), Colorscale::Viridis).unwrap();
        let args = OutputArgs {
            output: Some(dir.path().join("figure.json")),
            format: OutputFormat::Json,
            preview: Some(dir.path().join("preview.png")),
            cell_size: 2,
        };

        write_outputs(&spec, &args, "Topography").unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("figure.json")).unwrap())
                .unwrap();
        assert_eq!(json["data"][0]["colorscale"][0][1], "rgb(68,1,84)");

        let png = std::fs::read(dir.path().join("preview.png")).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[test]
    fn test_html_document() {
        let spec = render_topography(&create_bump_topography(2, 2, 5.0), Colorscale::Hot).unwrap();
        let html = render_document(&spec, OutputFormat::Html, "AFM Topography").unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(plotly::PLOTLY_CDN));
    }
}
