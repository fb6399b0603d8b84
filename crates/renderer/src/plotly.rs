//! Export surface plots as Plotly figures.
//!
//! The figure JSON can be handed to `Plotly.newPlot` as-is; [`to_html`]
//! wraps it in a standalone page for sharing.

use serde_json::{json, Value};

use afm_common::Colorscale;

use crate::colorscale::stops;
use crate::surface::SurfacePlotSpec;

/// plotly.js bundle referenced by exported pages.
pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Build the Plotly figure (`{"data": [...], "layout": {...}}`).
///
/// NaN cells serialize as `null`, which Plotly draws as holes.
pub fn to_plotly_json(spec: &SurfacePlotSpec) -> Value {
    let mut trace = json!({
        "type": "surface",
        "x": spec.x,
        "y": spec.y,
        "z": spec.z,
        "colorscale": colorscale_json(spec.colorscale),
        "colorbar": { "title": { "text": spec.colorbar_title } },
    });

    if let Some(surface_color) = &spec.surface_color {
        trace["surfacecolor"] = json!(surface_color);
    }
    if let Some(range) = spec.color_range {
        trace["cmin"] = json!(range.min);
        trace["cmax"] = json!(range.max);
    }

    json!({
        "data": [trace],
        "layout": {
            "scene": {
                "xaxis": { "title": { "text": spec.axes.x_title } },
                "yaxis": { "title": { "text": spec.axes.y_title } },
                "zaxis": { "title": { "text": spec.axes.z_title } },
            },
            "margin": spec.margin,
        }
    })
}

/// Explicit `[[position, "rgb(r,g,b)"], ...]` stops, so plotly.js draws the
/// same palette as the preview instead of its own definition of the name.
pub fn colorscale_json(scale: Colorscale) -> Value {
    stops(scale)
        .map(|(position, color)| json!([position, color.to_css()]))
        .collect()
}

/// Standalone HTML page showing the interactive figure.
pub fn to_html(spec: &SurfacePlotSpec, title: &str) -> String {
    // "</" inside the inline script would close the tag early
    let figure = to_plotly_json(spec).to_string().replace("</", "<\\/");
    let title = escape_html(title);

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{cdn}"></script>
<style>html, body {{ margin: 0; height: 100%; }} #plot {{ width: 100%; height: 100%; }}</style>
</head>
<body>
<div id="plot"></div>
<script>
const figure = {figure};
Plotly.newPlot("plot", figure.data, figure.layout, {{ responsive: true }});
</script>
</body>
</html>
"#,
        title = title,
        cdn = PLOTLY_CDN,
        figure = figure,
    )
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{render_overlay, render_topography, OverlayParams};
    use afm_common::{ChannelKind, Colorscale, Grid};

    #[test]
    fn test_topography_figure() {
        let topo = Grid::new(vec![1e-9, 2e-9], 1, 2).unwrap();
        let spec = render_topography(&topo, Colorscale::Hot).unwrap();
        let fig = to_plotly_json(&spec);

        let trace = &fig["data"][0];
        assert_eq!(trace["type"], "surface");
        assert_eq!(trace["colorscale"][0], json!([0.0, "rgb(0,0,0)"]));
        assert_eq!(trace["colorscale"][3], json!([1.0, "rgb(255,255,255)"]));
        assert_eq!(trace["colorbar"]["title"]["text"], "Height (nm)");
        assert!(trace.get("surfacecolor").is_none());
        assert!(trace.get("cmin").is_none());
        assert_eq!(fig["layout"]["scene"]["zaxis"]["title"]["text"], "Z (nm)");
        assert_eq!(fig["layout"]["margin"]["t"], 40);
    }

    #[test]
    fn test_overlay_figure_has_color_range() {
        let topo = Grid::new(vec![0.0; 2], 1, 2).unwrap();
        let current = Grid::new(vec![1e-10, f64::NAN], 1, 2).unwrap();
        let params = OverlayParams::from_preset(&ChannelKind::Current.preset(), Colorscale::Plasma);
        let fig = to_plotly_json(&render_overlay(&topo, &current, &params).unwrap());

        let trace = &fig["data"][0];
        assert_eq!(trace["cmin"], 0.0);
        assert_eq!(trace["cmax"], 0.7);
        assert!(trace["surfacecolor"][0][1].is_null());
        assert_eq!(fig["layout"]["scene"]["zaxis"]["title"]["text"], "Height (nm)");
    }

    #[test]
    fn test_colorscale_carries_brewer_stops() {
        let scale = colorscale_json(Colorscale::Blues);
        let stops = scale.as_array().unwrap();
        assert_eq!(stops.len(), 9);
        assert_eq!(stops[0], json!([0.0, "rgb(247,251,255)"]));
        assert_eq!(stops[2], json!([0.25, "rgb(198,219,239)"]));
        assert_eq!(stops[8], json!([1.0, "rgb(8,48,107)"]));
    }

    #[test]
    fn test_html_escapes_script_close() {
        let topo = Grid::new(vec![0.0], 1, 1).unwrap();
        let params = OverlayParams::from_preset(&ChannelKind::Phase.preset(), Colorscale::Jet)
            .with_colorbar_title("</script>");
        let spec = render_overlay(&topo, &topo, &params).unwrap();
        let html = to_html(&spec, "MFM <scan>");
        assert!(html.contains("<title>MFM &lt;scan&gt;</title>"));
        assert!(html.contains("<\\/script>"));
        assert_eq!(html.matches("</script>").count(), 2);
    }
}
