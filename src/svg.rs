use crate::model::{Background, Region, SceneSnapshot};
use log::debug;

// The export dialect pins these; regions only vary in fill.
const STROKE_COLOR: &str = "black";
const STROKE_WIDTH: &str = "1.5";

/// Renders a snapshot into the canonical export markup.
///
/// The document is sized to the background's native pixel dimensions
/// when one is included, otherwise to the caller-supplied canvas size,
/// so image pixels and region coordinates coincide 1:1 with no
/// transform or scaling elements anywhere in the output. Emits plain
/// `href` (no xlink), no stylesheets and no scripting, so minimal or
/// sandboxed consumers can render it.
pub fn to_export_svg_impl(
    snap: &SceneSnapshot,
    width: u32,
    height: u32,
    background: Option<&Background>,
) -> String {
    let (w, h) = match background {
        Some(bg) => (bg.width, bg.height),
        None => (width, height),
    };
    debug!("exporting {} regions at {}x{}", snap.regions.len(), w, h);

    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">"
    );

    if let Some(bg) = background {
        // preserveAspectRatio none keeps the image stretched to the
        // exact viewBox, which is what makes region/pixel alignment
        // exact when the host rescales the document.
        svg.push_str(&format!(
            "<image id=\"bgImage\" x=\"0\" y=\"0\" width=\"{w}\" height=\"{h}\" href=\"{}\" preserveAspectRatio=\"none\" />",
            escape_xml(&bg.href)
        ));
    }

    for region in &snap.regions {
        svg.push_str(&region_element(region));
    }

    svg.push_str("</svg>");
    svg
}

/// One region element: a polygon when every vertex is straight, else a
/// path of L/Q segments (the control point stored on a curved vertex
/// bends the approach into that vertex from its predecessor).
fn region_element(region: &Region) -> String {
    let style = format!(
        "fill=\"{}\" fill-opacity=\"{}\" stroke=\"{}\" stroke-width=\"{}\"",
        escape_xml(&region.fill_color),
        region.fill_opacity,
        STROKE_COLOR,
        STROKE_WIDTH
    );
    if region.has_curves() {
        format!(
            "<path id=\"{}\" d=\"{}\" {} />",
            escape_xml(&region.id),
            escape_xml(&path_data(region)),
            style
        )
    } else {
        let points: Vec<String> = region
            .vertices
            .iter()
            .map(|v| format!("{},{}", v.x, v.y))
            .collect();
        format!(
            "<polygon id=\"{}\" points=\"{}\" {} />",
            escape_xml(&region.id),
            escape_xml(&points.join(" ")),
            style
        )
    }
}

/// `M x0 y0` then one `L`/`Q` token per remaining vertex, then `Z`.
pub fn path_data(region: &Region) -> String {
    let mut d = String::new();
    for (i, v) in region.vertices.iter().enumerate() {
        if i == 0 {
            d.push_str(&format!("M {} {}", v.x, v.y));
        } else if let Some((cx, cy)) = v.control {
            d.push_str(&format!(" Q {} {} {} {}", cx, cy, v.x, v.y));
        } else {
            d.push_str(&format!(" L {} {}", v.x, v.y));
        }
    }
    d.push_str(" Z");
    d
}

/// Escapes the five XML metacharacters. Everything interpolated into
/// attribute text goes through here, including data URLs.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
