use crate::error::EditError;
use crate::geometry::tolerance::clamp01;
use crate::model::{Background, CanvasSize, Region, SceneSnapshot, Vertex};
use crate::EditorConfig;
use serde::{Deserialize, Serialize};

// Wire field names follow the project encoding (camelCase, explicit
// isCurve flag) rather than the in-memory model; the doc structs below
// are the only place the two meet.

const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct VertexDoc {
    x: i32,
    y: i32,
    #[serde(rename = "isCurve", default)]
    is_curve: bool,
    #[serde(rename = "controlX", default, skip_serializing_if = "Option::is_none")]
    control_x: Option<i32>,
    #[serde(rename = "controlY", default, skip_serializing_if = "Option::is_none")]
    control_y: Option<i32>,
}

#[derive(Serialize, Deserialize)]
struct RegionDoc {
    id: String,
    vertices: Vec<VertexDoc>,
    #[serde(rename = "fillColor", default, skip_serializing_if = "Option::is_none")]
    fill_color: Option<String>,
    #[serde(rename = "fillOpacity", default, skip_serializing_if = "Option::is_none")]
    fill_opacity: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct BackgroundDoc {
    href: String,
    width: u32,
    height: u32,
}

#[derive(Serialize, Deserialize)]
struct CanvasSizeDoc {
    width: u32,
    height: u32,
}

#[derive(Serialize, Deserialize)]
struct ProjectDoc {
    #[serde(default)]
    version: Option<u32>,
    regions: Vec<RegionDoc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    background: Option<BackgroundDoc>,
    #[serde(rename = "canvasSize", default)]
    canvas_size: Option<CanvasSizeDoc>,
}

/// Lossless structured encoding of a snapshot, pretty-printed the way
/// project files are kept in version control.
pub fn to_project_json_impl(snap: &SceneSnapshot) -> String {
    let doc = ProjectDoc {
        version: Some(FORMAT_VERSION),
        regions: snap
            .regions
            .iter()
            .map(|r| RegionDoc {
                id: r.id.clone(),
                vertices: r
                    .vertices
                    .iter()
                    .map(|v| VertexDoc {
                        x: v.x,
                        y: v.y,
                        is_curve: v.is_curve(),
                        control_x: v.control.map(|(cx, _)| cx),
                        control_y: v.control.map(|(_, cy)| cy),
                    })
                    .collect(),
                fill_color: Some(r.fill_color.clone()),
                fill_opacity: Some(r.fill_opacity),
                label: r.label.clone(),
            })
            .collect(),
        background: snap.background.as_ref().map(|bg| BackgroundDoc {
            href: bg.href.clone(),
            width: bg.width,
            height: bg.height,
        }),
        canvas_size: Some(CanvasSizeDoc {
            width: snap.canvas_size.width,
            height: snap.canvas_size.height,
        }),
    };
    // Serializing plain doc structs cannot fail.
    serde_json::to_string_pretty(&doc).unwrap_or_default()
}

/// Strict inverse of `to_project_json_impl`. Structural problems and
/// invariant violations all abort with MalformedEncoding so a restore
/// is never partially applied; missing optional style fields fall back
/// to the caller's configured defaults instead of erroring.
pub fn from_project_json_impl(
    text: &str,
    config: &EditorConfig,
) -> Result<SceneSnapshot, EditError> {
    let doc: ProjectDoc =
        serde_json::from_str(text).map_err(|e| EditError::MalformedEncoding(e.to_string()))?;

    let mut regions = Vec::with_capacity(doc.regions.len());
    for rd in doc.regions {
        if rd.id.is_empty() {
            return Err(EditError::MalformedEncoding("region with empty id".into()));
        }
        if regions.iter().any(|r: &Region| r.id == rd.id) {
            return Err(EditError::MalformedEncoding(format!(
                "duplicate region id '{}'",
                rd.id
            )));
        }
        if rd.vertices.len() < 3 {
            return Err(EditError::MalformedEncoding(format!(
                "region '{}' has {} vertices (minimum 3)",
                rd.id,
                rd.vertices.len()
            )));
        }
        let mut vertices = Vec::with_capacity(rd.vertices.len());
        for vd in &rd.vertices {
            let control = if vd.is_curve {
                match (vd.control_x, vd.control_y) {
                    (Some(cx), Some(cy)) => Some((cx, cy)),
                    _ => {
                        return Err(EditError::MalformedEncoding(format!(
                            "curved vertex in region '{}' lacks control coordinates",
                            rd.id
                        )))
                    }
                }
            } else {
                // Stray control coords on a straight vertex are drift
                // from older writers; drop them.
                None
            };
            vertices.push(Vertex {
                x: vd.x,
                y: vd.y,
                control,
            });
        }
        regions.push(Region {
            id: rd.id,
            vertices,
            fill_color: rd
                .fill_color
                .unwrap_or_else(|| config.default_fill_color.clone()),
            fill_opacity: clamp01(rd.fill_opacity.unwrap_or(config.default_fill_opacity)),
            label: rd.label,
        });
    }

    Ok(SceneSnapshot {
        regions,
        background: doc.background.map(|bg| Background {
            href: bg.href,
            width: bg.width,
            height: bg.height,
        }),
        canvas_size: doc
            .canvas_size
            .map(|c| CanvasSize {
                width: c.width,
                height: c.height,
            })
            .unwrap_or_default(),
    })
}
