use serde::{Deserialize, Serialize};

/// Working-space point used by the geometry kernel and intent APIs.
/// Model coordinates are stored as integers; `Vec2` carries the
/// unrounded pointer position up to the moment of a write.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }
}

/// One contour point. `control` is present iff this vertex is reached
/// by a quadratic curve segment from its predecessor; the invariant
/// from the data model (control coordinates iff curved) is carried by
/// the type rather than a separate flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vertex {
    pub x: i32,
    pub y: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control: Option<(i32, i32)>,
}

impl Vertex {
    /// Straight vertex, rounding to the integer grid.
    pub fn straight(p: Vec2) -> Self {
        Vertex {
            x: p.x.round() as i32,
            y: p.y.round() as i32,
            control: None,
        }
    }

    /// Curved vertex with a single quadratic control point.
    pub fn curved(p: Vec2, control: Vec2) -> Self {
        Vertex {
            x: p.x.round() as i32,
            y: p.y.round() as i32,
            control: Some((control.x.round() as i32, control.y.round() as i32)),
        }
    }

    pub fn is_curve(&self) -> bool {
        self.control.is_some()
    }

    pub fn pos(&self) -> Vec2 {
        Vec2 {
            x: self.x as f32,
            y: self.y as f32,
        }
    }
}

/// A closed, fillable contour. `vertices` order defines the contour;
/// the segment from the last vertex back to the first is implicit.
/// Committed regions always hold at least 3 vertices.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    pub vertices: Vec<Vertex>,
    pub fill_color: String,
    pub fill_opacity: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Region {
    pub fn has_curves(&self) -> bool {
        self.vertices.iter().any(|v| v.is_curve())
    }
}

/// Reference image the regions are traced over. `href` is an opaque
/// data reference (e.g. a data URL); decoding is the host's problem.
/// `width`/`height` are the image's native pixel dimensions and define
/// the export coordinate space when a background is included.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Background {
    pub href: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasSize {
    fn default() -> Self {
        CanvasSize {
            width: 800,
            height: 600,
        }
    }
}

/// Fully self-contained copy of scene state: the unit of undo/redo and
/// of project persistence. Holds no references back into live editor
/// state, so replaying it can never alias the working model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub regions: Vec<Region>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Background>,
    pub canvas_size: CanvasSize,
}

impl SceneSnapshot {
    pub fn empty() -> Self {
        SceneSnapshot {
            regions: Vec::new(),
            background: None,
            canvas_size: CanvasSize::default(),
        }
    }
}

/// Partial style update; `None` fields are left unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StylePatch {
    pub fill_color: Option<String>,
    pub fill_opacity: Option<f32>,
    pub label: Option<String>,
}

impl StylePatch {
    pub fn color(c: impl Into<String>) -> Self {
        StylePatch {
            fill_color: Some(c.into()),
            ..Default::default()
        }
    }

    pub fn opacity(o: f32) -> Self {
        StylePatch {
            fill_opacity: Some(o),
            ..Default::default()
        }
    }

    pub fn label(l: impl Into<String>) -> Self {
        StylePatch {
            label: Some(l.into()),
            ..Default::default()
        }
    }
}
