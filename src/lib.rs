pub mod error;
pub mod geometry {
    pub mod math;
    pub mod tolerance;
}
pub mod history;
pub mod model;
pub mod picking;
pub mod scene;
pub mod session;
mod json;
mod svg;

pub use error::EditError;
pub use history::History;
pub use json::{from_project_json_impl as parse_project_json, to_project_json_impl as to_project_json};
pub use picking::{closest_edge, pick_vertex, EdgeHit};
pub use scene::{FinalizeOutcome, Scene};
pub use session::{EditSession, Mode, SessionState};
pub use svg::to_export_svg_impl as to_export_svg;

use log::{debug, error};
use model::{Background, SceneSnapshot, StylePatch, Vec2};
use serde::{Deserialize, Serialize};

/// Caller-tunable constants. Everything here has a sensible default;
/// hosts that expose these as settings persist and hand back a config.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Fill color for freshly created regions and for decoded regions
    /// whose encoding omitted one.
    pub default_fill_color: String,
    /// Fill opacity counterpart, clamped to [0, 1] on use.
    pub default_fill_opacity: f32,
    /// Edge-proximity gate for vertex insertion, in model units.
    pub edge_insert_threshold: f32,
    /// Hit radius for vertex handles.
    pub vertex_pick_radius: f32,
    /// History depth; 0 keeps every snapshot.
    pub max_history: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            default_fill_color: "#cccccc".to_string(),
            default_fill_opacity: 0.5,
            edge_insert_threshold: 28.0,
            vertex_pick_radius: 6.0,
            max_history: 0,
        }
    }
}

/// The whole editor core as one explicit value: `Scene`, `EditSession`
/// and `History` wired together behind intent methods. Hosts translate
/// pointer and keyboard events into these intents; nothing here blocks
/// or performs I/O, and every call runs to completion before the next
/// is accepted.
///
/// History captures happen here, at operation boundaries, exactly once
/// per committed logical edit. In particular a vertex drag captures
/// once, on release.
pub struct EditorContext {
    config: EditorConfig,
    scene: Scene,
    session: EditSession,
    history: History,
}

impl EditorContext {
    pub fn new(config: EditorConfig) -> Self {
        let scene = Scene::new();
        let mut history = History::new(config.max_history);
        // Baseline entry so the first edit can be undone back to an
        // empty scene.
        if let Err(e) = history.capture(&scene.snapshot()) {
            error!("initial snapshot capture failed: {e}");
        }
        EditorContext {
            config,
            scene,
            session: EditSession::new(),
            history,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    fn commit(&mut self) -> Result<(), EditError> {
        self.history.capture(&self.scene.snapshot())
    }

    // Mode & selection

    pub fn set_mode(&mut self, mode: Mode) {
        self.session.set_mode(mode);
    }

    pub fn select_region(&mut self, id: &str) -> Result<(), EditError> {
        if self.scene.region(id).is_none() {
            return Err(EditError::InvalidState(id.to_string()));
        }
        self.session.select(id.to_string());
        Ok(())
    }

    pub fn deselect(&mut self) {
        self.session.deselect();
    }

    // Drawing intents

    /// Begin-shape intent: opens a draft with its first vertex. Only
    /// meaningful in a drawing mode.
    pub fn begin_region(&mut self, p: Vec2) -> Result<String, EditError> {
        if !matches!(self.session.mode(), Mode::CreateStraight | Mode::CreateCurved) {
            return Err(EditError::InvalidState("not in a drawing mode".to_string()));
        }
        let id = self.scene.create_region(
            p,
            self.config.default_fill_color.clone(),
            self.config.default_fill_opacity,
        )?;
        self.session.begin_drawing(id.clone())?;
        Ok(id)
    }

    /// Point intent while drawing: appends a straight vertex.
    pub fn add_point(&mut self, p: Vec2) -> Result<(), EditError> {
        let id = self.drawing_id()?;
        self.scene.append_vertex(&id, p, None)
    }

    /// Point intent with a quadratic control point (curved-mode drag).
    pub fn add_curve_point(&mut self, p: Vec2, control: Vec2) -> Result<(), EditError> {
        let id = self.drawing_id()?;
        self.scene.append_vertex(&id, p, Some(control))
    }

    /// Escape/back intent. While drawing, pops the last vertex and
    /// cancels the draft once empty; otherwise clears the selection.
    pub fn back(&mut self) -> Result<(), EditError> {
        if let Some(id) = self.session.drawing_region().map(str::to_string) {
            let remaining = self.scene.pop_vertex(&id)?;
            if remaining == 0 {
                self.scene.cancel_region(&id)?;
                self.session.end_drawing()?;
            }
            return Ok(());
        }
        self.session.deselect();
        Ok(())
    }

    /// Finalize intent: commits the draft, or discards it below the
    /// 3-vertex floor. Only a commit produces a history entry; a
    /// discarded attempt leaves no trace in model or history.
    pub fn finalize_region(&mut self) -> Result<FinalizeOutcome, EditError> {
        let id = self.drawing_id()?;
        let outcome = self.scene.finalize_region(&id)?;
        self.session.end_drawing()?;
        if outcome == FinalizeOutcome::Committed {
            debug!("committed region {id}");
            self.commit()?;
        }
        Ok(outcome)
    }

    /// Cancel intent: abandons the draft at any vertex count.
    pub fn cancel_region(&mut self) -> Result<(), EditError> {
        let id = self.drawing_id()?;
        self.scene.cancel_region(&id)?;
        self.session.end_drawing()?;
        Ok(())
    }

    // Vertex editing on the selected region

    /// Handle hit-test at `p` on the selected region.
    pub fn pick_vertex_at(&self, p: Vec2) -> Option<usize> {
        let region = self.scene.region(self.session.selected()?)?;
        picking::pick_vertex(&region.vertices, p, self.config.vertex_pick_radius)
    }

    /// Where an insert intent at `p` would land, for hover preview.
    /// None when the nearest edge is beyond the insert threshold.
    pub fn preview_edge_insert(&self, p: Vec2) -> Option<EdgeHit> {
        let region = self.scene.region(self.session.selected()?)?;
        picking::closest_edge(&region.vertices, p)
            .filter(|hit| hit.dist < self.config.edge_insert_threshold)
    }

    pub fn begin_vertex_drag(&mut self, index: usize) -> Result<(), EditError> {
        let id = self.selected_id()?;
        let count = match self.scene.region(&id) {
            Some(r) => r.vertices.len(),
            None => return Err(EditError::InvalidState(id)),
        };
        if index >= count {
            return Err(EditError::IndexOutOfRange { id, index, count });
        }
        // The pre-drag snapshot makes cancel exact and keeps the
        // intermediate moves out of history.
        let before = self.scene.snapshot();
        self.session.begin_drag(id, index, before)
    }

    pub fn drag_vertex(&mut self, p: Vec2) -> Result<(), EditError> {
        let (id, index) = match self.session.dragging() {
            Some((id, index)) => (id.to_string(), index),
            None => return Err(EditError::InvalidState("no drag in progress".to_string())),
        };
        self.scene.move_vertex(&id, index, p)
    }

    /// Release intent: ends the drag and captures exactly once for the
    /// whole gesture.
    pub fn end_vertex_drag(&mut self) -> Result<(), EditError> {
        self.session.end_drag()?;
        self.commit()
    }

    /// Aborts the drag, restoring pre-drag coordinates exactly. No
    /// history entry is produced.
    pub fn cancel_vertex_drag(&mut self) -> Result<(), EditError> {
        let (_, _, before) = self.session.end_drag()?;
        self.scene.restore(&before);
        Ok(())
    }

    pub fn insert_vertex_near(&mut self, p: Vec2) -> Result<Option<usize>, EditError> {
        let id = self.selected_id()?;
        let inserted = self
            .scene
            .insert_vertex_near(&id, p, self.config.edge_insert_threshold)?;
        if inserted.is_some() {
            self.commit()?;
        }
        Ok(inserted)
    }

    /// Vertex removal. A `WouldInvalidateRegion` failure is surfaced
    /// untouched: deleting the whole region instead is the caller's
    /// explicit decision, never this core's.
    pub fn remove_vertex(&mut self, index: usize) -> Result<(), EditError> {
        let id = self.selected_id()?;
        self.scene.remove_vertex(&id, index)?;
        self.commit()
    }

    // Region-level edits

    pub fn delete_region(&mut self, id: &str) -> Result<(), EditError> {
        self.scene.delete_region(id)?;
        if self.session.selected() == Some(id) {
            self.session.deselect();
        }
        self.commit()
    }

    pub fn rename_region(&mut self, old_id: &str, new_id: &str) -> Result<(), EditError> {
        self.scene.rename_region(old_id, new_id)?;
        if self.session.selected() == Some(old_id) {
            self.session.select(new_id.to_string());
        }
        self.commit()
    }

    /// Style patch on the selected region.
    pub fn set_style(&mut self, patch: StylePatch) -> Result<(), EditError> {
        let id = self.selected_id()?;
        self.scene.set_style(&id, patch)?;
        self.commit()
    }

    pub fn set_background(&mut self, background: Option<Background>) -> Result<(), EditError> {
        self.scene.set_background(background);
        self.commit()
    }

    pub fn set_canvas_size(&mut self, width: u32, height: u32) -> Result<(), EditError> {
        self.scene.set_canvas_size(width, height);
        self.commit()
    }

    // Panning is view-only: it never touches region data or history.

    pub fn begin_pan(&mut self) {
        self.session.begin_pan();
    }

    pub fn end_pan(&mut self) {
        self.session.end_pan();
    }

    // History

    /// Steps back one snapshot. Returns false when at the baseline.
    pub fn undo(&mut self) -> Result<bool, EditError> {
        match self.history.undo()? {
            Some(snap) => {
                self.restore_snapshot(&snap);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Steps forward one snapshot. Returns false at the tail.
    pub fn redo(&mut self) -> Result<bool, EditError> {
        match self.history.redo()? {
            Some(snap) => {
                self.restore_snapshot(&snap);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn restore_snapshot(&mut self, snap: &SceneSnapshot) {
        self.scene.restore(snap);
        // Whatever was in flight (draft, drag) is gone with the old
        // scene, and the selection may point at a vanished id.
        self.session.reset();
        self.session.deselect();
    }

    // Serialization surfaces

    /// Canonical export markup for the current committed scene.
    pub fn export_svg(&self, include_background: bool) -> String {
        let snap = self.scene.snapshot();
        let size = self.scene.canvas_size();
        let background = if include_background {
            snap.background.clone()
        } else {
            None
        };
        svg::to_export_svg_impl(&snap, size.width, size.height, background.as_ref())
    }

    /// Lossless project encoding of the current committed scene.
    pub fn save_project(&self) -> String {
        json::to_project_json_impl(&self.scene.snapshot())
    }

    /// All-or-nothing restore from a project encoding. On decode
    /// failure the active scene is untouched; on success the loaded
    /// state becomes a new history entry.
    pub fn load_project(&mut self, text: &str) -> Result<(), EditError> {
        let snap = json::from_project_json_impl(text, &self.config)?;
        self.restore_snapshot(&snap);
        self.commit()
    }

    fn drawing_id(&self) -> Result<String, EditError> {
        self.session
            .drawing_region()
            .map(str::to_string)
            .ok_or_else(|| EditError::InvalidState("no region under construction".to_string()))
    }

    fn selected_id(&self) -> Result<String, EditError> {
        self.session
            .selected()
            .map(str::to_string)
            .ok_or_else(|| EditError::InvalidState("no region selected".to_string()))
    }
}

impl Default for EditorContext {
    fn default() -> Self {
        EditorContext::new(EditorConfig::default())
    }
}
