use crate::error::EditError;
use crate::geometry::tolerance::clamp01;
use crate::model::{Background, CanvasSize, Region, SceneSnapshot, StylePatch, Vec2, Vertex};
use crate::picking;
use log::debug;

/// What `finalize_region` did with the draft.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FinalizeOutcome {
    /// The draft had >= 3 vertices and is now a committed region.
    Committed,
    /// The draft was below the 3-vertex floor and has been discarded.
    Cancelled,
}

/// The region model: exclusive owner of all committed region data plus
/// at most one draft region under construction. Every mutating
/// operation either succeeds completely or fails without touching the
/// scene; history capture is the caller's responsibility, which keeps
/// the model testable without a history dependency.
#[derive(Clone, Debug)]
pub struct Scene {
    regions: Vec<Region>,
    draft: Option<Region>,
    background: Option<Background>,
    canvas_size: CanvasSize,
    next_seq: u32,
}

impl Scene {
    pub fn new() -> Self {
        Scene {
            regions: Vec::new(),
            draft: None,
            background: None,
            canvas_size: CanvasSize::default(),
            next_seq: 1,
        }
    }

    // Accessors

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn region(&self, id: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.id == id)
    }

    pub fn draft(&self) -> Option<&Region> {
        self.draft.as_ref()
    }

    pub fn background(&self) -> Option<&Background> {
        self.background.as_ref()
    }

    pub fn canvas_size(&self) -> CanvasSize {
        self.canvas_size
    }

    fn id_in_use(&self, id: &str) -> bool {
        self.regions.iter().any(|r| r.id == id)
            || self.draft.as_ref().map_or(false, |d| d.id == id)
    }

    /// Allocates `Area_<n>` with the smallest unused suffix at or above
    /// the session counter. The counter only moves forward, so ids of
    /// deleted regions are not reused within a session; `clear` resets.
    fn alloc_id(&mut self) -> String {
        loop {
            let id = format!("Area_{}", self.next_seq);
            self.next_seq += 1;
            if !self.id_in_use(&id) {
                return id;
            }
        }
    }

    // Construction lifecycle

    /// Opens a new draft region with a single vertex at `p`. Fails if
    /// another draft is already open. The region is not part of the
    /// committed set (and not valid for export) until finalized.
    pub fn create_region(
        &mut self,
        p: Vec2,
        fill_color: String,
        fill_opacity: f32,
    ) -> Result<String, EditError> {
        if let Some(d) = &self.draft {
            return Err(EditError::InvalidState(d.id.clone()));
        }
        let id = self.alloc_id();
        self.draft = Some(Region {
            id: id.clone(),
            vertices: vec![Vertex::straight(p)],
            fill_color,
            fill_opacity: clamp01(fill_opacity),
            label: None,
        });
        Ok(id)
    }

    /// Appends a vertex to the open draft. `control` makes it the
    /// endpoint of a quadratic curve segment.
    pub fn append_vertex(
        &mut self,
        id: &str,
        p: Vec2,
        control: Option<Vec2>,
    ) -> Result<(), EditError> {
        let draft = self.draft_mut(id)?;
        let v = match control {
            Some(c) => Vertex::curved(p, c),
            None => Vertex::straight(p),
        };
        draft.vertices.push(v);
        Ok(())
    }

    /// Removes the most recently added draft vertex (back/escape while
    /// drawing). Returns the remaining count; the caller cancels the
    /// draft when it reaches zero.
    pub fn pop_vertex(&mut self, id: &str) -> Result<usize, EditError> {
        let draft = self.draft_mut(id)?;
        draft.vertices.pop();
        Ok(draft.vertices.len())
    }

    /// Commits the draft if it has at least 3 vertices; otherwise the
    /// draft is discarded entirely. The 3-vertex floor is hard: no
    /// sub-triangle region ever enters the committed set.
    pub fn finalize_region(&mut self, id: &str) -> Result<FinalizeOutcome, EditError> {
        match self.draft.take() {
            Some(draft) if draft.id == id => {
                if draft.vertices.len() < 3 {
                    debug!(
                        "discarding draft {} with {} vertices",
                        draft.id,
                        draft.vertices.len()
                    );
                    return Ok(FinalizeOutcome::Cancelled);
                }
                self.regions.push(draft);
                Ok(FinalizeOutcome::Committed)
            }
            other => {
                self.draft = other;
                Err(EditError::InvalidState(id.to_string()))
            }
        }
    }

    /// Abandons the draft with no partial commit.
    pub fn cancel_region(&mut self, id: &str) -> Result<(), EditError> {
        self.draft_mut(id)?;
        self.draft = None;
        Ok(())
    }

    // Committed-region operations

    /// Moves a vertex, rounding to integer coordinates.
    pub fn move_vertex(&mut self, id: &str, index: usize, p: Vec2) -> Result<(), EditError> {
        let region = self.region_mut(id)?;
        let count = region.vertices.len();
        let v = region
            .vertices
            .get_mut(index)
            .ok_or_else(|| EditError::IndexOutOfRange {
                id: id.to_string(),
                index,
                count,
            })?;
        v.x = p.x.round() as i32;
        v.y = p.y.round() as i32;
        Ok(())
    }

    /// Removes a vertex, refusing (without mutating) when that would
    /// drop the region below 3 vertices. The caller decides whether to
    /// delete the whole region instead.
    pub fn remove_vertex(&mut self, id: &str, index: usize) -> Result<(), EditError> {
        let region = self.region_mut(id)?;
        let count = region.vertices.len();
        if index >= count {
            return Err(EditError::IndexOutOfRange {
                id: id.to_string(),
                index,
                count,
            });
        }
        if count <= 3 {
            return Err(EditError::WouldInvalidateRegion(id.to_string()));
        }
        region.vertices.remove(index);
        Ok(())
    }

    /// Splits the nearest edge with a new straight vertex at the
    /// projected point, but only when that edge is closer than
    /// `threshold`. Returns the insertion index, or None for the
    /// beyond-threshold no-op.
    pub fn insert_vertex_near(
        &mut self,
        id: &str,
        p: Vec2,
        threshold: f32,
    ) -> Result<Option<usize>, EditError> {
        let region = self.region_mut(id)?;
        let hit = match picking::closest_edge(&region.vertices, p) {
            Some(h) if h.dist < threshold => h,
            _ => return Ok(None),
        };
        region
            .vertices
            .insert(hit.insert_index, Vertex::straight(hit.point));
        Ok(Some(hit.insert_index))
    }

    /// Atomically rekeys a region, preserving vertex order and style.
    pub fn rename_region(&mut self, old_id: &str, new_id: &str) -> Result<(), EditError> {
        if new_id != old_id && self.id_in_use(new_id) {
            return Err(EditError::DuplicateId(new_id.to_string()));
        }
        let region = self.region_mut(old_id)?;
        region.id = new_id.to_string();
        Ok(())
    }

    pub fn delete_region(&mut self, id: &str) -> Result<(), EditError> {
        let idx = self
            .regions
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| EditError::InvalidState(id.to_string()))?;
        self.regions.remove(idx);
        Ok(())
    }

    /// Partial style update; unspecified fields are left unchanged.
    pub fn set_style(&mut self, id: &str, patch: StylePatch) -> Result<(), EditError> {
        let region = self.region_mut(id)?;
        if let Some(c) = patch.fill_color {
            region.fill_color = c;
        }
        if let Some(o) = patch.fill_opacity {
            region.fill_opacity = clamp01(o);
        }
        if let Some(l) = patch.label {
            region.label = Some(l);
        }
        Ok(())
    }

    // Background / canvas

    pub fn set_background(&mut self, background: Option<Background>) {
        self.background = background;
    }

    pub fn set_canvas_size(&mut self, width: u32, height: u32) {
        self.canvas_size = CanvasSize { width, height };
    }

    // Snapshot / restore

    /// Fully self-contained copy of the committed scene. Drafts are
    /// construction-time state and never appear in snapshots.
    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            regions: self.regions.clone(),
            background: self.background.clone(),
            canvas_size: self.canvas_size,
        }
    }

    /// Replaces the scene with `snap`, dropping any draft. The id
    /// counter is not rewound; `alloc_id` skips whatever the restored
    /// scene contains.
    pub fn restore(&mut self, snap: &SceneSnapshot) {
        debug!("restoring scene with {} regions", snap.regions.len());
        self.regions = snap.regions.clone();
        self.background = snap.background.clone();
        self.canvas_size = snap.canvas_size;
        self.draft = None;
    }

    /// Drops all regions, the draft and the background, and resets the
    /// id counter (the one explicit reset of the `Area_<n>` sequence).
    pub fn clear(&mut self) {
        self.regions.clear();
        self.draft = None;
        self.background = None;
        self.next_seq = 1;
    }

    // Lookup helpers. "Absent" and "wrong lifecycle phase" both surface
    // as InvalidState.

    fn region_mut(&mut self, id: &str) -> Result<&mut Region, EditError> {
        self.regions
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| EditError::InvalidState(id.to_string()))
    }

    fn draft_mut(&mut self, id: &str) -> Result<&mut Region, EditError> {
        match self.draft.as_mut() {
            Some(d) if d.id == id => Ok(d),
            _ => Err(EditError::InvalidState(id.to_string())),
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Scene::new()
    }
}
