use crate::error::EditError;
use crate::model::SceneSnapshot;

/// Active tool. Modes gate which intents are meaningful; they carry no
/// drawing state of their own (that lives in `SessionState`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    CreateStraight,
    CreateCurved,
    Select,
    Pan,
}

/// Tagged interaction state. One enum instead of scattered boolean
/// flags, so every transition is explicit and impossible combinations
/// (drawing while dragging, for example) cannot be represented.
#[derive(Clone, Debug)]
pub enum SessionState {
    Idle,
    Drawing {
        region: String,
    },
    /// `before` is the pre-drag scene snapshot: cancelling mid-drag
    /// restores it exactly, and committing on release captures once
    /// for the whole drag.
    DraggingVertex {
        region: String,
        index: usize,
        before: SceneSnapshot,
    },
    /// Panning never mutates region data; it wraps whatever state was
    /// active and hands it back when the pan ends.
    Panning {
        resume: Box<SessionState>,
    },
}

/// Drawing-in-progress and selection state. Created once at startup,
/// mutated by every user-intent call, never serialized. Holds only id
/// references into the region model, never owning copies.
#[derive(Clone, Debug)]
pub struct EditSession {
    mode: Mode,
    state: SessionState,
    selected: Option<String>,
}

impl EditSession {
    pub fn new() -> Self {
        EditSession {
            mode: Mode::CreateStraight,
            state: SessionState::Idle,
            selected: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switching tools deselects but does not abort an open draft; the
    /// draft keeps accepting points (straight or curved per the new
    /// mode) until finalized or cancelled.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.selected = None;
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn select(&mut self, id: String) {
        self.selected = Some(id);
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, SessionState::Drawing { .. })
    }

    /// Id of the region under construction, if any.
    pub fn drawing_region(&self) -> Option<&str> {
        match &self.state {
            SessionState::Drawing { region } => Some(region),
            _ => None,
        }
    }

    // Transitions. Each returns InvalidState when called from a state
    // the table in the session design does not allow.

    pub fn begin_drawing(&mut self, region: String) -> Result<(), EditError> {
        match self.state {
            SessionState::Idle => {
                self.state = SessionState::Drawing { region };
                Ok(())
            }
            _ => Err(EditError::InvalidState(region)),
        }
    }

    pub fn end_drawing(&mut self) -> Result<String, EditError> {
        match std::mem::replace(&mut self.state, SessionState::Idle) {
            SessionState::Drawing { region } => Ok(region),
            other => {
                self.state = other;
                Err(EditError::InvalidState(String::new()))
            }
        }
    }

    pub fn begin_drag(
        &mut self,
        region: String,
        index: usize,
        before: SceneSnapshot,
    ) -> Result<(), EditError> {
        match self.state {
            SessionState::Idle => {
                self.state = SessionState::DraggingVertex {
                    region,
                    index,
                    before,
                };
                Ok(())
            }
            _ => Err(EditError::InvalidState(region)),
        }
    }

    pub fn dragging(&self) -> Option<(&str, usize)> {
        match &self.state {
            SessionState::DraggingVertex { region, index, .. } => Some((region, *index)),
            _ => None,
        }
    }

    /// Ends the drag, yielding the target and the pre-drag snapshot so
    /// the caller can either capture (release) or restore (cancel).
    pub fn end_drag(&mut self) -> Result<(String, usize, SceneSnapshot), EditError> {
        match std::mem::replace(&mut self.state, SessionState::Idle) {
            SessionState::DraggingVertex {
                region,
                index,
                before,
            } => Ok((region, index, before)),
            other => {
                self.state = other;
                Err(EditError::InvalidState(String::new()))
            }
        }
    }

    /// Any state may enter panning; the prior state is parked.
    pub fn begin_pan(&mut self) {
        let prev = std::mem::replace(&mut self.state, SessionState::Idle);
        self.state = SessionState::Panning {
            resume: Box::new(prev),
        };
    }

    /// Leaves panning, restoring whatever was active before. A no-op
    /// when not panning.
    pub fn end_pan(&mut self) {
        let cur = std::mem::replace(&mut self.state, SessionState::Idle);
        self.state = match cur {
            SessionState::Panning { resume } => *resume,
            other => other,
        };
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.state, SessionState::Panning { .. })
    }

    /// Drops any interaction state, keeping mode and selection. Used
    /// after a snapshot restore invalidates whatever was in flight.
    pub fn reset(&mut self) {
        self.state = SessionState::Idle;
    }
}

impl Default for EditSession {
    fn default() -> Self {
        EditSession::new()
    }
}
