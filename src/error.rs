use thiserror::Error;

/// Recoverable failure conditions for model, session and decode
/// operations. None of these are fatal; every operation that returns
/// one leaves the scene exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// Operation requested from the wrong lifecycle phase: a region
    /// that does not exist, a draft operation without an open draft, or
    /// a gesture started from a state that does not allow it. Carries
    /// the offending id or a short description.
    #[error("operation not valid in the current state: {0}")]
    InvalidState(String),

    /// Vertex index outside `[0, count)`.
    #[error("vertex index {index} out of range for region '{id}' ({count} vertices)")]
    IndexOutOfRange {
        id: String,
        index: usize,
        count: usize,
    },

    /// Removing the vertex would drop the region below 3 vertices.
    /// Never auto-resolved: the caller decides between deleting the
    /// whole region or aborting.
    #[error("removing a vertex would leave region '{0}' with fewer than 3 vertices")]
    WouldInvalidateRegion(String),

    /// Rename target id is already taken by another region.
    #[error("region id '{0}' already exists")]
    DuplicateId(String),

    /// Project encoding could not be decoded; the active scene is left
    /// untouched.
    #[error("malformed project encoding: {0}")]
    MalformedEncoding(String),
}
