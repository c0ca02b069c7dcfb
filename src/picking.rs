use crate::geometry::math::project_point_to_segment;
use crate::model::{Vec2, Vertex};

/// Result of an edge-proximity query: the edge that came closest, the
/// projected point on it, and the index at which a new vertex would be
/// inserted to split that edge.
#[derive(Clone, Copy, Debug)]
pub struct EdgeHit {
    pub insert_index: usize,
    pub point: Vec2,
    pub dist: f32,
}

/// Scans all edges of the closed contour (edge `i` connects vertex `i`
/// to vertex `(i+1) % n`, including the implicit closing edge) and
/// returns the globally nearest one. Ties go to the first-encountered
/// edge, so results are deterministic in vertex-index order.
pub fn closest_edge(vertices: &[Vertex], p: Vec2) -> Option<EdgeHit> {
    if vertices.len() < 2 {
        return None;
    }
    let n = vertices.len();
    let mut best: Option<EdgeHit> = None;
    for i in 0..n {
        let a = vertices[i].pos();
        let b = vertices[(i + 1) % n].pos();
        let proj = project_point_to_segment(p, a, b);
        if best.map_or(true, |bst| proj.dist < bst.dist) {
            best = Some(EdgeHit {
                insert_index: i + 1,
                point: proj.point,
                dist: proj.dist,
            });
        }
    }
    best
}

/// Nearest vertex within `tol`, for handle hit-testing. Vertices win
/// over edges, so callers check this before `closest_edge`.
pub fn pick_vertex(vertices: &[Vertex], p: Vec2, tol: f32) -> Option<usize> {
    let tol2 = tol * tol;
    let mut best: Option<(usize, f32)> = None;
    for (i, v) in vertices.iter().enumerate() {
        let dx = v.x as f32 - p.x;
        let dy = v.y as f32 - p.y;
        let d2 = dx * dx + dy * dy;
        if d2 <= tol2 && best.map_or(true, |(_, bd)| d2 < bd) {
            best = Some((i, d2));
        }
    }
    best.map(|(i, _)| i)
}
