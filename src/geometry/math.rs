use super::tolerance::{clamp01, EPS_LEN};
use crate::model::Vec2;

/// Closest point on a segment plus the Euclidean distance to it.
#[derive(Clone, Copy, Debug)]
pub struct Projection {
    pub point: Vec2,
    pub dist: f32,
}

/// Projects `p` onto segment `[a, b]` with the parametric t clamped to
/// [0, 1]. A degenerate segment (a == b) projects onto `a`. Pure and
/// total for finite inputs.
pub fn project_point_to_segment(p: Vec2, a: Vec2, b: Vec2) -> Projection {
    let vx = b.x - a.x;
    let vy = b.y - a.y;
    let l2 = vx * vx + vy * vy;
    if l2 <= EPS_LEN {
        let dx = p.x - a.x;
        let dy = p.y - a.y;
        return Projection {
            point: a,
            dist: (dx * dx + dy * dy).sqrt(),
        };
    }
    let t = clamp01(((p.x - a.x) * vx + (p.y - a.y) * vy) / l2);
    let point = Vec2 {
        x: a.x + t * vx,
        y: a.y + t * vy,
    };
    let dx = p.x - point.x;
    let dy = p.y - point.y;
    Projection {
        point,
        dist: (dx * dx + dy * dy).sqrt(),
    }
}
