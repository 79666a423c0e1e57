//! Waypoint simplification.

use glam::Vec2;

/// Interior waypoints whose incoming and outgoing directions have a dot
/// product at or above this are dropped.
pub const COLLINEAR_DOT: f32 = 0.9;

/// Drop near-collinear interior waypoints until none remain. The first and
/// last waypoints are always kept, so the result is a fixed point: simplifying
/// it again returns it unchanged.
pub fn simplify_path(path: &[Vec2]) -> Vec<Vec2> {
    let mut current = path.to_vec();
    loop {
        let next = simplify_once(&current);
        if next.len() == current.len() {
            return next;
        }
        current = next;
    }
}

fn simplify_once(path: &[Vec2]) -> Vec<Vec2> {
    if path.len() < 3 {
        return path.to_vec();
    }
    let mut kept = Vec::with_capacity(path.len());
    kept.push(path[0]);
    for window in path.windows(3) {
        let incoming = (window[1] - window[0]).normalize_or_zero();
        let outgoing = (window[2] - window[1]).normalize_or_zero();
        if incoming.dot(outgoing) < COLLINEAR_DOT {
            kept.push(window[1]);
        }
    }
    kept.push(path[path.len() - 1]);
    kept
}
