use crate::geometry::math::seg_distance_sq;
use crate::graph::WorldmapGraph;
use crate::hit_region::HitRegionHost;
use crate::model::{Rect, Vec2};
use crate::path::WorldmapPath;
use crate::{ControlHandle, Pick};

/// Squared distance from `p` to the closest point of `r`; zero inside.
fn rect_distance_sq(r: &Rect, p: Vec2) -> f32 {
    let dx = (r.position.x - p.x).max(p.x - (r.position.x + r.size.x)).max(0.0);
    let dy = (r.position.y - p.y).max(p.y - (r.position.y + r.size.y)).max(0.0);
    dx * dx + dy * dy
}

// Later nodes draw on top, so ties go to the higher index.
fn closest_node(rects: impl Iterator<Item = (usize, Rect)>, p: Vec2, tol2: f32) -> Option<Pick> {
    let mut best: Option<(usize, f32)> = None;
    for (i, r) in rects {
        let d2 = rect_distance_sq(&r, p);
        if d2 <= tol2 && best.map_or(true, |(_, bd)| d2 <= bd) {
            best = Some((i, d2));
        }
    }
    best.map(|(index, d2)| Pick::Node { index, dist: d2.sqrt() })
}

pub fn pick_graph<H: HitRegionHost>(g: &WorldmapGraph<H>, p: Vec2, tol: f32) -> Option<Pick> {
    let tol2 = tol * tol;
    // Nodes first
    let rects = (0..g.node_count()).filter_map(|i| g.node_rect(i).map(|r| (i, r)));
    if let Some(hit) = closest_node(rects, p, tol2) {
        return Some(hit);
    }
    // Connections
    let mut best: Option<(usize, f32, f32)> = None;
    for (i, c) in g.connections.records().enumerate() {
        let (Some(a), Some(b)) = (g.nodes.get(c.endpoints[0]), g.nodes.get(c.endpoints[1])) else {
            continue;
        };
        let (d2, t) = seg_distance_sq(p, a.position, b.position);
        if d2 <= tol2 && best.map_or(true, |(_, bd, _)| d2 < bd) {
            best = Some((i, d2, t));
        }
    }
    best.map(|(index, d2, t)| Pick::Connection {
        index,
        t,
        dist: d2.sqrt(),
    })
}

pub fn pick_path<H: HitRegionHost>(path: &WorldmapPath<H>, p: Vec2, tol: f32) -> Option<Pick> {
    let tol2 = tol * tol;
    // Control handles sit above the nodes
    let mut best: Option<(ControlHandle, f32)> = None;
    for &handle in path.visible_controls() {
        let Some(c) = path.control_point(handle) else {
            continue;
        };
        let d = p - c;
        let d2 = d.dot(d);
        if d2 <= tol2 && best.map_or(true, |(_, bd)| d2 < bd) {
            best = Some((handle, d2));
        }
    }
    if let Some((handle, d2)) = best {
        return Some(Pick::Control {
            handle,
            dist: d2.sqrt(),
        });
    }
    let rects = (0..path.node_count()).filter_map(|i| path.node_rect(i).map(|r| (i, r)));
    closest_node(rects, p, tol2)
}
