//! Edge routing
//!
//! Converts each input edge into a polyline in its true direction; the
//! reversed-for-ranking marks never leak into routes. A route starts at the
//! source box's bottom-center, ends at the destination box's top-center,
//! and places one bend on the vertical mid-line of every rank band the edge
//! passes over, with x interpolated linearly between the endpoints. Back
//! edges simply run upward through the same construction.
//!
//! The entry angle at the destination is taken from the last segment, for
//! arrowhead orientation.

use tracing::debug;

use crate::core::{EdgePath, FlowGraph, Point, Size};

use super::placement::Placement;

/// Route every edge of the graph, in input edge order.
///
/// `ranks`, `placement` and `sizes` are indexed by dense vertex index.
pub fn route(
    graph: &FlowGraph,
    ranks: &[usize],
    placement: &Placement,
    sizes: &[Size],
) -> Vec<EdgePath> {
    let mut paths = Vec::with_capacity(graph.edge_count());
    for e in 0..graph.edge_count() {
        let (from, to) = graph.edge(e);
        paths.push(route_edge(graph, ranks, placement, sizes, from, to));
    }
    debug!(routed = paths.len(), "Edge routing completed");
    paths
}

fn route_edge(
    graph: &FlowGraph,
    ranks: &[usize],
    placement: &Placement,
    sizes: &[Size],
    from: usize,
    to: usize,
) -> EdgePath {
    let start = Point::new(
        placement.centers[from].x,
        placement.centers[from].y + sizes[from].height / 2.0,
    );
    let end = Point::new(
        placement.centers[to].x,
        placement.centers[to].y - sizes[to].height / 2.0,
    );

    // Rank bands strictly between the endpoints, in drawing order. A self
    // loop has none and degenerates to a two-point route.
    let (rf, rt) = (ranks[from], ranks[to]);
    let between: Vec<usize> = if rf < rt {
        ((rf + 1)..rt).collect()
    } else {
        ((rt + 1)..rf).rev().collect()
    };

    let segments = (between.len() + 1) as f64;
    let mut points = Vec::with_capacity(between.len() + 2);
    points.push(start);
    for (i, r) in between.iter().enumerate() {
        let t = (i + 1) as f64 / segments;
        points.push(Point::new(
            start.x + t * (end.x - start.x),
            placement.bands[*r].mid(),
        ));
    }
    points.push(end);

    let prev = points[points.len() - 2];
    let head_angle = (end.y - prev.y).atan2(end.x - prev.x);

    EdgePath {
        from: graph.id_of(from),
        to: graph.id_of(to),
        points,
        head_angle,
    }
}
