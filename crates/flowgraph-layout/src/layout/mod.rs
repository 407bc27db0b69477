//! The layered layout pipeline
//!
//! Five stages run in a fixed order on every call: cycle normalization,
//! layer assignment, crossing reduction, coordinate assignment, and edge
//! routing. Every stage is deterministic, so identical inputs always yield
//! identical output.

mod acyclic;
mod ordering;
mod placement;
mod ranking;
mod routing;

use std::collections::{HashMap, HashSet};
use tracing::{debug, span, Level};

use crate::core::{
    EdgePath, FlowGraph, LayoutError, LayoutResult, Point, Rect, Size, VertexId,
};

use acyclic::DagView;
use ordering::{order_layers, ORDERING_SWEEPS};
use placement::place;
use ranking::{build_layers, rank};
use routing::route;

/// Spacing knobs for the layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Horizontal gap between adjacent boxes in a rank
    pub node_sep: f64,
    /// Vertical gap between adjacent rank bands
    pub rank_sep: f64,
    /// Margin added on all four sides of the bounding rectangle
    pub padding: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_sep: 30.0,
            rank_sep: 50.0,
            padding: 20.0,
        }
    }
}

/// The layout engine
///
/// Stateless apart from its configuration: every [`layout`](Self::layout)
/// call computes a fresh result from scratch and nothing carries over
/// between calls.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    /// Create an engine with default spacing
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with explicit spacing
    pub fn with_config(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// The engine's configuration
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lay out a control-flow graph.
    ///
    /// `vertices` is the full vertex set, `edges` the directed edge list
    /// (duplicates meaningful), `sizes` the caller-measured box size per
    /// vertex, and `root` the function entry that anchors rank 0.
    ///
    /// If the inputs are not yet complete, meaning the root or an edge
    /// endpoint is not in the vertex set, the call succeeds with
    /// [`LayoutResult::empty`]. A vertex without a size entry is a hard
    /// [`LayoutError::MissingSize`].
    pub fn layout(
        &self,
        vertices: &[VertexId],
        edges: &[(VertexId, VertexId)],
        sizes: &HashMap<VertexId, Size>,
        root: VertexId,
    ) -> Result<LayoutResult, LayoutError> {
        let layout_span = span!(
            Level::INFO,
            "layout",
            vertices = vertices.len(),
            edges = edges.len()
        );
        let _enter = layout_span.enter();

        // Readiness check: a graph still being populated refers to vertices
        // it has not delivered yet. Not an error, just nothing to draw.
        let known: HashSet<VertexId> = vertices.iter().copied().collect();
        let ready = known.contains(&root)
            && edges
                .iter()
                .all(|&(from, to)| known.contains(&from) && known.contains(&to));
        if !ready {
            debug!("Inputs incomplete, returning empty layout");
            return Ok(LayoutResult::empty());
        }

        let graph = FlowGraph::build(vertices, edges);
        let root_idx = graph
            .index_of(root)
            .ok_or_else(|| LayoutError::unknown_vertex(root))?;

        let mut size_vec = Vec::with_capacity(graph.vertex_count());
        for &id in graph.vertices() {
            match sizes.get(&id) {
                Some(&size) => size_vec.push(size),
                None => return Err(LayoutError::missing_size(id)),
            }
        }

        let dag = DagView::build(&graph, root_idx);
        let ranks = rank(&graph, &dag)?;
        let mut layers = build_layers(&ranks, &dag);
        order_layers(&dag, &mut layers, ORDERING_SWEEPS);
        let placement = place(&layers, &size_vec, &self.config);
        let paths = route(&graph, &ranks, &placement, &size_vec);

        // Output boundary: center coordinates become top-left corners.
        let mut positions = HashMap::with_capacity(graph.vertex_count());
        for v in 0..graph.vertex_count() {
            let center = placement.centers[v];
            let size = size_vec[v];
            positions.insert(
                graph.id_of(v),
                Point::new(center.x - size.width / 2.0, center.y - size.height / 2.0),
            );
        }
        debug_assert_eq!(
            positions.len(),
            graph.vertex_count(),
            "every vertex must receive a position"
        );

        let bounds = self.bounds(&graph, &positions, &size_vec, &paths);

        debug!(
            width = bounds.width,
            height = bounds.height,
            "Layout completed"
        );

        Ok(LayoutResult {
            positions,
            edges: paths,
            bounds,
        })
    }

    /// Bounding rectangle of all boxes and route points, padded on all
    /// sides. Callers early-return on empty input, so at least one vertex
    /// exists here.
    fn bounds(
        &self,
        graph: &FlowGraph,
        positions: &HashMap<VertexId, Point>,
        sizes: &[Size],
        paths: &[EdgePath],
    ) -> Rect {
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;

        for v in 0..graph.vertex_count() {
            let pos = positions[&graph.id_of(v)];
            let size = sizes[v];
            min_x = min_x.min(pos.x);
            min_y = min_y.min(pos.y);
            max_x = max_x.max(pos.x + size.width);
            max_y = max_y.max(pos.y + size.height);
        }
        for path in paths {
            for p in &path.points {
                min_x = min_x.min(p.x);
                min_y = min_y.min(p.y);
                max_x = max_x.max(p.x);
                max_y = max_y.max(p.y);
            }
        }

        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y).expanded(self.config.padding)
    }
}
