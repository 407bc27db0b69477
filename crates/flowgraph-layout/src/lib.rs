//! Layered layout for control-flow graphs
//!
//! Computes box positions and edge routes for a directed graph with a
//! designated entry vertex, using the classic layered (Sugiyama) approach:
//! cycles are normalized by reversing back edges for ranking only, vertices
//! are assigned to horizontal ranks by longest path, crossings are reduced
//! with barycenter sweeps, coordinates are packed left to right, and edges
//! are routed as polylines in their true direction.
//!
//! The engine is pure: it never draws, measures text, or retains state
//! between calls. Callers measure their boxes, hand over identities, edges
//! and sizes, and get back top-left positions, routed edge paths and a
//! padded bounding rectangle. Identical inputs always produce identical
//! output.
//!
//! # Quick start
//!
//! ```
//! use std::collections::HashMap;
//! use flowgraph_layout::{LayoutEngine, Size, VertexId};
//!
//! let vertices = vec![VertexId(0x1000), VertexId(0x1010), VertexId(0x1020)];
//! let edges = vec![
//!     (VertexId(0x1000), VertexId(0x1010)),
//!     (VertexId(0x1000), VertexId(0x1020)),
//! ];
//! let sizes: HashMap<_, _> = vertices
//!     .iter()
//!     .map(|&v| (v, Size::new(120.0, 40.0)))
//!     .collect();
//!
//! let result = LayoutEngine::new().layout(&vertices, &edges, &sizes, VertexId(0x1000))?;
//! assert_eq!(result.positions.len(), 3);
//! assert_eq!(result.edges.len(), 2);
//! # Ok::<(), flowgraph_layout::LayoutError>(())
//! ```

pub mod core;
pub mod layout;

pub use self::core::{
    EdgePath, FlowGraph, LayoutError, LayoutResult, Point, Rect, Size, VertexId,
};
pub use self::layout::{LayoutConfig, LayoutEngine};

use std::collections::HashMap;

/// Lay out a graph with default spacing.
///
/// Convenience wrapper over [`LayoutEngine::layout`]; build an engine with
/// [`LayoutEngine::with_config`] to control spacing.
pub fn layout(
    vertices: &[VertexId],
    edges: &[(VertexId, VertexId)],
    sizes: &HashMap<VertexId, Size>,
    root: VertexId,
) -> Result<LayoutResult, LayoutError> {
    LayoutEngine::new().layout(vertices, edges, sizes, root)
}
