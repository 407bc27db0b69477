//! Directed graph container for the layout pipeline
//!
//! A dumb container over vertex identities and directed edges with
//! precomputed adjacency lists. The vertex set is the union of explicitly
//! supplied ids and every id appearing in an edge, so construction is total;
//! duplicate ids are a no-op. Edges are addressed by index so that parallel
//! edges between the same pair stay distinct through crossing counting and
//! routing.
//!
//! Iteration order is deterministic: explicit ids first in supplied order,
//! then edge-derived ids in edge order.

use std::collections::HashMap;
use tracing::trace;

use super::types::VertexId;

/// Directed graph built fresh for each layout call
#[derive(Debug, Clone)]
pub struct FlowGraph {
    /// Vertex ids in insertion order
    vertices: Vec<VertexId>,
    /// Id → dense vertex index
    index: HashMap<VertexId, usize>,
    /// Edges as (source index, destination index), in input order
    edges: Vec<(usize, usize)>,
    /// Outgoing edge indices per vertex
    out_edges: Vec<Vec<usize>>,
    /// Incoming edge indices per vertex
    in_edges: Vec<Vec<usize>>,
}

impl FlowGraph {
    /// Build a graph from explicit vertex ids and an edge list.
    ///
    /// Ids mentioned only in edges are added to the vertex set; a repeated
    /// id is a no-op.
    pub fn build(vertex_ids: &[VertexId], edges: &[(VertexId, VertexId)]) -> Self {
        let mut vertices = Vec::with_capacity(vertex_ids.len());
        let mut index = HashMap::with_capacity(vertex_ids.len());

        let mut intern = |id: VertexId, vertices: &mut Vec<VertexId>| -> usize {
            *index.entry(id).or_insert_with(|| {
                vertices.push(id);
                vertices.len() - 1
            })
        };

        for &id in vertex_ids {
            intern(id, &mut vertices);
        }

        let mut edge_indices = Vec::with_capacity(edges.len());
        for &(from, to) in edges {
            let from_idx = intern(from, &mut vertices);
            let to_idx = intern(to, &mut vertices);
            edge_indices.push((from_idx, to_idx));
        }

        let mut out_edges = vec![Vec::new(); vertices.len()];
        let mut in_edges = vec![Vec::new(); vertices.len()];
        for (e, &(from_idx, to_idx)) in edge_indices.iter().enumerate() {
            out_edges[from_idx].push(e);
            in_edges[to_idx].push(e);
        }

        trace!(
            vertex_count = vertices.len(),
            edge_count = edge_indices.len(),
            "Built flow graph"
        );

        Self {
            vertices,
            index,
            edges: edge_indices,
            out_edges,
            in_edges,
        }
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All vertex ids in insertion order
    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    /// Returns true if the id is a member of the vertex set
    pub fn contains(&self, id: VertexId) -> bool {
        self.index.contains_key(&id)
    }

    /// Dense index of a vertex id
    pub fn index_of(&self, id: VertexId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Vertex id at a dense index
    pub fn id_of(&self, v: usize) -> VertexId {
        self.vertices[v]
    }

    /// Endpoints of an edge as (source index, destination index)
    pub fn edge(&self, e: usize) -> (usize, usize) {
        self.edges[e]
    }

    /// Outgoing edge indices of a vertex
    pub fn out_edges(&self, v: usize) -> &[usize] {
        &self.out_edges[v]
    }

    /// Incoming edge indices of a vertex
    pub fn in_edges(&self, v: usize) -> &[usize] {
        &self.in_edges[v]
    }

    /// Successor vertex indices (one entry per outgoing edge)
    pub fn successors(&self, v: usize) -> impl Iterator<Item = usize> + '_ {
        self.out_edges[v].iter().map(move |&e| self.edges[e].1)
    }

    /// Predecessor vertex indices (one entry per incoming edge)
    pub fn predecessors(&self, v: usize) -> impl Iterator<Item = usize> + '_ {
        self.in_edges[v].iter().map(move |&e| self.edges[e].0)
    }
}
