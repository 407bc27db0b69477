//! Layer assignment (ranking)
//!
//! Longest-path layering over the acyclic view: rank of a vertex is the
//! length of the longest path reaching it from a source, computed in
//! topological order (Kahn). The designated root has no un-reversed
//! incoming edges in any connected-from-root graph, so it lands at rank 0.
//! Long edges span many ranks and are routed, not flattened, which keeps
//! loop back-edges legible in control-flow diagrams.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use tracing::debug;

use crate::core::{FlowGraph, LayoutError};

use super::acyclic::DagView;

/// Assign a rank to every vertex; returns ranks indexed by dense vertex
/// index.
///
/// A vertex left unranked after the acyclic view's total coverage is a
/// programming error, reported as [`LayoutError::Inconsistency`].
pub fn rank(graph: &FlowGraph, dag: &DagView<'_>) -> Result<Vec<usize>, LayoutError> {
    let n = graph.vertex_count();
    let mut in_degree = vec![0usize; n];
    for v in 0..n {
        in_degree[v] = dag.dag_predecessors(v).len();
    }

    // Min-heap on vertex id keeps the processing order deterministic for
    // equal-rank candidates.
    let mut ready: BinaryHeap<Reverse<(u64, usize)>> = BinaryHeap::new();
    for v in 0..n {
        if in_degree[v] == 0 {
            ready.push(Reverse((graph.id_of(v).0, v)));
        }
    }

    let mut ranks = vec![0usize; n];
    let mut processed = 0usize;
    while let Some(Reverse((_, v))) = ready.pop() {
        processed += 1;
        for &succ in dag.dag_successors(v) {
            if ranks[succ] < ranks[v] + 1 {
                ranks[succ] = ranks[v] + 1;
            }
            in_degree[succ] -= 1;
            if in_degree[succ] == 0 {
                ready.push(Reverse((graph.id_of(succ).0, succ)));
            }
        }
    }

    if processed != n {
        debug_assert!(false, "acyclic view left {} vertices unranked", n - processed);
        return Err(LayoutError::inconsistency(format!(
            "{} vertices left unranked after cycle normalization",
            n - processed
        )));
    }

    debug!(
        max_rank = ranks.iter().max().copied().unwrap_or(0),
        "Layer assignment completed"
    );
    Ok(ranks)
}

/// Group vertices into per-rank buckets, ordered by DFS discovery within
/// each rank (the deterministic initial ordering for crossing reduction).
pub fn build_layers(ranks: &[usize], dag: &DagView<'_>) -> Vec<Vec<usize>> {
    let max_rank = ranks.iter().max().copied().unwrap_or(0);
    let mut layers: Vec<Vec<usize>> = vec![Vec::new(); if ranks.is_empty() { 0 } else { max_rank + 1 }];
    for &v in dag.discovery() {
        layers[ranks[v]].push(v);
    }
    layers
}
