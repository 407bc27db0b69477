//! Cycle normalization via depth-first edge classification
//!
//! Produces an acyclic view of the graph without mutating true edge
//! direction: a depth-first traversal from the designated root classifies
//! each edge, and back edges (those targeting a vertex still on the
//! traversal stack) are marked reversed-for-ranking. Routing later ignores
//! the marks and uses the true direction.
//!
//! If parts of the graph are unreachable from the root, the traversal
//! restarts from each not-yet-visited vertex in ascending id order, so the
//! whole vertex set is always covered and the engine stays total.

use tracing::{debug, trace};

use crate::core::FlowGraph;

#[derive(Clone, Copy, PartialEq)]
enum Color {
    White,
    Gray,
    Black,
}

/// Acyclic view over a [`FlowGraph`]
///
/// Holds the reversed-for-ranking mark per edge and the DFS discovery
/// order, which downstream stages use as the deterministic initial
/// ordering within ranks.
pub struct DagView<'g> {
    graph: &'g FlowGraph,
    reversed: Vec<bool>,
    discovery: Vec<usize>,
    dag_succ: Vec<Vec<usize>>,
    dag_pred: Vec<Vec<usize>>,
}

impl<'g> DagView<'g> {
    /// Classify edges by DFS from `root`, then from every remaining
    /// unvisited vertex in ascending id order.
    pub fn build(graph: &'g FlowGraph, root: usize) -> Self {
        let n = graph.vertex_count();
        let mut color = vec![Color::White; n];
        let mut reversed = vec![false; graph.edge_count()];
        let mut discovery = Vec::with_capacity(n);

        let mut starts: Vec<usize> = (0..n).collect();
        starts.sort_by_key(|&v| graph.id_of(v));
        // The designated root always anchors the first traversal.
        let mut roots = Vec::with_capacity(n);
        if n > 0 {
            roots.push(root);
        }
        roots.extend(starts.into_iter().filter(|&v| v != root));

        for start in roots {
            if color[start] != Color::White {
                continue;
            }
            dfs(graph, start, &mut color, &mut reversed, &mut discovery);
        }

        let back_edges = reversed.iter().filter(|&&r| r).count();
        debug!(
            back_edges,
            covered = discovery.len(),
            "Cycle normalization completed"
        );

        let mut dag_succ = vec![Vec::new(); n];
        let mut dag_pred = vec![Vec::new(); n];
        for e in 0..graph.edge_count() {
            let (from, to) = graph.edge(e);
            // Self-loops vanish from the acyclic view entirely.
            if from == to {
                continue;
            }
            let (from, to) = if reversed[e] { (to, from) } else { (from, to) };
            dag_succ[from].push(to);
            dag_pred[to].push(from);
        }

        Self {
            graph,
            reversed,
            discovery,
            dag_succ,
            dag_pred,
        }
    }

    /// True if the edge is a back edge, treated as swapped during ranking
    pub fn is_reversed(&self, e: usize) -> bool {
        self.reversed[e]
    }

    /// Edge endpoints in the acyclic view (swapped for back edges)
    pub fn endpoints(&self, e: usize) -> (usize, usize) {
        let (from, to) = self.graph.edge(e);
        if self.reversed[e] {
            (to, from)
        } else {
            (from, to)
        }
    }

    /// Vertex indices in DFS discovery order; covers every vertex
    pub fn discovery(&self) -> &[usize] {
        &self.discovery
    }

    /// Successor vertex indices in the acyclic view (one entry per edge)
    pub fn dag_successors(&self, v: usize) -> &[usize] {
        &self.dag_succ[v]
    }

    /// Predecessor vertex indices in the acyclic view (one entry per edge)
    pub fn dag_predecessors(&self, v: usize) -> &[usize] {
        &self.dag_pred[v]
    }
}

/// Iterative DFS with white/gray/black coloring; an edge into a gray vertex
/// is a back edge.
fn dfs(
    graph: &FlowGraph,
    start: usize,
    color: &mut [Color],
    reversed: &mut [bool],
    discovery: &mut Vec<usize>,
) {
    color[start] = Color::Gray;
    discovery.push(start);
    // (vertex, position into its outgoing edge list)
    let mut stack: Vec<(usize, usize)> = vec![(start, 0)];

    while let Some(&mut (v, ref mut next)) = stack.last_mut() {
        let out = graph.out_edges(v);
        if *next >= out.len() {
            color[v] = Color::Black;
            stack.pop();
            continue;
        }
        let e = out[*next];
        *next += 1;

        let (_, target) = graph.edge(e);
        match color[target] {
            Color::White => {
                color[target] = Color::Gray;
                discovery.push(target);
                stack.push((target, 0));
            }
            Color::Gray => {
                trace!(edge = e, "Back edge, reversing for ranking");
                reversed[e] = true;
            }
            Color::Black => {
                // Forward or cross edge: kept as-is, already acyclic.
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::VertexId;

    fn graph(raw: &[(u64, u64)]) -> FlowGraph {
        let edges: Vec<(VertexId, VertexId)> = raw
            .iter()
            .map(|&(a, b)| (VertexId(a), VertexId(b)))
            .collect();
        FlowGraph::build(&[], &edges)
    }

    #[test]
    fn test_chain_has_no_back_edges() {
        let g = graph(&[(1, 2), (2, 3)]);
        let dag = DagView::build(&g, 0);
        assert!(!dag.is_reversed(0));
        assert!(!dag.is_reversed(1));
    }

    #[test]
    fn test_simple_cycle_reverses_closing_edge() {
        // A -> B -> C -> A: only (C, A) closes the cycle
        let g = graph(&[(1, 2), (2, 3), (3, 1)]);
        let root = g.index_of(VertexId(1)).unwrap();
        let dag = DagView::build(&g, root);
        assert!(!dag.is_reversed(0));
        assert!(!dag.is_reversed(1));
        assert!(dag.is_reversed(2));
    }

    #[test]
    fn test_reversed_endpoints_swapped() {
        let g = graph(&[(1, 2), (2, 1)]);
        let root = g.index_of(VertexId(1)).unwrap();
        let dag = DagView::build(&g, root);
        let (from, to) = dag.endpoints(1);
        // (2, 1) is the back edge; in the acyclic view it reads 1 -> 2
        assert!(dag.is_reversed(1));
        assert_eq!(g.id_of(from), VertexId(1));
        assert_eq!(g.id_of(to), VertexId(2));
    }

    #[test]
    fn test_self_loop_is_back_edge() {
        let g = graph(&[(1, 1)]);
        let dag = DagView::build(&g, 0);
        assert!(dag.is_reversed(0));
        assert!(dag.dag_successors(0).is_empty());
    }

    #[test]
    fn test_diamond_no_back_edges() {
        let g = graph(&[(1, 2), (1, 3), (2, 4), (3, 4)]);
        let root = g.index_of(VertexId(1)).unwrap();
        let dag = DagView::build(&g, root);
        for e in 0..g.edge_count() {
            assert!(!dag.is_reversed(e), "edge {} wrongly reversed", e);
        }
    }

    #[test]
    fn test_discovery_covers_disconnected_vertices() {
        let g = FlowGraph::build(
            &[VertexId(5), VertexId(9), VertexId(7)],
            &[(VertexId(5), VertexId(9))],
        );
        let root = g.index_of(VertexId(5)).unwrap();
        let dag = DagView::build(&g, root);
        assert_eq!(dag.discovery().len(), 3);
    }

    #[test]
    fn test_disconnected_restart_in_ascending_id_order() {
        // Two isolated components; root covers {1, 2}, restart must visit
        // 3 before 8 regardless of insertion order.
        let g = FlowGraph::build(
            &[VertexId(1), VertexId(8), VertexId(3)],
            &[(VertexId(1), VertexId(2))],
        );
        let root = g.index_of(VertexId(1)).unwrap();
        let dag = DagView::build(&g, root);
        let order: Vec<VertexId> = dag.discovery().iter().map(|&v| g.id_of(v)).collect();
        assert_eq!(
            order,
            vec![VertexId(1), VertexId(2), VertexId(3), VertexId(8)]
        );
    }

    #[test]
    fn test_discovery_deterministic() {
        let g = graph(&[(1, 2), (1, 3), (3, 4), (2, 4), (4, 1)]);
        let root = g.index_of(VertexId(1)).unwrap();
        let a: Vec<usize> = DagView::build(&g, root).discovery().to_vec();
        let b: Vec<usize> = DagView::build(&g, root).discovery().to_vec();
        assert_eq!(a, b);
    }

    #[test]
    fn test_dag_neighbors_follow_view() {
        let g = graph(&[(1, 2), (2, 3), (3, 1)]);
        let root = g.index_of(VertexId(1)).unwrap();
        let dag = DagView::build(&g, root);
        let v1 = g.index_of(VertexId(1)).unwrap();
        let v3 = g.index_of(VertexId(3)).unwrap();
        // In the view, the back edge (3, 1) reads 1 -> 3
        assert!(dag.dag_successors(v1).contains(&v3));
        assert!(dag.dag_predecessors(v3).contains(&v1));
        assert!(dag.dag_predecessors(v1).is_empty());
    }
}
