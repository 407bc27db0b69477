//! Barycenter ordering for edge crossing reduction
//!
//! Implements the ordering phase of the layered layout: alternating
//! downward and upward sweeps reorder vertices within each rank by the
//! average position of their neighbors in the adjacent rank. A fixed number
//! of sweeps is run and the best ordering seen (by total crossing count) is
//! kept. Only determinism is contractual; crossing-minimality is not.

use std::collections::HashMap;
use tracing::debug;

use super::acyclic::DagView;

/// Sweep count for the barycenter heuristic. Returns diminish quickly, so
/// this is a tuning constant rather than configuration.
pub const ORDERING_SWEEPS: usize = 6;

/// Count edge crossings between all adjacent ranks.
///
/// Two edges (a1, b1) and (a2, b2) between the same pair of adjacent ranks
/// cross when a1 is left of a2 but b1 is right of b2, or vice versa.
/// Parallel edges are counted as distinct (they never cross each other but
/// each crosses other edges independently).
pub fn cross_count(layers: &[Vec<usize>], dag: &DagView<'_>) -> usize {
    let mut total = 0;
    for i in 0..layers.len().saturating_sub(1) {
        total += two_layer_cross_count(&layers[i], &layers[i + 1], dag);
    }
    total
}

/// Count crossings between two adjacent ranks.
fn two_layer_cross_count(north: &[usize], south: &[usize], dag: &DagView<'_>) -> usize {
    let north_pos: HashMap<usize, usize> =
        north.iter().enumerate().map(|(i, &v)| (v, i)).collect();
    let south_pos: HashMap<usize, usize> =
        south.iter().enumerate().map(|(i, &v)| (v, i)).collect();

    // All adjacent-rank edges as (north position, south position) pairs
    let mut edges: Vec<(usize, usize)> = Vec::new();
    for &v in north {
        for &succ in dag.dag_successors(v) {
            if let Some(&sp) = south_pos.get(&succ) {
                if let Some(&np) = north_pos.get(&v) {
                    edges.push((np, sp));
                }
            }
        }
    }

    // O(E²) pairwise check; rank widths in CFGs are small
    let mut crossings = 0;
    for i in 0..edges.len() {
        for j in (i + 1)..edges.len() {
            let (n1, s1) = edges[i];
            let (n2, s2) = edges[j];
            if (n1 < n2 && s1 > s2) || (n1 > n2 && s1 < s2) {
                crossings += 1;
            }
        }
    }
    crossings
}

/// Direction for barycenter calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepDirection {
    /// Look at acyclic-view predecessors (previous rank)
    Downward,
    /// Look at acyclic-view successors (next rank)
    Upward,
}

/// Compute barycenter values for vertices in a rank.
///
/// The barycenter of a vertex is the mean position of its neighbors in the
/// reference rank. Vertices with no neighbor there get None.
fn compute_barycenters(
    layer: &[usize],
    ref_layer: &[usize],
    dag: &DagView<'_>,
    direction: SweepDirection,
) -> Vec<Option<f64>> {
    let ref_pos: HashMap<usize, usize> =
        ref_layer.iter().enumerate().map(|(i, &v)| (v, i)).collect();

    layer
        .iter()
        .map(|&v| {
            let neighbors: &[usize] = match direction {
                SweepDirection::Downward => dag.dag_predecessors(v),
                SweepDirection::Upward => dag.dag_successors(v),
            };

            let positions: Vec<f64> = neighbors
                .iter()
                .filter_map(|n| ref_pos.get(n).map(|&p| p as f64))
                .collect();

            if positions.is_empty() {
                None
            } else {
                Some(positions.iter().sum::<f64>() / positions.len() as f64)
            }
        })
        .collect()
}

/// Reorder a rank by barycenter value.
///
/// Stable: ties and None entries keep their previous relative order, which
/// is what makes the whole heuristic deterministic.
fn order_layer_by_barycenter(layer: &mut Vec<usize>, barycenters: &[Option<f64>]) {
    let mut entries: Vec<(usize, Option<f64>, usize)> = layer
        .iter()
        .enumerate()
        .map(|(i, &v)| (v, barycenters.get(i).copied().flatten(), i))
        .collect();

    entries.sort_by(|a, b| match (&a.1, &b.1) {
        (Some(bc_a), Some(bc_b)) => bc_a
            .partial_cmp(bc_b)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.2.cmp(&b.2)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.2.cmp(&b.2),
    });

    *layer = entries.into_iter().map(|(v, _, _)| v).collect();
}

/// Run the barycenter sweeps, keeping the best ordering found.
///
/// Returns the crossing count of the ordering left in `layers`.
pub fn order_layers(dag: &DagView<'_>, layers: &mut Vec<Vec<usize>>, iterations: usize) -> usize {
    if layers.len() < 2 {
        return 0;
    }

    let mut best_layers = layers.clone();
    let mut best_cc = cross_count(layers, dag);

    for i in 0..iterations {
        let downward = i % 2 == 0;

        let layer_indices: Vec<usize> = if downward {
            (1..layers.len()).collect()
        } else {
            (0..layers.len() - 1).rev().collect()
        };

        for layer_idx in layer_indices {
            let ref_idx = if downward { layer_idx - 1 } else { layer_idx + 1 };
            let direction = if downward {
                SweepDirection::Downward
            } else {
                SweepDirection::Upward
            };

            let barycenters =
                compute_barycenters(&layers[layer_idx], &layers[ref_idx], dag, direction);
            order_layer_by_barycenter(&mut layers[layer_idx], &barycenters);
        }

        let cc = cross_count(layers, dag);
        if cc < best_cc {
            best_layers = layers.clone();
            best_cc = cc;
        }
    }

    *layers = best_layers;
    debug!(crossings = best_cc, "Crossing reduction completed");
    best_cc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FlowGraph, VertexId};

    fn graph(raw: &[(u64, u64)]) -> FlowGraph {
        let edges: Vec<(VertexId, VertexId)> = raw
            .iter()
            .map(|&(a, b)| (VertexId(a), VertexId(b)))
            .collect();
        FlowGraph::build(&[], &edges)
    }

    fn idx(g: &FlowGraph, id: u64) -> usize {
        g.index_of(VertexId(id)).unwrap()
    }

    #[test]
    fn test_cross_count_parallel_edges_no_crossing() {
        // 1 -> 3, 2 -> 4: parallel, no crossing
        let g = graph(&[(1, 3), (2, 4)]);
        let dag = DagView::build(&g, idx(&g, 1));
        let layers = vec![
            vec![idx(&g, 1), idx(&g, 2)],
            vec![idx(&g, 3), idx(&g, 4)],
        ];
        assert_eq!(cross_count(&layers, &dag), 0);
    }

    #[test]
    fn test_cross_count_x_pattern() {
        // 1 -> 4, 2 -> 3: X pattern, one crossing
        let g = graph(&[(1, 4), (2, 3)]);
        let dag = DagView::build(&g, idx(&g, 1));
        let layers = vec![
            vec![idx(&g, 1), idx(&g, 2)],
            vec![idx(&g, 3), idx(&g, 4)],
        ];
        assert_eq!(cross_count(&layers, &dag), 1);
    }

    #[test]
    fn test_cross_count_duplicate_edges_counted_distinctly() {
        // Two copies of 1 -> 4 each cross 2 -> 3
        let g = graph(&[(1, 4), (1, 4), (2, 3)]);
        let dag = DagView::build(&g, idx(&g, 1));
        let layers = vec![
            vec![idx(&g, 1), idx(&g, 2)],
            vec![idx(&g, 3), idx(&g, 4)],
        ];
        assert_eq!(cross_count(&layers, &dag), 2);
    }

    #[test]
    fn test_cross_count_empty() {
        let g = graph(&[]);
        let dag = DagView::build(&g, 0);
        let layers: Vec<Vec<usize>> = vec![];
        assert_eq!(cross_count(&layers, &dag), 0);
    }

    #[test]
    fn test_barycenter_mean_of_neighbor_positions() {
        // 1 and 3 feed 4; with ref layer [1, 2, 3] its barycenter is 1.0
        let g = graph(&[(1, 4), (3, 4), (2, 5)]);
        let dag = DagView::build(&g, idx(&g, 1));
        let layer = vec![idx(&g, 4)];
        let ref_layer = vec![idx(&g, 1), idx(&g, 2), idx(&g, 3)];
        let bcs = compute_barycenters(&layer, &ref_layer, &dag, SweepDirection::Downward);
        assert_eq!(bcs, vec![Some(1.0)]);
    }

    #[test]
    fn test_barycenter_none_without_neighbors() {
        let g = FlowGraph::build(&[VertexId(1), VertexId(2)], &[]);
        let dag = DagView::build(&g, 0);
        let bcs = compute_barycenters(&[idx(&g, 2)], &[idx(&g, 1)], &dag, SweepDirection::Downward);
        assert_eq!(bcs, vec![None]);
    }

    #[test]
    fn test_order_layer_stable_on_ties() {
        let mut layer = vec![7, 8];
        order_layer_by_barycenter(&mut layer, &[Some(1.0), Some(1.0)]);
        assert_eq!(layer, vec![7, 8]);
    }

    #[test]
    fn test_order_layer_none_goes_last() {
        let mut layer = vec![7, 8, 9];
        order_layer_by_barycenter(&mut layer, &[Some(2.0), None, Some(0.0)]);
        assert_eq!(layer, vec![9, 7, 8]);
    }

    #[test]
    fn test_sweeps_fix_x_pattern() {
        let g = graph(&[(1, 3), (2, 4)]);
        let dag = DagView::build(&g, idx(&g, 1));
        // Deliberately crossed initial order
        let mut layers = vec![
            vec![idx(&g, 1), idx(&g, 2)],
            vec![idx(&g, 4), idx(&g, 3)],
        ];
        assert_eq!(cross_count(&layers, &dag), 1);
        let cc = order_layers(&dag, &mut layers, ORDERING_SWEEPS);
        assert_eq!(cc, 0);
        assert_eq!(layers[1], vec![idx(&g, 3), idx(&g, 4)]);
    }

    #[test]
    fn test_sweeps_never_worse_than_initial() {
        let g = graph(&[(1, 3), (1, 4), (2, 3), (2, 4), (3, 5), (4, 5)]);
        let dag = DagView::build(&g, idx(&g, 1));
        let mut layers = vec![
            vec![idx(&g, 1), idx(&g, 2)],
            vec![idx(&g, 4), idx(&g, 3)],
            vec![idx(&g, 5)],
        ];
        let initial = cross_count(&layers, &dag);
        let after = order_layers(&dag, &mut layers, ORDERING_SWEEPS);
        assert!(after <= initial);
    }

    #[test]
    fn test_ordering_deterministic() {
        let g = graph(&[(1, 4), (2, 3), (3, 5), (4, 5), (1, 5)]);
        let dag = DagView::build(&g, idx(&g, 1));
        let mut a = vec![
            vec![idx(&g, 1), idx(&g, 2)],
            vec![idx(&g, 3), idx(&g, 4)],
            vec![idx(&g, 5)],
        ];
        let mut b = a.clone();
        let cc_a = order_layers(&dag, &mut a, ORDERING_SWEEPS);
        let cc_b = order_layers(&dag, &mut b, ORDERING_SWEEPS);
        assert_eq!(cc_a, cc_b);
        assert_eq!(a, b);
    }

    #[test]
    fn test_single_layer_no_crossings() {
        let g = FlowGraph::build(&[VertexId(1), VertexId(2)], &[]);
        let dag = DagView::build(&g, 0);
        let mut layers = vec![vec![0, 1]];
        assert_eq!(order_layers(&dag, &mut layers, ORDERING_SWEEPS), 0);
    }
}
