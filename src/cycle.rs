//! Cycle detection for directed and undirected graphs.

use std::collections::VecDeque as Queue;

use tracing::{debug, trace};

use crate::{Direction, IndexGraph};

impl IndexGraph {
    /// Returns `true` if the graph contains a cycle
    ///
    /// Undirected graphs are searched breadth-first from every unvisited
    /// vertex while remembering each vertex's parent. Reaching an already
    /// visited vertex over any edge other than the one back to the parent
    /// closes a cycle. Self-loops and parallel edges count as cycles.
    ///
    /// Directed graphs are cyclic exactly when `toposort()` fails.
    pub fn has_cycle(&self) -> bool {
        let cyclic = match self.direction {
            Direction::Undirected => self.has_undirected_cycle(),
            Direction::Directed => self.finish_order().is_err(),
        };

        debug!(vertices = self.len(), cyclic, "cycle check finished");
        cyclic
    }

    fn has_undirected_cycle(&self) -> bool {
        let mut visited = vec![false; self.len()];
        let mut queue = Queue::new();

        for root_idx in 0..self.len() {
            if visited[root_idx] {
                continue
            }

            visited[root_idx] = true;
            queue.push_back((root_idx, None));

            while let Some((idx, parent)) = queue.pop_front() {
                // only one entry may be the tree edge back to the parent,
                // any further copy is a parallel edge
                let mut parent_edge = parent;

                for &next_idx in &self.vertices[idx].edges {
                    if parent_edge == Some(next_idx) {
                        parent_edge = None;
                        continue
                    }

                    if visited[next_idx] {
                        trace!(from = idx, to = next_idx, "cycle closed");
                        return true
                    }

                    visited[next_idx] = true;
                    queue.push_back((next_idx, Some(idx)));
                }
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use crate::{Direction, IndexGraph};

    fn undirected(len: usize, edges: &[(usize, usize)]) -> IndexGraph {
        IndexGraph::from_edges(len, Direction::Undirected, edges).unwrap()
    }

    #[test]
    fn triangle_is_cyclic() {
        let graph = undirected(5, &[(0, 1), (0, 2), (0, 3), (1, 2)]);

        assert!(graph.has_cycle());
    }

    #[test]
    fn tree_is_acyclic() {
        let graph = undirected(6, &[(0, 1), (0, 2), (1, 3), (1, 4), (2, 5)]);

        assert!(!graph.has_cycle());
    }

    #[test]
    fn cycle_in_later_component() {
        // 0 - 1 is a tree, 2 - 3 - 4 - 2 is not
        let graph = undirected(5, &[(0, 1), (2, 3), (3, 4), (4, 2)]);

        assert!(graph.has_cycle());
    }

    #[test]
    fn even_cycle() {
        let graph = undirected(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]);

        assert!(graph.has_cycle());
    }

    #[test]
    fn self_loop_and_parallel_edges() {
        assert!(undirected(1, &[(0, 0)]).has_cycle());
        assert!(undirected(2, &[(0, 1), (1, 0)]).has_cycle());
        assert!(!undirected(2, &[(0, 1)]).has_cycle());
    }

    #[test]
    fn empty_and_edgeless_graphs() {
        assert!(!IndexGraph::undirected(0).has_cycle());
        assert!(!IndexGraph::undirected(4).has_cycle());
        assert!(!IndexGraph::directed(0).has_cycle());
    }

    #[test]
    fn directed_graphs_use_back_edges() {
        let dag = IndexGraph::from_edges(4, Direction::Directed, &[(0, 1), (0, 2), (1, 3), (2, 3)]).unwrap();
        assert!(!dag.has_cycle());

        let cyclic = IndexGraph::from_edges(3, Direction::Directed, &[(0, 1), (1, 2), (2, 0)]).unwrap();
        assert!(cyclic.has_cycle());

        // a two-vertex round trip is a cycle in a directed graph
        let round_trip = IndexGraph::from_edges(2, Direction::Directed, &[(0, 1), (1, 0)]).unwrap();
        assert!(round_trip.has_cycle());
    }
}
