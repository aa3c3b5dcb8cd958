//! Topological sorting by depth-first finishing order.
//!
//! A vertex finishes only after every vertex reachable from it has finished,
//! so the reversed finishing order puts every edge `u -> v` with `u` first.

use tracing::{debug, trace};

use crate::{GraphError, IndexGraph, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Finished,
}

impl IndexGraph {
    /// Perform a topological sort
    ///
    /// Runs a depth-first search from every unvisited vertex in index order
    /// and returns the vertices in reverse finishing order, so that for every
    /// edge `u -> v`, `u` comes before `v`.
    ///
    /// Fails with `GraphError::Cycle` if the graph contains a cycle, and with
    /// `GraphError::NotDirected` if the graph is undirected.
    ///
    /// ```rust
    /// use graph_walk::{Direction, GraphError, IndexGraph};
    ///
    /// let dag = IndexGraph::from_edges(4, Direction::Directed, &[(0, 1), (0, 2), (1, 3), (2, 3)])?;
    /// assert_eq!(dag.toposort()?, vec![0, 2, 1, 3]);
    ///
    /// let cyclic = IndexGraph::from_edges(3, Direction::Directed, &[(0, 1), (1, 2), (2, 1)])?;
    /// assert_eq!(cyclic.toposort(), Err(GraphError::Cycle(vec![1, 2])));
    /// # Ok::<(), GraphError>(())
    /// ```
    pub fn toposort(&self) -> Result<Vec<usize>> {
        if !self.is_directed() {
            return Err(GraphError::NotDirected);
        }

        self.finish_order().map_err(GraphError::Cycle)
    }

    /// Topological order, or the first cycle found as `Err(cycle)`
    ///
    /// Treats every graph as directed.
    pub(crate) fn finish_order(&self) -> std::result::Result<Vec<usize>, Vec<usize>> {
        let mut marks = vec![Mark::Unvisited; self.len()];
        let mut finished = Vec::with_capacity(self.len());
        let mut dfs_stack = Vec::new();

        for root_idx in 0..self.len() {
            if marks[root_idx] != Mark::Unvisited {
                continue
            }

            dfs_stack.push((root_idx, 0));
            marks[root_idx] = Mark::InProgress;

            // push vertices to the finished list in post-order
            while let Some((idx, edge_idx)) = dfs_stack.pop() {
                if edge_idx < self.vertices[idx].edges.len() {
                    dfs_stack.push((idx, edge_idx + 1));

                    let next_idx = self.vertices[idx].edges[edge_idx];
                    match marks[next_idx] {
                        Mark::Unvisited => {
                            marks[next_idx] = Mark::InProgress;
                            dfs_stack.push((next_idx, 0));
                        }
                        Mark::InProgress => {
                            // back edge: the cycle is the part of the stack
                            // from next_idx up to idx
                            trace!(from = idx, to = next_idx, "back edge");
                            let cycle: Vec<usize> = dfs_stack.iter()
                                .map(|&(stack_idx, _)| stack_idx)
                                .skip_while(|&stack_idx| stack_idx != next_idx)
                                .collect();
                            debug!(len = cycle.len(), "toposort found a cycle");
                            return Err(cycle)
                        }
                        Mark::Finished => {}
                    }
                } else {
                    marks[idx] = Mark::Finished;
                    finished.push(idx);
                }
            }
        }

        finished.reverse();
        debug!(vertices = finished.len(), "toposort finished");
        Ok(finished)
    }
}
