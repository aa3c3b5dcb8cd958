//! Breadth-first and depth-first traversal from a single start vertex.
//!
//! Both traversals only explore the component reachable from the start
//! vertex. Neighbors are visited in adjacency-list order.

use std::collections::VecDeque as Queue;

use tracing::debug;

use crate::{IndexGraph, Result};

/// Breadth-first search configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BfsConfig {
    /// Maximum distance in edges from the start vertex to explore
    pub max_distance: usize,
}

impl Default for BfsConfig {
    fn default() -> Self {
        Self {
            max_distance: usize::MAX,
        }
    }
}

impl BfsConfig {
    /// Create a configuration without a distance limit
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum distance
    pub fn with_max_distance(mut self, max: usize) -> Self {
        self.max_distance = max;
        self
    }
}

impl IndexGraph {
    /// Breadth-first traversal from `start`
    ///
    /// Returns the vertices reachable from `start` in order of non-decreasing
    /// distance, ties broken by adjacency-list order. Vertices are marked as
    /// visited when they are enqueued, so no vertex is enqueued twice.
    ///
    /// Fails with `GraphError::InvalidVertex` if `start` is out of range, which
    /// includes every start vertex of an empty graph.
    pub fn bfs(&self, start: usize) -> Result<Vec<usize>> {
        self.bfs_with_config(start, &BfsConfig::default())
    }

    /// Breadth-first traversal from `start` with configuration
    ///
    /// Vertices further than `config.max_distance` edges from `start` are not
    /// visited.
    pub fn bfs_with_config(&self, start: usize, config: &BfsConfig) -> Result<Vec<usize>> {
        self.bfs_inner(start, config, |_, _| ())
    }

    /// Edge-count distance from `start` to every vertex
    ///
    /// Unreachable vertices have distance `None`.
    pub fn distances(&self, start: usize) -> Result<Vec<Option<usize>>> {
        let mut distances = vec![None; self.len()];
        self.bfs_inner(start, &BfsConfig::default(), |idx, dist| distances[idx] = Some(dist))?;
        Ok(distances)
    }

    fn bfs_inner<F>(&self, start: usize, config: &BfsConfig, mut on_visit: F) -> Result<Vec<usize>>
        where F: FnMut(usize, usize)
    {
        self.check_vertex(start)?;

        let mut visited = vec![false; self.len()];
        let mut queue = Queue::new();
        let mut order = Vec::new();

        queue.push_back((start, 0));
        visited[start] = true;

        while let Some((idx, dist)) = queue.pop_front() {
            order.push(idx);
            on_visit(idx, dist);

            if dist >= config.max_distance {
                continue;
            }

            // enqueue unvisited neighbors, marking them right away
            for &next_idx in &self.vertices[idx].edges {
                if !visited[next_idx] {
                    visited[next_idx] = true;
                    queue.push_back((next_idx, dist + 1));
                }
            }
        }

        debug!(start, visited = order.len(), vertices = self.len(), "bfs finished");
        Ok(order)
    }

    /// Depth-first traversal from `start`
    ///
    /// Returns the vertices reachable from `start` in the order a recursive
    /// depth-first search first discovers them. The search itself uses an
    /// explicit stack, so deep graphs cannot overflow the call stack.
    ///
    /// Fails with `GraphError::InvalidVertex` if `start` is out of range, which
    /// includes every start vertex of an empty graph.
    pub fn dfs(&self, start: usize) -> Result<Vec<usize>> {
        self.check_vertex(start)?;

        let mut visited = vec![false; self.len()];
        let mut order = vec![start];

        // stack of (vertex, index of the next edge to follow)
        let mut dfs_stack = vec![(start, 0)];
        visited[start] = true;

        while let Some((idx, edge_idx)) = dfs_stack.pop() {
            if edge_idx < self.vertices[idx].edges.len() {
                dfs_stack.push((idx, edge_idx + 1));

                let next_idx = self.vertices[idx].edges[edge_idx];
                if !visited[next_idx] {
                    visited[next_idx] = true;
                    order.push(next_idx);
                    dfs_stack.push((next_idx, 0));
                }
            }
        }

        debug!(start, visited = order.len(), vertices = self.len(), "dfs finished");
        Ok(order)
    }
}
