// Copyright 2020 Ferdinand Bachmann
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Adjacency-list graphs over integer-labeled vertices, with
//! [breadth-first](https://en.wikipedia.org/wiki/Breadth-first_search) and
//! [depth-first](https://en.wikipedia.org/wiki/Depth-first_search) traversal,
//! cycle detection and
//! [topological sorting](https://en.wikipedia.org/wiki/Topological_sorting)
//! by depth-first finishing order.
//!
//! This crate provides:
//!
//! - an adjacency-list based graph data structure, either directed or
//!   undirected, with vertices `0..V`
//! - breadth-first and depth-first traversal from a start vertex in `O(V + E)`
//!   time and `O(V)` additional space
//! - cycle detection, using breadth-first search with parent tracking for
//!   undirected graphs and back-edge detection for directed graphs
//! - a topological sort that runs in `O(V + E)` time and fails with the
//!   offending cycle if the graph is not acyclic
//!
//! All algorithms borrow the graph and keep their visited sets and stacks
//! local to the call, so running them twice gives the same result.
//!
//! ```rust
//! use graph_walk::IndexGraph;
//!
//! let mut graph = IndexGraph::undirected(5);
//! graph.add_edge(0, 1)?;
//! graph.add_edge(0, 2)?;
//! graph.add_edge(0, 3)?;
//! graph.add_edge(1, 2)?;
//!
//! assert_eq!(graph.bfs(0)?, vec![0, 1, 2, 3]);
//! assert_eq!(graph.dfs(0)?, vec![0, 1, 2, 3]);
//! assert!(graph.has_cycle());
//! # Ok::<(), graph_walk::GraphError>(())
//! ```
//!
//! The `id-arena` feature adds an additional wrapper type that runs the same
//! algorithms on arbitrary graph structures built with the `id-arena` crate by
//! creating a proxy graph and returning ids into the original arena.

use std::fmt;
use std::ops::Index;
use std::slice::Iter as SliceIter;
use std::vec::IntoIter as VecIntoIter;

mod cycle;
mod toposort;
mod traversal;

pub use traversal::BfsConfig;

#[cfg(feature = "id-arena")]
mod arena_graph;

#[cfg(feature = "id-arena")]
pub use arena_graph::*;

/// Errors returned by graph operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// A vertex index outside of `0..len`
    #[error("invalid vertex {vertex}: graph has {len} vertices")]
    InvalidVertex { vertex: usize, len: usize },

    /// The graph contains a cycle, listed in edge order
    #[error("graph contains a cycle: {0:?}")]
    Cycle(Vec<usize>),

    /// The operation needs a directed graph
    #[error("operation requires a directed graph")]
    NotDirected,

    /// An arena id used with a graph built from a different arena
    #[error("id from arena {found} used with a graph over arena {expected}")]
    ForeignId { expected: u32, found: u32 },
}

/// Result type for graph operations
pub type Result<T> = std::result::Result<T, GraphError>;

/// Whether edges are stored in one or in both directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// `add_edge(u, v)` only adds `v` to the neighbors of `u`
    Directed,
    /// `add_edge(u, v)` adds `v` to `u` and `u` to `v`
    Undirected,
}

/// An adjacency-list-based graph data structure
///
/// Stores graph vertices as lists of neighbors by their index in the graph.
/// No additional data is stored per vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexGraph {
    direction: Direction,
    vertices: Vec<Vertex>,
}

/// A single vertex and its neighbors, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vertex {
    pub edges: Vec<usize>,
}

impl Vertex {
    /// Returns the number of stored neighbor entries
    pub fn degree(&self) -> usize {
        self.edges.len()
    }
}

/// A builder object that allows to easily add edges to a graph
#[derive(Debug)]
pub struct IndexGraphBuilder<'g> {
    graph: &'g mut IndexGraph,
    index: usize
}

impl IndexGraphBuilder<'_> {
    /// Returns a reference to the stored graph
    pub fn as_graph(&self) -> &IndexGraph {
        self.graph
    }

    /// Returns a mutable reference to the stored graph
    pub fn as_mut_graph(&mut self) -> &mut IndexGraph {
        self.graph
    }

    /// Returns the stored index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Add an edge from the stored index to the passed index
    ///
    /// This method does not check for duplicate edges.
    pub fn add_out_edge(&mut self, index: usize) -> Result<()> {
        self.graph.add_edge(self.index, index)
    }

    /// Add an edge from the passed index to the stored index
    ///
    /// This method does not check for duplicate edges.
    pub fn add_in_edge(&mut self, index: usize) -> Result<()> {
        self.graph.add_edge(index, self.index)
    }
}

impl IndexGraph {
    /// Create a new graph with `len` vertices and no edges
    pub fn with_vertices(len: usize, direction: Direction) -> Self {
        let mut vertices = Vec::with_capacity(len);
        vertices.resize_with(len, Default::default);

        IndexGraph { direction, vertices }
    }

    /// Create a new undirected graph with `len` vertices and no edges
    pub fn undirected(len: usize) -> Self {
        Self::with_vertices(len, Direction::Undirected)
    }

    /// Create a new directed graph with `len` vertices and no edges
    pub fn directed(len: usize) -> Self {
        Self::with_vertices(len, Direction::Directed)
    }

    /// Create a new graph with `len` vertices and the given edges, inserted in
    /// order
    pub fn from_edges(len: usize, direction: Direction, edges: &[(usize, usize)]) -> Result<Self> {
        let mut graph = Self::with_vertices(len, direction);

        for &(from, to) in edges {
            graph.add_edge(from, to)?;
        }

        Ok(graph)
    }

    /// Create a new graph from an existing graph-like data structure
    ///
    /// The given closure will be called once for every element of `g`, with an
    /// `IndexGraphBuilder` instance so that edges can be easily added. The
    /// first error returned by the closure aborts construction.
    ///
    /// ```rust
    /// use graph_walk::{Direction, IndexGraph};
    ///
    /// let deps = vec![vec![1, 2], vec![3], vec![3], vec![]];
    ///
    /// let graph = IndexGraph::from_graph(&deps, Direction::Directed, |mut builder, edges| {
    ///     for &edge in edges {
    ///         builder.add_out_edge(edge)?;
    ///     }
    ///     Ok(())
    /// })?;
    ///
    /// assert_eq!(graph.toposort()?, vec![0, 2, 1, 3]);
    /// # Ok::<(), graph_walk::GraphError>(())
    /// ```
    pub fn from_graph<T, F>(g: &[T], direction: Direction, mut f: F) -> Result<Self>
        where F: FnMut(IndexGraphBuilder<'_>, &T) -> Result<()>
    {
        let mut graph = Self::with_vertices(g.len(), direction);

        for (idx, element) in g.iter().enumerate() {
            f(IndexGraphBuilder { graph: &mut graph, index: idx }, element)?;
        }

        Ok(graph)
    }

    /// Returns the number of vertices
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns `true` if the graph has no vertices
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns whether edges are stored in one or both directions
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns `true` if this is a directed graph
    pub fn is_directed(&self) -> bool {
        self.direction == Direction::Directed
    }

    /// Returns the number of edges added to the graph
    ///
    /// An undirected edge is counted once, even though it appears in the
    /// neighbor lists of both endpoints.
    pub fn edge_count(&self) -> usize {
        let entries: usize = self.vertices.iter().map(Vertex::degree).sum();

        match self.direction {
            Direction::Directed => entries,
            Direction::Undirected => {
                // a self-loop is stored twice in the same list, like any
                // other undirected edge is stored twice overall
                entries / 2
            }
        }
    }

    /// Returns the neighbors of `vertex` in insertion order
    pub fn neighbors(&self, vertex: usize) -> Result<&[usize]> {
        self.check_vertex(vertex)?;
        Ok(&self.vertices[vertex].edges)
    }

    /// Returns an iterator over the contained vertices
    pub fn iter(&self) -> SliceIter<'_, Vertex> {
        self.vertices.iter()
    }

    /// Add a new edge to the graph
    ///
    /// Undirected graphs store the edge in the neighbor lists of both
    /// endpoints. This method does not check for duplicate edges.
    pub fn add_edge(&mut self, from: usize, to: usize) -> Result<()> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;

        self.vertices[from].edges.push(to);
        if self.direction == Direction::Undirected {
            self.vertices[to].edges.push(from);
        }

        Ok(())
    }

    /// Transpose the graph
    ///
    /// Changes the direction of all edges in a directed graph. Undirected
    /// graphs are left unchanged.
    pub fn transpose(&mut self) {
        if self.direction == Direction::Undirected {
            return;
        }

        let mut transposed = Vec::with_capacity(self.vertices.len());
        transposed.resize_with(self.vertices.len(), Vertex::default);

        for (from, vertex) in self.vertices.iter().enumerate() {
            for &to in &vertex.edges {
                transposed[to].edges.push(from);
            }
        }

        self.vertices = transposed;
    }

    pub(crate) fn check_vertex(&self, vertex: usize) -> Result<()> {
        if vertex < self.vertices.len() {
            Ok(())
        } else {
            Err(GraphError::InvalidVertex { vertex, len: self.vertices.len() })
        }
    }
}

impl fmt::Display for IndexGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, vertex) in self.vertices.iter().enumerate() {
            write!(f, "Vertex {}:", idx)?;
            for edge in &vertex.edges {
                write!(f, " -> {}", edge)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl Index<usize> for IndexGraph {
    type Output = Vertex;

    fn index(&self, index: usize) -> &Vertex {
        &self.vertices[index]
    }
}

impl<'g> IntoIterator for &'g IndexGraph {
    type Item = &'g Vertex;
    type IntoIter = SliceIter<'g, Vertex>;

    fn into_iter(self) -> Self::IntoIter {
        self.vertices.iter()
    }
}

impl IntoIterator for IndexGraph {
    type Item = Vertex;
    type IntoIter = VecIntoIter<Vertex>;

    fn into_iter(self) -> Self::IntoIter {
        self.vertices.into_iter()
    }
}
