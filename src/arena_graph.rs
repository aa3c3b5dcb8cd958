use std::marker::PhantomData;
use std::ops::Index;

use id_arena::Arena;
use id_arena::ArenaBehavior;

use super::GraphError;
use super::IndexGraph;
use super::Result;
use super::Vertex;

/// A directed adjacency-list-based graph data structure wrapping an `Arena`
/// from the `id-arena` crate.
///
/// Stores graph vertices as lists of outgoing edges by their index in the
/// arena, and translates results back to `Id`s.
#[derive(Debug, Clone)]
pub struct ArenaGraph<'a, T, A: ArenaBehavior> {
    graph: IndexGraph,
    arena_id: u32,
    phantom: PhantomData<&'a Arena<T, A>>
}

/// A builder object that allows to easily add edges to a graph
///
/// It stores a vertex id, so that edges can be added specifying only the
/// target or source vertex.
///
/// See `ArenaGraph::from_graph()` for usage examples
#[derive(Debug)]
pub struct ArenaGraphBuilder<'g, 'a, T, A: ArenaBehavior> {
    arena_graph: &'g mut ArenaGraph<'a, T, A>,
    index: A::Id
}

impl<'a, T, A: ArenaBehavior> ArenaGraphBuilder<'_, 'a, T, A> {
    /// Returns a reference to the stored graph
    pub fn as_graph(&self) -> &ArenaGraph<'a, T, A> {
        self.arena_graph
    }

    /// Returns the stored id
    pub fn index(&self) -> A::Id {
        self.index
    }

    /// Add an edge from the stored id to the passed id
    ///
    /// This method does not check for duplicate edges. Fails if `index`
    /// belongs to a different arena.
    pub fn add_out_edge(&mut self, index: A::Id) -> Result<()> {
        let to = self.arena_graph.check_id(index)?;
        self.arena_graph.graph.add_edge(A::index(self.index), to)
    }

    /// Add an edge from the passed id to the stored id
    ///
    /// This method does not check for duplicate edges. Fails if `index`
    /// belongs to a different arena.
    pub fn add_in_edge(&mut self, index: A::Id) -> Result<()> {
        let from = self.arena_graph.check_id(index)?;
        self.arena_graph.graph.add_edge(from, A::index(self.index))
    }
}

impl<'a, T, A: ArenaBehavior> ArenaGraph<'a, T, A> {
    /// Create a new graph from an existing `Arena`-based graph-like data
    /// structure
    ///
    /// The given closure will be called once for every element of `g`, with an
    /// `ArenaGraphBuilder` instance so that edges can be easily added.
    ///
    /// # Example
    ///
    /// This example creates a graph of dependencies in a hypothetical build
    /// tool, with edges from a dependency to the targets that use it, and
    /// sorts it into a valid build order.
    ///
    /// ```rust
    /// use id_arena::Arena;
    /// use id_arena::Id;
    /// use graph_walk::ArenaGraph;
    ///
    /// struct Target { name: &'static str, deps: Vec<Id<Target>> }
    /// impl Target {
    ///     fn new(name: &'static str) -> Self {
    ///         Target { name, deps: Vec::new() }
    ///     }
    /// }
    ///
    /// let mut arena: Arena<Target> = Arena::new();
    ///
    /// let program = arena.alloc(Target::new("program"));
    /// let main_c = arena.alloc(Target::new("main.c"));
    /// let util_c = arena.alloc(Target::new("util.c"));
    /// let util_h = arena.alloc(Target::new("util.h"));
    ///
    /// arena[program].deps.extend_from_slice(&[main_c, util_c]);
    /// arena[main_c].deps.push(util_h);
    /// arena[util_c].deps.push(util_h);
    ///
    /// let g = ArenaGraph::from_graph(&arena, |mut builder, target| {
    ///     for &dep in &target.deps {
    ///         builder.add_in_edge(dep)?;
    ///     }
    ///     Ok(())
    /// })?;
    ///
    /// let order = g.toposort().map_err(|_| "dependency cycle")?;
    /// let names: Vec<_> = order.iter().map(|&id| arena[id].name).collect();
    /// assert_eq!(names, ["util.h", "util.c", "main.c", "program"]);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_graph<F>(g: &'a Arena<T, A>, mut f: F) -> Result<ArenaGraph<'a, T, A>>
        where F: FnMut(ArenaGraphBuilder<'_, 'a, T, A>, &T) -> Result<()>
    {
        let mut arena_graph = ArenaGraph {
            graph: IndexGraph::directed(g.len()),
            arena_id: 0,
            phantom: PhantomData
        };

        for (id, element) in g.iter() {
            arena_graph.arena_id = A::arena_id(id);

            let builder = ArenaGraphBuilder {
                arena_graph: &mut arena_graph,
                index: id,
            };

            f(builder, element)?;
        }

        Ok(arena_graph)
    }

    /// Returns the id of the arena this graph belongs to
    pub fn arena_id(&self) -> u32 {
        self.arena_id
    }

    /// Returns a reference to the underlying `IndexGraph`
    pub fn as_index_graph(&self) -> &IndexGraph {
        &self.graph
    }

    /// Returns the underlying `IndexGraph`
    pub fn into_index_graph(self) -> IndexGraph {
        self.graph
    }

    /// Breadth-first traversal from `start`
    ///
    /// See `IndexGraph::bfs()`. Fails if `start` belongs to a different arena.
    pub fn bfs(&self, start: A::Id) -> Result<Vec<A::Id>> {
        let order = self.graph.bfs(self.check_id(start)?)?;
        Ok(self.to_ids(order))
    }

    /// Depth-first traversal from `start`
    ///
    /// See `IndexGraph::dfs()`. Fails if `start` belongs to a different arena.
    pub fn dfs(&self, start: A::Id) -> Result<Vec<A::Id>> {
        let order = self.graph.dfs(self.check_id(start)?)?;
        Ok(self.to_ids(order))
    }

    /// Returns `true` if the graph contains a cycle
    pub fn has_cycle(&self) -> bool {
        self.graph.has_cycle()
    }

    /// Perform a topological sort
    ///
    /// Returns the sorted ids as `Ok(sorted)`, or the first cycle found as
    /// `Err(cycle)`.
    ///
    /// The difference between this function and `IndexGraph::toposort()`
    /// is that this function returns `id-arena` ids instead of indices.
    pub fn toposort(&self) -> std::result::Result<Vec<A::Id>, Vec<A::Id>> {
        self.graph.finish_order()
            .map(|sorted| self.to_ids(sorted))
            .map_err(|cycle| self.to_ids(cycle))
    }

    fn check_id(&self, id: A::Id) -> Result<usize> {
        let found = A::arena_id(id);
        if found != self.arena_id {
            return Err(GraphError::ForeignId { expected: self.arena_id, found });
        }

        Ok(A::index(id))
    }

    fn to_ids(&self, indices: Vec<usize>) -> Vec<A::Id> {
        let arena_id = self.arena_id;

        indices.into_iter()
            .map(|idx| A::new_id(arena_id, idx))
            .collect()
    }
}

impl<T, A: ArenaBehavior> Index<A::Id> for ArenaGraph<'_, T, A> {
    type Output = Vertex;

    fn index(&self, id: A::Id) -> &Vertex {
        &self.graph[A::index(id)]
    }
}

#[cfg(test)]
mod tests {
    use id_arena::{Arena, ArenaBehavior, Id};

    use crate::{ArenaGraph, GraphError};

    struct Task {
        next: Vec<Id<Task>>,
    }

    fn chain() -> (Arena<Task>, Vec<Id<Task>>) {
        let mut arena = Arena::new();
        let ids: Vec<_> = (0..4).map(|_| arena.alloc(Task { next: Vec::new() })).collect();

        arena[ids[0]].next = vec![ids[1], ids[2]];
        arena[ids[1]].next = vec![ids[3]];
        arena[ids[2]].next = vec![ids[3]];

        (arena, ids)
    }

    fn build(arena: &Arena<Task>) -> ArenaGraph<'_, Task, id_arena::DefaultArenaBehavior<Task>> {
        ArenaGraph::from_graph(arena, |mut builder, task| {
            for &next in &task.next {
                builder.add_out_edge(next)?;
            }
            Ok(())
        }).unwrap()
    }

    #[test]
    fn traversals_return_ids() {
        let (arena, ids) = chain();
        let graph = build(&arena);

        assert_eq!(graph.bfs(ids[0]).unwrap(), vec![ids[0], ids[1], ids[2], ids[3]]);
        assert_eq!(graph.dfs(ids[2]).unwrap(), vec![ids[2], ids[3]]);
        assert_eq!(graph[ids[0]].edges, vec![1, 2]);
    }

    #[test]
    fn toposort_returns_ids() {
        let (arena, ids) = chain();
        let graph = build(&arena);

        assert!(!graph.has_cycle());
        assert_eq!(graph.toposort(), Ok(vec![ids[0], ids[2], ids[1], ids[3]]));
    }

    #[test]
    fn cycle_returns_ids() {
        let (mut arena, ids) = chain();
        arena[ids[3]].next.push(ids[1]);
        let graph = build(&arena);

        assert!(graph.has_cycle());
        assert_eq!(graph.toposort(), Err(vec![ids[1], ids[3]]));
    }

    #[test]
    fn id_from_larger_arena_is_rejected() {
        let (arena, ids) = chain();
        let mut bigger: Arena<Task> = Arena::new();
        let foreign: Vec<_> = (0..6).map(|_| bigger.alloc(Task { next: Vec::new() })).collect();

        let res = ArenaGraph::from_graph(&arena, |mut builder, _| builder.add_out_edge(foreign[5]));

        let expected = id_arena::DefaultArenaBehavior::<Task>::arena_id(ids[0]);
        let found = id_arena::DefaultArenaBehavior::<Task>::arena_id(foreign[5]);
        assert_eq!(res.err(), Some(GraphError::ForeignId { expected, found }));
    }

    #[test]
    fn in_range_id_from_other_arena_is_rejected() {
        let (arena, ids) = chain();
        let (other, foreign) = chain();
        assert_eq!(other.len(), arena.len());

        let res = ArenaGraph::from_graph(&arena, |mut builder, _| builder.add_in_edge(foreign[2]));
        assert!(matches!(res.err(), Some(GraphError::ForeignId { .. })));

        let graph = build(&arena);
        assert!(matches!(graph.bfs(foreign[0]), Err(GraphError::ForeignId { .. })));
        assert!(matches!(graph.dfs(foreign[0]), Err(GraphError::ForeignId { .. })));
        assert_eq!(graph.bfs(ids[0]).unwrap().len(), 4);
    }
}
