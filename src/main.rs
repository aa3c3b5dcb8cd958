use graph_walk::{Direction, IndexGraph, Result};

fn main() -> Result<()> {
    let mut graph = IndexGraph::undirected(5);

    graph.add_edge(0, 1)?;
    graph.add_edge(0, 2)?;
    graph.add_edge(0, 3)?;
    graph.add_edge(1, 2)?;

    print!("{}", graph);

    println!("bfs: {:?}", graph.bfs(0)?);
    println!("dfs: {:?}", graph.dfs(0)?);
    println!("cyclic: {}", graph.has_cycle());

    let dag = IndexGraph::from_edges(4, Direction::Directed, &[
        (0, 1),
        (0, 2),
        (1, 3),
        (2, 3),
    ])?;

    println!("toposort: {:?}", dag.toposort()?);

    Ok(())
}
