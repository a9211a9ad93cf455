use topo_planning::{
    path_cost, ClearanceGraph, Obstacle, PlanningGraph, Point, SearchAlgorithm, VisibilityGraph,
    WorldBounds,
};

// Runs every search on both graphs for the same query and prints the resulting route lengths.
// The visibility graph gives the shortest routes, the clearance graph routes that keep away from
// the blocks.
fn report<G: PlanningGraph>(graph: &mut G, start: Point, goal: Point) {
    println!(
        "{} graph: {} nodes, {} edges",
        graph.kind(),
        graph.node_count(),
        graph.edge_count()
    );
    for algorithm in SearchAlgorithm::ALL {
        match graph.find_path(start, goal, algorithm) {
            Ok(path) => println!(
                "\t{:>6}: {:>2} waypoints, length {:.2}",
                algorithm,
                path.len(),
                path_cost(&path)
            ),
            Err(e) => println!("\t{:>6}: {}", algorithm, e),
        }
    }
}

fn main() {
    let obstacles = [
        Obstacle::new(Point::new(-5, 4), 4).unwrap(),
        Obstacle::new(Point::new(3, 5), 3).unwrap(),
        Obstacle::new(Point::new(0, -3), 5).unwrap(),
        Obstacle::new(Point::new(6, -5), 2).unwrap(),
    ];
    let bounds = WorldBounds::square(10).unwrap();
    let start = Point::new(-8, -8);
    let goal = Point::new(8, 8);

    let mut visibility = VisibilityGraph::build(&obstacles, bounds);
    report(&mut visibility, start, goal);

    let mut clearance = ClearanceGraph::build(&obstacles, bounds);
    report(&mut clearance, start, goal);
    println!("{}", clearance);
}
