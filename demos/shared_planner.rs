use std::thread;
use topo_planning::{
    ClearanceGraph, Obstacle, PlanningGraph, Point, SearchAlgorithm, SharedPlanner, WorldBounds,
};

// Several agents chasing the same target from different corners, each on its own thread and with
// its own search algorithm, all sharing one clearance graph.
fn main() {
    let obstacles = [
        Obstacle::new(Point::new(-4, 0), 4).unwrap(),
        Obstacle::new(Point::new(4, 0), 4).unwrap(),
    ];
    let graph = ClearanceGraph::build(&obstacles, WorldBounds::square(10).unwrap());
    let planner = SharedPlanner::new(graph);
    let target = Point::new(0, 0);

    let agents = [
        (Point::new(-8, 8), SearchAlgorithm::BreadthFirst),
        (Point::new(8, 8), SearchAlgorithm::Greedy),
        (Point::new(-8, -8), SearchAlgorithm::AStar),
        (Point::new(0, 8), SearchAlgorithm::BreadthFirst),
    ];
    let handles = agents
        .into_iter()
        .map(|(position, algorithm)| {
            let planner = planner.clone();
            thread::spawn(move || {
                (
                    position,
                    algorithm,
                    planner.find_path(position, target, algorithm),
                )
            })
        })
        .collect::<Vec<_>>();

    for handle in handles {
        let Ok((position, algorithm, result)) = handle.join() else {
            continue;
        };
        match result {
            Ok(path) => println!("{} from {}: {} steps", algorithm, position, path.len() - 1),
            Err(e) => println!("{} from {}: {}", algorithm, position, e),
        }
    }
    let leftover = planner.with_graph(|graph| graph.adjacency().temporary_count());
    println!("temporary nodes left behind: {}", leftover);
}
