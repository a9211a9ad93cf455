use topo_planning::{
    Obstacle, PlanningGraph, Point, SearchAlgorithm, VisibilityGraph, WorldBounds,
};

// In this example a path is found around a single block in the middle of the world
// +---------------------+
// |                   G |
// |                     |
// |       #####         |
// |       #####         |
// |       #####         |
// |                     |
// | S                   |
// +---------------------+
// S marks the start
// G marks the goal
fn main() {
    let obstacle = Obstacle::new(Point::new(0, 0), 4).unwrap();
    let mut graph = VisibilityGraph::build(&[obstacle], WorldBounds::square(10).unwrap());
    let start = Point::new(-9, -8);
    let goal = Point::new(9, 8);
    match graph.find_path(start, goal, SearchAlgorithm::AStar) {
        Ok(path) => {
            println!("A path has been found:");
            for p in path {
                println!("{:?}", p);
            }
        }
        Err(e) => println!("{}", e),
    }
}
