use topo_planning::connectivity::reachable;
use topo_planning::geometry::corridor_samples;
use topo_planning::{
    path_cost, ClearanceGraph, Obstacle, PlanningGraph, Point, SearchAlgorithm, SearchError,
    VisibilityGraph, WorldBounds,
};
use topo_planning_layouts::{get_layout, get_layout_names, Layout, LayoutError};

fn load_world(layout: &Layout) -> (Vec<Obstacle>, WorldBounds) {
    let obstacles = layout
        .obstacles
        .iter()
        .map(|record| Obstacle::new(record.center, record.side_length).unwrap())
        .collect();
    let bounds = WorldBounds::new(layout.half_width, layout.half_height).unwrap();
    (obstacles, bounds)
}

/// Two free cells one step inside opposite world corners.
fn far_corners(bounds: WorldBounds) -> (Point, Point) {
    (
        Point::new(1 - bounds.half_width, 1 - bounds.half_height),
        Point::new(bounds.half_width - 1, bounds.half_height - 1),
    )
}

#[test]
fn every_layout_loads() {
    let names = get_layout_names().unwrap();
    assert!(names.iter().any(|n| n == "arena/single"));
    assert!(names.iter().any(|n| n == "maze/scatter"));
    for name in names {
        let layout = get_layout(&name).unwrap();
        assert!(!layout.obstacles.is_empty(), "{} has no obstacles", name);
    }
    assert!(matches!(
        get_layout("arena/missing"),
        Err(LayoutError::UnknownLayout(_))
    ));
}

#[test]
fn single_obstacle_scenario() {
    let (obstacles, bounds) = load_world(&get_layout("arena/single").unwrap());
    let obstacle = obstacles[0];
    assert!(obstacle.in_collision(0, 0));
    assert!(!obstacle.in_collision(3, 3));

    let mut graph = VisibilityGraph::build(&obstacles, bounds);
    assert_eq!(graph.node_count(), 8);
    let path = graph
        .find_path(Point::new(-10, -10), Point::new(10, 10), SearchAlgorithm::AStar)
        .unwrap();
    for window in path.windows(2) {
        for sample in corridor_samples(&window[0], &window[1]) {
            // The path may run along the outline, never through the inside
            let inside = (sample.x.abs() < 2) && (sample.y.abs() < 2);
            assert!(!inside, "{} lies inside the obstacle", sample);
        }
    }

    assert_eq!(
        graph.search(Point::new(0, 5), Point::new(10, 10), SearchAlgorithm::BreadthFirst),
        Err(SearchError::NodeNotInGraph(Point::new(0, 5)))
    );
}

#[test]
fn visibility_queries_on_every_layout() {
    for name in get_layout_names().unwrap() {
        let (obstacles, bounds) = load_world(&get_layout(&name).unwrap());
        let mut graph = VisibilityGraph::build(&obstacles, bounds);
        assert!(graph.adjacency().is_consistent());
        assert!(graph.node_count() <= 4 * obstacles.len() + 4);

        let (start, goal) = far_corners(bounds);
        let paths = SearchAlgorithm::ALL.map(|algorithm| {
            graph
                .find_path(start, goal, algorithm)
                .unwrap_or_else(|e| panic!("{} on {}: {}", algorithm, name, e))
        });
        let astar_cost = path_cost(&paths[2]);
        println!(
            "{}: bfs {:.2}, greedy {:.2}, a_star {:.2}",
            name,
            path_cost(&paths[0]),
            path_cost(&paths[1]),
            astar_cost
        );
        assert!(astar_cost <= path_cost(&paths[0]) + 1e-9);
        assert!(astar_cost <= path_cost(&paths[1]) + 1e-9);
        assert_eq!(graph.adjacency().temporary_count(), 0);
    }
}

#[test]
fn clearance_queries_on_every_layout() {
    for name in get_layout_names().unwrap() {
        let (obstacles, bounds) = load_world(&get_layout(&name).unwrap());
        let mut graph = ClearanceGraph::build(&obstacles, bounds);
        assert!(graph.adjacency().is_consistent());

        let (start, goal) = far_corners(bounds);
        let connected = {
            graph.add_temporary_node(start);
            graph.add_temporary_node(goal);
            let connected = reachable(&graph, &start, &goal);
            graph.remove_temporary_node(&start);
            graph.remove_temporary_node(&goal);
            connected
        };
        match graph.find_path(start, goal, SearchAlgorithm::AStar) {
            Ok(path) => {
                assert!(connected);
                for window in path.windows(2) {
                    for sample in corridor_samples(&window[0], &window[1]) {
                        assert!(graph.clearance(&sample).unwrap() >= 0.5);
                    }
                }
            }
            Err(e) => {
                assert!(!connected, "{} on {}", e, name);
            }
        }
    }
}

#[test]
fn clearance_paths_keep_away_from_pillars() {
    let (obstacles, bounds) = load_world(&get_layout("arena/pillars").unwrap());
    let mut clearance = ClearanceGraph::build(&obstacles, bounds);
    let mut visibility = VisibilityGraph::build(&obstacles, bounds);
    let (start, goal) = (Point::new(0, -9), Point::new(0, 9));

    let safe = clearance
        .find_path(start, goal, SearchAlgorithm::AStar)
        .unwrap();
    let short = visibility
        .find_path(start, goal, SearchAlgorithm::AStar)
        .unwrap();
    assert!(path_cost(&short) <= path_cost(&safe) + 1e-9);
    // Between the pillars the safe route keeps to the midline
    for p in safe.iter().filter(|p| p.y.abs() <= 2) {
        assert!(clearance.clearance(p).unwrap() >= 2.0);
    }
}
