/// Fuzzes both planning graphs over many random worlds: the graph invariants must hold after every
/// build and every temporary admission, a path must be found exactly when the endpoints share a
/// connected component, and A* must never be beaten on length by the other searches.
use rand::prelude::*;
use topo_planning::connectivity::Components;
use topo_planning::geometry::{corridor_samples, crosses_interior};
use topo_planning::{
    path_cost, Adjacency, ClearanceGraph, Obstacle, PlanningGraph, Point, SearchAlgorithm,
    SearchError, TemporaryEndpoints, VisibilityGraph, WorldBounds,
};

const N_WORLDS: usize = 300;
const N_QUERIES: usize = 8;

fn random_world(rng: &mut StdRng) -> (Vec<Obstacle>, WorldBounds) {
    let bounds = WorldBounds::new(rng.gen_range(4..=8), rng.gen_range(4..=8)).unwrap();
    let n_obstacles = rng.gen_range(0..=6);
    let obstacles = (0..n_obstacles)
        .map(|_| {
            let center = random_point(rng, bounds);
            Obstacle::new(center, rng.gen_range(1..=4)).unwrap()
        })
        .collect();
    (obstacles, bounds)
}

fn random_point(rng: &mut StdRng, bounds: WorldBounds) -> Point {
    Point::new(
        rng.gen_range(-bounds.half_width..=bounds.half_width),
        rng.gen_range(-bounds.half_height..=bounds.half_height),
    )
}

fn visualize_world(obstacles: &[Obstacle], bounds: WorldBounds, start: &Point, goal: &Point) {
    println!("obstacles: {:?}", obstacles);
    for y in (-bounds.half_height..=bounds.half_height).rev() {
        for x in -bounds.half_width..=bounds.half_width {
            let p = Point::new(x, y);
            if *start == p {
                print!("S");
            } else if *goal == p {
                print!("G");
            } else if obstacles.iter().any(|o| o.in_collision(x, y)) {
                print!("#");
            } else {
                print!(".");
            }
        }
        println!();
    }
}

/// Node set and neighbour sets, ignoring neighbour order.
fn same_graph(a: &Adjacency, b: &Adjacency) -> bool {
    a.len() == b.len()
        && a.iter().all(|(p, neighbours)| {
            b.contains(p) && {
                let other = b.neighbours(p);
                neighbours.len() == other.len() && neighbours.iter().all(|q| other.contains(q))
            }
        })
}

fn check_round_trip<G: PlanningGraph>(graph: &mut G, point: Point) {
    let before = graph.adjacency().clone();
    let inserted = graph.add_temporary_node(point);
    assert!(graph.adjacency().is_consistent());
    assert_eq!(inserted, graph.adjacency().is_temporary(&point));
    graph.remove_temporary_node(&point);
    assert!(same_graph(graph.adjacency(), &before));
    assert_eq!(graph.adjacency().temporary_count(), 0);
}

/// Runs every algorithm on one query and checks the answers against each other and against the
/// connected components of the graph with the endpoints spliced in.
fn check_query<G: PlanningGraph>(graph: &mut G, start: Point, goal: Point) -> bool {
    let endpoints = TemporaryEndpoints::admit(graph, &[start, goal]);
    let reachable = Components::new(&*endpoints).equiv(&start, &goal);
    let results = SearchAlgorithm::ALL.map(|algorithm| endpoints.search(start, goal, algorithm));

    for result in &results {
        match result {
            Ok(path) => {
                if !reachable {
                    return false;
                }
                assert_eq!(path.first(), Some(&start));
                assert_eq!(path.last(), Some(&goal));
                for window in path.windows(2) {
                    assert!(endpoints.neighbors(&window[0]).contains(&window[1]));
                }
            }
            Err(SearchError::NoPathFound { .. }) => {
                if reachable {
                    return false;
                }
            }
            Err(SearchError::NodeNotInGraph(p)) => {
                assert!(!endpoints.contains(p));
                assert!(!reachable);
            }
        }
    }
    if let [Ok(bfs), Ok(greedy), Ok(astar)] = &results {
        let astar_cost = path_cost(astar);
        assert!(astar_cost <= path_cost(bfs) + 1e-9);
        assert!(astar_cost <= path_cost(greedy) + 1e-9);
        assert!(astar.len() >= bfs.len());
    }
    true
}

#[test]
fn fuzz_visibility() {
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..N_WORLDS {
        let (obstacles, bounds) = random_world(&mut rng);
        let mut graph = VisibilityGraph::build(&obstacles, bounds);
        assert!(graph.adjacency().is_consistent());

        let boxes = obstacles.iter().map(Obstacle::corner_box).collect::<Vec<_>>();
        for (p, neighbours) in graph.adjacency().iter() {
            for q in neighbours {
                assert!(boxes.iter().all(|b| !crosses_interior(p, q, b)));
            }
        }

        for _ in 0..N_QUERIES {
            let start = random_point(&mut rng, bounds);
            let goal = random_point(&mut rng, bounds);
            check_round_trip(&mut graph, start);
            if !check_query(&mut graph, start, goal) {
                visualize_world(&obstacles, bounds, &start, &goal);
                panic!("search disagrees with connectivity from {} to {}", start, goal);
            }
            assert_eq!(graph.adjacency().temporary_count(), 0);
        }
    }
}

#[test]
fn fuzz_clearance() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..N_WORLDS {
        let (obstacles, bounds) = random_world(&mut rng);
        let mut graph = ClearanceGraph::build(&obstacles, bounds);
        assert!(graph.adjacency().is_consistent());

        for (p, neighbours) in graph.adjacency().iter() {
            for q in neighbours {
                for sample in corridor_samples(p, q) {
                    assert!(graph.clearance(&sample).unwrap() >= 0.8);
                    assert!(obstacles.iter().all(|o| !o.in_collision(sample.x, sample.y)));
                }
            }
        }

        for _ in 0..N_QUERIES {
            let start = random_point(&mut rng, bounds);
            let goal = random_point(&mut rng, bounds);
            check_round_trip(&mut graph, start);

            if graph.add_temporary_node(start) {
                for q in graph.neighbors(&start) {
                    for sample in corridor_samples(&start, q) {
                        assert!(graph.clearance(&sample).unwrap() >= 0.5);
                    }
                }
                graph.remove_temporary_node(&start);
            }

            if !check_query(&mut graph, start, goal) {
                visualize_world(&obstacles, bounds, &start, &goal);
                println!("{}", graph);
                panic!("search disagrees with connectivity from {} to {}", start, goal);
            }
            assert_eq!(graph.adjacency().temporary_count(), 0);
        }
    }
}

#[test]
fn fuzz_trivial_queries() {
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..N_WORLDS / 10 {
        let (obstacles, bounds) = random_world(&mut rng);
        let graph = VisibilityGraph::build(&obstacles, bounds);
        for node in graph.adjacency().nodes() {
            for algorithm in SearchAlgorithm::ALL {
                assert_eq!(graph.search(*node, *node, algorithm), Ok(vec![*node]));
            }
        }
    }
}
