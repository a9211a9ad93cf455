use rand::{rngs::StdRng, SeedableRng};
use std::time::{Duration, Instant};
use topo_planning::{
    path_cost, ClearanceGraph, Obstacle, PlanningGraph, Point, SearchAlgorithm, VisibilityGraph,
    WorldBounds,
};
use topo_planning_layouts::*;

fn to_world(layout: &Layout) -> Option<(Vec<Obstacle>, WorldBounds)> {
    let obstacles = layout
        .obstacles
        .iter()
        .map(|record| Obstacle::new(record.center, record.side_length))
        .collect::<Result<Vec<_>, _>>()
        .ok()?;
    let bounds = WorldBounds::new(layout.half_width, layout.half_height).ok()?;
    Some((obstacles, bounds))
}

fn run_queries<G: PlanningGraph>(graph: &mut G, bounds: WorldBounds) -> (usize, f64) {
    let (w, h) = (bounds.half_width - 1, bounds.half_height - 1);
    let queries = [
        (Point::new(-w, -h), Point::new(w, h)),
        (Point::new(-w, h), Point::new(w, -h)),
        (Point::new(-w, 0), Point::new(w, 0)),
    ];
    let mut found = 0;
    let mut total = 0.0;
    for (start, goal) in queries {
        if let Ok(path) = graph.find_path(start, goal, SearchAlgorithm::AStar) {
            found += 1;
            total += path_cost(&path);
        }
    }
    (found, total)
}

fn run_layout(layout: &Layout) -> Duration {
    let Some((obstacles, bounds)) = to_world(layout) else {
        println!("\tskipping invalid layout");
        return Duration::ZERO;
    };
    let before = Instant::now();
    let mut visibility = VisibilityGraph::build(&obstacles, bounds);
    let mut clearance = ClearanceGraph::build(&obstacles, bounds);
    let (vis_found, vis_cost) = run_queries(&mut visibility, bounds);
    let (cl_found, cl_cost) = run_queries(&mut clearance, bounds);
    let elapsed = before.elapsed();
    println!(
        "\tvisibility: {} nodes, {}/3 paths, length {:.2}",
        visibility.node_count(),
        vis_found,
        vis_cost
    );
    println!(
        "\tclearance: {} nodes, {}/3 paths, length {:.2}",
        clearance.node_count(),
        cl_found,
        cl_cost
    );
    println!("\tElapsed time: {:.2?}", elapsed);
    elapsed
}

fn main() {
    let mut total_time = Duration::ZERO;
    match get_layout_names() {
        Ok(names) => {
            for name in names {
                println!("Layout name: {}", name);
                match get_layout(&name) {
                    Ok(layout) => total_time += run_layout(&layout),
                    Err(e) => println!("\t{}", e),
                }
            }
        }
        Err(e) => println!("Could not list layouts: {}", e),
    }

    let mut rng = StdRng::seed_from_u64(0);
    let generator = RandomLayout::default().with_count(8);
    for i in 0..4 {
        let layout = generator.generate(&mut rng, &format!("random/{i}"));
        println!("Layout name: {} ({} obstacles)", layout.name, layout.obstacles.len());
        total_time += run_layout(&layout);
        if i == 0 {
            let mut out = Vec::new();
            if write_layout(&layout, &mut out).is_ok() {
                println!("{}", String::from_utf8_lossy(&out));
            }
        }
    }
    println!("Total time: {:.2?}", total_time);
}
