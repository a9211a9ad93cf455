//! Integer segment predicates shared by the graph builders.
use crate::world::CornerBox;
use crate::MIN_CORRIDOR_SAMPLES;
use grid_util::point::Point;
use smallvec::SmallVec;

/// Turn direction of the ordered triple (p, q, r).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Colinear,
    Clockwise,
    CounterClockwise,
}

pub fn euclidean(p1: &Point, p2: &Point) -> f64 {
    ((p2.x - p1.x) as f64).hypot((p2.y - p1.y) as f64)
}

pub fn orientation(p: &Point, q: &Point, r: &Point) -> Orientation {
    let val = (q.y as i64 - p.y as i64) * (r.x as i64 - q.x as i64)
        - (q.x as i64 - p.x as i64) * (r.y as i64 - q.y as i64);
    match val.signum() {
        0 => Orientation::Colinear,
        1 => Orientation::Clockwise,
        _ => Orientation::CounterClockwise,
    }
}

/// Whether `q` lies in the bounding box of segment pr. Only meaningful for colinear triples.
fn on_segment(p: &Point, q: &Point, r: &Point) -> bool {
    q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
}

/// Classic orientation based test. Touching endpoints and colinear overlap count as intersecting.
pub fn segments_intersect(p1: &Point, q1: &Point, p2: &Point, q2: &Point) -> bool {
    let o1 = orientation(p1, q1, p2);
    let o2 = orientation(p1, q1, q2);
    let o3 = orientation(p2, q2, p1);
    let o4 = orientation(p2, q2, q1);

    if o1 != o2 && o3 != o4 {
        return true;
    }
    (o1 == Orientation::Colinear && on_segment(p1, p2, q1))
        || (o2 == Orientation::Colinear && on_segment(p1, q2, q1))
        || (o3 == Orientation::Colinear && on_segment(p2, p1, q2))
        || (o4 == Orientation::Colinear && on_segment(p2, q1, q2))
}

/// Whether segment ab enters the open interior of the box. Sliding along an edge or touching a
/// corner does not count.
pub fn crosses_interior(a: &Point, b: &Point, corner_box: &CornerBox) -> bool {
    const EPS: f64 = 1e-9;
    let mut t_enter = 0.0_f64;
    let mut t_exit = 1.0_f64;
    let axes = [
        (
            a.x as f64,
            (b.x - a.x) as f64,
            corner_box.min.x as f64,
            corner_box.max.x as f64,
        ),
        (
            a.y as f64,
            (b.y - a.y) as f64,
            corner_box.min.y as f64,
            corner_box.max.y as f64,
        ),
    ];
    for (origin, delta, min, max) in axes {
        if delta == 0.0 {
            if origin <= min || origin >= max {
                return false;
            }
            continue;
        }
        let (t0, t1) = {
            let t_min = (min - origin) / delta;
            let t_max = (max - origin) / delta;
            if t_min < t_max {
                (t_min, t_max)
            } else {
                (t_max, t_min)
            }
        };
        t_enter = t_enter.max(t0);
        t_exit = t_exit.min(t1);
    }
    t_exit - t_enter > EPS
}

/// Grid cells visited when walking from `a` to `b`: `max(floor(len), MIN_CORRIDOR_SAMPLES)`
/// equal intervals, both ends included, coordinates truncated toward zero. The walk always starts
/// at the lexicographically smaller endpoint so the samples do not depend on argument order.
pub fn corridor_samples(a: &Point, b: &Point) -> SmallVec<[Point; 16]> {
    let (from, to) = if (a.x, a.y) <= (b.x, b.y) { (a, b) } else { (b, a) };
    let intervals = (euclidean(from, to) as usize).max(MIN_CORRIDOR_SAMPLES);
    let (dx, dy) = ((to.x - from.x) as f64, (to.y - from.y) as f64);
    (0..=intervals)
        .map(|i| {
            let t = i as f64 / intervals as f64;
            Point::new(
                (from.x as f64 + t * dx) as i32,
                (from.y as f64 + t * dy) as i32,
            )
        })
        .collect()
}
