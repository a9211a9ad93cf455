//! Static description of a level: the rectangular world and the square obstacles inside it.
use crate::error::WorldError;
use grid_util::point::Point;

/// Half extents of the world rectangle, centered on the origin. Valid coordinates satisfy
/// `-half_width <= x <= half_width` and `-half_height <= y <= half_height`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldBounds {
    pub half_width: i32,
    pub half_height: i32,
}

impl WorldBounds {
    pub fn new(half_width: i32, half_height: i32) -> Result<WorldBounds, WorldError> {
        if half_width < 0 || half_height < 0 {
            return Err(WorldError::EmptyBounds {
                half_width,
                half_height,
            });
        }
        Ok(WorldBounds {
            half_width,
            half_height,
        })
    }

    /// Square world with the same limit on both axes.
    pub fn square(limit: i32) -> Result<WorldBounds, WorldError> {
        WorldBounds::new(limit, limit)
    }

    pub fn contains(&self, point: &Point) -> bool {
        point.x.abs() <= self.half_width && point.y.abs() <= self.half_height
    }

    /// Corners in counter-clockwise order starting at the bottom left.
    pub fn corners(&self) -> [Point; 4] {
        let (w, h) = (self.half_width, self.half_height);
        [
            Point::new(-w, -h),
            Point::new(w, -h),
            Point::new(w, h),
            Point::new(-w, h),
        ]
    }

    /// Every integer cell of the world, column by column.
    pub fn cells(&self) -> impl Iterator<Item = Point> + '_ {
        (-self.half_width..=self.half_width)
            .flat_map(move |x| {
                (-self.half_height..=self.half_height).map(move |y| Point::new(x, y))
            })
    }

    pub fn width(&self) -> usize {
        (2 * self.half_width + 1) as usize
    }

    pub fn height(&self) -> usize {
        (2 * self.half_height + 1) as usize
    }
}

/// Axis-aligned square blocker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Obstacle {
    center: Point,
    side_length: u32,
}

impl Obstacle {
    pub fn new(center: Point, side_length: u32) -> Result<Obstacle, WorldError> {
        if side_length == 0 {
            return Err(WorldError::ZeroSideLength { center });
        }
        Ok(Obstacle {
            center,
            side_length,
        })
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn side_length(&self) -> u32 {
        self.side_length
    }

    pub fn half_extent(&self) -> f64 {
        self.side_length as f64 / 2.0
    }

    /// Closed box test: points on the boundary collide.
    pub fn in_collision(&self, x: i32, y: i32) -> bool {
        let half = self.half_extent();
        ((x - self.center.x) as f64).abs() <= half && ((y - self.center.y) as f64).abs() <= half
    }

    /// Euclidean distance from `point` to the closest point of the box, zero inside it.
    pub fn distance_to(&self, point: &Point) -> f64 {
        let half = self.half_extent();
        let (cx, cy) = (self.center.x as f64, self.center.y as f64);
        let (px, py) = (point.x as f64, point.y as f64);
        let closest_x = px.clamp(cx - half, cx + half);
        let closest_y = py.clamp(cy - half, cy + half);
        (px - closest_x).hypot(py - closest_y)
    }

    /// The integer corner square used as graph nodes and as the blocking polygon of the
    /// visibility test.
    pub fn corner_box(&self) -> CornerBox {
        let half = self.half_extent();
        let (cx, cy) = (self.center.x as f64, self.center.y as f64);
        // `as` truncates toward zero. With odd sides each corner moves half a cell toward the
        // origin, which is not necessarily toward the center, so a corner can leave the box.
        CornerBox {
            min: Point::new((cx - half) as i32, (cy - half) as i32),
            max: Point::new((cx + half) as i32, (cy + half) as i32),
        }
    }
}

/// Integer square spanned by an obstacle's four corners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CornerBox {
    pub min: Point,
    pub max: Point,
}

impl CornerBox {
    /// Corners in counter-clockwise order starting at the bottom left, so consecutive pairs
    /// (wrapping around) are the box edges.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.min.x, self.min.y),
            Point::new(self.max.x, self.min.y),
            Point::new(self.max.x, self.max.y),
            Point::new(self.min.x, self.max.y),
        ]
    }

    pub fn edges(&self) -> [(Point, Point); 4] {
        let c = self.corners();
        [(c[0], c[1]), (c[1], c[2]), (c[2], c[3]), (c[3], c[0])]
    }

    pub fn has_corner(&self, point: &Point) -> bool {
        self.corners().contains(point)
    }

    /// Strict containment, the boundary is outside.
    pub fn interior_contains(&self, x: f64, y: f64) -> bool {
        (self.min.x as f64) < x
            && x < (self.max.x as f64)
            && (self.min.y as f64) < y
            && y < (self.max.y as f64)
    }
}
