//! Obstacle layouts for tests, benchmarks and demos of `topo_planning`.
//!
//! A layout file starts with a `bounds <half_width> <half_height>` line followed by tab separated
//! `x`, `y`, `side` rows, one per square obstacle. Lines starting with `#` are ignored. Layouts
//! live under `layouts/<group>/<name>.layout` and are addressed as `<group>/<name>`.
use csv::{ReaderBuilder, WriterBuilder};
use grid_util::point::Point;
use log::{info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

const LAYOUT_ROOT: &str = "layouts/";
const LAYOUT_EXTENSION: &str = "layout";
/// Random placement gives up after this many attempts per requested obstacle.
pub const ATTEMPTS_PER_OBSTACLE: usize = 50;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("could not read layout: {0}")]
    Io(#[from] io::Error),

    #[error("malformed obstacle row: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed header line `{0}`, expected `bounds <half_width> <half_height>`")]
    Header(String),

    #[error("no layout named {0}")]
    UnknownLayout(String),

    #[error("invalid world: {0}")]
    World(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
struct Row {
    x: i32,
    y: i32,
    side: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObstacleRecord {
    pub center: Point,
    pub side_length: u32,
}

impl ObstacleRecord {
    fn half(&self) -> f64 {
        self.side_length as f64 / 2.0
    }

    /// Whether `point` lies within `margin` of the closed obstacle box.
    fn covers(&self, point: &Point, margin: f64) -> bool {
        let reach = self.half() + margin;
        ((point.x - self.center.x) as f64).abs() <= reach
            && ((point.y - self.center.y) as f64).abs() <= reach
    }

    /// Whether the two boxes are closer than `gap` along both axes.
    fn crowds(&self, other: &ObstacleRecord, gap: f64) -> bool {
        let reach = self.half() + other.half() + gap;
        ((self.center.x - other.center.x) as f64).abs() < reach
            && ((self.center.y - other.center.y) as f64).abs() < reach
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub name: String,
    pub half_width: i32,
    pub half_height: i32,
    pub obstacles: Vec<ObstacleRecord>,
}

fn parse_header(line: &str) -> Result<(i32, i32), LayoutError> {
    let header_error = || LayoutError::Header(line.to_owned());
    let mut parts = line.split_whitespace();
    if parts.next() != Some("bounds") {
        return Err(header_error());
    }
    let mut next_value = || {
        parts
            .next()
            .and_then(|v| v.parse::<i32>().ok())
            .ok_or_else(header_error)
    };
    let half_width = next_value()?;
    let half_height = next_value()?;
    if half_width < 0 || half_height < 0 {
        return Err(LayoutError::World(format!(
            "negative bounds ({}, {})",
            half_width, half_height
        )));
    }
    Ok((half_width, half_height))
}

/// Parses layout text. `name` is only used to label the result.
pub fn parse_layout(name: &str, text: &str) -> Result<Layout, LayoutError> {
    let mut lines = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'));
    let header = lines.next().ok_or_else(|| LayoutError::Header(String::new()))?;
    let (half_width, half_height) = parse_header(header)?;

    let remaining_data = lines.collect::<Vec<_>>().join("\n");
    let mut csv_reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_reader(remaining_data.as_bytes());
    let mut obstacles = Vec::new();
    for result in csv_reader.deserialize() {
        let row: Row = result?;
        if row.side == 0 {
            return Err(LayoutError::World(format!(
                "obstacle at ({}, {}) has zero side length",
                row.x, row.y
            )));
        }
        obstacles.push(ObstacleRecord {
            center: Point::new(row.x, row.y),
            side_length: row.side,
        });
    }
    Ok(Layout {
        name: name.to_owned(),
        half_width,
        half_height,
        obstacles,
    })
}

/// Writes a layout in the format read by [parse_layout].
pub fn write_layout<W: Write>(layout: &Layout, mut out: W) -> Result<(), LayoutError> {
    writeln!(out, "# {}", layout.name)?;
    writeln!(out, "bounds {} {}", layout.half_width, layout.half_height)?;
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(out);
    for obstacle in &layout.obstacles {
        writer.serialize(Row {
            x: obstacle.center.x,
            y: obstacle.center.y,
            side: obstacle.side_length,
        })?;
    }
    writer.flush()?;
    Ok(())
}

fn layout_path(name: &str) -> PathBuf {
    Path::new(LAYOUT_ROOT).join(format!("{}.{}", name, LAYOUT_EXTENSION))
}

pub fn load_layout(name: &str) -> Result<Layout, LayoutError> {
    let text = fs::read_to_string(layout_path(name))?;
    parse_layout(name, &text)
}

/// Names of every layout under the layout root, sorted.
pub fn get_layout_names() -> Result<Vec<String>, LayoutError> {
    let root = Path::new(LAYOUT_ROOT).canonicalize()?;
    let mut names = Vec::new();
    for entry in WalkDir::new(&root).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(LAYOUT_EXTENSION) {
            continue;
        }
        let Ok(rel_path) = path.with_extension("").strip_prefix(&root).map(Path::to_path_buf)
        else {
            continue;
        };
        if rel_path.components().count() >= 2 {
            let name = rel_path
                .components()
                .filter_map(|c| c.as_os_str().to_str())
                .collect::<Vec<_>>()
                .join("/");
            names.push(name);
        }
    }
    Ok(names)
}

pub fn get_layout(name: &str) -> Result<Layout, LayoutError> {
    if get_layout_names()?.iter().any(|n| n == name) {
        load_layout(name)
    } else {
        Err(LayoutError::UnknownLayout(name.to_owned()))
    }
}

/// Parameters of [RandomLayout::generate].
#[derive(Debug, Clone, PartialEq)]
pub struct RandomLayout {
    /// Default: 10
    pub half_width: i32,
    /// Default: 10
    pub half_height: i32,
    /// Requested number of obstacles. Default: 6
    pub count: usize,
    /// Default: 2..=4
    pub sides: RangeInclusive<u32>,
    /// Minimum free space kept between two obstacles. Default: 2.0
    pub gap: f64,
    /// Cells that must stay at least one cell away from every obstacle, such as spawn points.
    /// Default: the origin
    pub keep_clear: Vec<Point>,
}

impl Default for RandomLayout {
    fn default() -> Self {
        Self {
            half_width: 10,
            half_height: 10,
            count: 6,
            sides: 2..=4,
            gap: 2.0,
            keep_clear: vec![Point::new(0, 0)],
        }
    }
}

impl RandomLayout {
    pub fn with_bounds(mut self, half_width: i32, half_height: i32) -> Self {
        self.half_width = half_width;
        self.half_height = half_height;
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_sides(mut self, sides: RangeInclusive<u32>) -> Self {
        self.sides = sides;
        self
    }

    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_keep_clear(mut self, keep_clear: Vec<Point>) -> Self {
        self.keep_clear = keep_clear;
        self
    }

    /// Places up to `count` obstacles at random, never overlapping, crowding or covering a kept
    /// clear cell. Gives up after `count * ATTEMPTS_PER_OBSTACLE` attempts and returns what was
    /// placed so far.
    pub fn generate<R: Rng>(&self, rng: &mut R, name: &str) -> Layout {
        let mut obstacles: Vec<ObstacleRecord> = Vec::with_capacity(self.count);
        let max_attempts = self.count * ATTEMPTS_PER_OBSTACLE;
        // Centers stay two cells inside the border.
        let (x_reach, y_reach) = ((self.half_width - 2).max(0), (self.half_height - 2).max(0));
        let sides = (*self.sides.start()).max(1)..=(*self.sides.end()).max(1);

        let mut attempts = 0;
        while obstacles.len() < self.count && attempts < max_attempts {
            attempts += 1;
            let candidate = ObstacleRecord {
                center: Point::new(
                    rng.gen_range(-x_reach..=x_reach),
                    rng.gen_range(-y_reach..=y_reach),
                ),
                side_length: rng.gen_range(sides.clone()),
            };
            let blocked = self.keep_clear.iter().any(|p| candidate.covers(p, 1.0))
                || obstacles.iter().any(|o| o.crowds(&candidate, self.gap));
            if !blocked {
                obstacles.push(candidate);
            }
        }
        if obstacles.len() < self.count {
            warn!(
                "Placed {} of {} obstacles in {} after {} attempts",
                obstacles.len(),
                self.count,
                name,
                attempts
            );
        } else {
            info!("Placed {} obstacles in {} after {} attempts", obstacles.len(), name, attempts);
        }
        Layout {
            name: name.to_owned(),
            half_width: self.half_width,
            half_height: self.half_height,
            obstacles,
        }
    }
}
