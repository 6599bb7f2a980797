//! Obstacle-avoiding route planner.
//!
//! Every parsable flood report becomes a disk obstacle; the planner builds
//! a visibility graph over the disk boundaries in a local planar projection
//! and searches it with A*. The result is a raw geometric path; road
//! snapping happens afterwards against the external API.

use pathfinding::prelude::astar;

use crate::core::error::{AppError, Result};
use crate::shared::constants::{EARTH_RADIUS_METERS, OBSTACLE_RADIUS_METERS};
use crate::shared::geo::parse_lat_lng;

/// Number of boundary nodes generated per obstacle disk
const NODES_PER_OBSTACLE: usize = 16;

/// Boundary nodes sit slightly outside the disk so edges between them
/// clear the obstacle itself
const NODE_RADIUS_FACTOR: f64 = 1.1;

/// A WGS84 coordinate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Disk obstacle in projected (meter) coordinates
#[derive(Debug, Clone, Copy)]
struct Obstacle {
    x: f64,
    y: f64,
    radius: f64,
}

impl Obstacle {
    fn contains(&self, x: f64, y: f64) -> bool {
        (x - self.x).hypot(y - self.y) < self.radius
    }
}

/// Equirectangular projection centered on the route origin.
///
/// Routes span a few miles at most, so the flat-earth approximation is
/// well within the tolerance of the road-snapping pass that follows.
struct Projection {
    lat0: f64,
    lng0: f64,
    cos_lat0: f64,
}

impl Projection {
    fn new(center: GeoPoint) -> Self {
        Self {
            lat0: center.lat,
            lng0: center.lng,
            cos_lat0: center.lat.to_radians().cos().max(0.01),
        }
    }

    fn to_xy(&self, p: GeoPoint) -> (f64, f64) {
        let x = (p.lng - self.lng0).to_radians() * self.cos_lat0 * EARTH_RADIUS_METERS;
        let y = (p.lat - self.lat0).to_radians() * EARTH_RADIUS_METERS;
        (x, y)
    }

    fn to_geo(&self, x: f64, y: f64) -> GeoPoint {
        GeoPoint {
            lat: self.lat0 + (y / EARTH_RADIUS_METERS).to_degrees(),
            lng: self.lng0 + (x / (self.cos_lat0 * EARTH_RADIUS_METERS)).to_degrees(),
        }
    }
}

/// Plan a path from origin to destination that avoids a 0.5-mile disk
/// around every parsable report coordinate.
///
/// Malformed or empty coordinate strings are skipped with a warning; they
/// must never fail a routing request. Returns `AppError::NoRoute` when the
/// obstacle set separates origin from destination (including either
/// endpoint lying inside an obstacle).
pub fn plan_route<'a, I>(origin: GeoPoint, destination: GeoPoint, report_coords: I) -> Result<Vec<GeoPoint>>
where
    I: IntoIterator<Item = &'a str>,
{
    let proj = Projection::new(origin);
    let obstacles = build_obstacles(&proj, report_coords);

    let start = proj.to_xy(origin);
    let goal = proj.to_xy(destination);

    for obstacle in &obstacles {
        if obstacle.contains(start.0, start.1) || obstacle.contains(goal.0, goal.1) {
            return Err(AppError::NoRoute(
                "origin or destination lies inside a flooded area".to_string(),
            ));
        }
    }

    // Fast path: nothing between origin and destination
    if segment_clear(start, goal, &obstacles) {
        return Ok(vec![origin, destination]);
    }

    // Visibility graph nodes: endpoints plus boundary points of every disk
    let mut nodes = vec![start, goal];
    for obstacle in &obstacles {
        let ring_radius = obstacle.radius * NODE_RADIUS_FACTOR;
        for i in 0..NODES_PER_OBSTACLE {
            let angle = (i as f64 / NODES_PER_OBSTACLE as f64) * std::f64::consts::TAU;
            let x = obstacle.x + ring_radius * angle.cos();
            let y = obstacle.y + ring_radius * angle.sin();
            if !obstacles.iter().any(|o| o.contains(x, y)) {
                nodes.push((x, y));
            }
        }
    }

    // A* over node indices; costs in integer millimeters so they are Ord
    let goal_idx = 1usize;
    let found = astar(
        &0usize,
        |&i| {
            let from = nodes[i];
            nodes
                .iter()
                .enumerate()
                .filter(|&(j, &to)| j != i && segment_clear(from, to, &obstacles))
                .map(|(j, &to)| (j, millimeters(from, to)))
                .collect::<Vec<_>>()
        },
        |&i| millimeters(nodes[i], nodes[goal_idx]),
        |&i| i == goal_idx,
    );

    match found {
        // Endpoints map back to the caller's exact coordinates; only the
        // intermediate nodes go through the inverse projection
        Some((path, _cost)) => Ok(path
            .into_iter()
            .map(|i| match i {
                0 => origin,
                1 => destination,
                _ => proj.to_geo(nodes[i].0, nodes[i].1),
            })
            .collect()),
        None => Err(AppError::NoRoute(
            "no obstacle-free route between origin and destination".to_string(),
        )),
    }
}

fn build_obstacles<'a, I>(proj: &Projection, report_coords: I) -> Vec<Obstacle>
where
    I: IntoIterator<Item = &'a str>,
{
    report_coords
        .into_iter()
        .filter_map(|raw| match parse_lat_lng(raw) {
            Some((lat, lng)) => {
                let (x, y) = proj.to_xy(GeoPoint { lat, lng });
                Some(Obstacle {
                    x,
                    y,
                    radius: OBSTACLE_RADIUS_METERS,
                })
            }
            None => {
                tracing::warn!("Skipping report with unparsable coordinates: {:?}", raw);
                None
            }
        })
        .collect()
}

/// True when the segment keeps clear of every obstacle disk
fn segment_clear(a: (f64, f64), b: (f64, f64), obstacles: &[Obstacle]) -> bool {
    obstacles
        .iter()
        .all(|o| segment_point_distance(a, b, (o.x, o.y)) >= o.radius)
}

/// Distance from point p to the closed segment ab
fn segment_point_distance(a: (f64, f64), b: (f64, f64), p: (f64, f64)) -> f64 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len2 = dx * dx + dy * dy;
    if len2 == 0.0 {
        return (p.0 - a.0).hypot(p.1 - a.1);
    }
    let t = (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len2).clamp(0.0, 1.0);
    let (cx, cy) = (a.0 + t * dx, a.1 + t * dy);
    (p.0 - cx).hypot(p.1 - cy)
}

fn millimeters(a: (f64, f64), b: (f64, f64)) -> u64 {
    ((b.0 - a.0).hypot(b.1 - a.1) * 1000.0).round() as u64
}
