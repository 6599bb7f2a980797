mod route_planner;

pub use route_planner::{plan_route, GeoPoint};
