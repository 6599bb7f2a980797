pub mod route_handler;

pub use route_handler::{get_map, RoutingState};
