mod route_dto;

pub use route_dto::{LatLngDto, MapRequestBodyDto, MapRequestDto, RouteResponseDto, WaypointDto};
