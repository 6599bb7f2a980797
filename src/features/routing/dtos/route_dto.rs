use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::routing::services::GeoPoint;

/// Envelope the client posts to `/getMap`
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MapRequestBodyDto {
    #[validate(nested)]
    pub map_req_info: MapRequestDto,
}

/// Origin/destination pair for a routing request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct MapRequestDto {
    #[validate(nested)]
    pub origin: LatLngDto,
    #[validate(nested)]
    pub destination: LatLngDto,
}

/// A coordinate as exchanged with the client
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate, ToSchema)]
pub struct LatLngDto {
    #[validate(range(min = -90.0, max = 90.0, message = "lat out of range"))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "lng out of range"))]
    pub lng: f64,
}

/// An intermediate point returned to the client for map rendering
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WaypointDto {
    pub location: LatLngDto,
}

/// Response body for `/getMap`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RouteResponseDto {
    pub waypoints: Vec<WaypointDto>,
}

impl From<LatLngDto> for GeoPoint {
    fn from(p: LatLngDto) -> Self {
        GeoPoint {
            lat: p.lat,
            lng: p.lng,
        }
    }
}

impl From<GeoPoint> for LatLngDto {
    fn from(p: GeoPoint) -> Self {
        Self {
            lat: p.lat,
            lng: p.lng,
        }
    }
}

impl From<GeoPoint> for WaypointDto {
    fn from(p: GeoPoint) -> Self {
        Self { location: p.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_request_deserializes_camel_case() {
        let body: MapRequestBodyDto = serde_json::from_str(
            r#"{"mapReqInfo":{"origin":{"lat":29.9,"lng":-90.1},"destination":{"lat":30.0,"lng":-90.0}}}"#,
        )
        .unwrap();

        assert!((body.map_req_info.origin.lat - 29.9).abs() < f64::EPSILON);
        assert!((body.map_req_info.destination.lng + 90.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_waypoint_serializes_nested_location() {
        let waypoint: WaypointDto = GeoPoint {
            lat: 29.9,
            lng: -90.1,
        }
        .into();
        let json = serde_json::to_value(&waypoint).unwrap();
        assert_eq!(json["location"]["lat"], 29.9);
        assert_eq!(json["location"]["lng"], -90.1);
    }
}
