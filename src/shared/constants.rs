/// Radius of the obstacle disk buffered around each flood report (0.5 mile)
pub const OBSTACLE_RADIUS_METERS: f64 = 804.672;

/// Earth's radius in meters (for Haversine / local projection)
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Timeout applied to every outbound third-party HTTP call
pub const UPSTREAM_TIMEOUT_SECS: u64 = 10;

/// Extra attempts made after a failed outbound call before giving up
pub const UPSTREAM_RETRY_ATTEMPTS: u32 = 2;

/// Confirmation string the submit endpoint has always answered with;
/// the client asserts on it verbatim
pub const REPORT_RECEIVED_MESSAGE: &str = "got ya report...Allen";
