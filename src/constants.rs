//! Centralized constants used across the application.
//!
//! This module contains magic numbers and configuration values that are used
//! in multiple places or would benefit from being named constants.

/// Default window width in pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = 1600.0;

/// Default window height in pixels
pub const DEFAULT_WINDOW_HEIGHT: f32 = 900.0;

/// Initial map center longitude in degrees (Santa Marta, Colombia)
pub const INITIAL_CENTER_LON: f64 = -74.199;

/// Initial map center latitude in degrees
pub const INITIAL_CENTER_LAT: f64 = 11.2408;

/// Zoom level the map view opens at
pub const INITIAL_ZOOM: f32 = 13.0;

/// Zoom level the camera flies to once the device location resolves
pub const LOCATED_ZOOM: f32 = 14.0;

/// World units per degree of longitude. The projected world is
/// 360 * UNITS_PER_DEGREE units wide.
pub const UNITS_PER_DEGREE: f64 = 100.0;

/// Latitude bound of the Web Mercator projection; latitudes beyond this
/// cannot be projected.
pub const MAX_MERCATOR_LAT: f64 = 85.051_128_78;

/// Route line stroke width in pixels
pub const ROUTE_LINE_WIDTH: f32 = 4.0;

/// Marker radius in world units at camera scale 1.0
pub const MARKER_RADIUS: f32 = 9.0;

/// Base URL of the hosted directions API
pub const DIRECTIONS_ENDPOINT: &str = "https://api.mapbox.com/directions/v5/mapbox";

/// IP geolocation endpoint used to seed the start point
pub const GEOLOCATION_ENDPOINT: &str = "https://ipapi.co/json/";

/// User-Agent header sent with outbound HTTP requests
pub const HTTP_USER_AGENT: &str = "wayfarer-route-planner";
