//! Directions API client: request URL building, response parsing, and the
//! metric formatting shown in the toolbar.

use serde::Deserialize;

use crate::constants::{DIRECTIONS_ENDPOINT, HTTP_USER_AGENT};
use crate::geo::GeoCoord;

use super::mode::TransportMode;

/// A fetched route: the drawable polyline plus its travel metrics
#[derive(Debug, Clone)]
pub struct RouteResult {
    pub polyline: Vec<GeoCoord>,
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

/// Ways a directions request can fail. All of them leave the previously
/// displayed route untouched.
#[derive(Debug)]
pub enum DirectionsError {
    /// Network-level failure (DNS, TLS, connection)
    Transport(String),
    /// Non-success HTTP status
    Status(u16),
    /// Response body did not parse as a directions response
    BadBody(String),
    /// Well-formed response with an empty route list
    NoRoutes,
}

impl std::fmt::Display for DirectionsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DirectionsError::Transport(e) => write!(f, "request failed: {}", e),
            DirectionsError::Status(code) => write!(f, "server returned status {}", code),
            DirectionsError::BadBody(e) => write!(f, "unreadable response: {}", e),
            DirectionsError::NoRoutes => write!(f, "no route found"),
        }
    }
}

/// Directions response wire format. Only the fields we consume.
#[derive(Debug, Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub struct DirectionsResponse {
    routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
struct DirectionsRoute {
    geometry: RouteGeometry,
    /// Meters
    distance: f64,
    /// Seconds
    duration: f64,
}

#[derive(Debug, Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
struct RouteGeometry {
    /// GeoJSON order: [longitude, latitude]
    coordinates: Vec<[f64; 2]>,
}

impl DirectionsResponse {
    /// Extract the first route - the only one used. An empty route list is
    /// a failure, not an empty result.
    fn into_result(self) -> Result<RouteResult, DirectionsError> {
        let route = self
            .routes
            .into_iter()
            .next()
            .ok_or(DirectionsError::NoRoutes)?;

        let polyline = route
            .geometry
            .coordinates
            .into_iter()
            .map(|[lon, lat]| GeoCoord::clamped(lon, lat))
            .collect();

        Ok(RouteResult {
            polyline,
            distance_meters: route.distance.max(0.0),
            duration_seconds: route.duration.max(0.0),
        })
    }
}

/// Build the directions request URL for a start/end pair. The access token
/// is passed in from config; there is no global.
pub fn directions_url(
    start: GeoCoord,
    end: GeoCoord,
    mode: TransportMode,
    access_token: &str,
) -> String {
    format!(
        "{}/{}/{},{};{},{}?geometries=geojson&access_token={}",
        DIRECTIONS_ENDPOINT,
        mode.profile(),
        start.lon,
        start.lat,
        end.lon,
        end.lat,
        access_token
    )
}

/// Fetch and parse a route. Runs on the async task pool; no timeout is
/// configured, matching the collaborator's own behavior.
pub fn fetch_route(url: &str) -> Result<RouteResult, DirectionsError> {
    let response = ureq::get(url).set("User-Agent", HTTP_USER_AGENT).call();

    match response {
        Ok(resp) => match resp.into_json::<DirectionsResponse>() {
            Ok(body) => body.into_result(),
            Err(e) => Err(DirectionsError::BadBody(e.to_string())),
        },
        Err(ureq::Error::Status(code, _)) => Err(DirectionsError::Status(code)),
        Err(e) => Err(DirectionsError::Transport(e.to_string())),
    }
}

/// Meters to kilometers with two decimals, e.g. "12.35 km"
pub fn format_distance(meters: f64) -> String {
    format!("{:.2} km", meters / 1000.0)
}

/// Seconds to a human travel time. Whole minutes only; the seconds
/// component is truncated, not rounded.
pub fn format_duration(seconds: f64) -> String {
    let minutes = (seconds / 60.0).floor() as u64;
    let hours = minutes / 60;
    let remaining_minutes = minutes % 60;

    if hours > 0 {
        format!("{} hrs {} mins", hours, remaining_minutes)
    } else {
        format!("{} mins", remaining_minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Duration formatting tests
    #[test]
    fn test_format_duration_minutes_only() {
        assert_eq!(format_duration(125.0), "2 mins");
    }

    #[test]
    fn test_format_duration_with_hours() {
        // 7384 s = 123 minutes = 2 hrs 3 mins
        assert_eq!(format_duration(7384.0), "2 hrs 3 mins");
    }

    #[test]
    fn test_format_duration_zero() {
        assert_eq!(format_duration(0.0), "0 mins");
    }

    #[test]
    fn test_format_duration_truncates_seconds() {
        // 119 s is 1 minute 59 seconds; the seconds are discarded
        assert_eq!(format_duration(119.0), "1 mins");
        assert_eq!(format_duration(59.9), "0 mins");
    }

    #[test]
    fn test_format_duration_exact_hour() {
        assert_eq!(format_duration(3600.0), "1 hrs 0 mins");
    }

    // Distance formatting tests
    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(12345.6), "12.35 km");
    }

    #[test]
    fn test_format_distance_zero() {
        assert_eq!(format_distance(0.0), "0.00 km");
    }

    #[test]
    fn test_format_distance_sub_kilometer() {
        assert_eq!(format_distance(450.0), "0.45 km");
    }

    // URL building tests
    #[test]
    fn test_directions_url_shape() {
        let start = GeoCoord::new(-74.2, 11.24).unwrap();
        let end = GeoCoord::new(-74.1, 11.2).unwrap();
        let url = directions_url(start, end, TransportMode::Driving, "pk.token");

        assert_eq!(
            url,
            "https://api.mapbox.com/directions/v5/mapbox/driving/-74.2,11.24;-74.1,11.2?geometries=geojson&access_token=pk.token"
        );
    }

    #[test]
    fn test_directions_url_uses_mode_profile() {
        let start = GeoCoord::new(0.0, 0.0).unwrap();
        let end = GeoCoord::new(1.0, 1.0).unwrap();

        for mode in TransportMode::all() {
            let url = directions_url(start, end, *mode, "t");
            assert!(url.contains(&format!("/mapbox/{}/", mode.profile())));
        }
    }

    // Response parsing tests
    #[test]
    fn test_response_parsing_full() {
        let json = r#"{
            "routes": [
                {
                    "geometry": {
                        "coordinates": [[-74.2, 11.24], [-74.15, 11.22], [-74.1, 11.2]]
                    },
                    "distance": 12345.6,
                    "duration": 7384.0
                }
            ]
        }"#;

        let response: DirectionsResponse = serde_json::from_str(json).unwrap();
        let result = response.into_result().unwrap();

        assert_eq!(result.polyline.len(), 3);
        assert_eq!(result.polyline[0], GeoCoord::new(-74.2, 11.24).unwrap());
        assert_eq!(result.distance_meters, 12345.6);
        assert_eq!(result.duration_seconds, 7384.0);
    }

    #[test]
    fn test_response_only_first_route_used() {
        let json = r#"{
            "routes": [
                { "geometry": { "coordinates": [[0.0, 0.0], [1.0, 1.0]] }, "distance": 100.0, "duration": 60.0 },
                { "geometry": { "coordinates": [[2.0, 2.0], [3.0, 3.0]] }, "distance": 999.0, "duration": 999.0 }
            ]
        }"#;

        let response: DirectionsResponse = serde_json::from_str(json).unwrap();
        let result = response.into_result().unwrap();

        assert_eq!(result.distance_meters, 100.0);
        assert_eq!(result.polyline[0], GeoCoord::new(0.0, 0.0).unwrap());
    }

    #[test]
    fn test_response_empty_routes_is_failure() {
        let json = r#"{ "routes": [] }"#;
        let response: DirectionsResponse = serde_json::from_str(json).unwrap();

        assert!(matches!(
            response.into_result(),
            Err(DirectionsError::NoRoutes)
        ));
    }

    #[test]
    fn test_response_missing_routes_fails_to_parse() {
        let json = r#"{ "code": "InvalidInput" }"#;
        assert!(serde_json::from_str::<DirectionsResponse>(json).is_err());
    }

    #[test]
    fn test_response_clamps_wild_coordinates() {
        let json = r#"{
            "routes": [
                { "geometry": { "coordinates": [[999.0, -999.0]] }, "distance": 1.0, "duration": 1.0 }
            ]
        }"#;

        let response: DirectionsResponse = serde_json::from_str(json).unwrap();
        let result = response.into_result().unwrap();

        assert_eq!(result.polyline[0].lon, 180.0);
        assert_eq!(result.polyline[0].lat, -90.0);
    }

    #[test]
    fn test_response_negative_metrics_clamp_to_zero() {
        let json = r#"{
            "routes": [
                { "geometry": { "coordinates": [] }, "distance": -5.0, "duration": -1.0 }
            ]
        }"#;

        let response: DirectionsResponse = serde_json::from_str(json).unwrap();
        let result = response.into_result().unwrap();

        assert_eq!(result.distance_meters, 0.0);
        assert_eq!(result.duration_seconds, 0.0);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(DirectionsError::NoRoutes.to_string(), "no route found");
        assert_eq!(
            DirectionsError::Status(401).to_string(),
            "server returned status 401"
        );
    }
}
