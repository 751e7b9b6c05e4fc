//! Device position lookup.
//!
//! Desktop has no browser geolocation API; the closest equivalent is an IP
//! geolocation service, with the same contract: resolve asynchronously to a
//! coordinate or fail. Failure is reported once and never retried.

use serde::Deserialize;

use crate::constants::{GEOLOCATION_ENDPOINT, HTTP_USER_AGENT};
use crate::geo::GeoCoord;

#[derive(Debug)]
pub enum GeolocateError {
    /// Network-level failure or non-success HTTP status
    Transport(String),
    /// Response body did not yield a usable coordinate
    BadBody(String),
}

impl std::fmt::Display for GeolocateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeolocateError::Transport(e) => write!(f, "lookup failed: {}", e),
            GeolocateError::BadBody(e) => write!(f, "unreadable position: {}", e),
        }
    }
}

/// Geolocation response wire format. Only the fields we consume.
#[derive(Debug, Deserialize)]
struct GeoIpResponse {
    latitude: f64,
    longitude: f64,
}

fn position_from_response(body: GeoIpResponse) -> Result<GeoCoord, GeolocateError> {
    GeoCoord::new(body.longitude, body.latitude).ok_or_else(|| {
        GeolocateError::BadBody(format!(
            "coordinate out of range: ({}, {})",
            body.longitude, body.latitude
        ))
    })
}

/// Resolve the device's current position. Runs on the async task pool; no
/// timeout is configured.
pub fn lookup_device_position() -> Result<GeoCoord, GeolocateError> {
    let response = ureq::get(GEOLOCATION_ENDPOINT)
        .set("User-Agent", HTTP_USER_AGENT)
        .call();

    match response {
        Ok(resp) => match resp.into_json::<GeoIpResponse>() {
            Ok(body) => position_from_response(body),
            Err(e) => Err(GeolocateError::BadBody(e.to_string())),
        },
        Err(e) => Err(GeolocateError::Transport(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_parsing() {
        // ipapi.co returns far more fields; only these two matter
        let json = r#"{
            "ip": "203.0.113.7",
            "city": "Santa Marta",
            "latitude": 11.2408,
            "longitude": -74.199,
            "timezone": "America/Bogota"
        }"#;

        let body: GeoIpResponse = serde_json::from_str(json).unwrap();
        let coord = position_from_response(body).unwrap();

        assert_eq!(coord.lon, -74.199);
        assert_eq!(coord.lat, 11.2408);
    }

    #[test]
    fn test_missing_fields_fail_to_parse() {
        let json = r#"{ "ip": "203.0.113.7" }"#;
        assert!(serde_json::from_str::<GeoIpResponse>(json).is_err());
    }

    #[test]
    fn test_out_of_range_position_rejected() {
        let body = GeoIpResponse {
            latitude: 95.0,
            longitude: 0.0,
        };
        assert!(matches!(
            position_from_response(body),
            Err(GeolocateError::BadBody(_))
        ));
    }

    #[test]
    fn test_non_finite_position_rejected() {
        let body = GeoIpResponse {
            latitude: f64::NAN,
            longitude: 0.0,
        };
        assert!(position_from_response(body).is_err());
    }

    #[test]
    fn test_error_display_mentions_cause() {
        let err = GeolocateError::Transport("connection refused".to_string());
        assert!(err.to_string().contains("connection refused"));
    }
}
