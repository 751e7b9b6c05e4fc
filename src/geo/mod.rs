//! Geographic coordinates and the Web Mercator projection.
//!
//! The map view lives in a flat 2D world space; these conversions are what
//! make camera positions and cursor clicks speak longitude/latitude. World x
//! grows east and world y grows north, with (0, 0) at the equator/prime
//! meridian intersection.

use bevy::prelude::*;

use crate::constants::{MAX_MERCATOR_LAT, UNITS_PER_DEGREE};

/// A (longitude, latitude) pair in finite floating-point degrees.
///
/// Longitude is within [-180, 180] and latitude within [-90, 90]; both
/// constructors enforce this.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoCoord {
    pub lon: f64,
    pub lat: f64,
}

impl GeoCoord {
    /// Build a coordinate, rejecting non-finite or out-of-range values.
    pub fn new(lon: f64, lat: f64) -> Option<Self> {
        if !lon.is_finite() || !lat.is_finite() {
            return None;
        }
        if !(-180.0..=180.0).contains(&lon) || !(-90.0..=90.0).contains(&lat) {
            return None;
        }
        Some(Self { lon, lat })
    }

    /// Build a coordinate, clamping out-of-range values into the valid
    /// domain. Non-finite inputs collapse to 0.0.
    pub fn clamped(lon: f64, lat: f64) -> Self {
        let lon = if lon.is_finite() { lon.clamp(-180.0, 180.0) } else { 0.0 };
        let lat = if lat.is_finite() { lat.clamp(-90.0, 90.0) } else { 0.0 };
        Self { lon, lat }
    }
}

/// Project a geographic coordinate into world space.
///
/// Latitudes beyond the Mercator band are clamped to the projectable limit.
pub fn geo_to_world(coord: GeoCoord) -> Vec2 {
    let lat = coord.lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT);
    let x = coord.lon * UNITS_PER_DEGREE;
    let y = (std::f64::consts::FRAC_PI_4 + lat.to_radians() / 2.0)
        .tan()
        .ln()
        .to_degrees()
        * UNITS_PER_DEGREE;
    Vec2::new(x as f32, y as f32)
}

/// Unproject a world-space position back to a geographic coordinate.
pub fn world_to_geo(pos: Vec2) -> GeoCoord {
    let lon = pos.x as f64 / UNITS_PER_DEGREE;
    let merc = (pos.y as f64 / UNITS_PER_DEGREE).to_radians();
    let lat = (2.0 * merc.exp().atan() - std::f64::consts::FRAC_PI_2).to_degrees();
    GeoCoord::clamped(lon, lat)
}
