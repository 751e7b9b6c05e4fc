//! Centralized color theme for the application.
//!
//! This module provides all colors used throughout the map view and UI.
//! Modify values here to change the application's color scheme.

use bevy::prelude::Color;

// ============================================================================
// Marker Colors
// ============================================================================

/// Start marker fill (green by convention)
pub const START_MARKER_COLOR: Color = Color::srgb(0.13, 0.65, 0.27);

/// End marker fill (red by convention)
pub const END_MARKER_COLOR: Color = Color::srgb(0.85, 0.16, 0.16);

// ============================================================================
// Route Colors
// ============================================================================

/// Route polyline stroke
pub const ROUTE_LINE_COLOR: Color = Color::srgb(0.114, 0.631, 0.949);

// ============================================================================
// Graticule Colors
// ============================================================================

/// Semi-transparent meridian/parallel lines
pub const GRATICULE_COLOR: Color = Color::srgba(0.45, 0.45, 0.5, 0.25);
