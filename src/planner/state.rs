//! Planner state and the click toggle protocol.

use bevy::prelude::*;

use crate::geo::GeoCoord;
use crate::map::MapStyle;

use super::directions::RouteResult;
use super::mode::TransportMode;

/// All route-planning state. Created at startup, mutated only by the
/// planner systems, never persisted.
#[derive(Resource, Default)]
pub struct PlannerState {
    /// Where the route starts; seeded once from geolocation, never moved by
    /// map clicks
    pub start_point: Option<GeoCoord>,
    /// Where the route ends; set and re-set by map clicks
    pub end_point: Option<GeoCoord>,
    pub mode: TransportMode,
    pub map_style: MapStyle,
    /// Last successfully fetched route
    pub last_result: Option<RouteResult>,
    /// Formatted distance shown in the toolbar, empty when none
    pub distance_text: String,
    /// Formatted travel time shown in the toolbar, empty when none
    pub duration_text: String,
}

/// Transient request/error state surfaced in the status line
#[derive(Resource, Default)]
pub struct PlannerStatus {
    pub locating: bool,
    pub routing: bool,
    pub last_error: Option<String>,
}

/// What the map view must do after a click, as decided by
/// [`PlannerState::apply_click`]
#[derive(Debug, PartialEq)]
pub struct ClickPlan {
    /// Both markers must be removed before placing anything
    pub clear_first: bool,
    /// The start marker must be re-placed here after clearing
    pub replace_start: Option<GeoCoord>,
    /// The end marker goes here
    pub place_end: GeoCoord,
}

impl PlannerState {
    /// A route can only be requested with both endpoints set
    pub fn can_request(&self) -> bool {
        self.start_point.is_some() && self.end_point.is_some()
    }

    /// Drop the displayed metrics without touching the stored coordinates
    pub fn clear_metrics(&mut self) {
        self.distance_text.clear();
        self.duration_text.clear();
    }

    /// Apply one map click.
    ///
    /// The first click after a reset sets the destination; any further
    /// click restarts destination selection: both markers come down, the
    /// start marker goes back up (if a start point exists), and the end
    /// point moves to the clicked coordinate. The start point itself is
    /// never changed by clicks.
    pub fn apply_click(&mut self, coord: GeoCoord) -> ClickPlan {
        if self.end_point.is_none() {
            self.end_point = Some(coord);
            ClickPlan {
                clear_first: false,
                replace_start: None,
                place_end: coord,
            }
        } else {
            self.clear_metrics();
            self.end_point = Some(coord);
            ClickPlan {
                clear_first: true,
                replace_start: self.start_point,
                place_end: coord,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lon: f64, lat: f64) -> GeoCoord {
        GeoCoord::new(lon, lat).unwrap()
    }

    #[test]
    fn test_default_state_is_empty() {
        let state = PlannerState::default();
        assert!(state.start_point.is_none());
        assert!(state.end_point.is_none());
        assert_eq!(state.mode, TransportMode::Driving);
        assert_eq!(state.map_style, MapStyle::Streets);
        assert!(state.last_result.is_none());
        assert!(state.distance_text.is_empty());
        assert!(state.duration_text.is_empty());
    }

    #[test]
    fn test_can_request_needs_both_points() {
        let mut state = PlannerState::default();
        assert!(!state.can_request());

        state.start_point = Some(coord(-74.2, 11.24));
        assert!(!state.can_request());

        state.end_point = Some(coord(-74.1, 11.20));
        assert!(state.can_request());

        state.start_point = None;
        assert!(!state.can_request());
    }

    #[test]
    fn test_first_click_sets_destination() {
        let mut state = PlannerState {
            start_point: Some(coord(-74.2, 11.24)),
            ..Default::default()
        };

        let plan = state.apply_click(coord(-74.1, 11.20));

        assert_eq!(state.end_point, Some(coord(-74.1, 11.20)));
        assert_eq!(
            plan,
            ClickPlan {
                clear_first: false,
                replace_start: None,
                place_end: coord(-74.1, 11.20),
            }
        );
    }

    #[test]
    fn test_second_click_restarts_selection() {
        let mut state = PlannerState {
            start_point: Some(coord(-74.2, 11.24)),
            ..Default::default()
        };

        state.apply_click(coord(-74.1, 11.20));
        let plan = state.apply_click(coord(-74.15, 11.22));

        assert_eq!(state.end_point, Some(coord(-74.15, 11.22)));
        assert_eq!(
            plan,
            ClickPlan {
                clear_first: true,
                replace_start: Some(coord(-74.2, 11.24)),
                place_end: coord(-74.15, 11.22),
            }
        );
    }

    #[test]
    fn test_clicks_never_move_the_start_point() {
        let start = coord(-74.2, 11.24);
        let mut state = PlannerState {
            start_point: Some(start),
            ..Default::default()
        };

        for i in 0..5 {
            state.apply_click(coord(-74.1 - 0.01 * i as f64, 11.20));
            assert_eq!(state.start_point, Some(start));
        }
    }

    #[test]
    fn test_reset_click_without_start_point() {
        // Geolocation failed: clicks still drive destination selection,
        // but there is no start marker to re-place
        let mut state = PlannerState::default();

        state.apply_click(coord(10.0, 20.0));
        let plan = state.apply_click(coord(11.0, 21.0));

        assert!(plan.clear_first);
        assert_eq!(plan.replace_start, None);
        assert_eq!(state.end_point, Some(coord(11.0, 21.0)));
    }

    #[test]
    fn test_reset_click_clears_metrics() {
        let mut state = PlannerState {
            start_point: Some(coord(-74.2, 11.24)),
            distance_text: "12.35 km".to_string(),
            duration_text: "2 mins".to_string(),
            ..Default::default()
        };
        state.end_point = Some(coord(-74.1, 11.20));

        state.apply_click(coord(-74.15, 11.22));

        assert!(state.distance_text.is_empty());
        assert!(state.duration_text.is_empty());
    }

    #[test]
    fn test_first_click_keeps_metrics() {
        // No stale metrics exist before the first destination is chosen;
        // nothing to clear
        let mut state = PlannerState {
            start_point: Some(coord(-74.2, 11.24)),
            ..Default::default()
        };

        let plan = state.apply_click(coord(-74.1, 11.20));
        assert!(!plan.clear_first);
    }

    #[test]
    fn test_clear_metrics_keeps_coordinates() {
        let mut state = PlannerState {
            start_point: Some(coord(-74.2, 11.24)),
            end_point: Some(coord(-74.1, 11.20)),
            distance_text: "1.00 km".to_string(),
            duration_text: "5 mins".to_string(),
            ..Default::default()
        };

        state.clear_metrics();

        assert!(state.distance_text.is_empty());
        assert!(state.duration_text.is_empty());
        assert!(state.start_point.is_some());
        assert!(state.end_point.is_some());
    }
}
