//! Bevy systems driving the route-planning flow.
//!
//! Everything here is event-driven: geolocation resolution, map clicks, and
//! mode/style changes each produce a deterministic state update. Network
//! work runs on the compute task pool and is polled each frame.

use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, Task};
use futures_lite::future;

use crate::config::{AppConfig, SaveConfigRequest};
use crate::constants::LOCATED_ZOOM;
use crate::geo::GeoCoord;
use crate::map::{
    ClearMarkers, FlyTo, MapClick, MarkerKind, PlaceMarker, SetMapStyle, ShowRouteLine,
};

use super::directions::{self, DirectionsError, RouteResult};
use super::geolocate::{self, GeolocateError};
use super::mode::TransportMode;
use super::state::{PlannerState, PlannerStatus};

/// Message to change the transport mode
#[derive(Message)]
pub struct SetTransportMode {
    pub mode: TransportMode,
}

/// Message to request the route for the current endpoints. A no-op unless
/// both endpoints are set.
#[derive(Message)]
pub struct RequestRoute;

/// Background task resolving the device position
#[derive(Component)]
pub struct GeolocateTask(Task<Result<GeoCoord, GeolocateError>>);

/// Background task fetching a route
#[derive(Component)]
pub struct DirectionsTask(Task<Result<RouteResult, DirectionsError>>);

/// Startup system to seed mode and style from the loaded config
pub fn init_from_config(config: Res<AppConfig>, mut state: ResMut<PlannerState>) {
    state.mode = config.data.preferred_mode;
    state.map_style = config.data.preferred_style;
}

/// System to kick off the geolocation lookup, once, after the map view
/// exists. Headless runs never create the view, so this never fires there.
pub fn start_geolocation(
    mut commands: Commands,
    mut status: ResMut<PlannerStatus>,
    mut started: Local<bool>,
) {
    if *started {
        return;
    }
    *started = true;
    status.locating = true;

    let task_pool = AsyncComputeTaskPool::get();
    let task = task_pool.spawn(async move { geolocate::lookup_device_position() });

    commands.spawn(GeolocateTask(task));
}

/// System to poll the geolocation task. Success seeds the start point,
/// places its marker, and flies the camera in; failure is reported once and
/// the start point stays absent.
pub fn poll_geolocation(
    mut commands: Commands,
    mut state: ResMut<PlannerState>,
    mut status: ResMut<PlannerStatus>,
    mut markers: MessageWriter<PlaceMarker>,
    mut flights: MessageWriter<FlyTo>,
    mut tasks: Query<(Entity, &mut GeolocateTask)>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        if let Some(result) = future::block_on(future::poll_once(&mut task.0)) {
            status.locating = false;

            match result {
                Ok(coord) => {
                    info!("Device located at ({}, {})", coord.lon, coord.lat);
                    state.start_point = Some(coord);
                    markers.write(PlaceMarker {
                        coord,
                        kind: MarkerKind::Start,
                    });
                    flights.write(FlyTo {
                        center: coord,
                        zoom: LOCATED_ZOOM,
                    });
                }
                Err(e) => {
                    error!("Failed to locate device: {}", e);
                    status.last_error = Some(format!("Location unavailable: {}", e));
                }
            }

            commands.entity(entity).despawn();
        }
    }
}

/// System to run the click toggle protocol
pub fn handle_map_clicks(
    mut clicks: MessageReader<MapClick>,
    mut state: ResMut<PlannerState>,
    mut place: MessageWriter<PlaceMarker>,
    mut clear: MessageWriter<ClearMarkers>,
    mut requests: MessageWriter<RequestRoute>,
) {
    for click in clicks.read() {
        let plan = state.apply_click(click.coord);

        if plan.clear_first {
            clear.write(ClearMarkers);
            if let Some(start) = plan.replace_start {
                place.write(PlaceMarker {
                    coord: start,
                    kind: MarkerKind::Start,
                });
            }
        }

        place.write(PlaceMarker {
            coord: plan.place_end,
            kind: MarkerKind::End,
        });
        requests.write(RequestRoute);
    }
}

/// System to change the transport mode; re-requests the route when both
/// endpoints are set
pub fn handle_mode_change(
    mut events: MessageReader<SetTransportMode>,
    mut state: ResMut<PlannerState>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
    mut requests: MessageWriter<RequestRoute>,
) {
    for event in events.read() {
        if state.mode == event.mode {
            continue;
        }

        state.mode = event.mode;
        config.data.preferred_mode = event.mode;
        config.dirty = true;
        save_events.write(SaveConfigRequest);
        info!("Transport mode set to {}", event.mode.display_name());

        if state.can_request() {
            requests.write(RequestRoute);
        }
    }
}

/// System to track style changes in planner state and config. The view
/// applies the style itself; changing style never re-requests the route.
pub fn handle_style_change(
    mut events: MessageReader<SetMapStyle>,
    mut state: ResMut<PlannerState>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        if state.map_style == event.style {
            continue;
        }

        state.map_style = event.style;
        config.data.preferred_style = event.style;
        config.dirty = true;
        save_events.write(SaveConfigRequest);
    }
}

/// System to spawn a directions request for the current endpoints.
///
/// Any number of triggers in a frame coalesce into one request. Without
/// both endpoints this quietly does nothing - an incomplete selection is
/// not an error.
pub fn request_route(
    mut commands: Commands,
    mut events: MessageReader<RequestRoute>,
    state: Res<PlannerState>,
    config: Res<AppConfig>,
    mut status: ResMut<PlannerStatus>,
) {
    if events.is_empty() {
        return;
    }
    events.clear();

    let (Some(start), Some(end)) = (state.start_point, state.end_point) else {
        return;
    };

    let url = directions::directions_url(start, end, state.mode, &config.data.access_token);
    debug!(
        "Requesting {} route ({}, {}) -> ({}, {})",
        state.mode.profile(),
        start.lon,
        start.lat,
        end.lon,
        end.lat
    );
    status.routing = true;

    let task_pool = AsyncComputeTaskPool::get();
    let task = task_pool.spawn(async move { directions::fetch_route(&url) });

    commands.spawn(DirectionsTask(task));
}

/// System to poll in-flight directions tasks.
///
/// Completed tasks resolve in arrival order: if an older request lands
/// after a newer one, the older route wins the display (last-response-wins,
/// as in the source design). Failures leave the previous route and metrics
/// exactly as they were.
pub fn poll_directions(
    mut commands: Commands,
    mut state: ResMut<PlannerState>,
    mut status: ResMut<PlannerStatus>,
    mut lines: MessageWriter<ShowRouteLine>,
    mut tasks: Query<(Entity, &mut DirectionsTask)>,
) {
    let mut pending = 0;

    for (entity, mut task) in tasks.iter_mut() {
        let Some(result) = future::block_on(future::poll_once(&mut task.0)) else {
            pending += 1;
            continue;
        };

        match result {
            Ok(route) => {
                state.distance_text = directions::format_distance(route.distance_meters);
                state.duration_text = directions::format_duration(route.duration_seconds);
                lines.write(ShowRouteLine {
                    points: route.polyline.clone(),
                });
                state.last_result = Some(route);
                status.last_error = None;
                info!(
                    "Route updated: {} ({})",
                    state.distance_text, state.duration_text
                );
            }
            Err(e) => {
                error!("Directions request failed: {}", e);
                status.last_error = Some(format!("Route unavailable: {}", e));
            }
        }

        commands.entity(entity).despawn();
    }

    if status.routing && pending == 0 && !tasks.is_empty() {
        status.routing = false;
    }
}
