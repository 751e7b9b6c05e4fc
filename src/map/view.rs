//! The map view itself: camera spawn, style application, click events, and
//! the graticule backdrop.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use crate::config::AppConfig;
use crate::constants::{
    DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH, INITIAL_CENTER_LAT, INITIAL_CENTER_LON,
    INITIAL_ZOOM, MAX_MERCATOR_LAT, UNITS_PER_DEGREE,
};
use crate::geo::{geo_to_world, world_to_geo, GeoCoord};
use crate::theme;

use super::camera::{zoom_to_scale, CameraZoom, MapCamera};
use super::style::MapStyle;

/// Present only while a map view exists. Absent in windowless runs, which is
/// what downstream systems check to no-op.
#[derive(Resource)]
pub struct MapView {
    pub style: MapStyle,
}

/// Message carrying a click on the map surface, already unprojected to a
/// geographic coordinate
#[derive(Message)]
pub struct MapClick {
    pub coord: GeoCoord,
}

/// Message to switch the map style
#[derive(Message)]
pub struct SetMapStyle {
    pub style: MapStyle,
}

/// Startup system to create the map view, if a window exists to host it.
///
/// Without a primary window (CI, headless smoke runs) this is a no-op: no
/// camera, no [`MapView`] resource, and everything keyed on them stays quiet.
pub fn spawn_map_view(
    mut commands: Commands,
    windows: Query<&Window, With<PrimaryWindow>>,
    config: Res<AppConfig>,
) {
    if windows.single().is_err() {
        info!("No primary window; map view disabled for this run");
        return;
    }

    let style = config.data.preferred_style;
    let center = geo_to_world(GeoCoord::clamped(INITIAL_CENTER_LON, INITIAL_CENTER_LAT));

    commands.spawn((
        Camera2d,
        MapCamera,
        CameraZoom {
            scale: zoom_to_scale(INITIAL_ZOOM),
        },
        Transform::from_translation(center.extend(1000.0)),
    ));

    commands.insert_resource(ClearColor(style.background()));
    commands.insert_resource(MapView { style });
    info!(
        "Map view created at ({}, {}) zoom {}",
        INITIAL_CENTER_LON, INITIAL_CENTER_LAT, INITIAL_ZOOM
    );
}

/// System to apply a requested style to the view, when one exists
pub fn apply_map_style(
    mut events: MessageReader<SetMapStyle>,
    map_view: Option<ResMut<MapView>>,
    mut clear_color: ResMut<ClearColor>,
) {
    let Some(mut view) = map_view else {
        events.clear();
        return;
    };

    for event in events.read() {
        if view.style == event.style {
            continue;
        }
        view.style = event.style;
        clear_color.0 = event.style.background();
        info!("Map style set to {}", event.style.display_name());
    }
}

/// System turning left clicks on the map surface into [`MapClick`] messages
pub fn emit_map_clicks(
    mouse_button: Res<ButtonInput<MouseButton>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MapCamera>>,
    mut contexts: EguiContexts,
    mut clicks: MessageWriter<MapClick>,
) {
    if !mouse_button.just_pressed(MouseButton::Left) {
        return;
    }

    // Clicks on UI panels are not map clicks
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.is_pointer_over_area()
    {
        return;
    }

    let Ok(window) = window_query.single() else {
        return;
    };

    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };

    let Some(cursor_pos) = window.cursor_position() else {
        return;
    };

    let Ok(world_pos) = camera.viewport_to_world_2d(camera_transform, cursor_pos) else {
        return;
    };

    clicks.write(MapClick {
        coord: world_to_geo(world_pos),
    });
}

/// Pick a graticule spacing (in degrees) that keeps lines at least ~90px
/// apart at the given camera scale
fn graticule_spacing(scale: f32) -> f64 {
    const CANDIDATES: [f64; 8] = [0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 10.0, 30.0];
    const MIN_PIXELS: f64 = 90.0;

    for candidate in CANDIDATES {
        if candidate * UNITS_PER_DEGREE / scale as f64 >= MIN_PIXELS {
            return candidate;
        }
    }
    30.0
}

pub fn draw_graticule(
    mut gizmos: Gizmos,
    camera_query: Query<(&Transform, &CameraZoom), With<MapCamera>>,
) {
    let Ok((camera_transform, zoom)) = camera_query.single() else {
        return;
    };

    let spacing = graticule_spacing(zoom.scale);
    let camera_pos = camera_transform.translation.truncate();

    let half_width = DEFAULT_WINDOW_WIDTH * zoom.scale / 2.0;
    let half_height = DEFAULT_WINDOW_HEIGHT * zoom.scale / 2.0;

    let left = camera_pos.x - half_width;
    let right = camera_pos.x + half_width;
    let bottom = camera_pos.y - half_height;
    let top = camera_pos.y + half_height;

    // Meridians are straight vertical lines in Mercator space
    let west = world_to_geo(Vec2::new(left, camera_pos.y)).lon;
    let east = world_to_geo(Vec2::new(right, camera_pos.y)).lon;
    let start_lon = (west / spacing).floor() as i64;
    let end_lon = (east / spacing).ceil() as i64;

    for k in start_lon..=end_lon {
        let x = (k as f64 * spacing * UNITS_PER_DEGREE) as f32;
        gizmos.line_2d(
            Vec2::new(x, bottom),
            Vec2::new(x, top),
            theme::GRATICULE_COLOR,
        );
    }

    // Parallels sit at projected latitudes
    let south = world_to_geo(Vec2::new(camera_pos.x, bottom)).lat;
    let north = world_to_geo(Vec2::new(camera_pos.x, top)).lat;
    let start_lat = (south / spacing).floor() as i64;
    let end_lat = (north / spacing).ceil() as i64;

    for k in start_lat..=end_lat {
        let lat = (k as f64 * spacing).clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT);
        let y = geo_to_world(GeoCoord::clamped(0.0, lat)).y;
        gizmos.line_2d(
            Vec2::new(left, y),
            Vec2::new(right, y),
            theme::GRATICULE_COLOR,
        );
    }
}
