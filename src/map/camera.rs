use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use crate::constants::UNITS_PER_DEGREE;
use crate::geo::{geo_to_world, GeoCoord};

/// Exponential approach rate for camera flights, per second
const FLIGHT_RATE: f32 = 4.0;

/// Flight is considered arrived within this many world units of the target
const FLIGHT_ARRIVAL_EPSILON: f32 = 0.05;

/// Zoom levels the camera may be taken to by the scroll wheel
const MIN_ZOOM: f32 = 2.0;
const MAX_ZOOM: f32 = 19.0;

#[derive(Component)]
pub struct MapCamera;

#[derive(Component)]
pub struct CameraZoom {
    /// Orthographic scale: world units per screen pixel
    pub scale: f32,
}

impl Default for CameraZoom {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

/// An in-progress animated camera move. Inserted by [`FlyTo`], removed on
/// arrival or when the user pans/zooms manually.
#[derive(Component)]
pub struct CameraFlight {
    pub target: Vec2,
    pub target_scale: f32,
}

/// Message to animate the camera to a coordinate at a given zoom level
#[derive(Message)]
pub struct FlyTo {
    pub center: GeoCoord,
    pub zoom: f32,
}

/// Convert a web-map zoom level to an orthographic scale (world units per
/// pixel), using the usual 256-pixel tile convention: at zoom z the full
/// 360 degrees of longitude span 256 * 2^z pixels.
pub fn zoom_to_scale(zoom: f32) -> f32 {
    (360.0 * UNITS_PER_DEGREE as f32) / (256.0 * 2f32.powf(zoom))
}

pub fn camera_pan(
    mut commands: Commands,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: MessageReader<bevy::input::mouse::MouseMotion>,
    mut camera_query: Query<(Entity, &mut Transform, &CameraZoom), With<MapCamera>>,
) {
    if !mouse_button.pressed(MouseButton::Middle) {
        mouse_motion.clear();
        return;
    }

    let Ok((entity, mut transform, zoom)) = camera_query.single_mut() else {
        return;
    };

    // Manual input takes over from any running flight
    commands.entity(entity).remove::<CameraFlight>();

    for event in mouse_motion.read() {
        let delta = event.delta * zoom.scale;
        transform.translation.x -= delta.x;
        transform.translation.y += delta.y;
    }
}

pub fn camera_zoom(
    mut commands: Commands,
    mut scroll_events: MessageReader<MouseWheel>,
    mut camera_query: Query<(Entity, &mut CameraZoom), With<MapCamera>>,
) {
    let Ok((entity, mut zoom)) = camera_query.single_mut() else {
        return;
    };

    let mut scrolled = false;
    for event in scroll_events.read() {
        let amount = match event.unit {
            MouseScrollUnit::Line => event.y * 0.1,
            MouseScrollUnit::Pixel => event.y * 0.002,
        };

        // Multiplicative zoom keeps steps even across map scales
        zoom.scale = (zoom.scale * (1.0 - amount))
            .clamp(zoom_to_scale(MAX_ZOOM), zoom_to_scale(MIN_ZOOM));
        scrolled = true;
    }

    if scrolled {
        commands.entity(entity).remove::<CameraFlight>();
    }
}

pub fn apply_camera_zoom(
    mut camera_query: Query<(&CameraZoom, &mut Projection), (With<MapCamera>, Changed<CameraZoom>)>,
) {
    for (zoom, mut projection) in camera_query.iter_mut() {
        if let Projection::Orthographic(ref mut ortho) = *projection {
            ortho.scale = zoom.scale;
        }
    }
}

/// System to begin a camera flight when a [`FlyTo`] message arrives
pub fn start_camera_flight(
    mut commands: Commands,
    mut events: MessageReader<FlyTo>,
    camera_query: Query<Entity, With<MapCamera>>,
) {
    let Ok(entity) = camera_query.single() else {
        events.clear();
        return;
    };

    for event in events.read() {
        commands.entity(entity).insert(CameraFlight {
            target: geo_to_world(event.center),
            target_scale: zoom_to_scale(event.zoom),
        });
    }
}

/// System to advance an active camera flight each frame
pub fn animate_camera_flight(
    mut commands: Commands,
    time: Res<Time>,
    mut camera_query: Query<
        (Entity, &mut Transform, &mut CameraZoom, &CameraFlight),
        With<MapCamera>,
    >,
) {
    let Ok((entity, mut transform, mut zoom, flight)) = camera_query.single_mut() else {
        return;
    };

    let t = 1.0 - (-FLIGHT_RATE * time.delta_secs()).exp();

    let current = transform.translation.truncate();
    let next = current.lerp(flight.target, t);
    transform.translation.x = next.x;
    transform.translation.y = next.y;
    zoom.scale += (flight.target_scale - zoom.scale) * t;

    let arrived = next.distance(flight.target) < FLIGHT_ARRIVAL_EPSILON
        && (zoom.scale - flight.target_scale).abs() < flight.target_scale * 0.01;
    if arrived {
        transform.translation.x = flight.target.x;
        transform.translation.y = flight.target.y;
        zoom.scale = flight.target_scale;
        commands.entity(entity).remove::<CameraFlight>();
    }
}
