//! Start/end point markers.
//!
//! Markers are owned uniquely by kind: placing a marker of a kind despawns
//! the previous marker of that kind first, so at most one of each exists.

use bevy::prelude::*;

use crate::constants::MARKER_RADIUS;
use crate::geo::{geo_to_world, GeoCoord};
use crate::theme;

use super::camera::{CameraZoom, MapCamera};

/// Which endpoint a marker stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Start,
    End,
}

impl MarkerKind {
    pub fn color(&self) -> Color {
        match self {
            MarkerKind::Start => theme::START_MARKER_COLOR,
            MarkerKind::End => theme::END_MARKER_COLOR,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MarkerKind::Start => "Start",
            MarkerKind::End => "End",
        }
    }
}

#[derive(Component)]
pub struct Marker {
    #[allow(dead_code)]
    pub kind: MarkerKind,
}

/// Bookkeeping for the one-marker-per-kind invariant. Holds the entity
/// currently standing for each kind, if any.
#[derive(Resource, Default)]
pub struct MarkerLedger {
    start: Option<Entity>,
    end: Option<Entity>,
}

impl MarkerLedger {
    /// Record `entity` as the marker for `kind`, returning the displaced
    /// entity (which the caller must despawn) if one was present.
    pub fn set(&mut self, kind: MarkerKind, entity: Entity) -> Option<Entity> {
        let slot = match kind {
            MarkerKind::Start => &mut self.start,
            MarkerKind::End => &mut self.end,
        };
        slot.replace(entity)
    }

    #[allow(dead_code)]
    pub fn get(&self, kind: MarkerKind) -> Option<Entity> {
        match kind {
            MarkerKind::Start => self.start,
            MarkerKind::End => self.end,
        }
    }

    /// Empty both slots, returning the entities that were present
    pub fn take_all(&mut self) -> Vec<Entity> {
        self.start.take().into_iter().chain(self.end.take()).collect()
    }
}

/// Message to place (or re-place) the marker of a kind
#[derive(Message)]
pub struct PlaceMarker {
    pub coord: GeoCoord,
    pub kind: MarkerKind,
}

/// Message to remove both markers from the view
#[derive(Message)]
pub struct ClearMarkers;

/// Marker z sits above the route line's geometry
const MARKER_Z: f32 = 10.0;

/// System to place markers, despawning any same-kind predecessor first
pub fn place_markers(
    mut commands: Commands,
    mut events: MessageReader<PlaceMarker>,
    mut ledger: ResMut<MarkerLedger>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    camera_query: Query<&CameraZoom, With<MapCamera>>,
) {
    for event in events.read() {
        let position = geo_to_world(event.coord);
        let scale = camera_query.single().map(|z| z.scale).unwrap_or(1.0);

        let entity = commands
            .spawn((
                Mesh2d(meshes.add(Circle::new(MARKER_RADIUS))),
                MeshMaterial2d(materials.add(event.kind.color())),
                Transform::from_translation(position.extend(MARKER_Z))
                    .with_scale(Vec3::splat(scale)),
                Marker { kind: event.kind },
            ))
            .id();

        if let Some(displaced) = ledger.set(event.kind, entity) {
            commands.entity(displaced).despawn();
        }

        debug!(
            "{} marker placed at ({}, {})",
            event.kind.display_name(),
            event.coord.lon,
            event.coord.lat
        );
    }
}

/// System to remove both markers when requested
pub fn clear_markers(
    mut commands: Commands,
    mut events: MessageReader<ClearMarkers>,
    mut ledger: ResMut<MarkerLedger>,
) {
    for _ in events.read() {
        for entity in ledger.take_all() {
            commands.entity(entity).despawn();
        }
    }
}

/// Keep markers a constant on-screen size by matching the camera scale
pub fn scale_markers_with_zoom(
    camera_query: Query<&CameraZoom, With<MapCamera>>,
    mut markers: Query<&mut Transform, With<Marker>>,
) {
    let Ok(zoom) = camera_query.single() else {
        return;
    };

    for mut transform in markers.iter_mut() {
        transform.scale = Vec3::splat(zoom.scale);
    }
}
