//! The rendered route polyline.
//!
//! At most one route line exists at a time: showing a new one always
//! despawns the previous line entity before spawning its replacement, never
//! stacking them.

use bevy::gizmos::config::{GizmoConfigGroup, GizmoConfigStore, GizmoLineJoint};
use bevy::prelude::*;

use crate::constants::ROUTE_LINE_WIDTH;
use crate::geo::{geo_to_world, GeoCoord};
use crate::theme;

/// Gizmo group for the route line, so its stroke styling doesn't leak into
/// the graticule
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct RouteGizmoGroup;

/// Configure the route gizmo group: wide stroke, rounded joints
pub fn configure_route_gizmos(mut config_store: ResMut<GizmoConfigStore>) {
    let (config, _) = config_store.config_mut::<RouteGizmoGroup>();
    config.line.width = ROUTE_LINE_WIDTH;
    config.line.joints = GizmoLineJoint::Round(8);
}

/// The polyline geometry of the displayed route, in world space
#[derive(Component)]
pub struct RouteLine {
    pub points: Vec<Vec2>,
}

/// Typed handle to the entity currently rendering the route, used to decide
/// whether a despawn step is needed before showing a new one
#[derive(Resource, Default)]
pub struct CurrentRouteLine {
    entity: Option<Entity>,
}

impl CurrentRouteLine {
    /// Record `entity` as the displayed route, returning the stale entity
    /// (which the caller must despawn) if one was present.
    pub fn replace(&mut self, entity: Entity) -> Option<Entity> {
        self.entity.replace(entity)
    }

    #[allow(dead_code)]
    pub fn get(&self) -> Option<Entity> {
        self.entity
    }
}

/// Message to replace the displayed route with a new polyline
#[derive(Message)]
pub struct ShowRouteLine {
    pub points: Vec<GeoCoord>,
}

/// System to swap in a new route line, despawning the stale one first
pub fn show_route_line(
    mut commands: Commands,
    mut events: MessageReader<ShowRouteLine>,
    mut current: ResMut<CurrentRouteLine>,
) {
    for event in events.read() {
        let points: Vec<Vec2> = event.points.iter().copied().map(geo_to_world).collect();

        let entity = commands.spawn(RouteLine { points }).id();
        if let Some(stale) = current.replace(entity) {
            commands.entity(stale).despawn();
        }

        debug!("Route line replaced ({} points)", event.points.len());
    }
}

/// System to draw the route line each frame
pub fn render_route_line(mut gizmos: Gizmos<RouteGizmoGroup>, lines: Query<&RouteLine>) {
    for line in lines.iter() {
        if line.points.len() < 2 {
            continue;
        }

        for window in line.points.windows(2) {
            gizmos.line_2d(window[0], window[1], theme::ROUTE_LINE_COLOR);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_route_line_starts_empty() {
        let current = CurrentRouteLine::default();
        assert!(current.get().is_none());
    }

    #[test]
    fn test_first_replace_displaces_nothing() {
        let mut current = CurrentRouteLine::default();
        let entity = Entity::from_raw_u32(1).unwrap();

        assert!(current.replace(entity).is_none());
        assert_eq!(current.get(), Some(entity));
    }

    #[test]
    fn test_replace_hands_back_stale_entity() {
        let mut current = CurrentRouteLine::default();
        let first = Entity::from_raw_u32(1).unwrap();
        let second = Entity::from_raw_u32(2).unwrap();

        current.replace(first);
        assert_eq!(current.replace(second), Some(first));
        assert_eq!(current.get(), Some(second));
    }

    #[test]
    fn test_repeated_replace_keeps_single_handle() {
        // Showing a route any number of times leaves exactly one live handle
        let mut current = CurrentRouteLine::default();
        let mut displaced = 0;

        for i in 1..=5u32 {
            if current
                .replace(Entity::from_raw_u32(i).unwrap())
                .is_some()
            {
                displaced += 1;
            }
        }

        assert_eq!(displaced, 4);
        assert_eq!(current.get(), Some(Entity::from_raw_u32(5).unwrap()));
    }
}
