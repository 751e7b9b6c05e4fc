mod camera;
mod marker;
mod route_line;
mod style;
mod view;

pub use camera::{CameraZoom, FlyTo, MapCamera};
pub use marker::{ClearMarkers, Marker, MarkerKind, MarkerLedger, PlaceMarker};
pub use route_line::{CurrentRouteLine, RouteLine, ShowRouteLine};
pub use style::MapStyle;
pub use view::{MapClick, MapView, SetMapStyle};

use bevy::prelude::*;

use crate::config::ConfigLoaded;

pub struct MapPlugin;

impl Plugin for MapPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MarkerLedger>()
            .init_resource::<CurrentRouteLine>()
            .add_message::<MapClick>()
            .add_message::<SetMapStyle>()
            .add_message::<PlaceMarker>()
            .add_message::<ClearMarkers>()
            .add_message::<ShowRouteLine>()
            .add_message::<FlyTo>()
            .init_gizmo_group::<route_line::RouteGizmoGroup>()
            .add_systems(
                Startup,
                (
                    view::spawn_map_view.after(ConfigLoaded),
                    route_line::configure_route_gizmos,
                ),
            )
            .add_systems(
                Update,
                (
                    camera::camera_pan,
                    camera::camera_zoom,
                    camera::start_camera_flight.run_if(on_message::<FlyTo>),
                    camera::animate_camera_flight,
                    camera::apply_camera_zoom,
                    view::emit_map_clicks,
                    view::apply_map_style.run_if(on_message::<SetMapStyle>),
                    view::draw_graticule,
                ),
            )
            .add_systems(
                Update,
                (
                    // A reset click clears and re-places markers in the same
                    // frame; clearing must see only the old entities
                    (
                        marker::clear_markers.run_if(on_message::<ClearMarkers>),
                        marker::place_markers.run_if(on_message::<PlaceMarker>),
                    )
                        .chain(),
                    marker::scale_markers_with_zoom,
                    route_line::show_route_line.run_if(on_message::<ShowRouteLine>),
                    route_line::render_route_line,
                ),
            );
    }
}
