mod directions;
mod geolocate;
mod mode;
mod state;
mod systems;

pub use directions::RouteResult;
pub use mode::TransportMode;
pub use state::{PlannerState, PlannerStatus};
pub use systems::SetTransportMode;

use bevy::prelude::*;

use crate::config::ConfigLoaded;
use crate::map::{MapView, SetMapStyle};

pub struct PlannerPlugin;

impl Plugin for PlannerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlannerState>()
            .init_resource::<PlannerStatus>()
            .add_message::<SetTransportMode>()
            .add_message::<systems::RequestRoute>()
            .add_systems(Startup, systems::init_from_config.after(ConfigLoaded))
            .add_systems(
                Update,
                (
                    systems::start_geolocation.run_if(resource_exists::<MapView>),
                    systems::poll_geolocation,
                    // Click/mode/style handling feeds request_route within
                    // the same frame
                    (
                        systems::handle_map_clicks,
                        systems::handle_mode_change.run_if(on_message::<SetTransportMode>),
                        systems::handle_style_change.run_if(on_message::<SetMapStyle>),
                        systems::request_route.run_if(on_message::<systems::RequestRoute>),
                    )
                        .chain(),
                    systems::poll_directions,
                ),
            );
    }
}
