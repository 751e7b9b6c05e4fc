use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Visual style of the map view. Selecting a style changes the base color
/// the view is drawn on; markers and the route line are unaffected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MapStyle {
    #[default]
    Streets,
    Outdoors,
    Light,
    Dark,
    Satellite,
}

impl MapStyle {
    pub fn display_name(&self) -> &'static str {
        match self {
            MapStyle::Streets => "Streets",
            MapStyle::Outdoors => "Outdoors",
            MapStyle::Light => "Light",
            MapStyle::Dark => "Dark",
            MapStyle::Satellite => "Satellite",
        }
    }

    /// Base color the map view clears to under this style
    pub fn background(&self) -> Color {
        match self {
            MapStyle::Streets => Color::srgb(0.91, 0.89, 0.85),
            MapStyle::Outdoors => Color::srgb(0.85, 0.90, 0.82),
            MapStyle::Light => Color::srgb(0.96, 0.96, 0.96),
            MapStyle::Dark => Color::srgb(0.13, 0.14, 0.16),
            MapStyle::Satellite => Color::srgb(0.10, 0.16, 0.19),
        }
    }

    pub fn all() -> &'static [MapStyle] {
        &[
            MapStyle::Streets,
            MapStyle::Outdoors,
            MapStyle::Light,
            MapStyle::Dark,
            MapStyle::Satellite,
        ]
    }
}
