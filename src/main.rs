//! Liquid Density Explorer - Main Entry
//!
//! Pour liquids into a 3D container and watch them settle into layers by density.

use bevy::prelude::*;
use fluid_density::render::ContainerRenderPlugin;
use fluid_density::simulation::{catalogue, DensityPlugin, MAX_SELECTION};
use fluid_density::ui::ControlPanelPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Liquid Density Explorer".into(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(DensityPlugin)
        .add_plugins(ContainerRenderPlugin)
        .add_plugins(ControlPanelPlugin)
        .add_systems(Startup, log_catalogue)
        .run();
}

/// Log what can be poured
fn log_catalogue() {
    let names: Vec<_> = catalogue::all().iter().map(|liquid| liquid.name).collect();
    info!(
        "{} liquids available (up to {} at once): {}",
        names.len(),
        MAX_SELECTION,
        names.join(", ")
    );
}
