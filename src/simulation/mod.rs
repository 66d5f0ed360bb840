//! Simulation module - catalogue, layer layout and the selection state machine.
//!
//! Nothing here renders. [`DensityPlugin`] registers the controller resource
//! and the systems that feed it, so it runs headless under `MinimalPlugins`.

pub mod catalogue;
mod container_config;
mod controller;
mod input;
mod layout;
pub mod notification;
mod systems;

use bevy::prelude::*;

use crate::resources::Liquid;

pub use container_config::{config, ContainerConfig};
pub use controller::{
    speed, AnimationSpeed, SelectionController, MAX_SELECTION, POUR_DURATION,
};
pub use layout::compute_layers;
pub use notification::{CompletionNotice, NotificationSink, StdoutSink};

/// A user action on the container, from the panel or the keyboard.
#[derive(Event, Clone, Copy, Debug)]
pub enum SelectionCommand {
    Add(&'static Liquid),
    Remove(&'static str),
    Clear,
    SetAnimationSpeed(f32),
    NudgeAnimationSpeed(f32),
}

/// Plugin that owns the selection state and applies [`SelectionCommand`]s.
///
/// Insert a [`SelectionController`] before adding the plugin to choose the
/// container or the notification sink; otherwise the reference container
/// with a [`StdoutSink`] is used.
pub struct DensityPlugin;

impl Plugin for DensityPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<SelectionController>() {
            app.insert_resource(SelectionController::new(
                ContainerConfig::default(),
                Box::new(StdoutSink),
            ));
        }

        app.add_event::<SelectionCommand>().add_systems(
            Update,
            (
                input::handle_keyboard_shortcuts.run_if(resource_exists::<ButtonInput<KeyCode>>),
                systems::apply_selection_commands,
                systems::tick_pour_timer,
            )
                .chain()
                .in_set(SelectionSet),
        );
    }
}

/// Systems that mutate the [`SelectionController`]. Views run after it.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct SelectionSet;
