//! Systems driving the selection controller from events and the frame clock.

use bevy::prelude::*;

use super::{SelectionCommand, SelectionController};

/// Apply queued selection commands in arrival order.
pub fn apply_selection_commands(
    mut commands: EventReader<SelectionCommand>,
    mut controller: ResMut<SelectionController>,
) {
    for command in commands.read() {
        match *command {
            SelectionCommand::Add(liquid) => match controller.add_liquid(liquid) {
                Ok(()) => info!(
                    "Poured {} ({} kg/m³), {} liquid(s) in container",
                    liquid.name,
                    liquid.density,
                    controller.selection().len()
                ),
                Err(err) => debug!("Ignored add: {err}"),
            },
            SelectionCommand::Remove(name) => {
                if controller.remove_liquid(name) {
                    info!("Removed {name}");
                } else {
                    debug!("Ignored remove: {name} is not in the container");
                }
            }
            SelectionCommand::Clear => {
                controller.clear();
                info!("Container cleared");
            }
            SelectionCommand::SetAnimationSpeed(value) => controller.set_animation_speed(value),
            SelectionCommand::NudgeAnimationSpeed(delta) => {
                controller.nudge_animation_speed(delta);
                debug!("Animation speed {:.1}x", controller.animation_speed());
            }
        }
    }
}

/// Return to idle once the pour window has elapsed.
pub fn tick_pour_timer(time: Res<Time>, mut controller: ResMut<SelectionController>) {
    if !controller.is_pouring() {
        return;
    }
    if controller.tick(time.delta()) {
        debug!("Pour settled");
    }
}
