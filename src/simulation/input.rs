//! Keyboard shortcuts for the container.
//!
//! `1`-`7` pour the matching catalogue liquid, `Shift` + digit removes it,
//! `C` or `Backspace` clears, `-`/`=` change the animation speed.

use bevy::prelude::*;

use super::catalogue;
use super::controller::speed;
use super::SelectionCommand;

const DIGIT_KEYS: [KeyCode; 7] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
];

/// System to translate key presses into selection commands.
pub fn handle_keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut commands: EventWriter<SelectionCommand>,
) {
    let shift = keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]);

    for (key, liquid) in DIGIT_KEYS.iter().zip(catalogue::all()) {
        if !keyboard.just_pressed(*key) {
            continue;
        }
        if shift {
            commands.send(SelectionCommand::Remove(liquid.name));
        } else {
            commands.send(SelectionCommand::Add(liquid));
        }
    }

    if keyboard.any_just_pressed([KeyCode::KeyC, KeyCode::Backspace]) {
        commands.send(SelectionCommand::Clear);
    }
    if keyboard.just_pressed(KeyCode::Minus) {
        commands.send(SelectionCommand::NudgeAnimationSpeed(-speed::STEP));
    }
    if keyboard.just_pressed(KeyCode::Equal) {
        commands.send(SelectionCommand::NudgeAnimationSpeed(speed::STEP));
    }
}
