//! Orbit camera: left drag rotates, right drag pans, wheel zooms.

use bevy::{
    input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel},
    prelude::*,
    window::PrimaryWindow,
};

use crate::ui::PANEL_WIDTH;

const ROTATE_SENSITIVITY: f32 = 0.005; // radians per pixel
const PAN_SENSITIVITY: f32 = 0.0015; // world units per pixel per unit of distance
const ZOOM_STEP: f32 = 0.1; // fraction of distance per wheel line
const PIXELS_PER_LINE: f32 = 40.0;
const PITCH_LIMIT: f32 = 1.5;

/// Spherical camera rig around a focus point.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct OrbitCamera {
    pub focus: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

impl OrbitCamera {
    pub const MIN_DISTANCE: f32 = 6.0;
    pub const MAX_DISTANCE: f32 = 20.0;

    /// Rig that places the eye at `eye` (distance clamped) looking at `focus`.
    pub fn looking_at(eye: Vec3, focus: Vec3) -> Self {
        let offset = eye - focus;
        let length = offset.length().max(f32::EPSILON);
        Self {
            focus,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / length).clamp(-1.0, 1.0).asin().clamp(-PITCH_LIMIT, PITCH_LIMIT),
            distance: length.clamp(Self::MIN_DISTANCE, Self::MAX_DISTANCE),
        }
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.focus
            + Vec3::new(
                self.distance * cos_pitch * sin_yaw,
                self.distance * sin_pitch,
                self.distance * cos_pitch * cos_yaw,
            )
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye()).looking_at(self.focus, Vec3::Y)
    }

    pub fn rotate(&mut self, drag: Vec2) {
        self.yaw -= drag.x * ROTATE_SENSITIVITY;
        self.pitch = (self.pitch + drag.y * ROTATE_SENSITIVITY).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn pan(&mut self, drag: Vec2, rotation: Quat) {
        let right = rotation * Vec3::X;
        let up = rotation * Vec3::Y;
        self.focus += (-right * drag.x + up * drag.y) * self.distance * PAN_SENSITIVITY;
    }

    /// Positive `lines` move the eye closer.
    pub fn zoom(&mut self, lines: f32) {
        self.distance = (self.distance * (1.0 - lines * ZOOM_STEP))
            .clamp(Self::MIN_DISTANCE, Self::MAX_DISTANCE);
    }
}

/// System to move the orbit camera from mouse input over the scene.
pub fn orbit_camera_controls(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut motion: EventReader<MouseMotion>,
    mut wheel: EventReader<MouseWheel>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut cameras: Query<(&mut OrbitCamera, &mut Transform)>,
    mut dragging: Local<bool>,
) {
    let over_scene = windows
        .get_single()
        .ok()
        .and_then(Window::cursor_position)
        .is_some_and(|cursor| cursor.x > PANEL_WIDTH);

    // Drags that start on the panel belong to the panel
    if mouse_buttons.any_just_pressed([MouseButton::Left, MouseButton::Right]) {
        *dragging = over_scene;
    }
    if !mouse_buttons.any_pressed([MouseButton::Left, MouseButton::Right]) {
        *dragging = false;
    }

    let drag: Vec2 = motion.read().map(|event| event.delta).sum();
    let scroll: f32 = wheel
        .read()
        .map(|event| match event.unit {
            MouseScrollUnit::Line => event.y,
            MouseScrollUnit::Pixel => event.y / PIXELS_PER_LINE,
        })
        .sum();

    let Ok((mut orbit, mut transform)) = cameras.get_single_mut() else {
        return;
    };

    let mut moved = false;
    if *dragging && drag != Vec2::ZERO {
        if mouse_buttons.pressed(MouseButton::Left) {
            orbit.rotate(drag);
        } else {
            orbit.pan(drag, transform.rotation);
        }
        moved = true;
    }
    if over_scene && scroll != 0.0 {
        orbit.zoom(scroll);
        moved = true;
    }

    if moved {
        *transform = orbit.transform();
    }
}
