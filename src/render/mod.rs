//! Scene rendering - container, liquid layers, labels and the pour wave.
//!
//! Everything here reads the [`SelectionController`]; nothing writes to it.
//! Layer meshes are rebuilt whenever the controller's generation changes.

mod camera;
pub mod draw;
pub mod wave;

use bevy::prelude::*;

use crate::simulation::{SelectionController, SelectionSet};

pub use camera::{orbit_camera_controls, OrbitCamera};
use draw::{container_panels, layer_draws, measurement_ticks, tick_size, title_anchor};
pub use wave::{WaveClock, WaveOffset};

const CAMERA_START: Vec3 = Vec3::new(8.0, 4.0, 8.0);
const CAMERA_FOV_DEGREES: f32 = 60.0;
const SKY_COLOR: Color = Color::srgb(0.529, 0.808, 0.922);
const GLASS_SHADE: f32 = 0.2;
const TICK_SHADE: f32 = 0.4;
const LABEL_COLOR: Color = Color::srgb(0.2, 0.2, 0.2);
const HINT_COLOR: Color = Color::srgb(0.4, 0.4, 0.4);
/// Width of labels centered on their anchor
const CENTERED_LABEL_WIDTH: f32 = 420.0;

/// Plugin for the 3D container scene.
pub struct ContainerRenderPlugin;

impl Plugin for ContainerRenderPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(SKY_COLOR))
            .insert_resource(AmbientLight {
                color: Color::WHITE,
                brightness: 400.0,
            })
            .init_resource::<WaveClock>()
            .add_systems(Startup, (spawn_scene, spawn_scene_labels))
            .add_systems(
                Update,
                (
                    (sync_layer_meshes, animate_pour_wave).chain(),
                    toggle_empty_hint,
                    orbit_camera_controls,
                    position_world_labels
                        .after(sync_layer_meshes)
                        .after(orbit_camera_controls),
                )
                    .after(SelectionSet),
            );
    }
}

/// A liquid layer box; `rest_y` is its center when no pour is running.
#[derive(Component, Debug)]
pub struct LayerMesh {
    pub rest_y: f32,
}

/// How a [`WorldLabel`] sits relative to its anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelAlign {
    Left,
    Center,
}

/// UI text pinned to a point in the scene.
#[derive(Component, Debug)]
pub struct WorldLabel {
    pub anchor: Vec3,
    pub align: LabelAlign,
}

#[derive(Component)]
pub struct LayerLabel;

#[derive(Component)]
pub struct EmptyHint;

fn spawn_scene(
    mut commands: Commands,
    controller: Res<SelectionController>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let orbit = OrbitCamera::looking_at(CAMERA_START, Vec3::ZERO);
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            ..default()
        }),
        orbit.transform(),
        orbit,
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            ..default()
        },
        Transform::from_xyz(10.0, 10.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        PointLight {
            intensity: 400_000.0,
            ..default()
        },
        Transform::from_xyz(5.0, 5.0, 5.0),
    ));

    let container = controller.container();
    for panel in container_panels(container) {
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::from_size(panel.size))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgba(GLASS_SHADE, GLASS_SHADE, GLASS_SHADE, panel.face.opacity()),
                alpha_mode: AlphaMode::Blend,
                ..default()
            })),
            Transform::from_translation(panel.center),
            Name::new(format!("Container {:?}", panel.face)),
        ));
    }

    let tick_mesh = meshes.add(Cuboid::from_size(tick_size()));
    let tick_material = materials.add(StandardMaterial {
        base_color: Color::srgb(TICK_SHADE, TICK_SHADE, TICK_SHADE),
        ..default()
    });
    for center in measurement_ticks(container) {
        commands.spawn((
            Mesh3d(tick_mesh.clone()),
            MeshMaterial3d(tick_material.clone()),
            Transform::from_translation(center),
        ));
    }

    info!(
        "Container {}x{}x{} ready",
        container.width(),
        container.height(),
        container.depth()
    );
}

fn spawn_scene_labels(mut commands: Commands, controller: Res<SelectionController>) {
    commands.spawn(centered_label(
        "3D Fluid Density Simulation",
        26.0,
        LABEL_COLOR,
        title_anchor(controller.container()),
    ));
    commands.spawn((
        centered_label("Click \"Add\" to see density layers!", 18.0, HINT_COLOR, Vec3::ZERO),
        EmptyHint,
    ));
}

fn centered_label(
    value: &str,
    font_size: f32,
    color: Color,
    anchor: Vec3,
) -> (Text, TextFont, TextColor, TextLayout, Node, WorldLabel) {
    (
        Text::new(value),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(color),
        TextLayout::new_with_justify(JustifyText::Center),
        Node {
            position_type: PositionType::Absolute,
            width: Val::Px(CENTERED_LABEL_WIDTH),
            ..default()
        },
        WorldLabel {
            anchor,
            align: LabelAlign::Center,
        },
    )
}

/// Rebuild layer boxes and labels after the selection changed.
fn sync_layer_meshes(
    mut commands: Commands,
    controller: Res<SelectionController>,
    mut last_generation: Local<Option<u64>>,
    existing: Query<Entity, Or<(With<LayerMesh>, With<LayerLabel>)>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if *last_generation == Some(controller.generation()) {
        return;
    }
    *last_generation = Some(controller.generation());

    for entity in &existing {
        commands.entity(entity).despawn_recursive();
    }

    for draw in layer_draws(controller.layers(), controller.container()) {
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::from_size(draw.size))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: draw.color,
                alpha_mode: AlphaMode::Blend,
                metallic: draw.finish.metallic,
                perceptual_roughness: draw.finish.perceptual_roughness,
                reflectance: draw.finish.reflectance,
                ..default()
            })),
            Transform::from_translation(draw.center),
            LayerMesh {
                rest_y: draw.center.y,
            },
            Name::new(format!("Layer {}", draw.liquid.name)),
        ));
        commands.spawn((
            Text::new(draw.label),
            TextFont {
                font_size: 16.0,
                ..default()
            },
            TextColor(LABEL_COLOR),
            Node {
                position_type: PositionType::Absolute,
                ..default()
            },
            WorldLabel {
                anchor: draw.label_anchor,
                align: LabelAlign::Left,
            },
            LayerLabel,
        ));
    }
}

/// Bob and sway the layers while pouring; settle them otherwise.
fn animate_pour_wave(
    time: Res<Time>,
    controller: Res<SelectionController>,
    mut clock: ResMut<WaveClock>,
    mut layers: Query<(&LayerMesh, &mut Transform)>,
) {
    if !controller.is_pouring() {
        for (layer, mut transform) in &mut layers {
            if transform.translation.y != layer.rest_y || transform.rotation != Quat::IDENTITY {
                transform.translation.y = layer.rest_y;
                transform.rotation = Quat::IDENTITY;
            }
        }
        return;
    }

    clock.advance(time.delta_secs(), controller.animation_speed());
    let offset = clock.offset();
    for (layer, mut transform) in &mut layers {
        transform.translation.y = layer.rest_y + offset.bob;
        transform.rotation = Quat::from_rotation_y(offset.sway);
    }
}

fn toggle_empty_hint(
    controller: Res<SelectionController>,
    mut hints: Query<&mut Visibility, With<EmptyHint>>,
) {
    let wanted = if controller.layers().is_empty() {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    for mut visibility in &mut hints {
        visibility.set_if_neq(wanted);
    }
}

/// Keep scene labels on top of their anchors in screen space.
fn position_world_labels(
    cameras: Query<(&Camera, &GlobalTransform), With<OrbitCamera>>,
    mut labels: Query<(&WorldLabel, &mut Node)>,
) {
    let Ok((camera, camera_transform)) = cameras.get_single() else {
        return;
    };

    for (label, mut node) in &mut labels {
        let Ok(screen) = camera.world_to_viewport(camera_transform, label.anchor) else {
            node.display = Display::None;
            continue;
        };
        node.display = Display::Flex;
        // Labels are vertically centered on the anchor
        node.top = Val::Px(screen.y - 20.0);
        node.left = match label.align {
            LabelAlign::Left => Val::Px(screen.x),
            LabelAlign::Center => Val::Px(screen.x - CENTERED_LABEL_WIDTH / 2.0),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{catalogue, CompletionNotice, ContainerConfig};
    use bevy::input::mouse::{MouseMotion, MouseWheel};

    fn scene_app(liquids: &[&str]) -> App {
        let mut controller = SelectionController::new(
            ContainerConfig::default(),
            Box::new(|_: &CompletionNotice| {}),
        );
        for name in liquids {
            controller
                .add_liquid(catalogue::find(name).expect("catalogue liquid"))
                .unwrap();
        }

        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .init_resource::<ButtonInput<MouseButton>>()
            .add_event::<MouseMotion>()
            .add_event::<MouseWheel>()
            .insert_resource(controller)
            .add_plugins(ContainerRenderPlugin);
        app
    }

    #[test]
    fn layer_meshes_follow_the_selection() {
        let mut app = scene_app(&["Water", "Mercury"]);
        app.update();

        let mut layers = app.world_mut().query::<&LayerMesh>();
        let mut rest: Vec<f32> = layers.iter(app.world()).map(|l| l.rest_y).collect();
        rest.sort_by(f32::total_cmp);
        let expected: Vec<f32> = app
            .world()
            .resource::<SelectionController>()
            .layers()
            .iter()
            .map(|l| l.vertical_center)
            .collect();
        assert_eq!(rest, expected);
    }

    #[test]
    fn new_layer_labels_are_placed_in_their_first_frame() {
        let mut app = scene_app(&["Water"]);
        app.update();

        // Without a render target nothing projects, so every label that went
        // through the placement pass is hidden rather than left at the origin.
        let mut labels = app.world_mut().query_filtered::<&Node, With<LayerLabel>>();
        let nodes: Vec<&Node> = labels.iter(app.world()).collect();
        assert_eq!(nodes.len(), 1);
        assert!(nodes.iter().all(|node| node.display == Display::None));
    }
}
