//! Control panel - catalogue, container contents, speed and info panel.
//!
//! The panel is a thin form over [`SelectionCommand`]s: buttons send
//! commands, and the panel redraws itself from the controller.

use bevy::prelude::*;
use bevy::ui::RelativeCursorPosition;

use crate::resources::Liquid;
use crate::simulation::{catalogue, speed, SelectionCommand, SelectionController, SelectionSet};

/// Width of the panel docked on the left edge, in logical pixels.
pub const PANEL_WIDTH: f32 = 350.0;

const EDUCATIONAL_NOTE: &str = "Educational Note: Density determines how liquids layer. \
Denser liquids sink below less dense ones, creating distinct layers.";

fn rgb(hex: u32) -> Color {
    Color::srgb_u8((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

mod palette {
    pub const TEXT: u32 = 0x333333;
    pub const HEADING: u32 = 0x555555;
    pub const MUTED: u32 = 0x666666;
    pub const BORDER: u32 = 0xDDDDDD;
    pub const ADD: u32 = 0x4CAF50;
    pub const REMOVE: u32 = 0xF44336;
    pub const DISABLED: u32 = 0xCCCCCC;
    pub const CLOSE: u32 = 0x2196F3;
    pub const SELECTED_ROW: u32 = 0xE8F5E8;
    pub const NOTE_BACKGROUND: u32 = 0xF8F9FA;
}

/// Liquid shown in the info panel, if any.
#[derive(Resource, Default, Debug)]
pub struct InfoSelection(pub Option<&'static Liquid>);

/// Plugin for the control panel and info panel.
pub struct ControlPanelPlugin;

impl Plugin for ControlPanelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InfoSelection>()
            .add_systems(Startup, (spawn_control_panel, spawn_info_panel))
            .add_systems(
                Update,
                (handle_panel_buttons, drag_speed_slider).before(SelectionSet),
            )
            .add_systems(
                Update,
                (
                    refresh_catalogue_rows,
                    rebuild_container_list,
                    refresh_status_text,
                    refresh_info_panel,
                )
                    .after(SelectionSet),
            );
    }
}

#[derive(Component)]
struct CatalogueRow(&'static str);

#[derive(Component)]
struct AddButton(&'static Liquid);

#[derive(Component)]
struct AddButtonLabel(&'static str);

#[derive(Component)]
struct InfoButton(&'static Liquid);

#[derive(Component)]
struct RemoveButton(&'static str);

#[derive(Component)]
struct ClearButton;

#[derive(Component)]
struct SpeedButton(f32);

#[derive(Component)]
struct SpeedSlider;

#[derive(Component)]
struct SpeedSliderFill;

#[derive(Component)]
struct CloseInfoButton;

#[derive(Component)]
struct ContainerSection;

#[derive(Component)]
struct ContainerHeader;

#[derive(Component)]
struct ContainerList;

#[derive(Component)]
struct SpeedLabel;

#[derive(Component)]
struct DebugInfo;

#[derive(Component)]
struct InfoPanel;

#[derive(Component)]
struct InfoTitle;

#[derive(Component)]
struct InfoSwatch;

#[derive(Component)]
struct InfoBody;

fn text(value: impl Into<String>, font_size: f32, color: u32) -> (Text, TextFont, TextColor) {
    (
        Text::new(value),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(rgb(color)),
    )
}

fn button_node() -> Node {
    Node {
        padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        ..default()
    }
}

fn swatch(size: f32, color: Color) -> (Node, BackgroundColor, BorderRadius) {
    (
        Node {
            width: Val::Px(size),
            height: Val::Px(size),
            flex_shrink: 0.0,
            ..default()
        },
        BackgroundColor(color),
        BorderRadius::MAX,
    )
}

fn spawn_control_panel(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Px(PANEL_WIDTH),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(20.0)),
                row_gap: Val::Px(16.0),
                overflow: Overflow::clip_y(),
                border: UiRect::right(Val::Px(1.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.95)),
            BorderColor(rgb(palette::BORDER)),
            Name::new("Control Panel"),
        ))
        .with_children(|panel| {
            panel.spawn(text("Liquid Density Explorer", 24.0, palette::TEXT));

            panel
                .spawn(Node {
                    flex_direction: FlexDirection::Column,
                    row_gap: Val::Px(8.0),
                    ..default()
                })
                .with_children(|section| {
                    section.spawn(text("Available Liquids", 16.0, palette::HEADING));
                    for liquid in catalogue::all() {
                        spawn_catalogue_row(section, liquid);
                    }
                });

            panel
                .spawn((
                    Node {
                        flex_direction: FlexDirection::Column,
                        row_gap: Val::Px(5.0),
                        display: Display::None,
                        ..default()
                    },
                    ContainerSection,
                ))
                .with_children(|section| {
                    section.spawn((text("In Container (0 liquids)", 16.0, palette::HEADING), ContainerHeader));
                    section.spawn((
                        Node {
                            flex_direction: FlexDirection::Column,
                            row_gap: Val::Px(5.0),
                            ..default()
                        },
                        ContainerList,
                    ));
                });

            panel
                .spawn(Node {
                    flex_direction: FlexDirection::Column,
                    row_gap: Val::Px(10.0),
                    ..default()
                })
                .with_children(|section| {
                    section.spawn(text("Controls", 16.0, palette::HEADING));
                    section
                        .spawn(Node {
                            align_items: AlignItems::Center,
                            column_gap: Val::Px(8.0),
                            ..default()
                        })
                        .with_children(|row| {
                            spawn_speed_button(row, "-", -speed::STEP);
                            row.spawn((
                                text(format!("Animation Speed: {:.1}x", speed::DEFAULT), 14.0, palette::TEXT),
                                SpeedLabel,
                            ));
                            spawn_speed_button(row, "+", speed::STEP);
                        });
                    spawn_speed_slider(section);
                    section
                        .spawn((
                            Button,
                            Node {
                                padding: UiRect::all(Val::Px(10.0)),
                                justify_content: JustifyContent::Center,
                                ..default()
                            },
                            BackgroundColor(rgb(palette::DISABLED)),
                            BorderRadius::all(Val::Px(8.0)),
                            ClearButton,
                        ))
                        .with_children(|button| {
                            button.spawn(text("Clear Container", 14.0, 0xFFFFFF));
                        });
                });

            panel
                .spawn((
                    Node {
                        padding: UiRect::all(Val::Px(10.0)),
                        ..default()
                    },
                    BackgroundColor(rgb(palette::NOTE_BACKGROUND)),
                    BorderRadius::all(Val::Px(6.0)),
                ))
                .with_children(|note| {
                    note.spawn((text(debug_info(0, 0), 12.0, palette::MUTED), DebugInfo));
                });
        });
}

fn spawn_catalogue_row(parent: &mut ChildBuilder, liquid: &'static Liquid) {
    parent
        .spawn((
            Node {
                align_items: AlignItems::Center,
                column_gap: Val::Px(10.0),
                padding: UiRect::all(Val::Px(8.0)),
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
            BackgroundColor(Color::WHITE),
            BorderColor(rgb(palette::BORDER)),
            BorderRadius::all(Val::Px(8.0)),
            CatalogueRow(liquid.name),
        ))
        .with_children(|row| {
            row.spawn(swatch(20.0, liquid.base_color()));
            row.spawn(Node {
                flex_direction: FlexDirection::Column,
                flex_grow: 1.0,
                ..default()
            })
            .with_children(|column| {
                column.spawn(text(liquid.name, 14.0, palette::TEXT));
                column.spawn(text(format!("{} kg/m³", liquid.density), 12.0, palette::MUTED));
            });
            row.spawn((
                Button,
                button_node(),
                BackgroundColor(rgb(palette::ADD)),
                BorderRadius::all(Val::Px(4.0)),
                AddButton(liquid),
            ))
            .with_children(|button| {
                button.spawn((text("Add", 12.0, 0xFFFFFF), AddButtonLabel(liquid.name)));
            });
            row.spawn((
                Button,
                Node {
                    border: UiRect::all(Val::Px(1.0)),
                    ..button_node()
                },
                BackgroundColor(Color::WHITE),
                BorderColor(rgb(palette::BORDER)),
                BorderRadius::all(Val::Px(4.0)),
                InfoButton(liquid),
            ))
            .with_children(|button| {
                button.spawn(text("Info", 12.0, palette::TEXT));
            });
        });
}

fn spawn_speed_button(parent: &mut ChildBuilder, label: &str, delta: f32) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(28.0),
                border: UiRect::all(Val::Px(1.0)),
                ..button_node()
            },
            BackgroundColor(Color::WHITE),
            BorderColor(rgb(palette::BORDER)),
            BorderRadius::all(Val::Px(4.0)),
            SpeedButton(delta),
        ))
        .with_children(|button| {
            button.spawn(text(label, 14.0, palette::TEXT));
        });
}

fn spawn_speed_slider(parent: &mut ChildBuilder) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Percent(100.0),
                height: Val::Px(12.0),
                ..default()
            },
            BackgroundColor(rgb(palette::BORDER)),
            BorderRadius::all(Val::Px(6.0)),
            RelativeCursorPosition::default(),
            SpeedSlider,
        ))
        .with_children(|track| {
            track.spawn((
                Node {
                    width: Val::Percent(slider_fraction(speed::DEFAULT) * 100.0),
                    height: Val::Percent(100.0),
                    ..default()
                },
                BackgroundColor(rgb(palette::CLOSE)),
                BorderRadius::all(Val::Px(6.0)),
                SpeedSliderFill,
            ));
        });
}

/// Speed picked by a press at `fraction` of the track, 0 being the left end.
fn slider_speed(fraction: f32) -> f32 {
    speed::MIN + fraction.clamp(0.0, 1.0) * (speed::MAX - speed::MIN)
}

/// Share of the track filled at `value`.
fn slider_fraction(value: f32) -> f32 {
    ((value - speed::MIN) / (speed::MAX - speed::MIN)).clamp(0.0, 1.0)
}

fn spawn_info_panel(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                display: Display::None,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.5)),
            GlobalZIndex(10),
            InfoPanel,
            Name::new("Info Panel"),
        ))
        .with_children(|overlay| {
            overlay
                .spawn((
                    Node {
                        flex_direction: FlexDirection::Column,
                        row_gap: Val::Px(16.0),
                        padding: UiRect::all(Val::Px(30.0)),
                        max_width: Val::Px(500.0),
                        ..default()
                    },
                    BackgroundColor(Color::WHITE),
                    BorderRadius::all(Val::Px(12.0)),
                ))
                .with_children(|card| {
                    card.spawn(Node {
                        align_items: AlignItems::Center,
                        column_gap: Val::Px(10.0),
                        ..default()
                    })
                    .with_children(|title| {
                        title.spawn((swatch(30.0, Color::WHITE), InfoSwatch));
                        title.spawn((text("", 24.0, palette::TEXT), InfoTitle));
                    });
                    card.spawn((text("", 16.0, palette::TEXT), InfoBody));
                    card.spawn(text(EDUCATIONAL_NOTE, 14.0, palette::MUTED));
                    card.spawn((
                        Button,
                        Node {
                            padding: UiRect::axes(Val::Px(20.0), Val::Px(10.0)),
                            align_self: AlignSelf::FlexStart,
                            ..default()
                        },
                        BackgroundColor(rgb(palette::CLOSE)),
                        BorderRadius::all(Val::Px(8.0)),
                        CloseInfoButton,
                    ))
                    .with_children(|button| {
                        button.spawn(text("Close", 16.0, 0xFFFFFF));
                    });
                });
        });
}

/// Turn button presses into commands; the controller rejects invalid adds.
#[allow(clippy::too_many_arguments)]
fn handle_panel_buttons(
    add: Query<(&Interaction, &AddButton), Changed<Interaction>>,
    info: Query<(&Interaction, &InfoButton), Changed<Interaction>>,
    remove: Query<(&Interaction, &RemoveButton), Changed<Interaction>>,
    speed_buttons: Query<(&Interaction, &SpeedButton), Changed<Interaction>>,
    clear: Query<&Interaction, (Changed<Interaction>, With<ClearButton>)>,
    close: Query<&Interaction, (Changed<Interaction>, With<CloseInfoButton>)>,
    mut commands: EventWriter<SelectionCommand>,
    mut info_selection: ResMut<InfoSelection>,
) {
    let pressed = |interaction: &Interaction| *interaction == Interaction::Pressed;

    for (_, button) in add.iter().filter(|(i, _)| pressed(*i)) {
        commands.send(SelectionCommand::Add(button.0));
    }
    for (_, button) in remove.iter().filter(|(i, _)| pressed(*i)) {
        commands.send(SelectionCommand::Remove(button.0));
    }
    for (_, button) in speed_buttons.iter().filter(|(i, _)| pressed(*i)) {
        commands.send(SelectionCommand::NudgeAnimationSpeed(button.0));
    }
    if clear.iter().any(pressed) {
        commands.send(SelectionCommand::Clear);
    }
    for (_, button) in info.iter().filter(|(i, _)| pressed(*i)) {
        info_selection.0 = Some(button.0);
    }
    if close.iter().any(pressed) {
        info_selection.0 = None;
    }
}

/// Set the speed from the cursor while the slider track is held.
fn drag_speed_slider(
    sliders: Query<(&Interaction, &RelativeCursorPosition), With<SpeedSlider>>,
    controller: Res<SelectionController>,
    mut commands: EventWriter<SelectionCommand>,
) {
    for (interaction, cursor) in &sliders {
        if *interaction != Interaction::Pressed {
            continue;
        }
        let Some(position) = cursor.normalized else {
            continue;
        };
        let value = slider_speed(position.x);
        if (value - controller.animation_speed()).abs() >= speed::STEP / 2.0 {
            commands.send(SelectionCommand::SetAnimationSpeed(value));
        }
    }
}

/// Highlight liquids already poured and grey out Add where it would be rejected.
fn refresh_catalogue_rows(
    controller: Res<SelectionController>,
    mut last_generation: Local<Option<u64>>,
    mut rows: Query<(&CatalogueRow, &mut BackgroundColor), Without<AddButton>>,
    mut buttons: Query<(&AddButton, &mut BackgroundColor), Without<CatalogueRow>>,
    mut labels: Query<(&AddButtonLabel, &mut Text)>,
) {
    if *last_generation == Some(controller.generation()) {
        return;
    }
    *last_generation = Some(controller.generation());

    for (row, mut background) in &mut rows {
        background.0 = if controller.contains(row.0) {
            rgb(palette::SELECTED_ROW)
        } else {
            Color::WHITE
        };
    }
    for (button, mut background) in &mut buttons {
        let blocked = controller.contains(button.0.name) || controller.is_full();
        background.0 = rgb(if blocked { palette::DISABLED } else { palette::ADD });
    }
    for (label, mut text) in &mut labels {
        text.0 = if controller.contains(label.0) { "Added" } else { "Add" }.to_string();
    }
}

/// Rebuild the "In Container" list, densest liquid first.
fn rebuild_container_list(
    mut commands: Commands,
    controller: Res<SelectionController>,
    mut last_generation: Local<Option<u64>>,
    lists: Query<Entity, With<ContainerList>>,
    mut sections: Query<&mut Node, With<ContainerSection>>,
    mut headers: Query<&mut Text, With<ContainerHeader>>,
) {
    if *last_generation == Some(controller.generation()) {
        return;
    }
    *last_generation = Some(controller.generation());

    let count = controller.selection().len();
    for mut node in &mut sections {
        node.display = if count == 0 { Display::None } else { Display::Flex };
    }
    for mut header in &mut headers {
        header.0 = format!("In Container ({count} liquids)");
    }

    let Ok(list) = lists.get_single() else {
        return;
    };
    let liquids: Vec<Liquid> = controller.layers().iter().map(|layer| layer.liquid).collect();
    commands.entity(list).despawn_descendants().with_children(|list| {
        for (index, liquid) in liquids.iter().enumerate() {
            list.spawn((
                Node {
                    align_items: AlignItems::Center,
                    column_gap: Val::Px(10.0),
                    padding: UiRect::all(Val::Px(8.0)),
                    border: UiRect::all(Val::Px(1.0)),
                    ..default()
                },
                BackgroundColor(liquid.tinted(0x20)),
                BorderColor(liquid.tinted(0x40)),
                BorderRadius::all(Val::Px(4.0)),
            ))
            .with_children(|row| {
                row.spawn(text(format!("#{}", index + 1), 14.0, palette::TEXT));
                row.spawn(swatch(16.0, liquid.base_color()));
                row.spawn((
                    text(liquid.name, 14.0, palette::TEXT),
                    Node {
                        flex_grow: 1.0,
                        ..default()
                    },
                ));
                row.spawn((
                    Button,
                    Node {
                        padding: UiRect::axes(Val::Px(8.0), Val::Px(4.0)),
                        ..default()
                    },
                    BackgroundColor(rgb(palette::REMOVE)),
                    BorderRadius::all(Val::Px(4.0)),
                    RemoveButton(liquid.name),
                ))
                .with_children(|button| {
                    button.spawn(text("Remove", 12.0, 0xFFFFFF));
                });
            });
        }
    });
}

fn debug_info(selected: usize, rendered: usize) -> String {
    format!(
        "Debug Info:\nSelected: {selected} liquids\nLayers: {rendered} rendered\n\
How to use:\n• Click \"Add\" to pour liquids\n• Liquids layer by density\n\
• Drag to rotate the 3D view, right-drag to pan, scroll to zoom\n\
• Keys 1-7 add, Shift+1-7 remove, C clears, -/= change speed"
    )
}

fn refresh_status_text(
    controller: Res<SelectionController>,
    mut speed_labels: Query<&mut Text, (With<SpeedLabel>, Without<DebugInfo>)>,
    mut debug_labels: Query<&mut Text, (With<DebugInfo>, Without<SpeedLabel>)>,
    mut clear_buttons: Query<&mut BackgroundColor, With<ClearButton>>,
    mut slider_fills: Query<&mut Node, With<SpeedSliderFill>>,
) {
    if !controller.is_changed() {
        return;
    }

    for mut label in &mut speed_labels {
        label.0 = format!("Animation Speed: {:.1}x", controller.animation_speed());
    }
    for mut fill in &mut slider_fills {
        fill.width = Val::Percent(slider_fraction(controller.animation_speed()) * 100.0);
    }
    for mut label in &mut debug_labels {
        label.0 = debug_info(controller.selection().len(), controller.layers().len());
    }
    let clear_color = if controller.selection().is_empty() {
        palette::DISABLED
    } else {
        palette::REMOVE
    };
    for mut background in &mut clear_buttons {
        background.0 = rgb(clear_color);
    }
}

fn refresh_info_panel(
    info_selection: Res<InfoSelection>,
    mut panels: Query<&mut Node, With<InfoPanel>>,
    mut titles: Query<(&mut Text, &mut TextColor), (With<InfoTitle>, Without<InfoBody>)>,
    mut bodies: Query<&mut Text, (With<InfoBody>, Without<InfoTitle>)>,
    mut swatches: Query<&mut BackgroundColor, With<InfoSwatch>>,
) {
    if !info_selection.is_changed() {
        return;
    }

    for mut node in &mut panels {
        node.display = if info_selection.0.is_some() {
            Display::Flex
        } else {
            Display::None
        };
    }

    let Some(liquid) = info_selection.0 else {
        return;
    };
    for (mut title, mut color) in &mut titles {
        title.0 = liquid.name.to_string();
        color.0 = liquid.base_color();
    }
    for mut body in &mut bodies {
        body.0 = format!(
            "Description: {}\nDensity: {} kg/m³\nViscosity: {}x (relative to water)",
            liquid.description, liquid.density, liquid.viscosity
        );
    }
    for mut background in &mut swatches {
        background.0 = liquid.base_color();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{CompletionNotice, ContainerConfig, DensityPlugin};

    #[test]
    fn slider_track_spans_the_speed_range() {
        assert_eq!(slider_speed(0.0), speed::MIN);
        assert!((slider_speed(1.0) - speed::MAX).abs() < 1e-5);
        assert_eq!(slider_speed(-0.5), speed::MIN);
        assert_eq!(slider_speed(1.5), slider_speed(1.0));
        assert_eq!(slider_fraction(speed::MIN), 0.0);
        assert_eq!(slider_fraction(speed::MAX), 1.0);
        assert!((slider_speed(slider_fraction(speed::DEFAULT)) - speed::DEFAULT).abs() < 1e-5);
    }

    fn slider_app(pressed_at: Option<f32>) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(SelectionController::new(
                ContainerConfig::default(),
                Box::new(|_: &CompletionNotice| {}),
            ))
            .add_plugins(DensityPlugin)
            .add_systems(Update, drag_speed_slider.before(SelectionSet));
        app.world_mut().spawn((
            if pressed_at.is_some() {
                Interaction::Pressed
            } else {
                Interaction::Hovered
            },
            RelativeCursorPosition {
                normalized: Some(Vec2::new(pressed_at.unwrap_or(1.0), 0.5)),
                ..default()
            },
            SpeedSlider,
        ));
        app
    }

    #[test]
    fn holding_the_track_sets_the_speed() {
        let mut app = slider_app(Some(1.0));
        app.update();
        assert_eq!(app.world().resource::<SelectionController>().animation_speed(), speed::MAX);

        let mut app = slider_app(Some(0.0));
        app.update();
        assert!((app.world().resource::<SelectionController>().animation_speed() - speed::MIN).abs() < 1e-6);
    }

    #[test]
    fn hovering_the_track_leaves_the_speed() {
        let mut app = slider_app(None);
        app.update();
        assert_eq!(
            app.world().resource::<SelectionController>().animation_speed(),
            speed::DEFAULT
        );
    }
}
