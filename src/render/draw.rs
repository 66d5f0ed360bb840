//! Draw descriptions for the container and its layers.
//!
//! These are plain values computed from the layout; the scene systems turn
//! them into meshes and labels.

use bevy::color::Color;
use bevy::math::Vec3;

use crate::resources::{Layer, Liquid};
use crate::simulation::{config, ContainerConfig};

/// Layer opacity (0.8)
pub const LAYER_ALPHA: u8 = 204;
/// Number of height marks along the left wall
pub const MEASUREMENT_TICKS: usize = 8;
/// Horizontal gap between the right wall and the layer labels
pub const LABEL_GAP: f32 = 1.0;
/// Height of the title above the container rim
pub const TITLE_LIFT: f32 = 1.5;

const TICK_SIZE: Vec3 = Vec3::new(0.1, 0.02, 0.02);

/// Liquids that render as polished metal
const METALLIC_LIQUIDS: [&str; 1] = ["Mercury"];

/// One side of the open container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Face {
    Bottom,
    Left,
    Right,
    Back,
    Front,
}

impl Face {
    /// The front wall faces the default camera and is kept the most see-through.
    pub fn opacity(self) -> f32 {
        match self {
            Face::Bottom => 0.7,
            Face::Left | Face::Right | Face::Back => 0.3,
            Face::Front => 0.1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelDraw {
    pub face: Face,
    pub center: Vec3,
    pub size: Vec3,
}

/// Surface response of a layer box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Finish {
    pub metallic: f32,
    pub perceptual_roughness: f32,
    pub reflectance: f32,
}

impl Finish {
    pub const GLOSSY: Finish = Finish {
        metallic: 0.0,
        perceptual_roughness: 0.2,
        reflectance: 0.5,
    };

    /// White specular highlight over a mirror-like surface.
    pub const METAL: Finish = Finish {
        metallic: 1.0,
        perceptual_roughness: 0.08,
        reflectance: 1.0,
    };
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayerDraw {
    pub liquid: Liquid,
    pub center: Vec3,
    pub size: Vec3,
    pub color: Color,
    pub finish: Finish,
    pub label: String,
    pub label_anchor: Vec3,
}

/// Bottom and four walls of the container, centered on the origin.
pub fn container_panels(container: &ContainerConfig) -> [PanelDraw; 5] {
    let (w, h, d) = (container.width(), container.height(), container.depth());
    let t = config::WALL_THICKNESS;

    [
        PanelDraw {
            face: Face::Bottom,
            center: Vec3::new(0.0, -h / 2.0, 0.0),
            size: Vec3::new(w, t, d),
        },
        PanelDraw {
            face: Face::Left,
            center: Vec3::new(-w / 2.0, 0.0, 0.0),
            size: Vec3::new(t, h, d),
        },
        PanelDraw {
            face: Face::Right,
            center: Vec3::new(w / 2.0, 0.0, 0.0),
            size: Vec3::new(t, h, d),
        },
        PanelDraw {
            face: Face::Back,
            center: Vec3::new(0.0, 0.0, -d / 2.0),
            size: Vec3::new(w, h, t),
        },
        PanelDraw {
            face: Face::Front,
            center: Vec3::new(0.0, 0.0, d / 2.0),
            size: Vec3::new(w, h, t),
        },
    ]
}

/// Centers of the height marks; every mark has size [`tick_size`].
pub fn measurement_ticks(container: &ContainerConfig) -> Vec<Vec3> {
    let (w, h) = (container.width(), container.height());
    (1..=MEASUREMENT_TICKS)
        .map(|i| {
            Vec3::new(
                -w / 2.0 - TICK_SIZE.x / 2.0,
                -h / 2.0 + i as f32 * h / MEASUREMENT_TICKS as f32,
                0.0,
            )
        })
        .collect()
}

pub fn tick_size() -> Vec3 {
    TICK_SIZE
}

/// Box and label for every layer, bottom to top.
pub fn layer_draws(layers: &[Layer], container: &ContainerConfig) -> Vec<LayerDraw> {
    let clearance = container.wall_clearance();
    layers
        .iter()
        .map(|layer| LayerDraw {
            liquid: layer.liquid,
            center: Vec3::new(0.0, layer.vertical_center, 0.0),
            size: Vec3::new(
                container.width() - clearance,
                layer.vertical_extent,
                container.depth() - clearance,
            ),
            color: layer.liquid.tinted(LAYER_ALPHA),
            finish: layer_finish(&layer.liquid),
            label: layer_label(&layer.liquid),
            label_anchor: Vec3::new(container.width() / 2.0 + LABEL_GAP, layer.vertical_center, 0.0),
        })
        .collect()
}

pub fn layer_finish(liquid: &Liquid) -> Finish {
    if METALLIC_LIQUIDS.contains(&liquid.name) {
        Finish::METAL
    } else {
        Finish::GLOSSY
    }
}

pub fn layer_label(liquid: &Liquid) -> String {
    format!("{}\n{} kg/m³", liquid.name, liquid.density)
}

pub fn title_anchor(container: &ContainerConfig) -> Vec3 {
    Vec3::new(0.0, container.height() / 2.0 + TITLE_LIFT, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{catalogue, compute_layers};

    #[test]
    fn front_wall_is_most_transparent() {
        let panels = container_panels(&ContainerConfig::default());
        let front = Face::Front.opacity();
        for panel in panels.iter().filter(|p| p.face != Face::Front) {
            assert!(panel.face.opacity() > front, "{:?}", panel.face);
        }
    }

    #[test]
    fn walls_enclose_layers() {
        let container = ContainerConfig::default();
        let selection: Vec<_> = catalogue::all().to_vec();
        let draws = layer_draws(&compute_layers(&selection, &container), &container);

        assert_eq!(draws.len(), selection.len());
        for draw in &draws {
            assert!(draw.size.x < container.width());
            assert!(draw.size.z < container.depth());
            assert!(draw.center.y - draw.size.y / 2.0 > -container.height() / 2.0);
            assert!(draw.center.y + draw.size.y / 2.0 < container.height() / 2.0);
            assert!(draw.label_anchor.x > container.width() / 2.0);
        }
    }

    #[test]
    fn label_shows_name_and_density() {
        let mercury = catalogue::find("Mercury").unwrap();
        assert_eq!(layer_label(mercury), "Mercury\n13534 kg/m³");
    }

    #[test]
    fn only_mercury_is_metallic() {
        let container = ContainerConfig::default();
        let selection: Vec<_> = catalogue::all().to_vec();
        for draw in layer_draws(&compute_layers(&selection, &container), &container) {
            if draw.liquid.name == "Mercury" {
                assert_eq!(draw.finish, Finish::METAL);
                assert!(draw.finish.perceptual_roughness < Finish::GLOSSY.perceptual_roughness);
            } else {
                assert_eq!(draw.finish, Finish::GLOSSY, "{}", draw.liquid.name);
            }
        }
    }

    #[test]
    fn ticks_climb_the_left_wall() {
        let container = ContainerConfig::default();
        let ticks = measurement_ticks(&container);
        assert_eq!(ticks.len(), MEASUREMENT_TICKS);
        assert!(ticks.iter().all(|t| t.x < -container.width() / 2.0));
        assert!((ticks.last().unwrap().y - container.height() / 2.0).abs() < 1e-5);
    }
}
