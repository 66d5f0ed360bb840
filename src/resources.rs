//! Plain data structures shared by the layout engine, controller and renderer.
//!
//! Liquids are catalogue-defined and `Copy`; layers are derived values that
//! get rebuilt from the selection on every change.

use bevy::color::Color;

/// A selectable liquid.
///
/// Two liquids are the same liquid when their names match; the catalogue
/// never holds two entries with the same name.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Liquid {
    /// Unique display name, also used as the identity of the liquid
    pub name: &'static str,
    /// Density in kg/m³
    pub density: f32,
    /// sRGB display color
    pub color: [u8; 3],
    /// Viscosity relative to water (water = 1)
    pub viscosity: f32,
    /// One-line description shown in the info panel
    pub description: &'static str,
}

impl Liquid {
    /// Display color as a Bevy color.
    pub fn base_color(&self) -> Color {
        let [r, g, b] = self.color;
        Color::srgb_u8(r, g, b)
    }

    /// Display color with the given alpha (0-255).
    pub fn tinted(&self, alpha: u8) -> Color {
        let [r, g, b] = self.color;
        Color::srgba_u8(r, g, b, alpha)
    }

    pub fn same_as(&self, other: &Liquid) -> bool {
        self.name == other.name
    }
}

/// One horizontal slab of liquid inside the container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layer {
    pub liquid: Liquid,
    /// Volume of liquid in the slab (world units³)
    pub volume: f32,
    /// Height of the slab
    pub vertical_extent: f32,
    /// Y coordinate of the slab center
    pub vertical_center: f32,
}

impl Layer {
    /// Y coordinate of the slab's lower face
    pub fn bottom(&self) -> f32 {
        self.vertical_center - self.vertical_extent / 2.0
    }

    /// Y coordinate of the slab's upper face
    pub fn top(&self) -> f32 {
        self.vertical_center + self.vertical_extent / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: Liquid = Liquid {
        name: "Sample",
        density: 1000.0,
        color: [0x4F, 0xC3, 0xF7],
        viscosity: 1.0,
        description: "",
    };

    #[test]
    fn layer_faces_bracket_center() {
        let layer = Layer {
            liquid: SAMPLE,
            volume: 6.0,
            vertical_extent: 2.0,
            vertical_center: 1.0,
        };
        assert_eq!(layer.bottom(), 0.0);
        assert_eq!(layer.top(), 2.0);
    }

    #[test]
    fn identity_is_by_name() {
        let same_name = Liquid { density: 1.0, ..SAMPLE };
        assert!(SAMPLE.same_as(&same_name));
        let other = Liquid { name: "Other", ..SAMPLE };
        assert!(!SAMPLE.same_as(&other));
    }
}
