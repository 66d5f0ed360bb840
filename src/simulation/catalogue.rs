//! Liquid catalogue - the fixed set of liquids the user can pour.

use crate::resources::Liquid;

// ==================== LIQUIDS ====================
// Densities in kg/m³, viscosities relative to water.
// Order here is the order shown in the panel and bound to keys 1-7.
// =================================================

static LIQUIDS: [Liquid; 7] = [
    Liquid {
        name: "Water",
        density: 1000.0,
        color: [0x4F, 0xC3, 0xF7],
        viscosity: 1.0,
        description: "Pure water at room temperature",
    },
    Liquid {
        name: "Oil (Vegetable)",
        density: 920.0,
        color: [0xFF, 0xD5, 0x4F],
        viscosity: 50.0,
        description: "Common cooking oil, less dense than water",
    },
    Liquid {
        name: "Honey",
        density: 1420.0,
        color: [0xFF, 0xA7, 0x26],
        viscosity: 10000.0,
        description: "Natural honey, very viscous and dense",
    },
    Liquid {
        name: "Mercury",
        density: 13534.0,
        color: [0x9E, 0x9E, 0x9E],
        viscosity: 1.5,
        description: "Liquid metal, extremely dense",
    },
    Liquid {
        name: "Ethanol",
        density: 789.0,
        color: [0xE1, 0xF5, 0xFE],
        viscosity: 1.2,
        description: "Alcohol, lighter than water",
    },
    Liquid {
        name: "Glycerin",
        density: 1260.0,
        color: [0xF8, 0xBB, 0xD9],
        viscosity: 1412.0,
        description: "Thick, syrupy liquid",
    },
    Liquid {
        name: "Gasoline",
        density: 720.0,
        color: [0xFF, 0xEC, 0xB3],
        viscosity: 0.4,
        description: "Petroleum fuel, very light",
    },
];

/// Every liquid in catalogue order.
pub fn all() -> &'static [Liquid] {
    &LIQUIDS
}

/// Look up a liquid by its exact name.
pub fn find(name: &str) -> Option<&'static Liquid> {
    LIQUIDS.iter().find(|liquid| liquid.name == name)
}
