//! Layer layout - stacks the selected liquids by density.

use crate::resources::{Layer, Liquid};
use crate::simulation::ContainerConfig;

/// Stack `selection` inside `container`, densest liquid at the bottom.
///
/// The fill volume is split evenly between the liquids and each share is
/// spread over the container footprint, so every layer has the same height.
/// Liquids with equal density keep their selection order. The result is
/// ordered bottom to top and always rebuilt from scratch.
pub fn compute_layers(selection: &[Liquid], container: &ContainerConfig) -> Vec<Layer> {
    if selection.is_empty() {
        return Vec::new();
    }

    let mut sorted = selection.to_vec();
    // sort_by is stable
    sorted.sort_by(|a, b| b.density.total_cmp(&a.density));

    let volume = container.fill_volume() / sorted.len() as f32;
    let vertical_extent = volume / container.footprint();

    let mut stack_top = container.stack_base();
    sorted
        .into_iter()
        .map(|liquid| {
            let vertical_center = stack_top + vertical_extent / 2.0;
            stack_top += vertical_extent;
            Layer {
                liquid,
                volume,
                vertical_extent,
                vertical_center,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::catalogue;

    fn liquids(names: &[&str]) -> Vec<Liquid> {
        names
            .iter()
            .map(|name| *catalogue::find(name).expect("catalogue liquid"))
            .collect()
    }

    #[test]
    fn empty_selection_has_no_layers() {
        assert!(compute_layers(&[], &ContainerConfig::default()).is_empty());
    }

    #[test]
    fn oil_floats_on_water() {
        let layers = compute_layers(&liquids(&["Oil (Vegetable)", "Water"]), &ContainerConfig::default());
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].liquid.name, "Water");
        assert_eq!(layers[1].liquid.name, "Oil (Vegetable)");
        assert!(layers[1].vertical_center > layers[0].vertical_center);
    }

    #[test]
    fn reference_geometry_for_two_liquids() {
        let layers = compute_layers(&liquids(&["Water", "Honey"]), &ContainerConfig::default());
        // 0.7 * 192 / 2 = 67.2 per liquid, over a 24 footprint = 2.8 high
        for layer in &layers {
            assert!((layer.volume - 67.2).abs() < 1e-3);
            assert!((layer.vertical_extent - 2.8).abs() < 1e-4);
        }
        assert!((layers[0].vertical_center - -2.4).abs() < 1e-4);
        assert!((layers[1].vertical_center - 0.4).abs() < 1e-4);
    }

    #[test]
    fn layers_touch_without_overlap() {
        let layers = compute_layers(
            &liquids(&["Gasoline", "Mercury", "Water", "Glycerin"]),
            &ContainerConfig::default(),
        );
        for pair in layers.windows(2) {
            assert!((pair[0].top() - pair[1].bottom()).abs() < 1e-4);
        }
    }

    #[test]
    fn equal_densities_keep_selection_order() {
        let first = Liquid {
            name: "First",
            density: 1000.0,
            color: [0, 0, 0],
            viscosity: 1.0,
            description: "",
        };
        let second = Liquid { name: "Second", ..first };
        let heavy = Liquid { name: "Heavy", density: 2000.0, ..first };

        let layers = compute_layers(&[first, second, heavy], &ContainerConfig::default());
        let names: Vec<_> = layers.iter().map(|l| l.liquid.name).collect();
        assert_eq!(names, ["Heavy", "First", "Second"]);

        let layers = compute_layers(&[second, first], &ContainerConfig::default());
        assert_eq!(layers[0].liquid.name, "Second");
    }

    #[test]
    fn follows_custom_container() {
        let container = ContainerConfig::new(2.0, 10.0, 2.0)
            .and_then(|c| c.with_fill_fraction(0.5))
            .and_then(|c| c.with_floor_margin(0.0))
            .expect("valid container");
        let layers = compute_layers(&liquids(&["Water"]), &container);
        assert_eq!(layers.len(), 1);
        assert!((layers[0].vertical_extent - 5.0).abs() < 1e-5);
        assert!((layers[0].bottom() - -5.0).abs() < 1e-5);
    }
}
