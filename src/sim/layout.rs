//! Vertical stacking of layers for renderers

use glam::Vec3;

use super::ingredient::Ingredient;

/// Where one layer sits in a stack (plate at y = 0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerPlacement {
    pub ingredient: Ingredient,
    /// Center of the layer's mesh
    pub center: Vec3,
    pub height: f32,
}

/// Place layers bottom to top, each resting on the one below
pub fn stack_layout(layers: &[Ingredient]) -> Vec<LayerPlacement> {
    let mut y = 0.0;
    layers
        .iter()
        .map(|&ingredient| {
            let height = ingredient.def().height;
            let center = Vec3::new(0.0, y + height / 2.0, 0.0);
            y += height;
            LayerPlacement {
                ingredient,
                center,
                height,
            }
        })
        .collect()
}

/// Total height of a stack
pub fn stack_height(layers: &[Ingredient]) -> f32 {
    layers.iter().map(|i| i.def().height).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use Ingredient::*;

    #[test]
    fn test_layers_rest_on_each_other() {
        let layout = stack_layout(&[BunBottom, Patty, Cheese, BunTop]);
        assert_eq!(layout.len(), 4);
        assert!((layout[0].center.y - 0.2).abs() < 1e-6);
        assert!((layout[1].center.y - 0.55).abs() < 1e-6);
        assert!((layout[2].center.y - 0.725).abs() < 1e-6);
        assert!((layout[3].center.y - 1.05).abs() < 1e-6);
        assert!(layout.windows(2).all(|w| w[0].center.y < w[1].center.y));
        assert!(layout.iter().all(|p| p.center.x == 0.0 && p.center.z == 0.0));
    }

    #[test]
    fn test_top_edge_is_stack_height() {
        let layers = [BunBottom, Lettuce, Tomato, Onion, Patty, BunTop];
        let layout = stack_layout(&layers);
        let top = layout.last().unwrap();
        assert!((top.center.y + top.height / 2.0 - stack_height(&layers)).abs() < 1e-5);
    }

    #[test]
    fn test_empty_stack() {
        assert!(stack_layout(&[]).is_empty());
        assert_eq!(stack_height(&[]), 0.0);
    }
}
