//! Ingredient catalog
//!
//! Static table of every layer kind and how it looks and stacks.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// One layer kind. The set is closed; buns frame every order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Ingredient {
    BunBottom,
    Patty,
    Cheese,
    Lettuce,
    Tomato,
    Onion,
    BunTop,
}

/// Coarse mesh shape used by renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    Cylinder,
    Box,
    /// Half sphere (top bun)
    Dome,
    /// Crinkled leaf (lettuce)
    Irregular,
}

/// Display and geometry attributes of an ingredient
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IngredientDef {
    pub name: &'static str,
    /// 0xRRGGBB
    pub color: u32,
    /// Vertical thickness of the layer (always > 0)
    pub height: f32,
    pub radius: Option<f32>,
    pub shape: Shape,
}

impl IngredientDef {
    /// Color as linear-ish RGB in 0..1 per channel
    pub fn rgb(&self) -> Vec3 {
        let r = ((self.color >> 16) & 0xff) as f32;
        let g = ((self.color >> 8) & 0xff) as f32;
        let b = (self.color & 0xff) as f32;
        Vec3::new(r, g, b) / 255.0
    }

    /// CSS-style hex string, e.g. `#d97706`
    pub fn hex(&self) -> String {
        format!("#{:06x}", self.color)
    }
}

const BUN_BOTTOM: IngredientDef = IngredientDef {
    name: "Bun Bottom",
    color: 0xd97706,
    height: 0.4,
    radius: Some(1.1),
    shape: Shape::Cylinder,
};
const PATTY: IngredientDef = IngredientDef {
    name: "Beef Patty",
    color: 0x3e1c00,
    height: 0.3,
    radius: Some(1.0),
    shape: Shape::Cylinder,
};
const CHEESE: IngredientDef = IngredientDef {
    name: "Cheese",
    color: 0xfacc15,
    height: 0.05,
    radius: Some(1.1),
    shape: Shape::Box,
};
const LETTUCE: IngredientDef = IngredientDef {
    name: "Lettuce",
    color: 0x4ade80,
    height: 0.1,
    radius: Some(1.2),
    shape: Shape::Irregular,
};
const TOMATO: IngredientDef = IngredientDef {
    name: "Tomato",
    color: 0xef4444,
    height: 0.1,
    radius: Some(0.9),
    shape: Shape::Cylinder,
};
const ONION: IngredientDef = IngredientDef {
    name: "Onion",
    color: 0xe5e7eb,
    height: 0.05,
    radius: Some(0.8),
    shape: Shape::Cylinder,
};
const BUN_TOP: IngredientDef = IngredientDef {
    name: "Bun Top",
    color: 0xd97706,
    height: 0.6,
    radius: Some(1.1),
    shape: Shape::Dome,
};

/// Fillings an order may contain between the buns
pub const FILLINGS: [Ingredient; 5] = [
    Ingredient::Patty,
    Ingredient::Cheese,
    Ingredient::Lettuce,
    Ingredient::Tomato,
    Ingredient::Onion,
];

impl Ingredient {
    /// Every kind, in counter display order
    pub const ALL: [Ingredient; 7] = [
        Ingredient::BunBottom,
        Ingredient::Patty,
        Ingredient::Cheese,
        Ingredient::Lettuce,
        Ingredient::Tomato,
        Ingredient::Onion,
        Ingredient::BunTop,
    ];

    /// Catalog entry for this kind
    pub fn def(self) -> &'static IngredientDef {
        match self {
            Ingredient::BunBottom => &BUN_BOTTOM,
            Ingredient::Patty => &PATTY,
            Ingredient::Cheese => &CHEESE,
            Ingredient::Lettuce => &LETTUCE,
            Ingredient::Tomato => &TOMATO,
            Ingredient::Onion => &ONION,
            Ingredient::BunTop => &BUN_TOP,
        }
    }

    pub fn name(self) -> &'static str {
        self.def().name
    }

    pub fn is_filling(self) -> bool {
        !matches!(self, Ingredient::BunBottom | Ingredient::BunTop)
    }
}

impl std::fmt::Display for Ingredient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_positive_height() {
        for kind in Ingredient::ALL {
            assert!(kind.def().height > 0.0, "{kind:?} has no height");
        }
    }

    #[test]
    fn test_fillings_exclude_buns() {
        assert!(FILLINGS.iter().all(|f| f.is_filling()));
        assert!(!Ingredient::BunBottom.is_filling());
        assert!(!Ingredient::BunTop.is_filling());
        let filling_count = Ingredient::ALL.iter().filter(|k| k.is_filling()).count();
        assert_eq!(filling_count, FILLINGS.len());
    }

    #[test]
    fn test_color_conversion() {
        let def = Ingredient::BunBottom.def();
        assert_eq!(def.hex(), "#d97706");
        let rgb = def.rgb();
        assert!((rgb.x - 217.0 / 255.0).abs() < 1e-6);
        assert!((rgb.y - 119.0 / 255.0).abs() < 1e-6);
        assert!((rgb.z - 6.0 / 255.0).abs() < 1e-6);
        assert_eq!(Ingredient::Patty.def().hex(), "#3e1c00");
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Ingredient::BunBottom).unwrap();
        assert_eq!(json, "\"BUN_BOTTOM\"");
        let back: Ingredient = serde_json::from_str("\"LETTUCE\"").unwrap();
        assert_eq!(back, Ingredient::Lettuce);
    }

    #[test]
    fn test_top_bun_is_dome() {
        assert_eq!(Ingredient::BunTop.def().shape, Shape::Dome);
        assert_eq!(Ingredient::Cheese.def().shape, Shape::Box);
        assert_eq!(Ingredient::Lettuce.to_string(), "Lettuce");
    }
}
