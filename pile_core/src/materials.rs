//! # Pile Materials
//!
//! Materials referenced by name from pile-geometry components. The geometry
//! model treats component material names as opaque labels; this module holds
//! the material records that travel alongside the geometry in the payload.
//!
//! ## Standard Materials
//!
//! | Name           | E (MPa) | Yield (MPa) | Color   |
//! |----------------|---------|-------------|---------|
//! | concrete       | 20000   | -           | #525252 |
//! | steel          | 195000  | -           | #E2E2E2 |
//! | wood           | 3600    | -           | #BD7205 |
//! | grout          | 15000   | 1.5         | #8A8A8A |
//! | grout_extorted | 20000   | 2.0         | #8A8A8A |
//!
//! ## Example
//!
//! ```rust
//! use pile_core::materials::PileMaterial;
//!
//! let steel = PileMaterial::standard("steel").unwrap();
//! assert_eq!(steel.elastic_modulus, 195000.0);
//! assert_eq!(steel.color.unwrap().hex(), "#e2e2e2");
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// RGB color used when drawing a material.
///
/// Serializes as `{ "r": .., "g": .., "b": .. }`; deserializes from that
/// record or from a hex string such as `"#525252"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ColorRepr")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Parse a `#rrggbb` (or `rrggbb`) hex string.
    pub fn from_hex(hex: &str) -> CalcResult<Self> {
        let digits = hex.trim_start_matches('#');
        let invalid = || CalcError::invalid_input("color", hex, "Expected a hex color such as '#525252'");

        if digits.len() != 6 || !digits.is_ascii() {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).map_err(|_| invalid());

        Ok(Color {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Lowercase `#rrggbb` representation
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Hex(String),
    Rgb { r: u8, g: u8, b: u8 },
}

impl TryFrom<ColorRepr> for Color {
    type Error = CalcError;

    fn try_from(repr: ColorRepr) -> CalcResult<Self> {
        match repr {
            ColorRepr::Hex(hex) => Color::from_hex(&hex),
            ColorRepr::Rgb { r, g, b } => Ok(Color { r, g, b }),
        }
    }
}

/// A material that pile-geometry components can refer to by name.
///
/// ## JSON Example
///
/// ```json
/// {
///   "name": "grout",
///   "elastic_modulus": 15000.0,
///   "yield_stress": 1.5,
///   "color": { "r": 138, "g": 138, "b": 138 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PileMaterial {
    /// Material name, matched against component `material` fields
    pub name: String,

    /// Elastic modulus E (MPa)
    pub elastic_modulus: f64,

    /// Yield stress (MPa)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yield_stress: Option<f64>,

    /// Drawing color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl PileMaterial {
    /// Create a material without yield stress or color.
    pub fn new(name: impl Into<String>, elastic_modulus: f64) -> Self {
        PileMaterial {
            name: name.into(),
            elastic_modulus,
            yield_stress: None,
            color: None,
        }
    }

    pub fn with_yield_stress(mut self, yield_stress: f64) -> Self {
        self.yield_stress = Some(yield_stress);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Validate material values.
    pub fn validate(&self) -> CalcResult<()> {
        if self.name.trim().is_empty() {
            return Err(CalcError::missing_field("material.name"));
        }
        if !self.elastic_modulus.is_finite() || self.elastic_modulus <= 0.0 {
            return Err(CalcError::invalid_input(
                "elastic_modulus",
                self.elastic_modulus.to_string(),
                "Elastic modulus must be positive",
            ));
        }
        if let Some(fy) = self.yield_stress {
            if !fy.is_finite() || fy <= 0.0 {
                return Err(CalcError::invalid_input(
                    "yield_stress",
                    fy.to_string(),
                    "Yield stress must be positive",
                ));
            }
        }
        Ok(())
    }

    /// All standard materials, in table order.
    pub fn standard_materials() -> &'static [PileMaterial] {
        &STANDARD_MATERIALS
    }

    /// Look up a standard material by name.
    pub fn standard(name: &str) -> CalcResult<PileMaterial> {
        STANDARD_MATERIALS
            .iter()
            .find(|m| m.name == name)
            .cloned()
            .ok_or_else(|| CalcError::material_not_found(name))
    }
}

static STANDARD_MATERIALS: Lazy<Vec<PileMaterial>> = Lazy::new(|| {
    let grey = Color::new(0x8A, 0x8A, 0x8A);
    vec![
        PileMaterial::new("concrete", 20000.0).with_color(Color::new(0x52, 0x52, 0x52)),
        PileMaterial::new("steel", 195000.0).with_color(Color::new(0xE2, 0xE2, 0xE2)),
        PileMaterial::new("wood", 3600.0).with_color(Color::new(0xBD, 0x72, 0x05)),
        PileMaterial::new("grout", 15000.0).with_yield_stress(1.5).with_color(grey),
        PileMaterial::new("grout_extorted", 20000.0).with_yield_stress(2.0).with_color(grey),
    ]
});
