//! # Basic Pile Builder
//!
//! Builds the geometry of a "basic" pile: a core component that runs the full
//! pile length, optionally with a widened base of height `height_base` at the
//! tip. Both components share the shape and the material.
//!
//! ## Example
//!
//! ```rust
//! use pile_core::basic_pile::{BasicPileInput, PileShape};
//!
//! let input = BasicPileInput {
//!     core_secondary_dimension: Some(0.25),
//!     base_secondary_dimension: Some(0.40),
//!     height_base: Some(0.8),
//!     pile_material: Some("concrete".to_string()),
//!     ..BasicPileInput::new(PileShape::Rectangle)
//! };
//!
//! let geometry = input.build().unwrap();
//! assert_eq!(geometry.components().len(), 2);
//! assert!((geometry.area_at_tip() - 0.16).abs() < 1e-9);
//! ```
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "pile_shape": "round",
//!   "core_diameter": 0.4,
//!   "base_diameter": 0.6,
//!   "height_base": 1.0,
//!   "pile_material": "concrete",
//!   "beta_p": 1.0
//! }
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::geometry::{PileComponent, PileGeometry, PrimaryDimension};
use crate::materials::PileMaterial;

/// Cross-section shape of a basic pile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PileShape {
    #[serde(rename = "round")]
    Round,
    #[serde(rename = "rectangle", alias = "rect")]
    Rectangle,
}

impl PileShape {
    pub fn display_name(&self) -> &'static str {
        match self {
            PileShape::Round => "round",
            PileShape::Rectangle => "rectangle",
        }
    }
}

impl std::fmt::Display for PileShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Input parameters for a basic pile geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicPileInput {
    /// Shape of both core and base
    pub pile_shape: PileShape,

    /// Height of the base component (m). Required when base dimensions are given.
    #[serde(default)]
    pub height_base: Option<f64>,

    /// Largest core cross-section dimension (m); rectangular piles
    #[serde(default)]
    pub core_secondary_dimension: Option<f64>,

    /// Smallest core cross-section dimension (m); square when absent
    #[serde(default)]
    pub core_tertiary_dimension: Option<f64>,

    /// Largest base cross-section dimension (m); rectangular piles
    #[serde(default)]
    pub base_secondary_dimension: Option<f64>,

    /// Smallest base cross-section dimension (m)
    #[serde(default)]
    pub base_tertiary_dimension: Option<f64>,

    /// Core diameter (m); round piles
    #[serde(default)]
    pub core_diameter: Option<f64>,

    /// Base diameter (m); round piles
    #[serde(default)]
    pub base_diameter: Option<f64>,

    /// Material name for both components
    #[serde(default)]
    pub pile_material: Option<String>,

    /// Replaces the standard material table when given
    #[serde(default)]
    pub custom_material: Option<PileMaterial>,

    /// Pile tip shape factor s
    #[serde(default)]
    pub pile_tip_factor_s: Option<f64>,

    /// Pile tip resistance factor beta_p
    #[serde(default)]
    pub beta_p: Option<f64>,
}

impl BasicPileInput {
    /// Empty input for the given shape; fill in dimensions with struct update syntax.
    pub fn new(pile_shape: PileShape) -> Self {
        BasicPileInput {
            pile_shape,
            height_base: None,
            core_secondary_dimension: None,
            core_tertiary_dimension: None,
            base_secondary_dimension: None,
            base_tertiary_dimension: None,
            core_diameter: None,
            base_diameter: None,
            pile_material: None,
            custom_material: None,
            pile_tip_factor_s: None,
            beta_p: None,
        }
    }

    fn has_base(&self) -> bool {
        match self.pile_shape {
            PileShape::Round => self.base_diameter.is_some(),
            PileShape::Rectangle => self.base_secondary_dimension.is_some(),
        }
    }

    /// Validate input parameters.
    ///
    /// Dimension values themselves are checked when the components are built.
    pub fn validate(&self) -> CalcResult<()> {
        match self.pile_shape {
            PileShape::Round if self.core_diameter.is_none() => {
                return Err(CalcError::missing_field("core_diameter"));
            }
            PileShape::Rectangle if self.core_secondary_dimension.is_none() => {
                return Err(CalcError::missing_field("core_secondary_dimension"));
            }
            _ => {}
        }
        if self.has_base() && self.height_base.is_none() {
            return Err(CalcError::missing_field("height_base"));
        }
        if let Some(material) = &self.custom_material {
            material.validate()?;
        }
        Ok(())
    }

    /// Build the pile geometry: core first, then the optional base.
    pub fn build(&self) -> CalcResult<PileGeometry> {
        self.validate()?;

        let full = PrimaryDimension::full_length();
        let base_extent = || PrimaryDimension::new(self.height_base);

        let mut components = Vec::with_capacity(2);
        match self.pile_shape {
            PileShape::Round => {
                let core_diameter = self.core_diameter.ok_or_else(|| CalcError::missing_field("core_diameter"))?;
                components.push(PileComponent::round(core_diameter, full)?);
                if let Some(base_diameter) = self.base_diameter {
                    components.push(PileComponent::round(base_diameter, base_extent()?)?);
                }
            }
            PileShape::Rectangle => {
                let core_secondary = self
                    .core_secondary_dimension
                    .ok_or_else(|| CalcError::missing_field("core_secondary_dimension"))?;
                components.push(PileComponent::rectangle(core_secondary, self.core_tertiary_dimension, full)?);
                if let Some(base_secondary) = self.base_secondary_dimension {
                    components.push(PileComponent::rectangle(
                        base_secondary,
                        self.base_tertiary_dimension,
                        base_extent()?,
                    )?);
                }
            }
        }

        if let Some(material) = &self.pile_material {
            components = components
                .into_iter()
                .map(|c| c.with_material(material.clone()))
                .collect();
        }

        let materials = match &self.custom_material {
            Some(custom) => vec![custom.clone()],
            None => PileMaterial::standard_materials().to_vec(),
        };

        debug!(
            "basic {} pile with {} component(s)",
            self.pile_shape,
            components.len()
        );

        let mut geometry = PileGeometry::new(components)?.with_materials(materials)?;
        if let Some(s) = self.pile_tip_factor_s {
            geometry = geometry.with_pile_tip_factor_s(s);
        }
        if let Some(beta_p) = self.beta_p {
            geometry = geometry.with_beta_p(beta_p);
        }
        Ok(geometry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_input() -> BasicPileInput {
        BasicPileInput {
            core_diameter: Some(0.4),
            pile_material: Some("concrete".to_string()),
            ..BasicPileInput::new(PileShape::Round)
        }
    }

    #[test]
    fn test_round_core_only() {
        let geometry = round_input().build().unwrap();
        assert_eq!(geometry.components().len(), 1);
        let core = &geometry.components()[0];
        assert_eq!(core.primary_dimension().length(), None);
        assert_eq!(core.material(), Some("concrete"));
        assert_eq!(geometry.materials().len(), 5);
    }

    #[test]
    fn test_round_with_base() {
        let input = BasicPileInput {
            base_diameter: Some(0.6),
            height_base: Some(1.2),
            ..round_input()
        };
        let geometry = input.build().unwrap();
        assert_eq!(geometry.components().len(), 2);
        assert_eq!(geometry.equivalent_tip_diameter(), 0.6);
        assert_eq!(geometry.components()[1].primary_dimension().length(), Some(1.2));
    }

    #[test]
    fn test_rectangle_with_base() {
        let input = BasicPileInput {
            core_secondary_dimension: Some(0.35),
            core_tertiary_dimension: Some(0.30),
            base_secondary_dimension: Some(0.45),
            base_tertiary_dimension: Some(0.40),
            height_base: Some(1.0),
            ..BasicPileInput::new(PileShape::Rectangle)
        };
        let geometry = input.build().unwrap();
        let area = geometry.area_profile(&[-2.0, -4.5], -5.0, -1.0).unwrap();
        assert!((area[0] - 0.105).abs() < 1e-9);
        assert!((area[1] - 0.18).abs() < 1e-9);
    }

    #[test]
    fn test_missing_core_dimension() {
        let err = BasicPileInput::new(PileShape::Round).build().unwrap_err();
        assert_eq!(err, CalcError::missing_field("core_diameter"));

        let err = BasicPileInput::new(PileShape::Rectangle).build().unwrap_err();
        assert_eq!(err, CalcError::missing_field("core_secondary_dimension"));
    }

    #[test]
    fn test_base_requires_height() {
        let input = BasicPileInput {
            base_diameter: Some(0.6),
            ..round_input()
        };
        assert_eq!(input.build().unwrap_err(), CalcError::missing_field("height_base"));
    }

    #[test]
    fn test_custom_material_replaces_table() {
        let input = BasicPileInput {
            pile_material: Some("mix".to_string()),
            custom_material: Some(PileMaterial::new("mix", 12000.0)),
            ..round_input()
        };
        let geometry = input.build().unwrap();
        assert_eq!(geometry.materials().len(), 1);
        let core = &geometry.components()[0];
        assert_eq!(geometry.material_for(core).unwrap().elastic_modulus, 12000.0);
    }

    #[test]
    fn test_factors_pass_through() {
        let input = BasicPileInput {
            beta_p: Some(0.7),
            pile_tip_factor_s: Some(0.9),
            ..round_input()
        };
        let geometry = input.build().unwrap();
        assert_eq!(geometry.beta_p(), Some(0.7));
        assert_eq!(geometry.pile_tip_factor_s(), Some(0.9));
    }

    #[test]
    fn test_deserialize_rect_alias() {
        let input: BasicPileInput = serde_json::from_str(
            r#"{"pile_shape": "rect", "core_secondary_dimension": 0.3}"#,
        )
        .unwrap();
        assert_eq!(input.pile_shape, PileShape::Rectangle);
        assert!(input.build().is_ok());
    }

    #[test]
    fn test_invalid_dimension_propagates() {
        let input = BasicPileInput {
            core_diameter: Some(-0.4),
            ..round_input()
        };
        assert_eq!(input.build().unwrap_err().error_code(), "INVALID_INPUT");
    }
}
