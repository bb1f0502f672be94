//! # Pile Geometry
//!
//! A pile geometry is an ordered list of components, tip-most first, plus the
//! materials they refer to and two optional factors that are passed through to
//! the remote calculation untouched.
//!
//! Components are different vertical sections of one shaft (for instance a
//! shaft and a widened base), so the pile-wide profile is the pointwise maximum
//! of the component profiles, not their sum.
//!
//! ## Example
//!
//! ```rust
//! use pile_core::geometry::{PileComponent, PileGeometry, PrimaryDimension};
//!
//! let core = PileComponent::rectangle(0.35, Some(0.30), PrimaryDimension::full_length()).unwrap();
//! let base = PileComponent::rectangle(0.45, Some(0.40), PrimaryDimension::with_length(1.0).unwrap()).unwrap();
//! let pile = PileGeometry::new(vec![core, base]).unwrap();
//!
//! let area = pile.area_profile(&[-0.5, -1.5, -4.5], -5.0, -1.0).unwrap();
//! assert_eq!(area[0], 0.0);
//! assert!((area[1] - 0.105).abs() < 1e-9);
//! assert!((area[2] - 0.18).abs() < 1e-9);
//! ```
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "components": [
//!     { "outer_shape": "round", "primary_dimension": {}, "diameter": 0.4, "material": "concrete" }
//!   ],
//!   "materials": [
//!     { "name": "concrete", "elastic_modulus": 20000.0 }
//!   ],
//!   "custom_properties": { "beta_p": 1.0 }
//! }
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use super::component::PileComponent;
use super::profile::{max_envelope, validate_levels, zero_profile};
use crate::errors::{CalcError, CalcResult};
use crate::materials::PileMaterial;

/// Factors carried alongside the geometry for the remote calculation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CustomGeometryProperties {
    /// Pile tip shape factor s
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pile_tip_factor_s: Option<f64>,

    /// Pile tip resistance factor beta_p
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beta_p: Option<f64>,
}

impl CustomGeometryProperties {
    pub fn is_empty(&self) -> bool {
        self.pile_tip_factor_s.is_none() && self.beta_p.is_none()
    }
}

/// Geometry of a complete pile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GeometryPayload", into = "GeometryPayload")]
pub struct PileGeometry {
    components: Vec<PileComponent>,
    materials: Vec<PileMaterial>,
    custom_properties: CustomGeometryProperties,
}

impl PileGeometry {
    /// Build a geometry from components ordered tip-most first.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if `components` is empty.
    pub fn new(components: Vec<PileComponent>) -> CalcResult<Self> {
        if components.is_empty() {
            return Err(CalcError::invalid_input(
                "components",
                "[]",
                "A pile geometry needs at least one component",
            ));
        }
        debug!("pile geometry with {} component(s)", components.len());
        Ok(PileGeometry {
            components,
            materials: Vec::new(),
            custom_properties: CustomGeometryProperties::default(),
        })
    }

    /// Attach material records.
    ///
    /// # Errors
    ///
    /// The first material that fails [`PileMaterial::validate`].
    pub fn with_materials(mut self, materials: Vec<PileMaterial>) -> CalcResult<Self> {
        for material in &materials {
            material.validate()?;
        }
        self.materials = materials;
        Ok(self)
    }

    /// Set the pile tip shape factor s
    pub fn with_pile_tip_factor_s(mut self, factor: f64) -> Self {
        self.custom_properties.pile_tip_factor_s = Some(factor);
        self
    }

    /// Set the pile tip resistance factor beta_p
    pub fn with_beta_p(mut self, beta_p: f64) -> Self {
        self.custom_properties.beta_p = Some(beta_p);
        self
    }

    /// Components, tip-most first
    pub fn components(&self) -> &[PileComponent] {
        &self.components
    }

    pub fn materials(&self) -> &[PileMaterial] {
        &self.materials
    }

    pub fn pile_tip_factor_s(&self) -> Option<f64> {
        self.custom_properties.pile_tip_factor_s
    }

    pub fn beta_p(&self) -> Option<f64> {
        self.custom_properties.beta_p
    }

    /// Material record for a component, if its name is listed in this geometry.
    pub fn material_for(&self, component: &PileComponent) -> Option<&PileMaterial> {
        let name = component.material()?;
        self.materials.iter().find(|m| m.name == name)
    }

    fn tip_component(&self) -> &PileComponent {
        // non-empty by construction
        &self.components[self.components.len() - 1]
    }

    /// Equivalent diameter [m] at the pile tip.
    ///
    /// Taken from the last component in the list, which is the widened base
    /// in the usual core + base layout.
    pub fn equivalent_tip_diameter(&self) -> f64 {
        self.tip_component().equivalent_tip_diameter()
    }

    /// Outer circumference [m] at the pile tip (last component).
    pub fn circumference_at_tip(&self) -> f64 {
        self.tip_component().circumference()
    }

    /// Full outer area [m²] at the pile tip (last component).
    pub fn area_at_tip(&self) -> f64 {
        self.tip_component().area_full()
    }

    /// Pile circumference [m] at each requested elevation: the largest
    /// component circumference active there.
    pub fn circumference_profile(
        &self,
        depth_nap: &[f64],
        pile_tip_level_nap: f64,
        pile_head_level_nap: f64,
    ) -> CalcResult<Vec<f64>> {
        validate_levels(pile_tip_level_nap, pile_head_level_nap)?;
        let mut envelope = zero_profile(depth_nap);
        for component in &self.components {
            let profile = component.circumference_profile(depth_nap, pile_tip_level_nap, pile_head_level_nap)?;
            max_envelope(&mut envelope, &profile);
        }
        Ok(envelope)
    }

    /// Pile cross-sectional area [m²] at each requested elevation: the largest
    /// net component area active there.
    pub fn area_profile(
        &self,
        depth_nap: &[f64],
        pile_tip_level_nap: f64,
        pile_head_level_nap: f64,
    ) -> CalcResult<Vec<f64>> {
        validate_levels(pile_tip_level_nap, pile_head_level_nap)?;
        let mut envelope = zero_profile(depth_nap);
        for component in &self.components {
            let profile = component.area_profile(depth_nap, pile_tip_level_nap, pile_head_level_nap)?;
            max_envelope(&mut envelope, &profile);
        }
        Ok(envelope)
    }

    /// Circumference and area side by side for a set of elevations.
    pub fn depth_profile(
        &self,
        depth_nap: &[f64],
        pile_tip_level_nap: f64,
        pile_head_level_nap: f64,
    ) -> CalcResult<DepthProfile> {
        debug!(
            "depth profile over {} elevations, tip {} m NAP, head {} m NAP",
            depth_nap.len(),
            pile_tip_level_nap,
            pile_head_level_nap
        );
        Ok(DepthProfile {
            depth_nap: depth_nap.to_vec(),
            circumference: self.circumference_profile(depth_nap, pile_tip_level_nap, pile_head_level_nap)?,
            area: self.area_profile(depth_nap, pile_tip_level_nap, pile_head_level_nap)?,
        })
    }
}

/// Pile-wide circumference and area evaluated on an elevation grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthProfile {
    /// Elevations [m NAP]
    pub depth_nap: Vec<f64>,
    /// Circumference [m] per elevation
    pub circumference: Vec<f64>,
    /// Area [m²] per elevation
    pub area: Vec<f64>,
}

impl DepthProfile {
    /// Rows of `(depth, circumference, area)`
    pub fn rows(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.depth_nap
            .iter()
            .zip(&self.circumference)
            .zip(&self.area)
            .map(|((&d, &c), &a)| (d, c, a))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeometryPayload {
    components: Vec<PileComponent>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    materials: Vec<PileMaterial>,
    #[serde(default, alias = "properties", skip_serializing_if = "Option::is_none")]
    custom_properties: Option<CustomGeometryProperties>,
}

impl TryFrom<GeometryPayload> for PileGeometry {
    type Error = CalcError;

    fn try_from(payload: GeometryPayload) -> CalcResult<Self> {
        let mut geometry = PileGeometry::new(payload.components)?.with_materials(payload.materials)?;
        geometry.custom_properties = payload.custom_properties.unwrap_or_default();
        Ok(geometry)
    }
}

impl From<PileGeometry> for GeometryPayload {
    fn from(geometry: PileGeometry) -> Self {
        let custom_properties = if geometry.custom_properties.is_empty() {
            None
        } else {
            Some(geometry.custom_properties)
        };
        GeometryPayload {
            components: geometry.components,
            materials: geometry.materials,
            custom_properties,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
