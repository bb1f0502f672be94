//! # Pile-Geometry Components
//!
//! A component is a single cross-section shape (round or rectangular) that
//! occupies part of the pile axis, optionally wrapped around an inner
//! component (shell over core). Components are immutable once built: change
//! a dimension by building a new component.
//!
//! ## Example
//!
//! ```rust
//! use pile_core::geometry::{PileComponent, PrimaryDimension};
//!
//! // 0.35 x 0.30 m precast shaft over the full pile length
//! let shaft = PileComponent::rectangle(0.35, Some(0.30), PrimaryDimension::full_length())
//!     .unwrap()
//!     .with_material("concrete");
//!
//! assert!((shaft.circumference() - 1.3).abs() < 1e-9);
//! assert!((shaft.area_full() - 0.105).abs() < 1e-9);
//! ```
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "outer_shape": "round",
//!   "primary_dimension": { "length": 12.0 },
//!   "diameter": 0.5,
//!   "material": "steel",
//!   "inner_component": {
//!     "outer_shape": "round",
//!     "primary_dimension": {},
//!     "diameter": 0.45,
//!     "material": "concrete"
//!   }
//! }
//! ```

use std::f64::consts::PI;
use std::fmt;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::dimension::PrimaryDimension;
use super::equivalent::equivalent_diameter;
use super::profile::{area_vs_depth, circumference_vs_depth, validate_levels, zero_profile};
use crate::errors::{require_positive, CalcError, CalcResult};

/// Cross-section shape of a component together with its dimensions [m].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OuterShape {
    /// Circular section
    Round { diameter: f64 },
    /// Rectangular section; the secondary dimension is the larger side. A
    /// missing tertiary dimension makes the section square.
    Rectangle {
        secondary_dimension: f64,
        tertiary_dimension: Option<f64>,
    },
}

impl OuterShape {
    /// Name used for the `outer_shape` field in payloads
    pub fn name(&self) -> &'static str {
        match self {
            OuterShape::Round { .. } => "round",
            OuterShape::Rectangle { .. } => "rectangle",
        }
    }

    /// Outer circumference [m]
    pub fn circumference(&self) -> f64 {
        match *self {
            OuterShape::Round { diameter } => PI * diameter,
            OuterShape::Rectangle {
                secondary_dimension,
                tertiary_dimension,
            } => 2.0 * (secondary_dimension + rectangle_tertiary(secondary_dimension, tertiary_dimension)),
        }
    }

    /// Full outer area [m²], including whatever sits inside
    pub fn area_full(&self) -> f64 {
        match *self {
            OuterShape::Round { diameter } => PI * (diameter / 2.0).powi(2),
            OuterShape::Rectangle {
                secondary_dimension,
                tertiary_dimension,
            } => secondary_dimension * rectangle_tertiary(secondary_dimension, tertiary_dimension),
        }
    }

    /// Equivalent diameter [m] at tip level
    pub fn equivalent_tip_diameter(&self) -> f64 {
        match *self {
            OuterShape::Round { diameter } => diameter,
            OuterShape::Rectangle {
                secondary_dimension,
                tertiary_dimension,
            } => equivalent_diameter(
                rectangle_tertiary(secondary_dimension, tertiary_dimension),
                secondary_dimension,
            ),
        }
    }
}

/// Second side of a rectangle; a missing tertiary dimension means a square.
fn rectangle_tertiary(secondary_dimension: f64, tertiary_dimension: Option<f64>) -> f64 {
    tertiary_dimension.unwrap_or(secondary_dimension)
}

impl fmt::Display for OuterShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            OuterShape::Round { diameter } => write!(f, "round Ø{:.3} m", diameter),
            OuterShape::Rectangle {
                secondary_dimension,
                tertiary_dimension,
            } => write!(
                f,
                "rectangle {:.3} x {:.3} m",
                secondary_dimension,
                rectangle_tertiary(secondary_dimension, tertiary_dimension)
            ),
        }
    }
}

/// A single pile-geometry component.
///
/// Serializes to and from the component sub-document of the calculation
/// payload; deserialization runs the same validation as the constructors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ComponentPayload", into = "ComponentPayload")]
pub struct PileComponent {
    shape: OuterShape,
    primary_dimension: PrimaryDimension,
    material: Option<String>,
    inner_component: Option<Box<PileComponent>>,
}

impl PileComponent {
    /// Build a round component.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the diameter is not a positive number.
    pub fn round(diameter: f64, primary_dimension: PrimaryDimension) -> CalcResult<Self> {
        let diameter = require_positive("diameter", diameter)?;
        debug!("round component: diameter {} m, length {:?}", diameter, primary_dimension.length());
        Ok(Self::from_shape(OuterShape::Round { diameter }, primary_dimension))
    }

    /// Build a rectangular component. Without a tertiary dimension the
    /// section is square.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if a given dimension is not a positive number.
    pub fn rectangle(
        secondary_dimension: f64,
        tertiary_dimension: Option<f64>,
        primary_dimension: PrimaryDimension,
    ) -> CalcResult<Self> {
        let secondary_dimension = require_positive("secondary_dimension", secondary_dimension)?;
        let tertiary_dimension = tertiary_dimension
            .map(|t| require_positive("tertiary_dimension", t))
            .transpose()?;

        if let Some(t) = tertiary_dimension {
            if t > secondary_dimension {
                warn!(
                    "rectangle tertiary dimension {} m exceeds secondary dimension {} m",
                    t, secondary_dimension
                );
            }
        }
        debug!(
            "rectangle component: {} x {:?} m, length {:?}",
            secondary_dimension,
            tertiary_dimension,
            primary_dimension.length()
        );

        Ok(Self::from_shape(
            OuterShape::Rectangle {
                secondary_dimension,
                tertiary_dimension,
            },
            primary_dimension,
        ))
    }

    fn from_shape(shape: OuterShape, primary_dimension: PrimaryDimension) -> Self {
        Self {
            shape,
            primary_dimension,
            material: None,
            inner_component: None,
        }
    }

    /// Set the material name
    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = Some(material.into());
        self
    }

    /// Place `inner` inside this component
    pub fn with_inner_component(mut self, inner: PileComponent) -> Self {
        self.inner_component = Some(Box::new(inner));
        self
    }

    pub fn shape(&self) -> &OuterShape {
        &self.shape
    }

    pub fn outer_shape(&self) -> &'static str {
        self.shape.name()
    }

    pub fn primary_dimension(&self) -> &PrimaryDimension {
        &self.primary_dimension
    }

    pub fn material(&self) -> Option<&str> {
        self.material.as_deref()
    }

    pub fn inner_component(&self) -> Option<&PileComponent> {
        self.inner_component.as_deref()
    }

    /// Outer circumference [m]
    pub fn circumference(&self) -> f64 {
        self.shape.circumference()
    }

    /// Full outer area [m²], including any inner component
    pub fn area_full(&self) -> f64 {
        self.shape.area_full()
    }

    /// Equivalent outer diameter [m] at tip level
    pub fn equivalent_tip_diameter(&self) -> f64 {
        self.shape.equivalent_tip_diameter()
    }

    /// Component head and tip level [m NAP] as `(head_level, tip_level)`.
    pub fn bounds(&self, pile_tip_level_nap: f64, pile_head_level_nap: f64) -> (f64, f64) {
        self.primary_dimension.bounds_nap(pile_tip_level_nap, pile_head_level_nap)
    }

    /// Circumference [m] at each requested elevation.
    pub fn circumference_profile(
        &self,
        depth_nap: &[f64],
        pile_tip_level_nap: f64,
        pile_head_level_nap: f64,
    ) -> CalcResult<Vec<f64>> {
        validate_levels(pile_tip_level_nap, pile_head_level_nap)?;
        let (head, tip) = self.bounds(pile_tip_level_nap, pile_head_level_nap);
        self.warn_above_head(head, pile_head_level_nap);
        Ok(circumference_vs_depth(depth_nap, head, tip, self.circumference()))
    }

    /// Area [m²] of the inner component at each requested elevation.
    ///
    /// The inner component is evaluated against the same pile levels; its
    /// own primary dimension decides where it is active.
    pub fn inner_area_profile(
        &self,
        depth_nap: &[f64],
        pile_tip_level_nap: f64,
        pile_head_level_nap: f64,
    ) -> CalcResult<Vec<f64>> {
        match self.inner_component() {
            Some(inner) => inner.area_profile(depth_nap, pile_tip_level_nap, pile_head_level_nap),
            None => Ok(zero_profile(depth_nap)),
        }
    }

    /// Net cross-sectional area [m²] at each requested elevation.
    pub fn area_profile(
        &self,
        depth_nap: &[f64],
        pile_tip_level_nap: f64,
        pile_head_level_nap: f64,
    ) -> CalcResult<Vec<f64>> {
        validate_levels(pile_tip_level_nap, pile_head_level_nap)?;
        let (head, tip) = self.bounds(pile_tip_level_nap, pile_head_level_nap);
        self.warn_above_head(head, pile_head_level_nap);
        let inner_area = self.inner_area_profile(depth_nap, pile_tip_level_nap, pile_head_level_nap)?;
        Ok(area_vs_depth(depth_nap, self.area_full(), head, tip, &inner_area))
    }

    fn warn_above_head(&self, component_head: f64, pile_head_level_nap: f64) {
        if component_head > pile_head_level_nap {
            warn!(
                "{} reaches {} m NAP, above the pile head at {} m NAP",
                self.shape, component_head, pile_head_level_nap
            );
        }
    }
}

impl fmt::Display for PileComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.shape)?;
        match self.primary_dimension.length() {
            Some(length) => write!(f, ", length {:.2} m", length)?,
            None => write!(f, ", full length")?,
        }
        if let Some(material) = &self.material {
            write!(f, ", {}", material)?;
        }
        if let Some(inner) = &self.inner_component {
            write!(f, " [inner: {}]", inner)?;
        }
        Ok(())
    }
}

/// Wire form of a component. Shape-specific dimensions are optional here and
/// checked against `outer_shape` on conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ComponentPayload {
    outer_shape: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    primary_dimension: Option<PrimaryDimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    diameter: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    secondary_dimension: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tertiary_dimension: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    material: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inner_component: Option<Box<PileComponent>>,
}

impl TryFrom<ComponentPayload> for PileComponent {
    type Error = CalcError;

    fn try_from(payload: ComponentPayload) -> CalcResult<Self> {
        let primary_dimension = payload.primary_dimension.unwrap_or_default();

        let component = match payload.outer_shape.as_str() {
            "round" => {
                let diameter = payload.diameter.ok_or_else(|| CalcError::missing_field("diameter"))?;
                if payload.secondary_dimension.is_some() || payload.tertiary_dimension.is_some() {
                    warn!("ignoring rectangle dimensions on a round component");
                }
                PileComponent::round(diameter, primary_dimension)?
            }
            "rectangle" => {
                let secondary = payload
                    .secondary_dimension
                    .ok_or_else(|| CalcError::missing_field("secondary_dimension"))?;
                if payload.diameter.is_some() {
                    warn!("ignoring diameter on a rectangle component");
                }
                PileComponent::rectangle(secondary, payload.tertiary_dimension, primary_dimension)?
            }
            other => return Err(CalcError::unsupported_shape(other)),
        };

        Ok(PileComponent {
            material: payload.material,
            inner_component: payload.inner_component,
            ..component
        })
    }
}

impl From<PileComponent> for ComponentPayload {
    fn from(component: PileComponent) -> Self {
        let (diameter, secondary_dimension, tertiary_dimension) = match component.shape {
            OuterShape::Round { diameter } => (Some(diameter), None, None),
            OuterShape::Rectangle {
                secondary_dimension,
                tertiary_dimension,
            } => (None, Some(secondary_dimension), tertiary_dimension),
        };
        ComponentPayload {
            outer_shape: component.shape.name().to_string(),
            primary_dimension: Some(component.primary_dimension),
            diameter,
            secondary_dimension,
            tertiary_dimension,
            material: component.material,
            inner_component: component.inner_component,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    fn assert_profile_eq(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < TOL, "profile {:?} != {:?}", actual, expected);
        }
    }

    fn square_core() -> PileComponent {
        PileComponent::rectangle(0.35, Some(0.30), PrimaryDimension::full_length()).unwrap()
    }

    #[test]
    fn test_round_properties() {
        let c = PileComponent::round(0.4, PrimaryDimension::full_length()).unwrap();
        assert!((c.circumference() - PI * 0.4).abs() < TOL);
        assert!((c.area_full() - PI * 0.04).abs() < TOL);
        assert_eq!(c.equivalent_tip_diameter(), 0.4);
        assert_eq!(c.outer_shape(), "round");
    }

    #[test]
    fn test_rectangle_properties() {
        let c = square_core();
        assert!((c.circumference() - 1.3).abs() < TOL);
        assert!((c.area_full() - 0.105).abs() < TOL);
        // 0.35 < 1.5 * 0.30, formula applies
        let expected = 1.13 * 0.30 * (0.35f64 / 0.30).sqrt();
        assert!((c.equivalent_tip_diameter() - expected).abs() < TOL);
    }

    #[test]
    fn test_rectangle_defaults_to_square() {
        let c = PileComponent::rectangle(0.4, None, PrimaryDimension::full_length()).unwrap();
        assert!((c.circumference() - 1.6).abs() < TOL);
        assert!((c.area_full() - 0.16).abs() < TOL);
        assert!((c.equivalent_tip_diameter() - 1.13 * 0.4).abs() < TOL);
        assert_eq!(c.to_string(), "rectangle 0.400 x 0.400 m, full length");
    }

    #[test]
    fn test_non_positive_dimensions_rejected() {
        let full = PrimaryDimension::full_length();
        assert!(PileComponent::round(0.0, full).is_err());
        assert!(PileComponent::round(-0.4, full).is_err());
        assert!(PileComponent::rectangle(0.3, Some(0.0), full).is_err());
        let err = PileComponent::rectangle(-0.3, None, full).unwrap_err();
        assert_eq!(
            err,
            CalcError::invalid_input("secondary_dimension", "-0.3", "Dimension must be a positive number")
        );
    }

    #[test]
    fn test_bounds_follow_primary_dimension() {
        let base = PileComponent::rectangle(0.45, Some(0.40), PrimaryDimension::with_length(1.0).unwrap()).unwrap();
        assert_eq!(base.bounds(-5.0, -1.0), (-4.0, -5.0));
        assert_eq!(square_core().bounds(-5.0, -1.0), (-1.0, -5.0));
    }

    #[test]
    fn test_circumference_profile_full_length() {
        let depths = [-4.0, -3.0, -2.0, -1.0, 0.0];
        let profile = square_core().circumference_profile(&depths, -4.0, 0.0).unwrap();
        assert_profile_eq(&profile, &[1.3; 5]);
    }

    #[test]
    fn test_circumference_profile_outside_is_zero() {
        let depths = [1.0, -4.5];
        let profile = square_core().circumference_profile(&depths, -4.0, 0.0).unwrap();
        assert_profile_eq(&profile, &[0.0, 0.0]);
    }

    #[test]
    fn test_zero_length_component_occupies_tip() {
        let plate = PileComponent::round(0.6, PrimaryDimension::with_length(0.0).unwrap()).unwrap();
        let depths = [-9.0, -10.0, -10.5];
        let area = plate.area_profile(&depths, -10.0, 0.0).unwrap();
        assert_profile_eq(&area, &[0.0, plate.area_full(), 0.0]);
    }

    #[test]
    fn test_nested_subtraction() {
        // steel tube over the full length, concrete plug in the lower 2 m
        let plug = PileComponent::round(0.4, PrimaryDimension::with_length(2.0).unwrap()).unwrap();
        let tube = PileComponent::round(0.5, PrimaryDimension::full_length())
            .unwrap()
            .with_inner_component(plug.clone());

        let depths = [0.0, -5.0, -8.0, -9.0, -10.0];
        let area = tube.area_profile(&depths, -10.0, 0.0).unwrap();
        let outer = tube.area_full();
        let inner = plug.area_full();
        assert_profile_eq(&area, &[outer, outer, outer - inner, outer - inner, outer - inner]);

        let inner_profile = tube.inner_area_profile(&depths, -10.0, 0.0).unwrap();
        assert_profile_eq(&inner_profile, &[0.0, 0.0, inner, inner, inner]);
    }

    #[test]
    fn test_inner_interval_independent_of_outer() {
        // inner runs the full pile, outer only the lowest metre
        let inner = PileComponent::round(0.2, PrimaryDimension::full_length()).unwrap();
        let outer = PileComponent::round(0.5, PrimaryDimension::with_length(1.0).unwrap())
            .unwrap()
            .with_inner_component(inner.clone());

        let depths = [-2.0, -9.5];
        let inner_profile = outer.inner_area_profile(&depths, -10.0, 0.0).unwrap();
        assert_profile_eq(&inner_profile, &[inner.area_full(), inner.area_full()]);

        let area = outer.area_profile(&depths, -10.0, 0.0).unwrap();
        assert_profile_eq(&area, &[0.0, outer.area_full() - inner.area_full()]);
    }

    #[test]
    fn test_three_level_nesting() {
        let core = PileComponent::round(0.1, PrimaryDimension::full_length()).unwrap();
        let middle = PileComponent::round(0.3, PrimaryDimension::full_length())
            .unwrap()
            .with_inner_component(core.clone());
        let outer = PileComponent::round(0.5, PrimaryDimension::full_length())
            .unwrap()
            .with_inner_component(middle.clone());

        let area = outer.area_profile(&[-1.0], -2.0, 0.0).unwrap();
        let expected = outer.area_full() - (middle.area_full() - core.area_full());
        assert_profile_eq(&area, &[expected]);
    }

    #[test]
    fn test_profile_rejects_inverted_levels() {
        let err = square_core().area_profile(&[-1.0], 0.0, -4.0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_empty_depths() {
        let profile = square_core().area_profile(&[], -4.0, 0.0).unwrap();
        assert!(profile.is_empty());
    }

    #[test]
    fn test_serialization_round_trip() {
        let plain = square_core();
        let with_material = PileComponent::round(0.4, PrimaryDimension::with_length(3.0).unwrap())
            .unwrap()
            .with_material("concrete");
        let nested = PileComponent::round(0.5, PrimaryDimension::full_length())
            .unwrap()
            .with_material("steel")
            .with_inner_component(square_core().with_material("grout"));
        let square = PileComponent::rectangle(0.3, None, PrimaryDimension::full_length()).unwrap();

        for component in [plain, with_material, nested, square] {
            let json = serde_json::to_string(&component).unwrap();
            let roundtrip: PileComponent = serde_json::from_str(&json).unwrap();
            assert_eq!(component, roundtrip);
        }
    }

    #[test]
    fn test_serialization_omits_absent_fields() {
        let square = PileComponent::rectangle(0.3, None, PrimaryDimension::full_length()).unwrap();
        let value = serde_json::to_value(&square).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "outer_shape": "rectangle",
                "primary_dimension": {},
                "secondary_dimension": 0.3
            })
        );
    }

    #[test]
    fn test_deserialize_from_result_payload() {
        let json = r#"{
            "outer_shape": "round",
            "diameter": 0.5,
            "primary_dimension": { "length": null },
            "material": "steel",
            "inner_component": {
                "outer_shape": "rectangle",
                "secondary_dimension": 0.3,
                "tertiary_dimension": 0.2,
                "primary_dimension": { "length": 4.0 }
            }
        }"#;
        let component: PileComponent = serde_json::from_str(json).unwrap();
        assert_eq!(component.material(), Some("steel"));
        assert_eq!(component.primary_dimension().length(), None);
        let inner = component.inner_component().unwrap();
        assert_eq!(inner.outer_shape(), "rectangle");
        assert_eq!(inner.primary_dimension().length(), Some(4.0));
    }

    #[test]
    fn test_deserialize_missing_dimension() {
        let result: Result<PileComponent, _> =
            serde_json::from_str(r#"{"outer_shape": "round", "primary_dimension": {}}"#);
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("diameter"), "unexpected message: {}", msg);
    }

    #[test]
    fn test_deserialize_unsupported_shape() {
        let result: Result<PileComponent, _> =
            serde_json::from_str(r#"{"outer_shape": "hexagon", "diameter": 0.4}"#);
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("hexagon"), "unexpected message: {}", msg);
    }

    #[test]
    fn test_deserialize_rejects_non_positive() {
        let result: Result<PileComponent, _> =
            serde_json::from_str(r#"{"outer_shape": "rectangle", "secondary_dimension": 0.0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        let c = square_core().with_material("concrete");
        assert_eq!(c.to_string(), "rectangle 0.350 x 0.300 m, full length, concrete");
        let r = PileComponent::round(0.4, PrimaryDimension::with_length(1.0).unwrap()).unwrap();
        assert_eq!(r.to_string(), "round Ø0.400 m, length 1.00 m");
    }
}
