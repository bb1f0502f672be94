//! Primary (along-axis) dimension of a pile-geometry component.
//!
//! A component either runs up to the pile head (no length) or spans a fixed
//! length measured upward from the pile tip.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Extent of a component along the primary (vertical) axis of the pile.
///
/// ## JSON Example
///
/// ```json
/// { "length": 1.0 }
/// ```
///
/// An empty record `{}` means the component reaches the pile head.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "PrimaryDimensionPayload", into = "PrimaryDimensionPayload")]
pub struct PrimaryDimension {
    length: Option<f64>,
}

impl PrimaryDimension {
    /// A component that spans from the pile tip up to the pile head.
    pub fn full_length() -> Self {
        Self { length: None }
    }

    /// A component that spans `length` meters upward from the pile tip.
    ///
    /// Zero is allowed (a flat base plate); negative or non-finite lengths are not.
    pub fn with_length(length: f64) -> CalcResult<Self> {
        if !length.is_finite() || length < 0.0 {
            return Err(CalcError::invalid_input(
                "primary_dimension.length",
                length.to_string(),
                "Length must be a non-negative number",
            ));
        }
        Ok(Self { length: Some(length) })
    }

    /// Build from an optional length.
    pub fn new(length: Option<f64>) -> CalcResult<Self> {
        match length {
            Some(l) => Self::with_length(l),
            None => Ok(Self::full_length()),
        }
    }

    /// The length [m] along the primary axis, if set.
    pub fn length(&self) -> Option<f64> {
        self.length
    }

    /// Component head and tip level [m NAP] as `(head_level, tip_level)`.
    ///
    /// The component tip always coincides with the pile tip. The head is the
    /// pile tip plus the length, or the pile head when no length is set.
    pub fn bounds_nap(&self, pile_tip_level_nap: f64, pile_head_level_nap: f64) -> (f64, f64) {
        let tip = pile_tip_level_nap;
        let head = match self.length {
            Some(length) => pile_tip_level_nap + length,
            None => pile_head_level_nap,
        };
        (head, tip)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct PrimaryDimensionPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    length: Option<f64>,
}

impl TryFrom<PrimaryDimensionPayload> for PrimaryDimension {
    type Error = CalcError;

    fn try_from(payload: PrimaryDimensionPayload) -> CalcResult<Self> {
        PrimaryDimension::new(payload.length)
    }
}

impl From<PrimaryDimension> for PrimaryDimensionPayload {
    fn from(dim: PrimaryDimension) -> Self {
        PrimaryDimensionPayload { length: dim.length }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_length_reaches_pile_head() {
        let dim = PrimaryDimension::full_length();
        assert_eq!(dim.bounds_nap(-10.0, 0.0), (0.0, -10.0));
    }

    #[test]
    fn test_length_measured_from_tip() {
        let dim = PrimaryDimension::with_length(1.5).unwrap();
        assert_eq!(dim.bounds_nap(-10.0, 0.0), (-8.5, -10.0));
    }

    #[test]
    fn test_zero_length_is_legal() {
        let dim = PrimaryDimension::with_length(0.0).unwrap();
        assert_eq!(dim.bounds_nap(-7.0, -1.0), (-7.0, -7.0));
    }

    #[test]
    fn test_negative_length_rejected() {
        let err = PrimaryDimension::with_length(-1.0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(PrimaryDimension::with_length(f64::NAN).is_err());
    }

    #[test]
    fn test_serialization_omits_absent_length() {
        let json = serde_json::to_string(&PrimaryDimension::full_length()).unwrap();
        assert_eq!(json, "{}");

        let json = serde_json::to_string(&PrimaryDimension::with_length(2.0).unwrap()).unwrap();
        assert_eq!(json, r#"{"length":2.0}"#);
    }

    #[test]
    fn test_deserialization_validates() {
        let dim: PrimaryDimension = serde_json::from_str(r#"{"length": null}"#).unwrap();
        assert_eq!(dim.length(), None);

        let result: Result<PrimaryDimension, _> = serde_json::from_str(r#"{"length": -3.0}"#);
        assert!(result.is_err());
    }
}
