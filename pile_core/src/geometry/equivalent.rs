//! Equivalent pile-tip diameter for non-circular cross-sections.
//!
//! Per NEN 9997-1+C2:2017, 1.5.2.106a and 7.6.2.3(10)(e): for a rectangular
//! section with sides a <= b,
//!
//! - if b > 1.5a the equivalent diameter is a
//! - otherwise it is 1.13 · a · sqrt(b / a)

/// Ratio b/a above which the smaller side governs on its own.
pub const ELONGATION_LIMIT: f64 = 1.5;

/// Factor applied to the geometric mean of the sides for compact sections.
pub const EQUIVALENT_FACTOR: f64 = 1.13;

/// Equivalent diameter of a rectangle with sides `dim1` and `dim2`.
///
/// The order of the arguments does not matter. A non-positive smaller side
/// returns 0.0.
///
/// ```rust
/// use pile_core::geometry::equivalent_diameter;
///
/// assert_eq!(equivalent_diameter(2.0, 4.0), 2.0);
/// assert!((equivalent_diameter(2.0, 3.0) - 2.768).abs() < 1e-3);
/// assert_eq!(equivalent_diameter(0.0, 4.0), 0.0);
/// ```
pub fn equivalent_diameter(dim1: f64, dim2: f64) -> f64 {
    let a_min = dim1.min(dim2);
    let b_max = dim1.max(dim2);

    if a_min <= 0.0 {
        return 0.0;
    }
    if b_max > ELONGATION_LIMIT * a_min {
        return a_min;
    }
    EQUIVALENT_FACTOR * a_min * (b_max / a_min).sqrt()
}
