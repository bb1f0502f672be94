//! Depth-profile helpers shared by all component shapes.
//!
//! Each helper maps a slice of query elevations [m NAP] to one value per
//! elevation. Elevations do not need to be sorted.

use log::debug;

use crate::errors::{CalcError, CalcResult};

/// Tolerance used when closing an elevation grid at the pile tip.
const GRID_TOLERANCE: f64 = 1e-9;

/// Upper limit on the number of points in an elevation grid.
pub const MAX_GRID_POINTS: usize = 1_000_000;

/// Check that the pile tip and head levels form a usable interval.
pub fn validate_levels(pile_tip_level_nap: f64, pile_head_level_nap: f64) -> CalcResult<()> {
    if !pile_tip_level_nap.is_finite() {
        return Err(CalcError::invalid_input(
            "pile_tip_level_nap",
            pile_tip_level_nap.to_string(),
            "Pile tip level must be a finite number",
        ));
    }
    if !pile_head_level_nap.is_finite() {
        return Err(CalcError::invalid_input(
            "pile_head_level_nap",
            pile_head_level_nap.to_string(),
            "Pile head level must be a finite number",
        ));
    }
    if pile_tip_level_nap > pile_head_level_nap {
        return Err(CalcError::invalid_input(
            "pile_tip_level_nap",
            pile_tip_level_nap.to_string(),
            format!("Pile tip level lies above the pile head level ({})", pile_head_level_nap),
        ));
    }
    Ok(())
}

/// True when `depth` lies within `[tip, head]`, both ends inclusive.
pub fn within_bounds(depth: f64, component_head_level_nap: f64, component_tip_level_nap: f64) -> bool {
    depth <= component_head_level_nap && depth >= component_tip_level_nap
}

/// A profile of zeros, one entry per elevation.
pub fn zero_profile(depth_nap: &[f64]) -> Vec<f64> {
    vec![0.0; depth_nap.len()]
}

/// Circumference at each elevation: `circumference` inside the component
/// interval, zero elsewhere.
pub fn circumference_vs_depth(
    depth_nap: &[f64],
    component_head_level_nap: f64,
    component_tip_level_nap: f64,
    circumference: f64,
) -> Vec<f64> {
    depth_nap
        .iter()
        .map(|&depth| {
            if within_bounds(depth, component_head_level_nap, component_tip_level_nap) {
                circumference
            } else {
                0.0
            }
        })
        .collect()
}

/// Net area at each elevation: `area_full` minus the inner area inside the
/// component interval, zero elsewhere.
///
/// `inner_area` must hold one value per elevation.
pub fn area_vs_depth(
    depth_nap: &[f64],
    area_full: f64,
    component_head_level_nap: f64,
    component_tip_level_nap: f64,
    inner_area: &[f64],
) -> Vec<f64> {
    debug_assert_eq!(depth_nap.len(), inner_area.len());
    depth_nap
        .iter()
        .zip(inner_area)
        .map(|(&depth, &inner)| {
            if within_bounds(depth, component_head_level_nap, component_tip_level_nap) {
                area_full - inner
            } else {
                0.0
            }
        })
        .collect()
}

/// Raise `envelope` to the pointwise maximum of itself and `profile`.
pub fn max_envelope(envelope: &mut [f64], profile: &[f64]) {
    for (current, &value) in envelope.iter_mut().zip(profile) {
        if value > *current {
            *current = value;
        }
    }
}

/// Elevations from the pile head down to the pile tip with spacing `step`.
///
/// The pile tip is always the last entry, even when `head - tip` is not a
/// multiple of `step`.
///
/// ```rust
/// use pile_core::geometry::elevation_grid;
///
/// let grid = elevation_grid(-2.0, 0.0, 0.5).unwrap();
/// assert_eq!(grid, vec![0.0, -0.5, -1.0, -1.5, -2.0]);
/// ```
pub fn elevation_grid(pile_tip_level_nap: f64, pile_head_level_nap: f64, step: f64) -> CalcResult<Vec<f64>> {
    validate_levels(pile_tip_level_nap, pile_head_level_nap)?;
    if !step.is_finite() || step <= 0.0 {
        return Err(CalcError::invalid_input(
            "step",
            step.to_string(),
            "Grid step must be a positive number",
        ));
    }

    let span = pile_head_level_nap - pile_tip_level_nap;
    let intervals = (span / step + GRID_TOLERANCE).floor();
    if !intervals.is_finite() || intervals >= MAX_GRID_POINTS as f64 {
        return Err(CalcError::invalid_input(
            "step",
            step.to_string(),
            format!(
                "Grid step is too small for a {} m span (more than {} points)",
                span, MAX_GRID_POINTS
            ),
        ));
    }
    let count = intervals as usize;
    debug!("elevation grid with {} intervals of {} m", count, step);

    let mut grid: Vec<f64> = (0..=count)
        .map(|i| pile_head_level_nap - i as f64 * step)
        .collect();

    // snap the last point onto the tip, or append the tip
    if grid
        .last()
        .is_some_and(|last| (last - pile_tip_level_nap).abs() <= GRID_TOLERANCE)
    {
        grid.pop();
    }
    grid.push(pile_tip_level_nap);
    Ok(grid)
}
