//! # Pile Geometry Model
//!
//! Cross-section geometry of a pile along its axis. A pile is built from
//! components ordered tip-most first; each component is a round or
//! rectangular section, optionally wrapped around an inner component.
//!
//! All elevations are in meters relative to NAP.
//!
//! - [`dimension`] - Along-axis extent of a component
//! - [`component`] - Round and rectangular components, with nesting
//! - [`profile`] - Per-elevation helpers shared by all shapes
//! - [`pile`] - Complete pile geometry and its pile-wide profiles
//! - [`equivalent`] - Equivalent tip diameter for rectangular sections

pub mod component;
pub mod dimension;
pub mod equivalent;
pub mod pile;
pub mod profile;

pub use component::{OuterShape, PileComponent};
pub use dimension::PrimaryDimension;
pub use equivalent::equivalent_diameter;
pub use pile::{CustomGeometryProperties, DepthProfile, PileGeometry};
pub use profile::elevation_grid;
