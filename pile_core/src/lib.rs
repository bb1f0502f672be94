//! # pile_core - Pile Cross-Section Geometry
//!
//! `pile_core` models the geometry of a foundation pile as a tip-to-head list
//! of cross-section components and derives, at any elevation, the pile's
//! circumference, cross-sectional area and equivalent tip diameter. These
//! values feed the request payload of a remote bearing-capacity service and
//! the plots of its results; the bearing-capacity calculation itself is not
//! part of this crate.
//!
//! ## Design Philosophy
//!
//! - **Immutable values**: Components and geometries never change after construction
//! - **JSON-First**: All types round-trip through the payload sub-document
//! - **Rich Errors**: Structured error types, checked at construction
//!
//! ## Quick Start
//!
//! ```rust
//! use pile_core::geometry::{elevation_grid, PileComponent, PileGeometry, PrimaryDimension};
//!
//! let shaft = PileComponent::round(0.4, PrimaryDimension::full_length()).unwrap();
//! let base = PileComponent::round(0.6, PrimaryDimension::with_length(1.0).unwrap()).unwrap();
//! let pile = PileGeometry::new(vec![shaft, base]).unwrap();
//!
//! let grid = elevation_grid(-12.0, -1.0, 0.5).unwrap();
//! let profile = pile.depth_profile(&grid, -12.0, -1.0).unwrap();
//! assert_eq!(profile.area.len(), grid.len());
//!
//! let json = serde_json::to_string_pretty(&pile).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`geometry`] - Components, pile geometry and depth profiles
//! - [`materials`] - Material records and the standard material table
//! - [`basic_pile`] - Core + widened base pile builder
//! - [`errors`] - Structured error types
//! - [`file_io`] - JSON document loading and atomic saves

pub mod basic_pile;
pub mod errors;
pub mod file_io;
pub mod geometry;
pub mod materials;

// Re-export commonly used types at crate root for convenience
pub use basic_pile::{BasicPileInput, PileShape};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_basic_pile_input, load_geometry, save_geometry};
pub use geometry::{equivalent_diameter, DepthProfile, PileComponent, PileGeometry, PrimaryDimension};
pub use materials::{Color, PileMaterial};
