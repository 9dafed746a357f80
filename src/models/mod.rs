//! Data models for the house color visualizer.
//!
//! This module contains the colors, sections, swatch catalogs and assignments
//! shared by the visualizer, the renderer and the web layer. Models are
//! independent of rendering and HTTP concerns.

pub mod applied;
pub mod palette;
pub mod rgb;
pub mod section;

// Re-export all model types
pub use applied::{AppliedColors, AssignmentError};
pub use palette::{ColorOption, PalettePreset, SectionSwatches, VariantCatalog};
pub use rgb::RgbColor;
pub use section::{HouseVariant, Section};
