//! HousePaint Library
//!
//! This library provides the core of the HousePaint site server: the house
//! color visualizer and its SVG illustrations, the static site content, lead
//! form validation and the outbound email relay. The `web` feature adds the
//! axum server that ties them together.

// Module declarations
pub mod branding;
pub mod config;
pub mod contact;
pub mod content;
pub mod models;
pub mod relay;
pub mod render;
pub mod visualizer;

#[cfg(feature = "web")]
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use models::{AppliedColors, HouseVariant, RgbColor, Section, VariantCatalog};
pub use visualizer::{ColorVisualizer, VisualizerAction, VisualizerError};
