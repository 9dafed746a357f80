//! House color visualizer state and operations.
//!
//! A [`ColorVisualizer`] borrows the immutable catalog of one illustration
//! variant and owns the mutable part: the active section, the applied colors
//! and the last custom color input. All operations are synchronous and only
//! touch that owned state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{
    AppliedColors, AssignmentError, ColorOption, HouseVariant, PalettePreset, RgbColor, Section,
    VariantCatalog,
};

/// Errors raised by visualizer operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VisualizerError {
    /// The section exists but not in this illustration variant.
    #[error("section '{section}' is not part of the {variant} illustration")]
    UnknownSection {
        /// Requested section.
        section: Section,
        /// Variant being edited.
        variant: HouseVariant,
    },
    /// No preset with this name exists for the variant.
    #[error("no preset named '{0}'")]
    UnknownPreset(String),
    /// A snapshot was made for a different variant.
    #[error("state belongs to the {found} illustration, expected {expected}")]
    VariantMismatch {
        /// Variant of the catalog in use.
        expected: HouseVariant,
        /// Variant named by the snapshot.
        found: HouseVariant,
    },
    /// An assignment does not match the variant's section set.
    #[error(transparent)]
    Assignment(#[from] AssignmentError),
}

/// Source of uniform indices for the randomize action.
pub trait SwatchPicker {
    /// Returns an index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

/// Picks swatches with the operating system's random number generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandom;

impl SwatchPicker for OsRandom {
    fn pick(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        let len = len as u64;
        // Largest multiple of len; draws above it are rejected to avoid modulo bias
        let zone = u64::MAX - (u64::MAX % len);
        loop {
            let value = random_u64();
            if value < zone {
                return (value % len) as usize;
            }
        }
    }
}

fn random_u64() -> u64 {
    let mut bytes = [0u8; 8];
    if getrandom::getrandom(&mut bytes).is_ok() {
        return u64::from_le_bytes(bytes);
    }

    // Fallback if the OS RNG is unavailable
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    (nanos as u64).rotate_left(29) ^ u64::from(std::process::id())
}

/// Serializable visualizer state, carried by the page rather than the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualizerSnapshot {
    /// Illustration variant.
    pub variant: HouseVariant,
    /// Section currently selected for editing.
    pub active_section: Section,
    /// Applied colors; sections left out fall back to the defaults.
    #[serde(default)]
    pub colors: BTreeMap<Section, RgbColor>,
    /// Last value of the custom color picker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_color: Option<RgbColor>,
}

/// A user action on the visualizer controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VisualizerAction {
    /// Section button clicked.
    SelectSection {
        /// Section to edit.
        section: Section,
    },
    /// Swatch clicked.
    ApplyColor {
        /// Swatch color.
        color: RgbColor,
    },
    /// Custom color picker changed.
    ApplyCustomColor {
        /// Picked color.
        color: RgbColor,
    },
    /// Curated palette clicked.
    ApplyPreset {
        /// Preset name.
        name: String,
    },
    /// Reset button clicked.
    Reset,
    /// Randomize button clicked.
    Randomize,
}

/// Interactive color state for one illustration variant.
#[derive(Debug, Clone)]
pub struct ColorVisualizer<'a> {
    catalog: &'a VariantCatalog,
    active_section: Section,
    applied: AppliedColors,
    custom_color: RgbColor,
}

impl<'a> ColorVisualizer<'a> {
    /// Creates a visualizer showing the variant's defaults with the first
    /// section selected.
    #[must_use]
    pub fn new(catalog: &'a VariantCatalog) -> Self {
        let active_section = catalog
            .sections
            .first()
            .map_or(Section::Wall, |swatches| swatches.section);
        let custom_color = catalog.defaults.get(active_section).unwrap_or_default();

        Self {
            catalog,
            active_section,
            applied: catalog.defaults.clone(),
            custom_color,
        }
    }

    /// Rebuilds a visualizer from a snapshot.
    ///
    /// Colors missing from the snapshot take the default value; sections the
    /// variant does not have are rejected.
    pub fn restore(
        catalog: &'a VariantCatalog,
        snapshot: &VisualizerSnapshot,
    ) -> Result<Self, VisualizerError> {
        if snapshot.variant != catalog.variant {
            return Err(VisualizerError::VariantMismatch {
                expected: catalog.variant,
                found: snapshot.variant,
            });
        }
        if let Some(section) = snapshot.colors.keys().find(|s| !catalog.has_section(**s)) {
            return Err(AssignmentError::ExtraSection(*section).into());
        }

        let mut visualizer = Self::new(catalog);
        visualizer.select_section(snapshot.active_section)?;
        visualizer.applied = catalog.defaults_with(&snapshot.colors);
        if let Some(custom) = snapshot.custom_color {
            visualizer.custom_color = custom;
        }
        Ok(visualizer)
    }

    /// Captures the current state.
    #[must_use]
    pub fn snapshot(&self) -> VisualizerSnapshot {
        VisualizerSnapshot {
            variant: self.catalog.variant,
            active_section: self.active_section,
            colors: self.applied.iter().collect(),
            custom_color: Some(self.custom_color),
        }
    }

    /// Catalog this visualizer edits.
    #[must_use]
    pub fn catalog(&self) -> &'a VariantCatalog {
        self.catalog
    }

    /// Illustration variant.
    #[must_use]
    pub fn variant(&self) -> HouseVariant {
        self.catalog.variant
    }

    /// Section currently selected for editing.
    #[must_use]
    pub fn active_section(&self) -> Section {
        self.active_section
    }

    /// Current color of every section.
    #[must_use]
    pub fn applied(&self) -> &AppliedColors {
        &self.applied
    }

    /// Last value of the custom color picker.
    #[must_use]
    pub fn custom_color(&self) -> RgbColor {
        self.custom_color
    }

    /// Selects the section that swatches and custom colors apply to.
    pub fn select_section(&mut self, section: Section) -> Result<(), VisualizerError> {
        if !self.catalog.has_section(section) {
            return Err(VisualizerError::UnknownSection {
                section,
                variant: self.catalog.variant,
            });
        }
        self.active_section = section;
        Ok(())
    }

    /// Paints the active section. Any color is accepted.
    pub fn apply_color(&mut self, color: RgbColor) {
        self.applied.set(self.active_section, color);
    }

    /// Records a custom picker value and paints the active section with it.
    pub fn apply_custom_color(&mut self, color: RgbColor) {
        self.custom_color = color;
        self.apply_color(color);
    }

    /// Replaces every section's color with the preset's. The active section
    /// is kept.
    pub fn apply_preset(&mut self, preset: &PalettePreset) -> Result<(), VisualizerError> {
        let colors = AppliedColors::from_assignment(
            &self.catalog.section_ids(),
            preset.colors.iter().collect(),
        )?;
        self.applied = colors;
        Ok(())
    }

    /// Applies a preset of this variant by name.
    pub fn apply_preset_named(&mut self, name: &str) -> Result<(), VisualizerError> {
        let catalog = self.catalog;
        let preset = catalog
            .preset(name)
            .ok_or_else(|| VisualizerError::UnknownPreset(name.trim().to_string()))?;
        self.apply_preset(preset)
    }

    /// Restores the variant's default colors.
    pub fn reset_colors(&mut self) {
        self.applied = self.catalog.defaults.clone();
    }

    /// Draws one swatch per section, independently for every section.
    pub fn randomize_colors(&mut self, picker: &mut impl SwatchPicker) {
        for swatches in &self.catalog.sections {
            if swatches.options.is_empty() {
                continue;
            }
            let index = picker.pick(swatches.options.len());
            if let Some(option) = swatches.options.get(index) {
                self.applied.set(swatches.section, option.color);
            }
        }
    }

    /// Runs a control action.
    pub fn apply(
        &mut self,
        action: &VisualizerAction,
        picker: &mut impl SwatchPicker,
    ) -> Result<(), VisualizerError> {
        match action {
            VisualizerAction::SelectSection { section } => self.select_section(*section)?,
            VisualizerAction::ApplyColor { color } => self.apply_color(*color),
            VisualizerAction::ApplyCustomColor { color } => self.apply_custom_color(*color),
            VisualizerAction::ApplyPreset { name } => self.apply_preset_named(name)?,
            VisualizerAction::Reset => self.reset_colors(),
            VisualizerAction::Randomize => self.randomize_colors(picker),
        }
        Ok(())
    }

    /// Swatches offered for the active section.
    #[must_use]
    pub fn active_options(&self) -> &'a [ColorOption] {
        self.catalog.options(self.active_section)
    }

    /// The active section's swatch matching its current color, if any.
    #[must_use]
    pub fn selected_swatch(&self) -> Option<&'a ColorOption> {
        let current = self.applied.get(self.active_section)?;
        self.active_options()
            .iter()
            .find(|option| option.color == current)
    }

    /// The preset equal to the current colors, if any.
    #[must_use]
    pub fn matching_preset(&self) -> Option<&'a PalettePreset> {
        self.catalog
            .presets
            .iter()
            .find(|preset| preset.colors == self.applied)
    }
}
