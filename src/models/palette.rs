//! Swatch tables, defaults and curated presets for each illustration variant.
//!
//! The catalogs are embedded JSON files under `src/data/`, parsed and checked
//! for completeness when loaded.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::{AppliedColors, HouseVariant, RgbColor, Section};

/// A single named color choice for a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorOption {
    /// Display name (e.g., "Desert Sand").
    pub name: String,
    /// Swatch color.
    pub color: RgbColor,
}

/// The swatches offered for one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionSwatches {
    /// Section the swatches apply to.
    pub section: Section,
    /// Button label of the section.
    pub label: &'static str,
    /// Available swatches, in display order.
    pub options: Vec<ColorOption>,
}

/// A curated, complete color assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PalettePreset {
    /// Preset name (e.g., "Classic Santa Fe").
    pub name: String,
    /// Color for every section of the variant.
    pub colors: AppliedColors,
}

/// Everything the visualizer needs to know about one illustration variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantCatalog {
    /// Variant this catalog describes.
    pub variant: HouseVariant,
    /// Swatches per section; the section order is the variant's section set.
    pub sections: Vec<SectionSwatches>,
    /// Assignment used on first render and on reset.
    pub defaults: AppliedColors,
    /// Curated presets.
    pub presets: Vec<PalettePreset>,
}

#[derive(Debug, Deserialize)]
struct RawCatalog {
    variant: HouseVariant,
    sections: Vec<RawSection>,
    defaults: BTreeMap<Section, RgbColor>,
    presets: Vec<RawPreset>,
}

#[derive(Debug, Deserialize)]
struct RawSection {
    section: Section,
    options: Vec<ColorOption>,
}

#[derive(Debug, Deserialize)]
struct RawPreset {
    name: String,
    colors: BTreeMap<Section, RgbColor>,
}

impl VariantCatalog {
    /// Loads the embedded catalog of a variant.
    ///
    /// # Errors
    /// Returns an error if the JSON data cannot be parsed or an assignment
    /// does not cover exactly the variant's sections.
    pub fn load(variant: HouseVariant) -> Result<Self> {
        let json_data = match variant {
            HouseVariant::Southwest => include_str!("../data/southwest.json"),
            HouseVariant::Cottage => include_str!("../data/cottage.json"),
        };
        let catalog = Self::from_json(json_data)
            .with_context(|| format!("Invalid embedded catalog for variant '{variant}'"))?;

        if catalog.variant != variant {
            anyhow::bail!(
                "Embedded catalog for '{variant}' describes variant '{}'",
                catalog.variant
            );
        }
        Ok(catalog)
    }

    /// Loads the catalogs of every variant.
    pub fn load_all() -> Result<Vec<Self>> {
        HouseVariant::ALL.into_iter().map(Self::load).collect()
    }

    /// Parses and validates a catalog from JSON.
    pub fn from_json(json_data: &str) -> Result<Self> {
        let raw: RawCatalog = serde_json::from_str(json_data).context("Failed to parse catalog JSON")?;

        let section_ids: Vec<Section> = raw.sections.iter().map(|s| s.section).collect();
        for (index, section) in section_ids.iter().enumerate() {
            if section_ids[..index].contains(section) {
                anyhow::bail!("Section '{section}' is listed twice");
            }
        }

        let sections = raw
            .sections
            .into_iter()
            .map(|raw_section| {
                if raw_section.options.is_empty() {
                    anyhow::bail!("Section '{}' has no swatches", raw_section.section);
                }
                Ok(SectionSwatches {
                    section: raw_section.section,
                    label: raw_section.section.label(),
                    options: raw_section.options,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let defaults = AppliedColors::from_assignment(&section_ids, raw.defaults)
            .context("Default colors are incomplete")?;

        let presets = raw
            .presets
            .into_iter()
            .map(|preset| {
                let colors = AppliedColors::from_assignment(&section_ids, preset.colors)
                    .with_context(|| format!("Preset '{}' is incomplete", preset.name))?;
                Ok(PalettePreset {
                    name: preset.name,
                    colors,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            variant: raw.variant,
            sections,
            defaults,
            presets,
        })
    }

    /// The variant's section set, in display order.
    #[must_use]
    pub fn section_ids(&self) -> Vec<Section> {
        self.sections.iter().map(|s| s.section).collect()
    }

    /// True if the variant has this section.
    #[must_use]
    pub fn has_section(&self, section: Section) -> bool {
        self.sections.iter().any(|s| s.section == section)
    }

    /// Swatches of a section, empty if the variant lacks it.
    #[must_use]
    pub fn options(&self, section: Section) -> &[ColorOption] {
        self.sections
            .iter()
            .find(|s| s.section == section)
            .map(|s| s.options.as_slice())
            .unwrap_or(&[])
    }

    /// Finds a preset by name, ignoring case.
    #[must_use]
    pub fn preset(&self, name: &str) -> Option<&PalettePreset> {
        let name = name.trim();
        self.presets
            .iter()
            .find(|preset| preset.name.eq_ignore_ascii_case(name))
    }

    /// Returns a complete assignment with `overrides` layered on the defaults.
    ///
    /// Sections outside the variant are ignored; callers that need to reject
    /// them check `has_section` first.
    #[must_use]
    pub fn defaults_with(&self, overrides: &BTreeMap<Section, RgbColor>) -> AppliedColors {
        let mut colors = self.defaults.clone();
        for (section, color) in overrides {
            colors.set(*section, *color);
        }
        colors
    }
}
