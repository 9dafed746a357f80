//! Light and dark shade variants derived from the applied colors.

use serde::Serialize;

use crate::models::{AppliedColors, RgbColor, Section};

/// Shades used for gradient fills and shadow edges.
///
/// Recomputed on every render; sections the variant lacks fall back to
/// white so the derived values stay total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShadeSet {
    /// Wall color −12%
    pub wall_dark: RgbColor,
    /// Wall color +8%
    pub wall_light: RgbColor,
    /// Wall dark shade −8%, for the angled side wall
    pub wall_side: RgbColor,
    /// Roof color −15%
    pub roof_dark: RgbColor,
    /// Roof color +5%
    pub roof_mid: RgbColor,
    /// Door color +5%
    pub door_light: RgbColor,
    /// Door color −10%
    pub door_dark: RgbColor,
    /// Garage color −15%
    pub garage_dark: RgbColor,
    /// Accent color −10%
    pub accent_dark: RgbColor,
}

impl ShadeSet {
    /// Derives every shade from the current colors.
    #[must_use]
    pub fn derive(colors: &AppliedColors) -> Self {
        let base = |section| colors.get(section).unwrap_or_default();
        let wall_dark = base(Section::Wall).adjust_brightness(-12);

        Self {
            wall_dark,
            wall_light: base(Section::Wall).adjust_brightness(8),
            wall_side: wall_dark.adjust_brightness(-8),
            roof_dark: base(Section::Roof).adjust_brightness(-15),
            roof_mid: base(Section::Roof).adjust_brightness(5),
            door_light: base(Section::Door).adjust_brightness(5),
            door_dark: base(Section::Door).adjust_brightness(-10),
            garage_dark: base(Section::Garage).adjust_brightness(-15),
            accent_dark: base(Section::Accent).adjust_brightness(-10),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HouseVariant, VariantCatalog};

    #[test]
    fn test_default_southwest_shades() {
        let catalog = VariantCatalog::load(HouseVariant::Southwest).unwrap();
        let shades = ShadeSet::derive(&catalog.defaults);

        assert_eq!(shades.wall_dark.to_hex(), "#c6beb1");
        assert_eq!(shades.wall_light.to_hex(), "#f9f1e4");
        // wall_dark −8% = −20 per channel
        assert_eq!(shades.wall_side.to_hex(), "#b2aa9d");
        assert_eq!(shades.roof_dark.to_hex(), "#24190f");
        assert_eq!(shades.garage_dark.to_hex(), "#a39374");
    }

    #[test]
    fn test_missing_sections_fall_back() {
        let catalog = VariantCatalog::load(HouseVariant::Cottage).unwrap();
        let shades = ShadeSet::derive(&catalog.defaults);
        assert_eq!(shades.garage_dark, RgbColor::WHITE.adjust_brightness(-15));
    }
}
