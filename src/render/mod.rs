//! SVG house illustrations.
//!
//! Each variant has a fixed-layout drawing whose paintable shapes are bound
//! to the applied colors and their derived shades. The active section is
//! marked with a dashed outline.

mod cottage;
pub mod shades;
mod southwest;
pub mod svg;

pub use shades::ShadeSet;

use crate::models::{AppliedColors, HouseVariant, Section};
use crate::visualizer::ColorVisualizer;

/// Renders a variant's illustration as a standalone SVG document.
///
/// `active` selects the outlined section; `None` draws no outline.
#[must_use]
pub fn render_house(
    variant: HouseVariant,
    colors: &AppliedColors,
    active: Option<Section>,
) -> String {
    match variant {
        HouseVariant::Southwest => southwest::render(colors, active),
        HouseVariant::Cottage => cottage::render(colors, active),
    }
}

/// Renders the current state of a visualizer.
#[must_use]
pub fn render_visualizer(visualizer: &ColorVisualizer<'_>) -> String {
    render_house(
        visualizer.variant(),
        visualizer.applied(),
        Some(visualizer.active_section()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RgbColor, VariantCatalog};

    #[test]
    fn test_applied_colors_appear_in_output() {
        for catalog in VariantCatalog::load_all().unwrap() {
            let visualizer = ColorVisualizer::new(&catalog);
            let svg = render_visualizer(&visualizer);
            for (section, color) in catalog.defaults.iter() {
                assert!(
                    svg.contains(&color.to_hex()),
                    "{} {section} color {color} missing",
                    catalog.variant
                );
            }
        }
    }

    #[test]
    fn test_only_active_overlay_is_drawn() {
        let catalog = VariantCatalog::load(HouseVariant::Southwest).unwrap();
        let mut visualizer = ColorVisualizer::new(&catalog);

        visualizer.select_section(Section::Door).unwrap();
        let svg = render_visualizer(&visualizer);
        assert_eq!(svg.matches("section-highlight").count(), 1);
        assert!(svg.contains(r#"<rect x="303" y="283" width="39" height="99""#));
        assert!(!svg.contains(r#"<rect x="278" y="228""#));

        visualizer.select_section(Section::Wall).unwrap();
        let svg = render_visualizer(&visualizer);
        assert_eq!(svg.matches("section-highlight").count(), 2);
        assert!(!svg.contains(r#"<rect x="303" y="283""#));
    }

    #[test]
    fn test_applied_color_changes_fill() {
        let catalog = VariantCatalog::load(HouseVariant::Southwest).unwrap();
        let mut visualizer = ColorVisualizer::new(&catalog);
        let sage = RgbColor::from_hex("#4a8b8b").unwrap();

        visualizer.select_section(Section::Accent).unwrap();
        visualizer.apply_color(sage);
        let svg = render_visualizer(&visualizer);
        assert!(svg.contains(r##"<rect x="280" y="350" width="380" height="30" fill="#4a8b8b"/>"##));
    }

    #[test]
    fn test_viewbox_per_variant() {
        let southwest = VariantCatalog::load(HouseVariant::Southwest).unwrap();
        let cottage = VariantCatalog::load(HouseVariant::Cottage).unwrap();
        let a = render_house(HouseVariant::Southwest, &southwest.defaults, Some(Section::Wall));
        let b = render_house(HouseVariant::Cottage, &cottage.defaults, None);
        assert!(a.contains(r#"viewBox="0 0 900 500""#));
        assert!(b.contains(r#"viewBox="0 0 800 500""#));
        assert!(!b.contains("section-highlight"));
    }
}
