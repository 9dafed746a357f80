//! Visualizer state carried in query strings.
//!
//! Pages and the SVG endpoint rebuild the visualizer from parameters such as
//! `active=roof&wall=e5ddd0&roof=%234a3f35`. Every control on the gallery
//! page is a link whose query already holds the state after that action, so
//! the server never stores anything between requests.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Write;

use thiserror::Error;

use crate::models::{RgbColor, Section, VariantCatalog};
use crate::visualizer::{ColorVisualizer, SwatchPicker, VisualizerError, VisualizerSnapshot};

/// Errors from interpreting visualizer query parameters.
#[derive(Debug, Error)]
pub enum QueryError {
    /// A section color could not be parsed.
    #[error("invalid color for {section}: '{value}'")]
    InvalidColor {
        /// Section key
        section: Section,
        /// Raw value
        value: String,
    },
    /// The `active` parameter names no section.
    #[error("unknown section '{0}'")]
    UnknownSection(String),
    /// The parameters do not fit the variant.
    #[error(transparent)]
    Visualizer(#[from] VisualizerError),
}

/// Rebuilds a visualizer from query parameters.
///
/// `preset` replaces the defaults before individual section colors are
/// applied. Unrelated parameters are ignored.
pub fn restore<'a>(
    catalog: &'a VariantCatalog,
    params: &HashMap<String, String>,
) -> Result<ColorVisualizer<'a>, QueryError> {
    let mut colors: BTreeMap<Section, RgbColor> = BTreeMap::new();
    if let Some(name) = params.get("preset").filter(|n| !n.trim().is_empty()) {
        let preset = catalog
            .preset(name)
            .ok_or_else(|| VisualizerError::UnknownPreset(name.clone()))?;
        colors.extend(preset.colors.iter());
    }

    for (key, value) in params {
        let Ok(section) = key.parse::<Section>() else {
            continue;
        };
        let color = RgbColor::from_hex(value).map_err(|_| QueryError::InvalidColor {
            section,
            value: value.clone(),
        })?;
        colors.insert(section, color);
    }

    let active_section = match params.get("active") {
        Some(raw) => raw
            .parse::<Section>()
            .map_err(|_| QueryError::UnknownSection(raw.clone()))?,
        None => ColorVisualizer::new(catalog).active_section(),
    };

    let custom_color = match params.get("custom_color") {
        Some(raw) => Some(RgbColor::from_hex(raw).map_err(|_| QueryError::InvalidColor {
            section: active_section,
            value: raw.clone(),
        })?),
        None => None,
    };

    let snapshot = VisualizerSnapshot {
        variant: catalog.variant,
        active_section,
        colors,
        custom_color,
    };
    Ok(ColorVisualizer::restore(catalog, &snapshot)?)
}

/// Applies the one-shot actions a page request may carry.
///
/// `randomize` redraws every section; `custom` applies a picked color to the
/// active section. Both exist because their result is not known when the
/// link or form is generated.
pub fn apply_page_actions(
    visualizer: &mut ColorVisualizer<'_>,
    params: &HashMap<String, String>,
    picker: &mut impl SwatchPicker,
) -> Result<(), QueryError> {
    if params.contains_key("randomize") {
        visualizer.randomize_colors(picker);
    }
    if let Some(raw) = params.get("custom") {
        let color = RgbColor::from_hex(raw).map_err(|_| QueryError::InvalidColor {
            section: visualizer.active_section(),
            value: raw.clone(),
        })?;
        visualizer.apply_custom_color(color);
    }
    Ok(())
}

/// Encodes a visualizer's state as a query string (without the leading `?`).
pub fn to_query(visualizer: &ColorVisualizer<'_>) -> String {
    let mut query = format!(
        "variant={}&active={}",
        visualizer.variant().id(),
        visualizer.active_section().id()
    );
    for (section, color) in visualizer.applied().iter() {
        let _ = write!(query, "&{}={}", section.id(), hex_digits(color));
    }
    let _ = write!(query, "&custom_color={}", hex_digits(visualizer.custom_color()));
    query
}

fn hex_digits(color: RgbColor) -> String {
    color.to_hex().trim_start_matches('#').to_string()
}

/// Percent-encodes a query value.
pub fn encode_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => {
                let _ = write!(out, "%{byte:02X}");
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HouseVariant;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    struct First;

    impl SwatchPicker for First {
        fn pick(&mut self, _len: usize) -> usize {
            0
        }
    }

    #[test]
    fn test_empty_query_is_default_state() {
        let catalog = VariantCatalog::load(HouseVariant::Southwest).unwrap();
        let visualizer = restore(&catalog, &HashMap::new()).unwrap();
        assert_eq!(visualizer.applied(), &catalog.defaults);
        assert_eq!(visualizer.active_section(), Section::Wall);
    }

    #[test]
    fn test_colors_with_and_without_hash() {
        let catalog = VariantCatalog::load(HouseVariant::Southwest).unwrap();
        let visualizer = restore(
            &catalog,
            &params(&[("active", "roof"), ("wall", "f5f5f0"), ("roof", "#3d3d3d")]),
        )
        .unwrap();
        assert_eq!(visualizer.active_section(), Section::Roof);
        assert_eq!(visualizer.applied().get(Section::Wall).unwrap().to_hex(), "#f5f5f0");
        assert_eq!(visualizer.applied().get(Section::Roof).unwrap().to_hex(), "#3d3d3d");
        assert_eq!(
            visualizer.applied().get(Section::Door),
            catalog.defaults.get(Section::Door)
        );
    }

    #[test]
    fn test_preset_then_overrides() {
        let catalog = VariantCatalog::load(HouseVariant::Southwest).unwrap();
        let visualizer = restore(
            &catalog,
            &params(&[("preset", "desert modern"), ("door", "8b3030")]),
        )
        .unwrap();
        assert_eq!(visualizer.applied().get(Section::Wall).unwrap().to_hex(), "#f5f5f0");
        assert_eq!(visualizer.applied().get(Section::Door).unwrap().to_hex(), "#8b3030");
    }

    #[test]
    fn test_bad_parameters() {
        let catalog = VariantCatalog::load(HouseVariant::Cottage).unwrap();
        assert!(matches!(
            restore(&catalog, &params(&[("wall", "zzz")])),
            Err(QueryError::InvalidColor { .. })
        ));
        assert!(matches!(
            restore(&catalog, &params(&[("active", "chimney")])),
            Err(QueryError::UnknownSection(_))
        ));
        assert!(matches!(
            restore(&catalog, &params(&[("garage", "ffffff")])),
            Err(QueryError::Visualizer(_))
        ));
        assert!(matches!(
            restore(&catalog, &params(&[("active", "accent")])),
            Err(QueryError::Visualizer(VisualizerError::UnknownSection { .. }))
        ));
        assert!(matches!(
            restore(&catalog, &params(&[("preset", "Nope")])),
            Err(QueryError::Visualizer(VisualizerError::UnknownPreset(_)))
        ));
    }

    #[test]
    fn test_query_roundtrip() {
        let catalog = VariantCatalog::load(HouseVariant::Southwest).unwrap();
        let mut visualizer = ColorVisualizer::new(&catalog);
        visualizer.select_section(Section::Trim).unwrap();
        visualizer.apply_color(RgbColor::from_hex("#d9cfc0").unwrap());

        let query = to_query(&visualizer);
        assert!(query.starts_with("variant=southwest&active=trim&"));
        assert!(query.contains("&trim=d9cfc0"));

        let parsed: HashMap<String, String> = query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let restored = restore(&catalog, &parsed).unwrap();
        assert_eq!(restored.applied(), visualizer.applied());
        assert_eq!(restored.active_section(), Section::Trim);
    }

    #[test]
    fn test_custom_color_survives_roundtrip_off_wall() {
        let catalog = VariantCatalog::load(HouseVariant::Southwest).unwrap();
        let mut visualizer = ColorVisualizer::new(&catalog);
        visualizer.select_section(Section::Door).unwrap();
        visualizer.apply_custom_color(RgbColor::from_hex("#123456").unwrap());

        let query = to_query(&visualizer);
        assert!(query.contains("&custom_color=123456"));

        let parsed: HashMap<String, String> = query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let restored = restore(&catalog, &parsed).unwrap();
        assert_eq!(restored.active_section(), Section::Door);
        assert_eq!(restored.custom_color(), visualizer.custom_color());
        assert_eq!(restored.applied(), visualizer.applied());
    }

    #[test]
    fn test_page_actions() {
        let catalog = VariantCatalog::load(HouseVariant::Southwest).unwrap();
        let mut visualizer = ColorVisualizer::new(&catalog);
        apply_page_actions(&mut visualizer, &params(&[("randomize", "1")]), &mut First).unwrap();
        for section in catalog.section_ids() {
            assert_eq!(
                visualizer.applied().get(section),
                Some(catalog.options(section)[0].color)
            );
        }

        apply_page_actions(&mut visualizer, &params(&[("custom", "#123456")]), &mut First).unwrap();
        assert_eq!(visualizer.applied().get(Section::Wall).unwrap().to_hex(), "#123456");
        assert_eq!(visualizer.custom_color().to_hex(), "#123456");

        assert!(apply_page_actions(&mut visualizer, &params(&[("custom", "blue")]), &mut First).is_err());
    }

    #[test]
    fn test_encode_component() {
        assert_eq!(encode_component("Desert Modern"), "Desert%20Modern");
        assert_eq!(encode_component("#e5ddd0"), "%23e5ddd0");
        assert_eq!(encode_component("a-b_c.d~"), "a-b_c.d~");
    }
}
