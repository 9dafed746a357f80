//! Complete section-to-color assignments.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use super::{RgbColor, Section};

/// Why a section-to-color map is not a complete assignment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignmentError {
    /// A section of the variant has no color.
    #[error("no color assigned to section '{0}'")]
    MissingSection(Section),
    /// A color is assigned to a section the variant does not have.
    #[error("section '{0}' is not part of this illustration")]
    ExtraSection(Section),
}

/// A color for every section of an illustration variant, and nothing else.
///
/// Instances are only created from complete assignments, so lookups for the
/// variant's own sections always succeed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AppliedColors {
    colors: BTreeMap<Section, RgbColor>,
}

impl AppliedColors {
    /// Builds an assignment that must cover exactly `sections`.
    pub fn from_assignment(
        sections: &[Section],
        colors: BTreeMap<Section, RgbColor>,
    ) -> Result<Self, AssignmentError> {
        if let Some(extra) = colors.keys().find(|section| !sections.contains(section)) {
            return Err(AssignmentError::ExtraSection(*extra));
        }
        if let Some(missing) = sections.iter().find(|section| !colors.contains_key(section)) {
            return Err(AssignmentError::MissingSection(*missing));
        }
        Ok(Self { colors })
    }

    /// Returns the color of a section, or `None` if the variant lacks it.
    #[must_use]
    pub fn get(&self, section: Section) -> Option<RgbColor> {
        self.colors.get(&section).copied()
    }

    /// Replaces the color of a section already in the assignment.
    ///
    /// Returns false and changes nothing when the section is not present.
    pub(crate) fn set(&mut self, section: Section, color: RgbColor) -> bool {
        match self.colors.get_mut(&section) {
            Some(slot) => {
                *slot = color;
                true
            }
            None => false,
        }
    }

    /// Sections covered by this assignment, in display order.
    pub fn sections(&self) -> impl Iterator<Item = Section> + '_ {
        self.colors.keys().copied()
    }

    /// Iterates over `(section, color)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Section, RgbColor)> + '_ {
        self.colors.iter().map(|(section, color)| (*section, *color))
    }

    /// Number of sections in the assignment.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// True when the assignment covers no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUSE: [Section; 3] = [Section::Wall, Section::Roof, Section::Door];

    fn full_map() -> BTreeMap<Section, RgbColor> {
        BTreeMap::from([
            (Section::Wall, RgbColor::new(1, 1, 1)),
            (Section::Roof, RgbColor::new(2, 2, 2)),
            (Section::Door, RgbColor::new(3, 3, 3)),
        ])
    }

    #[test]
    fn test_complete_assignment() {
        let applied = AppliedColors::from_assignment(&HOUSE, full_map()).unwrap();
        assert_eq!(applied.len(), 3);
        assert_eq!(applied.get(Section::Roof), Some(RgbColor::new(2, 2, 2)));
        assert_eq!(applied.get(Section::Garage), None);
    }

    #[test]
    fn test_missing_section_rejected() {
        let mut map = full_map();
        map.remove(&Section::Door);
        assert_eq!(
            AppliedColors::from_assignment(&HOUSE, map),
            Err(AssignmentError::MissingSection(Section::Door))
        );
    }

    #[test]
    fn test_extra_section_rejected() {
        let mut map = full_map();
        map.insert(Section::Accent, RgbColor::BLACK);
        assert_eq!(
            AppliedColors::from_assignment(&HOUSE, map),
            Err(AssignmentError::ExtraSection(Section::Accent))
        );
    }

    #[test]
    fn test_set_only_known_sections() {
        let mut applied = AppliedColors::from_assignment(&HOUSE, full_map()).unwrap();
        assert!(applied.set(Section::Wall, RgbColor::WHITE));
        assert_eq!(applied.get(Section::Wall), Some(RgbColor::WHITE));

        assert!(!applied.set(Section::Garage, RgbColor::WHITE));
        assert_eq!(applied.len(), 3);
    }

    #[test]
    fn test_iteration_in_display_order() {
        let applied = AppliedColors::from_assignment(&HOUSE, full_map()).unwrap();
        let order: Vec<Section> = applied.sections().collect();
        assert_eq!(order, HOUSE.to_vec());
    }
}
