//! Paintable sections of the house illustration and illustration variants.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A paintable region of the house illustration.
///
/// Ordering follows declaration order, which is also the order the section
/// buttons are shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// Stucco or siding walls
    Wall,
    /// Roof surfaces
    Roof,
    /// Front door
    Door,
    /// Window frames
    Frames,
    /// Fascia and trim boards
    Trim,
    /// Garage door
    Garage,
    /// Stone accent band
    Accent,
}

impl Section {
    /// Every section known to any illustration variant.
    pub const ALL: [Self; 7] = [
        Self::Wall,
        Self::Roof,
        Self::Door,
        Self::Frames,
        Self::Trim,
        Self::Garage,
        Self::Accent,
    ];

    /// Identifier used in URLs, JSON and data files.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Wall => "wall",
            Self::Roof => "roof",
            Self::Door => "door",
            Self::Frames => "frames",
            Self::Trim => "trim",
            Self::Garage => "garage",
            Self::Accent => "accent",
        }
    }

    /// Button label shown in the visualizer controls.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Wall => "Walls",
            Self::Roof => "Roof",
            Self::Door => "Door",
            Self::Frames => "Windows",
            Self::Trim => "Trim",
            Self::Garage => "Garage Door",
            Self::Accent => "Stone Accent",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Section {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|section| section.id().eq_ignore_ascii_case(needle))
            .ok_or_else(|| anyhow::anyhow!("Unknown section '{needle}'"))
    }
}

/// An independent illustration configuration with its own section set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HouseVariant {
    /// Southwest stucco house with garage and stone accent band
    #[default]
    Southwest,
    /// Gabled cottage without garage or accent regions
    Cottage,
}

impl HouseVariant {
    /// All variants, in the order they are listed by the API.
    pub const ALL: [Self; 2] = [Self::Southwest, Self::Cottage];

    /// Identifier used in URLs and data files.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Southwest => "southwest",
            Self::Cottage => "cottage",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Southwest => "Southwest Stucco",
            Self::Cottage => "Gabled Cottage",
        }
    }
}

impl fmt::Display for HouseVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for HouseVariant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|variant| variant.id().eq_ignore_ascii_case(needle))
            .ok_or_else(|| anyhow::anyhow!("Unknown house variant '{needle}'"))
    }
}
