//! Static site content: services, features, testimonials and gallery tiles.
//!
//! The content is embedded in the binary from `src/data/content.json` and
//! checked when loaded. Gallery tiles point at visualizer presets, so every
//! tile's preset must exist in its variant's catalog.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::{HouseVariant, VariantCatalog};

/// Landing page headline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    /// Headline
    pub title: String,
    /// Paragraph under the headline
    pub body: String,
}

/// A titled card (service or feature).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Card title
    pub title: String,
    /// Card body
    pub description: String,
}

/// A client testimonial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    /// Client description (e.g., "Homeowner, Albuquerque")
    pub name: String,
    /// Quote
    pub text: String,
    /// Star rating, 1 to 5
    pub rating: u8,
    /// Avatar URL
    pub image: String,
}

/// A recent-project tile, illustrated with a visualizer preset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryItem {
    /// Tile caption
    pub title: String,
    /// Illustration variant
    pub variant: HouseVariant,
    /// Preset name within the variant
    pub preset: String,
}

/// A header navigation link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavLink {
    /// Route path
    pub path: &'static str,
    /// Link text
    pub label: &'static str,
}

/// Header navigation, in display order.
pub const NAV_LINKS: [NavLink; 3] = [
    NavLink {
        path: "/",
        label: "Home",
    },
    NavLink {
        path: "/gallery",
        label: "Projects",
    },
    NavLink {
        path: "/contact",
        label: "Contact",
    },
];

/// All static content of the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteContent {
    /// Landing page headline
    pub hero: Hero,
    /// Service cards
    pub services: Vec<Card>,
    /// Feature boxes
    pub features: Vec<Card>,
    /// Testimonial carousel slides
    pub testimonials: Vec<Testimonial>,
    /// Recent-project tiles
    pub gallery: Vec<GalleryItem>,
}

impl SiteContent {
    /// Loads the embedded content and checks it against the catalogs.
    pub fn load(catalogs: &[VariantCatalog]) -> Result<Self> {
        let content: Self = serde_json::from_str(include_str!("data/content.json"))
            .context("Failed to parse embedded content.json")?;
        content.validate(catalogs)?;
        Ok(content)
    }

    fn validate(&self, catalogs: &[VariantCatalog]) -> Result<()> {
        if self.testimonials.is_empty() {
            anyhow::bail!("At least one testimonial is required");
        }
        if let Some(t) = self.testimonials.iter().find(|t| !(1..=5).contains(&t.rating)) {
            anyhow::bail!("Testimonial '{}' has rating {} outside 1-5", t.name, t.rating);
        }

        for item in &self.gallery {
            let catalog = catalogs
                .iter()
                .find(|c| c.variant == item.variant)
                .with_context(|| format!("Gallery tile '{}' uses unknown variant", item.title))?;
            if catalog.preset(&item.preset).is_none() {
                anyhow::bail!(
                    "Gallery tile '{}' uses unknown preset '{}' for {}",
                    item.title,
                    item.preset,
                    item.variant
                );
            }
        }
        Ok(())
    }

    /// Creates a carousel over the testimonials.
    #[must_use]
    pub fn carousel(&self) -> TestimonialCarousel {
        TestimonialCarousel::new(self.testimonials.len())
    }
}

/// Position in the testimonial carousel.
///
/// Navigation wraps in both directions. A carousel over zero slides stays at
/// index 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestimonialCarousel {
    len: usize,
    current: usize,
}

impl TestimonialCarousel {
    /// Starts at the first slide.
    #[must_use]
    pub const fn new(len: usize) -> Self {
        Self { len, current: 0 }
    }

    /// Starts at `index`, wrapped into range.
    #[must_use]
    pub fn at(len: usize, index: usize) -> Self {
        let mut carousel = Self::new(len);
        carousel.go_to(index);
        carousel
    }

    /// Index of the visible slide.
    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    /// Number of slides.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// True if there are no slides.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Index the next arrow leads to.
    #[must_use]
    pub fn next_index(&self) -> usize {
        if self.len == 0 {
            return 0;
        }
        (self.current + 1) % self.len
    }

    /// Index the previous arrow leads to.
    #[must_use]
    pub fn prev_index(&self) -> usize {
        if self.len == 0 {
            return 0;
        }
        (self.current + self.len - 1) % self.len
    }

    /// Advances one slide.
    pub fn next(&mut self) {
        self.current = self.next_index();
    }

    /// Goes back one slide.
    pub fn prev(&mut self) {
        self.current = self.prev_index();
    }

    /// Jumps to a slide.
    pub fn go_to(&mut self, index: usize) {
        self.current = if self.len == 0 { 0 } else { index % self.len };
    }
}
