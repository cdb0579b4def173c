//! Image catalog - the cyclic list of puzzle images
//!
//! Levels walk the catalog in order and wrap around. The core never loads
//! images; it only hands out [`ImageRef`]s and the metadata needed to show them.

use crate::error::PuzzleError;
use crate::types::ImageRef;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    pub image: ImageRef,
    pub slug: &'static str,
    pub label: &'static str,
    pub src: &'static str,
}

pub const DEFAULT_IMAGE_SLUG: &str = "cat";

pub const PUZZLE_CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        image: ImageRef(1),
        slug: DEFAULT_IMAGE_SLUG,
        label: "Cat",
        src: "images/cat.jpg",
    },
    CatalogEntry {
        image: ImageRef(2),
        slug: "forest",
        label: "Forest",
        src: "images/forest.webp",
    },
    CatalogEntry {
        image: ImageRef(3),
        slug: "sky",
        label: "Sky",
        src: "images/sky.webp",
    },
    CatalogEntry {
        image: ImageRef(4),
        slug: "sunset-tree",
        label: "Sunset Tree",
        src: "images/sunsetTree.jpg",
    },
    CatalogEntry {
        image: ImageRef(5),
        slug: "waterfall",
        label: "Waterfall",
        src: "images/waterfall.webp",
    },
];

/// Source of puzzle images, indexed cyclically.
pub trait ImageProvider {
    /// Number of images available (never 0 for a usable provider).
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Image at `index`, wrapping around the end.
    fn image_at(&self, index: usize) -> ImageRef;

    /// Index following `current`, wrapping to 0 after the last image.
    fn next_image(&self, current: usize) -> usize {
        match self.len() {
            0 => 0,
            n => (current + 1) % n,
        }
    }
}

/// Catalog backed by a static entry table
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    entries: &'static [CatalogEntry],
}

impl Catalog {
    /// The five built-in images.
    pub fn builtin() -> Self {
        Self {
            entries: PUZZLE_CATALOG,
        }
    }

    pub fn new(entries: &'static [CatalogEntry]) -> Result<Self, PuzzleError> {
        if entries.is_empty() {
            return Err(PuzzleError::config("image catalog is empty"));
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &'static [CatalogEntry] {
        self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&'static CatalogEntry> {
        if self.entries.is_empty() {
            return None;
        }
        self.entries.get(index % self.entries.len())
    }

    pub fn by_image(&self, image: ImageRef) -> Option<&'static CatalogEntry> {
        self.entries.iter().find(|entry| entry.image == image)
    }

    pub fn by_slug(&self, slug: &str) -> Option<&'static CatalogEntry> {
        let trimmed = slug.trim();
        self.entries
            .iter()
            .find(|entry| entry.slug.eq_ignore_ascii_case(trimmed))
    }

    /// Index of the entry with `slug`, for starting a run on a chosen image.
    pub fn index_of_slug(&self, slug: &str) -> Option<usize> {
        let trimmed = slug.trim();
        self.entries
            .iter()
            .position(|entry| entry.slug.eq_ignore_ascii_case(trimmed))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ImageProvider for Catalog {
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn image_at(&self, index: usize) -> ImageRef {
        self.entry(index).map(|e| e.image).unwrap_or_default()
    }
}
