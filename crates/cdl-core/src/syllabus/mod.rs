//! Syllabus model: the ordered catalog of weekly sections and their videos.
//!
//! A [`Catalog`] is produced once by [`parse_syllabus`] and only iterated
//! afterwards. Positions are significant: section and video indices (1-based)
//! drive the on-disk names, see [`crate::layout`].

mod error;
mod parse;
mod sanitize;

pub use error::ParseError;
pub use parse::{parse_syllabus, SyllabusParser, MEDIA_LINK_PATTERN, SECTION_HEADER_CLASS};
pub use sanitize::{is_safe_char, sanitize_name};

use anyhow::{Context, Result};
use url::Url;

/// One downloadable media item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Video {
    /// Sanitized display name.
    pub name: String,
    /// Link target as written in the page; may be relative to the syllabus URL.
    pub source_url: String,
}

impl Video {
    /// Resolves `source_url` against the page it was found on. Absolute links are returned as-is.
    pub fn resolve_url(&self, base: &Url) -> Result<Url> {
        base.join(&self.source_url)
            .with_context(|| format!("invalid media link {:?}", self.source_url))
    }
}

/// One week's grouping of videos.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Sanitized, non-empty display name.
    pub name: String,
    pub videos: Vec<Video>,
}

/// Whether a parsed page looked like a real syllabus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogStatus {
    /// No section headers matched. Usually an unauthenticated page (bad or
    /// expired cookies) or a wrong class name.
    NoSections,
    Found { sections: usize, videos: usize },
}

/// Full ordered Section → Video structure extracted from one syllabus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    sections: Vec<Section>,
}

impl Catalog {
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn video_count(&self) -> usize {
        self.sections.iter().map(|s| s.videos.len()).sum()
    }

    pub fn status(&self) -> CatalogStatus {
        if self.sections.is_empty() {
            CatalogStatus::NoSections
        } else {
            CatalogStatus::Found {
                sections: self.section_count(),
                videos: self.video_count(),
            }
        }
    }

    /// Sections paired with their 1-based position.
    pub fn iter_numbered(&self) -> impl Iterator<Item = (usize, &Section)> {
        self.sections.iter().enumerate().map(|(i, s)| (i + 1, s))
    }
}
