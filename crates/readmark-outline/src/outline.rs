#![forbid(unsafe_code)]

//! The navigable outline of a document.

use std::collections::HashMap;
use std::fmt;

use crate::heading::{HeadingEntry, SECTION_MAX_DEPTH, Section, filter_sections_to_depth};

/// Structural problem in an outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutlineError {
    /// Two sections share a slug. Positions are 1-based.
    DuplicateSlug {
        slug: String,
        first: usize,
        second: usize,
    },
}

impl fmt::Display for OutlineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateSlug {
                slug,
                first,
                second,
            } => write!(
                f,
                "duplicate section slug {slug:?} at positions {first} and {second}"
            ),
        }
    }
}

impl std::error::Error for OutlineError {}

/// Sections of a document, filtered once and immutable afterwards.
///
/// Positions handed out by this type are 1-based, matching
/// [`ScrollState::current_section`](readmark_core::ScrollState).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outline {
    sections: Vec<Section>,
}

impl Outline {
    /// Build the outline from the full heading list with the default cutoff.
    pub fn from_headings(headings: &[HeadingEntry]) -> Self {
        Self::with_max_depth(headings, SECTION_MAX_DEPTH)
    }

    /// Build the outline keeping headings with `depth <= max_depth`.
    pub fn with_max_depth(headings: &[HeadingEntry], max_depth: u8) -> Self {
        let sections = filter_sections_to_depth(headings, max_depth);
        readmark_core::trace!(
            headings = headings.len(),
            sections = sections.len(),
            max_depth,
            "filtered outline"
        );
        Self { sections }
    }

    /// All sections in document order.
    #[inline]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Number of sections.
    #[inline]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether the outline has no sections.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Section at 1-based `position`.
    pub fn get(&self, position: usize) -> Option<&Section> {
        position
            .checked_sub(1)
            .and_then(|index| self.sections.get(index))
    }

    /// 1-based position of the first section with `slug`.
    pub fn position_of(&self, slug: &str) -> Option<usize> {
        self.sections
            .iter()
            .position(|section| section.slug == slug)
            .map(|index| index + 1)
    }

    /// Iterate sections with their 1-based positions.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Section)> {
        self.sections
            .iter()
            .enumerate()
            .map(|(index, section)| (index + 1, section))
    }

    /// Check that slugs are unique.
    ///
    /// Returns every duplicate, each paired with the first occurrence.
    pub fn validate(&self) -> Result<(), Vec<OutlineError>> {
        let mut seen: HashMap<&str, usize> = HashMap::with_capacity(self.sections.len());
        let mut errors = Vec::new();
        for (position, section) in self.iter() {
            if let Some(&first) = seen.get(section.slug.as_str()) {
                errors.push(OutlineError::DuplicateSlug {
                    slug: section.slug.clone(),
                    first,
                    second: position,
                });
            } else {
                seen.insert(section.slug.as_str(), position);
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
