#![forbid(unsafe_code)]

//! Heading descriptors and the section filter.
//!
//! The content pipeline hands over every heading of a document. Only the
//! top two nesting levels become navigable sections; deeper headings are
//! dropped while document order is kept.

/// Deepest heading level that becomes a navigable section.
pub const SECTION_MAX_DEPTH: u8 = 2;

/// One heading of the document outline, as produced by the content pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeadingEntry {
    /// Nesting level, 1 for top-level headings.
    pub depth: u8,
    /// Anchor identifier, unique within the document.
    pub slug: String,
    /// Display label.
    pub text: String,
}

impl HeadingEntry {
    /// Create a heading entry.
    pub fn new(depth: u8, slug: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            depth,
            slug: slug.into(),
            text: text.into(),
        }
    }

    /// Whether this heading is shallow enough to be a section at `max_depth`.
    #[inline]
    pub const fn is_section(&self, max_depth: u8) -> bool {
        self.depth <= max_depth
    }
}

/// A navigable outline entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Section {
    /// Nesting level of the originating heading.
    pub depth: u8,
    /// Anchor identifier, also the key for height lookups.
    pub slug: String,
    /// Display label.
    pub text: String,
}

impl From<&HeadingEntry> for Section {
    fn from(heading: &HeadingEntry) -> Self {
        Self {
            depth: heading.depth,
            slug: heading.slug.clone(),
            text: heading.text.clone(),
        }
    }
}

/// Keep the headings with `depth <= 2`, in document order.
pub fn filter_sections(headings: &[HeadingEntry]) -> Vec<Section> {
    filter_sections_to_depth(headings, SECTION_MAX_DEPTH)
}

/// Keep the headings with `depth <= max_depth`, in document order.
pub fn filter_sections_to_depth(headings: &[HeadingEntry], max_depth: u8) -> Vec<Section> {
    headings
        .iter()
        .filter(|heading| heading.is_section(max_depth))
        .map(Section::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<HeadingEntry> {
        vec![
            HeadingEntry::new(1, "title", "Title"),
            HeadingEntry::new(2, "intro", "Intro"),
            HeadingEntry::new(3, "detail", "Detail"),
            HeadingEntry::new(2, "usage", "Usage"),
            HeadingEntry::new(4, "deep", "Deep"),
            HeadingEntry::new(2, "outro", "Outro"),
        ]
    }

    #[test]
    fn keeps_depth_one_and_two_in_order() {
        let slugs: Vec<_> = filter_sections(&sample())
            .into_iter()
            .map(|s| s.slug)
            .collect();
        assert_eq!(slugs, ["title", "intro", "usage", "outro"]);
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert!(filter_sections(&[]).is_empty());
    }

    #[test]
    fn custom_depth_cutoff() {
        assert_eq!(filter_sections_to_depth(&sample(), 3).len(), 5);
        assert_eq!(filter_sections_to_depth(&sample(), 1).len(), 1);
        assert!(filter_sections_to_depth(&sample(), 0).is_empty());
    }

    #[test]
    fn section_copies_heading_fields() {
        let heading = HeadingEntry::new(2, "a-b", "A & B");
        let section = Section::from(&heading);
        assert_eq!(section.depth, 2);
        assert_eq!(section.slug, "a-b");
        assert_eq!(section.text, "A & B");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn headings_from_pipeline_json() {
        let json = r#"[{"depth":2,"slug":"setup","text":"Setup"},{"depth":3,"slug":"x","text":"X"}]"#;
        let headings: Vec<HeadingEntry> = serde_json::from_str(json).unwrap();
        let sections = filter_sections(&headings);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].slug, "setup");
    }
}
