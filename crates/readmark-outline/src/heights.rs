#![forbid(unsafe_code)]

//! Proportional section heights.
//!
//! Each measured heading owns the document region from its own offset to
//! the next heading's offset (the last one runs to the end of the
//! document). Regions are expressed as a percentage of the total scroll
//! height so an outline can size its rows proportionally.
//!
//! # Invariants
//!
//! - `M` measured headings yield exactly `M + 1` entries: the `before`
//!   region plus one per heading. Zero headings yield an empty map.
//! - Every value is finite and non-negative. Out-of-order or overflowing
//!   offsets clamp to `0`.
//! - Lookups never fail: a missing key reads as `0`.
//! - A slug measured twice resolves to its first occurrence.

use std::collections::HashMap;

use readmark_core::geometry::{HeadingOffset, percent_of};

/// Key of a height entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKey<'a> {
    /// The region above the first measured heading.
    Before,
    /// The region owned by the heading with this slug.
    Section(&'a str),
}

/// Map from section key to percentage of the document scroll height.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SectionHeights {
    before: Option<f64>,
    sections: Vec<(String, f64)>,
    index: HashMap<String, usize>,
}

impl SectionHeights {
    /// An empty map; every lookup reads 0.
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Derive heights from measured headings, in document order.
    pub fn measure(headings: &[HeadingOffset], scroll_height: f64) -> Self {
        let Some(first) = headings.first() else {
            return Self::empty();
        };

        let before = percent_of(first.offset, scroll_height).max(0.0);
        let sections: Vec<(String, f64)> = headings
            .iter()
            .enumerate()
            .map(|(index, heading)| {
                let next = headings
                    .get(index + 1)
                    .map_or(scroll_height, |next| next.offset);
                let height = percent_of(next - heading.offset, scroll_height).max(0.0);
                (heading.slug.clone(), height)
            })
            .collect();

        let mut index = HashMap::with_capacity(sections.len());
        for (position, (slug, _)) in sections.iter().enumerate() {
            index.entry(slug.clone()).or_insert(position);
        }

        Self {
            before: Some(before),
            sections,
            index,
        }
    }

    /// Number of entries, `M + 1` for `M` measured headings.
    #[inline]
    pub fn len(&self) -> usize {
        self.sections.len() + usize::from(self.before.is_some())
    }

    /// Whether nothing was measured.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of measured headings.
    #[inline]
    pub fn measured(&self) -> usize {
        self.sections.len()
    }

    /// Height of the region above the first heading, 0 when unmeasured.
    #[inline]
    pub fn before(&self) -> f64 {
        self.before.unwrap_or(0.0)
    }

    /// Height of the section with `slug`, 0 when unmeasured.
    pub fn get(&self, slug: &str) -> f64 {
        self.index
            .get(slug)
            .and_then(|&position| self.sections.get(position))
            .map_or(0.0, |&(_, height)| height)
    }

    /// Height for any key, 0 when unmeasured.
    pub fn lookup(&self, key: SectionKey<'_>) -> f64 {
        match key {
            SectionKey::Before => self.before(),
            SectionKey::Section(slug) => self.get(slug),
        }
    }

    /// All entries, `before` first, then headings in document order.
    pub fn iter(&self) -> impl Iterator<Item = (SectionKey<'_>, f64)> {
        self.before
            .map(|height| (SectionKey::Before, height))
            .into_iter()
            .chain(
                self.sections
                    .iter()
                    .map(|(slug, height)| (SectionKey::Section(slug.as_str()), *height)),
            )
    }

    /// Sum of all entries; about 100 for a fully measured, ordered layout.
    pub fn total(&self) -> f64 {
        self.iter().map(|(_, height)| height).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offsets(values: &[f64]) -> Vec<HeadingOffset> {
        values
            .iter()
            .enumerate()
            .map(|(i, &offset)| HeadingOffset::new(format!("s{}", i + 1), offset))
            .collect()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn three_sections_in_thousand_pixel_document() {
        let heights = SectionHeights::measure(&offsets(&[100.0, 400.0, 700.0]), 1000.0);
        assert_eq!(heights.len(), 4);
        assert!(approx(heights.before(), 10.0));
        assert!(approx(heights.get("s1"), 30.0));
        assert!(approx(heights.get("s2"), 30.0));
        assert!(approx(heights.get("s3"), 30.0));
        assert!(approx(heights.total(), 100.0));
    }

    #[test]
    fn no_headings_is_empty() {
        let heights = SectionHeights::measure(&[], 1000.0);
        assert!(heights.is_empty());
        assert_eq!(heights.len(), 0);
        assert_eq!(heights.before(), 0.0);
        assert_eq!(heights.get("anything"), 0.0);
    }

    #[test]
    fn missing_key_reads_zero() {
        let heights = SectionHeights::measure(&offsets(&[0.0]), 500.0);
        assert_eq!(heights.get("nope"), 0.0);
        assert_eq!(heights.lookup(SectionKey::Section("nope")), 0.0);
    }

    #[test]
    fn single_heading_runs_to_end() {
        let heights = SectionHeights::measure(&offsets(&[250.0]), 1000.0);
        assert_eq!(heights.len(), 2);
        assert!(approx(heights.lookup(SectionKey::Before), 25.0));
        assert!(approx(heights.get("s1"), 75.0));
    }

    #[test]
    fn zero_scroll_height_yields_zeros() {
        let heights = SectionHeights::measure(&offsets(&[10.0, 20.0]), 0.0);
        assert_eq!(heights.len(), 3);
        assert!(heights.iter().all(|(_, h)| h == 0.0));
    }

    #[test]
    fn out_of_order_offsets_clamp_to_zero() {
        let heights = SectionHeights::measure(&offsets(&[600.0, 200.0]), 1000.0);
        assert_eq!(heights.get("s1"), 0.0);
        assert!(approx(heights.get("s2"), 80.0));
        assert!(heights.iter().all(|(_, h)| h >= 0.0));
    }

    #[test]
    fn iter_puts_before_first() {
        let heights = SectionHeights::measure(&offsets(&[100.0, 300.0]), 1000.0);
        let keys: Vec<_> = heights.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            [
                SectionKey::Before,
                SectionKey::Section("s1"),
                SectionKey::Section("s2"),
            ]
        );
    }

    #[test]
    fn repeated_slug_reads_first_occurrence() {
        let measured = [
            HeadingOffset::new("dup", 100.0),
            HeadingOffset::new("other", 300.0),
            HeadingOffset::new("dup", 900.0),
        ];
        let heights = SectionHeights::measure(&measured, 1000.0);
        assert_eq!(heights.measured(), 3);
        assert!(approx(heights.get("dup"), 20.0));
        assert!(approx(heights.get("other"), 60.0));
        assert!(approx(heights.total(), 100.0));
    }

    #[test]
    fn heading_named_before_does_not_collide_with_sentinel() {
        let heights = SectionHeights::measure(&[HeadingOffset::new("before", 200.0)], 1000.0);
        assert_eq!(heights.len(), 2);
        assert!(approx(heights.before(), 20.0));
        assert!(approx(heights.get("before"), 80.0));
    }
}
