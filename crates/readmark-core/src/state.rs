#![forbid(unsafe_code)]

//! Published tracking state.

/// Progress and active section of a tracked document.
///
/// `current_section` is a 1-based section position: `0` means the reader
/// is above the first section, `i` means the reader is within or past
/// section `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollState {
    /// Read progress in whole percent, `0..=100`.
    pub progress: u8,
    /// Active section position, `0` when above the first section.
    pub current_section: usize,
}

impl ScrollState {
    /// Create a state snapshot. Progress is clamped to 100.
    #[inline]
    pub fn new(progress: u8, current_section: usize) -> Self {
        Self {
            progress: progress.min(100),
            current_section,
        }
    }

    /// The reader reached the end of the document.
    #[inline]
    pub const fn is_complete(&self) -> bool {
        self.progress == 100
    }

    /// The reader has not reached the first section yet.
    #[inline]
    pub const fn is_before_first_section(&self) -> bool {
        self.current_section == 0
    }

    /// Section at 1-based `position` is the active one.
    #[inline]
    pub const fn is_current(&self, position: usize) -> bool {
        position != 0 && self.current_section == position
    }

    /// Section at 1-based `position` has been read.
    ///
    /// At 100% progress every section counts as read, whatever the index.
    #[inline]
    pub const fn is_completed(&self, position: usize) -> bool {
        self.is_complete() || self.current_section > position
    }
}
