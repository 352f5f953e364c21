//! Section references.

use std::fmt;

use super::Section;
use crate::core::types::SectionId;

/// How a caller names a section.
///
/// Titles are what users type; ids are what fields point at. Keeping the two
/// apart makes every "this section must exist" lookup explicit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SectionRef {
    /// A resolved section id.
    Id(SectionId),
    /// A section title, matched exactly.
    Title(String),
}

impl SectionRef {
    /// Reference a section by title.
    pub fn title(title: impl Into<String>) -> Self {
        SectionRef::Title(title.into())
    }

    /// Whether `section` is the one this reference names.
    pub fn matches(&self, section: &Section) -> bool {
        match self {
            SectionRef::Id(id) => section.id == *id,
            SectionRef::Title(title) => section.title == *title,
        }
    }
}

impl fmt::Display for SectionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionRef::Id(id) => write!(f, "#{}", id),
            SectionRef::Title(title) => write!(f, "{}", title),
        }
    }
}
