//! OBO term type.
//!
//! This module provides the `OboTerm` struct representing one `[Term]`
//! stanza of an OBO file.

/// A single term parsed from a `[Term]` stanza.
///
/// # Examples
///
/// ```
/// use obo_types::OboTerm;
///
/// let term = OboTerm {
///     id: "SYMP:0000003".to_string(),
///     name: "acute enteritis in newborns".to_string(),
///     obsolete: true,
///     ..Default::default()
/// };
///
/// assert!(term.is_root());
/// assert_eq!(term.all_ids().collect::<Vec<_>>(), vec!["SYMP:0000003"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OboTerm {
    /// Primary identifier (e.g. `SYMP:0000001`).
    pub id: String,
    /// Alternate identifiers, in file order.
    pub alt_ids: Vec<String>,
    /// Preferred label.
    pub name: String,
    /// Definition text as written, may be empty.
    pub def: String,
    /// Cross-references, in file order.
    pub xrefs: Vec<String>,
    /// Synonym labels without quotes, scope or references.
    pub synonyms: Vec<String>,
    /// Parent identifiers from `is_a` lines, comments stripped.
    pub is_a: Vec<String>,
    /// Whether an `is_obsolete` line was present.
    pub obsolete: bool,
}

impl OboTerm {
    /// Creates an empty term.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the term declares at least one `is_a` parent.
    pub fn has_parents(&self) -> bool {
        !self.is_a.is_empty()
    }

    /// Returns true if the term declares no `is_a` parent.
    ///
    /// Such terms are candidate roots of the hierarchy.
    pub fn is_root(&self) -> bool {
        self.is_a.is_empty()
    }

    /// Iterates over the primary identifier followed by the alternates.
    pub fn all_ids(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.id.as_str()).chain(self.alt_ids.iter().map(String::as_str))
    }
}
