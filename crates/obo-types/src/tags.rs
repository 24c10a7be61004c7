//! Well-known OBO stanza headers and tag names.
//!
//! Only the tags listed here are interpreted inside a `[Term]` stanza;
//! every other tag is ignored by the loader.
//!
//! # Examples
//!
//! ```
//! use obo_types::tags;
//!
//! let line = "is_a: SYMP:0000891 ! musculoskeletal system symptom";
//! assert!(line.starts_with(tags::IS_A));
//! ```

// =============================================================================
// Stanza Headers
// =============================================================================

/// Header opening a term stanza.
pub const TERM_HEADER: &str = "[Term]";

/// Header opening a relationship type stanza. Its content is skipped.
pub const TYPEDEF_HEADER: &str = "[Typedef]";

/// First character of a full-line comment.
pub const COMMENT_PREFIX: char = '!';

// =============================================================================
// Term Tags
// =============================================================================

/// Primary identifier of the term.
pub const ID: &str = "id";

/// Preferred label.
pub const NAME: &str = "name";

/// Free-text definition.
pub const DEF: &str = "def";

/// Alternate identifier. May repeat.
pub const ALT_ID: &str = "alt_id";

/// Cross-reference. May repeat.
pub const XREF: &str = "xref";

/// Synonym in the form `"label" SCOPE [xrefs]`. May repeat.
pub const SYNONYM: &str = "synonym";

/// Parent identifier, optionally followed by `! parent name`. May repeat.
pub const IS_A: &str = "is_a";

/// Marks the term obsolete. The value is not inspected.
pub const IS_OBSOLETE: &str = "is_obsolete";
