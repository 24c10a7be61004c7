//! # obo-types
//!
//! Type definitions for ontologies in the OBO flat-file format.
//!
//! This crate provides the plain record type produced by the `obo-loader`
//! parser together with the tag names it recognizes inside a `[Term]`
//! stanza.
//!
//! ## Features
//!
//! - `serde` (default): Enables serialization/deserialization support via serde.
//!   Disable this feature for zero-dependency usage.
//!
//! ## Usage
//!
//! ```rust
//! use obo_types::{tags, OboTerm};
//!
//! let mut term = OboTerm::new();
//! term.id = "SYMP:0000001".to_string();
//! term.name = "abdominal cramp".to_string();
//! term.is_a.push("SYMP:0000461".to_string());
//!
//! assert!(term.has_parents());
//! assert_eq!(tags::IS_A, "is_a");
//! ```

#![warn(missing_docs)]

pub mod tags;
mod term;

pub use term::OboTerm;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_types_are_exported() {
        let term = OboTerm::default();
        assert!(term.id.is_empty());
        assert_eq!(tags::TERM_HEADER, "[Term]");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_roundtrip() {
        let term = OboTerm {
            id: "SYMP:0000005".to_string(),
            name: "ataxia".to_string(),
            synonyms: vec!["uncoordination".to_string()],
            is_a: vec!["SYMP:0000410".to_string()],
            ..Default::default()
        };

        let json = serde_json::to_string(&term).unwrap();
        let parsed: OboTerm = serde_json::from_str(&json).unwrap();
        assert_eq!(term, parsed);
    }
}
