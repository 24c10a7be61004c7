//! # obo-loader
//!
//! Streaming parser for ontologies in the OBO flat-file format.
//!
//! Two entry points share the same stanza parser:
//!
//! - [`parse_to_vec`] and [`OboDocument::load`] block until the input is
//!   consumed and return every term in file order together with a
//!   parent to children [`HierarchyIndex`].
//! - [`parse_to_stream`] returns an [`OboStream`] that yields terms as
//!   they are parsed, without building a hierarchy.
//!
//! In both modes the parser runs on its own worker and hands terms over a
//! bounded channel ([`OboConfig::channel_capacity`], 100 by default).
//!
//! ```
//! use obo_loader::{OboConfig, OboDocument};
//! use std::io::Cursor;
//!
//! let input = "\
//! format-version: 1.2
//!
//! [Term]
//! id: SYMP:0000000
//! name: cellulitis
//! is_a: SYMP:0000891 ! musculoskeletal system symptom
//! ";
//!
//! let mut document = OboDocument::new();
//! document.load(Cursor::new(input), &OboConfig::default()).unwrap();
//!
//! assert_eq!(document.terms()[0].is_a, vec!["SYMP:0000891"]);
//! assert_eq!(document.get_children("SYMP:0000891")[0].name, "cellulitis");
//! ```

#![warn(missing_docs)]

pub mod collect;
pub mod index;
pub mod parser;
pub mod reader;
pub mod stream;
pub mod types;

pub use collect::{parse_to_vec, OboDocument};
pub use index::HierarchyIndex;
pub use parser::TermParser;
pub use reader::LineReader;
pub use stream::{parse_to_stream, OboStream};
pub use types::{MalformedPolicy, OboConfig, OboError, OboResult, ParseStats};

// Re-export obo-types for convenience
pub use obo_types;
pub use obo_types::OboTerm;
