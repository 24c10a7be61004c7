//! Synchronous loading into an ordered term list with hierarchy.
//!
//! The parser runs on a worker thread and hands finished terms to the
//! calling thread through a bounded channel. The caller appends them in
//! order while the worker fills the [`HierarchyIndex`].

use std::io::Read;
use std::sync::mpsc;
use std::thread;

use obo_types::OboTerm;
use tracing::debug;

use crate::index::HierarchyIndex;
use crate::parser::TermParser;
use crate::types::{OboConfig, OboError, OboResult, ParseStats};

/// Parses `input`, appending its terms to `terms` and its `is_a` links to
/// `index`.
///
/// Pass the results of a previous call back in to merge several files into
/// one list; index positions stay valid because they are offset by the
/// number of terms already present.
///
/// # Errors
/// Returns the first I/O or malformed line error. The accumulators are
/// consumed in that case. To merge several files without losing earlier
/// results on failure, use [`OboDocument::load`], which rolls back only
/// the failed input.
///
/// # Example
///
/// ```
/// use obo_loader::{parse_to_vec, HierarchyIndex, OboConfig};
/// use std::io::Cursor;
///
/// let input = Cursor::new("[Term]\nid: A:1\nis_a: P:1 ! parent\n");
/// let (terms, index) =
///     parse_to_vec(input, Vec::new(), HierarchyIndex::new(), &OboConfig::default()).unwrap();
///
/// assert_eq!(terms[0].is_a, vec!["P:1"]);
/// assert_eq!(index.children("P:1"), &[0]);
/// ```
pub fn parse_to_vec<R: Read + Send>(
    input: R,
    terms: Vec<OboTerm>,
    index: HierarchyIndex,
    config: &OboConfig,
) -> OboResult<(Vec<OboTerm>, HierarchyIndex)> {
    let mut document = OboDocument::from_parts(terms, index);
    document.load(input, config)?;
    Ok(document.into_parts())
}

/// Runs one producer/collector pass over `input`.
fn collect_into<R: Read + Send>(
    input: R,
    terms: &mut Vec<OboTerm>,
    index: &mut HierarchyIndex,
    config: &OboConfig,
) -> OboResult<ParseStats> {
    let base = terms.len();
    let worker_config = config.clone();
    let (sender, receiver) = mpsc::sync_channel(config.effective_capacity());

    debug!(base, capacity = config.effective_capacity(), "Collecting OBO terms");

    thread::scope(|scope| {
        let worker = scope.spawn(move || -> OboResult<ParseStats> {
            let mut parser = TermParser::with_index(input, worker_config, index, base);
            for item in parser.by_ref() {
                let term = item?;
                if sender.send(term).is_err() {
                    break;
                }
            }
            Ok(parser.stats().clone())
        });

        for term in receiver {
            terms.push(term);
        }

        worker.join().map_err(|_| OboError::WorkerPanicked)?
    })
}

/// An ordered collection of OBO terms with their hierarchy.
///
/// Terms keep file order across every [`load`](Self::load); the
/// hierarchy refers to them by position.
///
/// # Example
///
/// ```
/// use obo_loader::{OboConfig, OboDocument};
/// use std::io::Cursor;
///
/// let mut document = OboDocument::new();
/// document
///     .load(Cursor::new("[Term]\nid: A:1\n[Term]\nid: A:2\nis_a: A:1\n"), &OboConfig::default())
///     .unwrap();
///
/// let children = document.get_children("A:1");
/// assert_eq!(children.len(), 1);
/// assert_eq!(children[0].id, "A:2");
/// ```
#[derive(Clone, Default)]
pub struct OboDocument {
    /// Terms in load order.
    terms: Vec<OboTerm>,
    /// Parent identifier to child positions in `terms`.
    hierarchy: HierarchyIndex,
}

impl std::fmt::Debug for OboDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OboDocument")
            .field("terms", &self.terms.len())
            .field("parents", &self.hierarchy.parent_count())
            .field("links", &self.hierarchy.len())
            .finish()
    }
}

impl OboDocument {
    /// Creates a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a document from previously collected parts.
    ///
    /// Positions in `hierarchy` must refer to `terms`.
    pub fn from_parts(terms: Vec<OboTerm>, hierarchy: HierarchyIndex) -> Self {
        Self { terms, hierarchy }
    }

    /// Parses `input` and appends its terms and hierarchy links.
    ///
    /// Blocks until the input is exhausted. A failed load leaves the
    /// document as it was before the call.
    pub fn load<R: Read + Send>(&mut self, input: R, config: &OboConfig) -> OboResult<ParseStats> {
        let base = self.terms.len();
        let result = collect_into(input, &mut self.terms, &mut self.hierarchy, config);

        match &result {
            Ok(stats) => debug!(
                terms = stats.terms_emitted,
                total = self.terms.len(),
                "Loaded OBO input"
            ),
            Err(e) => {
                debug!(error = %e, "Rolling back failed OBO load");
                self.terms.truncate(base);
                self.hierarchy.truncate(base);
            }
        }

        result
    }

    /// Returns all terms in load order.
    pub fn terms(&self) -> &[OboTerm] {
        &self.terms
    }

    /// Returns the hierarchy index.
    pub fn hierarchy(&self) -> &HierarchyIndex {
        &self.hierarchy
    }

    /// Returns the number of terms.
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if no term has been loaded.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Looks up the first term with the given primary identifier.
    pub fn get_term(&self, id: &str) -> Option<&OboTerm> {
        self.terms.iter().find(|term| term.id == id)
    }

    /// Returns the terms declaring `parent` with `is_a`, in declaration order.
    pub fn get_children(&self, parent: &str) -> Vec<&OboTerm> {
        self.hierarchy
            .children(parent)
            .iter()
            .filter_map(|&position| self.terms.get(position))
            .collect()
    }

    /// Returns terms without any `is_a` parent.
    pub fn roots(&self) -> Vec<&OboTerm> {
        self.filter(OboTerm::is_root)
    }

    /// Returns terms flagged obsolete.
    pub fn obsolete_terms(&self) -> Vec<&OboTerm> {
        self.filter(|term| term.obsolete)
    }

    /// Returns the terms matching `predicate`, in load order.
    pub fn filter<F>(&self, predicate: F) -> Vec<&OboTerm>
    where
        F: Fn(&OboTerm) -> bool,
    {
        self.terms.iter().filter(|term| predicate(term)).collect()
    }

    /// Consumes the document, returning its terms and hierarchy.
    pub fn into_parts(self) -> (Vec<OboTerm>, HierarchyIndex) {
        (self.terms, self.hierarchy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MalformedPolicy;
    use std::io::{self, Cursor};

    const FIRST: &str = "\
[Term]
id: A:1
name: alpha

[Term]
id: A:2
is_a: A:1 ! alpha
";

    const SECOND: &str = "\
[Term]
id: B:1
is_a: A:1 ! alpha
is_obsolete: true
";

    /// Yields `data` and then fails.
    struct FailAfter {
        data: Cursor<Vec<u8>>,
    }

    impl Read for FailAfter {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.data.read(buf)? {
                0 => Err(io::Error::new(io::ErrorKind::Other, "connection reset")),
                n => Ok(n),
            }
        }
    }

    #[test]
    fn test_load_single_input() {
        let mut document = OboDocument::new();
        let stats = document
            .load(Cursor::new(FIRST), &OboConfig::default())
            .unwrap();

        assert_eq!(stats.terms_emitted, 2);
        assert_eq!(document.term_count(), 2);
        assert_eq!(document.get_term("A:2").unwrap().is_a, vec!["A:1"]);
        assert_eq!(document.hierarchy().children("A:1"), &[1]);
        assert_eq!(document.roots().len(), 1);
    }

    #[test]
    fn test_merge_two_inputs() {
        let config = OboConfig::default();
        let (terms, index) =
            parse_to_vec(Cursor::new(FIRST), Vec::new(), HierarchyIndex::new(), &config).unwrap();
        let (terms, index) = parse_to_vec(Cursor::new(SECOND), terms, index, &config).unwrap();

        let ids: Vec<&str> = terms.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["A:1", "A:2", "B:1"]);
        assert_eq!(index.children("A:1"), &[1, 2]);

        let document = OboDocument::from_parts(terms, index);
        let children: Vec<&str> = document
            .get_children("A:1")
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(children, vec!["A:2", "B:1"]);
        assert_eq!(document.obsolete_terms().len(), 1);
    }

    #[test]
    fn test_empty_input() {
        let (terms, index) = parse_to_vec(
            Cursor::new("format-version: 1.2\n"),
            Vec::new(),
            HierarchyIndex::new(),
            &OboConfig::default(),
        )
        .unwrap();

        assert!(terms.is_empty());
        assert!(index.is_empty());
    }

    #[test]
    fn test_small_channel_keeps_order() {
        let config = OboConfig {
            channel_capacity: 1,
            ..Default::default()
        };
        let input: String = (0..500)
            .map(|i| format!("[Term]\nid: N:{i}\nis_a: ROOT\n"))
            .collect();

        let mut document = OboDocument::new();
        document.load(Cursor::new(input), &config).unwrap();

        assert_eq!(document.term_count(), 500);
        for (i, term) in document.terms().iter().enumerate() {
            assert_eq!(term.id, format!("N:{i}"));
        }
        assert_eq!(document.hierarchy().children("ROOT").len(), 500);
    }

    #[test]
    fn test_failed_load_rolls_back() {
        let mut document = OboDocument::new();
        document.load(Cursor::new(FIRST), &OboConfig::default()).unwrap();

        let err = document
            .load(Cursor::new("[Term]\nid: C:1\nis_a: A:1\n[Term]\nbroken\n"), &OboConfig::default())
            .unwrap_err();

        assert!(matches!(err, OboError::MalformedLine { line: 5, .. }));
        assert_eq!(document.term_count(), 2);
        assert_eq!(document.hierarchy().children("A:1"), &[1]);
    }

    #[test]
    fn test_merge_keeps_prior_input_on_failure() {
        let config = OboConfig::default();
        let (terms, index) =
            parse_to_vec(Cursor::new(FIRST), Vec::new(), HierarchyIndex::new(), &config).unwrap();

        let mut document = OboDocument::from_parts(terms, index);
        assert!(document.load(Cursor::new("[Term]\nbad\n"), &config).is_err());

        let ids: Vec<&str> = document.terms().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["A:1", "A:2"]);
        assert_eq!(document.hierarchy().children("A:1"), &[1]);

        document.load(Cursor::new(SECOND), &config).unwrap();
        assert_eq!(document.hierarchy().children("A:1"), &[1, 2]);
    }

    #[test]
    fn test_io_error_is_returned() {
        let input = FailAfter {
            data: Cursor::new(b"[Term]\nid: A:1\n".to_vec()),
        };
        let mut document = OboDocument::new();
        let err = document.load(input, &OboConfig::default()).unwrap_err();

        match err {
            OboError::Io { line, .. } => assert_eq!(line, 3),
            other => panic!("expected Io error, got {:?}", other),
        }
        assert!(document.is_empty());
    }

    #[test]
    fn test_lenient_load_skips() {
        let config = OboConfig {
            malformed: MalformedPolicy::Skip,
            ..Default::default()
        };
        let mut document = OboDocument::new();
        let stats = document
            .load(Cursor::new("[Term]\nid: A:1\nbroken\n"), &config)
            .unwrap();

        assert_eq!(stats.skipped_lines, 1);
        assert_eq!(document.term_count(), 1);
    }

    #[test]
    fn test_filter() {
        let mut document = OboDocument::new();
        document.load(Cursor::new(FIRST), &OboConfig::default()).unwrap();

        let named = document.filter(|term| !term.name.is_empty());
        assert_eq!(named.len(), 1);
        assert_eq!(named[0].id, "A:1");
    }
}
