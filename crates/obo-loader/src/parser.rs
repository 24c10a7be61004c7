//! OBO term stanza parser.
//!
//! Provides a streaming state machine that turns the lines of an OBO file
//! into [`OboTerm`] records, one per `[Term]` stanza.

use std::io::Read;
use std::time::Instant;

use obo_types::{tags, OboTerm};
use tracing::{debug, warn};

use crate::index::HierarchyIndex;
use crate::reader::LineReader;
use crate::types::{MalformedPolicy, OboConfig, OboError, OboResult, ParseStats};

/// Which kind of stanza the parser is currently inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockState {
    /// Before the first stanza header. Header tags are dropped.
    Preamble,
    /// Inside a `[Term]` stanza.
    InTerm,
    /// Inside `[Typedef]` or any other stanza. Content is skipped.
    InOtherStanza,
}

/// A streaming parser for OBO files.
///
/// Yields one term per `[Term]` stanza, in file order. A term is complete
/// when the next stanza header appears or the input ends. When a
/// [`HierarchyIndex`] is attached, every `is_a` line also records the
/// position of the current term under its parent identifier.
///
/// After an error is yielded the parser is exhausted.
///
/// # Examples
///
/// ```
/// use obo_loader::{OboConfig, TermParser};
/// use std::io::Cursor;
///
/// let input = "[Term]\nid: SYMP:0000001\nname: abdominal cramp\n";
/// let terms = TermParser::new(Cursor::new(input), OboConfig::default())
///     .parse_all()
///     .unwrap();
///
/// assert_eq!(terms.len(), 1);
/// assert_eq!(terms[0].name, "abdominal cramp");
/// ```
pub struct TermParser<'i, R: Read> {
    lines: LineReader<R>,
    config: OboConfig,
    state: BlockState,
    current: Option<OboTerm>,
    index: Option<&'i mut HierarchyIndex>,
    /// Position of the first term of this input in the owning term list.
    base: usize,
    terms_started: usize,
    stats: ParseStats,
    start_time: Instant,
    finished: bool,
}

impl<R: Read> TermParser<'static, R> {
    /// Creates a parser that does not build a hierarchy.
    pub fn new(reader: R, config: OboConfig) -> Self {
        Self::build(reader, config, None, 0)
    }
}

impl<'i, R: Read> TermParser<'i, R> {
    /// Creates a parser that records `is_a` links into `index`.
    ///
    /// `base` is the number of terms already present in the list the
    /// yielded terms will be appended to.
    pub fn with_index(
        reader: R,
        config: OboConfig,
        index: &'i mut HierarchyIndex,
        base: usize,
    ) -> Self {
        Self::build(reader, config, Some(index), base)
    }

    fn build(
        reader: R,
        config: OboConfig,
        index: Option<&'i mut HierarchyIndex>,
        base: usize,
    ) -> Self {
        Self {
            lines: LineReader::new(reader),
            config,
            state: BlockState::Preamble,
            current: None,
            index,
            base,
            terms_started: 0,
            stats: ParseStats::default(),
            start_time: Instant::now(),
            finished: false,
        }
    }

    /// Returns the statistics gathered so far.
    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }

    /// Returns the parser configuration.
    pub fn config(&self) -> &OboConfig {
        &self.config
    }

    /// Parses all remaining terms into a Vec.
    ///
    /// Stops at the first error.
    pub fn parse_all(self) -> OboResult<Vec<OboTerm>> {
        self.collect()
    }

    fn handle_line(&mut self, line_no: usize, line: &str) -> OboResult<Option<OboTerm>> {
        let header = line.trim_end();

        if header == tags::TERM_HEADER {
            self.state = BlockState::InTerm;
            self.terms_started += 1;
            let done = self.current.replace(OboTerm::new());
            return Ok(done.map(|term| self.emitted(term)));
        }

        if is_stanza_header(header) {
            self.state = BlockState::InOtherStanza;
            let done = self.current.take();
            return Ok(done.map(|term| self.emitted(term)));
        }

        let content = line.trim_start();
        if content.is_empty() || content.starts_with(tags::COMMENT_PREFIX) {
            return Ok(None);
        }

        if self.state != BlockState::InTerm {
            return Ok(None);
        }

        if !self.apply_field(line) {
            match self.config.malformed {
                MalformedPolicy::Abort => {
                    return Err(OboError::MalformedLine {
                        line: line_no,
                        content: line.to_string(),
                    });
                }
                MalformedPolicy::Skip => {
                    warn!(line = line_no, content = line, "Skipping malformed OBO line");
                    self.stats.skipped_lines += 1;
                }
            }
        }

        Ok(None)
    }

    /// Applies one `tag: value` line to the current term.
    ///
    /// Returns false if the line does not have the expected shape.
    fn apply_field(&mut self, line: &str) -> bool {
        let Some((tag, value)) = parse::field(line) else {
            return false;
        };
        let Some(term) = self.current.as_mut() else {
            return true;
        };

        match tag {
            tags::ID => term.id = value.to_string(),
            tags::NAME => term.name = value.to_string(),
            tags::DEF => term.def = value.to_string(),
            tags::ALT_ID => term.alt_ids.push(value.to_string()),
            tags::XREF => term.xrefs.push(value.to_string()),
            tags::SYNONYM => term.synonyms.push(parse::synonym_label(value)),
            tags::IS_A => {
                let parent = parse::is_a_target(value);
                if parent.is_empty() {
                    return false;
                }
                if let Some(index) = self.index.as_deref_mut() {
                    index.add(parent, self.base + self.terms_started - 1);
                }
                term.is_a.push(parent.to_string());
            }
            tags::IS_OBSOLETE => term.obsolete = true,
            _ => {}
        }

        true
    }

    fn emitted(&mut self, term: OboTerm) -> OboTerm {
        self.stats.terms_emitted += 1;
        if term.obsolete {
            self.stats.obsolete_terms += 1;
        }
        term
    }

    fn finish(&mut self) {
        self.finished = true;
        self.stats.parse_time_ms = self.start_time.elapsed().as_millis() as u64;
        debug!(
            lines = self.stats.lines_read,
            terms = self.stats.terms_emitted,
            skipped = self.stats.skipped_lines,
            "Finished parsing OBO input"
        );
    }
}

impl<R: Read> Iterator for TermParser<'_, R> {
    type Item = OboResult<OboTerm>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let (line_no, line) = match self.lines.next_line() {
                Ok(Some(next)) => next,
                Ok(None) => {
                    let last = self.current.take().map(|term| self.emitted(term));
                    self.finish();
                    return last.map(Ok);
                }
                Err(e) => {
                    self.finish();
                    return Some(Err(e));
                }
            };

            self.stats.lines_read = line_no;
            let interval = self.config.progress_interval;
            if interval > 0 && line_no % interval == 0 {
                debug!(line = line_no, "Parsing OBO input");
            }

            match self.handle_line(line_no, &line) {
                Ok(Some(term)) => return Some(Ok(term)),
                Ok(None) => continue,
                Err(e) => {
                    self.finish();
                    return Some(Err(e));
                }
            }
        }
    }
}

/// Returns true for any `[Name]` stanza header line.
fn is_stanza_header(line: &str) -> bool {
    line.len() >= 2 && line.starts_with('[') && line.ends_with(']')
}

/// Helper functions for splitting OBO field values.
pub mod parse {
    /// Splits a `tag: value` line on its first colon.
    ///
    /// Both sides are trimmed. Returns `None` if there is no colon or the
    /// value is empty.
    pub fn field(line: &str) -> Option<(&str, &str)> {
        let (tag, value) = line.split_once(':')?;
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        Some((tag.trim(), value))
    }

    /// Extracts the quoted label of a synonym value.
    ///
    /// `"back pain" EXACT []` becomes `back pain`.
    pub fn synonym_label(value: &str) -> String {
        let label = value.split("\" ").next().unwrap_or(value);
        label.replace('"', "")
    }

    /// Extracts the parent identifier of an `is_a` value, dropping the
    /// `! name` comment.
    pub fn is_a_target(value: &str) -> &str {
        value.split('!').next().unwrap_or(value).trim()
    }
}
