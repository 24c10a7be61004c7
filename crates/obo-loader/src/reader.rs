//! Line source for the OBO parser.
//!
//! Reads any byte stream line by line, stripping line terminators and
//! tracking the line number for error reporting.

use std::io::{BufRead, BufReader, Read};

use crate::types::{OboError, OboResult};

/// Buffered line reader with line number tracking.
///
/// # Examples
///
/// ```
/// use obo_loader::LineReader;
/// use std::io::Cursor;
///
/// let mut reader = LineReader::new(Cursor::new("[Term]\r\nid: X:1\n"));
///
/// assert_eq!(reader.next_line().unwrap(), Some((1, "[Term]".to_string())));
/// assert_eq!(reader.next_line().unwrap(), Some((2, "id: X:1".to_string())));
/// assert_eq!(reader.next_line().unwrap(), None);
/// ```
pub struct LineReader<R: Read> {
    reader: BufReader<R>,
    line_number: usize,
    buffer: String,
}

impl<R: Read> LineReader<R> {
    /// Creates a new line reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            line_number: 0,
            buffer: String::new(),
        }
    }

    /// Returns the number of the last line read.
    #[inline]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Reads the next line.
    ///
    /// Returns `Ok(None)` at end of input. Invalid UTF-8 is reported as an
    /// I/O error carrying the number of the offending line.
    pub fn next_line(&mut self) -> OboResult<Option<(usize, String)>> {
        self.buffer.clear();

        match self.reader.read_line(&mut self.buffer) {
            Ok(0) => Ok(None),
            Ok(_) => {
                self.line_number += 1;

                if self.buffer.ends_with('\n') {
                    self.buffer.pop();
                    if self.buffer.ends_with('\r') {
                        self.buffer.pop();
                    }
                }

                Ok(Some((self.line_number, std::mem::take(&mut self.buffer))))
            }
            Err(source) => Err(OboError::Io {
                line: self.line_number + 1,
                source,
            }),
        }
    }
}

impl<R: Read> Iterator for LineReader<R> {
    type Item = OboResult<(usize, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}
