//! Loader-specific types for OBO file processing.

use thiserror::Error;

/// Errors that can occur during OBO parsing.
#[derive(Error, Debug)]
pub enum OboError {
    /// I/O error reading the input.
    #[error("IO error reading OBO input at line {line}: {source}")]
    Io {
        /// The 1-based line number being read.
        line: usize,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A field line inside a `[Term]` stanza without the `tag: value` shape.
    #[error("Malformed line {line}: {content:?} (expected 'tag: value')")]
    MalformedLine {
        /// The 1-based line number.
        line: usize,
        /// The raw line text.
        content: String,
    },

    /// The parse worker panicked before closing its channel.
    #[error("OBO parse worker terminated unexpectedly")]
    WorkerPanicked,
}

impl OboError {
    /// Returns the line number the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Io { line, .. } | Self::MalformedLine { line, .. } => Some(*line),
            Self::WorkerPanicked => None,
        }
    }
}

/// Result type for OBO operations.
pub type OboResult<T> = Result<T, OboError>;

/// What to do with a malformed field line inside a `[Term]` stanza.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Stop parsing and report [`OboError::MalformedLine`].
    #[default]
    Abort,
    /// Log a warning, leave the current term untouched and continue.
    Skip,
}

/// Configuration for OBO parsing.
#[derive(Debug, Clone)]
pub struct OboConfig {
    /// Capacity of the bounded channel between the parser and its consumer.
    pub channel_capacity: usize,
    /// Handling of malformed field lines.
    pub malformed: MalformedPolicy,
    /// Emit a progress event every this many lines (0 disables).
    pub progress_interval: usize,
}

impl Default for OboConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 100,
            malformed: MalformedPolicy::Abort,
            progress_interval: 1_000_000,
        }
    }
}

impl OboConfig {
    /// Creates a config that skips malformed lines instead of failing.
    pub fn lenient() -> Self {
        Self {
            malformed: MalformedPolicy::Skip,
            ..Self::default()
        }
    }

    /// Channel capacity clamped to at least one slot.
    pub(crate) fn effective_capacity(&self) -> usize {
        self.channel_capacity.max(1)
    }
}

/// Statistics from parsing an OBO input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Total lines read from the input.
    pub lines_read: usize,
    /// Terms emitted by the parser.
    pub terms_emitted: usize,
    /// Emitted terms flagged obsolete.
    pub obsolete_terms: usize,
    /// Malformed lines skipped under [`MalformedPolicy::Skip`].
    pub skipped_lines: usize,
    /// Time taken to parse in milliseconds.
    pub parse_time_ms: u64,
}

impl ParseStats {
    /// Returns the percentage of emitted terms that are obsolete.
    pub fn obsolete_rate(&self) -> f64 {
        if self.terms_emitted == 0 {
            0.0
        } else {
            (self.obsolete_terms as f64 / self.terms_emitted as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obo_config_default() {
        let config = OboConfig::default();
        assert_eq!(config.channel_capacity, 100);
        assert_eq!(config.malformed, MalformedPolicy::Abort);
        assert_eq!(config.progress_interval, 1_000_000);
    }

    #[test]
    fn test_lenient_config() {
        let config = OboConfig::lenient();
        assert_eq!(config.malformed, MalformedPolicy::Skip);
        assert_eq!(config.channel_capacity, 100);
    }

    #[test]
    fn test_effective_capacity_clamped() {
        let config = OboConfig {
            channel_capacity: 0,
            ..Default::default()
        };
        assert_eq!(config.effective_capacity(), 1);
    }

    #[test]
    fn test_error_line() {
        let err = OboError::MalformedLine {
            line: 12,
            content: "oops".to_string(),
        };
        assert_eq!(err.line(), Some(12));
        assert!(err.to_string().contains("line 12"));
        assert_eq!(OboError::WorkerPanicked.line(), None);
    }

    #[test]
    fn test_parse_stats_obsolete_rate() {
        let stats = ParseStats {
            terms_emitted: 10,
            obsolete_terms: 2,
            ..Default::default()
        };
        assert!((stats.obsolete_rate() - 20.0).abs() < 0.01);
        assert_eq!(ParseStats::default().obsolete_rate(), 0.0);
    }
}
