//! Asynchronous streaming of OBO terms.
//!
//! The parser runs on a tokio blocking task and publishes each finished
//! term into a bounded channel. No hierarchy is built; callers that need
//! one can derive it from [`OboTerm::is_a`].

use std::io::Read;

use obo_types::OboTerm;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::parser::TermParser;
use crate::types::{OboConfig, OboError, OboResult};

/// Starts parsing `input` in the background and returns the live stream
/// of terms.
///
/// Must be called from within a tokio runtime. The producer waits while
/// the channel is full and stops when the stream is dropped.
///
/// # Example
///
/// ```
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// use obo_loader::{parse_to_stream, OboConfig};
/// use std::io::Cursor;
///
/// let input = Cursor::new("[Term]\nid: A:1\n[Term]\nid: A:2\n");
/// let mut stream = parse_to_stream(input, OboConfig::default());
///
/// while let Some(term) = stream.next_term().await {
///     println!("{}", term.unwrap().id);
/// }
/// # }
/// ```
pub fn parse_to_stream<R>(input: R, config: OboConfig) -> OboStream
where
    R: Read + Send + 'static,
{
    let (sender, receiver) = mpsc::channel(config.effective_capacity());

    let worker = tokio::task::spawn_blocking(move || {
        for item in TermParser::new(input, config) {
            let failed = item.is_err();
            if sender.blocking_send(item).is_err() {
                debug!("OBO stream dropped, stopping parser");
                return;
            }
            if failed {
                return;
            }
        }
    });

    OboStream {
        receiver,
        worker: Some(worker),
    }
}

/// An ordered, finite stream of parsed terms.
///
/// Yields terms in file order and then `None`. If parsing fails, the
/// error is the last item before `None`; terms received earlier remain
/// valid.
#[derive(Debug)]
pub struct OboStream {
    receiver: mpsc::Receiver<OboResult<OboTerm>>,
    worker: Option<JoinHandle<()>>,
}

impl OboStream {
    /// Waits for the next term.
    pub async fn next_term(&mut self) -> Option<OboResult<OboTerm>> {
        if let Some(item) = self.receiver.recv().await {
            return Some(item);
        }

        // Channel closed: the producer finished or panicked.
        let worker = self.worker.take()?;
        match worker.await {
            Err(e) if e.is_panic() => Some(Err(OboError::WorkerPanicked)),
            _ => None,
        }
    }

    /// Drains the stream into a Vec, stopping at the first error.
    pub async fn collect_terms(mut self) -> OboResult<Vec<OboTerm>> {
        let mut terms = Vec::new();
        while let Some(item) = self.next_term().await {
            terms.push(item?);
        }
        Ok(terms)
    }

    /// Returns the underlying channel receiver.
    ///
    /// A panic of the producer then shows up only as an early close.
    pub fn into_receiver(self) -> mpsc::Receiver<OboResult<OboTerm>> {
        self.receiver
    }
}
