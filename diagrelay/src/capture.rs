//! In-memory capture sink for tests and examples.

use std::sync::{Mutex, PoisonError};

use crate::arg::{Arg, join};
use crate::sink::{Level, Sink};

/// A minimal-contract sink that records every emission.
///
/// Implements only the four plain methods, which makes it both the
/// reference fixture for the backward-compatibility guarantee (every
/// richer call shape must degrade to these losslessly) and a convenient
/// assertion target.
///
/// ```
/// use diagrelay::{self as diag, CaptureSink, Level, args};
///
/// let sink = CaptureSink::new();
/// diag::warningf(Some(&sink), "{} retries left", args![3]);
/// assert_eq!(sink.last(), Some((Level::Warning, "3 retries left".into())));
/// ```
#[derive(Debug, Default)]
pub struct CaptureSink {
    lines: Mutex<Vec<(Level, String)>>,
}

impl CaptureSink {
    /// Creates an empty capture sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, level: Level, args: &[Arg<'_>]) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((level, join(args)));
    }

    /// Recorded `(level, line)` pairs, oldest first.
    #[must_use]
    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Takes all recorded lines, leaving the sink empty.
    #[must_use]
    pub fn take(&self) -> Vec<(Level, String)> {
        std::mem::take(&mut *self.lines.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// The most recent line, if any.
    #[must_use]
    pub fn last(&self) -> Option<(Level, String)> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Sink for CaptureSink {
    fn debug(&self, args: &[Arg<'_>]) {
        self.record(Level::Debug, args);
    }

    fn print(&self, args: &[Arg<'_>]) {
        self.record(Level::Print, args);
    }

    fn warning(&self, args: &[Arg<'_>]) {
        self.record(Level::Warning, args);
    }

    fn error(&self, args: &[Arg<'_>]) {
        self.record(Level::Error, args);
    }
}

#[cfg(test)]
mod tests {
    use super::CaptureSink;
    use crate::args;
    use crate::sink::{Level, Sink};

    #[test]
    fn records_in_emission_order() {
        let sink = CaptureSink::new();
        sink.debug(args!["first"]);
        sink.error(args!["second"]);
        assert_eq!(
            sink.lines(),
            vec![
                (Level::Debug, "first".to_string()),
                (Level::Error, "second".to_string()),
            ]
        );
    }

    #[test]
    fn take_drains() {
        let sink = CaptureSink::new();
        sink.print(args!["once"]);
        assert_eq!(sink.take().len(), 1);
        assert!(sink.take().is_empty());
        assert_eq!(sink.last(), None);
    }
}
