//! Stream-backed sinks.
//!
//! [`WriterSink`] is the trivial way to point diagnostics at stdout, stderr,
//! or any other `io::Write` stream from a `main` or a test. [`RoutedSink`]
//! sends each level to its own stream. Both implement the minimal contract
//! only; richer call shapes reach them through dispatcher fallback.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use crate::arg::{Arg, join};
use crate::sink::Sink;

// One write call per line, so prefixing wrappers see whole lines.
fn emit<W: io::Write>(out: &Mutex<W>, args: &[Arg<'_>]) {
    let mut line = join(args);
    line.push('\n');
    let mut out = out.lock().unwrap_or_else(PoisonError::into_inner);
    let _ = out.write_all(line.as_bytes());
}

/// Writes one line per emission to an `io::Write` stream.
///
/// Write failures are swallowed: delivery is best-effort by contract, and a
/// diagnostics channel that panics on a closed pipe would be worse than one
/// that goes quiet.
pub struct WriterSink<W> {
    out: Mutex<W>,
    debug: bool,
}

impl<W: io::Write> WriterSink<W> {
    /// Sends print, warning, and error output to `out`; discards debug.
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            debug: false,
        }
    }

    /// Sends all four levels to `out`.
    pub fn with_debug(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            debug: true,
        }
    }

    /// Unwraps the underlying stream.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: io::Write> Sink for WriterSink<W> {
    fn debug(&self, args: &[Arg<'_>]) {
        if self.debug {
            emit(&self.out, args);
        }
    }

    fn print(&self, args: &[Arg<'_>]) {
        emit(&self.out, args);
    }

    fn warning(&self, args: &[Arg<'_>]) {
        emit(&self.out, args);
    }

    fn error(&self, args: &[Arg<'_>]) {
        emit(&self.out, args);
    }
}

/// Routes each level to its own `io::Write` stream.
///
/// The streams may be of different types, so a level can be discarded by
/// passing [`io::sink()`] and a shared stream can carry several levels
/// distinguishably through [`PrefixWriter`] markers:
///
/// ```
/// use std::io;
/// use diagrelay::{PrefixWriter, RoutedSink};
///
/// let log = RoutedSink::new(
///     PrefixWriter::new(io::stderr(), "E:"),
///     PrefixWriter::new(io::stderr(), "W:"),
///     io::stdout(),
///     io::sink(),
/// );
/// ```
///
/// Write failures are swallowed, as with [`WriterSink`].
pub struct RoutedSink<E, W, P, D> {
    errors: Mutex<E>,
    warnings: Mutex<W>,
    prints: Mutex<P>,
    debugs: Mutex<D>,
}

impl<E, W, P, D> RoutedSink<E, W, P, D>
where
    E: io::Write,
    W: io::Write,
    P: io::Write,
    D: io::Write,
{
    /// Sends each level to its respective stream.
    pub fn new(errors: E, warnings: W, prints: P, debugs: D) -> Self {
        Self {
            errors: Mutex::new(errors),
            warnings: Mutex::new(warnings),
            prints: Mutex::new(prints),
            debugs: Mutex::new(debugs),
        }
    }

    /// Unwraps the streams, in `(errors, warnings, prints, debugs)` order.
    #[must_use]
    pub fn into_parts(self) -> (E, W, P, D) {
        (
            self.errors.into_inner().unwrap_or_else(PoisonError::into_inner),
            self.warnings
                .into_inner()
                .unwrap_or_else(PoisonError::into_inner),
            self.prints.into_inner().unwrap_or_else(PoisonError::into_inner),
            self.debugs.into_inner().unwrap_or_else(PoisonError::into_inner),
        )
    }
}

impl<E, W, P, D> Sink for RoutedSink<E, W, P, D>
where
    E: io::Write,
    W: io::Write,
    P: io::Write,
    D: io::Write,
{
    fn debug(&self, args: &[Arg<'_>]) {
        emit(&self.debugs, args);
    }

    fn print(&self, args: &[Arg<'_>]) {
        emit(&self.prints, args);
    }

    fn warning(&self, args: &[Arg<'_>]) {
        emit(&self.warnings, args);
    }

    fn error(&self, args: &[Arg<'_>]) {
        emit(&self.errors, args);
    }
}

/// Prefixes every non-empty write with a fixed marker and a space.
///
/// Lets a single stream serve several distinguishable destinations; see
/// [`RoutedSink`] for the typical combination. The reported write length
/// covers the caller's bytes only, not the prefix, so wrapped writers see
/// the counts they expect.
pub struct PrefixWriter<W> {
    inner: W,
    prefix: String,
}

impl<W: io::Write> PrefixWriter<W> {
    /// Wraps `inner`, prefixing each write with `prefix`.
    pub fn new(inner: W, prefix: impl Into<String>) -> Self {
        Self {
            inner,
            prefix: prefix.into(),
        }
    }

    /// Unwraps the underlying stream.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: io::Write> io::Write for PrefixWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !buf.is_empty() {
            self.inner.write_all(self.prefix.as_bytes())?;
            self.inner.write_all(b" ")?;
            self.inner.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::io::{self, Write};
    use std::rc::Rc;

    use super::{PrefixWriter, RoutedSink, WriterSink};
    use crate::args;
    use crate::sink::Sink;

    /// A cloneable handle to one buffer, standing in for a shared stream.
    #[derive(Clone, Default)]
    struct Shared(Rc<RefCell<Vec<u8>>>);

    impl Write for Shared {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn writes_one_line_per_emission() {
        let sink = WriterSink::new(Vec::new());
        sink.print(args!["a", "b", 2, 3]);
        sink.error(args!["boom"]);
        assert_eq!(sink.into_inner(), b"a b 2 3\nboom\n");
    }

    #[test]
    fn debug_discarded_unless_enabled() {
        let quiet = WriterSink::new(Vec::new());
        quiet.debug(args!["hidden"]);
        assert!(quiet.into_inner().is_empty());

        let loud = WriterSink::with_debug(Vec::new());
        loud.debug(args!["shown"]);
        assert_eq!(loud.into_inner(), b"shown\n");
    }

    #[test]
    fn routed_levels_reach_their_own_streams() {
        let sink = RoutedSink::new(Vec::new(), Vec::new(), Vec::new(), Vec::new());
        sink.error(args!["e"]);
        sink.warning(args!["w"]);
        sink.print(args!["p"]);
        sink.debug(args!["d"]);
        let (errors, warnings, prints, debugs) = sink.into_parts();
        assert_eq!(errors, b"e\n");
        assert_eq!(warnings, b"w\n");
        assert_eq!(prints, b"p\n");
        assert_eq!(debugs, b"d\n");
    }

    #[test]
    fn prefixes_distinguish_levels_on_one_stream() {
        let stream = Shared::default();
        let sink = RoutedSink::new(
            PrefixWriter::new(stream.clone(), "E:"),
            PrefixWriter::new(stream.clone(), "W:"),
            PrefixWriter::new(stream.clone(), "P:"),
            io::sink(),
        );
        sink.error(args!["boom"]);
        sink.warning(args!["careful"]);
        sink.print(args!["hello"]);
        sink.debug(args!["hidden"]);
        assert_eq!(stream.0.borrow().as_slice(), b"E: boom\nW: careful\nP: hello\n");
    }

    #[test]
    fn prefix_skips_empty_writes() {
        let mut writer = PrefixWriter::new(Vec::new(), "p::");
        assert_eq!(writer.write(b"").unwrap(), 0);
        assert_eq!(writer.write(b"abc\n").unwrap(), 4);
        assert_eq!(writer.into_inner(), b"p:: abc\n");
    }
}
