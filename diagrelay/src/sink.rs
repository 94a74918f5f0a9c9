//! Sink capability contracts.
//!
//! [`Sink`] is the minimal required contract: the four plain methods. Every
//! richer behavior is an optional facet trait, advertised through a query
//! method on `Sink` that defaults to `None`. The dispatcher never inspects a
//! sink any other way, so a type that implements a facet trait must also
//! override the matching `as_*` query to return `Some(self)`; otherwise the
//! facet stays invisible and the fallback chain synthesizes the behavior
//! from the plain methods.

use std::fmt;

use crate::arg::Arg;
use crate::mask::MaskSet;

// =============================================================================
// Level
// =============================================================================

/// Diagnostic severity classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Level {
    /// Developer-facing detail, often discarded in production sinks.
    Debug,
    /// Informational output.
    Print,
    /// A recoverable problem; supports location tagging.
    Warning,
    /// A failure; supports location tagging.
    Error,
}

impl Level {
    /// The lowercase display name of this level.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Print => "print",
            Level::Warning => "warning",
            Level::Error => "error",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Sink - the minimal required contract plus capability queries
// =============================================================================

/// A diagnostic destination.
///
/// Implementations must provide at least the four plain methods; it is
/// common for entry points to accept `Option<&dyn Sink>` and rely on the
/// dispatcher for everything richer. A sink may silently drop output;
/// delivery is not guaranteed by this contract.
///
/// # Advertising facets
///
/// ```
/// use diagrelay::{Arg, FormatSink, Sink, render};
///
/// struct Stamped;
///
/// impl Sink for Stamped {
///     fn debug(&self, _: &[Arg<'_>]) {}
///     fn print(&self, _: &[Arg<'_>]) {}
///     fn warning(&self, _: &[Arg<'_>]) {}
///     fn error(&self, _: &[Arg<'_>]) {}
///
///     // Without this override the dispatcher would never find `FormatSink`.
///     fn as_format(&self) -> Option<&dyn FormatSink> {
///         Some(self)
///     }
/// }
///
/// impl FormatSink for Stamped {
///     fn debugf(&self, template: &str, args: &[Arg<'_>]) {
///         let _line = render(template, args);
///     }
///     fn printf(&self, _: &str, _: &[Arg<'_>]) {}
///     fn warningf(&self, _: &str, _: &[Arg<'_>]) {}
///     fn errorf(&self, _: &str, _: &[Arg<'_>]) {}
/// }
/// ```
pub trait Sink {
    /// Emits a plain debug message.
    fn debug(&self, args: &[Arg<'_>]);
    /// Emits a plain informational message.
    fn print(&self, args: &[Arg<'_>]);
    /// Emits a plain warning message.
    fn warning(&self, args: &[Arg<'_>]);
    /// Emits a plain error message.
    fn error(&self, args: &[Arg<'_>]);

    /// The formatted facet, when implemented.
    fn as_format(&self) -> Option<&dyn FormatSink> {
        None
    }

    /// The located facet, when implemented.
    fn as_located(&self) -> Option<&dyn LocatedSink> {
        None
    }

    /// The located-formatted facet, when implemented.
    fn as_located_format(&self) -> Option<&dyn LocatedFormatSink> {
        None
    }

    /// The grouping facet, when implemented.
    fn as_group(&self) -> Option<&dyn GroupSink> {
        None
    }

    /// The self-redaction facet, when implemented.
    ///
    /// A sink exposing this owns all substitution; the dispatcher defers
    /// entirely and never applies its own masking for it.
    fn as_redacting(&self) -> Option<&dyn RedactingSink> {
        None
    }

    /// The advisory call-site elision hook, when implemented.
    fn as_hook(&self) -> Option<&dyn CallSiteHook> {
        None
    }

    /// Mask entries the dispatcher applies before reaching this sink.
    ///
    /// Only [`Masked`](crate::Masked) wrappers return anything here; plain
    /// sinks are unmasked and self-redacting sinks keep full control.
    fn masks(&self) -> Option<&MaskSet> {
        None
    }
}

impl<S: Sink + ?Sized> Sink for &S {
    fn debug(&self, args: &[Arg<'_>]) {
        (**self).debug(args);
    }

    fn print(&self, args: &[Arg<'_>]) {
        (**self).print(args);
    }

    fn warning(&self, args: &[Arg<'_>]) {
        (**self).warning(args);
    }

    fn error(&self, args: &[Arg<'_>]) {
        (**self).error(args);
    }

    fn as_format(&self) -> Option<&dyn FormatSink> {
        (**self).as_format()
    }

    fn as_located(&self) -> Option<&dyn LocatedSink> {
        (**self).as_located()
    }

    fn as_located_format(&self) -> Option<&dyn LocatedFormatSink> {
        (**self).as_located_format()
    }

    fn as_group(&self) -> Option<&dyn GroupSink> {
        (**self).as_group()
    }

    fn as_redacting(&self) -> Option<&dyn RedactingSink> {
        (**self).as_redacting()
    }

    fn as_hook(&self) -> Option<&dyn CallSiteHook> {
        (**self).as_hook()
    }

    fn masks(&self) -> Option<&MaskSet> {
        (**self).masks()
    }
}

// =============================================================================
// Optional facets
// =============================================================================

/// Formatted emission: the sink receives the template and arguments
/// unrendered and controls its own text assembly.
pub trait FormatSink {
    /// Emits a formatted debug message.
    fn debugf(&self, template: &str, args: &[Arg<'_>]);
    /// Emits a formatted informational message.
    fn printf(&self, template: &str, args: &[Arg<'_>]);
    /// Emits a formatted warning message.
    fn warningf(&self, template: &str, args: &[Arg<'_>]);
    /// Emits a formatted error message.
    fn errorf(&self, template: &str, args: &[Arg<'_>]);
}

/// Located emission: the sink receives the raw `(file, line, col)` triple
/// and controls its own location rendering. Only warning and error carry
/// locations; debug and print have no located variants.
pub trait LocatedSink {
    /// Emits a warning tagged with a source location.
    fn warning_at(&self, file: &str, line: u32, col: u32, args: &[Arg<'_>]);
    /// Emits an error tagged with a source location.
    fn error_at(&self, file: &str, line: u32, col: u32, args: &[Arg<'_>]);
}

/// Located, formatted emission. The most specific facet; preferred over
/// every other for located call shapes.
pub trait LocatedFormatSink {
    /// Emits a formatted warning tagged with a source location.
    fn warning_atf(&self, file: &str, line: u32, col: u32, template: &str, args: &[Arg<'_>]);
    /// Emits a formatted error tagged with a source location.
    fn error_atf(&self, file: &str, line: u32, col: u32, template: &str, args: &[Arg<'_>]);
}

/// Grouped emission: the sink owns the entire grouping behavior, including
/// title rendering, nesting, and the child sink handed to `body`.
pub trait GroupSink {
    /// Runs `body` against a child view of this sink.
    fn group(&self, title: &str, body: &mut dyn FnMut(&dyn Sink));
}

/// Self-implemented redaction. The sink owns substitution of registered
/// values; dispatcher-side masking is disabled for it.
pub trait RedactingSink {
    /// Registers a sensitive value for substitution.
    fn mask_value(&self, value: &str);
}

/// Advisory call-site elision hook.
///
/// Host frameworks that attribute output to call sites can use this to
/// exclude this crate's frames. The dispatcher invokes it before every
/// emission on sinks that expose it; it has no return value and failure to
/// expose it changes nothing.
pub trait CallSiteHook {
    /// Marks the current frame as library plumbing.
    fn call_site(&self);
}

/// Marker for sinks implementing every facet except the call-site hook.
///
/// Blanket-implemented, so it is primarily useful as a compile-time
/// completeness check:
///
/// ```ignore
/// fn assert_full<T: FullSink>() {}
/// assert_full::<MyCompleteSink>();
/// ```
///
/// New facets may be added to this bound at any point, so depending on it
/// outside of tests confers no compatibility guarantee.
pub trait FullSink:
    Sink + FormatSink + LocatedSink + LocatedFormatSink + GroupSink + RedactingSink
{
}

impl<T> FullSink for T where
    T: Sink + FormatSink + LocatedSink + LocatedFormatSink + GroupSink + RedactingSink
{
}

/// Typed absent-sink sentinel.
///
/// Passing `NONE` to any dispatch entry point is a silent no-op, mirroring a
/// caller that has no diagnostic destination at all.
pub const NONE: Option<&'static dyn Sink> = None;
