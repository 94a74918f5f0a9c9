//! Value masking bound to a sink's lifetime.
//!
//! There is no global registry: [`Masked`] bundles a sink with its own
//! [`MaskSet`], so masking state and sink share one lifetime and concurrent
//! emitters never contend on shared mutable state. The dispatcher discovers
//! the set through [`Sink::masks`] and applies it to format templates and
//! string arguments before capability dispatch; non-string arguments and
//! file names are never masked.

use std::borrow::Cow;

use regex::Regex;

use crate::arg::Arg;
use crate::error::Error;
use crate::sink::{
    CallSiteHook, FormatSink, GroupSink, LocatedFormatSink, LocatedSink, RedactingSink, Sink,
};

/// Replacement token substituted for registered mask values.
pub const MASK_TOKEN: &str = "***";

// =============================================================================
// MaskSet - ordered values plus the compiled replacer over them
// =============================================================================

/// An ordered set of sensitive values and the compiled replacer over them.
#[derive(Clone, Debug, Default)]
pub struct MaskSet {
    values: Vec<String>,
    replacer: Option<Regex>,
}

impl MaskSet {
    /// Creates an empty set; [`apply`](Self::apply) is the identity until a
    /// value is registered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a sensitive value.
    ///
    /// Replacement is literal, non-overlapping substring substitution, and
    /// earlier-registered values win at the same position, so registration
    /// order matters when one value is a prefix of another. The replacer is
    /// recompiled eagerly, so application never observes a stale rule set.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyMaskValue`] for an empty value, [`Error::MaskCompile`]
    /// when the accumulated pattern no longer compiles; the set is left
    /// unchanged on failure.
    pub fn add(&mut self, value: impl Into<String>) -> Result<(), Error> {
        let value = value.into();
        if value.is_empty() {
            return Err(Error::EmptyMaskValue);
        }
        self.values.push(value);
        match self.compile() {
            Ok(replacer) => {
                self.replacer = Some(replacer);
                Ok(())
            }
            Err(err) => {
                self.values.pop();
                Err(err.into())
            }
        }
    }

    // The regex crate's alternation is leftmost-first, which is exactly the
    // registration-order preference the contract requires.
    fn compile(&self) -> Result<Regex, regex::Error> {
        let pattern = self
            .values
            .iter()
            .map(|value| regex::escape(value))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&pattern)
    }

    /// Whether no value has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Applies the replacer to one string; identity when the set is empty.
    #[must_use]
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        match &self.replacer {
            Some(replacer) => replacer.replace_all(text, MASK_TOKEN),
            None => Cow::Borrowed(text),
        }
    }

    /// Applies the replacer to each string argument, returning a new
    /// sequence; non-string arguments pass through unchanged. Caller-owned
    /// storage is never mutated.
    #[must_use]
    pub fn apply_args<'a>(&self, args: &[Arg<'a>]) -> Vec<Arg<'a>> {
        args.iter()
            .map(|arg| match arg {
                Arg::Str(text) => match self.apply(text) {
                    Cow::Owned(masked) => Arg::Str(Cow::Owned(masked)),
                    Cow::Borrowed(_) => arg.clone(),
                },
                Arg::Value(_) => arg.clone(),
            })
            .collect()
    }
}

// =============================================================================
// Masked - a sink bundled with the mask set that redacts its output
// =============================================================================

/// A sink bundled with the mask set that redacts its output.
///
/// Returned from [`mask_value`]; every capability query forwards to the
/// wrapped sink, so a `Masked<S>` dispatches exactly like `S` except that
/// the dispatcher sees its mask set. Wrapping an already masked sink chains
/// the sets: the first registration on the outer wrapper absorbs the inner
/// values, so both keep applying with inner (earlier) registrations taking
/// precedence.
pub struct Masked<S> {
    sink: S,
    masks: MaskSet,
}

impl<S: Sink> Masked<S> {
    /// Wraps `sink` with an empty mask set.
    #[must_use]
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            masks: MaskSet::new(),
        }
    }

    /// Registers a sensitive value.
    ///
    /// When the wrapped sink redacts for itself, registration is delegated
    /// entirely and the dispatcher-side set stays empty.
    ///
    /// # Errors
    ///
    /// Propagates [`MaskSet::add`] failures; self-redacting delegation is
    /// infallible.
    pub fn mask_value(&mut self, value: &str) -> Result<(), Error> {
        if let Some(redacting) = self.sink.as_redacting() {
            redacting.mask_value(value);
            return Ok(());
        }
        // Absorb an inner wrapper's values before the first own entry, so
        // nested wrappers chain instead of shadowing. The inner sink is
        // owned, so its set cannot change afterwards.
        if self.masks.is_empty() {
            if let Some(inner) = self.sink.masks() {
                self.masks = inner.clone();
            }
        }
        self.masks.add(value)
    }

    /// The wrapped sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Unwraps, discarding the mask set.
    #[must_use]
    pub fn into_inner(self) -> S {
        self.sink
    }
}

impl<S: Sink> Sink for Masked<S> {
    fn debug(&self, args: &[Arg<'_>]) {
        self.sink.debug(args);
    }

    fn print(&self, args: &[Arg<'_>]) {
        self.sink.print(args);
    }

    fn warning(&self, args: &[Arg<'_>]) {
        self.sink.warning(args);
    }

    fn error(&self, args: &[Arg<'_>]) {
        self.sink.error(args);
    }

    fn as_format(&self) -> Option<&dyn FormatSink> {
        self.sink.as_format()
    }

    fn as_located(&self) -> Option<&dyn LocatedSink> {
        self.sink.as_located()
    }

    fn as_located_format(&self) -> Option<&dyn LocatedFormatSink> {
        self.sink.as_located_format()
    }

    fn as_group(&self) -> Option<&dyn GroupSink> {
        self.sink.as_group()
    }

    fn as_redacting(&self) -> Option<&dyn RedactingSink> {
        self.sink.as_redacting()
    }

    fn as_hook(&self) -> Option<&dyn CallSiteHook> {
        self.sink.as_hook()
    }

    fn masks(&self) -> Option<&MaskSet> {
        if self.masks.is_empty() {
            self.sink.masks()
        } else {
            Some(&self.masks)
        }
    }
}

/// Registers `value` as sensitive for `sink`, wrapping it.
///
/// The wrapper is required thereafter for masked emission; a sink reference
/// held elsewhere is not affected. Additional values accumulate through
/// [`Masked::mask_value`].
///
/// # Errors
///
/// Propagates [`MaskSet::add`] failures.
pub fn mask_value<S: Sink>(sink: S, value: &str) -> Result<Masked<S>, Error> {
    let mut masked = Masked::new(sink);
    masked.mask_value(value)?;
    Ok(masked)
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::{MASK_TOKEN, MaskSet};
    use crate::arg::Arg;
    use crate::args;
    use crate::error::Error;

    #[test]
    fn empty_set_is_identity() {
        let masks = MaskSet::new();
        assert!(matches!(masks.apply("abc"), Cow::Borrowed("abc")));
    }

    #[test]
    fn replaces_every_occurrence() {
        let mut masks = MaskSet::new();
        masks.add("abc").unwrap();
        assert_eq!(masks.apply("abc abc"), "*** ***");
        assert_eq!(masks.apply("xabcx"), format!("x{MASK_TOKEN}x"));
    }

    #[test]
    fn earlier_registration_wins_on_overlap() {
        let mut masks = MaskSet::new();
        masks.add("ab").unwrap();
        masks.add("abcd").unwrap();
        // "ab" was registered first, so it claims the shared prefix.
        assert_eq!(masks.apply("abcd"), "***cd");

        let mut masks = MaskSet::new();
        masks.add("abcd").unwrap();
        masks.add("ab").unwrap();
        assert_eq!(masks.apply("abcd"), "***");
    }

    #[test]
    fn values_are_literal_not_patterns() {
        let mut masks = MaskSet::new();
        masks.add("a.c").unwrap();
        assert_eq!(masks.apply("abc a.c"), "abc ***");
    }

    #[test]
    fn args_mask_strings_only() {
        let mut masks = MaskSet::new();
        masks.add("abc").unwrap();
        let masked = masks.apply_args(args!["a", "b", "c", "abc", 2]);
        assert_eq!(
            masked,
            vec![
                Arg::from("a"),
                Arg::from("b"),
                Arg::from("c"),
                Arg::from(MASK_TOKEN.to_string()),
                Arg::from(2),
            ]
        );
    }

    #[test]
    fn empty_value_is_rejected() {
        let mut masks = MaskSet::new();
        assert!(matches!(masks.add(""), Err(Error::EmptyMaskValue)));
        assert!(masks.is_empty());
    }
}
