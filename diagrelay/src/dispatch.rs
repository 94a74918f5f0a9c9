//! Capability-fallback dispatch.
//!
//! One entry point per level and call shape. Each takes `Option<&S>` and is
//! a silent no-op for `None`; otherwise it offers the sink the call-site
//! hook, applies the sink's masks to the template and string arguments, and
//! routes to the best-matching sink method, synthesizing missing behavior
//! from whatever the sink does implement.
//!
//! The fallback priority is fixed and queried in the same order everywhere:
//! for located calls, located beats located-formatted beats plain; for
//! located-formatted calls, located-formatted beats located beats formatted
//! beats plain. The most specific facet a sink exposes always wins, so a
//! sink that wants full control over location rendering gets it, and plain
//! text concatenation happens only when nothing richer exists.
//!
//! No entry point returns a `Result`: dispatch either reaches a sink method
//! or does nothing, and a sink method that panics propagates unmodified.

use std::borrow::Cow;

use crate::arg::{Arg, join};
use crate::location::location_prefix;
use crate::mask::MaskSet;
use crate::render::{escape_braces, render};
use crate::sink::Sink;

fn offer_hook<S: Sink + ?Sized>(sink: &S) {
    if let Some(hook) = sink.as_hook() {
        hook.call_site();
    }
}

fn masked_text<'t>(masks: Option<&MaskSet>, text: &'t str) -> Cow<'t, str> {
    match masks {
        Some(masks) => masks.apply(text),
        None => Cow::Borrowed(text),
    }
}

fn masked_args<'s, 'a>(masks: Option<&MaskSet>, args: &'s [Arg<'a>]) -> Cow<'s, [Arg<'a>]> {
    match masks {
        Some(masks) if !masks.is_empty() => Cow::Owned(masks.apply_args(args)),
        _ => Cow::Borrowed(args),
    }
}

/// Prepends the location prefix as a leading argument, or returns the
/// arguments untouched when the prefix is empty for this location.
fn locate_args<'a>(file: &str, line: u32, col: u32, args: &[Arg<'a>]) -> Vec<Arg<'a>> {
    let loc = location_prefix(file, line, col);
    if loc.is_empty() {
        return args.to_vec();
    }
    let mut out = Vec::with_capacity(args.len() + 1);
    out.push(Arg::from(loc));
    out.extend(args.iter().cloned());
    out
}

/// Weaves the location prefix into a template, escaping braces so the
/// prefix is never reinterpreted as placeholders.
fn locate_template(file: &str, line: u32, col: u32, template: &str) -> String {
    let loc = location_prefix(file, line, col);
    if loc.is_empty() {
        return template.to_owned();
    }
    let mut out = escape_braces(&loc);
    out.push(' ');
    out.push_str(template);
    out
}

/// Emits a plain debug message, unless the sink is absent.
pub fn debug<S: Sink + ?Sized>(sink: Option<&S>, args: &[Arg<'_>]) {
    let Some(sink) = sink else { return };
    offer_hook(sink);
    let args = masked_args(sink.masks(), args);
    sink.debug(&args);
}

/// Emits a formatted debug message, unless the sink is absent.
///
/// Falls back to rendering locally and calling the plain method when the
/// sink has no formatted facet.
pub fn debugf<S: Sink + ?Sized>(sink: Option<&S>, template: &str, args: &[Arg<'_>]) {
    let Some(sink) = sink else { return };
    offer_hook(sink);
    let masks = sink.masks();
    let template = masked_text(masks, template);
    let args = masked_args(masks, args);
    if let Some(format) = sink.as_format() {
        format.debugf(&template, &args);
    } else {
        sink.debug(&[Arg::from(render(&template, &args))]);
    }
}

/// Emits a plain informational message, unless the sink is absent.
pub fn print<S: Sink + ?Sized>(sink: Option<&S>, args: &[Arg<'_>]) {
    let Some(sink) = sink else { return };
    offer_hook(sink);
    let args = masked_args(sink.masks(), args);
    sink.print(&args);
}

/// Emits a formatted informational message, unless the sink is absent.
pub fn printf<S: Sink + ?Sized>(sink: Option<&S>, template: &str, args: &[Arg<'_>]) {
    let Some(sink) = sink else { return };
    offer_hook(sink);
    let masks = sink.masks();
    let template = masked_text(masks, template);
    let args = masked_args(masks, args);
    if let Some(format) = sink.as_format() {
        format.printf(&template, &args);
    } else {
        sink.print(&[Arg::from(render(&template, &args))]);
    }
}

/// Emits a plain warning message, unless the sink is absent.
pub fn warning<S: Sink + ?Sized>(sink: Option<&S>, args: &[Arg<'_>]) {
    let Some(sink) = sink else { return };
    offer_hook(sink);
    let args = masked_args(sink.masks(), args);
    sink.warning(&args);
}

/// Emits a formatted warning message, unless the sink is absent.
pub fn warningf<S: Sink + ?Sized>(sink: Option<&S>, template: &str, args: &[Arg<'_>]) {
    let Some(sink) = sink else { return };
    offer_hook(sink);
    let masks = sink.masks();
    let template = masked_text(masks, template);
    let args = masked_args(masks, args);
    if let Some(format) = sink.as_format() {
        format.warningf(&template, &args);
    } else {
        sink.warning(&[Arg::from(render(&template, &args))]);
    }
}

/// Emits a warning tagged with a source location, unless the sink is absent.
///
/// Priority: the located facet with the masked arguments; else the
/// located-formatted facet with a `"{}"` template around the pre-joined
/// arguments, so location handling and the join both happen exactly once;
/// else the plain method with the location prefix prepended as a leading
/// argument (omitted entirely when the prefix is empty).
pub fn warning_at<S: Sink + ?Sized>(
    sink: Option<&S>,
    file: &str,
    line: u32,
    col: u32,
    args: &[Arg<'_>],
) {
    let Some(sink) = sink else { return };
    offer_hook(sink);
    let args = masked_args(sink.masks(), args);
    if let Some(located) = sink.as_located() {
        located.warning_at(file, line, col, &args);
    } else if let Some(located_format) = sink.as_located_format() {
        located_format.warning_atf(file, line, col, "{}", &[Arg::from(join(&args))]);
    } else {
        sink.warning(&locate_args(file, line, col, &args));
    }
}

/// Emits a formatted warning tagged with a source location, unless the sink
/// is absent.
///
/// Priority: the located-formatted facet with the masked template and
/// arguments; else the located facet with the locally rendered text as one
/// argument; else the formatted facet with the location prefix woven into
/// the template; else the plain method with the woven template rendered.
pub fn warning_atf<S: Sink + ?Sized>(
    sink: Option<&S>,
    file: &str,
    line: u32,
    col: u32,
    template: &str,
    args: &[Arg<'_>],
) {
    let Some(sink) = sink else { return };
    offer_hook(sink);
    let masks = sink.masks();
    let template = masked_text(masks, template);
    let args = masked_args(masks, args);
    if let Some(located_format) = sink.as_located_format() {
        located_format.warning_atf(file, line, col, &template, &args);
    } else if let Some(located) = sink.as_located() {
        located.warning_at(file, line, col, &[Arg::from(render(&template, &args))]);
    } else if let Some(format) = sink.as_format() {
        format.warningf(&locate_template(file, line, col, &template), &args);
    } else {
        sink.warning(&[Arg::from(render(
            &locate_template(file, line, col, &template),
            &args,
        ))]);
    }
}

/// Emits a plain error message, unless the sink is absent.
pub fn error<S: Sink + ?Sized>(sink: Option<&S>, args: &[Arg<'_>]) {
    let Some(sink) = sink else { return };
    offer_hook(sink);
    let args = masked_args(sink.masks(), args);
    sink.error(&args);
}

/// Emits a formatted error message, unless the sink is absent.
pub fn errorf<S: Sink + ?Sized>(sink: Option<&S>, template: &str, args: &[Arg<'_>]) {
    let Some(sink) = sink else { return };
    offer_hook(sink);
    let masks = sink.masks();
    let template = masked_text(masks, template);
    let args = masked_args(masks, args);
    if let Some(format) = sink.as_format() {
        format.errorf(&template, &args);
    } else {
        sink.error(&[Arg::from(render(&template, &args))]);
    }
}

/// Emits an error tagged with a source location, unless the sink is absent.
///
/// Same priority chain as [`warning_at`].
pub fn error_at<S: Sink + ?Sized>(
    sink: Option<&S>,
    file: &str,
    line: u32,
    col: u32,
    args: &[Arg<'_>],
) {
    let Some(sink) = sink else { return };
    offer_hook(sink);
    let args = masked_args(sink.masks(), args);
    if let Some(located) = sink.as_located() {
        located.error_at(file, line, col, &args);
    } else if let Some(located_format) = sink.as_located_format() {
        located_format.error_atf(file, line, col, "{}", &[Arg::from(join(&args))]);
    } else {
        sink.error(&locate_args(file, line, col, &args));
    }
}

/// Emits a formatted error tagged with a source location, unless the sink
/// is absent.
///
/// Same priority chain as [`warning_atf`].
pub fn error_atf<S: Sink + ?Sized>(
    sink: Option<&S>,
    file: &str,
    line: u32,
    col: u32,
    template: &str,
    args: &[Arg<'_>],
) {
    let Some(sink) = sink else { return };
    offer_hook(sink);
    let masks = sink.masks();
    let template = masked_text(masks, template);
    let args = masked_args(masks, args);
    if let Some(located_format) = sink.as_located_format() {
        located_format.error_atf(file, line, col, &template, &args);
    } else if let Some(located) = sink.as_located() {
        located.error_at(file, line, col, &[Arg::from(render(&template, &args))]);
    } else if let Some(format) = sink.as_format() {
        format.errorf(&locate_template(file, line, col, &template), &args);
    } else {
        sink.error(&[Arg::from(render(
            &locate_template(file, line, col, &template),
            &args,
        ))]);
    }
}
