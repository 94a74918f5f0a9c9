//! Grouped (indented) diagnostic output.

use crate::arg::Arg;
use crate::dispatch;
use crate::sink::{FormatSink, LocatedFormatSink, LocatedSink, Sink};

/// Runs `body` against a child view of `sink` whose output is nested one
/// level deeper.
///
/// A sink exposing the grouping facet owns the whole behavior. Otherwise
/// the title is emitted as `title:` through the dispatcher against the
/// original sink, and `body` receives a wrapper that indents plain calls by
/// a leading space argument and formatted calls by two literal spaces on
/// the template. Nesting groups wraps wrappers, compounding the indent by
/// one increment per level.
///
/// An absent sink still runs `body`, against a child view that emits
/// nothing.
///
/// It is not well-defined what happens if the original sink is used
/// directly during `body`.
pub fn group<S: Sink + ?Sized>(sink: Option<&S>, title: &str, mut body: impl FnMut(&dyn Sink)) {
    match sink {
        Some(sink) => {
            if let Some(grouping) = sink.as_group() {
                if let Some(hook) = sink.as_hook() {
                    hook.call_site();
                }
                grouping.group(title, &mut body);
                return;
            }
            // The title emission below offers the hook itself.
            dispatch::printf(Some(sink), "{}:", &[Arg::from(title)]);
            let parent: &dyn Sink = &sink;
            body(&Indented {
                parent: Some(parent),
            });
        }
        None => body(&Indented { parent: None }),
    }
}

/// One level of indentation over a parent sink.
///
/// Implements every per-level facet unconditionally and re-enters the
/// dispatcher with transformed arguments, so capability fallback happens
/// against the parent. Exposes neither a mask set nor a hook of its own:
/// the re-entered dispatch applies the parent's masks and offers the
/// parent's hook exactly once per emission.
struct Indented<'a> {
    parent: Option<&'a dyn Sink>,
}

fn indent_args<'a>(args: &[Arg<'a>]) -> Vec<Arg<'a>> {
    let mut out = Vec::with_capacity(args.len() + 1);
    out.push(Arg::from(" "));
    out.extend(args.iter().cloned());
    out
}

fn indent_template(template: &str) -> String {
    let mut out = String::with_capacity(template.len() + 2);
    out.push_str("  ");
    out.push_str(template);
    out
}

impl Sink for Indented<'_> {
    fn debug(&self, args: &[Arg<'_>]) {
        dispatch::debug(self.parent, &indent_args(args));
    }

    fn print(&self, args: &[Arg<'_>]) {
        dispatch::print(self.parent, &indent_args(args));
    }

    fn warning(&self, args: &[Arg<'_>]) {
        dispatch::warning(self.parent, &indent_args(args));
    }

    fn error(&self, args: &[Arg<'_>]) {
        dispatch::error(self.parent, &indent_args(args));
    }

    fn as_format(&self) -> Option<&dyn FormatSink> {
        Some(self)
    }

    fn as_located(&self) -> Option<&dyn LocatedSink> {
        Some(self)
    }

    fn as_located_format(&self) -> Option<&dyn LocatedFormatSink> {
        Some(self)
    }
}

impl FormatSink for Indented<'_> {
    fn debugf(&self, template: &str, args: &[Arg<'_>]) {
        dispatch::debugf(self.parent, &indent_template(template), args);
    }

    fn printf(&self, template: &str, args: &[Arg<'_>]) {
        dispatch::printf(self.parent, &indent_template(template), args);
    }

    fn warningf(&self, template: &str, args: &[Arg<'_>]) {
        dispatch::warningf(self.parent, &indent_template(template), args);
    }

    fn errorf(&self, template: &str, args: &[Arg<'_>]) {
        dispatch::errorf(self.parent, &indent_template(template), args);
    }
}

impl LocatedSink for Indented<'_> {
    fn warning_at(&self, file: &str, line: u32, col: u32, args: &[Arg<'_>]) {
        dispatch::warning_at(self.parent, file, line, col, &indent_args(args));
    }

    fn error_at(&self, file: &str, line: u32, col: u32, args: &[Arg<'_>]) {
        dispatch::error_at(self.parent, file, line, col, &indent_args(args));
    }
}

impl LocatedFormatSink for Indented<'_> {
    fn warning_atf(&self, file: &str, line: u32, col: u32, template: &str, args: &[Arg<'_>]) {
        dispatch::warning_atf(self.parent, file, line, col, &indent_template(template), args);
    }

    fn error_atf(&self, file: &str, line: u32, col: u32, template: &str, args: &[Arg<'_>]) {
        dispatch::error_atf(self.parent, file, line, col, &indent_template(template), args);
    }
}
