//! Runtime template rendering for the formatted call shapes.
//!
//! Templates use the ambient Rust convention: `{}` consumes the next
//! argument, `{:?}` consumes the next argument debug-quoted, and `{{` / `}}`
//! are literal braces. Rendering is total; it never validates and never
//! fails (see [`render`] for the degenerate cases).

use std::fmt::Write;

use crate::arg::Arg;

/// Inline marker produced for a placeholder with no remaining argument.
pub const MISSING_MARKER: &str = "{missing}";

/// Renders `template` over `args`.
///
/// Placeholders with no remaining argument produce [`MISSING_MARKER`] in the
/// output, surplus arguments are appended space-separated after the rendered
/// text, and any brace sequence that is not a recognized placeholder is
/// emitted verbatim. `{:?}` quotes string arguments; non-string arguments
/// render as their captured `Display` text either way.
#[must_use]
pub fn render(template: &str, args: &[Arg<'_>]) -> String {
    let bytes = template.as_bytes();
    let mut out = String::with_capacity(template.len() + 8 * args.len());
    let mut next = 0usize;
    let mut i = 0usize;
    while i < bytes.len() {
        match bytes[i] {
            b'{' if bytes.get(i + 1) == Some(&b'{') => {
                out.push('{');
                i += 2;
            }
            b'{' if bytes.get(i + 1) == Some(&b'}') => {
                push_arg(&mut out, args.get(next), false);
                next += 1;
                i += 2;
            }
            b'{' if template[i..].starts_with("{:?}") => {
                push_arg(&mut out, args.get(next), true);
                next += 1;
                i += 4;
            }
            b'}' if bytes.get(i + 1) == Some(&b'}') => {
                out.push('}');
                i += 2;
            }
            _ => {
                // Copy the literal run up to the next brace.
                let start = i;
                i += 1;
                while i < bytes.len() && bytes[i] != b'{' && bytes[i] != b'}' {
                    i += 1;
                }
                out.push_str(&template[start..i]);
            }
        }
    }
    for arg in args.iter().skip(next) {
        out.push(' ');
        out.push_str(arg.as_str());
    }
    out
}

fn push_arg(out: &mut String, arg: Option<&Arg<'_>>, debug: bool) {
    match arg {
        None => out.push_str(MISSING_MARKER),
        Some(Arg::Str(text)) if debug => {
            let _ = write!(out, "{text:?}");
        }
        Some(arg) => out.push_str(arg.as_str()),
    }
}

/// Escapes braces so `text` survives template rendering verbatim.
///
/// Used when the dispatcher weaves a location prefix into a caller-supplied
/// template; without escaping, a path containing braces would be
/// reinterpreted as placeholders.
#[must_use]
pub(crate) fn escape_braces(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '{' => out.push_str("{{"),
            '}' => out.push_str("}}"),
            _ => out.push(ch),
        }
    }
    out
}
