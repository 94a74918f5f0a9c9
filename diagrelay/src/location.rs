//! Location prefix formatting with a process-wide override slot.

use std::fmt::Write;
use std::sync::OnceLock;

use crate::error::Error;

/// Signature of a location prefix formatter.
///
/// The first empty or zero value of `file`, `line`, and `col` indicates the
/// rest should also be ignored; custom formatters are expected to honor
/// this, but it is not enforced.
pub type LocationFormat = fn(file: &str, line: u32, col: u32) -> String;

static FORMAT: OnceLock<LocationFormat> = OnceLock::new();

/// Formats a location as `[file]`, `[file:line]`, or `[file:line.col]`.
///
/// Returns an empty string when `file` is empty, even if line or column are
/// set: a column is meaningless without a line, and a line is meaningless
/// without a file, so rendering stops at the first unspecified field.
///
/// ```
/// use diagrelay::format_location;
///
/// assert_eq!(format_location("fn.rs", 10, 3), "[fn.rs:10.3]");
/// assert_eq!(format_location("fn.rs", 10, 0), "[fn.rs:10]");
/// assert_eq!(format_location("", 10, 3), "");
/// ```
#[must_use]
pub fn format_location(file: &str, line: u32, col: u32) -> String {
    if file.is_empty() {
        return String::new();
    }
    let mut loc = String::with_capacity(file.len() + 10);
    loc.push('[');
    loc.push_str(file);
    if line != 0 {
        let _ = write!(loc, ":{line}");
        if col != 0 {
            let _ = write!(loc, ".{col}");
        }
    }
    loc.push(']');
    loc
}

/// Replaces the process-wide location prefix formatter.
///
/// The slot can be configured once, intended for one-time use by the
/// binary's entry point before emission starts; later calls fail with
/// [`Error::LocationFormatSet`]. Sinks that need different conventions per
/// level should implement the located facets directly instead.
pub fn set_location_format(format: LocationFormat) -> Result<(), Error> {
    FORMAT.set(format).map_err(|_| Error::LocationFormatSet)
}

/// The prefix the dispatcher uses for located calls on sinks without a
/// located facet.
///
/// Goes through the override slot, defaulting to [`format_location`].
#[must_use]
pub fn location_prefix(file: &str, line: u32, col: u32) -> String {
    let format: LocationFormat = FORMAT.get().copied().unwrap_or(format_location);
    format(file, line, col)
}
