//! Fallback priority tests: for sinks exposing richer facets, the most
//! specific applicable method must always be chosen.

use std::cell::RefCell;

use diagrelay::{
    self as diag, Arg, CaptureSink, FormatSink, FullSink, GroupSink, Level, LocatedFormatSink,
    LocatedSink, RedactingSink, Sink, args, join,
};

/// Records the sink method that ended up being called.
#[derive(Default)]
struct Called(RefCell<&'static str>);

impl Called {
    fn set(&self, name: &'static str) {
        *self.0.borrow_mut() = name;
    }

    fn get(&self) -> &'static str {
        *self.0.borrow()
    }
}

struct HasFormat {
    called: Called,
}

impl Sink for HasFormat {
    fn debug(&self, _: &[Arg<'_>]) {
        self.called.set("debug");
    }

    fn print(&self, _: &[Arg<'_>]) {
        self.called.set("print");
    }

    fn warning(&self, _: &[Arg<'_>]) {
        self.called.set("warning");
    }

    fn error(&self, _: &[Arg<'_>]) {
        self.called.set("error");
    }

    fn as_format(&self) -> Option<&dyn FormatSink> {
        Some(self)
    }
}

impl FormatSink for HasFormat {
    fn debugf(&self, _: &str, _: &[Arg<'_>]) {
        self.called.set("debugf");
    }

    fn printf(&self, _: &str, _: &[Arg<'_>]) {
        self.called.set("printf");
    }

    fn warningf(&self, _: &str, _: &[Arg<'_>]) {
        self.called.set("warningf");
    }

    fn errorf(&self, _: &str, _: &[Arg<'_>]) {
        self.called.set("errorf");
    }
}

struct HasLocated {
    called: Called,
}

impl Sink for HasLocated {
    fn debug(&self, _: &[Arg<'_>]) {
        self.called.set("debug");
    }

    fn print(&self, _: &[Arg<'_>]) {
        self.called.set("print");
    }

    fn warning(&self, _: &[Arg<'_>]) {
        self.called.set("warning");
    }

    fn error(&self, _: &[Arg<'_>]) {
        self.called.set("error");
    }

    fn as_located(&self) -> Option<&dyn LocatedSink> {
        Some(self)
    }
}

impl LocatedSink for HasLocated {
    fn warning_at(&self, _: &str, _: u32, _: u32, _: &[Arg<'_>]) {
        self.called.set("warning_at");
    }

    fn error_at(&self, _: &str, _: u32, _: u32, _: &[Arg<'_>]) {
        self.called.set("error_at");
    }
}

struct HasLocatedFormat {
    called: Called,
}

impl Sink for HasLocatedFormat {
    fn debug(&self, _: &[Arg<'_>]) {
        self.called.set("debug");
    }

    fn print(&self, _: &[Arg<'_>]) {
        self.called.set("print");
    }

    fn warning(&self, _: &[Arg<'_>]) {
        self.called.set("warning");
    }

    fn error(&self, _: &[Arg<'_>]) {
        self.called.set("error");
    }

    fn as_located_format(&self) -> Option<&dyn LocatedFormatSink> {
        Some(self)
    }
}

impl LocatedFormatSink for HasLocatedFormat {
    fn warning_atf(&self, _: &str, _: u32, _: u32, _: &str, _: &[Arg<'_>]) {
        self.called.set("warning_atf");
    }

    fn error_atf(&self, _: &str, _: u32, _: u32, _: &str, _: &[Arg<'_>]) {
        self.called.set("error_atf");
    }
}

fn check<S: Sink>(sink: &S, called: impl Fn(&S) -> &'static str, runs: &[(fn(&S), &'static str)]) {
    for (run, want) in runs {
        run(sink);
        assert_eq!(called(sink), *want);
    }
}

#[test]
fn format_facet_is_used_for_formatted_shapes_only() {
    let sink = HasFormat {
        called: Called::default(),
    };
    check(
        &sink,
        |s| s.called.get(),
        &[
            (|s| diag::debug(Some(s), args!["d"]), "debug"),
            (|s| diag::debugf(Some(s), "d", args![]), "debugf"),
            (|s| diag::print(Some(s), args!["d"]), "print"),
            (|s| diag::printf(Some(s), "d", args![]), "printf"),
            (|s| diag::warning(Some(s), args!["d"]), "warning"),
            (|s| diag::warningf(Some(s), "d", args![]), "warningf"),
            (|s| diag::warning_at(Some(s), "f", 1, 2, args!["d"]), "warning"),
            (
                |s| diag::warning_atf(Some(s), "f", 1, 2, "d", args![]),
                "warningf",
            ),
            (|s| diag::error(Some(s), args!["d"]), "error"),
            (|s| diag::errorf(Some(s), "d", args![]), "errorf"),
            (|s| diag::error_at(Some(s), "f", 1, 2, args!["d"]), "error"),
            (
                |s| diag::error_atf(Some(s), "f", 1, 2, "d", args![]),
                "errorf",
            ),
        ],
    );
}

#[test]
fn located_facet_absorbs_both_located_shapes() {
    let sink = HasLocated {
        called: Called::default(),
    };
    check(
        &sink,
        |s| s.called.get(),
        &[
            (|s| diag::debug(Some(s), args!["d"]), "debug"),
            (|s| diag::debugf(Some(s), "d", args![]), "debug"),
            (|s| diag::print(Some(s), args!["d"]), "print"),
            (|s| diag::printf(Some(s), "d", args![]), "print"),
            (|s| diag::warning(Some(s), args!["d"]), "warning"),
            (|s| diag::warningf(Some(s), "d", args![]), "warning"),
            (
                |s| diag::warning_at(Some(s), "f", 1, 2, args!["d"]),
                "warning_at",
            ),
            (
                |s| diag::warning_atf(Some(s), "f", 1, 2, "d", args![]),
                "warning_at",
            ),
            (|s| diag::error(Some(s), args!["d"]), "error"),
            (|s| diag::errorf(Some(s), "d", args![]), "error"),
            (|s| diag::error_at(Some(s), "f", 1, 2, args!["d"]), "error_at"),
            (
                |s| diag::error_atf(Some(s), "f", 1, 2, "d", args![]),
                "error_at",
            ),
        ],
    );
}

#[test]
fn located_format_facet_is_preferred_over_plain_for_located_shapes() {
    let sink = HasLocatedFormat {
        called: Called::default(),
    };
    check(
        &sink,
        |s| s.called.get(),
        &[
            (|s| diag::debug(Some(s), args!["d"]), "debug"),
            (|s| diag::debugf(Some(s), "d", args![]), "debug"),
            (|s| diag::print(Some(s), args!["d"]), "print"),
            (|s| diag::printf(Some(s), "d", args![]), "print"),
            (|s| diag::warning(Some(s), args!["d"]), "warning"),
            (|s| diag::warningf(Some(s), "d", args![]), "warning"),
            // Prefer the located-formatted facet over the plain base for At.
            (
                |s| diag::warning_at(Some(s), "f", 1, 2, args!["d"]),
                "warning_atf",
            ),
            (
                |s| diag::warning_atf(Some(s), "f", 1, 2, "d", args![]),
                "warning_atf",
            ),
            (|s| diag::error(Some(s), args!["d"]), "error"),
            (|s| diag::errorf(Some(s), "d", args![]), "error"),
            (
                |s| diag::error_at(Some(s), "f", 1, 2, args!["d"]),
                "error_atf",
            ),
            (
                |s| diag::error_atf(Some(s), "f", 1, 2, "d", args![]),
                "error_atf",
            ),
        ],
    );
}

/// A located-formatted sink that records its inputs, to pin down the shape
/// of the synthesized located call.
#[derive(Default)]
struct RecordingLocatedFormat {
    seen: RefCell<Vec<(String, u32, u32, String, String)>>,
}

impl Sink for RecordingLocatedFormat {
    fn debug(&self, _: &[Arg<'_>]) {}
    fn print(&self, _: &[Arg<'_>]) {}
    fn warning(&self, _: &[Arg<'_>]) {}
    fn error(&self, _: &[Arg<'_>]) {}

    fn as_located_format(&self) -> Option<&dyn LocatedFormatSink> {
        Some(self)
    }
}

impl LocatedFormatSink for RecordingLocatedFormat {
    fn warning_atf(&self, file: &str, line: u32, col: u32, template: &str, args: &[Arg<'_>]) {
        self.seen.borrow_mut().push((
            file.to_string(),
            line,
            col,
            template.to_string(),
            join(args),
        ));
    }

    fn error_atf(&self, file: &str, line: u32, col: u32, template: &str, args: &[Arg<'_>]) {
        self.warning_atf(file, line, col, template, args);
    }
}

#[test]
fn located_call_synthesized_from_located_format_joins_once() {
    let sink = RecordingLocatedFormat::default();
    diag::warning_at(Some(&sink), "f", 1, 2, args!["a", "b", 2]);
    // Location and join both happen exactly once: a "{}" wrapper around the
    // pre-joined arguments, with the raw triple passed through.
    assert_eq!(
        sink.seen.borrow().as_slice(),
        &[("f".to_string(), 1, 2, "{}".to_string(), "a b 2".to_string())]
    );
}

/// A complete sink; its existence is the compile-time completeness check.
struct Complete {
    sink: CaptureSink,
}

impl Sink for Complete {
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
}

impl FormatSink for Complete {
    fn debugf(&self, _: &str, _: &[Arg<'_>]) {}
    fn printf(&self, _: &str, _: &[Arg<'_>]) {}
    fn warningf(&self, _: &str, _: &[Arg<'_>]) {}
    fn errorf(&self, _: &str, _: &[Arg<'_>]) {}
}

impl LocatedSink for Complete {
    fn warning_at(&self, _: &str, _: u32, _: u32, _: &[Arg<'_>]) {}
    fn error_at(&self, _: &str, _: u32, _: u32, _: &[Arg<'_>]) {}
}

impl LocatedFormatSink for Complete {
    fn warning_atf(&self, _: &str, _: u32, _: u32, _: &str, _: &[Arg<'_>]) {}
    fn error_atf(&self, _: &str, _: u32, _: u32, _: &str, _: &[Arg<'_>]) {}
}

impl GroupSink for Complete {
    fn group(&self, _: &str, _: &mut dyn FnMut(&dyn Sink)) {}
}

impl RedactingSink for Complete {
    fn mask_value(&self, _: &str) {}
}

#[test]
fn complete_sink_satisfies_full_contract() {
    fn assert_full<T: FullSink>() {}
    assert_full::<Complete>();

    // Without facet query overrides, dispatch still degrades to plain.
    let sink = Complete {
        sink: CaptureSink::new(),
    };
    diag::errorf(Some(&sink), "{}", args!["boom"]);
    assert_eq!(sink.sink.take(), vec![(Level::Error, "boom".to_string())]);
}
