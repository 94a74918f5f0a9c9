//! Forwarding sink for the `tracing` ecosystem.

use tracing::{debug, error, info, warn};

use crate::arg::{Arg, join};
use crate::render::render;
use crate::sink::{FormatSink, Sink};

/// Forwards each level to the matching `tracing` event.
///
/// Debug maps to `debug!`, print to `info!`, warning to `warn!`, and error
/// to `error!`. The formatted facet renders before forwarding, so
/// subscribers see a single message field either way; filtering, structure,
/// and output format remain entirely the subscriber's business.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl Sink for TracingSink {
    fn debug(&self, args: &[Arg<'_>]) {
        debug!("{}", join(args));
    }

    fn print(&self, args: &[Arg<'_>]) {
        info!("{}", join(args));
    }

    fn warning(&self, args: &[Arg<'_>]) {
        warn!("{}", join(args));
    }

    fn error(&self, args: &[Arg<'_>]) {
        error!("{}", join(args));
    }

    fn as_format(&self) -> Option<&dyn FormatSink> {
        Some(self)
    }
}

impl FormatSink for TracingSink {
    fn debugf(&self, template: &str, args: &[Arg<'_>]) {
        debug!("{}", render(template, args));
    }

    fn printf(&self, template: &str, args: &[Arg<'_>]) {
        info!("{}", render(template, args));
    }

    fn warningf(&self, template: &str, args: &[Arg<'_>]) {
        warn!("{}", render(template, args));
    }

    fn errorf(&self, template: &str, args: &[Arg<'_>]) {
        error!("{}", render(template, args));
    }
}
