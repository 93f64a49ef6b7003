//! Click-to-navigate behaviour for linked regions.

use imagemap_core::{ExternalOpener, HostError, Navigator};
use tracing::debug;

/// Pointer event state a handler can act on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointerEvent {
    default_prevented: bool,
    propagation_stopped: bool,
}

impl PointerEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Navigation services available when a link is followed.
#[derive(Clone, Copy)]
pub struct LinkContext<'a> {
    /// Host navigation; `None` when the host does not provide one.
    pub navigator: Option<&'a dyn Navigator>,
    /// Used when there is no navigator.
    pub fallback: &'a dyn ExternalOpener,
    /// Path links are resolved against.
    pub source_path: &'a str,
}

impl<'a> LinkContext<'a> {
    pub fn new(navigator: Option<&'a dyn Navigator>, fallback: &'a dyn ExternalOpener) -> Self {
        Self {
            navigator,
            fallback,
            source_path: "",
        }
    }

    pub fn with_source_path(mut self, source_path: &'a str) -> Self {
        self.source_path = source_path;
        self
    }
}

/// Suppresses the event's default handling and propagation, then opens
/// `target` through the navigator, or the fallback opener without one.
pub fn follow_link(
    target: &str,
    event: &mut PointerEvent,
    ctx: &LinkContext<'_>,
) -> Result<(), HostError> {
    event.prevent_default();
    event.stop_propagation();
    match ctx.navigator {
        Some(nav) => {
            debug!("Opening link {} via navigator", target);
            nav.open_link_text(target, ctx.source_path, true)
        }
        None => {
            debug!("No navigator, opening {} as a new target", target);
            ctx.fallback.open(target)
        }
    }
}
