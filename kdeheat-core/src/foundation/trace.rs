use crate::foundation::core::FrameIndex;

/// Observability handle threaded through every file-producing entry point.
///
/// The library never logs against an ambient global span: callers build one `TraceCtx` (usually
/// right after installing a subscriber) and pass it down. Child contexts nest their spans under
/// the parent so a whole animation shows up as one tree.
#[derive(Clone, Debug)]
pub struct TraceCtx {
    span: tracing::Span,
}

impl TraceCtx {
    /// Wrap an existing span.
    pub fn new(span: tracing::Span) -> Self {
        Self { span }
    }

    /// Top-level context with a `kdeheat` span.
    pub fn root() -> Self {
        Self::new(tracing::info_span!("kdeheat"))
    }

    /// Context whose spans are never recorded.
    pub fn disabled() -> Self {
        Self::new(tracing::Span::none())
    }

    /// The span backing this context.
    pub fn span(&self) -> &tracing::Span {
        &self.span
    }

    /// Child context for one animation frame.
    pub fn frame(&self, idx: FrameIndex) -> Self {
        Self::new(tracing::info_span!(parent: &self.span, "frame", index = idx.0))
    }

    pub(crate) fn heatmap(&self) -> Self {
        Self::new(tracing::debug_span!(parent: &self.span, "heatmap"))
    }

    pub(crate) fn gif(&self) -> Self {
        Self::new(tracing::info_span!(parent: &self.span, "gif"))
    }

    pub(crate) fn overlay(&self) -> Self {
        Self::new(tracing::debug_span!(parent: &self.span, "overlay"))
    }

    /// Run `f` with this context's span entered.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        self.span.in_scope(f)
    }
}

impl Default for TraceCtx {
    fn default() -> Self {
        Self::root()
    }
}
