use std::sync::Arc;
use tokio_util::sync::{CancellationToken, DropGuard};

/// Per-request context passed to every backend call.
///
/// Carries the caller's backend bearer token and a cancellation token. A
/// context built with [`CallContext::scoped`] cancels its token once the last
/// clone is dropped, which aborts any backend call still in flight.
#[derive(Clone, Default)]
pub struct CallContext {
    bearer: Option<String>,
    cancel: CancellationToken,
    _guard: Option<Arc<DropGuard>>,
}

impl CallContext {
    /// Context whose token is a child of `parent` and is cancelled on drop
    pub fn scoped(parent: &CancellationToken) -> Self {
        let cancel = parent.child_token();
        let guard = cancel.clone().drop_guard();
        Self {
            bearer: None,
            cancel,
            _guard: Some(Arc::new(guard)),
        }
    }

    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    pub fn bearer(&self) -> Option<&str> {
        self.bearer.as_deref()
    }

    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    #[cfg(test)]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl std::fmt::Debug for CallContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallContext")
            .field("authenticated", &self.bearer.is_some())
            .field("cancelled", &self.cancel.is_cancelled())
            .finish()
    }
}
