//! Form options

use std::fmt;
use std::sync::Arc;

use super::DefaultHooks;
use super::SubmitHooks;
use crate::transport::Transport;

/// Options consumed when a [`Form`](super::Form) is constructed.
///
/// # Example
///
/// ```ignore
/// use formstate_lib::FormOptions;
/// use formstate_lib::transport::HttpTransport;
///
/// let options = FormOptions::default()
///     .with_reset_on_success(false)
///     .with_transport(HttpTransport::new());
/// ```
#[derive(Clone)]
pub struct FormOptions {
    /// Reset the fields to their initial values after a successful submit.
    ///
    /// Default: `true`
    pub reset_on_success: bool,

    /// Hooks run after each submission.
    ///
    /// Default: [`DefaultHooks`]
    pub hooks: Arc<dyn SubmitHooks>,

    /// Transport used for submissions.
    ///
    /// Default: `None`, meaning the reqwest-backed
    /// [`HttpTransport`](crate::transport::HttpTransport) when the `http`
    /// feature is enabled.
    pub transport: Option<Arc<dyn Transport>>,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            reset_on_success: true,
            hooks: Arc::new(DefaultHooks),
            transport: None,
        }
    }
}

impl FormOptions {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables resetting the form after a successful submit.
    pub fn with_reset_on_success(mut self, enabled: bool) -> Self {
        self.reset_on_success = enabled;
        self
    }

    /// Sets the submission hooks.
    pub fn with_hooks<H: SubmitHooks + 'static>(mut self, hooks: H) -> Self {
        self.hooks = Arc::new(hooks);
        self
    }

    /// Sets hooks shared with other forms.
    pub fn with_shared_hooks(mut self, hooks: Arc<dyn SubmitHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    /// Sets the transport.
    pub fn with_transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Sets a transport shared with other forms.
    pub fn with_shared_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }
}

impl fmt::Debug for FormOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormOptions")
            .field("reset_on_success", &self.reset_on_success)
            .field("transport", &self.transport.as_ref().map(|_| "<transport>"))
            .finish_non_exhaustive()
    }
}
