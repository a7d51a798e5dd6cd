//! Submission outcome hooks

use log::debug;

use super::Form;
use crate::error::TransportError;
use crate::validation::PathErrorStore;

/// Reacts to the outcome of a submission.
///
/// Both methods run after `processing` has been reset and before
/// [`Form::submit`] returns. The provided implementations are the default
/// behavior; override either one to replace it.
///
/// # Example
///
/// ```
/// use formstate_lib::Form;
/// use formstate_lib::form::SubmitHooks;
///
/// /// Keeps the submitted values and stores the new record id.
/// struct KeepValues;
///
/// impl SubmitHooks for KeepValues {
///     fn on_success(&self, form: &mut Form, body: &serde_json::Value) {
///         if let Some(id) = body.get("id").and_then(|id| id.as_i64()) {
///             let _ = form.set("id", id);
///         }
///     }
/// }
/// ```
pub trait SubmitHooks: Send + Sync {
    /// Called after the transport resolved successfully.
    ///
    /// Resets the form unless `reset_on_success` is disabled.
    fn on_success(&self, form: &mut Form, _body: &serde_json::Value) {
        if form.options().reset_on_success {
            form.reset();
        }
    }

    /// Called after the transport failed.
    ///
    /// Records `response.data.errors` into the form's error store when the
    /// failure carries one.
    fn on_fail(&self, form: &mut Form, error: &TransportError) {
        if let Some(errors) = error.validation_errors() {
            let recorded = PathErrorStore::from_json(errors);
            debug!("Recording {} validation error(s)", recorded.len());
            form.errors_mut().record(recorded);
        }
    }
}

/// The default hooks: reset on success, record server errors on failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHooks;

impl SubmitHooks for DefaultHooks {}
