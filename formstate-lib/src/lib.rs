//! Form state library
//!
//! Tracks editable field values against an initial snapshot, collects
//! server-side validation errors keyed by field path, and submits the form
//! through a pluggable async transport.

pub mod error;
pub mod form;
pub mod model;
pub mod payload;
pub mod transport;
pub mod validation;

pub use form::Form;
pub use form::FormData;
pub use form::FormOptions;
pub use form::Method;
pub use model::Fields;
pub use model::FileValue;
pub use model::Value;
pub use validation::PathErrorStore;
