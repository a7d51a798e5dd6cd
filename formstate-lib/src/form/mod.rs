//! Form state
//!
//! A [`Form`] owns the live field values, a deep copy of their initial
//! values, and the validation errors reported by the server.
//!
//! # Example
//!
//! ```ignore
//! use formstate_lib::Form;
//!
//! let mut form = Form::new(["first_name", "last_name"])?;
//! form.set("first_name", "Jane")?;
//!
//! match form.post("https://example.com/people").await {
//!     Ok(body) => println!("Created: {}", body),
//!     Err(_) if form.has_error("first_name") => {
//!         println!("{}", form.get_error("first_name").unwrap_or_default());
//!     }
//!     Err(e) => return Err(e.into()),
//! }
//! ```

mod hooks;
mod method;
mod options;
mod reserved;

pub use hooks::*;
pub use method::*;
pub use options::*;
pub use reserved::*;

use std::fmt;
use std::sync::Arc;

use chrono::DateTime;
use chrono::Utc;
use log::debug;

use crate::error::ConfigError;
use crate::error::Error;
use crate::error::FieldError;
use crate::model::Fields;
use crate::model::FileValue;
use crate::model::Value;
use crate::model::deep_clone_fields;
use crate::model::merge_into;
use crate::payload::Payload;
use crate::transport::Transport;
use crate::validation::PathErrorStore;

// =============================================================================
// Initial data
// =============================================================================

/// The data a form is constructed from.
///
/// Either field values, or a list of field names that all start out as
/// empty strings.
#[derive(Debug, Clone, PartialEq)]
pub enum FormData {
    /// Field names mapped to their initial values.
    Fields(Fields),
    /// Field names, each defaulting to an empty string.
    Names(Vec<String>),
}

impl FormData {
    /// Resolves the data into field values.
    pub fn into_fields(self) -> Fields {
        match self {
            FormData::Fields(fields) => fields,
            FormData::Names(names) => names.into_iter().map(|name| (name, Value::empty())).collect(),
        }
    }
}

impl Default for FormData {
    fn default() -> Self {
        FormData::Fields(Fields::new())
    }
}

impl From<Fields> for FormData {
    fn from(v: Fields) -> Self {
        FormData::Fields(v)
    }
}

impl From<Vec<String>> for FormData {
    fn from(v: Vec<String>) -> Self {
        FormData::Names(v)
    }
}

impl From<Vec<&str>> for FormData {
    fn from(v: Vec<&str>) -> Self {
        FormData::Names(v.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for FormData {
    fn from(v: &[&str]) -> Self {
        FormData::Names(v.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for FormData {
    fn from(v: [&str; N]) -> Self {
        FormData::Names(v.iter().map(|s| s.to_string()).collect())
    }
}

impl TryFrom<serde_json::Value> for FormData {
    type Error = ConfigError;

    /// Objects become field values, arrays become field names. Any other
    /// JSON value is rejected.
    fn try_from(v: serde_json::Value) -> Result<Self, Self::Error> {
        match v {
            serde_json::Value::Array(names) => Ok(FormData::Names(
                names
                    .into_iter()
                    .map(|name| match name {
                        serde_json::Value::String(s) => s,
                        other => other.to_string(),
                    })
                    .collect(),
            )),
            serde_json::Value::Object(map) => Ok(FormData::Fields(
                map.into_iter().map(|(field, value)| (field, Value::from(value))).collect(),
            )),
            other => Err(ConfigError::invalid_data(Value::from(other).type_name())),
        }
    }
}

// =============================================================================
// Form
// =============================================================================

/// Client-side state of a form.
///
/// Field values are reachable through [`get`](Self::get) /
/// [`set`](Self::set) and the typed getters. The initial values are kept as
/// an independent deep copy, so [`reset`](Self::reset) always restores them
/// no matter how the live values were mutated.
///
/// Field names that collide with form operations (see
/// [`RESERVED_FIELD_NAMES`]) are rejected.
pub struct Form {
    /// Live field values.
    fields: Fields,

    /// Deep copy of the initial values.
    initial: Fields,

    /// Validation errors from the last failed submission.
    errors: PathErrorStore,

    /// `true` while a submission is in flight.
    processing: bool,

    /// `true` if the last submission succeeded.
    successful: bool,

    options: FormOptions,

    transport: Arc<dyn Transport>,
}

impl Form {
    /// Creates a form with default options.
    ///
    /// # Example
    ///
    /// ```
    /// use formstate_lib::Form;
    /// use formstate_lib::Value;
    ///
    /// let form = Form::new(["field1", "field2"]).unwrap();
    /// assert_eq!(form.data()["field1"], Value::empty());
    /// ```
    pub fn new(data: impl Into<FormData>) -> Result<Self, ConfigError> {
        Self::with_options(data, FormOptions::default())
    }

    /// Creates a form with default options.
    ///
    /// Same as [`Form::new`].
    pub fn create(data: impl Into<FormData>) -> Result<Self, ConfigError> {
        Self::new(data)
    }

    /// Creates a form with the given options.
    ///
    /// Fails if any field name is reserved, or if no transport is configured
    /// and the `http` feature is disabled. Nothing is assigned on failure.
    pub fn with_options(data: impl Into<FormData>, options: FormOptions) -> Result<Self, ConfigError> {
        let fields = data.into().into_fields();
        reserved::guard_all(fields.keys().map(String::as_str))?;

        let transport = match &options.transport {
            Some(transport) => Arc::clone(transport),
            None => crate::transport::default_transport()?,
        };

        Ok(Self {
            initial: deep_clone_fields(&fields),
            fields,
            errors: PathErrorStore::new(),
            processing: false,
            successful: false,
            options,
            transport,
        })
    }

    /// Seeds the error store (builder pattern).
    pub fn with_errors(mut self, errors: PathErrorStore) -> Self {
        self.errors = errors;
        self
    }

    // =========================================================================
    // State accessors
    // =========================================================================

    /// Returns `true` while a submission is in flight.
    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// Returns `true` if the last submission succeeded.
    pub fn is_successful(&self) -> bool {
        self.successful
    }

    /// Returns the options the form was created with.
    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    /// Returns the initial values.
    pub fn initial(&self) -> &Fields {
        &self.initial
    }

    /// Returns the validation errors.
    pub fn errors(&self) -> &PathErrorStore {
        &self.errors
    }

    /// Returns the validation errors mutably.
    pub fn errors_mut(&mut self) -> &mut PathErrorStore {
        &mut self.errors
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns a mutable reference to the field value, if it exists.
    pub fn get_mut(&mut self, field: &str) -> Option<&mut Value> {
        self.fields.get_mut(field)
    }

    /// Returns `true` if the form has the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns all live fields, including ones added after construction.
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Sets a field value.
    ///
    /// Fields that are not part of the initial values may be added this way;
    /// they are kept on the form but left out of [`data`](Self::data).
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Result<(), ConfigError> {
        let field = field.into();
        reserved::guard_against_reserved_field_name(&field)?;
        self.fields.insert(field, value.into());
        Ok(())
    }

    // =========================================================================
    // Value lifecycle
    // =========================================================================

    /// Returns the current values of the fields present in the initial values.
    pub fn data(&self) -> Fields {
        self.initial
            .keys()
            .map(|field| {
                let value = self.fields.get(field).map(Value::deep_clone).unwrap_or_default();
                (field.clone(), value)
            })
            .collect()
    }

    /// Returns the current values of the given fields.
    ///
    /// Names that are not fields of the form are skipped.
    pub fn only<S: AsRef<str>>(&self, fields: &[S]) -> Fields {
        fields
            .iter()
            .filter_map(|field| {
                let field = field.as_ref();
                self.fields.get(field).map(|value| (field.to_string(), value.deep_clone()))
            })
            .collect()
    }

    /// Restores every initial field to a fresh copy of its initial value and
    /// clears all errors.
    pub fn reset(&mut self) {
        debug!("Resetting {} field(s)", self.initial.len());
        for (field, value) in &self.initial {
            self.fields.insert(field.clone(), value.deep_clone());
        }

        self.errors.clear();
    }

    /// Merges copies of `values` into the initial values.
    ///
    /// Initial fields not mentioned in `values` keep their baseline.
    pub fn set_initial_values(&mut self, values: &Fields) -> Result<(), ConfigError> {
        reserved::guard_all(values.keys().map(String::as_str))?;
        merge_into(&mut self.initial, values);
        Ok(())
    }

    /// Assigns copies of the given values to existing fields.
    ///
    /// Keys that are not already fields of the form are ignored. All keys are
    /// checked for reserved names before anything is assigned.
    pub fn populate(&mut self, data: &Fields) -> Result<&mut Self, ConfigError> {
        reserved::guard_all(data.keys().map(String::as_str))?;

        for (field, value) in data {
            if let Some(slot) = self.fields.get_mut(field) {
                *slot = value.deep_clone();
            }
        }

        Ok(self)
    }

    /// Sets every initial field to an empty string and clears all errors.
    pub fn clear(&mut self) {
        debug!("Clearing {} field(s)", self.initial.len());
        for field in self.initial.keys() {
            self.fields.insert(field.clone(), Value::empty());
        }

        self.errors.clear();
    }

    // =========================================================================
    // Submission
    // =========================================================================

    /// Submits the form with the named method.
    ///
    /// `method` must be one of `get`, `delete`, `head`, `post`, `put` or
    /// `patch`; anything else fails before the form is touched.
    pub async fn submit(&mut self, method: &str, url: &str) -> Result<serde_json::Value, Error> {
        let method: Method = method.parse()?;
        self.submit_with(method, url).await
    }

    /// Submits the form.
    ///
    /// Clears the errors and marks the form as processing, then sends
    /// [`data`](Self::data) through the transport, as multipart if any value
    /// holds a file. Once the transport settles, `processing` is reset and
    /// the matching [`SubmitHooks`] method runs before this returns.
    pub async fn submit_with(&mut self, method: Method, url: &str) -> Result<serde_json::Value, Error> {
        self.errors.clear();
        self.processing = true;
        self.successful = false;

        let payload = Payload::from_fields(self.data());
        debug!(
            "Submitting form: {} {} ({})",
            method,
            url,
            if payload.is_multipart() { "multipart" } else { "json" }
        );

        let transport = Arc::clone(&self.transport);
        let outcome = transport.send(method, url, payload).await;

        self.processing = false;
        let hooks = Arc::clone(&self.options.hooks);

        match outcome {
            Ok(body) => {
                self.successful = true;
                hooks.on_success(self, &body);
                Ok(body)
            }
            Err(error) => {
                debug!("Submission failed: {}", error);
                hooks.on_fail(self, &error);
                Err(error.into())
            }
        }
    }

    /// Submits the form with POST.
    pub async fn post(&mut self, url: &str) -> Result<serde_json::Value, Error> {
        self.submit_with(Method::Post, url).await
    }

    /// Submits the form with PUT.
    pub async fn put(&mut self, url: &str) -> Result<serde_json::Value, Error> {
        self.submit_with(Method::Put, url).await
    }

    /// Submits the form with PATCH.
    pub async fn patch(&mut self, url: &str) -> Result<serde_json::Value, Error> {
        self.submit_with(Method::Patch, url).await
    }

    /// Submits the form with DELETE.
    pub async fn delete(&mut self, url: &str) -> Result<serde_json::Value, Error> {
        self.submit_with(Method::Delete, url).await
    }

    // =========================================================================
    // Errors
    // =========================================================================

    /// Returns `true` if `field` or anything nested below it has an error.
    pub fn has_error(&self, field: &str) -> bool {
        self.errors.has(field)
    }

    /// Returns the first error message for `field`.
    pub fn get_error(&self, field: &str) -> Option<&str> {
        self.errors.first(field)
    }

    /// Returns all error messages for `field`.
    pub fn get_errors(&self, field: &str) -> Vec<String> {
        self.errors.get(field)
    }

    // =========================================================================
    // Typed getters
    //
    // Return Err if field is missing or wrong type.
    // Return Ok(None) only if the field exists and is Value::Null.
    // =========================================================================

    /// Gets a string field value.
    pub fn get_string(&self, field: &str) -> Result<Option<&str>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(FieldError::type_mismatch(field, "string", other.type_name())),
        }
    }

    /// Gets a boolean field value.
    pub fn get_bool(&self, field: &str) -> Result<Option<bool>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(FieldError::type_mismatch(field, "bool", other.type_name())),
        }
    }

    /// Gets an integer field value.
    pub fn get_int(&self, field: &str) -> Result<Option<i64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Int(n)) => Ok(Some(*n)),
            Some(other) => Err(FieldError::type_mismatch(field, "int", other.type_name())),
        }
    }

    /// Gets a floating point field value.
    pub fn get_float(&self, field: &str) -> Result<Option<f64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Float(n)) => Ok(Some(*n)),
            Some(Value::Int(n)) => Ok(Some(*n as f64)), // Allow widening
            Some(other) => Err(FieldError::type_mismatch(field, "float", other.type_name())),
        }
    }

    /// Gets a DateTime field value.
    pub fn get_datetime(&self, field: &str) -> Result<Option<DateTime<Utc>>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::DateTime(dt)) => Ok(Some(*dt)),
            Some(other) => Err(FieldError::type_mismatch(field, "datetime", other.type_name())),
        }
    }

    /// Gets a file field value.
    pub fn get_file(&self, field: &str) -> Result<Option<&FileValue>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::File(f)) => Ok(Some(f)),
            Some(other) => Err(FieldError::type_mismatch(field, "file", other.type_name())),
        }
    }

    /// Gets an array field value.
    pub fn get_array(&self, field: &str) -> Result<Option<&Vec<Value>>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Array(items)) => Ok(Some(items)),
            Some(other) => Err(FieldError::type_mismatch(field, "array", other.type_name())),
        }
    }

    /// Gets a nested object field value.
    pub fn get_object(&self, field: &str) -> Result<Option<&Fields>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Object(fields)) => Ok(Some(fields)),
            Some(other) => Err(FieldError::type_mismatch(field, "object", other.type_name())),
        }
    }
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("fields", &self.fields)
            .field("initial", &self.initial)
            .field("errors", &self.errors)
            .field("processing", &self.processing)
            .field("successful", &self.successful)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
