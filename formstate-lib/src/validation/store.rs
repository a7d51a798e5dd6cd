//! PathErrorStore

use indexmap::IndexMap;
use log::trace;
use log::warn;

use super::Messages;
use super::path;

/// Validation errors keyed by field path.
///
/// Lookups through [`has`](Self::has) and [`clear_path`](Self::clear_path)
/// understand the path hierarchy: an error on `address.street` makes
/// `has("address")` true, and clearing `dates.0` drops `dates.0.start_date`
/// while keeping `dates.1.start_date`. [`get`](Self::get) and
/// [`first`](Self::first) only look at the exact key.
///
/// Key presence is what counts as "has an error": a path recorded with an
/// empty message list still reports `has == true`.
///
/// # Example
///
/// ```
/// use formstate_lib::PathErrorStore;
///
/// let mut errors = PathErrorStore::new();
/// errors.record([
///     ("first_name".to_string(), "Value is required".into()),
///     ("person.0.email".to_string(), vec!["Invalid email"].into()),
/// ]);
///
/// assert!(errors.has("person"));
/// assert_eq!(errors.first("first_name"), Some("Value is required"));
///
/// errors.clear_path("person");
/// assert!(!errors.has("person"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathErrorStore {
    errors: IndexMap<String, Messages>,
}

impl PathErrorStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a server error object.
    ///
    /// Expects a JSON object mapping field paths to a message or a list of
    /// messages. Anything other than an object yields an empty store.
    pub fn from_json(errors: &serde_json::Value) -> Self {
        match errors.as_object() {
            Some(map) => map
                .iter()
                .map(|(path, messages)| (path.clone(), Messages::from_json(messages)))
                .collect(),
            None => {
                warn!("Ignoring validation errors that are not an object: {}", errors);
                Self::new()
            }
        }
    }

    /// Replaces every recorded error with the given ones.
    pub fn record(&mut self, errors: impl IntoIterator<Item = (String, Messages)>) {
        self.errors = errors.into_iter().collect();
    }

    /// Returns all recorded errors.
    pub fn all(&self) -> &IndexMap<String, Messages> {
        &self.errors
    }

    /// Returns `true` if any error is recorded.
    pub fn any(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns `true` if any of the given paths has an error.
    pub fn any_of<S: AsRef<str>>(&self, paths: &[S]) -> bool {
        paths.iter().any(|p| self.has(p.as_ref()))
    }

    /// Returns `true` if `field` or anything nested below it has an error.
    pub fn has(&self, field: &str) -> bool {
        self.errors.contains_key(field) || self.errors.keys().any(|key| path::is_descendant(key, field))
    }

    /// Returns the messages recorded for exactly `field`.
    pub fn get(&self, field: &str) -> Vec<String> {
        self.errors.get(field).map(Messages::to_vec).unwrap_or_default()
    }

    /// Returns the first message recorded for exactly `field`.
    pub fn first(&self, field: &str) -> Option<&str> {
        self.errors.get(field).and_then(Messages::first)
    }

    /// Removes every recorded error.
    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Removes the error for `field` and every error nested below it.
    ///
    /// Siblings and ancestors of `field` are left alone.
    pub fn clear_path(&mut self, field: &str) {
        let doomed: Vec<String> = self
            .errors
            .keys()
            .filter(|key| path::is_within(key, field))
            .cloned()
            .collect();

        for key in doomed {
            trace!("Clearing validation error for {}", key);
            self.errors.shift_remove(&key);
        }
    }

    /// Returns the number of recorded paths.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns `true` if no path is recorded.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Iterates over recorded paths and their messages.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Messages)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl From<IndexMap<String, Messages>> for PathErrorStore {
    fn from(errors: IndexMap<String, Messages>) -> Self {
        Self { errors }
    }
}

impl IntoIterator for PathErrorStore {
    type Item = (String, Messages);
    type IntoIter = indexmap::map::IntoIter<String, Messages>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl FromIterator<(String, Messages)> for PathErrorStore {
    fn from_iter<I: IntoIterator<Item = (String, Messages)>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required(paths: &[&str]) -> PathErrorStore {
        paths
            .iter()
            .map(|p| (p.to_string(), Messages::from(vec!["Value is required"])))
            .collect()
    }

    #[test]
    fn test_any() {
        let mut errors = PathErrorStore::new();
        assert!(!errors.any());

        errors.record([("first_name".to_string(), Messages::from(vec!["Value is required"]))]);
        assert!(errors.any());
    }

    #[test]
    fn test_any_of() {
        let mut errors = PathErrorStore::new();
        assert!(!errors.any_of(&["first_name", "last_name"]));

        errors.record([("first_name".to_string(), Messages::from(vec!["Value is required"]))]);
        assert!(errors.any_of(&["first_name", "last_name"]));
        assert!(!errors.any_of(&["last_name", "person"]));
    }

    #[test]
    fn test_has_field_or_object() {
        let errors = required(&["first_name", "person.0.first_name"]);

        assert!(!errors.has("first"));
        assert!(errors.has("first_name"));
        assert!(errors.has("person"));
        assert!(errors.has("person.0"));
        assert!(!errors.has("person.1"));
    }

    #[test]
    fn test_has_bracket_paths() {
        let errors = required(&["roles[0].name"]);

        assert!(errors.has("roles"));
        assert!(errors.has("roles[0]"));
        assert!(!errors.has("roles[1]"));
    }

    #[test]
    fn test_record_replaces_everything() {
        let mut errors = required(&["first_name"]);
        errors.record([("last_name".to_string(), Messages::from("Too long"))]);

        assert!(!errors.has("first_name"));
        assert!(errors.has("last_name"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_get_normalizes_shapes() {
        let errors: PathErrorStore = [
            ("one".to_string(), Messages::from("Only message")),
            ("many".to_string(), Messages::from(vec!["First", "Second"])),
        ]
        .into_iter()
        .collect();

        assert_eq!(errors.get("one"), vec!["Only message".to_string()]);
        assert_eq!(errors.get("many"), vec!["First".to_string(), "Second".to_string()]);
        assert!(errors.get("missing").is_empty());
    }

    #[test]
    fn test_first() {
        let errors = required(&["first_name"]);

        assert_eq!(errors.first("first_name"), Some("Value is required"));
        assert_eq!(errors.first("last_name"), None);
    }

    #[test]
    fn test_bare_string_message() {
        let mut errors = PathErrorStore::new();
        errors.record([("first_name".to_string(), Messages::from("Value is required"))]);

        assert!(errors.any());
        assert_eq!(errors.first("first_name"), Some("Value is required"));
    }

    #[test]
    fn test_empty_message_list_still_counts() {
        let errors: PathErrorStore = [("touched".to_string(), Messages::Many(Vec::new()))]
            .into_iter()
            .collect();

        assert!(errors.any());
        assert!(errors.has("touched"));
        assert_eq!(errors.first("touched"), None);
        assert!(errors.get("touched").is_empty());
    }

    #[test]
    fn test_clear_all() {
        let mut errors = required(&["first_name", "last_name"]);
        errors.clear();

        assert!(!errors.any());
        assert!(errors.all().is_empty());
    }

    #[test]
    fn test_clear_specific_field() {
        let mut errors = required(&["first_name", "last_name"]);
        errors.clear_path("first_name");

        assert!(!errors.has("first_name"));
        assert!(errors.has("last_name"));
    }

    #[test]
    fn test_clear_nested_objects() {
        let mut errors = required(&[
            "person.first_name",
            "person.last_name",
            "dates.0.start_date",
            "dates.1.start_date",
            "roles[0].name",
            "roles[1].name",
        ]);

        errors.clear_path("person");
        errors.clear_path("dates.0");
        errors.clear_path("roles[1]");

        assert!(!errors.has("person"));
        assert!(!errors.has("person.first_name"));
        assert!(!errors.has("person.last_name"));

        assert!(errors.has("dates"));
        assert!(!errors.has("dates.0.start_date"));
        assert!(errors.has("dates.1.start_date"));

        assert!(errors.has("roles"));
        assert!(errors.has("roles[0].name"));
        assert!(!errors.has("roles[1].name"));
    }

    #[test]
    fn test_clear_keeps_siblings_and_ancestors() {
        let mut errors = required(&["a.b", "a.c", "a"]);
        errors.clear_path("a.b");

        assert!(errors.has("a"));
        assert!(errors.has("a.c"));
        assert!(!errors.has("a.b"));
    }

    #[test]
    fn test_clear_does_not_touch_plain_prefixes() {
        let mut errors = required(&["name", "name_confirmation"]);
        errors.clear_path("name");

        assert!(errors.has("name_confirmation"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_from_json() {
        let json = serde_json::json!({
            "first_name": ["Value is required"],
            "email": "Invalid email",
            "address.zip": []
        });
        let errors = PathErrorStore::from_json(&json);

        assert_eq!(errors.first("first_name"), Some("Value is required"));
        assert_eq!(errors.first("email"), Some("Invalid email"));
        assert!(errors.has("address"));
        assert!(errors.get("address.zip").is_empty());
    }

    #[test]
    fn test_from_json_rejects_non_objects() {
        let errors = PathErrorStore::from_json(&serde_json::json!(["nope"]));
        assert!(errors.is_empty());
    }
}
