//! Live value lookup for template fillers.

use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Source of the current value behind a `<global:KEY>` tag.
///
/// Lookups read whatever is current; nothing is snapshotted.
pub trait ReferenceResolver: Send + Sync {
    /// Returns the current value for `key`, or `None` if it has none.
    fn lookup(&self, key: &str) -> Option<String>;

    /// Text embedded in place of a key that has no value.
    fn undefined_repr(&self) -> &str {
        ""
    }
}

impl<R: ReferenceResolver + ?Sized> ReferenceResolver for Arc<R> {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }

    fn undefined_repr(&self) -> &str {
        (**self).undefined_repr()
    }
}

impl ReferenceResolver for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Mutable store of live variables shared with the host application.
///
/// Values are JSON values. Strings are embedded verbatim, `null` counts as
/// no value and everything else is embedded in its JSON form.
#[derive(Debug, Default)]
pub struct VariableStore {
    values: RwLock<HashMap<String, Value>>,
}

impl VariableStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a variable, returning the previous value.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.write().insert(key.into(), value.into())
    }

    /// Removes a variable, returning its value.
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.values.write().remove(key)
    }

    /// Current raw value of a variable.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.values.read().get(key).cloned()
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    /// Returns true if no variables are set.
    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }
}

impl ReferenceResolver for VariableStore {
    fn lookup(&self, key: &str) -> Option<String> {
        self.values.read().get(key).and_then(stringify)
    }
}

fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_store_stringifies_values() {
        let store = VariableStore::new();
        store.set("a", "text");
        store.set("b", 42);
        store.set("c", true);
        store.set("d", json!([1, 2]));
        store.set("e", Value::Null);

        assert_eq!(store.lookup("a").as_deref(), Some("text"));
        assert_eq!(store.lookup("b").as_deref(), Some("42"));
        assert_eq!(store.lookup("c").as_deref(), Some("true"));
        assert_eq!(store.lookup("d").as_deref(), Some("[1,2]"));
        assert_eq!(store.lookup("e"), None);
        assert_eq!(store.lookup("missing"), None);
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn test_store_reads_latest_value() {
        let store = Arc::new(VariableStore::new());
        let resolver: Arc<dyn ReferenceResolver> = store.clone();

        store.set("k", 1);
        assert_eq!(resolver.lookup("k").as_deref(), Some("1"));
        assert_eq!(store.set("k", 2), Some(json!(1)));
        assert_eq!(resolver.lookup("k").as_deref(), Some("2"));

        store.remove("k");
        assert_eq!(resolver.lookup("k"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_map_resolver() {
        let map = HashMap::from([("x".to_string(), "y".to_string())]);
        assert_eq!(map.lookup("x").as_deref(), Some("y"));
        assert_eq!(map.undefined_repr(), "");
    }
}
