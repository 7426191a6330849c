//! Custom claims attached to a user identity.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name of the boolean privilege claim.
pub const ADMIN_CLAIM: &str = "admin";

/// Arbitrary key/value attributes attached to a user identity.
///
/// The directory stores the whole map as one unit: assigning claims replaces
/// the previous map, it never merges into it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomClaims(Map<String, Value>);

impl CustomClaims {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// The exact claim set granted to administrators: `{ "admin": true }`.
    pub fn admin_only() -> Self {
        let mut map = Map::new();
        map.insert(ADMIN_CLAIM.to_string(), Value::Bool(true));
        Self(map)
    }

    /// `true` only when the `admin` claim is the JSON boolean `true`.
    pub fn is_admin(&self) -> bool {
        matches!(self.0.get(ADMIN_CLAIM), Some(Value::Bool(true)))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<Map<String, Value>> for CustomClaims {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}

impl FromIterator<(String, Value)> for CustomClaims {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
