use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Tag set attached to a resource group, backed by a [`BTreeMap`].
///
/// Cloud providers treat tag keys as case-insensitive, so lookups here fold
/// keys to lowercase. When several original keys fold to the same lowercase
/// form, the lexicographically smallest original key wins: `BTreeMap`
/// iteration is ordered by original key and the first match is kept.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tags(pub BTreeMap<String, String>);

impl Tags {
    /// Create an empty tag set.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Returns `true` if no tags are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Insert or overwrite a tag.
    ///
    /// Returns `self` for chaining.
    pub fn insert<K, V>(&mut self, key: K, val: V) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.0.insert(key.into(), val.into());
        self
    }

    /// Exact-case lookup.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(|s| s.as_str())
    }

    /// Case-insensitive lookup, returning the tag in its original casing.
    ///
    /// On collisions (several keys folding to the same lowercase form) the
    /// lexicographically smallest original key is returned.
    pub fn lookup_ci(&self, key: &str) -> Option<(&str, &str)> {
        let wanted = key.to_lowercase();
        self.0
            .iter()
            .find(|(k, _)| k.to_lowercase() == wanted)
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Tags
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
