use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::GroupName;

/// Default tag key inspected by the classifier.
pub const DEFAULT_TAG_KEY: &str = "keepIt";

/// Default tag value that marks a group as preserved.
pub const DEFAULT_KEEP_VALUE: &str = "true";

/// Retention policy evaluated against every enumerated group.
///
/// The tag key is matched case-insensitively, the value case-sensitively,
/// exclusions by exact name. Read-only configuration for the whole run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RetentionPolicy {
    /// Tag key whose presence is checked (case-insensitive).
    pub tag_key: String,
    /// Tag value that preserves the group (case-sensitive, exact match).
    pub keep_value: String,
    /// Group names that are always preserved, before any tag is consulted.
    pub exclusions: BTreeSet<GroupName>,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            tag_key: DEFAULT_TAG_KEY.to_string(),
            keep_value: DEFAULT_KEEP_VALUE.to_string(),
            exclusions: BTreeSet::new(),
        }
    }
}

impl RetentionPolicy {
    /// Policy with explicit tag key and keep value, no exclusions.
    pub fn new(tag_key: impl Into<String>, keep_value: impl Into<String>) -> Self {
        Self {
            tag_key: tag_key.into(),
            keep_value: keep_value.into(),
            exclusions: BTreeSet::new(),
        }
    }

    /// Add an excluded group name, builder style.
    pub fn with_exclusion(mut self, name: impl Into<GroupName>) -> Self {
        self.exclusions.insert(name.into());
        self
    }

    /// Whether the given group name is on the exclusion list.
    pub fn is_excluded(&self, name: &str) -> bool {
        self.exclusions.contains(name)
    }
}
