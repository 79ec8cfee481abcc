use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::GroupName;

/// Outcome of classifying one resource group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionOutcome {
    /// The group is preserved.
    Keep,
    /// The group is handed to the deletion dispatcher.
    Delete,
}

impl DecisionOutcome {
    /// Label value for logs and metrics.
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            DecisionOutcome::Keep => "keep",
            DecisionOutcome::Delete => "delete",
        }
    }
}

/// Why the classifier kept or deleted a group.
///
/// This is a closed set so downstream consumers can branch on it instead of
/// parsing strings; `Display` renders the canonical report text for each
/// variant. Key fields carry the tag key in its *original* casing as found
/// on the group, not the policy spelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum RetentionReason {
    /// Group name was on the exclusion list.
    Excluded,
    /// Group carries no tags at all.
    NoTags,
    /// No tag key matched the policy key.
    TagMissing { key: String },
    /// Matching tag found with exactly the keep value.
    TagMatch { key: String, value: String },
    /// Matching tag found, but its value differs from the keep value.
    TagMismatch {
        key: String,
        value: String,
        expected: String,
    },
    /// Tags could not be fetched from the provider; fail-open-to-delete.
    TagsUnavailable,
}

impl fmt::Display for RetentionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetentionReason::Excluded => f.write_str("Excluded by parameter"),
            RetentionReason::NoTags => f.write_str("No tags present"),
            RetentionReason::TagMissing { key } => write!(f, "'{key}' tag not found"),
            RetentionReason::TagMatch { key, value } => write!(f, "'{key}' = '{value}'"),
            RetentionReason::TagMismatch {
                key,
                value,
                expected,
            } => write!(f, "'{key}' = '{value}' (not '{expected}')"),
            RetentionReason::TagsUnavailable => {
                f.write_str("Error retrieving tags (will delete by default)")
            }
        }
    }
}

/// Immutable classification result for one group.
///
/// Every enumerated group yields exactly one `Decision`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    /// Name of the classified group.
    pub group: GroupName,
    /// Region of the classified group.
    pub location: String,
    /// Keep or delete.
    pub outcome: DecisionOutcome,
    /// Why, as a branchable value.
    pub reason: RetentionReason,
}

impl Decision {
    /// Whether this decision preserves the group.
    pub fn is_keep(&self) -> bool {
        self.outcome == DecisionOutcome::Keep
    }

    /// Whether this decision schedules the group for deletion.
    pub fn is_delete(&self) -> bool {
        self.outcome == DecisionOutcome::Delete
    }
}

#[cfg(test)]
mod tests {
    use super::RetentionReason;

    #[test]
    fn display_renders_fixed_templates() {
        assert_eq!(RetentionReason::Excluded.to_string(), "Excluded by parameter");
        assert_eq!(RetentionReason::NoTags.to_string(), "No tags present");
        assert_eq!(
            RetentionReason::TagMissing {
                key: "keepIt".into()
            }
            .to_string(),
            "'keepIt' tag not found"
        );
        assert_eq!(
            RetentionReason::TagMatch {
                key: "KeepIt".into(),
                value: "true".into()
            }
            .to_string(),
            "'KeepIt' = 'true'"
        );
        assert_eq!(
            RetentionReason::TagMismatch {
                key: "keepit".into(),
                value: "false".into(),
                expected: "true".into()
            }
            .to_string(),
            "'keepit' = 'false' (not 'true')"
        );
        assert_eq!(
            RetentionReason::TagsUnavailable.to_string(),
            "Error retrieving tags (will delete by default)"
        );
    }

    #[test]
    fn serde_tags_variants_by_kind() {
        let json = serde_json::to_string(&RetentionReason::TagMissing {
            key: "keepIt".into(),
        })
        .unwrap();
        assert!(json.contains(r#""kind":"tagMissing""#));

        let back: RetentionReason = serde_json::from_str(&json).unwrap();
        assert_eq!(
            back,
            RetentionReason::TagMissing {
                key: "keepIt".into()
            }
        );
    }
}
