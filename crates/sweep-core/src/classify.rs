//! Pure retention classifier.
//!
//! No I/O and no shared state: one group snapshot plus the policy in, one
//! [`Decision`] out. Precedence, first match wins:
//!
//! 1. exclusion list → keep
//! 2. no tags at all → delete
//! 3. policy key absent (case-insensitive) → delete
//! 4. key present with exactly the keep value → keep
//! 5. key present with any other value → delete

use sweep_model::{Decision, DecisionOutcome, GroupName, ResourceGroup, RetentionPolicy,
                  RetentionReason};

/// Classify one group against the retention policy.
pub fn classify(group: &ResourceGroup, policy: &RetentionPolicy) -> Decision {
    let (outcome, reason) = if policy.is_excluded(&group.name) {
        (DecisionOutcome::Keep, RetentionReason::Excluded)
    } else if group.tags.is_empty() {
        (DecisionOutcome::Delete, RetentionReason::NoTags)
    } else {
        match group.tags.lookup_ci(&policy.tag_key) {
            None => (
                DecisionOutcome::Delete,
                RetentionReason::TagMissing {
                    key: policy.tag_key.clone(),
                },
            ),
            Some((key, value)) if value == policy.keep_value => (
                DecisionOutcome::Keep,
                RetentionReason::TagMatch {
                    key: key.to_string(),
                    value: value.to_string(),
                },
            ),
            Some((key, value)) => (
                DecisionOutcome::Delete,
                RetentionReason::TagMismatch {
                    key: key.to_string(),
                    value: value.to_string(),
                    expected: policy.keep_value.clone(),
                },
            ),
        }
    };

    Decision {
        group: group.name.clone(),
        location: group.location.clone(),
        outcome,
        reason,
    }
}

/// Decision for a group whose tags could not be fetched.
///
/// Uncertainty resolves to deletion, never preservation. The exclusion list
/// does not reach this path: the engine checks exclusions before it asks the
/// provider for tags.
pub fn classify_unavailable(name: impl Into<GroupName>, location: impl Into<String>) -> Decision {
    Decision {
        group: name.into(),
        location: location.into(),
        outcome: DecisionOutcome::Delete,
        reason: RetentionReason::TagsUnavailable,
    }
}
