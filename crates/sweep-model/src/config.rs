use std::{collections::BTreeSet, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{
    domain::{Flag, GroupName},
    error::{ModelError, ModelResult},
    policy::{DEFAULT_KEEP_VALUE, DEFAULT_TAG_KEY},
    RetentionPolicy,
};

/// Default per-job wait when monitoring is enabled, in seconds.
pub const DEFAULT_JOB_TIMEOUT_SECS: u64 = 180;

/// Run-level configuration for one cleanup pass.
///
/// `enable_deletion` must be explicitly enabled or the run performs zero
/// mutating operations and finishes with the distinguished blocked status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RunConfig {
    /// Master switch for issuing delete requests.
    pub enable_deletion: Flag,
    /// Whether to wait for dispatched jobs and classify their outcome.
    pub monitor_jobs: Flag,
    /// Per-job wait budget when monitoring, in seconds. Must be positive.
    pub job_timeout_secs: u64,
    /// Group names that are always preserved.
    pub exclusions: BTreeSet<GroupName>,
    /// Tag key inspected by the classifier (case-insensitive).
    pub tag_key: String,
    /// Tag value that preserves a group (case-sensitive).
    pub keep_value: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            enable_deletion: Flag::disabled(),
            monitor_jobs: Flag::disabled(),
            job_timeout_secs: DEFAULT_JOB_TIMEOUT_SECS,
            exclusions: BTreeSet::new(),
            tag_key: DEFAULT_TAG_KEY.to_string(),
            keep_value: DEFAULT_KEEP_VALUE.to_string(),
        }
    }
}

impl RunConfig {
    /// Check the configuration for values the engine cannot work with.
    pub fn validate(&self) -> ModelResult<()> {
        if self.job_timeout_secs == 0 {
            return Err(ModelError::InvalidConfig(
                "jobTimeoutSecs must be greater than zero".into(),
            ));
        }
        if self.tag_key.trim().is_empty() {
            return Err(ModelError::InvalidConfig("tagKey must not be empty".into()));
        }
        if self.keep_value.is_empty() {
            return Err(ModelError::InvalidConfig(
                "keepValue must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Per-job wait budget as a [`Duration`].
    pub fn job_timeout(&self) -> Duration {
        Duration::from_secs(self.job_timeout_secs)
    }

    /// Derive the retention policy evaluated per group.
    pub fn policy(&self) -> RetentionPolicy {
        RetentionPolicy {
            tag_key: self.tag_key.clone(),
            keep_value: self.keep_value.clone(),
            exclusions: self.exclusions.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RunConfig, DEFAULT_JOB_TIMEOUT_SECS};
    use crate::domain::Flag;

    #[test]
    fn default_is_blocked_and_unmonitored() {
        let cfg = RunConfig::default();
        assert!(cfg.enable_deletion.is_disabled());
        assert!(cfg.monitor_jobs.is_disabled());
        assert_eq!(cfg.job_timeout_secs, DEFAULT_JOB_TIMEOUT_SECS);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let cfg = RunConfig {
            job_timeout_secs: 0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn empty_tag_key_is_rejected() {
        let cfg = RunConfig {
            tag_key: "  ".into(),
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn policy_carries_overrides() {
        let mut cfg = RunConfig {
            tag_key: "retain".into(),
            keep_value: "yes".into(),
            ..Default::default()
        };
        cfg.exclusions.insert("rg-prod".into());

        let policy = cfg.policy();
        assert_eq!(policy.tag_key, "retain");
        assert_eq!(policy.keep_value, "yes");
        assert!(policy.is_excluded("rg-prod"));
    }

    #[test]
    fn serde_uses_defaults_for_missing_fields() {
        let cfg: RunConfig = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(cfg, RunConfig::default());
    }

    #[test]
    fn serde_partial_override() {
        let cfg: RunConfig = serde_json::from_str(
            r#"{"enableDeletion":true,"monitorJobs":true,"jobTimeoutSecs":1,"exclusions":["rg-keep"]}"#,
        )
        .unwrap();

        assert_eq!(cfg.enable_deletion, Flag::enabled());
        assert_eq!(cfg.monitor_jobs, Flag::enabled());
        assert_eq!(cfg.job_timeout_secs, 1);
        assert!(cfg.exclusions.contains("rg-keep"));
        assert_eq!(cfg.tag_key, "keepIt");
    }
}
