use std::{collections::BTreeSet, fs, path::Path};

use serde::{Deserialize, Serialize};

use sweep_model::Tags;

use crate::error::FixtureError;

/// Scripted control plane: every group the simulated subscription contains.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Fixture {
    /// Groups returned by enumeration, in file order.
    pub groups: Vec<GroupFixture>,
    /// When set, enumeration fails with this message and the run aborts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enumeration_error: Option<String>,
}

/// One scripted resource group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroupFixture {
    /// Group name; must be unique within the fixture.
    pub name: String,
    /// Provider region.
    pub location: String,
    /// Tags the group carries.
    pub tags: Tags,
    /// When true, fetching this group's tags fails.
    pub tags_unavailable: bool,
    /// When set, the delete request is rejected synchronously with this
    /// message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reject_delete: Option<String>,
    /// How the deletion job behaves once dispatched.
    pub job: JobFixture,
}

impl Default for GroupFixture {
    fn default() -> Self {
        Self {
            name: String::new(),
            location: "westeurope".to_string(),
            tags: Tags::new(),
            tags_unavailable: false,
            reject_delete: None,
            job: JobFixture::default(),
        }
    }
}

/// Scripted behavior of one deletion job.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobFixture {
    /// Time from dispatch to the terminal state, in milliseconds. A value
    /// beyond the configured wait budget produces a timed-out outcome.
    pub duration_ms: u64,
    /// When set, the job terminally fails with this message instead of
    /// succeeding.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fails_with: Option<String>,
}

impl Fixture {
    /// Parse a fixture from JSON text.
    pub fn from_json(raw: &str) -> Result<Self, FixtureError> {
        let fixture: Fixture = serde_json::from_str(raw)?;
        fixture.validate()?;
        Ok(fixture)
    }

    /// Load and parse a fixture file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Check structural invariants the simulator relies on.
    pub fn validate(&self) -> Result<(), FixtureError> {
        let mut seen = BTreeSet::new();
        for group in &self.groups {
            if group.name.trim().is_empty() {
                return Err(FixtureError::Invalid("group name must not be empty".into()));
            }
            if !seen.insert(group.name.as_str()) {
                return Err(FixtureError::Invalid(format!(
                    "duplicate group name: {}",
                    group.name
                )));
            }
        }
        Ok(())
    }
}
