use serde::{Deserialize, Serialize};

use crate::domain::{GroupName, Tags};

/// Read-only snapshot of one resource group.
///
/// Fetched once at classification time and never mutated by this system;
/// the only write the system ever performs against a group is its deletion,
/// which happens entirely on the provider side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceGroup {
    /// Group name, unique within the subscription.
    pub name: GroupName,
    /// Provider region the group lives in.
    pub location: String,
    /// Tags attached to the group. Keys are matched case-insensitively.
    #[serde(default, skip_serializing_if = "Tags::is_empty")]
    pub tags: Tags,
}

impl ResourceGroup {
    /// Create a group snapshot without tags.
    pub fn new(name: impl Into<GroupName>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            tags: Tags::new(),
        }
    }

    /// Attach tags to the snapshot, builder style.
    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::ResourceGroup;
    use crate::domain::Tags;

    #[test]
    fn new_has_empty_tags() {
        let rg = ResourceGroup::new("rg-demo", "westeurope");
        assert_eq!(rg.name, "rg-demo");
        assert_eq!(rg.location, "westeurope");
        assert!(rg.tags.is_empty());
    }

    #[test]
    fn with_tags_replaces_tags() {
        let rg = ResourceGroup::new("rg-demo", "westeurope")
            .with_tags(Tags::from([("keepIt", "true")]));
        assert_eq!(rg.tags.get("keepIt"), Some("true"));
    }

    #[test]
    fn serde_omits_empty_tags() {
        let rg = ResourceGroup::new("rg-demo", "westeurope");
        let json = serde_json::to_string(&rg).unwrap();
        assert!(!json.contains("tags"));

        let back: ResourceGroup = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rg);
    }
}
