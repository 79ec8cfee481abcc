mod group;
pub use group::ResourceGroup;

mod tags;
pub use tags::Tags;

mod flag;
pub use flag::Flag;

/// Name of a resource group, unique within one subscription.
///
/// Used as the correlation key across decisions, handles and outcomes.
pub type GroupName = String;
