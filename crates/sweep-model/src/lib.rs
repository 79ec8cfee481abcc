mod domain;
pub use domain::{Flag, GroupName, ResourceGroup, Tags};

mod error;
pub use error::{ModelError, ModelResult};

mod policy;
pub use policy::RetentionPolicy;

mod decision;
pub use decision::{Decision, DecisionOutcome, RetentionReason};

mod job;
pub use job::{DeletionHandle, DispatchOutcome, JobOutcome, JobRef, JobStatus};

mod status;
pub use status::RunStatus;

mod config;
pub use config::RunConfig;
