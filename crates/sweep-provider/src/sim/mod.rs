//! Deterministic in-memory provider for policy rehearsal and tests.
//!
//! A [`Fixture`] scripts the whole control plane: which groups exist, which
//! tag reads fail, which deletes are rejected and how long each deletion job
//! takes. [`SimProvider`] plays the script against the tokio clock, so both
//! paused-clock tests and real-time CLI rehearsals work unchanged.

mod fixture;
pub use fixture::{Fixture, GroupFixture, JobFixture};

mod provider;
pub use provider::SimProvider;
