mod error;
pub use error::FixtureError;

pub mod sim;
pub use sim::{Fixture, GroupFixture, JobFixture, SimProvider};
