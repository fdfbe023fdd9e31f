pub mod types;
pub mod tally;
pub mod words;
pub mod streak;
pub mod aggregate;

pub use types::*;
pub use aggregate::compute_profile;
