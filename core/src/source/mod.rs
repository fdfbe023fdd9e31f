pub mod github;

pub use github::{commits_to_log, ConvertedLog, RepoRef};
