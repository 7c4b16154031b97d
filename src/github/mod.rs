pub mod client;
pub mod types;

pub use client::{list_all, GitHubClient};
pub use types::RepoDescriptor;
