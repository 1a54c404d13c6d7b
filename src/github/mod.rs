pub mod api;
pub mod pagination;
pub mod types;

pub use api::GitHubClient;
pub use types::{ContentEntry, EncryptedSecret, Organization, Repository, RepositoryPublicKey};
