//! GitHub Secret Sync
//!
//! A command-line tool that rolls a GitHub Actions secret across every
//! repository that uses it: it enumerates the repositories reachable by a
//! token, keeps the ones whose workflow files reference the secret name,
//! seals the new value against each repository's public key and writes it
//! back through the secrets API.

pub mod crypto;
pub mod error;
pub mod github;
pub mod security;
pub mod sync;
