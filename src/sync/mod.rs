pub mod scanner;
pub mod updater;

pub use updater::UpdateOutcome;

use crate::error::AppError;
use crate::github::GitHubClient;
use crate::security::SecureString;
use tracing::info;

/// Options for a propagation run
pub struct SyncOptions {
    /// Name of the secret to look for and rewrite
    pub secret_name: String,
    /// Also enumerate repositories owned by the user's organizations
    pub include_orgs: bool,
}

/// Tally of a finished propagation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Candidate repositories enumerated
    pub repositories_seen: usize,
    /// Repositories whose workflows reference the secret
    pub matched: usize,
    /// Confirmed secret writes
    pub updated: usize,
    /// Rejected secret writes
    pub failed: usize,
}

/// Run a full propagation: enumerate, scan, seal and update
///
/// Prints one status line per attempted update, in enumeration order.
/// Repositories that never reference the secret, or that expose no public
/// key, stay silent.
pub async fn run(
    client: &GitHubClient,
    options: &SyncOptions,
    value: &SecureString,
) -> Result<SyncReport, AppError> {
    let repositories = client.collect_repositories(options.include_orgs).await?;

    let mut report = SyncReport {
        repositories_seen: repositories.len(),
        ..SyncReport::default()
    };

    // The secret name is fine to log; the value never is
    info!(
        "Scanning {} repositories for {}",
        repositories.len(),
        options.secret_name
    );

    for repository in &repositories {
        let references =
            scanner::repository_references_secret(client, &repository.full_name, &options.secret_name)
                .await?;

        if !references {
            continue;
        }

        report.matched += 1;

        let outcome = updater::update_repository_secret(
            client,
            &repository.full_name,
            &options.secret_name,
            value,
        )
        .await?;

        match outcome {
            UpdateOutcome::Updated => {
                report.updated += 1;
                println!("Updated secret in {}", repository.full_name);
            }
            UpdateOutcome::Failed => {
                report.failed += 1;
                println!("Failed to update secret in {}", repository.full_name);
            }
            UpdateOutcome::MissingPublicKey => {}
        }
    }

    Ok(report)
}
