use clap::Parser;
use github_secret_sync::{
    error::AppError,
    github::GitHubClient,
    security::SecureString,
    sync::{self, SyncOptions, SyncReport},
};
use std::time::Duration;
use tracing::info;

#[cfg(test)]
use serial_test::serial;

#[derive(Parser)]
#[command(name = "github-secret-sync")]
#[command(about = "Update a GitHub Actions secret across every repository that references it")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// GitHub personal access token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: String,

    /// Name of the secret to look for and rewrite
    #[arg(long = "secret_name")]
    secret_name: String,

    /// New value to store wherever the secret is referenced
    #[arg(long = "new_secret_value")]
    new_secret_value: String,

    /// Also include repositories owned by your organizations
    #[arg(long)]
    orgs: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 60)]
    timeout: u64,

    /// Base URL of the GitHub REST API
    #[arg(long, default_value = "https://api.github.com")]
    api_url: String,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("github_secret_sync=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let token = SecureString::from(cli.token);
    let value = SecureString::from(cli.new_secret_value);

    let options = SyncOptions {
        secret_name: cli.secret_name,
        include_orgs: cli.orgs,
    };

    info!("Starting secret sync for {}", options.secret_name);

    match run_sync(&cli.api_url, &token, cli.timeout, &options, &value).await {
        Ok(report) => {
            println!(
                "Updated secret in {} of {} matching repositories",
                report.updated, report.matched
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}", e.user_friendly_message());
            std::process::exit(1);
        }
    }
}

/// Build the API client and run the propagation end to end
async fn run_sync(
    api_url: &str,
    token: &SecureString,
    timeout: u64,
    options: &SyncOptions,
    value: &SecureString,
) -> Result<SyncReport, AppError> {
    let client = GitHubClient::new(api_url, token, Duration::from_secs(timeout))?;
    sync::run(&client, options, value).await
}
