use crate::error::ApiError;
use crate::github::pagination;
use crate::github::types::{
    ContentEntry, EncryptedSecret, Organization, Repository, RepositoryPublicKey,
};
use crate::security::SecureString;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::time::Duration;
use tracing::debug;

/// Page size requested from the listing endpoints
const PER_PAGE: usize = 100;

/// GitHub REST API client with optimized HTTP client
pub struct GitHubClient {
    client: Client,
    base_url: String,
}

impl GitHubClient {
    /// Create a new API client authenticated with a personal access token
    ///
    /// # Arguments
    /// * `api_url` - Base URL of the GitHub REST API
    /// * `token` - Personal access token sent on every request
    /// * `timeout` - Per-request timeout
    ///
    /// # Returns
    /// * `Ok(GitHubClient)` - A ready-to-use client
    /// * `Err(ApiError)` - Error if the token cannot be used as a header value
    pub fn new(api_url: &str, token: &SecureString, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = api_url.trim_end_matches('/').to_string();

        let mut auth = HeaderValue::from_str(&format!("token {}", token.as_str()))
            .map_err(|_| ApiError::InvalidToken)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

        let client = Self::create_optimized_client(headers, timeout);

        Ok(Self {
            client,
            base_url,
        })
    }

    /// Create an optimized HTTP client with connection pooling
    fn create_optimized_client(headers: HeaderMap, timeout: Duration) -> Client {
        Client::builder()
            .default_headers(headers)
            .pool_max_idle_per_host(10) // One host serves every API call
            .pool_idle_timeout(Duration::from_secs(30))
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .tcp_keepalive(Duration::from_secs(60))
            .user_agent("github-secret-sync/0.1.0")
            .gzip(true) // Enable compression
            .build()
            .expect("failed to create HTTP client")
    }

    /// Fetch every page of a listing endpoint, following `Link` headers
    ///
    /// Listing failures are not fatal: a non-success response ends the walk
    /// and whatever was collected up to that point is returned, so a first-page
    /// failure yields an empty list.
    async fn get_paginated<T: DeserializeOwned>(&self, url: String) -> Result<Vec<T>, ApiError> {
        let mut results = Vec::new();
        let mut next = Some(url);

        while let Some(page_url) = next {
            let response = self.client.get(&page_url).send().await?;

            if !response.status().is_success() {
                debug!(
                    "Listing request to {} returned {}, treating as no data",
                    page_url,
                    response.status()
                );
                break;
            }

            // Read the next-page link before the body consumes the response
            let next_url = pagination::next_page_url(response.headers());

            let mut page: Vec<T> = response.json().await?;
            results.append(&mut page);

            next = next_url;
        }

        Ok(results)
    }

    /// List repositories affiliated with the authenticated user
    pub async fn list_user_repositories(&self) -> Result<Vec<Repository>, ApiError> {
        self.get_paginated(format!("{}/user/repos?per_page={}", self.base_url, PER_PAGE))
            .await
    }

    /// List organizations the authenticated user belongs to
    pub async fn list_user_organizations(&self) -> Result<Vec<Organization>, ApiError> {
        self.get_paginated(format!("{}/user/orgs?per_page={}", self.base_url, PER_PAGE))
            .await
    }

    /// List repositories owned by an organization
    pub async fn list_organization_repositories(
        &self,
        org: &str,
    ) -> Result<Vec<Repository>, ApiError> {
        self.get_paginated(format!(
            "{}/orgs/{}/repos?per_page={}",
            self.base_url, org, PER_PAGE
        ))
        .await
    }

    /// Build the full candidate repository set for a sync run
    ///
    /// Always includes the user-affiliated repositories; when `include_orgs`
    /// is set, also walks every organization the user belongs to. The result
    /// is deduplicated by `full_name`, keeping the first occurrence.
    ///
    /// # Arguments
    /// * `include_orgs` - Whether to enumerate organization-owned repositories too
    ///
    /// # Returns
    /// * `Ok(Vec<Repository>)` - The deduplicated candidate list
    /// * `Err(ApiError)` - Error if a request could not be sent at all
    pub async fn collect_repositories(
        &self,
        include_orgs: bool,
    ) -> Result<Vec<Repository>, ApiError> {
        let mut repositories = self.list_user_repositories().await?;

        if include_orgs {
            for org in self.list_user_organizations().await? {
                let mut org_repos = self.list_organization_repositories(&org.login).await?;
                repositories.append(&mut org_repos);
            }
        }

        // The affiliation-based listing already covers repositories in
        // organizations the user belongs to, so overlap is the common case
        let mut seen = HashSet::new();
        repositories.retain(|repo| seen.insert(repo.full_name.clone()));

        Ok(repositories)
    }

    /// List the `.github/workflows` directory of a repository
    ///
    /// Repositories without the directory (or without access to it) produce
    /// an empty list rather than an error.
    pub async fn list_workflow_directory(
        &self,
        full_name: &str,
    ) -> Result<Vec<ContentEntry>, ApiError> {
        let response = self
            .client
            .get(&format!(
                "{}/repos/{}/contents/.github/workflows",
                self.base_url, full_name
            ))
            .send()
            .await?;

        if !response.status().is_success() {
            debug!("No workflow directory in {}", full_name);
            return Ok(Vec::new());
        }

        Ok(response.json().await?)
    }

    /// Fetch the raw content behind a download URL
    ///
    /// Unreadable files yield an empty string, which scans as a non-match.
    pub async fn fetch_file_content(&self, url: &str) -> Result<String, ApiError> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            debug!("Content fetch from {} returned {}", url, response.status());
            return Ok(String::new());
        }

        Ok(response.text().await?)
    }

    /// Fetch the public key a repository exposes for sealing secrets
    ///
    /// Returns `None` when the key cannot be read, which typically means the
    /// token lacks admin access to the repository.
    pub async fn get_repository_public_key(
        &self,
        full_name: &str,
    ) -> Result<Option<RepositoryPublicKey>, ApiError> {
        let response = self
            .client
            .get(&format!(
                "{}/repos/{}/actions/secrets/public-key",
                self.base_url, full_name
            ))
            .send()
            .await?;

        if !response.status().is_success() {
            debug!(
                "Public key lookup for {} returned {}",
                full_name,
                response.status()
            );
            return Ok(None);
        }

        Ok(Some(response.json().await?))
    }

    /// Create or update an Actions secret on a repository
    ///
    /// # Arguments
    /// * `full_name` - Repository in "owner/repo" format
    /// * `secret_name` - Name of the secret to write
    /// * `payload` - Sealed value and the key id it was sealed against
    ///
    /// # Returns
    /// * `Ok(true)` - The API confirmed the write with 201 or 204
    /// * `Ok(false)` - Any other status code
    /// * `Err(ApiError)` - Error if the request could not be sent at all
    pub async fn put_repository_secret(
        &self,
        full_name: &str,
        secret_name: &str,
        payload: &EncryptedSecret,
    ) -> Result<bool, ApiError> {
        let response = self
            .client
            .put(&format!(
                "{}/repos/{}/actions/secrets/{}",
                self.base_url, full_name, secret_name
            ))
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        Ok(status == StatusCode::CREATED || status == StatusCode::NO_CONTENT)
    }
}
