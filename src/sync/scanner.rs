use crate::error::ApiError;
use crate::github::GitHubClient;
use tracing::debug;

/// Whether any workflow file in the repository mentions the secret name
///
/// Lists `.github/workflows`, downloads every `.yml` and `.yaml` file in it
/// and looks for a literal occurrence of the name in the content. Scanning
/// stops at the first file that matches.
pub async fn repository_references_secret(
    client: &GitHubClient,
    full_name: &str,
    secret_name: &str,
) -> Result<bool, ApiError> {
    let entries = client.list_workflow_directory(full_name).await?;

    for entry in entries {
        if !entry.is_workflow_file() {
            continue;
        }

        let url = match entry.download_url.as_deref() {
            Some(url) => url,
            None => {
                debug!(
                    "Workflow entry {} in {} has no download URL, skipping",
                    entry.name, full_name
                );
                continue;
            }
        };

        let content = client.fetch_file_content(url).await?;
        if content.contains(secret_name) {
            debug!("{} references {} in {}", full_name, secret_name, entry.name);
            return Ok(true);
        }
    }

    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::SecureString;
    use mockito::Server;
    use std::time::Duration;

    fn test_client(server: &Server) -> GitHubClient {
        GitHubClient::new(
            &server.url(),
            &SecureString::from("test-token"),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_detects_secret_in_yml_workflow() {
        let mut server = Server::new_async().await;

        let _contents_mock = server
            .mock("GET", "/repos/octocat/hello-world/contents/.github/workflows")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!(
                r#"[{{"name": "ci.yml", "type": "file", "download_url": "{}/raw/ci.yml"}}]"#,
                server.url()
            ))
            .create_async()
            .await;

        let _content_mock = server
            .mock("GET", "/raw/ci.yml")
            .with_status(200)
            .with_body("env:\n  KEY: ${{ secrets.DEPLOY_KEY }}\n")
            .create_async()
            .await;

        let client = test_client(&server);
        let found = repository_references_secret(&client, "octocat/hello-world", "DEPLOY_KEY")
            .await
            .unwrap();

        assert!(found);
    }

    #[tokio::test]
    async fn test_detects_secret_in_yaml_workflow() {
        let mut server = Server::new_async().await;

        let _contents_mock = server
            .mock("GET", "/repos/octocat/hello-world/contents/.github/workflows")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!(
                r#"[{{"name": "release.yaml", "type": "file", "download_url": "{}/raw/release.yaml"}}]"#,
                server.url()
            ))
            .create_async()
            .await;

        let _content_mock = server
            .mock("GET", "/raw/release.yaml")
            .with_status(200)
            .with_body("jobs:\n  publish:\n    env:\n      TOKEN: ${{ secrets.DEPLOY_KEY }}\n")
            .create_async()
            .await;

        let client = test_client(&server);
        let found = repository_references_secret(&client, "octocat/hello-world", "DEPLOY_KEY")
            .await
            .unwrap();

        assert!(found);
    }

    #[tokio::test]
    async fn test_ignores_non_workflow_entries() {
        let mut server = Server::new_async().await;

        let _contents_mock = server
            .mock("GET", "/repos/octocat/hello-world/contents/.github/workflows")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!(
                r#"[
                    {{"name": "templates", "type": "dir", "download_url": null}},
                    {{"name": "README.md", "type": "file", "download_url": "{url}/raw/README.md"}},
                    {{"name": "ci.yml", "type": "file", "download_url": "{url}/raw/ci.yml"}}
                ]"#,
                url = server.url()
            ))
            .create_async()
            .await;

        // Only the workflow file may be downloaded
        let readme_mock = server
            .mock("GET", "/raw/README.md")
            .expect(0)
            .create_async()
            .await;

        let _content_mock = server
            .mock("GET", "/raw/ci.yml")
            .with_status(200)
            .with_body("env:\n  OTHER: ${{ secrets.OTHER_KEY }}\n")
            .create_async()
            .await;

        let client = test_client(&server);
        let found = repository_references_secret(&client, "octocat/hello-world", "DEPLOY_KEY")
            .await
            .unwrap();

        assert!(!found);
        readme_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_workflow_directory_is_no_match() {
        let mut server = Server::new_async().await;

        let _contents_mock = server
            .mock("GET", "/repos/octocat/empty/contents/.github/workflows")
            .with_status(404)
            .with_body(r#"{"message": "Not Found"}"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let found = repository_references_secret(&client, "octocat/empty", "DEPLOY_KEY")
            .await
            .unwrap();

        assert!(!found);
    }

    #[tokio::test]
    async fn test_entry_without_download_url_is_skipped() {
        let mut server = Server::new_async().await;

        let _contents_mock = server
            .mock("GET", "/repos/octocat/hello-world/contents/.github/workflows")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!(
                r#"[
                    {{"name": "broken.yml", "type": "file", "download_url": null}},
                    {{"name": "ci.yml", "type": "file", "download_url": "{}/raw/ci.yml"}}
                ]"#,
                server.url()
            ))
            .create_async()
            .await;

        let _content_mock = server
            .mock("GET", "/raw/ci.yml")
            .with_status(200)
            .with_body("env:\n  KEY: ${{ secrets.DEPLOY_KEY }}\n")
            .create_async()
            .await;

        let client = test_client(&server);
        let found = repository_references_secret(&client, "octocat/hello-world", "DEPLOY_KEY")
            .await
            .unwrap();

        assert!(found);
    }

    #[tokio::test]
    async fn test_stops_after_first_matching_file() {
        let mut server = Server::new_async().await;

        let _contents_mock = server
            .mock("GET", "/repos/octocat/hello-world/contents/.github/workflows")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!(
                r#"[
                    {{"name": "a.yml", "type": "file", "download_url": "{url}/raw/a.yml"}},
                    {{"name": "b.yml", "type": "file", "download_url": "{url}/raw/b.yml"}}
                ]"#,
                url = server.url()
            ))
            .create_async()
            .await;

        let _first_mock = server
            .mock("GET", "/raw/a.yml")
            .with_status(200)
            .with_body("env:\n  KEY: ${{ secrets.DEPLOY_KEY }}\n")
            .create_async()
            .await;

        let second_mock = server
            .mock("GET", "/raw/b.yml")
            .expect(0)
            .create_async()
            .await;

        let client = test_client(&server);
        let found = repository_references_secret(&client, "octocat/hello-world", "DEPLOY_KEY")
            .await
            .unwrap();

        assert!(found);
        second_mock.assert_async().await;
    }
}
