use serde::{Deserialize, Serialize};

/// A repository descriptor as returned by the repository listing calls.
///
/// The listing payloads carry dozens of fields; the pipeline only ever needs
/// the `owner/repo` slug, so that is all that gets deserialized.
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    /// Repository in "owner/repo" format
    pub full_name: String,
}

/// An organization descriptor from the organization listing call
#[derive(Debug, Clone, Deserialize)]
pub struct Organization {
    /// Organization login name, as used in `/orgs/{login}/...` paths
    pub login: String,
}

/// One entry of a repository contents listing
#[derive(Debug, Clone, Deserialize)]
pub struct ContentEntry {
    /// Entry file name, e.g. `ci.yml`
    pub name: String,
    /// Entry kind: `file`, `dir`, `symlink` or `submodule`
    #[serde(rename = "type")]
    pub kind: String,
    /// Direct download URL for the raw content; absent for directories
    pub download_url: Option<String>,
}

impl ContentEntry {
    /// Whether this entry is a workflow definition worth scanning: a plain
    /// file with a `.yml` or `.yaml` extension.
    pub fn is_workflow_file(&self) -> bool {
        self.kind == "file" && (self.name.ends_with(".yml") || self.name.ends_with(".yaml"))
    }
}

/// The public key a repository exposes for sealing secrets against
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryPublicKey {
    /// Identifier of the key, echoed back verbatim in the update payload
    pub key_id: String,
    /// Base64-encoded X25519 public key
    pub key: String,
}

/// Request body for the secrets-update call
#[derive(Debug, Clone, Serialize)]
pub struct EncryptedSecret {
    /// Base64-encoded sealed-box ciphertext
    pub encrypted_value: String,
    /// The `key_id` of the public key the value was sealed against
    pub key_id: String,
}
