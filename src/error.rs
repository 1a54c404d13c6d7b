use thiserror::Error;

/// Application-wide error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("api error: {0}")]
    Api(#[from] ApiError),

    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),
}

impl AppError {
    /// Get a user-friendly error message suitable for the CLI
    pub fn user_friendly_message(&self) -> String {
        match self {
            AppError::Api(api) => api.user_friendly_message(),
            other => other.to_string(),
        }
    }
}

/// Errors from talking to the REST API
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("token contains characters that cannot appear in an authorization header")]
    InvalidToken,
}

impl ApiError {
    /// Get a user-friendly error message for common transport failures
    pub fn user_friendly_message(&self) -> String {
        match self {
            ApiError::RequestFailed(e) => {
                // Check for common connection errors
                let error_str = e.to_string().to_lowercase();
                if error_str.contains("connection refused") {
                    "connection refused - is the API endpoint reachable?".to_string()
                } else if error_str.contains("timeout") {
                    "request timeout - the API did not respond in time".to_string()
                } else if error_str.contains("dns") || error_str.contains("name resolution") {
                    "DNS error - could not resolve the API hostname".to_string()
                } else if error_str.contains("tls") || error_str.contains("ssl") {
                    "TLS/SSL error - the API endpoint did not complete a secure handshake"
                        .to_string()
                } else {
                    format!("network error - {e}")
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Errors from sealing a secret value against a repository public key
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("repository public key is not valid base64")]
    InvalidPublicKey,

    #[error("repository public key has unexpected length: {length} bytes")]
    InvalidKeyLength { length: usize },

    #[error("sealing the secret value failed")]
    SealFailed,
}

/// Convenience type for Results
pub type Result<T> = std::result::Result<T, AppError>;
