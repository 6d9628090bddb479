//! Registry authentication payloads
//!
//! Pull and push each carry their own credential pair. A pair is turned into
//! an opaque token per operation: the `{username, password}` record encoded
//! as URL-safe base64 of its JSON form, the same shape the Docker API
//! expects in `X-Registry-Auth`. Tokens are recomputed per call and never
//! logged.

use crate::error::{MigrateError, Result};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE;
use bollard::auth::DockerCredentials;
use serde::{Deserialize, Serialize};

/// Credential pair for one side (pull or push) of a migration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryAuth {
    pub username: String,
    pub password: String,
}

impl RegistryAuth {
    /// Build the auth payload for a credential pair resolved from flags.
    ///
    /// Both fields empty means anonymous access and yields `None`; any
    /// non-empty value on either field yields a payload.
    pub fn from_flags(username: &str, password: &str) -> Option<Self> {
        if username.is_empty() && password.is_empty() {
            return None;
        }
        Some(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    /// Encode this payload as an opaque registry auth token.
    pub fn token(&self) -> Result<String> {
        let encoded = serde_json::to_vec(self)
            .map_err(|e| MigrateError::AuthEncoding(e.to_string()))?;
        Ok(URL_SAFE.encode(encoded))
    }

    /// Decode a token back into the credential pair it was built from.
    pub fn decode(token: &str) -> Result<Self> {
        let decoded = URL_SAFE
            .decode(token)
            .map_err(|e| MigrateError::AuthEncoding(e.to_string()))?;
        serde_json::from_slice(&decoded).map_err(|e| MigrateError::AuthEncoding(e.to_string()))
    }

    /// Credentials in the form the bollard engine client attaches on the wire.
    pub fn docker_credentials(&self) -> DockerCredentials {
        DockerCredentials {
            username: Some(self.username.clone()),
            password: Some(self.password.clone()),
            ..Default::default()
        }
    }
}
