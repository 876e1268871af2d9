//! Request signing for the terminal bridge API.
//!
//! The bridge authenticates POST requests with an HMAC-SHA256 signature over
//! the JSON body, keyed by the shared API secret.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::venue::{VenueError, VenueResult};

type HmacSha256 = Hmac<Sha256>;

/// Generate the hex HMAC-SHA256 signature for a request body.
pub fn sign_request(body: &str, secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(body.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// API credentials container
#[derive(Debug, Clone)]
pub struct Credentials {
    api_key: String,
    api_secret: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    /// Build credentials from optional config values, failing when only one
    /// half is present.
    pub fn from_parts(
        api_key: Option<&str>,
        api_secret: Option<&str>,
    ) -> VenueResult<Option<Self>> {
        match (api_key, api_secret) {
            (Some(key), Some(secret)) => Ok(Some(Self::new(key, secret))),
            (None, None) => Ok(None),
            _ => Err(VenueError::Auth(
                "both api_key and api_secret must be set, or neither".to_string(),
            )),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn api_secret(&self) -> &str {
        &self.api_secret
    }
}
