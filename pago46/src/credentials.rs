//! Merchant credentials.

use std::fmt;

/// The key pair a merchant uses to talk to the API.
///
/// The `key` is public and travels in the `merchant-key` header. The `secret`
/// never leaves the process; it only keys the HMAC over each request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    key: String,
    secret: String,
}

impl Credentials {
    /// Creates credentials from a merchant key and its signing secret.
    #[must_use]
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }

    /// Creates credentials for the receiver-id flavour of the API, where the
    /// public identifier is numeric.
    #[must_use]
    pub fn receiver(receiver_id: u64, secret: impl Into<String>) -> Self {
        Self::new(receiver_id.to_string(), secret)
    }

    /// Returns the public merchant key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the signing secret.
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receiver_id_becomes_key() {
        let creds = Credentials::receiver(4601, "s3cret");
        assert_eq!(creds.key(), "4601");
        assert_eq!(creds.secret(), "s3cret");
    }

    #[test]
    fn test_debug_hides_secret() {
        let creds = Credentials::new("merchant", "very-secret-value");
        let debug = format!("{creds:?}");
        assert!(debug.contains("merchant"));
        assert!(!debug.contains("very-secret-value"));
    }
}
