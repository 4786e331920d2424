//! Request signing.
//!
//! Each request is authenticated with an HMAC-SHA256 over a canonical string
//! that the server rebuilds from the same request:
//!
//! ```text
//! {key}&{timestamp}&{escape(method)}&{escape(path)}[&{encode(values)}]
//! ```
//!
//! `escape` is form-urlencoding of a single component and `encode` is
//! [`FormValues::encode_for_signing`]. The values segment (and its leading
//! `&`) is left out entirely when there are no values.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::credentials::Credentials;
use crate::form::{FormValues, escape};
use crate::timestamp::MillisTimestamp;

type HmacSha256 = Hmac<Sha256>;

/// A computed request signature and the timestamp it was computed for.
///
/// Both halves must be sent together: `message-hash` carries [`Self::hash`]
/// and `message-date` carries [`Self::timestamp`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    hash: String,
    timestamp: MillisTimestamp,
}

impl Signature {
    /// The lowercase hex HMAC-SHA256 digest.
    #[must_use]
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// The timestamp included in the signed string.
    #[must_use]
    pub const fn timestamp(&self) -> MillisTimestamp {
        self.timestamp
    }
}

/// Signs requests on behalf of a merchant.
#[derive(Debug, Clone)]
pub struct Signer {
    credentials: Credentials,
}

impl Signer {
    /// Creates a signer for the given credentials.
    #[must_use]
    pub const fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// Returns the credentials this signer uses.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Builds the canonical string for a request.
    ///
    /// Empty `values` are treated like `None`.
    #[must_use]
    pub fn canonical_string(
        &self,
        method: &str,
        path: &str,
        values: Option<&FormValues>,
        timestamp: MillisTimestamp,
    ) -> String {
        let mut buf = format!(
            "{}&{}&{}&{}",
            self.credentials.key(),
            timestamp,
            escape(method),
            escape(path)
        );
        if let Some(values) = values.filter(|v| !v.is_empty()) {
            buf.push('&');
            buf.push_str(&values.encode_for_signing());
        }
        buf
    }

    /// Signs a request with the current time.
    ///
    /// `path` is the decoded URL path, as the server sees it.
    ///
    /// # Panics
    ///
    /// Panics if the system clock reads before the Unix epoch (see
    /// [`MillisTimestamp::now`]). Use [`Self::sign_at`] to supply the time.
    #[must_use]
    pub fn sign(&self, method: &str, path: &str, values: Option<&FormValues>) -> Signature {
        self.sign_at(method, path, values, MillisTimestamp::now())
    }

    /// Signs a request as of `timestamp`.
    ///
    /// Deterministic: the same inputs always produce the same hash.
    #[must_use]
    pub fn sign_at(
        &self,
        method: &str,
        path: &str,
        values: Option<&FormValues>,
        timestamp: MillisTimestamp,
    ) -> Signature {
        let canonical = self.canonical_string(method, path, values, timestamp);
        let mut mac = self.mac();
        mac.update(canonical.as_bytes());
        Signature {
            hash: hex::encode(mac.finalize().into_bytes()),
            timestamp,
        }
    }

    /// Checks a hex signature against the request it claims to sign.
    ///
    /// The comparison is constant-time. Malformed hex never verifies.
    #[must_use]
    pub fn verify(
        &self,
        hash: &str,
        method: &str,
        path: &str,
        values: Option<&FormValues>,
        timestamp: MillisTimestamp,
    ) -> bool {
        let Ok(expected) = hex::decode(hash) else {
            return false;
        };
        let canonical = self.canonical_string(method, path, values, timestamp);
        let mut mac = self.mac();
        mac.update(canonical.as_bytes());
        mac.verify_slice(&expected).is_ok()
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(self.credentials.secret().as_bytes())
            .expect("HMAC accepts any key length")
    }
}
