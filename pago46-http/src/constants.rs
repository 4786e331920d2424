//! HTTP-specific constants for the Pago46 API.

/// Header carrying the public merchant key (or receiver id).
pub const MERCHANT_KEY_HEADER: &str = "merchant-key";

/// Header carrying the hex HMAC-SHA256 request signature.
pub const MESSAGE_HASH_HEADER: &str = "message-hash";

/// Header carrying the millisecond timestamp that was signed.
pub const MESSAGE_DATE_HEADER: &str = "message-date";

/// Content type sent with every request, bodies or not.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Default (sandbox) API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://testapi.pago46.com";
