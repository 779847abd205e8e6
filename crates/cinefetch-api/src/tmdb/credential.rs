//! Opaque authorization value for the TMDB API.

use std::fmt;

/// Authorization credential sent with every TMDB request.
///
/// A value of the form `<scheme> <credentials>` (`Bearer ...`, `Token ...`)
/// is sent as-is; a bare token without whitespace is sent as `Bearer <token>`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wraps a token or a full `Authorization` header value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(String::from(value.into().trim()))
    }

    /// Returns the value for the `Authorization` header.
    #[must_use]
    pub fn header_value(&self) -> String {
        if self.0.contains(char::is_whitespace) {
            self.0.clone()
        } else {
            format!("Bearer {}", self.0)
        }
    }

    /// Returns `true` if no token was supplied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}
