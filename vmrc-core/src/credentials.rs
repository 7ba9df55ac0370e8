use serde::{Deserialize, Serialize};

/// Username/password pair handed to logon.
///
/// Both fields may be empty; the server treats an empty pair as
/// anonymous/local access.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Creates a credential pair from any string-like values.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }

    /// The empty pair selecting anonymous/local access.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }
}
