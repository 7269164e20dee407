use serde::{Deserialize, Serialize};

/// The request to log into the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Req {
    /// Email to use for contact and login.
    pub email: String,

    /// Plaintext password to use for login.
    pub pwd: String,
}

/// Result of logging in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resp {
    /// `false` when the credentials didn't match an account.
    #[serde(default)]
    pub login: Option<bool>,
}

impl Resp {
    /// Only an explicit `false` is a rejection. Any other body counts as a
    /// successful login.
    pub fn is_rejected(&self) -> bool {
        self.login == Some(false)
    }
}

/// Where the login endpoint lives.
pub const PATH: &str = "/login";
