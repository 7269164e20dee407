use serde::{Deserialize, Serialize};

/// The request to register a new account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Req {
    /// Email to use for contact and login.
    pub email: String,

    /// Plaintext password to use for login.
    pub pwd: String,

    /// The name of the person registering.
    pub name: String,

    /// Date of birth, as the browser's date input formats it (`YYYY-MM-DD`.)
    pub dob: String,
}

/// Result of registering a new account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resp {
    /// Status code for the registration. Zero means the account was created;
    /// anything else (or nothing at all) means it wasn't.
    #[serde(default)]
    pub registration: Option<i64>,
}

impl Resp {
    /// Did the server create the account?
    pub fn is_success(&self) -> bool {
        self.registration == Some(0)
    }
}

/// Where the register endpoint lives.
pub const PATH: &str = "/register";
