use serde::{Deserialize, Serialize};

/// Result of logging out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resp {
    /// Whether the session is still logged in. A successful logout says
    /// `false` here.
    #[serde(default)]
    pub login: Option<bool>,
}

impl Resp {
    /// Did the server end the session? Only an explicit `login: false` counts.
    pub fn is_logged_out(&self) -> bool {
        self.login == Some(false)
    }
}

/// Where the logout endpoint lives.
pub const PATH: &str = "/logout";
