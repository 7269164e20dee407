use crate::action::Action;
use crate::api::{login, register, Client, Error};

/// Requests the controllers want made. The shell runs these (each one is a
/// suspend point) and feeds the resulting `Action` back in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Create a new account
    Register(register::Req),

    /// Log in to an existing account
    LogIn(login::Req),

    /// End the current session
    LogOut,

    /// Get search history
    FetchHistory,
}

impl Effect {
    /// Perform the request, returning the next `Action` the controllers need
    /// to handle. Failures are carried in the action rather than returned, so
    /// every caller has to deal with both outcomes.
    pub async fn run(self, client: &Client) -> Action {
        match self {
            Self::Register(req) => {
                tracing::info!("registering");
                Action::Registered(client.register(&req).await)
            }

            Self::LogIn(req) => {
                tracing::info!("logging in");
                Action::LoggedIn(client.login(&req).await)
            }

            Self::LogOut => {
                tracing::info!("logging out");
                Action::LoggedOut(client.logout().await)
            }

            Self::FetchHistory => {
                tracing::info!("fetching history");
                Action::GotHistory(client.history().await)
            }
        }
    }

    /// The action to feed back when the shell gives up waiting on this
    /// effect.
    pub fn timed_out(self) -> Action {
        tracing::warn!(effect = self.name(), "effect timed out");

        match self {
            Self::Register(_) => Action::Registered(Err(Error::TimedOut)),
            Self::LogIn(_) => Action::LoggedIn(Err(Error::TimedOut)),
            Self::LogOut => Action::LoggedOut(Err(Error::TimedOut)),
            Self::FetchHistory => Action::GotHistory(Err(Error::TimedOut)),
        }
    }

    /// A name for logs that doesn't include any credentials.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Register(_) => "register",
            Self::LogIn(_) => "login",
            Self::LogOut => "logout",
            Self::FetchHistory => "history",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_out_fails_the_matching_action() {
        let req = login::Req {
            email: "a@example.com".to_string(),
            pwd: "hunter2".to_string(),
        };

        assert!(matches!(
            Effect::LogIn(req).timed_out(),
            Action::LoggedIn(Err(Error::TimedOut))
        ));
        assert!(matches!(
            Effect::LogOut.timed_out(),
            Action::LoggedOut(Err(Error::TimedOut))
        ));
        assert!(matches!(
            Effect::FetchHistory.timed_out(),
            Action::GotHistory(Err(Error::TimedOut))
        ));
    }

    #[test]
    fn names_leave_out_credentials() {
        let req = register::Req {
            email: "a@example.com".to_string(),
            pwd: "hunter2".to_string(),
            name: "A".to_string(),
            dob: "1990-01-01".to_string(),
        };

        assert_eq!(Effect::Register(req).name(), "register");
    }
}
