use crate::api::{error, history, logout};
use crate::effect::Effect;
use crate::page::{Notification, Page};

/// Where a successful logout sends you.
pub const ROOT_PATH: &str = "/";

/// Where the history control sends you.
pub const HISTORY_PATH: &str = "/history";

/// The logout control was clicked.
pub fn log_out() -> Effect {
    Effect::LogOut
}

/// Handle the backend's answer to a logout. Only `{"login": false}` counts as
/// logged out; anything else leaves the user where they are.
pub fn logged_out(result: error::Result<logout::Resp>, page: &mut impl Page) {
    match result {
        Ok(resp) if resp.is_logged_out() => {
            tracing::info!("logged out");
            page.notify(Notification::success("Logged out successfully!"));
            page.navigate(ROOT_PATH);
        }
        Ok(resp) => tracing::debug!(?resp, "logout response didn't end the session"),
        Err(err) => tracing::error!(?err, "logout failed"),
    }
}

/// The history control was clicked. Navigates right away and asks for the
/// history alongside; navigation doesn't wait on the request.
pub fn view_history(page: &mut impl Page) -> Effect {
    page.navigate(HISTORY_PATH);

    Effect::FetchHistory
}

/// Handle history sent by the backend.
pub fn got_history(result: error::Result<history::Resp>, page: &mut impl Page) {
    match result {
        Ok(history) => page.show_history(&history),
        Err(err) => tracing::error!(?err, "couldn't fetch history"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Error;
    use crate::test::FakePage;
    use serde_json::json;

    #[test]
    fn logout_is_a_bodyless_request() {
        assert_eq!(log_out(), Effect::LogOut);
    }

    #[test]
    fn logged_out_goes_home() {
        let mut page = FakePage::default();

        logged_out(Ok(logout::Resp { login: Some(false) }), &mut page);

        assert_eq!(page.navigations, vec!["/".to_string()]);
        assert_eq!(page.last_message(), Some("Logged out successfully!"));
    }

    #[test]
    fn still_logged_in_stays_put() {
        let mut page = FakePage::default();

        logged_out(Ok(logout::Resp { login: Some(true) }), &mut page);

        assert!(page.navigations.is_empty());
        assert!(page.notifications.is_empty());
    }

    #[test]
    fn other_shapes_stay_put() {
        let mut page = FakePage::default();

        logged_out(Ok(logout::Resp { login: None }), &mut page);

        assert!(page.navigations.is_empty());
    }

    #[test]
    fn failed_logout_is_silent() {
        let mut page = FakePage::default();

        logged_out(Err(Error::TimedOut), &mut page);

        assert!(page.navigations.is_empty());
        assert!(page.notifications.is_empty());
    }

    #[test]
    fn history_navigates_right_away() {
        let mut page = FakePage::default();

        let effect = view_history(&mut page);

        assert_eq!(effect, Effect::FetchHistory);
        assert_eq!(page.navigations, vec!["/history".to_string()]);
    }

    #[test]
    fn history_is_shown() {
        let mut page = FakePage::default();

        got_history(Ok(json!([{"query": "robbery"}])), &mut page);

        assert_eq!(page.history, Some(json!([{"query": "robbery"}])));
    }
}
