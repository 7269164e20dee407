use super::auth_form::AuthForm;
use lexsearch_core::api::history;
use lexsearch_core::page::{ClickTarget, Missing, ModalRender, Notification, Page};
use lexsearch_core::session::ROOT_PATH;
use lexsearch_core::Field;
use std::mem;

/// The terminal's version of the page: the modal form, the current view, and
/// a status line. Notifications are queued here for the app to pick up.
#[derive(Debug)]
pub struct TerminalPage {
    /// The modal form. Replaced wholesale on every render.
    form: Option<AuthForm>,

    /// Is the modal on screen?
    visible: bool,

    /// Which view we're showing
    route: String,

    /// Status to display (visible at the bottom of the screen)
    pub status_line: Option<String>,

    /// Notifications the app hasn't shown yet
    notifications: Vec<Notification>,

    /// History for the history view, once it arrives
    history: Option<history::Resp>,
}

impl TerminalPage {
    /// A page showing the home view.
    pub fn new() -> Self {
        Self {
            form: None,
            visible: false,
            route: ROOT_PATH.to_string(),
            status_line: None,
            notifications: Vec::new(),
            history: None,
        }
    }

    /// The modal form, if it's on screen.
    pub fn visible_form(&self) -> Option<&AuthForm> {
        self.form.as_ref().filter(|_| self.visible)
    }

    /// The modal form, if it's on screen.
    pub fn visible_form_mut(&mut self) -> Option<&mut AuthForm> {
        if self.visible {
            self.form.as_mut()
        } else {
            None
        }
    }

    /// Where did a click land? Without a modal on screen, everything is
    /// backdrop.
    pub fn hit(&self, column: u16, row: u16) -> ClickTarget {
        self.visible_form()
            .map_or(ClickTarget::Backdrop, |form| form.hit(column, row))
    }

    /// Which view we're showing.
    pub fn route(&self) -> &str {
        &self.route
    }

    /// History, if we have any.
    pub fn history(&self) -> Option<&history::Resp> {
        self.history.as_ref()
    }

    /// Notifications that haven't been shown yet.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        mem::take(&mut self.notifications)
    }
}

impl Page for TerminalPage {
    fn render_modal(&mut self, render: &ModalRender) {
        self.form = Some(AuthForm::new(render));
    }

    fn set_modal_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        if let Some(form) = &mut self.form {
            form.submit_enabled = enabled;
        }
    }

    fn set_inline_error(&mut self, message: Option<&str>) {
        if let Some(form) = &mut self.form {
            form.inline_error = message.map(str::to_string);
        }
    }

    fn field_value(&self, field: Field) -> Result<String, Missing> {
        self.form
            .as_ref()
            .and_then(|form| form.value(field))
            .ok_or(Missing(field))
    }

    fn notify(&mut self, notification: Notification) {
        self.status_line = Some(notification.message.clone());
        self.notifications.push(notification);
    }

    fn navigate(&mut self, path: &str) {
        tracing::debug!(path, "navigating");

        if path != self.route {
            self.history = None;
        }

        self.route = path.to_string();
    }

    fn reload(&mut self) {
        // Nothing here is rendered by the server. The nav bar follows the
        // session on its own.
        tracing::debug!(route = %self.route, "reloading");
    }

    fn show_history(&mut self, history: &history::Resp) {
        self.history = Some(history.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexsearch_core::ModalMode;

    #[test]
    fn rendering_replaces_the_form() {
        let mut page = TerminalPage::new();

        page.render_modal(&ModalRender::from(ModalMode::Register));
        page.render_modal(&ModalRender::from(ModalMode::Login));

        assert_eq!(page.field_value(Field::Name), Err(Missing(Field::Name)));
        assert_eq!(page.field_value(Field::Email), Ok(String::new()));
    }

    #[test]
    fn hidden_forms_are_not_visible() {
        let mut page = TerminalPage::new();

        page.render_modal(&ModalRender::from(ModalMode::Login));
        assert!(page.visible_form().is_none());

        page.set_modal_visible(true);
        assert!(page.visible_form().is_some());
    }

    #[test]
    fn navigating_away_drops_history() {
        let mut page = TerminalPage::new();

        page.navigate("/history");
        page.show_history(&serde_json::json!([]));
        assert_eq!(page.route(), "/history");
        assert!(page.history().is_some());

        page.navigate("/");
        assert!(page.history().is_none());
    }

    #[test]
    fn notifications_show_in_the_status_line() {
        let mut page = TerminalPage::new();

        page.notify(Notification::success("Login successful"));

        assert_eq!(page.status_line.as_deref(), Some("Login successful"));
        assert_eq!(page.take_notifications().len(), 1);
        assert!(page.take_notifications().is_empty());
    }
}
