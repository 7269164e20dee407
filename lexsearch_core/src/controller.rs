use crate::action::Action;
use crate::effect::Effect;
use crate::modal::AuthModal;
use crate::page::Page;
use crate::session;

/// Routes actions to the auth modal and the session handlers.
#[derive(Debug, Default)]
pub struct Controller {
    /// The login/registration modal
    modal: AuthModal,
}

impl Controller {
    /// A controller with a hidden modal.
    pub fn new() -> Self {
        Self::default()
    }

    /// The modal's current state.
    pub fn modal(&self) -> &AuthModal {
        &self.modal
    }

    /// Handle an `Action`, updating the page and producing any requests that
    /// need to be made.
    pub fn handle(&mut self, action: Action, page: &mut impl Page) -> Vec<Effect> {
        match action {
            Action::Open(mode) => {
                self.modal.open(mode, page);
                vec![]
            }
            Action::Toggle => {
                self.modal.toggle(page);
                vec![]
            }
            Action::Close => {
                self.modal.close(page);
                vec![]
            }
            Action::Clicked(target) => {
                self.modal.clicked(target, page);
                vec![]
            }
            Action::Submit => self.modal.submit(page).into_iter().collect(),
            Action::Registered(result) => {
                self.modal.registered(result, page);
                vec![]
            }
            Action::LoggedIn(result) => {
                self.modal.logged_in(result, page);
                vec![]
            }
            Action::LogOut => vec![session::log_out()],
            Action::LoggedOut(result) => {
                session::logged_out(result, page);
                vec![]
            }
            Action::ViewHistory => vec![session::view_history(page)],
            Action::GotHistory(result) => {
                session::got_history(result, page);
                vec![]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{login, logout};
    use crate::mode::{Field, ModalMode};
    use crate::page::ClickTarget;
    use crate::test::FakePage;

    #[test]
    fn login_round_trip() {
        let mut controller = Controller::new();
        let mut page = FakePage::default();

        controller.handle(Action::Open(ModalMode::Register), &mut page);
        controller.handle(Action::Toggle, &mut page);
        page.type_into(Field::Email, "a@example.com");
        page.type_into(Field::Password, "hunter2");

        let effects = controller.handle(Action::Submit, &mut page);
        assert_eq!(
            effects,
            vec![Effect::LogIn(login::Req {
                email: "a@example.com".to_string(),
                pwd: "hunter2".to_string(),
            })]
        );

        let effects = controller.handle(
            Action::LoggedIn(Ok(login::Resp { login: Some(true) })),
            &mut page,
        );
        assert!(effects.is_empty());
        assert!(!controller.modal().is_visible());
        assert_eq!(page.reloads, 1);
    }

    #[test]
    fn content_clicks_are_ignored() {
        let mut controller = Controller::new();
        let mut page = FakePage::default();

        controller.handle(Action::Open(ModalMode::Login), &mut page);
        controller.handle(Action::Clicked(ClickTarget::Content), &mut page);
        assert!(controller.modal().is_visible());

        controller.handle(Action::Clicked(ClickTarget::Backdrop), &mut page);
        assert!(!controller.modal().is_visible());
    }

    #[test]
    fn logout_round_trip() {
        let mut controller = Controller::new();
        let mut page = FakePage::default();

        assert_eq!(
            controller.handle(Action::LogOut, &mut page),
            vec![Effect::LogOut]
        );

        controller.handle(
            Action::LoggedOut(Ok(logout::Resp { login: Some(false) })),
            &mut page,
        );
        assert_eq!(page.navigations, vec!["/".to_string()]);
    }

    #[test]
    fn history_navigates_and_requests() {
        let mut controller = Controller::new();
        let mut page = FakePage::default();

        assert_eq!(
            controller.handle(Action::ViewHistory, &mut page),
            vec![Effect::FetchHistory]
        );
        assert_eq!(page.navigations, vec!["/history".to_string()]);
    }
}
