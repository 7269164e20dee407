use crate::api::{error, login, register};
use crate::effect::Effect;
use crate::mode::{Field, ModalMode};
use crate::page::{ClickTarget, Missing, ModalRender, Notification, Page};

/// State for the login/registration modal.
///
/// The modal is either hidden, or showing exactly one mode. Every change of
/// mode re-renders the whole form, so nothing from the other mode survives.
#[derive(Debug, Default)]
pub struct AuthModal {
    /// Is the modal on screen?
    visible: bool,

    /// Which form is showing. Reset to `Login` whenever the modal closes.
    mode: ModalMode,

    /// Is a submission waiting on the backend?
    in_flight: bool,

    /// A failure that came back while the modal was closed. Shown on the
    /// next open.
    pending_error: Option<String>,
}

impl AuthModal {
    /// A hidden modal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Is the modal on screen?
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Which form is showing (or would show, if opened.)
    pub fn mode(&self) -> ModalMode {
        self.mode
    }

    /// Is a submission waiting on the backend?
    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }

    /// Show the modal in the given mode, replacing whatever it showed before.
    pub fn open(&mut self, mode: ModalMode, page: &mut impl Page) {
        tracing::debug!(?mode, "opening auth modal");

        self.mode = mode;
        self.visible = true;

        page.render_modal(&ModalRender::from(mode));
        page.set_inline_error(self.pending_error.take().as_deref());
        page.set_submit_enabled(!self.in_flight);
        page.set_modal_visible(true);
    }

    /// Switch to the other mode.
    pub fn toggle(&mut self, page: &mut impl Page) {
        self.open(self.mode.opposite(), page);
    }

    /// Hide the modal. The next `open` starts fresh.
    pub fn close(&mut self, page: &mut impl Page) {
        tracing::debug!("closing auth modal");

        self.visible = false;
        self.mode = ModalMode::default();

        page.set_modal_visible(false);
    }

    /// Only clicks on the backdrop itself close the modal.
    pub fn clicked(&mut self, target: ClickTarget, page: &mut impl Page) {
        if target == ClickTarget::Backdrop {
            self.close(page);
        }
    }

    /// Read the form and produce the request for the current mode. Nothing
    /// happens if the modal is hidden or a submission is already waiting on
    /// the backend.
    pub fn submit(&mut self, page: &mut impl Page) -> Option<Effect> {
        if !self.visible {
            tracing::debug!("ignoring submit on a hidden modal");
            return None;
        }

        if self.in_flight {
            tracing::debug!("ignoring submit while a request is outstanding");
            return None;
        }

        match self.request(page) {
            Ok(effect) => {
                self.in_flight = true;
                page.set_inline_error(None);
                page.set_submit_enabled(false);

                Some(effect)
            }
            Err(missing) => {
                tracing::warn!(%missing, "can't submit auth form");
                page.set_inline_error(Some(missing.to_string().as_str()));

                None
            }
        }
    }

    /// Build the request for the current mode from the page's inputs.
    fn request(&self, page: &impl Page) -> Result<Effect, Missing> {
        let email = page.field_value(Field::Email)?;
        let pwd = page.field_value(Field::Password)?;

        Ok(match self.mode {
            ModalMode::Login => Effect::LogIn(login::Req { email, pwd }),
            ModalMode::Register => Effect::Register(register::Req {
                email,
                pwd,
                name: page.field_value(Field::Name)?,
                dob: page.field_value(Field::DateOfBirth)?,
            }),
        })
    }

    /// Handle the backend's answer to a registration.
    pub fn registered(&mut self, result: error::Result<register::Resp>, page: &mut impl Page) {
        self.finish(page);

        match result {
            Ok(resp) if resp.is_success() => {
                tracing::info!("registered");
                page.notify(Notification::success(format!(
                    "{} successful",
                    ModalMode::Register.title()
                )));

                self.open(ModalMode::Login, page);
            }
            Ok(resp) => {
                tracing::info!(status = ?resp.registration, "registration rejected");
                page.notify(Notification::failure(match resp.registration {
                    Some(status) => format!("Registration failed (status {status})"),
                    None => "Registration failed".to_string(),
                }));
            }
            Err(err) => self.transport_failure(&err, page),
        }
    }

    /// Handle the backend's answer to a login.
    pub fn logged_in(&mut self, result: error::Result<login::Resp>, page: &mut impl Page) {
        self.finish(page);

        match result {
            Ok(resp) if resp.is_rejected() => {
                tracing::info!("login rejected");
                page.notify(Notification::failure(format!(
                    "{} credentials not found",
                    ModalMode::Login.title()
                )));
            }
            Ok(_) => {
                tracing::info!("logged in");
                page.notify(Notification::success(format!(
                    "{} successful",
                    ModalMode::Login.title()
                )));

                self.close(page);
                page.reload();
            }
            Err(err) => self.transport_failure(&err, page),
        }
    }

    /// The request is done, one way or another. Let the user submit again.
    fn finish(&mut self, page: &mut impl Page) {
        self.in_flight = false;
        page.set_submit_enabled(true);
    }

    /// Show what went wrong without closing anything, so the user can retry.
    /// A closed modal gets a notice instead, and the message waits for the
    /// next open.
    fn transport_failure(&mut self, err: &error::Error, page: &mut impl Page) {
        tracing::error!(?err, "auth request failed");

        let message = if err.is_timeout() {
            "The server took too long to respond. Please try again.".to_string()
        } else {
            format!("Could not reach the server ({err}). Please try again.")
        };

        if self.visible {
            page.set_inline_error(Some(message.as_str()));
        } else {
            page.notify(Notification::failure(message.as_str()).non_blocking());
            self.pending_error = Some(message);
        }
    }
}
