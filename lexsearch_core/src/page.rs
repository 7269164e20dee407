use crate::api::history;
use crate::mode::{Field, ModalMode};
use thiserror::Error;

/// Everything the controllers need from the page hosting them. Browsers
/// implement this over the DOM, the terminal app over its own widgets, and
/// tests over a recorder.
///
/// Controllers never look anything up themselves; whatever bindings the page
/// needs should be resolved once, when it's constructed.
pub trait Page {
    /// Replace the modal's title, button, switch text, and inputs. Any inputs
    /// from a previous render must be gone afterwards.
    fn render_modal(&mut self, render: &ModalRender);

    /// Show or hide the modal backdrop.
    fn set_modal_visible(&mut self, visible: bool);

    /// Enable or disable the modal's submit control.
    fn set_submit_enabled(&mut self, enabled: bool);

    /// Show (or clear, with `None`) a non-blocking error inside the modal.
    fn set_inline_error(&mut self, message: Option<&str>);

    /// Read the current value of one of the modal's inputs.
    ///
    /// ## Errors
    ///
    /// `Missing` if the input isn't on the page.
    fn field_value(&self, field: Field) -> Result<String, Missing>;

    /// Tell the user something.
    fn notify(&mut self, notification: Notification);

    /// Go somewhere else on the site.
    fn navigate(&mut self, path: &str);

    /// Reload the current view so anything the server renders (like the nav
    /// bar) reflects the new session.
    fn reload(&mut self);

    /// Display search history. Pages that navigate to a server-rendered
    /// history view instead can ignore this.
    fn show_history(&mut self, _history: &history::Resp) {}
}

/// An input we expected on the page wasn't there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("the {} input is missing from the page", .0.label())]
pub struct Missing(pub Field);

/// What the modal should look like for a given mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalRender {
    /// The mode being rendered
    pub mode: ModalMode,

    /// Heading
    pub title: &'static str,

    /// Submit button label
    pub action_label: &'static str,

    /// Text before the switch link
    pub switch_prompt: &'static str,

    /// The switch link
    pub switch_label: &'static str,

    /// Inputs, in order
    pub fields: &'static [Field],
}

impl From<ModalMode> for ModalRender {
    fn from(mode: ModalMode) -> Self {
        Self {
            mode,
            title: mode.title(),
            action_label: mode.action_label(),
            switch_prompt: mode.switch_prompt(),
            switch_label: mode.switch_label(),
            fields: mode.fields(),
        }
    }
}

/// Where a click on the modal landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The backdrop element itself, outside the content box.
    Backdrop,

    /// Anything inside the content box.
    Content,
}

/// How a notification should feel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Something worked
    Success,

    /// Something didn't
    Failure,
}

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Success or failure
    pub level: Level,

    /// What to say
    pub message: String,

    /// Blocking notifications demand acknowledgement (an alert in the
    /// browser.) Non-blocking ones just show up.
    pub blocking: bool,
}

impl Notification {
    /// A blocking success message.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
            blocking: true,
        }
    }

    /// A blocking failure message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            level: Level::Failure,
            message: message.into(),
            blocking: true,
        }
    }

    /// The same message, shown without demanding acknowledgement.
    #[must_use]
    pub fn non_blocking(self) -> Self {
        Self {
            blocking: false,
            ..self
        }
    }
}
