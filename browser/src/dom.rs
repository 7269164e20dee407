use lexsearch_core::api::history;
use lexsearch_core::page::{Missing, ModalRender, Notification, Page};
use lexsearch_core::Field;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, Window};

/// Marks the switch link so one delegated handler on its container can find
/// it, no matter how many times the link is re-rendered.
pub const TOGGLE_ACTION: &str = "toggle-mode";

/// Element IDs the page is built from.
pub mod ids {
    /// The modal backdrop
    pub const MODAL: &str = "auth-mod";
    /// Modal heading
    pub const TITLE: &str = "mod-title";
    /// Submit button
    pub const ACTION_BUTTON: &str = "mod-action-btn";
    /// Holds the switch prompt and link
    pub const SWITCH_TEXT: &str = "mod-switch-text";
    /// Holds the inputs
    pub const FIELDS: &str = "login-form-div";
    /// Inline error line (created if the page doesn't have one)
    pub const ERROR: &str = "mod-error";
    /// The form inside the modal
    pub const FORM: &str = "auth-form";
    /// Nav bar login trigger
    pub const LOGIN_BUTTON: &str = "login-but";
    /// Nav bar register trigger
    pub const REGISTER_BUTTON: &str = "register-but";
    /// Close control
    pub const CLOSE_BUTTON: &str = "close-modal-btn";
    /// Nav bar logout link
    pub const LOGOUT: &str = "logout";
    /// Nav bar history link
    pub const HISTORY: &str = "history";
    /// Where search results go
    pub const RESULTS_LIST: &str = "results-list";
    /// Spinner shown until results render
    pub const RESULTS_LOADER: &str = "l-results";
}

/// The DOM, bound once at startup.
#[derive(Debug)]
pub struct DomPage {
    /// For alerts and navigation
    window: Window,

    /// The modal, if this page has one. Without it, modal calls do nothing
    /// and only the session handlers have any effect.
    modal: Option<ModalElements>,
}

/// Elements the modal is made of.
#[derive(Debug)]
struct ModalElements {
    /// The backdrop, whose display toggles the whole modal
    backdrop: HtmlElement,

    /// Heading
    title: Element,

    /// Submit button
    action_button: Element,

    /// Switch prompt and link
    switch_text: Element,

    /// Container the inputs are rendered into
    fields: Element,

    /// Inline error line
    error: Element,
}

impl DomPage {
    /// Bind the page. Logs and carries on without a modal if any of the
    /// modal's elements are missing.
    pub fn bind(window: &Window, document: &Document) -> Self {
        Self {
            window: window.clone(),
            modal: ModalElements::bind(document),
        }
    }

    /// The backdrop element, for telling backdrop clicks apart from clicks
    /// inside the content box.
    pub fn backdrop(&self) -> Option<&HtmlElement> {
        self.modal.as_ref().map(|modal| &modal.backdrop)
    }

    /// The switch text container, which never gets replaced.
    pub fn switch_text(&self) -> Option<&Element> {
        self.modal.as_ref().map(|modal| &modal.switch_text)
    }
}

impl ModalElements {
    /// Find everything the modal needs.
    fn bind(document: &Document) -> Option<Self> {
        let backdrop = required(document, ids::MODAL)?
            .dyn_into::<HtmlElement>()
            .ok()?;
        let title = required(document, ids::TITLE)?;
        let action_button = required(document, ids::ACTION_BUTTON)?;
        let switch_text = required(document, ids::SWITCH_TEXT)?;
        let fields = required(document, ids::FIELDS)?;

        let error = match document.get_element_by_id(ids::ERROR) {
            Some(error) => error,
            None => create_error_line(document, &fields).ok()?,
        };

        Some(Self {
            backdrop,
            title,
            action_button,
            switch_text,
            fields,
            error,
        })
    }
}

/// Look up an element the modal can't work without.
fn required(document: &Document, id: &str) -> Option<Element> {
    let element = document.get_element_by_id(id);

    if element.is_none() {
        tracing::warn!(id, "auth modal element missing; not wiring the modal");
    }

    element
}

/// Add an empty error line right after the inputs.
fn create_error_line(document: &Document, fields: &Element) -> Result<Element, JsValue> {
    let error = document.create_element("p")?;
    error.set_id(ids::ERROR);
    error.set_class_name("form-error");
    fields.insert_adjacent_element("afterend", &error)?;

    Ok(error)
}

/// Markup for one input.
pub fn field_markup(field: Field) -> String {
    format!(
        r#"<input type="{}" placeholder="{}" class="form-input" name="{}" id="{}" required>"#,
        field.input_type(),
        field.label(),
        field.name(),
        field.id(),
    )
}

/// Markup for the switch prompt and link.
pub fn switch_markup(render: &ModalRender) -> String {
    format!(
        r##"{} <a href="#" id="mod-switch-link" class="link" data-action="{TOGGLE_ACTION}">{}</a>"##,
        render.switch_prompt, render.switch_label,
    )
}

/// CSS selector matching the switch link, for the delegated handler.
pub fn toggle_selector() -> String {
    format!(r#"[data-action="{TOGGLE_ACTION}"]"#)
}

/// DOM calls only fail in ways we can't do anything about, but they're worth
/// a console line.
pub fn log_failure(result: Result<(), JsValue>, what: &str) {
    if let Err(err) = result {
        tracing::error!(?err, "couldn't {what}");
    }
}

impl Page for DomPage {
    fn render_modal(&mut self, render: &ModalRender) {
        let Some(modal) = &self.modal else { return };

        modal.title.set_text_content(Some(render.title));
        modal
            .action_button
            .set_text_content(Some(render.action_label));
        modal.fields.set_inner_html(
            &render
                .fields
                .iter()
                .copied()
                .map(field_markup)
                .collect::<String>(),
        );
        modal.switch_text.set_inner_html(&switch_markup(render));
    }

    fn set_modal_visible(&mut self, visible: bool) {
        let Some(modal) = &self.modal else { return };

        log_failure(
            modal
                .backdrop
                .style()
                .set_property("display", if visible { "flex" } else { "none" }),
            "toggle the modal",
        );
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        let Some(modal) = &self.modal else { return };

        let result = if enabled {
            modal.action_button.remove_attribute("disabled")
        } else {
            modal.action_button.set_attribute("disabled", "")
        };

        log_failure(result, "toggle the submit button");
    }

    fn set_inline_error(&mut self, message: Option<&str>) {
        if let Some(modal) = &self.modal {
            modal.error.set_text_content(message);
        }
    }

    fn field_value(&self, field: Field) -> Result<String, Missing> {
        self.modal
            .as_ref()
            .and_then(|modal| {
                modal
                    .fields
                    .query_selector(&format!("#{}", field.id()))
                    .ok()
                    .flatten()
            })
            .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value())
            .ok_or(Missing(field))
    }

    fn notify(&mut self, notification: Notification) {
        if notification.blocking {
            log_failure(
                self.window.alert_with_message(&notification.message),
                "show an alert",
            );
        } else {
            tracing::info!(message = %notification.message, "notification");
        }
    }

    fn navigate(&mut self, path: &str) {
        log_failure(self.window.location().set_href(path), "navigate");
    }

    fn reload(&mut self) {
        log_failure(self.window.location().reload(), "reload");
    }

    fn show_history(&mut self, history: &history::Resp) {
        tracing::debug!(%history, "history fetched");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexsearch_core::ModalMode;

    #[test]
    fn inputs_keep_their_ids() {
        assert_eq!(
            field_markup(Field::Password),
            r#"<input type="password" placeholder="Password" class="form-input" name="password" id="login-pwd" required>"#
        );
    }

    #[test]
    fn switch_link_is_delegated() {
        let markup = switch_markup(&ModalRender::from(ModalMode::Login));

        assert!(markup.starts_with("Create An Account Today:"));
        assert!(markup.contains(r#"data-action="toggle-mode""#));
        assert!(markup.ends_with(">Register</a>"));
    }

    #[test]
    fn toggle_selector_matches_the_switch_link() {
        let selector = toggle_selector();
        let attribute = selector.trim_start_matches('[').trim_end_matches(']');

        for mode in [ModalMode::Login, ModalMode::Register] {
            assert!(switch_markup(&ModalRender::from(mode)).contains(attribute));
        }
    }
}
