use crossterm::event::{Event, KeyCode, KeyEvent};
use lexsearch_core::page::{ClickTarget, ModalRender};
use lexsearch_core::Field;
use ratatui::{
    layout::{Constraint, Flex, Layout, Position, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

/// The login/registration form, as drawn in the terminal. A new one is built
/// for every render of the modal, so inputs never outlive their mode.
#[derive(Debug)]
pub struct AuthForm {
    /// Labels for the current mode
    render: ModalRender,

    /// One input per field, in display order
    inputs: Vec<(Field, Input)>,

    /// Which input we're editing
    active: usize,

    /// Can the form be submitted right now?
    pub submit_enabled: bool,

    /// Shown under the inputs when something went wrong
    pub inline_error: Option<String>,

    /// Where we drew ourselves last, for telling backdrop clicks apart from
    /// clicks on the form.
    area: Option<Rect>,
}

impl AuthForm {
    /// An empty form for the given mode.
    pub fn new(render: &ModalRender) -> Self {
        Self {
            render: *render,
            inputs: render
                .fields
                .iter()
                .map(|field| (*field, Input::default()))
                .collect(),
            active: 0,
            submit_enabled: true,
            inline_error: None,
            area: None,
        }
    }

    /// What's currently typed into a field, if this form has it.
    pub fn value(&self, field: Field) -> Option<String> {
        self.inputs
            .iter()
            .find(|(candidate, _)| *candidate == field)
            .map(|(_, input)| input.value().to_string())
    }

    /// The fields this form shows.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.inputs.iter().map(|(field, _)| *field)
    }

    /// Which field has focus.
    pub fn active_field(&self) -> Option<Field> {
        self.inputs.get(self.active).map(|(field, _)| *field)
    }

    /// Did a click at this position land on the form or the backdrop around
    /// it?
    pub fn hit(&self, column: u16, row: u16) -> ClickTarget {
        match self.area {
            Some(area) if area.contains(Position::new(column, row)) => ClickTarget::Content,
            Some(_) => ClickTarget::Backdrop,
            None => ClickTarget::Content,
        }
    }

    /// Move focus with tab/shift-tab, or type into the active field.
    pub fn handle_event(&mut self, key: KeyEvent) {
        let len = self.inputs.len();
        if len == 0 {
            return;
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.active = (self.active + 1) % len;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.active = (self.active + len - 1) % len;
            }
            _ => {
                if let Some((_, input)) = self.inputs.get_mut(self.active) {
                    input.handle_event(&Event::Key(key));
                }
            }
        }
    }

    /// Draw the form centered over the body.
    #[expect(clippy::cast_possible_truncation)]
    pub fn render(&mut self, body_area: Rect, frame: &mut Frame<'_>) {
        let field_rows = self.inputs.len() as u16 * 3;
        let popup_vert =
            Layout::vertical([Constraint::Length(field_rows + 4)]).flex(Flex::Center);
        let popup_horiz = Layout::horizontal([Constraint::Percentage(50)]).flex(Flex::Center);

        let [popup_area] = popup_vert.areas(body_area);
        let [popup_area] = popup_horiz.areas(popup_area);
        self.area = Some(popup_area);

        frame.render_widget(Clear, popup_area);

        let outer = Block::default()
            .borders(Borders::ALL)
            .title(self.render.title)
            .border_style(Style::default().fg(Color::Blue));
        let inner = outer.inner(popup_area);
        frame.render_widget(outer, popup_area);

        let [fields_area, error_area, footer_area] = Layout::vertical([
            Constraint::Length(field_rows),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        let width = fields_area.width.saturating_sub(2 + 1); // -2 for the border, -1 for the cursor
        let rows = Layout::vertical(vec![Constraint::Length(3); self.inputs.len()])
            .split(fields_area);

        for (idx, ((field, input), area)) in self.inputs.iter().zip(rows.iter()).enumerate() {
            let scroll = input.visual_scroll(width as usize);

            let shown = if field.is_secret() {
                "*".repeat(input.value().chars().count())
            } else {
                input.value().to_string()
            };

            let border_style = if idx == self.active {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::Blue)
            };

            let widget = Paragraph::new(shown).scroll((0, scroll as u16)).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(field.label())
                    .border_style(border_style),
            );

            frame.render_widget(widget, *area);

            if idx == self.active {
                frame.set_cursor_position((
                    area.x
                        + (input.visual_cursor().max(scroll) - scroll) as u16 // current end of text
                        + 1, // just past the end of the text
                    area.y + 1, // +1 row for the border/title
                ));
            }
        }

        if let Some(error) = &self.inline_error {
            frame.render_widget(Paragraph::new(error.as_str()).red(), error_area);
        }

        let action = if self.submit_enabled {
            format!("[enter] {}", self.render.action_label)
        } else {
            "Submitting…".to_string()
        };

        let footer = Line::from(format!(
            "{action}  {} [F2] {}  [esc] close",
            self.render.switch_prompt, self.render.switch_label
        ));
        frame.render_widget(Paragraph::new(footer).dark_gray(), footer_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use lexsearch_core::ModalMode;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(form: &mut AuthForm, text: &str) {
        for c in text.chars() {
            form.handle_event(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn inputs_follow_the_mode() {
        let form = AuthForm::new(&ModalRender::from(ModalMode::Register));

        assert_eq!(
            form.fields().collect::<Vec<_>>(),
            ModalMode::Register.fields()
        );
        assert_eq!(form.active_field(), Some(Field::Name));
    }

    #[test]
    fn tab_moves_between_fields() {
        let mut form = AuthForm::new(&ModalRender::from(ModalMode::Login));

        type_str(&mut form, "a@example.com");
        form.handle_event(key(KeyCode::Tab));
        type_str(&mut form, "hunter2");

        assert_eq!(form.value(Field::Email).as_deref(), Some("a@example.com"));
        assert_eq!(form.value(Field::Password).as_deref(), Some("hunter2"));
        assert_eq!(form.value(Field::Name), None);
    }

    #[test]
    fn back_tab_wraps_around() {
        let mut form = AuthForm::new(&ModalRender::from(ModalMode::Login));

        form.handle_event(key(KeyCode::BackTab));

        assert_eq!(form.active_field(), Some(Field::Password));
    }

    #[test]
    fn clicks_before_drawing_count_as_content() {
        let form = AuthForm::new(&ModalRender::from(ModalMode::Login));

        assert_eq!(form.hit(0, 0), ClickTarget::Content);
    }
}
