/// Things that can happen to this app
mod action;
pub use action::Action;

/// The modal form as drawn in the terminal
mod auth_form;

/// Side effects
mod effect;
pub use effect::Effect;

/// The terminal's implementation of the page bindings
mod page;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use lexsearch_core::{
    session::{HISTORY_PATH, ROOT_PATH},
    Controller, ModalMode, Page,
};
use page::TerminalPage;
use ratatui::{
    layout::{Constraint, Layout},
    style::{Color, Stylize},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::process::ExitCode;

/// The "functional core" of the app.
pub struct App {
    /// Modal and session controllers
    controller: Controller,

    /// What the controllers draw into
    page: TerminalPage,

    /// Which nav bar to show
    nav: Nav,

    /// Set once the user asks to quit
    exit: Option<ExitCode>,
}

/// The nav bar changes depending on whether you're logged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Nav {
    /// Offer to log in or register
    Guest,

    /// Offer history and logout
    Member,
}

impl App {
    /// Create a new instance of the app
    pub fn new() -> Self {
        Self {
            controller: Controller::new(),
            page: TerminalPage::new(),
            nav: Nav::Guest,
            exit: None,
        }
    }

    /// Render the app's UI to the screen
    pub fn render(&mut self, frame: &mut Frame) {
        let vertical = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ]);
        let [nav_area, body_area, status_area] = vertical.areas(frame.area());

        let nav = match self.nav {
            Nav::Guest => "[l] Login  [r] Register  [q] Quit",
            Nav::Member => "[h] History  [o] Logout  [q] Quit",
        };
        frame.render_widget(Paragraph::new(nav).bg(Color::DarkGray).fg(Color::White), nav_area);

        let body = if self.page.route() == HISTORY_PATH {
            let text = match self.page.history() {
                Some(history) => serde_json::to_string_pretty(history)
                    .unwrap_or_else(|err| format!("Couldn't display history: {err}")),
                None => "Loading history…".to_string(),
            };

            Paragraph::new(text)
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::ALL).title("History  [b] back"))
        } else {
            Paragraph::new("Search Indian case law on the web; manage your account here.")
                .block(Block::default().borders(Borders::ALL).title("lexsearch"))
        };
        frame.render_widget(body, body_area);

        if let Some(form) = self.page.visible_form_mut() {
            form.render(body_area, frame);
        }

        let status = Paragraph::new(match &self.page.status_line {
            Some(line) => line.as_str(),
            None => "All good!",
        });
        frame.render_widget(status, status_area);
    }

    /// Handle an `Action`, updating the app's state and producing some side effect(s)
    pub fn handle(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    return vec![];
                }

                match self.key_action(key) {
                    Some(action) => self.dispatch(action),
                    None => vec![],
                }
            }
            Action::Mouse(mouse) => match self.mouse_action(mouse) {
                Some(action) => self.dispatch(action),
                None => vec![],
            },
            Action::Resolved(action) => self.dispatch(action),
            Action::Problem(problem) => {
                tracing::error!("problem in the event loop: {problem}");
                self.page.status_line = Some(problem);

                vec![]
            }
        }
    }

    /// Translate a key press into something for the controllers, handling
    /// purely local keys (focus, typing, quitting) along the way.
    fn key_action(&mut self, key: KeyEvent) -> Option<lexsearch_core::Action> {
        if let Some(form) = self.page.visible_form_mut() {
            return match key.code {
                KeyCode::Esc => Some(lexsearch_core::Action::Close),
                KeyCode::Enter => Some(lexsearch_core::Action::Submit),
                KeyCode::F(2) => Some(lexsearch_core::Action::Toggle),
                _ => {
                    form.handle_event(key);
                    None
                }
            };
        }

        match (key.code, self.nav) {
            (KeyCode::Char('q'), _) => {
                self.exit = Some(ExitCode::SUCCESS);
                None
            }
            (KeyCode::Char('b') | KeyCode::Esc, _) if self.page.route() != ROOT_PATH => {
                self.page.navigate(ROOT_PATH);
                None
            }
            (KeyCode::Char('l'), Nav::Guest) => Some(lexsearch_core::Action::Open(ModalMode::Login)),
            (KeyCode::Char('r'), Nav::Guest) => {
                Some(lexsearch_core::Action::Open(ModalMode::Register))
            }
            (KeyCode::Char('o'), Nav::Member) => Some(lexsearch_core::Action::LogOut),
            (KeyCode::Char('h'), Nav::Member) => Some(lexsearch_core::Action::ViewHistory),
            _ => {
                self.page.status_line = Some(format!("Unknown key {:?}", key.code));
                None
            }
        }
    }

    /// Left clicks on the modal are either on the form or on the backdrop.
    fn mouse_action(&self, mouse: MouseEvent) -> Option<lexsearch_core::Action> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return None;
        }

        self.page.visible_form()?;

        Some(lexsearch_core::Action::Clicked(
            self.page.hit(mouse.column, mouse.row),
        ))
    }

    /// Run an action through the controllers and collect everything that
    /// needs to happen next.
    fn dispatch(&mut self, action: lexsearch_core::Action) -> Vec<Effect> {
        self.track_session(&action);

        let mut effects: Vec<Effect> = self
            .controller
            .handle(action, &mut self.page)
            .into_iter()
            .map(Effect::Request)
            .collect();

        effects.extend(self.page.take_notifications().into_iter().map(Effect::Notify));

        effects
    }

    /// Keep the nav bar in step with the session. In the browser, the server
    /// renders this after the reload that follows a login.
    fn track_session(&mut self, action: &lexsearch_core::Action) {
        match action {
            lexsearch_core::Action::LoggedIn(Ok(resp)) if !resp.is_rejected() => {
                self.nav = Nav::Member;
            }
            lexsearch_core::Action::LoggedOut(Ok(resp)) if resp.is_logged_out() => {
                self.nav = Nav::Guest;
            }
            _ => {}
        }
    }

    /// Let the TUI manager know whether we're all wrapped up and can exit.
    pub fn should_exit(&self) -> Option<ExitCode> {
        self.exit
    }
}
