use crossterm::event::{KeyEvent, MouseEvent};

/// Things that can happen to this app
#[derive(Debug)]
pub enum Action {
    /// The user did something on the keyboard
    Key(KeyEvent),

    /// The user clicked somewhere
    Mouse(MouseEvent),

    /// A request finished; the controllers need to know how it went
    Resolved(lexsearch_core::Action),

    /// Something bad happened; display it to the user
    Problem(String),
}
