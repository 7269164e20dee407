use crate::api::{error, history, login, logout, register};
use crate::mode::ModalMode;
use crate::page::ClickTarget;

/// Things that can happen to the controllers, either from the user or as the
/// result of an `Effect`.
#[derive(Debug)]
pub enum Action {
    /// One of the open triggers (or the shell) asked for the modal in a mode
    Open(ModalMode),

    /// The switch link in the modal was clicked
    Toggle,

    /// The close control was used
    Close,

    /// A click landed somewhere on the modal
    Clicked(ClickTarget),

    /// The modal form was submitted
    Submit,

    /// The backend answered a registration
    Registered(error::Result<register::Resp>),

    /// The backend answered a login
    LoggedIn(error::Result<login::Resp>),

    /// The logout control was clicked
    LogOut,

    /// The backend answered a logout
    LoggedOut(error::Result<logout::Resp>),

    /// The history control was clicked
    ViewHistory,

    /// The backend sent search history
    GotHistory(error::Result<history::Resp>),
}
