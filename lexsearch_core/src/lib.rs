//! Common code across all lexsearch front ends (the terminal app and WASM in
//! the browser.)

/// Talk to the lexsearch backend.
pub mod api;
pub use api::Client;

/// The login/registration modal.
pub mod modal;
pub use modal::AuthModal;

/// Modal modes and the fields each one shows.
pub mod mode;
pub use mode::{Field, ModalMode};

/// The seam between controllers and whatever is hosting them.
pub mod page;
pub use page::Page;

/// Logout and history actions.
pub mod session;

/// Everything that can happen to the controllers.
pub mod action;
pub use action::Action;

/// Requests the controllers ask the shell to make.
pub mod effect;
pub use effect::Effect;

/// Dispatch actions to the right controller.
pub mod controller;
pub use controller::Controller;

/// Render search results.
pub mod results;
