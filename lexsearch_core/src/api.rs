/// Things that can go wrong in the API
pub mod error;
pub use error::Error;

/// The HTTP client for the backend
pub mod client;
pub use client::Client;

/// Create a new account
pub mod register;

/// Log into an existing account
pub mod login;

/// End the current session
pub mod logout;

/// Past searches for the current account
pub mod history;
