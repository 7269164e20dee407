use super::Action;
use lexsearch_core::{page::Notification, Client};

/// Things that can happen as a result of user input. Side effects!
#[derive(Debug)]
pub enum Effect {
    /// Make a request to the backend
    Request(lexsearch_core::Effect),

    /// Pop up a desktop notification for something the user has to see
    Notify(Notification),
}

impl Effect {
    /// Perform the side-effectful portions of this effect, returning the next
    /// `Action` the application needs to handle
    pub async fn run(self, client: &Client) -> Option<Action> {
        match self {
            Self::Request(effect) => Some(Action::Resolved(effect.run(client).await)),

            Self::Notify(notification) => {
                tracing::debug!(message = %notification.message, "notifying");

                if notification.blocking {
                    // We don't care if the notification failed to show. It's
                    // in the status line too.
                    let _ = notify_rust::Notification::new()
                        .summary("lexsearch")
                        .body(&notification.message)
                        .show();
                }

                None
            }
        }
    }
}
