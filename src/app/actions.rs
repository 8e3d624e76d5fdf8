//! Side effects requested by the event handler.
//!
//! The handler never talks to the host directly. It returns a `Vec<Action>`
//! and the plugin runtime executes them in order after the state update.

use crate::api::ApiRequest;

/// Commands executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Hands an HTTP exchange to the host. The result comes back later as a
    /// separate event carrying the request's context.
    SendRequest(ApiRequest),
}
