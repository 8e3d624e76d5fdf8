//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (`main.rs`) and the domain and API layers.
//!
//! # Architecture
//!
//! ```text
//! Key press ──► Event ──► handle_event ──► state mutations ──► Actions
//!                              ▲                                  │
//!                              └──── ApiResponse ◄── host ◄───────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`buffer`]: The shared draft record and result list
//! - [`form`]: Input text and focus layered over the draft
//! - [`handler`]: Event processing and the request lifecycle
//! - [`modes`]: The five-mode state machine
//! - [`notifications`]: Success, delete and error messages
//! - [`state`]: Central state container and view model computation

pub mod actions;
pub mod buffer;
pub mod form;
pub mod handler;
pub mod modes;
pub mod notifications;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{Mode, ModeController};
pub use state::AppState;
