//! Event handling and state transition logic.
//!
//! [`handle_event`] is the single entry point for everything that happens to
//! the view: key presses translated by the plugin shim, and HTTP results
//! delivered by the host. It mutates [`AppState`] and returns whether the view
//! needs a redraw plus the side effects to run.
//!
//! # Request lifecycle
//!
//! 1. `Submit` validates locally. A rejected draft or id is reported in the
//!    error slot and nothing is sent.
//! 2. Otherwise a ticket is drawn from the [`RequestTracker`](crate::api::RequestTracker)
//!    and an [`Action::SendRequest`] is returned.
//! 3. The result arrives as [`Event::ApiResponse`]. If a newer request of the
//!    same family was issued meanwhile, the result no longer owns the state it
//!    would overwrite; only its merge effects are applied.
//!
//! Failures never escape: they are logged and recorded in the error slot, and
//! the draft, result list and success slots stay as they were.
//!
//! # Example
//!
//! ```rust
//! use stockroom::api::ApiClient;
//! use stockroom::app::{handle_event, Action, AppState, Event};
//! use stockroom::ui::theme::Theme;
//!
//! let mut state = AppState::new(ApiClient::new("http://localhost:3000"), Theme::default());
//! let (render, actions) = handle_event(&mut state, &Event::ListAll)?;
//! assert!(render);
//! assert!(matches!(actions.as_slice(), [Action::SendRequest(_)]));
//! # Ok::<(), stockroom::InventoryError>(())
//! ```

use crate::api::{ApiClient, ApiOutcome, ApiRequest, ApiResponse, Operation, RequestContext, RequestFamily, Ticket};
use crate::app::form::FormField;
use crate::app::modes::Mode;
use crate::app::{Action, AppState};
use crate::domain::error::{InventoryError, Result};

/// Everything the view reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Activates a mode directly.
    SelectMode(Mode),
    /// Activates the next mode in tab order.
    NextMode,
    /// Activates the previous mode in tab order.
    PreviousMode,
    /// Moves input focus to the next field.
    FocusNext,
    /// Moves input focus to the previous field.
    FocusPrevious,
    /// Types a character into the focused field.
    Char(char),
    /// Deletes the last character of the focused field.
    Backspace,
    /// Runs the current mode's operation.
    Submit,
    /// Fetches every product into the result list.
    ListAll,
    /// Hides the plugin pane.
    CloseFocus,
    /// A result for an earlier [`Action::SendRequest`].
    ApiResponse(ApiResponse),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The boolean is `true` when the view changed and should be redrawn.
///
/// # Errors
///
/// Returns [`InventoryError::Context`](crate::InventoryError::Context) only
/// for a response that cannot be attributed to any request. Every other
/// failure is absorbed into the error slot.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    match event {
        Event::ApiResponse(response) => apply_response(state, response),
        input => {
            let _span = tracing::debug_span!("handle_event", event_type = ?input, mode = ?state.modes.current()).entered();
            Ok(handle_input(state, input))
        }
    }
}

fn handle_input(state: &mut AppState, event: &Event) -> (bool, Vec<Action>) {
    let mode = state.modes.current();

    match event {
        Event::SelectMode(target) => (select_mode(state, *target), vec![]),
        Event::NextMode => (select_mode(state, mode.next()), vec![]),
        Event::PreviousMode => (select_mode(state, mode.previous()), vec![]),
        Event::FocusNext => (state.form.focus_next(mode), vec![]),
        Event::FocusPrevious => (state.form.focus_previous(mode), vec![]),
        Event::Char(c) => (state.form.insert_char(mode, *c, &mut state.buffer), vec![]),
        Event::Backspace => (state.form.backspace(mode, &mut state.buffer), vec![]),
        Event::Submit => submit(state),
        Event::ListAll => send(state, Operation::ListAll, RequestFamily::Results, |client, ticket| {
            Ok(client.list_all(ticket))
        }),
        Event::CloseFocus => (false, vec![Action::CloseFocus]),
        // Dispatched by handle_event outside any span, so the remote parent attaches.
        Event::ApiResponse(_) => (false, vec![]),
    }
}

fn select_mode(state: &mut AppState, mode: Mode) -> bool {
    let changed = state.modes.select(mode);
    if changed {
        state.form.reset_focus();
    }
    changed
}

fn submit(state: &mut AppState) -> (bool, Vec<Action>) {
    match state.modes.current() {
        Mode::Search => fetch_by_id(state, RequestFamily::Results),
        Mode::Update if state.form.focused(Mode::Update) == Some(FormField::ProductId) => {
            fetch_by_id(state, RequestFamily::Hydrate)
        }
        Mode::Update => {
            let checked = state
                .form
                .parse_product_id()
                .and_then(|id| state.buffer.draft.validate().map(|()| id));
            match checked {
                Ok(id) => {
                    let draft = state.buffer.draft.clone();
                    send(state, Operation::Update, RequestFamily::Update, |client, ticket| {
                        client.update(id, &draft, ticket)
                    })
                }
                Err(e) => reject(state, Operation::Update, &e),
            }
        }
        Mode::Create => match state.buffer.draft.validate() {
            Ok(()) => {
                let draft = state.buffer.draft.clone();
                send(state, Operation::Create, RequestFamily::Create, |client, ticket| {
                    client.create(&draft, ticket)
                })
            }
            Err(e) => reject(state, Operation::Create, &e),
        },
        Mode::CreateRandom => send(state, Operation::CreateRandom, RequestFamily::Random, |client, ticket| {
            Ok(client.create_random(ticket))
        }),
        Mode::Delete => match state.form.parse_delete_id() {
            Ok(id) => send(state, Operation::Delete, RequestFamily::Delete, |client, ticket| {
                Ok(client.delete(id, ticket))
            }),
            Err(e) => reject(state, Operation::Delete, &e),
        },
    }
}

fn fetch_by_id(state: &mut AppState, family: RequestFamily) -> (bool, Vec<Action>) {
    match state.form.parse_product_id() {
        Ok(id) => send(state, Operation::FetchById, family, |client, ticket| {
            Ok(client.fetch_by_id(id, ticket))
        }),
        Err(e) => reject(state, Operation::FetchById, &e),
    }
}

/// Issues a ticket and builds the request. A build failure returns the ticket.
fn send(
    state: &mut AppState,
    operation: Operation,
    family: RequestFamily,
    build: impl FnOnce(&ApiClient, Ticket) -> Result<ApiRequest>,
) -> (bool, Vec<Action>) {
    let ticket = state.requests.issue(family);

    match build(&state.client, ticket) {
        Ok(request) => {
            tracing::debug!(
                operation = operation.as_str(),
                seq = ticket.seq,
                in_flight = state.requests.in_flight(),
                "request issued"
            );
            (true, vec![Action::SendRequest(request)])
        }
        Err(e) => {
            state.requests.settle();
            reject(state, operation, &e)
        }
    }
}

fn reject(state: &mut AppState, operation: Operation, error: &InventoryError) -> (bool, Vec<Action>) {
    tracing::error!(operation = operation.as_str(), error = %error, "request not sent");
    state.notifications.failed(operation.failure_label(), error);
    (true, vec![])
}

fn apply_response(state: &mut AppState, response: &ApiResponse) -> Result<(bool, Vec<Action>)> {
    // Every result answers some request, attributable or not.
    state.requests.settle();

    let context = response.request_context().inspect_err(|e| {
        tracing::error!(status = response.status, error = %e, "response without usable context");
    })?;

    let _context_guard = context.trace.as_ref().and_then(|trace| trace.attach());
    let _span = tracing::debug_span!(
        "apply_response",
        operation = context.operation.as_str(),
        seq = context.seq,
        status = response.status
    )
    .entered();

    let current = state.requests.is_current(context.family, context.seq);

    match response.decode(&context) {
        Ok(outcome) => apply_outcome(state, &context, outcome, current),
        Err(e) => {
            tracing::error!(
                operation = context.operation.as_str(),
                error = %e,
                current = current,
                "request failed"
            );
            if current {
                state.notifications.failed(context.operation.failure_label(), &e);
            }
        }
    }

    Ok((true, vec![]))
}

fn apply_outcome(state: &mut AppState, context: &RequestContext, outcome: ApiOutcome, current: bool) {
    let buffer = &mut state.buffer;
    let notes = &mut state.notifications;

    match outcome {
        ApiOutcome::Created(product) => {
            let id = product.id;
            buffer.append_result(product);
            if current {
                notes.created(id);
            }
        }
        ApiOutcome::Deleted { id, detail } => {
            buffer.remove_result(id);
            if current {
                notes.deleted(&detail);
            }
        }
        _ if !current => {
            tracing::debug!(
                operation = context.operation.as_str(),
                seq = context.seq,
                "stale response discarded"
            );
        }
        ApiOutcome::Fetched(product) => {
            if context.family == RequestFamily::Results {
                buffer.set_results(vec![product.clone()]);
            }
            buffer.load_draft_from(&product);
            state.form.sync_price(&buffer.draft);
            notes.clear_error();
        }
        ApiOutcome::Listed(products) => {
            tracing::debug!(count = products.len(), "products listed");
            buffer.set_results(products);
            notes.clear_error();
        }
        ApiOutcome::Updated => notes.updated(),
        ApiOutcome::RandomCreated(product) => {
            buffer.random_product = Some(product);
            notes.clear_error();
        }
    }
}
