//! Zellij plugin wrapper and entry point.
//!
//! This module is the thin integration layer between the Stockroom library
//! and the Zellij plugin system. It implements `ZellijPlugin`, translates host
//! events into library events and carries out the returned actions.
//!
//! ```text
//! ┌──────────────────────────────┐        ┌──────────────────────┐
//! │   Zellij Main Thread         │        │  Inventory service   │
//! │  ┌────────────────────────┐  │ HTTP   │                      │
//! │  │  State (plugin)        │──┼───────▶│  /api/products/      │
//! │  │  handle_event → Action │◀─┼────────│  /api/products_test/ │
//! │  └────────────────────────┘  │ result │                      │
//! └──────────────────────────────┘        └──────────────────────┘
//! ```
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Permissions**: Request `WebAccess` for the inventory service
//! 3. **Subscribe**: `Key`, `WebRequestResult`, `PermissionRequestResult`
//! 4. **Update**: Map events, delegate to the library, run actions
//! 5. **Render**: Call the library render function
//!
//! # Keybindings
//!
//! - `Tab` / `Shift+Tab`: Next / previous mode
//! - `F1`..`F5`: Jump to Search, Create, Create Random, Update, Delete
//! - `Down`/`Ctrl+n`, `Up`/`Ctrl+p`: Move between fields
//! - `Enter`: Submit the current mode's operation
//! - `Ctrl+l`: List all products
//! - `Backspace`: Delete a character
//! - `Esc`: Hide the plugin
//! - Any other character: Type into the focused field

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use stockroom::api::{ApiRequest, ApiResponse, HttpMethod};
use stockroom::{handle_event, Action, Config, Event, Mode};

register_plugin!(State);

/// Plugin state wrapper around the library's `AppState`.
struct State {
    app: stockroom::AppState,
    web_access: bool,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: stockroom::initialize(&Config::default()),
            web_access: false,
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, sets up tracing and state, then asks for web
    /// access and subscribes to the events the plugin reacts to.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        stockroom::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(base_url = %config.base_url, theme = ?config.theme_name, "parsed configuration");
        self.app = stockroom::initialize(&config);

        request_permission(&[PermissionType::WebAccess]);
        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Translates a host event, delegates to `handle_event` and executes the
    /// resulting actions. Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let span = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match Self::map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                tracing::debug!(status, body_len = body.len(), "web request result");
                Event::ApiResponse(ApiResponse {
                    status,
                    body,
                    context,
                })
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                self.handle_permission_result(status);
                return true;
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled successfully");
                for action in actions {
                    self.execute_action(&action);
                }
                should_render
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        stockroom::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events.
    fn map_key_event(key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::FocusNext),
                BareKey::Char('p') => Some(Event::FocusPrevious),
                BareKey::Char('l') => Some(Event::ListAll),
                _ => None,
            };
        }

        Some(match key.bare_key {
            BareKey::Tab if key.has_modifiers(&[KeyModifier::Shift]) => Event::PreviousMode,
            BareKey::Tab => Event::NextMode,
            BareKey::F(n) => Event::SelectMode(Mode::from_index(usize::from(n).checked_sub(1)?)?),
            BareKey::Down => Event::FocusNext,
            BareKey::Up => Event::FocusPrevious,
            BareKey::Enter => Event::Submit,
            BareKey::Esc => Event::CloseFocus,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    fn handle_permission_result(&mut self, status: PermissionStatus) {
        match status {
            PermissionStatus::Granted => {
                tracing::debug!("web access granted");
                self.web_access = true;
            }
            PermissionStatus::Denied => {
                tracing::warn!("web access denied - requests to the inventory service will fail");
                self.web_access = false;
            }
        }
    }

    /// Executes an action returned from event handling.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::SendRequest(request) => self.send_request(request),
        }
    }

    fn send_request(&self, request: &ApiRequest) {
        if !self.web_access {
            tracing::warn!(url = %request.url, "sending request without confirmed web access");
        }

        let verb = match request.method {
            HttpMethod::Get => HttpVerb::Get,
            HttpMethod::Post => HttpVerb::Post,
            HttpMethod::Put => HttpVerb::Put,
            HttpMethod::Delete => HttpVerb::Delete,
        };

        tracing::debug!(url = %request.url, method = ?request.method, "dispatching web request");
        web_request(
            &request.url,
            verb,
            request.headers.clone(),
            request.body.clone(),
            request.context.to_map(),
        );
    }
}
