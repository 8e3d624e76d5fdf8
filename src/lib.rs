//! Stockroom: a Zellij plugin for managing a remote product catalog.
//!
//! Stockroom is an operator-facing pane that searches, lists, creates,
//! updates and deletes products held by an HTTP/JSON inventory service:
//! - Five modes (Search, Create, Create Random, Update, Delete) switched with tabs
//! - One shared draft record reused by the search, create and update flows
//! - Asynchronous requests that never leave the view inconsistent on failure
//! - Stale responses detected per request family and kept from overwriting newer state

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← keys, web requests
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Modes, draft buffer, form, notifications         │
//! │  - Event handling and request lifecycle             │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                     │
//! ┌───────────────┐                     ┌───────────────┐
//! │ UI Layer      │                     │ API Layer     │
//! │ (ui/)         │                     │ (api/)        │
//! │ - Rendering   │                     │ - Requests    │
//! │ - Theming     │                     │ - Decoding    │
//! │ - Components  │                     │ - Sequencing  │
//! └───────────────┘                     └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/) and Infrastructure                │
//! │  - Product, ProductDraft, InventoryError            │
//! │  - Sandbox paths, OpenTelemetry file export         │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`api`]: Inventory service requests, responses and sequencing
//! - [`domain`]: Product types and errors
//! - [`infrastructure`]: Sandbox paths
//! - [`ui`]: Terminal rendering with theme support
//! - [`observability`]: OpenTelemetry tracing to a rotating file
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/stockroom.wasm" {
//!         base_url "http://localhost:3000"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use stockroom::{handle_event, initialize, Action, Config, Event};
//!
//! let mut options = BTreeMap::new();
//! options.insert("base_url".to_string(), "http://inventory.local:8000/".to_string());
//!
//! let mut state = initialize(&Config::from_zellij(&options));
//! let (_, actions) = handle_event(&mut state, &Event::ListAll)?;
//!
//! match &actions[..] {
//!     [Action::SendRequest(request)] => {
//!         assert_eq!(request.url, "http://inventory.local:8000/api/products/");
//!     }
//!     other => panic!("unexpected actions {other:?}"),
//! }
//! # Ok::<(), stockroom::InventoryError>(())
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ui;

pub use api::ApiClient;
pub use app::{handle_event, Action, AppState, Event, Mode};
pub use domain::{InventoryError, Product, ProductDraft, Result};
pub use ui::Theme;

use std::collections::BTreeMap;

const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_TRACE_LEVEL: &str = "info";

/// Plugin configuration parsed from Zellij's configuration system.
///
/// ```kdl
/// plugin location="file:/path/to/stockroom.wasm" {
///     base_url "http://localhost:3000"
///     theme "catppuccin-latte"
///     theme_file "~/.config/stockroom/theme.toml"
///     trace_level "stockroom=debug"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Inventory service root, without a trailing `/`.
    pub base_url: String,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for exported spans. Default: `"info"`.
    pub trace_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            theme_name: None,
            theme_file: None,
            trace_level: DEFAULT_TRACE_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Parses the plugin's configuration map, falling back to defaults for
    /// missing or blank values.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use stockroom::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("base_url".to_string(), "http://10.0.0.5:8000/".to_string());
    /// map.insert("theme_file".to_string(), "~/dark.toml".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.base_url, "http://10.0.0.5:8000");
    /// assert_eq!(config.theme_file.as_deref(), Some("/host/dark.toml"));
    /// assert_eq!(config.trace_level, "info");
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let value = |key: &str| {
            config
                .get(key)
                .map(|raw| raw.trim())
                .filter(|raw| !raw.is_empty())
        };

        Self {
            base_url: value("base_url")
                .map(|url| url.trim_end_matches('/'))
                .filter(|url| !url.is_empty())
                .unwrap_or(DEFAULT_BASE_URL)
                .to_string(),
            theme_name: value("theme").map(String::from),
            theme_file: value("theme_file").map(infrastructure::expand_tilde),
            trace_level: value("trace_level").unwrap_or(DEFAULT_TRACE_LEVEL).to_string(),
        }
    }

    /// Resolves the theme: `theme_file` first, then `theme`, then the
    /// default. Unusable settings are logged and skipped.
    #[must_use]
    pub fn load_theme(&self) -> Theme {
        if let Some(path) = &self.theme_file {
            match Theme::from_file(path) {
                Ok(theme) => return theme,
                Err(e) => tracing::warn!(theme_file = %path, error = %e, "failed to load theme file, falling back"),
            }
        }

        self.theme_name.as_deref().map_or_else(Theme::default, |name| {
            Theme::from_name(name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Builds the initial application state: Search mode, empty draft, no
/// results, the configured theme and a client for `config.base_url`.
///
/// Every plugin load starts from this state; nothing is persisted.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(base_url = %config.base_url, "initializing stockroom plugin");

    AppState::new(ApiClient::new(config.base_url.clone()), config.load_theme())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn empty_config_uses_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn blank_values_fall_back() {
        let config = Config::from_zellij(&map(&[("base_url", "  "), ("trace_level", ""), ("theme", " ")]));
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.trace_level, "info");
        assert_eq!(config.theme_name, None);
    }

    #[test]
    fn unknown_theme_name_falls_back_to_default() {
        let config = Config::from_zellij(&map(&[("theme", "no-such-theme")]));
        assert_eq!(config.load_theme().name, "catppuccin-mocha");
    }

    #[test]
    fn theme_file_wins_over_name() {
        let mut custom = Theme::default();
        custom.name = "from-file".into();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(toml::to_string(&custom).unwrap().as_bytes()).unwrap();

        let config = Config {
            theme_name: Some("catppuccin-latte".into()),
            theme_file: Some(file.path().to_string_lossy().into_owned()),
            ..Config::default()
        };
        assert_eq!(config.load_theme().name, "from-file");
    }

    #[test]
    fn broken_theme_file_falls_back_to_name() {
        let config = Config {
            theme_name: Some("catppuccin-frappe".into()),
            theme_file: Some("/definitely/not/here.toml".into()),
            ..Config::default()
        };
        assert_eq!(config.load_theme().name, "catppuccin-frappe");
    }

    #[test]
    fn initialize_starts_in_search_with_empty_buffer() {
        let state = initialize(&Config::default());
        assert_eq!(state.modes.current(), Mode::Search);
        assert!(state.buffer.results.is_empty());
        assert_eq!(state.client.base_url(), "http://localhost:3000");
    }
}
