//! Mode selection state machine.
//!
//! The view shows exactly one of five modes at a time. Each mode decides which
//! form fields are editable, what `Enter` submits and which notices are visible.
//! Any mode can be reached from any other and selecting one never touches the
//! draft, the result list or the notifications.
//!
//! # Example
//!
//! ```rust
//! use stockroom::app::modes::{Mode, ModeController};
//!
//! let mut modes = ModeController::new();
//! assert_eq!(modes.current(), Mode::Search);
//!
//! assert!(modes.select(Mode::Delete));
//! assert!(!modes.select(Mode::Delete));
//! ```

use crate::app::form::FormField;
use crate::domain::DraftField;

/// The exclusive UI selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Look up one product by id, or list all of them.
    #[default]
    Search,
    /// Fill in the draft and post it as a new product.
    Create,
    /// Ask the service to generate a product.
    CreateRandom,
    /// Load a product by id into the draft, edit it, and put it back.
    Update,
    /// Remove a product by id.
    Delete,
}

impl Mode {
    /// Tab order.
    pub const ALL: [Self; 5] = [
        Self::Search,
        Self::Create,
        Self::CreateRandom,
        Self::Update,
        Self::Delete,
    ];

    /// Tab title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Search => "Search",
            Self::Create => "Create",
            Self::CreateRandom => "Create Random",
            Self::Update => "Update",
            Self::Delete => "Delete",
        }
    }

    /// Position in [`Mode::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Search => 0,
            Self::Create => 1,
            Self::CreateRandom => 2,
            Self::Update => 3,
            Self::Delete => 4,
        }
    }

    /// Mode at `index` in tab order, if any. Used for the `F1`..`F5` keys.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The next mode in tab order, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// The previous mode in tab order, wrapping around.
    #[must_use]
    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Form fields editable in this mode, top to bottom.
    #[must_use]
    pub fn fields(self) -> &'static [FormField] {
        const DRAFT: [FormField; 5] = [
            FormField::Draft(DraftField::Name),
            FormField::Draft(DraftField::Code),
            FormField::Draft(DraftField::Description),
            FormField::Draft(DraftField::Category),
            FormField::Draft(DraftField::Price),
        ];
        const UPDATE: [FormField; 6] = [
            FormField::ProductId,
            FormField::Draft(DraftField::Name),
            FormField::Draft(DraftField::Code),
            FormField::Draft(DraftField::Description),
            FormField::Draft(DraftField::Category),
            FormField::Draft(DraftField::Price),
        ];

        match self {
            Self::Search => &[FormField::ProductId],
            Self::Create => &DRAFT,
            Self::CreateRandom => &[],
            Self::Update => &UPDATE,
            Self::Delete => &[FormField::DeleteId],
        }
    }
}

/// Holds the active [`Mode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModeController {
    current: Mode,
}

impl ModeController {
    /// Starts in [`Mode::Search`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn current(&self) -> Mode {
        self.current
    }

    /// Makes `mode` active. Returns whether the active mode changed.
    pub fn select(&mut self, mode: Mode) -> bool {
        let changed = self.current != mode;
        if changed {
            tracing::debug!(from = ?self.current, to = ?mode, "mode selected");
        }
        self.current = mode;
        changed
    }
}
