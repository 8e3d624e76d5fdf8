//! Top-level rendering entry point.
//!
//! Rendering is a two-step projection:
//!
//! 1. **View model computation**: `AppState` to [`UIViewModel`]
//! 2. **Component rendering**: the view model printed as ANSI text
//!
//! Output goes to stdout, which Zellij draws into the plugin pane.

use crate::app::AppState;
use crate::ui::components;

#[cfg(doc)]
use crate::ui::viewmodel::UIViewModel;

/// Renders the plugin UI for a pane of `rows` x `cols` cells.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let _span = tracing::trace_span!("render", rows, cols).entered();

    let viewmodel = state.compute_viewmodel(rows, cols);
    components::render_layout(&viewmodel, &state.theme, cols, rows);
}
