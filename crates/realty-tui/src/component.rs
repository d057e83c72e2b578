//! Component trait implemented by every screen.

use color_eyre::eyre::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{Frame, layout::Rect};
use tokio::sync::mpsc::UnboundedSender;

use crate::action::Action;
use crate::theme::Theme;

/// A screen in the dashboard.
///
/// Lifecycle: `init` → (`handle_key_event` | `handle_mouse_event` | `update` | `render`)*
///
/// State changes flow through actions: handlers return an [`Action`] for the
/// app loop to dispatch rather than mutating shared state directly.
pub trait Component: Send {
    /// Called once at startup with the action sender.
    fn init(&mut self, _action_tx: UnboundedSender<Action>) -> Result<()> {
        Ok(())
    }

    /// Handle a keyboard event. Only the active screen receives these.
    fn handle_key_event(&mut self, _key: KeyEvent) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Handle a mouse event. Coordinates are absolute; a screen hit-tests
    /// them against the area it last rendered into.
    fn handle_mouse_event(&mut self, _mouse: MouseEvent) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Process a dispatched action. Every screen sees every action; data
    /// updates fan out this way. May return a follow-up action.
    fn update(&mut self, _action: &Action) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Render into `area`. The theme is resolved per frame from the current
    /// appearance preferences, so screens never cache colors.
    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme);
}
