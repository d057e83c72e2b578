//! Horizontal sub-tab bar for use within screens (e.g., unit status filters,
//! client pipeline filters, notification sections).

use ratatui::style::Modifier;
use ratatui::text::{Line, Span};

use crate::theme::Theme;

/// Renders a horizontal tab bar line with the active tab highlighted.
///
/// Each label is rendered inline. The active tab gets the accent color plus
/// an underline; inactive tabs are dimmed.
pub fn render_sub_tabs<'a>(theme: &Theme, labels: &[&'a str], active_index: usize) -> Line<'a> {
    let mut spans = Vec::with_capacity(labels.len() * 2);

    for (i, label) in labels.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", theme.key_hint()));
        }

        if i == active_index {
            spans.push(Span::styled(
                format!("[{label}]"),
                theme.tab_active().add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(*label, theme.tab_inactive()));
        }
    }

    Line::from(spans)
}
