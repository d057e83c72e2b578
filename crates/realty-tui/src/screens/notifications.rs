//! Notifications screen — the in-app notification inbox.
//!
//! Unread entries sit at the top with a filled dot; read entries are dimmed.
//! Marking happens through the store, so counts stay consistent with the
//! bell badge in the top bar.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use realty_core::{AppNotification, NotificationKind};

use crate::action::Action;
use crate::component::Component;
use crate::theme::Theme;

fn kind_color(kind: NotificationKind, theme: &Theme) -> Color {
    match kind {
        NotificationKind::NewDeal => theme.success,
        NotificationKind::TaskAssigned => theme.warning,
        NotificationKind::ClientMessage => theme.primary,
        NotificationKind::SystemUpdate => theme.text_dim,
    }
}

pub struct NotificationsScreen {
    notifications: Arc<Vec<Arc<AppNotification>>>,
    /// Unread first, preserving store order inside each group.
    ordered: Vec<Arc<AppNotification>>,
    selected: usize,
}

impl NotificationsScreen {
    pub fn new() -> Self {
        Self {
            notifications: Arc::new(Vec::new()),
            ordered: Vec::new(),
            selected: 0,
        }
    }

    fn reorder(&mut self) {
        let mut ordered: Vec<_> = self.notifications.iter().cloned().collect();
        ordered.sort_by_key(|n| n.read);
        self.ordered = ordered;
        if !self.ordered.is_empty() {
            self.selected = self.selected.min(self.ordered.len() - 1);
        } else {
            self.selected = 0;
        }
    }

    fn unread_count(&self) -> usize {
        self.ordered.iter().filter(|n| !n.read).count()
    }

    fn selected_notification(&self) -> Option<&Arc<AppNotification>> {
        self.ordered.get(self.selected)
    }
}

impl Component for NotificationsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.selected + 1 < self.ordered.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Char('g') => self.selected = 0,
            KeyCode::Char('G') => {
                self.selected = self.ordered.len().saturating_sub(1);
            }
            KeyCode::Char('r') | KeyCode::Enter => {
                if let Some(n) = self.selected_notification() {
                    if !n.read {
                        return Ok(Some(Action::MarkNotificationRead(n.id.clone())));
                    }
                }
            }
            KeyCode::Char('a') => {
                if self.unread_count() > 0 {
                    return Ok(Some(Action::MarkAllNotificationsRead));
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::NotificationsUpdated(notifications) = action {
            self.notifications = Arc::clone(notifications);
            self.reorder();
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let unread = self.unread_count();
        let title = if unread > 0 {
            format!(" Notifications ({unread} unread) ")
        } else {
            " Notifications ".to_owned()
        };

        let block = Block::default()
            .title(title)
            .title_style(theme.title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.border_default());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::vertical([
            Constraint::Min(1),    // list
            Constraint::Length(1), // hints
        ])
        .split(inner);

        let visible = usize::from(layout[0].height);
        let start = if self.selected >= visible {
            self.selected + 1 - visible
        } else {
            0
        };

        let mut lines: Vec<Line> = Vec::new();
        for (i, n) in self.ordered.iter().enumerate().skip(start).take(visible) {
            let is_selected = i == self.selected;
            let prefix = if is_selected { " ▸" } else { "  " };
            let dot = if n.read { "○" } else { "●" };
            let dot_style = if n.read {
                Style::default().fg(theme.text_dim)
            } else {
                Style::default().fg(theme.primary)
            };
            let message_style = if n.read {
                Style::default().fg(theme.text_dim)
            } else {
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
            };

            let mut spans = vec![
                Span::styled(format!("{prefix} {dot} "), dot_style),
                Span::styled(
                    format!("{:<15}", n.kind.label()),
                    Style::default().fg(kind_color(n.kind, theme)),
                ),
                Span::styled(n.message.clone(), message_style),
            ];
            if let Some(user) = &n.related_user {
                spans.push(Span::styled(
                    format!("  · {user}"),
                    Style::default().fg(theme.text_dim),
                ));
            }
            spans.push(Span::styled(
                format!("  {}", n.timestamp),
                Style::default().fg(theme.text_dim),
            ));

            let row_style = if is_selected {
                Style::default().bg(theme.bg_highlight)
            } else {
                Style::default()
            };
            lines.push(Line::from(spans).style(row_style));
        }

        if self.ordered.is_empty() {
            lines.push(Line::from(Span::styled(
                "  No notifications",
                Style::default().fg(theme.text_dim),
            )));
        }

        frame.render_widget(Paragraph::new(lines), layout[0]);

        let hints = Line::from(vec![
            Span::styled("  j/k ", theme.key_hint_key()),
            Span::styled("navigate  ", theme.key_hint()),
            Span::styled("r ", theme.key_hint_key()),
            Span::styled("mark read  ", theme.key_hint()),
            Span::styled("a ", theme.key_hint_key()),
            Span::styled("mark all read  ", theme.key_hint()),
            Span::styled("Esc ", theme.key_hint_key()),
            Span::styled("back", theme.key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[1]);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn notification(id: &str, read: bool) -> Arc<AppNotification> {
        Arc::new(AppNotification {
            id: id.into(),
            kind: NotificationKind::ClientMessage,
            message: format!("message {id}"),
            timestamp: "5m ago".into(),
            read,
            related_user: None,
        })
    }

    fn screen_with(notifications: Vec<Arc<AppNotification>>) -> NotificationsScreen {
        let mut screen = NotificationsScreen::new();
        screen
            .update(&Action::NotificationsUpdated(Arc::new(notifications)))
            .unwrap();
        screen
    }

    #[test]
    fn unread_sort_ahead_of_read() {
        let screen = screen_with(vec![
            notification("N1", true),
            notification("N2", false),
            notification("N3", true),
            notification("N4", false),
        ]);

        let ids: Vec<&str> = screen.ordered.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["N2", "N4", "N1", "N3"]);
        assert_eq!(screen.unread_count(), 2);
    }

    #[test]
    fn mark_read_emits_for_unread_only() {
        let mut screen = screen_with(vec![notification("N1", false), notification("N2", true)]);

        let action = screen
            .handle_key_event(KeyEvent::from(KeyCode::Char('r')))
            .unwrap();
        assert!(matches!(action, Some(Action::MarkNotificationRead(id)) if id == "N1"));

        // Move onto the read entry: no action
        screen
            .handle_key_event(KeyEvent::from(KeyCode::Char('j')))
            .unwrap();
        let action = screen
            .handle_key_event(KeyEvent::from(KeyCode::Char('r')))
            .unwrap();
        assert!(action.is_none());
    }

    #[test]
    fn mark_all_is_a_no_op_when_everything_is_read() {
        let mut screen = screen_with(vec![notification("N1", true)]);
        let action = screen
            .handle_key_event(KeyEvent::from(KeyCode::Char('a')))
            .unwrap();
        assert!(action.is_none());
    }

    #[test]
    fn selection_clamps_when_the_list_shrinks() {
        let mut screen = screen_with(vec![
            notification("N1", false),
            notification("N2", false),
            notification("N3", false),
        ]);
        screen
            .handle_key_event(KeyEvent::from(KeyCode::Char('G')))
            .unwrap();
        assert_eq!(screen.selected, 2);

        screen
            .update(&Action::NotificationsUpdated(Arc::new(vec![notification(
                "N1", false,
            )])))
            .unwrap();
        assert_eq!(screen.selected, 0);
    }
}
