//! Settings screen — the appearance editor.
//!
//! Opened with `s`, not a catalog entry. Every change applies and persists
//! immediately through the preference store; there is no save step.
//!
//! Layout:
//! ┌─ Settings ────────────────────────────────────────────────────────┐
//! │  Theme                          ┌─ Navigation order ────────────┐ │
//! │    Base theme   ◂ System ▸      │ ▸ 󰋜  Properties               │ │
//! │    Accent       ◂ ● Indigo ▸    │   󰀎  Clients (CRM)            │ │
//! │  Layout                         │   󰠜  Deals                    │ │
//! │    Navigation   ◂ Sidebar ▸     │   ...                         │ │
//! │    Compact nav  ◂ Bottom ▸      │                               │ │
//! │    Collapsed sidebar  [ ]       │  7 of 9 links shown for Admin │ │
//! │  Typography                     └───────────────────────────────┘ │
//! │    Font family  ◂ Inter ▸                                         │
//! │    Font size    ◂ Default (16pt) ▸                                │
//! │                                                                   │
//! │    [ Reset to defaults ]                                          │
//! ├─ j/k field  h/l change  Tab section  Esc back ────────────────────┤
//! └───────────────────────────────────────────────────────────────────┘

use std::cell::Cell;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Margin, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use realty_core::nav::{self, NavLink};
use realty_core::{
    AccentColor, AppearancePreferences, BaseTheme, FontFamily, FontSize, MobileNavLayout,
    NavLayout, NavLinkId, Role,
};

use crate::action::{Action, Direction};
use crate::component::Component;
use crate::drag::{self, Axis, DragController, InsertSide};
use crate::theme::Theme;

// ── Types ────────────────────────────────────────────────────────────

/// Which editor row has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SettingsField {
    BaseTheme,
    AccentColor,
    Layout,
    MobileLayout,
    SidebarCollapsed,
    FontFamily,
    FontSize,
    NavOrder,
    Reset,
}

impl SettingsField {
    /// All fields in focus order.
    const ALL: [SettingsField; 9] = [
        Self::BaseTheme,
        Self::AccentColor,
        Self::Layout,
        Self::MobileLayout,
        Self::SidebarCollapsed,
        Self::FontFamily,
        Self::FontSize,
        Self::NavOrder,
        Self::Reset,
    ];
}

/// Step through an options table, wrapping at both ends.
fn cycled<T: Copy + PartialEq>(all: &[T], current: T, forward: bool) -> T {
    let pos = all.iter().position(|&v| v == current).unwrap_or(0);
    let next = if forward {
        (pos + 1) % all.len()
    } else {
        (pos + all.len() - 1) % all.len()
    };
    all[next]
}

// ── Component ────────────────────────────────────────────────────────

pub struct SettingsScreen {
    role: Role,
    prefs: AppearancePreferences,
    active_field: SettingsField,
    /// Selected row in the navigation list.
    nav_selected: usize,
    /// Reset requires a second Enter while armed.
    reset_armed: bool,
    drag: DragController,
    /// Last rendered inner area, for mouse hit-testing.
    last_inner: Cell<Rect>,
}

impl SettingsScreen {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            prefs: AppearancePreferences::default(),
            active_field: SettingsField::BaseTheme,
            nav_selected: 0,
            reset_armed: false,
            drag: DragController::new(),
            last_inner: Cell::new(Rect::default()),
        }
    }

    /// The links the current viewer can see, in preference order.
    fn visible_links(&self) -> Vec<&'static NavLink> {
        nav::links_for_viewer(&self.prefs.nav_order, Some(self.role))
    }

    fn focus_next(&mut self) {
        let pos = SettingsField::ALL
            .iter()
            .position(|&f| f == self.active_field)
            .unwrap_or(0);
        self.active_field = SettingsField::ALL[(pos + 1) % SettingsField::ALL.len()];
        self.reset_armed = false;
    }

    fn focus_prev(&mut self) {
        let pos = SettingsField::ALL
            .iter()
            .position(|&f| f == self.active_field)
            .unwrap_or(0);
        self.active_field =
            SettingsField::ALL[(pos + SettingsField::ALL.len() - 1) % SettingsField::ALL.len()];
        self.reset_armed = false;
    }

    /// Cycle the focused selector. Returns the persisting action.
    fn cycle_value(&mut self, forward: bool) -> Option<Action> {
        match self.active_field {
            SettingsField::BaseTheme => Some(Action::SetBaseTheme(cycled(
                &BaseTheme::ALL,
                self.prefs.base_theme,
                forward,
            ))),
            SettingsField::AccentColor => Some(Action::SetAccentColor(cycled(
                &AccentColor::ALL,
                self.prefs.accent_color,
                forward,
            ))),
            SettingsField::Layout => Some(Action::SetNavLayout(cycled(
                &NavLayout::ALL,
                self.prefs.layout,
                forward,
            ))),
            SettingsField::MobileLayout => Some(Action::SetMobileNavLayout(cycled(
                &MobileNavLayout::ALL,
                self.prefs.mobile_layout,
                forward,
            ))),
            SettingsField::SidebarCollapsed => Some(Action::ToggleSidebar),
            SettingsField::FontFamily => Some(Action::SetFontFamily(cycled(
                &FontFamily::ALL,
                self.prefs.font_family,
                forward,
            ))),
            SettingsField::FontSize => Some(Action::SetFontSize(cycled(
                &FontSize::ALL,
                self.prefs.font_size,
                forward,
            ))),
            SettingsField::NavOrder | SettingsField::Reset => None,
        }
    }

    /// Enter on the reset button: first press arms, second fires.
    fn press_reset(&mut self) -> Option<Action> {
        if self.reset_armed {
            self.reset_armed = false;
            Some(Action::ResetAppearance)
        } else {
            self.reset_armed = true;
            None
        }
    }

    /// Move the selected link one visible step via the keyboard.
    fn move_selected_link(&mut self, direction: Direction) -> Option<Action> {
        let links = self.visible_links();
        let link = links.get(self.nav_selected)?;
        let id = link.id;
        // Selection follows the moved link.
        match direction {
            Direction::Up if self.nav_selected > 0 => self.nav_selected -= 1,
            Direction::Down if self.nav_selected + 1 < links.len() => self.nav_selected += 1,
            _ => return None,
        }
        Some(Action::MoveNavLink(id, direction))
    }

    // ── Geometry ─────────────────────────────────────────────────────
    // The mouse handler reconstructs these rects from `last_inner`, so
    // render and hit-testing must use the same splits.

    fn columns(inner: Rect) -> (Rect, Rect) {
        let cols =
            Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(inner);
        (cols[0], cols[1])
    }

    /// Editor field at a row offset within the left column.
    /// Mirrors the line order built in `render_editor`.
    fn left_field_at(offset: u16) -> Option<SettingsField> {
        match offset {
            1 => Some(SettingsField::BaseTheme),
            2 => Some(SettingsField::AccentColor),
            5 => Some(SettingsField::Layout),
            6 => Some(SettingsField::MobileLayout),
            7 => Some(SettingsField::SidebarCollapsed),
            10 => Some(SettingsField::FontFamily),
            11 => Some(SettingsField::FontSize),
            13 => Some(SettingsField::Reset),
            _ => None,
        }
    }

    /// The navigation list's row area: right column minus block borders.
    fn nav_list_area(inner: Rect) -> Rect {
        let (_, right) = Self::columns(inner);
        right.inner(Margin::new(1, 1))
    }

    /// Which visible link a pointer row lands on.
    fn nav_row_at(&self, inner: Rect, column: u16, row: u16) -> Option<(NavLinkId, Rect)> {
        let list = Self::nav_list_area(inner);
        if column < list.x
            || column >= list.x + list.width
            || row < list.y
            || row >= list.y + list.height
        {
            return None;
        }
        let idx = usize::from(row - list.y);
        let links = self.visible_links();
        let link = links.get(idx)?;
        Some((link.id, Rect::new(list.x, row, list.width, 1)))
    }

    // ── Rendering ────────────────────────────────────────────────────

    #[allow(clippy::too_many_lines)]
    fn render_editor(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let heading = |label: &'static str| -> Line<'static> {
            Line::from(Span::styled(
                format!(" {label}"),
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            ))
        };

        let selector = |field: SettingsField, label: &str, value: String| -> Line<'static> {
            let focused = self.active_field == field;
            let marker = if focused { " ▸ " } else { "   " };
            let label_style = if focused {
                Style::default().fg(theme.text)
            } else {
                Style::default().fg(theme.text_dim)
            };
            let arrows = if focused {
                Style::default().fg(theme.primary)
            } else {
                Style::default().fg(theme.border)
            };
            Line::from(vec![
                Span::styled(marker.to_owned(), Style::default().fg(theme.primary)),
                Span::styled(format!("{label:<18}"), label_style),
                Span::styled("◂ ", arrows),
                Span::styled(value, Style::default().fg(theme.text)),
                Span::styled(" ▸", arrows),
            ])
        };

        let accent_value = format!("● {}", self.prefs.accent_color.label());
        let collapsed_box = if self.prefs.sidebar_collapsed {
            "[■]"
        } else {
            "[ ]"
        };
        let collapsed_focused = self.active_field == SettingsField::SidebarCollapsed;
        let collapsed_line = Line::from(vec![
            Span::styled(
                if collapsed_focused { " ▸ " } else { "   " },
                Style::default().fg(theme.primary),
            ),
            Span::styled(
                format!("{:<18}", "Collapsed sidebar"),
                if collapsed_focused {
                    Style::default().fg(theme.text)
                } else {
                    Style::default().fg(theme.text_dim)
                },
            ),
            Span::styled(
                collapsed_box,
                if self.prefs.sidebar_collapsed {
                    Style::default().fg(theme.primary)
                } else {
                    Style::default().fg(theme.text_dim)
                },
            ),
        ]);

        let reset_focused = self.active_field == SettingsField::Reset;
        let reset_line = if self.reset_armed {
            Line::from(vec![
                Span::styled(" ▸ ", Style::default().fg(theme.primary)),
                Span::styled(
                    "[ Press Enter again to reset everything ]",
                    Style::default()
                        .fg(theme.error)
                        .add_modifier(Modifier::BOLD),
                ),
            ])
        } else {
            Line::from(vec![
                Span::styled(
                    if reset_focused { " ▸ " } else { "   " },
                    Style::default().fg(theme.primary),
                ),
                Span::styled(
                    "[ Reset to defaults ]",
                    if reset_focused {
                        Style::default().fg(theme.warning)
                    } else {
                        Style::default().fg(theme.text_dim)
                    },
                ),
            ])
        };

        // Row offsets here are mirrored in `left_field_at`.
        let lines = vec![
            heading("Theme"),
            selector(
                SettingsField::BaseTheme,
                "Base theme",
                self.prefs.base_theme.label().to_owned(),
            ),
            selector(SettingsField::AccentColor, "Accent", accent_value),
            Line::from(""),
            heading("Layout"),
            selector(
                SettingsField::Layout,
                "Navigation",
                self.prefs.layout.label().to_owned(),
            ),
            selector(
                SettingsField::MobileLayout,
                "Compact nav",
                self.prefs.mobile_layout.label().to_owned(),
            ),
            collapsed_line,
            Line::from(""),
            heading("Typography"),
            selector(
                SettingsField::FontFamily,
                "Font family",
                self.prefs.font_family.label().to_owned(),
            ),
            selector(
                SettingsField::FontSize,
                "Font size",
                format!(
                    "{} ({}pt)",
                    self.prefs.font_size.label(),
                    self.prefs.font_size.points()
                ),
            ),
            Line::from(""),
            reset_line,
        ];

        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_nav_list(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let focused = self.active_field == SettingsField::NavOrder;
        let block = Block::default()
            .title(" Navigation order ")
            .title_style(theme.title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if focused {
                theme.border_focused()
            } else {
                theme.border_default()
            });

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let links = self.visible_links();
        let dragged = self.drag.dragged();
        let hover = self.drag.hover();

        let mut lines: Vec<Line> = Vec::new();
        for (i, link) in links.iter().enumerate() {
            let is_selected = focused && i == self.nav_selected;
            let is_dragged = dragged == Some(link.id);

            // Insertion marker occupies the row prefix so geometry stays
            // stable while a drag is in flight.
            let prefix = match hover {
                Some((target, InsertSide::Before)) if target == link.id => {
                    Span::styled(" ▴ ", theme.drop_indicator())
                }
                Some((target, InsertSide::After)) if target == link.id => {
                    Span::styled(" ▾ ", theme.drop_indicator())
                }
                _ if is_selected => Span::styled(" ▸ ", Style::default().fg(theme.primary)),
                _ => Span::raw("   "),
            };

            let item_style = if is_dragged {
                theme.nav_dragging()
            } else if is_selected {
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };

            let row_style = if is_selected {
                Style::default().bg(theme.bg_highlight)
            } else {
                Style::default()
            };

            lines.push(
                Line::from(vec![
                    prefix,
                    Span::styled(
                        format!("{}  ", link.icon),
                        Style::default().fg(theme.primary),
                    ),
                    Span::styled(link.label.to_owned(), item_style),
                ])
                .style(row_style),
            );
        }

        frame.render_widget(Paragraph::new(lines), inner);

        // Footnote: how much of the catalog this role sees.
        if inner.height > 2 {
            let note = format!(
                " {} of {} links shown for {}",
                links.len(),
                self.prefs.nav_order.len(),
                self.role.label()
            );
            let note_area = Rect {
                y: inner.y + inner.height - 1,
                height: 1,
                ..inner
            };
            frame.render_widget(
                Paragraph::new(Span::styled(note, Style::default().fg(theme.text_dim))),
                note_area,
            );
        }
    }
}

impl Component for SettingsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Esc aborts an in-flight drag before anything else sees it. The
        // Render keeps the app's Esc fallback from also navigating back.
        if self.drag.is_active() && key.code == KeyCode::Esc {
            self.drag.cancel();
            return Ok(Some(Action::Render));
        }

        // Any key other than Enter disarms a pending reset.
        if key.code != KeyCode::Enter {
            self.reset_armed = false;
        }

        if self.active_field == SettingsField::NavOrder {
            let links_len = self.visible_links().len();
            match key.code {
                KeyCode::Char('j') | KeyCode::Down => {
                    if self.nav_selected + 1 < links_len {
                        self.nav_selected += 1;
                    } else {
                        self.focus_next();
                    }
                    return Ok(None);
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    if self.nav_selected > 0 {
                        self.nav_selected -= 1;
                    } else {
                        self.focus_prev();
                    }
                    return Ok(None);
                }
                KeyCode::Char('J') => return Ok(self.move_selected_link(Direction::Down)),
                KeyCode::Char('K') => return Ok(self.move_selected_link(Direction::Up)),
                KeyCode::Tab => {
                    self.focus_next();
                    return Ok(None);
                }
                KeyCode::BackTab => {
                    self.focus_prev();
                    return Ok(None);
                }
                _ => return Ok(None),
            }
        }

        match key.code {
            KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => self.focus_next(),
            KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => self.focus_prev(),
            KeyCode::Char('h') | KeyCode::Left => return Ok(self.cycle_value(false)),
            KeyCode::Char('l') | KeyCode::Right => return Ok(self.cycle_value(true)),
            KeyCode::Char(' ') if self.active_field == SettingsField::SidebarCollapsed => {
                return Ok(Some(Action::ToggleSidebar));
            }
            KeyCode::Enter => {
                if self.active_field == SettingsField::Reset {
                    return Ok(self.press_reset());
                }
                return Ok(self.cycle_value(true));
            }
            _ => {}
        }
        Ok(None)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let inner = self.last_inner.get();
        if inner.width == 0 {
            return Ok(None);
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                // Navigation list: select and start a drag gesture.
                if let Some((id, _)) = self.nav_row_at(inner, mouse.column, mouse.row) {
                    self.active_field = SettingsField::NavOrder;
                    self.reset_armed = false;
                    let links = self.visible_links();
                    if let Some(idx) = links.iter().position(|l| l.id == id) {
                        self.nav_selected = idx;
                    }
                    self.drag.begin(id);
                    return Ok(None);
                }

                // Editor rows: focus, and cycle by clicked half.
                let (left, _) = Self::columns(inner);
                if mouse.column >= left.x
                    && mouse.column < left.x + left.width
                    && mouse.row >= left.y
                    && mouse.row < left.y + left.height
                {
                    let offset = mouse.row - left.y;
                    if let Some(field) = Self::left_field_at(offset) {
                        self.active_field = field;
                        match field {
                            SettingsField::SidebarCollapsed => {
                                self.reset_armed = false;
                                return Ok(Some(Action::ToggleSidebar));
                            }
                            SettingsField::Reset => return Ok(self.press_reset()),
                            _ => {
                                self.reset_armed = false;
                                let forward = mouse.column >= left.x + left.width / 2;
                                return Ok(self.cycle_value(forward));
                            }
                        }
                    }
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if self.drag.is_active() {
                    if let Some((id, row_area)) = self.nav_row_at(inner, mouse.column, mouse.row) {
                        self.drag.hover_over(
                            id,
                            (mouse.column, mouse.row),
                            row_area,
                            Axis::Vertical,
                        );
                    }
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(drop) = self.drag.commit() {
                    if let Some(order) = drag::apply_reorder(
                        &self.prefs.nav_order,
                        drop.dragged,
                        drop.target,
                        drop.side,
                    ) {
                        return Ok(Some(Action::SetNavOrder(order)));
                    }
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::PrefsUpdated(prefs) = action {
            self.prefs = prefs.clone();
            let links_len = self.visible_links().len();
            if links_len > 0 && self.nav_selected >= links_len {
                self.nav_selected = links_len - 1;
            }
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .title(" Settings ")
            .title_style(theme.title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.border_default());

        let outer = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::vertical([
            Constraint::Min(1),    // editor + nav list
            Constraint::Length(1), // hints
        ])
        .split(outer);

        self.last_inner.set(layout[0]);
        let (left, right) = Self::columns(layout[0]);

        self.render_editor(frame, left, theme);
        self.render_nav_list(frame, right, theme);

        let hints = Line::from(vec![
            Span::styled("  j/k ", theme.key_hint_key()),
            Span::styled("field  ", theme.key_hint()),
            Span::styled("h/l ", theme.key_hint_key()),
            Span::styled("change  ", theme.key_hint()),
            Span::styled("J/K ", theme.key_hint_key()),
            Span::styled("move link  ", theme.key_hint()),
            Span::styled("drag ", theme.key_hint_key()),
            Span::styled("reorder  ", theme.key_hint()),
            Span::styled("Esc ", theme.key_hint_key()),
            Span::styled("back", theme.key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[1]);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crossterm::event::{KeyModifiers, MouseEventKind};
    use pretty_assertions::assert_eq;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    fn shifted(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::SHIFT)
    }

    fn screen() -> SettingsScreen {
        let mut screen = SettingsScreen::new(Role::Admin);
        screen
            .update(&Action::PrefsUpdated(AppearancePreferences::default()))
            .unwrap();
        screen
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn cycling_the_base_theme_emits_the_next_option() {
        let mut screen = screen();
        let action = screen.handle_key_event(key(KeyCode::Char('l'))).unwrap();
        assert!(matches!(action, Some(Action::SetBaseTheme(BaseTheme::Light))));

        // Backwards from the first option wraps to the last.
        let action = screen.handle_key_event(key(KeyCode::Char('h'))).unwrap();
        assert!(matches!(
            action,
            Some(Action::SetBaseTheme(BaseTheme::Midnight))
        ));
    }

    #[test]
    fn reset_requires_a_second_enter() {
        let mut screen = screen();
        screen.active_field = SettingsField::Reset;

        let first = screen.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert!(first.is_none());
        assert!(screen.reset_armed);

        let second = screen.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert!(matches!(second, Some(Action::ResetAppearance)));
        assert!(!screen.reset_armed);
    }

    #[test]
    fn any_other_key_disarms_the_reset() {
        let mut screen = screen();
        screen.active_field = SettingsField::Reset;
        screen.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert!(screen.reset_armed);

        screen.handle_key_event(key(KeyCode::Char('k'))).unwrap();
        assert!(!screen.reset_armed);
    }

    #[test]
    fn keyboard_move_emits_and_follows_the_link() {
        let mut screen = screen();
        screen.active_field = SettingsField::NavOrder;
        assert_eq!(screen.nav_selected, 0);

        let action = screen.handle_key_event(shifted('J')).unwrap();
        assert!(matches!(
            action,
            Some(Action::MoveNavLink(NavLinkId::Properties, Direction::Down))
        ));
        assert_eq!(screen.nav_selected, 1);

        // Moving the top link up has nowhere to go.
        screen.nav_selected = 0;
        let action = screen.handle_key_event(shifted('K')).unwrap();
        assert!(action.is_none());
    }

    #[test]
    fn drag_across_the_list_emits_the_reordered_catalog() {
        let mut screen = screen();
        screen.last_inner.set(Rect::new(0, 0, 100, 20));

        let list = SettingsScreen::nav_list_area(Rect::new(0, 0, 100, 20));
        // Admin's first visible link is Properties, second is Clients.
        let first_row = list.y;
        let second_row = list.y + 1;

        screen
            .handle_mouse_event(mouse(
                MouseEventKind::Down(MouseButton::Left),
                list.x + 2,
                first_row,
            ))
            .unwrap();
        assert!(screen.drag.is_active());

        // Hover the lower half of the second row: insert after it.
        screen
            .handle_mouse_event(mouse(
                MouseEventKind::Drag(MouseButton::Left),
                list.x + 2,
                second_row,
            ))
            .unwrap();

        let action = screen
            .handle_mouse_event(mouse(
                MouseEventKind::Up(MouseButton::Left),
                list.x + 2,
                second_row,
            ))
            .unwrap();

        let Some(Action::SetNavOrder(order)) = action else {
            panic!("expected a reorder, got {action:?}");
        };
        assert_eq!(order[0], NavLinkId::MyInterests);
        assert_eq!(order.len(), nav::canonical_order().len());
        // Properties lands right after Clients.
        let clients = order.iter().position(|&id| id == NavLinkId::Clients).unwrap();
        assert_eq!(order[clients + 1], NavLinkId::Properties);
    }

    #[test]
    fn esc_cancels_a_drag_without_reordering() {
        let mut screen = screen();
        screen.last_inner.set(Rect::new(0, 0, 100, 20));
        let list = SettingsScreen::nav_list_area(Rect::new(0, 0, 100, 20));

        screen
            .handle_mouse_event(mouse(
                MouseEventKind::Down(MouseButton::Left),
                list.x + 2,
                list.y,
            ))
            .unwrap();
        screen
            .handle_mouse_event(mouse(
                MouseEventKind::Drag(MouseButton::Left),
                list.x + 2,
                list.y + 2,
            ))
            .unwrap();

        let action = screen.handle_key_event(key(KeyCode::Esc)).unwrap();
        assert!(matches!(action, Some(Action::Render)));
        assert!(!screen.drag.is_active());

        // The release after a cancel is inert.
        let action = screen
            .handle_mouse_event(mouse(
                MouseEventKind::Up(MouseButton::Left),
                list.x + 2,
                list.y + 2,
            ))
            .unwrap();
        assert!(action.is_none());
    }

    #[test]
    fn client_role_sees_only_its_links() {
        let mut screen = SettingsScreen::new(Role::Client);
        screen
            .update(&Action::PrefsUpdated(AppearancePreferences::default()))
            .unwrap();
        let ids: Vec<_> = screen.visible_links().iter().map(|l| l.id).collect();
        assert_eq!(
            ids,
            vec![
                NavLinkId::Properties,
                NavLinkId::MyInterests,
                NavLinkId::MySchedule,
            ]
        );
    }
}
