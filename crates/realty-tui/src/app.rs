//! Application core — event loop, navigation chrome, action dispatch.
//!
//! Navigation renders on one of three surfaces chosen per frame from the
//! stored layout preference and the terminal width: a top header bar with
//! a "⋯ More" overflow menu, a collapsible left sidebar, or a mobile
//! bottom bar. All three share the same hit geometry builder, so mouse
//! handling and rendering can never disagree about where a link is.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use realty_config::PrefStore;
use realty_core::nav::{self, NavLink};
use realty_core::{AppearancePreferences, Directory, NavLinkId, Role};

use crate::action::{Action, Direction, Notification, NotificationLevel};
use crate::component::Component;
use crate::drag::{self, Axis, DragController, InsertSide};
use crate::event::{Event, EventReader};
use crate::nav_layout::{self, NAV_GAP};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme::Theme;
use crate::tui::Tui;

const BRAND: &str = " ⌂ RealtyCRM ";
const MORE_LABEL: &str = " ⋯ More ";
const SIDEBAR_WIDTH: u16 = 22;
const RAIL_WIDTH: u16 = 6;
const TOAST_TTL: Duration = Duration::from_secs(4);

fn text_width(s: &str) -> u16 {
    u16::try_from(s.chars().count()).unwrap_or(u16::MAX)
}

fn item_label(link: &NavLink) -> String {
    format!(" {} {} ", link.icon, link.label)
}

fn hit(rect: Rect, column: u16, row: u16) -> bool {
    rect.contains(Position::new(column, row))
}

fn is_chrome(screen: ScreenId) -> bool {
    matches!(screen, ScreenId::Notifications | ScreenId::Settings)
}

// ── Geometry ─────────────────────────────────────────────────────────

/// Which chrome variant is active this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NavSurface {
    Header,
    Sidebar { collapsed: bool },
    BottomBar,
}

/// Everything the frame places outside the screen content, with the rects
/// the mouse handler tests against.
struct NavGeometry {
    surface: NavSurface,
    axis: Axis,
    content: Rect,
    status: Rect,
    nav_area: Rect,
    brand: Option<Rect>,
    /// Inline links, in display order.
    items: Vec<(NavLinkId, Rect)>,
    more: Option<Rect>,
    bell: Option<Rect>,
    role_chip: Option<Rect>,
    collapse: Option<Rect>,
    /// Links folded behind the More affordance.
    overflow: Vec<NavLinkId>,
    popup: Option<Rect>,
    popup_items: Vec<(NavLinkId, Rect)>,
}

enum PopupAnchor {
    Below,
    Above,
}

/// Bordered menu next to the More affordance, clamped to the frame.
fn popup_geometry(
    overflow: &[NavLinkId],
    anchor: Option<Rect>,
    area: Rect,
    placement: &PopupAnchor,
) -> (Option<Rect>, Vec<(NavLinkId, Rect)>) {
    let Some(anchor) = anchor else {
        return (None, Vec::new());
    };
    if overflow.is_empty() {
        return (None, Vec::new());
    }

    let widest = overflow
        .iter()
        .map(|id| text_width(&item_label(id.link())))
        .max()
        .unwrap_or(0);
    let width = (widest + 2).min(area.width);
    let height = (u16::try_from(overflow.len()).unwrap_or(u16::MAX) + 2).min(area.height);
    let x = anchor.x.min(area.right().saturating_sub(width));
    let y = match placement {
        PopupAnchor::Below => (anchor.y + 1).min(area.bottom().saturating_sub(height)),
        PopupAnchor::Above => anchor.y.saturating_sub(height),
    };
    let popup = Rect::new(x, y, width, height);

    let items = overflow
        .iter()
        .enumerate()
        .filter_map(|(i, &id)| {
            let row = popup.y + 1 + u16::try_from(i).unwrap_or(u16::MAX);
            (row + 1 < popup.bottom()).then(|| {
                (
                    id,
                    Rect::new(popup.x + 1, row, popup.width.saturating_sub(2), 1),
                )
            })
        })
        .collect();
    (Some(popup), items)
}

// ── App ──────────────────────────────────────────────────────────────

/// Top-level application state and event loop.
pub struct App {
    role: Role,
    /// Snapshot of the stored preferences, refreshed via `PrefsUpdated`.
    prefs: AppearancePreferences,
    theme: Theme,
    pref_store: PrefStore,
    directory: Arc<Directory>,
    screens: HashMap<ScreenId, Box<dyn Component>>,
    active_screen: ScreenId,
    previous_screen: Option<ScreenId>,
    running: bool,
    help_visible: bool,
    /// Overflow menu open state.
    more_open: bool,
    /// Drag gesture on whichever nav surface is showing.
    nav_drag: DragController,
    /// Link pressed but not yet released; a release on it without an
    /// intervening hover is a click.
    nav_pressed: Option<NavLinkId>,
    terminal_size: (u16, u16),
    unread: usize,
    toast: Option<(Notification, Instant)>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(role: Role, pref_store: PrefStore, directory: Arc<Directory>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let screens: HashMap<ScreenId, Box<dyn Component>> =
            create_screens(role).into_iter().collect();
        let prefs = pref_store.prefs().clone();
        let theme = Theme::from_prefs(&prefs);

        Self {
            role,
            prefs,
            theme,
            pref_store,
            directory,
            screens,
            active_screen: ScreenId::Dashboard,
            previous_screen: None,
            running: true,
            help_visible: false,
            more_open: false,
            nav_drag: DragController::new(),
            nav_pressed: None,
            terminal_size: (0, 0),
            unread: 0,
            toast: None,
            action_tx,
            action_rx,
        }
    }

    /// Sender for background tasks (data bridge, preference watcher).
    pub fn action_sender(&self) -> mpsc::UnboundedSender<Action> {
        self.action_tx.clone()
    }

    fn visible_links(&self) -> Vec<&'static NavLink> {
        nav::links_for_viewer(&self.prefs.nav_order, Some(self.role))
    }

    /// Run the main event loop until quit.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.terminal_size = tui.size().unwrap_or((80, 24));

        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!(role = %self.role, "event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(action) = self.handle_mouse_event(mouse)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        info!("event loop ended");
        Ok(())
    }

    // ── Input ────────────────────────────────────────────────────────

    /// Global keys first, then the active screen.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                KeyCode::Char('q') => Ok(Some(Action::Quit)),
                _ => Ok(None),
            };
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => return Ok(Some(Action::Quit)),
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),
            (KeyModifiers::NONE, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),

            // Brand destination plus the two chrome screens.
            (KeyModifiers::NONE, KeyCode::Char('0')) => {
                return Ok(Some(Action::SwitchScreen(ScreenId::Dashboard)));
            }
            (KeyModifiers::NONE, KeyCode::Char('s')) => {
                return Ok(Some(Action::SwitchScreen(ScreenId::Settings)));
            }
            (KeyModifiers::NONE, KeyCode::Char('n')) => {
                return Ok(Some(Action::SwitchScreen(ScreenId::Notifications)));
            }

            // Positional jump over the viewer's ordered links, so `1` is
            // always the first link the user actually sees.
            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='9')) => {
                let idx = (c as usize) - ('1' as usize);
                if let Some(link) = self.visible_links().get(idx) {
                    return Ok(Some(Action::SwitchScreen(ScreenId::from_nav_link(link.id))));
                }
                return Ok(None);
            }

            (KeyModifiers::NONE, KeyCode::Esc) => return self.handle_escape(key),

            _ => {}
        }

        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_key_event(key);
        }
        Ok(None)
    }

    /// Esc closes transient chrome first, then lets the active screen
    /// claim it, then backs out of chrome screens.
    fn handle_escape(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.more_open {
            self.more_open = false;
            return Ok(None);
        }
        if self.nav_drag.is_active() {
            self.nav_drag.cancel();
            self.nav_pressed = None;
            return Ok(None);
        }

        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            if let Some(action) = screen.handle_key_event(key)? {
                return Ok(Some(action));
            }
        }

        if is_chrome(self.active_screen) {
            let target = self.previous_screen.unwrap_or(ScreenId::Dashboard);
            return Ok(Some(Action::SwitchScreen(target)));
        }
        Ok(None)
    }

    /// Nav chrome gets first claim on mouse events; everything else goes
    /// to the active screen.
    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let (cols, rows) = self.terminal_size;
        if cols == 0 || rows == 0 {
            return self.delegate_mouse(mouse);
        }
        let geo = self.nav_geometry(Rect::new(0, 0, cols, rows));
        let (column, row) = (mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if geo.brand.is_some_and(|r| hit(r, column, row)) {
                    self.more_open = false;
                    return Ok(Some(Action::SwitchScreen(ScreenId::Dashboard)));
                }
                if geo.bell.is_some_and(|r| hit(r, column, row)) {
                    return Ok(Some(Action::SwitchScreen(ScreenId::Notifications)));
                }
                if geo.collapse.is_some_and(|r| hit(r, column, row)) {
                    return Ok(Some(Action::ToggleSidebar));
                }
                if geo.more.is_some_and(|r| hit(r, column, row)) {
                    self.more_open = !self.more_open;
                    return Ok(None);
                }
                if let Some(&(id, _)) = geo
                    .items
                    .iter()
                    .chain(&geo.popup_items)
                    .find(|(_, r)| hit(*r, column, row))
                {
                    self.nav_drag.begin(id);
                    self.nav_pressed = Some(id);
                    return Ok(None);
                }
                if self.more_open {
                    // A press anywhere else dismisses the menu.
                    self.more_open = false;
                    return Ok(None);
                }
                self.delegate_mouse(mouse)
            }

            MouseEventKind::Drag(MouseButton::Left) => {
                if !self.nav_drag.is_active() {
                    return self.delegate_mouse(mouse);
                }
                if let Some(&(id, rect)) = geo.items.iter().find(|(_, r)| hit(*r, column, row)) {
                    self.nav_drag.hover_over(id, (column, row), rect, geo.axis);
                } else if let Some(&(id, rect)) =
                    geo.popup_items.iter().find(|(_, r)| hit(*r, column, row))
                {
                    self.nav_drag
                        .hover_over(id, (column, row), rect, Axis::Vertical);
                } else if geo.more.is_some_and(|r| hit(r, column, row)) {
                    // Hovering the affordance mid-drag reveals the overflow
                    // so it can be a drop target.
                    self.more_open = true;
                }
                Ok(None)
            }

            MouseEventKind::Up(MouseButton::Left) => {
                if !self.nav_drag.is_active() {
                    return self.delegate_mouse(mouse);
                }
                let pressed = self.nav_pressed.take();
                if let Some(drop) = self.nav_drag.commit() {
                    if let Some(order) = drag::apply_reorder(
                        &self.prefs.nav_order,
                        drop.dragged,
                        drop.target,
                        drop.side,
                    ) {
                        return Ok(Some(Action::SetNavOrder(order)));
                    }
                    return Ok(None);
                }
                // Never hovered anything: press and release on the same
                // link is a navigation click.
                if let Some(id) = pressed {
                    let released_on = geo
                        .items
                        .iter()
                        .chain(&geo.popup_items)
                        .any(|&(item, r)| item == id && hit(r, column, row));
                    if released_on {
                        self.more_open = false;
                        return Ok(Some(Action::SwitchScreen(ScreenId::from_nav_link(id))));
                    }
                }
                Ok(None)
            }

            _ => self.delegate_mouse(mouse),
        }
    }

    fn delegate_mouse(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_mouse_event(mouse);
        }
        Ok(None)
    }

    // ── Actions ──────────────────────────────────────────────────────

    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::Resize(w, h) => {
                self.terminal_size = (*w, *h);
            }

            Action::SwitchScreen(target) => {
                if *target != self.active_screen {
                    debug!("switching screen: {} → {}", self.active_screen, target);
                    // Chrome-to-chrome hops keep the original return point,
                    // so Esc from Settings opened atop Notifications still
                    // lands back on real content.
                    if !(is_chrome(self.active_screen) && is_chrome(*target)) {
                        self.previous_screen = Some(self.active_screen);
                    }
                    self.active_screen = *target;
                    self.more_open = false;
                }
            }

            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }

            Action::Tick => {
                if let Some((_, shown_at)) = &self.toast {
                    if shown_at.elapsed() >= TOAST_TTL {
                        self.toast = None;
                    }
                }
            }

            Action::Notify(notification) => {
                self.toast = Some((notification.clone(), Instant::now()));
            }

            Action::DismissNotification => {
                self.toast = None;
            }

            Action::PrefsUpdated(prefs) => {
                self.prefs = prefs.clone();
                self.theme = Theme::from_prefs(prefs);
            }

            Action::NotificationsUpdated(list) => {
                self.unread = list.iter().filter(|n| !n.read).count();
            }

            // Appearance writes go to the store; the store broadcasts and
            // the watcher echoes a PrefsUpdated back through this channel.
            Action::SetBaseTheme(theme) => self.pref_store.set_base_theme(*theme),
            Action::SetAccentColor(accent) => self.pref_store.set_accent_color(*accent),
            Action::SetNavLayout(layout) => self.pref_store.set_layout(*layout),
            Action::SetMobileNavLayout(layout) => self.pref_store.set_mobile_layout(*layout),
            Action::SetFontFamily(font) => self.pref_store.set_font_family(*font),
            Action::SetFontSize(size) => self.pref_store.set_font_size(*size),
            Action::ToggleSidebar => self.pref_store.toggle_sidebar(),
            Action::SetNavOrder(order) => self.pref_store.set_nav_order(order.clone()),
            Action::MoveNavLink(id, direction) => self.move_nav_link(*id, *direction),

            Action::ResetAppearance => {
                self.pref_store.reset();
                self.action_tx.send(Action::Notify(Notification::success(
                    "Appearance reset to defaults",
                )))?;
            }

            Action::MarkNotificationRead(id) => {
                // The bridge echoes the change back as NotificationsUpdated.
                self.directory.mark_notification_read(id);
            }

            Action::MarkAllNotificationsRead => {
                self.directory.mark_all_notifications_read();
            }

            Action::Render => {}

            _ => {}
        }

        if !matches!(action, Action::Render | Action::Quit | Action::Resize(..)) {
            self.broadcast(action)?;
        }
        Ok(())
    }

    /// Fan an action out to every screen; data snapshots have to reach
    /// screens that are not currently active.
    fn broadcast(&mut self, action: &Action) -> Result<()> {
        for screen in self.screens.values_mut() {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    /// Keyboard reorder: one visible step. The neighbor is taken from the
    /// role-filtered view, then the move applies to the full stored order,
    /// so links the viewer cannot see are hopped over rather than swapped
    /// into view.
    fn move_nav_link(&mut self, id: NavLinkId, direction: Direction) {
        let visible: Vec<NavLinkId> = self.visible_links().iter().map(|l| l.id).collect();
        let Some(pos) = visible.iter().position(|&v| v == id) else {
            return;
        };
        let (target, side) = match direction {
            Direction::Up => {
                if pos == 0 {
                    return;
                }
                (visible[pos - 1], InsertSide::Before)
            }
            Direction::Down => {
                if pos + 1 >= visible.len() {
                    return;
                }
                (visible[pos + 1], InsertSide::After)
            }
        };
        if let Some(order) = drag::apply_reorder(&self.prefs.nav_order, id, target, side) {
            self.pref_store.set_nav_order(order);
        }
    }

    // ── Geometry ─────────────────────────────────────────────────────

    fn nav_surface(&self, width: u16) -> NavSurface {
        if width > 0 && width < nav_layout::MOBILE_BREAKPOINT {
            match self.prefs.mobile_layout {
                realty_core::MobileNavLayout::Bottom => NavSurface::BottomBar,
                realty_core::MobileNavLayout::Sidebar => NavSurface::Sidebar { collapsed: true },
            }
        } else {
            match self.prefs.layout {
                realty_core::NavLayout::Horizontal => NavSurface::Header,
                realty_core::NavLayout::Vertical => NavSurface::Sidebar {
                    collapsed: self.prefs.sidebar_collapsed,
                },
            }
        }
    }

    fn nav_geometry(&self, area: Rect) -> NavGeometry {
        match self.nav_surface(area.width) {
            NavSurface::Header => self.header_geometry(area),
            NavSurface::Sidebar { collapsed } => self.sidebar_geometry(area, collapsed),
            NavSurface::BottomBar => self.bottom_geometry(area),
        }
    }

    fn header_geometry(&self, area: Rect) -> NavGeometry {
        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);
        let header = rows[0];

        let links = self.visible_links();
        let widths: Vec<u16> = links.iter().map(|l| text_width(&item_label(l))).collect();

        let brand_w = text_width(BRAND).min(header.width);
        let brand = Rect::new(header.x, header.y, brand_w, 1);

        let bell_label = format!(" 󰂚 {} ", self.unread);
        let bell_w = text_width(&bell_label);
        let role_w = text_width(&format!(" {} ", self.role.label()));
        let right_w = bell_w + role_w;
        let have_right = header.width > brand_w + right_w;
        let role_chip =
            have_right.then(|| Rect::new(header.right() - role_w, header.y, role_w, 1));
        let bell = have_right
            .then(|| Rect::new(header.right() - right_w, header.y, bell_w, 1));

        let origin = brand.right().saturating_add(2);
        let container = header
            .right()
            .saturating_sub(if have_right { right_w + 1 } else { 0 })
            .saturating_sub(origin);
        let part = nav_layout::partition(&widths, container, text_width(MORE_LABEL), NAV_GAP);

        let ids: Vec<NavLinkId> = links.iter().map(|l| l.id).collect();
        let (visible_ids, overflow_ids) = part.split(&ids);
        let spans = nav_layout::item_spans(&widths[..part.visible_count], origin, NAV_GAP);
        let items: Vec<(NavLinkId, Rect)> = visible_ids
            .iter()
            .zip(&spans)
            .map(|(&id, &(x, w))| (id, Rect::new(x, header.y, w, 1)))
            .collect();

        let more = part.has_overflow().then(|| {
            let x = items
                .last()
                .map_or(origin, |(_, r)| r.right().saturating_add(NAV_GAP));
            Rect::new(x, header.y, text_width(MORE_LABEL), 1)
        });

        let overflow = overflow_ids.to_vec();
        let (popup, popup_items) = if self.more_open {
            popup_geometry(&overflow, more, area, &PopupAnchor::Below)
        } else {
            (None, Vec::new())
        };

        NavGeometry {
            surface: NavSurface::Header,
            axis: Axis::Horizontal,
            content: rows[1],
            status: rows[2],
            nav_area: header,
            brand: Some(brand),
            items,
            more,
            bell,
            role_chip,
            collapse: None,
            overflow,
            popup,
            popup_items,
        }
    }

    fn sidebar_geometry(&self, area: Rect, collapsed: bool) -> NavGeometry {
        let rows = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);
        let width = if collapsed { RAIL_WIDTH } else { SIDEBAR_WIDTH };
        let cols =
            Layout::horizontal([Constraint::Length(width), Constraint::Min(1)]).split(rows[0]);
        let side = cols[0];

        // The rail is forced on narrow terminals; only the desktop sidebar
        // offers the collapse control.
        let desktop = area.width >= nav_layout::MOBILE_BREAKPOINT;

        let brand = Rect::new(side.x, side.y, side.width, 1);
        let items: Vec<(NavLinkId, Rect)> = self
            .visible_links()
            .iter()
            .enumerate()
            .filter_map(|(i, link)| {
                let y = side.y + 2 + u16::try_from(i).unwrap_or(u16::MAX);
                // Last row is reserved for the collapse toggle.
                (y + 1 < side.bottom())
                    .then(|| (link.id, Rect::new(side.x, y, side.width, 1)))
            })
            .collect();
        let collapse = (desktop && side.height > 3)
            .then(|| Rect::new(side.x, side.bottom() - 1, side.width, 1));

        NavGeometry {
            surface: NavSurface::Sidebar { collapsed },
            axis: Axis::Vertical,
            content: cols[1],
            status: rows[1],
            nav_area: side,
            brand: Some(brand),
            items,
            more: None,
            bell: None,
            role_chip: None,
            collapse,
            overflow: Vec::new(),
            popup: None,
            popup_items: Vec::new(),
        }
    }

    fn bottom_geometry(&self, area: Rect) -> NavGeometry {
        let rows = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);
        let bar = rows[1];

        let links = self.visible_links();
        let widths: Vec<u16> = links.iter().map(|l| text_width(&item_label(l))).collect();
        let part = nav_layout::bottom_bar_partition(links.len());

        let ids: Vec<NavLinkId> = links.iter().map(|l| l.id).collect();
        let (visible_ids, overflow_ids) = part.split(&ids);
        let origin = bar.x + 1;
        let spans = nav_layout::item_spans(&widths[..part.visible_count], origin, NAV_GAP);
        let items: Vec<(NavLinkId, Rect)> = visible_ids
            .iter()
            .zip(&spans)
            .map(|(&id, &(x, w))| (id, Rect::new(x, bar.y, w, 1)))
            .collect();

        let more = part.has_overflow().then(|| {
            let x = items
                .last()
                .map_or(origin, |(_, r)| r.right().saturating_add(NAV_GAP));
            Rect::new(x, bar.y, text_width(MORE_LABEL), 1)
        });

        let overflow = overflow_ids.to_vec();
        let (popup, popup_items) = if self.more_open {
            popup_geometry(&overflow, more, area, &PopupAnchor::Above)
        } else {
            (None, Vec::new())
        };

        NavGeometry {
            surface: NavSurface::BottomBar,
            axis: Axis::Horizontal,
            content: rows[0],
            status: rows[2],
            nav_area: bar,
            brand: None,
            items,
            more,
            bell: None,
            role_chip: None,
            collapse: None,
            overflow,
            popup,
            popup_items,
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let geo = self.nav_geometry(area);

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, geo.content, &self.theme);
        }

        match geo.surface {
            NavSurface::Header => self.render_header(frame, &geo),
            NavSurface::Sidebar { collapsed } => self.render_sidebar(frame, &geo, collapsed),
            NavSurface::BottomBar => self.render_bottom_bar(frame, &geo),
        }

        self.render_status_bar(frame, geo.status);
        self.render_popup(frame, &geo);

        if self.help_visible {
            self.render_help_overlay(frame, area);
        }
    }

    fn nav_item_style(&self, id: NavLinkId) -> Style {
        if self.nav_drag.dragged() == Some(id) {
            self.theme.nav_dragging()
        } else if self.active_screen.nav_link() == Some(id) {
            self.theme.nav_active()
        } else {
            self.theme.nav_inactive()
        }
    }

    fn render_header(&self, frame: &mut Frame, geo: &NavGeometry) {
        frame.render_widget(
            Block::default().style(Style::default().bg(self.theme.bg_highlight)),
            geo.nav_area,
        );

        if let Some(brand) = geo.brand {
            frame.render_widget(
                Paragraph::new(Span::styled(BRAND, self.theme.title_style())),
                brand,
            );
        }

        for &(id, rect) in &geo.items {
            let label = item_label(id.link());
            frame.render_widget(
                Paragraph::new(Span::styled(label, self.nav_item_style(id))),
                rect,
            );
        }

        if let Some(more) = geo.more {
            let style = if self.more_open {
                self.theme.tab_active()
            } else {
                self.theme.nav_inactive()
            };
            frame.render_widget(Paragraph::new(Span::styled(MORE_LABEL, style)), more);
        }

        if let Some(bell) = geo.bell {
            let style = if self.unread > 0 {
                Style::default()
                    .fg(self.theme.warning)
                    .add_modifier(Modifier::BOLD)
            } else {
                self.theme.nav_inactive()
            };
            frame.render_widget(
                Paragraph::new(Span::styled(format!(" 󰂚 {} ", self.unread), style)),
                bell,
            );
        }

        if let Some(chip) = geo.role_chip {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    format!(" {} ", self.role.label()),
                    self.theme.nav_inactive(),
                )),
                chip,
            );
        }

        self.render_horizontal_drop_marker(frame, geo);
    }

    /// Inline drop position marker for the horizontal surfaces, drawn in
    /// the gap next to the target so item geometry stays stable.
    fn render_horizontal_drop_marker(&self, frame: &mut Frame, geo: &NavGeometry) {
        let Some((target, side)) = self.nav_drag.hover() else {
            return;
        };
        let Some(&(_, rect)) = geo.items.iter().find(|(id, _)| *id == target) else {
            return;
        };
        let x = match side {
            InsertSide::Before => rect.x.saturating_sub(2),
            InsertSide::After => rect.right().saturating_add(1),
        };
        if x >= geo.nav_area.x && x < geo.nav_area.right() {
            frame.render_widget(
                Paragraph::new(Span::styled("┃", self.theme.drop_indicator())),
                Rect::new(x, rect.y, 1, 1),
            );
        }
    }

    fn render_sidebar(&self, frame: &mut Frame, geo: &NavGeometry, collapsed: bool) {
        frame.render_widget(
            Block::default().style(Style::default().bg(self.theme.bg_highlight)),
            geo.nav_area,
        );

        if let Some(brand) = geo.brand {
            let label = if collapsed { "  ⌂" } else { BRAND };
            frame.render_widget(
                Paragraph::new(Span::styled(label, self.theme.title_style())),
                brand,
            );
        }

        let hover = self.nav_drag.hover();
        for &(id, rect) in &geo.items {
            let link = id.link();
            let prefix = match hover {
                Some((target, InsertSide::Before)) if target == id => {
                    Span::styled("▴ ", self.theme.drop_indicator())
                }
                Some((target, InsertSide::After)) if target == id => {
                    Span::styled("▾ ", self.theme.drop_indicator())
                }
                _ if self.active_screen.nav_link() == Some(id) => {
                    Span::styled("▎ ", Style::default().fg(self.theme.primary))
                }
                _ => Span::raw("  "),
            };
            let body = if collapsed {
                format!("{} ", link.icon)
            } else {
                format!("{}  {}", link.icon, link.label)
            };
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    prefix,
                    Span::styled(body, self.nav_item_style(id)),
                ])),
                rect,
            );
        }

        if let Some(toggle) = geo.collapse {
            let label = if collapsed { "  » " } else { "  «  Collapse" };
            frame.render_widget(
                Paragraph::new(Span::styled(label, self.theme.key_hint())),
                toggle,
            );
        }
    }

    fn render_bottom_bar(&self, frame: &mut Frame, geo: &NavGeometry) {
        frame.render_widget(
            Block::default().style(Style::default().bg(self.theme.bg_highlight)),
            geo.nav_area,
        );

        for &(id, rect) in &geo.items {
            let label = item_label(id.link());
            frame.render_widget(
                Paragraph::new(Span::styled(label, self.nav_item_style(id))),
                rect,
            );
        }

        if let Some(more) = geo.more {
            let style = if self.more_open {
                self.theme.tab_active()
            } else {
                self.theme.nav_inactive()
            };
            frame.render_widget(Paragraph::new(Span::styled(MORE_LABEL, style)), more);
        }

        self.render_horizontal_drop_marker(frame, geo);
    }

    fn render_popup(&self, frame: &mut Frame, geo: &NavGeometry) {
        let Some(popup) = geo.popup else {
            return;
        };

        frame.render_widget(Clear, popup);
        let block = Block::default()
            .title(" More ")
            .title_style(self.theme.title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_focused())
            .style(Style::default().bg(self.theme.bg));
        frame.render_widget(block, popup);

        let hover = self.nav_drag.hover();
        for &(id, rect) in &geo.popup_items {
            let link = id.link();
            let prefix = match hover {
                Some((target, InsertSide::Before)) if target == id => {
                    Span::styled("▴", self.theme.drop_indicator())
                }
                Some((target, InsertSide::After)) if target == id => {
                    Span::styled("▾", self.theme.drop_indicator())
                }
                _ => Span::raw(" "),
            };
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    prefix,
                    Span::styled(
                        format!("{} {}", link.icon, link.label),
                        self.nav_item_style(id),
                    ),
                ])),
                rect,
            );
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                format!(" ● {}", self.role.label()),
                Style::default().fg(self.theme.primary),
            ),
            Span::styled(
                format!("  │  {}", self.active_screen.label()),
                self.theme.status_bar(),
            ),
            Span::styled("  │  ", self.theme.status_bar()),
        ];

        let bell_style = if self.unread > 0 {
            Style::default().fg(self.theme.warning)
        } else {
            self.theme.status_bar()
        };
        spans.push(Span::styled(format!("󰂚 {}", self.unread), bell_style));

        if self.nav_drag.is_active() {
            spans.push(Span::styled(
                "  │  release to drop · Esc cancels",
                Style::default().fg(self.theme.warning),
            ));
        } else {
            spans.push(Span::styled("  │  ", self.theme.status_bar()));
            spans.push(Span::styled("? ", self.theme.key_hint_key()));
            spans.push(Span::styled("help  ", self.theme.key_hint()));
            spans.push(Span::styled("0 ", self.theme.key_hint_key()));
            spans.push(Span::styled("home  ", self.theme.key_hint()));
            spans.push(Span::styled("q ", self.theme.key_hint_key()));
            spans.push(Span::styled("quit", self.theme.key_hint()));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);

        if let Some((toast, _)) = &self.toast {
            let color = match toast.level {
                NotificationLevel::Success => self.theme.success,
                NotificationLevel::Error => self.theme.error,
                NotificationLevel::Info => self.theme.primary,
            };
            let text = format!(" {} ", toast.message);
            let width = text_width(&text).min(area.width);
            let rect = Rect::new(area.right() - width, area.y, width, 1);
            frame.render_widget(
                Paragraph::new(Span::styled(
                    text,
                    Style::default().fg(self.theme.bg).bg(color),
                )),
                rect,
            );
        }
    }

    fn render_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let width = 62u16.min(area.width.saturating_sub(4));
        let height = 20u16.min(area.height.saturating_sub(4));
        let x = (area.width.saturating_sub(width)) / 2;
        let y = (area.height.saturating_sub(height)) / 2;
        let overlay = Rect::new(area.x + x, area.y + y, width, height);

        frame.render_widget(Clear, overlay);
        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(self.theme.title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_focused())
            .style(Style::default().bg(self.theme.bg));
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let section = |label: &'static str| -> Line<'static> {
            Line::from(Span::styled(
                format!("  {label}"),
                Style::default().fg(self.theme.primary),
            ))
        };
        let entry = |keys: &'static str, what: &'static str| -> Line<'static> {
            Line::from(vec![
                Span::styled(format!("  {keys:<10}"), self.theme.key_hint_key()),
                Span::styled(what, self.theme.key_hint()),
            ])
        };

        let lines = vec![
            Line::from(""),
            section("Navigation"),
            entry("1-9", "Jump to the n-th link you see"),
            entry("0", "Dashboard"),
            entry("s", "Settings"),
            entry("n", "Notifications"),
            entry("Esc", "Back / close"),
            Line::from(""),
            section("Lists"),
            entry("j/k ↑/↓", "Move selection"),
            entry("g/G", "Top / bottom"),
            entry("Enter", "Open / apply"),
            Line::from(""),
            section("Appearance"),
            entry("drag", "Reorder navigation links"),
            entry("J/K", "Move link (in Settings)"),
            Line::from(""),
            entry("q", "Quit"),
            Line::from(Span::styled(
                "                          Esc or ? to close",
                self.theme.key_hint(),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn app(role: Role) -> App {
        App::new(role, PrefStore::in_memory(), Arc::new(Directory::new()))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
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
    fn digits_jump_positionally_over_the_viewer_order() {
        let mut admin = app(Role::Admin);
        // Admin's second visible link is Clients.
        let action = admin.handle_key_event(key(KeyCode::Char('2'))).unwrap();
        assert!(matches!(
            action,
            Some(Action::SwitchScreen(ScreenId::Clients))
        ));

        // A client's second visible link is My Interests.
        let mut client = app(Role::Client);
        let action = client.handle_key_event(key(KeyCode::Char('2'))).unwrap();
        assert!(matches!(
            action,
            Some(Action::SwitchScreen(ScreenId::MyInterests))
        ));

        // Digits past the end of the list do nothing.
        let action = client.handle_key_event(key(KeyCode::Char('9'))).unwrap();
        assert!(action.is_none());
    }

    #[test]
    fn escape_backs_out_of_chrome_to_the_previous_screen() {
        let mut app = app(Role::Admin);
        app.process_action(&Action::SwitchScreen(ScreenId::Deals))
            .unwrap();
        app.process_action(&Action::SwitchScreen(ScreenId::Settings))
            .unwrap();

        let action = app.handle_key_event(key(KeyCode::Esc)).unwrap();
        assert!(matches!(action, Some(Action::SwitchScreen(ScreenId::Deals))));
    }

    #[test]
    fn chrome_hops_keep_the_original_return_point() {
        let mut app = app(Role::Admin);
        app.process_action(&Action::SwitchScreen(ScreenId::Properties))
            .unwrap();
        app.process_action(&Action::SwitchScreen(ScreenId::Notifications))
            .unwrap();
        app.process_action(&Action::SwitchScreen(ScreenId::Settings))
            .unwrap();

        assert_eq!(app.previous_screen, Some(ScreenId::Properties));
    }

    #[test]
    fn keyboard_move_skips_links_the_viewer_cannot_see() {
        // An employee sees Attendance then Calendar; the full order has
        // hidden links between and after them.
        let mut app = app(Role::Employee);
        app.process_action(&Action::MoveNavLink(NavLinkId::Attendance, Direction::Down))
            .unwrap();

        let order = &app.pref_store.prefs().nav_order;
        let attendance = order.iter().position(|&id| id == NavLinkId::Attendance).unwrap();
        let calendar = order.iter().position(|&id| id == NavLinkId::Calendar).unwrap();
        // Attendance lands right after Calendar in the full order.
        assert_eq!(attendance, calendar + 1);
        // Moving the last visible link further down is a no-op. The watcher
        // task is not running here, so echo the store state by hand first.
        let before = order.clone();
        let echo = app.pref_store.prefs().clone();
        app.process_action(&Action::PrefsUpdated(echo)).unwrap();
        app.process_action(&Action::MoveNavLink(NavLinkId::Attendance, Direction::Down))
            .unwrap();
        assert_eq!(app.pref_store.prefs().nav_order, before);
    }

    #[test]
    fn mobile_width_switches_to_the_mobile_surface() {
        let mut app = app(Role::Admin);
        app.prefs.layout = realty_core::NavLayout::Horizontal;
        assert_eq!(app.nav_surface(120), NavSurface::Header);

        app.prefs.layout = realty_core::NavLayout::Vertical;
        assert_eq!(
            app.nav_surface(120),
            NavSurface::Sidebar { collapsed: false }
        );

        // Below the breakpoint the mobile preference wins.
        assert_eq!(app.nav_surface(79), NavSurface::BottomBar);
        app.prefs.mobile_layout = realty_core::MobileNavLayout::Sidebar;
        assert_eq!(app.nav_surface(79), NavSurface::Sidebar { collapsed: true });
    }

    #[test]
    fn header_folds_links_behind_more_when_narrow() {
        let mut app = app(Role::Admin);
        app.terminal_size = (120, 30);
        app.prefs.layout = realty_core::NavLayout::Horizontal;

        let geo = app.nav_geometry(Rect::new(0, 0, 120, 30));
        // Admin has seven links; a 120-column header cannot fit them all.
        assert!(geo.more.is_some());
        assert!(!geo.overflow.is_empty());
        assert_eq!(
            geo.items.len() + geo.overflow.len(),
            app.visible_links().len()
        );
        // Inline items keep the viewer order prefix.
        assert_eq!(geo.items[0].0, NavLinkId::Properties);

        // Opening the menu materializes popup rows for every folded link.
        app.more_open = true;
        let geo = app.nav_geometry(Rect::new(0, 0, 120, 30));
        assert_eq!(geo.popup_items.len(), geo.overflow.len());
    }

    #[test]
    fn press_and_release_on_one_link_is_a_click() {
        let mut app = app(Role::Admin);
        app.terminal_size = (120, 30);
        app.prefs.layout = realty_core::NavLayout::Horizontal;

        let geo = app.nav_geometry(Rect::new(0, 0, 120, 30));
        let (id, rect) = geo.items[1];

        let action = app
            .handle_mouse_event(mouse(
                MouseEventKind::Down(MouseButton::Left),
                rect.x,
                rect.y,
            ))
            .unwrap();
        assert!(action.is_none());

        let action = app
            .handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), rect.x, rect.y))
            .unwrap();
        assert!(matches!(
            action,
            Some(Action::SwitchScreen(s)) if s == ScreenId::from_nav_link(id)
        ));
    }

    #[test]
    fn dragging_a_link_past_a_neighbor_yields_a_reorder() {
        let mut app = app(Role::Admin);
        app.terminal_size = (120, 30);
        app.prefs.layout = realty_core::NavLayout::Horizontal;

        let geo = app.nav_geometry(Rect::new(0, 0, 120, 30));
        let (dragged, from) = geo.items[0];
        let (target, to) = geo.items[1];

        app.handle_mouse_event(mouse(
            MouseEventKind::Down(MouseButton::Left),
            from.x,
            from.y,
        ))
        .unwrap();
        // Land on the trailing half of the neighbor so the drop side is
        // past it rather than before it.
        let late = to.right() - 1;
        app.handle_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left), late, to.y))
            .unwrap();
        let action = app
            .handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), late, to.y))
            .unwrap();

        let order = match action {
            Some(Action::SetNavOrder(order)) => order,
            other => panic!("expected a reorder, got {other:?}"),
        };
        let dragged_at = order.iter().position(|&id| id == dragged).unwrap();
        let target_at = order.iter().position(|&id| id == target).unwrap();
        assert_eq!(dragged_at, target_at + 1);
        assert_eq!(order.len(), nav::canonical_order().len());
    }

    #[test]
    fn escape_cancels_a_drag_without_reordering() {
        let mut app = app(Role::Admin);
        app.terminal_size = (120, 30);
        app.prefs.layout = realty_core::NavLayout::Horizontal;
        let before = app.prefs.nav_order.clone();

        let geo = app.nav_geometry(Rect::new(0, 0, 120, 30));
        let (_, from) = geo.items[0];
        let (_, to) = geo.items[1];

        app.handle_mouse_event(mouse(
            MouseEventKind::Down(MouseButton::Left),
            from.x,
            from.y,
        ))
        .unwrap();
        app.handle_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left), to.x, to.y))
            .unwrap();

        let action = app.handle_key_event(key(KeyCode::Esc)).unwrap();
        assert!(action.is_none());

        // The release after a cancel is inert.
        let action = app
            .handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), to.x, to.y))
            .unwrap();
        assert!(action.is_none());
        assert_eq!(app.pref_store.prefs().nav_order, before);
    }

    #[test]
    fn reset_action_resets_the_store_and_raises_a_toast() {
        let mut app = app(Role::Admin);
        app.pref_store
            .set_base_theme(realty_core::BaseTheme::Midnight);

        app.process_action(&Action::ResetAppearance).unwrap();
        assert_eq!(
            *app.pref_store.prefs(),
            AppearancePreferences::default()
        );
        // The toast arrives as a queued Notify action.
        let queued = app.action_rx.try_recv().unwrap();
        assert!(matches!(queued, Action::Notify(_)));
    }
}
