//! Properties screen — tree-based site inventory with a detail panel.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use realty_core::{Site, Unit, UnitStatus};

use crate::action::Action;
use crate::component::Component;
use crate::theme::Theme;
use crate::widgets::fmt::{fmt_area, fmt_money, fmt_money_short, fmt_pct_bar};
use crate::widgets::sub_tabs;

// ── Tree node ────────────────────────────────────────────────────────

/// Index path into the site list.
#[derive(Debug, Clone, Copy)]
enum NodeRef {
    Site { site: usize },
    Building { site: usize, building: usize },
    Unit { site: usize, building: usize, unit: usize },
}

struct TreeNode {
    node: NodeRef,
    depth: u32,
    is_last_child: bool,
}

fn unit_status_color(status: UnitStatus, theme: &Theme) -> Color {
    match status {
        UnitStatus::Available => theme.success,
        UnitStatus::Rented => theme.primary,
        UnitStatus::Sold => theme.text_dim,
        UnitStatus::UnderMaintenance => theme.warning,
    }
}

// ── Screen state ─────────────────────────────────────────────────────

pub struct PropertiesScreen {
    sites: Arc<Vec<Arc<Site>>>,
    scroll_offset: usize,
    selected_idx: usize,
    /// Flat node list in render order (pre-order).
    nodes: Vec<TreeNode>,
    /// Unit status filter; buildings and sites always stay visible.
    filter: Option<UnitStatus>,
}

impl PropertiesScreen {
    pub fn new() -> Self {
        Self {
            sites: Arc::new(Vec::new()),
            scroll_offset: 0,
            selected_idx: 0,
            nodes: Vec::new(),
            filter: None,
        }
    }

    fn unit_matches(&self, unit: &Unit) -> bool {
        self.filter.is_none_or(|f| unit.status == f)
    }

    /// Rebuild the flat node list. The hierarchy is fixed, so `is_last_child`
    /// is known at construction.
    fn rebuild_tree(&mut self) {
        let mut nodes = Vec::new();

        for (si, site) in self.sites.iter().enumerate() {
            nodes.push(TreeNode {
                node: NodeRef::Site { site: si },
                depth: 0,
                is_last_child: si + 1 == self.sites.len(),
            });

            for (bi, building) in site.buildings.iter().enumerate() {
                nodes.push(TreeNode {
                    node: NodeRef::Building {
                        site: si,
                        building: bi,
                    },
                    depth: 1,
                    is_last_child: bi + 1 == site.buildings.len(),
                });

                let unit_idxs: Vec<usize> = building
                    .units
                    .iter()
                    .enumerate()
                    .filter(|(_, u)| self.unit_matches(u))
                    .map(|(i, _)| i)
                    .collect();
                for (pos, &ui) in unit_idxs.iter().enumerate() {
                    nodes.push(TreeNode {
                        node: NodeRef::Unit {
                            site: si,
                            building: bi,
                            unit: ui,
                        },
                        depth: 2,
                        is_last_child: pos + 1 == unit_idxs.len(),
                    });
                }
            }
        }

        self.nodes = nodes;

        if self.selected_idx >= self.nodes.len() {
            self.selected_idx = self.nodes.len().saturating_sub(1);
        }
    }

    /// Adjust `scroll_offset` so the selected node is visible. Nodes are one
    /// line each.
    fn ensure_visible(&mut self, viewport_height: usize) {
        if self.selected_idx < self.scroll_offset {
            self.scroll_offset = self.selected_idx;
        } else if self.selected_idx + 1 > self.scroll_offset + viewport_height {
            self.scroll_offset = (self.selected_idx + 1).saturating_sub(viewport_height);
        }
    }

    fn cycle_filter(&mut self) {
        self.filter = match self.filter {
            None => Some(UnitStatus::Available),
            Some(UnitStatus::Available) => Some(UnitStatus::Rented),
            Some(UnitStatus::Rented) => Some(UnitStatus::Sold),
            Some(UnitStatus::Sold) => Some(UnitStatus::UnderMaintenance),
            Some(UnitStatus::UnderMaintenance) => None,
        };
        self.selected_idx = 0;
        self.scroll_offset = 0;
        self.rebuild_tree();
    }

    fn filter_index(&self) -> usize {
        match self.filter {
            None => 0,
            Some(status) => {
                1 + UnitStatus::ALL
                    .iter()
                    .position(|&s| s == status)
                    .unwrap_or(0)
            }
        }
    }

    /// Tree guide prefix spans for a node line.
    fn build_prefix<'a>(
        guides: &[bool],
        depth: usize,
        is_last_child: bool,
        guide_style: Style,
    ) -> Vec<Span<'a>> {
        let mut spans = Vec::new();
        let connector_depth = depth.saturating_sub(1);

        for l in 0..connector_depth {
            let ch = if guides.get(l).copied().unwrap_or(false) {
                "│   "
            } else {
                "    "
            };
            spans.push(Span::styled(ch.to_string(), guide_style));
        }
        if depth > 0 {
            let ch = if is_last_child { "└── " } else { "├── " };
            spans.push(Span::styled(ch.to_string(), guide_style));
        }
        spans
    }

    #[allow(clippy::too_many_lines)]
    fn render_right_panel(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let Some(node) = self.nodes.get(self.selected_idx) else {
            return;
        };

        let label = Style::default().fg(theme.text_dim);
        let val = Style::default().fg(theme.text);

        let (title, lines) = match node.node {
            NodeRef::Site { site } => {
                let site = &self.sites[site];
                let total = site.unit_count();
                let available = site
                    .buildings
                    .iter()
                    .flat_map(|b| &b.units)
                    .filter(|u| u.status == UnitStatus::Available)
                    .count();
                #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
                let pct = if total == 0 {
                    0.0
                } else {
                    available as f64 / total as f64 * 100.0
                };
                let (filled, empty) = fmt_pct_bar(pct, 24);

                let mut lines = vec![
                    Line::from(vec![
                        Span::styled(" Location   ", label),
                        Span::styled(site.location.clone(), val),
                    ]),
                    Line::from(vec![
                        Span::styled(" Address    ", label),
                        Span::styled(site.address.clone(), val),
                    ]),
                    Line::from(vec![
                        Span::styled(" Buildings  ", label),
                        Span::styled(site.buildings.len().to_string(), val),
                        Span::styled("   Units ", label),
                        Span::styled(total.to_string(), val),
                    ]),
                    Line::from(""),
                    Line::from(vec![
                        Span::styled(" Available  ", label),
                        Span::styled(filled, Style::default().fg(theme.success)),
                        Span::styled(empty, Style::default().fg(theme.border)),
                        Span::styled(format!(" {available}/{total}"), val),
                    ]),
                ];
                if site.buildings.is_empty() {
                    lines.push(Line::from(""));
                    lines.push(Line::from(Span::styled(
                        " Undeveloped land — no buildings listed yet.",
                        label,
                    )));
                }
                (format!(" {} ", site.name), lines)
            }
            NodeRef::Building { site, building } => {
                let site = &self.sites[site];
                let building = &site.buildings[building];
                let available = building
                    .units
                    .iter()
                    .filter(|u| u.status == UnitStatus::Available)
                    .count();

                let mut lines = vec![
                    Line::from(vec![
                        Span::styled(" Site       ", label),
                        Span::styled(site.name.clone(), Style::default().fg(theme.primary)),
                    ]),
                    Line::from(vec![
                        Span::styled(" Floors     ", label),
                        Span::styled(building.floors.to_string(), val),
                    ]),
                    Line::from(vec![
                        Span::styled(" Units      ", label),
                        Span::styled(building.units.len().to_string(), val),
                        Span::styled("   Available ", label),
                        Span::styled(
                            available.to_string(),
                            Style::default().fg(theme.success),
                        ),
                    ]),
                    Line::from(""),
                    Line::from(Span::styled(
                        format!(" Units ({})", building.units.len()),
                        Style::default()
                            .fg(theme.primary)
                            .add_modifier(Modifier::BOLD),
                    )),
                ];
                if building.units.is_empty() {
                    lines.push(Line::from(Span::styled("   (no units listed)", label)));
                }
                for unit in &building.units {
                    lines.push(Line::from(vec![
                        Span::styled(
                            "  ● ",
                            Style::default().fg(unit_status_color(unit.status, theme)),
                        ),
                        Span::styled(format!("{:<18}", unit.name), val),
                        Span::styled(format!("{:<10}", unit.unit_type.label()), label),
                        Span::styled(
                            fmt_money_short(unit.price),
                            Style::default().fg(theme.success),
                        ),
                    ]));
                }
                (format!(" {} ", building.name), lines)
            }
            NodeRef::Unit {
                site,
                building,
                unit,
            } => {
                let site = &self.sites[site];
                let building = &site.buildings[building];
                let unit = &building.units[unit];

                let lines = vec![
                    Line::from(vec![
                        Span::styled(" Site       ", label),
                        Span::styled(site.name.clone(), Style::default().fg(theme.primary)),
                        Span::styled("   Building ", label),
                        Span::styled(building.name.clone(), val),
                    ]),
                    Line::from(vec![
                        Span::styled(" Type       ", label),
                        Span::styled(unit.unit_type.label(), val),
                        Span::styled("   Floor ", label),
                        Span::styled(unit.floor.to_string(), val),
                    ]),
                    Line::from(vec![
                        Span::styled(" Price      ", label),
                        Span::styled(
                            fmt_money(unit.price),
                            Style::default()
                                .fg(theme.success)
                                .add_modifier(Modifier::BOLD),
                        ),
                    ]),
                    Line::from(vec![
                        Span::styled(" Area       ", label),
                        Span::styled(fmt_area(unit.area_sqm), val),
                        Span::styled("   Bed ", label),
                        Span::styled(unit.bedrooms.to_string(), val),
                        Span::styled("   Bath ", label),
                        Span::styled(unit.bathrooms.to_string(), val),
                    ]),
                    Line::from(vec![
                        Span::styled(" Status     ", label),
                        Span::styled(
                            unit.status.label(),
                            Style::default().fg(unit_status_color(unit.status, theme)),
                        ),
                    ]),
                ];
                (format!(" {} ", unit.name), lines)
            }
        };

        let block = Block::default()
            .title(title)
            .title_style(theme.title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.border_focused());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.height < 2 || inner.width < 10 {
            return;
        }
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Component for PropertiesScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if !self.nodes.is_empty() {
                    self.selected_idx = (self.selected_idx + 1).min(self.nodes.len() - 1);
                    self.ensure_visible(30);
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected_idx = self.selected_idx.saturating_sub(1);
                self.ensure_visible(30);
            }
            KeyCode::Char('g') | KeyCode::Home => {
                self.selected_idx = 0;
                self.scroll_offset = 0;
            }
            KeyCode::Char('G') | KeyCode::End => {
                self.selected_idx = self.nodes.len().saturating_sub(1);
                self.ensure_visible(30);
            }
            KeyCode::Tab => self.cycle_filter(),
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::SitesUpdated(sites) = action {
            if sites.is_empty() && !self.sites.is_empty() {
                return Ok(None);
            }
            self.sites = Arc::clone(sites);
            self.rebuild_tree();
        }
        Ok(None)
    }

    #[allow(clippy::too_many_lines, clippy::as_conversions)]
    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let total_units: usize = self.sites.iter().map(|s| s.unit_count()).sum();
        let block = Block::default()
            .title(format!(
                " Properties  ·  {} sites  ·  {total_units} units ",
                self.sites.len()
            ))
            .title_style(theme.title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.border_default());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.height < 3 || inner.width < 20 {
            return;
        }

        // Tree on the left, detail panel on the right
        let chunks = Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(inner);
        let tree_area = chunks[0];
        let right_area = chunks[1];

        let layout = Layout::vertical([
            Constraint::Length(1), // filter tabs
            Constraint::Min(1),    // tree
            Constraint::Length(1), // hints
        ])
        .split(tree_area);

        let mut filter_labels = vec!["All"];
        filter_labels.extend(UnitStatus::ALL.iter().map(|s| s.label()));
        let filter_line = sub_tabs::render_sub_tabs(theme, &filter_labels, self.filter_index());
        frame.render_widget(Paragraph::new(filter_line), layout[0]);

        let content_area = layout[1];

        if self.nodes.is_empty() {
            let empty = if self.sites.is_empty() {
                "  Loading sites…"
            } else {
                "  No units match this filter"
            };
            frame.render_widget(
                Paragraph::new(Line::styled(empty, Style::default().fg(theme.text_dim))),
                content_area,
            );
        } else {
            let mut lines: Vec<Line<'_>> = Vec::new();
            let guide_style = Style::default().fg(theme.border);

            // Track which depth levels have more siblings coming
            let mut guides: Vec<bool> = Vec::new();

            for (node_idx, tree_node) in self.nodes.iter().enumerate() {
                #[allow(clippy::cast_possible_truncation)]
                let d = tree_node.depth as usize;
                let is_selected = node_idx == self.selected_idx;

                guides.truncate(d);
                if d > 0 {
                    if guides.len() < d {
                        guides.resize(d, false);
                    }
                    guides[d - 1] = !tree_node.is_last_child;
                }

                let mut spans =
                    Self::build_prefix(&guides, d, tree_node.is_last_child, guide_style);

                if is_selected {
                    spans.push(Span::styled(
                        "▸ ",
                        Style::default()
                            .fg(theme.primary)
                            .add_modifier(Modifier::BOLD),
                    ));
                } else {
                    spans.push(Span::raw("  "));
                }

                let name_mod = if is_selected {
                    Modifier::BOLD
                } else {
                    Modifier::empty()
                };

                match tree_node.node {
                    NodeRef::Site { site } => {
                        let site = &self.sites[site];
                        spans.push(Span::styled(
                            site.name.clone(),
                            Style::default().fg(theme.primary).add_modifier(name_mod),
                        ));
                        spans.push(Span::styled(
                            format!("  {}", site.location),
                            Style::default().fg(theme.text_dim),
                        ));
                        spans.push(Span::styled(
                            format!("  ({} units)", site.unit_count()),
                            Style::default().fg(theme.border),
                        ));
                    }
                    NodeRef::Building { site, building } => {
                        let building = &self.sites[site].buildings[building];
                        spans.push(Span::styled(
                            building.name.clone(),
                            Style::default().fg(theme.text).add_modifier(name_mod),
                        ));
                        spans.push(Span::styled(
                            format!("  {} floors", building.floors),
                            Style::default().fg(theme.text_dim),
                        ));
                        spans.push(Span::styled(
                            format!("  ({} units)", building.units.len()),
                            Style::default().fg(theme.border),
                        ));
                    }
                    NodeRef::Unit {
                        site,
                        building,
                        unit,
                    } => {
                        let unit = &self.sites[site].buildings[building].units[unit];
                        spans.push(Span::styled(
                            "● ",
                            Style::default().fg(unit_status_color(unit.status, theme)),
                        ));
                        spans.push(Span::styled(
                            unit.name.clone(),
                            Style::default().fg(theme.text).add_modifier(name_mod),
                        ));
                        spans.push(Span::styled(
                            format!("  {}", unit.unit_type.label()),
                            Style::default().fg(theme.text_dim),
                        ));
                        spans.push(Span::styled(
                            format!("  {}", fmt_money_short(unit.price)),
                            Style::default().fg(theme.success),
                        ));
                    }
                }

                lines.push(Line::from(spans));
            }

            let viewport_h = usize::from(content_area.height);
            let scroll = self
                .scroll_offset
                .min(lines.len().saturating_sub(viewport_h));
            let visible: Vec<Line<'_>> = lines.into_iter().skip(scroll).take(viewport_h).collect();

            frame.render_widget(Paragraph::new(visible), content_area);
        }

        let hints = Line::from(vec![
            Span::styled("  j/k ", theme.key_hint_key()),
            Span::styled("navigate  ", theme.key_hint()),
            Span::styled("Tab ", theme.key_hint_key()),
            Span::styled("unit filter  ", theme.key_hint()),
            Span::styled("g/G ", theme.key_hint_key()),
            Span::styled("top/bottom", theme.key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[2]);

        self.render_right_panel(frame, right_area, theme);
    }
}
