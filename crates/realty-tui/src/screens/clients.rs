//! Clients screen — the CRM pipeline table.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};

use realty_core::{Client, ClientStatus};

use crate::action::Action;
use crate::component::Component;
use crate::theme::Theme;
use crate::widgets::sub_tabs;

/// Pipeline stage color, consistent across table and detail.
fn status_color(status: ClientStatus, theme: &Theme) -> Color {
    match status {
        ClientStatus::NewLead => theme.chart_series[0],
        ClientStatus::Contacted => theme.chart_series[1],
        ClientStatus::SiteVisit => theme.warning,
        ClientStatus::Negotiating => theme.primary,
        ClientStatus::Closed => theme.success,
        ClientStatus::Lost => theme.error,
    }
}

pub struct ClientsScreen {
    clients: Arc<Vec<Arc<Client>>>,
    table_state: TableState,
    /// `None` shows every pipeline stage.
    filter: Option<ClientStatus>,
    detail_open: bool,
    detail_idx: usize,
    cached_filtered: Vec<Arc<Client>>,
}

impl ClientsScreen {
    pub fn new() -> Self {
        let mut screen = Self {
            clients: Arc::new(Vec::new()),
            table_state: TableState::default(),
            filter: None,
            detail_open: false,
            detail_idx: 0,
            cached_filtered: Vec::new(),
        };
        screen.recompute_filtered();
        screen
    }

    fn recompute_filtered(&mut self) {
        let mut clients: Vec<_> = self
            .clients
            .iter()
            .filter(|c| self.filter.is_none_or(|f| c.status == f))
            .cloned()
            .collect();
        // Most recently contacted first
        clients.sort_by(|a, b| b.last_contact.cmp(&a.last_contact).then(a.name.cmp(&b.name)));
        self.cached_filtered = clients;
    }

    fn filtered_clients(&self) -> &[Arc<Client>] {
        &self.cached_filtered
    }

    fn selected_index(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    fn select(&mut self, idx: usize) {
        let filtered_len = self.filtered_clients().len();
        let clamped = if filtered_len == 0 {
            0
        } else {
            idx.min(filtered_len - 1)
        };
        self.table_state.select(Some(clamped));
    }

    #[allow(clippy::cast_sign_loss, clippy::as_conversions)]
    fn move_selection(&mut self, delta: isize) {
        let filtered_len = self.filtered_clients().len();
        if filtered_len == 0 {
            return;
        }
        #[allow(clippy::cast_possible_wrap)]
        let current = self.selected_index() as isize;
        #[allow(clippy::cast_possible_wrap)]
        let next = (current + delta).clamp(0, filtered_len as isize - 1);
        self.select(next as usize);
    }

    fn cycle_filter(&mut self) {
        self.filter = match self.filter {
            None => Some(ClientStatus::NewLead),
            Some(ClientStatus::NewLead) => Some(ClientStatus::Contacted),
            Some(ClientStatus::Contacted) => Some(ClientStatus::SiteVisit),
            Some(ClientStatus::SiteVisit) => Some(ClientStatus::Negotiating),
            Some(ClientStatus::Negotiating) => Some(ClientStatus::Closed),
            Some(ClientStatus::Closed) => Some(ClientStatus::Lost),
            Some(ClientStatus::Lost) => None,
        };
        self.recompute_filtered();
        self.table_state.select(Some(0));
    }

    fn filter_index(&self) -> usize {
        match self.filter {
            None => 0,
            Some(status) => {
                1 + ClientStatus::ALL
                    .iter()
                    .position(|&s| s == status)
                    .unwrap_or(0)
            }
        }
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect, theme: &Theme, client: &Client) {
        let title = format!(" {}  ·  {} ", client.name, client.status.label());
        let block = Block::default()
            .title(title)
            .title_style(theme.title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.border_focused());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let detail_layout =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

        let dim = Style::default().fg(theme.text_dim);
        let value = Style::default().fg(theme.text);
        let accent = Style::default().fg(theme.primary);

        let lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("  Email          ", dim),
                Span::styled(client.email.clone(), value),
            ]),
            Line::from(vec![
                Span::styled("  Phone          ", dim),
                Span::styled(client.phone.clone(), value),
            ]),
            Line::from(vec![
                Span::styled("  Assigned agent ", dim),
                Span::styled(client.assigned_agent.clone(), accent),
            ]),
            Line::from(vec![
                Span::styled("  Source         ", dim),
                Span::styled(client.source.clone(), value),
            ]),
            Line::from(vec![
                Span::styled("  Last contact   ", dim),
                Span::styled(client.last_contact.format("%Y-%m-%d").to_string(), value),
            ]),
            Line::from(vec![
                Span::styled("  Stage          ", dim),
                Span::styled(
                    client.status.label(),
                    Style::default().fg(status_color(client.status, theme)),
                ),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), detail_layout[0]);

        let hints = Line::from(vec![
            Span::styled("  Esc ", theme.key_hint_key()),
            Span::styled("back", theme.key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), detail_layout[1]);
    }
}

impl Component for ClientsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.detail_open {
            if key.code == KeyCode::Esc {
                self.detail_open = false;
            }
            return Ok(None);
        }

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(-1),
            KeyCode::Char('g') => self.select(0),
            KeyCode::Char('G') => {
                let len = self.filtered_clients().len();
                if len > 0 {
                    self.select(len - 1);
                }
            }
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.move_selection(10);
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.move_selection(-10);
            }
            KeyCode::Tab => self.cycle_filter(),
            KeyCode::Enter => {
                let idx = self.selected_index();
                if self.filtered_clients().get(idx).is_some() {
                    self.detail_open = true;
                    self.detail_idx = idx;
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::ClientsUpdated(clients) = action {
            // Ignore empty updates — prevents blanking if a reload is in flight
            if clients.is_empty() && !self.clients.is_empty() {
                return Ok(None);
            }
            self.clients = Arc::clone(clients);
            self.recompute_filtered();
            let filtered_len = self.filtered_clients().len();
            if filtered_len > 0 && self.selected_index() >= filtered_len {
                self.select(filtered_len - 1);
            }
        }
        Ok(None)
    }

    #[allow(clippy::too_many_lines)]
    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let filtered = self.filtered_clients().to_vec();
        let total = self.clients.len();
        let shown = filtered.len();

        let block = Block::default()
            .title(format!(" Clients ({shown}/{total}) "))
            .title_style(theme.title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.border_default());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let (table_area, detail_area) = if self.detail_open {
            let chunks = Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(inner);
            (chunks[0], Some(chunks[1]))
        } else {
            (inner, None)
        };

        let layout = Layout::vertical([
            Constraint::Length(1), // filter tabs
            Constraint::Min(1),    // table
            Constraint::Length(1), // hints
        ])
        .split(table_area);

        // Filter tab bar: All plus every pipeline stage
        let mut filter_labels = vec!["All"];
        filter_labels.extend(ClientStatus::ALL.iter().map(|s| s.label()));
        let filter_line = sub_tabs::render_sub_tabs(theme, &filter_labels, self.filter_index());
        frame.render_widget(Paragraph::new(filter_line), layout[0]);

        // Wider terminals get contact columns
        let table_width = layout[1].width;
        let wide = table_width >= 130;
        let medium = table_width >= 100;

        let mut header_cells = vec![
            Cell::from("Name").style(theme.table_header()),
            Cell::from("Stage").style(theme.table_header()),
            Cell::from("Agent").style(theme.table_header()),
        ];
        if medium {
            header_cells.push(Cell::from("Email").style(theme.table_header()));
            header_cells.push(Cell::from("Phone").style(theme.table_header()));
        }
        if wide {
            header_cells.push(Cell::from("Source").style(theme.table_header()));
        }
        header_cells.push(Cell::from("Last Contact").style(theme.table_header()));
        let header = Row::new(header_cells);

        let selected_idx = self.selected_index();
        let rows: Vec<Row> = filtered
            .iter()
            .enumerate()
            .map(|(i, client)| {
                let is_selected = i == selected_idx;
                let prefix = if is_selected { "▸" } else { " " };

                let name_style = Style::default().fg(theme.text).add_modifier(if is_selected {
                    Modifier::BOLD
                } else {
                    Modifier::empty()
                });
                let row_style = if is_selected {
                    Style::default().bg(theme.bg_highlight)
                } else {
                    theme.table_row()
                };

                let mut cells = vec![
                    Cell::from(format!("{prefix}{}", client.name)).style(name_style),
                    Cell::from(client.status.label())
                        .style(Style::default().fg(status_color(client.status, theme))),
                    Cell::from(client.assigned_agent.clone())
                        .style(Style::default().fg(theme.primary)),
                ];
                if medium {
                    cells.push(
                        Cell::from(client.email.clone())
                            .style(Style::default().fg(theme.text_dim)),
                    );
                    cells.push(
                        Cell::from(client.phone.clone())
                            .style(Style::default().fg(theme.text_dim)),
                    );
                }
                if wide {
                    cells.push(
                        Cell::from(client.source.clone())
                            .style(Style::default().fg(theme.text_dim)),
                    );
                }
                cells.push(
                    Cell::from(client.last_contact.format("%Y-%m-%d").to_string())
                        .style(Style::default().fg(theme.text)),
                );

                Row::new(cells).style(row_style)
            })
            .collect();

        let mut widths: Vec<Constraint> = vec![
            Constraint::Fill(2),     // name
            Constraint::Length(12),  // stage
            Constraint::Fill(1),     // agent
        ];
        if medium {
            widths.push(Constraint::Fill(2));    // email
            widths.push(Constraint::Length(10)); // phone
        }
        if wide {
            widths.push(Constraint::Length(12)); // source
        }
        widths.push(Constraint::Length(12)); // last contact

        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(theme.table_selected());

        let mut state = self.table_state;
        frame.render_stateful_widget(table, layout[1], &mut state);

        if shown == 0 {
            let empty = if total == 0 {
                "  Loading clients…"
            } else {
                "  No clients in this stage"
            };
            let msg = Paragraph::new(Line::styled(empty, Style::default().fg(theme.text_dim)));
            let msg_area = Rect {
                y: layout[1].y + 2,
                height: 1,
                ..layout[1]
            };
            frame.render_widget(msg, msg_area);
        }

        let hints = Line::from(vec![
            Span::styled("  j/k ", theme.key_hint_key()),
            Span::styled("navigate  ", theme.key_hint()),
            Span::styled("Tab ", theme.key_hint_key()),
            Span::styled("stage filter  ", theme.key_hint()),
            Span::styled("Enter ", theme.key_hint_key()),
            Span::styled("detail", theme.key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[2]);

        if let Some(detail_area) = detail_area {
            if let Some(client) = filtered.get(self.detail_idx) {
                self.render_detail(frame, detail_area, theme, client);
            }
        }
    }
}
