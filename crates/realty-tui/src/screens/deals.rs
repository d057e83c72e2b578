//! Deals screen — sales pipeline table with value totals.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};

use realty_core::{Deal, DealStatus};

use crate::action::Action;
use crate::component::Component;
use crate::theme::Theme;
use crate::widgets::{fmt, sub_tabs};

fn status_color(status: DealStatus, theme: &Theme) -> Color {
    match status {
        DealStatus::InProgress => theme.warning,
        DealStatus::Completed => theme.success,
        DealStatus::Cancelled => theme.error,
    }
}

pub struct DealsScreen {
    deals: Arc<Vec<Arc<Deal>>>,
    table_state: TableState,
    filter: Option<DealStatus>,
    detail_open: bool,
    detail_idx: usize,
    cached_filtered: Vec<Arc<Deal>>,
}

impl DealsScreen {
    pub fn new() -> Self {
        let mut screen = Self {
            deals: Arc::new(Vec::new()),
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
        let mut deals: Vec<_> = self
            .deals
            .iter()
            .filter(|d| self.filter.is_none_or(|f| d.status == f))
            .cloned()
            .collect();
        // Largest deals first
        deals.sort_by(|a, b| b.value.cmp(&a.value).then(a.title.cmp(&b.title)));
        self.cached_filtered = deals;
    }

    fn filtered_deals(&self) -> &[Arc<Deal>] {
        &self.cached_filtered
    }

    fn selected_index(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    fn select(&mut self, idx: usize) {
        let len = self.filtered_deals().len();
        let clamped = if len == 0 { 0 } else { idx.min(len - 1) };
        self.table_state.select(Some(clamped));
    }

    #[allow(clippy::cast_sign_loss, clippy::as_conversions)]
    fn move_selection(&mut self, delta: isize) {
        let len = self.filtered_deals().len();
        if len == 0 {
            return;
        }
        #[allow(clippy::cast_possible_wrap)]
        let current = self.selected_index() as isize;
        #[allow(clippy::cast_possible_wrap)]
        let next = (current + delta).clamp(0, len as isize - 1);
        self.select(next as usize);
    }

    fn cycle_filter(&mut self) {
        self.filter = match self.filter {
            None => Some(DealStatus::InProgress),
            Some(DealStatus::InProgress) => Some(DealStatus::Completed),
            Some(DealStatus::Completed) => Some(DealStatus::Cancelled),
            Some(DealStatus::Cancelled) => None,
        };
        self.recompute_filtered();
        self.table_state.select(Some(0));
    }

    fn filter_index(&self) -> usize {
        match self.filter {
            None => 0,
            Some(status) => {
                1 + DealStatus::ALL
                    .iter()
                    .position(|&s| s == status)
                    .unwrap_or(0)
            }
        }
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect, theme: &Theme, deal: &Deal) {
        let title = format!(" {}  ·  {} ", deal.title, fmt::fmt_money(deal.value));
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

        let lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("  Client       ", dim),
                Span::styled(deal.client_name.clone(), Style::default().fg(theme.primary)),
            ]),
            Line::from(vec![
                Span::styled("  Property     ", dim),
                Span::styled(deal.property_title.clone(), value),
            ]),
            Line::from(vec![
                Span::styled("  Value        ", dim),
                Span::styled(
                    fmt::fmt_money(deal.value),
                    Style::default().fg(theme.success),
                ),
            ]),
            Line::from(vec![
                Span::styled("  Status       ", dim),
                Span::styled(
                    deal.status.label(),
                    Style::default().fg(status_color(deal.status, theme)),
                ),
            ]),
            Line::from(vec![
                Span::styled("  Close date   ", dim),
                Span::styled(deal.close_date.format("%Y-%m-%d").to_string(), value),
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

impl Component for DealsScreen {
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
                let len = self.filtered_deals().len();
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
                if self.filtered_deals().get(idx).is_some() {
                    self.detail_open = true;
                    self.detail_idx = idx;
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::DealsUpdated(deals) = action {
            if deals.is_empty() && !self.deals.is_empty() {
                return Ok(None);
            }
            self.deals = Arc::clone(deals);
            self.recompute_filtered();
            let len = self.filtered_deals().len();
            if len > 0 && self.selected_index() >= len {
                self.select(len - 1);
            }
        }
        Ok(None)
    }

    #[allow(clippy::too_many_lines)]
    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let filtered = self.filtered_deals().to_vec();
        let total = self.deals.len();
        let shown = filtered.len();
        let pipeline_value: u64 = filtered.iter().map(|d| d.value).sum();

        let block = Block::default()
            .title(format!(
                " Deals ({shown}/{total})  ·  {} ",
                fmt::fmt_money_short(pipeline_value)
            ))
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

        let mut filter_labels = vec!["All"];
        filter_labels.extend(DealStatus::ALL.iter().map(|s| s.label()));
        let filter_line = sub_tabs::render_sub_tabs(theme, &filter_labels, self.filter_index());
        frame.render_widget(Paragraph::new(filter_line), layout[0]);

        let medium = layout[1].width >= 100;

        let mut header_cells = vec![
            Cell::from("Deal").style(theme.table_header()),
            Cell::from("Client").style(theme.table_header()),
        ];
        if medium {
            header_cells.push(Cell::from("Property").style(theme.table_header()));
        }
        header_cells.push(Cell::from("Value").style(theme.table_header()));
        header_cells.push(Cell::from("Status").style(theme.table_header()));
        header_cells.push(Cell::from("Close Date").style(theme.table_header()));
        let header = Row::new(header_cells);

        let selected_idx = self.selected_index();
        let rows: Vec<Row> = filtered
            .iter()
            .enumerate()
            .map(|(i, deal)| {
                let is_selected = i == selected_idx;
                let prefix = if is_selected { "▸" } else { " " };

                let title_style = Style::default().fg(theme.text).add_modifier(if is_selected {
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
                    Cell::from(format!("{prefix}{}", deal.title)).style(title_style),
                    Cell::from(deal.client_name.clone())
                        .style(Style::default().fg(theme.primary)),
                ];
                if medium {
                    cells.push(
                        Cell::from(deal.property_title.clone())
                            .style(Style::default().fg(theme.text_dim)),
                    );
                }
                cells.push(
                    Cell::from(fmt::fmt_money(deal.value))
                        .style(Style::default().fg(theme.success)),
                );
                cells.push(
                    Cell::from(deal.status.label())
                        .style(Style::default().fg(status_color(deal.status, theme))),
                );
                cells.push(
                    Cell::from(deal.close_date.format("%Y-%m-%d").to_string())
                        .style(Style::default().fg(theme.text)),
                );

                Row::new(cells).style(row_style)
            })
            .collect();

        let mut widths: Vec<Constraint> = vec![
            Constraint::Fill(2), // deal title
            Constraint::Fill(1), // client
        ];
        if medium {
            widths.push(Constraint::Fill(2)); // property
        }
        widths.push(Constraint::Length(12)); // value
        widths.push(Constraint::Length(11)); // status
        widths.push(Constraint::Length(12)); // close date

        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(theme.table_selected());

        let mut state = self.table_state;
        frame.render_stateful_widget(table, layout[1], &mut state);

        if shown == 0 {
            let empty = if total == 0 {
                "  Loading deals…"
            } else {
                "  No deals with this status"
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
            Span::styled("status filter  ", theme.key_hint()),
            Span::styled("Enter ", theme.key_hint_key()),
            Span::styled("detail", theme.key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[2]);

        if let Some(detail_area) = detail_area {
            if let Some(deal) = filtered.get(self.detail_idx) {
                self.render_detail(frame, detail_area, theme, deal);
            }
        }
    }
}
