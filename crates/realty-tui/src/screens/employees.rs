//! Employees screen — staff directory table.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};

use realty_core::{Employee, EmployeeStatus};

use crate::action::Action;
use crate::component::Component;
use crate::theme::Theme;
use crate::widgets::sub_tabs;

fn status_color(status: EmployeeStatus, theme: &Theme) -> Color {
    match status {
        EmployeeStatus::Active => theme.success,
        EmployeeStatus::OnLeave => theme.warning,
        EmployeeStatus::Inactive => theme.text_dim,
    }
}

pub struct EmployeesScreen {
    employees: Arc<Vec<Arc<Employee>>>,
    table_state: TableState,
    filter: Option<EmployeeStatus>,
    detail_open: bool,
    detail_idx: usize,
    cached_filtered: Vec<Arc<Employee>>,
}

impl EmployeesScreen {
    pub fn new() -> Self {
        let mut screen = Self {
            employees: Arc::new(Vec::new()),
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
        let mut employees: Vec<_> = self
            .employees
            .iter()
            .filter(|e| self.filter.is_none_or(|f| e.status == f))
            .cloned()
            .collect();
        // Most deals closed first, then alphabetical
        employees.sort_by(|a, b| {
            b.deals_closed
                .cmp(&a.deals_closed)
                .then(a.name.cmp(&b.name))
        });
        self.cached_filtered = employees;
    }

    fn filtered_employees(&self) -> &[Arc<Employee>] {
        &self.cached_filtered
    }

    fn selected_index(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    fn select(&mut self, idx: usize) {
        let len = self.filtered_employees().len();
        let clamped = if len == 0 { 0 } else { idx.min(len - 1) };
        self.table_state.select(Some(clamped));
    }

    #[allow(clippy::cast_sign_loss, clippy::as_conversions)]
    fn move_selection(&mut self, delta: isize) {
        let len = self.filtered_employees().len();
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
            None => Some(EmployeeStatus::Active),
            Some(EmployeeStatus::Active) => Some(EmployeeStatus::OnLeave),
            Some(EmployeeStatus::OnLeave) => Some(EmployeeStatus::Inactive),
            Some(EmployeeStatus::Inactive) => None,
        };
        self.recompute_filtered();
        self.table_state.select(Some(0));
    }

    fn filter_index(&self) -> usize {
        match self.filter {
            None => 0,
            Some(status) => {
                1 + EmployeeStatus::ALL
                    .iter()
                    .position(|&s| s == status)
                    .unwrap_or(0)
            }
        }
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect, theme: &Theme, employee: &Employee) {
        let title = format!(" {}  ·  {} ", employee.name, employee.role.label());
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
                Span::styled("  Email        ", dim),
                Span::styled(employee.email.clone(), value),
            ]),
            Line::from(vec![
                Span::styled("  Phone        ", dim),
                Span::styled(employee.phone.clone(), value),
            ]),
            Line::from(vec![
                Span::styled("  Role         ", dim),
                Span::styled(employee.role.label(), Style::default().fg(theme.primary)),
            ]),
            Line::from(vec![
                Span::styled("  Status       ", dim),
                Span::styled(
                    employee.status.label(),
                    Style::default().fg(status_color(employee.status, theme)),
                ),
            ]),
            Line::from(vec![
                Span::styled("  Deals closed ", dim),
                Span::styled(
                    employee.deals_closed.to_string(),
                    Style::default().fg(theme.success),
                ),
            ]),
            Line::from(vec![
                Span::styled("  Hired        ", dim),
                Span::styled(employee.hire_date.format("%Y-%m-%d").to_string(), value),
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

impl Component for EmployeesScreen {
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
                let len = self.filtered_employees().len();
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
                if self.filtered_employees().get(idx).is_some() {
                    self.detail_open = true;
                    self.detail_idx = idx;
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::EmployeesUpdated(employees) = action {
            if employees.is_empty() && !self.employees.is_empty() {
                return Ok(None);
            }
            self.employees = Arc::clone(employees);
            self.recompute_filtered();
            let len = self.filtered_employees().len();
            if len > 0 && self.selected_index() >= len {
                self.select(len - 1);
            }
        }
        Ok(None)
    }

    #[allow(clippy::too_many_lines)]
    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let filtered = self.filtered_employees().to_vec();
        let total = self.employees.len();
        let shown = filtered.len();

        let block = Block::default()
            .title(format!(" Employees ({shown}/{total}) "))
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
        filter_labels.extend(EmployeeStatus::ALL.iter().map(|s| s.label()));
        let filter_line = sub_tabs::render_sub_tabs(theme, &filter_labels, self.filter_index());
        frame.render_widget(Paragraph::new(filter_line), layout[0]);

        let medium = layout[1].width >= 100;

        let mut header_cells = vec![
            Cell::from("Name").style(theme.table_header()),
            Cell::from("Role").style(theme.table_header()),
            Cell::from("Status").style(theme.table_header()),
        ];
        if medium {
            header_cells.push(Cell::from("Email").style(theme.table_header()));
            header_cells.push(Cell::from("Phone").style(theme.table_header()));
        }
        header_cells.push(Cell::from("Deals").style(theme.table_header()));
        header_cells.push(Cell::from("Hired").style(theme.table_header()));
        let header = Row::new(header_cells);

        let selected_idx = self.selected_index();
        let rows: Vec<Row> = filtered
            .iter()
            .enumerate()
            .map(|(i, employee)| {
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
                    Cell::from(format!("{prefix}{}", employee.name)).style(name_style),
                    Cell::from(employee.role.label())
                        .style(Style::default().fg(theme.primary)),
                    Cell::from(employee.status.label())
                        .style(Style::default().fg(status_color(employee.status, theme))),
                ];
                if medium {
                    cells.push(
                        Cell::from(employee.email.clone())
                            .style(Style::default().fg(theme.text_dim)),
                    );
                    cells.push(
                        Cell::from(employee.phone.clone())
                            .style(Style::default().fg(theme.text_dim)),
                    );
                }
                cells.push(
                    Cell::from(employee.deals_closed.to_string())
                        .style(Style::default().fg(theme.success)),
                );
                cells.push(
                    Cell::from(employee.hire_date.format("%Y-%m-%d").to_string())
                        .style(Style::default().fg(theme.text)),
                );

                Row::new(cells).style(row_style)
            })
            .collect();

        let mut widths: Vec<Constraint> = vec![
            Constraint::Fill(2),     // name
            Constraint::Length(13),  // role
            Constraint::Length(9),   // status
        ];
        if medium {
            widths.push(Constraint::Fill(2));    // email
            widths.push(Constraint::Length(10)); // phone
        }
        widths.push(Constraint::Length(6));  // deals closed
        widths.push(Constraint::Length(12)); // hire date

        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(theme.table_selected());

        let mut state = self.table_state;
        frame.render_stateful_widget(table, layout[1], &mut state);

        if shown == 0 {
            let empty = if total == 0 {
                "  Loading employees…"
            } else {
                "  No employees with this status"
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
            if let Some(employee) = filtered.get(self.detail_idx) {
                self.render_detail(frame, detail_area, theme, employee);
            }
        }
    }
}
