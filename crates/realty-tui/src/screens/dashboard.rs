//! Dashboard screen — KPI cards, sales and pipeline bars, activity feed.
//!
//! Layout:
//! ┌ Total Clients ─┐┌ New Leads ─┐┌ Deals Closed ─┐┌ Attendance ─┐
//! │ 1,286          ││ 84         ││ 22            ││ 98.5%       │
//! │ ▲ +15%         ││ ▲ +2.1%    ││ ▼ -3.2%       ││ ─           │
//! └────────────────┘└────────────┘└───────────────┘└─────────────┘
//! ┌─ Monthly Sales ──────────────┐ ┌─ Deal Pipeline ──────────────┐
//! │  Jan  ████████         4000  │ │  Leads        ██████████ 120 │
//! │  Feb  ██████           3000  │ │  Contacted    ████████    95 │
//! └──────────────────────────────┘ └──────────────────────────────┘
//! ┌─ Recent Activity ───────────────────────────────────────────────┐
//! │ ● New Client   Jane Smith signed up via Website.  2 mins ago    │
//! └─────────────────────────────────────────────────────────────────┘

use std::sync::Arc;
use std::time::Instant;

use color_eyre::eyre::Result;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use realty_core::{ChangeDirection, DashboardFeed};

use crate::action::Action;
use crate::component::Component;
use crate::theme::Theme;
use crate::widgets::fmt::fmt_scaled_bar;

fn truncate_text(value: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }
    if value.chars().count() <= max_chars {
        return value.to_owned();
    }
    if max_chars == 1 {
        return "…".into();
    }
    let mut out = String::new();
    for ch in value.chars().take(max_chars.saturating_sub(1)) {
        out.push(ch);
    }
    out.push('…');
    out
}

/// Feed color for an activity category. Unknown categories stay dim.
fn kind_color(kind: &str, theme: &Theme) -> Color {
    match kind {
        "New Client" => theme.chart_series[0],
        "Deal Update" => theme.chart_series[1],
        "Site Visit" => theme.warning,
        "Task Assigned" => theme.chart_series[3],
        _ => theme.text_dim,
    }
}

pub struct DashboardScreen {
    feed: Arc<DashboardFeed>,
    last_update: Option<Instant>,
    throbber_state: throbber_widgets_tui::ThrobberState,
}

impl DashboardScreen {
    pub fn new() -> Self {
        Self {
            feed: Arc::new(DashboardFeed::default()),
            last_update: None,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    /// Format the data age as a human-readable string for the title bar.
    fn refresh_age_str(&self) -> String {
        match self.last_update {
            Some(t) => {
                let secs = t.elapsed().as_secs();
                if secs < 5 {
                    "just now".into()
                } else if secs < 60 {
                    format!("{secs}s ago")
                } else {
                    format!("{}m ago", secs / 60)
                }
            }
            None => "no data".into(),
        }
    }

    fn render_kpis(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let count = self.feed.kpis.len().max(1);
        let ratio = u32::try_from(count).unwrap_or(1);
        let cards = Layout::horizontal(vec![Constraint::Ratio(1, ratio); count]).split(area);

        for (kpi, slot) in self.feed.kpis.iter().zip(cards.iter()) {
            let block = Block::default()
                .title(format!(" {} ", kpi.title))
                .title_style(Style::default().fg(theme.text_dim))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(theme.border_default());

            let inner = block.inner(*slot);
            frame.render_widget(block, *slot);

            let value_line = Line::from(Span::styled(
                format!(" {}", kpi.value),
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            ));
            let change_line = match (&kpi.change, kpi.direction) {
                (Some(change), Some(ChangeDirection::Increase)) => Line::from(Span::styled(
                    format!(" ▲ {change}"),
                    Style::default().fg(theme.success),
                )),
                (Some(change), Some(ChangeDirection::Decrease)) => Line::from(Span::styled(
                    format!(" ▼ {change}"),
                    Style::default().fg(theme.error),
                )),
                _ => Line::from(Span::styled(" ─", Style::default().fg(theme.text_dim))),
            };

            frame.render_widget(Paragraph::new(vec![value_line, change_line]), inner);
        }
    }

    /// Monthly sales — horizontal bars scaled relative to the best month.
    fn render_sales(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .title(" Monthly Sales ")
            .title_style(theme.title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.border_default());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.feed.monthly_sales.is_empty() {
            frame.render_widget(
                Paragraph::new("  No sales data").style(Style::default().fg(theme.text_dim)),
                inner,
            );
            return;
        }

        let max_rows = usize::from(inner.height);
        let bar_budget = inner.width.saturating_sub(15);
        let max_sales = self
            .feed
            .monthly_sales
            .iter()
            .map(|p| p.sales)
            .max()
            .unwrap_or(0);

        let mut lines = Vec::new();
        for (i, point) in self.feed.monthly_sales.iter().enumerate().take(max_rows) {
            let bar = fmt_scaled_bar(point.sales, max_sales, bar_budget);
            let color = theme.chart_series[i % theme.chart_series.len()];

            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {:<4} ", point.month),
                    Style::default().fg(theme.text_dim),
                ),
                Span::styled(bar, Style::default().fg(color)),
                Span::styled(
                    format!(" {:>5}", point.sales),
                    Style::default().fg(theme.text_dim),
                ),
            ]));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }

    /// Pipeline funnel — stage bars scaled relative to the widest stage.
    fn render_pipeline(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .title(" Deal Pipeline ")
            .title_style(theme.title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.border_default());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.feed.pipeline.is_empty() {
            frame.render_widget(
                Paragraph::new("  No pipeline data").style(Style::default().fg(theme.text_dim)),
                inner,
            );
            return;
        }

        let max_rows = usize::from(inner.height);
        let bar_budget = inner.width.saturating_sub(21);
        let max_count = self
            .feed
            .pipeline
            .iter()
            .map(|s| s.count)
            .max()
            .unwrap_or(0);

        let mut lines = Vec::new();
        for (i, stage) in self.feed.pipeline.iter().enumerate().take(max_rows) {
            let bar = fmt_scaled_bar(u64::from(stage.count), u64::from(max_count), bar_budget);
            let color = theme.chart_series[i % theme.chart_series.len()];
            let label = truncate_text(&stage.stage, 12);

            lines.push(Line::from(vec![
                Span::styled(format!("  {label:<12} "), Style::default().fg(theme.text_dim)),
                Span::styled(bar, Style::default().fg(color)),
                Span::styled(
                    format!(" {:>4}", stage.count),
                    Style::default().fg(theme.text_dim),
                ),
            ]));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_activity(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .title(" Recent Activity ")
            .title_style(theme.title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.border_default());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.feed.activities.is_empty() {
            frame.render_widget(
                Paragraph::new("  Nothing has happened yet").style(Style::default().fg(theme.text_dim)),
                inner,
            );
            return;
        }

        let max_rows = usize::from(inner.height);
        let w = usize::from(inner.width);

        let mut lines = Vec::new();
        for activity in self.feed.activities.iter().take(max_rows) {
            let meta = format!("{} · {}", activity.timestamp, activity.user);
            let desc_budget = w.saturating_sub(17 + meta.chars().count() + 3);

            lines.push(Line::from(vec![
                Span::styled(" ● ", Style::default().fg(kind_color(&activity.kind, theme))),
                Span::styled(
                    format!("{:<14}", truncate_text(&activity.kind, 13)),
                    Style::default().fg(theme.text_dim),
                ),
                Span::styled(
                    truncate_text(&activity.description, desc_budget),
                    Style::default().fg(theme.text),
                ),
                Span::styled(format!("  {meta}"), Style::default().fg(theme.text_dim)),
            ]));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Component for DashboardScreen {
    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::DashboardUpdated(feed) => {
                self.feed = Arc::clone(feed);
                self.last_update = Some(Instant::now());
            }
            Action::Tick => {
                self.throbber_state.calc_next();
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let title = format!(" Dashboard · updated {} ", self.refresh_age_str());
        let block = Block::default()
            .title(title)
            .title_style(theme.title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.border_default());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.feed.kpis.is_empty() && self.feed.activities.is_empty() {
            let throbber = throbber_widgets_tui::Throbber::default()
                .label("Loading dashboard…")
                .style(Style::default().fg(theme.text_dim))
                .throbber_style(Style::default().fg(theme.primary));
            let throb_area = Rect {
                x: inner.x.saturating_add(2),
                y: inner.y.saturating_add(1),
                width: inner.width.saturating_sub(2),
                height: 1,
            };
            frame.render_stateful_widget(throbber, throb_area, &mut self.throbber_state.clone());
            return;
        }

        let layout = Layout::vertical([
            Constraint::Length(4),      // KPI cards
            Constraint::Min(9),         // charts row
            Constraint::Percentage(30), // activity feed
        ])
        .split(inner);

        self.render_kpis(frame, layout[0], theme);

        let charts = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(layout[1]);
        self.render_sales(frame, charts[0], theme);
        self.render_pipeline(frame, charts[1], theme);

        self.render_activity(frame, layout[2], theme);
    }
}
