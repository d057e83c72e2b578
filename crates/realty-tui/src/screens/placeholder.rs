//! Placeholder screen for destinations that exist in the navigation but have
//! no terminal UI yet.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::component::Component;
use crate::screen::ScreenId;
use crate::theme::Theme;

pub struct PlaceholderScreen {
    id: ScreenId,
}

impl PlaceholderScreen {
    pub fn new(id: ScreenId) -> Self {
        Self { id }
    }
}

impl Component for PlaceholderScreen {
    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .title(format!(" {} ", self.id.label()))
            .title_style(theme.title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let dim = Style::default().fg(theme.text_dim);
        let lines = vec![
            Line::raw(""),
            Line::styled(
                format!(
                    "  The {} module is not available in the terminal yet.",
                    self.id.label()
                ),
                dim,
            ),
            Line::raw(""),
            Line::styled("  Check back after the next release.", dim),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use realty_core::AccentColor;

    use super::*;
    use crate::theme::ResolvedBase;

    fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect()
    }

    #[test]
    fn renders_title_and_copy_into_the_buffer() {
        let theme = Theme::resolved(ResolvedBase::DarkPro, AccentColor::Indigo);
        let screen = PlaceholderScreen::new(ScreenId::Calendar);

        let backend = TestBackend::new(64, 7);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| screen.render(frame, frame.area(), &theme))
            .unwrap();

        assert!(row_text(&terminal, 0).contains(" Calendar "));
        assert!(
            row_text(&terminal, 2)
                .contains("The Calendar module is not available in the terminal yet.")
        );
        assert!(row_text(&terminal, 4).contains("Check back after the next release."));
    }
}
