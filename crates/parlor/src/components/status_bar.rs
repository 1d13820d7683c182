//! Bottom key-hint bar: active page on the left, its key hints on the right.

use color_eyre::Result;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use crate::components::Component;
use crate::theme::Theme;

pub struct StatusBar {
    theme: Theme,
    page_name: String,
    hints: String,
}

impl StatusBar {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            page_name: String::new(),
            hints: String::new(),
        }
    }

    pub fn set_context(&mut self, page_name: &str, hints: &str) {
        self.page_name = page_name.to_string();
        self.hints = hints.to_string();
    }
}

impl Component for StatusBar {
    fn draw(&mut self, frame: &mut Frame<'_>, area: Rect) -> Result<()> {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(20), Constraint::Fill(1)])
            .split(area);

        let left = Paragraph::new(Line::from(format!(" {} ", self.page_name)))
            .style(self.theme.title());
        frame.render_widget(left, cols[0]);

        let right = Paragraph::new(Line::from(self.hints.as_str()))
            .style(self.theme.status_bar())
            .right_aligned();
        frame.render_widget(right, cols[1]);
        Ok(())
    }
}
