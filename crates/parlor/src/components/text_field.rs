//! Labeled bordered input with an inline error slot.

use ratatui::{
    layout::Rect,
    symbols::border,
    text::Line,
    widgets::{Block, Paragraph},
    Frame,
};
use tui_input::backend::crossterm::EventHandler as _;
use tui_input::Input;

use crate::theme::Theme;

pub struct TextField {
    label: &'static str,
    input: Input,
    error: Option<String>,
}

impl TextField {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            input: Input::default(),
            error: None,
        }
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    /// Replaces the text, moving the cursor to the end (used by the phone mask).
    pub fn set_value(&mut self, value: String) {
        self.input = Input::new(value);
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    pub fn is_blank(&self) -> bool {
        self.input.value().trim().is_empty()
    }

    pub fn handle_key(&mut self, key: crossterm::event::KeyEvent) {
        self.input
            .handle_event(&crossterm::event::Event::Key(key));
    }

    /// Draws the field into a 3-row cell. The error message, when present,
    /// replaces the bottom border line.
    pub fn draw(&self, frame: &mut Frame<'_>, area: Rect, focused: bool, theme: &Theme) {
        // Keep 2 columns for borders and 1 for the cursor.
        let width = area.width.max(3) - 3;
        let scroll = self.input.visual_scroll(width as usize);

        let (title_style, border_style) = if focused {
            (theme.field_focus(), theme.field_focus())
        } else if self.error.is_some() {
            (theme.field_blur(), theme.error_text())
        } else {
            (theme.field_blur(), theme.border())
        };

        let mut block = Block::bordered()
            .title(self.label)
            .title_style(title_style)
            .border_set(border::ROUNDED)
            .border_style(border_style);
        if let Some(error) = &self.error {
            block = block.title_bottom(Line::from(error.as_str()).style(theme.error_text()));
        }

        let input = Paragraph::new(self.input.value())
            .scroll((0, scroll as u16))
            .style(theme.text())
            .block(block);
        frame.render_widget(input, area);

        if focused {
            // Ratatui hides the cursor unless it is set explicitly; place it
            // after the text, inside the border.
            let x = self.input.visual_cursor().max(scroll) - scroll + 1;
            frame.set_cursor_position((area.x + x as u16, area.y + 1));
        }
    }
}
