use color_eyre::Result;
use ratatui::{layout::Rect, Frame};

use crate::action::Action;

pub mod notice;
pub mod status_bar;
pub mod text_field;

/// Always-on widgets the app draws around the active page.
pub trait Component {
    fn update(&mut self, _action: &Action) -> Result<()> {
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame<'_>, area: Rect) -> Result<()>;
}
