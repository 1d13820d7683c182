//! Transient notice overlay in the top-right corner of the page area.

use std::time::{Duration, Instant};

use color_eyre::Result;
use ratatui::{
    layout::Rect,
    symbols::border,
    widgets::{Block, Clear, Paragraph},
    Frame,
};

use crate::action::Action;
use crate::components::Component;
use crate::theme::Theme;

/// How long the form's success notice stays visible.
pub const SUCCESS_TTL: Duration = Duration::from_millis(2500);
const ERROR_TTL: Duration = Duration::from_secs(4);

pub enum NoticeKind {
    Success,
    Error,
}

struct Entry {
    kind: NoticeKind,
    message: String,
    created_at: Instant,
    ttl: Duration,
}

/// Holds at most one active notice; expiry is checked on every app tick.
#[derive(Default)]
pub struct Notice {
    theme: Theme,
    current: Option<Entry>,
}

impl Notice {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            current: None,
        }
    }

    pub fn show_success(&mut self, message: String) {
        self.show(NoticeKind::Success, message, SUCCESS_TTL);
    }

    pub fn show_error(&mut self, message: String) {
        self.show(NoticeKind::Error, message, ERROR_TTL);
    }

    fn show(&mut self, kind: NoticeKind, message: String, ttl: Duration) {
        self.current = Some(Entry {
            kind,
            message,
            created_at: Instant::now(),
            ttl,
        });
    }
}

impl Component for Notice {
    fn update(&mut self, action: &Action) -> Result<()> {
        if let Action::Tick = action {
            if let Some(entry) = &self.current {
                if entry.created_at.elapsed() >= entry.ttl {
                    self.current = None;
                }
            }
        }
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame<'_>, area: Rect) -> Result<()> {
        let Some(entry) = &self.current else {
            return Ok(());
        };

        let style = match entry.kind {
            NoticeKind::Success => self.theme.notice_success(),
            NoticeKind::Error => self.theme.notice_error(),
        };
        let width = (entry.message.chars().count() as u16 + 4).min(area.width);
        let rect = Rect {
            x: area.right().saturating_sub(width + 1),
            y: area.y + 1,
            width,
            height: 3.min(area.height),
        };

        frame.render_widget(Clear, rect);
        let paragraph = Paragraph::new(entry.message.as_str())
            .centered()
            .style(style)
            .block(Block::bordered().border_set(border::ROUNDED).border_style(style));
        frame.render_widget(paragraph, rect);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_survives_ticks_until_its_ttl_runs_out() {
        let mut notice = Notice::default();
        notice.show_error("disk full".into());

        notice.update(&Action::Tick).unwrap();
        assert!(notice.current.is_some());

        notice.show(NoticeKind::Success, "saved".into(), Duration::ZERO);
        notice.update(&Action::Tick).unwrap();
        assert!(notice.current.is_none());
    }

    #[test]
    fn non_tick_actions_leave_the_notice_alone() {
        let mut notice = Notice::default();
        notice.show(NoticeKind::Success, "saved".into(), Duration::ZERO);

        notice.update(&Action::Render).unwrap();
        assert!(notice.current.is_some());
    }
}
