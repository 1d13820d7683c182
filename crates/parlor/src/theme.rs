//! Semantic styles for the pages and widgets, backed by one fixed palette.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::feedback::Band;
use crate::domain::game::Face;

#[derive(Clone, Copy, Debug)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    fn color(self) -> Color {
        Color::Rgb(self.0, self.1, self.2)
    }
}

#[derive(Clone, Debug)]
pub struct Palette {
    pub fg: Rgb,
    pub dim: Rgb,
    pub border: Rgb,
    pub focus: Rgb,
    pub success: Rgb,
    pub error: Rgb,
    pub warn: Rgb,
    pub info: Rgb,
    pub card_back: Rgb,
    pub matched: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        // Subtle dark palette, nvim-like.
        Self {
            fg: Rgb(192, 202, 245),
            dim: Rgb(107, 112, 137),
            border: Rgb(59, 63, 81),
            focus: Rgb(125, 207, 255),
            success: Rgb(158, 206, 106),
            error: Rgb(247, 118, 142),
            warn: Rgb(224, 175, 104),
            info: Rgb(122, 162, 247),
            card_back: Rgb(86, 95, 137),
            matched: Rgb(65, 72, 104),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Theme {
    pub palette: Palette,
}

impl Theme {
    pub fn text(&self) -> Style {
        Style::default().fg(self.palette.fg.color())
    }

    pub fn dimmed(&self) -> Style {
        Style::default().fg(self.palette.dim.color())
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.palette.fg.color())
            .add_modifier(Modifier::BOLD)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.palette.border.color())
    }

    /// Border and label of the focused input field.
    pub fn field_focus(&self) -> Style {
        Style::default()
            .fg(self.palette.focus.color())
            .add_modifier(Modifier::BOLD)
    }

    pub fn field_blur(&self) -> Style {
        Style::default().fg(self.palette.dim.color())
    }

    pub fn error_text(&self) -> Style {
        Style::default().fg(self.palette.error.color())
    }

    pub fn success_text(&self) -> Style {
        Style::default().fg(self.palette.success.color())
    }

    /// Email rendered the way a link would be.
    pub fn link(&self) -> Style {
        Style::default()
            .fg(self.palette.info.color())
            .add_modifier(Modifier::UNDERLINED)
    }

    pub fn band(&self, band: Band) -> Style {
        let rgb = match band {
            Band::Low => self.palette.error,
            Band::Medium => self.palette.warn,
            Band::High => self.palette.success,
        };
        Style::default()
            .fg(rgb.color())
            .add_modifier(Modifier::BOLD)
    }

    pub fn card(&self, face: Face, under_cursor: bool) -> Style {
        let base = match face {
            Face::Hidden => Style::default().fg(self.palette.card_back.color()),
            Face::Revealed => Style::default()
                .fg(self.palette.fg.color())
                .add_modifier(Modifier::BOLD),
            Face::Matched => Style::default().fg(self.palette.matched.color()),
        };
        if under_cursor {
            base.fg(self.palette.focus.color())
        } else {
            base
        }
    }

    pub fn status_bar(&self) -> Style {
        Style::default().fg(self.palette.dim.color())
    }

    pub fn notice_success(&self) -> Style {
        Style::default().fg(self.palette.success.color())
    }

    pub fn notice_error(&self) -> Style {
        Style::default().fg(self.palette.error.color())
    }

    pub fn win_banner(&self) -> Style {
        Style::default()
            .fg(self.palette.success.color())
            .add_modifier(Modifier::BOLD)
    }
}
