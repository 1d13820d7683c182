//! The memory game page: difficulty selector, card grid, scoreboard with
//! clock and best scores, win banner.

use std::time::Duration;

use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};
use tokio::sync::mpsc::UnboundedSender;
use tui_big_text::{BigText, PixelSize};

use crate::{
    action::Action,
    domain::deck::Difficulty,
    domain::game::{format_clock, Face, FlipOutcome, MatchGame},
    domain::scores::ScoreBook,
    pages::{Page, PageId},
    theme::Theme,
    timer::{Delay, Ticker},
    tui::{Event, EventResponse},
};

const CLOCK_PERIOD: Duration = Duration::from_secs(1);
const FLIP_BACK_DELAY: Duration = Duration::from_secs(1);

const CARD_WIDTH: u16 = 7;
const CARD_HEIGHT: u16 = 3;

pub struct MemoryPage {
    tx: Option<UnboundedSender<Action>>,
    theme: Theme,
    game: MatchGame,
    scores: ScoreBook,
    difficulty: Difficulty,
    cursor: usize,
    ticker: Option<Ticker>,
    pending_flip: Option<Delay>,
    message: Option<String>,
}

impl MemoryPage {
    pub fn new() -> Result<Self> {
        let difficulty = Difficulty::Easy;
        Ok(Self {
            tx: None,
            theme: Theme::default(),
            game: MatchGame::new(difficulty),
            scores: ScoreBook::load(paths::scores_file()),
            difficulty,
            cursor: 0,
            ticker: None,
            pending_flip: None,
            message: None,
        })
    }

    /// Start, restart and difficulty change all funnel through here.
    fn start_game(&mut self) {
        // Cancel the pending flip-back first; the epoch bump below also
        // disarms any delivery that races this.
        self.pending_flip = None;
        self.message = None;
        self.cursor = 0;
        self.game.start(self.difficulty, &mut rand::thread_rng());
        if let Some(tx) = &self.tx {
            // Replacing the slot aborts the old ticker; two live tickers
            // would double-increment the clock.
            self.ticker = Some(Ticker::start(tx.clone(), CLOCK_PERIOD));
        }
    }

    fn flip_at_cursor(&mut self) {
        match self.game.flip(self.cursor) {
            FlipOutcome::Mismatch { epoch } => {
                if let Some(tx) = &self.tx {
                    self.pending_flip = Some(Delay::flip_back(tx.clone(), FLIP_BACK_DELAY, epoch));
                }
            }
            FlipOutcome::Won { moves } => {
                self.ticker = None;
                self.message = Some(format!(
                    "You won! Completed in {} moves in {}. 🎉",
                    moves,
                    format_clock(self.game.elapsed_secs())
                ));
                self.scores.record(self.difficulty, moves);
            }
            FlipOutcome::FirstRevealed | FlipOutcome::Matched | FlipOutcome::Ignored => {}
        }
    }

    fn move_cursor(&mut self, dx: isize, dy: isize) {
        let len = self.game.deck().len();
        if len == 0 {
            return;
        }
        let cols = self.game.difficulty().columns() as isize;
        let rows = (len as isize + cols - 1) / cols;
        let mut col = self.cursor as isize % cols + dx;
        let mut row = self.cursor as isize / cols + dy;
        col = col.rem_euclid(cols);
        row = row.rem_euclid(rows);
        let index = (row * cols + col) as usize;
        if index < len {
            self.cursor = index;
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<EventResponse<Action>> {
        match key.code {
            KeyCode::Char('s') | KeyCode::Char('r') => {
                self.start_game();
                Some(EventResponse::Stop(Action::Render))
            }
            KeyCode::Char('d') => {
                self.difficulty = self.difficulty.toggled();
                self.start_game();
                Some(EventResponse::Stop(Action::Render))
            }
            KeyCode::Char('q') => Some(EventResponse::Stop(Action::Quit)),
            KeyCode::Left | KeyCode::Char('h') => {
                self.move_cursor(-1, 0);
                Some(EventResponse::Stop(Action::Render))
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.move_cursor(1, 0);
                Some(EventResponse::Stop(Action::Render))
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_cursor(0, -1);
                Some(EventResponse::Stop(Action::Render))
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_cursor(0, 1);
                Some(EventResponse::Stop(Action::Render))
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if self.game.started() {
                    self.flip_at_cursor();
                } else {
                    self.start_game();
                }
                Some(EventResponse::Stop(Action::Render))
            }
            _ => None,
        }
    }
}

impl Page for MemoryPage {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn id(&self) -> PageId {
        PageId::Memory
    }

    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
        self.tx = Some(tx);
        Ok(())
    }

    fn handle_events(&mut self, event: Option<Event>) -> Result<Option<EventResponse<Action>>> {
        match event {
            Some(Event::Key(key)) => Ok(self.handle_key(key)),
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::ClockTick => self.game.tick_second(),
            Action::FlipConcealed { epoch } => {
                if self.game.conceal_pending(epoch) {
                    self.pending_flip = None;
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn hints(&self) -> &'static str {
        "s start · r restart · d difficulty · ←↓↑→ move · Space flip · F2 form · q quit "
    }

    fn on_exit(&mut self) -> Result<()> {
        // The clock keeps running while the form page is up front, exactly
        // like the browser tab the game came from. Nothing to stop here.
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let rows = Layout::vertical([
            Constraint::Length(2), // scoreboard
            Constraint::Fill(1),   // board
            Constraint::Length(1), // message
        ])
        .split(area);

        self.draw_scoreboard(frame, rows[0]);
        if self.game.won() {
            self.draw_win_banner(frame, rows[1]);
        } else {
            self.draw_board(frame, rows[1]);
        }
        self.draw_message(frame, rows[2]);
        Ok(())
    }
}

impl MemoryPage {
    fn draw_scoreboard(&self, frame: &mut Frame, area: Rect) {
        let best = |difficulty: Difficulty| {
            self.scores
                .best(difficulty)
                .map(|n| n.to_string())
                .unwrap_or_else(|| "–".to_string())
        };
        let line = Line::from(vec![
            Span::styled("Moves ", self.theme.dimmed()),
            Span::styled(self.game.moves().to_string(), self.theme.text()),
            Span::styled("   Matches ", self.theme.dimmed()),
            Span::styled(
                format!("{} / {}", self.game.matches(), self.game.total_pairs()),
                self.theme.text(),
            ),
            Span::styled("   Time ", self.theme.dimmed()),
            Span::styled(format_clock(self.game.elapsed_secs()), self.theme.text()),
            Span::styled("   Difficulty ", self.theme.dimmed()),
            Span::styled(self.difficulty.to_string(), self.theme.title()),
            Span::styled("   Best easy ", self.theme.dimmed()),
            Span::styled(best(Difficulty::Easy), self.theme.text()),
            Span::styled("   Best hard ", self.theme.dimmed()),
            Span::styled(best(Difficulty::Hard), self.theme.text()),
        ]);
        frame.render_widget(Paragraph::new(line).centered(), area);
    }

    fn draw_board(&self, frame: &mut Frame, area: Rect) {
        if !self.game.started() {
            let hint = Paragraph::new("Press s to start a new game.")
                .style(self.theme.dimmed())
                .centered();
            let middle = Rect {
                y: area.y + area.height / 2,
                height: 1.min(area.height),
                ..area
            };
            frame.render_widget(hint, middle);
            return;
        }

        let cols = self.game.difficulty().columns() as u16;
        let count = self.game.deck().len() as u16;
        let grid_rows = count.div_ceil(cols);
        let grid_width = cols * CARD_WIDTH;
        let grid_height = grid_rows * CARD_HEIGHT;
        let origin_x = area.x + area.width.saturating_sub(grid_width) / 2;
        let origin_y = area.y + area.height.saturating_sub(grid_height) / 2;

        for (index, card) in self.game.deck().iter().enumerate() {
            let col = index as u16 % cols;
            let row = index as u16 / cols;
            let cell = Rect {
                x: origin_x + col * CARD_WIDTH,
                y: origin_y + row * CARD_HEIGHT,
                width: CARD_WIDTH,
                height: CARD_HEIGHT,
            };
            if cell.right() > area.right() || cell.bottom() > area.bottom() {
                continue;
            }

            let face = self.game.face(index);
            let style = self.theme.card(face, index == self.cursor);
            let glyph = match face {
                Face::Hidden => "▒▒",
                Face::Revealed | Face::Matched => card.icon,
            };
            let paragraph = Paragraph::new(glyph)
                .centered()
                .style(style)
                .block(
                    Block::bordered()
                        .border_set(border::ROUNDED)
                        .border_style(style),
                );
            frame.render_widget(paragraph, cell);
        }
    }

    fn draw_win_banner(&self, frame: &mut Frame, area: Rect) {
        let banner = BigText::builder()
            .pixel_size(PixelSize::Quadrant)
            .style(self.theme.win_banner())
            .alignment(ratatui::layout::Alignment::Center)
            .lines(vec!["YOU WON".into()])
            .build();
        let middle = Rect {
            y: area.y + area.height.saturating_sub(4) / 2,
            height: 4.min(area.height),
            ..area
        };
        frame.render_widget(banner, middle);
    }

    fn draw_message(&self, frame: &mut Frame, area: Rect) {
        let Some(message) = &self.message else {
            return;
        };
        frame.render_widget(
            Paragraph::new(message.as_str())
                .style(self.theme.success_text())
                .centered(),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tokio::sync::mpsc;

    fn page_with_channel() -> (MemoryPage, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut page = MemoryPage::new().unwrap();
        page.register_action_handler(tx).unwrap();
        (page, rx)
    }

    #[tokio::test]
    async fn difficulty_toggle_restarts_with_the_new_deck() {
        let (mut page, _rx) = page_with_channel();
        page.handle_key(KeyEvent::from(KeyCode::Char('s')));
        assert_eq!(page.game.deck().len(), 12);

        page.handle_key(KeyEvent::from(KeyCode::Char('d')));
        assert_eq!(page.difficulty, Difficulty::Hard);
        assert_eq!(page.game.deck().len(), 24);
        assert_eq!(page.game.moves(), 0);
        assert!(page.game.started());
    }

    #[tokio::test]
    async fn flips_before_start_do_nothing() {
        let (mut page, _rx) = page_with_channel();
        page.flip_at_cursor();
        assert_eq!(page.game.moves(), 0);
        assert!(!page.game.started());
    }

    #[tokio::test]
    async fn clock_ticks_arrive_through_update() {
        let (mut page, _rx) = page_with_channel();
        page.start_game();
        page.update(Action::ClockTick).unwrap();
        page.update(Action::ClockTick).unwrap();
        assert_eq!(page.game.elapsed_secs(), 2);
    }

    #[tokio::test]
    async fn mismatch_schedules_a_flip_back() {
        let (mut page, _rx) = page_with_channel();
        page.start_game();

        // Find two cards of different pairs and flip them via the cursor.
        let second = page
            .game
            .deck()
            .iter()
            .position(|c| c.pair != page.game.deck()[0].pair)
            .unwrap();
        page.cursor = 0;
        page.flip_at_cursor();
        page.cursor = second;
        page.flip_at_cursor();

        assert!(page.game.locked());
        assert!(page.pending_flip.is_some());

        let epoch = page.game.epoch();
        page.update(Action::FlipConcealed { epoch }).unwrap();
        assert!(!page.game.locked());
        assert!(page.pending_flip.is_none());
    }

    #[tokio::test]
    async fn cursor_wraps_around_the_grid() {
        let (mut page, _rx) = page_with_channel();
        page.start_game();
        let cols = page.game.difficulty().columns();

        page.move_cursor(-1, 0);
        assert_eq!(page.cursor, cols - 1);
        page.move_cursor(1, 0);
        assert_eq!(page.cursor, 0);
        page.move_cursor(0, -1);
        assert_eq!(page.cursor, page.game.deck().len() - cols);
    }
}
