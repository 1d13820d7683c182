use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout},
    prelude::Rect,
    Frame,
};
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::debug;

use crate::{
    action::Action,
    cli::Cli,
    components::{notice::Notice, status_bar::StatusBar, Component},
    config::Config,
    pages::{ContactPage, MemoryPage, Page, PageId},
    theme::Theme,
    tui::{Event, EventResponse, Tui},
};

pub struct App {
    pub config: Config,
    pub pages: Vec<Box<dyn Page>>,
    pub active_page: usize,
    pub status_bar: StatusBar,
    pub notice: Notice,
    pub should_quit: bool,
    pub should_suspend: bool,
}

impl App {
    pub fn new(args: Cli) -> Result<Self> {
        let config = Config::new()?;
        let theme = Theme::default();
        let pages: Vec<Box<dyn Page>> =
            vec![Box::new(ContactPage::new()?), Box::new(MemoryPage::new()?)];
        let active_page = pages
            .iter()
            .position(|page| page.id() == args.page)
            .unwrap_or(0);

        Ok(Self {
            config,
            pages,
            active_page,
            status_bar: StatusBar::new(theme.clone()),
            notice: Notice::new(theme),
            should_quit: false,
            should_suspend: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

        let mut tui = Tui::new()?
            .tick_rate(self.config.tick_rate)
            .frame_rate(self.config.frame_rate);
        tui.enter()?;

        for page in self.pages.iter_mut() {
            page.register_action_handler(action_tx.clone())?;
            page.register_config_handler(self.config.clone())?;
            page.init(tui.size()?)?;
        }
        self.pages[self.active_page].on_enter()?;

        loop {
            if let Some(e) = tui.next().await {
                let stop_event_propagation = self
                    .pages
                    .get_mut(self.active_page)
                    .and_then(|page| page.handle_events(Some(e.clone())).ok())
                    .map(|response| match response {
                        Some(EventResponse::Continue(action)) => {
                            action_tx.send(action).ok();
                            false
                        }
                        Some(EventResponse::Stop(action)) => {
                            action_tx.send(action).ok();
                            true
                        }
                        _ => false,
                    })
                    .unwrap_or(false);

                if !stop_event_propagation {
                    match e {
                        Event::Quit => action_tx.send(Action::Quit)?,
                        Event::Tick => action_tx.send(Action::Tick)?,
                        Event::Render => action_tx.send(Action::Render)?,
                        Event::Resize(x, y) => action_tx.send(Action::Resize(x, y))?,
                        Event::Key(key) => self.handle_global_key(key, &action_tx)?,
                        _ => {}
                    }
                }
            }

            while let Ok(action) = action_rx.try_recv() {
                if action != Action::Tick && action != Action::Render {
                    debug!("{action:?}");
                }
                match &action {
                    Action::Quit => self.should_quit = true,
                    Action::Suspend => self.should_suspend = true,
                    Action::Resume => self.should_suspend = false,
                    Action::Resize(w, h) => {
                        tui.resize(Rect::new(0, 0, *w, *h))?;
                        tui.draw(|f| {
                            self.render(f).unwrap_or_else(|err| {
                                action_tx
                                    .send(Action::Error(format!("Failed to draw: {:?}", err)))
                                    .ok();
                            })
                        })?;
                    }
                    Action::Render => {
                        tui.draw(|f| {
                            self.render(f).unwrap_or_else(|err| {
                                action_tx
                                    .send(Action::Error(format!("Failed to draw: {:?}", err)))
                                    .ok();
                            })
                        })?;
                    }
                    Action::Navigate(id) => self.navigate(*id)?,
                    Action::Notice(message) => self.notice.show_success(message.clone()),
                    Action::Error(message) => self.notice.show_error(message.clone()),
                    _ => {}
                }

                self.notice.update(&action)?;

                // Every page sees every action: the game clock and flip-back
                // timers must reach the memory page even while the contact
                // form is up front.
                for page in self.pages.iter_mut() {
                    if let Some(next) = page.update(action.clone())? {
                        action_tx.send(next)?;
                    }
                }
            }

            if self.should_suspend {
                tui.suspend()?;
                action_tx.send(Action::Resume)?;
                tui = Tui::new()?
                    .tick_rate(self.config.tick_rate)
                    .frame_rate(self.config.frame_rate);
                tui.enter()?;
            } else if self.should_quit {
                tui.stop()?;
                break;
            }
        }
        tui.exit()?;
        Ok(())
    }

    fn handle_global_key(&self, key: KeyEvent, action_tx: &UnboundedSender<Action>) -> Result<()> {
        match key.code {
            KeyCode::F(2) => action_tx.send(Action::Navigate(PageId::Contact))?,
            KeyCode::F(3) => action_tx.send(Action::Navigate(PageId::Memory))?,
            KeyCode::Char('z') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                action_tx.send(Action::Suspend)?
            }
            _ => {}
        }
        Ok(())
    }

    fn navigate(&mut self, id: PageId) -> Result<()> {
        let Some(target) = self.pages.iter().position(|page| page.id() == id) else {
            return Ok(());
        };
        if target == self.active_page {
            return Ok(());
        }
        self.pages[self.active_page].on_exit()?;
        self.active_page = target;
        self.pages[self.active_page].on_enter()?;
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame<'_>) -> Result<()> {
        let vertical_layout =
            Layout::vertical(vec![Constraint::Fill(1), Constraint::Length(1)]).split(frame.area());

        if let Some(page) = self.pages.get_mut(self.active_page) {
            page.draw(frame, vertical_layout[0])?;
            self.status_bar.set_context(page.name(), page.hints());
        }
        self.notice.draw(frame, vertical_layout[0])?;
        self.status_bar.draw(frame, vertical_layout[1])?;
        Ok(())
    }
}
