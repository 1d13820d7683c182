use clap::ValueEnum;
use color_eyre::Result;
use ratatui::{
    layout::{Rect, Size},
    Frame,
};
use serde::{Deserialize, Serialize};
use strum::Display;
use tokio::sync::mpsc::UnboundedSender;

use crate::{
    action::Action,
    config::Config,
    tui::{Event, EventResponse},
};

pub mod contact;
pub mod memory;

pub use contact::ContactPage;
pub use memory::MemoryPage;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, Serialize, Deserialize, ValueEnum,
)]
#[strum(serialize_all = "lowercase")]
pub enum PageId {
    #[default]
    Contact,
    Memory,
}

/// A `Page` owns a full screen of widgets and exposes the component
/// lifecycle at screen level.
pub trait Page {
    fn name(&self) -> &'static str;

    fn id(&self) -> PageId;

    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
        let _ = tx;
        Ok(())
    }

    fn register_config_handler(&mut self, config: Config) -> Result<()> {
        let _ = config;
        Ok(())
    }

    fn init(&mut self, area: Size) -> Result<()> {
        let _ = area;
        Ok(())
    }

    fn handle_events(&mut self, event: Option<Event>) -> Result<Option<EventResponse<Action>>> {
        let _ = event;
        Ok(None)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let _ = action;
        Ok(None)
    }

    /// Key hints shown in the status bar while this page is active.
    fn hints(&self) -> &'static str {
        ""
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()>;

    /// Called when the page becomes active.
    fn on_enter(&mut self) -> Result<()> {
        Ok(())
    }

    /// Called when the page is leaving / being replaced.
    fn on_exit(&mut self) -> Result<()> {
        Ok(())
    }
}
