use serde::{Deserialize, Serialize};
use strum::Display;

use crate::pages::PageId;

#[derive(Debug, Clone, PartialEq, Serialize, Display, Deserialize)]
pub enum Action {
    Tick,
    Render,
    Resize(u16, u16),
    Suspend,
    Resume,
    Quit,
    Error(String),
    Navigate(PageId),
    /// One whole second elapsed on the game clock.
    ClockTick,
    /// The flip-back delay for a mismatched pair fired. Stale epochs are
    /// discarded by the game.
    FlipConcealed { epoch: u64 },
    /// Show a transient success notice.
    Notice(String),
}
