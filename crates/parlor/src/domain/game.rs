//! Turn-taking state machine for the memory game.
//!
//! The game owns the shuffled deck, the per-card face state and the counters.
//! It knows nothing about rendering or timers; flips return a [`FlipOutcome`]
//! and the caller schedules the delayed flip-back for mismatches. Delayed
//! flip-backs carry the epoch they were scheduled under, so a flip-back that
//! outlives a restart is discarded instead of concealing fresh cards.

use rand::Rng;
use tracing::debug;

use crate::domain::deck::{build_deck, Card, Difficulty};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Hidden,
    Revealed,
    Matched,
}

/// What a flip did, and what the caller has to do about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipOutcome {
    /// Not started, board locked, or the card was already face-up/matched.
    Ignored,
    /// First card of the turn revealed; no move counted yet.
    FirstRevealed,
    /// Second card matched the first.
    Matched,
    /// The matching pair was the last one; the game is won.
    Won { moves: u32 },
    /// Second card did not match; the board is locked until the caller
    /// delivers `conceal_pending` with this epoch.
    Mismatch { epoch: u64 },
}

#[derive(Debug)]
pub struct MatchGame {
    difficulty: Difficulty,
    deck: Vec<Card>,
    faces: Vec<Face>,
    first: Option<usize>,
    second: Option<usize>,
    moves: u32,
    matches: u32,
    locked: bool,
    started: bool,
    won: bool,
    elapsed_secs: u32,
    clock_running: bool,
    epoch: u64,
}

impl MatchGame {
    /// An idle game: no deck yet, stats at zero for the given difficulty.
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            deck: Vec::new(),
            faces: Vec::new(),
            first: None,
            second: None,
            moves: 0,
            matches: 0,
            locked: false,
            started: false,
            won: false,
            elapsed_secs: 0,
            clock_running: false,
            epoch: 0,
        }
    }

    /// Starts (or restarts) a game: fresh shuffled deck, all counters and the
    /// clock reset, epoch bumped so stale flip-backs become no-ops.
    pub fn start<R: Rng>(&mut self, difficulty: Difficulty, rng: &mut R) {
        self.difficulty = difficulty;
        self.deck = build_deck(difficulty, rng);
        self.faces = vec![Face::Hidden; self.deck.len()];
        self.first = None;
        self.second = None;
        self.moves = 0;
        self.matches = 0;
        self.locked = false;
        self.started = true;
        self.won = false;
        self.elapsed_secs = 0;
        self.clock_running = true;
        self.epoch += 1;
        debug!(difficulty = %difficulty, epoch = self.epoch, "game started");
    }

    /// Flips the card at `index` face-up, if the rules allow it.
    pub fn flip(&mut self, index: usize) -> FlipOutcome {
        if !self.started || self.locked {
            return FlipOutcome::Ignored;
        }
        match self.faces.get(index) {
            Some(Face::Hidden) => {}
            _ => return FlipOutcome::Ignored,
        }
        self.faces[index] = Face::Revealed;

        let first = match self.first {
            None => {
                self.first = Some(index);
                return FlipOutcome::FirstRevealed;
            }
            Some(first) => first,
        };

        self.second = Some(index);
        self.locked = true;
        self.moves += 1;

        if self.deck[first].pair == self.deck[index].pair {
            self.faces[first] = Face::Matched;
            self.faces[index] = Face::Matched;
            self.matches += 1;
            self.clear_turn();
            if self.matches as usize == self.total_pairs() {
                self.clock_running = false;
                self.won = true;
                debug!(moves = self.moves, secs = self.elapsed_secs, "game won");
                return FlipOutcome::Won { moves: self.moves };
            }
            FlipOutcome::Matched
        } else {
            FlipOutcome::Mismatch { epoch: self.epoch }
        }
    }

    /// Flips a mismatched pair back face-down. Only acts when `epoch` matches
    /// the current game; returns whether anything changed.
    pub fn conceal_pending(&mut self, epoch: u64) -> bool {
        if epoch != self.epoch || !self.locked {
            return false;
        }
        if let (Some(first), Some(second)) = (self.first, self.second) {
            self.faces[first] = Face::Hidden;
            self.faces[second] = Face::Hidden;
            self.clear_turn();
            true
        } else {
            false
        }
    }

    /// Advances the clock by one second while it is running.
    pub fn tick_second(&mut self) {
        if self.clock_running {
            self.elapsed_secs += 1;
        }
    }

    fn clear_turn(&mut self) {
        self.first = None;
        self.second = None;
        self.locked = false;
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn deck(&self) -> &[Card] {
        &self.deck
    }

    pub fn face(&self, index: usize) -> Face {
        self.faces.get(index).copied().unwrap_or(Face::Hidden)
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn matches(&self) -> u32 {
        self.matches
    }

    pub fn total_pairs(&self) -> usize {
        self.difficulty.pair_count()
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn won(&self) -> bool {
        self.won
    }

    pub fn locked(&self) -> bool {
        self.locked
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

/// Formats elapsed seconds as zero-padded `MM:SS`.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn started_game() -> MatchGame {
        let mut game = MatchGame::new(Difficulty::Easy);
        game.start(Difficulty::Easy, &mut StdRng::seed_from_u64(3));
        game
    }

    /// Index of the twin of the card at `index`.
    fn twin_of(game: &MatchGame, index: usize) -> usize {
        let pair = game.deck()[index].pair;
        game.deck()
            .iter()
            .enumerate()
            .find(|(i, c)| *i != index && c.pair == pair)
            .map(|(i, _)| i)
            .unwrap()
    }

    /// Index of a card whose pair differs from the one at `index`.
    fn stranger_of(game: &MatchGame, index: usize) -> usize {
        let pair = game.deck()[index].pair;
        game.deck()
            .iter()
            .enumerate()
            .find(|(_, c)| c.pair != pair)
            .map(|(i, _)| i)
            .unwrap()
    }

    #[test]
    fn flips_are_ignored_before_start() {
        let mut game = MatchGame::new(Difficulty::Easy);
        assert_eq!(game.flip(0), FlipOutcome::Ignored);
        assert_eq!(game.moves(), 0);
    }

    #[test]
    fn first_flip_counts_no_move() {
        let mut game = started_game();
        assert_eq!(game.flip(0), FlipOutcome::FirstRevealed);
        assert_eq!(game.moves(), 0);
        assert_eq!(game.face(0), Face::Revealed);
        assert!(!game.locked());
    }

    #[test]
    fn matching_pair_unlocks_and_counts() {
        let mut game = started_game();
        let twin = twin_of(&game, 0);
        game.flip(0);
        assert_eq!(game.flip(twin), FlipOutcome::Matched);
        assert_eq!(game.moves(), 1);
        assert_eq!(game.matches(), 1);
        assert_eq!(game.face(0), Face::Matched);
        assert_eq!(game.face(twin), Face::Matched);
        assert!(!game.locked());
    }

    #[test]
    fn mismatch_locks_until_concealed() {
        let mut game = started_game();
        let other = stranger_of(&game, 0);
        game.flip(0);
        let outcome = game.flip(other);
        assert_eq!(outcome, FlipOutcome::Mismatch { epoch: game.epoch() });
        assert!(game.locked());
        assert_eq!(game.moves(), 1);

        // Locked board ignores further flips.
        let third = (0..game.deck().len())
            .find(|&i| game.face(i) == Face::Hidden)
            .unwrap();
        assert_eq!(game.flip(third), FlipOutcome::Ignored);

        assert!(game.conceal_pending(game.epoch()));
        assert!(!game.locked());
        assert_eq!(game.face(0), Face::Hidden);
        assert_eq!(game.face(other), Face::Hidden);
    }

    #[test]
    fn stale_conceal_is_a_no_op() {
        let mut game = started_game();
        let other = stranger_of(&game, 0);
        game.flip(0);
        let epoch = match game.flip(other) {
            FlipOutcome::Mismatch { epoch } => epoch,
            outcome => panic!("expected mismatch, got {outcome:?}"),
        };

        // Restart while the flip-back is pending.
        game.start(Difficulty::Easy, &mut StdRng::seed_from_u64(9));
        assert!(!game.conceal_pending(epoch));
        assert!(game.deck().iter().enumerate().all(|(i, _)| game.face(i) == Face::Hidden));
    }

    #[test]
    fn revealed_and_matched_cards_are_ignored() {
        let mut game = started_game();
        game.flip(0);
        assert_eq!(game.flip(0), FlipOutcome::Ignored);

        let twin = twin_of(&game, 0);
        game.flip(twin);
        assert_eq!(game.flip(0), FlipOutcome::Ignored);
        assert_eq!(game.flip(twin), FlipOutcome::Ignored);
        assert_eq!(game.moves(), 1);
    }

    #[test]
    fn win_fires_on_the_last_pair() {
        let mut game = started_game();
        let pairs = game.total_pairs();
        let mut won = None;
        for pair in 0..pairs {
            let indices: Vec<usize> = game
                .deck()
                .iter()
                .enumerate()
                .filter(|(_, c)| c.pair == pair)
                .map(|(i, _)| i)
                .collect();
            game.flip(indices[0]);
            won = Some(game.flip(indices[1]));
        }
        assert_eq!(won, Some(FlipOutcome::Won { moves: pairs as u32 }));
        assert!(game.won());

        // The clock stops exactly once, on the win.
        let before = game.elapsed_secs();
        game.tick_second();
        assert_eq!(game.elapsed_secs(), before);
    }

    #[test]
    fn restart_resets_everything_and_bumps_epoch() {
        let mut game = started_game();
        let epoch = game.epoch();
        game.flip(0);
        game.flip(stranger_of(&game, 0));
        game.tick_second();

        game.start(Difficulty::Hard, &mut StdRng::seed_from_u64(5));
        assert_eq!(game.moves(), 0);
        assert_eq!(game.matches(), 0);
        assert_eq!(game.elapsed_secs(), 0);
        assert_eq!(game.total_pairs(), 12);
        assert_eq!(game.deck().len(), 24);
        assert!(!game.locked());
        assert!(!game.won());
        assert_eq!(game.epoch(), epoch + 1);
    }

    #[test]
    fn clock_runs_while_playing_regardless_of_lock() {
        let mut game = started_game();
        game.tick_second();
        game.flip(0);
        game.flip(stranger_of(&game, 0));
        assert!(game.locked());
        game.tick_second();
        assert_eq!(game.elapsed_secs(), 2);
    }

    #[test]
    fn clock_formats_as_minutes_and_seconds() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(61), "01:01");
        assert_eq!(format_clock(600), "10:00");
    }
}
