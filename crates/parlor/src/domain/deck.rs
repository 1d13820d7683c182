//! Deck construction for the memory game.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::Display;

/// Icon faces for the cards. Hard mode needs at least twelve distinct icons.
pub const ICONS: [&str; 14] = [
    "🍎", "🚗", "🐶", "⚽", "🎧", "📚", "🌟", "🍕", "🎲", "🚀", "🎯", "🧩", "🎸", "🔔",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Hard,
}

impl Difficulty {
    pub fn pair_count(self) -> usize {
        match self {
            Difficulty::Easy => 6,
            Difficulty::Hard => 12,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    /// Board columns used when laying the deck out as a grid.
    pub fn columns(self) -> usize {
        match self {
            Difficulty::Easy => 4,
            Difficulty::Hard => 6,
        }
    }
}

/// A single card. Two cards per icon share a `pair` id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    pub icon: &'static str,
    pub pair: usize,
}

/// Builds the 2×pair_count deck for a difficulty and shuffles it with an
/// unbiased permutation.
pub fn build_deck<R: Rng>(difficulty: Difficulty, rng: &mut R) -> Vec<Card> {
    let pair_count = difficulty.pair_count();
    let mut cards = Vec::with_capacity(pair_count * 2);
    for (pair, icon) in ICONS.iter().take(pair_count).enumerate() {
        cards.push(Card { icon, pair });
        cards.push(Card { icon, pair });
    }
    cards.shuffle(rng);
    cards
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn pair_histogram(deck: &[Card]) -> HashMap<usize, usize> {
        let mut counts = HashMap::new();
        for card in deck {
            *counts.entry(card.pair).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn easy_deck_has_six_pairs() {
        let mut rng = StdRng::seed_from_u64(7);
        let deck = build_deck(Difficulty::Easy, &mut rng);
        assert_eq!(deck.len(), 12);
        let counts = pair_histogram(&deck);
        assert_eq!(counts.len(), 6);
        assert!(counts.values().all(|&n| n == 2));
    }

    #[test]
    fn hard_deck_has_twelve_pairs() {
        let mut rng = StdRng::seed_from_u64(7);
        let deck = build_deck(Difficulty::Hard, &mut rng);
        assert_eq!(deck.len(), 24);
        let counts = pair_histogram(&deck);
        assert_eq!(counts.len(), 12);
        assert!(counts.values().all(|&n| n == 2));
    }

    #[test]
    fn paired_cards_share_an_icon() {
        let mut rng = StdRng::seed_from_u64(42);
        let deck = build_deck(Difficulty::Hard, &mut rng);
        for card in &deck {
            let twin = deck
                .iter()
                .filter(|c| c.pair == card.pair)
                .collect::<Vec<_>>();
            assert_eq!(twin.len(), 2);
            assert_eq!(twin[0].icon, twin[1].icon);
        }
    }

    #[test]
    fn shuffle_is_seed_deterministic() {
        let deck_a = build_deck(Difficulty::Easy, &mut StdRng::seed_from_u64(1));
        let deck_b = build_deck(Difficulty::Easy, &mut StdRng::seed_from_u64(1));
        assert_eq!(deck_a, deck_b);
    }

    #[test]
    fn palette_covers_hard_mode() {
        assert!(ICONS.len() >= Difficulty::Hard.pair_count());
    }
}
