use std::{
    num::NonZeroUsize,
    sync::atomic::{AtomicU64, Ordering},
};

use rand::{Rng, seq::SliceRandom as _};
use serde::{Deserialize, Serialize};

use crate::core::{BingoCard, MAX_NUMBER};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Hands out a process-unique identity.
pub(crate) fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Process-unique identity of a [`BingoGame`].
///
/// Assigned when the game is created or deserialized, never read from input.
/// Games are immutable, so the id can stand in for the game's contents as a
/// cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
#[display("game#{_0}")]
pub struct GameId(u64);

impl GameId {
    fn fresh() -> Self {
        Self(next_id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GameError {
    #[display("a game needs at least one card")]
    NoCards,
    #[display("draw order must hold 75 numbers, got {count}")]
    WrongDrawCount { count: usize },
    #[display("drawn number {number} is outside 1..=75")]
    DrawOutOfRange { number: u8 },
    #[display("number {number} is drawn more than once")]
    DuplicateDraw { number: u8 },
}

/// One simulated game: a card per player and the order numbers are called in.
///
/// The draw order is a permutation of `1..=75`. Turns are 1-indexed, so after
/// turn `t` the numbers `draws()[..t]` have been called.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "GameRepr")]
pub struct BingoGame {
    #[serde(skip_serializing)]
    id: GameId,
    cards: Vec<BingoCard>,
    draws: Vec<u8>,
}

#[derive(Deserialize)]
struct GameRepr {
    cards: Vec<BingoCard>,
    draws: Vec<u8>,
}

impl TryFrom<GameRepr> for BingoGame {
    type Error = GameError;

    fn try_from(repr: GameRepr) -> Result<Self, Self::Error> {
        Self::new(repr.cards, repr.draws)
    }
}

impl BingoGame {
    /// Builds a game from existing cards and a draw order, validating both.
    pub fn new(cards: Vec<BingoCard>, draws: Vec<u8>) -> Result<Self, GameError> {
        if cards.is_empty() {
            return Err(GameError::NoCards);
        }
        if draws.len() != usize::from(MAX_NUMBER) {
            return Err(GameError::WrongDrawCount { count: draws.len() });
        }
        let mut seen = 0_u128;
        for &number in &draws {
            if !(1..=MAX_NUMBER).contains(&number) {
                return Err(GameError::DrawOutOfRange { number });
            }
            let bit = 1_u128 << number;
            if seen & bit != 0 {
                return Err(GameError::DuplicateDraw { number });
            }
            seen |= bit;
        }
        Ok(Self {
            id: GameId::fresh(),
            cards,
            draws,
        })
    }

    /// Generates a game with `num_players` random cards and a shuffled draw order.
    pub fn generate<R>(num_players: NonZeroUsize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let cards = (0..num_players.get())
            .map(|_| BingoCard::generate(rng))
            .collect();
        let mut draws = (1..=MAX_NUMBER).collect::<Vec<_>>();
        draws.shuffle(rng);
        Self {
            id: GameId::fresh(),
            cards,
            draws,
        }
    }

    #[must_use]
    pub fn id(&self) -> GameId {
        self.id
    }

    #[must_use]
    pub fn cards(&self) -> &[BingoCard] {
        &self.cards
    }

    #[must_use]
    pub fn card(&self, player: usize) -> Option<&BingoCard> {
        self.cards.get(player)
    }

    #[must_use]
    pub fn num_players(&self) -> usize {
        self.cards.len()
    }

    /// Returns the full draw order.
    #[must_use]
    pub fn draws(&self) -> &[u8] {
        &self.draws
    }

    /// Returns the numbers called by the end of `turn`.
    ///
    /// Turns past the last draw return the whole order.
    #[must_use]
    pub fn drawn_by_turn(&self, turn: usize) -> &[u8] {
        &self.draws[..turn.min(self.draws.len())]
    }
}
