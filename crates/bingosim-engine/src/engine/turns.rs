use serde::Serialize;

use crate::core::{BingoCard, MAX_NUMBER, MarkedCells};

use super::{
    game::BingoGame,
    rules::{WinRuleConfig, has_win},
};

/// A 1-indexed draw number within a game.
pub type Turn = u8;

/// Turn recorded for a player who never completes a pattern: one past the last draw.
///
/// Every card is full after 75 draws, so this is not reached in practice, but
/// it flows through every aggregate unchanged if it ever is.
pub const NO_WIN_TURN: Turn = MAX_NUMBER + 1;

/// The turn on which each player of a game first completes a win pattern.
///
/// # Example
///
/// ```
/// use bingosim_engine::{BingoCard, BingoGame, WinRuleConfig, WinningTurns};
///
/// let cards = vec![
///     BingoCard::new(1..=25).unwrap(),
///     BingoCard::new(26..=50).unwrap(),
/// ];
/// let draws = (1..=75).collect::<Vec<u8>>();
/// let game = BingoGame::new(cards, draws).unwrap();
///
/// let turns = WinningTurns::resolve(&game, WinRuleConfig::STANDARD);
/// assert_eq!(turns.as_slice(), [5, 30]);
/// assert_eq!(turns.first(), 5);
/// assert_eq!(turns.first_winner(), Some(0));
/// assert_eq!(turns.next(), Some(30));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WinningTurns {
    turns: Vec<Turn>,
}

impl WinningTurns {
    /// Plays the game's draw order against every card.
    ///
    /// A player stops being checked once they have won, and the scan ends
    /// early when every player has won.
    #[must_use]
    pub fn resolve(game: &BingoGame, config: WinRuleConfig) -> Self {
        let cards = game.cards();
        let mut turns = vec![NO_WIN_TURN; cards.len()];
        let mut marks = vec![MarkedCells::EMPTY; cards.len()];
        let mut remaining = cards.len();

        for (turn, &number) in (1..).zip(game.draws()) {
            for ((card, marked), won_at) in cards.iter().zip(&mut marks).zip(&mut turns) {
                if *won_at != NO_WIN_TURN {
                    continue;
                }
                // a win can only appear on a draw that marks a new cell
                if marked.mark(card, number) && has_win(*marked, config) {
                    *won_at = turn;
                    remaining -= 1;
                }
            }
            if remaining == 0 {
                break;
            }
        }

        Self { turns }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Turn] {
        &self.turns
    }

    /// Earliest winning turn across all players.
    #[must_use]
    pub fn first(&self) -> Turn {
        self.turns.iter().copied().min().unwrap_or(NO_WIN_TURN)
    }

    /// Index of the player who won first.
    ///
    /// Ties go to the lowest player index. Returns `None` if nobody won.
    #[must_use]
    pub fn first_winner(&self) -> Option<usize> {
        let first = self.first();
        if first == NO_WIN_TURN {
            return None;
        }
        self.turns.iter().position(|&turn| turn == first)
    }

    /// Earliest turn strictly after [`Self::first`] on which another player wins.
    ///
    /// `None` when no player finishes later, e.g. a single-player game or
    /// one where every player won on the same draw.
    #[must_use]
    pub fn next(&self) -> Option<Turn> {
        let first = self.first();
        self.turns.iter().copied().filter(|&turn| turn > first).min()
    }

    /// Draws between the first winner and the next one.
    #[must_use]
    pub fn turns_until_next_winner(&self) -> Option<Turn> {
        self.next().map(|next| next - self.first())
    }
}

/// Per-player winning turns of `game`. See [`WinningTurns::resolve`].
#[must_use]
pub fn winning_turns_for_game(game: &BingoGame, config: WinRuleConfig) -> WinningTurns {
    WinningTurns::resolve(game, config)
}

#[must_use]
pub fn first_winning_turn(game: &BingoGame, config: WinRuleConfig) -> Turn {
    WinningTurns::resolve(game, config).first()
}

/// Card of the first winner, lowest player index on ties.
#[must_use]
pub fn first_winner_card(game: &BingoGame, config: WinRuleConfig) -> Option<&BingoCard> {
    WinningTurns::resolve(game, config)
        .first_winner()
        .and_then(|player| game.card(player))
}

#[must_use]
pub fn next_winning_turn(game: &BingoGame, config: WinRuleConfig) -> Option<Turn> {
    WinningTurns::resolve(game, config).next()
}
