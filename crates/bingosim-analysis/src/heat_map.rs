use bingosim_engine::{
    BingoGame, CELL_COUNT, NO_WIN_TURN, TilePosition, WinRuleConfig, WinningTurns, get_win_types,
    winning_tile_indices,
};
use serde::{Deserialize, Serialize};

/// How often one board cell took part in a winning pattern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileFrequency {
    pub row: u8,
    pub col: u8,
    /// Hits divided by the total number of win events.
    pub frequency: f64,
}

/// Per-cell win participation across a simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatMapData {
    /// All 25 cells in row-major order.
    pub tiles: Vec<TileFrequency>,
    /// Largest `frequency` in `tiles`, for normalizing a display.
    pub max_frequency: f64,
    /// Number of win types completed by first winners, summed over games.
    pub total_win_events: u64,
    /// Number of games that had a winner.
    pub games_counted: u64,
}

impl HeatMapData {
    #[must_use]
    pub fn tile(&self, pos: TilePosition) -> Option<&TileFrequency> {
        self.tiles.get(pos.index())
    }
}

/// Builds a [`HeatMapData`] one game at a time.
///
/// For each game, the first winner's completed win types at the winning turn
/// are looked up. The union of their cells is counted once for the game, and
/// every win type adds one win event.
#[derive(Debug, Clone, Default)]
pub struct HeatMapAccumulator {
    hits: [u64; CELL_COUNT],
    total_win_events: u64,
    games_counted: u64,
}

impl HeatMapAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `game`, given its already resolved winning turns.
    pub fn add_game(&mut self, game: &BingoGame, turns: &WinningTurns, config: WinRuleConfig) {
        let first = turns.first();
        if first == NO_WIN_TURN {
            return;
        }
        let Some(card) = turns.first_winner().and_then(|player| game.card(player)) else {
            return;
        };

        let win_types = get_win_types(card, game.drawn_by_turn(usize::from(first)), config);
        let mut cells = 0_u32;
        for win_type in &win_types {
            for pos in winning_tile_indices(*win_type) {
                cells |= 1 << pos.index();
            }
        }
        for (index, hits) in self.hits.iter_mut().enumerate() {
            if cells & (1 << index) != 0 {
                *hits += 1;
            }
        }
        self.total_win_events += win_types.len() as u64;
        self.games_counted += 1;
    }

    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn finish(self) -> HeatMapData {
        let frequency = |hits: u64| {
            if self.total_win_events == 0 {
                0.0
            } else {
                hits as f64 / self.total_win_events as f64
            }
        };
        let tiles = self
            .hits
            .iter()
            .enumerate()
            .map(|(index, &hits)| {
                let pos = TilePosition::from_index(index);
                TileFrequency {
                    row: pos.row,
                    col: pos.col,
                    frequency: frequency(hits),
                }
            })
            .collect::<Vec<_>>();
        let max_frequency = tiles
            .iter()
            .map(|tile| tile.frequency)
            .fold(0.0, f64::max);
        HeatMapData {
            tiles,
            max_frequency,
            total_win_events: self.total_win_events,
            games_counted: self.games_counted,
        }
    }
}

#[cfg(test)]
mod tests {
    use bingosim_engine::BingoCard;

    use super::*;

    fn game_with_draws(prefix: &[u8]) -> BingoGame {
        let draws = prefix
            .iter()
            .copied()
            .chain((1..=75).filter(|n| !prefix.contains(n)))
            .collect();
        BingoGame::new(vec![BingoCard::new(1..=25).unwrap()], draws).unwrap()
    }

    fn accumulate(games: &[BingoGame], config: WinRuleConfig) -> HeatMapData {
        let mut acc = HeatMapAccumulator::new();
        for game in games {
            acc.add_game(game, &WinningTurns::resolve(game, config), config);
        }
        acc.finish()
    }

    #[test]
    fn test_empty_heat_map_is_all_zero() {
        let data = HeatMapAccumulator::new().finish();
        assert_eq!(data.tiles.len(), 25);
        assert!(data.tiles.iter().all(|t| t.frequency == 0.0));
        assert_eq!(data.max_frequency, 0.0);
        assert_eq!(data.games_counted, 0);
    }

    #[test]
    fn test_shared_cell_counted_once_per_game() {
        // row 0 and column 0 complete together when 1 is drawn
        let both = game_with_draws(&[2, 3, 4, 5, 6, 11, 16, 21, 1]);
        let data = accumulate(&[both], WinRuleConfig::STANDARD);

        assert_eq!(data.total_win_events, 2);
        assert_eq!(data.games_counted, 1);
        let corner = data.tile(TilePosition::new(0, 0)).unwrap();
        assert_eq!(corner.frequency, 0.5);
        assert_eq!(data.tile(TilePosition::new(4, 0)).unwrap().frequency, 0.5);
        assert_eq!(data.tile(TilePosition::new(2, 2)).unwrap().frequency, 0.0);
        let touched = data.tiles.iter().filter(|t| t.frequency > 0.0).count();
        assert_eq!(touched, 9);
    }

    #[test]
    fn test_frequencies_across_games() {
        let games = [
            game_with_draws(&[2, 3, 4, 5, 6, 11, 16, 21, 1]),
            game_with_draws(&[21, 22, 23, 24, 25]),
        ];
        let data = accumulate(&games, WinRuleConfig::STANDARD);

        assert_eq!(data.total_win_events, 3);
        assert_eq!(data.games_counted, 2);
        // (4, 0) is in column 0 of the first game and row 4 of the second
        let shared = data.tile(TilePosition::new(4, 0)).unwrap();
        assert!((shared.frequency - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(data.max_frequency, shared.frequency);
        let row_only = data.tile(TilePosition::new(0, 3)).unwrap();
        assert!((row_only.frequency - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_only_first_winner_is_attributed() {
        // player 1 holds 1..=5 on its bottom row and ties player 0 on draw 5
        let bottom_row = BingoCard::new((26..=45).chain(1..=5)).unwrap();
        let game = BingoGame::new(
            vec![BingoCard::new(1..=25).unwrap(), bottom_row],
            (1..=75).collect(),
        )
        .unwrap();
        let data = accumulate(&[game], WinRuleConfig::STANDARD);

        assert_eq!(data.total_win_events, 1);
        for tile in &data.tiles {
            let expected = if tile.row == 0 { 1.0 } else { 0.0 };
            assert_eq!(tile.frequency, expected, "{tile:?}");
        }
    }

    #[test]
    fn test_free_space_cell_is_attributed() {
        let game = game_with_draws(&[11, 12, 14, 15]);
        let data = accumulate(&[game], WinRuleConfig::STANDARD.with_free_space());
        assert_eq!(data.total_win_events, 1);
        assert_eq!(data.tile(TilePosition::new(2, 2)).unwrap().frequency, 1.0);
    }

    #[test]
    fn test_serde_shape() {
        let data = HeatMapAccumulator::new().finish();
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["tiles"][7]["row"], 1);
        assert_eq!(json["tiles"][7]["col"], 2);
        assert!(json.get("maxFrequency").is_some());
        assert!(json.get("totalWinEvents").is_some());
    }
}
