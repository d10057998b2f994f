use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::core::{BingoCard, MarkedCells, WinType};

/// Upper bound on win types a card can complete at once:
/// 5 rows, 5 columns, 2 diagonals and the four corners.
pub const MAX_SIMULTANEOUS_WINS: usize = 13;

/// Win types satisfied by a card, in detection order
/// (rows, columns, left diagonal, right diagonal, four corners).
pub type WinTypes = ArrayVec<WinType, MAX_SIMULTANEOUS_WINS>;

/// Optional rules that change what counts as a win.
///
/// Passed into every win check; it is never stored on a card or game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinRuleConfig {
    /// Completing the four corner cells is a win.
    pub check_corners: bool,
    /// The center cell counts as marked from the start.
    pub use_free_space: bool,
}

impl WinRuleConfig {
    /// Plain lines only: no corners, no free space.
    pub const STANDARD: Self = Self {
        check_corners: false,
        use_free_space: false,
    };

    /// Every combination of the two optional rules.
    pub const ALL: [Self; 4] = [
        Self::STANDARD,
        Self::new(true, false),
        Self::new(false, true),
        Self::new(true, true),
    ];

    #[must_use]
    pub const fn new(check_corners: bool, use_free_space: bool) -> Self {
        Self {
            check_corners,
            use_free_space,
        }
    }

    #[must_use]
    pub const fn with_free_space(self) -> Self {
        Self {
            use_free_space: true,
            ..self
        }
    }

    #[must_use]
    pub const fn with_corners(self) -> Self {
        Self {
            check_corners: true,
            ..self
        }
    }

    /// Applies the free-space rule to a set of marks.
    #[inline]
    #[must_use]
    pub const fn effective_marks(self, marked: MarkedCells) -> MarkedCells {
        if self.use_free_space {
            marked.with_free_space()
        } else {
            marked
        }
    }
}

/// Returns every win type satisfied by `marked` under `config`.
///
/// All patterns are checked; a single call can report several wins
/// (for instance a row and a diagonal completed by the same draw).
#[must_use]
pub fn detect_win_types(marked: MarkedCells, config: WinRuleConfig) -> WinTypes {
    let marked = config.effective_marks(marked);
    let mut wins = WinType::LINES
        .into_iter()
        .filter(|win| marked.covers(win.mask()))
        .collect::<WinTypes>();
    if config.check_corners && marked.covers(WinType::FourCorners.mask()) {
        wins.push(WinType::FourCorners);
    }
    wins
}

/// Returns `true` if `marked` satisfies at least one win type under `config`.
///
/// Same answer as `!detect_win_types(marked, config).is_empty()`, without
/// building the list.
#[inline]
#[must_use]
pub fn has_win(marked: MarkedCells, config: WinRuleConfig) -> bool {
    let marked = config.effective_marks(marked);
    WinType::LINES.iter().any(|win| marked.covers(win.mask()))
        || (config.check_corners && marked.covers(WinType::FourCorners.mask()))
}

/// Returns every win type `card` satisfies after the numbers in `drawn` were called.
///
/// The result depends only on the three arguments.
///
/// # Example
///
/// ```
/// use bingosim_engine::{BingoCard, WinRuleConfig, WinType, get_win_types};
///
/// let card = BingoCard::new(1..=25).unwrap();
/// let config = WinRuleConfig::new(true, false);
///
/// let wins = get_win_types(&card, &[1, 2, 3, 4, 5], config);
/// assert_eq!(wins.as_slice(), [WinType::Row { row: 0 }]);
///
/// let wins = get_win_types(&card, &[1, 5, 21, 25], config);
/// assert_eq!(wins.as_slice(), [WinType::FourCorners]);
/// ```
#[must_use]
pub fn get_win_types(card: &BingoCard, drawn: &[u8], config: WinRuleConfig) -> WinTypes {
    detect_win_types(MarkedCells::from_drawn(card, drawn), config)
}

#[cfg(test)]
mod tests {
    use crate::core::DiagonalDirection;

    use super::*;

    fn sequential_card() -> BingoCard {
        BingoCard::new(1..=25).unwrap()
    }

    const CORNERS_ON: WinRuleConfig = WinRuleConfig::new(true, false);

    #[test]
    fn test_horizontal_win() {
        let wins = get_win_types(&sequential_card(), &[1, 2, 3, 4, 5], CORNERS_ON);
        assert_eq!(wins.as_slice(), [WinType::Row { row: 0 }]);
    }

    #[test]
    fn test_vertical_win() {
        let wins = get_win_types(&sequential_card(), &[1, 6, 11, 16, 21], CORNERS_ON);
        assert_eq!(wins.as_slice(), [WinType::Column { col: 0 }]);
    }

    #[test]
    fn test_diagonal_wins() {
        let card = sequential_card();
        let wins = get_win_types(&card, &[1, 7, 13, 19, 25], CORNERS_ON);
        assert_eq!(
            wins.as_slice(),
            [WinType::Diagonal {
                direction: DiagonalDirection::Left
            }]
        );
        let wins = get_win_types(&card, &[5, 9, 13, 17, 21], CORNERS_ON);
        assert_eq!(
            wins.as_slice(),
            [WinType::Diagonal {
                direction: DiagonalDirection::Right
            }]
        );
    }

    #[test]
    fn test_four_corners_only_when_enabled() {
        let card = sequential_card();
        let wins = get_win_types(&card, &[1, 5, 21, 25], CORNERS_ON);
        assert_eq!(wins.as_slice(), [WinType::FourCorners]);

        let wins = get_win_types(&card, &[1, 5, 21, 25], WinRuleConfig::STANDARD);
        assert!(wins.is_empty());
    }

    #[test]
    fn test_free_space_completes_middle_row() {
        let card = sequential_card();
        let config = WinRuleConfig::new(true, true);
        let wins = get_win_types(&card, &[11, 12, 14, 15], config);
        assert_eq!(wins.as_slice(), [WinType::Row { row: 2 }]);

        let wins = get_win_types(&card, &[11, 12, 14, 15], CORNERS_ON);
        assert!(wins.is_empty());
    }

    #[test]
    fn test_free_space_alone_is_not_a_win() {
        let config = WinRuleConfig::new(true, true);
        assert!(get_win_types(&sequential_card(), &[], config).is_empty());
        assert!(!has_win(MarkedCells::EMPTY, config));
    }

    #[test]
    fn test_simultaneous_wins_are_all_reported() {
        // row 0 plus column 4 plus the right diagonal, all completed by 5
        let card = sequential_card();
        let drawn = [1, 2, 3, 4, 10, 15, 20, 25, 9, 13, 17, 21, 5];
        let wins = get_win_types(&card, &drawn, WinRuleConfig::STANDARD);
        assert_eq!(
            wins.as_slice(),
            [
                WinType::Row { row: 0 },
                WinType::Column { col: 4 },
                WinType::Diagonal {
                    direction: DiagonalDirection::Right
                },
            ]
        );
    }

    #[test]
    fn test_full_card_reports_every_pattern() {
        let card = sequential_card();
        let drawn = (1..=75).collect::<Vec<u8>>();
        let wins = get_win_types(&card, &drawn, CORNERS_ON);
        assert_eq!(wins.len(), MAX_SIMULTANEOUS_WINS);
        assert_eq!(wins.last(), Some(&WinType::FourCorners));
    }

    #[test]
    fn test_win_types_are_deterministic() {
        let card = sequential_card();
        let drawn = [3, 8, 13, 18, 23, 1, 7, 19, 25];
        let config = WinRuleConfig::new(true, true);
        let first = get_win_types(&card, &drawn, config);
        let second = get_win_types(&card, &drawn, config);
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn test_has_win_agrees_with_detection() {
        let card = sequential_card();
        let configs = [
            WinRuleConfig::STANDARD,
            WinRuleConfig::STANDARD.with_corners(),
            WinRuleConfig::STANDARD.with_free_space(),
            WinRuleConfig::new(true, true),
        ];
        let draws: [Vec<u8>; 5] = [
            vec![],
            vec![1, 5, 21, 25],
            vec![11, 12, 14, 15],
            vec![3, 8, 18, 23],
            vec![1, 2, 3, 4],
        ];
        for config in configs {
            for drawn in &draws {
                let marked = MarkedCells::from_drawn(&card, drawn);
                assert_eq!(
                    has_win(marked, config),
                    !detect_win_types(marked, config).is_empty(),
                    "{config:?} {drawn:?}"
                );
            }
        }
    }

    #[test]
    fn test_all_configs_are_distinct() {
        let configs = WinRuleConfig::ALL;
        for (i, a) in configs.iter().enumerate() {
            assert!(configs[i + 1..].iter().all(|b| a != b), "{a:?}");
        }
        assert!(configs.contains(&WinRuleConfig::STANDARD));
    }

    #[test]
    fn test_config_serde_is_camel_case() {
        let json = serde_json::to_string(&WinRuleConfig::new(true, false)).unwrap();
        assert_eq!(json, r#"{"checkCorners":true,"useFreeSpace":false}"#);
    }
}
