use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use super::card::{CARD_SIZE, SIDE, TilePosition};

// Pattern masks over the row-major cell bits used by `MarkedCells`.
const ROW_MASK: u32 = 0b11111;
const COLUMN_MASK: u32 = 1 | (1 << 5) | (1 << 10) | (1 << 15) | (1 << 20);
const LEFT_DIAGONAL_MASK: u32 = 1 | (1 << 6) | (1 << 12) | (1 << 18) | (1 << 24);
const RIGHT_DIAGONAL_MASK: u32 = (1 << 4) | (1 << 8) | (1 << 12) | (1 << 16) | (1 << 20);
const FOUR_CORNERS_MASK: u32 = 1 | (1 << 4) | (1 << 20) | (1 << 24);

const CORNERS: [TilePosition; 4] = [
    TilePosition::new(0, 0),
    TilePosition::new(0, 4),
    TilePosition::new(4, 0),
    TilePosition::new(4, 4),
];

/// Direction of a diagonal line.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "camelCase")]
pub enum DiagonalDirection {
    /// Top-left to bottom-right.
    #[display("left")]
    Left,
    /// Top-right to bottom-left.
    #[display("right")]
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum WinTypeError {
    #[display("row {row} is outside 0..5")]
    RowOutOfRange { row: u8 },
    #[display("column {col} is outside 0..5")]
    ColumnOutOfRange { col: u8 },
}

/// A completed win pattern.
///
/// Serializes as a tagged object, e.g. `{"type":"row","row":0}` or
/// `{"type":"fourCorners"}`. Row and column indices are checked on
/// deserialization.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(tag = "type", rename_all = "camelCase", try_from = "WinTypeRepr")]
pub enum WinType {
    #[display("row {row}")]
    Row { row: u8 },
    #[serde(rename = "col")]
    #[display("column {col}")]
    Column { col: u8 },
    #[display("{direction} diagonal")]
    Diagonal { direction: DiagonalDirection },
    #[display("four corners")]
    FourCorners,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum WinTypeRepr {
    Row { row: u8 },
    #[serde(rename = "col")]
    Column { col: u8 },
    Diagonal { direction: DiagonalDirection },
    FourCorners,
}

impl TryFrom<WinTypeRepr> for WinType {
    type Error = WinTypeError;

    fn try_from(repr: WinTypeRepr) -> Result<Self, Self::Error> {
        match repr {
            WinTypeRepr::Row { row } if row >= SIDE => Err(WinTypeError::RowOutOfRange { row }),
            WinTypeRepr::Column { col } if col >= SIDE => {
                Err(WinTypeError::ColumnOutOfRange { col })
            }
            WinTypeRepr::Row { row } => Ok(Self::Row { row }),
            WinTypeRepr::Column { col } => Ok(Self::Column { col }),
            WinTypeRepr::Diagonal { direction } => Ok(Self::Diagonal { direction }),
            WinTypeRepr::FourCorners => Ok(Self::FourCorners),
        }
    }
}

impl WinType {
    /// Every row, column and diagonal, in detection order.
    pub const LINES: [Self; 12] = [
        Self::Row { row: 0 },
        Self::Row { row: 1 },
        Self::Row { row: 2 },
        Self::Row { row: 3 },
        Self::Row { row: 4 },
        Self::Column { col: 0 },
        Self::Column { col: 1 },
        Self::Column { col: 2 },
        Self::Column { col: 3 },
        Self::Column { col: 4 },
        Self::Diagonal {
            direction: DiagonalDirection::Left,
        },
        Self::Diagonal {
            direction: DiagonalDirection::Right,
        },
    ];

    /// Returns the bit mask of the cells this pattern covers.
    #[must_use]
    pub const fn mask(self) -> u32 {
        match self {
            Self::Row { row } => ROW_MASK << (row as usize * CARD_SIZE),
            Self::Column { col } => COLUMN_MASK << col,
            Self::Diagonal {
                direction: DiagonalDirection::Left,
            } => LEFT_DIAGONAL_MASK,
            Self::Diagonal {
                direction: DiagonalDirection::Right,
            } => RIGHT_DIAGONAL_MASK,
            Self::FourCorners => FOUR_CORNERS_MASK,
        }
    }

    /// Returns the cells this pattern covers.
    ///
    /// - rows: left to right
    /// - columns: top to bottom
    /// - left diagonal: top-left to bottom-right
    /// - right diagonal: top-right to bottom-left
    /// - four corners: top-left, top-right, bottom-left, bottom-right
    ///
    /// # Example
    ///
    /// ```
    /// use bingosim_engine::{DiagonalDirection, TilePosition, WinType};
    ///
    /// let cells = WinType::Diagonal { direction: DiagonalDirection::Right }.tile_positions();
    /// assert_eq!(cells[0], TilePosition::new(0, 4));
    /// assert_eq!(cells[4], TilePosition::new(4, 0));
    /// ```
    #[must_use]
    pub fn tile_positions(self) -> ArrayVec<TilePosition, CARD_SIZE> {
        const LAST: u8 = 4;
        match self {
            Self::Row { row } => (0..=LAST).map(|col| TilePosition::new(row, col)).collect(),
            Self::Column { col } => (0..=LAST).map(|row| TilePosition::new(row, col)).collect(),
            Self::Diagonal { direction } => (0..=LAST)
                .map(|i| match direction {
                    DiagonalDirection::Left => TilePosition::new(i, i),
                    DiagonalDirection::Right => TilePosition::new(i, LAST - i),
                })
                .collect(),
            Self::FourCorners => CORNERS.into_iter().collect(),
        }
    }
}

/// Returns the cells covered by `win_type`. See [`WinType::tile_positions`].
#[must_use]
pub fn winning_tile_indices(win_type: WinType) -> ArrayVec<TilePosition, CARD_SIZE> {
    win_type.tile_positions()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(cells: &[(u8, u8)]) -> Vec<TilePosition> {
        cells
            .iter()
            .map(|&(row, col)| TilePosition::new(row, col))
            .collect()
    }

    #[test]
    fn test_row_tiles() {
        let tiles = winning_tile_indices(WinType::Row { row: 2 });
        assert_eq!(
            tiles.as_slice(),
            positions(&[(2, 0), (2, 1), (2, 2), (2, 3), (2, 4)])
        );
    }

    #[test]
    fn test_column_tiles() {
        let tiles = winning_tile_indices(WinType::Column { col: 3 });
        assert_eq!(
            tiles.as_slice(),
            positions(&[(0, 3), (1, 3), (2, 3), (3, 3), (4, 3)])
        );
    }

    #[test]
    fn test_left_diagonal_tiles() {
        let tiles = winning_tile_indices(WinType::Diagonal {
            direction: DiagonalDirection::Left,
        });
        assert_eq!(
            tiles.as_slice(),
            positions(&[(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)])
        );
    }

    #[test]
    fn test_right_diagonal_tiles() {
        let tiles = winning_tile_indices(WinType::Diagonal {
            direction: DiagonalDirection::Right,
        });
        assert_eq!(
            tiles.as_slice(),
            positions(&[(0, 4), (1, 3), (2, 2), (3, 1), (4, 0)])
        );
    }

    #[test]
    fn test_four_corners_tiles() {
        let tiles = winning_tile_indices(WinType::FourCorners);
        assert_eq!(
            tiles.as_slice(),
            positions(&[(0, 0), (0, 4), (4, 0), (4, 4)])
        );
    }

    #[test]
    fn test_masks_match_tile_positions() {
        let all = WinType::LINES.into_iter().chain([WinType::FourCorners]);
        for win_type in all {
            let from_tiles = win_type
                .tile_positions()
                .iter()
                .fold(0_u32, |mask, pos| mask | (1 << pos.index()));
            assert_eq!(win_type.mask(), from_tiles, "{win_type}");
        }
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&WinType::Row { row: 0 }).unwrap();
        assert_eq!(json, r#"{"type":"row","row":0}"#);
        let json = serde_json::to_string(&WinType::Column { col: 1 }).unwrap();
        assert_eq!(json, r#"{"type":"col","col":1}"#);
        let json = serde_json::to_string(&WinType::Diagonal {
            direction: DiagonalDirection::Left,
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"diagonal","direction":"left"}"#);
        let json = serde_json::to_string(&WinType::FourCorners).unwrap();
        assert_eq!(json, r#"{"type":"fourCorners"}"#);
    }

    #[test]
    fn test_deserialize_checks_line_index() {
        for win_type in WinType::LINES.into_iter().chain([WinType::FourCorners]) {
            let json = serde_json::to_string(&win_type).unwrap();
            let parsed: WinType = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, win_type);
        }

        let err = serde_json::from_str::<WinType>(r#"{"type":"col","col":40}"#).unwrap_err();
        assert!(err.to_string().contains("column 40 is outside 0..5"), "{err}");
        let err = serde_json::from_str::<WinType>(r#"{"type":"row","row":5}"#).unwrap_err();
        assert!(err.to_string().contains("row 5 is outside 0..5"), "{err}");
    }

    #[test]
    fn test_display() {
        assert_eq!(WinType::Column { col: 3 }.to_string(), "column 3");
        assert_eq!(
            WinType::Diagonal {
                direction: DiagonalDirection::Right
            }
            .to_string(),
            "right diagonal"
        );
    }
}
