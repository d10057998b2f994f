use super::card::{BingoCard, CELL_COUNT, CENTER_INDEX, TilePosition};

/// Set of marked cells on one card, one bit per cell.
///
/// Bit `i` corresponds to the cell at row-major flat index `i`, so a win
/// pattern is a mask over the same 25 bits and checking it is a single AND.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MarkedCells {
    bits: u32,
}

impl MarkedCells {
    pub const EMPTY: Self = Self { bits: 0 };
    pub const FULL: Self = Self {
        bits: (1 << CELL_COUNT) - 1,
    };

    /// Marks every cell of `card` whose number appears in `drawn`.
    ///
    /// Numbers that are not on the card are ignored.
    #[must_use]
    pub fn from_drawn(card: &BingoCard, drawn: &[u8]) -> Self {
        let mut marked = Self::EMPTY;
        for &number in drawn {
            marked.mark(card, number);
        }
        marked
    }

    /// Marks the cell holding `number`.
    ///
    /// Returns `true` if the card holds `number` and the cell was not marked yet.
    #[inline]
    pub fn mark(&mut self, card: &BingoCard, number: u8) -> bool {
        let Some(index) = card.index_of(number) else {
            return false;
        };
        let bit = 1 << index;
        let is_new = self.bits & bit == 0;
        self.bits |= bit;
        is_new
    }

    /// Returns a copy with the center cell marked.
    #[must_use]
    pub const fn with_free_space(self) -> Self {
        Self {
            bits: self.bits | (1 << CENTER_INDEX),
        }
    }

    #[must_use]
    pub const fn is_marked(self, pos: TilePosition) -> bool {
        self.bits & (1 << pos.index()) != 0
    }

    /// Checks whether every cell of `mask` is marked.
    #[inline]
    #[must_use]
    pub const fn covers(self, mask: u32) -> bool {
        self.bits & mask == mask
    }

    #[must_use]
    pub const fn count(self) -> u32 {
        self.bits.count_ones()
    }

    #[must_use]
    pub const fn bits(self) -> u32 {
        self.bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequential_card() -> BingoCard {
        BingoCard::new(1..=25).unwrap()
    }

    #[test]
    fn test_from_drawn_ignores_foreign_numbers() {
        let card = sequential_card();
        let marked = MarkedCells::from_drawn(&card, &[1, 30, 25, 75]);
        assert_eq!(marked.count(), 2);
        assert!(marked.is_marked(TilePosition::new(0, 0)));
        assert!(marked.is_marked(TilePosition::new(4, 4)));
        assert!(!marked.is_marked(TilePosition::new(2, 2)));
    }

    #[test]
    fn test_mark_reports_new_cells_only() {
        let card = sequential_card();
        let mut marked = MarkedCells::EMPTY;
        assert!(marked.mark(&card, 13));
        assert!(!marked.mark(&card, 13));
        assert!(!marked.mark(&card, 60));
        assert_eq!(marked.count(), 1);
    }

    #[test]
    fn test_free_space_marks_center() {
        let marked = MarkedCells::EMPTY.with_free_space();
        assert_eq!(marked.count(), 1);
        assert!(marked.is_marked(TilePosition::new(2, 2)));
        assert_eq!(marked.with_free_space(), marked);
    }

    #[test]
    fn test_covers() {
        let card = sequential_card();
        let marked = MarkedCells::from_drawn(&card, &[1, 2, 3]);
        assert!(marked.covers(0b011));
        assert!(marked.covers(0b111));
        assert!(!marked.covers(0b1111));
        assert!(MarkedCells::FULL.covers(MarkedCells::FULL.bits()));
    }
}
