use std::{fmt, ops::RangeInclusive};

use rand::{Rng, seq::index};
use serde::{Deserialize, Serialize, Serializer};

/// Number of rows (and columns) on a card.
pub const CARD_SIZE: usize = 5;
/// Number of cells on a card.
pub const CELL_COUNT: usize = CARD_SIZE * CARD_SIZE;
/// Flat index of the center cell, the one covered by the free-space rule.
pub const CENTER_INDEX: usize = CELL_COUNT / 2;
/// Highest number that can be called. Calls are `1..=MAX_NUMBER`.
pub const MAX_NUMBER: u8 = 75;
/// Width of the number range each column draws from.
pub const COLUMN_WIDTH: u8 = 15;

#[expect(clippy::cast_possible_truncation)]
pub(crate) const SIDE: u8 = CARD_SIZE as u8;

/// Column headers, left to right.
pub const HEADERS: [char; CARD_SIZE] = ['B', 'I', 'N', 'G', 'O'];

/// Row and column of a cell, both 0-indexed from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TilePosition {
    pub row: u8,
    pub col: u8,
}

impl TilePosition {
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Returns the row-major flat index of this position.
    #[must_use]
    pub const fn index(self) -> usize {
        self.row as usize * CARD_SIZE + self.col as usize
    }

    /// Inverse of [`Self::index`].
    ///
    /// # Panics
    ///
    /// Panics if `index >= CELL_COUNT`.
    #[expect(clippy::cast_possible_truncation)]
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        assert!(index < CELL_COUNT, "cell index out of range");
        Self {
            row: (index / CARD_SIZE) as u8,
            col: (index % CARD_SIZE) as u8,
        }
    }
}

/// Returns the numbers column `col` may hold: `15 * col + 1 ..= 15 * col + 15`.
///
/// # Panics
///
/// Panics if `col >= CARD_SIZE`.
#[must_use]
pub fn column_range(col: u8) -> RangeInclusive<u8> {
    assert!(col < SIDE, "column out of range");
    let low = col * COLUMN_WIDTH + 1;
    low..=low + COLUMN_WIDTH - 1
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum CardError {
    #[display("card must have 25 cells, got {count}")]
    WrongCellCount { count: usize },
    #[display("card number {number} is outside 1..=75")]
    OutOfRange { number: u8 },
    #[display("card number {number} appears more than once")]
    Duplicate { number: u8 },
}

/// A 5x5 bingo card.
///
/// Numbers are stored row-major: the cell at `(row, col)` lives at
/// `row * 5 + col`. Cards produced by [`BingoCard::generate`] place in column
/// `c` five distinct numbers from [`column_range(c)`](column_range).
///
/// Cards are immutable once built. [`BingoCard::new`] accepts externally
/// supplied numbers and only checks what every win-rule computation relies on
/// (cell count, number range, uniqueness), so hand-made layouts are allowed.
///
/// # Example
///
/// ```
/// use bingosim_engine::{BingoCard, TilePosition};
///
/// let card = BingoCard::new(1..=25).unwrap();
/// assert_eq!(card.number_at(TilePosition::new(1, 2)), 8);
/// assert_eq!(card.position_of(25), Some(TilePosition::new(4, 4)));
/// assert!(!card.follows_column_ranges());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "Vec<u8>")]
pub struct BingoCard {
    numbers: [u8; CELL_COUNT],
}

impl BingoCard {
    /// Builds a card from 25 row-major numbers, validating them.
    pub fn new<I>(numbers: I) -> Result<Self, CardError>
    where
        I: IntoIterator<Item = u8>,
    {
        Self::try_from(numbers.into_iter().collect::<Vec<_>>())
    }

    /// Generates a random card.
    ///
    /// Each column receives 5 numbers sampled without replacement from its
    /// 15-number range, in random order.
    pub fn generate<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut numbers = [0; CELL_COUNT];
        for col in 0..SIDE {
            let low = *column_range(col).start();
            let picks = index::sample(rng, usize::from(COLUMN_WIDTH), CARD_SIZE);
            for (row, offset) in (0..SIDE).zip(picks) {
                #[expect(clippy::cast_possible_truncation)]
                let offset = offset as u8;
                numbers[TilePosition::new(row, col).index()] = low + offset;
            }
        }
        Self { numbers }
    }

    /// Returns the 25 numbers in row-major order.
    #[must_use]
    pub const fn numbers(&self) -> &[u8; CELL_COUNT] {
        &self.numbers
    }

    #[must_use]
    pub const fn number_at(&self, pos: TilePosition) -> u8 {
        self.numbers[pos.index()]
    }

    /// Returns the flat index holding `number`, if the card has it.
    #[inline]
    #[must_use]
    pub fn index_of(&self, number: u8) -> Option<usize> {
        self.numbers.iter().position(|&n| n == number)
    }

    #[must_use]
    pub fn position_of(&self, number: u8) -> Option<TilePosition> {
        self.index_of(number).map(TilePosition::from_index)
    }

    /// Returns the numbers of column `col`, top to bottom.
    pub fn column(&self, col: u8) -> impl Iterator<Item = u8> + '_ {
        (0..SIDE).map(move |row| self.number_at(TilePosition::new(row, col)))
    }

    /// Checks that every column only holds numbers from its own range.
    #[must_use]
    pub fn follows_column_ranges(&self) -> bool {
        (0..SIDE).all(|col| {
            let range = column_range(col);
            self.column(col).all(|n| range.contains(&n))
        })
    }
}

impl TryFrom<Vec<u8>> for BingoCard {
    type Error = CardError;

    fn try_from(numbers: Vec<u8>) -> Result<Self, Self::Error> {
        let numbers: [u8; CELL_COUNT] = numbers
            .try_into()
            .map_err(|numbers: Vec<u8>| CardError::WrongCellCount {
                count: numbers.len(),
            })?;

        let mut seen = 0_u128;
        for &number in &numbers {
            if !(1..=MAX_NUMBER).contains(&number) {
                return Err(CardError::OutOfRange { number });
            }
            let bit = 1_u128 << number;
            if seen & bit != 0 {
                return Err(CardError::Duplicate { number });
            }
            seen |= bit;
        }

        Ok(Self { numbers })
    }
}

impl Serialize for BingoCard {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.numbers.as_slice().serialize(serializer)
    }
}

impl fmt::Display for BingoCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for header in HEADERS {
            write!(f, "{header:>4}")?;
        }
        for row in self.numbers.chunks(CARD_SIZE) {
            writeln!(f)?;
            for number in row {
                write!(f, "{number:>4}")?;
            }
        }
        Ok(())
    }
}
