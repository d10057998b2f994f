use std::{fmt, num::NonZeroUsize, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::game::{BingoGame, next_id};

/// Process-unique identity of a [`BingoSimulation`], see [`GameId`](super::GameId).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
#[display("simulation#{_0}")]
pub struct SimulationId(u64);

impl SimulationId {
    fn fresh() -> Self {
        Self(next_id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SimulationError {
    #[display("number of games must be at least 1")]
    ZeroGames,
    #[display("number of players must be at least 1")]
    ZeroPlayers,
    #[display("game {game} has {found} cards, expected {expected}")]
    PlayerCountMismatch {
        game: usize,
        expected: usize,
        found: usize,
    },
}

/// Seed for deterministic simulation generation.
///
/// A 128-bit seed for the [`Pcg32`] generator that deals cards and shuffles
/// draw orders. The same seed, game count and player count always produce
/// the same simulation, which makes runs reproducible from the command line
/// and in tests.
///
/// Serialized (and parsed) as a 32-character hex string.
///
/// # Example
///
/// ```
/// use bingosim_engine::{BingoSimulation, SimulationSeed};
/// use rand::Rng as _;
///
/// let seed: SimulationSeed = rand::rng().random();
/// let a = BingoSimulation::with_seed(10, 3, seed).unwrap();
/// let b = BingoSimulation::with_seed(10, 3, seed).unwrap();
/// assert_eq!(a.games()[9].draws(), b.games()[9].draws());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationSeed([u8; 16]);

impl SimulationSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Builds the generator this seed drives.
    #[must_use]
    pub fn rng(self) -> Pcg32 {
        Pcg32::from_seed(self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid hex seed {input:?}: {reason}")]
pub struct SeedParseError {
    input: String,
    reason: String,
}

impl fmt::Display for SimulationSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for SimulationSeed {
    type Err = SeedParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = |reason: String| SeedParseError {
            input: s.to_owned(),
            reason,
        };
        if s.len() != 32 {
            return Err(error(format!("expected 32 characters, got {}", s.len())));
        }
        let num = u128::from_str_radix(s, 16).map_err(|e| error(e.to_string()))?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for SimulationSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SimulationSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `SimulationSeed` values with `rng.random()`.
impl Distribution<SimulationSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SimulationSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        SimulationSeed(seed)
    }
}

/// A batch of independently generated games sharing one player count.
///
/// This is the unit every aggregate is computed over. It is immutable after
/// creation and carries a [`SimulationId`] so aggregates can be cached per
/// simulation without hashing its contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "SimulationRepr")]
pub struct BingoSimulation {
    #[serde(skip_serializing)]
    id: SimulationId,
    player_count: usize,
    games: Vec<BingoGame>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SimulationRepr {
    player_count: usize,
    games: Vec<BingoGame>,
}

impl TryFrom<SimulationRepr> for BingoSimulation {
    type Error = SimulationError;

    fn try_from(repr: SimulationRepr) -> Result<Self, Self::Error> {
        Self::from_games(repr.player_count, repr.games)
    }
}

impl BingoSimulation {
    /// Generates `num_games` games of `num_players` players each.
    ///
    /// Both counts must be at least 1.
    pub fn generate<R>(
        num_games: usize,
        num_players: usize,
        rng: &mut R,
    ) -> Result<Self, SimulationError>
    where
        R: Rng + ?Sized,
    {
        if num_games == 0 {
            return Err(SimulationError::ZeroGames);
        }
        let players = NonZeroUsize::new(num_players).ok_or(SimulationError::ZeroPlayers)?;

        tracing::debug!(num_games, num_players, "generating bingo simulation");
        let games = (0..num_games)
            .map(|_| BingoGame::generate(players, rng))
            .collect();
        Ok(Self {
            id: SimulationId::fresh(),
            player_count: num_players,
            games,
        })
    }

    /// Like [`Self::generate`], driven by a [`Pcg32`] built from `seed`.
    pub fn with_seed(
        num_games: usize,
        num_players: usize,
        seed: SimulationSeed,
    ) -> Result<Self, SimulationError> {
        Self::generate(num_games, num_players, &mut seed.rng())
    }

    /// Wraps existing games, checking that each has `player_count` cards.
    pub fn from_games(player_count: usize, games: Vec<BingoGame>) -> Result<Self, SimulationError> {
        if games.is_empty() {
            return Err(SimulationError::ZeroGames);
        }
        if player_count == 0 {
            return Err(SimulationError::ZeroPlayers);
        }
        if let Some((game, found)) = games
            .iter()
            .map(BingoGame::num_players)
            .enumerate()
            .find(|&(_, found)| found != player_count)
        {
            return Err(SimulationError::PlayerCountMismatch {
                game,
                expected: player_count,
                found,
            });
        }
        Ok(Self {
            id: SimulationId::fresh(),
            player_count,
            games,
        })
    }

    #[must_use]
    pub fn id(&self) -> SimulationId {
        self.id
    }

    #[must_use]
    pub fn games(&self) -> &[BingoGame] {
        &self.games
    }

    #[must_use]
    pub fn num_games(&self) -> usize {
        self.games.len()
    }

    #[must_use]
    pub fn num_players(&self) -> usize {
        self.player_count
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;

    use super::*;

    fn seed_from_bytes(bytes: [u8; 16]) -> SimulationSeed {
        SimulationSeed::from_bytes(bytes)
    }

    #[test]
    fn test_generate_rejects_zero_counts() {
        let mut rng = Pcg32::seed_from_u64(0);
        assert_eq!(
            BingoSimulation::generate(0, 4, &mut rng).unwrap_err(),
            SimulationError::ZeroGames
        );
        assert_eq!(
            BingoSimulation::generate(4, 0, &mut rng).unwrap_err(),
            SimulationError::ZeroPlayers
        );
    }

    #[test]
    fn test_generate_shape() {
        let mut rng = Pcg32::seed_from_u64(5);
        let simulation = BingoSimulation::generate(20, 3, &mut rng).unwrap();
        assert_eq!(simulation.num_games(), 20);
        assert_eq!(simulation.num_players(), 3);
        assert!(simulation.games().iter().all(|g| g.num_players() == 3));
    }

    #[test]
    fn test_same_seed_same_simulation() {
        let seed = seed_from_bytes([
            0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE, 0xF0, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66,
            0x77, 0x88,
        ]);
        let a = BingoSimulation::with_seed(15, 4, seed).unwrap();
        let b = BingoSimulation::with_seed(15, 4, seed).unwrap();
        assert_ne!(a.id(), b.id());
        for (ga, gb) in a.games().iter().zip(b.games()) {
            assert_eq!(ga.cards(), gb.cards());
            assert_eq!(ga.draws(), gb.draws());
        }
    }

    #[test]
    fn test_from_games_checks_player_count() {
        let mut rng = Pcg32::seed_from_u64(6);
        let games = vec![
            BingoGame::generate(NonZeroUsize::new(2).unwrap(), &mut rng),
            BingoGame::generate(NonZeroUsize::new(3).unwrap(), &mut rng),
        ];
        assert_eq!(
            BingoSimulation::from_games(2, games).unwrap_err(),
            SimulationError::PlayerCountMismatch {
                game: 1,
                expected: 2,
                found: 3
            }
        );
        assert_eq!(
            BingoSimulation::from_games(2, vec![]).unwrap_err(),
            SimulationError::ZeroGames
        );
    }

    #[test]
    fn test_serde_roundtrip() {
        let simulation = BingoSimulation::with_seed(3, 2, seed_from_bytes([7; 16])).unwrap();
        let json = serde_json::to_string(&simulation).unwrap();
        assert!(json.starts_with(r#"{"playerCount":2,"games":["#));

        let parsed: BingoSimulation = serde_json::from_str(&json).unwrap();
        assert_ne!(parsed.id(), simulation.id());
        assert_eq!(parsed.num_games(), 3);
        assert_eq!(parsed.games()[2].draws(), simulation.games()[2].draws());
    }

    mod seed_serialization {
        use super::*;

        #[test]
        fn test_roundtrip_random_seed() {
            let seed: SimulationSeed = rand::rng().random();
            let serialized = serde_json::to_string(&seed).unwrap();
            let deserialized: SimulationSeed = serde_json::from_str(&serialized).unwrap();
            assert_eq!(seed, deserialized);
        }

        #[test]
        fn test_known_value_sequential_bytes() {
            let seed = seed_from_bytes([
                0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
                0x32, 0x10,
            ]);
            let serialized = serde_json::to_string(&seed).unwrap();
            assert_eq!(serialized, "\"0123456789abcdeffedcba9876543210\"");
            assert_eq!(seed.to_string(), "0123456789abcdeffedcba9876543210");
        }

        #[test]
        fn test_parse_accepts_uppercase() {
            let seed: SimulationSeed = "0123456789ABCDEFFEDCBA9876543210".parse().unwrap();
            assert_eq!(seed.to_string(), "0123456789abcdeffedcba9876543210");
        }

        #[test]
        fn test_parse_rejects_bad_input() {
            for input in [
                "",
                "0123456789abcdef0123456789abcde",
                "0123456789abcdef0123456789abcdef0",
                "ghijklmnopqrstuvwxyzghijklmnopqr",
            ] {
                let err = input.parse::<SimulationSeed>().unwrap_err();
                assert!(err.to_string().contains("invalid hex"), "{input}");
            }
            let err = serde_json::from_str::<SimulationSeed>("\"abc\"").unwrap_err();
            assert!(err.to_string().contains("invalid hex"));
        }
    }
}
