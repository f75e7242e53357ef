//! Facet types and the oracle that hands them out.
//!
//! The set of types is closed: [`FacetType::ALL`] is the single declaration,
//! and everything else (count, index mapping, random selection) is derived
//! from it.
//!
//! Randomness never lives inside the geometry. Code that needs a fresh type
//! asks a [`TypeOracle`] passed in by the caller, so tests can pin the
//! outcome with a seed or a fixed oracle.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The color of a facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum FacetType {
    #[default]
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
}

impl FacetType {
    /// Every facet type, in index order.
    pub const ALL: [Self; 6] = [
        Self::Red,
        Self::Orange,
        Self::Yellow,
        Self::Green,
        Self::Blue,
        Self::Purple,
    ];

    /// Number of distinct facet types.
    pub const fn count() -> usize {
        Self::ALL.len()
    }

    /// Position of this type in [`FacetType::ALL`].
    pub fn index(self) -> usize {
        // ALL is declared in discriminant order.
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// One-byte form of [`FacetType::index`], as stored on disk.
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::from_index(usize::from(code))
    }
}

// Every index must fit the one-byte stored form.
const _: () = assert!(FacetType::count() <= u8::MAX as usize + 1);

impl std::fmt::Display for FacetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Purple => "purple",
        };
        f.write_str(name)
    }
}

/// Source of facet types.
pub trait TypeOracle {
    /// Pick a type for a facet.
    fn random_type(&mut self) -> FacetType;
}

impl<T: TypeOracle + ?Sized> TypeOracle for &mut T {
    fn random_type(&mut self) -> FacetType {
        (**self).random_type()
    }
}

impl<T: TypeOracle + ?Sized> TypeOracle for Box<T> {
    fn random_type(&mut self) -> FacetType {
        (**self).random_type()
    }
}

/// Uniform selection over [`FacetType::ALL`].
#[derive(Debug, Clone)]
pub struct RandomOracle<R = StdRng> {
    rng: R,
}

impl RandomOracle<StdRng> {
    /// Deterministic oracle: the same seed yields the same sequence.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl<R: Rng> RandomOracle<R> {
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> TypeOracle for RandomOracle<R> {
    fn random_type(&mut self) -> FacetType {
        FacetType::ALL[self.rng.gen_range(0..FacetType::count())]
    }
}

/// Always answers the same type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedOracle(pub FacetType);

impl TypeOracle for FixedOracle {
    fn random_type(&mut self) -> FacetType {
        self.0
    }
}

/// Walks [`FacetType::ALL`] round robin.
#[derive(Debug, Clone, Default)]
pub struct CycleOracle {
    next: usize,
}

impl CycleOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(facet_type: FacetType) -> Self {
        Self {
            next: facet_type.index(),
        }
    }
}

impl TypeOracle for CycleOracle {
    fn random_type(&mut self) -> FacetType {
        let t = FacetType::ALL[self.next % FacetType::count()];
        self.next = (self.next + 1) % FacetType::count();
        t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_follows_declaration() {
        assert_eq!(FacetType::count(), FacetType::ALL.len());
        assert_eq!(FacetType::count(), 6);
    }

    #[test]
    fn index_round_trip() {
        for (i, t) in FacetType::ALL.iter().enumerate() {
            assert_eq!(t.index(), i);
            assert_eq!(FacetType::from_index(i), Some(*t));
        }
        assert_eq!(FacetType::from_index(FacetType::count()), None);
    }

    #[test]
    fn code_matches_index() {
        for t in FacetType::ALL {
            assert_eq!(usize::from(t.code()), t.index());
            assert_eq!(FacetType::from_code(t.code()), Some(t));
        }
        assert_eq!(FacetType::from_code(u8::MAX), None);
    }

    #[test]
    fn seeded_oracle_is_deterministic() {
        let mut a = RandomOracle::seeded(7);
        let mut b = RandomOracle::seeded(7);

        let left: Vec<_> = (0..64).map(|_| a.random_type()).collect();
        let right: Vec<_> = (0..64).map(|_| b.random_type()).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn random_oracle_covers_every_type() {
        let mut oracle = RandomOracle::seeded(1);
        let mut seen = [false; FacetType::count()];

        for _ in 0..1000 {
            seen[oracle.random_type().index()] = true;
        }
        assert!(seen.iter().all(|&s| s), "not every type drawn: {:?}", seen);
    }

    #[test]
    fn cycle_oracle_wraps() {
        let mut oracle = CycleOracle::starting_at(FacetType::Blue);
        assert_eq!(oracle.random_type(), FacetType::Blue);
        assert_eq!(oracle.random_type(), FacetType::Purple);
        assert_eq!(oracle.random_type(), FacetType::Red);
    }

    #[test]
    fn oracle_through_mutable_reference() {
        fn draw<O: TypeOracle>(mut oracle: O) -> FacetType {
            oracle.random_type()
        }

        let mut fixed = FixedOracle(FacetType::Green);
        assert_eq!(draw(&mut fixed), FacetType::Green);
    }
}
