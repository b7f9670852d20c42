//! Test tiers.
//!
//! A tier scopes which fixtures a run seeds and which specs it exercises:
//! `A` is the smoke/PR suite, `B` the default regression suite, `C` the full
//! suite. Fixture data conventionally nests them (C ⊇ B ⊇ A) but nothing here
//! enforces that.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Error returned when a tier token cannot be parsed.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid tier '{0}': expected A, B or C")]
pub struct TierError(pub String);

/// One of the three test-suite scopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum Tier {
    /// Smoke tests run on every pull request.
    A,
    /// Regression suite, the default when no tier is given.
    #[default]
    B,
    /// Full suite.
    C,
}

impl Tier {
    /// All tiers in ascending order.
    pub const ALL: [Self; 3] = [Self::A, Self::B, Self::C];
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
            Self::C => write!(f, "C"),
        }
    }
}

impl std::str::FromStr for Tier {
    type Err = TierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(Self::A),
            "B" | "b" => Ok(Self::B),
            "C" | "c" => Ok(Self::C),
            other => Err(TierError(other.to_owned())),
        }
    }
}

/// The set of tiers a fixture belongs to.
///
/// Serialized as a list (`["A", "B", "C"]`). Membership is not exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierSet(BTreeSet<Tier>);

impl TierSet {
    /// Build a set from the given tiers.
    #[must_use]
    pub fn new(tiers: impl IntoIterator<Item = Tier>) -> Self {
        Self(tiers.into_iter().collect())
    }

    /// Whether `tier` is a member.
    #[must_use]
    pub fn contains(&self, tier: Tier) -> bool {
        self.0.contains(&tier)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate members in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = Tier> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Tier> for TierSet {
    fn from_iter<I: IntoIterator<Item = Tier>>(iter: I) -> Self {
        Self::new(iter)
    }
}
