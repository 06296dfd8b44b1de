//! Unordered pairs of people.

use std::fmt;

use super::person::PersonId;
use crate::error::{Result, RotaError};

/// An unordered pair of two distinct people.
///
/// The members are stored in sorted order, so `{X, Y}` and `{Y, X}` compare,
/// hash and serialize identically.
///
/// # Example
///
/// ```
/// use rota_core::{Pair, PersonId};
///
/// let a = Pair::new("M", "C").unwrap();
/// let b = Pair::new("C", "M").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.first(), &PersonId::from("C"));
/// assert!(Pair::new("C", "C").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(into = "(PersonId, PersonId)", try_from = "(PersonId, PersonId)")
)]
pub struct Pair {
    first: PersonId,
    second: PersonId,
}

impl Pair {
    /// Creates the canonical pair of two distinct people.
    pub fn new(a: impl Into<PersonId>, b: impl Into<PersonId>) -> Result<Self> {
        let (a, b) = (a.into(), b.into());
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Ok(Self { first: a, second: b }),
            std::cmp::Ordering::Greater => Ok(Self { first: b, second: a }),
            std::cmp::Ordering::Equal => Err(RotaError::InvalidPair(a.to_string())),
        }
    }

    pub fn first(&self) -> &PersonId {
        &self.first
    }

    pub fn second(&self) -> &PersonId {
        &self.second
    }

    pub fn contains(&self, person: &PersonId) -> bool {
        &self.first == person || &self.second == person
    }

    /// Returns the other member of the pair, if `person` is a member.
    pub fn partner_of(&self, person: &PersonId) -> Option<&PersonId> {
        if &self.first == person {
            Some(&self.second)
        } else if &self.second == person {
            Some(&self.first)
        } else {
            None
        }
    }

    pub fn members(&self) -> [&PersonId; 2] {
        [&self.first, &self.second]
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.first, self.second)
    }
}

impl From<Pair> for (PersonId, PersonId) {
    fn from(pair: Pair) -> Self {
        (pair.first, pair.second)
    }
}

impl TryFrom<(PersonId, PersonId)> for Pair {
    type Error = RotaError;

    fn try_from((a, b): (PersonId, PersonId)) -> Result<Self> {
        Pair::new(a, b)
    }
}

/// Returns every pair over `people`, in combination order of the input.
///
/// Duplicate ids in `people` are skipped.
pub fn all_pairs(people: &[PersonId]) -> Vec<Pair> {
    let mut pairs = Vec::with_capacity(people.len() * people.len().saturating_sub(1) / 2);
    for (i, a) in people.iter().enumerate() {
        for b in &people[i + 1..] {
            if let Ok(pair) = Pair::new(a.clone(), b.clone()) {
                pairs.push(pair);
            }
        }
    }
    pairs
}
