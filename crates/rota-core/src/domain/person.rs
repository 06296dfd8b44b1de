//! People and rosters.

use std::collections::HashSet;
use std::fmt;

use crate::error::{Result, RotaError};

/// Opaque identifier of a person on the roster.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PersonId(String);

impl PersonId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PersonId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PersonId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A person with display metadata.
///
/// Only `id` takes part in the model; `name` and `symbol` are carried for
/// rendering collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub symbol: String,
}

impl Person {
    /// Creates a person whose display name is its id.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id: PersonId(id),
            symbol: String::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }
}

/// The fixed, ordered set of people a rotation is built over.
///
/// # Example
///
/// ```
/// use rota_core::{Person, Roster};
///
/// let roster = Roster::new(vec![Person::new("A"), Person::new("B"), Person::new("C")]).unwrap();
/// assert_eq!(roster.len(), 3);
/// assert_eq!(roster.pair_count(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    people: Vec<Person>,
}

impl Roster {
    /// Minimum roster size for pairing to be meaningful.
    pub const MIN_PEOPLE: usize = 3;

    /// Creates a roster, rejecting duplicates and rosters under `MIN_PEOPLE`.
    pub fn new(people: Vec<Person>) -> Result<Self> {
        if people.len() < Self::MIN_PEOPLE {
            return Err(RotaError::Config(format!(
                "roster needs at least {} people, got {}",
                Self::MIN_PEOPLE,
                people.len()
            )));
        }
        let mut seen = HashSet::new();
        for person in &people {
            if !seen.insert(&person.id) {
                return Err(RotaError::Config(format!(
                    "duplicate person id '{}'",
                    person.id
                )));
            }
        }
        Ok(Self { people })
    }

    /// Creates a roster from bare ids.
    pub fn from_ids<I, S>(ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(ids.into_iter().map(Person::new).collect())
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    /// Returns the person ids in roster order.
    pub fn ids(&self) -> Vec<PersonId> {
        self.people.iter().map(|p| p.id.clone()).collect()
    }

    pub fn get(&self, id: &PersonId) -> Option<&Person> {
        self.people.iter().find(|p| &p.id == id)
    }

    pub fn contains(&self, id: &PersonId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Returns C(P, 2), the number of distinct pairs.
    pub fn pair_count(&self) -> usize {
        let n = self.people.len();
        n * (n - 1) / 2
    }
}
