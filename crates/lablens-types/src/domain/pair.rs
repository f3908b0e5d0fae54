use serde::{Deserialize, Serialize};
use std::fmt;

/// Unordered pair identifier: the two names stored in sorted order.
///
/// `PairKey::new("B", "A") == PairKey::new("A", "B")`, so a map keyed by
/// `PairKey` holds one counter per unordered pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey(String, String);

impl PairKey {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b { Self(a, b) } else { Self(b, a) }
    }

    pub fn first(&self) -> &str {
        &self.0
    }

    pub fn second(&self) -> &str {
        &self.1
    }

    pub fn is_self_pair(&self) -> bool {
        self.0 == self.1
    }

    pub fn contains(&self, entity: &str) -> bool {
        self.0 == entity || self.1 == entity
    }

    pub fn into_parts(self) -> (String, String) {
        (self.0, self.1)
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}}}", self.0, self.1)
    }
}

/// How often two entities were seen in the same session
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CoOccurrencePair {
    pub entity_a: String,
    pub entity_b: String,
    pub frequency: u64,
}

impl CoOccurrencePair {
    /// Build a pair in canonical order (`entity_a <= entity_b`)
    pub fn new(a: impl Into<String>, b: impl Into<String>, frequency: u64) -> Self {
        Self::from_key(PairKey::new(a, b), frequency)
    }

    pub fn from_key(key: PairKey, frequency: u64) -> Self {
        let (entity_a, entity_b) = key.into_parts();
        Self {
            entity_a,
            entity_b,
            frequency,
        }
    }

    /// Canonical key, recomputed so pairs built by hand with swapped names
    /// still land on the same key.
    pub fn key(&self) -> PairKey {
        PairKey::new(self.entity_a.as_str(), self.entity_b.as_str())
    }
}

/// Which record field supplies the entities being paired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityField {
    #[default]
    TestName,
    ServiceUnit,
}

/// How records are grouped into sessions before pairing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKey {
    /// Same subject on the same calendar date
    #[default]
    SubjectDay,
    /// Same subject, any date
    Subject,
}
