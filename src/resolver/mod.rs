//! # Fuzzy order-name resolution
//!
//! Maps free text onto a fixed [`Vocabulary`] using [`edit_distance`].
//!
//! The policy is deliberately split into two passes so the tie-break can be
//! tested on its own:
//!
//! 1. [`score`] computes the distance of every vocabulary entry, in order.
//! 2. [`select`] drops everything above the threshold and keeps the strictly
//!    smallest distance. On ties the earliest entry wins.
//!
//! ```
//! use order_queue::resolver::{resolve, Resolution};
//!
//! let menu = ["Cappuccino", "Espresso"];
//! assert_eq!(resolve("Capuccino", &menu, 3), Resolution::Match("Cappuccino".into()));
//! assert_eq!(resolve("Xyzzyx", &menu, 3), Resolution::NoMatch);
//! ```

pub mod distance;
pub mod vocabulary;

pub use distance::edit_distance;
pub use vocabulary::*;

/// Default maximum edit distance a query may be from its match.
pub const DEFAULT_THRESHOLD: usize = 3;

/// Outcome of resolving a free-text query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The canonical vocabulary entry the query resolved to.
    Match(String),
    /// No entry is within the threshold.
    NoMatch,
}

impl Resolution {
    pub fn is_match(&self) -> bool {
        matches!(self, Resolution::Match(_))
    }

    pub fn into_option(self) -> Option<String> {
        match self {
            Resolution::Match(name) => Some(name),
            Resolution::NoMatch => None,
        }
    }
}

/// A vocabulary entry paired with its distance from the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub name: &'a str,
    pub distance: usize,
}

/// First pass: distance of every entry, in vocabulary order.
pub fn score<'a, S: AsRef<str>>(query: &str, vocabulary: &'a [S]) -> Vec<Candidate<'a>> {
    vocabulary
        .iter()
        .map(|entry| {
            let name = entry.as_ref();
            Candidate {
                name,
                distance: edit_distance(name, query),
            }
        })
        .collect()
}

/// Second pass: best candidate within `threshold`, earliest on ties.
pub fn select(candidates: &[Candidate<'_>], threshold: usize) -> Resolution {
    // min_by_key returns the first of several equal minima
    candidates
        .iter()
        .filter(|c| c.distance <= threshold)
        .min_by_key(|c| c.distance)
        .map(|c| Resolution::Match(c.name.to_string()))
        .unwrap_or(Resolution::NoMatch)
}

/// Resolves `query` against `vocabulary`.
pub fn resolve<S: AsRef<str>>(query: &str, vocabulary: &[S], threshold: usize) -> Resolution {
    select(&score(query, vocabulary), threshold)
}

/// A vocabulary bound to a threshold.
///
/// Holds no mutable state, so one instance can be shared freely between callers.
#[derive(Debug, Clone)]
pub struct Resolver {
    vocabulary: Vocabulary,
    threshold: usize,
}

impl Resolver {
    pub fn new(vocabulary: Vocabulary, threshold: usize) -> Self {
        Self { vocabulary, threshold }
    }

    pub fn resolve(&self, query: &str) -> Resolution {
        resolve(query, self.vocabulary.as_slice(), self.threshold)
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(Vocabulary::default(), DEFAULT_THRESHOLD)
    }
}
