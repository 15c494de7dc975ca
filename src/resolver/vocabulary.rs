use serde::{Deserialize, Serialize};

/// The menu the shop serves when nothing else is configured.
pub const DEFAULT_MENU: &[&str] = &[
    "Caffe Americano",
    "Caffe Mocha",
    "Caffe Latte",
    "Cappuccino",
    "Caramel Macchiato",
    "Espresso",
];

/// Immutable, ordered list of canonical item names.
///
/// Order matters: when two entries are equally close to a query the earlier
/// one wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vocabulary(Vec<String>);

impl Vocabulary {
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(items.into_iter().map(Into::into).collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_MENU.iter().copied())
    }
}
