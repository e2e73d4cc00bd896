use serde::{Deserialize, Serialize};

/// A single item or an ordered sequence of items.
///
/// Deserializes untagged, so `"a"` and `["a", "b"]` both parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    /// Always a sequence; an existing `Vec` is moved out without copying.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(items: Vec<T>) -> Self {
        OneOrMany::Many(items)
    }
}

/// Normalize a single item or a sequence into a sequence
pub fn as_array<T>(value: OneOrMany<T>) -> Vec<T> {
    value.into_vec()
}
