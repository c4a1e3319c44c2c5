//! Evaluation-scoped element values keyed by label.

use std::collections::HashMap;

use crate::math::Scalar;

use super::component::Value;

/// Values that temporarily replace stored element values during one call.
///
/// Keys are full element labels (`R1`, `Lt`, `Cp`). Keys that match no element
/// are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    values: HashMap<String, Scalar>,
}

impl Overrides {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value for `label`, replacing any previous one.
    #[must_use]
    pub fn with(mut self, label: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(label, value);
        self
    }

    /// Inserts a value for `label`, returning the previous value if any.
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<Value>) -> Option<Scalar> {
        self.values.insert(label.into(), value.into().as_scalar())
    }

    /// Value registered for `label`.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<Scalar> {
        self.values.get(label).copied()
    }

    /// Number of registered labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true when no values are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Overrides
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut overrides = Self::new();
        for (label, value) in iter {
            overrides.insert(label, value);
        }
        overrides
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Overrides
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}
