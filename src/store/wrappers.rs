//! Store wrappers
//!
//! Each wrapper owns an inner store and changes one thing about it: which keys
//! are visible, what values look like, or how keys are spelled.

use std::collections::HashSet;
use std::fmt;
use std::marker::PhantomData;

use super::Store;
use crate::error::{Error, Result};

/// A store restricted to the keys accepted by a predicate
///
/// Filtered-out keys behave as if they do not exist: `get` fails with
/// [`Error::KeyNotFound`] and `contains_key` returns `false`.
#[derive(Clone)]
pub struct FilteredKeys<S, P> {
    inner: S,
    predicate: P,
}

impl<S, P> FilteredKeys<S, P>
where
    S: Store,
    P: Fn(&str) -> bool,
{
    pub fn new(inner: S, predicate: P) -> Self {
        Self { inner, predicate }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S, P> Store for FilteredKeys<S, P>
where
    S: Store,
    P: Fn(&str) -> bool,
{
    type Value = S::Value;

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys = self.inner.keys()?;
        keys.retain(|key| (self.predicate)(key));
        Ok(keys)
    }

    fn get(&self, key: &str) -> Result<Self::Value> {
        if !(self.predicate)(key) {
            tracing::trace!("Key {} filtered out", key);
            return Err(Error::KeyNotFound(key.to_string()));
        }
        self.inner.get(key)
    }

    fn contains_key(&self, key: &str) -> Result<bool> {
        if !(self.predicate)(key) {
            return Ok(false);
        }
        self.inner.contains_key(key)
    }
}

impl<S: fmt::Debug, P> fmt::Debug for FilteredKeys<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilteredKeys")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

/// A store whose values are passed through a decoder on the way out
pub struct DecodedValues<S, D, V> {
    inner: S,
    decoder: D,
    _value: PhantomData<fn() -> V>,
}

impl<S, D, V> DecodedValues<S, D, V>
where
    S: Store,
    D: Fn(S::Value) -> Result<V>,
{
    pub fn new(inner: S, decoder: D) -> Self {
        Self {
            inner,
            decoder,
            _value: PhantomData,
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S, D, V> Store for DecodedValues<S, D, V>
where
    S: Store,
    D: Fn(S::Value) -> Result<V>,
{
    type Value = V;

    fn keys(&self) -> Result<Vec<String>> {
        self.inner.keys()
    }

    fn get(&self, key: &str) -> Result<V> {
        let raw = self.inner.get(key)?;
        (self.decoder)(raw).inspect_err(|e| tracing::warn!("Failed to decode {}: {}", key, e))
    }

    fn contains_key(&self, key: &str) -> Result<bool> {
        self.inner.contains_key(key)
    }
}

impl<S: Clone, D: Clone, V> Clone for DecodedValues<S, D, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            decoder: self.decoder.clone(),
            _value: PhantomData,
        }
    }
}

impl<S: fmt::Debug, D, V> fmt::Debug for DecodedValues<S, D, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodedValues")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

/// A store presenting its keys through a decoder
///
/// There is no encoder: looking up an outer key scans the inner keys for the
/// first one that decodes to it. When several inner keys decode to the same
/// outer key, the first in sorted order wins and the rest are hidden.
#[derive(Clone)]
pub struct MappedKeys<S, D> {
    inner: S,
    decoder: D,
}

impl<S, D> MappedKeys<S, D>
where
    S: Store,
    D: Fn(&str) -> String,
{
    pub fn new(inner: S, decoder: D) -> Self {
        Self { inner, decoder }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// The inner key that `key` stands for
    pub fn inner_key(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .inner
            .keys()?
            .into_iter()
            .find(|inner| (self.decoder)(inner) == key))
    }
}

impl<S, D> Store for MappedKeys<S, D>
where
    S: Store,
    D: Fn(&str) -> String,
{
    type Value = S::Value;

    fn keys(&self) -> Result<Vec<String>> {
        let mut seen = HashSet::new();
        let mut keys = Vec::new();
        for inner in self.inner.keys()? {
            let outer = (self.decoder)(&inner);
            if seen.insert(outer.clone()) {
                keys.push(outer);
            } else {
                tracing::debug!("Key {} shadowed by an earlier key mapping to {}", inner, outer);
            }
        }
        keys.sort();
        Ok(keys)
    }

    fn get(&self, key: &str) -> Result<Self::Value> {
        let inner = self
            .inner_key(key)?
            .ok_or_else(|| Error::KeyNotFound(key.to_string()))?;
        self.inner.get(&inner)
    }

    fn contains_key(&self, key: &str) -> Result<bool> {
        Ok(self.inner_key(key)?.is_some())
    }
}

impl<S: fmt::Debug, D> fmt::Debug for MappedKeys<S, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappedKeys")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}
