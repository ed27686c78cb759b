//! Key-value store facade
//!
//! A [`Store`] presents a data source as a read-only mapping from string keys
//! to values. Backends ([`Files`], [`ZipFiles`]) hand out raw bytes, and the
//! wrappers in [`wrappers`] reshape keys and values on the way out.

pub mod archive;
pub mod files;
pub mod wrappers;

use std::collections::BTreeMap;

use crate::error::{Error, Result};

pub use archive::ZipFiles;
pub use files::Files;
pub use wrappers::{DecodedValues, FilteredKeys, MappedKeys};

/// A read-only mapping from string keys to values
pub trait Store {
    type Value;

    /// All keys, in lexicographic order
    fn keys(&self) -> Result<Vec<String>>;

    /// Look up a single value, failing with [`Error::KeyNotFound`] when absent
    fn get(&self, key: &str) -> Result<Self::Value>;

    fn contains_key(&self, key: &str) -> Result<bool> {
        Ok(self.keys()?.iter().any(|k| k == key))
    }

    fn len(&self) -> Result<usize> {
        Ok(self.keys()?.len())
    }

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Iterate over `(key, value)` pairs. Values are fetched lazily, so each
    /// one carries its own `Result`.
    fn items(&self) -> Result<Items<'_, Self>>
    where
        Self: Sized,
    {
        Ok(Items {
            store: self,
            keys: self.keys()?.into_iter(),
        })
    }

    fn values(&self) -> Result<Values<'_, Self>>
    where
        Self: Sized,
    {
        Ok(Values {
            items: self.items()?,
        })
    }
}

/// Combinators available on every store
pub trait StoreExt: Store + Sized {
    /// Keep only the keys accepted by `predicate`
    fn filter_keys<P>(self, predicate: P) -> FilteredKeys<Self, P>
    where
        P: Fn(&str) -> bool,
    {
        FilteredKeys::new(self, predicate)
    }

    /// Transform every value read from the store
    fn decode_values<D, V>(self, decoder: D) -> DecodedValues<Self, D, V>
    where
        D: Fn(Self::Value) -> Result<V>,
    {
        DecodedValues::new(self, decoder)
    }

    /// Present keys through `decoder` (for example, without their extension)
    fn map_keys<D>(self, decoder: D) -> MappedKeys<Self, D>
    where
        D: Fn(&str) -> String,
    {
        MappedKeys::new(self, decoder)
    }
}

impl<S: Store> StoreExt for S {}

/// Iterator over the `(key, value)` pairs of a store
pub struct Items<'a, S: ?Sized> {
    store: &'a S,
    keys: std::vec::IntoIter<String>,
}

impl<S: Store + ?Sized> Iterator for Items<'_, S> {
    type Item = (String, Result<S::Value>);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.keys.next()?;
        let value = self.store.get(&key);
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

/// Iterator over the values of a store
pub struct Values<'a, S: ?Sized> {
    items: Items<'a, S>,
}

impl<S: Store + ?Sized> Iterator for Values<'_, S> {
    type Item = Result<S::Value>;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl<S: Store + ?Sized> Store for &S {
    type Value = S::Value;

    fn keys(&self) -> Result<Vec<String>> {
        (**self).keys()
    }

    fn get(&self, key: &str) -> Result<Self::Value> {
        (**self).get(key)
    }

    fn contains_key(&self, key: &str) -> Result<bool> {
        (**self).contains_key(key)
    }
}

impl<S: Store + ?Sized> Store for Box<S> {
    type Value = S::Value;

    fn keys(&self) -> Result<Vec<String>> {
        (**self).keys()
    }

    fn get(&self, key: &str) -> Result<Self::Value> {
        (**self).get(key)
    }

    fn contains_key(&self, key: &str) -> Result<bool> {
        (**self).contains_key(key)
    }
}

/// In-memory store, handy for composing wrappers without touching the disk
impl<V: Clone> Store for BTreeMap<String, V> {
    type Value = V;

    fn keys(&self) -> Result<Vec<String>> {
        Ok(BTreeMap::keys(self).cloned().collect())
    }

    fn get(&self, key: &str) -> Result<V> {
        BTreeMap::get(self, key)
            .cloned()
            .ok_or_else(|| Error::KeyNotFound(key.to_string()))
    }

    fn contains_key(&self, key: &str) -> Result<bool> {
        Ok(BTreeMap::contains_key(self, key))
    }
}
