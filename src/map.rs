//! Map and set containers for SURF documents.
//!
//! [`SurfMap`] and [`SurfSet`] wrap [`IndexMap`] and [`IndexSet`]. Iteration
//! follows insertion order, which keeps rendered output stable from one run to
//! the next, but equality ignores order: two sets (or maps) with the same
//! members are equal whatever order they were built in. Callers must not rely
//! on the order of set members.
//!
//! ## Examples
//!
//! ```rust
//! use surf_writer::{SurfMap, SurfSet, SurfValue};
//!
//! let mut map = SurfMap::new();
//! map.insert(SurfValue::from("name"), SurfValue::from("Alice"));
//! map.insert(SurfValue::from(1), SurfValue::from("one"));
//! assert_eq!(map.len(), 2);
//!
//! let set: SurfSet = ["a", "b", "a"].into_iter().map(SurfValue::from).collect();
//! assert_eq!(set.len(), 2);
//! ```

use crate::SurfValue;
use indexmap::{IndexMap, IndexSet};
use std::hash::{Hash, Hasher};

/// A map from SURF values to SURF values.
///
/// Keys may be any value; the transformer only ever produces native keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurfMap(IndexMap<SurfValue, SurfValue>);

impl SurfMap {
    #[must_use]
    pub fn new() -> Self {
        SurfMap(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        SurfMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the value is replaced in place and
    /// the old value is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use surf_writer::{SurfMap, SurfValue};
    ///
    /// let mut map = SurfMap::new();
    /// assert!(map.insert(SurfValue::from("key"), SurfValue::from(42)).is_none());
    /// assert!(map.insert(SurfValue::from("key"), SurfValue::from(43)).is_some());
    /// ```
    pub fn insert(&mut self, key: SurfValue, value: SurfValue) -> Option<SurfValue> {
        self.0.insert(key, value)
    }

    #[must_use]
    pub fn get(&self, key: &SurfValue) -> Option<&SurfValue> {
        self.0.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, SurfValue, SurfValue> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, SurfValue, SurfValue> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, SurfValue, SurfValue> {
        self.0.iter()
    }
}

// Equal maps may iterate in different orders, so only the size is hashed.
impl Hash for SurfMap {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.len().hash(state);
    }
}

impl IntoIterator for SurfMap {
    type Item = (SurfValue, SurfValue);
    type IntoIter = indexmap::map::IntoIter<SurfValue, SurfValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a SurfMap {
    type Item = (&'a SurfValue, &'a SurfValue);
    type IntoIter = indexmap::map::Iter<'a, SurfValue, SurfValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(SurfValue, SurfValue)> for SurfMap {
    fn from_iter<T: IntoIterator<Item = (SurfValue, SurfValue)>>(iter: T) -> Self {
        SurfMap(IndexMap::from_iter(iter))
    }
}

/// An unordered collection of distinct SURF values.
///
/// Uniqueness is by value equality ([`SurfValue`]'s `Eq`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurfSet(IndexSet<SurfValue>);

impl SurfSet {
    #[must_use]
    pub fn new() -> Self {
        SurfSet(IndexSet::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        SurfSet(IndexSet::with_capacity(capacity))
    }

    /// Adds a value, returning `false` if an equal value was already present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use surf_writer::{SurfSet, SurfValue};
    ///
    /// let mut set = SurfSet::new();
    /// assert!(set.insert(SurfValue::from(1)));
    /// assert!(!set.insert(SurfValue::from(1)));
    /// ```
    pub fn insert(&mut self, value: SurfValue) -> bool {
        self.0.insert(value)
    }

    #[must_use]
    pub fn contains(&self, value: &SurfValue) -> bool {
        self.0.contains(value)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> indexmap::set::Iter<'_, SurfValue> {
        self.0.iter()
    }
}

// Same reasoning as for `SurfMap`: hashing members would depend on order.
impl Hash for SurfSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.len().hash(state);
    }
}

impl IntoIterator for SurfSet {
    type Item = SurfValue;
    type IntoIter = indexmap::set::IntoIter<SurfValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a SurfSet {
    type Item = &'a SurfValue;
    type IntoIter = indexmap::set::Iter<'a, SurfValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<SurfValue> for SurfSet {
    fn from_iter<T: IntoIterator<Item = SurfValue>>(iter: T) -> Self {
        SurfSet(IndexSet::from_iter(iter))
    }
}
