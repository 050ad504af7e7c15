//! Named objects: the SURF counterpart of a record.
//!
//! A [`SurfObject`] carries the type name of the value it was made from and an
//! [`IndexMap`] of properties. Properties keep the order in which they were
//! first set, which for transformed records is the order the record reports
//! them in.

use crate::SurfValue;
use indexmap::IndexMap;
use std::hash::{Hash, Hasher};

/// A named generic record with ordered properties.
///
/// There is no way to store an absent property value: a property is either
/// present with a [`SurfValue`] or not present at all.
///
/// # Examples
///
/// ```rust
/// use surf_writer::{SurfObject, SurfValue};
///
/// let mut object = SurfObject::new("Simple");
/// object.set_property("foo", "foo");
/// object.set_property("bar", "bar");
///
/// let names: Vec<_> = object.property_names().collect();
/// assert_eq!(names, vec!["foo", "bar"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfObject {
    type_name: String,
    properties: IndexMap<String, SurfValue>,
}

impl SurfObject {
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        SurfObject {
            type_name: type_name.into(),
            properties: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_capacity(type_name: impl Into<String>, capacity: usize) -> Self {
        SurfObject {
            type_name: type_name.into(),
            properties: IndexMap::with_capacity(capacity),
        }
    }

    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Sets a property, returning the value it replaced.
    ///
    /// Setting a name a second time replaces the value but keeps the property
    /// at its original position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use surf_writer::{SurfObject, SurfValue};
    ///
    /// let mut object = SurfObject::new("Point");
    /// object.set_property("x", 1);
    /// object.set_property("y", 2);
    /// assert_eq!(object.set_property("x", 3), Some(SurfValue::from(1)));
    ///
    /// let names: Vec<_> = object.property_names().collect();
    /// assert_eq!(names, vec!["x", "y"]);
    /// ```
    pub fn set_property(
        &mut self,
        name: impl Into<String>,
        value: impl Into<SurfValue>,
    ) -> Option<SurfValue> {
        self.properties.insert(name.into(), value.into())
    }

    #[must_use]
    pub fn property(&self, name: &str) -> Option<&SurfValue> {
        self.properties.get(name)
    }

    pub fn remove_property(&mut self, name: &str) -> Option<SurfValue> {
        self.properties.shift_remove(name)
    }

    #[must_use]
    pub fn has_property(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    #[must_use]
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Property names in order.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    /// Returns an iterator over the properties, in order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, SurfValue> {
        self.properties.iter()
    }
}

impl Hash for SurfObject {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_name.hash(state);
        self.properties.len().hash(state);
    }
}

impl<'a> IntoIterator for &'a SurfObject {
    type Item = (&'a String, &'a SurfValue);
    type IntoIter = indexmap::map::Iter<'a, String, SurfValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.iter()
    }
}
