//! The object graph transformer.
//!
//! [`Transformer::transform`] walks a value depth-first and rebuilds it as a
//! [`SurfValue`]:
//!
//! - an absent value (`None`) yields no document;
//! - indirections (`Some`, `Box`, `Rc`, `Arc`) are looked through;
//! - sequences become lists, with element order kept;
//! - sets become sets, de-duplicated by value equality;
//! - maps become maps with transformed values; keys are rebuilt from their
//!   native leaves and containers, but a key is never decomposed as a record;
//! - native values are converted by the [`Classifier`];
//! - anything else is a record and becomes a [`SurfObject`] named after its
//!   simple type name, holding every property whose value is present.
//!
//! A document never contains a "no value" marker. Absent properties are left
//! out of their object, and absent sequence elements, set members and map
//! values are skipped.
//!
//! ## Examples
//!
//! ```rust
//! use surf_writer::{surf, surf_record, Transformer};
//!
//! struct Simple {
//!     foo: Option<String>,
//!     bar: Option<String>,
//! }
//!
//! surf_record!(Simple { foo, bar });
//!
//! let value = Simple { foo: Some("foo".to_string()), bar: None };
//! let document = Transformer::new().transform(&value).unwrap();
//! assert_eq!(document, Some(surf!(*Simple { "foo": "foo" })));
//! ```

use crate::classify::Classifier;
use crate::map::{SurfMap, SurfSet};
use crate::object::SurfObject;
use crate::options::TransformOptions;
use crate::reflect::{Kind, PropertyVisitor, Reflect};
use crate::{Error, Result, SurfValue};
use std::sync::Arc;
use tracing::{debug, trace};

/// Converts object graphs into SURF documents.
///
/// A transformer keeps no state between calls. It can be shared between
/// threads and used concurrently.
#[derive(Clone, Debug)]
pub struct Transformer {
    classifier: Arc<Classifier>,
    options: TransformOptions,
}

impl Transformer {
    /// Creates a transformer backed by [`Classifier::global`].
    #[must_use]
    pub fn new() -> Self {
        Transformer::with_classifier(Classifier::global())
    }

    #[must_use]
    pub fn with_classifier(classifier: Arc<Classifier>) -> Self {
        Transformer {
            classifier,
            options: TransformOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: TransformOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    #[must_use]
    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    /// Transforms `value` into a document.
    ///
    /// Returns `Ok(None)` when `value` is absent. Without a depth limit the
    /// walk follows the graph as deep as it goes, so a cyclic graph (built
    /// through `Rc` and interior mutability, say) does not terminate.
    ///
    /// Absent values are dropped wherever they sit. A `None` element is left
    /// out of its list, which makes the list shorter and moves every later
    /// element down one index. A `None` set member or map value is left out
    /// the same way.
    ///
    /// # Errors
    ///
    /// - [`Error::Introspection`] when a record fails to report a property;
    ///   the whole transformation fails and no partial document is returned.
    /// - [`Error::UnsupportedKey`] when a map key is, or contains, a value
    ///   that would have to be decomposed as a record.
    /// - [`Error::DepthLimitExceeded`] when
    ///   [`TransformOptions::max_depth`] is set and the graph is deeper.
    /// - Whatever a fallible classifier converter reports, such as
    ///   [`Error::UnsupportedValue`] for an out-of-range `SystemTime`.
    pub fn transform(&self, value: &dyn Reflect) -> Result<Option<SurfValue>> {
        debug!(root = value.type_name(), "transforming object graph");
        self.transform_at(value, 0)
    }

    fn transform_at(&self, value: &dyn Reflect, depth: usize) -> Result<Option<SurfValue>> {
        match value.kind() {
            Kind::Absent => Ok(None),
            Kind::Deref(inner) => self.transform_at(inner, depth),
            Kind::Sequence(elements) => {
                let depth = self.descend(depth)?;
                let mut list = Vec::new();
                for element in elements {
                    if let Some(element) = self.transform_at(element, depth)? {
                        list.push(element);
                    }
                }
                Ok(Some(SurfValue::List(list)))
            }
            Kind::Set(elements) => {
                let depth = self.descend(depth)?;
                let mut set = SurfSet::new();
                for element in elements {
                    if let Some(element) = self.transform_at(element, depth)? {
                        set.insert(element);
                    }
                }
                Ok(Some(SurfValue::Set(set)))
            }
            Kind::Map(entries) => {
                let depth = self.descend(depth)?;
                let mut map = SurfMap::new();
                for (key, value) in entries {
                    let key = self.transform_key(key)?;
                    if let Some(value) = self.transform_at(value, depth)? {
                        map.insert(key, value);
                    }
                }
                Ok(Some(SurfValue::Map(map)))
            }
            Kind::Value => match self.classifier.classify(value)? {
                Some(native) => Ok(Some(native)),
                None => {
                    let depth = self.descend(depth)?;
                    self.transform_record(value, depth).map(SurfValue::Object).map(Some)
                }
            },
        }
    }

    fn transform_key(&self, key: &dyn Reflect) -> Result<SurfValue> {
        self.transform_key_part(key)?
            .ok_or_else(|| Error::unsupported_key(key.type_name()))
    }

    // Containers inside a key are rebuilt; every leaf must be native.
    fn transform_key_part(&self, key: &dyn Reflect) -> Result<Option<SurfValue>> {
        match key.kind() {
            Kind::Absent => Ok(None),
            Kind::Deref(inner) => self.transform_key_part(inner),
            Kind::Sequence(elements) => {
                let mut list = Vec::new();
                for element in elements {
                    if let Some(element) = self.transform_key_part(element)? {
                        list.push(element);
                    }
                }
                Ok(Some(SurfValue::List(list)))
            }
            Kind::Set(elements) => {
                let mut set = SurfSet::new();
                for element in elements {
                    if let Some(element) = self.transform_key_part(element)? {
                        set.insert(element);
                    }
                }
                Ok(Some(SurfValue::Set(set)))
            }
            Kind::Map(entries) => {
                let mut map = SurfMap::new();
                for (inner_key, value) in entries {
                    let inner_key = self.transform_key(inner_key)?;
                    if let Some(value) = self.transform_key_part(value)? {
                        map.insert(inner_key, value);
                    }
                }
                Ok(Some(SurfValue::Map(map)))
            }
            Kind::Value => match self.classifier.classify(key)? {
                Some(native) => Ok(Some(native)),
                None => Err(Error::unsupported_key(key.type_name())),
            },
        }
    }

    fn transform_record(&self, record: &dyn Reflect, depth: usize) -> Result<SurfObject> {
        let mut builder = ObjectBuilder {
            transformer: self,
            object: SurfObject::new(record.type_name()),
            depth,
        };
        record.introspect(&mut builder)?;

        let object = builder.object;
        trace!(
            type_name = object.type_name(),
            properties = object.property_count(),
            depth,
            "transformed record"
        );
        Ok(object)
    }

    fn descend(&self, depth: usize) -> Result<usize> {
        let depth = depth + 1;
        match self.options.max_depth {
            Some(limit) if depth > limit => Err(Error::depth_limit_exceeded(limit)),
            _ => Ok(depth),
        }
    }
}

impl Default for Transformer {
    fn default() -> Self {
        Transformer::new()
    }
}

struct ObjectBuilder<'t> {
    transformer: &'t Transformer,
    object: SurfObject,
    depth: usize,
}

impl PropertyVisitor for ObjectBuilder<'_> {
    fn visit_property(&mut self, name: &str, value: &dyn Reflect) -> Result<()> {
        if let Some(value) = self.transformer.transform_at(value, self.depth)? {
            self.object.set_property(name, value);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Number;
    use std::any::Any;
    use std::collections::{BTreeMap, HashMap, HashSet};
    use std::error::Error as _;
    use std::rc::Rc;

    #[derive(Default)]
    struct SimpleFooBar {
        foo: Option<String>,
        bar: Option<String>,
    }

    impl Reflect for SimpleFooBar {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn introspect(&self, visitor: &mut dyn PropertyVisitor) -> Result<()> {
            visitor.visit_property("foo", &self.foo)?;
            visitor.visit_property("bar", &self.bar)
        }
    }

    struct ComplexFooBar {
        foo: Option<String>,
        bar: Option<SimpleFooBar>,
    }

    impl Reflect for ComplexFooBar {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn introspect(&self, visitor: &mut dyn PropertyVisitor) -> Result<()> {
            visitor.visit_property("foo", &self.foo)?;
            visitor.visit_property("bar", &self.bar)
        }
    }

    struct Failing;

    impl Reflect for Failing {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn introspect(&self, _visitor: &mut dyn PropertyVisitor) -> Result<()> {
            let cause = std::io::Error::new(std::io::ErrorKind::Other, "getter exploded");
            Err(Error::introspection_source("Failing", Some("value"), cause))
        }
    }

    #[derive(PartialEq, Eq, Hash, PartialOrd, Ord)]
    struct Tag(u8);

    impl Reflect for Tag {
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    struct Node {
        next: Option<Box<Node>>,
    }

    impl Reflect for Node {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn introspect(&self, visitor: &mut dyn PropertyVisitor) -> Result<()> {
            visitor.visit_property("next", &self.next)
        }
    }

    fn chain(length: usize) -> Node {
        let mut node = Node { next: None };
        for _ in 1..length {
            node = Node {
                next: Some(Box::new(node)),
            };
        }
        node
    }

    fn simple(foo: Option<&str>, bar: Option<&str>) -> SimpleFooBar {
        SimpleFooBar {
            foo: foo.map(str::to_string),
            bar: bar.map(str::to_string),
        }
    }

    fn transform(value: &dyn Reflect) -> Result<Option<SurfValue>> {
        Transformer::new().transform(value)
    }

    #[test]
    fn test_absent_root_is_no_document() {
        let root: Option<SimpleFooBar> = None;
        assert_eq!(transform(&root).unwrap(), None);
    }

    #[test]
    fn test_natives_pass_through() {
        assert_eq!(transform(&42i32).unwrap(), Some(SurfValue::from(42)));
        assert_eq!(transform(&"x").unwrap(), Some(SurfValue::from("x")));
        assert_eq!(
            transform(&Some(Box::new(2.5f64))).unwrap(),
            Some(SurfValue::Number(Number::Float(2.5)))
        );
    }

    #[test]
    fn test_record_with_all_properties() {
        let value = transform(&simple(Some("foo"), Some("bar"))).unwrap();
        let mut expected = SurfObject::new("SimpleFooBar");
        expected.set_property("foo", "foo");
        expected.set_property("bar", "bar");
        assert_eq!(value, Some(SurfValue::Object(expected)));
    }

    #[test]
    fn test_absent_properties_are_omitted() {
        let value = transform(&simple(Some("foo"), None)).unwrap().unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.property_count(), 1);
        assert!(!object.has_property("bar"));
    }

    #[test]
    fn test_empty_record_keeps_its_name() {
        let value = transform(&SimpleFooBar::default()).unwrap();
        assert_eq!(
            value,
            Some(SurfValue::Object(SurfObject::new("SimpleFooBar")))
        );
    }

    #[test]
    fn test_nested_records() {
        let complex = ComplexFooBar {
            foo: Some("foo".to_string()),
            bar: Some(simple(Some("foo"), Some("bar"))),
        };
        let value = transform(&complex).unwrap().unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.type_name(), "ComplexFooBar");

        let names: Vec<_> = object.property_names().collect();
        assert_eq!(names, vec!["foo", "bar"]);

        let inner = object.property("bar").and_then(SurfValue::as_object).unwrap();
        assert_eq!(inner.type_name(), "SimpleFooBar");
        assert_eq!(inner.property("bar"), Some(&SurfValue::from("bar")));
    }

    #[test]
    fn test_sequences_keep_order_and_skip_absent() {
        let values = vec![Some(3), None, Some(1), Some(3)];
        assert_eq!(
            transform(&values).unwrap(),
            Some(SurfValue::List(vec![
                SurfValue::from(3),
                SurfValue::from(1),
                SurfValue::from(3)
            ]))
        );
    }

    #[test]
    fn test_sets_deduplicate_transformed_elements() {
        let records: Vec<Rc<SimpleFooBar>> = vec![
            Rc::new(simple(Some("a"), None)),
            Rc::new(simple(Some("a"), None)),
        ];
        let set: HashSet<usize> = [1, 2, 3].into_iter().collect();

        let value = transform(&set).unwrap().unwrap();
        assert_eq!(value.as_set().map(|s| s.len()), Some(3));

        // equal records become equal objects, so a set of them collapses
        let mut distinct = SurfSet::new();
        for record in &records {
            distinct.insert(transform(record).unwrap().unwrap());
        }
        assert_eq!(distinct.len(), 1);
    }

    #[test]
    fn test_map_values_transformed_keys_kept() {
        let mut map = BTreeMap::new();
        map.insert("one".to_string(), simple(Some("x"), None));
        map.insert("two".to_string(), simple(None, None));

        let value = transform(&map).unwrap().unwrap();
        let map = value.as_map().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(
            map.get(&SurfValue::from("two")),
            Some(&SurfValue::Object(SurfObject::new("SimpleFooBar")))
        );
    }

    #[test]
    fn test_absent_map_values_are_skipped() {
        let mut map = HashMap::new();
        map.insert(1u8, Some("present"));
        map.insert(2u8, None);

        let value = transform(&map).unwrap().unwrap();
        let map = value.as_map().unwrap();
        assert_eq!(map.len(), 1);
        assert!(map.get(&SurfValue::from(2)).is_none());
    }

    #[test]
    fn test_container_keys_are_rebuilt() {
        let mut map = BTreeMap::new();
        map.insert(vec![1, 2], "list key");

        let value = transform(&map).unwrap().unwrap();
        let key = SurfValue::List(vec![SurfValue::from(1), SurfValue::from(2)]);
        assert_eq!(value.as_map().unwrap().get(&key), Some(&SurfValue::from("list key")));
    }

    #[test]
    fn test_record_keys_are_rejected() {
        let mut map = HashMap::new();
        map.insert(Tag(1), "record key");

        let err = transform(&map).unwrap_err();
        assert!(matches!(err, Error::UnsupportedKey { ref type_name } if type_name == "Tag"));

        let mut nested = BTreeMap::new();
        nested.insert(vec![Tag(2)], "record inside a key");
        let err = transform(&nested).unwrap_err();
        assert!(matches!(err, Error::UnsupportedKey { ref type_name } if type_name == "Tag"));
    }

    #[test]
    fn test_out_of_range_system_time_fails() {
        use std::time::{Duration, UNIX_EPOCH};

        let far_future = vec![UNIX_EPOCH + Duration::from_secs(1 << 45)];
        let err = transform(&far_future).unwrap_err();
        assert!(matches!(err, Error::UnsupportedValue(_)));
    }

    #[test]
    fn test_getter_failure_aborts_with_cause() {
        let err = transform(&vec![Failing]).unwrap_err();
        assert!(err.is_introspection());
        assert_eq!(err.source().unwrap().to_string(), "getter exploded");
    }

    #[test]
    fn test_depth_unbounded_by_default() {
        let value = transform(&chain(200)).unwrap();
        assert!(value.is_some());
    }

    #[test]
    fn test_depth_limit_applies_when_configured() {
        let transformer =
            Transformer::new().with_options(TransformOptions::new().with_max_depth(10));
        assert!(transformer.transform(&chain(10)).is_ok());

        let err = transformer.transform(&chain(11)).unwrap_err();
        assert!(matches!(err, Error::DepthLimitExceeded { limit: 10 }));
    }

    #[test]
    fn test_documents_are_returned_unchanged() {
        let mut inner = SurfObject::new("Prebuilt");
        inner.set_property("x", 1);
        let document = SurfValue::List(vec![SurfValue::Object(inner)]);
        assert_eq!(transform(&document).unwrap(), Some(document.clone()));
    }

    #[test]
    fn test_transformer_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Transformer>();
    }
}
