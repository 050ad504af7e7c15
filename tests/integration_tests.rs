use std::any::Any;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::error::Error as _;
use std::rc::Rc;
use std::sync::Arc;
use std::thread;

use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use surf_writer::{
    surf, surf_record, to_string, to_string_pretty, to_value, Binary, Classifier, EmailAddress,
    Error, PropertyVisitor, Reflect, Result, SurfObject, SurfOptions, SurfValue, SurfWriter,
    TelephoneNumber, TransformOptions, Transformer, MEDIA_TYPE,
};
use url::Url;
use uuid::Uuid;

#[derive(Default, Clone)]
struct SimpleFooBarBean {
    foo: Option<String>,
    bar: Option<String>,
}

surf_record!(SimpleFooBarBean { foo, bar });

#[derive(Default)]
struct ComplexFooBarBean {
    foo: Option<String>,
    bar: Option<SimpleFooBarBean>,
}

surf_record!(ComplexFooBarBean { foo, bar });

struct Contact {
    name: String,
    email: EmailAddress,
    phone: Option<TelephoneNumber>,
    homepage: Url,
    id: Uuid,
    born: NaiveDate,
    balance: Decimal,
    avatar: Binary,
    groups: HashSet<String>,
    scores: BTreeMap<String, u32>,
}

surf_record!(Contact {
    name,
    email,
    phone,
    homepage,
    id,
    born,
    balance,
    avatar,
    groups,
    scores,
});

#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct Version {
    major: u32,
    minor: u32,
}

surf_record!(Version { major, minor });

/// A record whose second property getter always fails.
struct Unreadable;

impl Reflect for Unreadable {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn introspect(&self, visitor: &mut dyn PropertyVisitor) -> Result<()> {
        visitor.visit_property("first", &1)?;
        let cause = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "secret");
        Err(Error::introspection_source("Unreadable", Some("second"), cause))
    }
}

fn bean(foo: Option<&str>, bar: Option<&str>) -> SimpleFooBarBean {
    SimpleFooBarBean {
        foo: foo.map(str::to_string),
        bar: bar.map(str::to_string),
    }
}

/// Serializes `expected` the way the writer does, for comparison.
fn expected_message(expected: &SurfValue) -> String {
    surf_writer::ser::to_string(expected, SurfOptions::formatted()).unwrap()
}

fn write(value: &impl Reflect) -> String {
    let mut out = Vec::new();
    SurfWriter::new().write_to(value, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_write_empty_bean() {
    let expected = SurfValue::Object(SurfObject::new("SimpleFooBarBean"));
    assert_eq!(write(&SimpleFooBarBean::default()), expected_message(&expected));
}

#[test]
fn test_write_simple_bean() {
    let expected = surf!(*SimpleFooBarBean { "foo": "foo", "bar": "bar" });
    let written = write(&bean(Some("foo"), Some("bar")));
    assert_eq!(written, expected_message(&expected));
    assert_eq!(
        written,
        "*SimpleFooBarBean:\n  foo = \"foo\"\n  bar = \"bar\"\n;\n"
    );
}

#[test]
fn test_write_bean_without_bar() {
    let expected = surf!(*SimpleFooBarBean { "foo": "foo" });
    assert_eq!(
        write(&bean(Some("foo"), None)),
        expected_message(&expected)
    );
}

#[test]
fn test_write_complex_bean() {
    let complex = ComplexFooBarBean {
        foo: Some("foo".to_string()),
        bar: Some(bean(Some("foo"), Some("bar"))),
    };
    let expected = surf!(*ComplexFooBarBean {
        "foo": "foo",
        "bar": (*SimpleFooBarBean { "foo": "foo", "bar": "bar" })
    });
    assert_eq!(write(&complex), expected_message(&expected));
}

#[test]
fn test_write_absent_root() {
    let mut out = Vec::new();
    SurfWriter::new()
        .write_to(&None::<SimpleFooBarBean>, &mut out)
        .unwrap();
    assert!(out.is_empty());
}

#[test]
fn test_writer_media_type() {
    assert_eq!(MEDIA_TYPE, "text/surf");
}

#[test]
fn test_introspection_failure_is_reported() {
    let mut out = Vec::new();
    let err = SurfWriter::new()
        .write_to(&Some(Unreadable), &mut out)
        .unwrap_err();

    assert!(out.is_empty());
    match &err {
        Error::Introspection {
            type_name,
            property,
            ..
        } => {
            assert_eq!(type_name, "Unreadable");
            assert_eq!(property.as_deref(), Some("second"));
        }
        other => panic!("Expected introspection error, got {:?}", other),
    }
    assert_eq!(err.source().unwrap().to_string(), "secret");
}

#[test]
fn test_native_vocabulary_in_records() {
    let contact = Contact {
        name: "Jane".to_string(),
        email: "jane@example.com".parse().unwrap(),
        phone: None,
        homepage: Url::parse("https://example.com/jane").unwrap(),
        id: Uuid::nil(),
        born: NaiveDate::from_ymd_opt(1990, 7, 14).unwrap(),
        balance: Decimal::new(-1050, 2),
        avatar: Binary(vec![1, 2, 3]),
        groups: ["admin".to_string()].into_iter().collect(),
        scores: [("chess".to_string(), 1800)].into_iter().collect(),
    };

    let value = to_value(&contact).unwrap().unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.type_name(), "Contact");
    assert!(!object.has_property("phone"));
    assert_eq!(object.property_count(), 9);
    assert_eq!(
        object.property("email"),
        Some(&SurfValue::EmailAddress(contact.email.clone()))
    );
    assert!(object.property("groups").unwrap().is_set());
    assert!(object.property("scores").unwrap().is_map());

    let surf = to_string_pretty(&contact).unwrap();
    assert!(surf.contains("  email = ^jane@example.com\n"));
    assert!(surf.contains("  homepage = <https://example.com/jane>\n"));
    assert!(surf.contains("  id = &00000000-0000-0000-0000-000000000000\n"));
    assert!(surf.contains("  born = @1990-07-14\n"));
    assert!(surf.contains("  balance = $-10.50\n"));
    assert!(surf.contains("  avatar = %AQID\n"));
    assert!(surf.contains("  groups = (\n    \"admin\"\n  )\n"));
    assert!(surf.contains("  scores = {\n    \"chess\": 1800\n  }\n"));
}

#[test]
fn test_timestamps_render_as_instants() {
    let instant = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    assert_eq!(to_string(&instant).unwrap(), "@2024-01-02T03:04:05Z");
}

#[test]
fn test_shared_references_are_transparent() {
    let shared = Rc::new(bean(Some("x"), None));
    let list = vec![Rc::clone(&shared), Rc::clone(&shared)];
    let value = to_value(&list).unwrap().unwrap();
    let expected = surf!(*SimpleFooBarBean { "foo": "x" });
    assert_eq!(value, SurfValue::List(vec![expected.clone(), expected]));
}

#[test]
fn test_equal_records_under_distinct_keys() {
    let beans: Vec<SimpleFooBarBean> = vec![bean(Some("a"), None), bean(Some("a"), None)];
    let mut by_key = HashMap::new();
    by_key.insert("left", beans[0].clone());
    by_key.insert("right", beans[1].clone());

    let value = to_value(&by_key).unwrap().unwrap();
    assert_eq!(value.as_map().unwrap().len(), 2);
}

#[test]
fn test_native_and_container_keys() {
    let mut map = HashMap::new();
    map.insert(Uuid::nil(), 1);
    assert!(to_value(&map).is_ok());

    let mut keyed_by_list = BTreeMap::new();
    keyed_by_list.insert(vec!["a", "b"], 1);
    assert_eq!(to_string(&keyed_by_list).unwrap(), r#"{["a", "b"]: 1}"#);
}

#[test]
fn test_record_key_is_unsupported() {
    let mut by_version = BTreeMap::new();
    by_version.insert(Version { major: 1, minor: 2 }, "stable");

    let err = to_value(&by_version).unwrap_err();
    assert!(matches!(err, Error::UnsupportedKey { ref type_name } if type_name == "Version"));
}

#[test]
fn test_custom_classifier_and_depth_limit() {
    let classifier = Classifier::new().with::<SimpleFooBarBean>(|b| {
        SurfValue::from(b.foo.clone().unwrap_or_default())
    });
    let transformer = Transformer::with_classifier(Arc::new(classifier))
        .with_options(TransformOptions::new().with_max_depth(1));

    let complex = ComplexFooBarBean {
        foo: None,
        bar: Some(bean(Some("inline"), None)),
    };
    assert_eq!(
        transformer.transform(&complex).unwrap(),
        Some(surf!(*ComplexFooBarBean { "bar": "inline" }))
    );

    let nested = vec![vec![1]];
    assert!(matches!(
        transformer.transform(&nested),
        Err(Error::DepthLimitExceeded { limit: 1 })
    ));
}

#[test]
fn test_concurrent_transformations() {
    let transformer = Arc::new(Transformer::new());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let transformer = Arc::clone(&transformer);
            thread::spawn(move || {
                let value = vec![i; 3];
                transformer.transform(&value).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let value = handle.join().unwrap().unwrap();
        assert_eq!(value.as_list().map(Vec::len), Some(3));
        assert_eq!(value.as_list().unwrap()[0], SurfValue::from(i as i32));
    }
}

#[test]
fn test_non_finite_float_fails_without_output() {
    let mut out = Vec::new();
    let err = SurfWriter::new()
        .write_to(&vec![1.0, f64::NAN], &mut out)
        .unwrap_err();
    assert!(matches!(err, Error::UnsupportedValue(_)));
    assert!(out.is_empty());
}

#[test]
fn test_serde_interop() {
    let value = to_value(&bean(Some("foo"), None)).unwrap().unwrap();
    assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"foo":"foo"}"#);
}
