//! # surf_writer
//!
//! Turns arbitrary Rust object graphs into SURF documents and writes them as
//! SURF text.
//!
//! ## What is SURF?
//!
//! SURF (Simple URF) is a self-describing text format. Besides strings and
//! numbers it has native forms for decimals, binary data, regular expressions,
//! UUIDs, IRIs, email addresses, telephone numbers and dates and times, and it
//! keeps lists, sets and maps apart. Records are written as named objects:
//!
//! ```text
//! *SimpleFooBar:
//!   foo = "foo"
//!   bar = "bar"
//! ;
//! ```
//!
//! ## How it works
//!
//! 1. A value describes itself through the [`Reflect`] trait: its shape
//!    (absent, indirection, sequence, set, map, plain value) and, for records,
//!    its named properties.
//! 2. The [`Transformer`] walks the value depth-first. Values the
//!    [`Classifier`] knows are kept as they are; containers are rebuilt element
//!    by element; every other value becomes a [`SurfObject`] named after its
//!    type, holding only the properties that are present.
//! 3. The [`Serializer`] renders the resulting [`SurfValue`] as SURF text, and
//!    [`SurfWriter`] ties the steps together for an output stream.
//!
//! ## Quick Start
//!
//! ```rust
//! use surf_writer::{surf_record, to_string, to_string_pretty, to_value, surf};
//!
//! struct SimpleFooBar {
//!     foo: Option<String>,
//!     bar: Option<String>,
//! }
//!
//! surf_record!(SimpleFooBar { foo, bar });
//!
//! let bean = SimpleFooBar {
//!     foo: Some("foo".to_string()),
//!     bar: None,
//! };
//!
//! assert_eq!(
//!     to_value(&bean).unwrap(),
//!     Some(surf!(*SimpleFooBar { "foo": "foo" }))
//! );
//! assert_eq!(to_string(&bean).unwrap(), r#"*SimpleFooBar:foo = "foo";"#);
//! assert_eq!(
//!     to_string_pretty(&bean).unwrap(),
//!     "*SimpleFooBar:\n  foo = \"foo\"\n;\n"
//! );
//! ```
//!
//! ## Native values
//!
//! Booleans, characters, every integer width, floats, [`num_bigint`] integers,
//! [`rust_decimal::Decimal`], strings, [`Binary`], regular expressions,
//! [`uuid::Uuid`], [`url::Url`], [`EmailAddress`], [`TelephoneNumber`] and the
//! [`chrono`] and [`Temporal`] date and time types are carried into the
//! document unchanged. More types can be added with
//! [`Classifier::register`].
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events (`debug` per transformation and written
//! message, `trace` per record). It never installs a subscriber.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - writing a record and a list
//! - **`records.rs`** - nested records, collections and absent values
//! - **`custom_types.rs`** - registering an application type as native
//!
//! Run any example with: `cargo run --example <name>`

pub mod classify;
pub mod contact;
pub mod error;
pub mod macros;
pub mod map;
pub mod object;
pub mod options;
pub mod reflect;
pub mod ser;
pub mod temporal;
pub mod transform;
pub mod value;
pub mod writer;

pub use classify::Classifier;
pub use contact::{EmailAddress, TelephoneNumber};
pub use error::{Error, Result};
pub use map::{SurfMap, SurfSet};
pub use object::SurfObject;
pub use options::{SurfOptions, TransformOptions};
pub use reflect::{Kind, PropertyVisitor, Reflect};
pub use ser::Serializer;
pub use temporal::{MonthDay, OffsetTime, Temporal, Year, YearMonth, ZonedDateTime};
pub use transform::Transformer;
pub use value::{Binary, Number, Pattern, SurfValue};
pub use writer::{SurfWriter, MEDIA_TYPE};

use std::io;

/// Transform any `T: Reflect` into a SURF document.
///
/// Returns `Ok(None)` when `value` is absent.
///
/// # Examples
///
/// ```rust
/// use surf_writer::{to_value, SurfValue};
///
/// assert_eq!(
///     to_value(&vec![Some(1), None, Some(2)]).unwrap(),
///     Some(SurfValue::List(vec![SurfValue::from(1), SurfValue::from(2)]))
/// );
/// assert_eq!(to_value(&None::<i32>).unwrap(), None);
/// ```
///
/// # Errors
///
/// Returns an error if a record cannot be introspected or a map key is not a
/// native value.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T: Reflect>(value: &T) -> Result<Option<SurfValue>> {
    Transformer::new().transform(value)
}

/// Serialize any `T: Reflect` to a single-line SURF string.
///
/// An absent value renders as the empty string.
///
/// # Errors
///
/// Returns an error if the value cannot be transformed or rendered.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T: Reflect>(value: &T) -> Result<String> {
    to_string_with_options(value, SurfOptions::default())
}

/// Serialize any `T: Reflect` to a formatted SURF string, one entry per line.
///
/// # Errors
///
/// Returns an error if the value cannot be transformed or rendered.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty<T: Reflect>(value: &T) -> Result<String> {
    to_string_with_options(value, SurfOptions::formatted())
}

/// Serialize any `T: Reflect` to a SURF string with custom options.
///
/// # Examples
///
/// ```rust
/// use surf_writer::{to_string_with_options, SurfOptions};
/// use std::collections::BTreeMap;
///
/// let mut scores = BTreeMap::new();
/// scores.insert("ana", 3);
///
/// let options = SurfOptions::formatted().with_indent(4);
/// let surf = to_string_with_options(&scores, options).unwrap();
/// assert_eq!(surf, "{\n    \"ana\": 3\n}\n");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be transformed or rendered.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T: Reflect>(value: &T, options: SurfOptions) -> Result<String> {
    match to_value(value)? {
        Some(document) => ser::to_string(&document, options),
        None => Ok(String::new()),
    }
}

/// Write any `T: Reflect` to a writer as a formatted SURF message.
///
/// Equivalent to [`SurfWriter::write_to`] with the default writer.
///
/// # Examples
///
/// ```rust
/// use surf_writer::to_writer;
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &vec!["a", "b"]).unwrap();
/// assert_eq!(buffer, b"[\n  \"a\"\n  \"b\"\n]\n");
/// ```
///
/// # Errors
///
/// Returns an error if transformation, rendering or writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: Reflect,
{
    SurfWriter::new().write_to(value, writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{surf, surf_record};
    use std::collections::BTreeSet;

    struct Point {
        x: i32,
        y: i32,
    }

    surf_record!(Point { x, y });

    struct Shape {
        name: String,
        points: Vec<Point>,
        tags: BTreeSet<&'static str>,
    }

    surf_record!(Shape { name, points, tags });

    fn triangle() -> Shape {
        Shape {
            name: "triangle".to_string(),
            points: vec![
                Point { x: 0, y: 0 },
                Point { x: 4, y: 0 },
                Point { x: 0, y: 3 },
            ],
            tags: ["closed", "convex"].into_iter().collect(),
        }
    }

    #[test]
    fn test_to_value_record() {
        let value = to_value(&Point { x: 1, y: 2 }).unwrap();
        assert_eq!(value, Some(surf!(*Point { "x": 1, "y": 2 })));
    }

    #[test]
    fn test_to_string_compact() {
        let surf = to_string(&triangle()).unwrap();
        assert_eq!(
            surf,
            concat!(
                r#"*Shape:name = "triangle", "#,
                "points = [*Point:x = 0, y = 0;, *Point:x = 4, y = 0;, *Point:x = 0, y = 3;], ",
                r#"tags = ("closed", "convex");"#
            )
        );
    }

    #[test]
    fn test_to_string_pretty() {
        let surf = to_string_pretty(&Point { x: 1, y: 2 }).unwrap();
        assert_eq!(surf, "*Point:\n  x = 1\n  y = 2\n;\n");
    }

    #[test]
    fn test_absent_root_renders_empty() {
        assert_eq!(to_string(&None::<Point>).unwrap(), "");
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &None::<Point>).unwrap();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_to_writer_matches_pretty_string() {
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &triangle()).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            to_string_pretty(&triangle()).unwrap()
        );
    }
}
