//! Runtime introspection of values headed for a SURF document.
//!
//! [`Reflect`] is the capability the transformer relies on: for any value it
//! answers three questions.
//!
//! 1. *What shape is it?* ([`Reflect::kind`]) An absent value, an indirection,
//!    an ordered sequence, a set, a map, or a plain value.
//! 2. *Which concrete type is it?* ([`Reflect::as_any`]) Used by the
//!    [`Classifier`](crate::Classifier) to recognise native values.
//! 3. *What are its properties?* ([`Reflect::introspect`]) Records report their
//!    named properties, in a stable order, to a [`PropertyVisitor`].
//!
//! The crate implements `Reflect` for the standard containers and for every
//! native type. Records get theirs from [`surf_record!`](crate::surf_record) or
//! from a hand-written impl:
//!
//! ```rust
//! use std::any::Any;
//! use surf_writer::{to_value, Error, PropertyVisitor, Reflect, Result, SurfObject, SurfValue};
//!
//! struct Account {
//!     owner: String,
//!     frozen: bool,
//! }
//!
//! impl Reflect for Account {
//!     fn as_any(&self) -> &dyn Any {
//!         self
//!     }
//!
//!     fn introspect(&self, visitor: &mut dyn PropertyVisitor) -> Result<()> {
//!         visitor.visit_property("owner", &self.owner)?;
//!         if self.frozen {
//!             return Err(Error::introspection("Account", Some("balance"), "account is frozen"));
//!         }
//!         visitor.visit_property("balance", &100i64)
//!     }
//! }
//!
//! let open = Account { owner: "ana".to_string(), frozen: false };
//! let mut expected = SurfObject::new("Account");
//! expected.set_property("owner", "ana");
//! expected.set_property("balance", 100i64);
//! assert_eq!(to_value(&open).unwrap(), Some(SurfValue::Object(expected)));
//!
//! let frozen = Account { owner: "ana".to_string(), frozen: true };
//! assert!(to_value(&frozen).is_err());
//! ```

use crate::contact::{EmailAddress, TelephoneNumber};
use crate::map::{SurfMap, SurfSet};
use crate::object::SurfObject;
use crate::temporal::{MonthDay, OffsetTime, Temporal, Year, YearMonth, ZonedDateTime};
use crate::value::{Binary, Pattern};
use crate::{Result, SurfValue};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use indexmap::{IndexMap, IndexSet};
use num_bigint::{BigInt, BigUint};
use regex::Regex;
use rust_decimal::Decimal;
use std::any::Any;
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::rc::Rc;
use std::sync::Arc;
use std::time::SystemTime;
use url::Url;
use uuid::Uuid;

/// Elements of a sequence or set, in the container's own iteration order.
pub type Elements<'a> = Box<dyn Iterator<Item = &'a dyn Reflect> + 'a>;

/// Key-value pairs of a map.
pub type Entries<'a> = Box<dyn Iterator<Item = (&'a dyn Reflect, &'a dyn Reflect)> + 'a>;

/// The structural shape of a reflected value.
pub enum Kind<'a> {
    /// No value at all (`None`).
    Absent,
    /// A transparent wrapper around another value (`Some`, `Box`, `Rc`, `Arc`).
    Deref(&'a dyn Reflect),
    /// An ordered sequence; duplicates allowed.
    Sequence(Elements<'a>),
    /// An unordered collection of distinct elements.
    Set(Elements<'a>),
    /// A keyed map.
    Map(Entries<'a>),
    /// Anything else: a native value or a record.
    Value,
}

/// Receives the properties of a record, one call per property, in order.
pub trait PropertyVisitor {
    /// Reports property `name` holding `value`.
    ///
    /// An absent value (`None`) is reported like any other; whoever visits
    /// decides what absence means.
    fn visit_property(&mut self, name: &str, value: &dyn Reflect) -> Result<()>;
}

/// A value whose shape, concrete type and properties can be inspected at runtime.
pub trait Reflect: Any {
    /// Returns `self` as [`Any`], for exact type lookups.
    fn as_any(&self) -> &dyn Any;

    /// The simple, unqualified name of the value's type (no module path, no
    /// generic arguments). Named objects take this as their type name.
    fn type_name(&self) -> &'static str {
        simple_type_name(std::any::type_name::<Self>())
    }

    /// The structural shape of the value. Records and native values keep the
    /// default, [`Kind::Value`].
    fn kind(&self) -> Kind<'_> {
        Kind::Value
    }

    /// Reports each property to `visitor` in a stable, declaration-like order.
    ///
    /// # Errors
    ///
    /// Implementations return [`crate::Error::Introspection`] when a property
    /// cannot be read, and must pass on any error returned by the visitor.
    fn introspect(&self, visitor: &mut dyn PropertyVisitor) -> Result<()> {
        let _ = visitor;
        Ok(())
    }

    /// Returns the value itself when it already belongs to the document model.
    fn as_document(&self) -> Option<SurfValue> {
        None
    }
}

/// Strips the module path and generic arguments from a full type name.
///
/// # Examples
///
/// ```rust
/// use surf_writer::reflect::simple_type_name;
///
/// assert_eq!(simple_type_name("app::model::Simple"), "Simple");
/// assert_eq!(simple_type_name("app::Wrapper<alloc::string::String>"), "Wrapper");
/// assert_eq!(simple_type_name("u32"), "u32");
/// ```
#[must_use]
pub fn simple_type_name(full: &str) -> &str {
    let path = match full.find('<') {
        Some(generics) => &full[..generics],
        None => full,
    };
    path.rsplit("::").next().unwrap_or(path)
}

macro_rules! reflect_native {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn as_any(&self) -> &dyn Any {
                    self
                }
            }
        )*
    };
}

reflect_native!(
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    String,
    &'static str,
    Cow<'static, str>,
    BigInt,
    BigUint,
    Decimal,
    Regex,
    Pattern,
    Uuid,
    Url,
    EmailAddress,
    TelephoneNumber,
    DateTime<Utc>,
    DateTime<FixedOffset>,
    NaiveDate,
    NaiveTime,
    NaiveDateTime,
    SystemTime,
    Temporal,
    OffsetTime,
    ZonedDateTime,
    Year,
    YearMonth,
    MonthDay,
);

macro_rules! reflect_document {
    ($($ty:ty => $wrap:expr),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn as_any(&self) -> &dyn Any {
                    self
                }

                fn as_document(&self) -> Option<SurfValue> {
                    Some($wrap(self.clone()))
                }
            }
        )*
    };
}

reflect_document!(
    SurfValue => std::convert::identity::<SurfValue>,
    SurfObject => SurfValue::Object,
    SurfSet => SurfValue::Set,
    SurfMap => SurfValue::Map,
    Binary => SurfValue::Binary,
);

impl<T: Reflect> Reflect for Option<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind(&self) -> Kind<'_> {
        match self {
            Some(value) => Kind::Deref(value),
            None => Kind::Absent,
        }
    }
}

macro_rules! reflect_pointer {
    ($($ptr:ident),*) => {
        $(
            impl<T: Reflect> Reflect for $ptr<T> {
                fn as_any(&self) -> &dyn Any {
                    self
                }

                fn kind(&self) -> Kind<'_> {
                    Kind::Deref(&**self)
                }
            }
        )*
    };
}

reflect_pointer!(Box, Rc, Arc);

macro_rules! reflect_sequence {
    ($($container:ident),*) => {
        $(
            impl<T: Reflect> Reflect for $container<T> {
                fn as_any(&self) -> &dyn Any {
                    self
                }

                fn kind(&self) -> Kind<'_> {
                    Kind::Sequence(Box::new(self.iter().map(|e| e as &dyn Reflect)))
                }
            }
        )*
    };
}

reflect_sequence!(Vec, VecDeque, LinkedList);

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind(&self) -> Kind<'_> {
        Kind::Sequence(Box::new(self.iter().map(|e| e as &dyn Reflect)))
    }
}

impl<T: Reflect, S: 'static> Reflect for HashSet<T, S> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind(&self) -> Kind<'_> {
        Kind::Set(Box::new(self.iter().map(|e| e as &dyn Reflect)))
    }
}

impl<T: Reflect, S: 'static> Reflect for IndexSet<T, S> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind(&self) -> Kind<'_> {
        Kind::Set(Box::new(self.iter().map(|e| e as &dyn Reflect)))
    }
}

impl<T: Reflect> Reflect for BTreeSet<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind(&self) -> Kind<'_> {
        Kind::Set(Box::new(self.iter().map(|e| e as &dyn Reflect)))
    }
}

impl<K: Reflect, V: Reflect, S: 'static> Reflect for HashMap<K, V, S> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind(&self) -> Kind<'_> {
        Kind::Map(Box::new(
            self.iter()
                .map(|(k, v)| (k as &dyn Reflect, v as &dyn Reflect)),
        ))
    }
}

impl<K: Reflect, V: Reflect, S: 'static> Reflect for IndexMap<K, V, S> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind(&self) -> Kind<'_> {
        Kind::Map(Box::new(
            self.iter()
                .map(|(k, v)| (k as &dyn Reflect, v as &dyn Reflect)),
        ))
    }
}

impl<K: Reflect, V: Reflect> Reflect for BTreeMap<K, V> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind(&self) -> Kind<'_> {
        Kind::Map(Box::new(
            self.iter()
                .map(|(k, v)| (k as &dyn Reflect, v as &dyn Reflect)),
        ))
    }
}
