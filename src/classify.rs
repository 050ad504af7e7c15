//! Recognition of values SURF represents natively.
//!
//! The [`Classifier`] decides whether a value already belongs to the SURF
//! vocabulary and, if so, converts it to the matching [`SurfValue`]. It checks
//! two tiers in order:
//!
//! 1. a registry of converters keyed by exact [`TypeId`], and
//! 2. [`Reflect::as_document`], for values that are already part of the
//!    document model ([`SurfValue`], [`crate::SurfObject`], [`crate::SurfSet`],
//!    [`crate::SurfMap`], [`crate::Binary`]).
//!
//! Anything else is not native, and the transformer decomposes it.
//!
//! ## Adding a native type
//!
//! ```rust
//! use std::net::Ipv4Addr;
//! use std::sync::Arc;
//! use surf_writer::{Classifier, Reflect, SurfValue, Transformer};
//!
//! struct Host(Ipv4Addr);
//!
//! impl Reflect for Host {
//!     fn as_any(&self) -> &dyn std::any::Any {
//!         self
//!     }
//! }
//!
//! let mut classifier = Classifier::new();
//! classifier.register::<Host>(|host| SurfValue::from(host.0.to_string()));
//!
//! let transformer = Transformer::with_classifier(Arc::new(classifier));
//! let value = transformer.transform(&Host(Ipv4Addr::LOCALHOST)).unwrap();
//! assert_eq!(value, Some(SurfValue::from("127.0.0.1")));
//! ```

use crate::contact::{EmailAddress, TelephoneNumber};
use crate::reflect::Reflect;
use crate::temporal::{MonthDay, OffsetTime, Temporal, Year, YearMonth, ZonedDateTime};
use crate::value::Pattern;
use crate::{Result, SurfValue};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use num_bigint::{BigInt, BigUint};
use regex::Regex;
use rust_decimal::Decimal;
use std::any::{Any, TypeId};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};
use std::time::SystemTime;
use url::Url;
use uuid::Uuid;

type Converter = Box<dyn Fn(&dyn Any) -> Option<Result<SurfValue>> + Send + Sync>;

static GLOBAL: OnceLock<Arc<Classifier>> = OnceLock::new();

/// Registry of native SURF types.
pub struct Classifier {
    converters: HashMap<TypeId, Converter>,
}

macro_rules! register_copied {
    ($classifier:ident; $($ty:ty),* $(,)?) => {
        $( $classifier.register::<$ty>(|v| SurfValue::from(*v)); )*
    };
}

macro_rules! register_cloned {
    ($classifier:ident; $($ty:ty),* $(,)?) => {
        $( $classifier.register::<$ty>(|v| SurfValue::from(v.clone())); )*
    };
}

impl Classifier {
    /// Creates a classifier that knows the standard native types.
    #[must_use]
    pub fn new() -> Self {
        let mut classifier = Classifier::empty();
        register_copied!(classifier;
            bool, char,
            i8, i16, i32, i64, i128, isize,
            u8, u16, u32, u64, u128, usize,
            f32, f64,
            &'static str,
            Decimal, Uuid,
            DateTime<Utc>, DateTime<FixedOffset>,
            NaiveDate, NaiveTime, NaiveDateTime,
            OffsetTime, Year, YearMonth, MonthDay,
        );
        register_cloned!(classifier;
            String, BigInt, BigUint,
            Regex, Pattern, Url,
            EmailAddress, TelephoneNumber,
            Temporal, ZonedDateTime,
        );
        classifier.register::<Cow<'static, str>>(|v| SurfValue::String(v.to_string()));
        classifier.register_fallible::<SystemTime>(|v| SurfValue::try_from(*v));
        classifier
    }

    /// Creates a classifier with no registered types.
    ///
    /// Only values that expose themselves through [`Reflect::as_document`] are
    /// native to an empty classifier.
    #[must_use]
    pub fn empty() -> Self {
        Classifier {
            converters: HashMap::new(),
        }
    }

    /// The process-wide classifier with the standard native types, built on
    /// first use and shared by every [`crate::Transformer::new`].
    pub fn global() -> Arc<Classifier> {
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(Classifier::new())))
    }

    /// Registers `T` as a native type, converted by `convert`.
    ///
    /// Registering a type twice replaces its converter. Lookup is by exact
    /// type: registering `T` does not make `Box<T>` or `Option<T>` native.
    pub fn register<T: Any>(&mut self, convert: fn(&T) -> SurfValue) {
        self.converters.insert(
            TypeId::of::<T>(),
            Box::new(move |any: &dyn Any| any.downcast_ref::<T>().map(|v| Ok(convert(v)))),
        );
    }

    /// Registers `T` as a native type whose conversion can fail.
    ///
    /// A failed conversion fails the transformation; the value is not
    /// decomposed as a record instead.
    pub fn register_fallible<T: Any>(&mut self, convert: fn(&T) -> Result<SurfValue>) {
        self.converters.insert(
            TypeId::of::<T>(),
            Box::new(move |any: &dyn Any| any.downcast_ref::<T>().map(convert)),
        );
    }

    /// Builder form of [`Classifier::register`].
    #[must_use]
    pub fn with<T: Any>(mut self, convert: fn(&T) -> SurfValue) -> Self {
        self.register(convert);
        self
    }

    /// Builder form of [`Classifier::register_fallible`].
    #[must_use]
    pub fn with_fallible<T: Any>(mut self, convert: fn(&T) -> Result<SurfValue>) -> Self {
        self.register_fallible(convert);
        self
    }

    /// Converts `value` if it is native, or returns `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns the converter's error when `value` is native but has no SURF
    /// form, such as a [`SystemTime`] beyond the representable instants.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use surf_writer::{Classifier, SurfValue};
    ///
    /// let classifier = Classifier::global();
    /// assert_eq!(classifier.classify(&7u8).unwrap(), Some(SurfValue::from(7)));
    /// assert_eq!(classifier.classify(&vec![7u8]).unwrap(), None);
    /// ```
    pub fn classify(&self, value: &dyn Reflect) -> Result<Option<SurfValue>> {
        let any = value.as_any();
        if let Some(convert) = self.converters.get(&any.type_id()) {
            return convert(any).transpose();
        }
        Ok(value.as_document())
    }

    /// Returns `true` if [`Classifier::classify`] would convert `value`.
    #[must_use]
    pub fn is_native(&self, value: &dyn Reflect) -> bool {
        self.converters.contains_key(&value.as_any().type_id()) || value.as_document().is_some()
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.converters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Classifier::new()
    }
}

impl fmt::Debug for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Classifier")
            .field("registered", &self.converters.len())
            .finish()
    }
}
