//! Document value representation for SURF data.
//!
//! This module provides the [`SurfValue`] enum, the document model every
//! transformation produces. It covers the SURF native vocabulary (booleans,
//! characters, numbers, strings, binary data, patterns, identifiers, contact
//! values and the temporal family) plus the four structural forms: lists, sets,
//! maps and named objects.
//!
//! ## Core Types
//!
//! - [`SurfValue`]: any SURF value
//! - [`Number`]: a 64-bit integer or a float
//! - [`Binary`]: an opaque byte blob
//! - [`Pattern`]: a compiled regular expression, compared by its source
//!
//! A document never holds a "no value" marker: absence is expressed by leaving a
//! property out of its object (see [`crate::SurfObject`]).
//!
//! ## Creating Values
//!
//! ```rust
//! use surf_writer::{surf, SurfValue};
//!
//! let boolean = SurfValue::from(true);
//! let number = SurfValue::from(42);
//! let text = SurfValue::from("hello");
//!
//! let object = surf!(*User {
//!     "name": "Alice",
//!     "age": 30
//! });
//! assert!(object.is_object());
//! ```

use crate::contact::{EmailAddress, TelephoneNumber};
use crate::map::{SurfMap, SurfSet};
use crate::object::SurfObject;
use crate::temporal::{MonthDay, OffsetTime, Temporal, Year, YearMonth, ZonedDateTime};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use num_bigint::{BigInt, BigUint};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::time::SystemTime;
use url::Url;
use uuid::Uuid;

/// A SURF document value.
///
/// Equality is structural. Sets, maps and object properties compare without
/// regard to order; lists compare element by element. Floats compare by bit
/// pattern so that every value is a valid set member and map key.
///
/// # Examples
///
/// ```rust
/// use surf_writer::{Number, SurfValue};
///
/// let num = SurfValue::Number(Number::Integer(42));
/// let text = SurfValue::String("hello".to_string());
///
/// assert!(num.is_number());
/// assert!(text.is_string());
/// assert_eq!(text.as_str(), Some("hello"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SurfValue {
    Boolean(bool),
    Character(char),
    Number(Number),
    BigInteger(BigInt),
    Decimal(Decimal),
    String(String),
    Binary(Binary),
    Regex(Pattern),
    Uuid(Uuid),
    Iri(Url),
    EmailAddress(EmailAddress),
    TelephoneNumber(TelephoneNumber),
    Temporal(Temporal),
    List(Vec<SurfValue>),
    Set(SurfSet),
    Map(SurfMap),
    Object(SurfObject),
}

/// A numeric value that fits in 64 bits.
///
/// Integers outside the `i64` range are represented as
/// [`SurfValue::BigInteger`] instead.
///
/// # Examples
///
/// ```rust
/// use surf_writer::Number;
///
/// let integer = Number::Integer(42);
/// let float = Number::Float(3.5);
///
/// assert!(integer.is_integer());
/// assert_eq!(integer.as_i64(), Some(42));
/// assert_eq!(float.as_f64(), 3.5);
/// ```
#[derive(Clone, Copy, Debug)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    /// Returns `true` if this is an integer value.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    /// Returns `true` if this is a floating-point value.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Returns `false` only for NaN and infinite floats, which SURF cannot express.
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        match self {
            Number::Integer(_) => true,
            Number::Float(f) => f.is_finite(),
        }
    }

    /// Converts this number to an `i64` if possible.
    ///
    /// Returns `Some(i64)` for integers and for floats with no fractional part
    /// that fit in the `i64` range.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use surf_writer::Number;
    ///
    /// assert_eq!(Number::Integer(42).as_i64(), Some(42));
    /// assert_eq!(Number::Float(42.0).as_i64(), Some(42));
    /// assert_eq!(Number::Float(42.5).as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                    Some(*f as i64)
                } else {
                    None
                }
            }
        }
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => a == b,
            (Number::Float(a), Number::Float(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

impl Eq for Number {}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Number::Integer(i) => {
                state.write_u8(0);
                i.hash(state);
            }
            Number::Float(f) => {
                state.write_u8(1);
                f.to_bits().hash(state);
            }
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) => write!(f, "{}", fl),
        }
    }
}

/// An opaque byte blob, rendered in SURF as base64.
///
/// `Vec<u8>` is a sequence of integers to the transformer; wrap bytes in
/// `Binary` to have them treated as a single binary value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Binary(pub Vec<u8>);

impl Binary {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Binary {
    fn from(bytes: Vec<u8>) -> Self {
        Binary(bytes)
    }
}

impl From<&[u8]> for Binary {
    fn from(bytes: &[u8]) -> Self {
        Binary(bytes.to_vec())
    }
}

/// A compiled regular expression. Two patterns are equal when their sources are.
#[derive(Clone, Debug)]
pub struct Pattern(Regex);

impl Pattern {
    /// Compiles `source` into a pattern.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Custom`] when `source` is not a valid regular expression.
    pub fn new(source: &str) -> crate::Result<Self> {
        Regex::new(source)
            .map(Pattern)
            .map_err(crate::Error::custom)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    #[must_use]
    pub fn as_regex(&self) -> &Regex {
        &self.0
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Pattern {}

impl Hash for Pattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl From<Regex> for Pattern {
    fn from(regex: Regex) -> Self {
        Pattern(regex)
    }
}

impl SurfValue {
    #[inline]
    #[must_use]
    pub const fn is_boolean(&self) -> bool {
        matches!(self, SurfValue::Boolean(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, SurfValue::Number(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, SurfValue::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, SurfValue::List(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_set(&self) -> bool {
        matches!(self, SurfValue::Set(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_map(&self) -> bool {
        matches!(self, SurfValue::Map(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, SurfValue::Object(_))
    }

    /// Returns `true` for every value that is not a list, set, map or object.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use surf_writer::SurfValue;
    ///
    /// assert!(SurfValue::from("text").is_scalar());
    /// assert!(!SurfValue::List(vec![]).is_scalar());
    /// ```
    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        !matches!(
            self,
            SurfValue::List(_) | SurfValue::Set(_) | SurfValue::Map(_) | SurfValue::Object(_)
        )
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SurfValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use surf_writer::SurfValue;
    ///
    /// assert_eq!(SurfValue::from("hello").as_str(), Some("hello"));
    /// assert_eq!(SurfValue::from(42).as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SurfValue::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SurfValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&Vec<SurfValue>> {
        match self {
            SurfValue::List(list) => Some(list),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_set(&self) -> Option<&SurfSet> {
        match self {
            SurfValue::Set(set) => Some(set),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_map(&self) -> Option<&SurfMap> {
        match self {
            SurfValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// If the value is an object, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&SurfObject> {
        match self {
            SurfValue::Object(obj) => Some(obj),
            _ => None,
        }
    }
}

impl Serialize for SurfValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            SurfValue::Boolean(b) => serializer.serialize_bool(*b),
            SurfValue::Character(c) => serializer.serialize_char(*c),
            SurfValue::Number(Number::Integer(i)) => serializer.serialize_i64(*i),
            SurfValue::Number(Number::Float(f)) => serializer.serialize_f64(*f),
            SurfValue::BigInteger(bi) => serializer.collect_str(bi),
            SurfValue::Decimal(d) => serializer.collect_str(d),
            SurfValue::String(s) => serializer.serialize_str(s),
            SurfValue::Binary(bytes) => serializer.serialize_bytes(bytes.as_bytes()),
            SurfValue::Regex(pattern) => serializer.serialize_str(pattern.as_str()),
            SurfValue::Uuid(uuid) => serializer.collect_str(&uuid.hyphenated()),
            SurfValue::Iri(iri) => serializer.serialize_str(iri.as_str()),
            SurfValue::EmailAddress(address) => serializer.collect_str(address),
            SurfValue::TelephoneNumber(number) => serializer.collect_str(number),
            SurfValue::Temporal(temporal) => serializer.collect_str(temporal),
            SurfValue::List(list) => serializer.collect_seq(list),
            SurfValue::Set(set) => serializer.collect_seq(set.iter()),
            SurfValue::Map(map) => serializer.collect_map(map.iter()),
            SurfValue::Object(obj) => serializer.collect_map(obj.iter()),
        }
    }
}

impl From<bool> for SurfValue {
    fn from(value: bool) -> Self {
        SurfValue::Boolean(value)
    }
}

impl From<char> for SurfValue {
    fn from(value: char) -> Self {
        SurfValue::Character(value)
    }
}

macro_rules! from_small_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for SurfValue {
                fn from(value: $ty) -> Self {
                    SurfValue::Number(Number::Integer(i64::from(value)))
                }
            }
        )*
    };
}

from_small_integer!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! from_wide_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for SurfValue {
                fn from(value: $ty) -> Self {
                    match i64::try_from(value) {
                        Ok(i) => SurfValue::Number(Number::Integer(i)),
                        Err(_) => SurfValue::BigInteger(BigInt::from(value)),
                    }
                }
            }
        )*
    };
}

from_wide_integer!(u64, i128, u128, isize, usize);

impl From<f32> for SurfValue {
    // Widening through the shortest f32 text keeps 0.1f32 as 0.1.
    fn from(value: f32) -> Self {
        let widened = value.to_string().parse().unwrap_or(f64::from(value));
        SurfValue::Number(Number::Float(widened))
    }
}

impl From<f64> for SurfValue {
    fn from(value: f64) -> Self {
        SurfValue::Number(Number::Float(value))
    }
}

impl From<Number> for SurfValue {
    fn from(value: Number) -> Self {
        SurfValue::Number(value)
    }
}

impl From<BigInt> for SurfValue {
    fn from(value: BigInt) -> Self {
        SurfValue::BigInteger(value)
    }
}

impl From<BigUint> for SurfValue {
    fn from(value: BigUint) -> Self {
        SurfValue::BigInteger(BigInt::from(value))
    }
}

impl From<Decimal> for SurfValue {
    fn from(value: Decimal) -> Self {
        SurfValue::Decimal(value)
    }
}

impl From<String> for SurfValue {
    fn from(value: String) -> Self {
        SurfValue::String(value)
    }
}

impl From<&str> for SurfValue {
    fn from(value: &str) -> Self {
        SurfValue::String(value.to_string())
    }
}

impl From<Binary> for SurfValue {
    fn from(value: Binary) -> Self {
        SurfValue::Binary(value)
    }
}

impl From<Pattern> for SurfValue {
    fn from(value: Pattern) -> Self {
        SurfValue::Regex(value)
    }
}

impl From<Regex> for SurfValue {
    fn from(value: Regex) -> Self {
        SurfValue::Regex(Pattern(value))
    }
}

impl From<Uuid> for SurfValue {
    fn from(value: Uuid) -> Self {
        SurfValue::Uuid(value)
    }
}

impl From<Url> for SurfValue {
    fn from(value: Url) -> Self {
        SurfValue::Iri(value)
    }
}

impl From<EmailAddress> for SurfValue {
    fn from(value: EmailAddress) -> Self {
        SurfValue::EmailAddress(value)
    }
}

impl From<TelephoneNumber> for SurfValue {
    fn from(value: TelephoneNumber) -> Self {
        SurfValue::TelephoneNumber(value)
    }
}

macro_rules! from_temporal {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for SurfValue {
                fn from(value: $ty) -> Self {
                    SurfValue::Temporal(Temporal::from(value))
                }
            }
        )*
    };
}

from_temporal!(
    DateTime<Utc>,
    DateTime<FixedOffset>,
    NaiveDate,
    NaiveTime,
    NaiveDateTime,
    OffsetTime,
    ZonedDateTime,
    Year,
    YearMonth,
    MonthDay
);

impl From<Temporal> for SurfValue {
    fn from(value: Temporal) -> Self {
        SurfValue::Temporal(value)
    }
}

impl TryFrom<SystemTime> for SurfValue {
    type Error = crate::Error;

    fn try_from(value: SystemTime) -> crate::Result<Self> {
        Temporal::try_from(value).map(SurfValue::Temporal)
    }
}

impl From<Vec<SurfValue>> for SurfValue {
    fn from(value: Vec<SurfValue>) -> Self {
        SurfValue::List(value)
    }
}

impl From<SurfSet> for SurfValue {
    fn from(value: SurfSet) -> Self {
        SurfValue::Set(value)
    }
}

impl From<SurfMap> for SurfValue {
    fn from(value: SurfMap) -> Self {
        SurfValue::Map(value)
    }
}

impl From<SurfObject> for SurfValue {
    fn from(value: SurfObject) -> Self {
        SurfValue::Object(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(value: &SurfValue) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_from_primitives() {
        assert_eq!(SurfValue::from(true), SurfValue::Boolean(true));
        assert_eq!(SurfValue::from('x'), SurfValue::Character('x'));
        assert_eq!(
            SurfValue::from(42i32),
            SurfValue::Number(Number::Integer(42))
        );
        assert_eq!(
            SurfValue::from(3.5f64),
            SurfValue::Number(Number::Float(3.5))
        );
        assert_eq!(
            SurfValue::from("test"),
            SurfValue::String("test".to_string())
        );
    }

    #[test]
    fn test_wide_integers_widen() {
        assert_eq!(SurfValue::from(7u64), SurfValue::Number(Number::Integer(7)));
        assert_eq!(
            SurfValue::from(u64::MAX),
            SurfValue::BigInteger(BigInt::from(u64::MAX))
        );
        assert_eq!(
            SurfValue::from(i128::MIN),
            SurfValue::BigInteger(BigInt::from(i128::MIN))
        );
    }

    #[test]
    fn test_f32_keeps_its_shortest_form() {
        assert_eq!(SurfValue::from(0.1f32), SurfValue::from(0.1f64));
        assert_eq!(SurfValue::from(-2.75f32), SurfValue::from(-2.75f64));
        assert_eq!(
            SurfValue::from(f32::INFINITY),
            SurfValue::from(f64::INFINITY)
        );
    }

    #[test]
    fn test_system_time_is_fallible() {
        use std::time::{Duration, UNIX_EPOCH};

        let epoch = SurfValue::try_from(UNIX_EPOCH).unwrap();
        assert!(matches!(epoch, SurfValue::Temporal(Temporal::Instant(_))));
        assert!(SurfValue::try_from(UNIX_EPOCH + Duration::from_secs(1 << 45)).is_err());
    }

    #[test]
    fn test_float_equality_is_bitwise() {
        let nan = SurfValue::from(f64::NAN);
        assert_eq!(nan, nan.clone());
        assert_eq!(hash_of(&nan), hash_of(&nan.clone()));
        assert_ne!(SurfValue::from(0.0f64), SurfValue::from(-0.0f64));
        assert_ne!(SurfValue::from(1i32), SurfValue::from(1.0f64));
    }

    #[test]
    fn test_pattern_equality_by_source() {
        let a = Pattern::new("^a+$").unwrap();
        let b = Pattern::new("^a+$").unwrap();
        assert_eq!(SurfValue::from(a), SurfValue::from(b));
        assert!(Pattern::new("(unclosed").is_err());
    }

    #[test]
    fn test_scalar_classification() {
        assert!(SurfValue::from(Uuid::nil()).is_scalar());
        assert!(SurfValue::from(Binary(vec![1, 2])).is_scalar());
        assert!(!SurfValue::Object(SurfObject::new("Empty")).is_scalar());
    }

    #[test]
    fn test_serde_json_interop() {
        let value = SurfValue::List(vec![
            SurfValue::from(1),
            SurfValue::from("two"),
            SurfValue::from(Decimal::new(350, 2)),
        ]);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"[1,"two","3.50"]"#);
    }
}
