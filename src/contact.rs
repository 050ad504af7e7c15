//! Contact value types that SURF represents natively.

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// An email address split into local part and domain.
///
/// Validation is structural only: exactly one `@`, a non-empty local part and
/// domain, and no whitespace or control characters.
///
/// # Examples
///
/// ```rust
/// use surf_writer::EmailAddress;
///
/// let address: EmailAddress = "jdoe@example.com".parse().unwrap();
/// assert_eq!(address.domain(), "example.com");
/// assert!("not-an-address".parse::<EmailAddress>().is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EmailAddress {
    local_part: String,
    domain: String,
}

impl EmailAddress {
    /// # Errors
    ///
    /// Returns [`Error::InvalidEmailAddress`] if either part is empty or contains
    /// `@`, whitespace or control characters.
    pub fn new(local_part: &str, domain: &str) -> Result<Self> {
        let invalid = |part: &str| {
            part.is_empty()
                || part
                    .chars()
                    .any(|c| c == '@' || c.is_whitespace() || c.is_control())
        };
        if invalid(local_part) || invalid(domain) {
            return Err(Error::InvalidEmailAddress(format!(
                "{}@{}",
                local_part, domain
            )));
        }
        Ok(EmailAddress {
            local_part: local_part.to_string(),
            domain: domain.to_string(),
        })
    }

    #[must_use]
    pub fn local_part(&self) -> &str {
        &self.local_part
    }

    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }
}

impl FromStr for EmailAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (local_part, domain) = s
            .split_once('@')
            .ok_or_else(|| Error::InvalidEmailAddress(s.to_string()))?;
        EmailAddress::new(local_part, domain).map_err(|_| Error::InvalidEmailAddress(s.to_string()))
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.local_part, self.domain)
    }
}

/// A global telephone number in ITU-T E.164 form.
///
/// Parsing accepts the usual visual separators (spaces, `-`, `.`, parentheses)
/// and keeps only the digits after the leading `+`.
///
/// # Examples
///
/// ```rust
/// use surf_writer::TelephoneNumber;
///
/// let number: TelephoneNumber = "+1 (201) 555-0123".parse().unwrap();
/// assert_eq!(number.to_string(), "+12015550123");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TelephoneNumber {
    digits: String,
}

impl TelephoneNumber {
    /// E.164 allows at most fifteen digits including the country code.
    pub const MAX_DIGITS: usize = 15;

    /// Digits of the number without the leading `+`.
    #[must_use]
    pub fn digits(&self) -> &str {
        &self.digits
    }
}

impl FromStr for TelephoneNumber {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidTelephoneNumber(s.to_string());
        let rest = s.trim().strip_prefix('+').ok_or_else(invalid)?;

        let mut digits = String::with_capacity(Self::MAX_DIGITS);
        for c in rest.chars() {
            match c {
                '0'..='9' => digits.push(c),
                ' ' | '-' | '.' | '(' | ')' => {}
                _ => return Err(invalid()),
            }
        }

        // country codes never start with zero
        if digits.len() < 3 || digits.len() > Self::MAX_DIGITS || digits.starts_with('0') {
            return Err(invalid());
        }
        Ok(TelephoneNumber { digits })
    }
}

impl fmt::Display for TelephoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{}", self.digits)
    }
}
