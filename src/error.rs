//! Error types for SURF transformation and serialization.
//!
//! ## Error Categories
//!
//! - **Introspection failures**: a record could not enumerate its properties or a
//!   property getter failed. Fatal for the current transformation.
//! - **Unsupported keys**: a map key is not a native SURF value.
//! - **Depth limit**: the object graph is nested deeper than the configured limit.
//! - **Unsupported values**: the serializer met a value SURF cannot express
//!   (non-finite floats).
//! - **Invalid domain values**: malformed email addresses, telephone numbers or
//!   temporal fields.
//! - **I/O Errors**: writing the rendered document failed.
//!
//! An absent root value is *not* an error; see [`crate::Transformer::transform`].
//!
//! ## Examples
//!
//! ```rust
//! use surf_writer::Error;
//!
//! let err = Error::introspection("Account", Some("balance"), "ledger unavailable");
//! assert!(err.to_string().contains("Account.balance"));
//! ```

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Shareable underlying cause of an introspection failure.
pub type Cause = Arc<dyn StdError + Send + Sync + 'static>;

/// Represents all possible errors that can occur while transforming or writing SURF.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// A record's properties could not be enumerated or read.
    #[error("Cannot introspect {}: {source}", describe_target(.type_name, .property.as_deref()))]
    Introspection {
        type_name: String,
        property: Option<String>,
        #[source]
        source: Cause,
    },

    /// A map key that is not a native SURF value
    #[error("Unsupported map key of type {type_name}: keys must be native SURF values")]
    UnsupportedKey { type_name: String },

    /// The object graph is nested deeper than the configured limit
    #[error("Object graph exceeds the maximum depth of {limit}")]
    DepthLimitExceeded { limit: usize },

    /// Value that cannot be expressed in SURF
    #[error("Unsupported value: {0}")]
    UnsupportedValue(String),

    #[error("Invalid email address: {0}")]
    InvalidEmailAddress(String),

    #[error("Invalid telephone number: {0}")]
    InvalidTelephoneNumber(String),

    #[error("Invalid temporal value: {0}")]
    InvalidTemporal(String),

    /// IO error during writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

fn describe_target(type_name: &str, property: Option<&str>) -> String {
    match property {
        Some(property) => format!("{}.{}", type_name, property),
        None => type_name.to_string(),
    }
}

/// Plain-text cause used when a getter reports failure with a message only.
#[derive(Debug)]
struct Message(String);

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl StdError for Message {}

impl Error {
    /// Creates an introspection failure with a textual cause.
    ///
    /// `property` is `None` when the failure concerns enumerating the properties
    /// of `type_name` rather than reading one of them.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use surf_writer::Error;
    ///
    /// let err = Error::introspection("Simple", None, "access denied");
    /// assert_eq!(err.to_string(), "Cannot introspect Simple: access denied");
    /// ```
    pub fn introspection<M: fmt::Display>(type_name: &str, property: Option<&str>, msg: M) -> Self {
        Error::Introspection {
            type_name: type_name.to_string(),
            property: property.map(str::to_string),
            source: Arc::new(Message(msg.to_string())),
        }
    }

    /// Creates an introspection failure wrapping the error a getter returned.
    ///
    /// The cause stays reachable through [`std::error::Error::source`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::error::Error as _;
    /// use surf_writer::Error;
    ///
    /// let cause = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    /// let err = Error::introspection_source("Simple", Some("foo"), cause);
    /// assert_eq!(err.source().map(|s| s.to_string()), Some("denied".to_string()));
    /// ```
    pub fn introspection_source<E>(type_name: &str, property: Option<&str>, cause: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Error::Introspection {
            type_name: type_name.to_string(),
            property: property.map(str::to_string),
            source: Arc::new(cause),
        }
    }

    pub fn unsupported_key(type_name: &str) -> Self {
        Error::UnsupportedKey {
            type_name: type_name.to_string(),
        }
    }

    pub fn depth_limit_exceeded(limit: usize) -> Self {
        Error::DepthLimitExceeded { limit }
    }

    /// Creates an unsupported value error for values SURF has no lexical form for.
    pub fn unsupported_value(msg: &str) -> Self {
        Error::UnsupportedValue(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use surf_writer::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns `true` for failures raised while reading a record's properties.
    #[must_use]
    pub fn is_introspection(&self) -> bool {
        matches!(self, Error::Introspection { .. })
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::io(&err.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
