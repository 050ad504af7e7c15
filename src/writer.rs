//! Writing object graphs as SURF messages.
//!
//! [`SurfWriter`] is the adapter between application values and an output
//! stream: it transforms the value once, renders the document as formatted
//! SURF and writes it out. An absent value produces an empty message.
//!
//! ```rust
//! use surf_writer::{surf_record, SurfWriter};
//!
//! struct Greeting {
//!     text: String,
//! }
//!
//! surf_record!(Greeting { text });
//!
//! let mut body = Vec::new();
//! SurfWriter::new()
//!     .write_to(&Greeting { text: "hello".to_string() }, &mut body)
//!     .unwrap();
//! assert_eq!(body, b"*Greeting:\n  text = \"hello\"\n;\n");
//!
//! let mut empty = Vec::new();
//! SurfWriter::new().write_to(&None::<Greeting>, &mut empty).unwrap();
//! assert!(empty.is_empty());
//! ```

use crate::reflect::Reflect;
use crate::{ser, Result, SurfOptions, Transformer};
use std::io;
use tracing::debug;

/// Media type of SURF messages.
pub const MEDIA_TYPE: &str = "text/surf";

/// Transforms values and writes them as SURF text.
#[derive(Clone, Debug)]
pub struct SurfWriter {
    transformer: Transformer,
    options: SurfOptions,
}

impl SurfWriter {
    /// Creates a writer with the default transformer and formatted output.
    #[must_use]
    pub fn new() -> Self {
        SurfWriter {
            transformer: Transformer::new(),
            options: SurfOptions::formatted(),
        }
    }

    #[must_use]
    pub fn with_transformer(mut self, transformer: Transformer) -> Self {
        self.transformer = transformer;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: SurfOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn media_type(&self) -> &'static str {
        MEDIA_TYPE
    }

    /// Renders `value` to a string, or `None` if it is absent.
    ///
    /// # Errors
    ///
    /// Fails as [`Transformer::transform`] and [`ser::Serializer::serialize`] do.
    pub fn render<T: Reflect>(&self, value: &T) -> Result<Option<String>> {
        match self.transformer.transform(value)? {
            Some(document) => ser::to_string(&document, self.options.clone()).map(Some),
            None => Ok(None),
        }
    }

    /// Writes `value` to `out` as a SURF message.
    ///
    /// Nothing is written when `value` is absent, or when transformation or
    /// rendering fails: the document is rendered completely before the first
    /// byte goes out.
    ///
    /// # Errors
    ///
    /// Transformation and rendering errors are returned unchanged; failures of
    /// `out` are reported as [`crate::Error::Io`].
    pub fn write_to<T, W>(&self, value: &T, mut out: W) -> Result<()>
    where
        T: Reflect,
        W: io::Write,
    {
        let Some(text) = self.render(value)? else {
            debug!(root = value.type_name(), "absent root, nothing written");
            return Ok(());
        };
        out.write_all(text.as_bytes())?;
        out.flush()?;
        debug!(
            root = value.type_name(),
            bytes = text.len(),
            "wrote SURF message"
        );
        Ok(())
    }
}

impl Default for SurfWriter {
    fn default() -> Self {
        SurfWriter::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, PropertyVisitor};
    use std::any::Any;

    struct Broken;

    impl Reflect for Broken {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn introspect(&self, _visitor: &mut dyn PropertyVisitor) -> Result<()> {
            Err(Error::introspection("Broken", None, "properties unavailable"))
        }
    }

    struct FailingSink;

    impl io::Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_media_type() {
        assert_eq!(SurfWriter::new().media_type(), "text/surf");
    }

    #[test]
    fn test_absent_root_writes_nothing() {
        let mut out = Vec::new();
        SurfWriter::new()
            .write_to(&Option::<String>::None, &mut out)
            .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_failure_writes_nothing() {
        let mut out = Vec::new();
        let err = SurfWriter::new()
            .write_to(&vec![Broken], &mut out)
            .unwrap_err();
        assert!(err.is_introspection());
        assert!(out.is_empty());
    }

    #[test]
    fn test_sink_errors_become_io_errors() {
        let err = SurfWriter::new().write_to(&1, FailingSink).unwrap_err();
        assert!(matches!(err, Error::Io(ref msg) if msg == "closed"));
    }

    #[test]
    fn test_compact_option() {
        let writer = SurfWriter::new().with_options(SurfOptions::new());
        assert_eq!(
            writer.render(&vec![1, 2]).unwrap(),
            Some("[1, 2]".to_string())
        );
    }
}
