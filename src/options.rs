//! Configuration options for SURF transformation and rendering.
//!
//! - [`SurfOptions`]: layout of the rendered SURF text
//! - [`TransformOptions`]: limits applied while walking an object graph
//!
//! ## Examples
//!
//! ```rust
//! use surf_writer::{to_string_with_options, SurfOptions};
//!
//! let compact = to_string_with_options(&vec![1, 2, 3], SurfOptions::new()).unwrap();
//! assert_eq!(compact, "[1, 2, 3]");
//!
//! let formatted = to_string_with_options(&vec![1, 2], SurfOptions::formatted()).unwrap();
//! assert_eq!(formatted, "[\n  1\n  2\n]\n");
//! ```

/// Layout options for the SURF text serializer.
///
/// # Examples
///
/// ```rust
/// use surf_writer::SurfOptions;
///
/// // Single line
/// let options = SurfOptions::new();
/// assert!(!options.formatted);
///
/// // One entry per line, four spaces per level
/// let options = SurfOptions::formatted().with_indent(4);
/// assert!(options.formatted);
/// assert_eq!(options.indent, 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SurfOptions {
    /// Puts every property, element and entry on its own line.
    pub formatted: bool,
    /// Spaces per nesting level in formatted output.
    pub indent: usize,
}

impl Default for SurfOptions {
    fn default() -> Self {
        SurfOptions {
            formatted: false,
            indent: 2,
        }
    }
}

impl SurfOptions {
    /// Creates default options (single-line output, 2-space indent).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for formatted output, one entry per line.
    ///
    /// This is the layout [`crate::SurfWriter`] uses unless told otherwise.
    #[must_use]
    pub fn formatted() -> Self {
        SurfOptions {
            formatted: true,
            ..Default::default()
        }
    }

    /// Sets the indentation size (number of spaces per level).
    ///
    /// Only affects formatted output.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub fn with_formatted(mut self, formatted: bool) -> Self {
        self.formatted = formatted;
        self
    }
}

/// Limits for [`crate::Transformer`].
///
/// By default the transformer follows the object graph as deep as it goes. A
/// cyclic graph then never terminates, so callers that cannot rule out cycles
/// should set a depth limit.
///
/// # Examples
///
/// ```rust
/// use surf_writer::TransformOptions;
///
/// assert_eq!(TransformOptions::new().max_depth, None);
/// assert_eq!(TransformOptions::new().with_max_depth(64).max_depth, Some(64));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransformOptions {
    /// Most containers and records allowed on any path from the root,
    /// the root itself included. Natives and indirections do not count.
    pub max_depth: Option<usize>,
}

impl TransformOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = SurfOptions::default();
        assert!(!options.formatted);
        assert_eq!(options.indent, 2);
        assert_eq!(TransformOptions::default().max_depth, None);
    }

    #[test]
    fn test_builder_chain() {
        let options = SurfOptions::new().with_formatted(true).with_indent(3);
        assert_eq!(
            options,
            SurfOptions {
                formatted: true,
                indent: 3
            }
        );
    }
}
