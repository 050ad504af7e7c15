//! SURF text serialization.
//!
//! This module provides the [`Serializer`] that renders a [`SurfValue`] as SURF
//! text.
//!
//! ## Lexical forms
//!
//! | Value | Form |
//! |-------|------|
//! | object | `*Type: name = value, …;` |
//! | list | `[a, b]` |
//! | set | `(a, b)` |
//! | map | `{key: value}` |
//! | string | `"text"` |
//! | character | `'c'` |
//! | boolean | `true` / `false` |
//! | number | `42`, `-1.5` |
//! | decimal | `$12.50` |
//! | binary | `%` + unpadded base64url |
//! | regular expression | `/a+b/` |
//! | UUID | `&` + hyphenated UUID |
//! | IRI | `<https://example.com/>` |
//! | email address | `^jdoe@example.com` |
//! | telephone number | `+12015550123` |
//! | temporal | `@` + ISO 8601 |
//!
//! Formatted output puts each property, element and entry on its own line and
//! ends with a newline.
//!
//! ## Usage
//!
//! ```rust
//! use surf_writer::{surf, Serializer, SurfOptions};
//!
//! let document = surf!(*Simple { "foo": "foo", "bar": "bar" });
//!
//! let mut serializer = Serializer::new(SurfOptions::new());
//! serializer.serialize(&document).unwrap();
//! assert_eq!(serializer.into_inner(), r#"*Simple:foo = "foo", bar = "bar";"#);
//!
//! let mut serializer = Serializer::new(SurfOptions::formatted());
//! serializer.serialize(&document).unwrap();
//! assert_eq!(
//!     serializer.into_inner(),
//!     "*Simple:\n  foo = \"foo\"\n  bar = \"bar\"\n;\n"
//! );
//! ```

use crate::value::{Binary, Number, Pattern};
use crate::{Error, Result, SurfMap, SurfObject, SurfOptions, SurfSet, SurfValue};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use std::fmt::Write;

/// The SURF serializer.
///
/// Accumulates rendered text in memory. Created via [`Serializer::new`] and
/// drained with [`Serializer::into_inner`].
pub struct Serializer {
    output: String,
    options: SurfOptions,
    indent_level: usize,
}

impl Serializer {
    pub fn new(options: SurfOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            options,
            indent_level: 0,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Renders `value` as a complete document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedValue`] for NaN and infinite floats. Output
    /// already rendered stays in the buffer; callers that need all-or-nothing
    /// output should discard the serializer on error.
    pub fn serialize(&mut self, value: &SurfValue) -> Result<()> {
        self.write_value(value)?;
        if self.options.formatted {
            self.output.push('\n');
        }
        Ok(())
    }

    fn write_value(&mut self, value: &SurfValue) -> Result<()> {
        match value {
            SurfValue::Boolean(b) => self.output.push_str(if *b { "true" } else { "false" }),
            SurfValue::Character(c) => self.write_character(*c),
            SurfValue::Number(n) => self.write_number(n)?,
            SurfValue::BigInteger(bi) => self.write_display(bi),
            SurfValue::Decimal(d) => {
                self.output.push('$');
                self.write_display(d);
            }
            SurfValue::String(s) => self.write_string(s),
            SurfValue::Binary(bytes) => self.write_binary(bytes),
            SurfValue::Regex(pattern) => self.write_regex(pattern),
            SurfValue::Uuid(uuid) => {
                self.output.push('&');
                self.write_display(&uuid.hyphenated());
            }
            SurfValue::Iri(iri) => {
                self.output.push('<');
                self.output.push_str(iri.as_str());
                self.output.push('>');
            }
            SurfValue::EmailAddress(address) => {
                self.output.push('^');
                self.write_display(address);
            }
            // the `+` prefix is part of the number's own form
            SurfValue::TelephoneNumber(number) => self.write_display(number),
            SurfValue::Temporal(temporal) => {
                self.output.push('@');
                self.write_display(temporal);
            }
            SurfValue::List(list) => self.write_list(list)?,
            SurfValue::Set(set) => self.write_set(set)?,
            SurfValue::Map(map) => self.write_map(map)?,
            SurfValue::Object(object) => self.write_object(object)?,
        }
        Ok(())
    }

    fn write_display<T: std::fmt::Display>(&mut self, value: &T) {
        // writing into a String cannot fail
        let _ = write!(self.output, "{}", value);
    }

    fn write_number(&mut self, number: &Number) -> Result<()> {
        match number {
            Number::Integer(i) => self.write_display(i),
            Number::Float(f) => {
                if !f.is_finite() {
                    return Err(Error::unsupported_value(&format!(
                        "{} has no SURF representation",
                        f
                    )));
                }
                // Debug keeps the fractional part on whole floats (`1.0`)
                let _ = write!(self.output, "{:?}", f);
            }
        }
        Ok(())
    }

    fn write_escaped(&mut self, ch: char, delimiter: char) {
        match ch {
            '\\' => self.output.push_str("\\\\"),
            '\u{0008}' => self.output.push_str("\\b"),
            '\u{000C}' => self.output.push_str("\\f"),
            '\n' => self.output.push_str("\\n"),
            '\r' => self.output.push_str("\\r"),
            '\t' => self.output.push_str("\\t"),
            c if c == delimiter => {
                self.output.push('\\');
                self.output.push(c);
            }
            c if c.is_control() => {
                let _ = write!(self.output, "\\u{:04X}", c as u32);
            }
            c => self.output.push(c),
        }
    }

    fn write_string(&mut self, s: &str) {
        self.output.push('"');
        for ch in s.chars() {
            self.write_escaped(ch, '"');
        }
        self.output.push('"');
    }

    fn write_character(&mut self, c: char) {
        self.output.push('\'');
        self.write_escaped(c, '\'');
        self.output.push('\'');
    }

    fn write_binary(&mut self, bytes: &Binary) {
        self.output.push('%');
        URL_SAFE_NO_PAD.encode_string(bytes.as_bytes(), &mut self.output);
    }

    fn write_regex(&mut self, pattern: &Pattern) {
        self.output.push('/');
        let mut chars = pattern.as_str().chars();
        while let Some(ch) = chars.next() {
            match ch {
                '/' => self.output.push_str("\\/"),
                // existing escapes are kept as written
                '\\' => {
                    self.output.push('\\');
                    if let Some(next) = chars.next() {
                        self.output.push(next);
                    }
                }
                c => self.output.push(c),
            }
        }
        self.output.push('/');
    }

    fn write_indent(&mut self) {
        let width = self.indent_level * self.options.indent;
        self.output.extend(std::iter::repeat(' ').take(width));
    }

    /// Writes the separator before item `index` of a container.
    fn write_item_separator(&mut self, index: usize) {
        if self.options.formatted {
            self.output.push('\n');
            self.write_indent();
        } else if index > 0 {
            self.output.push_str(", ");
        }
    }

    fn write_container_close(&mut self, close: char) {
        if self.options.formatted {
            self.output.push('\n');
            self.write_indent();
        }
        self.output.push(close);
    }

    fn write_sequence<'v, I>(&mut self, open: char, close: char, items: I) -> Result<()>
    where
        I: ExactSizeIterator<Item = &'v SurfValue>,
    {
        self.output.push(open);
        if items.len() == 0 {
            self.output.push(close);
            return Ok(());
        }

        self.indent_level += 1;
        for (index, item) in items.enumerate() {
            self.write_item_separator(index);
            self.write_value(item)?;
        }
        self.indent_level -= 1;
        self.write_container_close(close);
        Ok(())
    }

    fn write_list(&mut self, list: &[SurfValue]) -> Result<()> {
        self.write_sequence('[', ']', list.iter())
    }

    fn write_set(&mut self, set: &SurfSet) -> Result<()> {
        self.write_sequence('(', ')', set.iter())
    }

    fn write_map(&mut self, map: &SurfMap) -> Result<()> {
        self.output.push('{');
        if map.is_empty() {
            self.output.push('}');
            return Ok(());
        }

        self.indent_level += 1;
        for (index, (key, value)) in map.iter().enumerate() {
            self.write_item_separator(index);
            self.write_value(key)?;
            self.output.push_str(": ");
            self.write_value(value)?;
        }
        self.indent_level -= 1;
        self.write_container_close('}');
        Ok(())
    }

    fn write_object(&mut self, object: &SurfObject) -> Result<()> {
        self.output.push('*');
        self.output.push_str(object.type_name());
        self.output.push(':');
        if object.is_empty() {
            self.output.push(';');
            return Ok(());
        }

        self.indent_level += 1;
        for (index, (name, value)) in object.iter().enumerate() {
            self.write_item_separator(index);
            self.output.push_str(name);
            self.output.push_str(" = ");
            self.write_value(value)?;
        }
        self.indent_level -= 1;
        self.write_container_close(';');
        Ok(())
    }
}

/// Renders `value` with `options` into a new string.
///
/// # Errors
///
/// See [`Serializer::serialize`].
pub fn to_string(value: &SurfValue, options: SurfOptions) -> Result<String> {
    let mut serializer = Serializer::new(options);
    serializer.serialize(value)?;
    Ok(serializer.into_inner())
}
