//! Declarative fixed-column record reading.
//!
//! Legacy structure formats (PDB, MDL MOL/SDF) place every value at a fixed
//! column range. Instead of slicing lines by hand at each call site, a parser
//! declares a static table of [`Field`]s once and reads lines through a
//! [`FixedRecord`]:
//!
//! ```
//! use cyanea_core::fixed::{Field, FixedRecord};
//!
//! static COUNTS: &[Field] = &[
//!     Field::integer("atoms", 0, 3),
//!     Field::integer("bonds", 3, 6),
//! ];
//!
//! let rec = FixedRecord::new("  3  2  0  0  0  0  0  0  0  0999 V2000", COUNTS);
//! assert_eq!(rec.integer("atoms"), Some(3));
//! assert_eq!(rec.integer("bonds"), Some(2));
//! ```
//!
//! Columns are 0-based and half-open. Reads past the end of a short line
//! yield an empty slice rather than panicking.

use crate::{CyaneaError, Result};

/// How a field's text should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Char,
    Integer,
    Real,
}

/// One named column range of a fixed-width record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub start: usize,
    pub end: usize,
    pub kind: FieldKind,
}

impl Field {
    pub const fn new(name: &'static str, start: usize, end: usize, kind: FieldKind) -> Self {
        Field {
            name,
            start,
            end,
            kind,
        }
    }

    pub const fn text(name: &'static str, start: usize, end: usize) -> Self {
        Self::new(name, start, end, FieldKind::Text)
    }

    /// A single-column field.
    pub const fn char(name: &'static str, column: usize) -> Self {
        Self::new(name, column, column + 1, FieldKind::Char)
    }

    pub const fn integer(name: &'static str, start: usize, end: usize) -> Self {
        Self::new(name, start, end, FieldKind::Integer)
    }

    pub const fn real(name: &'static str, start: usize, end: usize) -> Self {
        Self::new(name, start, end, FieldKind::Real)
    }
}

/// A field value decoded according to its [`FieldKind`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    Text(&'a str),
    Char(char),
    Integer(i64),
    Real(f64),
    /// Blank, past the end of the line, or not parseable as the declared kind.
    Missing,
}

/// Slice `line[start..end]`, clamped to the line length and to char boundaries.
pub fn column(line: &str, start: usize, end: usize) -> &str {
    let len = line.len();
    if start >= len || start >= end {
        return "";
    }
    let mut s = start;
    while !line.is_char_boundary(s) {
        s += 1;
    }
    let mut e = end.min(len);
    while !line.is_char_boundary(e) {
        e -= 1;
    }
    if s >= e {
        ""
    } else {
        &line[s..e]
    }
}

/// A line viewed through a static field table.
#[derive(Debug, Clone, Copy)]
pub struct FixedRecord<'a> {
    line: &'a str,
    fields: &'static [Field],
}

impl<'a> FixedRecord<'a> {
    pub fn new(line: &'a str, fields: &'static [Field]) -> Self {
        FixedRecord { line, fields }
    }

    /// The underlying line.
    pub fn line(&self) -> &'a str {
        self.line
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&'static Field> {
        let found = self.fields.iter().find(|f| f.name == name);
        debug_assert!(found.is_some(), "field '{name}' is not declared");
        found
    }

    /// Whether the line reaches the first column of `name`.
    pub fn has(&self, name: &str) -> bool {
        self.field(name).is_some_and(|f| self.line.len() > f.start)
    }

    /// Untrimmed column text.
    pub fn raw(&self, name: &str) -> &'a str {
        match self.field(name) {
            Some(f) => column(self.line, f.start, f.end),
            None => "",
        }
    }

    /// Trimmed column text; empty when blank or past the end of the line.
    pub fn text(&self, name: &str) -> &'a str {
        self.raw(name).trim()
    }

    /// First character of the column, or `None` when blank.
    pub fn char(&self, name: &str) -> Option<char> {
        self.raw(name).chars().next().filter(|c| !c.is_whitespace())
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        let t = self.text(name);
        let t = t.strip_prefix('+').unwrap_or(t);
        t.parse().ok()
    }

    pub fn real(&self, name: &str) -> Option<f64> {
        self.text(name).parse().ok()
    }

    /// Decode a field according to its declared kind.
    pub fn value(&self, name: &str) -> Value<'a> {
        let Some(field) = self.field(name) else {
            return Value::Missing;
        };
        let decoded = match field.kind {
            FieldKind::Text => Some(self.text(name))
                .filter(|t| !t.is_empty())
                .map(Value::Text),
            FieldKind::Char => self.char(name).map(Value::Char),
            FieldKind::Integer => self.integer(name).map(Value::Integer),
            FieldKind::Real => self.real(name).map(Value::Real),
        };
        decoded.unwrap_or(Value::Missing)
    }

    /// Parse an integer field or fail with a format error naming `line_no`.
    pub fn require_integer(&self, name: &str, line_no: usize) -> Result<i64> {
        self.integer(name).ok_or_else(|| {
            CyaneaError::format(
                line_no,
                format!("invalid {name} '{}'", self.text(name)),
            )
        })
    }

    /// Parse a real field or fail with a format error naming `line_no`.
    pub fn require_real(&self, name: &str, line_no: usize) -> Result<f64> {
        self.real(name).ok_or_else(|| {
            CyaneaError::format(
                line_no,
                format!("invalid {name} '{}'", self.text(name)),
            )
        })
    }
}
